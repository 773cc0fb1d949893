mod action;
mod auth_mode;
mod backend_status;
mod event;
mod identity;
mod loading;
mod location;
mod message;
mod session;
mod storage;
mod textarea;
mod workspace;

pub use action::*;
pub use auth_mode::*;
pub use backend_status::*;
pub use event::*;
pub use identity::*;
pub use loading::*;
pub use location::*;
pub use message::*;
pub use session::*;
pub use storage::*;
pub use textarea::*;
pub use workspace::*;
