mod actions;
mod app_state;
mod chat;
mod credential_store;
pub mod events;
mod identity_bridge;
mod scroll;
mod session_verifier;
mod workspace_auth;

pub use actions::*;
pub use app_state::*;
pub use chat::*;
pub use credential_store::*;
pub use identity_bridge::*;
pub use scroll::*;
pub use session_verifier::*;
pub use workspace_auth::*;
