pub mod api;
pub mod identity;
pub mod location;
pub mod storage;
