mod workspace;

pub use workspace::*;
