mod launch;

pub use launch::*;
