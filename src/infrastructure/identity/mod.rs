mod terminal;

pub use terminal::*;
