pub mod cli;
pub mod inputs;
pub mod ui;
pub mod view;
