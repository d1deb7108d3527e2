pub mod core;
mod interpret_effect;
pub mod main;
pub mod render;
mod run;
