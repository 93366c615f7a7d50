pub mod app;
pub mod input;
pub mod launcher;
pub mod render;
pub mod theme;

pub use app::{LaunchOptions, run};
