mod app;
pub use app::*;

pub mod canvas;
pub mod input;
pub mod platform;
pub mod store;

mod window_resizing;
