mod app;
mod input;
pub mod selection;

pub use app::App;
