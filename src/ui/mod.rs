pub mod app;
pub mod command;
pub mod context;
pub mod mount;
pub mod render;

pub use app::App;
pub use context::{Context, Panel};
pub use mount::Mount;
pub use render::Theme;
