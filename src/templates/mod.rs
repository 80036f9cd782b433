pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{detail_panel, html_error_response};
pub use layouts::mini_app::mini_app_layout;
