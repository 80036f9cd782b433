pub mod marker;
pub mod state;

pub use state::{MapState, RenderReport, SkippedListing};
