pub mod category;
pub mod listing;
pub mod location;

pub use category::Category;
pub use listing::Listing;
pub use location::{parse_location, Coordinates};
