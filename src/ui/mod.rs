pub mod list;

pub use list::{normalized_rating, skip_distance, FilteredListRenderer, ListItem};
