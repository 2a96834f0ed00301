pub mod ranking;

pub use ranking::{DistanceRanker, RankedEntry};
