pub mod surface;

pub use surface::{DisplaySurface, DrawCommand, RecordingSurface, TileBlit};
