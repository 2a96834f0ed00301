pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{rating_from_dial, rating_leds, InputSample};
pub use handler::{Joystick, SelectButton};
