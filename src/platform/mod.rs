//! Platform abstraction layer
//!
//! Handles the host-facing edges of the simulation:
//! - Pointer input (press/release edges and position)
//! - Frame clock (wall-clock milliseconds to frame `dt`)

pub mod input;
pub mod ticker;

pub use input::{InputProvider, PointerState};
pub use ticker::Ticker;
