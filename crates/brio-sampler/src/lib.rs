//! Clip sample storage and playback for the brio scene graph.

pub mod error;
pub use error::ClipError;

mod clip;
pub use clip::{ClipBuffer, ClipRegistry};

mod player;
pub use player::ClipPlayerNode;
