//! Real-time audio graph runtime: buffers, clock, scheduler, scene graph.
//!
//! # Primary API
//!
//! - [`SceneGraph`]: node storage, connections, topological render
//! - [`DspNode`]: the behavioral contract every node implements
//! - [`RenderClock`] / [`RealTimeScheduler`]: audio-domain timing and
//!   frame-stamped automation dispatch
//! - [`AudioBufferView`] / [`StackAudioBuffer`]: block sample storage
//!
//! # Example
//!
//! ```ignore
//! use brio_core::{AudioBufferView, SceneGraph, OUTPUT_BUS_ID};
//!
//! let mut graph = SceneGraph::new(48_000.0, 128)?;
//! graph.add_node("osc", Box::new(osc));
//! graph.connect("osc", OUTPUT_BUS_ID);
//!
//! let mut samples = vec![0.0f32; 2 * 128];
//! let mut view = AudioBufferView::new(&mut samples, 2, 128);
//! graph.render(&mut view);
//! ```

// Error types
pub mod error;
pub use error::{Error, Result};

// Block sample storage
mod buffer;
pub use buffer::{AudioBufferView, StackAudioBuffer};

// Render clock
mod clock;
pub use clock::RenderClock;

// Lock-free primitives
pub mod lockfree;
pub use lockfree::AtomicFlag;

// Automation scheduler
mod scheduler;
pub use scheduler::{AutomationFn, RealTimeScheduler, ScheduledEvent};

// Node contract
mod node;
pub use node::DspNode;

// Scene graph
mod graph;
pub use graph::{SceneGraph, MAX_CHANNELS, MAX_FRAMES, OUTPUT_BUS_ID, SCHEDULER_CAPACITY};
