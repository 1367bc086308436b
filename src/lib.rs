//! # Brio - real-time audio scene-graph engine
//!
//! Brio renders a directed graph of DSP nodes into blocks of output audio.
//! A host invokes [`SceneGraph::render`] once per audio period; the engine
//! dispatches due parameter automation, evaluates the topology, and mixes
//! the nodes feeding the output bus into the host's buffer.
//!
//! ## Architecture
//!
//! Brio is an umbrella crate that coordinates:
//! - **brio-core** - Audio graph runtime (scene graph, render clock,
//!   real-time scheduler, block buffers)
//! - **brio-dsp** - Built-in DSP nodes (gain, sine oscillator, mixer)
//! - **brio-sampler** - Clip sample storage and the clip player node
//! - **brio-plugin** - Plugin hosting (host bridge slot, plugin proxy node)
//!
//! ## Quick Start
//!
//! ```
//! use brio::prelude::*;
//!
//! let mut graph = SceneGraph::new(48_000.0, 128).unwrap();
//! graph.add_node("osc", Box::new(SineOscillatorNode::with_frequency(440.0)));
//! graph.add_node("gain", Box::new(GainNode::with_gain(0.5)));
//! graph.connect("osc", "gain");
//! graph.connect("gain", OUTPUT_BUS_ID);
//!
//! let mut samples = vec![0.0f32; 2 * 128];
//! let mut view = AudioBufferView::new(&mut samples, 2, 128);
//! graph.render(&mut view);
//! ```
//!
//! ## Threading
//!
//! `render` is audio-thread-only and never locks, allocates, or blocks.
//! Graph mutations and automation scheduling belong to the control thread
//! and must be serialized against render by the host.

/// Re-export of brio-core for direct access
pub use brio_core as core;

// Audio graph runtime
pub use brio_core::{
    // Lock-free primitives
    AtomicFlag,
    // Block sample storage
    AudioBufferView,
    // Node contract
    DspNode,
    // Error
    Error,
    RealTimeScheduler,
    // Timing
    RenderClock,
    Result,
    // Scene graph
    SceneGraph,
    ScheduledEvent,
    StackAudioBuffer,
    MAX_CHANNELS,
    MAX_FRAMES,
    OUTPUT_BUS_ID,
    SCHEDULER_CAPACITY,
};

// Built-in DSP nodes
pub use brio_dsp as dsp;
pub use brio_dsp::{GainNode, MixerNode, SineOscillatorNode};

// Clip playback
pub use brio_sampler as sampler;
pub use brio_sampler::{ClipBuffer, ClipError, ClipPlayerNode, ClipRegistry};

// Plugin hosting
pub use brio_plugin as plugin;
pub use brio_plugin::{
    PluginBusCapabilities, PluginNode, PluginRenderRequest, PluginRenderResult,
};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{
        AudioBufferView, ClipPlayerNode, ClipRegistry, DspNode, GainNode, MixerNode, PluginNode,
        SceneGraph, SineOscillatorNode, StackAudioBuffer, OUTPUT_BUS_ID,
    };
}
