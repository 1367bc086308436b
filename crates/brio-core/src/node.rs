//! The DSP node contract.

use std::any::Any;

use crate::buffer::AudioBufferView;

/// Behavioral contract shared by every node in a scene graph.
///
/// Nodes are owned exclusively by the graph that holds them. `process` runs
/// on the audio thread and must neither allocate nor block; parameter
/// updates arrive either from the control plane before a node is inserted,
/// or on the audio thread through scheduled automation callbacks.
pub trait DspNode: Send {
    /// Called when the node is added to a graph or the sample rate changes.
    /// Records the rate and resets transient state.
    fn prepare(&mut self, _sample_rate: f64) {}

    /// Clears playback state without touching parameters.
    fn reset(&mut self) {}

    /// Produces this node's output for the current block, in place.
    fn process(&mut self, buffer: &mut AudioBufferView<'_>);

    /// Applies a named numeric parameter. Unknown names are ignored;
    /// non-finite values are sanitized per parameter.
    fn set_parameter(&mut self, name: &str, value: f64);

    /// Downcast access for automation callbacks that need the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
