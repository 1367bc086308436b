//! Built-in DSP nodes for the brio scene graph.

mod gain;
pub use gain::GainNode;

mod mixer;
pub use mixer::MixerNode;

mod oscillator;
pub use oscillator::SineOscillatorNode;
