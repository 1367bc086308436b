//! Gain stage.

use brio_core::{AudioBufferView, DspNode};

/// Scales every sample in place by a single gain factor.
pub struct GainNode {
    gain: f64,
}

impl GainNode {
    pub fn new() -> Self {
        Self { gain: 1.0 }
    }

    pub fn with_gain(gain: f64) -> Self {
        Self { gain }
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl Default for GainNode {
    fn default() -> Self {
        Self::new()
    }
}

impl DspNode for GainNode {
    fn process(&mut self, buffer: &mut AudioBufferView<'_>) {
        let gain = self.gain;
        for ch in 0..buffer.channel_count() {
            for sample in buffer.channel_mut(ch) {
                *sample = (f64::from(*sample) * gain) as f32;
            }
        }
    }

    fn set_parameter(&mut self, name: &str, value: f64) {
        if name == "gain" && value.is_finite() {
            self.gain = value;
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
