//! Sine oscillator.

use std::f64::consts::TAU;

use brio_core::{AudioBufferView, DspNode};

/// Free-running sine generator writing the same value to every channel.
pub struct SineOscillatorNode {
    phase: f64,
    frequency: f64,
    sample_rate: f64,
}

impl SineOscillatorNode {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            frequency: 440.0,
            sample_rate: 48_000.0,
        }
    }

    pub fn with_frequency(frequency: f64) -> Self {
        Self {
            frequency,
            ..Self::new()
        }
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl Default for SineOscillatorNode {
    fn default() -> Self {
        Self::new()
    }
}

impl DspNode for SineOscillatorNode {
    fn prepare(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.phase = 0.0;
    }

    fn process(&mut self, buffer: &mut AudioBufferView<'_>) {
        let phase_delta = TAU * self.frequency / self.sample_rate;
        for i in 0..buffer.frame_count() {
            let value = self.phase.sin() as f32;
            self.phase += phase_delta;
            if self.phase > TAU {
                self.phase -= TAU;
            }
            for ch in 0..buffer.channel_count() {
                buffer.channel_mut(ch)[i] = value;
            }
        }
    }

    fn set_parameter(&mut self, name: &str, value: f64) {
        if name == "frequency" && value.is_finite() {
            self.frequency = value;
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
