//! Fixed-slot summing mixer.

use brio_core::{AudioBufferView, DspNode};

/// Sums a fixed number of mono input slots into every output channel.
///
/// Input data is copied into owned slots at update time, so no borrowed
/// slice has to outlive its source. A slot whose length does not match the
/// block is skipped; a late or missing input never faults the render.
pub struct MixerNode {
    inputs: Vec<Vec<f32>>,
    gain: f64,
}

impl MixerNode {
    pub fn new(input_count: usize) -> Self {
        Self {
            inputs: vec![Vec::new(); input_count],
            gain: 1.0,
        }
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Replaces one input slot. Out-of-range indices are ignored.
    pub fn update_input(&mut self, index: usize, input: &[f32]) {
        let Some(slot) = self.inputs.get_mut(index) else {
            return;
        };
        slot.clear();
        slot.extend_from_slice(input);
    }
}

impl DspNode for MixerNode {
    fn process(&mut self, buffer: &mut AudioBufferView<'_>) {
        buffer.fill(0.0);
        let frame_count = buffer.frame_count();
        for input in &self.inputs {
            if input.len() != frame_count {
                continue;
            }
            for (i, &sample) in input.iter().enumerate() {
                let value = (f64::from(sample) * self.gain) as f32;
                for ch in 0..buffer.channel_count() {
                    buffer.channel_mut(ch)[i] += value;
                }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn render(node: &mut MixerNode, channels: usize, frames: usize) -> Vec<f32> {
        let mut samples = vec![7.0f32; channels * frames];
        let mut view = AudioBufferView::new(&mut samples, channels, frames);
        node.process(&mut view);
        samples
    }

    #[test]
    fn test_empty_mixer_outputs_silence() {
        let mut node = MixerNode::new(2);
        let samples = render(&mut node, 1, 4);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_inputs_sum_into_every_channel() {
        let mut node = MixerNode::new(2);
        node.update_input(0, &[0.25, 0.25, 0.25, 0.25]);
        node.update_input(1, &[0.5, 0.5, 0.5, 0.5]);
        let samples = render(&mut node, 2, 4);
        for sample in samples {
            assert!((sample - 0.75).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mismatched_input_length_skipped() {
        let mut node = MixerNode::new(2);
        node.update_input(0, &[1.0, 1.0, 1.0, 1.0]);
        node.update_input(1, &[1.0, 1.0]);
        let samples = render(&mut node, 1, 4);
        for sample in samples {
            assert!((sample - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_gain_applied_per_input_sample() {
        let mut node = MixerNode::new(1);
        node.set_parameter("gain", 0.5);
        node.update_input(0, &[1.0, 2.0]);
        let samples = render(&mut node, 1, 2);
        assert!((samples[0] - 0.5).abs() < 1e-6);
        assert!((samples[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_slot_ignored() {
        let mut node = MixerNode::new(1);
        node.update_input(5, &[1.0, 1.0]);
        assert_eq!(node.input_count(), 1);
        let samples = render(&mut node, 1, 2);
        assert!(samples.iter().all(|&s| s == 0.0));
    }
}
