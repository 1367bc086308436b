//! Clip playback node.

use std::sync::Arc;

use brio_core::{AudioBufferView, DspNode};

use crate::clip::ClipBuffer;

/// Plays a registered clip across an absolute render-frame window, with
/// optional fade-in and fade-out ramps.
///
/// The node counts frames it has seen since construction or `reset` and
/// writes clip samples wherever that running position falls inside
/// `[start_frame, end_frame)`. Samples are written absolutely rather than
/// summed; the scene graph zeroes the scratch buffer before `process` runs.
pub struct ClipPlayerNode {
    clip: Option<Arc<ClipBuffer>>,
    start_frame: u64,
    end_frame: u64,
    fade_in_frames: u64,
    fade_out_frames: u64,
    gain: f64,
    declared_sample_rate: f64,
    declared_channels: u64,
    declared_frames: u64,
    processed_frames: u64,
}

impl ClipPlayerNode {
    pub fn new() -> Self {
        Self {
            clip: None,
            start_frame: 0,
            end_frame: 0,
            fade_in_frames: 0,
            fade_out_frames: 0,
            gain: 1.0,
            declared_sample_rate: 0.0,
            declared_channels: 0,
            declared_frames: 0,
            processed_frames: 0,
        }
    }

    /// Attaches clip data. The node holds its own reference, so the clip
    /// outlives any registry unregistration while this node is alive.
    pub fn set_clip(&mut self, clip: Option<Arc<ClipBuffer>>) {
        if let Some(clip) = &clip {
            self.declared_sample_rate = clip.sample_rate();
            self.declared_channels = clip.channel_count() as u64;
            self.declared_frames = clip.frame_count() as u64;
        }
        self.clip = clip;
    }

    pub fn clip(&self) -> Option<&Arc<ClipBuffer>> {
        self.clip.as_ref()
    }

    pub fn processed_frames(&self) -> u64 {
        self.processed_frames
    }

    /// Buffer metadata as declared by the host, `(sample_rate, channels,
    /// frames)`. Kept alongside the attached clip for diagnostics.
    pub fn declared_buffer(&self) -> (f64, u64, u64) {
        (
            self.declared_sample_rate,
            self.declared_channels,
            self.declared_frames,
        )
    }

    /// Non-finite and non-positive values sanitize to 0; everything else
    /// rounds half-up.
    fn sanitize_frames(value: f64) -> u64 {
        if !value.is_finite() || value <= 0.0 {
            return 0;
        }
        let clamped = value.min(u64::MAX as f64);
        (clamped + 0.5).floor() as u64
    }
}

impl Default for ClipPlayerNode {
    fn default() -> Self {
        Self::new()
    }
}

impl DspNode for ClipPlayerNode {
    fn prepare(&mut self, _sample_rate: f64) {
        self.processed_frames = 0;
    }

    fn reset(&mut self) {
        self.processed_frames = 0;
    }

    fn process(&mut self, buffer: &mut AudioBufferView<'_>) {
        let frame_count = buffer.frame_count();
        if frame_count == 0 {
            return;
        }
        let output_channels = buffer.channel_count();
        let Some(clip) = &self.clip else {
            self.processed_frames += frame_count as u64;
            return;
        };
        if output_channels == 0 {
            self.processed_frames += frame_count as u64;
            return;
        }

        let clip_channels = clip.channel_count();
        let clip_frames = clip.frame_count() as u64;
        let start = self.start_frame;
        let end = self.start_frame.max(self.end_frame);
        let effective_end = end.min(start.saturating_add(clip_frames));
        let playback_frames = effective_end.saturating_sub(start);
        // With a fade-out at least as long as the playback window there is
        // no plain body; the whole window rides the fade-out ramp.
        let fade_out_start = if self.fade_out_frames >= playback_frames || playback_frames == 0 {
            start
        } else {
            effective_end - self.fade_out_frames
        };

        for i in 0..frame_count {
            let absolute = self.processed_frames + i as u64;
            if absolute < start || absolute >= effective_end {
                continue;
            }
            let clip_frame = (absolute - start) as usize;
            if clip_frame >= clip.frame_count() {
                continue;
            }

            let mut amplitude = self.gain;
            if self.fade_in_frames > 0 && absolute < start + self.fade_in_frames {
                let offset = absolute - start;
                amplitude *= (offset + 1) as f64 / self.fade_in_frames as f64;
            }
            if self.fade_out_frames > 0 && absolute >= fade_out_start {
                let remaining = effective_end - absolute;
                let divisor = self.fade_out_frames.min(playback_frames).max(1);
                amplitude *= remaining as f64 / divisor as f64;
            }

            for ch in 0..output_channels {
                let source_channel = if clip_channels == 1 {
                    0
                } else {
                    ch.min(clip_channels - 1)
                };
                let sample = clip.channel(source_channel)[clip_frame];
                buffer.channel_mut(ch)[i] = (f64::from(sample) * amplitude) as f32;
            }
        }

        self.processed_frames += frame_count as u64;
    }

    fn set_parameter(&mut self, name: &str, value: f64) {
        match name {
            "startframe" => self.start_frame = Self::sanitize_frames(value),
            "endframe" => self.end_frame = Self::sanitize_frames(value),
            "fadeinframes" => self.fade_in_frames = Self::sanitize_frames(value),
            "fadeoutframes" => self.fade_out_frames = Self::sanitize_frames(value),
            "gain" => {
                if value.is_finite() {
                    self.gain = value;
                }
            }
            "buffersamplerate" => {
                self.declared_sample_rate = if value.is_finite() && value > 0.0 {
                    value
                } else {
                    0.0
                };
            }
            "bufferchannels" => self.declared_channels = Self::sanitize_frames(value),
            "bufferframes" => self.declared_frames = Self::sanitize_frames(value),
            _ => {}
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
