//! Block sample storage and the views handed to DSP nodes.
//!
//! [`AudioBufferView`] is the non-owning currency passed to every node for
//! one render block. Channel data is channel-major and contiguous with an
//! explicit row stride, so a view can borrow tightly packed host storage as
//! well as the fixed-capacity scratch behind [`StackAudioBuffer`] without
//! copying. Neither type allocates after construction.

/// Mutable, non-owning view over per-channel sample storage for one block.
pub struct AudioBufferView<'a> {
    samples: &'a mut [f32],
    channel_count: usize,
    frame_count: usize,
    stride: usize,
}

impl<'a> AudioBufferView<'a> {
    /// View over tightly packed storage holding
    /// `channel_count * frame_count` samples.
    pub fn new(samples: &'a mut [f32], channel_count: usize, frame_count: usize) -> Self {
        Self::with_stride(samples, channel_count, frame_count, frame_count)
    }

    /// View over channel-major storage whose rows sit `stride` samples apart.
    pub fn with_stride(
        samples: &'a mut [f32],
        channel_count: usize,
        frame_count: usize,
        stride: usize,
    ) -> Self {
        debug_assert!(frame_count <= stride || channel_count == 0);
        debug_assert!(
            channel_count == 0 || samples.len() >= (channel_count - 1) * stride + frame_count
        );
        Self {
            samples,
            channel_count,
            frame_count,
            stride,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        debug_assert!(index < self.channel_count);
        let start = index * self.stride;
        &self.samples[start..start + self.frame_count]
    }

    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        debug_assert!(index < self.channel_count);
        let start = index * self.stride;
        &mut self.samples[start..start + self.frame_count]
    }

    /// Writes `value` to every sample in every channel.
    pub fn fill(&mut self, value: f32) {
        for ch in 0..self.channel_count {
            self.channel_mut(ch).fill(value);
        }
    }

    /// Element-wise `dst += src`. The shapes must match.
    pub fn add_in_place(&mut self, other: &AudioBufferView<'_>) {
        debug_assert_eq!(self.channel_count, other.channel_count);
        debug_assert_eq!(self.frame_count, other.frame_count);
        for ch in 0..self.channel_count {
            let src = other.channel(ch);
            for (dst, src) in self.channel_mut(ch).iter_mut().zip(src) {
                *dst += *src;
            }
        }
    }
}

/// Owned, bounded-capacity scratch storage with a settable frame count.
///
/// The channel count is fixed at `MAX_CHANNELS`; `set_frame_count` clamps to
/// `MAX_FRAMES`. One of these backs every node in a scene graph for the
/// duration of a render pass.
pub struct StackAudioBuffer<const MAX_CHANNELS: usize, const MAX_FRAMES: usize> {
    data: [[f32; MAX_FRAMES]; MAX_CHANNELS],
    frame_count: usize,
}

impl<const MAX_CHANNELS: usize, const MAX_FRAMES: usize>
    StackAudioBuffer<MAX_CHANNELS, MAX_FRAMES>
{
    pub fn new() -> Self {
        Self {
            data: [[0.0; MAX_FRAMES]; MAX_CHANNELS],
            frame_count: 0,
        }
    }

    pub fn set_frame_count(&mut self, frames: usize) {
        self.frame_count = frames.min(MAX_FRAMES);
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn channel_count(&self) -> usize {
        MAX_CHANNELS
    }

    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.data[index][..self.frame_count]
    }

    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.data[index][..self.frame_count]
    }

    /// Zeros the current `frame_count` frames of every channel.
    pub fn clear(&mut self) {
        for channel in &mut self.data {
            channel[..self.frame_count].fill(0.0);
        }
    }

    /// View over the first `channel_count` channels at the current frame
    /// count.
    pub fn view(&mut self, channel_count: usize) -> AudioBufferView<'_> {
        debug_assert!(channel_count <= MAX_CHANNELS);
        AudioBufferView::with_stride(
            self.data.as_flattened_mut(),
            channel_count,
            self.frame_count,
            MAX_FRAMES,
        )
    }
}

impl<const MAX_CHANNELS: usize, const MAX_FRAMES: usize> Default
    for StackAudioBuffer<MAX_CHANNELS, MAX_FRAMES>
{
    fn default() -> Self {
        Self::new()
    }
}
