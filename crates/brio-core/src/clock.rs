//! Monotonic sample-frame clock tying render blocks to audio-domain time.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::error::{Error, Result};

/// Shared frame counter written once per render block.
///
/// The counter is written only by the render pass and read by the scheduler
/// dispatcher, with release/acquire ordering so an event scheduled against a
/// recently observed `frame_time` fires at the intended block.
#[derive(Debug)]
pub struct RenderClock {
    sample_rate: f64,
    frames_per_block: AtomicU32,
    frame_time: AtomicU64,
}

impl RenderClock {
    pub fn new(sample_rate: f64, frames_per_block: u32) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }
        if frames_per_block == 0 {
            return Err(Error::InvalidArgument(
                "frames per block must be positive".into(),
            ));
        }
        Ok(Self {
            sample_rate,
            frames_per_block: AtomicU32::new(frames_per_block),
            frame_time: AtomicU64::new(0),
        })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn frames_per_block(&self) -> u32 {
        self.frames_per_block.load(Ordering::Relaxed)
    }

    pub fn set_frames_per_block(&self, frames: u32) -> Result<()> {
        if frames == 0 {
            return Err(Error::InvalidArgument(
                "frames per block must be positive".into(),
            ));
        }
        self.frames_per_block.store(frames, Ordering::Relaxed);
        Ok(())
    }

    /// Current frame time.
    #[inline]
    pub fn frame_time(&self) -> u64 {
        self.frame_time.load(Ordering::Acquire)
    }

    /// Advances by one block.
    pub fn advance(&self) {
        self.advance_by(u64::from(self.frames_per_block()));
    }

    /// Advances by an explicit frame count.
    pub fn advance_by(&self, frames: u64) {
        self.frame_time.fetch_add(frames, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_rejects_invalid_arguments() {
        assert!(RenderClock::new(0.0, 128).is_err());
        assert!(RenderClock::new(-48_000.0, 128).is_err());
        assert!(RenderClock::new(f64::NAN, 128).is_err());
        assert!(RenderClock::new(48_000.0, 0).is_err());
        assert!(RenderClock::new(48_000.0, 128).is_ok());
    }

    #[test]
    fn test_clock_advances_by_block() {
        let clock = RenderClock::new(48_000.0, 64).unwrap();
        assert_eq!(clock.frame_time(), 0);
        clock.advance();
        assert_eq!(clock.frame_time(), 64);
        clock.advance();
        assert_eq!(clock.frame_time(), 128);
    }

    #[test]
    fn test_clock_advance_by_explicit_count() {
        let clock = RenderClock::new(44_100.0, 128).unwrap();
        clock.advance_by(32);
        clock.advance_by(96);
        assert_eq!(clock.frame_time(), 128);
    }

    #[test]
    fn test_clock_block_size_update() {
        let clock = RenderClock::new(48_000.0, 64).unwrap();
        clock.set_frames_per_block(256).unwrap();
        assert_eq!(clock.frames_per_block(), 256);
        clock.advance();
        assert_eq!(clock.frame_time(), 256);
        assert!(clock.set_frames_per_block(0).is_err());
        assert_eq!(clock.frames_per_block(), 256);
    }
}
