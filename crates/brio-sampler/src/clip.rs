//! Shared clip sample storage and the control-plane registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{ClipError, Result};

/// Immutable, reference-counted PCM data.
///
/// A clip is shared between the registry and any player node holding it, so
/// unregistering a key never frees sample data under an in-flight render;
/// the last holder drops the storage.
#[derive(Debug)]
pub struct ClipBuffer {
    key: String,
    sample_rate: f64,
    frame_count: usize,
    channels: Vec<Vec<f32>>,
}

impl ClipBuffer {
    /// Validates and wraps decoded PCM. Every channel must carry the same
    /// number of frames.
    pub fn new(key: impl Into<String>, sample_rate: f64, channels: Vec<Vec<f32>>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(ClipError::EmptyKey);
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(ClipError::InvalidSampleRate(sample_rate));
        }
        if channels.is_empty() {
            return Err(ClipError::NoChannels);
        }
        let frame_count = channels[0].len();
        if frame_count == 0 {
            return Err(ClipError::NoFrames);
        }
        for (channel, data) in channels.iter().enumerate() {
            if data.len() != frame_count {
                return Err(ClipError::ChannelLengthMismatch {
                    channel,
                    expected: frame_count,
                    got: data.len(),
                });
            }
        }
        Ok(Self {
            key,
            sample_rate,
            frame_count,
            channels,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }
}

/// Control-plane registry of decoded clips, keyed by caller-chosen strings.
#[derive(Default)]
pub struct ClipRegistry {
    clips: RwLock<HashMap<String, Arc<ClipBuffer>>>,
}

impl ClipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a clip, replacing any previous entry under the same key.
    pub fn register(
        &self,
        key: impl Into<String>,
        sample_rate: f64,
        channels: Vec<Vec<f32>>,
    ) -> Result<Arc<ClipBuffer>> {
        let clip = Arc::new(ClipBuffer::new(key, sample_rate, channels)?);
        self.clips
            .write()
            .insert(clip.key().to_string(), Arc::clone(&clip));
        tracing::debug!(
            "Registered clip: {} ({} ch, {} frames)",
            clip.key(),
            clip.channel_count(),
            clip.frame_count()
        );
        Ok(clip)
    }

    pub fn get(&self, key: &str) -> Option<Arc<ClipBuffer>> {
        self.clips.read().get(key).cloned()
    }

    /// Removes the registry's reference. Returns `false` for unknown keys.
    pub fn unregister(&self, key: &str) -> bool {
        self.clips.write().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.clips.write().clear();
    }

    pub fn len(&self) -> usize {
        self.clips.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.read().is_empty()
    }
}
