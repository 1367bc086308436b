//! Shared helpers for brio integration tests.

#![allow(dead_code)]

use brio::prelude::*;

/// Tolerance for float comparisons across the suite.
pub const TOLERANCE: f32 = 1e-6;

/// Renders one mono block and returns its samples.
pub fn render_mono(graph: &mut SceneGraph, frames: usize) -> Vec<f32> {
    let mut samples = vec![0.0f32; frames];
    let mut view = AudioBufferView::new(&mut samples, 1, frames);
    graph.render(&mut view);
    samples
}

/// Renders `blocks` consecutive mono blocks and concatenates them.
pub fn render_blocks(graph: &mut SceneGraph, frames: usize, blocks: usize) -> Vec<f32> {
    let mut all = Vec::with_capacity(frames * blocks);
    for _ in 0..blocks {
        all.extend(render_mono(graph, frames));
    }
    all
}

/// Asserts two sample runs match within [`TOLERANCE`].
pub fn assert_close(actual: &[f32], expected: &[f32], context: &str) {
    assert_eq!(actual.len(), expected.len(), "{context}: length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() < TOLERANCE,
            "{context}: sample {i} expected {e} got {a}"
        );
    }
}
