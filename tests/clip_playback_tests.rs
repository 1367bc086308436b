//! Clip playback through the scene graph.
//!
//! Covers windowed playback against the render clock, fade envelopes, reset
//! semantics, and registry-backed shared ownership of sample data.

#[path = "helpers/mod.rs"]
mod helpers;

use helpers::{assert_close, render_mono, TOLERANCE};

use brio::prelude::*;

fn graph_with_clip(
    frames_per_block: u32,
    clip_samples: &[f32],
    configure: impl FnOnce(&mut ClipPlayerNode),
) -> SceneGraph {
    let registry = ClipRegistry::new();
    let clip = registry
        .register("clip", 48_000.0, vec![clip_samples.to_vec()])
        .unwrap();

    let mut player = ClipPlayerNode::new();
    player.set_clip(Some(clip));
    configure(&mut player);

    let mut graph = SceneGraph::new(48_000.0, frames_per_block).unwrap();
    graph.add_node("clip", Box::new(player));
    graph.connect("clip", OUTPUT_BUS_ID);
    graph
}

// =============================================================================
// Windowed playback
// =============================================================================

/// Block-by-block playback of an eight-frame clip windowed to [4, 12).
#[test]
fn test_windowed_playback_blocks() {
    let mut graph = graph_with_clip(
        4,
        &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
        |player| {
            player.set_parameter("startframe", 4.0);
            player.set_parameter("endframe", 12.0);
            player.set_parameter("gain", 1.0);
        },
    );

    assert_close(&render_mono(&mut graph, 4), &[0.0; 4], "silent before start");
    assert_close(
        &render_mono(&mut graph, 4),
        &[0.0, 1.0, 2.0, 3.0],
        "first active block",
    );
    assert_close(
        &render_mono(&mut graph, 4),
        &[4.0, 5.0, 6.0, 7.0],
        "second active block",
    );
    assert_close(&render_mono(&mut graph, 4), &[0.0; 4], "silent after end");
}

/// Fade-in and fade-out applied over a four-frame clip at half gain.
#[test]
fn test_fade_envelope() {
    let mut graph = graph_with_clip(4, &[1.0, 1.0, 1.0, 1.0], |player| {
        player.set_parameter("startframe", 0.0);
        player.set_parameter("endframe", 4.0);
        player.set_parameter("fadeinframes", 2.0);
        player.set_parameter("fadeoutframes", 2.0);
        player.set_parameter("gain", 0.5);
    });

    assert_close(
        &render_mono(&mut graph, 4),
        &[0.25, 0.5, 0.5, 0.25],
        "fade envelope",
    );
}

/// Symmetric fades over a longer window: ramp up over F frames, hold, ramp
/// down over the final F frames.
#[test]
fn test_fade_symmetry_property() {
    const N: usize = 32;
    const F: u64 = 8;
    const GAIN: f64 = 0.8;

    let mut graph = graph_with_clip(N as u32, &[1.0; N], |player| {
        player.set_parameter("endframe", N as f64);
        player.set_parameter("fadeinframes", F as f64);
        player.set_parameter("fadeoutframes", F as f64);
        player.set_parameter("gain", GAIN);
    });

    let samples = render_mono(&mut graph, N);
    for (i, sample) in samples.iter().enumerate() {
        let i = i as u64;
        let mut expected = GAIN;
        if i < F {
            expected *= (i + 1) as f64 / F as f64;
        }
        if i >= N as u64 - F {
            expected *= (N as u64 - i) as f64 / F as f64;
        }
        assert!(
            (sample - expected as f32).abs() < TOLERANCE,
            "frame {i}: expected {expected} got {sample}"
        );
    }
}

// =============================================================================
// Reset
// =============================================================================

/// `reset` rewinds the playback position so the window replays.
#[test]
fn test_reset_replays_the_window() {
    let registry = ClipRegistry::new();
    let clip = registry
        .register("clip", 48_000.0, vec![vec![0.0, 1.0, 2.0, 3.0]])
        .unwrap();
    let mut player = ClipPlayerNode::new();
    player.set_clip(Some(clip));
    player.set_parameter("startframe", 4.0);
    player.set_parameter("endframe", 8.0);

    let mut graph = SceneGraph::new(48_000.0, 4).unwrap();
    graph.add_node("clip", Box::new(player));
    graph.connect("clip", OUTPUT_BUS_ID);

    assert_close(&render_mono(&mut graph, 4), &[0.0; 4], "before start");
    assert_close(
        &render_mono(&mut graph, 4),
        &[0.0, 1.0, 2.0, 3.0],
        "active window",
    );

    graph
        .schedule_automation("clip", |node| node.reset(), graph.clock().frame_time())
        .unwrap();

    assert_close(&render_mono(&mut graph, 4), &[0.0; 4], "replay before start");
    assert_close(
        &render_mono(&mut graph, 4),
        &[0.0, 1.0, 2.0, 3.0],
        "replay active window",
    );
}

// =============================================================================
// Shared ownership
// =============================================================================

/// Unregistering a clip does not pull sample data out from under a node
/// that still holds it.
#[test]
fn test_clip_survives_unregistration() {
    let registry = ClipRegistry::new();
    let clip = registry
        .register("clip", 48_000.0, vec![vec![0.5, 0.5, 0.5, 0.5]])
        .unwrap();

    let mut player = ClipPlayerNode::new();
    player.set_clip(Some(clip));
    player.set_parameter("endframe", 4.0);

    let mut graph = SceneGraph::new(48_000.0, 4).unwrap();
    graph.add_node("clip", Box::new(player));
    graph.connect("clip", OUTPUT_BUS_ID);

    assert!(registry.unregister("clip"));
    assert!(registry.get("clip").is_none());

    assert_close(
        &render_mono(&mut graph, 4),
        &[0.5, 0.5, 0.5, 0.5],
        "playback after unregister",
    );
}
