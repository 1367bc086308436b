//! The scene graph: node storage, connections, and the topological renderer.
//!
//! Mutations (add/remove/connect/disconnect/schedule) run on the control
//! thread, serialized against render by the host; `render` runs on the audio
//! thread and takes no locks. Every mutation invalidates and rebuilds the
//! cached topology so a render pass only walks precomputed state.

mod topology;

use std::collections::HashMap;
use std::sync::Arc;

use crate::buffer::{AudioBufferView, StackAudioBuffer};
use crate::clock::RenderClock;
use crate::error::{Error, Result};
use crate::lockfree::AtomicFlag;
use crate::node::DspNode;
use crate::scheduler::{RealTimeScheduler, ScheduledEvent};
use topology::Topology;

/// Sentinel destination id marking a connection that feeds the final mix.
/// Reserved; must not be used as a node id.
pub const OUTPUT_BUS_ID: &str = "__output__";

/// Compile-time maximum channel count for scratch buffers.
pub const MAX_CHANNELS: usize = 4;

/// Compile-time maximum frames per block for scratch buffers.
pub const MAX_FRAMES: usize = 1024;

/// Bound on automation events in flight between control and audio threads.
pub const SCHEDULER_CAPACITY: usize = 128;

type ScratchBuffer = StackAudioBuffer<MAX_CHANNELS, MAX_FRAMES>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Connection {
    source: String,
    destination: String,
}

/// Owner of the DSP nodes, their connections, and the render machinery.
pub struct SceneGraph {
    sample_rate: f64,
    nodes: HashMap<String, Box<dyn DspNode>>,
    connections: Vec<Connection>,
    clock: Arc<RenderClock>,
    scheduler: RealTimeScheduler<SCHEDULER_CAPACITY>,
    node_buffers: HashMap<String, Box<ScratchBuffer>>,
    mix_buffer: Box<ScratchBuffer>,
    topology: Topology,
    oversized_logged: AtomicFlag,
}

impl SceneGraph {
    pub fn new(sample_rate: f64, frames_per_block: u32) -> Result<Self> {
        let clock = Arc::new(RenderClock::new(sample_rate, frames_per_block)?);
        let scheduler = RealTimeScheduler::new(Arc::clone(&clock));
        Ok(Self {
            sample_rate,
            nodes: HashMap::new(),
            connections: Vec::new(),
            clock,
            scheduler,
            node_buffers: HashMap::new(),
            mix_buffer: Box::new(ScratchBuffer::new()),
            topology: Topology::default(),
            oversized_logged: AtomicFlag::default(),
        })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn clock(&self) -> &RenderClock {
        &self.clock
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Prepares the node with the graph sample rate and inserts it under
    /// `id`. Returns `false` if the id is taken or reserved.
    pub fn add_node(&mut self, id: impl Into<String>, mut node: Box<dyn DspNode>) -> bool {
        let id = id.into();
        if id == OUTPUT_BUS_ID || self.nodes.contains_key(&id) {
            return false;
        }
        node.prepare(self.sample_rate);
        self.node_buffers
            .insert(id.clone(), Box::new(ScratchBuffer::new()));
        self.nodes.insert(id, node);
        self.rebuild_topology();
        true
    }

    /// Removes the node and every incident connection.
    pub fn remove_node(&mut self, id: &str) {
        self.nodes.remove(id);
        self.node_buffers.remove(id);
        self.connections
            .retain(|c| c.source != id && c.destination != id);
        self.rebuild_topology();
    }

    /// Creates a directed connection. The destination may be
    /// [`OUTPUT_BUS_ID`]. Returns `false` if an endpoint is missing or the
    /// pair already exists.
    pub fn connect(&mut self, source: &str, destination: &str) -> bool {
        if !self.nodes.contains_key(source) {
            return false;
        }
        if destination != OUTPUT_BUS_ID && !self.nodes.contains_key(destination) {
            return false;
        }
        if self
            .connections
            .iter()
            .any(|c| c.source == source && c.destination == destination)
        {
            return false;
        }
        self.connections.push(Connection {
            source: source.into(),
            destination: destination.into(),
        });
        self.rebuild_topology();
        true
    }

    /// Removes any connection matching the pair.
    pub fn disconnect(&mut self, source: &str, destination: &str) {
        self.connections
            .retain(|c| !(c.source == source && c.destination == destination));
        self.rebuild_topology();
    }

    /// Schedules `callback` to run against the node when the clock reaches
    /// `frame`. The event is dropped silently if the node is removed before
    /// it fires.
    pub fn schedule_automation<F>(&mut self, node_id: &str, callback: F, frame: u64) -> Result<()>
    where
        F: FnOnce(&mut dyn DspNode) + Send + 'static,
    {
        if !self.nodes.contains_key(node_id) {
            return Err(Error::NodeNotFound(node_id.into()));
        }
        let event = ScheduledEvent {
            frame,
            node_id: node_id.to_string(),
            callback: Box::new(callback),
        };
        if !self.scheduler.schedule(event) {
            return Err(Error::SchedulerFull);
        }
        Ok(())
    }

    /// Renders one block into `output`.
    ///
    /// Dispatches due automation, evaluates nodes in topological order over
    /// their scratch buffers, sums the output sources into `output`, and
    /// advances the clock by the block's frame count. Oversized output views
    /// are zeroed and skipped; faulting is not an option on the audio thread.
    pub fn render(&mut self, output: &mut AudioBufferView<'_>) {
        let channel_count = output.channel_count();
        let frame_count = output.frame_count();
        if channel_count > MAX_CHANNELS || frame_count > MAX_FRAMES {
            if !self.oversized_logged.swap(true) {
                tracing::warn!(
                    "Output {}x{} exceeds supported {}x{}; rendering silence",
                    channel_count,
                    frame_count,
                    MAX_CHANNELS,
                    MAX_FRAMES
                );
            }
            output.fill(0.0);
            return;
        }

        let nodes = &mut self.nodes;
        self.scheduler.dispatch_due_events(|event| {
            if let Some(node) = nodes.get_mut(&event.node_id) {
                (event.callback)(node.as_mut());
            }
        });

        output.fill(0.0);

        for buffer in self.node_buffers.values_mut() {
            buffer.set_frame_count(frame_count);
        }

        let order = &self.topology.render_order;
        let inbound = &self.topology.inbound_edges;
        let buffers = &mut self.node_buffers;
        let mix = &mut self.mix_buffer;
        mix.set_frame_count(frame_count);

        for id in order {
            mix.clear();
            if let Some(sources) = inbound.get(id) {
                for source in sources {
                    if let Some(upstream) = buffers.get(source) {
                        accumulate(mix, upstream, channel_count);
                    }
                }
            }
            let Some(buffer) = buffers.get_mut(id) else {
                continue;
            };
            copy_channels(buffer, mix, channel_count);
            let Some(node) = nodes.get_mut(id) else {
                continue;
            };
            node.process(&mut buffer.view(channel_count));
        }

        for id in &self.topology.output_sources {
            if let Some(buffer) = self.node_buffers.get(id) {
                for ch in 0..channel_count {
                    for (dst, src) in output.channel_mut(ch).iter_mut().zip(buffer.channel(ch)) {
                        *dst += *src;
                    }
                }
            }
        }

        self.clock.advance_by(frame_count as u64);
    }

    fn rebuild_topology(&mut self) {
        self.topology = Topology::rebuild(&self.nodes, &self.connections);
    }
}

fn accumulate(dst: &mut ScratchBuffer, src: &ScratchBuffer, channel_count: usize) {
    for ch in 0..channel_count {
        for (dst, src) in dst.channel_mut(ch).iter_mut().zip(src.channel(ch)) {
            *dst += *src;
        }
    }
}

fn copy_channels(dst: &mut ScratchBuffer, src: &ScratchBuffer, channel_count: usize) {
    for ch in 0..channel_count {
        dst.channel_mut(ch).copy_from_slice(src.channel(ch));
    }
}
