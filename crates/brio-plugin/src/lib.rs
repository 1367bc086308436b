//! Plugin hosting boundary for the brio scene graph.
//!
//! The core never links against a plugin runtime. Instead a host installs a
//! single process-wide render callback through [`host`], and [`PluginNode`]
//! proxies audio through it, falling back to pass-through whenever the host
//! is unavailable.

pub mod host;
pub use host::{
    clear_render_callback, set_render_callback, PluginBusCapabilities, PluginRenderRequest,
    PluginRenderResult,
};

mod node;
pub use node::PluginNode;
