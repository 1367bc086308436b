//! Process-wide plugin host callback slot.
//!
//! A host runtime interposes on plugin rendering by installing a single
//! callback here; the proxy node forwards render requests through it. The
//! slot is swapped atomically so the audio thread reads it without locks.
//!
//! Teardown protocol: call [`clear_render_callback`], then synchronize with
//! any in-flight render before dropping host state the callback captures. A
//! render that already loaded the slot keeps its callback alive (via the
//! reference count) until the call returns.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use brio_core::AudioBufferView;

/// Bus capability flags advertised to the host for one plugin instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PluginBusCapabilities {
    pub accepts_audio: bool,
    pub emits_audio: bool,
    pub accepts_midi: bool,
    pub emits_midi: bool,
    pub accepts_sidechain: bool,
    pub emits_sidechain: bool,
}

impl PluginBusCapabilities {
    /// Plain audio effect: accepts and emits audio, nothing else.
    pub fn audio() -> Self {
        Self {
            accepts_audio: true,
            emits_audio: true,
            ..Self::default()
        }
    }
}

/// One render request forwarded to the host.
pub struct PluginRenderRequest<'r, 'a> {
    pub host_instance_id: &'r str,
    pub audio: &'r mut AudioBufferView<'a>,
    pub sample_rate: f64,
    pub capabilities: PluginBusCapabilities,
    pub bypassed: bool,
}

/// Host verdict for one render request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PluginRenderResult {
    pub success: bool,
    pub plugin_bypassed: bool,
}

type RenderFn = dyn Fn(&mut PluginRenderRequest<'_, '_>) -> PluginRenderResult + Send + Sync;

struct HostCallback(Box<RenderFn>);

static RENDER_CALLBACK: ArcSwapOption<HostCallback> = ArcSwapOption::const_empty();

/// Installs the process-wide host callback, replacing any previous one.
pub fn set_render_callback(
    callback: impl Fn(&mut PluginRenderRequest<'_, '_>) -> PluginRenderResult
        + Send
        + Sync
        + 'static,
) {
    RENDER_CALLBACK.store(Some(Arc::new(HostCallback(Box::new(callback)))));
}

/// Clears the slot. See the module docs for the teardown protocol.
pub fn clear_render_callback() {
    RENDER_CALLBACK.store(None);
}

/// Invokes the host callback, if one is installed.
///
/// A panicking host is contained and reported as a failed render.
pub fn render(request: &mut PluginRenderRequest<'_, '_>) -> Option<PluginRenderResult> {
    let callback = RENDER_CALLBACK.load_full()?;
    let outcome =
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| (callback.0)(request)));
    Some(outcome.unwrap_or(PluginRenderResult {
        success: false,
        plugin_bypassed: false,
    }))
}
