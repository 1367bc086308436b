//! Plugin proxy node.

use brio_core::lockfree::AtomicFlag;
use brio_core::{AudioBufferView, DspNode};

use crate::host::{self, PluginBusCapabilities, PluginRenderRequest};

/// Delegates processing to the host plugin registered with the bridge.
///
/// On bypass, a missing host instance, an absent callback, or a failed
/// render, the node leaves the view untouched so the upstream mix passes
/// through. Failures are logged once until the condition clears.
pub struct PluginNode {
    host_instance_id: String,
    capabilities: PluginBusCapabilities,
    bypassed: AtomicFlag,
    host_unavailable_logged: AtomicFlag,
    render_failure_logged: AtomicFlag,
    sample_rate: f64,
}

impl PluginNode {
    pub fn new(host_instance_id: impl Into<String>, capabilities: PluginBusCapabilities) -> Self {
        Self {
            host_instance_id: host_instance_id.into(),
            capabilities,
            bypassed: AtomicFlag::default(),
            host_unavailable_logged: AtomicFlag::default(),
            render_failure_logged: AtomicFlag::default(),
            sample_rate: 48_000.0,
        }
    }

    pub fn host_instance_id(&self) -> &str {
        &self.host_instance_id
    }

    pub fn set_host_instance_id(&mut self, host_instance_id: impl Into<String>) {
        self.host_instance_id = host_instance_id.into();
        self.host_unavailable_logged.set(false);
    }

    pub fn bypassed(&self) -> bool {
        self.bypassed.get()
    }

    pub fn set_bypassed(&self, bypassed: bool) {
        self.bypassed.set(bypassed);
    }

    pub fn capabilities(&self) -> &PluginBusCapabilities {
        &self.capabilities
    }

    fn log_host_unavailable(&self) {
        if !self.host_unavailable_logged.swap(true) {
            tracing::error!(
                "Plugin host unavailable (host_instance_id={})",
                self.host_instance_id
            );
        }
    }

    fn log_render_failure(&self) {
        if !self.render_failure_logged.swap(true) {
            tracing::error!(
                "Plugin host render failed (host_instance_id={})",
                self.host_instance_id
            );
        }
    }

    fn reset_failure_flags(&self) {
        self.host_unavailable_logged.set(false);
        self.render_failure_logged.set(false);
    }

    fn truthy(value: f64) -> bool {
        value.abs() > f64::EPSILON
    }
}

impl DspNode for PluginNode {
    fn prepare(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.reset_failure_flags();
    }

    fn reset(&mut self) {
        self.reset_failure_flags();
    }

    fn process(&mut self, buffer: &mut AudioBufferView<'_>) {
        if buffer.frame_count() == 0 || buffer.channel_count() == 0 {
            return;
        }
        if self.bypassed.get() {
            return;
        }
        if self.host_instance_id.is_empty() {
            self.log_host_unavailable();
            return;
        }

        let mut request = PluginRenderRequest {
            host_instance_id: &self.host_instance_id,
            audio: buffer,
            sample_rate: self.sample_rate,
            capabilities: self.capabilities,
            bypassed: false,
        };
        let Some(result) = host::render(&mut request) else {
            self.log_host_unavailable();
            return;
        };
        self.host_unavailable_logged.set(false);

        if !result.success {
            self.log_render_failure();
            return;
        }
        self.render_failure_logged.set(false);

        // result.plugin_bypassed: the host signalled pass-through itself;
        // nothing further to do either way.
    }

    fn set_parameter(&mut self, name: &str, value: f64) {
        if name.eq_ignore_ascii_case("bypass") || name.eq_ignore_ascii_case("bypassed") {
            self.set_bypassed(Self::truthy(value));
            return;
        }
        if name.eq_ignore_ascii_case("hostinstanceid") && value.is_finite() {
            let rounded = value.abs().round() as u64;
            if rounded > 0 {
                self.set_host_instance_id(rounded.to_string());
            }
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
