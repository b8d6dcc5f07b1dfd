//! Optional diagnostic output from preprocessing and local assembly.
//!
//! Diagnostic records are grouped in named [`Channel`]s that are switched on or off
//! individually through [`DiagnosticChannels`]. Records of enabled channels are written to a
//! [`DiagnosticSink`], which by default forwards them to the `log` crate. Messages for disabled
//! channels are never formatted.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// A named diagnostic channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// The quadrature rule selected for each reference shape.
    QuadratureRule,
    /// Shape function values at the quadrature points.
    ShapeFunctionValues,
    /// Reference gradients of the shape functions at the quadrature points.
    ShapeFunctionGradients,
    /// Local matrices computed for each cell.
    ElementMatrices,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::QuadratureRule,
        Channel::ShapeFunctionValues,
        Channel::ShapeFunctionGradients,
        Channel::ElementMatrices,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Channel::QuadratureRule => "quadrature_rule",
            Channel::ShapeFunctionValues => "shape_function_values",
            Channel::ShapeFunctionGradients => "shape_function_gradients",
            Channel::ElementMatrices => "element_matrices",
        }
    }

    /// The `log` target used by [`LogSink`] for records of this channel.
    pub fn log_target(&self) -> &'static str {
        match self {
            Channel::QuadratureRule => "fenris_lagrange::diagnostics::quadrature_rule",
            Channel::ShapeFunctionValues => "fenris_lagrange::diagnostics::shape_function_values",
            Channel::ShapeFunctionGradients => "fenris_lagrange::diagnostics::shape_function_gradients",
            Channel::ElementMatrices => "fenris_lagrange::diagnostics::element_matrices",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Selects which diagnostic channels are enabled. All channels are disabled by default.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticChannels {
    pub quadrature_rule: bool,
    pub shape_function_values: bool,
    pub shape_function_gradients: bool,
    pub element_matrices: bool,
}

impl DiagnosticChannels {
    pub fn all() -> Self {
        Self {
            quadrature_rule: true,
            shape_function_values: true,
            shape_function_gradients: true,
            element_matrices: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Returns a copy with the given channel enabled.
    pub fn with(mut self, channel: Channel) -> Self {
        *self.flag_mut(channel) = true;
        self
    }

    pub fn is_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::QuadratureRule => self.quadrature_rule,
            Channel::ShapeFunctionValues => self.shape_function_values,
            Channel::ShapeFunctionGradients => self.shape_function_gradients,
            Channel::ElementMatrices => self.element_matrices,
        }
    }

    fn flag_mut(&mut self, channel: Channel) -> &mut bool {
        match channel {
            Channel::QuadratureRule => &mut self.quadrature_rule,
            Channel::ShapeFunctionValues => &mut self.shape_function_values,
            Channel::ShapeFunctionGradients => &mut self.shape_function_gradients,
            Channel::ElementMatrices => &mut self.element_matrices,
        }
    }
}

/// Receives the records of enabled diagnostic channels.
pub trait DiagnosticSink: Debug + Send + Sync {
    fn record(&self, channel: Channel, message: &str);
}

/// Writes diagnostic records as `debug` level `log` records, using
/// [`Channel::log_target`] as the target.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, channel: Channel, message: &str) {
        log::debug!(target: channel.log_target(), "{}", message);
    }
}

/// Enabled channels together with the sink their records are written to.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    channels: DiagnosticChannels,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(DiagnosticChannels::default(), Arc::new(LogSink))
    }
}

impl Diagnostics {
    pub fn new(channels: DiagnosticChannels, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { channels, sink }
    }

    /// Diagnostics for the given channels, written to the `log` crate.
    pub fn with_log_sink(channels: DiagnosticChannels) -> Self {
        Self::new(channels, Arc::new(LogSink))
    }

    pub fn channels(&self) -> &DiagnosticChannels {
        &self.channels
    }

    pub fn sink(&self) -> &Arc<dyn DiagnosticSink> {
        &self.sink
    }

    pub fn is_enabled(&self, channel: Channel) -> bool {
        self.channels.is_enabled(channel)
    }

    /// Records the message produced by `message` if the channel is enabled.
    ///
    /// The closure is only invoked for enabled channels.
    pub fn emit<S, F>(&self, channel: Channel, message: F)
    where
        S: AsRef<str>,
        F: FnOnce() -> S,
    {
        if self.is_enabled(channel) {
            self.sink.record(channel, message().as_ref());
        }
    }
}
