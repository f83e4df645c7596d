//! Configuration schema types.
//!
//! This module defines the `[pipeline]` and `[logging]` sections.

use onion_core::{LayerId, Parameters, DEFAULT_TERMINAL_METHOD};
use onion_pipeline::{
    Capability, LayerDescriptor, ParameterDelivery, Pipeline, Position, SharedResolver,
};
use onion_telemetry::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};

/// One `[[pipeline.layers]]` entry.
///
/// Entries are applied in file order, exactly as the equivalent sequence of
/// `add_inner_layer` / `add_outer_layer` calls would be.
///
/// # Example
///
/// ```
/// use onion_config::LayerEntry;
/// use onion_pipeline::Position;
///
/// let entry: LayerEntry = serde_json::from_str(
///     r#"{"id": "separator", "position": "outer", "parameters": {"separator": "_"}}"#,
/// ).unwrap();
///
/// assert_eq!(entry.id.as_str(), "separator");
/// assert_eq!(entry.position, Position::Outer);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LayerEntry {
    /// Identifier handed to the resolver.
    pub id: LayerId,

    /// Insertion position.
    #[serde(default)]
    pub position: Position,

    /// Registration parameters.
    #[serde(default)]
    pub parameters: Parameters,
}

impl LayerEntry {
    /// Returns the descriptor this entry registers.
    pub fn descriptor(&self) -> LayerDescriptor {
        LayerDescriptor::new(self.id.clone(), self.parameters.clone(), self.position)
    }
}

/// Pipeline configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineSection {
    /// Capability name every layer must declare.
    #[serde(default)]
    pub required_capability: Option<String>,

    /// Setter used for parameter delivery. Unset means constructor delivery.
    #[serde(default)]
    pub parameter_setter: Option<String>,

    /// Method invoked on terminal objects.
    #[serde(default = "default_terminal_method")]
    pub terminal_method: String,

    /// Layers in registration order.
    #[serde(default)]
    pub layers: Vec<LayerEntry>,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            required_capability: None,
            parameter_setter: None,
            terminal_method: default_terminal_method(),
            layers: Vec::new(),
        }
    }
}

fn default_terminal_method() -> String {
    DEFAULT_TERMINAL_METHOD.to_string()
}

impl PipelineSection {
    /// Returns the configured delivery strategy.
    pub fn parameter_delivery(&self) -> ParameterDelivery {
        self.parameter_setter
            .as_ref()
            .map_or(ParameterDelivery::Constructor, ParameterDelivery::setter)
    }

    /// Returns the configured capability, checked against declared names.
    pub fn capability(&self) -> Option<Capability> {
        self.required_capability.as_ref().map(Capability::declared)
    }

    /// Builds a pipeline resolving layers through `resolver`.
    ///
    /// # Example
    ///
    /// ```
    /// use onion_config::PipelineSection;
    /// use onion_core::{Args, Terminal, Value};
    /// use onion_pipeline::fixtures;
    ///
    /// let section: PipelineSection = toml::from_str(r#"
    ///     [[layers]]
    ///     id = "separator"
    ///     parameters = { separator = "_" }
    /// "#).unwrap();
    ///
    /// let pipeline = section.build(fixtures::container());
    /// let greet = Terminal::callable(|_| Ok(Value::from("hello, world!")));
    /// assert_eq!(pipeline.call(greet, Args::new()).unwrap(), "hello,_world!");
    /// ```
    pub fn build(&self, resolver: SharedResolver) -> Pipeline {
        let mut builder = Pipeline::builder(resolver)
            .parameter_delivery(self.parameter_delivery())
            .terminal_method(self.terminal_method.clone());

        if let Some(capability) = self.capability() {
            builder = builder.required_capability(capability);
        }

        self.layers
            .iter()
            .fold(builder, |builder, entry| builder.descriptor(entry.descriptor()))
            .build()
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (e.g., "info", "onion_pipeline=trace").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include span open/close events.
    #[serde(default)]
    pub span_events: bool,

    /// Include file and line.
    #[serde(default)]
    pub include_location: bool,

    /// Include thread IDs.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include the event target.
    #[serde(default = "default_true")]
    pub include_target: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            span_events: false,
            include_location: false,
            thread_ids: false,
            include_target: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingSection {
    /// Converts this section into a telemetry [`LogConfig`].
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            span_events: self.span_events,
            file_line_info: self.include_location,
            thread_ids: self.thread_ids,
            include_target: self.include_target,
        }
    }
}
