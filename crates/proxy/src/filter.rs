//! Filter declarations: metadata, registered properties, and snippet slots.

use pvplugin_core::{Element, Property, ScriptSource};

/// Declarative description of one filter or source: identity, help text,
/// pipeline shape, and the panel properties in registration order.
///
/// Properties are registered explicitly under a name; registration order is
/// the discovery order used when the document is assembled.
#[derive(Debug, Clone)]
pub struct FilterDescription {
    pub(crate) name: String,
    pub(crate) label: String,
    pub(crate) long_help: String,
    pub(crate) short_help: Option<String>,
    pub(crate) input_data_types: Vec<String>,
    pub(crate) output_data_type: String,
    pub(crate) number_of_inputs: u32,
    pub(crate) scripts_hidden: bool,
    pub(crate) properties: Vec<(String, Property)>,
}

impl FilterDescription {
    /// Starts a description with the internal identifier and display label.
    /// The filter takes one input unless [`inputs`](Self::inputs) says
    /// otherwise.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        FilterDescription {
            name: name.into(),
            label: label.into(),
            long_help: String::new(),
            short_help: None,
            input_data_types: Vec::new(),
            output_data_type: String::new(),
            number_of_inputs: 1,
            scripts_hidden: false,
            properties: Vec::new(),
        }
    }

    /// Sets the long help text (required; compilation rejects descriptions
    /// without it). Cleaned like a docstring: dedented, surrounding blank
    /// lines trimmed.
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.long_help = text.into();
        self
    }

    /// Sets the short help text. Defaults to the long help when unset.
    pub fn short_help(mut self, text: impl Into<String>) -> Self {
        self.short_help = Some(text.into());
        self
    }

    /// Adds an accepted input shape tag. May be called repeatedly; no call
    /// means "same as input".
    pub fn input_type(mut self, tag: impl Into<String>) -> Self {
        self.input_data_types.push(tag.into());
        self
    }

    /// Sets the produced output shape tag. The empty default means "same
    /// as input".
    pub fn output_type(mut self, tag: impl Into<String>) -> Self {
        self.output_data_type = tag.into();
        self
    }

    /// Sets how many input connections the filter takes. Zero turns the
    /// unit into a source.
    pub fn inputs(mut self, count: u32) -> Self {
        self.number_of_inputs = count;
        self
    }

    /// Hides the generated script fields from the panel entirely instead
    /// of filing them under the advanced view.
    pub fn hide_scripts(mut self) -> Self {
        self.scripts_hidden = true;
        self
    }

    /// Registers a panel property under its identifier. Registration order
    /// is preserved.
    pub fn property(mut self, name: impl Into<String>, property: Property) -> Self {
        self.properties.push((name.into(), property));
        self
    }

    /// Returns the internal identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the registered properties in registration order.
    pub fn properties(&self) -> &[(String, Property)] {
        &self.properties
    }
}

/// A filter or source definition that can be compiled to a plugin document.
///
/// [`description`](Self::description) and [`request_data`](Self::request_data)
/// are required; the remaining hooks default to "not declared".
pub trait Programmable {
    /// The static declaration: metadata plus registered properties.
    fn description(&self) -> FilterDescription;

    /// The required pipeline behavior. Its body becomes the `Script` field
    /// of the proxy and must not be empty.
    fn request_data(&self) -> ScriptSource;

    /// Optional information pass, filed as `InformationScript`.
    fn request_information(&self) -> Option<ScriptSource> {
        None
    }

    /// Optional update-extent pass, filed as `UpdateExtentScript`.
    fn request_update_extent(&self) -> Option<ScriptSource> {
        None
    }

    /// Optional extra markup appended after the generated property fields.
    fn extra_xml(&self) -> Option<Element> {
        None
    }
}
