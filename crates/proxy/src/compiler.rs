//! Proxy document assembly.
//!
//! Compilation discovers the declared properties, validates the
//! description, and assembles one `ServerManagerConfiguration` document:
//! group node, proxy node, documentation, input specification, property
//! fields, the output-shape field, and the three script fields. Each
//! compile re-derives the document from the declaration; nothing is cached.

use crate::data_type::{DataSetType, UnknownDataSetType};
use crate::filter::{FilterDescription, Programmable};
use pvplugin_core::{Element, PropertyError, ScriptError, ScriptSource, dedent};
use std::path::Path;
use thiserror::Error;

/// Host class every generated proxy instantiates.
const HOST_CLASS: &str = "vtkPythonProgrammableFilter";

/// Errors raised while compiling a declaration to a document.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The description has no display label.
    #[error("filter `{name}` must declare a non-empty label")]
    MissingLabel {
        /// The filter's internal identifier.
        name: String,
    },
    /// The description has no long help text.
    #[error("filter `{name}` must declare long help text")]
    MissingHelp {
        /// The filter's internal identifier.
        name: String,
    },
    /// A property failed to render.
    #[error(transparent)]
    Property(#[from] PropertyError),
    /// A snippet slot's listing could not be reduced to a body.
    #[error("script slot `{slot}`: {source}")]
    Script {
        /// The declaration-side slot name.
        slot: &'static str,
        /// The underlying extraction error.
        source: ScriptError,
    },
    /// A required snippet slot produced an empty body.
    #[error("script slot `{slot}` produced an empty body")]
    EmptyScript {
        /// The declaration-side slot name.
        slot: &'static str,
    },
    /// The output shape tag is not in the host vocabulary.
    #[error(transparent)]
    UnknownDataSetType(#[from] UnknownDataSetType),
    /// The plugin file could not be written.
    #[error("could not write plugin file: {0}")]
    Io(#[from] std::io::Error),
}

/// Compiles a declaration into its plugin document tree.
pub fn compile<F>(filter: &F) -> Result<Element, CompileError>
where
    F: Programmable + ?Sized,
{
    let mut desc = filter.description();

    if desc.label.trim().is_empty() {
        return Err(CompileError::MissingLabel {
            name: desc.name.clone(),
        });
    }
    if desc.long_help.trim().is_empty() {
        return Err(CompileError::MissingHelp {
            name: desc.name.clone(),
        });
    }

    let long_help = clean_help(&desc.long_help);
    let short_help = desc.short_help.clone().unwrap_or_else(|| long_help.clone());

    let group = if desc.number_of_inputs > 0 {
        "filters"
    } else {
        "sources"
    };
    log::debug!(
        "compiling `{}` into proxy group `{}` with {} properties",
        desc.name,
        group,
        desc.properties.len()
    );

    let mut proxy = Element::new("SourceProxy")
        .attr("name", &desc.name)
        .attr("class", HOST_CLASS)
        .attr("label", &desc.label);

    proxy.push(
        Element::new("Documentation")
            .attr("long_help", long_help)
            .attr("short_help", short_help),
    );

    if desc.number_of_inputs >= 1 {
        proxy.push(input_property(&desc));
    }

    for (name, property) in &mut desc.properties {
        property.bind_name(name.clone());
        proxy.push(property.xml_element()?);
    }

    if let Some(extra) = filter.extra_xml() {
        proxy.push(extra);
    }

    proxy.push(output_data_set_type(&desc)?);

    let request_data = filter
        .request_data()
        .body()
        .map_err(|source| CompileError::Script {
            slot: "request_data",
            source,
        })?;
    if request_data.trim().is_empty() {
        return Err(CompileError::EmptyScript {
            slot: "request_data",
        });
    }
    let request_information =
        optional_script_body(filter.request_information(), "request_information")?;
    let request_update_extent =
        optional_script_body(filter.request_update_extent(), "request_update_extent")?;

    let hidden = desc.scripts_hidden;
    proxy.push(script_field("Script", None, "SetScript", request_data, hidden));
    proxy.push(script_field(
        "InformationScript",
        Some("RequestInformationScript"),
        "SetInformationScript",
        request_information,
        hidden,
    ));
    proxy.push(script_field(
        "UpdateExtentScript",
        Some("RequestUpdateExtentScript"),
        "SetUpdateExtentScript",
        request_update_extent,
        hidden,
    ));

    Ok(Element::new("ServerManagerConfiguration")
        .child(Element::new("ProxyGroup").attr("name", group).child(proxy)))
}

/// Compiles a declaration and serializes the document to XML text.
pub fn xml<F>(filter: &F) -> Result<String, CompileError>
where
    F: Programmable + ?Sized,
{
    Ok(compile(filter)?.to_xml())
}

/// Compiles a declaration and writes the document to `path`.
pub fn save<F>(filter: &F, path: impl AsRef<Path>) -> Result<(), CompileError>
where
    F: Programmable + ?Sized,
{
    let document = xml(filter)?;
    std::fs::write(path, document)?;
    Ok(())
}

/// Docstring-style cleanup: dedent, then trim surrounding whitespace.
fn clean_help(text: &str) -> String {
    dedent(text).trim().to_string()
}

/// The input specification: accepted source groups and input shape tags,
/// with multi-connection commands when more than one input is declared.
fn input_property(desc: &FilterDescription) -> Element {
    let mut input = Element::new("InputProperty").attr("name", "Input");
    if desc.number_of_inputs > 1 {
        input.set_attr("clean_command", "RemoveAllInputs");
        input.set_attr("command", "AddInputConnection");
        input.set_attr("multiple_input", "1");
    } else {
        input.set_attr("command", "SetInputConnection");
    }

    let groups = Element::new("ProxyGroupDomain")
        .attr("name", "groups")
        .child(Element::new("Group").attr("name", "sources"))
        .child(Element::new("Group").attr("name", "filters"));

    let mut data_types = Element::new("DataTypeDomain").attr("name", "input_type");
    for tag in &desc.input_data_types {
        data_types.push(Element::new("DataType").attr("value", tag));
    }

    input.child(groups).child(data_types)
}

/// The hidden output-shape field, valued from the closed vocabulary.
fn output_data_set_type(desc: &FilterDescription) -> Result<Element, CompileError> {
    let shape: DataSetType = desc.output_data_type.parse()?;
    Ok(Element::new("IntVectorProperty")
        .attr("command", "SetOutputDataSetType")
        .attr("default_values", shape.code())
        .attr("name", "OutputDataSetType")
        .attr("number_of_elements", "1")
        .attr("panel_visibility", "never")
        .child(Element::new("Documentation").text(
            "The value of this property determines the dataset type for the output of the programmable filter.",
        )))
}

/// Reduces an optional snippet slot to its body; undeclared slots come out
/// empty.
fn optional_script_body(
    script: Option<ScriptSource>,
    slot: &'static str,
) -> Result<String, CompileError> {
    match script {
        Some(script) => script
            .body()
            .map_err(|source| CompileError::Script { slot, source }),
        None => Ok(String::new()),
    }
}

/// One generated script field carrying a snippet body and the multi-line
/// editing hint.
fn script_field(
    name: &'static str,
    label: Option<&'static str>,
    command: &'static str,
    body: String,
    hidden: bool,
) -> Element {
    let mut field = Element::new("StringVectorProperty").attr("name", name);
    if let Some(label) = label {
        field.set_attr("label", label);
    }
    field
        .attr("command", command)
        .attr("number_of_elements", "1")
        .attr("default_values", body)
        .attr(
            "panel_visibility",
            if hidden { "never" } else { "advanced" },
        )
        .child(multi_line_hint())
}

/// The editing hint the host reads to present a multi-line widget.
fn multi_line_hint() -> Element {
    Element::new("Hints").child(Element::new("Widget").attr("type", "multi_line"))
}
