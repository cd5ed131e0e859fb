#![deny(missing_docs)]
//! pvplugin core: markup primitives, property descriptors, and script sources.

/// Markup element tree and XML text output.
pub mod markup;
/// Typed panel property descriptors.
pub mod property;
/// Executable snippet source handling.
pub mod script;

pub use markup::Element;
pub use property::{
    DefaultValues, EnumDomain, EnumEntry, Property, PropertyError, PropertyKind, Scalar,
};
pub use script::{ScriptError, ScriptSource, dedent};
