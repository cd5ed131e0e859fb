#![deny(missing_docs)]
//! pvplugin proxy engine: filter declarations, document assembly, and XML
//! output for the host's plugin loader.

/// Document assembly and serialization.
pub mod compiler;
/// The closed data-set shape vocabulary.
pub mod data_type;
/// Filter declarations and the programmable-filter interface.
pub mod filter;

pub use compiler::{CompileError, compile, save, xml};
pub use data_type::{DataSetType, UnknownDataSetType};
pub use filter::{FilterDescription, Programmable};
