//! The closed vocabulary of data-set shapes understood by the host.

use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// A data-set shape accepted or produced by the host pipeline.
///
/// The vocabulary is closed: each shape maps to the fixed numeric code the
/// host's loader expects in the output-shape field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataSetType {
    /// Output matches the input data set (declared as the empty tag).
    SameAsInput,
    /// `vtkPolyData`.
    PolyData,
    /// `vtkStructuredGrid`.
    StructuredGrid,
    /// `vtkRectilinearGrid`.
    RectilinearGrid,
    /// `vtkUnstructuredGrid`.
    UnstructuredGrid,
    /// `vtkImageData`.
    ImageData,
    /// `vtkUniformGrid`.
    UniformGrid,
    /// `vtkMultiblockDataSet`.
    MultiblockDataSet,
    /// `vtkHierarchicalBoxDataSet`.
    HierarchicalBoxDataSet,
    /// `vtkTable`.
    Table,
}

impl DataSetType {
    /// Every recognized shape, in vocabulary order.
    pub const ALL: [DataSetType; 10] = [
        DataSetType::SameAsInput,
        DataSetType::PolyData,
        DataSetType::StructuredGrid,
        DataSetType::RectilinearGrid,
        DataSetType::UnstructuredGrid,
        DataSetType::ImageData,
        DataSetType::UniformGrid,
        DataSetType::MultiblockDataSet,
        DataSetType::HierarchicalBoxDataSet,
        DataSetType::Table,
    ];

    /// The declaration tag for this shape (empty for [`DataSetType::SameAsInput`]).
    pub fn tag(self) -> &'static str {
        match self {
            DataSetType::SameAsInput => "",
            DataSetType::PolyData => "vtkPolyData",
            DataSetType::StructuredGrid => "vtkStructuredGrid",
            DataSetType::RectilinearGrid => "vtkRectilinearGrid",
            DataSetType::UnstructuredGrid => "vtkUnstructuredGrid",
            DataSetType::ImageData => "vtkImageData",
            DataSetType::UniformGrid => "vtkUniformGrid",
            DataSetType::MultiblockDataSet => "vtkMultiblockDataSet",
            DataSetType::HierarchicalBoxDataSet => "vtkHierarchicalBoxDataSet",
            DataSetType::Table => "vtkTable",
        }
    }

    /// The numeric code the host's loader expects for this shape.
    pub fn code(self) -> &'static str {
        match self {
            DataSetType::SameAsInput => "8",
            DataSetType::PolyData => "0",
            DataSetType::StructuredGrid => "2",
            DataSetType::RectilinearGrid => "3",
            DataSetType::UnstructuredGrid => "4",
            DataSetType::ImageData => "6",
            DataSetType::UniformGrid => "10",
            DataSetType::MultiblockDataSet => "13",
            DataSetType::HierarchicalBoxDataSet => "15",
            DataSetType::Table => "19",
        }
    }
}

/// A declaration named a shape tag outside the closed vocabulary.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized data set type `{0}`")]
pub struct UnknownDataSetType(
    /// The tag as it appeared in the declaration.
    pub String,
);

impl FromStr for DataSetType {
    type Err = UnknownDataSetType;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        DataSetType::ALL
            .iter()
            .copied()
            .find(|shape| shape.tag() == tag)
            .ok_or_else(|| UnknownDataSetType(tag.to_string()))
    }
}
