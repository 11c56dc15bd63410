// Mon Jan 19 2026 - Alex

use crate::reflect::ReflectError;
use std::path::PathBuf;
use thiserror::Error;

/// Every variant aborts the run. Nothing is written once one is raised.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Missing {name} ({reason}), unsupported or outdated source?")]
    SchemaMissing { name: String, reason: String },
    #[error("{type_name}::{field}: bit-field at bit {bit_offset} is not supported")]
    UnsupportedField {
        type_name: String,
        field: String,
        bit_offset: u64,
    },
    #[error("{type_name} is too big: ends at {size}, expected <= {budget}")]
    SizeBudgetExceeded {
        type_name: String,
        size: u64,
        budget: u64,
    },
    #[error("Missing '{0}' in the tag table, please add it")]
    UnmappedSubtype(String),
    #[error("{name}({size}) -> {substitute}({substitute_size}) is not valid")]
    TypeSubstitutionMismatch {
        name: String,
        size: u64,
        substitute: String,
        substitute_size: u64,
    },
    #[error("{type_name}::{field} at {offset} starts inside the base block ({base_block_size} bytes)")]
    OverlappingField {
        type_name: String,
        field: String,
        offset: u64,
        base_block_size: u64,
    },
    #[error("Typedef {name} maps to both '{existing}' and '{conflicting}'")]
    TypedefConflict {
        name: String,
        existing: String,
        conflicting: String,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Type reflection failed: {0}")]
    Reflect(#[from] ReflectError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type LayoutResult<T> = Result<T, LayoutError>;
