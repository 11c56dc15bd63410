// Tue Jan 20 2026 - Alex

pub mod catalog;
pub mod config;
pub mod engine;
pub mod output;
pub mod reflect;
pub mod structure;
pub mod ui;

pub use catalog::{Catalog, CatalogBuilder};
pub use config::Config;
pub use engine::Engine;
pub use output::OutputArtifact;
pub use reflect::{ReflectedType, TypeDatabase, TypeProvider};
pub use structure::{LayoutError, LayoutResult, LayoutWalker, TypeNormalizer};
