// Tue Jan 20 2026 - Alex

pub mod builder;
pub mod discovery;
pub mod fixed_kinds;
pub mod tags;

pub use builder::{Catalog, CatalogBuilder};
pub use discovery::discover_subtypes;
pub use fixed_kinds::FixedKinds;
pub use tags::TagTable;
