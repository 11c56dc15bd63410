// Tue Jan 20 2026 - Alex

pub mod artifact;
pub mod sections;
pub mod writer;

pub use artifact::{ArtifactSummary, OutputArtifact};
pub use sections::{Section, SectionBuffer};
pub use writer::write_artifact;
