// Mon Jan 19 2026 - Alex

pub mod emitter;
pub mod error;
pub mod normalizer;
pub mod offsets;
pub mod plan;
pub mod typedefs;
pub mod walker;

pub use emitter::{EmittedStruct, StructEmitter};
pub use error::{LayoutError, LayoutResult};
pub use normalizer::TypeNormalizer;
pub use offsets::OffsetDump;
pub use plan::{AggregateKeyword, LayoutPlan, PlanEntry, PlanEntryKind};
pub use typedefs::TypedefTable;
pub use walker::{LayoutWalker, WalkOptions};
