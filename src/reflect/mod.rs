// Mon Jan 19 2026 - Alex

pub mod database;
pub mod error;
pub mod provider;
pub mod type_info;

pub use database::{TypeDatabase, TypeDatabaseFile, TypeDef, TypeRef};
pub use error::{ReflectError, ReflectResult};
pub use provider::TypeProvider;
pub use type_info::{EnumVariant, Field, ReflectedType, TypeKind};
