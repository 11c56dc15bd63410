// Mon Jan 19 2026 - Alex

use crate::reflect::{ReflectResult, ReflectedType};

/// Source of type information for one examined binary.
///
/// Calls may be slow (symbol table scans); the engine treats them as
/// synchronous and blocking.
pub trait TypeProvider {
    fn lookup_type(&self, name: &str) -> ReflectResult<ReflectedType>;

    /// Names of every type the provider knows about.
    fn enumerate_known_types(&self) -> ReflectResult<Vec<String>>;

    fn resolve_symbol_address(&self, name: &str) -> ReflectResult<u64>;

    /// True when `derived` lists `base` as a direct base class.
    fn is_base_class_of(&self, derived: &str, base: &str) -> ReflectResult<bool> {
        let ty = self.lookup_type(derived)?;
        Ok(ty.fields().iter().any(|f| f.is_base_class() && f.name() == base))
    }
}
