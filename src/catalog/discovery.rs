// Tue Jan 20 2026 - Alex

use crate::reflect::{ReflectError, ReflectedType, TypeProvider};
use crate::structure::{LayoutError, LayoutResult};
use std::collections::BTreeMap;

/// Every type deriving directly from `base`, deduplicated and sorted by name.
pub fn discover_subtypes(provider: &dyn TypeProvider, base: &str) -> LayoutResult<Vec<ReflectedType>> {
    log::info!("Querying {} types. This might take a while.", base);

    let mut found = BTreeMap::new();
    for name in provider.enumerate_known_types()? {
        if name == base || found.contains_key(&name) {
            continue;
        }
        if provider.is_base_class_of(&name, base)? {
            let ty = provider.lookup_type(&name)?;
            log::debug!("found subtype {} ({} bytes)", name, ty.size());
            found.insert(name, ty);
        }
    }

    log::info!("Found {} {} subtypes", found.len(), base);
    Ok(found.into_values().collect())
}

/// Looks up a type the run cannot do without.
pub fn require_type(provider: &dyn TypeProvider, name: &str, role: &str) -> LayoutResult<ReflectedType> {
    provider.lookup_type(name).map_err(|e| match e {
        ReflectError::TypeNotFound(name) => LayoutError::SchemaMissing {
            name,
            reason: role.to_string(),
        },
        other => other.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::TypeDatabase;
    use serde_json::json;

    #[test]
    fn test_discovers_direct_subtypes_sorted() {
        let db = TypeDatabase::from_value(json!({
            "types": {
                "unsigned": { "kind": "scalar", "size": 4 },
                "Tb_entry": { "kind": "struct", "size": 4, "fields": [
                    { "name": "_n", "type": "unsigned", "bit_offset": 0 }
                ]},
                "Tb_entry_pf": { "kind": "struct", "size": 4, "fields": [
                    { "name": "Tb_entry", "type": "Tb_entry", "bit_offset": 0, "base_class": true }
                ]},
                "Context::Drq_log": { "kind": "struct", "size": 4, "fields": [
                    { "name": "Tb_entry", "type": "Tb_entry", "bit_offset": 0, "base_class": true }
                ]},
                "Holder": { "kind": "struct", "size": 4, "fields": [
                    { "name": "Tb_entry", "type": "Tb_entry", "bit_offset": 0 }
                ]}
            }
        }))
        .unwrap();

        let found = discover_subtypes(&db, "Tb_entry").unwrap();
        let names: Vec<String> = found.iter().map(|t| t.display_name()).collect();
        assert_eq!(names, vec!["Context::Drq_log", "Tb_entry_pf"]);
    }

    #[test]
    fn test_require_type() {
        let db = TypeDatabase::from_value(json!({ "types": {} })).unwrap();
        let err = require_type(&db, "Mword", "native word type").unwrap_err();
        assert!(matches!(err, LayoutError::SchemaMissing { ref reason, .. } if reason == "native word type"));
    }
}
