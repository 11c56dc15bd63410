// Mon Jan 19 2026 - Alex

use crate::reflect::{ReflectError, ReflectedType, TypeProvider};
use crate::structure::{LayoutError, LayoutResult, TypedefTable};
use std::collections::BTreeMap;

const BYTE_POINTEES: &[&str] = &["void", "char", "signed char", "unsigned char"];

/// Maps reflected types to names the generated header can use, recording
/// a typedef for every name it has to invent.
pub struct TypeNormalizer<'a> {
    provider: &'a dyn TypeProvider,
    substitutions: &'a BTreeMap<String, String>,
    prefix: String,
    typedefs: TypedefTable,
}

impl<'a> TypeNormalizer<'a> {
    pub fn new(
        provider: &'a dyn TypeProvider,
        substitutions: &'a BTreeMap<String, String>,
        prefix: &str,
    ) -> Self {
        Self {
            provider,
            substitutions,
            prefix: prefix.to_string(),
            typedefs: TypedefTable::new(),
        }
    }

    /// `Context::Drq_log::Type` becomes `<prefix>Context__Drq_log__Type`.
    pub fn generated_name(&self, source: &str) -> String {
        let flat = source.replace("::", "__");
        let ident: String = flat
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        format!("{}{}", self.prefix, ident)
    }

    /// True when the type is replaced by a fixed representation instead of being expanded.
    pub fn is_substituted(&self, ty: &ReflectedType) -> bool {
        self.substitutions.contains_key(&ty.unqualified_name())
    }

    pub fn normalize(&mut self, ty: &ReflectedType) -> LayoutResult<String> {
        let name = ty.unqualified_name();

        if let Some(representation) = self.substitutions.get(&name) {
            let substitute = self.provider.lookup_type(representation).map_err(|e| match e {
                ReflectError::TypeNotFound(missing) => LayoutError::SchemaMissing {
                    name: missing,
                    reason: format!("substitute representation for {}", name),
                },
                other => other.into(),
            })?;
            if substitute.size() != ty.size() {
                return Err(LayoutError::TypeSubstitutionMismatch {
                    name,
                    size: ty.size(),
                    substitute: representation.clone(),
                    substitute_size: substitute.size(),
                });
            }
            let generated = self.generated_name(&name);
            self.typedefs.register(&generated, representation)?;
            return Ok(generated);
        }

        // Keep a one byte footprint whatever the consumer's compiler does with bool.
        if name == "bool" {
            return Ok("char".to_string());
        }

        let basic = ty.basic_name();
        if basic != name {
            let generated = self.generated_name(&name);
            self.typedefs.register(&generated, &basic)?;
            return Ok(generated);
        }
        Ok(name)
    }

    /// Pointee types are erased: only pointer-ness and size reach the consumer.
    pub fn normalize_pointer(&mut self, pointee: &str) -> LayoutResult<String> {
        if BYTE_POINTEES.contains(&pointee) {
            return Ok(pointee.to_string());
        }
        let generated = self.generated_name(pointee);
        self.typedefs.register(&generated, "void")?;
        Ok(generated)
    }

    pub fn typedefs(&self) -> &TypedefTable {
        &self.typedefs
    }

    pub fn into_typedefs(self) -> TypedefTable {
        self.typedefs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::TypeDatabase;
    use crate::config::Config;
    use serde_json::json;

    fn provider() -> TypeDatabase {
        TypeDatabase::from_value(json!({
            "types": {
                "unsigned long": { "kind": "scalar", "size": 8 },
                "unsigned": { "kind": "scalar", "size": 4 },
                "bool": { "kind": "scalar", "size": 1 },
                "Mword": { "kind": "typedef", "target": "unsigned long" },
                "L4_msg_tag": { "kind": "struct", "size": 8, "fields": [
                    { "name": "_tag", "type": "Mword", "bit_offset": 0 }
                ]},
                "L4_timeout_pair": { "kind": "struct", "size": 8, "fields": [] },
                "Ready_state": { "kind": "enum", "size": 4, "underlying": "unsigned int",
                    "variants": [ { "name": "Ready", "value": 0 } ] }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_substitution() {
        let db = provider();
        let config = Config::default();
        let mut n = TypeNormalizer::new(&db, &config.substitutions, "L4_ktrace_t__");

        let tag = db.lookup_type("L4_msg_tag").unwrap();
        assert!(n.is_substituted(&tag));
        assert_eq!(n.normalize(&tag).unwrap(), "L4_ktrace_t__L4_msg_tag");
        assert_eq!(n.typedefs().get("L4_ktrace_t__L4_msg_tag"), Some("unsigned long"));
    }

    #[test]
    fn test_substitution_size_mismatch() {
        let db = provider();
        let config = Config::default();
        let mut n = TypeNormalizer::new(&db, &config.substitutions, "L4_ktrace_t__");

        // Declared as "unsigned" (4 bytes) but the reflected type has 8.
        let pair = db.lookup_type("L4_timeout_pair").unwrap();
        let err = n.normalize(&pair).unwrap_err();
        assert!(matches!(err, LayoutError::TypeSubstitutionMismatch { size: 8, substitute_size: 4, .. }));
        assert!(n.typedefs().is_empty());
    }

    #[test]
    fn test_missing_substitute_is_schema_error() {
        let db = provider();
        let subs: BTreeMap<String, String> =
            [("L4_msg_tag".to_string(), "unsigned long long".to_string())].into();
        let mut n = TypeNormalizer::new(&db, &subs, "p_");
        let tag = db.lookup_type("L4_msg_tag").unwrap();
        assert!(matches!(n.normalize(&tag), Err(LayoutError::SchemaMissing { .. })));
    }

    #[test]
    fn test_bool_narrowed_to_char() {
        let db = provider();
        let subs = BTreeMap::new();
        let mut n = TypeNormalizer::new(&db, &subs, "p_");
        let b = db.lookup_type("bool").unwrap();
        assert_eq!(n.normalize(&b).unwrap(), "char");
        assert!(n.typedefs().is_empty());
    }

    #[test]
    fn test_alias_and_enum_get_typedefs() {
        let db = provider();
        let subs = BTreeMap::new();
        let mut n = TypeNormalizer::new(&db, &subs, "p_");

        let mword = db.lookup_type("Mword const").unwrap();
        assert_eq!(n.normalize(&mword).unwrap(), "p_Mword");
        let ready = db.lookup_type("Ready_state").unwrap();
        assert_eq!(n.normalize(&ready).unwrap(), "p_Ready_state");
        let plain = db.lookup_type("unsigned").unwrap();
        assert_eq!(n.normalize(&plain).unwrap(), "unsigned");

        assert_eq!(n.typedefs().get("p_Mword"), Some("unsigned long"));
        assert_eq!(n.typedefs().get("p_Ready_state"), Some("unsigned int"));
        assert_eq!(n.typedefs().len(), 2);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let db = provider();
        let config = Config::default();
        let mut n = TypeNormalizer::new(&db, &config.substitutions, "L4_ktrace_t__");
        let mword = db.lookup_type("Mword").unwrap();
        let first = n.normalize(&mword).unwrap();
        let second = n.normalize(&mword).unwrap();
        assert_eq!(first, second);
        assert_eq!(n.typedefs().len(), 1);
    }

    #[test]
    fn test_pointer_rule() {
        let db = provider();
        let subs = BTreeMap::new();
        let mut n = TypeNormalizer::new(&db, &subs, "L4_ktrace_t__");

        assert_eq!(n.normalize_pointer("void").unwrap(), "void");
        assert_eq!(n.normalize_pointer("char").unwrap(), "char");
        assert_eq!(n.normalize_pointer("Context").unwrap(), "L4_ktrace_t__Context");
        assert_eq!(
            n.normalize_pointer("Irq_base::Irq_log").unwrap(),
            "L4_ktrace_t__Irq_base__Irq_log"
        );
        assert_eq!(n.typedefs().get("L4_ktrace_t__Context"), Some("void"));
        assert_eq!(n.into_typedefs().len(), 2);
    }
}
