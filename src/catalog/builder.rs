// Tue Jan 20 2026 - Alex

use crate::catalog::discovery::{discover_subtypes, require_type};
use crate::catalog::{FixedKinds, TagTable};
use crate::config::Config;
use crate::reflect::{ReflectedType, TypeProvider};
use crate::structure::{
    EmittedStruct, LayoutPlan, LayoutResult, LayoutWalker, StructEmitter, TypeNormalizer,
    TypedefTable, WalkOptions,
};

/// Everything the output needs, collected after every type was walked.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub fixed_kinds: FixedKinds,
    pub entry_size: u64,
    pub base_block_size: u64,
    pub base_plan: LayoutPlan,
    pub members: Vec<EmittedStruct>,
    pub typedefs: TypedefTable,
}

impl Catalog {
    pub fn member(&self, tag: &str) -> Option<&EmittedStruct> {
        self.members.iter().find(|m| m.tag == tag)
    }
}

pub struct CatalogBuilder<'a> {
    provider: &'a dyn TypeProvider,
    config: &'a Config,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(provider: &'a dyn TypeProvider, config: &'a Config) -> Self {
        Self { provider, config }
    }

    pub fn discover_subtypes(&self) -> LayoutResult<Vec<ReflectedType>> {
        discover_subtypes(self.provider, &self.config.base_type)
    }

    // The real entry size is a constant the debug info does not carry,
    // so it is guessed from the native word size.
    pub fn entry_size(&self) -> LayoutResult<u64> {
        let word = require_type(self.provider, &self.config.word_type, "native word type")?;
        let size = self.config.entry_size_for_word(word.size());
        log::info!("Guessed {} size: {}", self.config.base_type, size);
        Ok(size)
    }

    pub fn build_catalog(&self, subtypes: &[ReflectedType]) -> LayoutResult<Catalog> {
        let fixed_kinds = FixedKinds::from_provider(self.provider, &self.config.fixed_kinds_enum)?;
        let entry_size = self.entry_size()?;
        let base = require_type(self.provider, &self.config.base_type, "trace entry base type")?;

        let mut subtypes: Vec<&ReflectedType> = subtypes.iter().collect();
        subtypes.sort_by_key(|t| t.display_name());
        subtypes.dedup_by_key(|t| t.display_name());

        let tags = TagTable::new(&self.config.tags);
        let tagged = subtypes
            .into_iter()
            .map(|ty| Ok((ty, tags.resolve(&ty.display_name())?)))
            .collect::<LayoutResult<Vec<_>>>()?;

        let normalizer = TypeNormalizer::new(
            self.provider,
            &self.config.substitutions,
            &self.config.naming.typedef_prefix,
        );
        let mut walker = LayoutWalker::new(normalizer, &self.config.base_type, entry_size);

        let (base_plan, base_block_size) = walker.walk(&base, WalkOptions::default())?;
        walker.set_base_block_size(base_block_size);
        log::debug!("base block size: {}", base_block_size);

        let emitter = StructEmitter::new(&self.config.full_size_tag);
        let mut members = Vec::with_capacity(tagged.len());
        for (ty, tag) in tagged {
            members.push(emitter.emit_type(&mut walker, ty, tag)?);
        }

        if !members.iter().any(|m| emitter.is_full_size(&m.tag)) {
            log::warn!(
                "No subtype tagged '{}', the union size is not anchored",
                self.config.full_size_tag
            );
        }

        Ok(Catalog {
            fixed_kinds,
            entry_size,
            base_block_size,
            base_plan,
            members,
            typedefs: walker.into_typedefs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::TypeDatabase;
    use crate::structure::LayoutError;
    use serde_json::json;

    fn db(extra: serde_json::Value) -> TypeDatabase {
        let mut value = json!({
            "types": {
                "unsigned": { "kind": "scalar", "size": 4 },
                "unsigned long": { "kind": "scalar", "size": 8 },
                "Mword": { "kind": "typedef", "target": "unsigned long" },
                "Tbuf_entry_fixed": { "kind": "enum", "size": 4, "variants": [
                    { "name": "Tbuf_unused", "value": 0 }
                ]},
                "Tb_entry": { "kind": "struct", "size": 16, "fields": [
                    { "name": "_number", "type": "Mword", "bit_offset": 0 },
                    { "name": "_kclock", "type": "unsigned", "bit_offset": 64 }
                ]},
                "Tb_entry_pf": { "kind": "struct", "size": 24, "fields": [
                    { "name": "Tb_entry", "type": "Tb_entry", "bit_offset": 0, "base_class": true },
                    { "name": "_pfa", "type": "Mword", "bit_offset": 128 }
                ]},
                "Tb_entry_union": { "kind": "struct", "size": 128, "fields": [
                    { "name": "Tb_entry", "type": "Tb_entry", "bit_offset": 0, "base_class": true },
                    { "name": "_padding", "type": { "array": "char", "count": 112 }, "bit_offset": 128 }
                ]},
                "char": { "kind": "scalar", "size": 1 }
            }
        });
        if let (Some(types), Some(extra)) = (value["types"].as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                types.insert(k.clone(), v.clone());
            }
        }
        TypeDatabase::from_value(value).unwrap()
    }

    #[test]
    fn test_build_catalog() {
        let db = db(json!({}));
        let config = Config::default();
        let builder = CatalogBuilder::new(&db, &config);
        let subtypes = builder.discover_subtypes().unwrap();
        let catalog = builder.build_catalog(&subtypes).unwrap();

        assert_eq!(catalog.entry_size, 128);
        assert_eq!(catalog.base_block_size, 12);
        let tags: Vec<&str> = catalog.members.iter().map(|m| m.tag.as_str()).collect();
        assert_eq!(tags, vec!["pf", "fullsize"]);

        // Own fields start at 16, four bytes behind the base block.
        let pf = catalog.member("pf").unwrap();
        assert_eq!(pf.plan.get("__pre_pad").map(|e| e.size), Some(4));

        let full = catalog.member("fullsize").unwrap();
        assert_eq!(full.plan.entries().last().map(|e| e.end()), Some(128));
        assert_eq!(catalog.typedefs.get("L4_ktrace_t__Mword"), Some("unsigned long"));
    }

    #[test]
    fn test_unmapped_subtype() {
        let db = db(json!({
            "Tb_entry_new": { "kind": "struct", "size": 16, "fields": [
                { "name": "Tb_entry", "type": "Tb_entry", "bit_offset": 0, "base_class": true }
            ]}
        }));
        let config = Config::default();
        let builder = CatalogBuilder::new(&db, &config);
        let subtypes = builder.discover_subtypes().unwrap();
        let err = builder.build_catalog(&subtypes).unwrap_err();
        assert!(matches!(err, LayoutError::UnmappedSubtype(ref name) if name == "Tb_entry_new"));
    }

    #[test]
    fn test_narrow_word_budget() {
        let db = db(json!({ "Mword": { "kind": "scalar", "size": 4 } }));
        let config = Config::default();
        let builder = CatalogBuilder::new(&db, &config);
        assert_eq!(builder.entry_size().unwrap(), 64);
    }

    #[test]
    fn test_missing_base_type() {
        let db = db(json!({}));
        let mut config = Config::default();
        config.base_type = "Tb_entry_v2".to_string();
        let builder = CatalogBuilder::new(&db, &config);
        let err = builder.build_catalog(&[]).unwrap_err();
        assert!(matches!(err, LayoutError::SchemaMissing { ref name, .. } if name == "Tb_entry_v2"));
    }
}
