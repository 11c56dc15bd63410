// Tue Jan 20 2026 - Alex

use crate::catalog::discovery::require_type;
use crate::catalog::CatalogBuilder;
use crate::config::Config;
use crate::output::OutputArtifact;
use crate::reflect::TypeProvider;
use crate::structure::{LayoutResult, OffsetDump};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Discovering,
    Building,
    Completed,
    Failed,
}

/// Drives one generation run against a type provider.
///
/// Nothing is written until every subtype has been laid out, so any
/// error leaves a previously generated header untouched.
pub struct Engine<'a> {
    provider: &'a dyn TypeProvider,
    config: Config,
    state: EngineState,
}

impl<'a> Engine<'a> {
    pub fn new(provider: &'a dyn TypeProvider, config: Config) -> Self {
        Self {
            provider,
            config,
            state: EngineState::Idle,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn run(&mut self) -> LayoutResult<OutputArtifact> {
        let result = self.generate();
        self.state = match result {
            Ok(_) => EngineState::Completed,
            Err(_) => EngineState::Failed,
        };
        result
    }

    pub fn run_and_write(&mut self) -> LayoutResult<OutputArtifact> {
        let artifact = self.run()?;
        artifact.write(&self.config.output_file)?;
        Ok(artifact)
    }

    /// Member/offset listing of a single type.
    pub fn dump_offsets(&self, type_name: &str, include_static: bool) -> LayoutResult<String> {
        let ty = require_type(self.provider, type_name, "requested type")?;
        Ok(OffsetDump::new().with_static_members(include_static).render(&ty))
    }

    fn generate(&mut self) -> LayoutResult<OutputArtifact> {
        self.config.validate()?;

        self.state = EngineState::Discovering;
        let builder = CatalogBuilder::new(self.provider, &self.config);
        let subtypes = builder.discover_subtypes()?;

        self.state = EngineState::Building;
        let catalog = builder.build_catalog(&subtypes)?;
        log::info!(
            "Laid out {} subtypes, {} typedefs",
            catalog.members.len(),
            catalog.typedefs.len()
        );

        Ok(OutputArtifact::assemble(&catalog, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::TypeDatabase;
    use crate::structure::LayoutError;
    use serde_json::{json, Value};
    use std::fs;

    fn fixture() -> Value {
        json!({
            "target": "amd64",
            "types": {
                "char": { "kind": "scalar", "size": 1 },
                "unsigned": { "kind": "scalar", "size": 4 },
                "unsigned char": { "kind": "scalar", "size": 1 },
                "unsigned long": { "kind": "scalar", "size": 8 },
                "bool": { "kind": "scalar", "size": 1 },
                "Mword": { "kind": "typedef", "target": "unsigned long" },
                "Context": { "kind": "struct", "size": 64, "fields": [] },
                "Tbuf_entry_fixed": { "kind": "enum", "size": 4, "variants": [
                    { "name": "Tbuf_unused", "value": 0 },
                    { "name": "Tbuf_pf", "value": 1 },
                    { "name": "Tbuf_max", "value": 2 }
                ]},
                "Tb_entry": { "kind": "struct", "size": 24, "fields": [
                    { "name": "_number", "type": "Mword", "bit_offset": 0 },
                    { "name": "_ctx", "type": { "pointer": "Context" }, "bit_offset": 64 },
                    { "name": "_type", "type": "unsigned char", "bit_offset": 128 },
                    { "name": "_cut", "type": "bool", "bit_offset": 136 }
                ]},
                "Tb_entry_pf": { "kind": "struct", "size": 40, "fields": [
                    { "name": "Tb_entry", "type": "Tb_entry", "bit_offset": 0, "base_class": true },
                    { "name": "_address", "type": "Mword", "bit_offset": 192 },
                    { "name": "_error", "type": "unsigned", "bit_offset": 256 }
                ]},
                "Tb_entry_union": { "kind": "struct", "size": 128, "fields": [
                    { "name": "Tb_entry", "type": "Tb_entry", "bit_offset": 0, "base_class": true },
                    { "name": "_padding", "type": { "array": "char", "count": 104 }, "bit_offset": 192 }
                ]}
            }
        })
    }

    const EXPECTED: &str = "\
/* Note, automatically generated from Fiasco binary */
#pragma once

enum L4_ktrace_tbuf_entry_fixed
{
  l4_ktrace_tbuf_unused = 0,
  l4_ktrace_tbuf_pf = 1,
  l4_ktrace_tbuf_max = 2,
};

typedef void L4_ktrace_t__Context;
typedef unsigned long L4_ktrace_t__Mword;

typedef struct __attribute__((packed))
{
  L4_ktrace_t__Mword _number; /* 0+8 */
  L4_ktrace_t__Context *_ctx; /* 8+8 */
  unsigned char _type; /* 16+1 */
  char _cut; /* 17+1 */
  union __attribute__((__packed__))
  {
    struct __attribute__((__packed__))
    {
      char __pre_pad[6];
      L4_ktrace_t__Mword _address; /* 24+8 */
      unsigned _error; /* 32+4 */
    } pf; /* 40 */
    struct __attribute__((__packed__))
    {
      char __pre_pad[6];
      char _padding[104]; /* 24+104 */
      char __post_pad[0]; /* 128+0 */
    } fullsize; /* 128 */
  } m;
} l4_tracebuffer_entry_t;
";

    #[test]
    fn test_generate_header() {
        let db = TypeDatabase::from_value(fixture()).unwrap();
        let mut engine = Engine::new(&db, Config::default());
        let artifact = engine.run().unwrap();
        assert_eq!(artifact.render(), EXPECTED);
        assert_eq!(engine.state(), EngineState::Completed);
        assert_eq!(artifact.summary().base_block_size, 18);
        assert_eq!(artifact.summary().entry_size, 128);
    }

    #[test]
    fn test_run_is_deterministic() {
        let db = TypeDatabase::from_value(fixture()).unwrap();
        let first = Engine::new(&db, Config::default()).run().unwrap().render();
        let second = Engine::new(&db, Config::default()).run().unwrap().render();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unmapped_subtype_writes_nothing() {
        let mut value = fixture();
        value["types"]["Tb_entry_mystery"] = json!({ "kind": "struct", "size": 24, "fields": [
            { "name": "Tb_entry", "type": "Tb_entry", "bit_offset": 0, "base_class": true }
        ]});
        let db = TypeDatabase::from_value(value).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ktrace_events.h");
        let config = Config::default().with_output_file(path.clone());
        let mut engine = Engine::new(&db, config);

        let err = engine.run_and_write().unwrap_err();
        assert!(matches!(err, LayoutError::UnmappedSubtype(ref name) if name == "Tb_entry_mystery"));
        assert_eq!(engine.state(), EngineState::Failed);
        assert!(!path.exists());
    }

    #[test]
    fn test_substitution_mismatch_keeps_old_output() {
        let mut value = fixture();
        value["types"]["Tb_entry_pf"]["fields"][2] =
            json!({ "name": "_sched", "type": "Sched_context::Ku_mem", "bit_offset": 256 });
        value["types"]["Sched_context::Ku_mem"] = json!({ "kind": "struct", "size": 16, "fields": [] });
        let db = TypeDatabase::from_value(value).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ktrace_events.h");
        fs::write(&path, "previous\n").unwrap();

        let config = Config::default()
            .with_output_file(path.clone())
            .with_substitution("Sched_context::Ku_mem", "Mword");
        let err = Engine::new(&db, config).run_and_write().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::TypeSubstitutionMismatch { size: 16, substitute_size: 8, .. }
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous\n");
    }

    #[test]
    fn test_missing_fixed_kinds() {
        let mut value = fixture();
        if let Some(types) = value["types"].as_object_mut() {
            types.remove("Tbuf_entry_fixed");
        }
        let db = TypeDatabase::from_value(value).unwrap();
        let err = Engine::new(&db, Config::default()).run().unwrap_err();
        assert!(matches!(err, LayoutError::SchemaMissing { ref name, .. } if name == "Tbuf_entry_fixed"));
    }

    #[test]
    fn test_run_and_write() {
        let db = TypeDatabase::from_value(fixture()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ktrace_events.h");
        let config = Config::default().with_output_file(path.clone());
        Engine::new(&db, config).run_and_write().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), EXPECTED);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let db = TypeDatabase::from_value(fixture()).unwrap();
        let mut config = Config::default();
        config.base_type.clear();
        let err = Engine::new(&db, config).run().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConfig(_)));
    }

    #[test]
    fn test_dump_offsets() {
        let db = TypeDatabase::from_value(fixture()).unwrap();
        let engine = Engine::new(&db, Config::default());
        let dump = engine.dump_offsets("Tb_entry_pf", false).unwrap();
        assert!(dump.starts_with("struct Tb_entry_pf {\n  struct Tb_entry {\n"));
        assert!(dump.contains("  Mword _address; /* 24+8 */\n"));
    }
}
