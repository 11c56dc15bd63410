// Mon Jan 19 2026 - Alex

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::structure::LayoutError;

const SUBTYPE_TAGS: &[(&str, &str)] = &[
    ("Context::Drq_log", "drq"),
    ("Context::Vcpu_log", "vcpu"),
    ("Factory::Log_entry", "factory"),
    ("Ipc_gate::Log_ipc_gate_invoke", "gate"),
    ("Irq_base::Irq_log", "irq"),
    ("Kobject::Log_destroy", "destroy"),
    ("Mu_log::Map_log", "map"),
    ("Mu_log::Unmap_log", "unmap"),
    ("Rcu::Log_rcu", "rcu"),
    ("Task::Log_unmap", "tunmap"),
    ("Tb_entry_bp", "bp"),
    ("Tb_entry_ctx_sw", "context_switch"),
    ("Tb_entry_ipc", "ipc"),
    ("Tb_entry_ipc_res", "ipc_res"),
    ("Tb_entry_ipc_trace", "ipc_trace"),
    ("Tb_entry_empty", "empty"),
    ("Tb_entry_ke", "ke"),
    ("Tb_entry_ke_bin", "ke_bin"),
    ("Tb_entry_ke_reg", "ke_reg"),
    ("Tb_entry_pf", "pf"),
    ("Tb_entry_sched", "sched"),
    ("Tb_entry_trap", "trap"),
    ("Tb_entry_union", "fullsize"),
    ("Thread::Log_exc_invalid", "ieh"),
    ("Thread::Log_pf_invalid", "ipfh"),
    ("Thread::Log_thread_exregs", "exregs"),
    ("Thread::Migration_log", "migration"),
    ("Timer_tick::Log", "timer"),
    ("Vm_svm::Log_vm_svm_exit", "svm"),
];

// Types whose representation does not matter to the consumer.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("Cap_index", "unsigned long"),
    ("Cpu_number", "unsigned"),
    ("Context::Drq_log::Type", "unsigned"),
    ("L4_msg_tag", "unsigned long"),
    ("L4_obj_ref", "unsigned long"),
    ("L4_timeout_pair", "unsigned"),
    ("L4_error", "unsigned long"),
    ("cxx::Type_info", "unsigned long"),
];

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_type: String,
    pub fixed_kinds_enum: String,
    pub word_type: String,
    pub full_size_tag: String,
    pub wide_entry_size: u64,
    pub narrow_entry_size: u64,
    pub tags: BTreeMap<String, String>,
    pub substitutions: BTreeMap<String, String>,
    pub naming: OutputNaming,
    pub guard: Option<IncludeGuard>,
    pub includes: Vec<String>,
    pub output_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputNaming {
    pub header_comment: String,
    pub typedef_prefix: String,
    pub enum_name: String,
    pub enum_value_prefix: String,
    pub entry_type_name: String,
    pub union_member: String,
}

/// Refuses inclusion unless a wrapper header defined `token` first.
///
/// The wrapped form of the header, as shipped with libftbuf, sets this and
/// lists the fixed-kind header in [`Config::includes`]. Both are unset by
/// default, which produces the plain standalone header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncludeGuard {
    pub token: String,
    pub wrapper_header: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_type: "Tb_entry".to_string(),
            fixed_kinds_enum: "Tbuf_entry_fixed".to_string(),
            word_type: "Mword".to_string(),
            full_size_tag: "fullsize".to_string(),
            wide_entry_size: 128,
            narrow_entry_size: 64,
            tags: table(SUBTYPE_TAGS),
            substitutions: table(SUBSTITUTIONS),
            naming: OutputNaming::default(),
            guard: None,
            includes: Vec::new(),
            output_file: PathBuf::from("ktrace_events.h"),
        }
    }
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            header_comment: "Note, automatically generated from Fiasco binary".to_string(),
            typedef_prefix: "L4_ktrace_t__".to_string(),
            enum_name: "L4_ktrace_tbuf_entry_fixed".to_string(),
            enum_value_prefix: "l4_ktrace_".to_string(),
            entry_type_name: "l4_tracebuffer_entry_t".to_string(),
            union_member: "m".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let content = fs::read_to_string(path).map_err(|e| {
            LayoutError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            LayoutError::InvalidConfig(format!("cannot parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_output_file(mut self, output: PathBuf) -> Self {
        self.output_file = output;
        self
    }

    pub fn with_tag(mut self, type_name: &str, tag: &str) -> Self {
        self.tags.insert(type_name.to_string(), tag.to_string());
        self
    }

    pub fn with_substitution(mut self, type_name: &str, representation: &str) -> Self {
        self.substitutions
            .insert(type_name.to_string(), representation.to_string());
        self
    }

    /// Entry budget for a target whose native word is `word_size` bytes.
    pub fn entry_size_for_word(&self, word_size: u64) -> u64 {
        if word_size == 8 {
            self.wide_entry_size
        } else {
            self.narrow_entry_size
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let required = [
            ("base_type", &self.base_type),
            ("fixed_kinds_enum", &self.fixed_kinds_enum),
            ("word_type", &self.word_type),
            ("full_size_tag", &self.full_size_tag),
        ];
        for (key, value) in required {
            if value.is_empty() {
                return Err(LayoutError::InvalidConfig(format!("{} must not be empty", key)));
            }
        }
        if self.wide_entry_size == 0 || self.narrow_entry_size == 0 {
            return Err(LayoutError::InvalidConfig(
                "entry sizes must be greater than 0".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        for (type_name, tag) in &self.tags {
            if tag.is_empty() {
                return Err(LayoutError::InvalidConfig(format!("empty tag for {}", type_name)));
            }
            if !seen.insert(tag.as_str()) {
                return Err(LayoutError::InvalidConfig(format!(
                    "tag '{}' is used by more than one type",
                    tag
                )));
            }
        }
        Ok(())
    }
}
