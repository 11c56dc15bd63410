// Tue Jan 20 2026 - Alex

use crate::catalog::Catalog;
use crate::config::Config;
use crate::structure::TypedefTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    FixedKinds,
    Typedefs,
    Structs,
}

/// Ordered rendered lines of one output section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionBuffer {
    lines: Vec<String>,
}

impl SectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, lines: I) {
        self.lines.extend(lines);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Preamble followed by the fixed trace-kind enum.
pub fn fixed_kinds_section(catalog: &Catalog, config: &Config) -> SectionBuffer {
    let mut section = SectionBuffer::new();
    section.push(format!("/* {} */", config.naming.header_comment));
    section.push("#pragma once");
    section.push("");

    if let Some(guard) = &config.guard {
        section.push(format!("#ifndef {}", guard.token));
        section.push(format!(
            "#error Do not include this header directly, use {}.",
            guard.wrapper_header
        ));
        section.push("#endif");
        section.push("");
    }
    if !config.includes.is_empty() {
        for include in &config.includes {
            section.push(format!("#include <{}>", include));
        }
        section.push("");
    }

    section.extend(catalog.fixed_kinds.render(&config.naming));
    section
}

/// Takes the finished table: every type has been walked by the time it exists.
pub fn typedef_section(typedefs: &TypedefTable) -> SectionBuffer {
    let mut section = SectionBuffer::new();
    section.push("");
    for (name, representation) in typedefs.iter() {
        section.push(format!("typedef {} {};", representation, name));
    }
    section
}

pub fn struct_section(catalog: &Catalog, config: &Config) -> SectionBuffer {
    let naming = &config.naming;
    let mut section = SectionBuffer::new();
    section.push("");
    section.push("typedef struct __attribute__((packed))");
    section.push("{");
    section.extend(catalog.base_plan.render(2));
    section.push("  union __attribute__((__packed__))");
    section.push("  {");
    for member in &catalog.members {
        section.extend(member.render(4));
    }
    section.push(format!("  }} {};", naming.union_member));
    section.push(format!("}} {};", naming.entry_type_name));
    section
}
