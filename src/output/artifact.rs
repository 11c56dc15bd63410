// Tue Jan 20 2026 - Alex

use crate::catalog::Catalog;
use crate::config::Config;
use crate::output::sections::{fixed_kinds_section, struct_section, typedef_section};
use crate::output::{write_artifact, Section, SectionBuffer};
use crate::structure::LayoutResult;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    pub entry_size: u64,
    pub base_block_size: u64,
    /// `(type name, tag)` in union order.
    pub members: Vec<(String, String)>,
    pub typedefs: usize,
}

/// The generated header: fixed kinds, typedefs, structs, in that order.
#[derive(Debug, Clone)]
pub struct OutputArtifact {
    fixed_kinds: SectionBuffer,
    typedefs: SectionBuffer,
    structs: SectionBuffer,
    summary: ArtifactSummary,
}

impl OutputArtifact {
    pub fn assemble(catalog: &Catalog, config: &Config) -> Self {
        Self {
            fixed_kinds: fixed_kinds_section(catalog, config),
            typedefs: typedef_section(&catalog.typedefs),
            structs: struct_section(catalog, config),
            summary: ArtifactSummary {
                entry_size: catalog.entry_size,
                base_block_size: catalog.base_block_size,
                members: catalog
                    .members
                    .iter()
                    .map(|m| (m.type_name.clone(), m.tag.clone()))
                    .collect(),
                typedefs: catalog.typedefs.len(),
            },
        }
    }

    pub fn section(&self, section: Section) -> &SectionBuffer {
        match section {
            Section::FixedKinds => &self.fixed_kinds,
            Section::Typedefs => &self.typedefs,
            Section::Structs => &self.structs,
        }
    }

    pub fn summary(&self) -> &ArtifactSummary {
        &self.summary
    }

    pub fn render(&self) -> String {
        let mut out = self.fixed_kinds.render();
        out.push_str(&self.typedefs.render());
        out.push_str(&self.structs.render());
        out
    }

    pub fn write(&self, path: &Path) -> LayoutResult<()> {
        write_artifact(&self.render(), path)
    }
}
