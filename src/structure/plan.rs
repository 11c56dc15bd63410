// Mon Jan 19 2026 - Alex

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKeyword {
    Struct,
    Union,
}

impl AggregateKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Union => "union",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEntryKind {
    /// `declaration` is the C declarator without the trailing `;`.
    Field { declaration: String },
    Padding { annotated: bool },
    /// Inline packed block. `dims` is empty unless the member is an array of it.
    Aggregate {
        keyword: AggregateKeyword,
        members: LayoutPlan,
        dims: Vec<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub kind: PlanEntryKind,
    pub name: String,
    pub offset: u64,
    pub size: u64,
}

impl PlanEntry {
    pub fn is_padding(&self) -> bool {
        matches!(self.kind, PlanEntryKind::Padding { .. })
    }

    pub fn end(&self) -> u64 {
        self.offset + self.size
    }
}

/// Walked, padded layout of one type. Offsets are relative to the type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPlan {
    entries: Vec<PlanEntry>,
}

impl LayoutPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_field(&mut self, name: &str, declaration: String, offset: u64, size: u64) {
        self.entries.push(PlanEntry {
            kind: PlanEntryKind::Field { declaration },
            name: name.to_string(),
            offset,
            size,
        });
    }

    pub fn push_padding(&mut self, name: &str, offset: u64, size: u64, annotated: bool) {
        self.entries.push(PlanEntry {
            kind: PlanEntryKind::Padding { annotated },
            name: name.to_string(),
            offset,
            size,
        });
    }

    pub fn push_aggregate(&mut self, name: &str, keyword: AggregateKeyword, members: LayoutPlan, offset: u64, size: u64) {
        self.push_aggregate_array(name, keyword, members, Vec::new(), offset, size);
    }

    pub fn push_aggregate_array(
        &mut self,
        name: &str,
        keyword: AggregateKeyword,
        members: LayoutPlan,
        dims: Vec<u64>,
        offset: u64,
        size: u64,
    ) {
        self.entries.push(PlanEntry {
            kind: PlanEntryKind::Aggregate { keyword, members, dims },
            name: name.to_string(),
            offset,
            size,
        });
    }

    /// Number of `__pad_N` entries so far.
    pub fn gap_pad_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.is_padding() && e.name.starts_with("__pad_"))
            .count()
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn padding_total(&self) -> u64 {
        self.entries.iter().filter(|e| e.is_padding()).map(|e| e.size).sum()
    }

    /// Sum of all entry sizes, padding included.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    pub fn render(&self, indent: usize) -> Vec<String> {
        let mut lines = Vec::new();
        self.render_into(indent, &mut lines);
        lines
    }

    fn render_into(&self, indent: usize, lines: &mut Vec<String>) {
        let pad = " ".repeat(indent);
        for entry in &self.entries {
            match &entry.kind {
                PlanEntryKind::Field { declaration } => {
                    lines.push(format!("{}{}; /* {}+{} */", pad, declaration, entry.offset, entry.size));
                }
                PlanEntryKind::Padding { annotated: true } => {
                    lines.push(format!(
                        "{}char {}[{}]; /* {}+{} */",
                        pad, entry.name, entry.size, entry.offset, entry.size
                    ));
                }
                PlanEntryKind::Padding { annotated: false } => {
                    lines.push(format!("{}char {}[{}];", pad, entry.name, entry.size));
                }
                PlanEntryKind::Aggregate { keyword, members, dims } => {
                    let dims: String = dims.iter().map(|d| format!("[{}]", d)).collect();
                    lines.push(format!("{}{} __attribute__((__packed__)) {{", pad, keyword.as_str()));
                    members.render_into(indent + 2, lines);
                    lines.push(format!(
                        "{}}} {}{}; /* {}+{} */",
                        pad, entry.name, dims, entry.offset, entry.size
                    ));
                }
            }
        }
    }
}
