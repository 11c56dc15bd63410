// Mon Jan 19 2026 - Alex

use crate::reflect::ReflectedType;
use crate::structure::{LayoutError, LayoutPlan, LayoutResult, LayoutWalker, WalkOptions};

/// One subtype, laid out as a member of the entry union.
#[derive(Debug, Clone)]
pub struct EmittedStruct {
    pub type_name: String,
    pub tag: String,
    /// `sizeof` as reported for the source type.
    pub size: u64,
    /// Offset right behind the last member, in source type coordinates.
    pub end: u64,
    pub plan: LayoutPlan,
}

impl EmittedStruct {
    pub fn render(&self, indent: usize) -> Vec<String> {
        let pad = " ".repeat(indent);
        let mut lines = vec![
            format!("{}struct __attribute__((__packed__))", pad),
            format!("{}{{", pad),
        ];
        lines.extend(self.plan.render(indent + 2));
        lines.push(format!("{}}} {}; /* {} */", pad, self.tag, self.size));
        lines
    }
}

pub struct StructEmitter {
    full_size_tag: String,
}

impl StructEmitter {
    pub fn new(full_size_tag: &str) -> Self {
        Self {
            full_size_tag: full_size_tag.to_string(),
        }
    }

    pub fn is_full_size(&self, tag: &str) -> bool {
        tag == self.full_size_tag
    }

    /// Only the full-size representative gets trailing padding; it alone
    /// anchors the size of the union.
    pub fn emit_type(&self, walker: &mut LayoutWalker<'_>, ty: &ReflectedType, tag: &str) -> LayoutResult<EmittedStruct> {
        let options = WalkOptions {
            leading_pad: true,
            trailing_pad: self.is_full_size(tag),
        };
        let (plan, end) = walker.walk(ty, options)?;

        if end > walker.entry_size() {
            return Err(LayoutError::SizeBudgetExceeded {
                type_name: ty.display_name(),
                size: end,
                budget: walker.entry_size(),
            });
        }

        Ok(EmittedStruct {
            type_name: ty.display_name(),
            tag: tag.to_string(),
            size: ty.size(),
            end,
            plan,
        })
    }
}
