// Mon Jan 19 2026 - Alex

use crate::reflect::{ReflectedType, TypeKind};
use itertools::Itertools;

/// Human readable member/offset listing of a type, nested aggregates expanded.
pub struct OffsetDump {
    include_static: bool,
}

impl OffsetDump {
    pub fn new() -> Self {
        Self { include_static: false }
    }

    /// Also list members that have no storage in the object.
    pub fn with_static_members(mut self, include: bool) -> Self {
        self.include_static = include;
        self
    }

    pub fn render(&self, ty: &ReflectedType) -> String {
        let mut lines = Vec::new();
        if ty.is_aggregate() {
            self.render_type(ty, 0, None, "", &mut lines);
        } else {
            lines.push(format!("{}; /* {} */", ty.display_name(), ty.size()));
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn render_type(&self, ty: &ReflectedType, indent: usize, member: Option<&str>, desc: &str, lines: &mut Vec<String>) {
        let pad = "  ".repeat(indent);
        let keyword = match ty.kind() {
            TypeKind::Union(_) => "union",
            _ => "struct",
        };
        match ty.name() {
            Some(name) => lines.push(format!("{}{} {} {{", pad, keyword, name)),
            None => lines.push(format!("{}{} {{", pad, keyword)),
        }

        self.render_members(ty, indent, lines);

        let close = match member {
            Some(member) => format!("{}}} {}; {}", pad, member, desc),
            None => format!("{}}}; {}", pad, desc),
        };
        lines.push(close.trim_end().to_string());
    }

    fn render_members(&self, ty: &ReflectedType, indent: usize, lines: &mut Vec<String>) {
        let pad = "  ".repeat(indent);
        for field in ty.fields().iter().sorted_by_key(|f| f.bit_offset()) {
            let desc = match field.byte_offset() {
                Some(offset) => format!("/* {}+{} */", offset, field.size()),
                None if self.include_static => format!("/* {} */", field.size()),
                None => continue,
            };
            if field.ty().is_aggregate() {
                self.render_type(field.ty(), indent + 1, Some(field.name()), &desc, lines);
            } else {
                lines.push(format!("{}  {} {}; {}", pad, field.ty().display_name(), field.name(), desc));
            }
        }
    }
}

impl Default for OffsetDump {
    fn default() -> Self {
        Self::new()
    }
}
