// Mon Jan 19 2026 - Alex

use crate::reflect::{Field, ReflectError, ReflectedType, TypeKind};
use crate::structure::plan::AggregateKeyword;
use crate::structure::{LayoutError, LayoutPlan, LayoutResult, TypeNormalizer, TypedefTable};
use itertools::Itertools;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Align the first own field against the shared base block.
    pub leading_pad: bool,
    /// Pad the type up to the full entry size.
    pub trailing_pad: bool,
}

/// Turns a reflected type into a [`LayoutPlan`], filling every gap with
/// explicit padding so the emitted packed struct matches the producer's
/// memory layout byte for byte.
pub struct LayoutWalker<'a> {
    normalizer: TypeNormalizer<'a>,
    base_marker: String,
    base_block_size: u64,
    entry_size: u64,
}

impl<'a> LayoutWalker<'a> {
    pub fn new(normalizer: TypeNormalizer<'a>, base_marker: &str, entry_size: u64) -> Self {
        Self {
            normalizer,
            base_marker: base_marker.to_string(),
            base_block_size: 0,
            entry_size,
        }
    }

    pub fn base_block_size(&self) -> u64 {
        self.base_block_size
    }

    /// Offset at which every subtype's own fields begin.
    pub fn set_base_block_size(&mut self, size: u64) {
        self.base_block_size = size;
    }

    pub fn entry_size(&self) -> u64 {
        self.entry_size
    }

    pub fn normalizer(&self) -> &TypeNormalizer<'a> {
        &self.normalizer
    }

    pub fn into_typedefs(self) -> TypedefTable {
        self.normalizer.into_typedefs()
    }

    /// Returns the plan and the offset right behind the last member.
    pub fn walk(&mut self, ty: &ReflectedType, options: WalkOptions) -> LayoutResult<(LayoutPlan, u64)> {
        log::debug!("walking {} ({} bytes)", ty.display_name(), ty.size());

        let start = if options.leading_pad { self.base_block_size } else { 0 };
        let mut plan = LayoutPlan::new();
        let mut cursor = start;
        let mut behind_last_member = start;
        let mut first = true;
        let mut pad_index = 1;

        // Input order is not trusted; members without storage are not part of the layout.
        let fields = ty
            .fields()
            .iter()
            .filter(|f| f.name() != self.base_marker)
            .filter_map(|f| f.bit_offset().map(|bits| (bits, f)))
            .sorted_by_key(|(bits, _)| *bits);

        for (bits, field) in fields {
            if bits % 8 != 0 || field.bit_size().is_some() {
                return Err(LayoutError::UnsupportedField {
                    type_name: ty.display_name(),
                    field: field.name().to_string(),
                    bit_offset: bits,
                });
            }
            let offset = bits / 8;

            if first && options.leading_pad {
                if offset < start {
                    return Err(LayoutError::OverlappingField {
                        type_name: ty.display_name(),
                        field: field.name().to_string(),
                        offset,
                        base_block_size: start,
                    });
                }
                if offset > start {
                    plan.push_padding("__pre_pad", start, offset - start, false);
                }
            } else if cursor < offset {
                plan.push_padding(&format!("__pad_{}", pad_index), cursor, offset - cursor, false);
                pad_index += 1;
            }
            first = false;

            self.emit_field(&mut plan, field, offset)?;

            let end = offset.checked_add(field.size()).ok_or_else(|| {
                ReflectError::SizeOverflow(format!("{}::{}", ty.display_name(), field.name()))
            })?;
            cursor = cursor.max(end);
            behind_last_member = behind_last_member.max(end);
        }

        if options.trailing_pad {
            if behind_last_member > self.entry_size {
                return Err(LayoutError::SizeBudgetExceeded {
                    type_name: ty.display_name(),
                    size: behind_last_member,
                    budget: self.entry_size,
                });
            }
            let size = self.entry_size - behind_last_member;
            plan.push_padding("__post_pad", behind_last_member, size, true);
        }

        Ok((plan, behind_last_member))
    }

    fn emit_field(&mut self, plan: &mut LayoutPlan, field: &Field, offset: u64) -> LayoutResult<()> {
        let ty = field.ty();
        let name = field.name();

        if let Some(keyword) = self.inline_keyword(ty) {
            let members = self.walk_inline(ty)?;
            plan.push_aggregate(name, keyword, members, offset, ty.size());
            return Ok(());
        }

        let declaration = match ty.kind() {
            TypeKind::Array { .. } => {
                let (element, dims) = array_dimensions(ty);
                if let Some(keyword) = self.inline_keyword(element) {
                    // The header never declares the element type, so it is expanded in place.
                    let members = self.walk_inline(element)?;
                    plan.push_aggregate_array(name, keyword, members, dims, offset, ty.size());
                    return Ok(());
                }
                let dims: String = dims.iter().map(|d| format!("[{}]", d)).collect();
                match element.kind() {
                    TypeKind::Pointer { pointee } => {
                        format!("{} *{}{}", self.normalizer.normalize_pointer(pointee)?, name, dims)
                    }
                    _ => format!("{} {}{}", self.normalizer.normalize(&element.unqualified())?, name, dims),
                }
            }
            TypeKind::Pointer { pointee } => {
                format!("{} *{}", self.normalizer.normalize_pointer(pointee)?, name)
            }
            _ => format!("{} {}", self.normalizer.normalize(&ty.unqualified())?, name),
        };

        plan.push_field(name, declaration, offset, ty.size());
        Ok(())
    }

    fn inline_keyword(&self, ty: &ReflectedType) -> Option<AggregateKeyword> {
        match ty.kind() {
            TypeKind::Struct(_) if !self.normalizer.is_substituted(ty) => Some(AggregateKeyword::Struct),
            TypeKind::Union(_) if !self.normalizer.is_substituted(ty) => Some(AggregateKeyword::Union),
            _ => None,
        }
    }

    /// Nested aggregate members, padded out to the aggregate's full size.
    fn walk_inline(&mut self, ty: &ReflectedType) -> LayoutResult<LayoutPlan> {
        let (mut members, end) = self.walk(ty, WalkOptions::default())?;
        if end < ty.size() {
            let name = format!("__pad_{}", members.gap_pad_count() + 1);
            members.push_padding(&name, end, ty.size() - end, false);
        }
        Ok(members)
    }
}

/// Innermost element type and the dimensions from outermost to innermost.
fn array_dimensions(ty: &ReflectedType) -> (&ReflectedType, Vec<u64>) {
    let mut dims = Vec::new();
    let mut current = ty;
    while let TypeKind::Array { element, count } = current.kind() {
        dims.push(*count);
        current = element;
    }
    (current, dims)
}
