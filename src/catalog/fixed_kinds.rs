// Tue Jan 20 2026 - Alex

use crate::config::OutputNaming;
use crate::catalog::discovery::require_type;
use crate::reflect::{EnumVariant, TypeKind, TypeProvider};
use crate::structure::{LayoutError, LayoutResult};

/// The producer's fixed trace-kind enumeration.
#[derive(Debug, Clone)]
pub struct FixedKinds {
    variants: Vec<EnumVariant>,
}

impl FixedKinds {
    pub fn new(variants: Vec<EnumVariant>) -> Self {
        Self { variants }
    }

    pub fn from_provider(provider: &dyn TypeProvider, enum_name: &str) -> LayoutResult<Self> {
        let ty = require_type(provider, enum_name, "fixed trace kinds enum")?;
        match ty.kind() {
            TypeKind::Enum(variants) => Ok(Self::new(variants.clone())),
            _ => Err(LayoutError::SchemaMissing {
                name: enum_name.to_string(),
                reason: format!("expected an enum, found {}", ty.display_name()),
            }),
        }
    }

    pub fn variants(&self) -> &[EnumVariant] {
        &self.variants
    }

    pub fn render(&self, naming: &OutputNaming) -> Vec<String> {
        let mut lines = vec![format!("enum {}", naming.enum_name), "{".to_string()];
        for v in &self.variants {
            lines.push(format!(
                "  {}{} = {},",
                naming.enum_value_prefix,
                v.name.to_lowercase(),
                v.value
            ));
        }
        lines.push("};".to_string());
        lines
    }
}
