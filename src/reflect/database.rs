// Mon Jan 19 2026 - Alex

use crate::reflect::{
    EnumVariant, Field, ReflectError, ReflectResult, ReflectedType, TypeKind, TypeProvider,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const MAX_NESTING: usize = 64;

fn default_pointer_size() -> u64 {
    8
}

/// On-disk form of a type database, as exported from a binary's debug info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDatabaseFile {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default = "default_pointer_size")]
    pub pointer_size: u64,
    pub types: BTreeMap<String, TypeDef>,
    #[serde(default)]
    pub symbols: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDef {
    Struct(AggregateDef),
    Union(AggregateDef),
    Enum(EnumDef),
    Scalar(ScalarDef),
    Typedef(TypedefDef),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateDef {
    pub size: u64,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub bit_offset: Option<u64>,
    #[serde(default)]
    pub bit_size: Option<u64>,
    #[serde(default)]
    pub base_class: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDef {
    pub size: u64,
    #[serde(default)]
    pub underlying: Option<String>,
    #[serde(default)]
    pub variants: Vec<VariantDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantDef {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalarDef {
    pub size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypedefDef {
    pub target: TypeRef,
}

/// Reference to a type from a field or typedef.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Named(String),
    Array { array: Box<TypeRef>, count: u64 },
    Pointer { pointer: Box<TypeRef> },
    Inline(Box<TypeDef>),
}

/// [`TypeProvider`] backed by a JSON type database.
pub struct TypeDatabase {
    file: TypeDatabaseFile,
}

impl TypeDatabase {
    pub fn new(file: TypeDatabaseFile) -> Self {
        Self { file }
    }

    pub fn load(path: &Path) -> ReflectResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> ReflectResult<Self> {
        Ok(Self::new(serde_json::from_str(content)?))
    }

    pub fn from_value(value: serde_json::Value) -> ReflectResult<Self> {
        Ok(Self::new(serde_json::from_value(value)?))
    }

    pub fn target(&self) -> Option<&str> {
        self.file.target.as_deref()
    }

    pub fn type_count(&self) -> usize {
        self.file.types.len()
    }

    fn resolve_named(&self, name: &str, depth: usize) -> ReflectResult<ReflectedType> {
        let (base, is_const, is_volatile) = split_qualifiers(name);
        let def = self
            .file
            .types
            .get(&base)
            .ok_or_else(|| ReflectError::TypeNotFound(base.clone()))?;
        let ty = self.resolve_def(Some(&base), def, depth)?;
        let is_const = ty.is_const() || is_const;
        let is_volatile = ty.is_volatile() || is_volatile;
        Ok(ty.with_const(is_const).with_volatile(is_volatile))
    }

    fn resolve_def(&self, name: Option<&str>, def: &TypeDef, depth: usize) -> ReflectResult<ReflectedType> {
        let owner = name.unwrap_or("<anonymous>");
        if depth > MAX_NESTING {
            return Err(ReflectError::RecursionLimit(owner.to_string()));
        }
        let name = name.map(str::to_string);

        let ty = match def {
            TypeDef::Struct(agg) => {
                let fields = self.resolve_fields(owner, agg, depth)?;
                ReflectedType::new(name, TypeKind::Struct(fields), agg.size)
            }
            TypeDef::Union(agg) => {
                let fields = self.resolve_fields(owner, agg, depth)?;
                ReflectedType::new(name, TypeKind::Union(fields), agg.size)
            }
            TypeDef::Enum(e) => {
                let variants = e
                    .variants
                    .iter()
                    .map(|v| EnumVariant { name: v.name.clone(), value: v.value })
                    .collect();
                let ty = ReflectedType::new(name, TypeKind::Enum(variants), e.size);
                match &e.underlying {
                    Some(underlying) => ty.with_canonical(underlying),
                    None => ty,
                }
            }
            TypeDef::Scalar(s) => ReflectedType::new(name, TypeKind::Scalar, s.size),
            TypeDef::Typedef(t) => {
                let target = self.resolve_ref(owner, &t.target, depth + 1)?;
                let canonical = target.basic_name();
                ReflectedType::new(name, target.kind().clone(), target.size())
                    .with_canonical(&canonical)
                    .with_const(target.is_const())
                    .with_volatile(target.is_volatile())
            }
        };
        Ok(ty)
    }

    fn resolve_fields(&self, owner: &str, agg: &AggregateDef, depth: usize) -> ReflectResult<Vec<Field>> {
        agg.fields
            .iter()
            .map(|f| {
                let ty = self.resolve_ref(owner, &f.ty, depth + 1)?;
                let mut field = match f.bit_offset {
                    Some(bits) => Field::at_bit(&f.name, ty, bits),
                    None => Field::without_offset(&f.name, ty),
                };
                if let Some(bits) = f.bit_size {
                    field = field.with_bit_size(bits);
                }
                if f.base_class {
                    field = field.as_base_class();
                }
                Ok(field)
            })
            .collect()
    }

    fn resolve_ref(&self, owner: &str, r: &TypeRef, depth: usize) -> ReflectResult<ReflectedType> {
        match r {
            TypeRef::Named(name) => self.resolve_named(name, depth).map_err(|e| match e {
                ReflectError::TypeNotFound(name) => ReflectError::UnresolvedReference {
                    owner: owner.to_string(),
                    name,
                },
                other => other,
            }),
            TypeRef::Array { array, count } => {
                let element = self.resolve_ref(owner, array, depth + 1)?;
                ReflectedType::array(element, *count)
            }
            TypeRef::Pointer { pointer } => {
                Ok(ReflectedType::pointer(&ref_name(pointer), self.file.pointer_size))
            }
            TypeRef::Inline(def) => self.resolve_def(None, def, depth + 1),
        }
    }
}

impl TypeProvider for TypeDatabase {
    fn lookup_type(&self, name: &str) -> ReflectResult<ReflectedType> {
        self.resolve_named(name, 0)
    }

    fn enumerate_known_types(&self) -> ReflectResult<Vec<String>> {
        Ok(self.file.types.keys().cloned().collect())
    }

    fn resolve_symbol_address(&self, name: &str) -> ReflectResult<u64> {
        self.file
            .symbols
            .get(name)
            .copied()
            .ok_or_else(|| ReflectError::SymbolNotFound(name.to_string()))
    }

    // Works on the raw definitions so unrelated broken entries do not fail discovery.
    fn is_base_class_of(&self, derived: &str, base: &str) -> ReflectResult<bool> {
        let (derived, _, _) = split_qualifiers(derived);
        let def = self
            .file
            .types
            .get(&derived)
            .ok_or(ReflectError::TypeNotFound(derived.clone()))?;
        Ok(match def {
            TypeDef::Struct(agg) | TypeDef::Union(agg) => {
                agg.fields.iter().any(|f| f.base_class && f.name == base)
            }
            _ => false,
        })
    }
}

/// Splits `"Context const"` into `("Context", true, false)`.
fn split_qualifiers(name: &str) -> (String, bool, bool) {
    let mut is_const = false;
    let mut is_volatile = false;
    let base: Vec<&str> = name
        .split_whitespace()
        .filter(|tok| match *tok {
            "const" => {
                is_const = true;
                false
            }
            "volatile" => {
                is_volatile = true;
                false
            }
            _ => true,
        })
        .collect();
    (base.join(" "), is_const, is_volatile)
}

fn ref_name(r: &TypeRef) -> String {
    match r {
        TypeRef::Named(name) => split_qualifiers(name).0,
        TypeRef::Array { array, count } => format!("{} [{}]", ref_name(array), count),
        TypeRef::Pointer { pointer } => format!("{} *", ref_name(pointer)),
        TypeRef::Inline(def) => match def.as_ref() {
            TypeDef::Struct(_) => "struct {...}".to_string(),
            TypeDef::Union(_) => "union {...}".to_string(),
            TypeDef::Enum(_) => "enum {...}".to_string(),
            _ => "<anonymous>".to_string(),
        },
    }
}
