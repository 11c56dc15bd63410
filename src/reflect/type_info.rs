// Mon Jan 19 2026 - Alex

use crate::reflect::{ReflectError, ReflectResult};
use std::fmt;

/// Immutable snapshot of one type as reported by a [`TypeProvider`].
///
/// [`TypeProvider`]: crate::reflect::TypeProvider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectedType {
    name: Option<String>,
    kind: TypeKind,
    size: u64,
    canonical: Option<String>,
    is_const: bool,
    is_volatile: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Struct(Vec<Field>),
    Union(Vec<Field>),
    Array { element: Box<ReflectedType>, count: u64 },
    Pointer { pointee: String },
    Enum(Vec<EnumVariant>),
    Scalar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    ty: ReflectedType,
    bit_offset: Option<u64>,
    bit_size: Option<u64>,
    is_base_class: bool,
}

impl ReflectedType {
    pub fn new(name: Option<String>, kind: TypeKind, size: u64) -> Self {
        Self {
            name,
            kind,
            size,
            canonical: None,
            is_const: false,
            is_volatile: false,
        }
    }

    pub fn scalar(name: &str, size: u64) -> Self {
        Self::new(Some(name.to_string()), TypeKind::Scalar, size)
    }

    pub fn pointer(pointee: &str, size: u64) -> Self {
        Self::new(None, TypeKind::Pointer { pointee: pointee.to_string() }, size)
    }

    pub fn array(element: ReflectedType, count: u64) -> ReflectResult<Self> {
        let size = element
            .size
            .checked_mul(count)
            .ok_or_else(|| ReflectError::SizeOverflow(format!("{} [{}]", element.display_name(), count)))?;
        Ok(Self::new(None, TypeKind::Array { element: Box::new(element), count }, size))
    }

    /// Sets the basic form the declared name reduces to once aliases are stripped.
    pub fn with_canonical(mut self, canonical: &str) -> Self {
        self.canonical = Some(canonical.to_string());
        self
    }

    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    pub fn with_volatile(mut self, is_volatile: bool) -> Self {
        self.is_volatile = is_volatile;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn is_volatile(&self) -> bool {
        self.is_volatile
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_) | TypeKind::Union(_))
    }

    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            TypeKind::Struct(fields) | TypeKind::Union(fields) => fields,
            _ => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Names of direct base classes, in declaration order.
    pub fn bases(&self) -> Vec<&str> {
        self.fields()
            .iter()
            .filter(|f| f.is_base_class)
            .map(|f| f.name.as_str())
            .collect()
    }

    pub fn unqualified(&self) -> ReflectedType {
        let mut ty = self.clone();
        ty.is_const = false;
        ty.is_volatile = false;
        ty
    }

    /// Basic form with typedefs and qualifiers removed. Falls back to the declared name.
    pub fn basic_name(&self) -> String {
        match &self.canonical {
            Some(canonical) => canonical.clone(),
            None => self.unqualified_name(),
        }
    }

    /// Declared name without cv-qualifiers.
    pub fn unqualified_name(&self) -> String {
        match (&self.name, &self.kind) {
            (Some(name), _) => name.clone(),
            (None, TypeKind::Pointer { pointee }) => format!("{} *", pointee),
            (None, TypeKind::Array { element, count }) => {
                format!("{} [{}]", element.display_name(), count)
            }
            (None, TypeKind::Struct(_)) => "struct {...}".to_string(),
            (None, TypeKind::Union(_)) => "union {...}".to_string(),
            (None, TypeKind::Enum(_)) => "enum {...}".to_string(),
            (None, TypeKind::Scalar) => "<anonymous>".to_string(),
        }
    }

    /// Name as a debugger would print it, qualifiers included.
    pub fn display_name(&self) -> String {
        let mut name = self.unqualified_name();
        if self.is_const {
            name.push_str(" const");
        }
        if self.is_volatile {
            name.push_str(" volatile");
        }
        name
    }
}

impl fmt::Display for ReflectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Field {
    /// A data member at a byte offset.
    pub fn new(name: &str, ty: ReflectedType, byte_offset: u64) -> Self {
        Self::at_bit(name, ty, byte_offset * 8)
    }

    pub fn at_bit(name: &str, ty: ReflectedType, bit_offset: u64) -> Self {
        Self {
            name: name.to_string(),
            ty,
            bit_offset: Some(bit_offset),
            bit_size: None,
            is_base_class: false,
        }
    }

    /// A member without storage in the object, e.g. a static data member.
    pub fn without_offset(name: &str, ty: ReflectedType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            bit_offset: None,
            bit_size: None,
            is_base_class: false,
        }
    }

    pub fn with_bit_size(mut self, bits: u64) -> Self {
        self.bit_size = Some(bits);
        self
    }

    pub fn as_base_class(mut self) -> Self {
        self.is_base_class = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ReflectedType {
        &self.ty
    }

    pub fn bit_offset(&self) -> Option<u64> {
        self.bit_offset
    }

    pub fn bit_size(&self) -> Option<u64> {
        self.bit_size
    }

    pub fn is_base_class(&self) -> bool {
        self.is_base_class
    }

    pub fn size(&self) -> u64 {
        self.ty.size
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.bit_offset.map_or(true, |bits| bits % 8 == 0)
    }

    pub fn byte_offset(&self) -> Option<u64> {
        self.bit_offset.map(|bits| bits / 8)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bit_offset {
            Some(bits) => write!(f, "{} @ {}: {}", self.name, bits / 8, self.ty),
            None => write!(f, "{}: {}", self.name, self.ty),
        }
    }
}
