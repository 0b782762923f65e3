// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema model.
//!
//! Named types ([`FixedSchema`], [`RecordSchema`]) carry a [`Name`]; once a
//! named type has been defined, later occurrences may refer to it through
//! [`Schema::Ref`]. Recursive records rely on this.

mod builder;
mod json;

pub use builder::RecordSchemaBuilder;

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Default precision of a decimal without an explicit schema.
pub const DEFAULT_DECIMAL_PRECISION: usize = 8;
/// Default scale of a decimal without an explicit schema.
pub const DEFAULT_DECIMAL_SCALE: u32 = 2;

/// Name of a named type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    pub name: String,
    pub namespace: Option<String>,
}

impl Name {
    /// Create a name. An empty namespace is treated as none.
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
        }
    }

    /// Split a dotted full name into namespace and simple name.
    pub fn parse(fullname: &str) -> Self {
        match fullname.rsplit_once('.') {
            Some((ns, name)) => Self::new(name, Some(ns)),
            None => Self::new(fullname, None),
        }
    }

    /// Dotted full name.
    pub fn fullname(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}.{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Schema of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    /// Logical decimal over bytes.
    Decimal(DecimalSchema),
    Fixed(FixedSchema),
    Array(Box<Schema>),
    Map(Box<Schema>),
    Union(UnionSchema),
    Record(Arc<RecordSchema>),
    /// Reference to a named type defined elsewhere in the enclosing schema.
    Ref(Name),
}

impl Schema {
    /// Name of a named type (fixed, record, or reference).
    pub fn name(&self) -> Option<&Name> {
        match self {
            Self::Fixed(f) => Some(&f.name),
            Self::Record(r) => Some(&r.name),
            Self::Ref(n) => Some(n),
            _ => None,
        }
    }

    /// Namespace of a named type.
    pub fn namespace(&self) -> Option<&str> {
        self.name()?.namespace.as_deref()
    }

    /// Record schema, if this is a record.
    pub fn as_record(&self) -> Option<&Arc<RecordSchema>> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Structural equality where a reference equals the named type it names.
    pub fn matches(&self, other: &Schema) -> bool {
        match (self, other) {
            (Self::Ref(a), b) | (b, Self::Ref(a)) => {
                b.name().is_some_and(|n| n.fullname() == a.fullname())
            }
            (Self::Array(a), Self::Array(b)) | (Self::Map(a), Self::Map(b)) => a.matches(b),
            (Self::Union(a), Self::Union(b)) => {
                a.variants.len() == b.variants.len()
                    && a.variants.iter().zip(&b.variants).all(|(x, y)| x.matches(y))
            }
            (Self::Record(a), Self::Record(b)) => {
                Arc::ptr_eq(a, b)
                    || (a.name == b.name
                        && a.fields.len() == b.fields.len()
                        && a.fields
                            .iter()
                            .zip(&b.fields)
                            .all(|(x, y)| x.name == y.name && x.schema.matches(&y.schema)))
            }
            _ => self == other,
        }
    }
}

/// Decimal logical type parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalSchema {
    /// Maximum number of significant digits.
    pub precision: usize,
    /// Number of fractional digits.
    pub scale: u32,
}

impl DecimalSchema {
    pub fn new(precision: usize, scale: u32) -> Self {
        Self { precision, scale }
    }
}

impl Default for DecimalSchema {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMAL_PRECISION, DEFAULT_DECIMAL_SCALE)
    }
}

/// Fixed-size byte sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSchema {
    pub name: Name,
    pub size: usize,
    pub doc: Option<String>,
}

impl FixedSchema {
    pub fn new(name: Name, size: usize) -> Self {
        Self {
            name,
            size,
            doc: None,
        }
    }
}

/// Union of alternative schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionSchema {
    variants: Vec<Schema>,
}

impl UnionSchema {
    pub fn new(variants: Vec<Schema>) -> Self {
        Self { variants }
    }

    /// `[null, inner]`.
    pub fn nullable(inner: Schema) -> Self {
        Self::new(vec![Schema::Null, inner])
    }

    pub fn variants(&self) -> &[Schema] {
        &self.variants
    }

    /// For a 2-branch union with exactly one null branch, the index of the
    /// null branch and the other branch.
    pub fn nullable_branch(&self) -> Option<(u32, &Schema)> {
        match self.variants.as_slice() {
            [Schema::Null, inner] if *inner != Schema::Null => Some((0, inner)),
            [inner, Schema::Null] if *inner != Schema::Null => Some((1, inner)),
            _ => None,
        }
    }
}

/// Field of a record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    /// Position within the enclosing record, assigned by [`RecordSchema::new`].
    pub position: usize,
    pub schema: Schema,
    pub default: Option<Value>,
    pub doc: Option<String>,
    pub aliases: Vec<String>,
}

impl Field {
    /// Create a field without default, doc or aliases.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            position: 0,
            schema,
            default: None,
            doc: None,
            aliases: Vec::new(),
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

/// Record schema: a named, ordered list of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: Name,
    pub doc: Option<String>,
    fields: Vec<Field>,
}

impl RecordSchema {
    /// Create a record schema. Field positions are renumbered in order.
    pub fn new(name: Name, doc: Option<String>, mut fields: Vec<Field>) -> Self {
        for (position, field) in fields.iter_mut().enumerate() {
            field.position = position;
        }
        Self { name, doc, fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get field by name, then by alias.
    pub fn field_or_alias(&self, name: &str) -> Option<&Field> {
        self.field(name)
            .or_else(|| self.fields.iter().find(|f| f.aliases.iter().any(|a| a == name)))
    }
}
