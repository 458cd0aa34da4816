//! Type descriptors: the resolved shape of a field's declared type.
//!
//! A [`TypeDescriptor`] is what the schema provider hands the core for every
//! field. It carries just enough of the host type system for classification:
//!
//! ```text
//! TypeDescriptor
//! ├── name / namespace        e.g. "CompanyAsset" / "Acme.Domain"
//! ├── is_nullable             `T?`
//! ├── shape                   Primitive | CustomEntity(kind) | Array
//! │                           | GenericContainer | Dictionary
//! ├── element                 Array only
//! └── type_arguments          GenericContainer / Dictionary only
//! ```
//!
//! Whether a `CustomEntity` is actually part of the domain being mapped is
//! *not* decided here; that is the registry's job (see `domain::registry`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether an aggregate has reference or value semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateKind {
    /// Reference aggregate (`class`).
    Class,
    /// Value aggregate (`struct`).
    Struct,
}

impl AggregateKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural category of a type. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    /// Scalars and any foreign type the provider does not describe further.
    Primitive,
    /// A named class or struct.
    CustomEntity(AggregateKind),
    /// `T[]`
    Array,
    /// `Name<T, ...>`
    GenericContainer,
    /// A generic container from the dictionary family (`Dictionary<K, V>`, ...).
    Dictionary,
}

/// Fully resolved description of a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    name: String,
    namespace: String,
    is_nullable: bool,
    shape: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    element: Option<Box<TypeDescriptor>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    type_arguments: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// A primitive or foreign type (`int`, `string`, `System.Guid`, ...).
    pub fn primitive(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            is_nullable: false,
            shape: ShapeKind::Primitive,
            element: None,
            type_arguments: Vec::new(),
        }
    }

    /// A named class or struct.
    pub fn aggregate(
        namespace: impl Into<String>,
        name: impl Into<String>,
        kind: AggregateKind,
    ) -> Self {
        Self {
            shape: ShapeKind::CustomEntity(kind),
            ..Self::primitive(namespace, name)
        }
    }

    /// `element[]`
    pub fn array(element: TypeDescriptor) -> Self {
        Self {
            name: String::new(),
            namespace: String::new(),
            is_nullable: false,
            shape: ShapeKind::Array,
            element: Some(Box::new(element)),
            type_arguments: Vec::new(),
        }
    }

    /// `name<args...>`.
    ///
    /// The shape becomes [`ShapeKind::Dictionary`] when `name` belongs to the
    /// dictionary family, [`ShapeKind::GenericContainer`] otherwise.
    pub fn generic(
        namespace: impl Into<String>,
        name: impl Into<String>,
        type_arguments: Vec<TypeDescriptor>,
    ) -> Self {
        let name = name.into();
        let shape = if is_dictionary_family(&name) {
            ShapeKind::Dictionary
        } else {
            ShapeKind::GenericContainer
        };
        Self {
            name,
            namespace: namespace.into(),
            is_nullable: false,
            shape,
            element: None,
            type_arguments,
        }
    }

    /// Mark this type as nullable (`T?`).
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Set nullability explicitly.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.is_nullable = nullable;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub const fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    pub const fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn type_arguments(&self) -> &[TypeDescriptor] {
        &self.type_arguments
    }

    /// Element type: the array element, or the single argument of a
    /// one-argument container.
    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        match self.shape {
            ShapeKind::Array => self.element.as_deref(),
            ShapeKind::GenericContainer if self.type_arguments.len() == 1 => {
                self.type_arguments.first()
            }
            _ => None,
        }
    }

    /// Dictionary key type.
    pub fn key_type(&self) -> Option<&TypeDescriptor> {
        match self.shape {
            ShapeKind::Dictionary => self.type_arguments.first(),
            _ => None,
        }
    }

    /// Dictionary value type.
    pub fn value_type(&self) -> Option<&TypeDescriptor> {
        match self.shape {
            ShapeKind::Dictionary => self.type_arguments.get(1),
            _ => None,
        }
    }

    /// `true` for generic containers and dictionaries.
    pub const fn is_generic(&self) -> bool {
        matches!(
            self.shape,
            ShapeKind::GenericContainer | ShapeKind::Dictionary
        )
    }

    /// `true` for classes and structs.
    pub const fn is_aggregate(&self) -> bool {
        matches!(self.shape, ShapeKind::CustomEntity(_))
    }

    /// Namespace-qualified name without type arguments.
    ///
    /// Arrays have no name of their own; their qualified name is the element's
    /// followed by `[]`.
    pub fn qualified_name(&self) -> String {
        match (&self.shape, &self.element) {
            (ShapeKind::Array, Some(element)) => format!("{}[]", element.qualified_name()),
            _ if self.namespace.is_empty() => self.name.clone(),
            _ => format!("{}.{}", self.namespace, self.name),
        }
    }

    /// Display form without the trailing nullability marker.
    pub fn display_without_nullability(&self) -> String {
        match self.shape {
            ShapeKind::Array => match &self.element {
                Some(element) => format!("{element}[]"),
                None => "[]".to_string(),
            },
            ShapeKind::GenericContainer | ShapeKind::Dictionary => {
                let args: Vec<String> = self.type_arguments.iter().map(|a| a.to_string()).collect();
                format!("{}<{}>", self.name, args.join(", "))
            }
            _ => self.name.clone(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_without_nullability())?;
        if self.is_nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Whether a container name belongs to the dictionary family
/// (`Dictionary`, `IDictionary`, `IReadOnlyDictionary`, `SortedDictionary`, ...).
pub fn is_dictionary_family(container_name: &str) -> bool {
    container_name.contains("Dictionary")
}

/// Identity of a marked type as produced by the marker scanner.
///
/// Opaque to the core apart from ordering and equality; by convention it is
/// the fully qualified type name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeHandle(String);

impl TypeHandle {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self(qualified_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeHandle {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TypeHandle {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
