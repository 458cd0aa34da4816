//! TOML domain manifests.
//!
//! A manifest describes a domain model for the bundled schema provider. It is
//! the stand-in for a host compiler's semantic model: type names, aggregate
//! kinds, field types and which types are marked for generation.
//!
//! # Format
//!
//! ```toml
//! [domain]
//! namespace = "SourceGenerators.TestApp.Domain"
//! imports   = ["Shared.Kernel"]          # optional
//!
//! [[types]]
//! name   = "Employee"
//! kind   = "class"                       # class | struct (default: class)
//! marked = true                          # default: true
//! fields = [
//!     { name = "Id",              type = "Guid" },
//!     { name = "AssetsAllocated", type = "IReadOnlyCollection<CompanyAsset>" },
//!     { name = "PromotionCodes",  type = "Dictionary<int, string>" },
//! ]
//!
//! # Aggregates defined elsewhere (no fields known here).
//! [[external]]
//! name = "Shared.Kernel.Money"
//! kind = "struct"
//! ```
//!
//! # Name resolution
//!
//! For a field declared in namespace `N`, a simple name resolves to:
//! 1. a C# keyword type (`int`, `string`, ...) -> primitive
//! 2. a type declared in `N`
//! 3. a type declared in an imported namespace, or the only declared type
//!    with that simple name
//! 4. an `[[external]]` aggregate
//! 5. otherwise a primitive (foreign types like `Guid`, `DateTime`)
//!
//! Dotted names are looked up as written, then relative to `N`.

pub mod type_expr;

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use dtogen_core::{
    domain::{AggregateKind, EntitySchema, FieldSchema, TypeDescriptor, TypeHandle},
    error::DtogenError,
};

use self::type_expr::{TypeExpr, TypeExprError};

/// C# keyword types; always primitive.
pub const KEYWORD_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "long", "ulong",
    "short", "ushort", "string", "object", "nint", "nuint",
];

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest{}: {message}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("manifest path not found: {0}")]
    NotFound(PathBuf),

    #[error("type '{0}' is declared more than once")]
    DuplicateType(String),

    #[error("{entity}.{field}: {source}")]
    TypeExpr {
        entity: String,
        field: String,
        #[source]
        source: TypeExprError,
    },

    #[error("{entity}.{field}: '{name}' is ambiguous ({candidates})")]
    AmbiguousType {
        entity: String,
        field: String,
        name: String,
        candidates: String,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" '{}'", p.display()))
        .unwrap_or_default()
}

impl From<ManifestError> for DtogenError {
    fn from(err: ManifestError) -> Self {
        DtogenError::Configuration {
            message: err.to_string(),
        }
    }
}

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of one manifest file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainManifest {
    pub domain: DomainSection,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    #[serde(default)]
    pub external: Vec<ExternalEntry>,
}

/// `[domain]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainSection {
    pub namespace: String,
    #[serde(default)]
    pub imports: Vec<String>,
}

/// One `[[types]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub name: String,
    #[serde(default)]
    pub kind: KindEntry,
    #[serde(default = "default_marked")]
    pub marked: bool,
    /// Overrides `[domain] namespace` for this type.
    pub namespace: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

fn default_marked() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindEntry {
    #[default]
    Class,
    Struct,
}

impl From<KindEntry> for AggregateKind {
    fn from(kind: KindEntry) -> Self {
        match kind {
            KindEntry::Class => AggregateKind::Class,
            KindEntry::Struct => AggregateKind::Struct,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub type_expr: String,
}

/// One `[[external]]` entry: a known aggregate without a local schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalEntry {
    /// Fully qualified name.
    pub name: String,
    #[serde(default)]
    pub kind: KindEntry,
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parse manifest text.
pub fn parse_str(text: &str) -> Result<DomainManifest, ManifestError> {
    toml::from_str(text).map_err(|e| ManifestError::Parse {
        path: None,
        message: e.to_string(),
    })
}

/// Load one manifest file.
#[instrument(fields(path = %path.display()))]
pub fn load_file(path: &Path) -> Result<DomainManifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|e| ManifestError::Parse {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })
}

/// Load every `*.toml` manifest under `dir`, in path order.
///
/// Files that fail to load emit a `WARN` log and are skipped.
#[instrument(fields(dir = %dir.display()))]
pub fn load_dir(dir: &Path) -> Result<Vec<DomainManifest>, ManifestError> {
    if !dir.is_dir() {
        return Err(ManifestError::NotFound(dir.to_path_buf()));
    }

    let mut manifests = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "toml") {
            continue;
        }

        match load_file(path) {
            Ok(manifest) => {
                debug!(path = %path.display(), types = manifest.types.len(), "loaded manifest");
                manifests.push(manifest);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping manifest due to load error");
            }
        }
    }

    debug!(count = manifests.len(), "finished loading manifests");
    Ok(manifests)
}

/// Load manifests from a mix of files and directories.
pub fn load_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<DomainManifest>, ManifestError> {
    let mut manifests = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            manifests.extend(load_dir(path)?);
        } else {
            manifests.push(load_file(path)?);
        }
    }
    Ok(manifests)
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Manifests resolved into schemas.
#[derive(Debug, Clone, Default)]
pub struct ResolvedDomain {
    /// Every declared type, in declaration order.
    pub entities: Vec<EntitySchema>,
    /// Marked types, in declaration order.
    pub marked: Vec<TypeHandle>,
}

/// Resolve field types across all manifests.
pub fn resolve(manifests: &[DomainManifest]) -> Result<ResolvedDomain, ManifestError> {
    let symbols = SymbolTable::build(manifests)?;
    let mut resolved = ResolvedDomain::default();

    for manifest in manifests {
        for entry in &manifest.types {
            let namespace = entry
                .namespace
                .clone()
                .unwrap_or_else(|| manifest.domain.namespace.clone());
            let scope = Scope {
                namespace: &namespace,
                imports: &manifest.domain.imports,
            };

            let mut fields = Vec::with_capacity(entry.fields.len());
            for field in &entry.fields {
                let context = |source| ManifestError::TypeExpr {
                    entity: entry.name.clone(),
                    field: field.name.clone(),
                    source,
                };
                let expr = type_expr::parse(&field.type_expr).map_err(context)?;
                let declared_type = symbols
                    .descriptor(&expr, &scope)
                    .map_err(|(name, candidates)| ManifestError::AmbiguousType {
                        entity: entry.name.clone(),
                        field: field.name.clone(),
                        name,
                        candidates: candidates.join(", "),
                    })?;
                fields.push(FieldSchema::new(&field.name, declared_type));
            }

            let schema =
                EntitySchema::new(&namespace, &entry.name, entry.kind.into()).with_fields(fields);
            if entry.marked {
                resolved.marked.push(TypeHandle::new(schema.qualified_name()));
            }
            resolved.entities.push(schema);
        }
    }

    Ok(resolved)
}

struct Scope<'a> {
    namespace: &'a str,
    imports: &'a [String],
}

/// Qualified name -> kind, for declared and external aggregates.
struct SymbolTable {
    declared: BTreeMap<String, AggregateKind>,
    external: BTreeMap<String, AggregateKind>,
    by_simple_name: HashMap<String, Vec<String>>,
}

impl SymbolTable {
    fn build(manifests: &[DomainManifest]) -> Result<Self, ManifestError> {
        let mut table = Self {
            declared: BTreeMap::new(),
            external: BTreeMap::new(),
            by_simple_name: HashMap::new(),
        };

        for manifest in manifests {
            for entry in &manifest.types {
                let namespace = entry
                    .namespace
                    .as_deref()
                    .unwrap_or(&manifest.domain.namespace);
                let qualified = qualify(namespace, &entry.name);
                if table
                    .declared
                    .insert(qualified.clone(), entry.kind.into())
                    .is_some()
                {
                    return Err(ManifestError::DuplicateType(qualified));
                }
                table
                    .by_simple_name
                    .entry(entry.name.clone())
                    .or_default()
                    .push(qualified);
            }
            for entry in &manifest.external {
                table.external.insert(entry.name.clone(), entry.kind.into());
            }
        }

        Ok(table)
    }

    fn aggregate(&self, qualified: &str) -> Option<AggregateKind> {
        self.declared
            .get(qualified)
            .or_else(|| self.external.get(qualified))
            .copied()
    }

    /// Resolve a name to `(namespace, name, kind)` when it is an aggregate.
    fn lookup(
        &self,
        path: &[String],
        scope: &Scope<'_>,
    ) -> Result<Option<(String, String, AggregateKind)>, (String, Vec<String>)> {
        let Some((simple, prefix)) = path.split_last() else {
            return Ok(None);
        };
        let split = |qualified: &str, kind| {
            let (ns, name) = qualified.rsplit_once('.').unwrap_or(("", qualified));
            (ns.to_string(), name.to_string(), kind)
        };

        if !prefix.is_empty() {
            let written = path.join(".");
            for candidate in [written.clone(), qualify(scope.namespace, &written)] {
                if let Some(kind) = self.aggregate(&candidate) {
                    return Ok(Some(split(&candidate, kind)));
                }
            }
            return Ok(None);
        }

        let local = qualify(scope.namespace, simple);
        if let Some(kind) = self.declared.get(&local) {
            return Ok(Some(split(&local, *kind)));
        }

        for import in scope.imports {
            let imported = qualify(import, simple);
            if let Some(kind) = self.aggregate(&imported) {
                return Ok(Some(split(&imported, kind)));
            }
        }

        if let Some(candidates) = self.by_simple_name.get(simple.as_str()) {
            match candidates.as_slice() {
                [only] => {
                    if let Some(kind) = self.declared.get(only) {
                        return Ok(Some(split(only, *kind)));
                    }
                }
                many => return Err((simple.clone(), many.to_vec())),
            }
        }

        let externals: Vec<&String> = self
            .external
            .keys()
            .filter(|q| q.rsplit('.').next() == Some(simple.as_str()))
            .collect();
        match externals.as_slice() {
            [] => Ok(None),
            [only] => Ok(self.external.get(*only).map(|kind| split(only, *kind))),
            many => Err((simple.clone(), many.iter().map(|s| s.to_string()).collect())),
        }
    }

    fn descriptor(
        &self,
        expr: &TypeExpr,
        scope: &Scope<'_>,
    ) -> Result<TypeDescriptor, (String, Vec<String>)> {
        match expr {
            TypeExpr::Array { element, nullable } => {
                Ok(TypeDescriptor::array(self.descriptor(element, scope)?).with_nullable(*nullable))
            }
            TypeExpr::Named {
                path,
                args,
                nullable,
            } => {
                let simple = path.last().map(String::as_str).unwrap_or_default();
                let namespace = path[..path.len().saturating_sub(1)].join(".");

                let ty = if !args.is_empty() {
                    let args = args
                        .iter()
                        .map(|arg| self.descriptor(arg, scope))
                        .collect::<Result<Vec<_>, _>>()?;
                    TypeDescriptor::generic(namespace, simple, args)
                } else if path.len() == 1 && KEYWORD_TYPES.contains(&simple) {
                    TypeDescriptor::primitive("", simple)
                } else if let Some((ns, name, kind)) = self.lookup(path, scope)? {
                    TypeDescriptor::aggregate(ns, name, kind)
                } else {
                    TypeDescriptor::primitive(namespace, simple)
                };

                Ok(ty.with_nullable(*nullable))
            }
        }
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
