//! In-memory domain store with the built-in sample domain.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::{debug, warn};

use dtogen_core::{
    application::{
        ApplicationError,
        ports::{MarkerScanner, SchemaProvider},
    },
    domain::{DomainValidator as validator, EntitySchema, TypeHandle},
    error::{DtogenError, DtogenResult},
};

use crate::{
    builtin_domain,
    manifest::{self, ResolvedDomain},
};

#[derive(Debug, Default)]
struct DomainState {
    schemas: HashMap<TypeHandle, EntitySchema>,
    /// Marked handles, in insertion order.
    marked: Vec<TypeHandle>,
}

/// Thread-safe in-memory domain.
///
/// Serves schemas by qualified name and reports marked types in the order
/// they were inserted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDomain {
    inner: Arc<RwLock<DomainState>>,
}

impl InMemoryDomain {
    /// Create a new empty domain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a domain holding the built-in sample.
    pub fn with_builtin() -> DtogenResult<Self> {
        Self::from_resolved(builtin_domain::resolve()?)
    }

    /// Create a domain from resolved manifests.
    pub fn from_resolved(resolved: ResolvedDomain) -> DtogenResult<Self> {
        let domain = Self::new();
        let ResolvedDomain { entities, marked } = resolved;
        for entity in entities {
            let handle = TypeHandle::new(entity.qualified_name());
            domain.insert(entity, marked.contains(&handle))?;
        }
        Ok(domain)
    }

    /// Load manifests from files and directories.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> DtogenResult<Self> {
        let manifests = manifest::load_paths(paths)?;
        debug!(manifests = manifests.len(), "Manifests loaded");
        Self::from_resolved(manifest::resolve(&manifests)?)
    }

    /// Add or replace a schema.
    ///
    /// Re-inserting a marked type keeps its original position.
    pub fn insert(&self, entity: EntitySchema, marked: bool) -> DtogenResult<()> {
        validator::validate_entity(&entity).map_err(DtogenError::Domain)?;

        let mut state = self.write()?;
        let handle = TypeHandle::new(entity.qualified_name());

        if marked && !state.marked.contains(&handle) {
            state.marked.push(handle.clone());
        } else if !marked {
            state.marked.retain(|h| h != &handle);
        }
        state.schemas.insert(handle, entity);
        Ok(())
    }

    /// Number of known schemas.
    pub fn len(&self) -> usize {
        self.inner.read().map(|s| s.schemas.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove everything.
    pub fn clear(&self) -> DtogenResult<()> {
        let mut state = self.write()?;
        state.schemas.clear();
        state.marked.clear();
        Ok(())
    }

    /// All schemas, marked ones first in marker order, then the rest by name.
    pub fn entities(&self) -> DtogenResult<Vec<EntitySchema>> {
        let state = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StateLockError { name: "domain store" })?;

        let mut rest: Vec<&EntitySchema> = state
            .schemas
            .iter()
            .filter(|(handle, _)| !state.marked.contains(handle))
            .map(|(_, schema)| schema)
            .collect();
        rest.sort_by_key(|schema| schema.qualified_name());

        Ok(state
            .marked
            .iter()
            .filter_map(|handle| state.schemas.get(handle))
            .chain(rest)
            .cloned()
            .collect())
    }

    fn write(&self) -> DtogenResult<std::sync::RwLockWriteGuard<'_, DomainState>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StateLockError { name: "domain store" }.into())
    }
}

impl MarkerScanner for InMemoryDomain {
    fn scan(&self) -> DtogenResult<Vec<TypeHandle>> {
        let state = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StateLockError { name: "domain store" })?;
        debug!(marked = state.marked.len(), "Marker scan");
        Ok(state.marked.clone())
    }
}

impl SchemaProvider for InMemoryDomain {
    fn resolve(&self, handle: &TypeHandle) -> Option<EntitySchema> {
        match self.inner.read() {
            Ok(state) => state.schemas.get(handle).cloned(),
            Err(_) => {
                warn!(handle = %handle, "Domain store lock poisoned");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtogen_core::domain::{AggregateKind, TypeDescriptor};
    use std::fs;
    use tempfile::TempDir;

    fn entity(name: &str) -> EntitySchema {
        EntitySchema::new("App", name, AggregateKind::Class)
            .with_field("Id", TypeDescriptor::primitive("", "int"))
    }

    #[test]
    fn new_domain_is_empty() {
        let domain = InMemoryDomain::new();
        assert!(domain.is_empty());
        assert!(domain.scan().unwrap().is_empty());
    }

    #[test]
    fn builtin_domain_scans_in_declaration_order() {
        let domain = InMemoryDomain::with_builtin().unwrap();
        let marked: Vec<String> = domain
            .scan()
            .unwrap()
            .iter()
            .map(|h| h.as_str().rsplit('.').next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            marked,
            ["Address", "AssetCode", "CompanyAsset", "HolidayBalance", "Employee"]
        );
        assert_eq!(domain.len(), 5);
    }

    #[test]
    fn resolves_known_and_rejects_unknown_handles() {
        let domain = InMemoryDomain::new();
        domain.insert(entity("User"), true).unwrap();

        assert!(domain.resolve(&TypeHandle::new("App.User")).is_some());
        assert!(domain.resolve(&TypeHandle::new("App.Missing")).is_none());
    }

    #[test]
    fn unmarked_types_resolve_but_are_not_scanned() {
        let domain = InMemoryDomain::new();
        domain.insert(entity("User"), true).unwrap();
        domain.insert(entity("Audit"), false).unwrap();

        assert_eq!(domain.scan().unwrap(), vec![TypeHandle::new("App.User")]);
        assert!(domain.resolve(&TypeHandle::new("App.Audit")).is_some());

        let all: Vec<String> = domain
            .entities()
            .unwrap()
            .iter()
            .map(|e| e.qualified_name())
            .collect();
        assert_eq!(all, ["App.User", "App.Audit"]);
    }

    #[test]
    fn reinserting_keeps_position_and_can_unmark() {
        let domain = InMemoryDomain::new();
        domain.insert(entity("A"), true).unwrap();
        domain.insert(entity("B"), true).unwrap();
        domain.insert(entity("A"), true).unwrap();
        assert_eq!(
            domain.scan().unwrap(),
            vec![TypeHandle::new("App.A"), TypeHandle::new("App.B")]
        );

        domain.insert(entity("A"), false).unwrap();
        assert_eq!(domain.scan().unwrap(), vec![TypeHandle::new("App.B")]);
        assert_eq!(domain.len(), 2);
    }

    #[test]
    fn invalid_schemas_are_rejected() {
        let domain = InMemoryDomain::new();
        let bad = EntitySchema::new("App", "Bad", AggregateKind::Class)
            .with_field("X", TypeDescriptor::primitive("", "int"))
            .with_field("X", TypeDescriptor::primitive("", "int"));

        assert!(matches!(
            domain.insert(bad, true),
            Err(DtogenError::Domain(_))
        ));
        assert!(domain.is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let domain = InMemoryDomain::with_builtin().unwrap();
        domain.clear().unwrap();
        assert!(domain.is_empty());
        assert!(domain.scan().unwrap().is_empty());
    }

    #[test]
    fn clones_share_state() {
        let domain = InMemoryDomain::new();
        let clone = domain.clone();
        domain.insert(entity("Shared"), true).unwrap();
        assert_eq!(clone.len(), 1);
    }

    #[test]
    fn from_paths_loads_manifest_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("domain.toml");
        fs::write(&path, builtin_domain::MANIFEST).unwrap();

        let domain = InMemoryDomain::from_paths(&[path]).unwrap();
        assert_eq!(domain.scan().unwrap().len(), 5);
    }

    #[test]
    fn from_paths_reports_missing_files_as_configuration_errors() {
        let err = InMemoryDomain::from_paths(&["/no/such/manifest.toml"]).unwrap_err();
        assert!(matches!(err, DtogenError::Configuration { .. }));
    }
}
