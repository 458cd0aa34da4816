//! Per-run custom type registry.
//!
//! Decides which aggregate types belong to the domain being mapped. The
//! registry is rebuilt for every generation run from the candidate schemas
//! plus every aggregate reachable through their fields that the schema
//! provider can resolve.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entities::{EntitySchema, ShapeKind, TypeDescriptor, TypeHandle};

/// How "customness" of an aggregate type is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomTypeRule {
    /// Custom iff the type is known to the per-run registry.
    #[default]
    Registry,
    /// Custom iff the type's qualified name starts with the owning entity's
    /// namespace. An empty owner namespace never matches.
    NamespacePrefix,
}

impl CustomTypeRule {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::NamespacePrefix => "namespace-prefix",
        }
    }
}

impl fmt::Display for CustomTypeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomTypeRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "registry" => Ok(Self::Registry),
            "namespace-prefix" | "namespace_prefix" | "prefix" => Ok(Self::NamespacePrefix),
            other => Err(format!(
                "unknown custom type rule '{other}' (expected 'registry' or 'namespace-prefix')"
            )),
        }
    }
}

/// Known domain aggregates for one generation run.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    rule: CustomTypeRule,
    known: BTreeMap<String, EntitySchema>,
    marked: BTreeSet<String>,
}

impl DomainRegistry {
    /// Empty registry.
    pub fn new(rule: CustomTypeRule) -> Self {
        Self {
            rule,
            known: BTreeMap::new(),
            marked: BTreeSet::new(),
        }
    }

    /// Build the registry from the run's candidates.
    ///
    /// `resolve` is asked for every aggregate reached through a field (at any
    /// position: direct, array element, container argument). Types it resolves
    /// are added and traversed in turn.
    pub fn build<F>(rule: CustomTypeRule, candidates: &[EntitySchema], resolve: F) -> Self
    where
        F: Fn(&TypeHandle) -> Option<EntitySchema>,
    {
        let mut registry = Self::new(rule);
        let mut pending: VecDeque<EntitySchema> = VecDeque::new();

        for candidate in candidates {
            let name = candidate.qualified_name();
            registry.marked.insert(name.clone());
            if registry.known.insert(name, candidate.clone()).is_none() {
                pending.push_back(candidate.clone());
            }
        }

        while let Some(entity) = pending.pop_front() {
            for field in entity.fields() {
                for aggregate in aggregates_in(&field.declared_type) {
                    let name = aggregate.qualified_name();
                    if registry.known.contains_key(&name) {
                        continue;
                    }
                    if let Some(schema) = resolve(&TypeHandle::new(name.clone())) {
                        registry.known.insert(name, schema.clone());
                        pending.push_back(schema);
                    }
                }
            }
        }

        registry
    }

    pub const fn rule(&self) -> CustomTypeRule {
        self.rule
    }

    /// Whether `ty`, appearing in an entity of `owner_namespace`, is a domain
    /// type that needs its own DTO.
    ///
    /// Only aggregates can be custom, whatever the rule.
    pub fn is_custom(&self, ty: &TypeDescriptor, owner_namespace: &str) -> bool {
        if !matches!(ty.shape(), ShapeKind::CustomEntity(_)) {
            return false;
        }
        match self.rule {
            CustomTypeRule::Registry => self.known.contains_key(&ty.qualified_name()),
            CustomTypeRule::NamespacePrefix => {
                !owner_namespace.is_empty() && ty.qualified_name().starts_with(owner_namespace)
            }
        }
    }

    /// Whether the type was one of the run's candidates.
    pub fn is_marked(&self, qualified_name: &str) -> bool {
        self.marked.contains(qualified_name)
    }

    pub fn schema(&self, qualified_name: &str) -> Option<&EntitySchema> {
        self.known.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Qualified names of every known type, sorted.
    pub fn known_names(&self) -> impl Iterator<Item = &str> {
        self.known.keys().map(String::as_str)
    }
}

/// Every aggregate appearing anywhere inside `ty`, outermost first.
pub fn aggregates_in(ty: &TypeDescriptor) -> Vec<&TypeDescriptor> {
    let mut found = Vec::new();
    collect_aggregates(ty, &mut found);
    found
}

fn collect_aggregates<'a>(ty: &'a TypeDescriptor, found: &mut Vec<&'a TypeDescriptor>) {
    match ty.shape() {
        ShapeKind::CustomEntity(_) => found.push(ty),
        ShapeKind::Array => {
            if let Some(element) = ty.element_type() {
                collect_aggregates(element, found);
            }
        }
        ShapeKind::GenericContainer | ShapeKind::Dictionary => {
            for arg in ty.type_arguments() {
                collect_aggregates(arg, found);
            }
        }
        ShapeKind::Primitive => {}
    }
}
