//! # Component registry and dependency resolution.
//!
//! The [`Registry`] maps component names to their [`ComponentEntry`] and owns
//! the resolved startup order. Resolution runs lazily on the first
//! [`Registry::all`] after a mutation and is cached until the next
//! [`Registry::add`].
//!
//! ## Resolution
//! Kahn's algorithm over the declared dependency edges, in waves: every
//! component whose in-registry dependencies are already placed joins the next
//! wave, and each wave is placed in lexicographic name order. The total order
//! is therefore deterministic for a given component set, independent of
//! registration order.
//!
//! ## Rules
//! - Adding a component under an existing name replaces the old entry; any
//!   watchers parked on the replaced entry are discarded and resolve as
//!   never fired.
//! - [`App::run`](crate::App::run) seals the registry; from then on every
//!   addition fails with [`RuntimeError::Sealed`], no matter which clone of
//!   the registry the call goes through.
//! - A **required** edge to an unregistered name fails resolution with
//!   [`ResolveError::MissingDependency`]; an **optional** one is skipped.
//! - When no progress can be made and components remain, resolution fails
//!   with [`ResolveError::Cycle`] listing every unplaced component (cycle
//!   members and everything downstream of them), sorted by name.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::component::ComponentRef;
use crate::core::entry::ComponentEntry;
use crate::error::{ResolveError, RuntimeError};

/// Name-keyed component store with a cached startup order.
///
/// Cheap to clone; clones share the same underlying store.
///
/// # Example
/// ```
/// use muster::{Dependency, FnComponent, Registry};
///
/// let registry = Registry::new();
/// registry
///     .add(
///         FnComponent::new("db", "1.0.0", |_app, _ready| async { Ok(()) })
///             .with_dependency(Dependency::required("config"))
///             .arc(),
///     )
///     .unwrap();
/// registry
///     .add(FnComponent::new("config", "1.0.0", |_app, _ready| async { Ok(()) }).arc())
///     .unwrap();
///
/// let order: Vec<String> = registry
///     .all()
///     .unwrap()
///     .iter()
///     .map(|entry| entry.name().to_string())
///     .collect();
/// assert_eq!(order, ["config", "db"]);
/// ```
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    entries: HashMap<String, Arc<ComponentEntry>>,
    /// Cached resolution; `None` after any mutation.
    resolved: Option<Vec<Arc<ComponentEntry>>>,
    /// Set once by [`Registry::seal`]; additions fail from then on.
    sealed: bool,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Registry {
            inner: Arc::new(RwLock::new(Inner {
                entries: HashMap::new(),
                resolved: None,
                sealed: false,
            })),
        }
    }

    /// Registers a component under its own name, replacing any previous
    /// entry with that name and invalidating the cached order.
    ///
    /// Fails with [`RuntimeError::Sealed`] once the owning application has
    /// started; the seal is checked under the same lock as the insertion,
    /// so a component set observed at startup stays fixed.
    pub fn add(&self, component: ComponentRef) -> Result<(), RuntimeError> {
        let name = component.name().to_string();
        let version = component.version().to_string();

        let replaced = {
            let mut inner = self.inner.write().unwrap();
            if inner.sealed {
                return Err(RuntimeError::Sealed { component: name });
            }
            inner.resolved = None;
            let entry = Arc::new(ComponentEntry::new(component));
            inner.entries.insert(name.clone(), entry).is_some()
        };
        debug!(component = %name, version = %version, replaced, "Registered component.");
        Ok(())
    }

    /// Seals the registry against further additions.
    ///
    /// Returns `true` on the call that performed the seal and `false` when
    /// the registry was sealed already.
    pub(crate) fn seal(&self) -> bool {
        let mut inner = self.inner.write().unwrap();
        if inner.sealed {
            return false;
        }
        inner.sealed = true;
        true
    }

    /// Returns the entry registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Arc<ComponentEntry>> {
        self.inner.read().unwrap().entries.get(name).cloned()
    }

    /// Returns `true` if a component is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().unwrap().entries.contains_key(name)
    }

    /// Returns the sorted list of registered component names.
    pub fn names(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap();
        let mut names: Vec<String> = inner.entries.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered components.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().entries.len()
    }

    /// Returns `true` if no components are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().entries.is_empty()
    }

    /// Returns every entry in resolved startup order.
    ///
    /// Resolves the dependency graph on first use and serves the cached
    /// order afterwards, until a mutation invalidates it. Each component's
    /// [`dependencies`](crate::Component::dependencies) is consulted once per
    /// resolution.
    pub fn all(&self) -> Result<Vec<Arc<ComponentEntry>>, ResolveError> {
        {
            let inner = self.inner.read().unwrap();
            if let Some(resolved) = &inner.resolved {
                return Ok(resolved.clone());
            }
        }

        let mut inner = self.inner.write().unwrap();
        // Another thread may have resolved while we waited for the lock.
        if let Some(resolved) = &inner.resolved {
            return Ok(resolved.clone());
        }

        let resolved = resolve(&inner.entries)?;
        debug!(components = resolved.len(), "Resolved component startup order.");
        inner.resolved = Some(resolved.clone());
        Ok(resolved)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

/// Orders `entries` so every component follows its in-registry dependencies.
fn resolve(
    entries: &HashMap<String, Arc<ComponentEntry>>,
) -> Result<Vec<Arc<ComponentEntry>>, ResolveError> {
    let mut names: Vec<&String> = entries.keys().collect();
    names.sort_unstable();

    // name → dependencies not yet placed in the order
    let mut remaining: HashMap<&str, HashSet<String>> = HashMap::with_capacity(entries.len());
    for name in &names {
        let entry = &entries[*name];
        let mut unmet = HashSet::new();
        for dep in entry.component().dependencies() {
            if entries.contains_key(dep.name()) {
                unmet.insert(dep.name().to_string());
            } else if dep.is_required() {
                return Err(ResolveError::MissingDependency {
                    component: (*name).clone(),
                    dependency: dep.name().to_string(),
                });
            }
            // an absent optional target does not constrain ordering
        }
        remaining.insert(name.as_str(), unmet);
    }

    let mut resolved = Vec::with_capacity(entries.len());
    while !remaining.is_empty() {
        let mut wave: Vec<&str> = remaining
            .iter()
            .filter(|(_, unmet)| unmet.is_empty())
            .map(|(name, _)| *name)
            .collect();

        if wave.is_empty() {
            let mut components: Vec<String> =
                remaining.keys().map(|name| name.to_string()).collect();
            components.sort_unstable();
            return Err(ResolveError::Cycle { components });
        }

        wave.sort_unstable();
        for name in wave {
            remaining.remove(name);
            for unmet in remaining.values_mut() {
                unmet.remove(name);
            }
            let entry = Arc::clone(&entries[name]);
            entry.set_order(resolved.len());
            resolved.push(entry);
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::component::{Component, Dependency, FnComponent, Ready};
    use crate::core::AppHandle;
    use crate::error::ComponentError;

    fn component(name: &'static str) -> ComponentRef {
        FnComponent::new(name, "0.0.0", |_app, _ready| async { Ok(()) }).arc()
    }

    fn component_with(name: &'static str, deps: Vec<Dependency>) -> ComponentRef {
        FnComponent::new(name, "0.0.0", |_app, _ready| async { Ok(()) })
            .with_dependencies(deps)
            .arc()
    }

    fn order_of(registry: &Registry) -> Vec<String> {
        registry
            .all()
            .unwrap()
            .iter()
            .map(|entry| entry.name().to_string())
            .collect()
    }

    #[test]
    fn test_resolve_orders_dependencies_before_dependents() {
        let registry = Registry::new();
        registry
            .add(component_with(
                "mailer",
                vec![Dependency::required("db"), Dependency::required("cache")],
            ))
            .unwrap();
        registry.add(component_with("db", vec![Dependency::required("config")])).unwrap();
        registry.add(component_with("cache", vec![Dependency::required("config")])).unwrap();
        registry.add(component("config")).unwrap();

        // Waves: [config], [cache, db] (lexicographic), [mailer].
        assert_eq!(order_of(&registry), ["config", "cache", "db", "mailer"]);
    }

    #[test]
    fn test_resolve_ignores_registration_order() {
        let first = Registry::new();
        first.add(component("config")).unwrap();
        first.add(component_with("db", vec![Dependency::required("config")])).unwrap();
        first.add(component_with("api", vec![Dependency::required("db")])).unwrap();

        let second = Registry::new();
        second.add(component_with("api", vec![Dependency::required("db")])).unwrap();
        second.add(component_with("db", vec![Dependency::required("config")])).unwrap();
        second.add(component("config")).unwrap();

        assert_eq!(order_of(&first), order_of(&second));
    }

    #[test]
    fn test_resolve_assigns_sequential_order_indices() {
        let registry = Registry::new();
        registry.add(component("a")).unwrap();
        registry.add(component_with("b", vec![Dependency::required("a")])).unwrap();

        let entries = registry.all().unwrap();
        for (index, entry) in entries.iter().enumerate() {
            assert_eq!(entry.order(), Some(index));
        }
    }

    #[test]
    fn test_missing_required_dependency_fails() {
        let registry = Registry::new();
        registry.add(component_with("mailer", vec![Dependency::required("smtp")])).unwrap();

        let err = registry.all().unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingDependency {
                component: "mailer".into(),
                dependency: "smtp".into(),
            }
        );
    }

    #[test]
    fn test_missing_optional_dependency_is_skipped() {
        let registry = Registry::new();
        registry.add(component_with("api", vec![Dependency::optional("metrics")])).unwrap();

        assert_eq!(order_of(&registry), ["api"]);
    }

    #[test]
    fn test_optional_edge_orders_when_target_registered() {
        let registry = Registry::new();
        registry.add(component_with("api", vec![Dependency::optional("metrics")])).unwrap();
        registry.add(component("metrics")).unwrap();

        assert_eq!(order_of(&registry), ["metrics", "api"]);
    }

    #[test]
    fn test_cycle_detected() {
        let registry = Registry::new();
        registry.add(component_with("a", vec![Dependency::required("b")])).unwrap();
        registry.add(component_with("b", vec![Dependency::required("a")])).unwrap();

        let err = registry.all().unwrap_err();
        assert_eq!(
            err,
            ResolveError::Cycle {
                components: vec!["a".into(), "b".into()],
            }
        );
    }

    #[test]
    fn test_cycle_through_optional_edges() {
        let registry = Registry::new();
        registry.add(component_with("a", vec![Dependency::optional("b")])).unwrap();
        registry.add(component_with("b", vec![Dependency::optional("a")])).unwrap();

        assert!(matches!(
            registry.all().unwrap_err(),
            ResolveError::Cycle { .. }
        ));
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let registry = Registry::new();
        registry.add(component_with("a", vec![Dependency::required("a")])).unwrap();

        assert_eq!(
            registry.all().unwrap_err(),
            ResolveError::Cycle {
                components: vec!["a".into()],
            }
        );
    }

    #[test]
    fn test_cycle_lists_members_and_downstream_only() {
        let registry = Registry::new();
        registry.add(component("standalone")).unwrap();
        registry.add(component_with("a", vec![Dependency::required("b")])).unwrap();
        registry.add(component_with("b", vec![Dependency::required("a")])).unwrap();
        registry.add(component_with("consumer", vec![Dependency::required("a")])).unwrap();

        assert_eq!(
            registry.all().unwrap_err(),
            ResolveError::Cycle {
                components: vec!["a".into(), "b".into(), "consumer".into()],
            }
        );
    }

    #[test]
    fn test_replacing_component_rewires_graph() {
        let registry = Registry::new();
        registry.add(component("worker")).unwrap();
        assert_eq!(order_of(&registry), ["worker"]);

        registry.add(component_with("worker", vec![Dependency::required("gone")])).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(matches!(
            registry.all().unwrap_err(),
            ResolveError::MissingDependency { .. }
        ));
    }

    #[test]
    fn test_sealed_registry_rejects_additions() {
        let registry = Registry::new();
        registry.add(component("config")).unwrap();

        assert!(registry.seal());
        assert!(!registry.seal());

        let err = registry.add(component("late")).unwrap_err();
        assert!(matches!(err, RuntimeError::Sealed { component } if component == "late"));
        assert!(!registry.contains("late"));

        // Sealing stops mutation, not resolution.
        assert_eq!(order_of(&registry), ["config"]);
    }

    struct CountingDeps {
        name: &'static str,
        consulted: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Component for CountingDeps {
        fn name(&self) -> &str {
            self.name
        }

        fn version(&self) -> &str {
            "0.0.0"
        }

        fn dependencies(&self) -> Vec<Dependency> {
            self.consulted.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        }

        async fn run(&self, _app: AppHandle, _ready: Ready) -> Result<(), ComponentError> {
            Ok(())
        }
    }

    #[test]
    fn test_resolution_is_cached_until_mutation() {
        let consulted = Arc::new(AtomicUsize::new(0));
        let registry = Registry::new();
        registry
            .add(Arc::new(CountingDeps {
                name: "tally",
                consulted: Arc::clone(&consulted),
            }))
            .unwrap();

        registry.all().unwrap();
        registry.all().unwrap();
        assert_eq!(consulted.load(Ordering::SeqCst), 1);

        registry.add(component("other")).unwrap();
        registry.all().unwrap();
        assert_eq!(consulted.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_lookup_helpers() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        registry.add(component("b")).unwrap();
        registry.add(component("a")).unwrap();

        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
        assert!(registry.get("b").is_some());
        assert!(registry.get("c").is_none());
        assert_eq!(registry.names(), ["a", "b"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_registry_resolves_to_empty_order() {
        let registry = Registry::new();
        assert!(registry.all().unwrap().is_empty());
    }
}
