//! Singleton registry and dependency injector
//!
//! The container maps type identity to one owned singleton per registered
//! [`Layer`] and wires [`Dep`] slots from that map. It is the composition
//! root of an application: built once, passed explicitly, never a
//! process-wide global.
//!
//! ## Architecture
//!
//! ```text
//! ContainerBuilder::register::<T>()   T::construct() → TypeId(T) → Arc<T>
//!                 │
//!                 ▼
//! ContainerBuilder::build()           one wiring pass over every singleton
//!                 │
//!                 ▼
//! Container::resolve::<T>()           typed singleton lookup
//! Container::inject(&instance)        re-wire any Layer instance on demand
//! ```
//!
//! Resolution is by declared slot type only: two slots of the same type
//! receive the identical singleton. Injection never recurses into the wired
//! dependency's own slots; `build()` covers every registered singleton in
//! one pass, and caller-constructed instances are wired with an explicit
//! `inject` call.

use crate::config::{WirePolicy, WiringConfig};
use crate::error::{Error, Result};
use crate::layer::{Dep, Layer};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One registered singleton plus the wiring thunk for its concrete type
struct Entry {
    instance: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
    wire: fn(&Container, &Entry) -> Result<()>,
}

/// Builder for [`Container`]
///
/// Registration happens here; lookups and injection happen on the built
/// container. All `register` calls therefore complete before any wiring
/// runs, which is the ordering the registry requires for mutually dependent
/// layers.
pub struct ContainerBuilder {
    entries: HashMap<TypeId, Entry>,
    policy: WirePolicy,
}

impl ContainerBuilder {
    /// Create an empty builder with the permissive wiring policy
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            policy: WirePolicy::default(),
        }
    }

    /// Set the wiring policy applied at build time and by `inject`
    pub fn with_policy(mut self, policy: WirePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Apply a wiring configuration section
    pub fn with_config(self, config: &WiringConfig) -> Self {
        self.with_policy(config.policy)
    }

    /// Register a layer type, constructing its singleton
    ///
    /// Calls [`Layer::construct`] exactly once and stores the result under
    /// the type's identity. Construction failures propagate to the caller.
    /// Registering the same type again replaces the stored singleton
    /// (map-assignment semantics).
    pub fn register<T: Layer>(mut self) -> Result<Self> {
        let type_name = std::any::type_name::<T>();
        let instance = T::construct()?;

        let replaced = self
            .entries
            .insert(
                TypeId::of::<T>(),
                Entry {
                    instance: Arc::new(instance),
                    type_name,
                    wire: wire_entry::<T>,
                },
            )
            .is_some();

        debug!(layer = type_name, replaced, "Registered layer singleton");
        Ok(self)
    }

    /// Freeze the registry and wire every registered singleton
    ///
    /// After `build` returns, no registry-managed instance is observable in
    /// a partially wired state. Under [`WirePolicy::Strict`] an unresolved
    /// slot fails the build; under [`WirePolicy::Permissive`] it is logged
    /// and left unset.
    pub fn build(self) -> Result<Container> {
        let container = Container {
            entries: self.entries,
            policy: self.policy,
        };

        for entry in container.entries.values() {
            (entry.wire)(&container, entry)?;
        }

        info!(
            layers = container.len(),
            policy = ?container.policy,
            "Container built and wired"
        );
        Ok(container)
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut layers: Vec<&str> = self.entries.values().map(|e| e.type_name).collect();
        layers.sort_unstable();
        f.debug_struct("ContainerBuilder")
            .field("policy", &self.policy)
            .field("layers", &layers)
            .finish_non_exhaustive()
    }
}

/// Wiring thunk: recover the concrete type of an entry and inject it
fn wire_entry<T: Layer>(container: &Container, entry: &Entry) -> Result<()> {
    match entry.instance.clone().downcast::<T>() {
        Ok(instance) => container.inject::<T>(&instance),
        // Unreachable: entries are keyed by the TypeId they were stored under
        Err(_) => Err(Error::Internal {
            message: format!(
                "registry entry for `{}` holds an instance of a different type",
                entry.type_name
            ),
        }),
    }
}

/// The singleton registry and injector
///
/// Holds at most one instance per registered type for the container's
/// lifetime. Entries are never removed or replaced after `build`.
pub struct Container {
    entries: HashMap<TypeId, Entry>,
    policy: WirePolicy,
}

impl Container {
    /// Start building a container
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Look up the singleton registered for `T`
    pub fn resolve<T: Layer>(&self) -> Option<Arc<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.instance.clone().downcast::<T>().ok())
    }

    /// Look up the singleton registered for `T`, failing if absent
    pub fn get<T: Layer>(&self) -> Result<Arc<T>> {
        self.resolve::<T>().ok_or(Error::NotRegistered {
            type_name: std::any::type_name::<T>(),
        })
    }

    /// Wire every declared slot of `target` from the registry
    ///
    /// Works on any [`Layer`] instance, registered or not. Each call
    /// independently re-resolves and overwrites every slot it can satisfy;
    /// it does not skip slots that are already set. Under the permissive
    /// policy an unresolvable slot is left untouched and the call still
    /// returns `Ok`.
    pub fn inject<T: Layer>(&self, target: &T) -> Result<()> {
        let mut wiring = Wiring {
            container: self,
            target: std::any::type_name::<T>(),
            unresolved: Vec::new(),
        };
        target.slots(&mut wiring);
        wiring.finish(self.policy)
    }

    /// Whether a singleton is registered for `T`
    pub fn contains<T: Layer>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered singletons
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut layers: Vec<&str> = self.entries.values().map(|e| e.type_name).collect();
        layers.sort_unstable();
        f.debug_struct("Container")
            .field("policy", &self.policy)
            .field("layers", &layers)
            .finish_non_exhaustive()
    }
}

/// Per-injection cursor passed to [`Layer::slots`]
///
/// Each `slot` call is the counterpart of one `@Inject` field: it resolves
/// the slot's declared type against the registry and either wires the slot
/// or records the miss for policy handling.
pub struct Wiring<'c> {
    container: &'c Container,
    target: &'static str,
    unresolved: Vec<UnresolvedSlot>,
}

struct UnresolvedSlot {
    field: &'static str,
    dependency: &'static str,
}

impl Wiring<'_> {
    /// Resolve one dependency slot by its declared type
    ///
    /// `field` is the slot's name in the declaring type, used only for
    /// diagnostics and strict-mode errors.
    pub fn slot<T: Layer>(&mut self, field: &'static str, dep: &Dep<T>) {
        match self.container.resolve::<T>() {
            Some(instance) => {
                dep.set(instance);
                debug!(
                    target_type = self.target,
                    field,
                    dependency = std::any::type_name::<T>(),
                    "Wired dependency slot"
                );
            }
            None => self.unresolved.push(UnresolvedSlot {
                field,
                dependency: std::any::type_name::<T>(),
            }),
        }
    }

    /// Apply the wiring policy to the misses collected during the pass
    fn finish(self, policy: WirePolicy) -> Result<()> {
        for miss in &self.unresolved {
            warn!(
                target_type = self.target,
                field = miss.field,
                dependency = miss.dependency,
                "Dependency slot left unwired; type is not registered"
            );
        }

        match policy {
            WirePolicy::Permissive => Ok(()),
            WirePolicy::Strict => match self.unresolved.into_iter().next() {
                None => Ok(()),
                Some(miss) => Err(Error::UnresolvedDependency {
                    target: self.target,
                    field: miss.field,
                    dependency: miss.dependency,
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Repo;

    impl Layer for Repo {
        fn construct() -> Result<Self> {
            Ok(Repo)
        }
    }

    struct Svc {
        repo: Dep<Repo>,
    }

    impl Layer for Svc {
        fn construct() -> Result<Self> {
            Ok(Svc { repo: Dep::unset() })
        }

        fn slots(&self, wiring: &mut Wiring<'_>) {
            wiring.slot("repo", &self.repo);
        }
    }

    struct Broken;

    impl Layer for Broken {
        fn construct() -> Result<Self> {
            Err(Error::instantiation("Broken"))
        }
    }

    #[test]
    fn test_register_stores_one_singleton() -> Result<()> {
        let container = Container::builder().register::<Repo>()?.build()?;
        assert_eq!(container.len(), 1);
        assert!(container.contains::<Repo>());
        Ok(())
    }

    #[test]
    fn test_reregistration_replaces_singleton() -> Result<()> {
        let builder = Container::builder().register::<Repo>()?;
        let first = builder
            .entries
            .get(&TypeId::of::<Repo>())
            .and_then(|e| e.instance.clone().downcast::<Repo>().ok())
            .unwrap();

        let container = builder.register::<Repo>()?.build()?;
        assert_eq!(container.len(), 1);

        let second = container.get::<Repo>()?;
        assert!(!Arc::ptr_eq(&first, &second));
        Ok(())
    }

    #[test]
    fn test_construct_failure_propagates_from_register() {
        let err = Container::builder().register::<Broken>().unwrap_err();
        assert!(matches!(err, Error::Instantiation { .. }));
    }

    #[test]
    fn test_unregistered_lookup_fails() -> Result<()> {
        let container = Container::builder().build()?;
        assert!(container.resolve::<Repo>().is_none());
        assert!(matches!(
            container.get::<Repo>(),
            Err(Error::NotRegistered { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_build_wires_registered_singletons() -> Result<()> {
        let container = Container::builder()
            .register::<Repo>()?
            .register::<Svc>()?
            .build()?;

        let svc = container.get::<Svc>()?;
        let repo = container.get::<Repo>()?;
        assert!(Arc::ptr_eq(&svc.repo.get()?, &repo));
        Ok(())
    }

    #[test]
    fn test_permissive_miss_leaves_slot_unset() -> Result<()> {
        // Svc registered without Repo: the slot stays empty, no error
        let container = Container::builder().register::<Svc>()?.build()?;
        let svc = container.get::<Svc>()?;
        assert!(!svc.repo.is_set());
        Ok(())
    }

    #[test]
    fn test_strict_miss_names_field_and_dependency() -> Result<()> {
        let err = Container::builder()
            .with_policy(WirePolicy::Strict)
            .register::<Svc>()?
            .build()
            .unwrap_err();

        match err {
            Error::UnresolvedDependency {
                target,
                field,
                dependency,
            } => {
                assert!(target.ends_with("Svc"));
                assert_eq!(field, "repo");
                assert!(dependency.ends_with("Repo"));
            }
            other => panic!("expected UnresolvedDependency, got {other}"),
        }
        Ok(())
    }

    #[test]
    fn test_inject_rewires_unregistered_instance() -> Result<()> {
        let container = Container::builder().register::<Repo>()?.build()?;

        // Caller-constructed instance, never registered
        let svc = Svc::construct()?;
        assert!(!svc.repo.is_set());

        container.inject(&svc)?;
        assert!(Arc::ptr_eq(&svc.repo.get()?, &container.get::<Repo>()?));

        // Repeated injection overwrites rather than skipping
        container.inject(&svc)?;
        assert!(svc.repo.is_set());
        Ok(())
    }

    #[test]
    fn test_with_config_applies_policy_section() -> Result<()> {
        let config = WiringConfig {
            policy: WirePolicy::Strict,
        };
        let err = Container::builder()
            .with_config(&config)
            .register::<Svc>()?
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvedDependency { .. }));
        Ok(())
    }

    #[test]
    fn test_builder_debug_lists_layers() -> Result<()> {
        let builder = Container::builder().register::<Repo>()?;
        let rendered = format!("{builder:?}");
        assert!(rendered.contains("Repo"));
        assert!(rendered.contains("Permissive"));
        Ok(())
    }

    #[test]
    fn test_debug_lists_layers() -> Result<()> {
        let container = Container::builder().register::<Repo>()?.build()?;
        let rendered = format!("{container:?}");
        assert!(rendered.contains("Repo"));
        Ok(())
    }
}
