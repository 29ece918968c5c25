//! Layer contract and dependency slots
//!
//! The original exercise marks classes with a `Layer` annotation and fields
//! with an `Inject` annotation, then discovers both through runtime
//! reflection. Here both markers are explicit, compile-time-checked
//! contracts:
//!
//! - A type opts into registry management by implementing [`Layer`], which
//!   carries the zero-argument constructor and the slot manifest.
//! - Each injectable field becomes a [`Dep`] slot declared once in the
//!   type's [`Layer::slots`] manifest.
//!
//! ```text
//! @Layer  class Service          →  impl Layer for Service
//! @Inject lateinit var repo: R   →  repository: Dep<Repository>
//!                                   + wiring.slot("repository", &self.repository)
//! ```
//!
//! A misspelled or missing slot declaration is a compile error rather than a
//! silently unwired field.

use crate::container::Wiring;
use crate::error::{Error, Result};
use std::sync::{Arc, PoisonError, RwLock};

/// Contract for types managed by the container
///
/// Implementing `Layer` is the Rust counterpart of the `@Layer` class
/// annotation: it makes the type registrable and gives the container a
/// zero-argument way to build its singleton.
///
/// # Example
///
/// ```
/// use layerwire::{Dep, Layer, Result, Wiring};
///
/// struct Repository;
///
/// impl Layer for Repository {
///     fn construct() -> Result<Self> {
///         Ok(Repository)
///     }
/// }
///
/// struct Service {
///     repository: Dep<Repository>,
/// }
///
/// impl Layer for Service {
///     fn construct() -> Result<Self> {
///         Ok(Service { repository: Dep::unset() })
///     }
///
///     fn slots(&self, wiring: &mut Wiring<'_>) {
///         wiring.slot("repository", &self.repository);
///     }
/// }
/// ```
pub trait Layer: Send + Sync + 'static {
    /// Build an instance without arguments
    ///
    /// Called exactly once per registration. Failures surface to the caller
    /// of `register` as [`Error::Instantiation`] (or whatever error the
    /// implementation chooses to report).
    fn construct() -> Result<Self>
    where
        Self: Sized;

    /// Declare the type's dependency slots
    ///
    /// One `wiring.slot(..)` call per injectable field. The default manifest
    /// is empty: a layer with no dependencies implements only `construct`.
    fn slots(&self, _wiring: &mut Wiring<'_>) {}
}

/// A dependency slot, unset until the container wires it
///
/// The slot is the counterpart of an `@Inject` field: a mutable cell that
/// holds a shared reference to the registry's singleton once injection has
/// run. Internally it is a `RwLock<Option<Arc<T>>>` so that wiring works
/// through shared references and can be re-run at any time; re-injection
/// overwrites the slot rather than skipping already-set values.
pub struct Dep<T> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T: Layer> Dep<T> {
    /// Create an empty slot
    pub fn unset() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Get the wired singleton
    ///
    /// Returns [`Error::Unwired`] if injection has not run, or ran while the
    /// dependency type was not registered (permissive policy).
    pub fn get(&self) -> Result<Arc<T>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::Unwired {
                type_name: std::any::type_name::<T>(),
            })
    }

    /// Whether the slot has been wired
    pub fn is_set(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Overwrite the slot with a resolved singleton
    pub(crate) fn set(&self, instance: Arc<T>) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(instance);
    }
}

impl<T: Layer> Default for Dep<T> {
    fn default() -> Self {
        Self::unset()
    }
}

impl<T: Layer> std::fmt::Debug for Dep<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dep")
            .field("type", &std::any::type_name::<T>())
            .field("set", &self.is_set())
            .finish()
    }
}
