//! layerwire - A small layered dependency-injection container
//!
//! Two explicit contracts (a [`Layer`] trait for registry-managed types and
//! [`Dep`] slots for injectable fields) and a [`Container`] that
//! instantiates registered layers and wires their slots together by type
//! identity.
//!
//! ## Architecture Overview
//!
//! ```text
//! ContainerBuilder (register layers)
//! └── Container (TypeId → singleton)
//!     ├── resolve::<T>()   typed lookup
//!     └── inject(&obj)     wire Dep slots from the registry
//! ```
//!
//! ## Key Principles
//!
//! - **Compile-time wiring contract**: no runtime reflection; each layer
//!   declares its dependency slots in a typed manifest
//! - **Explicit container**: the registry is a constructed, passed value,
//!   never a process-wide global
//! - **Singletons**: one instance per registered type, created at
//!   registration, shared behind `Arc` for the container's lifetime
//! - **Policy-driven misses**: unresolvable slots are logged and left unset
//!   (permissive) or reported with field and type (strict)
//!
//! ## Example
//!
//! ```
//! use layerwire::{Container, Dep, Layer, Result, Wiring};
//!
//! struct Repository;
//!
//! impl Layer for Repository {
//!     fn construct() -> Result<Self> {
//!         Ok(Repository)
//!     }
//! }
//!
//! struct Service {
//!     repository: Dep<Repository>,
//! }
//!
//! impl Layer for Service {
//!     fn construct() -> Result<Self> {
//!         Ok(Service { repository: Dep::unset() })
//!     }
//!
//!     fn slots(&self, wiring: &mut Wiring<'_>) {
//!         wiring.slot("repository", &self.repository);
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let container = Container::builder()
//!         .register::<Repository>()?
//!         .register::<Service>()?
//!         .build()?;
//!
//!     let service = container.get::<Service>()?;
//!     assert!(service.repository.is_set());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod container;
pub mod error;
pub mod layer;
pub mod logging;

pub use config::{AppConfig, ConfigLoader, LoggingConfig, WirePolicy, WiringConfig};
pub use container::{Container, ContainerBuilder, Wiring};
pub use error::{Error, ErrorContext, Result};
pub use layer::{Dep, Layer};
pub use logging::{init_logging, parse_log_level};
