//! layerwire-demo - The layer stack exercising the layerwire container
//!
//! Exposes the demo collaborators ([`Repository`], [`Service`],
//! [`UserManager`], [`Controller`]) and [`build_container`], the composition
//! root that registers and wires all four.

pub mod layers;

pub use layers::{Controller, Repository, Service, UserManager};

use layerwire::{AppConfig, Container, Result};

/// Register the full demo stack and build the container
///
/// Registration order is irrelevant: the wiring pass runs after every
/// registration completes.
pub fn build_container(config: &AppConfig) -> Result<Container> {
    Container::builder()
        .with_config(&config.wiring)
        .register::<Repository>()?
        .register::<Service>()?
        .register::<UserManager>()?
        .register::<Controller>()?
        .build()
}
