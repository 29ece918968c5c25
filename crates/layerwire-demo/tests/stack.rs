//! The demo stack wired through the container: controller behavior before
//! and after login, singleton identity, and half-registered graphs.

use layerwire::{AppConfig, Container, Layer, Result, WirePolicy};
use layerwire_demo::{Controller, Repository, Service, UserManager, build_container};
use std::sync::Arc;

#[test]
fn controller_slots_hold_the_registry_singletons() -> Result<()> {
    let container = build_container(&AppConfig::default())?;
    let controller = container.get::<Controller>()?;

    assert!(Arc::ptr_eq(
        &controller.service.get()?,
        &container.get::<Service>()?
    ));
    assert!(Arc::ptr_eq(
        &controller.users.get()?,
        &container.get::<UserManager>()?
    ));
    Ok(())
}

#[test]
fn request_round_trip_through_all_layers() -> Result<()> {
    let container = build_container(&AppConfig::default())?;
    let controller = container.get::<Controller>()?;
    let users = container.get::<UserManager>()?;

    assert_eq!(
        controller.process_request("ping", "ada")?,
        "Not logged in, request denied"
    );

    users.login("ada");
    assert_eq!(
        controller.process_request("ping", "ada")?,
        "Processed request! Response: data from repository - with some business logic"
    );

    users.logout("ada");
    assert_eq!(
        controller.process_request("ping", "ada")?,
        "Not logged in, request denied"
    );
    Ok(())
}

#[test]
fn service_without_repository_stays_unwired() -> Result<()> {
    // Repository never registered: permissive wiring leaves the slot unset
    let container = Container::builder().register::<Service>()?.build()?;
    let service = container.get::<Service>()?;

    assert!(!service.repository.is_set());
    assert!(service.perform_action().is_err());
    Ok(())
}

#[test]
fn strict_stack_requires_every_layer() -> Result<()> {
    let err = Container::builder()
        .with_policy(WirePolicy::Strict)
        .register::<Service>()?
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("repository"));
    Ok(())
}

#[test]
fn injection_on_a_hand_built_controller_reuses_singletons() -> Result<()> {
    let container = build_container(&AppConfig::default())?;

    let controller = Controller::construct()?;
    assert!(!controller.service.is_set());

    container.inject(&controller)?;
    assert!(Arc::ptr_eq(
        &controller.service.get()?,
        &container.get::<Service>()?
    ));
    // The wired service in turn sees the live repository singleton
    assert_eq!(
        controller.service.get()?.perform_action()?,
        "data from repository - with some business logic"
    );
    let _ = container.get::<Repository>()?;
    Ok(())
}
