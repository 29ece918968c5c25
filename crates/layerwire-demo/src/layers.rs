//! The demo layer stack
//!
//! Four collaborators exercising the container; they carry no engineering
//! weight of their own.
//!
//! ```text
//! Controller ── Service ── Repository
//!           └── UserManager
//! ```

use layerwire::{Dep, Layer, Result, Wiring};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Data layer
pub struct Repository;

impl Layer for Repository {
    fn construct() -> Result<Self> {
        Ok(Repository)
    }
}

impl Repository {
    /// Produce the demo payload
    pub fn get_data(&self) -> &'static str {
        "data from repository"
    }
}

/// Business logic layer
pub struct Service {
    /// Wired from the registry
    pub repository: Dep<Repository>,
}

impl Layer for Service {
    fn construct() -> Result<Self> {
        Ok(Service {
            repository: Dep::unset(),
        })
    }

    fn slots(&self, wiring: &mut Wiring<'_>) {
        wiring.slot("repository", &self.repository);
    }
}

impl Service {
    /// Run the "business logic" over the repository's data
    pub fn perform_action(&self) -> Result<String> {
        Ok(format!(
            "{} - with some business logic",
            self.repository.get()?.get_data()
        ))
    }
}

/// Session tracking layer
///
/// The logged-user set lives behind a `Mutex` because the singleton is
/// shared behind `Arc`.
pub struct UserManager {
    logged_users: Mutex<HashSet<String>>,
}

impl Layer for UserManager {
    fn construct() -> Result<Self> {
        Ok(UserManager {
            logged_users: Mutex::new(HashSet::new()),
        })
    }
}

impl UserManager {
    /// Record a user as logged in
    pub fn login(&self, user_name: &str) {
        self.logged_users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_name.to_string());
        info!("Logged in as {user_name}");
    }

    /// Whether the user is currently logged in
    pub fn is_logged_in(&self, user_name: &str) -> bool {
        self.logged_users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(user_name)
    }

    /// Remove the user's session
    pub fn logout(&self, user_name: &str) {
        self.logged_users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(user_name);
        info!("{user_name} just logged out");
    }
}

/// Request handling layer
///
/// The request handler is a string-returning stub; there is no transport
/// underneath it.
pub struct Controller {
    /// Wired from the registry
    pub service: Dep<Service>,
    /// Wired from the registry
    pub users: Dep<UserManager>,
}

impl Layer for Controller {
    fn construct() -> Result<Self> {
        Ok(Controller {
            service: Dep::unset(),
            users: Dep::unset(),
        })
    }

    fn slots(&self, wiring: &mut Wiring<'_>) {
        wiring.slot("service", &self.service);
        wiring.slot("users", &self.users);
    }
}

impl Controller {
    /// Process one request on behalf of `user_name`
    pub fn process_request(&self, payload: &str, user_name: &str) -> Result<String> {
        tracing::debug!(payload, user_name, "Processing request");
        if self.users.get()?.is_logged_in(user_name) {
            Ok(format!(
                "Processed request! Response: {}",
                self.service.get()?.perform_action()?
            ))
        } else {
            Ok("Not logged in, request denied".to_string())
        }
    }
}
