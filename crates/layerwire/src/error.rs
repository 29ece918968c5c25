//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the layerwire container
#[derive(Error, Debug)]
pub enum Error {
    /// A layer's zero-argument constructor failed during registration
    #[error("Failed to instantiate layer `{type_name}`")]
    Instantiation {
        /// The layer type that could not be constructed
        type_name: &'static str,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A dependency slot could not be resolved under strict wiring policy
    #[error("Unresolved dependency: `{target}.{field}` requires `{dependency}`, which is not registered")]
    UnresolvedDependency {
        /// The type whose slot could not be wired
        target: &'static str,
        /// The declared slot name
        field: &'static str,
        /// The dependency type the slot requires
        dependency: &'static str,
    },

    /// A dependency slot was read before it was wired
    #[error("Dependency slot for `{type_name}` is unset; injection has not run or the type was not registered")]
    Unwired {
        /// The dependency type the slot expects
        type_name: &'static str,
    },

    /// A singleton lookup found no entry for the requested type
    #[error("Not registered: `{type_name}`")]
    NotRegistered {
        /// The type that was not found in the registry
        type_name: &'static str,
    },

    /// Broken registry invariant
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the violated invariant
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an instantiation error without a source
    pub fn instantiation(type_name: &'static str) -> Self {
        Self::Instantiation {
            type_name,
            source: None,
        }
    }

    /// Create an instantiation error wrapping a source error
    pub fn instantiation_with_source<E>(type_name: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Instantiation {
            type_name,
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error without a source
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }
}

/// Extension trait for adding context to fallible operations
///
/// # Example
///
/// ```ignore
/// use layerwire::error::ErrorContext;
///
/// let config = figment.extract().config_context("Failed to extract configuration")?;
/// ```
pub trait ErrorContext<T> {
    /// Convert the error into a configuration error with the given context
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display,
    {
        self.map_err(|e| Error::Configuration {
            message: context.to_string(),
            source: Some(Box::new(e)),
        })
    }
}
