//! Credential lookup.
//!
//! The probes need exactly one secret: an API key read from the process
//! environment. A missing key is a reported condition, never a panic, and it
//! is detected before any client exists so no request can go out without it.

use crate::{Error, Result};
use std::env;
use std::fmt;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GOOGLE_CLOUD_API_KEY";

/// Opaque API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap an explicit key. Surrounding whitespace is trimmed.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    /// Read the key from [`API_KEY_ENV`].
    pub fn from_env() -> Result<Self> {
        Self::from_var(API_KEY_ENV)
    }

    /// Read the key from an arbitrary environment variable.
    ///
    /// Unset, empty and whitespace-only values all yield
    /// [`Error::MissingCredential`].
    pub fn from_var(var: &str) -> Result<Self> {
        match env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(Self::new(value)),
            _ => Err(Error::MissingCredential {
                var: var.to_string(),
            }),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Key length in characters, for the "key loaded" banner.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<redacted, {} chars>)", self.len())
    }
}
