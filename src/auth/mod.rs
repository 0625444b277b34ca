//! Authentication: the credential check behind the log-in form and the
//! session cookies that gate every other route.

pub(crate) mod cookie;
pub(crate) mod middleware;

use crate::Error;

/// Checks an operator's credentials at log-in.
///
/// The app ships with a single static credential pair
/// ([StaticCredentials]), but the log-in handler only depends on this trait,
/// so swapping in another identity provider later does not touch the HTTP
/// layer.
pub trait CredentialVerifier: Send + Sync {
    /// Check a username/password pair.
    ///
    /// # Errors
    /// Returns [Error::InvalidCredentials] when the pair does not match.
    fn verify(&self, username: &str, password: &str) -> Result<(), Error>;
}

/// The fixed username/password pair configured at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    /// The configured username.
    pub username: String,
    /// The configured password.
    pub password: String,
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Result<(), Error> {
        if username == self.username && password == self.password {
            Ok(())
        } else {
            Err(Error::InvalidCredentials)
        }
    }
}
