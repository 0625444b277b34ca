//! Application configuration collected from the environment at startup.
//!
//! Secrets, credentials and the sender identity block all live here so that
//! nothing user-visible is hard-coded in the handlers.

use std::env;

use crate::{Error, auth::StaticCredentials};

/// The business identity block stamped onto outgoing WhatsApp messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    /// The business name.
    pub name: String,
    /// A contact phone number.
    pub phone: String,
    /// A contact e-mail address.
    pub email: String,
    /// An instagram handle, including the `@`.
    pub instagram: String,
    /// The closing line of generated messages.
    pub tagline: String,
}

/// Everything the server needs beyond its command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The secret used to derive the cookie signing key.
    pub cookie_secret: String,
    /// The single operator credential pair.
    pub credentials: StaticCredentials,
    /// The identity block for the WhatsApp message template.
    pub sender: SenderIdentity,
}

impl Config {
    /// Build the configuration from environment variables.
    ///
    /// `SECRET`, `APP_USERNAME` and `APP_PASSWORD` are required. The sender
    /// identity (`SENDER_NAME`, `SENDER_PHONE`, `SENDER_EMAIL`,
    /// `SENDER_INSTAGRAM`, `SENDER_TAGLINE`) falls back to the business
    /// defaults.
    ///
    /// # Errors
    /// Returns an [Error::MissingEnvVar] naming the first required variable
    /// that is not set.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            cookie_secret: require_env("SECRET")?,
            credentials: StaticCredentials {
                username: require_env("APP_USERNAME")?,
                password: require_env("APP_PASSWORD")?,
            },
            sender: SenderIdentity {
                name: env_or("SENDER_NAME", "Aura Soluções em Mobiliários Planejados"),
                phone: env_or("SENDER_PHONE", "(11) 98765-4321"),
                email: env_or("SENDER_EMAIL", "aura.moveisplanejados225@gmail.com"),
                instagram: env_or("SENDER_INSTAGRAM", "@aura.moveisplanejados"),
                tagline: env_or(
                    "SENDER_TAGLINE",
                    "Esta mensagem foi gerada automaticamente pelo *AuraTech*, \
                     garantindo tecnologia, precisão e profissionalismo.",
                ),
            },
        })
    }
}

fn require_env(name: &str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnvVar(name.to_owned()))
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}
