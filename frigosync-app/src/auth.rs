//! Front-door login gate.
//!
//! A convenience latch, not a security boundary: a fixed credential
//! list, three consecutive failures lock the form for thirty seconds,
//! success resets the counter.

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

const MAX_ATTEMPTS: u32 = 3;
const LOCKOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("locked out for {remaining:?} after too many failed attempts")]
    Locked { remaining: Duration },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginGuard {
    credentials: Vec<Credential>,
    failed_attempts: u32,
    locked_until: Option<Instant>,
}

impl LoginGuard {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self {
            credentials,
            failed_attempts: 0,
            locked_until: None,
        }
    }

    /// The stock operator accounts of the original firmware image.
    pub fn with_default_credentials() -> Self {
        let pairs = [
            ("admin", "1234"),
            ("admin", "admin"),
            ("user", "1234"),
            ("user", "admin"),
        ];

        Self::new(
            pairs
                .into_iter()
                .map(|(username, password)| Credential {
                    username: username.to_owned(),
                    password: password.to_owned(),
                })
                .collect(),
        )
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if let Some(until) = self.locked_until {
            let now = Instant::now();
            if now < until {
                return Err(AuthError::Locked {
                    remaining: until - now,
                });
            }
            self.locked_until = None;
            self.failed_attempts = 0;
        }

        let valid = self
            .credentials
            .iter()
            .any(|c| c.username == username && c.password == password);

        if valid {
            self.failed_attempts = 0;
            Ok(())
        } else {
            self.failed_attempts += 1;
            if self.failed_attempts >= MAX_ATTEMPTS {
                self.locked_until = Some(Instant::now() + LOCKOUT);
            }
            Err(AuthError::InvalidCredentials)
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked_until
            .is_some_and(|until| Instant::now() < until)
    }
}
