//! Credentials and password digests.
//!
//! Handlers validate raw username/password strings into [`LoginCredentials`]
//! before anything touches a port, and only the SHA-256 digest of a password
//! ever reaches storage.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::user::User;

/// Rejections raised while validating a login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username missing or blank after trimming.
    EmptyUsername,
    /// Password empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// A validated username/password pair.
///
/// ## Invariants
/// - `username` is stored trimmed and non-empty.
/// - `password` is non-empty and kept exactly as submitted; trimming it would
///   silently change which passwords match.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("admin", "password").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw payload strings into credentials.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed username for repository lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// The submitted password, untouched.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Digest of the password for storage or comparison.
    pub fn digest(&self) -> PasswordDigest {
        PasswordDigest::from_password(self.password())
    }
}

/// Hex-encoded SHA-256 digest of a password.
///
/// The raw password never reaches the persistence layer; adapters store and
/// compare digests only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Compute the digest of a raw password.
    pub fn from_password(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        Self(hex::encode(digest))
    }

    /// Reconstruct a digest from its stored hex form.
    pub fn from_hex(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Check a raw password against this digest.
    pub fn matches(&self, password: &str) -> bool {
        Self::from_password(password) == *self
    }
}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// A user together with the credential digest stored for them.
///
/// This is the record shape exchanged with the user repository port; the
/// public [`User`] never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredential {
    user: User,
    digest: PasswordDigest,
}

impl UserCredential {
    /// Pair a user with their stored credential digest.
    pub fn new(user: User, digest: PasswordDigest) -> Self {
        Self { user, digest }
    }

    /// The user the credential belongs to.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Stored credential digest.
    pub fn digest(&self) -> &PasswordDigest {
        &self.digest
    }
}
