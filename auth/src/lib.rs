//! Authentication collaborator for Railbook.
//!
//! The reservation core treats identity as an external concern: it only
//! needs a verified [`UserId`](railbook_core::UserId). This crate supplies
//! that collaborator:
//!
//! - **Password hashing** with argon2 ([`password`]).
//! - **Opaque bearer tokens** for sessions: 32 random bytes handed to the
//!   client once, only their SHA-256 digest stored at rest ([`token`]).
//! - **Storage traits** for users and sessions ([`provider`]), implemented
//!   durably in `railbook-postgres` and in memory in [`mocks`].
//! - **Flows** tying them together: register, login, authenticate
//!   ([`service`]).
//!
//! Administrative capability is a separate, simpler predicate: a
//! constant-time comparison of a pre-shared API key
//! ([`token::verify_api_key`]), kept out of the allocation engine entirely.

pub mod error;
pub mod password;
pub mod provider;
pub mod service;
pub mod token;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod mocks;

pub use error::{AuthError, Result};
pub use provider::{SessionStore, UserStore};
pub use service::{authenticate, login, register, IssuedToken};
pub use types::{NewUser, Session, User};
