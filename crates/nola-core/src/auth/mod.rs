//! Authentication module for managing the administrator session.
//!
//! This module provides:
//! - `Session`: the logged-in administrator's token and profile
//! - `SessionStore`: the single owner of the current session, persisted
//!   through encrypted storage so it survives restarts
//! - `CredentialStore`: optional OS-level password storage via keyring
//!
//! There is no client-side expiry: a session ends on logout or when the
//! server rejects its token.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{Session, SessionStore};
