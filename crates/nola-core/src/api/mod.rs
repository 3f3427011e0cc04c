//! REST API client module for the blog admin API.
//!
//! This module provides the `ApiClient` through which every request to the
//! remote API passes. The client attaches the session's bearer token,
//! unwraps successful payloads, and turns failures into `ApiError` values
//! after surfacing them through the injected `Notifier`.
//!
//! A failure envelope carrying application code 401 means the session has
//! expired: the session store is cleared, `BusEvent::LoginExpired` is
//! emitted, and a single notice is shown per cool-down window.
//!
//! Per-entity wrappers (posts, tags, menus, ...) live in their own
//! submodules as further `impl ApiClient` blocks.

pub mod blog;
pub mod categories;
pub mod client;
pub mod diaries;
pub mod error;
pub mod expiry;
pub mod files;
pub mod links;
pub mod menus;
pub mod notifier;
pub mod posts;
pub mod tags;
pub mod user;

pub use client::{ApiClient, DEFAULT_NOTICE_COOLDOWN};
pub use error::{ApiError, SESSION_EXPIRED_CODE, SESSION_EXPIRED_MESSAGE, UNKNOWN_ERROR_MESSAGE};
pub use notifier::{Notifier, TracingNotifier};
pub use posts::PostQuery;
