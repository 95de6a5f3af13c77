//! HTTP handlers, one module per resource.
//!
//! Handlers validate input with `pokerhall_core::validation`, check the
//! access policy through [`CurrentPlayer::require`](crate::extract::CurrentPlayer::require)
//! before touching the database, and return `Json<T>` or an `ApiError`.
//! Request bodies, paths and query strings come in through the `Api*`
//! extractors of [`crate::extract`].

pub mod auth;
pub mod events;
pub mod players;
pub mod scores;
pub mod seats;
