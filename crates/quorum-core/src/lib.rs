//! Core types and decision logic for the Quorum society organiser.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! It holds the only non-trivial logic in the system: role resolution
//! against the email allow-list, the authorization policy, the entity
//! schemas, the derived view projections, and the mutation gateway that
//! ties them together in front of a [`store::SocietyStore`] backend.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod entity;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod policy;
pub mod projection;
pub mod role;
pub mod store;

pub use error::{Error, Result};
