//! Core logic for the channel relay / request-reply bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! [`messaging::port::PlatformPort`] trait implemented in the adapter crate.

pub mod admin_save;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod republish;
pub mod retry;
pub mod routes;
pub mod sanitize;
pub mod tracker;

pub use errors::{Error, Result};
