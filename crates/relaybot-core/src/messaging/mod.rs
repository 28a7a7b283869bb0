//! Platform abstractions: the outbound action port and the inbound message model.

pub mod port;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;
