//! `registrar` - backend for a university course-registration portal.
//!
//! Computes academic progress and alerts from a student's registrations and
//! serves account and registration flows that try the hosted backend first,
//! falling back to a local store when it is unreachable.

pub mod academic;
pub mod accounts;
pub mod config;
pub mod error;
pub mod fallback;
pub mod local;
pub mod remote;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;
