//! Admin Authentication
//!
//! Admin routes accept a single bearer token whose SHA-256 digest is configured at startup.

pub(crate) mod middleware;
