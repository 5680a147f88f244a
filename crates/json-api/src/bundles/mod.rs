//! Bundles

mod handlers;

pub(crate) use handlers::*;
