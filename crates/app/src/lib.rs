//! Persistence and application services for the storefront checkout.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

pub mod uuids;
