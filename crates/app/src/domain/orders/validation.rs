//! Checkout request validation.
//!
//! Runs before any storage access.

use once_cell::sync::Lazy;
use regex::Regex;
use storefront::cart::CheckoutLine;
use thiserror::Error;

use crate::domain::{
    orders::data::CheckoutRequest,
    pricing::lines::{LineError, merge_lines},
};

/// Longest accepted order note.
pub const MAX_NOTES_LENGTH: usize = 1_000;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-]{10,20}$").expect("phone pattern compiles"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("terms of sale and privacy policy must both be accepted")]
    TermsNotAccepted,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("phone number is not valid")]
    InvalidPhone,

    #[error("notes may be at most {MAX_NOTES_LENGTH} characters")]
    NotesTooLong,

    #[error(transparent)]
    Items(#[from] LineError),
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }

    Ok(())
}

impl CheckoutRequest {
    /// Validate the request and return its lines with duplicate variants merged.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<Vec<CheckoutLine>, ValidationError> {
        if !(self.accepted_terms && self.accepted_privacy) {
            return Err(ValidationError::TermsNotAccepted);
        }

        require(&self.customer.name, "name")?;
        require(&self.customer.email, "email")?;
        require(&self.customer.phone, "phone")?;

        if !EMAIL_PATTERN.is_match(self.customer.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }

        if !PHONE_PATTERN.is_match(self.customer.phone.trim()) {
            return Err(ValidationError::InvalidPhone);
        }

        require(&self.address.address_line, "address")?;
        require(&self.address.city, "city")?;
        require(&self.address.district, "district")?;

        if self
            .notes
            .as_deref()
            .is_some_and(|notes| notes.chars().count() > MAX_NOTES_LENGTH)
        {
            return Err(ValidationError::NotesTooLong);
        }

        Ok(merge_lines(&self.items)?)
    }
}
