//! Order numbers
//!
//! Human-readable identifiers of the form `SN-YYYYMMDD-XXXXXX`: the UTC date of placement and
//! six characters drawn from an alphabet without look-alikes (`I`, `O`, `0`, `1`).

use jiff::Timestamp;
use mockall::automock;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;

pub const ORDER_NUMBER_PREFIX: &str = "SN";

const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const SUFFIX_LENGTH: usize = 6;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static ORDER_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^SN-[0-9]{8}-[A-HJ-NP-Z2-9]{6}$").expect("order number pattern compiles")
});

/// Source of candidate order numbers. Uniqueness is enforced by storage, not here.
#[automock]
pub trait OrderNumbers: Send + Sync {
    fn generate(&self, at: Timestamp) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOrderNumbers;

impl OrderNumbers for RandomOrderNumbers {
    fn generate(&self, at: Timestamp) -> String {
        let mut rng = rand::thread_rng();

        let suffix: String = (0..SUFFIX_LENGTH)
            .filter_map(|_| SUFFIX_ALPHABET.choose(&mut rng))
            .map(|byte| char::from(*byte))
            .collect();

        format!("{ORDER_NUMBER_PREFIX}-{}-{suffix}", at.strftime("%Y%m%d"))
    }
}

/// Whether `value` is shaped like an order number.
#[must_use]
pub fn is_order_number(value: &str) -> bool {
    ORDER_NUMBER_PATTERN.is_match(value)
}
