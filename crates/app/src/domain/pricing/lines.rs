//! Checkout line handling shared by quoting and order placement.

use rustc_hash::FxHashMap;
use storefront::{
    cart::{CheckoutLine, MAX_LINE_QUANTITY},
    pricing::PricedLine,
};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{catalog::records::VariantUuid, pricing::records::VariantLineRecord};

/// Most lines a single checkout may carry.
pub const MAX_CHECKOUT_LINES: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("at least one item is required")]
    Empty,

    #[error("{0} items submitted, at most {MAX_CHECKOUT_LINES} are allowed")]
    TooManyLines(usize),

    #[error("quantity {quantity} for variant {variant_uuid} must be between 1 and {MAX_LINE_QUANTITY}")]
    InvalidQuantity { variant_uuid: Uuid, quantity: u32 },
}

/// Check bounds and merge lines for the same variant, keeping first-seen order.
///
/// # Errors
///
/// Returns a [`LineError`] when the list is empty or too long, or when any submitted or merged
/// quantity falls outside `1..=MAX_LINE_QUANTITY`.
pub fn merge_lines(lines: &[CheckoutLine]) -> Result<Vec<CheckoutLine>, LineError> {
    if lines.is_empty() {
        return Err(LineError::Empty);
    }

    if lines.len() > MAX_CHECKOUT_LINES {
        return Err(LineError::TooManyLines(lines.len()));
    }

    let mut merged: Vec<CheckoutLine> = Vec::with_capacity(lines.len());
    let mut positions: FxHashMap<Uuid, usize> = FxHashMap::default();

    for line in lines {
        if !(1..=MAX_LINE_QUANTITY).contains(&line.quantity) {
            return Err(LineError::InvalidQuantity {
                variant_uuid: line.variant_uuid,
                quantity: line.quantity,
            });
        }

        let Some(existing) = positions
            .get(&line.variant_uuid)
            .and_then(|position| merged.get_mut(*position))
        else {
            positions.insert(line.variant_uuid, merged.len());
            merged.push(*line);
            continue;
        };

        existing.quantity = existing.quantity.saturating_add(line.quantity);

        if existing.quantity > MAX_LINE_QUANTITY {
            return Err(LineError::InvalidQuantity {
                variant_uuid: existing.variant_uuid,
                quantity: existing.quantity,
            });
        }
    }

    Ok(merged)
}

/// Pair each requested line with its fresh catalog record.
///
/// Returns the first variant with no record as the error.
pub(crate) fn assemble_lines(
    requested: &[CheckoutLine],
    records: &[VariantLineRecord],
) -> Result<Vec<PricedLine>, VariantUuid> {
    let by_variant: FxHashMap<VariantUuid, &VariantLineRecord> = records
        .iter()
        .map(|record| (record.variant_uuid, record))
        .collect();

    requested
        .iter()
        .map(|line| {
            let variant = VariantUuid::from_uuid(line.variant_uuid);

            by_variant
                .get(&variant)
                .map(|record| record.priced(*line))
                .ok_or(variant)
        })
        .collect()
}

/// Variant UUIDs of a line list, for bulk reads.
pub(crate) fn variant_uuids(lines: &[CheckoutLine]) -> Vec<Uuid> {
    lines.iter().map(|line| line.variant_uuid).collect()
}
