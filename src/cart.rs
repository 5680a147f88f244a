//! Cart
//!
//! The buyer-held cart. Nothing here is authoritative: unit prices are snapshots taken when a
//! line was added and checkout re-reads the catalog. Totals are derived on every read.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use uuid::Uuid;

/// Largest quantity a single cart line (and checkout line) may carry.
pub const MAX_LINE_QUANTITY: u32 = 50;

/// Errors raised by cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line was added with a zero quantity.
    #[error("quantity must be at least one")]
    InvalidQuantity,

    /// No line exists for the variant.
    #[error("variant {0} is not in the cart")]
    LineNotFound(Uuid),

    /// The derived total overflowed.
    #[error("cart total overflowed")]
    Overflow,
}

/// A cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product the variant belongs to.
    pub product_uuid: Uuid,

    /// Purchased variant.
    pub variant_uuid: Uuid,

    /// Product name as displayed when added.
    pub product_name: String,

    /// Variant name as displayed when added.
    pub variant_name: String,

    /// Unit price snapshot, advisory only.
    pub unit_price: u64,

    /// Quantity, between 1 and [`MAX_LINE_QUANTITY`].
    pub quantity: u32,
}

/// The advisory part of a cart line sent to checkout: which variant and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    /// Variant to buy.
    pub variant_uuid: Uuid,

    /// Requested quantity.
    pub quantity: u32,
}

/// Buyer-held cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: SmallVec<[CartLine; 4]>,
    is_open: bool,
}

impl Cart {
    /// Create an empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line, merging into an existing line for the same variant, and return the line's
    /// resulting quantity.
    ///
    /// Adding always opens the cart drawer.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for a zero quantity.
    pub fn add_item(&mut self, line: CartLine) -> Result<u32, CartError> {
        if line.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        self.is_open = true;

        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|existing| existing.variant_uuid == line.variant_uuid)
        {
            existing.quantity = existing
                .quantity
                .saturating_add(line.quantity)
                .min(MAX_LINE_QUANTITY);

            return Ok(existing.quantity);
        }

        let quantity = line.quantity.min(MAX_LINE_QUANTITY);

        self.lines.push(CartLine { quantity, ..line });

        Ok(quantity)
    }

    /// Remove the line for a variant, returning it.
    pub fn remove_item(&mut self, variant: Uuid) -> Option<CartLine> {
        let position = self
            .lines
            .iter()
            .position(|line| line.variant_uuid == variant)?;

        Some(self.lines.remove(position))
    }

    /// Set the quantity of a line. Zero or negative quantities remove the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] when the variant is not in the cart.
    pub fn update_quantity(&mut self, variant: Uuid, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self
                .remove_item(variant)
                .map(|_removed| ())
                .ok_or(CartError::LineNotFound(variant));
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.variant_uuid == variant)
            .ok_or(CartError::LineNotFound(variant))?;

        line.quantity = u32::try_from(quantity)
            .unwrap_or(MAX_LINE_QUANTITY)
            .min(MAX_LINE_QUANTITY);

        Ok(())
    }

    /// Empty the cart after a successful checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.is_open = false;
    }

    /// Return the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the cart drawer is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Close the cart drawer.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Lines to submit at checkout. Prices are deliberately left out.
    pub fn to_checkout_lines(&self) -> Vec<CheckoutLine> {
        self.lines
            .iter()
            .map(|line| CheckoutLine {
                variant_uuid: line.variant_uuid,
                quantity: line.quantity,
            })
            .collect()
    }

    /// Sum of snapshot prices times quantities.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the total does not fit in `u64`.
    pub fn subtotal(&self) -> Result<u64, CartError> {
        self.lines.iter().try_fold(0_u64, |acc, line| {
            line.unit_price
                .checked_mul(u64::from(line.quantity))
                .and_then(|line_total| acc.checked_add(line_total))
                .ok_or(CartError::Overflow)
        })
    }
}
