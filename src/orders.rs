//! Order Status
//!
//! `pending -> confirmed -> preparing -> shipped -> delivered`, with `cancelled` reachable from
//! every non-terminal state. `delivered` and `cancelled` are terminal.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Initial state at creation.
    Pending,

    /// Accepted by the shop.
    Confirmed,

    /// Being packed.
    Preparing,

    /// Handed to the carrier.
    Shipped,

    /// Received by the buyer.
    Delivered,

    /// Cancelled before delivery.
    Cancelled,
}

/// A rejected status change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusTransitionError {
    /// The requested transition is not part of the lifecycle.
    #[error("cannot move an order from {from} to {to}")]
    Invalid {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// A status string did not name a known status.
    #[error("unknown order status {0:?}")]
    Unknown(String),
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is possible.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether `self -> next` is a legal transition.
    pub const fn can_transition_to(self, next: OrderStatus) -> bool {
        match (self, next) {
            (Self::Delivered | Self::Cancelled, _) => false,
            (_, Self::Cancelled)
            | (Self::Pending, Self::Confirmed)
            | (Self::Confirmed, Self::Preparing)
            | (Self::Preparing, Self::Shipped)
            | (Self::Shipped, Self::Delivered) => true,
            _ => false,
        }
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTransitionError::Invalid`] when the transition is not allowed.
    pub fn transition(self, next: OrderStatus) -> Result<OrderStatus, StatusTransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(StatusTransitionError::Invalid {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StatusTransitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| StatusTransitionError::Unknown(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn happy_path_is_linear() -> TestResult {
        let status = OrderStatus::Pending
            .transition(OrderStatus::Confirmed)?
            .transition(OrderStatus::Preparing)?
            .transition(OrderStatus::Shipped)?
            .transition(OrderStatus::Delivered)?;

        assert!(status.is_terminal());

        Ok(())
    }

    #[test]
    fn cancel_is_reachable_from_every_open_state() {
        for status in OrderStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert!(
                status.can_transition_to(OrderStatus::Cancelled),
                "{status} should be cancellable"
            );
        }
    }

    #[test]
    fn terminal_states_are_final() {
        for next in OrderStatus::ALL {
            assert!(!OrderStatus::Delivered.can_transition_to(next));
            assert!(!OrderStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn skipping_and_going_back_are_rejected() {
        assert_eq!(
            OrderStatus::Pending.transition(OrderStatus::Shipped),
            Err(StatusTransitionError::Invalid {
                from: OrderStatus::Pending,
                to: OrderStatus::Shipped,
            })
        );
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Preparing));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn statuses_round_trip_through_strings() -> TestResult {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        assert!("lost".parse::<OrderStatus>().is_err());

        Ok(())
    }
}
