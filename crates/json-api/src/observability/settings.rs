//! Slow request threshold shared with the request logger.

use std::{sync::OnceLock, time::Duration};

use tracing::warn;

const DEFAULT_SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(1);

static SLOW_REQUEST_THRESHOLD: OnceLock<Duration> = OnceLock::new();

pub(super) fn set_slow_request_threshold(threshold_ms: u64) {
    if SLOW_REQUEST_THRESHOLD
        .set(Duration::from_millis(threshold_ms))
        .is_err()
    {
        warn!(threshold_ms, "slow request threshold was already set, keeping the first value");
    }
}

pub(super) fn slow_request_threshold() -> Duration {
    SLOW_REQUEST_THRESHOLD
        .get()
        .copied()
        .unwrap_or(DEFAULT_SLOW_REQUEST_THRESHOLD)
}

pub(super) fn is_slow(elapsed: Duration) -> bool {
    elapsed > slow_request_threshold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_requests_are_not_slow() {
        assert!(!is_slow(Duration::from_millis(5)));
    }

    #[test]
    fn requests_past_the_threshold_are_slow() {
        assert!(is_slow(slow_request_threshold() + Duration::from_millis(1)));
    }
}
