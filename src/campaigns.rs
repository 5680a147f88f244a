//! Tiered Gift Campaigns
//!
//! A campaign lists spend thresholds that unlock non-price rewards (a shaker at 500, a free
//! sample pack at 1000, ...). Reaching a threshold unlocks that tier and every tier below it.
//! Tiers never change what the buyer pays; they are surfaced next to the totals so the cart and
//! the order confirmation show the same rewards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single reward tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftTier {
    /// Merchandise total, in minor units, required to unlock the tier.
    pub threshold: u64,

    /// Human readable reward description.
    pub reward: String,
}

/// The next locked tier and how much more spend unlocks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierProgress {
    /// Tier still locked.
    pub tier: GiftTier,

    /// Minor units still to spend.
    pub remaining: u64,
}

/// An active tiered gift campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftCampaign {
    uuid: Uuid,
    name: String,
    tiers: Vec<GiftTier>,
}

impl GiftCampaign {
    /// Create a campaign; tiers are kept ordered by ascending threshold.
    pub fn new(uuid: Uuid, name: String, mut tiers: Vec<GiftTier>) -> Self {
        tiers.sort_by_key(|tier| tier.threshold);

        Self { uuid, name, tiers }
    }

    /// Return the campaign UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Return the campaign name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return every tier, ordered by threshold.
    pub fn tiers(&self) -> &[GiftTier] {
        &self.tiers
    }

    /// Tiers unlocked by a merchandise total.
    pub fn unlocked_tiers(&self, items_total: u64) -> Vec<GiftTier> {
        self.tiers
            .iter()
            .take_while(|tier| items_total >= tier.threshold)
            .cloned()
            .collect()
    }

    /// The lowest tier still locked, if any.
    pub fn next_tier(&self, items_total: u64) -> Option<TierProgress> {
        self.tiers
            .iter()
            .find(|tier| items_total < tier.threshold)
            .map(|tier| TierProgress {
                tier: tier.clone(),
                remaining: tier.threshold - items_total,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign() -> GiftCampaign {
        GiftCampaign::new(
            Uuid::nil(),
            "Spring gifts".to_string(),
            vec![
                GiftTier {
                    threshold: 100_000,
                    reward: "Sample pack".to_string(),
                },
                GiftTier {
                    threshold: 50_000,
                    reward: "Shaker".to_string(),
                },
            ],
        )
    }

    #[test]
    fn tiers_are_sorted_on_construction() {
        let thresholds: Vec<u64> = campaign().tiers().iter().map(|t| t.threshold).collect();

        assert_eq!(thresholds, vec![50_000, 100_000]);
    }

    #[test]
    fn reaching_a_threshold_exactly_unlocks_it() {
        let unlocked = campaign().unlocked_tiers(50_000);

        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked.first().map(|t| t.reward.as_str()), Some("Shaker"));
    }

    #[test]
    fn higher_spend_unlocks_all_lower_tiers() {
        assert_eq!(campaign().unlocked_tiers(200_000).len(), 2);
        assert!(campaign().unlocked_tiers(49_999).is_empty());
    }

    #[test]
    fn next_tier_reports_remaining_spend() {
        let progress = campaign().next_tier(70_000);

        assert_eq!(
            progress.map(|p| (p.tier.reward, p.remaining)),
            Some(("Sample pack".to_string(), 30_000))
        );
        assert!(campaign().next_tier(100_000).is_none());
    }
}
