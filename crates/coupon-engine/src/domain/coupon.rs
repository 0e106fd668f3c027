use crate::CampaignId;
use chrono::{DateTime, Utc};

/// A single issued coupon. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coupon {
    pub code: String,
    pub campaign_id: CampaignId,
    pub issued_at: DateTime<Utc>,
}

impl Coupon {
    pub fn new(code: String, campaign_id: CampaignId, issued_at: DateTime<Utc>) -> Self {
        Self {
            code,
            campaign_id,
            issued_at,
        }
    }
}
