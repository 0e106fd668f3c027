use crate::{Campaign, CampaignId, Coupon};

/// A campaign together with its full coupon ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDetails {
    pub campaign: Campaign,
    /// Issued coupons in issuance order.
    pub coupons: Vec<Coupon>,
}

/// What [`CampaignService::delete_campaign`] did.
///
/// [`CampaignService::delete_campaign`]: crate::CampaignService::delete_campaign
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The campaign and its coupon ledger are gone.
    Deleted {
        campaign_id: CampaignId,
        coupons_removed: usize,
    },
    /// The campaign is gone but clearing its coupons failed; they are now
    /// orphaned. Distinct from an error: the campaign cannot be brought back.
    CascadeFailed {
        campaign_id: CampaignId,
        context: String,
    },
    /// Nothing matched the id or the name.
    NotFound,
}

impl DeleteOutcome {
    /// The id of the removed campaign, whether or not the cascade succeeded.
    pub fn removed_campaign(&self) -> Option<CampaignId> {
        match self {
            Self::Deleted { campaign_id, .. } | Self::CascadeFailed { campaign_id, .. } => {
                Some(*campaign_id)
            }
            Self::NotFound => None,
        }
    }
}
