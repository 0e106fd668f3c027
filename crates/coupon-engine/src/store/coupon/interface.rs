use crate::{CampaignId, Coupon, CouponStoreError};
use std::sync::Arc;

/// Append-only, per-campaign ledger of issued coupons.
pub trait CouponStore: Send + Sync {
    /// Appends `coupon` to its campaign's ledger. Never rejects on content;
    /// code uniqueness is the generator's job.
    fn create(&self, coupon: Coupon) -> Result<(), CouponStoreError>;

    /// Returns a snapshot copy of the campaign's ledger in issuance order.
    ///
    /// The copy is detached: later appends are not visible through it. An
    /// unknown campaign yields an empty ledger.
    fn get_by_campaign(&self, id: &CampaignId) -> Result<Vec<Coupon>, CouponStoreError>;

    /// Clears the campaign's ledger and returns how many coupons it held.
    /// Clearing an absent ledger removes nothing and succeeds.
    fn delete_by_campaign_id(&self, id: &CampaignId) -> Result<usize, CouponStoreError>;
}

impl<S> CouponStore for Arc<S>
where
    S: CouponStore + ?Sized,
{
    fn create(&self, coupon: Coupon) -> Result<(), CouponStoreError> {
        (**self).create(coupon)
    }

    fn get_by_campaign(&self, id: &CampaignId) -> Result<Vec<Coupon>, CouponStoreError> {
        (**self).get_by_campaign(id)
    }

    fn delete_by_campaign_id(&self, id: &CampaignId) -> Result<usize, CouponStoreError> {
        (**self).delete_by_campaign_id(id)
    }
}
