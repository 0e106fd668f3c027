use crate::{CampaignId, Coupon, CouponStore, CouponStoreError};
use parking_lot::RwLock;
use std::collections::HashMap;

/// An in-memory [`CouponStore`]: one ledger per campaign behind a single
/// reader-writer lock.
#[derive(Default)]
pub struct MemoryCouponStore {
    ledgers: RwLock<HashMap<CampaignId, Vec<Coupon>>>,
}

impl MemoryCouponStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total coupons held across every ledger.
    pub fn len(&self) -> usize {
        self.ledgers.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CouponStore for MemoryCouponStore {
    fn create(&self, coupon: Coupon) -> Result<(), CouponStoreError> {
        self.ledgers
            .write()
            .entry(coupon.campaign_id)
            .or_default()
            .push(coupon);
        Ok(())
    }

    fn get_by_campaign(&self, id: &CampaignId) -> Result<Vec<Coupon>, CouponStoreError> {
        Ok(self.ledgers.read().get(id).cloned().unwrap_or_default())
    }

    fn delete_by_campaign_id(&self, id: &CampaignId) -> Result<usize, CouponStoreError> {
        Ok(self.ledgers.write().remove(id).map_or(0, |ledger| ledger.len()))
    }
}
