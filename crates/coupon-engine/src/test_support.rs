//! Shared doubles for the crate's unit tests.

use crate::{
    Campaign, CampaignId, CampaignStore, CampaignStoreError, Coupon, CouponStore,
    CouponStoreError, RandSource,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Replays a fixed script of draws, then panics if asked for more.
pub struct ScriptedRand {
    draws: Mutex<VecDeque<usize>>,
}

impl ScriptedRand {
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: Mutex::new(draws.into_iter().collect()),
        }
    }
}

impl RandSource for ScriptedRand {
    fn below(&self, bound: usize) -> usize {
        let draw = self
            .draws
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted rand ran out of draws");
        assert!(draw < bound, "scripted draw {draw} out of range 0..{bound}");
        draw
    }
}

/// A coupon store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyCouponStore {
    inner: crate::MemoryCouponStore,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
}

impl FlakyCouponStore {
    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    fn backend() -> CouponStoreError {
        CouponStoreError::Backend {
            context: "disk on fire".into(),
        }
    }
}

impl CouponStore for FlakyCouponStore {
    fn create(&self, coupon: Coupon) -> Result<(), CouponStoreError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(Self::backend());
        }
        self.inner.create(coupon)
    }

    fn get_by_campaign(&self, id: &CampaignId) -> Result<Vec<Coupon>, CouponStoreError> {
        self.inner.get_by_campaign(id)
    }

    fn delete_by_campaign_id(&self, id: &CampaignId) -> Result<usize, CouponStoreError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::backend());
        }
        self.inner.delete_by_campaign_id(id)
    }
}

/// A campaign store that fails every call with a backend error.
pub struct BrokenCampaignStore;

impl BrokenCampaignStore {
    fn backend() -> CampaignStoreError {
        CampaignStoreError::Backend {
            context: "connection refused".into(),
        }
    }
}

impl CampaignStore for BrokenCampaignStore {
    fn create(&self, _: Campaign) -> Result<(), CampaignStoreError> {
        Err(Self::backend())
    }

    fn get(&self, _: &CampaignId) -> Result<Campaign, CampaignStoreError> {
        Err(Self::backend())
    }

    fn update(&self, _: Campaign) -> Result<(), CampaignStoreError> {
        Err(Self::backend())
    }

    fn atomic_increment_issued(&self, _: &CampaignId) -> Result<bool, CampaignStoreError> {
        Err(Self::backend())
    }

    fn find_by_name(&self, _: &str) -> Result<Campaign, CampaignStoreError> {
        Err(Self::backend())
    }

    fn delete_by_id(&self, _: &CampaignId) -> Result<bool, CampaignStoreError> {
        Err(Self::backend())
    }

    fn delete_by_name(&self, _: &str) -> Result<bool, CampaignStoreError> {
        Err(Self::backend())
    }
}

/// Wraps a campaign store and, once armed, removes the campaign that the next
/// `find_by_name` resolves right after resolving it, as a concurrent delete
/// landing between lookup and removal would.
pub struct VanishingCampaignStore<C> {
    inner: C,
    armed: AtomicBool,
}

impl<C: CampaignStore> VanishingCampaignStore<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            armed: AtomicBool::new(false),
        }
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}

impl<C: CampaignStore> CampaignStore for VanishingCampaignStore<C> {
    fn create(&self, campaign: Campaign) -> Result<(), CampaignStoreError> {
        self.inner.create(campaign)
    }

    fn get(&self, id: &CampaignId) -> Result<Campaign, CampaignStoreError> {
        self.inner.get(id)
    }

    fn update(&self, campaign: Campaign) -> Result<(), CampaignStoreError> {
        self.inner.update(campaign)
    }

    fn atomic_increment_issued(&self, id: &CampaignId) -> Result<bool, CampaignStoreError> {
        self.inner.atomic_increment_issued(id)
    }

    fn find_by_name(&self, name: &str) -> Result<Campaign, CampaignStoreError> {
        let campaign = self.inner.find_by_name(name)?;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.inner.delete_by_id(&campaign.id)?;
        }
        Ok(campaign)
    }

    fn delete_by_id(&self, id: &CampaignId) -> Result<bool, CampaignStoreError> {
        self.inner.delete_by_id(id)
    }

    fn delete_by_name(&self, name: &str) -> Result<bool, CampaignStoreError> {
        self.inner.delete_by_name(name)
    }
}
