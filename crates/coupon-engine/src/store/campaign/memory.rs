use crate::{Campaign, CampaignId, CampaignStore, CampaignStoreError, SystemClock, TimeSource};
use parking_lot::RwLock;
use std::collections::HashMap;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// An in-memory [`CampaignStore`] guarded by a single reader-writer lock.
///
/// Reads share the lock; every mutation, including the whole
/// read-check-increment sequence of [`CampaignStore::atomic_increment_issued`],
/// runs under the exclusive side. The store consults its own [`TimeSource`] for
/// the start-time gate, so hand it the same clock the orchestrator uses.
///
/// Nothing survives the process.
pub struct MemoryCampaignStore<T = SystemClock>
where
    T: TimeSource,
{
    campaigns: RwLock<HashMap<CampaignId, Campaign>>,
    clock: T,
}

impl<T> MemoryCampaignStore<T>
where
    T: TimeSource,
{
    pub fn new(clock: T) -> Self {
        Self {
            campaigns: RwLock::new(HashMap::new()),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.campaigns.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.read().is_empty()
    }
}

impl Default for MemoryCampaignStore<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

/// Picks the campaign `find_by_name` reports when names collide: earliest
/// `created_at`, ties broken by id, so lookups and deletes agree.
fn first_named<'a>(
    campaigns: &'a HashMap<CampaignId, Campaign>,
    name: &str,
) -> Option<&'a Campaign> {
    campaigns
        .values()
        .filter(|c| c.name == name)
        .min_by_key(|c| (c.created_at, c.id))
}

impl<T> CampaignStore for MemoryCampaignStore<T>
where
    T: TimeSource + Send + Sync,
{
    fn create(&self, campaign: Campaign) -> Result<(), CampaignStoreError> {
        self.campaigns.write().insert(campaign.id, campaign);
        Ok(())
    }

    fn get(&self, id: &CampaignId) -> Result<Campaign, CampaignStoreError> {
        self.campaigns
            .read()
            .get(id)
            .cloned()
            .ok_or(CampaignStoreError::NotFound)
    }

    fn update(&self, campaign: Campaign) -> Result<(), CampaignStoreError> {
        let mut campaigns = self.campaigns.write();
        let stored = campaigns
            .get_mut(&campaign.id)
            .ok_or(CampaignStoreError::NotFound)?;

        if campaign.total < stored.issued {
            return Err(CampaignStoreError::QuotaBelowIssued {
                issued: stored.issued,
                total: campaign.total,
            });
        }

        stored.name = campaign.name;
        stored.total = campaign.total;
        stored.start_time = campaign.start_time;
        Ok(())
    }

    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn atomic_increment_issued(&self, id: &CampaignId) -> Result<bool, CampaignStoreError> {
        let mut campaigns = self.campaigns.write();
        let campaign = campaigns.get_mut(id).ok_or(CampaignStoreError::NotFound)?;

        if campaign.is_exhausted() {
            return Err(CampaignStoreError::LimitReached);
        }

        if !campaign.has_started(self.clock.current_time()) {
            return Err(CampaignStoreError::NotStarted);
        }

        campaign.issued += 1;
        Ok(true)
    }

    fn find_by_name(&self, name: &str) -> Result<Campaign, CampaignStoreError> {
        first_named(&self.campaigns.read(), name)
            .cloned()
            .ok_or(CampaignStoreError::NotFound)
    }

    fn delete_by_id(&self, id: &CampaignId) -> Result<bool, CampaignStoreError> {
        Ok(self.campaigns.write().remove(id).is_some())
    }

    fn delete_by_name(&self, name: &str) -> Result<bool, CampaignStoreError> {
        let mut campaigns = self.campaigns.write();
        let Some(id) = first_named(&campaigns, name).map(|c| c.id) else {
            return Ok(false);
        };
        Ok(campaigns.remove(&id).is_some())
    }
}
