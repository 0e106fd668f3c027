use crate::{Campaign, CampaignId, CampaignStoreError};
use std::sync::Arc;

/// A keyed collection of [`Campaign`] records.
///
/// Every method must be safe to call from any number of threads at once.
/// Returned campaigns are consistent point-in-time copies: they may be stale
/// relative to a concurrent increment but are never torn.
pub trait CampaignStore: Send + Sync {
    /// Inserts `campaign` under its id without a duplicate check; the caller
    /// guarantees the id is fresh.
    fn create(&self, campaign: Campaign) -> Result<(), CampaignStoreError>;

    fn get(&self, id: &CampaignId) -> Result<Campaign, CampaignStoreError>;

    /// Replaces the mutable descriptive fields of a stored campaign.
    ///
    /// `issued` and `created_at` are always kept from the stored record; only
    /// [`Self::atomic_increment_issued`] advances the issued count.
    fn update(&self, campaign: Campaign) -> Result<(), CampaignStoreError>;

    /// Checks eligibility and bumps `issued` as one indivisible step.
    ///
    /// Fails with [`CampaignStoreError::NotFound`],
    /// [`CampaignStoreError::LimitReached`] when `issued == total`, or
    /// [`CampaignStoreError::NotStarted`] when the current time precedes the
    /// start time. For any set of concurrent calls against one id the result
    /// must be as if they ran one after another: successes never exceed
    /// `total`, and each success is exactly one increment.
    ///
    /// `Ok(false)` is reserved for backends that report "no room" without an
    /// error; callers treat it like `LimitReached`.
    fn atomic_increment_issued(&self, id: &CampaignId) -> Result<bool, CampaignStoreError>;

    /// Finds a campaign by exact name with a linear scan.
    ///
    /// Names are not constrained to be unique. If several campaigns share a
    /// name, the earliest created one is returned.
    fn find_by_name(&self, name: &str) -> Result<Campaign, CampaignStoreError>;

    /// Returns whether a campaign was removed. Absence is not an error.
    fn delete_by_id(&self, id: &CampaignId) -> Result<bool, CampaignStoreError>;

    /// Removes the campaign [`Self::find_by_name`] would return, if any.
    fn delete_by_name(&self, name: &str) -> Result<bool, CampaignStoreError>;
}

impl<S> CampaignStore for Arc<S>
where
    S: CampaignStore + ?Sized,
{
    fn create(&self, campaign: Campaign) -> Result<(), CampaignStoreError> {
        (**self).create(campaign)
    }

    fn get(&self, id: &CampaignId) -> Result<Campaign, CampaignStoreError> {
        (**self).get(id)
    }

    fn update(&self, campaign: Campaign) -> Result<(), CampaignStoreError> {
        (**self).update(campaign)
    }

    fn atomic_increment_issued(&self, id: &CampaignId) -> Result<bool, CampaignStoreError> {
        (**self).atomic_increment_issued(id)
    }

    fn find_by_name(&self, name: &str) -> Result<Campaign, CampaignStoreError> {
        (**self).find_by_name(name)
    }

    fn delete_by_id(&self, id: &CampaignId) -> Result<bool, CampaignStoreError> {
        (**self).delete_by_id(id)
    }

    fn delete_by_name(&self, name: &str) -> Result<bool, CampaignStoreError> {
        (**self).delete_by_name(name)
    }
}
