use crate::{
    Campaign, CampaignDetails, CampaignError, CampaignId, CampaignStore, CampaignStoreError,
    CodeGenerator, Coupon, CouponStore, DeleteOutcome, MemoryCampaignStore, MemoryCouponStore,
    RandSource, Result, SystemClock, ThreadRandom, TimeSource,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// A [`CampaignService`] wired to the in-memory stores, the system clock, and
/// the thread-local RNG.
pub type InMemoryCampaignService =
    CampaignService<MemoryCampaignStore<SystemClock>, MemoryCouponStore, SystemClock, ThreadRandom>;

/// Orchestrates campaign creation, lookup, coupon issuance, and deletion.
///
/// Per campaign, the service drives a logical state machine: **Pending**
/// before the start time, **Open** while quota remains, **Exhausted** once
/// `issued == total`, and **Deleted** from any state.
///
/// ## Locking
///
/// The campaign counter, the coupon ledger, and the code generator are three
/// independently locked components. No transaction spans them: issuance
/// increments the counter, then generates a code, then appends the coupon. A
/// failure after the increment loses that quota slot (see
/// [`Self::issue_coupon`]).
///
/// Every operation is synchronous, in-memory for the provided stores, and
/// completes in bounded time; the service is `Send + Sync` and is meant to be
/// shared behind an [`Arc`] by many request handlers.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use coupon_engine::{CampaignError, InMemoryCampaignService};
///
/// let service = InMemoryCampaignService::in_memory();
/// let campaign = service
///     .create_campaign("launch", 1, Utc::now() - Duration::seconds(1))
///     .unwrap();
///
/// let coupon = service.issue_coupon(&campaign.id).unwrap();
/// assert_eq!(coupon.campaign_id, campaign.id);
/// assert_eq!(
///     service.issue_coupon(&campaign.id),
///     Err(CampaignError::NoMoreCoupons)
/// );
/// ```
pub struct CampaignService<C, S, T = SystemClock, R = ThreadRandom>
where
    C: CampaignStore,
    S: CouponStore,
    T: TimeSource,
    R: RandSource,
{
    campaigns: C,
    coupons: S,
    codes: Arc<CodeGenerator<R>>,
    clock: T,
}

impl InMemoryCampaignService {
    /// Builds a service over fresh in-memory stores with default-length codes.
    pub fn in_memory() -> Self {
        Self::in_memory_with_code_length(0)
    }

    /// Like [`Self::in_memory`], with codes of `code_length` symbols (zero
    /// selects the default).
    pub fn in_memory_with_code_length(code_length: usize) -> Self {
        Self::new(
            MemoryCampaignStore::new(SystemClock),
            MemoryCouponStore::new(),
            Arc::new(CodeGenerator::with_length(code_length, ThreadRandom)),
            SystemClock,
        )
    }
}

impl<C, S, T, R> CampaignService<C, S, T, R>
where
    C: CampaignStore,
    S: CouponStore,
    T: TimeSource,
    R: RandSource,
{
    /// Creates a service over the given components.
    ///
    /// `codes` is the process-wide uniqueness domain; every service that must
    /// never repeat a code has to share the same generator. Give `campaigns`
    /// the same clock as `clock` so its start-time gate agrees with the
    /// service's own check.
    pub fn new(campaigns: C, coupons: S, codes: Arc<CodeGenerator<R>>, clock: T) -> Self {
        Self {
            campaigns,
            coupons,
            codes,
            clock,
        }
    }

    pub fn campaign_store(&self) -> &C {
        &self.campaigns
    }

    pub fn coupon_store(&self) -> &S {
        &self.coupons
    }

    pub fn code_generator(&self) -> &Arc<CodeGenerator<R>> {
        &self.codes
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Creates a campaign named `name` allowing `total` coupons from
    /// `start_time` on.
    ///
    /// # Errors
    /// - [`CampaignError::InvalidRequest`] if `name` is empty or `total` is 0
    /// - [`CampaignError::DuplicateCampaign`] if a campaign with `name` exists.
    ///   This is a read-then-write check: two concurrent creates of the same
    ///   new name can both succeed.
    /// - [`CampaignError::Internal`] if the store fails
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn create_campaign(
        &self,
        name: &str,
        total: u64,
        start_time: DateTime<Utc>,
    ) -> Result<Campaign> {
        if name.is_empty() {
            return Err(CampaignError::invalid("campaign name must not be empty"));
        }
        if total == 0 {
            return Err(CampaignError::invalid("total coupons must be positive"));
        }

        match self.campaigns.find_by_name(name) {
            Ok(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("rejecting duplicate campaign name");
                return Err(CampaignError::DuplicateCampaign);
            }
            Err(CampaignStoreError::NotFound) => {}
            Err(err) => return Err(CampaignError::internal(err.to_string())),
        }

        let campaign = Campaign::new(
            CampaignId::random(),
            name,
            total,
            start_time,
            self.clock.current_time(),
        );
        self.campaigns
            .create(campaign.clone())
            .map_err(|err| CampaignError::internal(err.to_string()))?;

        #[cfg(feature = "tracing")]
        tracing::info!(campaign_id = %campaign.id, "campaign created");
        Ok(campaign)
    }

    /// Returns the campaign and every coupon issued for it.
    ///
    /// # Errors
    /// - [`CampaignError::CampaignNotFound`] if no campaign has `id`
    /// - [`CampaignError::Internal`] if either store fails
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn get_campaign(&self, id: &CampaignId) -> Result<CampaignDetails> {
        let campaign = self.campaigns.get(id)?;
        let coupons = self.coupons.get_by_campaign(id)?;
        Ok(CampaignDetails { campaign, coupons })
    }

    /// Issues one coupon for campaign `id`.
    ///
    /// The start time is checked against a snapshot first, for a cheap early
    /// rejection, and again inside the store's atomic increment.
    ///
    /// # Errors
    /// - [`CampaignError::CampaignNotFound`] if no campaign has `id`
    /// - [`CampaignError::CampaignNotStarted`] before the start time
    /// - [`CampaignError::NoMoreCoupons`] once the quota is exhausted
    /// - [`CampaignError::Internal`] if a store or the generator fails. If this
    ///   happens after the increment, the counter is **not** rolled back: one
    ///   quota slot is lost, and retrying consumes another.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn issue_coupon(&self, id: &CampaignId) -> Result<Coupon> {
        let campaign = self.campaigns.get(id)?;

        if !campaign.has_started(self.clock.current_time()) {
            #[cfg(feature = "tracing")]
            tracing::debug!(start_time = %campaign.start_time, "campaign not started");
            return Err(CampaignError::CampaignNotStarted);
        }

        match self.campaigns.atomic_increment_issued(id) {
            Ok(true) => {}
            Ok(false) | Err(CampaignStoreError::LimitReached) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(total = campaign.total, "campaign quota exhausted");
                return Err(CampaignError::NoMoreCoupons);
            }
            Err(err) => return Err(err.into()),
        }

        let code = self.codes.generate().inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %_err, "code generation failed after increment; quota slot lost");
        })?;

        let coupon = Coupon::new(code, *id, self.clock.current_time());
        self.coupons.create(coupon.clone()).inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::error!(
                error = %_err,
                code = %coupon.code,
                "coupon persistence failed after increment; quota slot lost"
            );
        })?;

        Ok(coupon)
    }

    /// Deletes a campaign by `id`, falling back to `name`, and cascades to its
    /// coupons.
    ///
    /// The id is tried first. If it removes nothing and a name was given, the
    /// name is resolved to a campaign and that campaign is deleted by its id.
    /// An empty name counts as absent.
    ///
    /// # Returns
    /// - [`DeleteOutcome::Deleted`] when the campaign and its ledger are gone
    /// - [`DeleteOutcome::CascadeFailed`] when the campaign is gone but its
    ///   coupons could not be cleared
    /// - [`DeleteOutcome::NotFound`] when nothing matched
    ///
    /// # Errors
    /// - [`CampaignError::InvalidRequest`] if neither id nor name is given
    /// - [`CampaignError::Internal`] if the campaign store fails
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn delete_campaign(
        &self,
        id: Option<&CampaignId>,
        name: Option<&str>,
    ) -> Result<DeleteOutcome> {
        let name = name.filter(|name| !name.is_empty());
        if id.is_none() && name.is_none() {
            return Err(CampaignError::invalid(
                "either campaign id or name is required",
            ));
        }

        let mut removed = None;
        if let Some(id) = id {
            if self.delete_by_id(id)? {
                removed = Some(*id);
            }
        }

        if removed.is_none() {
            if let Some(name) = name {
                removed = self.delete_by_name(name)?;
            }
        }

        let Some(campaign_id) = removed else {
            return Ok(DeleteOutcome::NotFound);
        };

        match self.coupons.delete_by_campaign_id(&campaign_id) {
            Ok(coupons_removed) => {
                #[cfg(feature = "tracing")]
                tracing::info!(%campaign_id, coupons_removed, "campaign deleted");
                Ok(DeleteOutcome::Deleted {
                    campaign_id,
                    coupons_removed,
                })
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::error!(%campaign_id, error = %err, "campaign deleted but its coupons were not");
                Ok(DeleteOutcome::CascadeFailed {
                    campaign_id,
                    context: err.to_string(),
                })
            }
        }
    }

    fn delete_by_id(&self, id: &CampaignId) -> Result<bool> {
        self.campaigns
            .delete_by_id(id)
            .map_err(|err| CampaignError::internal(err.to_string()))
    }

    /// Resolves `name` and deletes that campaign by id, returning the id.
    ///
    /// Removal goes through the resolved id, so the cascade always targets the
    /// campaign that was actually removed even when names repeat. If a
    /// concurrent delete removes the resolved campaign first, the name is
    /// resolved again.
    fn delete_by_name(&self, name: &str) -> Result<Option<CampaignId>> {
        loop {
            let campaign = match self.campaigns.find_by_name(name) {
                Ok(campaign) => campaign,
                Err(CampaignStoreError::NotFound) => return Ok(None),
                Err(err) => return Err(CampaignError::internal(err.to_string())),
            };

            if self.delete_by_id(&campaign.id)? {
                return Ok(Some(campaign.id));
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(campaign_id = %campaign.id, "resolved campaign vanished, resolving name again");
        }
    }
}
