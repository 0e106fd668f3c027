/// Low-level failures surfaced by a [`CampaignStore`].
///
/// These describe existence, quota, and timing facts only. The orchestrator
/// turns them into the caller-facing [`CampaignError`] taxonomy.
///
/// [`CampaignStore`]: crate::CampaignStore
/// [`CampaignError`]: crate::CampaignError
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum CampaignStoreError {
    /// No campaign is stored under the given id or name.
    #[error("campaign not found")]
    NotFound,

    /// The campaign has already issued its whole quota.
    #[error("coupon limit reached")]
    LimitReached,

    /// The current time precedes the campaign's start time.
    #[error("campaign has not started yet")]
    NotStarted,

    /// An update tried to lower the quota below what was already issued.
    #[error("quota {total} is below the {issued} coupons already issued")]
    QuotaBelowIssued { issued: u64, total: u64 },

    /// The backing storage failed. Never produced by the in-memory store.
    #[error("campaign storage failure: {context}")]
    Backend { context: String },
}

/// Failures surfaced by a [`CouponStore`].
///
/// [`CouponStore`]: crate::CouponStore
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum CouponStoreError {
    /// The backing storage failed. Never produced by the in-memory store.
    #[error("coupon storage failure: {context}")]
    Backend { context: String },
}
