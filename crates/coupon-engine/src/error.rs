//! Caller-facing error taxonomy.
//!
//! The stores and the code generator each report their own narrow failures;
//! [`CampaignService`](crate::CampaignService) is the only place those are
//! classified into a [`CampaignError`]. Translating these kinds into transport
//! status codes is left to whatever serves the engine.

use crate::{CampaignStoreError, CodeGenError, CouponStoreError};

/// A result type defaulting to [`CampaignError`].
pub type Result<T, E = CampaignError> = core::result::Result<T, E>;

/// Every failure a campaign operation can report.
///
/// `CampaignNotStarted` and `NoMoreCoupons` are ordinary, terminal outcomes of
/// issuance rather than faults. Nothing here is retried internally.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum CampaignError {
    /// Malformed input: empty name, zero quota, or neither id nor name.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("campaign not found")]
    CampaignNotFound,

    /// A campaign with this name already exists. Checked best-effort; two
    /// concurrent creates with a new name may both succeed.
    #[error("a campaign with this name already exists")]
    DuplicateCampaign,

    #[error("campaign has not started yet")]
    CampaignNotStarted,

    /// The campaign's quota is exhausted.
    #[error("no more coupons available")]
    NoMoreCoupons,

    /// Unexpected storage or generation failure.
    ///
    /// When returned by `issue_coupon`, a quota slot may already have been
    /// consumed without a coupon being recorded. Retrying can consume a
    /// second slot.
    #[error("internal error: {context}")]
    Internal { context: String },
}

impl CampaignError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub(crate) fn internal(context: impl Into<String>) -> Self {
        Self::Internal {
            context: context.into(),
        }
    }
}

impl From<CampaignStoreError> for CampaignError {
    fn from(err: CampaignStoreError) -> Self {
        match err {
            CampaignStoreError::NotFound => Self::CampaignNotFound,
            CampaignStoreError::LimitReached => Self::NoMoreCoupons,
            CampaignStoreError::NotStarted => Self::CampaignNotStarted,
            err @ (CampaignStoreError::QuotaBelowIssued { .. }
            | CampaignStoreError::Backend { .. }) => Self::internal(err.to_string()),
        }
    }
}

impl From<CouponStoreError> for CampaignError {
    fn from(err: CouponStoreError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<CodeGenError> for CampaignError {
    fn from(err: CodeGenError) -> Self {
        Self::internal(err.to_string())
    }
}
