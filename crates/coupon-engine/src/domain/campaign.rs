use chrono::{DateTime, Utc};
use core::{fmt, str::FromStr};
use uuid::Uuid;

/// Opaque, process-unique campaign identity.
///
/// Backed by a random (v4) UUID; collisions are treated as impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CampaignId(Uuid);

impl CampaignId {
    /// Allocates a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CampaignId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The logical lifecycle of a campaign.
///
/// Never stored; derived from a [`Campaign`] snapshot and the current time via
/// [`Campaign::status`]. Deletion is terminal and is observed as the campaign
/// no longer existing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CampaignStatus {
    /// The start time has not been reached.
    Pending,
    /// Started, with quota remaining.
    Open,
    /// Every coupon of the quota has been issued.
    Exhausted,
}

/// A named, time-gated, quota-bounded unit of coupon issuance.
///
/// `issued <= total` holds for every stored campaign. Only the store's atomic
/// increment advances `issued`; values handed out by a store are point-in-time
/// copies and mutating them changes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "total_coupons"))]
    pub total: u64,
    #[cfg_attr(feature = "serde", serde(rename = "issued_coupons"))]
    pub issued: u64,
    pub start_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// Builds a fresh campaign with nothing issued.
    pub fn new(
        id: CampaignId,
        name: impl Into<String>,
        total: u64,
        start_time: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            total,
            issued: 0,
            start_time,
            created_at,
        }
    }

    /// Whether issuance is open at `now`. The start instant itself counts as
    /// started.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.start_time
    }

    pub fn is_exhausted(&self) -> bool {
        self.issued >= self.total
    }

    pub fn can_issue(&self, now: DateTime<Utc>) -> bool {
        self.has_started(now) && !self.is_exhausted()
    }

    /// Coupons left in the quota.
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.issued)
    }

    pub fn status(&self, now: DateTime<Utc>) -> CampaignStatus {
        if !self.has_started(now) {
            CampaignStatus::Pending
        } else if self.is_exhausted() {
            CampaignStatus::Exhausted
        } else {
            CampaignStatus::Open
        }
    }
}
