//! The campaign orchestrator.
//!
//! [`CampaignService`] composes a [`CampaignStore`](crate::CampaignStore), a
//! [`CouponStore`](crate::CouponStore), a shared
//! [`CodeGenerator`](crate::CodeGenerator), and a
//! [`TimeSource`](crate::TimeSource) into the four business operations, and is
//! the only component aware of invariants spanning more than one of them.

mod campaign;
mod outcome;

pub use campaign::*;
pub use outcome::*;
