//! Persistence contracts for campaigns and coupons, with in-memory
//! implementations.
//!
//! The two stores know nothing of each other. Cross-store invariants (cascade
//! deletes, "a coupon exists only for a successful increment") belong to the
//! orchestrator.
//!
//! Each in-memory store guards its whole map with one coarse lock rather than
//! locking per key. Sharding by campaign id would change the atomicity
//! granularity of [`CampaignStore::atomic_increment_issued`] and has to be
//! introduced as its own store implementation.

mod campaign;
mod coupon;
mod error;
#[cfg(test)]
mod tests;

pub use campaign::*;
pub use coupon::*;
pub use error::*;
