use crate::load::config::LoadConfig;
use anyhow::ensure;
use coupon_engine::CampaignId;
use core::time::Duration;

/// Outcome of one load run.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub campaign_id: CampaignId,
    pub total: u64,
    pub attempts: usize,
    pub workers: usize,
    /// Successful issuances seen by the workers.
    pub issued: u64,
    pub no_more_coupons: u64,
    pub not_started: u64,
    pub other_failures: u64,
    pub distinct_codes: u64,
    /// `issued` counter read back from the campaign store.
    pub recorded_issued: u64,
    /// Coupons read back from the campaign's ledger.
    pub ledger_len: u64,
    pub elapsed: Duration,
}

impl LoadReport {
    /// Attempts completed per second, successful or not.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.attempts as f64 / secs
    }

    pub fn log(&self) {
        tracing::info!(
            campaign_id = %self.campaign_id,
            total = self.total,
            attempts = self.attempts,
            workers = self.workers,
            issued = self.issued,
            no_more_coupons = self.no_more_coupons,
            not_started = self.not_started,
            other_failures = self.other_failures,
            distinct_codes = self.distinct_codes,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "Load run finished at {:.0} attempts/s",
            self.throughput()
        );
    }

    /// Checks the run against the quota and uniqueness guarantees.
    ///
    /// # Errors
    ///
    /// Names the first guarantee that did not hold.
    pub fn verify(&self, config: &LoadConfig) -> anyhow::Result<()> {
        let outcomes = self.issued + self.no_more_coupons + self.not_started + self.other_failures;
        ensure!(
            outcomes == self.attempts as u64,
            "{} attempts produced {} outcomes",
            self.attempts,
            outcomes
        );
        ensure!(
            self.issued <= self.total,
            "issued {} coupons against a quota of {}",
            self.issued,
            self.total
        );
        ensure!(
            self.distinct_codes == self.issued,
            "{} coupons share {} distinct codes",
            self.issued,
            self.distinct_codes
        );
        ensure!(
            self.ledger_len == self.issued,
            "ledger holds {} coupons but {} were issued",
            self.ledger_len,
            self.issued
        );
        // A failed persist still consumes its slot, so the counter may run
        // ahead of the ledger by exactly the number of other failures.
        ensure!(
            self.recorded_issued == self.issued + self.other_failures,
            "store counts {} issued but workers saw {} successes and {} failures",
            self.recorded_issued,
            self.issued,
            self.other_failures
        );
        if self.other_failures == 0 {
            let expected = config.expected_issued();
            ensure!(
                self.issued == expected,
                "expected {} coupons to be issued, got {}",
                expected,
                self.issued
            );
        }
        Ok(())
    }
}
