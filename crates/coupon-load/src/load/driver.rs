//! Fans issuance attempts for one campaign out over a set of tokio tasks.

use crate::load::{config::LoadConfig, report::LoadReport};
use chrono::{TimeDelta, Utc};
use coupon_engine::{CampaignError, CampaignId, InMemoryCampaignService};
use std::{collections::HashSet, sync::Arc, time::Instant};
use tokio::sync::Barrier;

/// What a single worker observed.
#[derive(Debug, Default)]
pub struct WorkerTally {
    pub codes: Vec<String>,
    pub no_more_coupons: u64,
    pub not_started: u64,
    pub other_failures: u64,
}

impl WorkerTally {
    fn absorb(&mut self, other: Self) {
        self.codes.extend(other.codes);
        self.no_more_coupons += other.no_more_coupons;
        self.not_started += other.not_started;
        self.other_failures += other.other_failures;
    }
}

/// Splits `attempts` over `workers` so the shares differ by at most one.
pub fn shares(attempts: usize, workers: usize) -> Vec<usize> {
    let base = attempts / workers;
    let extra = attempts % workers;
    (0..workers).map(|i| base + usize::from(i < extra)).collect()
}

/// Creates the campaign, runs every attempt and collects the results.
///
/// # Errors
///
/// Fails if the campaign cannot be created, a worker task panics, or the
/// final campaign state cannot be read back.
pub async fn run(config: &LoadConfig) -> anyhow::Result<LoadReport> {
    let service = Arc::new(InMemoryCampaignService::in_memory_with_code_length(
        config.code_length,
    ));

    let start_time = Utc::now() + TimeDelta::seconds(config.start_offset_secs);
    let campaign = service.create_campaign(&config.campaign_name, config.total, start_time)?;
    let campaign_id = campaign.id;

    tracing::info!(
        %campaign_id,
        name = %campaign.name,
        total = campaign.total,
        %start_time,
        "Campaign created"
    );

    // Workers plus the coordinator, so the clock starts once everyone is ready.
    let barrier = Arc::new(Barrier::new(config.workers + 1));
    let mut handles = Vec::with_capacity(config.workers);
    for (worker_id, share) in shares(config.attempts, config.workers).into_iter().enumerate() {
        let service = Arc::clone(&service);
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            worker_loop(worker_id, &service, campaign_id, share).await
        }));
    }

    barrier.wait().await;
    let started = Instant::now();

    let mut tally = WorkerTally::default();
    for handle in handles {
        tally.absorb(handle.await?);
    }
    let elapsed = started.elapsed();

    let details = service.get_campaign(&campaign_id)?;
    let distinct_codes = tally.codes.iter().collect::<HashSet<_>>().len();

    Ok(LoadReport {
        campaign_id,
        total: config.total,
        attempts: config.attempts,
        workers: config.workers,
        issued: tally.codes.len() as u64,
        no_more_coupons: tally.no_more_coupons,
        not_started: tally.not_started,
        other_failures: tally.other_failures,
        distinct_codes: distinct_codes as u64,
        recorded_issued: details.campaign.issued,
        ledger_len: details.coupons.len() as u64,
        elapsed,
    })
}

async fn worker_loop(
    worker_id: usize,
    service: &InMemoryCampaignService,
    campaign_id: CampaignId,
    attempts: usize,
) -> WorkerTally {
    let mut tally = WorkerTally::default();
    for _ in 0..attempts {
        match service.issue_coupon(&campaign_id) {
            Ok(coupon) => tally.codes.push(coupon.code),
            Err(CampaignError::NoMoreCoupons) => tally.no_more_coupons += 1,
            Err(CampaignError::CampaignNotStarted) => tally.not_started += 1,
            Err(e) => {
                tracing::warn!(worker_id, error = %e, "Issuance failed");
                tally.other_failures += 1;
            }
        }
        // Let other workers onto this runtime thread between attempts.
        tokio::task::yield_now().await;
    }

    tracing::debug!(
        worker_id,
        issued = tally.codes.len(),
        rejected = tally.no_more_coupons + tally.not_started,
        "Worker finished"
    );
    tally
}
