use crate::{
    Campaign, CampaignId, CampaignStore, CampaignStoreError, Coupon, CouponStore, ManualClock,
    MemoryCampaignStore, MemoryCouponStore,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::thread::scope;

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::days(20_000)
}

fn started(name: &str, total: u64) -> Campaign {
    Campaign::new(
        CampaignId::random(),
        name,
        total,
        epoch() - Duration::seconds(1),
        epoch(),
    )
}

fn store() -> (MemoryCampaignStore<ManualClock>, ManualClock) {
    let clock = ManualClock::new(epoch());
    (MemoryCampaignStore::new(clock.clone()), clock)
}

#[test]
fn get_returns_created_campaign() {
    let (store, _) = store();
    let campaign = started("launch", 3);
    store.create(campaign.clone()).unwrap();

    assert_eq!(store.get(&campaign.id).unwrap(), campaign);
    assert_eq!(
        store.get(&CampaignId::random()),
        Err(CampaignStoreError::NotFound)
    );
}

#[test]
fn returned_campaign_is_a_detached_copy() {
    let (store, _) = store();
    let campaign = started("launch", 3);
    store.create(campaign.clone()).unwrap();

    let mut copy = store.get(&campaign.id).unwrap();
    copy.issued = 3;

    assert_eq!(store.get(&campaign.id).unwrap().issued, 0);
}

#[test]
fn increment_stops_at_total() {
    let (store, _) = store();
    let campaign = started("launch", 2);
    store.create(campaign.clone()).unwrap();

    assert_eq!(store.atomic_increment_issued(&campaign.id), Ok(true));
    assert_eq!(store.atomic_increment_issued(&campaign.id), Ok(true));
    assert_eq!(
        store.atomic_increment_issued(&campaign.id),
        Err(CampaignStoreError::LimitReached)
    );
    assert_eq!(store.get(&campaign.id).unwrap().issued, 2);
}

#[test]
fn increment_rejects_unknown_id() {
    let (store, _) = store();
    assert_eq!(
        store.atomic_increment_issued(&CampaignId::random()),
        Err(CampaignStoreError::NotFound)
    );
}

#[test]
fn increment_is_gated_on_start_time() {
    let (store, clock) = store();
    let campaign = Campaign::new(
        CampaignId::random(),
        "later",
        1,
        epoch() + Duration::hours(1),
        epoch(),
    );
    store.create(campaign.clone()).unwrap();

    assert_eq!(
        store.atomic_increment_issued(&campaign.id),
        Err(CampaignStoreError::NotStarted)
    );
    assert_eq!(store.get(&campaign.id).unwrap().issued, 0);

    clock.advance(Duration::hours(1));
    assert_eq!(store.atomic_increment_issued(&campaign.id), Ok(true));
}

#[test]
fn concurrent_increments_never_exceed_total() {
    const THREADS: usize = 16;
    const ATTEMPTS_PER_THREAD: usize = 500;
    const TOTAL: u64 = 1_000;

    let (store, _) = store();
    let campaign = started("flash", TOTAL);
    store.create(campaign.clone()).unwrap();

    let successes = AtomicU64::new(0);
    let limited = AtomicU64::new(0);

    scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ATTEMPTS_PER_THREAD {
                    match store.atomic_increment_issued(&campaign.id) {
                        Ok(true) => successes.fetch_add(1, Ordering::Relaxed),
                        Err(CampaignStoreError::LimitReached) => {
                            limited.fetch_add(1, Ordering::Relaxed)
                        }
                        other => panic!("unexpected increment result: {other:?}"),
                    };
                }
            });
        }
    });

    let attempts = (THREADS * ATTEMPTS_PER_THREAD) as u64;
    assert_eq!(successes.load(Ordering::Relaxed), TOTAL);
    assert_eq!(limited.load(Ordering::Relaxed), attempts - TOTAL);
    assert_eq!(store.get(&campaign.id).unwrap().issued, TOTAL);
}

#[test]
fn update_keeps_issued_and_created_at() {
    let (store, _) = store();
    let campaign = started("launch", 5);
    store.create(campaign.clone()).unwrap();
    store.atomic_increment_issued(&campaign.id).unwrap();

    let mut edited = campaign.clone();
    edited.name = "relaunch".into();
    edited.total = 8;
    edited.issued = 0;
    edited.created_at = epoch() + Duration::days(1);
    store.update(edited).unwrap();

    let stored = store.get(&campaign.id).unwrap();
    assert_eq!(stored.name, "relaunch");
    assert_eq!(stored.total, 8);
    assert_eq!(stored.issued, 1);
    assert_eq!(stored.created_at, campaign.created_at);
}

#[test]
fn update_rejects_missing_campaign_and_shrinking_below_issued() {
    let (store, _) = store();
    assert_eq!(
        store.update(started("ghost", 1)),
        Err(CampaignStoreError::NotFound)
    );

    let campaign = started("launch", 3);
    store.create(campaign.clone()).unwrap();
    store.atomic_increment_issued(&campaign.id).unwrap();
    store.atomic_increment_issued(&campaign.id).unwrap();

    let mut shrunk = campaign.clone();
    shrunk.total = 1;
    assert_eq!(
        store.update(shrunk),
        Err(CampaignStoreError::QuotaBelowIssued {
            issued: 2,
            total: 1
        })
    );
    assert_eq!(store.get(&campaign.id).unwrap().total, 3);
}

#[test]
fn find_by_name_prefers_earliest_created() {
    let (store, _) = store();
    let mut older = started("dup", 1);
    older.created_at = epoch() - Duration::days(1);
    let newer = started("dup", 1);
    store.create(newer.clone()).unwrap();
    store.create(older.clone()).unwrap();

    assert_eq!(store.find_by_name("dup").unwrap().id, older.id);
    assert_eq!(
        store.find_by_name("missing"),
        Err(CampaignStoreError::NotFound)
    );

    assert_eq!(store.delete_by_name("dup"), Ok(true));
    assert_eq!(store.find_by_name("dup").unwrap().id, newer.id);
}

#[test]
fn deletes_report_whether_anything_was_removed() {
    let (store, _) = store();
    let by_id = started("by-id", 1);
    let by_name = started("by-name", 1);
    store.create(by_id.clone()).unwrap();
    store.create(by_name.clone()).unwrap();
    assert_eq!(store.len(), 2);

    assert_eq!(store.delete_by_id(&by_id.id), Ok(true));
    assert_eq!(store.delete_by_id(&by_id.id), Ok(false));
    assert_eq!(store.delete_by_name("by-name"), Ok(true));
    assert_eq!(store.delete_by_name("by-name"), Ok(false));
    assert!(store.is_empty());
}

fn coupon(code: &str, campaign_id: CampaignId) -> Coupon {
    Coupon::new(code.to_owned(), campaign_id, epoch())
}

#[test]
fn coupon_ledgers_are_per_campaign_and_ordered() {
    let store = MemoryCouponStore::new();
    let a = CampaignId::random();
    let b = CampaignId::random();

    store.create(coupon("가1", a)).unwrap();
    store.create(coupon("나2", b)).unwrap();
    store.create(coupon("다3", a)).unwrap();

    let codes: Vec<_> = store
        .get_by_campaign(&a)
        .unwrap()
        .into_iter()
        .map(|c| c.code)
        .collect();
    assert_eq!(codes, ["가1", "다3"]);
    assert_eq!(store.get_by_campaign(&b).unwrap().len(), 1);
    assert!(store.get_by_campaign(&CampaignId::random()).unwrap().is_empty());
    assert_eq!(store.len(), 3);
}

#[test]
fn coupon_snapshot_does_not_see_later_appends() {
    let store = MemoryCouponStore::new();
    let id = CampaignId::random();
    store.create(coupon("가1", id)).unwrap();

    let snapshot = store.get_by_campaign(&id).unwrap();
    store.create(coupon("가2", id)).unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(store.get_by_campaign(&id).unwrap().len(), 2);
}

#[test]
fn coupon_cascade_delete_is_idempotent() {
    let store = MemoryCouponStore::new();
    let id = CampaignId::random();
    store.create(coupon("가1", id)).unwrap();
    store.create(coupon("가2", id)).unwrap();

    assert_eq!(store.delete_by_campaign_id(&id), Ok(2));
    assert_eq!(store.delete_by_campaign_id(&id), Ok(0));
    assert!(store.get_by_campaign(&id).unwrap().is_empty());
    assert!(store.is_empty());
}

#[test]
fn concurrent_coupon_appends_are_all_kept() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 250;

    let store = Arc::new(MemoryCouponStore::new());
    let id = CampaignId::random();

    scope(|s| {
        for t in 0..THREADS {
            let store = Arc::clone(&store);
            s.spawn(move || {
                for i in 0..PER_THREAD {
                    store.create(coupon(&format!("{t}-{i}"), id)).unwrap();
                }
            });
        }
    });

    let ledger = store.get_by_campaign(&id).unwrap();
    let distinct: HashSet<_> = ledger.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(ledger.len(), THREADS * PER_THREAD);
    assert_eq!(distinct.len(), THREADS * PER_THREAD);
}
