use crate::{Campaign, CampaignId, CampaignStatus};
use chrono::{DateTime, Duration, Utc};

fn campaign_at(start: DateTime<Utc>, total: u64) -> Campaign {
    Campaign::new(CampaignId::random(), "spring-sale", total, start, start)
}

#[test]
fn status_follows_start_time_and_quota() {
    let start = DateTime::<Utc>::UNIX_EPOCH + Duration::days(10);
    let mut campaign = campaign_at(start, 2);

    assert_eq!(campaign.status(start - Duration::seconds(1)), CampaignStatus::Pending);
    assert_eq!(campaign.status(start), CampaignStatus::Open);

    campaign.issued = 2;
    assert_eq!(campaign.status(start + Duration::hours(1)), CampaignStatus::Exhausted);
    assert!(!campaign.can_issue(start + Duration::hours(1)));
}

#[test]
fn start_instant_counts_as_started() {
    let start = DateTime::<Utc>::UNIX_EPOCH;
    let campaign = campaign_at(start, 1);

    assert!(campaign.has_started(start));
    assert!(!campaign.has_started(start - Duration::milliseconds(1)));
    assert!(campaign.can_issue(start));
}

#[test]
fn remaining_never_underflows() {
    let mut campaign = campaign_at(DateTime::<Utc>::UNIX_EPOCH, 3);
    assert_eq!(campaign.remaining(), 3);

    campaign.issued = 5;
    assert_eq!(campaign.remaining(), 0);
}

#[test]
fn campaign_id_parses_its_display_form() {
    let id = CampaignId::random();
    let parsed: CampaignId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
    assert!("not-a-uuid".parse::<CampaignId>().is_err());
}

#[test]
fn random_ids_differ() {
    assert_ne!(CampaignId::random(), CampaignId::random());
}

#[cfg(feature = "serde")]
#[test]
fn campaign_serializes_with_coupon_count_field_names() {
    let campaign = campaign_at(DateTime::<Utc>::UNIX_EPOCH, 4);
    let json = serde_json::to_value(&campaign).unwrap();

    assert_eq!(json["total_coupons"], 4);
    assert_eq!(json["issued_coupons"], 0);
    assert_eq!(json["id"], campaign.id.to_string());

    let back: Campaign = serde_json::from_value(json).unwrap();
    assert_eq!(back, campaign);
}
