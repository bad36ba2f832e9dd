//! Countdown Item Entity
//!
//! One user-defined countdown to a target instant, with its lifecycle
//! `active -> expired -> dismissed`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Lifecycle state of a countdown item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Target not reached yet
    #[default]
    Active,
    /// Target passed, waiting for the user to acknowledge
    Expired,
    /// Acknowledged, may be removed
    Dismissed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Expired => "expired",
            ItemStatus::Dismissed => "dismissed",
        }
    }
}

impl FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ItemStatus::Active),
            "expired" => Ok(ItemStatus::Expired),
            "dismissed" => Ok(ItemStatus::Dismissed),
            other => Err(DomainError::InvalidInput(format!("unknown status: {}", other))),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A countdown entry as stored in `data.json` and exchanged with the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownItemData {
    /// Unique among live items
    pub id: String,
    /// Label shown to the user
    pub name: String,
    /// Epoch milliseconds, UTC
    pub target_date: i64,
    /// Any CSS color, normally one of `PRESET_COLORS`
    pub bg_color: String,
    pub status: ItemStatus,
}

/// Time left until a target, floored to whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownItemData {
    /// Create a new active item
    pub fn new(id: String, name: String, target_date: i64, bg_color: String) -> Self {
        Self {
            id,
            name,
            target_date,
            bg_color,
            status: ItemStatus::Active,
        }
    }

    pub fn target_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.target_date)
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        self.target_date <= now_ms
    }

    /// Expire an active item whose target has passed.
    ///
    /// Returns whether the status changed. Expired and dismissed items
    /// never go back to active, even if the target date moved.
    pub fn refresh(&mut self, now_ms: i64) -> bool {
        if self.status == ItemStatus::Active && self.is_due(now_ms) {
            self.status = ItemStatus::Expired;
            true
        } else {
            false
        }
    }

    /// Acknowledge an expired item.
    pub fn dismiss(&mut self) -> DomainResult<()> {
        match self.status {
            ItemStatus::Expired => {
                self.status = ItemStatus::Dismissed;
                Ok(())
            }
            ItemStatus::Dismissed => Ok(()),
            ItemStatus::Active => Err(DomainError::Conflict(format!(
                "item {} is still active",
                self.id
            ))),
        }
    }

    /// `None` once the target is reached
    pub fn remaining(&self, now_ms: i64) -> Option<Remaining> {
        if self.is_due(now_ms) {
            return None;
        }
        let left = Duration::milliseconds(self.target_date.saturating_sub(now_ms));
        Some(Remaining {
            days: left.num_days(),
            hours: left.num_hours() % 24,
            minutes: left.num_minutes() % 60,
            seconds: left.num_seconds() % 60,
        })
    }
}

impl Entity for CountdownItemData {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Refresh every item, returning how many expired.
pub fn refresh_all(items: &mut [CountdownItemData], now_ms: i64) -> usize {
    items
        .iter_mut()
        .map(|item| item.refresh(now_ms))
        .filter(|changed| *changed)
        .count()
}

/// Drop dismissed items, returning how many were removed.
pub fn purge_dismissed(items: &mut Vec<CountdownItemData>) -> usize {
    let before = items.len();
    items.retain(|item| item.status != ItemStatus::Dismissed);
    before - items.len()
}

pub fn ensure_unique_ids(items: &[CountdownItemData]) -> DomainResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(DomainError::Conflict(format!("duplicate item id: {}", item.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn launch() -> CountdownItemData {
        CountdownItemData::new(
            "1".to_string(),
            "Launch".to_string(),
            1_700_000_000_000,
            "rgba(43, 45, 66, 0.8)".to_string(),
        )
    }

    #[test]
    fn test_item_creation() {
        let item = launch();
        assert_eq!(item.id(), "1");
        assert_eq!(item.name, "Launch");
        assert_eq!(item.status, ItemStatus::Active);
        assert_eq!(item.target_datetime().unwrap().timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(launch()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "name": "Launch",
                "targetDate": 1_700_000_000_000_i64,
                "bgColor": "rgba(43, 45, 66, 0.8)",
                "status": "active"
            })
        );
    }

    #[test]
    fn test_unknown_status_rejected() {
        let json = r#"{"id":"1","name":"x","targetDate":0,"bgColor":"red","status":"paused"}"#;
        assert!(serde_json::from_str::<CountdownItemData>(json).is_err());
        assert!("paused".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn test_status_strings() {
        for status in [ItemStatus::Active, ItemStatus::Expired, ItemStatus::Dismissed] {
            assert_eq!(status.as_str().parse::<ItemStatus>().unwrap(), status);
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn test_status_independent_of_other_fields() {
        let active = launch();
        let mut expired = launch();
        expired.status = ItemStatus::Expired;
        let mut dismissed = launch();
        dismissed.status = ItemStatus::Dismissed;

        assert_ne!(active, expired);
        assert_ne!(expired, dismissed);
        assert_ne!(active, dismissed);
        assert_eq!(active.name, dismissed.name);
        assert_eq!(active.target_date, expired.target_date);
    }

    #[test]
    fn test_refresh_expires_only_due_items() {
        let mut item = launch();
        assert!(!item.refresh(item.target_date - 1));
        assert_eq!(item.status, ItemStatus::Active);

        assert!(item.refresh(item.target_date));
        assert_eq!(item.status, ItemStatus::Expired);

        // Moving the target forward does not revive it
        item.target_date += HOUR_MS;
        assert!(!item.refresh(item.target_date - HOUR_MS * 2));
        assert_eq!(item.status, ItemStatus::Expired);
    }

    #[test]
    fn test_dismiss() {
        let mut item = launch();
        assert!(matches!(item.dismiss(), Err(DomainError::Conflict(_))));

        item.refresh(item.target_date + 1);
        item.dismiss().unwrap();
        assert_eq!(item.status, ItemStatus::Dismissed);

        // Idempotent
        item.dismiss().unwrap();
        assert_eq!(item.status, ItemStatus::Dismissed);
    }

    #[test]
    fn test_remaining() {
        let item = launch();
        let now = item.target_date - (2 * 24 * HOUR_MS + 3 * HOUR_MS + 4 * 60_000 + 5_500);
        assert_eq!(
            item.remaining(now),
            Some(Remaining { days: 2, hours: 3, minutes: 4, seconds: 5 })
        );
        assert_eq!(item.remaining(item.target_date), None);
    }

    #[test]
    fn test_remaining_far_future_does_not_overflow() {
        let mut item = launch();
        item.target_date = i64::MAX;
        let left = item.remaining(-1).expect("target is in the future");
        assert!(left.days > 0);
        assert!((0..24).contains(&left.hours));
    }

    #[test]
    fn test_list_helpers() {
        let mut items = vec![launch(), launch(), launch()];
        items[1].id = "2".to_string();
        items[1].target_date += HOUR_MS;
        items[2].id = "3".to_string();
        items[2].status = ItemStatus::Dismissed;

        let now = items[0].target_date;
        assert_eq!(refresh_all(&mut items, now), 1);
        assert_eq!(items[0].status, ItemStatus::Expired);
        assert_eq!(items[1].status, ItemStatus::Active);

        assert_eq!(purge_dismissed(&mut items), 1);
        assert_eq!(items.len(), 2);
        assert!(ensure_unique_ids(&items).is_ok());

        items.push(launch());
        assert!(matches!(ensure_unique_ids(&items), Err(DomainError::Conflict(_))));
    }
}
