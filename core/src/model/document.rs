use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::analytics::TARGET_PERCENTAGE;
use crate::model::record::DayRecord;
use crate::model::stats::MonthRecordSet;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub target_percentage: f64,
    pub user_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_percentage: TARGET_PERCENTAGE,
            user_id: format!("user_{}", Uuid::new_v4().simple()),
        }
    }
}

/// The single persisted document holding everything one user has registered.
///
/// Records are read one by one: an entry with an unknown type or a bad date
/// key is skipped instead of failing the whole document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDocument {
    #[serde(default, deserialize_with = "readable_records")]
    pub records: MonthRecordSet,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn readable_records<'de, D>(deserializer: D) -> Result<MonthRecordSet, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| {
            let date = NaiveDate::parse_from_str(&key, "%Y-%m-%d");
            let record = serde_json::from_value::<DayRecord>(value);
            match (date, record) {
                (Ok(date), Ok(record)) => Some((date, record)),
                (Err(e), _) => {
                    warn!("skipping record with bad date key '{}': {}", key, e);
                    None
                }
                (_, Err(e)) => {
                    warn!("skipping unreadable record '{}': {}", key, e);
                    None
                }
            }
        })
        .collect())
}

impl Default for AttendanceDocument {
    fn default() -> Self {
        Self {
            records: MonthRecordSet::new(),
            settings: Settings::default(),
            created_at: Utc::now(),
        }
    }
}

impl AttendanceDocument {
    pub fn records_between(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> impl Iterator<Item = (&NaiveDate, &DayRecord)> {
        self.records.range(first..=last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Attendance;
    use serde_json::json;

    #[test]
    fn test_default_document() {
        let doc = AttendanceDocument::default();
        assert!(doc.records.is_empty());
        assert_eq!(doc.settings.target_percentage, 0.60);
        assert!(doc.settings.user_id.starts_with("user_"));
        assert_ne!(doc.settings.user_id, Settings::default().user_id);
    }

    #[test]
    fn test_parses_persisted_shape() {
        let raw = json!({
            "records": {
                "2024-02-05": { "type": "office", "timestamp": "2024-02-05T08:00:00.000Z" },
                "2024-02-06": { "type": "license", "timestamp": "2024-02-06T08:00:00.000Z", "licenseType": "Medical" }
            },
            "settings": { "targetPercentage": 0.6, "userId": "user_abc123xyz" },
            "createdAt": "2024-01-31T10:00:00.000Z"
        });
        let doc: AttendanceDocument = serde_json::from_value(raw).unwrap();
        assert_eq!(doc.records.len(), 2);
        assert_eq!(doc.settings.user_id, "user_abc123xyz");

        let date = NaiveDate::from_ymd_opt(2024, 2, 6).unwrap();
        let license = doc.records.get(&date).unwrap();
        assert_eq!(license.attendance.license_category(), Some("Medical"));
    }

    #[test]
    fn test_skips_unreadable_records() {
        let raw = json!({
            "records": {
                "2024-02-05": { "type": "office", "timestamp": "2024-02-05T08:00:00.000Z" },
                "2024-02-06": { "type": "holiday", "timestamp": "2024-02-06T08:00:00.000Z" },
                "someday": { "type": "remote", "timestamp": "2024-02-07T08:00:00.000Z" }
            },
            "settings": { "targetPercentage": 0.6, "userId": "user_abc123xyz" },
            "createdAt": "2024-01-31T10:00:00.000Z"
        });
        let doc: AttendanceDocument = serde_json::from_value(raw).unwrap();
        let dates: Vec<_> = doc.records.keys().copied().collect();
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()]);
        assert_eq!(doc.settings.user_id, "user_abc123xyz");
    }

    #[test]
    fn test_missing_sections_default() {
        let doc: AttendanceDocument = serde_json::from_value(json!({})).unwrap();
        assert!(doc.records.is_empty());
        assert!(doc.settings.user_id.starts_with("user_"));
    }

    #[test]
    fn test_serializes_date_keys() {
        let mut doc = AttendanceDocument::default();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        doc.records.insert(date, DayRecord::new(Attendance::Remote));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["records"]["2024-03-01"]["type"], "remote");
        assert!(value["settings"]["targetPercentage"].is_number());
        assert!(value["createdAt"].is_string());
    }
}
