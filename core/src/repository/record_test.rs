#[cfg(test)]
mod tests {
    use crate::model::record::{Attendance, AttendanceKind};
    use crate::model::stats::{LicenseEntry, MonthStats};
    use crate::repository::{
        FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, RecordStore, DEFAULT_STORE_KEY,
    };
    use chrono::{Local, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn memory_store() -> RecordStore<MemoryKeyValueStore> {
        RecordStore::open(MemoryKeyValueStore::new()).unwrap()
    }

    #[test]
    fn test_set_then_get() {
        let store = memory_store();
        let d = date(2024, 2, 5);

        let written = store.set(d, Attendance::Office).unwrap();
        let read = store.get(d).unwrap().unwrap();

        assert_eq!(read.kind(), AttendanceKind::Office);
        assert_eq!(read.timestamp, written.timestamp);
    }

    #[test]
    fn test_set_overwrites() {
        let store = memory_store();
        let d = date(2024, 2, 5);

        store.set(d, Attendance::Office).unwrap();
        store.set(d, Attendance::Remote).unwrap();

        assert_eq!(store.get(d).unwrap().unwrap().kind(), AttendanceKind::Remote);
        assert_eq!(store.document().unwrap().records.len(), 1);
    }

    #[test]
    fn test_delete_reports_existence() {
        let store = memory_store();
        let d = date(2024, 2, 5);
        store.set(d, Attendance::Office).unwrap();

        assert!(store.delete(d).unwrap());
        assert!(!store.delete(d).unwrap());
        assert_eq!(store.get(d).unwrap(), None);
    }

    #[test]
    fn test_store_accepts_weekend_dates() {
        let store = memory_store();
        let saturday = date(2024, 2, 3);
        store.set(saturday, Attendance::Office).unwrap();
        assert!(store.get(saturday).unwrap().is_some());
    }

    #[test]
    fn test_month_records_spanning_months() {
        let store = memory_store();
        store.set(date(2024, 1, 31), Attendance::Office).unwrap();
        store.set(date(2024, 2, 1), Attendance::Remote).unwrap();
        store.set(date(2024, 2, 29), Attendance::Office).unwrap();
        store.set(date(2024, 3, 1), Attendance::Office).unwrap();
        store.set(date(2023, 2, 15), Attendance::Office).unwrap();

        let records = store.month_records(2024, 2).unwrap();
        let dates: Vec<_> = records.keys().copied().collect();
        assert_eq!(dates, vec![date(2024, 2, 1), date(2024, 2, 29)]);

        assert!(store.month_records(2024, 13).unwrap().is_empty());
    }

    #[test]
    fn test_month_stats() {
        let store = memory_store();
        store.set(date(2024, 2, 1), Attendance::Office).unwrap();
        store.set(date(2024, 2, 2), Attendance::Office).unwrap();
        store.set(date(2024, 2, 5), Attendance::Remote).unwrap();
        store
            .set(date(2024, 2, 6), Attendance::license(Some("Medical".to_string())))
            .unwrap();
        store.set(date(2024, 3, 1), Attendance::Remote).unwrap();

        assert_eq!(
            store.month_stats(2024, 2).unwrap(),
            MonthStats {
                office_days: 2,
                remote_days: 1,
                license_days: 1,
                total_registered: 3,
            }
        );
        assert_eq!(store.month_stats(2024, 4).unwrap(), MonthStats::default());
    }

    #[test]
    fn test_month_licenses_sorted() {
        let store = memory_store();
        store
            .set(date(2024, 2, 20), Attendance::license(Some("Vacation".to_string())))
            .unwrap();
        store.set(date(2024, 2, 7), Attendance::license(None)).unwrap();
        store.set(date(2024, 2, 8), Attendance::Office).unwrap();

        assert_eq!(
            store.month_licenses(2024, 2).unwrap(),
            vec![
                LicenseEntry {
                    date: date(2024, 2, 7),
                    category: "Other".to_string(),
                },
                LicenseEntry {
                    date: date(2024, 2, 20),
                    category: "Vacation".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_open_persists_default_document() {
        let store = memory_store();
        let first = store.settings().unwrap();
        let second = store.settings().unwrap();
        assert_eq!(first.user_id, second.user_id);
        assert_eq!(first.target_percentage, 0.60);
    }

    #[test]
    fn test_malformed_document_self_heals() {
        let kv = MemoryKeyValueStore::with_entry(DEFAULT_STORE_KEY, "{not json");
        let store = RecordStore::open(kv).unwrap();

        let doc = store.document().unwrap();
        assert!(doc.records.is_empty());

        let d = date(2024, 2, 5);
        store.set(d, Attendance::Remote).unwrap();
        assert_eq!(store.get(d).unwrap().unwrap().kind(), AttendanceKind::Remote);
    }

    #[test]
    fn test_unknown_record_keeps_the_rest() {
        let raw = r#"{
            "records": {
                "2024-02-05": { "type": "office", "timestamp": "2024-02-05T08:00:00.000Z" },
                "2024-02-06": { "type": "office", "timestamp": "2024-02-06T08:00:00.000Z" },
                "2024-02-07": { "type": "holiday", "timestamp": "2024-02-07T08:00:00.000Z" }
            },
            "settings": { "targetPercentage": 0.6, "userId": "user_keepme" },
            "createdAt": "2024-02-01T08:00:00.000Z"
        }"#;
        let kv = MemoryKeyValueStore::with_entry(DEFAULT_STORE_KEY, raw);
        let store = RecordStore::open(kv).unwrap();

        assert_eq!(store.month_stats(2024, 2).unwrap().office_days, 2);

        store.set(date(2024, 2, 8), Attendance::Remote).unwrap();

        let doc = store.document().unwrap();
        assert_eq!(doc.records.len(), 3);
        assert_eq!(doc.settings.user_id, "user_keepme");
        assert_eq!(store.get(date(2024, 2, 7)).unwrap(), None);
    }

    #[test]
    fn test_today_record() {
        let store = memory_store();
        let today = Local::now().date_naive();
        assert_eq!(store.today_record().unwrap(), None);

        let written = store.set(today, Attendance::Remote).unwrap();
        assert_eq!(store.today_record().unwrap(), Some(written));
    }

    #[test]
    fn test_keeps_existing_document_on_open() {
        let raw = r#"{
            "records": { "2024-02-05": { "type": "office", "timestamp": "2024-02-05T08:00:00.000Z" } },
            "settings": { "targetPercentage": 0.6, "userId": "user_k3j4h5g6f" },
            "createdAt": "2024-02-01T08:00:00.000Z"
        }"#;
        let kv = MemoryKeyValueStore::with_entry(DEFAULT_STORE_KEY, raw);
        let store = RecordStore::open(kv).unwrap();

        assert_eq!(store.settings().unwrap().user_id, "user_k3j4h5g6f");
        assert!(store.get(date(2024, 2, 5)).unwrap().is_some());
    }

    #[test]
    fn test_file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let d = date(2024, 2, 5);
        {
            let kv = FileKeyValueStore::new(Some(dir.path().to_path_buf())).unwrap();
            let store = RecordStore::open(kv).unwrap();
            store.set(d, Attendance::Office).unwrap();
        }

        let kv = FileKeyValueStore::new(Some(dir.path().to_path_buf())).unwrap();
        let raw = kv.get(DEFAULT_STORE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"2024-02-05\""));

        let store = RecordStore::open(kv).unwrap();
        assert_eq!(store.get(d).unwrap().unwrap().kind(), AttendanceKind::Office);
    }
}
