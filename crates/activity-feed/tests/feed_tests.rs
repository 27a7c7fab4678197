#[cfg(test)]
pub mod tests {
    use activity_feed::{
        render_entry, ActivityFeed, Category, EntryId, FeedError, FileLogSource, LoadState,
        LogSource, NavTarget, RawLogRecord, TypeSelection,
    };
    use std::path::PathBuf;

    fn fixture() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/logs.json")
    }

    fn records(count: i64) -> Vec<RawLogRecord> {
        (0..count)
            .map(|i| RawLogRecord {
                id: EntryId::Int(i),
                kind: (i % 14) as u32,
                description: format!("entry number {}", i),
                object: if i % 2 == 0 {
                    "Even".to_string()
                } else {
                    "Odd".to_string()
                },
                issue_id: Some(EntryId::Int(1000 + i)),
                date: format!("2021-06-01 09:{:02}:00", i % 60),
            })
            .collect()
    }

    fn loaded(records: Vec<RawLogRecord>) -> ActivityFeed {
        let mut feed = ActivityFeed::default();
        let ticket = feed.begin_load();
        assert!(feed.finish_load(ticket, Ok(records)));
        feed
    }

    fn window_ids(feed: &ActivityFeed) -> Vec<EntryId> {
        feed.window_entries().map(|entry| entry.id.clone()).collect()
    }

    #[test]
    fn test_first_page_then_infinite_scroll() {
        let mut feed = loaded(records(45));
        assert_eq!(feed.shown(), 30);
        assert!(feed.has_more());

        // most recent first
        assert_eq!(feed.window_entries().next().unwrap().id, EntryId::Int(44));

        // far from the bottom
        assert!(!feed.on_scroll(30, 10));
        assert_eq!(feed.shown(), 30);

        assert!(feed.on_scroll(12, 10));
        assert_eq!(feed.shown(), 45);
        assert!(!feed.has_more());
        assert!(!feed.scroll_to_bottom());
    }

    #[test]
    fn test_search_is_case_insensitive_and_resets_window() {
        let mut feed = loaded(records(45));
        feed.scroll_to_bottom();

        feed.set_search("EVEN");
        assert_eq!(feed.view_len(), 23);
        assert_eq!(feed.shown(), 23);
        assert!(feed
            .window_entries()
            .all(|entry| entry.object == "Even"));

        feed.set_search("");
        assert_eq!(feed.view_len(), 45);
        assert_eq!(feed.shown(), 30);
    }

    #[test]
    fn test_search_and_type_filters_combine() {
        let mut feed = loaded(records(45));

        feed.set_search("odd");
        feed.set_type_filter(TypeSelection::Only(Category::IssueUpdated));

        let ids = window_ids(&feed);
        // codes 1 at 1, 15, 29, 43 and all of them odd
        assert_eq!(
            ids,
            vec![
                EntryId::Int(43),
                EntryId::Int(29),
                EntryId::Int(15),
                EntryId::Int(1)
            ]
        );
        assert!(feed.filters_active());

        // back to "All logs" keeps the search
        feed.set_type_filter(TypeSelection::All);
        assert_eq!(feed.view_len(), 22);
        assert!(feed.window_entries().all(|entry| entry.object == "Odd"));
    }

    #[test]
    fn test_filters_set_while_loading_apply_on_arrival() {
        let mut feed = ActivityFeed::default();
        let ticket = feed.begin_load();
        feed.set_type_filter(TypeSelection::Only(Category::TeamCreated));
        assert_eq!(feed.view_len(), 0);

        feed.finish_load(ticket, Ok(records(45)));
        assert_eq!(feed.view_len(), 3);
        assert!(feed
            .window_entries()
            .all(|entry| entry.category() == Some(Category::TeamCreated)));
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut feed = ActivityFeed::default();
        let first = feed.begin_load();
        let second = feed.begin_load();

        assert!(!feed.finish_load(first, Ok(records(3))));
        assert!(feed.is_loading());

        assert!(feed.finish_load(second, Ok(records(5))));
        assert_eq!(feed.backup().len(), 5);
    }

    #[test]
    fn test_failed_load_is_reported() {
        let mut feed = ActivityFeed::default();
        let missing = FileLogSource::new("/nonexistent/activity/logs.json");
        assert!(feed.load_from(&missing));

        assert!(matches!(feed.state(), LoadState::Failed(FeedError::Io(_))));
        assert!(feed.error().is_some());
        assert_eq!(feed.shown(), 0);
        assert!(!feed.scroll_to_bottom());
    }

    #[test]
    fn test_invalidate_drops_entries() {
        let mut feed = loaded(records(10));
        let before = feed.current_ticket();
        feed.invalidate();

        assert!(feed.is_loading());
        assert!(feed.backup().is_empty());
        assert_eq!(feed.view_len(), 0);
        assert!(!feed.finish_load(before, Ok(records(4))));
    }

    #[test]
    fn test_fixture_renders_every_category() {
        let mut feed = ActivityFeed::default();
        assert!(feed.load_from(&FileLogSource::new(fixture())));
        assert_eq!(feed.view_len(), 10);

        let rendered: Vec<_> = feed
            .window_entries()
            .map(|entry| render_entry(entry).unwrap())
            .collect();

        assert_eq!(rendered[0].id, EntryId::Int(10));
        assert_eq!(rendered[0].navigation, Some(NavTarget::Members));

        let sprint = rendered
            .iter()
            .find(|entry| entry.id == EntryId::Int(9))
            .unwrap();
        assert_eq!(
            sprint.plain_text(),
            "Completed Sprint Alpha with 2 issues Login page crashes, Update onboarding docs"
        );

        let deleted = rendered
            .iter()
            .find(|entry| entry.id == EntryId::Int(6))
            .unwrap();
        assert_eq!(deleted.navigation, None);

        let notes = rendered
            .iter()
            .find(|entry| entry.id == EntryId::Int(7))
            .unwrap();
        assert_eq!(notes.object_text(), "");
        assert_eq!(notes.navigation, Some(NavTarget::Notes));
    }

    #[test]
    fn test_fixture_search_matches_sprint_object() {
        let source = FileLogSource::new(fixture());
        let records = source.fetch_logs().unwrap();
        let mut feed = loaded(records);

        feed.set_search("login");
        let mut ids = window_ids(&feed);
        ids.sort_by_key(|id| id.to_string());
        assert_eq!(
            ids,
            vec![
                EntryId::Int(3),
                EntryId::Int(4),
                EntryId::Int(6),
                EntryId::Int(8),
                EntryId::Int(9)
            ]
        );
    }

    #[test]
    fn test_unreadable_dates_do_not_fail_the_load() {
        let mut batch = records(99);
        batch.push(RawLogRecord {
            id: EntryId::Int(99),
            kind: 0,
            description: "created issue".to_string(),
            object: "Date only".to_string(),
            issue_id: None,
            date: "2021-06-01".to_string(),
        });
        batch.push(RawLogRecord {
            id: EntryId::Int(100),
            kind: 0,
            description: "created issue".to_string(),
            object: "Broken".to_string(),
            issue_id: None,
            date: "not a date".to_string(),
        });

        let feed = loaded(batch);
        assert!(matches!(feed.state(), LoadState::Ready));
        assert_eq!(feed.backup().len(), 101);
        assert_eq!(feed.shown(), 30);

        let broken = &feed.backup()[0];
        assert_eq!(broken.id, EntryId::Int(100));
        assert_eq!(broken.date, activity_feed::entry::INVALID_DATE);
        assert!(feed.backup()[1].timestamp.is_some());
    }

    #[test]
    fn test_numeric_dates_decode() {
        let json = r#"[
            {"id": 1, "type": 7, "description": "joined the team", "object": "bob", "date": 1622538000000},
            {"id": 2, "type": 8, "description": "left the team", "object": "bob", "date": "2021-06-02T10:00:00Z"}
        ]"#;
        let batch: Vec<RawLogRecord> = serde_json::from_str(json).unwrap();
        let feed = loaded(batch);

        assert_eq!(feed.view_len(), 2);
        assert!(feed.backup().iter().all(|entry| entry.timestamp.is_some()));
    }
}
