mod common;

use chrono::{TimeZone, Utc};
use common::{
    base_time, draft, new_store, persisted, slot_bytes, soc_draft, store_over, SteppingClock,
    SwitchableStore,
};
use portfolio_core::{
    Durability, KeyValueStore, MemoryRenderer, PortfolioConfig, ProjectPatch, ProjectRecord,
    ProjectRecordStore, StoreError,
};
use std::collections::HashSet;

#[test]
fn add_then_remove_round_trip_updates_slot_and_view() {
    let mut store = new_store();
    store.add(draft("Existing", "tools")).unwrap();
    let before_len = persisted(&store).len();

    let outcome = store.add(soc_draft()).unwrap();
    assert!(outcome.is_persisted());
    let record = outcome.value;
    assert!(record.is_admin_added);
    assert_eq!(record.technologies, vec!["Wazuh", "ELK"]);
    assert_eq!(record.features, vec!["Alerting"]);
    assert_eq!(persisted(&store).len(), before_len + 1);
    assert!(store.renderer().has_card(record.id));

    let removed = store.remove(record.id).unwrap();
    assert!(removed.is_persisted());
    assert_eq!(removed.value, record);
    assert_eq!(persisted(&store).len(), before_len);
    assert!(!store.renderer().has_card(record.id));
}

#[test]
fn ids_are_unique_and_increasing_even_when_clock_goes_backwards() {
    let clock = SteppingClock::starting_at(base_time());
    let mut store = ProjectRecordStore::with_clock(
        SwitchableStore::default(),
        MemoryRenderer::new(),
        PortfolioConfig::default(),
        clock.clone(),
    );

    let mut previous_max = i64::MIN;
    let mut seen = HashSet::new();
    for index in 0..5 {
        if index == 3 {
            clock.set(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        }
        let record = store.add(draft(&format!("p{index}"), "research")).unwrap().value;
        assert!(record.id > previous_max);
        assert!(seen.insert(record.id));
        previous_max = record.id;
    }
}

#[test]
fn add_then_remove_restores_previous_list() {
    let mut store = new_store();
    store.add(draft("one", "soc")).unwrap();
    store.add(draft("two", "forensics")).unwrap();
    let before = store.records().to_vec();
    let before_slot = persisted(&store);

    let id = store.add(draft("three", "tools")).unwrap().value.id;
    store.remove(id).unwrap();

    assert_eq!(store.records(), before.as_slice());
    assert_eq!(persisted(&store), before_slot);
}

#[test]
fn export_matches_in_memory_list_after_every_mutation() {
    let mut store = new_store();
    let first = store.add(soc_draft()).unwrap().value.id;
    let check = |store: &common::TestStore| {
        let export = store.export().unwrap();
        assert_eq!(export.parse_records().unwrap(), store.records());
        assert_eq!(persisted(store), store.records());
    };
    check(&store);

    let second = store.add(draft("Memory Triage", "forensics")).unwrap().value.id;
    check(&store);

    store
        .update(
            first,
            &ProjectPatch {
                description: Some("rebuilt".to_string()),
                ..ProjectPatch::default()
            },
        )
        .unwrap();
    check(&store);

    store.remove(second).unwrap();
    check(&store);
}

#[test]
fn export_is_pretty_printed_and_named_by_date() {
    let mut store = new_store();
    store.add(soc_draft()).unwrap();
    let export = store.export().unwrap();

    assert!(export.file_name.starts_with("cybersecurity-projects-2026-10-19"));
    assert!(export.file_name.ends_with(".json"));
    assert!(export.contents.contains("\n  {\n    \"id\""));
    assert!(export.contents.contains("\"createdDate\": \"Oct 2026\""));
}

#[test]
fn update_unknown_id_changes_nothing() {
    let mut store = new_store();
    store.add(soc_draft()).unwrap();
    let list_before = store.records().to_vec();
    let slot_before = slot_bytes(&store);

    let err = store
        .update(
            12345,
            &ProjectPatch {
                title: Some("ghost".to_string()),
                ..ProjectPatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound(12345)));
    assert_eq!(store.records(), list_before.as_slice());
    assert_eq!(slot_bytes(&store), slot_before);
    assert_eq!(store.renderer().refresh_count(), 0);
}

#[test]
fn remove_unknown_id_reports_not_found() {
    let mut store = new_store();
    store.add(soc_draft()).unwrap();
    let slot_before = slot_bytes(&store);

    assert!(matches!(store.remove(99), Err(StoreError::NotFound(99))));
    assert_eq!(store.len(), 1);
    assert_eq!(slot_bytes(&store), slot_before);
}

#[test]
fn update_overwrites_only_supplied_fields_and_refreshes_in_place() {
    let mut store = new_store();
    let original = store.add(soc_draft()).unwrap().value;
    store.add(draft("Second", "tools")).unwrap();

    let updated = store
        .update(
            original.id,
            &ProjectPatch {
                title: Some("SOC Build v2".to_string()),
                technologies: Some(vec!["Splunk".to_string()]),
                ..ProjectPatch::default()
            },
        )
        .unwrap()
        .value;

    assert_eq!(updated.title, "SOC Build v2");
    assert_eq!(updated.technologies, vec!["Splunk"]);
    assert_eq!(updated.description, original.description);
    assert_eq!(updated.features, original.features);
    assert_eq!(updated.created_date, original.created_date);

    // Position in the list and in the view is unchanged.
    assert_eq!(store.records()[0].id, original.id);
    let cards = store.renderer().cards();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].id, original.id);
    assert_eq!(cards[0].title, "SOC Build v2");
    assert_eq!(cards[0].tech_tags, vec!["Splunk"]);
    assert_eq!(store.renderer().refresh_count(), 1);
    assert_eq!(persisted(&store)[0], updated);
}

#[test]
fn persistence_failure_is_soft_and_memory_still_changes() {
    let storage = SwitchableStore::default();
    let fail = storage.failure_switch();
    let mut store = store_over(storage);
    store.add(draft("kept", "soc")).unwrap();
    let slot_before = slot_bytes(&store);

    fail.set(true);
    let outcome = store.add(soc_draft()).unwrap();
    assert!(!outcome.is_persisted());
    assert!(matches!(
        outcome.durability,
        Durability::PersistFailed(StoreError::PersistenceFailure(_))
    ));
    assert_eq!(store.len(), 2);
    assert!(store.renderer().has_card(outcome.value.id));
    assert_eq!(slot_bytes(&store), slot_before);

    fail.set(false);
    let removed = store.remove(outcome.value.id).unwrap();
    assert!(removed.warning().is_none());
    assert_eq!(persisted(&store), store.records());
}

#[test]
fn update_keeps_patch_and_refreshed_card_when_write_fails() {
    let storage = SwitchableStore::default();
    let fail = storage.failure_switch();
    let mut store = store_over(storage);
    let id = store.add(soc_draft()).unwrap().value.id;
    let slot_before = slot_bytes(&store);

    fail.set(true);
    let outcome = store
        .update(
            id,
            &ProjectPatch {
                title: Some("SOC Build v2".to_string()),
                ..ProjectPatch::default()
            },
        )
        .unwrap();

    assert!(matches!(
        outcome.durability,
        Durability::PersistFailed(StoreError::PersistenceFailure(_))
    ));
    assert_eq!(store.get(id).unwrap().title, "SOC Build v2");
    assert_eq!(store.renderer().card(id).unwrap().title, "SOC Build v2");
    assert_eq!(store.renderer().refresh_count(), 1);
    assert_eq!(slot_bytes(&store), slot_before);
}

#[test]
fn remove_drops_record_and_card_when_write_fails() {
    let storage = SwitchableStore::default();
    let fail = storage.failure_switch();
    let mut store = store_over(storage);
    let id = store.add(soc_draft()).unwrap().value.id;
    let slot_before = slot_bytes(&store);

    fail.set(true);
    let outcome = store.remove(id).unwrap();

    assert!(!outcome.is_persisted());
    assert!(store.get(id).is_none());
    assert!(!store.renderer().has_card(id));
    // The slot still lists the removed record until the next good write.
    assert_eq!(slot_bytes(&store), slot_before);
    assert_eq!(persisted(&store)[0].id, id);
}

#[test]
fn initialize_falls_back_to_empty_when_slot_read_fails() {
    let mut store = new_store();
    store.add(soc_draft()).unwrap();
    let (storage, _) = store.into_parts();
    let fail_reads = storage.read_failure_switch();

    fail_reads.set(true);
    let mut reloaded = store_over(storage);
    let report = reloaded.initialize();

    assert_eq!(report.loaded, 0);
    assert!(matches!(report.warning, Some(StoreError::HydrationFailure(_))));
    assert!(reloaded.is_empty());
    assert!(reloaded.renderer().cards().is_empty());
}

#[test]
fn add_fails_instead_of_reusing_the_largest_id() {
    let payload = format!(
        r#"[{{"id":{},"title":"Edge","category":"tools","description":"d","technologies":[],"features":[],"icon":"fas fa-cog","createdDate":"Jan 2026","isAdminAdded":true}}]"#,
        i64::MAX
    );
    let mut storage = SwitchableStore::default();
    storage
        .set(&PortfolioConfig::default().storage_key, payload.as_bytes())
        .unwrap();

    let mut store = store_over(storage);
    assert_eq!(store.initialize().loaded, 1);
    let slot_before = slot_bytes(&store);

    let err = store.add(soc_draft()).unwrap_err();

    assert!(matches!(
        err,
        StoreError::IdSpaceExhausted { max_id: i64::MAX }
    ));
    let ids: Vec<i64> = store.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![i64::MAX]);
    assert_eq!(store.renderer().cards().len(), 1);
    assert_eq!(slot_bytes(&store), slot_before);
}

#[test]
fn initialize_rehydrates_saved_records_and_renders_cards() {
    let mut store = new_store();
    store.add(soc_draft()).unwrap();
    store.add(draft("Playbooks", "automation")).unwrap();
    let saved = store.records().to_vec();
    let (storage, _) = store.into_parts();

    let mut reloaded = store_over(storage);
    let report = reloaded.initialize();
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 0);
    assert!(report.warning.is_none());
    assert_eq!(reloaded.records(), saved.as_slice());
    let card_ids: Vec<i64> = reloaded.renderer().cards().iter().map(|c| c.id).collect();
    assert_eq!(card_ids, saved.iter().map(|r| r.id).collect::<Vec<_>>());

    // New ids keep increasing past the hydrated ones.
    let next = reloaded.add(draft("Later", "tools")).unwrap().value;
    assert!(saved.iter().all(|record| record.id < next.id));
}

#[test]
fn initialize_with_corrupted_payload_starts_empty() {
    let mut storage = SwitchableStore::default();
    let key = PortfolioConfig::default().storage_key;
    storage.set(&key, b"{not json").unwrap();

    let mut store = store_over(storage);
    let report = store.initialize();

    assert_eq!(report.loaded, 0);
    assert!(matches!(report.warning, Some(StoreError::HydrationFailure(_))));
    assert!(store.is_empty());
    assert!(store.renderer().cards().is_empty());
}

#[test]
fn initialize_with_empty_slot_is_silent() {
    let mut store = new_store();
    let report = store.initialize();
    assert_eq!(report.loaded, 0);
    assert!(report.warning.is_none());
}

#[test]
fn initialize_skips_static_cards_and_duplicate_ids() {
    let record = |id: i64, admin: bool| ProjectRecord {
        id,
        title: format!("p{id}"),
        category: "soc".to_string(),
        description: "d".to_string(),
        technologies: Vec::new(),
        features: Vec::new(),
        icon: "fas fa-shield-alt".to_string(),
        created_date: "Jan 2026".to_string(),
        is_admin_added: admin,
    };
    let payload = serde_json::to_vec(&vec![
        record(1, true),
        record(2, false),
        record(1, true),
        record(3, true),
    ])
    .unwrap();
    let mut storage = SwitchableStore::default();
    storage
        .set(&PortfolioConfig::default().storage_key, &payload)
        .unwrap();

    let mut store = store_over(storage);
    let report = store.initialize();

    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 2);
    let ids: Vec<i64> = store.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn initialize_accepts_legacy_date_field() {
    let payload = br#"[{"id":7,"title":"Old","category":"tools","description":"d","technologies":["Go"],"features":[],"icon":"fas fa-cog","date":"Feb 2024","isAdminAdded":true}]"#;
    let mut storage = SwitchableStore::default();
    storage
        .set(&PortfolioConfig::default().storage_key, payload)
        .unwrap();

    let mut store = store_over(storage);
    store.initialize();
    assert_eq!(store.get(7).unwrap().created_date, "Feb 2024");
}

#[test]
fn reinitialize_replaces_cards_instead_of_duplicating() {
    let mut store = new_store();
    store.add(soc_draft()).unwrap();
    store.initialize();
    store.initialize();
    assert_eq!(store.len(), 1);
    assert_eq!(store.renderer().cards().len(), 1);
}

#[test]
fn delayed_removal_fades_then_removes() {
    let mut store = new_store();
    let id = store.add(soc_draft()).unwrap().value.id;

    let pending = store.begin_removal(id).unwrap();
    assert!(store.renderer().is_fading(id));
    assert!(store.get(id).is_some());

    let outcome = store.finish_removal(pending).expect("record still present");
    assert_eq!(outcome.value.id, id);
    assert!(store.is_empty());
    assert!(!store.renderer().has_card(id));
}

#[test]
fn stale_delayed_removal_is_a_no_op() {
    let mut store = new_store();
    let id = store.add(soc_draft()).unwrap().value.id;
    let other = store.add(draft("Other", "tools")).unwrap().value.id;

    let pending = store.begin_removal(id).unwrap();
    store.remove(id).unwrap();
    let slot_before = slot_bytes(&store);

    assert!(store.finish_removal(pending).is_none());
    assert_eq!(store.len(), 1);
    assert!(store.get(other).is_some());
    assert_eq!(slot_bytes(&store), slot_before);
}

#[test]
fn blank_icon_uses_configured_default() {
    let config = PortfolioConfig {
        default_icon: "fas fa-code".to_string(),
        ..PortfolioConfig::default()
    };
    let mut store = ProjectRecordStore::with_clock(
        SwitchableStore::default(),
        MemoryRenderer::new(),
        config,
        SteppingClock::starting_at(base_time()),
    );
    let mut candidate = soc_draft();
    candidate.icon = Some("  ".to_string());
    assert_eq!(store.add(candidate).unwrap().value.icon, "fas fa-code");
}

#[test]
fn custom_storage_key_is_used_for_the_slot() {
    let config = PortfolioConfig {
        storage_key: "my-projects".to_string(),
        ..PortfolioConfig::default()
    };
    let mut store = ProjectRecordStore::with_clock(
        SwitchableStore::default(),
        MemoryRenderer::new(),
        config,
        SteppingClock::starting_at(base_time()),
    );
    store.add(soc_draft()).unwrap();
    assert!(store.storage().get("my-projects").unwrap().is_some());
    assert!(store
        .storage()
        .get(&PortfolioConfig::default().storage_key)
        .unwrap()
        .is_none());
}
