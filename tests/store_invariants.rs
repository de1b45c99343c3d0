//! Record Store Invariant Tests
//!
//! The same lifecycle properties are checked against every backend:
//! - create assigns a fresh unique id and a current timestamp
//! - invalid creates persist nothing
//! - updates of unknown ids change nothing
//! - partial updates preserve every other field
//! - delete is not idempotent

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tempfile::TempDir;

use schemes::scheme::{SchemeDraft, SchemeId, SchemePatch};
use schemes::store::{
    self, FileSchemeStore, MemorySchemeStore, SchemeStore, SharedStore, StoreError,
};

// =============================================================================
// Helper Functions
// =============================================================================

/// One store per backend. The TempDir must outlive the file store.
fn backends() -> (TempDir, Vec<SharedStore>) {
    let tmp = TempDir::new().unwrap();
    let file = FileSchemeStore::open(tmp.path().join("schemes.json")).unwrap();
    let stores: Vec<SharedStore> = vec![Arc::new(MemorySchemeStore::new()), Arc::new(file)];
    (tmp, stores)
}

fn full_draft() -> SchemeDraft {
    SchemeDraft {
        image_link: Some("https://example.org/a.png".to_string()),
        pdf_link: Some("https://example.org/a.pdf".to_string()),
        income: Some(300000.into()),
        state: Some("NY".to_string()),
        age: Some(18.into()),
        eligibility: json!({"student": true, "maxIncome": 300000}).as_object().cloned(),
        benefits: Some(vec!["tuition".to_string(), "books".to_string()]),
        ..SchemeDraft::new("Scholarship", "For students")
    }
}

// =============================================================================
// Create
// =============================================================================

#[test]
fn test_create_assigns_fresh_id_and_timestamp() {
    let (_tmp, stores) = backends();

    for store in stores {
        let before = Utc::now();
        let a = store.create(SchemeDraft::new("A", "first")).unwrap();
        let b = store.create(SchemeDraft::new("A", "first")).unwrap();

        assert_ne!(a.id, b.id, "{} backend reused an id", store.backend());
        assert!(a.last_updated >= before);
        assert!(b.last_updated >= a.last_updated);
    }
}

#[test]
fn test_invalid_create_persists_nothing() {
    let (_tmp, stores) = backends();

    for store in stores {
        let drafts = [
            SchemeDraft::default(),
            SchemeDraft {
                title: Some("Only title".to_string()),
                ..Default::default()
            },
            SchemeDraft {
                description: Some("Only description".to_string()),
                ..Default::default()
            },
            SchemeDraft::new("", "blank title"),
        ];

        for draft in drafts {
            let err = store.create(draft).unwrap_err();
            assert!(err.is_validation());
        }
        assert!(store.list().unwrap().is_empty());
    }
}

// =============================================================================
// Update
// =============================================================================

#[test]
fn test_update_unknown_id_changes_nothing() {
    let (_tmp, stores) = backends();

    for store in stores {
        store.create(full_draft()).unwrap();
        let before = store.list().unwrap();

        let err = store
            .update_by_id(&SchemeId::new(), &SchemePatch::new().set("state", "CA"))
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.list().unwrap(), before);
    }
}

/// Create R, update only `state`, read back: every other field identical.
#[test]
fn test_partial_update_preserves_other_fields() {
    let (_tmp, stores) = backends();

    for store in stores {
        let original = store.create(full_draft()).unwrap();

        store
            .update_by_id(&original.id, &SchemePatch::new().set("state", "CA"))
            .unwrap();
        let fetched = store.get_by_id(&original.id).unwrap();

        assert_eq!(fetched.state.as_deref(), Some("CA"));
        let mut expected = original.clone();
        expected.state = Some("CA".to_string());
        assert_eq!(fetched, expected);
    }
}

#[test]
fn test_update_does_not_refresh_timestamp() {
    let (_tmp, stores) = backends();

    for store in stores {
        let original = store.create(SchemeDraft::new("A", "first")).unwrap();
        let updated = store
            .update_by_id(&original.id, &SchemePatch::new().set("description", "changed"))
            .unwrap();

        assert_eq!(updated.last_updated, original.last_updated);
        assert_eq!(updated.id, original.id);
    }
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_is_not_idempotent() {
    let (_tmp, stores) = backends();

    for store in stores {
        let keep = store.create(SchemeDraft::new("Keep", "stays")).unwrap();
        let gone = store.create(SchemeDraft::new("Gone", "goes")).unwrap();

        assert_eq!(store.delete_by_id(&gone.id).unwrap(), gone);
        assert!(store.delete_by_id(&gone.id).unwrap_err().is_not_found());
        assert!(store.get_by_id(&gone.id).unwrap_err().is_not_found());

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![keep.id]);
    }
}

// =============================================================================
// Opening
// =============================================================================

#[test]
fn test_open_by_uri_round_trips_through_disk() {
    let tmp = TempDir::new().unwrap();
    let uri = tmp.path().join("data").join("schemes.json");
    let uri = uri.to_str().unwrap();

    let created = {
        let store = store::open(uri).unwrap();
        store.create(full_draft()).unwrap()
    };

    let reopened = store::open(uri).unwrap();
    assert_eq!(reopened.list().unwrap(), vec![created]);
}
