// Integration tests for the editor store.
//
// These drive `EditorStore` through realistic editing sessions and check the
// document laws: dense positions, undo/redo as exact inverses, the bounded
// history, and export/import round-trips.

use pagesmith_config::{AppConfig, PageStore};
use pagesmith_core::{EditorStore, ElementId, ElementUpdate, PageData, Props, StoreError};
use serde_json::json;

fn kinds(store: &EditorStore) -> Vec<String> {
    store
        .elements()
        .iter()
        .map(|e| e.element_type.clone())
        .collect()
}

fn positions(store: &EditorStore) -> Vec<usize> {
    store.elements().iter().map(|e| e.position).collect()
}

fn assert_dense(store: &EditorStore) {
    let expected: Vec<usize> = (0..store.elements().len()).collect();
    assert_eq!(positions(store), expected);
}

/// Small deterministic generator so the op sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

/// Applies one random structural mutation. Returns false when the chosen
/// operation was not applicable (e.g. delete on an empty page).
fn random_op(store: &mut EditorStore, rng: &mut Lcg) -> bool {
    let len = store.elements().len();
    match rng.below(5) {
        0 => {
            let at = if rng.below(2) == 0 { None } else { Some(rng.below(len + 1)) };
            store.create_element(format!("block{}", rng.below(9)), None, at).is_ok()
        }
        1 if len > 0 => {
            let id = store.elements()[rng.below(len)].id.clone();
            store.delete_element(&id).is_ok()
        }
        2 if len > 0 => {
            let id = store.elements()[rng.below(len)].id.clone();
            store.duplicate_element(&id).is_ok()
        }
        3 if len > 0 => {
            let (from, to) = (rng.below(len), rng.below(len));
            store.reorder_elements(from, to).is_ok()
        }
        4 if len > 0 => {
            let id = store.elements()[rng.below(len)].id.clone();
            store
                .update_element_prop(&id, "content.title", json!(rng.next()))
                .is_ok()
        }
        _ => false,
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn test_explicit_middle_insertion() {
    let mut store = EditorStore::new();
    store.create_element("hero1", None, None).unwrap();
    store.create_element("grid1", None, None).unwrap();
    store
        .create_element("testimonial1", Some(Props::new()), Some(1))
        .unwrap();

    assert_eq!(kinds(&store), vec!["hero1", "testimonial1", "grid1"]);
    assert_eq!(positions(&store), vec![0, 1, 2]);
}

#[test]
fn test_reorder_first_to_last() {
    let mut store = EditorStore::new();
    for k in ["A", "B", "C"] {
        store.create_element(k, None, None).unwrap();
    }
    store.reorder_elements(0, 2).unwrap();
    assert_eq!(kinds(&store), vec!["B", "C", "A"]);
    assert_eq!(positions(&store), vec![0, 1, 2]);
}

#[test]
fn test_delete_selected_middle_element() {
    let mut store = EditorStore::new();
    let ids: Vec<ElementId> = ["A", "B", "C"]
        .into_iter()
        .map(|k| store.create_element(k, None, None).unwrap())
        .collect();
    store.select_element(Some(ids[1].clone()));

    store.delete_element(&ids[1]).unwrap();
    assert_eq!(kinds(&store), vec!["A", "C"]);
    assert_eq!(positions(&store), vec![0, 1]);
    assert!(store.selected_element().is_none());
}

#[test]
fn test_undo_at_index_zero() {
    let mut store = EditorStore::new();
    assert_eq!(store.history().index(), Some(0));
    let before = store.current_page().cloned();

    assert!(!store.undo());
    assert_eq!(store.current_page().cloned(), before);
    assert_eq!(store.history().index(), Some(0));
}

#[test]
fn test_import_not_json() {
    let mut store = EditorStore::new();
    store.create_element("hero1", None, None).unwrap();
    let before = store.current_page().cloned();

    let result = store.import_page("not json");
    assert!(matches!(result, Err(StoreError::Import(_))));
    assert_eq!(store.current_page().cloned(), before);
}

// ── Laws ───────────────────────────────────────────────────────────────

#[test]
fn test_positions_stay_dense_under_random_edits() {
    let mut rng = Lcg(7);
    let mut store = EditorStore::new();
    for _ in 0..500 {
        random_op(&mut store, &mut rng);
        assert_dense(&store);
    }
}

#[test]
fn test_undo_then_redo_is_exact_inverse() {
    let mut rng = Lcg(42);
    let mut store = EditorStore::new();

    for _ in 0..200 {
        let before: PageData = store.current_page().cloned().unwrap();
        if !random_op(&mut store, &mut rng) {
            continue;
        }
        let after: PageData = store.current_page().cloned().unwrap();

        assert!(store.undo());
        assert_eq!(store.current_page(), Some(&before));
        assert!(store.selected_element().is_none());

        assert!(store.redo());
        assert_eq!(store.current_page(), Some(&after));
    }
}

#[test]
fn test_update_element_undo_restores_previous_fields() {
    let mut store = EditorStore::new();
    let id = store.create_element("hero1", None, None).unwrap();
    let before = store.current_page().cloned();

    store
        .update_element(&id, ElementUpdate::default().visible(false).locked(true))
        .unwrap();
    assert!(store.undo());
    assert_eq!(store.current_page().cloned(), before);
}

#[test]
fn test_history_is_bounded_fifo() {
    let mut store = EditorStore::new();
    for i in 0..80 {
        store.create_element(format!("b{i}"), None, None).unwrap();
        assert!(store.history().len() <= 50);
    }
    assert_eq!(store.history().len(), 50);

    // 49 steps back lands on the oldest retained snapshot: 31 elements
    let mut steps = 0;
    while store.undo() {
        steps += 1;
    }
    assert_eq!(steps, 49);
    assert_eq!(store.elements().len(), 31);
}

#[test]
fn test_history_limit_from_config() {
    let config = AppConfig {
        history_limit: 3,
        ..AppConfig::default()
    };
    let mut store = EditorStore::with_config(config);
    for k in ["A", "B", "C", "D"] {
        store.create_element(k, None, None).unwrap();
    }
    assert_eq!(store.history().len(), 3);
    assert!(store.undo());
    assert!(store.undo());
    assert!(!store.undo());
    assert_eq!(kinds(&store), vec!["A", "B"]);
}

#[test]
fn test_new_edit_after_undo_drops_redo() {
    let mut store = EditorStore::new();
    store.create_element("A", None, None).unwrap();
    store.create_element("B", None, None).unwrap();
    assert!(store.undo());
    assert!(store.can_redo());

    store.create_element("C", None, None).unwrap();
    assert!(!store.can_redo());
    assert_eq!(kinds(&store), vec!["A", "C"]);
}

#[test]
fn test_export_import_round_trip_after_session() {
    let mut rng = Lcg(99);
    let mut store = EditorStore::new();
    for _ in 0..60 {
        random_op(&mut store, &mut rng);
    }
    let exported = store.export_page();

    let mut fresh = EditorStore::new();
    fresh.import_page(&exported).unwrap();
    assert_eq!(fresh.current_page(), store.current_page());

    // Ids survive verbatim
    let ids: Vec<&ElementId> = store.elements().iter().map(|e| &e.id).collect();
    let fresh_ids: Vec<&ElementId> = fresh.elements().iter().map(|e| &e.id).collect();
    assert_eq!(ids, fresh_ids);
}

#[test]
fn test_preview_toggle_always_deselects() {
    let mut store = EditorStore::new();
    let id = store.create_element("hero1", None, None).unwrap();
    assert_eq!(store.selected_element(), Some(&id));

    for _ in 0..4 {
        store.toggle_preview_mode();
        assert!(store.selected_element().is_none());
        store.select_element(Some(id.clone()));
    }
}

// ── Persistence ────────────────────────────────────────────────────────

#[test]
fn test_saved_page_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pages.redb");

    let mut store = EditorStore::new();
    let hero = store.create_element("hero1", None, None).unwrap();
    store
        .update_element_prop(&hero, "headline", json!("Build pages fast"))
        .unwrap();
    store.create_element("pricing1", None, None).unwrap();

    {
        let pages = PageStore::open(&db_path).unwrap();
        store.save_page(&pages).unwrap();
    }

    let pages = PageStore::open(&db_path).unwrap();
    let mut restored = EditorStore::new();
    assert!(restored.load_page(&pages).unwrap());
    assert_eq!(restored.current_page(), store.current_page());
    assert_eq!(
        restored.element_prop(&hero, "headline").unwrap(),
        Some(&json!("Build pages fast"))
    );
}

#[test]
fn test_custom_storage_key() {
    let dir = tempfile::tempdir().unwrap();
    let pages = PageStore::open(&dir.path().join("pages.redb")).unwrap();
    let config = AppConfig {
        storage_key: "landing".to_string(),
        ..AppConfig::default()
    };

    let store = EditorStore::with_config(config);
    store.save_page(&pages).unwrap();
    assert_eq!(pages.list_slots().unwrap(), vec!["landing"]);
}
