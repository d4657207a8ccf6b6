// Integration tests for the snapshot history.
//
// These tests drive `SnapshotHistory` the way an editor does: record after
// every mutation, walk back and forth, and branch off after undoing.

use pagesmith_mod_history::{HistoryConfig, SnapshotHistory};

#[derive(Debug, Clone, PartialEq)]
struct Doc {
    blocks: Vec<String>,
}

fn push_block(history: &mut SnapshotHistory<Doc>, doc: &mut Doc, name: &str) {
    doc.blocks.push(name.to_string());
    history.record(format!("Add {name}"), doc);
}

// ── Full Workflow ──────────────────────────────────────────────────────

#[test]
fn test_full_workflow_record_undo_branch_redo() {
    let mut history = SnapshotHistory::new(HistoryConfig::default());
    let mut doc = Doc { blocks: Vec::new() };
    history.record("Init", &doc);

    for name in ["hero", "grid", "pricing"] {
        push_block(&mut history, &mut doc, name);
    }
    assert_eq!(history.len(), 4);

    // Undo twice
    doc = history.undo().cloned().unwrap();
    doc = history.undo().cloned().unwrap();
    assert_eq!(doc.blocks, vec!["hero"]);

    // Branch: new edit drops the two redo entries
    push_block(&mut history, &mut doc, "footer");
    assert!(!history.can_redo());
    assert_eq!(history.len(), 3);

    // Walk all the way back
    let mut steps = 0;
    while let Some(state) = history.undo() {
        doc = state.clone();
        steps += 1;
    }
    assert_eq!(steps, 2);
    assert!(doc.blocks.is_empty());

    // And forward again
    while let Some(state) = history.redo() {
        doc = state.clone();
    }
    assert_eq!(doc.blocks, vec!["hero", "footer"]);
}

// ── Capacity ───────────────────────────────────────────────────────────

#[test]
fn test_default_cap_of_fifty_is_never_exceeded() {
    let mut history = SnapshotHistory::new(HistoryConfig::default());
    let mut doc = Doc { blocks: Vec::new() };
    history.record("Init", &doc);

    for i in 0..120 {
        push_block(&mut history, &mut doc, &format!("b{i}"));
        assert!(history.len() <= 50);
    }
    assert_eq!(history.len(), 50);
    assert_eq!(history.index(), Some(49));

    // The oldest surviving snapshot holds 71 blocks (b0..=b70)
    let oldest = history.iter().next().unwrap();
    assert_eq!(oldest.state.blocks.len(), 71);

    // Exactly 49 undo steps remain
    let mut undo_count = 0;
    while history.undo().is_some() {
        undo_count += 1;
    }
    assert_eq!(undo_count, 49);
}

#[test]
fn test_cap_of_one_keeps_only_latest() {
    let mut history = SnapshotHistory::new(HistoryConfig::with_max_entries(1));
    let mut doc = Doc { blocks: Vec::new() };
    history.record("Init", &doc);
    push_block(&mut history, &mut doc, "hero");

    assert_eq!(history.len(), 1);
    assert!(!history.can_undo());
    assert_eq!(history.current().unwrap().state.blocks, vec!["hero"]);
}

// ── Edge Cases ─────────────────────────────────────────────────────────

#[test]
fn test_redo_at_tip_is_noop() {
    let mut history = SnapshotHistory::new(HistoryConfig::default());
    history.record("Init", &Doc { blocks: Vec::new() });
    assert!(history.redo().is_none());
    assert_eq!(history.index(), Some(0));
}

#[test]
fn test_sequence_numbers_keep_increasing_after_truncation() {
    let mut history = SnapshotHistory::new(HistoryConfig::default());
    let mut doc = Doc { blocks: Vec::new() };
    history.record("Init", &doc);
    push_block(&mut history, &mut doc, "a");
    history.undo();
    push_block(&mut history, &mut doc, "b");

    let seqs: Vec<u64> = history.iter().map(|s| s.seq).collect();
    assert_eq!(seqs, vec![0, 2]);
}
