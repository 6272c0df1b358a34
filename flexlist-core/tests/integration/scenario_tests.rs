//! End-to-end adapter scenarios through the public API

use std::cell::RefCell;
use std::rc::Rc;

use flexlist_core::{
    AdapterSettings, CallbackListener, ChangeEvent, ChildEntry, ExpandableAdapter, FixedViewport,
    Notification, ParentEntry, RecordingListener,
};

fn three_parents() -> Vec<ParentEntry<&'static str>> {
    vec![
        ParentEntry::new("P0"),
        ParentEntry::new("P1").with_children(["C0", "C1"]),
        ParentEntry::new("P2"),
    ]
}

fn labels(adapter: &ExpandableAdapter<&'static str>) -> Vec<&'static str> {
    (0..adapter.len())
        .map(|pos| *adapter.payload(pos).unwrap())
        .collect()
}

fn ten_parents() -> Vec<ParentEntry<String>> {
    (0..10)
        .map(|i| ParentEntry::new(format!("P{i}")).with_children((0..3).map(|j| format!("P{i}C{j}"))))
        .collect()
}

#[test]
fn test_remove_child_and_undo() {
    let mut adapter = ExpandableAdapter::new(three_parents());
    assert_eq!(adapter.expand(1).unwrap(), 2);
    assert_eq!(labels(&adapter), vec!["P0", "P1", "C0", "C1", "P2"]);
    assert_eq!(adapter.expanded_positions(), vec![1]);
    let c0 = adapter.at(2).unwrap();

    assert!(adapter.remove(2, false).unwrap());
    assert_eq!(labels(&adapter), vec!["P0", "P1", "C1", "P2"]);
    assert_eq!(adapter.pending_removals(), vec![c0]);
    assert_eq!(adapter.pending_positions(), vec![2]);
    assert!(adapter.is_pending_removal(2));

    assert_eq!(adapter.restore_all().unwrap(), 1);
    assert_eq!(labels(&adapter), vec!["P0", "P1", "C0", "C1", "P2"]);
    assert!(!adapter.has_pending_removals());
    adapter.validate().unwrap();
}

#[test]
fn test_batch_of_siblings_emits_one_removal() {
    let mut adapter = ExpandableAdapter::new(three_parents());
    adapter.expand(1).unwrap();
    let recorder = RecordingListener::new();
    adapter.set_listener(recorder.clone());

    assert_eq!(adapter.remove_batch(&[2, 3], false).unwrap(), 2);
    assert_eq!(
        recorder.notifications(),
        vec![Notification {
            event: ChangeEvent::ItemsRemoved { start: 2, count: 2 },
            multi_remove: true,
        }]
    );
}

#[test]
fn test_selected_children_removed_then_restored_with_policy() {
    let settings = AdapterSettings::new().with_restore_selection(true);
    let mut adapter = ExpandableAdapter::with_settings(three_parents(), settings);
    adapter.expand(1).unwrap();
    adapter.toggle(2).unwrap();
    adapter.toggle(3).unwrap();

    assert_eq!(adapter.remove_all_selected(true).unwrap(), 2);
    assert_eq!(adapter.selected_count(), 0);
    assert_eq!(labels(&adapter), vec!["P0", "P1", "P2"]);

    adapter.restore_all().unwrap();
    assert_eq!(labels(&adapter), vec!["P0", "P1", "C0", "C1", "P2"]);
    assert_eq!(adapter.selected_positions(), vec![2, 3]);
    assert!(adapter.is_any_child_selected());
}

#[test]
fn test_pending_removal_forces_collapse_past_selection() {
    let mut adapter = ExpandableAdapter::new(three_parents());
    adapter.remove(0, false).unwrap();
    assert_eq!(labels(&adapter), vec!["P1", "P2"]);
    adapter.expand(0).unwrap();
    adapter.toggle(1).unwrap();

    // the removed P0 was logged at 0, where P1 now sits
    assert!(adapter.is_pending_removal(0));
    assert_eq!(adapter.collapse(0).unwrap(), 2);
    assert_eq!(adapter.selected_count(), 0);

    adapter.restore_all().unwrap();
    assert_eq!(labels(&adapter), vec!["P0", "P1", "P2"]);
}

#[test]
fn test_auto_collapse_and_auto_scroll() {
    let settings = AdapterSettings::new()
        .with_auto_collapse(true)
        .with_auto_scroll(true);
    let mut adapter = ExpandableAdapter::with_settings(ten_parents(), settings);

    assert_eq!(adapter.expand(8).unwrap(), 3);
    let requests = adapter.take_scroll_requests();
    assert_eq!(requests.len(), 1);
    let first = requests[0];
    assert_eq!(first.position, 8);
    assert_eq!(first.child_count, 3);
    assert_eq!(first.delay.as_millis(), 150);
    assert_eq!(
        adapter.resolve_auto_scroll(&first, &FixedViewport::new(0, 9)),
        Some(2)
    );

    // expanding P2 collapses P8 and makes the first request stale
    assert_eq!(adapter.expand(2).unwrap(), 3);
    assert_eq!(adapter.expanded_positions(), vec![2]);
    assert_eq!(adapter.len(), 13);
    assert_eq!(
        adapter.resolve_auto_scroll(&first, &FixedViewport::new(0, 9)),
        None
    );
    let second = adapter.take_scroll_requests()[0];
    assert_eq!(
        adapter.resolve_auto_scroll(&second, &FixedViewport::new(5, 9)),
        Some(2)
    );
    assert!(adapter.take_scroll_requests().is_empty());
}

#[test]
fn test_callback_listener_sees_reconciled_state() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut adapter = ExpandableAdapter::new(three_parents());
    adapter.set_listener(CallbackListener::new(move |n: &Notification| {
        sink.borrow_mut().push(n.event);
    }));

    adapter.expand(1).unwrap();
    adapter.collapse(1).unwrap();
    adapter.reset(three_parents());
    assert_eq!(
        *seen.borrow(),
        vec![
            ChangeEvent::ItemsInserted { start: 2, count: 2 },
            ChangeEvent::ItemsRemoved { start: 2, count: 2 },
            ChangeEvent::DataSetInvalidated,
        ]
    );
}

#[test]
fn test_build_edit_and_commit() {
    let mut adapter = ExpandableAdapter::new(Vec::new());
    assert!(adapter.is_empty());
    adapter.add_parent(0, ParentEntry::new("Fruit")).unwrap();
    adapter.add_parent(1, ParentEntry::new("Veg")).unwrap();
    adapter
        .add_child(0, 0, ChildEntry::new("Apple"), true, false)
        .unwrap();
    adapter
        .add_child(0, 5, ChildEntry::new("Pear"), false, false)
        .unwrap();
    assert_eq!(labels(&adapter), vec!["Fruit", "Apple", "Pear", "Veg"]);

    let veg = adapter.at(3).unwrap();
    adapter.remove(3, false).unwrap();
    assert_eq!(adapter.commit(), 1);
    assert!(adapter.node_by_id(veg).is_none());
    assert_eq!(adapter.restore_all().unwrap(), 0);
    assert_eq!(labels(&adapter), vec!["Fruit", "Apple", "Pear"]);
    adapter.validate().unwrap();
}

#[test]
fn test_expand_all_and_collapse_all() {
    let mut adapter = ExpandableAdapter::new(ten_parents());
    assert_eq!(adapter.expand_all().unwrap(), 10);
    assert_eq!(adapter.len(), 40);
    assert_eq!(adapter.count_top_level(), 10);
    assert_eq!(adapter.collapse_all().unwrap(), 10);
    assert_eq!(adapter.len(), 10);
    assert!(adapter.expanded_items().is_empty());
}
