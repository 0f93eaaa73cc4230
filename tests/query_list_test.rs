//! Query list invariants
//!
//! The chosen policy for the open question "may the last query row be
//! removed": removal is refused whenever it would leave the list empty,
//! for user-initiated and programmatic removal alike. The id counter is
//! owned by the list, so two lists never share hidden state.

use frametui::model::QueryList;

#[test]
fn test_list_never_reaches_zero_length() {
    let mut list = QueryList::new();

    // exhaustively remove in every order a user could manage
    let a = list.items()[0].id;
    let b = list.add();
    let c = list.add();

    assert!(list.remove(b));
    assert!(list.remove(a));
    assert!(!list.remove(c), "removing the last row must be refused");
    assert_eq!(list.len(), 1);

    // repeated attempts stay refused
    assert!(!list.remove(c));
    assert_eq!(list.len(), 1);
}

#[test]
fn test_remove_unknown_id_is_noop() {
    let mut list = QueryList::new();
    list.add();
    assert!(!list.remove(9999));
    assert_eq!(list.len(), 2);
}

#[test]
fn test_counter_is_per_list_not_global() {
    let mut first = QueryList::new();
    let second = QueryList::new();

    first.add();
    first.add();

    // a fresh list starts over; ids are not process-wide
    assert_eq!(second.items()[0].id, first.items()[0].id);
}

#[test]
fn test_update_then_active_texts() {
    let mut list = QueryList::new();
    let first = list.items()[0].id;
    let second = list.add();

    list.update(first, "a dog".to_string());
    list.update(second, "  the dog runs  ".to_string());

    assert_eq!(list.active_texts(), vec!["a dog", "the dog runs"]);
}
