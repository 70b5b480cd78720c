use super::*;

fn report(id: i64, name: &str) -> ReportSummary {
    serde_json::from_value(serde_json::json!({ "id": id, "nombre": name })).unwrap()
}

#[test]
fn starts_loading() {
    let state = CatalogState::default();
    assert_eq!(state.phase(), &CatalogPhase::Loading);
    assert!(state.is_mounted());
    assert!(state.reports().is_empty());
}

#[test]
fn retry_while_outstanding_applies_only_the_later_fetch() {
    // First fetch resolves late with [A]; a retry issued meanwhile resolves
    // first with [B]. Only [B] may survive.
    let mut state = CatalogState::default();
    let first = state.begin_fetch();
    let retry = state.begin_fetch();

    assert!(state.complete(retry, Ok(vec![report(2, "B")])));
    assert!(!state.complete(first, Ok(vec![report(1, "A")])));

    assert_eq!(state.phase(), &CatalogPhase::Loaded(vec![report(2, "B")]));
}

#[test]
fn superseded_fetch_error_is_dropped() {
    let mut state = CatalogState::default();
    let first = state.begin_fetch();
    let retry = state.begin_fetch();
    assert!(!state.complete(first, Err("boom".to_owned())));
    assert_eq!(state.phase(), &CatalogPhase::Loading);
    assert!(state.complete(retry, Ok(vec![report(3, "C")])));
    assert_eq!(state.reports().len(), 1);
}

#[test]
fn empty_list_is_its_own_terminal_state() {
    let mut state = CatalogState::default();
    let ticket = state.begin_fetch();
    assert!(state.complete(ticket, Ok(Vec::new())));
    assert_eq!(state.phase(), &CatalogPhase::Empty);
}

#[test]
fn error_then_retry_recovers() {
    let mut state = CatalogState::default();
    let ticket = state.begin_fetch();
    state.complete(ticket, Err("offline".to_owned()));
    assert_eq!(state.phase(), &CatalogPhase::Failed("offline".to_owned()));

    let retry = state.begin_fetch();
    assert_eq!(state.phase(), &CatalogPhase::Loading);
    state.complete(retry, Ok(vec![report(1, "A")]));
    assert_eq!(state.reports(), &[report(1, "A")]);
}

#[test]
fn late_response_after_unmount_is_suppressed() {
    let mut state = CatalogState::default();
    let ticket = state.begin_fetch();
    state.unmount();
    assert!(!state.is_current(ticket));
    assert!(!state.complete(ticket, Ok(vec![report(1, "A")])));
    assert_eq!(state.phase(), &CatalogPhase::Loading);
}

#[test]
fn preserves_server_order() {
    let mut state = CatalogState::default();
    let ticket = state.begin_fetch();
    let reports = vec![report(9, "Z"), report(1, "A"), report(5, "M")];
    state.complete(ticket, Ok(reports.clone()));
    assert_eq!(state.reports(), reports.as_slice());
}
