use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Marker(u8);

#[test]
fn fault_lines_dedupes_and_trims() {
    let lines = fault_lines(vec!["boom ".to_owned(), "boom".to_owned(), String::new(), "other".to_owned()]);
    assert_eq!(lines, vec!["boom".to_owned(), "other".to_owned()]);
}

#[test]
fn fault_lines_falls_back_to_generic_message() {
    let lines = fault_lines(Vec::new());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(FAULT_TITLE));
}

#[test]
fn missing_context_becomes_render_fault() {
    let owner = Owner::new();
    owner.with(|| {
        assert_eq!(require::<Marker>("marker"), Err(RenderFault::MissingContext("marker")));
        provide_context(Marker(7));
        assert_eq!(require::<Marker>("marker"), Ok(Marker(7)));
    });
}

#[test]
fn render_fault_message_names_the_missing_piece() {
    let fault = RenderFault::MissingContext("session");
    assert_eq!(fault.to_string(), "session is not available on this page");
    assert_eq!(fault_lines(vec![fault.to_string()]), vec!["session is not available on this page".to_owned()]);
}

#[test]
fn panic_panel_reloads_without_the_module() {
    assert!(PANIC_PANEL_HTML.contains(FAULT_TITLE));
    assert!(PANIC_PANEL_HTML.contains(r#"role="alert""#));
    assert!(PANIC_PANEL_HTML.contains(r#"onclick="window.location.reload()""#));
    assert!(PANIC_PANEL_HTML.contains("Reload page"));
}
