#![forbid(unsafe_code)]

//! End-to-end session scenarios: build, edit, persist, evaluate and scan
//! through the public [`EditorSession`] surface only.

use std::fs;

use vreg_core::{NodeId, Point, Rect, TemplateKind, TokenKind};
use vreg_runtime::{EditorSession, EvalError, SessionConfig};

fn chain(session: &mut EditorSession, kinds: &[TokenKind]) -> Vec<NodeId> {
    let mut ids: Vec<NodeId> = Vec::new();
    for (i, kind) in kinds.iter().enumerate() {
        let id = session.add_node(*kind, Point::new(200.0 * i as f32, 0.0)).unwrap();
        if let Some(prev) = ids.last() {
            session.connect(*prev, id);
        }
        ids.push(id);
    }
    ids
}

#[test]
fn empty_then_anchor_then_digits() {
    let mut session = EditorSession::new();
    assert_eq!(session.pattern(), "");
    chain(
        &mut session,
        &[TokenKind::StartAnchor, TokenKind::Digit, TokenKind::OneOrMore],
    );
    assert_eq!(session.pattern(), r"^\d+");
    while session.undo() {}
    assert_eq!(session.pattern(), "");
}

#[test]
fn anchor_only_graph() {
    let mut session = EditorSession::new();
    session.add_node(TokenKind::StartAnchor, Point::ZERO).unwrap();
    assert_eq!(session.pattern(), "^");
}

#[test]
fn save_load_round_trip_resets_transient_flags() {
    let mut session = EditorSession::new();
    let ids = chain(
        &mut session,
        &[TokenKind::StartAnchor, TokenKind::CustomText, TokenKind::EndAnchor],
    );
    session.edit_custom_text(ids[1], "a b:c");
    session.select_only(ids[0]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.vreg");
    session.save_file(&path).unwrap();

    let mut reloaded = EditorSession::new();
    reloaded.add_node(TokenKind::Word, Point::ZERO).unwrap();
    reloaded.load_file(&path).unwrap();
    assert!(!reloaded.can_undo());

    let original = session.graph();
    let loaded = reloaded.graph();
    assert_eq!(loaded.connections, original.connections);
    assert_eq!(loaded.next_id, original.next_id);
    assert_eq!(loaded.nodes.len(), original.nodes.len());
    for (a, b) in original.nodes.iter().zip(&loaded.nodes) {
        assert_eq!((a.id, a.kind, &a.fragment, &a.label), (b.id, b.kind, &b.fragment, &b.label));
        assert_eq!((a.position, a.color), (b.position, b.color));
        assert!(!b.selected && !b.editing);
    }
    assert_eq!(reloaded.pattern(), "^a b:c$");
}

#[test]
fn digits_in_mixed_text() {
    let mut session = EditorSession::new();
    chain(&mut session, &[TokenKind::Digit, TokenKind::OneOrMore]);
    let set = session.evaluate("a12b3").unwrap();
    let found: Vec<_> = set
        .matches()
        .iter()
        .map(|m| (m.full_match.as_str(), m.start))
        .collect();
    assert_eq!(found, vec![("12", 1), ("3", 4)]);
}

#[test]
fn deleting_only_selected_node_removes_its_connections() {
    let mut session = EditorSession::new();
    let ids = chain(
        &mut session,
        &[TokenKind::StartAnchor, TokenKind::Word, TokenKind::EndAnchor],
    );
    session.select_only(ids[1]);
    assert_eq!(session.delete_selected(), 1);
    assert!(session.graph().connections.iter().all(|c| !c.touches(ids[1])));
    assert_eq!(session.graph().connections.len(), 0);
}

#[test]
fn box_select_copy_paste_yields_isomorphic_subgraph() {
    let mut session = EditorSession::new();
    let ids = chain(
        &mut session,
        &[TokenKind::Word, TokenKind::OneOrMore, TokenKind::Symbol],
    );
    session.select_by_rect(Rect::new(-10.0, -10.0, 600.0, 100.0));
    assert_eq!(session.copy_selection(), 3);

    let pasted = session.paste(Point::new(200.0, 400.0)).unwrap();
    assert_eq!(pasted.len(), 3);
    assert!(pasted.iter().all(|id| !ids.contains(id)));

    let g = session.graph();
    for (old, new) in ids.iter().zip(&pasted) {
        let (a, b) = (g.node(*old).unwrap(), g.node(*new).unwrap());
        assert_eq!((a.kind, &a.fragment), (b.kind, &b.fragment));
        assert_eq!(b.position - a.position, Point::new(0.0, 400.0));
    }
    for pair in pasted.windows(2) {
        assert_eq!(g.outgoing(pair[0]).map(|c| c.to), Some(pair[1]));
    }
    // The copy has no edges back into the original.
    assert!(g
        .connections
        .iter()
        .all(|c| ids.contains(&c.from) == ids.contains(&c.to)));
}

#[test]
fn connect_replaces_previous_outgoing_edge() {
    let mut session = EditorSession::new();
    let a = session.add_node(TokenKind::StartAnchor, Point::ZERO).unwrap();
    let b = session.add_node(TokenKind::Digit, Point::new(200.0, 0.0)).unwrap();
    let c = session.add_node(TokenKind::Word, Point::new(200.0, 100.0)).unwrap();
    session.connect(a, b);
    session.connect(a, c);
    let outgoing: Vec<_> = session
        .graph()
        .connections
        .iter()
        .filter(|conn| conn.from == a)
        .collect();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0].to, c);
    assert_eq!(session.pattern(), r"^\w");
}

#[test]
fn directory_scan_ignores_subdirectories() {
    let mut session = EditorSession::new();
    chain(&mut session, &[TokenKind::Digit, TokenKind::OneOrMore]);

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "1 22 333").unwrap();
    fs::write(dir.path().join("b.log"), "no digits here").unwrap();
    fs::write(dir.path().join("c.md"), "v2").unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("d.txt"), "4 5 6 7").unwrap();

    let report = session.scan(dir.path()).unwrap();
    assert_eq!(report.files_scanned(), 3);
    assert_eq!(report.total_matches, 4);
    assert_eq!(report.hits().count(), 2);
    let names: Vec<_> = report
        .files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.txt", "b.log", "c.md"]);
}

#[test]
fn scan_missing_path_and_empty_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let session = EditorSession::new();
    assert!(matches!(session.scan(dir.path()), Err(EvalError::EmptyPattern)));

    let mut session = EditorSession::new();
    session.add_node(TokenKind::Digit, Point::ZERO).unwrap();
    assert!(matches!(
        session.scan(&dir.path().join("nope")),
        Err(EvalError::PathNotFound { .. })
    ));
}

#[test]
fn template_then_playground() {
    let mut session = EditorSession::with_config(SessionConfig {
        template_step: 200.0,
        ..SessionConfig::default()
    });
    let ids = session.expand_template(TemplateKind::IsoDate, Point::new(0.0, 0.0)).unwrap();
    let g = session.graph();
    assert_eq!(
        g.node(ids[1]).unwrap().position.x - g.node(ids[0]).unwrap().position.x,
        200.0
    );
    let set = session.evaluate("due 2024-03-09, filed 1999-12-31").unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.matches()[1].full_match, "1999-12-31");
}

#[test]
fn debug_groups_follow_declaration_order() {
    let mut session = EditorSession::new();
    session.expand_template(TemplateKind::UsPhone, Point::ZERO).unwrap();
    let count = session.refresh_debug("call 555-123-4567 now").unwrap();
    assert_eq!(count, 1);
    let m = session.debug_cursor().current().unwrap();
    assert_eq!(m.start, 5);
    assert_eq!(m.groups.len(), 1);
    assert_eq!(m.groups[0].as_ref().map(|g| g.content.as_str()), Some("555"));
}
