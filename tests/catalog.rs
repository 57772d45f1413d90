//! Node catalog: palette order, handles, fields, parsing.
use procflow::catalog::{self, HandleResolution, HANDLE_IN, HANDLE_NO, HANDLE_OUT, HANDLE_YES};
use procflow::prelude::*;

#[test]
fn test_list_kinds_has_ten_entries_in_order() {
    let kinds = list_kinds();
    assert_eq!(kinds.len(), 10);
    assert_eq!(kinds[0], (NodeKind::Start, "Start"));
    assert_eq!(kinds[1], (NodeKind::End, "End"));
    assert_eq!(kinds[9], (NodeKind::Assignment, "Assignment"));

    let names: Vec<&str> = kinds.iter().map(|(kind, _)| kind.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "start",
            "end",
            "process",
            "decision",
            "data",
            "approval",
            "document",
            "notification",
            "report",
            "assignment"
        ]
    );
}

#[test]
fn test_handle_specs() {
    let start = handle_spec(NodeKind::Start);
    assert!(!start.accepts_incoming());
    assert_eq!(start.outgoing_count(), 1);

    let end = handle_spec(NodeKind::End);
    assert!(end.accepts_incoming());
    assert_eq!(end.outgoing_count(), 0);

    let decision = handle_spec(NodeKind::Decision);
    assert!(decision.is_multi_output());
    let labels: Vec<_> = decision.outgoing.iter().map(|h| (h.id, h.label)).collect();
    assert_eq!(labels, vec![(HANDLE_YES, Some("Yes")), (HANDLE_NO, Some("No"))]);

    for kind in NodeKind::ALL {
        if matches!(kind, NodeKind::Start | NodeKind::End | NodeKind::Decision) {
            continue;
        }
        let spec = handle_spec(kind);
        assert!(spec.accepts_incoming(), "{} should accept input", kind);
        assert_eq!(spec.outgoing_count(), 1, "{} should have one output", kind);
        assert_eq!(spec.outgoing[0].id, HANDLE_OUT);
    }
}

#[test]
fn test_handle_resolution() {
    let process = handle_spec(NodeKind::Process);
    assert!(matches!(process.resolve_source(None), HandleResolution::Found(h) if h.id == HANDLE_OUT));
    assert_eq!(process.resolve_source(Some("yes")), HandleResolution::Missing);
    assert!(matches!(process.resolve_target(Some(HANDLE_IN)), HandleResolution::Found(_)));

    let decision = handle_spec(NodeKind::Decision);
    assert_eq!(decision.resolve_source(None), HandleResolution::Ambiguous);
    assert!(matches!(decision.resolve_source(Some("no")), HandleResolution::Found(h) if h.label == Some("No")));

    assert_eq!(handle_spec(NodeKind::Start).resolve_target(None), HandleResolution::Missing);
}

#[test]
fn test_attribute_fields_per_kind() {
    assert_eq!(catalog::attribute_fields(NodeKind::Approval).len(), 6);
    assert!(catalog::attribute_fields(NodeKind::Approval).contains(&AttributeField::TimeLimitHours));
    assert_eq!(catalog::attribute_fields(NodeKind::Data).len(), 4);
    assert!(!catalog::attribute_fields(NodeKind::Data).contains(&AttributeField::Assignee));
}

#[test]
fn test_entries_carry_presentation() {
    let entries = catalog::entries();
    assert_eq!(entries.len(), 10);
    assert_eq!(
        entries[3].presentation.shape,
        catalog::Shape::Diamond,
        "decision is drawn as a diamond"
    );
    assert!(entries.iter().all(|e| e.presentation.color.starts_with('#')));
}

#[test]
fn test_kind_parsing() {
    assert_eq!("approval".parse::<NodeKind>(), Ok(NodeKind::Approval));
    assert_eq!(" Decision ".parse::<NodeKind>(), Ok(NodeKind::Decision));
    assert_eq!(
        "gateway".parse::<NodeKind>(),
        Err(GraphError::UnknownKind("gateway".to_string()))
    );
    assert_eq!(NodeKind::Notification.to_string(), "notification");
}

#[test]
fn test_error_display() {
    let err = GraphError::NodeNotFound(NodeId::new("node_B"));
    assert!(err.to_string().contains("node_B"));

    let err = GraphError::FieldNotApplicable {
        kind: NodeKind::Report,
        field: "assignee",
    };
    assert_eq!(err.to_string(), "Field 'assignee' does not apply to report nodes");
}
