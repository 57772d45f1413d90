//! Editor surface: selection, gestures, side panel and notifications.
mod common;
use common::*;
use procflow::editor::{FieldValue, MAX_PENDING, NotificationLevel};
use procflow::prelude::*;

#[test]
fn test_selection_state_machine() {
    let mut surface = seeded_surface(&EditorConfig::default());
    let a = surface.add_node_at(NodeKind::Process, Position::new(0.0, 0.0));
    let b = surface.add_node_at(NodeKind::Data, Position::new(0.0, 100.0));
    assert!(surface.selection().is_idle());
    assert!(surface.panel().is_none());

    assert!(surface.select(&a));
    assert_eq!(surface.selection(), &Selection::NodeSelected(a.clone()));

    // selecting another node replaces the selection
    assert!(surface.select(&b));
    assert!(surface.selection().is_selected(&b));
    assert!(!surface.selection().is_selected(&a));

    // unknown ids do not disturb it
    assert!(!surface.select(&NodeId::new("nope")));
    assert!(surface.selection().is_selected(&b));

    surface.close_panel();
    assert!(surface.selection().is_idle());
}

#[test]
fn test_deleting_selected_node_closes_panel() {
    let mut surface = seeded_surface(&EditorConfig::default());
    let a = surface.add_node_at(NodeKind::Process, Position::default());
    let b = surface.add_node_at(NodeKind::Report, Position::default());

    surface.select(&a);
    surface.delete_node(&b);
    assert!(surface.selection().is_selected(&a), "other deletions keep the panel");

    surface.delete_node(&a);
    assert!(surface.selection().is_idle());
    assert!(surface.panel().is_none());
    assert!(matches!(surface.delete_selected(), Err(EditorError::NothingSelected)));
}

#[test]
fn test_click_to_add_lands_inside_viewport() {
    let config = EditorConfig {
        viewport: Viewport::new(Position::new(-400.0, 1000.0), 320.0, 240.0),
        ..EditorConfig::default()
    };
    let mut surface = seeded_surface(&config);

    for kind in NodeKind::ALL {
        let id = surface.add_node_anywhere(kind);
        let node = surface.store().node(&id).unwrap();
        assert_eq!(node.kind(), kind);
        assert_eq!(node.label, kind.default_label());
        assert!(config.viewport.contains(node.position), "{} outside viewport", node.position);
    }
}

#[test]
fn test_drop_from_palette_uses_position_and_default_label() {
    let mut surface = seeded_surface(&EditorConfig::default());
    let outcome = surface.apply(Gesture::DropFromPalette {
        kind: NodeKind::Notification,
        position: Position::new(321.0, 123.0),
    });

    let GestureOutcome::NodeAdded(id) = outcome else {
        panic!("expected a node to be added, got {:?}", outcome);
    };
    let node = surface.store().node(&id).unwrap();
    assert_eq!(node.position, Position::new(321.0, 123.0));
    assert_eq!(node.label, "Notification");
    assert!(surface.has_unsaved_changes());
}

#[test]
fn test_gestures_on_missing_targets_are_ignored() {
    let mut surface = seeded_surface(&EditorConfig::default());
    let a = surface.add_node_at(NodeKind::Start, Position::default());
    let ghost = NodeId::new("ghost");
    let edges_before = surface.store().edges().len();

    let gestures = vec![
        Gesture::DragNode {
            node: ghost.clone(),
            position: Position::new(1.0, 1.0),
        },
        Gesture::ConnectHandles {
            source: HandleRef::node(a.clone()),
            target: HandleRef::node(ghost.clone()),
        },
        Gesture::ClickNode(ghost.clone()),
        Gesture::DeleteNode(ghost.clone()),
        Gesture::DeleteSelected,
        Gesture::DeleteEdge(EdgeId::new("ghost-edge")),
        Gesture::DuplicateNode(ghost),
    ];
    for gesture in gestures {
        assert_eq!(surface.apply(gesture), GestureOutcome::Ignored);
    }
    assert_eq!(surface.store().edges().len(), edges_before);
    assert_eq!(surface.store().nodes().len(), 1);
    assert!(surface.notifications().is_empty());
}

#[test]
fn test_gesture_sequence() {
    let mut surface = seeded_surface(&EditorConfig::default());
    let GestureOutcome::NodeAdded(start) = surface.apply(Gesture::ClickPalette {
        kind: NodeKind::Start,
    }) else {
        panic!("start not added");
    };
    let GestureOutcome::NodeAdded(step) = surface.apply(Gesture::DropFromPalette {
        kind: NodeKind::Process,
        position: Position::new(100.0, 100.0),
    }) else {
        panic!("step not added");
    };

    let GestureOutcome::Connected(edge) = surface.apply(Gesture::ConnectHandles {
        source: HandleRef::node(start.clone()),
        target: HandleRef::node(step.clone()),
    }) else {
        panic!("not connected");
    };
    assert_eq!(
        surface.apply(Gesture::DragNode {
            node: step.clone(),
            position: Position::new(150.0, 220.0)
        }),
        GestureOutcome::NodeMoved(step.clone())
    );
    assert_eq!(
        surface.store().node(&step).unwrap().position,
        Position::new(150.0, 220.0)
    );

    let GestureOutcome::NodeDuplicated(copy) = surface.apply(Gesture::DuplicateNode(step.clone()))
    else {
        panic!("not duplicated");
    };
    assert_eq!(
        surface.store().node(&copy).unwrap().position,
        Position::new(200.0, 270.0)
    );

    assert_eq!(
        surface.apply(Gesture::ClickNode(step.clone())),
        GestureOutcome::Selected(step.clone())
    );
    assert_eq!(
        surface.apply(Gesture::DeleteSelected),
        GestureOutcome::NodeDeleted(step.clone())
    );
    assert!(surface.store().edge(&edge).is_none(), "edge removed with its node");
    assert!(surface.selection().is_idle());
    assert_eq!(surface.apply(Gesture::ClosePanel), GestureOutcome::PanelClosed);
    assert_eq!(surface.store().nodes().len(), 2);
}

#[test]
fn test_panel_shows_fields_for_kind() {
    let mut surface = seeded_surface(&EditorConfig::default());
    let approval = surface.add_node_at(NodeKind::Approval, Position::default());
    let data = surface.add_node_at(NodeKind::Data, Position::default());

    surface.select(&data);
    let view = surface.panel().unwrap();
    assert_eq!(view.kind, NodeKind::Data);
    assert_eq!(view.fields.len(), 4);
    assert_eq!(view.value(AttributeField::Assignee), None);
    assert_eq!(
        view.value(AttributeField::Required),
        Some(&FieldValue::Flag(false))
    );

    surface.select(&approval);
    let view = surface.panel().unwrap();
    assert_eq!(view.node_id, approval);
    assert_eq!(view.fields.len(), 6);
    assert_eq!(
        view.value(AttributeField::TimeLimitHours),
        Some(&FieldValue::Hours(None))
    );
}

#[test]
fn test_edit_selected_applies_panel_input() {
    let mut surface = seeded_surface(&EditorConfig::default());
    let id = surface.add_node_at(NodeKind::Approval, Position::default());
    surface.select(&id);

    let input = PanelInput {
        label: Some("Legal review".to_string()),
        required: Some(true),
        assignee: Some("  legal@corp  ".to_string()),
        time_limit: Some("72".to_string()),
        ..PanelInput::default()
    };
    assert_eq!(
        surface.apply(Gesture::EditSelected(input)),
        GestureOutcome::NodeUpdated(id.clone())
    );

    let view = surface.panel().unwrap();
    assert_eq!(view.label, "Legal review");
    assert_eq!(
        view.value(AttributeField::Assignee),
        Some(&FieldValue::OptionalText(Some("legal@corp".to_string())))
    );
    assert_eq!(
        view.value(AttributeField::TimeLimitHours),
        Some(&FieldValue::Hours(Some(72)))
    );

    // empty inputs clear the optional fields
    let clear = PanelInput {
        assignee: Some(String::new()),
        time_limit: Some(" ".to_string()),
        ..PanelInput::default()
    };
    surface.edit_selected(clear).unwrap();
    let approval = surface.store().node(&id).unwrap().attributes().approval().unwrap().clone();
    assert_eq!(approval.assignee, None);
    assert_eq!(approval.time_limit_hours, None);
    assert!(approval.common.required);
}

#[test]
fn test_invalid_panel_input_posts_error_and_changes_nothing() {
    let mut surface = seeded_surface(&EditorConfig::default());
    let id = surface.add_node_at(NodeKind::Approval, Position::default());
    surface.select(&id);
    let before = surface.store().node(&id).unwrap().clone();

    let input = PanelInput {
        label: Some("renamed".to_string()),
        time_limit: Some("two days".to_string()),
        ..PanelInput::default()
    };
    assert_eq!(surface.apply(Gesture::EditSelected(input)), GestureOutcome::Ignored);
    assert_eq!(surface.store().node(&id).unwrap(), &before);

    let latest = surface.notifications().latest().unwrap();
    assert_eq!(latest.level, NotificationLevel::Error);
    assert!(latest.message.contains("time_limit_hours"));

    let on_process = surface.add_node_at(NodeKind::Process, Position::default());
    surface.select(&on_process);
    let err = surface
        .edit_selected(PanelInput {
            assignee: Some("bob".to_string()),
            ..PanelInput::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        EditorError::Graph(GraphError::FieldNotApplicable { field: "assignee", .. })
    ));
}

#[test]
fn test_notifications_are_dismissable() {
    let mut surface = seeded_surface(&EditorConfig::default());
    let notifications = surface.notifications_mut();
    let first = notifications.info("Loaded");
    let second = notifications.error("Something broke");
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications.latest().unwrap().id, second);

    assert!(notifications.dismiss(first));
    assert!(!notifications.dismiss(first));
    assert_eq!(notifications.len(), 1);

    notifications.clear();
    assert!(surface.notifications().is_empty());
}

#[test]
fn test_config_controls_policy_and_offset() {
    let config = EditorConfig::from_json_str(
        r#"{ "duplicate_offset": { "x": 10, "y": -5 }, "connection_policy": { "allow_self_loops": false } }"#,
    )
    .unwrap();
    assert!(config.connection_policy.allow_parallel_edges);
    assert_eq!(config.save_guard, SaveGuard::AllowConcurrent);

    let mut surface = seeded_surface(&config);
    let a = surface.add_node_at(NodeKind::Process, Position::new(100.0, 100.0));
    assert!(surface.connect(HandleRef::node(a.clone()), HandleRef::node(a.clone())).is_err());

    let copy = surface.duplicate_node(&a).unwrap();
    assert_eq!(surface.store().node(&copy).unwrap().position, Position::new(110.0, 95.0));
}

#[test]
fn test_config_validation() {
    assert!(EditorConfig::default().validate().is_ok());
    assert!(EditorConfig::from_json_str(r#"{ "viewport": { "width": 0 } }"#).is_err());
    assert!(EditorConfig::from_json_str(r#"{ "request_timeout_secs": 0 }"#).is_err());
    assert!(EditorConfig::from_json_str("not json").is_err());
}

#[test]
fn test_set_viewport_rejects_degenerate_sizes() {
    let mut surface = seeded_surface(&EditorConfig::default());
    let original = surface.viewport();

    for (width, height) in [(0.0, 100.0), (-320.0, 240.0), (f64::NAN, 240.0), (320.0, f64::INFINITY)] {
        let result = surface.set_viewport(Viewport::new(Position::default(), width, height));
        assert!(matches!(result, Err(EditorError::InvalidViewport { .. })));
        assert_eq!(surface.viewport(), original);
    }

    let smaller = Viewport::new(Position::new(10.0, 10.0), 200.0, 100.0);
    surface.set_viewport(smaller).unwrap();
    let id = surface.add_node_anywhere(NodeKind::Data);
    assert!(smaller.contains(surface.store().node(&id).unwrap().position));
}

#[test]
fn test_notification_queue_is_bounded() {
    let mut surface = seeded_surface(&EditorConfig::default());
    let notifications = surface.notifications_mut();
    let first = notifications.info("message 0");
    let mut last = first;
    for i in 1..(MAX_PENDING * 3) {
        last = notifications.error(format!("message {}", i));
    }

    assert_eq!(notifications.len(), MAX_PENDING);
    assert_eq!(notifications.latest().unwrap().id, last);
    assert!(!notifications.dismiss(first), "oldest entries are dropped first");
    assert_eq!(
        notifications.iter().next().unwrap().message,
        format!("message {}", MAX_PENDING * 2)
    );
}
