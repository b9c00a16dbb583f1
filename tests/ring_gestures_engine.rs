use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spell_ring::ring_gestures::engine::{
    DragState, Edge, GestureTracker, NodeEvent, TrackOutcome,
};
use std::collections::HashSet;

fn drag(tracker: &mut GestureTracker, nodes: &[usize]) {
    let (first, rest) = nodes.split_first().expect("non-empty drag");
    tracker.handle(NodeEvent::PointerDown(*first));
    for &node in rest {
        tracker.handle(NodeEvent::HoverEnter(node));
    }
}

fn assert_degrees_match_edges(tracker: &GestureTracker) {
    for node in 0..tracker.node_count() {
        let touching = tracker.edges().filter(|edge| edge.touches(node)).count() as u32;
        assert_eq!(tracker.degree(node), touching, "degree of node {node}");
        assert_eq!(tracker.is_active(node), touching > 0);
    }
}

#[test]
fn edge_is_canonical_and_rejects_self_loops() {
    assert_eq!(Edge::new(3, 1), Edge::new(1, 3));
    assert_eq!(Edge::new(3, 1).map(Edge::nodes), Some((1, 3)));
    assert!(Edge::new(2, 2).is_none());
}

#[test]
fn drag_extends_sequence_and_degrees() {
    let mut tracker = GestureTracker::new(5);

    assert_eq!(
        tracker.handle(NodeEvent::PointerDown(0)),
        TrackOutcome::DragStarted { node: 0 }
    );
    assert_eq!(tracker.state(), DragState::Dragging);
    assert_eq!(tracker.sequence(), &[0]);

    let outcome = tracker.handle(NodeEvent::HoverEnter(2));
    assert_eq!(
        outcome,
        TrackOutcome::EdgeFormed {
            edge: Edge::new(0, 2).unwrap()
        }
    );
    assert!(outcome.sequence_extended());
    tracker.handle(NodeEvent::HoverEnter(4));

    assert_eq!(tracker.sequence(), &[0, 2, 4]);
    assert_eq!(tracker.edge_count(), 2);
    assert_eq!(tracker.degree(0), 1);
    assert_eq!(tracker.degree(2), 2);
    assert_eq!(tracker.degree(4), 1);
    assert!(!tracker.is_active(1));
    assert_eq!(tracker.open_node(), Some(4));
}

#[test]
fn reforming_an_edge_changes_nothing() {
    let mut tracker = GestureTracker::new(5);
    drag(&mut tracker, &[0, 1]);

    let outcome = tracker.handle(NodeEvent::HoverEnter(0));

    assert_eq!(
        outcome,
        TrackOutcome::DuplicateEdge {
            edge: Edge::new(0, 1).unwrap()
        }
    );
    assert!(!outcome.sequence_extended());
    assert_eq!(tracker.edge_count(), 1);
    assert_eq!(tracker.degree(0), 1);
    assert_eq!(tracker.degree(1), 1);
    assert_eq!(tracker.sequence(), &[0, 1]);
    assert_eq!(tracker.open_node(), Some(1));
}

#[test]
fn hovering_the_open_node_forms_no_edge() {
    let mut tracker = GestureTracker::new(5);
    tracker.handle(NodeEvent::PointerDown(3));

    assert_eq!(
        tracker.handle(NodeEvent::HoverEnter(3)),
        TrackOutcome::Highlight { node: 3, lit: true }
    );
    assert_eq!(tracker.edge_count(), 0);
    assert_eq!(tracker.sequence(), &[3]);
}

#[test]
fn tap_without_connection_unhighlights_but_keeps_sequence() {
    let mut tracker = GestureTracker::new(5);
    tracker.handle(NodeEvent::PointerDown(1));
    assert!(tracker.is_highlighted(1));

    assert_eq!(
        tracker.handle(NodeEvent::PointerUp),
        TrackOutcome::Released { cancelled: true }
    );

    assert_eq!(tracker.state(), DragState::Idle);
    assert!(!tracker.is_highlighted(1));
    assert!(!tracker.is_active(1));
    assert_eq!(tracker.sequence(), &[1]);
}

#[test]
fn release_keeps_formed_edges() {
    let mut tracker = GestureTracker::new(5);
    drag(&mut tracker, &[0, 1]);

    assert_eq!(
        tracker.handle(NodeEvent::PointerUp),
        TrackOutcome::Released { cancelled: false }
    );

    assert_eq!(tracker.edge_count(), 1);
    assert_eq!(tracker.sequence(), &[0, 1]);
    assert!(tracker.is_highlighted(0));
    assert!(tracker.is_highlighted(1));
    assert!(tracker.session().is_none());
}

#[test]
fn pointer_up_while_idle_is_ignored() {
    let mut tracker = GestureTracker::new(5);
    assert_eq!(tracker.handle(NodeEvent::PointerUp), TrackOutcome::Ignored);
}

#[test]
fn out_of_range_nodes_are_ignored() {
    let mut tracker = GestureTracker::new(5);

    assert_eq!(tracker.handle(NodeEvent::PointerDown(5)), TrackOutcome::Ignored);
    assert_eq!(tracker.state(), DragState::Idle);
    assert!(tracker.sequence().is_empty());

    tracker.handle(NodeEvent::PointerDown(0));
    assert_eq!(tracker.handle(NodeEvent::HoverEnter(9)), TrackOutcome::Ignored);
    assert_eq!(tracker.handle(NodeEvent::HoverExit(9)), TrackOutcome::Ignored);
    assert_eq!(tracker.sequence(), &[0]);
    assert_eq!(tracker.edge_count(), 0);
    assert!(!tracker.is_highlighted(9));
}

#[test]
fn second_drag_from_last_node_does_not_repeat_it() {
    let mut tracker = GestureTracker::new(5);
    drag(&mut tracker, &[0, 1]);
    tracker.handle(NodeEvent::PointerUp);

    drag(&mut tracker, &[1, 2]);

    assert_eq!(tracker.sequence(), &[0, 1, 2]);
    assert_eq!(tracker.edge_count(), 2);
}

#[test]
fn closing_a_loop_appends_the_revisited_node() {
    let mut tracker = GestureTracker::new(5);
    drag(&mut tracker, &[0, 1, 2, 0]);

    assert_eq!(tracker.sequence(), &[0, 1, 2, 0]);
    assert_eq!(tracker.edge_count(), 3);
    assert_eq!(tracker.degree(0), 2);
}

#[test]
fn hover_exit_keeps_pressed_and_active_nodes_lit() {
    let mut tracker = GestureTracker::new(5);
    tracker.handle(NodeEvent::HoverEnter(3));
    assert!(tracker.is_highlighted(3));
    assert_eq!(
        tracker.handle(NodeEvent::HoverExit(3)),
        TrackOutcome::Highlight { node: 3, lit: false }
    );
    assert!(!tracker.is_highlighted(3));

    tracker.handle(NodeEvent::PointerDown(0));
    assert_eq!(
        tracker.handle(NodeEvent::HoverExit(0)),
        TrackOutcome::Highlight { node: 0, lit: true }
    );

    tracker.handle(NodeEvent::HoverEnter(1));
    assert_eq!(
        tracker.handle(NodeEvent::HoverExit(1)),
        TrackOutcome::Highlight { node: 1, lit: true }
    );
}

#[test]
fn clear_resets_everything() {
    let mut tracker = GestureTracker::new(5);
    drag(&mut tracker, &[0, 2, 4, 1]);
    tracker.handle(NodeEvent::HoverEnter(3));

    tracker.clear();

    assert_eq!(tracker.state(), DragState::Idle);
    assert_eq!(tracker.edge_count(), 0);
    assert!(tracker.sequence().is_empty());
    for node in 0..5 {
        assert_eq!(tracker.degree(node), 0);
        assert!(!tracker.is_highlighted(node));
    }
}

#[test]
fn edges_are_reported_in_formation_order() {
    let mut tracker = GestureTracker::new(5);
    drag(&mut tracker, &[4, 2, 0]);

    let edges: Vec<_> = tracker.edges().map(Edge::nodes).collect();
    assert_eq!(edges, vec![(2, 4), (0, 2)]);
    assert!(tracker.contains_edge(0, 2));
    assert!(tracker.contains_edge(4, 2));
    assert!(!tracker.contains_edge(0, 4));
}

#[test]
fn random_events_keep_graph_consistent() {
    let node_count = 6;
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut tracker = GestureTracker::new(node_count);
    let mut was_active = vec![false; node_count];

    for _ in 0..2_000 {
        let node = rng.gen_range(0..node_count + 1);
        let event = match rng.gen_range(0..10) {
            0 => NodeEvent::PointerDown(node),
            1 => NodeEvent::PointerUp,
            2 | 3 => NodeEvent::HoverExit(node),
            _ => NodeEvent::HoverEnter(node),
        };
        let edges_before = tracker.edge_count();
        let sequence_before = tracker.sequence().to_vec();
        let outcome = tracker.handle(event);

        if let TrackOutcome::DuplicateEdge { .. } = outcome {
            assert_eq!(tracker.edge_count(), edges_before);
            assert_eq!(tracker.sequence(), sequence_before.as_slice());
        }

        let unique: HashSet<_> = tracker.edges().collect();
        assert_eq!(unique.len(), tracker.edge_count());
        assert_degrees_match_edges(&tracker);
        assert!(tracker
            .sequence()
            .windows(2)
            .all(|pair| pair[0] != pair[1]));
        for (node, active) in was_active.iter_mut().enumerate() {
            if *active {
                assert!(tracker.is_active(node), "node {node} lost activation");
            }
            *active = tracker.is_active(node);
        }
    }
}

#[test]
fn single_drag_sequence_is_bounded_by_hover_count() {
    let node_count = 8;
    let mut rng = StdRng::seed_from_u64(42);
    let mut tracker = GestureTracker::new(node_count);
    tracker.handle(NodeEvent::PointerDown(0));

    let mut enters = 0;
    for _ in 0..500 {
        tracker.handle(NodeEvent::HoverEnter(rng.gen_range(0..node_count)));
        enters += 1;
        assert!(tracker.sequence().len() <= enters + 1);
    }
    assert_degrees_match_edges(&tracker);
    assert!(tracker.edge_count() <= node_count * (node_count - 1) / 2);
}
