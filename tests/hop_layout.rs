use concentric_core::output::LayoutOutput;
use concentric_core::{
    CurveVariant, HopLayout, LayoutError, LayoutParameters, MemoryGraph, Point, PropertyValue,
    TierOrder,
};

fn scenario_graph() -> MemoryGraph {
    let g = MemoryGraph::undirected();
    for (id, x, y) in [
        ("0", 5.0, 5.0),
        ("1", 0.0, 0.0),
        ("2", 0.0, 0.0),
        ("3", 0.0, 0.0),
        ("4", 0.0, 0.0),
    ] {
        g.add_node(id, Point::new(x, y)).unwrap();
    }
    for (a, b) in [("0", "1"), ("0", "2"), ("1", "3"), ("2", "4")] {
        g.add_edge(a, b).unwrap();
    }
    g
}

fn fast(root: &str) -> LayoutParameters {
    LayoutParameters {
        root_id: root.to_string(),
        speed: 5000.0,
        coverage: 1.0,
        ..LayoutParameters::default()
    }
}

#[test]
fn test_scenario_first_pass() {
    let g = scenario_graph();
    let mut layout = HopLayout::concentric();
    layout.start();

    let report = layout.run_one_pass(&g).unwrap();
    assert_eq!(report.root_id, "0");
    assert!(!report.substituted);
    assert_eq!(report.tiers, vec![vec!["1", "2"], vec!["3", "4"]]);

    let m = 0.6 * (10.0 / 10000.0);
    let p1 = g.position("1").unwrap();
    assert!((p1.x - 100.0 * m).abs() < 1e-9);
    assert!(p1.y.abs() < 1e-9);
}

#[test]
fn test_circle_layout_converges() {
    let g = scenario_graph();
    let mut layout = HopLayout::concentric();
    layout.set_parameters(fast("0")).unwrap();
    layout.start();
    for _ in 0..60 {
        layout.run_one_pass(&g).unwrap();
    }

    let expect = [
        ("0", Point::ORIGIN),
        ("1", Point::new(100.0, 0.0)),
        ("2", Point::new(-100.0, 0.0)),
        ("3", Point::new(200.0, 0.0)),
        ("4", Point::new(-200.0, 0.0)),
    ];
    for (id, target) in expect {
        let p = g.position(id).unwrap();
        assert!(p.distance(&target) < 1e-6, "{} at {:?}", id, p);
    }
}

#[test]
fn test_heart_layout_converges_to_heart_curve() {
    let g = MemoryGraph::undirected();
    g.add_node("c", Point::ORIGIN).unwrap();
    for leaf in ["n", "e", "s", "w"] {
        g.add_node(leaf, Point::ORIGIN).unwrap();
        g.add_edge("c", leaf).unwrap();
    }
    let mut layout = HopLayout::heart();
    layout.set_parameters(fast("c")).unwrap();
    layout.start();
    for _ in 0..60 {
        layout.run_one_pass(&g).unwrap();
    }

    // Slots at 0, pi/2, pi, 3pi/2 have shape factors 2, 0, 2, 4.
    let n = g.position("n").unwrap();
    assert!(n.y.abs() < 1e-4);
    assert!((n.x - 200.0).abs() < 1e-4);
    let w = g.position("w").unwrap();
    assert!((w.y + 400.0).abs() < 1e-4);
    let s = g.position("s").unwrap();
    assert!((s.x + 200.0).abs() < 1e-4);
    // The notch at pi/2 pulls "e" onto the center.
    let e = g.position("e").unwrap();
    assert!(e.distance(&Point::ORIGIN) < 1e-4);
}

#[test]
fn test_topology_changes_between_passes_are_picked_up() {
    let g = scenario_graph();
    let mut layout = HopLayout::concentric();
    layout.set_property("Node", PropertyValue::Text("0".to_string())).unwrap();
    layout.start();
    layout.run_one_pass(&g).unwrap();

    g.add_node("5", Point::ORIGIN).unwrap();
    g.add_edge("4", "5").unwrap();
    g.add_node("island", Point::ORIGIN).unwrap();

    let report = layout.run_one_pass(&g).unwrap();
    assert_eq!(
        report.tiers,
        vec![vec!["1", "2"], vec!["3", "4"], vec!["5"], vec!["island"]]
    );

    g.remove_node("2").unwrap();
    let report = layout.run_one_pass(&g).unwrap();
    // 4 and 5 lost their path to the root and fall into the leftover tier.
    assert_eq!(
        report.tiers,
        vec![vec!["1"], vec!["3"], vec!["4", "5", "island"]]
    );
}

#[test]
fn test_directed_graph_json() {
    let g = MemoryGraph::from_json(
        r#"{
            "directed": true,
            "nodes": [
                {"id": "a", "x": 0, "y": 0},
                {"id": "b", "x": 0, "y": 0},
                {"id": "c", "x": 0, "y": 0},
                {"id": "d", "x": 0, "y": 0}
            ],
            "edges": [
                {"from": "a", "to": "b"},
                {"from": "b", "to": "c"},
                {"from": "d", "to": "a"}
            ]
        }"#,
    )
    .unwrap();
    let mut layout = HopLayout::concentric();
    layout.set_property("Node", PropertyValue::Text("a".to_string())).unwrap();
    layout.start();

    let report = layout.run_one_pass(&g).unwrap();
    assert_eq!(report.tiers, vec![vec!["b"], vec!["c"], vec!["d"]]);
}

#[test]
fn test_by_id_order_is_independent_of_insertion() {
    let forward = MemoryGraph::undirected();
    let backward = MemoryGraph::undirected();
    for g in [&forward, &backward] {
        g.add_node("r", Point::ORIGIN).unwrap();
    }
    for id in ["x", "y", "z"] {
        forward.add_node(id, Point::ORIGIN).unwrap();
        forward.add_edge("r", id).unwrap();
    }
    for id in ["z", "y", "x"] {
        backward.add_node(id, Point::ORIGIN).unwrap();
        backward.add_edge("r", id).unwrap();
    }

    let mut params = fast("r");
    params.set_tier_order(TierOrder::ById);
    let mut layout = HopLayout::new(CurveVariant::Circle);
    layout.set_parameters(params).unwrap();
    layout.start();

    let a = layout.run_one_pass(&forward).unwrap();
    let b = layout.run_one_pass(&backward).unwrap();
    assert_eq!(a.tiers, b.tiers);
    assert_eq!(forward.position("y"), backward.position("y"));
}

#[test]
fn test_stopped_layout_does_not_move_nodes() {
    let g = scenario_graph();
    let mut layout = HopLayout::concentric();
    layout.start();
    layout.run_one_pass(&g).unwrap();
    layout.stop();

    let before = g.positions();
    assert_eq!(layout.run_one_pass(&g).unwrap_err(), LayoutError::NotRunning);
    assert_eq!(g.positions(), before);
}

#[test]
fn test_step_output_json_after_substituted_root() {
    let g = MemoryGraph::from_json(
        r#"{"nodes": [{"id": "hub", "x": 0, "y": 0}, {"id": "a", "x": 0, "y": 0}, {"id": "loose"}],
            "edges": [{"from": "hub", "to": "a"}]}"#,
    )
    .unwrap();
    let mut layout = HopLayout::concentric();
    layout.set_parameters(fast("missing")).unwrap();
    layout.start();

    assert_eq!(
        layout.run_one_pass(&g).unwrap_err(),
        LayoutError::MissingPosition { id: "loose".to_string() }
    );
    assert_eq!(layout.parameters().root_id, "hub");

    g.set_position("loose", Point::ORIGIN).unwrap();
    let report = layout.run_one_pass(&g).unwrap();
    let output = LayoutOutput::from_pass(report, g.positions());
    let json: serde_json::Value = serde_json::to_value(&output).unwrap();

    assert_eq!(json["root"], "hub");
    assert_eq!(json["tiers"], serde_json::json!([["a"], ["loose"]]));
    assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    assert!(json.get("error").is_none());
}
