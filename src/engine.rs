// Layout lifecycle.
//
// States: Idle -> Running (start) -> Idle (stop, or an empty graph).
// While Running, every run_one_pass call performs exactly one pass:
//   1. acquire the graph's read guard
//   2. partition into hop tiers (root resolved, possibly substituted)
//   3. step the root and every tier toward its curve
//   4. release the guard
// The host owns the animation loop and decides when to stop; there is no
// convergence check here.

use log::{info, warn};

use crate::error::LayoutError;
use crate::graph::{GraphView, Topology};
use crate::layout::{CurveVariant, partition, place};
use crate::params::{LayoutParameters, PropertyDescriptor, PropertyValue, property_descriptors};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LayoutState {
    #[default]
    Idle,
    Running,
}

/// Informational messages for the host's notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutNotice {
    EmptyGraph,
    RootSubstituted { requested: String, chosen: String },
}

impl LayoutNotice {
    /// Message text suitable for a dialog.
    pub fn message(&self) -> String {
        match self {
            LayoutNotice::EmptyGraph => "The graph is empty".to_string(),
            LayoutNotice::RootSubstituted { requested, chosen } => format!(
                "The root node '{}' does not exist. Choosing '{}' as the root node.",
                requested, chosen
            ),
        }
    }
}

/// Host-provided sink for [`LayoutNotice`]s.
pub trait Notifier {
    fn notify(&self, notice: &LayoutNotice);
}

impl<F: Fn(&LayoutNotice)> Notifier for F {
    fn notify(&self, notice: &LayoutNotice) {
        self(notice)
    }
}

/// Forwards notices to the `log` facade.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &LayoutNotice) {
        info!("{}", notice.message());
    }
}

/// What a successful pass did.
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    pub root_id: String,
    pub substituted: bool,
    /// Node ids per tier, tier 1 first.
    pub tiers: Vec<Vec<String>>,
}

/// A hop layout bound to one curve variant.
pub struct HopLayout {
    variant: CurveVariant,
    params: LayoutParameters,
    state: LayoutState,
    notifier: Box<dyn Notifier>,
}

impl std::fmt::Debug for HopLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HopLayout")
            .field("variant", &self.variant)
            .field("params", &self.params)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl HopLayout {
    pub fn new(variant: CurveVariant) -> Self {
        Self {
            variant,
            params: LayoutParameters::default(),
            state: LayoutState::Idle,
            notifier: Box::new(LogNotifier),
        }
    }

    pub fn concentric() -> Self {
        Self::new(CurveVariant::Circle)
    }

    pub fn heart() -> Self {
        Self::new(CurveVariant::Heart)
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn variant(&self) -> CurveVariant {
        self.variant
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn parameters(&self) -> &LayoutParameters {
        &self.params
    }

    /// Replace all parameters at once; rejected sets leave the old ones in place.
    pub fn set_parameters(&mut self, params: LayoutParameters) -> Result<(), LayoutError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<(), LayoutError> {
        self.params.set(name, value)
    }

    pub fn properties(&self) -> Vec<PropertyDescriptor> {
        property_descriptors(self.variant)
    }

    pub fn reset_defaults(&mut self) {
        self.params = LayoutParameters::default();
    }

    pub fn start(&mut self) {
        self.state = LayoutState::Running;
    }

    pub fn stop(&mut self) {
        self.state = LayoutState::Idle;
    }

    pub fn is_running(&self) -> bool {
        self.state == LayoutState::Running
    }

    /// Perform one placement pass over `graph`.
    pub fn run_one_pass<G: GraphView>(&mut self, graph: &G) -> Result<PassReport, LayoutError> {
        if !self.is_running() {
            return Err(LayoutError::NotRunning);
        }

        let topo = graph.read();
        let split = match partition(&topo, &self.params.root_id, self.params.tier_order) {
            Ok(split) => split,
            Err(LayoutError::EmptyGraph) => {
                self.notifier.notify(&LayoutNotice::EmptyGraph);
                self.stop();
                return Err(LayoutError::EmptyGraph);
            }
            Err(e) => return Err(e),
        };

        if let Some(sub) = &split.substitution {
            self.notifier.notify(&LayoutNotice::RootSubstituted {
                requested: sub.requested.clone(),
                chosen: sub.chosen.clone(),
            });
            // Later passes keep the substitute until the host picks a root.
            self.params.root_id = sub.chosen.clone();
        }

        if let Err(e) = place(&topo, &split, self.variant, &self.params) {
            warn!("{} pass aborted: {}", self.variant.display_name(), e);
            return Err(e);
        }

        Ok(PassReport {
            root_id: topo.node_id(&split.root),
            substituted: split.substitution.is_some(),
            tiers: split
                .tiers
                .iter()
                .map(|tier| tier.iter().map(|n| topo.node_id(n)).collect())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{MemoryGraph, Point};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(layout: HopLayout) -> (HopLayout, Rc<RefCell<Vec<LayoutNotice>>>) {
        let seen: Rc<RefCell<Vec<LayoutNotice>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let layout = layout.with_notifier(move |n: &LayoutNotice| sink.borrow_mut().push(n.clone()));
        (layout, seen)
    }

    fn star() -> MemoryGraph {
        let g = MemoryGraph::undirected();
        for (i, id) in ["hub", "a", "b", "c"].iter().enumerate() {
            g.add_node(id, Point::new(i as f64, 0.0)).unwrap();
        }
        for leaf in ["a", "b", "c"] {
            g.add_edge("hub", leaf).unwrap();
        }
        g
    }

    #[test]
    fn test_lifecycle_states() {
        let mut layout = HopLayout::concentric();
        assert_eq!(layout.state(), LayoutState::Idle);
        assert!(!layout.is_running());
        layout.start();
        assert!(layout.is_running());
        layout.stop();
        assert_eq!(layout.state(), LayoutState::Idle);
    }

    #[test]
    fn test_pass_requires_running() {
        let g = star();
        let mut layout = HopLayout::heart();
        assert_eq!(layout.run_one_pass(&g).unwrap_err(), LayoutError::NotRunning);
        assert_eq!(g.position("a"), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn test_empty_graph_notifies_once_and_stops() {
        let g = MemoryGraph::undirected();
        let (mut layout, seen) = recording(HopLayout::concentric());
        layout.start();

        assert_eq!(layout.run_one_pass(&g).unwrap_err(), LayoutError::EmptyGraph);
        assert_eq!(*seen.borrow(), vec![LayoutNotice::EmptyGraph]);
        assert!(!layout.is_running());
    }

    #[test]
    fn test_root_substitution_is_reported() {
        let g = star();
        let (mut layout, seen) = recording(HopLayout::concentric());
        layout.start();

        let report = layout.run_one_pass(&g).unwrap();
        assert_eq!(report.root_id, "hub");
        assert!(report.substituted);
        assert_eq!(report.tiers, vec![vec!["a", "b", "c"]]);
        assert_eq!(
            *seen.borrow(),
            vec![LayoutNotice::RootSubstituted {
                requested: "0".to_string(),
                chosen: "hub".to_string(),
            }]
        );
        assert!(layout.is_running());
    }

    #[test]
    fn test_substituted_root_is_kept_across_passes() {
        let g = star();
        let (mut layout, seen) = recording(HopLayout::concentric());
        layout.start();

        for _ in 0..5 {
            let report = layout.run_one_pass(&g).unwrap();
            assert_eq!(report.root_id, "hub");
        }
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(layout.parameters().root_id, "hub");

        // A host-chosen root that is later removed is substituted again.
        layout.set_property("Node", PropertyValue::Text("a".to_string())).unwrap();
        g.remove_node("a").unwrap();
        layout.run_one_pass(&g).unwrap();
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(layout.parameters().root_id, "hub");
    }

    #[test]
    fn test_known_root_sends_no_notice() {
        let g = star();
        let (mut layout, seen) = recording(HopLayout::heart());
        layout.set_property("Node", PropertyValue::Text("hub".to_string())).unwrap();
        layout.start();

        let report = layout.run_one_pass(&g).unwrap();
        assert!(!report.substituted);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_missing_position_keeps_running() {
        let g = MemoryGraph::undirected();
        g.add_node("0", Point::ORIGIN).unwrap();
        g.add_unplaced_node("lost").unwrap();
        g.add_edge("0", "lost").unwrap();

        let mut layout = HopLayout::concentric();
        layout.start();
        assert_eq!(
            layout.run_one_pass(&g).unwrap_err(),
            LayoutError::MissingPosition { id: "lost".to_string() }
        );
        assert!(layout.is_running());
    }

    #[test]
    fn test_reset_and_replace_parameters() {
        let mut layout = HopLayout::concentric();
        layout.set_property("Distance", PropertyValue::Float(20.0)).unwrap();
        assert_eq!(layout.parameters().spacing, 20.0);

        let bad = LayoutParameters {
            coverage: 3.0,
            ..LayoutParameters::default()
        };
        assert!(layout.set_parameters(bad).is_err());
        assert_eq!(layout.parameters().spacing, 20.0);

        layout.reset_defaults();
        assert_eq!(*layout.parameters(), LayoutParameters::default());
        assert_eq!(layout.properties()[0].category, "Concentric Layout");
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(LayoutNotice::EmptyGraph.message(), "The graph is empty");
        let msg = LayoutNotice::RootSubstituted {
            requested: "x".to_string(),
            chosen: "y".to_string(),
        }
        .message();
        assert!(msg.contains("'x'") && msg.contains("'y'"));
    }
}
