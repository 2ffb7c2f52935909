//! Hop-based radial layouts.
//!
//! Nodes are placed on concentric curves (circles, or hearts) around a root,
//! curve k holding the nodes k hops away. Each pass moves every node a small
//! fraction of the way toward its slot, so repeated passes animate the
//! convergence.

pub mod engine;
pub mod error;
pub mod graph;
pub mod layout;
pub mod output;
pub mod params;
mod wasm;

pub use engine::{HopLayout, LayoutNotice, LayoutState, LogNotifier, Notifier, PassReport};
pub use error::{GraphError, LayoutError};
pub use graph::{GraphView, MemoryGraph, Point, Topology};
pub use layout::{CurveVariant, Partition, RootSubstitution, TierOrder, partition, place};
pub use params::{LayoutParameters, PropertyDescriptor, PropertyKind, PropertyValue, property_descriptors};
pub use wasm::ConcentricLayout;
