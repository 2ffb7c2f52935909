// Hop layout: concentric placement of a graph around a root node.
//
// Pipeline per pass:
// - partition: breadth-first split of the nodes into tiers by hop distance
//   from the root (tier 1 = direct neighbors). Unreachable leftovers become
//   one trailing tier.
// - placement: tier k sits on curve k. Each tier's nodes get equal angular
//   slots, and every node moves a fixed fraction of the way toward its slot.
//
// Curves:
// - Circle: radius = k * spacing
// - Heart:  radius = k * spacing * shape_factor(theta)

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

pub mod partition;
pub mod placement;

pub use partition::{Partition, RootSubstitution, partition};
pub use placement::{interpolate, place, slot_angle, tier_target};

/// The family of target curves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveVariant {
    /// Concentric circles.
    #[default]
    Circle,
    /// Concentric hearts.
    Heart,
}

impl CurveVariant {
    /// Name shown to the user, also used as the property category.
    pub fn display_name(&self) -> &'static str {
        match self {
            CurveVariant::Circle => "Concentric Layout",
            CurveVariant::Heart => "Heart Layout",
        }
    }

    /// Noun used in property descriptions ("circles", "hearts").
    pub fn curve_noun(&self) -> &'static str {
        match self {
            CurveVariant::Circle => "circles",
            CurveVariant::Heart => "hearts",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "circle" | "concentric" => Some(CurveVariant::Circle),
            "heart" => Some(CurveVariant::Heart),
            _ => None,
        }
    }

    /// Radius of curve `tier` at angle `theta`.
    pub fn radius(&self, tier: usize, spacing: f64, theta: f64) -> f64 {
        let base = tier as f64 * spacing;
        match self {
            CurveVariant::Circle => base,
            CurveVariant::Heart => base * shape_factor(theta),
        }
    }
}

/// Heart silhouette radius modulation.
pub fn shape_factor(theta: f64) -> f64 {
    let s = theta.sin();
    (s * theta.cos().abs().sqrt()) / (s + 7.0 / 5.0) - 2.0 * s + 2.0
}

/// Order of nodes inside a tier, which fixes their angular slots.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierOrder {
    /// Breadth-first discovery order.
    #[default]
    Discovery,
    /// Sorted by node id.
    ById,
}

/// A full turn, split evenly between the members of a tier.
pub(crate) const FULL_TURN: f64 = 2.0 * PI;
