// Radial placement: one damped step toward the tier curves.
//
// For tier k with S members, member j gets angle theta_j = j * 2pi / S and the
// target (rho cos theta_j, rho sin theta_j), where rho comes from the curve
// variant. Each node then moves a fraction m of the remaining distance:
//
//     new = m * target + (1 - m) * current
//
// so repeated passes converge geometrically. The root steps toward the origin
// the same way.
//
// A tier is read completely before any of its positions are written, so a
// missing position aborts the pass without leaving that tier half-stepped.

use log::debug;

use super::{CurveVariant, FULL_TURN, Partition};
use crate::error::LayoutError;
use crate::graph::{Point, Topology};
use crate::params::LayoutParameters;

/// Angle of slot `slot` in a tier of `size` members.
pub fn slot_angle(slot: usize, size: usize) -> f64 {
    slot as f64 * (FULL_TURN / size as f64)
}

/// Target position of slot `slot` on curve `tier` (1-based).
pub fn tier_target(
    variant: CurveVariant,
    tier: usize,
    slot: usize,
    size: usize,
    spacing: f64,
) -> Point {
    let theta = slot_angle(slot, size);
    let rho = variant.radius(tier, spacing, theta);
    Point::new(rho * theta.cos(), rho * theta.sin())
}

/// Move `current` a fraction `m` of the way toward `target`.
pub fn interpolate(current: Point, target: Point, m: f64) -> Point {
    let n = 1.0 - m;
    Point::new(m * target.x + n * current.x, m * target.y + n * current.y)
}

fn read_position<T: Topology>(topo: &T, node: &T::Node) -> Result<Point, LayoutError> {
    topo.position(node).ok_or_else(|| LayoutError::MissingPosition {
        id: topo.node_id(node),
    })
}

/// Apply one convergence step to the root and every tier.
pub fn place<T: Topology>(
    topo: &T,
    partition: &Partition<T::Node>,
    variant: CurveVariant,
    params: &LayoutParameters,
) -> Result<(), LayoutError> {
    // Fields are public, so a struct literal can skip the setters.
    params.validate()?;
    let m = params.step_fraction();

    let root_pos = read_position(topo, &partition.root)?;
    topo.set_position(&partition.root, interpolate(root_pos, Point::ORIGIN, m));

    for (i, tier) in partition.tiers.iter().enumerate() {
        if tier.is_empty() {
            continue;
        }
        let number = i + 1;
        let size = tier.len();

        let stepped = tier
            .iter()
            .enumerate()
            .map(|(slot, node)| {
                let current = read_position(topo, node)?;
                let target = tier_target(variant, number, slot, size, params.spacing);
                Ok::<_, LayoutError>((node, interpolate(current, target, m)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (node, position) in stepped {
            topo.set_position(node, position);
        }
    }

    debug!(
        "{}: stepped {} nodes with m = {}",
        variant.display_name(),
        partition.placed_count() + 1,
        m
    );
    Ok(())
}
