//! User-tunable layout parameters and their property descriptors.
//!
//! The host UI enumerates [`property_descriptors`] and reads or writes values
//! by descriptor name through [`LayoutParameters::get`] / [`LayoutParameters::set`].
//! Every write is validated here, never mid-pass.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::layout::{CurveVariant, TierOrder};

pub const DEFAULT_ROOT_ID: &str = "0";
pub const DEFAULT_SPACING: f64 = 100.0;
pub const DEFAULT_SPEED: f64 = 10.0;
pub const DEFAULT_COVERAGE: f64 = 0.6;

/// Speed is expressed in ten-thousandths of the remaining distance.
const SPEED_SCALE: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParameters {
    /// Id of the node placed at the center.
    pub root_id: String,
    /// Distance between consecutive curves.
    pub spacing: f64,
    pub speed: f64,
    /// Fraction in [0, 1], multiplied with speed to form the step fraction.
    pub coverage: f64,
    pub tier_order: TierOrder,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            root_id: DEFAULT_ROOT_ID.to_string(),
            spacing: DEFAULT_SPACING,
            speed: DEFAULT_SPEED,
            coverage: DEFAULT_COVERAGE,
            tier_order: TierOrder::Discovery,
        }
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), LayoutError> {
    if !value.is_finite() {
        return Err(LayoutError::invalid(name, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(LayoutError::invalid(name, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

fn check_coverage(value: f64) -> Result<(), LayoutError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(LayoutError::invalid(
            "Coverage",
            format!("must be within [0, 1], got {}", value),
        ));
    }
    Ok(())
}

impl LayoutParameters {
    /// Fraction of the remaining distance covered per pass, clamped to [0, 1].
    pub fn step_fraction(&self) -> f64 {
        (self.coverage * (self.speed / SPEED_SCALE)).clamp(0.0, 1.0)
    }

    /// Check a whole parameter set, e.g. one deserialized from the host.
    pub fn validate(&self) -> Result<(), LayoutError> {
        check_non_negative("Distance", self.spacing)?;
        check_non_negative("Speed", self.speed)?;
        check_coverage(self.coverage)
    }

    pub fn set_root_id(&mut self, root_id: impl Into<String>) {
        self.root_id = root_id.into();
    }

    pub fn set_spacing(&mut self, spacing: f64) -> Result<(), LayoutError> {
        check_non_negative("Distance", spacing)?;
        self.spacing = spacing;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), LayoutError> {
        check_non_negative("Speed", speed)?;
        self.speed = speed;
        Ok(())
    }

    pub fn set_coverage(&mut self, coverage: f64) -> Result<(), LayoutError> {
        check_coverage(coverage)?;
        self.coverage = coverage;
        Ok(())
    }

    pub fn set_tier_order(&mut self, order: TierOrder) {
        self.tier_order = order;
    }

    /// Read a property by descriptor name.
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        match name {
            PROP_DISTANCE => Some(PropertyValue::Float(self.spacing)),
            PROP_NODE => Some(PropertyValue::Text(self.root_id.clone())),
            PROP_SPEED => Some(PropertyValue::Float(self.speed)),
            PROP_COVERAGE => Some(PropertyValue::Float(self.coverage)),
            _ => None,
        }
    }

    /// Write a property by descriptor name.
    pub fn set(&mut self, name: &str, value: PropertyValue) -> Result<(), LayoutError> {
        match (name, value) {
            (PROP_DISTANCE, PropertyValue::Float(v)) => self.set_spacing(v),
            (PROP_SPEED, PropertyValue::Float(v)) => self.set_speed(v),
            (PROP_COVERAGE, PropertyValue::Float(v)) => self.set_coverage(v),
            (PROP_NODE, PropertyValue::Text(v)) => {
                self.set_root_id(v);
                Ok(())
            }
            (PROP_DISTANCE | PROP_SPEED | PROP_COVERAGE, PropertyValue::Text(_)) => {
                Err(LayoutError::invalid(name, "expected a number"))
            }
            (PROP_NODE, PropertyValue::Float(_)) => {
                Err(LayoutError::invalid(name, "expected a node id"))
            }
            _ => Err(LayoutError::invalid(name, "unknown property")),
        }
    }
}

pub const PROP_DISTANCE: &str = "Distance";
pub const PROP_NODE: &str = "Node";
pub const PROP_SPEED: &str = "Speed";
pub const PROP_COVERAGE: &str = "Coverage";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum PropertyKind {
    Float,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Float(f64),
    Text(String),
}

/// One entry of the host-facing property list.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub category: &'static str,
    pub description: String,
    pub kind: PropertyKind,
    pub default: PropertyValue,
}

/// The parameters a host UI should expose, in display order.
pub fn property_descriptors(variant: CurveVariant) -> Vec<PropertyDescriptor> {
    let category = variant.display_name();
    vec![
        PropertyDescriptor {
            name: PROP_DISTANCE,
            category,
            description: format!("distance between consecutive concentric {}", variant.curve_noun()),
            kind: PropertyKind::Float,
            default: PropertyValue::Float(DEFAULT_SPACING),
        },
        PropertyDescriptor {
            name: PROP_NODE,
            category,
            description: "the root node to be set as the center".to_string(),
            kind: PropertyKind::Text,
            default: PropertyValue::Text(DEFAULT_ROOT_ID.to_string()),
        },
        PropertyDescriptor {
            name: PROP_SPEED,
            category,
            description: "how fast the nodes move".to_string(),
            kind: PropertyKind::Float,
            default: PropertyValue::Float(DEFAULT_SPEED),
        },
        PropertyDescriptor {
            name: PROP_COVERAGE,
            category,
            description: "what fraction of the distance the nodes cover while converging".to_string(),
            kind: PropertyKind::Float,
            default: PropertyValue::Float(DEFAULT_COVERAGE),
        },
    ]
}
