//! External axes controlled together with the robot.
//!
//! A linear axis (track) carries the robot and moves its base along a fixed direction
//! in the world; the robot pose depends on the axis value. A rotational axis
//! (positioner) turns the work object and does not carry the robot, so it has no
//! effect on the robot pose but its limits still need to be checked.

use nalgebra::{Translation3, Unit, UnitQuaternion, Vector3};
use crate::kinematic_traits::Pose;
use crate::limits::Interval;

#[derive(Debug, Clone, PartialEq)]
pub enum ExternalAxis {
    Linear {
        name: String,
        /// Direction of travel in the world
        direction: Unit<Vector3<f64>>,
        /// Travel in millimeters
        limits: Interval,
    },
    Rotational {
        name: String,
        /// Rotation in degrees
        limits: Interval,
    },
}

impl ExternalAxis {
    pub fn linear(name: impl Into<String>, direction: Unit<Vector3<f64>>, limits: Interval) -> Self {
        ExternalAxis::Linear { name: name.into(), direction, limits }
    }

    pub fn rotational(name: impl Into<String>, limits: Interval) -> Self {
        ExternalAxis::Rotational { name: name.into(), limits }
    }

    pub fn name(&self) -> &str {
        match self {
            ExternalAxis::Linear { name, .. } | ExternalAxis::Rotational { name, .. } => name,
        }
    }

    pub fn limits(&self) -> &Interval {
        match self {
            ExternalAxis::Linear { limits, .. } | ExternalAxis::Rotational { limits, .. } => limits,
        }
    }

    /// Transform this axis applies to the robot base at the given value.
    pub fn displacement(&self, value: f64) -> Pose {
        match self {
            ExternalAxis::Linear { direction, .. } => Pose::from_parts(
                Translation3::from(direction.into_inner() * value),
                UnitQuaternion::identity(),
            ),
            ExternalAxis::Rotational { .. } => Pose::identity(),
        }
    }

    /// Only linear axes carry the robot.
    pub fn moves_robot(&self) -> bool {
        matches!(self, ExternalAxis::Linear { .. })
    }
}
