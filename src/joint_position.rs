//! Joint positions of the robot and of the external axes, as taught on the controller.
//! Robot axes are in degrees. External axes are in degrees (rotational) or millimeters
//! (linear); an external axis that is not connected has no value.

use std::fmt;
use crate::kinematic_traits::Joints;
use crate::utils::{fmt_value, joints};

/// Six robot axis values in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RobotJointPosition([f64; 6]);

impl RobotJointPosition {
    pub fn new(degrees: [f64; 6]) -> Self {
        RobotJointPosition(degrees)
    }

    pub fn values(&self) -> &[f64; 6] {
        &self.0
    }

    /// Value of the zero based axis
    pub fn value(&self, axis: usize) -> f64 {
        self.0[axis]
    }

    /// Joint angles as the kinematics expects them
    pub fn to_radians(&self) -> Joints {
        joints(&self.0)
    }

    pub fn is_finite(&self) -> bool {
        crate::utils::is_valid(&self.0)
    }
}

impl From<[f64; 6]> for RobotJointPosition {
    fn from(degrees: [f64; 6]) -> Self {
        RobotJointPosition(degrees)
    }
}

impl fmt::Display for RobotJointPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.0.iter().map(|v| fmt_value(*v)).collect();
        write!(f, "[{}]", values.join(", "))
    }
}

/// Six external axis values. `None` marks an axis that is not connected.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExternalJointPosition([Option<f64>; 6]);

impl ExternalJointPosition {
    pub fn new(values: [Option<f64>; 6]) -> Self {
        ExternalJointPosition(values)
    }

    /// All external axes not connected.
    pub fn unset() -> Self {
        ExternalJointPosition([None; 6])
    }

    /// Takes up to six values for the leading axes, the rest remain unset.
    pub fn from_slice(values: &[f64]) -> Self {
        ExternalJointPosition(std::array::from_fn(|i| values.get(i).copied()))
    }

    pub fn values(&self) -> &[Option<f64>; 6] {
        &self.0
    }

    /// Value of the zero based axis, `None` if not set.
    pub fn value(&self, axis: usize) -> Option<f64> {
        self.0.get(axis).copied().flatten()
    }

    pub fn is_unset(&self) -> bool {
        self.0.iter().all(|v| v.is_none())
    }

    /// Set values must be finite, unset values are fine.
    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|v| v.is_finite())
    }
}

impl fmt::Display for ExternalJointPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.0.iter()
            .map(|v| v.map_or("-".to_string(), fmt_value))
            .collect();
        write!(f, "[{}]", values.join(", "))
    }
}
