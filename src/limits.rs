//! Axis limits of the robot and external axes, in degrees or millimeters
//! as declared by the controller configuration.

use std::fmt;
use crate::joint_position::RobotJointPosition;
use crate::utils::fmt_value;

/// Closed interval of allowed axis values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Creates the interval, swapping the bounds if given in reverse order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Interval { min: a, max: b }
        } else {
            Interval { min: b, max: a }
        }
    }

    /// Interval that accepts any finite value.
    pub fn unbounded() -> Self {
        Interval { min: f64::NEG_INFINITY, max: f64::INFINITY }
    }

    /// Bounds are inclusive. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::unbounded()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", fmt_value(self.min), fmt_value(self.max))
    }
}

/// Limits of the six robot axes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisLimits {
    pub intervals: [Interval; 6],
}

impl AxisLimits {
    pub fn new(intervals: [Interval; 6]) -> Self {
        AxisLimits { intervals }
    }

    /// Builds limits from pairs of (lower, upper) values.
    pub fn from_degrees(from: [f64; 6], to: [f64; 6]) -> Self {
        AxisLimits {
            intervals: std::array::from_fn(|i| Interval::new(from[i], to[i])),
        }
    }

    /// No limits on any axis.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn compliant(&self, position: &RobotJointPosition) -> bool {
        self.violations(position).is_empty()
    }

    /// Zero based indices of the axes out of their interval.
    pub fn violations(&self, position: &RobotJointPosition) -> Vec<usize> {
        position.values().iter()
            .zip(self.intervals.iter())
            .enumerate()
            .filter(|(_, (value, interval))| !interval.contains(**value))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn filter(&self, positions: &[RobotJointPosition]) -> Vec<RobotJointPosition> {
        positions.iter()
            .filter(|position| self.compliant(position))
            .cloned()
            .collect()
    }
}
