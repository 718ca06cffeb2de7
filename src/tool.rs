//! Provides the tool that is mounted on the robot flange.
//! The tool moves with the robot, providing additional translation and, if needed,
//! rotation, so the "pose" of the robot is the position and rotation of the tip of the
//! tool (tool center point) rather than the flange:
//! ```
//! use std::sync::Arc;
//! use nalgebra::Vector3;
//! use rs_tcp_calibration::joint_position::{ExternalJointPosition, RobotJointPosition};
//! use rs_tcp_calibration::limits::AxisLimits;
//! use rs_tcp_calibration::parameters::opw_kinematics::Parameters;
//! use rs_tcp_calibration::robot::Robot;
//! use rs_tcp_calibration::tool::RobotTool;
//!
//! // Tool extends 200 mm in the Z direction of the flange, envisioning something like a pin
//! let pin = RobotTool::from_tcp("pin", Vector3::new(0.0, 0.0, 200.0));
//! let robot = Robot::opw("IRB2400", Parameters::irb2400_10(), AxisLimits::unbounded())
//!     .with_tool(pin);
//!
//! let home = RobotJointPosition::new([0.0; 6]);
//! let tcp = robot.forward(&home, &ExternalJointPosition::unset());
//! // At home the flange points forward, so the pin tip is 200 mm further along x
//! assert!((tcp.translation.x - 1140.0).abs() < 1E-9);
//! ```

use std::fmt;
use nalgebra::{Translation3, UnitQuaternion, Vector3};
use crate::kinematic_traits::Pose;
use crate::utils::format_vector;

/// Name ABB controllers use for the flange itself, the tool with zero offset.
pub const TOOL0: &str = "tool0";

/// Defines the fixed tool that can be attached to the last joint (joint 6) of robot.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotTool {
    pub name: String,

    /// Transformation from the robot's flange to the tool's TCP.
    pub attachment: Pose,
}

impl RobotTool {
    pub fn new(name: impl Into<String>, attachment: Pose) -> Self {
        RobotTool { name: name.into(), attachment }
    }

    /// The flange without any tool.
    pub fn tool0() -> Self {
        RobotTool::new(TOOL0, Pose::identity())
    }

    /// Tool with the TCP shifted from the flange but not rotated, as produced by
    /// the TCP calibration.
    pub fn from_tcp(name: impl Into<String>, tcp: Vector3<f64>) -> Self {
        RobotTool::new(name, Pose::from_parts(Translation3::from(tcp), UnitQuaternion::identity()))
    }

    pub fn tcp(&self) -> Vector3<f64> {
        self.attachment.translation.vector
    }

    /// True if the TCP is at the flange (tool0 or any equivalent)
    pub fn is_zero_offset(&self) -> bool {
        self.attachment == Pose::identity()
    }
}

impl Default for RobotTool {
    fn default() -> Self {
        RobotTool::tool0()
    }
}

impl fmt::Display for RobotTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Robot Tool ({}) tcp {}", self.name, format_vector(&self.tcp()))
    }
}
