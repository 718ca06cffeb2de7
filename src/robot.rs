//! The robot as the calibration sees it: arm kinematics, where the arm stands (base),
//! what it holds (tool), the external axes and the limits of all axes.
//!
//! The pose chain is `base * external linear axes * arm(joints) * tool`, so the robot on a
//! track with a tool can be used the same way as the bare arm.

use std::sync::Arc;
use crate::external_axis::ExternalAxis;
use crate::joint_position::{ExternalJointPosition, RobotJointPosition};
use crate::kinematic_traits::{Kinematics, Pose};
use crate::kinematics_impl::OPWKinematics;
use crate::limits::AxisLimits;
use crate::parameters::opw_kinematics::Parameters;
use crate::tool::RobotTool;

/// ABB controllers support up to six external axes per mechanical unit group.
pub const MAX_EXTERNAL_AXES: usize = 6;

#[derive(Clone)]
pub struct Robot {
    name: String,

    /// Arm kinematics, from joint angles to the flange in the robot base coordinates.
    kinematics: Arc<dyn Kinematics>,

    limits: AxisLimits,

    /// Transformation from the world origin to the robot base (mounting frame).
    base: Pose,

    tool: RobotTool,

    /// External axis `i` reads the value `i` of the external joint position.
    external_axes: Vec<ExternalAxis>,
}

impl Robot {
    pub fn new(name: impl Into<String>, kinematics: Arc<dyn Kinematics>, limits: AxisLimits) -> Self {
        Robot {
            name: name.into(),
            kinematics,
            limits,
            base: Pose::identity(),
            tool: RobotTool::tool0(),
            external_axes: Vec::new(),
        }
    }

    /// Robot with the OPW kinematic model.
    pub fn opw(name: impl Into<String>, parameters: Parameters, limits: AxisLimits) -> Self {
        Robot::new(name, Arc::new(OPWKinematics::new(parameters)), limits)
    }

    pub fn with_base(mut self, base: Pose) -> Self {
        self.base = base;
        self
    }

    pub fn with_tool(mut self, tool: RobotTool) -> Self {
        self.tool = tool;
        self
    }

    /// Adds the next external axis. Axes beyond [`MAX_EXTERNAL_AXES`] are ignored with a warning
    /// as there is no joint position value for them.
    pub fn with_external_axis(mut self, axis: ExternalAxis) -> Self {
        if self.external_axes.len() >= MAX_EXTERNAL_AXES {
            tracing::warn!("Robot {} already has {} external axes, {} is ignored",
                self.name, MAX_EXTERNAL_AXES, axis.name());
        } else {
            self.external_axes.push(axis);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kinematics(&self) -> &Arc<dyn Kinematics> {
        &self.kinematics
    }

    pub fn limits(&self) -> &AxisLimits {
        &self.limits
    }

    pub fn base(&self) -> &Pose {
        &self.base
    }

    pub fn tool(&self) -> &RobotTool {
        &self.tool
    }

    pub fn external_axes(&self) -> &[ExternalAxis] {
        &self.external_axes
    }

    /// Duplicate of this robot with the tool removed (tool0), so that forward kinematics
    /// gives the flange.
    pub fn without_tool(&self) -> Robot {
        self.clone().with_tool(RobotTool::tool0())
    }

    /// Pose of the tool center point in the world.
    pub fn forward(&self, robot_joints: &RobotJointPosition, external_joints: &ExternalJointPosition) -> Pose {
        self.flange(robot_joints, external_joints) * self.tool.attachment
    }

    /// Pose of the flange in the world. Unset values of the linear axes are treated as 0.
    pub fn flange(&self, robot_joints: &RobotJointPosition, external_joints: &ExternalJointPosition) -> Pose {
        let carrier = self.external_axes.iter()
            .enumerate()
            .filter(|(_, axis)| axis.moves_robot())
            .fold(self.base, |pose, (i, axis)| {
                pose * axis.displacement(external_joints.value(i).unwrap_or(0.0))
            });
        carrier * self.kinematics.forward(&robot_joints.to_radians())
    }

    /// Describes in human-readable form all values of this joint position pair that are not
    /// within the axis limits. Connected external axes without a value are reported as well.
    /// The `index` is the index of the pair in the list being checked and is included
    /// in the messages.
    pub fn axis_limit_warnings(&self, index: usize, robot_joints: &RobotJointPosition,
                               external_joints: &ExternalJointPosition) -> Vec<String> {
        let mut warnings = Vec::new();

        for axis in self.limits.violations(robot_joints) {
            warnings.push(format!(
                "Joint position #{}: The position of robot axis {} is not in range. Value {} is outside {}.",
                index, axis + 1, crate::utils::fmt_value(robot_joints.value(axis)), self.limits.intervals[axis]
            ));
        }

        for (i, axis) in self.external_axes.iter().enumerate() {
            match external_joints.value(i) {
                None => warnings.push(format!(
                    "Joint position #{}: The position of external axis {} ({}) is not defined.",
                    index, i + 1, axis.name()
                )),
                Some(value) if !axis.limits().contains(value) => warnings.push(format!(
                    "Joint position #{}: The position of external axis {} ({}) is not in range. Value {} is outside {}.",
                    index, i + 1, axis.name(), crate::utils::fmt_value(value), axis.limits()
                )),
                Some(_) => {}
            }
        }

        warnings
    }
}
