//! Forward kinematics boundary used by the robot model and the calibration.

extern crate nalgebra as na;

use na::Isometry3;

/// Pose is used a pose of the robot flange or tcp. It contains both Cartesian position
/// (millimeters) and rotation quaternion
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(1000.0, 0.0, 0.0);
/// // The quaternion should be normalized to represent a valid rotation.
/// let rotation = UnitQuaternion::from_quaternion(na::Quaternion::new(1.0, 0.0, 0.0, 1.0).normalize());
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Six rotary joints of the robot, in radians.
pub type Joints = [f64; 6];

/// All joints at zero.
pub const JOINTS_AT_ZERO: Joints = [0.0; 6];

/// Forward kinematics of a six axis arm, from the joint angles to the pose of the flange
/// (the last joint, without any tool). Robots in this crate hold kinematics as
/// `Arc<dyn Kinematics>`, so any model can be plugged in.
pub trait Kinematics: Send + Sync {
    fn forward(&self, qs: &Joints) -> Pose;
}
