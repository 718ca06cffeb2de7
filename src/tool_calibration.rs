//! Tool center point (TCP) calibration.
//!
//! The tool tip is brought to the same physical point in space from several (at least 4)
//! different robot poses. The offset from the flange to the tool tip is then the point in
//! flange coordinates that lands on the same world location for all poses. It is found by
//! iterating damped single-variable Newton steps for x, y and z in turn, with derivatives
//! taken by central differences, until all three steps get below the required precision.
//!
//! ```
//! use rs_tcp_calibration::joint_position::{ExternalJointPosition, RobotJointPosition};
//! use rs_tcp_calibration::limits::AxisLimits;
//! use rs_tcp_calibration::parameters::opw_kinematics::Parameters;
//! use rs_tcp_calibration::robot::Robot;
//! use rs_tcp_calibration::tool_calibration::RobotToolCalibration;
//!
//! let robot = Robot::opw("IRB2400", Parameters::irb2400_10(), AxisLimits::unbounded());
//!
//! // Rotating only the wrist keeps the wrist center in place, 85 mm behind the flange
//! let poses = vec![
//!     RobotJointPosition::new([10.0, 20.0, -10.0, 0.0, 30.0, 0.0]),
//!     RobotJointPosition::new([10.0, 20.0, -10.0, 45.0, -40.0, 90.0]),
//!     RobotJointPosition::new([10.0, 20.0, -10.0, -60.0, 50.0, -30.0]),
//!     RobotJointPosition::new([10.0, 20.0, -10.0, 120.0, 25.0, 10.0]),
//! ];
//! let mut calibration = RobotToolCalibration::new(&robot, poses, vec![ExternalJointPosition::unset()]);
//! let tcp = calibration.calculate();
//! assert!((tcp.z + 85.0).abs() < 0.1);
//! ```

use std::fmt;
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};
use crate::joint_position::{ExternalJointPosition, RobotJointPosition};
use crate::kinematic_traits::Pose;
use crate::plane::Plane;
use crate::robot::Robot;
use crate::tool::RobotTool;
use crate::utils::format_vector;

/// Fewer poses do not define the TCP.
pub const MIN_POSES: usize = 4;

/// Hyperparameters of the optimization. Distances are in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationSettings {
    /// Maximal number of sweeps over x, y and z.
    pub iterations: usize,

    /// The calibration stops when the update of all three coordinates in the same sweep
    /// is below this value.
    pub precision: f64,

    /// Step for the central differences.
    pub delta: f64,

    /// Fraction of the Newton step that is applied, 1.0 for the full step.
    pub damping: f64,

    /// Starting point, in flange coordinates.
    pub initial_guess: Vector3<f64>,
}

impl CalibrationSettings {
    pub const DEFAULT_ITERATIONS: usize = 400_000;
    pub const DEFAULT_PRECISION: f64 = 1E-2;
    pub const DEFAULT_DELTA: f64 = 1E-2;
    pub const DEFAULT_DAMPING: f64 = 1.0;

    pub fn is_valid(&self) -> bool {
        self.iterations > 0
            && self.precision > 0.0 && self.precision.is_finite()
            && self.delta > 0.0 && self.delta.is_finite()
            && self.damping > 0.0 && self.damping.is_finite()
            && self.initial_guess.iter().all(|v| v.is_finite())
    }
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        CalibrationSettings {
            iterations: Self::DEFAULT_ITERATIONS,
            precision: Self::DEFAULT_PRECISION,
            delta: Self::DEFAULT_DELTA,
            damping: Self::DEFAULT_DAMPING,
            initial_guess: Vector3::zeros(),
        }
    }
}

/// Computation context of the TCP calibration. Cloning produces a deep copy that can be
/// modified and recalculated independently.
#[derive(Clone)]
pub struct RobotToolCalibration {
    /// The robot with the tool removed, forward kinematics gives the flange.
    robot: Robot,
    robot_joint_positions: Vec<RobotJointPosition>,
    external_joint_positions: Vec<ExternalJointPosition>,
    settings: CalibrationSettings,

    /// Flange in the world for every pose.
    frames: Vec<Pose>,

    tcp: Vector3<f64>,

    /// Absolute deviation from the centroid for every pose, per axis x, y, z.
    errors: [Vec<f64>; 3],

    iterations_used: usize,
    converged: bool,
}

impl RobotToolCalibration {
    /// Creates the calibration with default settings. If the lists of robot and external joint
    /// positions have different lengths, the shorter one is padded by repeating its last
    /// element (an empty list is padded with the default value).
    pub fn new(robot: &Robot, robot_joint_positions: Vec<RobotJointPosition>,
               external_joint_positions: Vec<ExternalJointPosition>) -> Self {
        let mut calibration = RobotToolCalibration {
            robot: robot.without_tool(),
            robot_joint_positions,
            external_joint_positions,
            settings: CalibrationSettings::default(),
            frames: Vec::new(),
            tcp: Vector3::zeros(),
            errors: Default::default(),
            iterations_used: 0,
            converged: false,
        };
        calibration.initialize();
        calibration
    }

    pub fn with_settings(mut self, settings: CalibrationSettings) -> Self {
        self.set_settings(settings);
        self
    }

    /// Replaces the settings and resets the results.
    pub fn set_settings(&mut self, settings: CalibrationSettings) {
        self.settings = settings;
        self.reset_results();
    }

    /// To be called after the joint positions have been changed through
    /// [`Self::robot_joint_positions_mut`] or [`Self::external_joint_positions_mut`].
    pub fn re_initialize(&mut self) {
        self.initialize();
    }

    fn initialize(&mut self) {
        let count = self.robot_joint_positions.len().max(self.external_joint_positions.len());
        pad(&mut self.robot_joint_positions, count);
        pad(&mut self.external_joint_positions, count);

        self.frames = self.robot_joint_positions.iter()
            .zip(self.external_joint_positions.iter())
            .map(|(robot_joints, external_joints)| self.robot.flange(robot_joints, external_joints))
            .collect();
        self.reset_results();
    }

    fn reset_results(&mut self) {
        let count = self.frames.len();
        self.tcp = self.settings.initial_guess;
        self.errors = std::array::from_fn(|_| vec![0.0; count]);
        self.iterations_used = 0;
        self.converged = false;
    }

    /// Runs the calibration from the initial guess and returns the TCP. Can be called
    /// repeatedly, every call starts over. Fewer than [`MIN_POSES`] poses are accepted
    /// but the result is not meaningful; check [`Self::is_valid`] first.
    pub fn calculate(&mut self) -> Vector3<f64> {
        if self.frames.len() < MIN_POSES {
            warn!("TCP calibration with {} poses, at least {} are required for a meaningful result",
                self.frames.len(), MIN_POSES);
        }

        let mut tcp = self.settings.initial_guess;
        let mut converged = false;
        let mut stalled = false;
        let mut iterations_used = 0;

        for iteration in 0..self.settings.iterations {
            let mut all_below_precision = true;
            let mut all_skipped = true;
            for axis in 0..3 {
                if let Some(step) = self.newton_step(&tcp, axis) {
                    tcp[axis] -= step;
                    all_skipped = false;
                    if !(step.abs() < self.settings.precision) {
                        all_below_precision = false;
                    }
                }
            }
            iterations_used = iteration + 1;
            if all_skipped {
                stalled = true;
                break;
            }
            if all_below_precision {
                converged = true;
                break;
            }
        }

        self.tcp = tcp;
        self.iterations_used = iterations_used;
        self.update_errors();
        // Nothing to refine is only a success if all poses already agree
        self.converged = converged || (stalled && self.maximum_error() == Vector3::zeros());

        if stalled && !self.converged {
            warn!("TCP is not observable from these poses (no rotation between them?), \
                   the initial guess {} is kept, maximum error {}",
                format_vector(&self.tcp), format_vector(&self.maximum_error()));
        } else if self.converged {
            debug!("TCP calibrated at {} after {} iterations, maximum error {}",
                format_vector(&self.tcp), iterations_used, format_vector(&self.maximum_error()));
        } else {
            warn!("TCP calibration did not reach precision {} in {} iterations, maximum error {}",
                self.settings.precision, iterations_used, format_vector(&self.maximum_error()));
        }
        self.tcp
    }

    /// Newton step on the dispersion (mean squared distance of the transformed candidate
    /// points from their centroid) for one coordinate of the candidate TCP, to be subtracted.
    ///
    /// Central differences with `delta` are taken on every transformed point, not on the
    /// dispersion itself. `None` if the points do not move along this coordinate beyond
    /// rounding noise.
    fn newton_step(&self, tcp: &Vector3<f64>, axis: usize) -> Option<f64> {
        // Rounding error of a transformed point, in units of its magnitude
        const ROUNDING: f64 = 16.0 * f64::EPSILON;
        let delta = self.settings.delta;
        let first = self.frames.first()?;

        let mut forward = *tcp;
        forward[axis] += delta;
        let mut backward = *tcp;
        backward[axis] -= delta;
        let (center, forward, backward) = (Point3::from(*tcp), Point3::from(forward), Point3::from(backward));
        let (origin, origin_forward, origin_backward) = (first * center, first * forward, first * backward);

        let mut sum_deviation = Vector3::zeros();
        let mut sum_derivative = Vector3::zeros();
        let mut sum_product = 0.0;
        let mut sum_derivative_squared = 0.0;
        let mut scale: f64 = 0.0;
        for frame in &self.frames {
            let point = frame * center;
            let deviation = point - origin;
            let derivative = ((frame * forward - origin_forward) - (frame * backward - origin_backward))
                / (2.0 * delta);
            sum_deviation += deviation;
            sum_derivative += derivative;
            sum_product += deviation.dot(&derivative);
            sum_derivative_squared += derivative.norm_squared();
            scale = scale.max(point.coords.amax());
        }

        let count = self.frames.len() as f64;
        let mean_deviation = sum_deviation / count;
        let mean_derivative = sum_derivative / count;
        let slope = sum_product / count - mean_deviation.dot(&mean_derivative);
        let curvature = sum_derivative_squared / count - mean_derivative.norm_squared();

        let noise = ROUNDING * scale / delta;
        if !(curvature > noise * noise) {
            return None;
        }
        let step = self.settings.damping * slope / curvature;
        step.is_finite().then_some(step)
    }

    /// Deviation of each transformed candidate point from the centroid of all of them.
    /// Taken relative to the first point, so identical poses give exact zeros.
    fn deviations(&self, tcp: &Vector3<f64>) -> Vec<Vector3<f64>> {
        let local = Point3::from(*tcp);
        let Some(first) = self.frames.first().map(|frame| frame * local) else {
            return Vec::new();
        };
        let relative: Vec<Vector3<f64>> = self.frames.iter()
            .map(|frame| frame * local - first)
            .collect();
        let mean = relative.iter().sum::<Vector3<f64>>() / relative.len() as f64;
        relative.into_iter().map(|r| r - mean).collect()
    }

    fn update_errors(&mut self) {
        let deviations = self.deviations(&self.tcp);
        self.errors = std::array::from_fn(|axis| {
            deviations.iter().map(|d| d[axis].abs()).collect()
        });
    }

    /// Enough poses, matching lists, sound settings and finite joint values.
    pub fn is_valid(&self) -> bool {
        self.robot_joint_positions.len() >= MIN_POSES
            && self.robot_joint_positions.len() == self.external_joint_positions.len()
            && self.settings.is_valid()
            && self.robot_joint_positions.iter().all(|p| p.is_finite())
            && self.external_joint_positions.iter().all(|p| p.is_finite())
    }

    /// Human-readable warnings for all poses outside the axis limits of the robot, naming
    /// the index of the pose. Empty if all poses are fine.
    pub fn check_joint_positions_axis_limits(&self) -> Vec<String> {
        self.robot_joint_positions.iter()
            .zip(self.external_joint_positions.iter())
            .enumerate()
            .flat_map(|(index, (robot_joints, external_joints))| {
                self.robot.axis_limit_warnings(index, robot_joints, external_joints)
            })
            .collect()
    }

    /// The calibrated tool, TCP shifted from the flange without rotation.
    pub fn calibrated_tool(&self, name: impl Into<String>) -> RobotTool {
        RobotTool::from_tcp(name, self.tcp)
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn settings(&self) -> &CalibrationSettings {
        &self.settings
    }

    pub fn robot_joint_positions(&self) -> &[RobotJointPosition] {
        &self.robot_joint_positions
    }

    pub fn external_joint_positions(&self) -> &[ExternalJointPosition] {
        &self.external_joint_positions
    }

    pub fn robot_joint_positions_mut(&mut self) -> &mut Vec<RobotJointPosition> {
        &mut self.robot_joint_positions
    }

    pub fn external_joint_positions_mut(&mut self) -> &mut Vec<ExternalJointPosition> {
        &mut self.external_joint_positions
    }

    /// Flange in the world for every pose.
    pub fn frames(&self) -> &[Pose] {
        &self.frames
    }

    pub fn planes(&self) -> Vec<Plane> {
        self.frames.iter().map(Plane::from_pose).collect()
    }

    pub fn tcp(&self) -> Vector3<f64> {
        self.tcp
    }

    pub fn x(&self) -> f64 {
        self.tcp.x
    }

    pub fn y(&self) -> f64 {
        self.tcp.y
    }

    pub fn z(&self) -> f64 {
        self.tcp.z
    }

    pub fn errors_x(&self) -> &[f64] {
        &self.errors[0]
    }

    pub fn errors_y(&self) -> &[f64] {
        &self.errors[1]
    }

    pub fn errors_z(&self) -> &[f64] {
        &self.errors[2]
    }

    /// Worst error over all poses, per axis.
    pub fn maximum_error(&self) -> Vector3<f64> {
        Vector3::from_fn(|axis, _| self.errors[axis].iter().fold(0.0, |a: f64, &b| a.max(b)))
    }

    /// Mean absolute error over all poses, per axis.
    pub fn mean_error(&self) -> Vector3<f64> {
        Vector3::from_fn(|axis, _| {
            let errors = &self.errors[axis];
            if errors.is_empty() { 0.0 } else { errors.iter().sum::<f64>() / errors.len() as f64 }
        })
    }

    pub fn iterations_used(&self) -> usize {
        self.iterations_used
    }

    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl fmt::Display for RobotToolCalibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            write!(f, "Invalid Robot Tool Calibration")
        } else if self.iterations_used == 0 {
            write!(f, "Robot Tool Calibration ({} poses)", self.frames.len())
        } else {
            write!(f, "Robot Tool Calibration ({} poses): tcp {}, maximum error {}",
                   self.frames.len(), format_vector(&self.tcp), format_vector(&self.maximum_error()))
        }
    }
}

/// Pads the list up to the length by repeating the last element.
fn pad<T: Copy + Default>(list: &mut Vec<T>, len: usize) {
    let filler = list.last().copied().unwrap_or_default();
    list.resize(len.max(list.len()), filler);
}
