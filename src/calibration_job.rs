//! Supports reading the calibration job (robot, poses and settings) from YAML file (optional)

use std::path::Path;
use nalgebra::{Point3, Unit, Vector3};
use serde::Deserialize;

use crate::external_axis::ExternalAxis;
use crate::job_error::JobError;
use crate::joint_position::{ExternalJointPosition, RobotJointPosition};
use crate::limits::{AxisLimits, Interval};
use crate::parameters::opw_kinematics::Parameters;
use crate::plane::Plane;
use crate::robot::{Robot, MAX_EXTERNAL_AXES};
use crate::tool::{RobotTool, TOOL0};
use crate::tool_calibration::{CalibrationSettings, RobotToolCalibration};

fn default_sign_corrections() -> Vec<i8> { vec![1; 6] }
fn default_robot_name() -> String { "robot".to_string() }

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ParametersYaml {
    a1: f64,
    a2: f64,
    b: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    c4: f64,
    /// Degrees
    #[serde(default)]
    offsets: Option<Vec<f64>>,
    #[serde(default = "default_sign_corrections")]
    sign_corrections: Vec<i8>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PlaneYaml {
    origin: [f64; 3],
    x_axis: [f64; 3],
    y_axis: [f64; 3],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ToolYaml {
    #[serde(default)]
    name: Option<String>,
    tcp: [f64; 3],
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum AxisKindYaml {
    Linear,
    Rotational,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExternalAxisYaml {
    name: String,
    kind: AxisKindYaml,
    #[serde(default)]
    direction: Option<[f64; 3]>,
    #[serde(default)]
    limits: Option<[f64; 2]>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RobotYaml {
    #[serde(default = "default_robot_name")]
    name: String,
    #[serde(default)]
    preset: Option<String>,
    #[serde(default)]
    parameters: Option<ParametersYaml>,
    #[serde(default)]
    limits: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    base: Option<PlaneYaml>,
    #[serde(default)]
    tool: Option<ToolYaml>,
    #[serde(default)]
    external_axes: Vec<ExternalAxisYaml>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsYaml {
    iterations: Option<usize>,
    precision: Option<f64>,
    delta: Option<f64>,
    damping: Option<f64>,
    initial_guess: Option<[f64; 3]>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Root {
    robot: RobotYaml,
    #[serde(default)]
    settings: SettingsYaml,
    robot_joint_positions: Vec<Vec<f64>>,
    /// Missing trailing values and `~` are axes that are not connected
    #[serde(default)]
    external_joint_positions: Vec<Vec<Option<f64>>>,
}

/// Everything needed to run the TCP calibration.
#[derive(Clone)]
pub struct CalibrationJob {
    pub robot: Robot,
    pub robot_joint_positions: Vec<RobotJointPosition>,
    pub external_joint_positions: Vec<ExternalJointPosition>,
    pub settings: CalibrationSettings,
}

impl CalibrationJob {
    /// Read the calibration job from YAML file. YAML file like this is supported:
    /// ```yaml
    /// robot:
    ///   name: IRB2400
    ///   preset: irb2400_10
    ///   limits: [[-180, 180], [-100, 110], [-60, 65], [-200, 200], [-120, 120], [-400, 400]]
    ///   base: { origin: [0, 0, 500], x_axis: [1, 0, 0], y_axis: [0, 1, 0] }
    ///   external_axes:
    ///     - { name: track, kind: linear, direction: [1, 0, 0], limits: [0, 4000] }
    /// settings: { precision: 0.001, damping: 1.0 }
    /// robot_joint_positions:
    ///   - [10, 20, -10, 0, 30, 0]
    ///   - [10, 20, -10, 45, -40, 90]
    ///   - [10, 20, -10, -60, 50, -30]
    ///   - [10, 20, -10, 120, 25, 10]
    /// external_joint_positions:
    ///   - [1000]
    /// ```
    /// Instead of `preset`, OPW `parameters` can be given (a1, a2, b, c1, c2, c3, c4 in millimeters,
    /// optional offsets in degrees and sign corrections). Limits, base, tool, external axes
    /// and all settings are optional. Shorter position lists are padded by repeating the
    /// last element when the calibration is created.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, JobError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, JobError> {
        let root: Root = serde_saphyr::from_str(contents)
            .map_err(|e| JobError::ParseError(format!("{}", e)))?;

        let robot = build_robot(root.robot)?;
        let settings = build_settings(root.settings);

        let robot_joint_positions = root.robot_joint_positions.into_iter()
            .map(|values| Ok(RobotJointPosition::new(vec_to_six(values, "robot_joint_positions")?)))
            .collect::<Result<Vec<_>, JobError>>()?;

        let external_joint_positions = root.external_joint_positions.into_iter()
            .map(|values| {
                if values.len() > MAX_EXTERNAL_AXES {
                    return Err(JobError::InvalidLength {
                        field: "external_joint_positions".to_string(),
                        expected: MAX_EXTERNAL_AXES,
                        found: values.len(),
                    });
                }
                Ok(ExternalJointPosition::new(std::array::from_fn(|i| values.get(i).copied().flatten())))
            })
            .collect::<Result<Vec<_>, JobError>>()?;

        Ok(CalibrationJob { robot, robot_joint_positions, external_joint_positions, settings })
    }

    pub fn into_calibration(self) -> RobotToolCalibration {
        RobotToolCalibration::new(&self.robot, self.robot_joint_positions, self.external_joint_positions)
            .with_settings(self.settings)
    }
}

fn build_robot(yaml: RobotYaml) -> Result<Robot, JobError> {
    let parameters = match (yaml.preset, yaml.parameters) {
        (Some(_), Some(_)) => {
            return Err(JobError::ParseError(
                "robot has both preset and parameters, only one is allowed".to_string()));
        }
        (Some(preset), None) => Parameters::by_name(&preset).ok_or(JobError::UnknownRobot(preset))?,
        (None, Some(parameters)) => build_parameters(parameters)?,
        (None, None) => return Err(JobError::MissingField("robot.preset or robot.parameters".to_string())),
    };

    let limits = match yaml.limits {
        Some(limits) => {
            let pairs = vec_to_six(limits, "robot.limits")?;
            AxisLimits::new(pairs.map(|[a, b]| Interval::new(a, b)))
        }
        None => AxisLimits::unbounded(),
    };

    let mut robot = Robot::opw(yaml.name, parameters, limits);

    if let Some(base) = yaml.base {
        let plane = Plane::new(Point3::from(base.origin), Vector3::from(base.x_axis), Vector3::from(base.y_axis))
            .map_err(|e| JobError::InvalidGeometry(format!("robot.base: {}", e)))?;
        robot = robot.with_base(plane.to_pose());
    }

    if let Some(tool) = yaml.tool {
        let name = tool.name.unwrap_or_else(|| TOOL0.to_string());
        robot = robot.with_tool(RobotTool::from_tcp(name, Vector3::from(tool.tcp)));
    }

    if yaml.external_axes.len() > MAX_EXTERNAL_AXES {
        return Err(JobError::InvalidLength {
            field: "robot.external_axes".to_string(),
            expected: MAX_EXTERNAL_AXES,
            found: yaml.external_axes.len(),
        });
    }
    for axis in yaml.external_axes {
        let limits = axis.limits.map_or(Interval::unbounded(), |[a, b]| Interval::new(a, b));
        let external_axis = match axis.kind {
            AxisKindYaml::Linear => {
                let direction = axis.direction
                    .ok_or_else(|| JobError::MissingField(format!("direction of linear axis {}", axis.name)))?;
                let direction = Unit::try_new(Vector3::from(direction), 1E-9)
                    .ok_or_else(|| JobError::InvalidGeometry(format!("direction of linear axis {} is zero", axis.name)))?;
                ExternalAxis::linear(axis.name, direction, limits)
            }
            AxisKindYaml::Rotational => ExternalAxis::rotational(axis.name, limits),
        };
        robot = robot.with_external_axis(external_axis);
    }

    Ok(robot)
}

fn build_parameters(yaml: ParametersYaml) -> Result<Parameters, JobError> {
    let offsets = match yaml.offsets {
        Some(offsets) => vec_to_six(offsets, "robot.parameters.offsets")?.map(f64::to_radians),
        None => [0.0; 6],
    };
    let parameters = Parameters {
        a1: yaml.a1,
        a2: yaml.a2,
        b: yaml.b,
        c1: yaml.c1,
        c2: yaml.c2,
        c3: yaml.c3,
        c4: yaml.c4,
        offsets,
        sign_corrections: vec_to_six(yaml.sign_corrections, "robot.parameters.sign_corrections")?,
    };
    parameters.validate().map_err(JobError::ParseError)?;
    Ok(parameters)
}

fn build_settings(yaml: SettingsYaml) -> CalibrationSettings {
    let defaults = CalibrationSettings::default();
    CalibrationSettings {
        iterations: yaml.iterations.unwrap_or(defaults.iterations),
        precision: yaml.precision.unwrap_or(defaults.precision),
        delta: yaml.delta.unwrap_or(defaults.delta),
        damping: yaml.damping.unwrap_or(defaults.damping),
        initial_guess: yaml.initial_guess.map_or(defaults.initial_guess, Vector3::from),
    }
}

/// Convert a vector to a 6-element array, with the field label for context on error.
fn vec_to_six<T: Copy>(v: Vec<T>, label: &str) -> Result<[T; 6], JobError> {
    <[T; 6]>::try_from(v).map_err(|v| JobError::InvalidLength {
        field: label.to_string(),
        expected: 6,
        found: v.len(),
    })
}
