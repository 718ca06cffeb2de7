//! Tool center point (TCP) calibration for six-axis industrial robots with a parallel base
//! and spherical wrist.
//!
//! The tool tip is brought to the same physical point from several different robot poses.
//! From the joint positions of these poses, the crate finds the offset of the tool tip
//! relative to the robot flange. Forward kinematics uses the closed-form OPW model
//! (_An Analytical Solution of the Inverse Kinematics Problem of Industrial Serial
//! Manipulators with an Ortho-parallel Basis and a Spherical Wrist_, Brandstötter, Angerer
//! and Hofbaur, 2014) with presets for several ABB robots.
//!
//! # Features
//!
//! - Robot placed on a base and on a linear track, with tool and axis limits.
//! - Joint positions are checked against axis limits before the calibration.
//! - Degenerate pose sets never produce NaN or infinite results.
//! - Calibration jobs can be read from YAML and run with the `tcp-calibrate` command line tool.
//!
//! # Units
//!
//! Joint positions are in degrees, as on the robot controller. Distances are in millimeters.
//!
//! ## Examples
//!
//! - **calibrate_wrist_center.rs**: Calibration of the wrist center from poses rotating the wrist only.
//! - **tool_and_base.rs**: Robot on a base and a track, calibration of the mounted pointer.

pub mod parameters;
pub mod parameters_robots;

pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod limits;
pub mod joint_position;
pub mod plane;

pub mod tool;
pub mod external_axis;
pub mod robot;

pub mod tool_calibration;

#[cfg(feature = "allow_filesystem")]
pub mod calibration_job;
#[cfg(feature = "allow_filesystem")]
pub mod job_error;

#[cfg(test)]
mod tests;
