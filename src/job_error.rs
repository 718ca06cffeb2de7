//! Error handling for the calibration job loader

use std::io;

/// Unified error to report failures while reading and validating a calibration job.
#[derive(Debug)]
pub enum JobError {
    IoError(io::Error),
    ParseError(String),
    UnknownRobot(String),
    MissingField(String),
    InvalidLength { field: String, expected: usize, found: usize },
    InvalidGeometry(String),
}

impl std::fmt::Display for JobError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            JobError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            JobError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            JobError::UnknownRobot(ref name) =>
                write!(f, "Unknown robot preset '{}', known presets: {}", name,
                       crate::parameters::opw_kinematics::Parameters::PRESETS.join(", ")),
            JobError::MissingField(ref field) =>
                write!(f, "Missing Field: {}", field),
            JobError::InvalidLength { ref field, expected, found } =>
                write!(f, "Invalid Length of {}: expected {}, found {}", field, expected, found),
            JobError::InvalidGeometry(ref msg) =>
                write!(f, "Invalid Geometry: {}", msg),
        }
    }
}

impl std::error::Error for JobError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JobError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for JobError {
    fn from(err: io::Error) -> Self {
        JobError::IoError(err)
    }
}
