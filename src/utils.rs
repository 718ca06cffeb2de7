//! Helper functions

use crate::kinematic_traits::{Joints, Pose};
use nalgebra::{UnitQuaternion, Vector3};

/// Checks if all elements in the array are finite
pub fn is_valid(qs: &[f64; 6]) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Convert array of f64's in degrees to Joints that are array of f64's in radians
pub fn joints(degrees: &[f64; 6]) -> Joints {
    std::array::from_fn(|i| degrees[i].to_radians())
}

/// Convert joints that are array of f64's in radians to degrees
pub fn to_degrees(angles: &Joints) -> [f64; 6] {
    std::array::from_fn(|i| angles[i].to_degrees())
}

/// Formats a value the way it is shown to the user: at most 4 decimals, no trailing zeros
pub(crate) fn fmt_value(x: f64) -> String {
    let rounded = (x * 1E4).round() / 1E4;
    if rounded == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// formatting of angles in radians as degrees
pub(crate) fn deg(x: &f64) -> String {
    fmt_value(x.to_degrees())
}

pub fn format_vector(v: &Vector3<f64>) -> String {
    format!("[{}, {}, {}]", fmt_value(v.x), fmt_value(v.y), fmt_value(v.z))
}

pub fn dump_pose(isometry: &Pose) -> String {
    // Extract translation components
    let translation = isometry.translation.vector;

    // Extract rotation components
    let rotation: UnitQuaternion<f64> = isometry.rotation;

    format!(
        "x: {:.5}, y: {:.5}, z: {:.5},  quat: {:.5},{:.5},{:.5},{:.5}",
        translation.x, translation.y, translation.z, rotation.i, rotation.j, rotation.k, rotation.w
    )
}
