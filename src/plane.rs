//! Plane is the usual way to show a frame to the user: origin with two orthonormal axes.
//! It converts to and from [`Pose`], that is what kinematics works with.

use nalgebra::{Matrix3, Point3, Rotation3, Translation3, Unit, UnitQuaternion, Vector3};
use std::error::Error;
use std::fmt;
use crate::kinematic_traits::Pose;
use crate::utils::format_vector;

/// Origin with orthonormal x and y axes. The z axis is x cross y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Point3<f64>,
    pub x_axis: Unit<Vector3<f64>>,
    pub y_axis: Unit<Vector3<f64>>,
}

/// The axes given for the plane are zero or parallel so the plane is not defined.
#[derive(Debug)]
pub struct ColinearAxes {
    pub x_axis: Vector3<f64>,
    pub y_axis: Vector3<f64>,
}

impl fmt::Display for ColinearAxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plane axes {} and {} are zero or parallel",
               format_vector(&self.x_axis), format_vector(&self.y_axis))
    }
}

impl Error for ColinearAxes {}

impl Plane {
    // Cross product below this is treated as parallel axes
    const PARALLEL_TOLERANCE: f64 = 1E-9;

    /// Creates the plane from the origin and two axis directions. The x axis keeps its
    /// direction, the y axis is made perpendicular to it (Gram-Schmidt).
    pub fn new(origin: Point3<f64>, x_axis: Vector3<f64>, y_axis: Vector3<f64>) -> Result<Self, ColinearAxes> {
        let colinear = || ColinearAxes { x_axis, y_axis };
        let x = Unit::try_new(x_axis, Self::PARALLEL_TOLERANCE).ok_or_else(colinear)?;
        let y_unit = Unit::try_new(y_axis, Self::PARALLEL_TOLERANCE).ok_or_else(colinear)?;
        let (x_vec, y_vec) = (x.into_inner(), y_unit.into_inner());
        if x_vec.cross(&y_vec).norm() < Self::PARALLEL_TOLERANCE {
            return Err(colinear());
        }
        let y_perpendicular = y_vec - x_vec * x_vec.dot(&y_vec);
        let y = Unit::try_new(y_perpendicular, Self::PARALLEL_TOLERANCE).ok_or_else(colinear)?;
        Ok(Plane { origin, x_axis: x, y_axis: y })
    }

    /// World XY plane at the origin.
    pub fn world_xy() -> Self {
        Plane {
            origin: Point3::origin(),
            x_axis: Vector3::x_axis(),
            y_axis: Vector3::y_axis(),
        }
    }

    pub fn z_axis(&self) -> Unit<Vector3<f64>> {
        Unit::new_normalize(self.x_axis.into_inner().cross(&self.y_axis.into_inner()))
    }

    pub fn from_pose(pose: &Pose) -> Self {
        Plane {
            origin: Point3::from(pose.translation.vector),
            x_axis: pose.rotation * Vector3::x_axis(),
            y_axis: pose.rotation * Vector3::y_axis(),
        }
    }

    /// Transform from the plane local coordinates to the world.
    pub fn to_pose(&self) -> Pose {
        let rotation = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[
            self.x_axis.into_inner(),
            self.y_axis.into_inner(),
            self.z_axis().into_inner(),
        ]));
        Pose::from_parts(
            Translation3::from(self.origin.coords),
            UnitQuaternion::from_rotation_matrix(&rotation),
        )
    }
}

impl Default for Plane {
    fn default() -> Self {
        Plane::world_xy()
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{} X{} Y{}",
               format_vector(&self.origin.coords),
               format_vector(&self.x_axis.into_inner()),
               format_vector(&self.y_axis.into_inner()))
    }
}
