//! Defines the OPW parameter data structure

pub mod opw_kinematics {
    use crate::utils::deg;

    /// Parameters for the robot. See [parameters_robots.rs](parameters_robots.rs) for examples of concrete robot models.
    /// All lengths are in millimeters, as ABB specifies them in product manuals.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Parameters {
        /// The length of the first link of the robot (distance between joint 1 and joint 2).
        pub a1: f64,

        /// The length of the second link of the robot (distance between joint 2 and joint 3).
        pub a2: f64,

        /// The offset in the y-direction between joint 1 and joint 2.
        /// This can be 0 for robots without a lateral offset that is very common.
        pub b: f64,

        /// The vertical distance from the base (joint 1) to joint 2 along the z-axis.
        pub c1: f64,

        /// The vertical distance between joints 2 and 3 along the z-axis.
        pub c2: f64,

        /// The offset between joint 3 and joint 4, typically along the x-axis.
        pub c3: f64,

        /// The distance from the wrist center to the flange.
        pub c4: f64,

        /// Offsets applied to each joint angle to adjust the reference zero position (radians).
        pub offsets: [f64; 6],

        /// Specifies the direction of positive rotation from the zero angle for each joint.
        /// A value of `-1` reverses the default rotation direction for that joint.
        pub sign_corrections: [i8; 6],
    }

    impl Parameters {
        /// Convert to string yaml representation, same layout as the `parameters:` section
        /// of the calibration job file.
        pub fn to_yaml(&self) -> String {
            format!(
                "a1: {}\n\
                 a2: {}\n\
                 b: {}\n\
                 c1: {}\n\
                 c2: {}\n\
                 c3: {}\n\
                 c4: {}\n\
                 offsets: [{}]\n\
                 sign_corrections: [{}]\n",
                self.a1,
                self.a2,
                self.b,
                self.c1,
                self.c2,
                self.c3,
                self.c4,
                self.offsets.iter().map(deg).collect::<Vec<_>>().join(", "),
                self.sign_corrections.iter().map(|x| x.to_string())
                    .collect::<Vec<_>>().join(", "),
            )
        }

        /// Checks that all geometric parameters and offsets are finite and sign corrections
        /// are -1 or 1. Returns the name of the first offending field.
        pub fn validate(&self) -> Result<(), String> {
            for (name, val) in [
                ("a1", self.a1), ("a2", self.a2), ("b", self.b),
                ("c1", self.c1), ("c2", self.c2), ("c3", self.c3), ("c4", self.c4),
            ] {
                if !val.is_finite() {
                    return Err(format!("geometric parameter '{}' must be finite (got {})", name, val));
                }
            }
            for (i, ofs) in self.offsets.iter().enumerate() {
                if !ofs.is_finite() {
                    return Err(format!("offsets[{}] must be finite (got {})", i, ofs));
                }
            }
            for (i, sc) in self.sign_corrections.iter().enumerate() {
                if *sc != -1 && *sc != 1 {
                    return Err(format!("sign_corrections[{}] must be -1 or 1 (got {})", i, sc));
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::opw_kinematics::Parameters;

    #[test]
    fn test_to_yaml_lists_offsets_in_degrees() {
        let yaml = Parameters::irb2400_10().to_yaml();
        assert!(yaml.contains("c4: 85\n"), "{}", yaml);
        assert!(yaml.contains("offsets: [0, 0, -90, 0, 0, 0]"), "{}", yaml);
        assert!(yaml.contains("sign_corrections: [1, 1, 1, 1, 1, 1]"), "{}", yaml);
    }

    #[test]
    fn test_validate() {
        assert!(Parameters::irb2400_10().validate().is_ok());

        let mut broken = Parameters::irb2400_10();
        broken.c2 = f64::NAN;
        assert!(broken.validate().unwrap_err().contains("c2"));

        let mut broken = Parameters::irb2400_10();
        broken.sign_corrections[4] = 0;
        assert!(broken.validate().unwrap_err().contains("sign_corrections[4]"));
    }
}
