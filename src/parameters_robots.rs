//! Hardcoded OPW parameters for ABB robots, in millimeters

pub mod opw_kinematics {
    use crate::parameters::opw_kinematics::Parameters;
    use std::f64::consts::PI;

    impl Default for Parameters {
        fn default() -> Self {
            Parameters::new()
        }
    }

    impl Parameters {
        // Provides default values
        pub fn new() -> Self {
            Parameters {
                a1: 0.0,
                a2: 0.0,
                b: 0.0,
                c1: 0.0,
                c2: 0.0,
                c3: 0.0,
                c4: 0.0,
                offsets: [0.0; 6],
                sign_corrections: [1; 6],
            }
        }

        /// Names accepted by [`Parameters::by_name`].
        pub const PRESETS: [&'static str; 5] = [
            "irb120_3_58", "irb1600_10_145", "irb2400_10", "irb2600_12_165", "irb4600_60_205",
        ];

        /// Looks up the preset by name, case-insensitive, ignoring dashes and spaces
        /// ("IRB 2400-10" works as well as "irb2400_10").
        pub fn by_name(name: &str) -> Option<Self> {
            let key: String = name.chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| if c == '-' { '_' } else { c.to_ascii_lowercase() })
                .collect();
            match key.as_str() {
                "irb120_3_58" | "irb120" => Some(Self::irb120_3_58()),
                "irb1600_10_145" | "irb1600" => Some(Self::irb1600_10_145()),
                "irb2400_10" | "irb2400" => Some(Self::irb2400_10()),
                "irb2600_12_165" | "irb2600" => Some(Self::irb2600_12_165()),
                "irb4600_60_205" | "irb4600" => Some(Self::irb4600_60_205()),
                _ => None,
            }
        }

        pub fn irb120_3_58() -> Self {
            Parameters {
                a1: 0.0,
                a2: -70.0,
                b: 0.0,
                c1: 290.0,
                c2: 270.0,
                c3: 302.0,
                c4: 72.0,
                offsets: [0.0, 0.0, -PI / 2.0, 0.0, 0.0, 0.0],
                ..Self::new()
            }
        }

        // See https://github.com/ros-industrial/abb/blob/noetic-devel/abb_irb1600_support/config/opw_parameters_irb1600_10_145.yaml
        pub fn irb1600_10_145() -> Self {
            Parameters {
                a1: 150.0,
                a2: 0.0,
                b: 0.0,
                c1: 486.5,
                c2: 700.0,
                c3: 600.0,
                c4: 65.0,
                offsets: [0.0, 0.0, -PI / 2.0, 0.0, 0.0, 0.0],
                ..Self::new()
            }
        }

        pub fn irb2400_10() -> Self {
            Parameters {
                a1: 100.0,
                a2: -135.0,
                b: 0.0,
                c1: 615.0,
                c2: 705.0,
                c3: 755.0,
                c4: 85.0,
                offsets: [0.0, 0.0, -PI / 2.0, 0.0, 0.0, 0.0],
                ..Self::new()
            }
        }

        pub fn irb2600_12_165() -> Self {
            Parameters {
                a1: 150.0,
                a2: -115.0,
                b: 0.0,
                c1: 445.0,
                c2: 700.0,
                c3: 795.0,
                c4: 85.0,
                offsets: [0.0, 0.0, -PI / 2.0, 0.0, 0.0, 0.0],
                ..Self::new()
            }
        }

        pub fn irb4600_60_205() -> Self {
            Parameters {
                a1: 175.0,
                a2: -175.0,
                b: 0.0,
                c1: 495.0,
                c2: 900.0,
                c3: 960.0,
                c4: 135.0,
                offsets: [0.0, 0.0, -PI / 2.0, 0.0, 0.0, 0.0],
                ..Self::new()
            }
        }
    }
}
