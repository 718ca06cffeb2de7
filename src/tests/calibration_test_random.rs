#[cfg(test)]
mod tests {
    use nalgebra::{Point3, Vector3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::joint_position::RobotJointPosition;
    use crate::tests::test_utils::{assert_near, touching_robot, unset};
    use crate::tool_calibration::{CalibrationSettings, RobotToolCalibration};

    #[test]
    fn test_random_tools_recovered() {
        let mut rng = StdRng::seed_from_u64(42);
        let settings = CalibrationSettings { precision: 1E-8, ..CalibrationSettings::default() };

        for case in 0..20 {
            let tcp = Vector3::new(
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
                rng.gen_range(50.0..400.0),
            );
            let target = Point3::new(
                rng.gen_range(500.0..1500.0),
                rng.gen_range(-800.0..800.0),
                rng.gen_range(0.0..1200.0),
            );
            let count = rng.gen_range(5..10);
            let poses: Vec<RobotJointPosition> = (0..count)
                .map(|_| RobotJointPosition::new([
                    rng.gen_range(-45.0..45.0),
                    rng.gen_range(-45.0..45.0),
                    rng.gen_range(-45.0..45.0),
                    0.0, 0.0, 0.0,
                ]))
                .collect();

            let mut calibration = RobotToolCalibration::new(&touching_robot(tcp, target), poses, unset())
                .with_settings(settings);
            let found = calibration.calculate();

            assert!(calibration.converged(), "Case {} did not converge", case);
            assert_near(&found, &[tcp.x, tcp.y, tcp.z], 1E-3);
            assert!(calibration.maximum_error().amax() < 1E-3,
                    "Case {}: maximum error {}", case, calibration.maximum_error());
        }
    }
}
