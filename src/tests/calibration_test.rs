#[cfg(test)]
mod tests {
    use nalgebra::Vector3;

    use crate::joint_position::{ExternalJointPosition, RobotJointPosition};
    use crate::limits::AxisLimits;
    use crate::robot::Robot;
    use crate::tests::test_utils::{
        assert_near, irb2400, orientation_poses, synthetic_robot, unset, wrist_poses,
        SYNTHETIC_ORIENTATIONS, SYNTHETIC_TCP, WRIST_CENTER,
    };
    use crate::tool_calibration::{CalibrationSettings, RobotToolCalibration};

    fn precise() -> CalibrationSettings {
        CalibrationSettings { precision: 1E-8, ..CalibrationSettings::default() }
    }

    #[test]
    fn test_synthetic_tcp_recovered() {
        let mut calibration = RobotToolCalibration::new(
            &synthetic_robot(), orientation_poses(&SYNTHETIC_ORIENTATIONS), unset());
        assert!(calibration.is_valid());

        let tcp = calibration.calculate();
        assert!(calibration.converged());
        assert!(calibration.iterations_used() < 100,
                "Too many iterations: {}", calibration.iterations_used());
        assert_near(&tcp, &SYNTHETIC_TCP, 0.05);
        assert!(calibration.maximum_error().amax() < 0.01,
                "Maximum error too large: {}", calibration.maximum_error());
    }

    #[test]
    fn test_synthetic_tcp_precise() {
        let mut calibration = RobotToolCalibration::new(
            &synthetic_robot(), orientation_poses(&SYNTHETIC_ORIENTATIONS), unset())
            .with_settings(precise());

        let tcp = calibration.calculate();
        assert!(calibration.converged());
        assert_near(&tcp, &SYNTHETIC_TCP, 1E-6);
        assert!(calibration.maximum_error().amax() < 1E-6);
        assert!(calibration.mean_error().amax() <= calibration.maximum_error().amax());
        assert_eq!(tcp, Vector3::new(calibration.x(), calibration.y(), calibration.z()));
    }

    #[test]
    fn test_four_poses_are_enough() {
        let mut calibration = RobotToolCalibration::new(
            &synthetic_robot(), orientation_poses(&SYNTHETIC_ORIENTATIONS[..4]), unset());
        assert!(calibration.is_valid());
        let tcp = calibration.calculate();
        assert!(calibration.converged());
        assert_near(&tcp, &SYNTHETIC_TCP, 0.05);
        assert!(calibration.maximum_error().amax() < 0.01);
    }

    #[test]
    fn test_wrist_center_recovered() {
        let mut calibration = RobotToolCalibration::new(&irb2400(), wrist_poses(), unset());
        let tcp = calibration.calculate();
        assert!(calibration.converged());
        assert_near(&tcp, &WRIST_CENTER, 0.05);
        assert!(calibration.maximum_error().amax() < 0.05);

        let mut precise_calibration = calibration.clone().with_settings(precise());
        let tcp = precise_calibration.calculate();
        assert_near(&tcp, &WRIST_CENTER, 1E-4);
        assert!(precise_calibration.maximum_error().amax() < 1E-4);
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let mut calibration = RobotToolCalibration::new(&irb2400(), wrist_poses(), unset());
        let first = calibration.calculate();
        let first_errors = calibration.errors_x().to_vec();
        let first_iterations = calibration.iterations_used();

        let second = calibration.calculate();
        assert_eq!(first, second);
        assert_eq!(first_errors, calibration.errors_x());
        assert_eq!(first_iterations, calibration.iterations_used());
    }

    #[test]
    fn test_external_list_padded() {
        let robot_positions = orientation_poses(&SYNTHETIC_ORIENTATIONS[..5]);
        let external = vec![
            ExternalJointPosition::from_slice(&[100.0]),
            ExternalJointPosition::from_slice(&[200.0]),
            ExternalJointPosition::from_slice(&[300.0]),
        ];
        let calibration = RobotToolCalibration::new(&synthetic_robot(), robot_positions, external);

        assert_eq!(calibration.robot_joint_positions().len(), 5);
        assert_eq!(calibration.external_joint_positions().len(), 5);
        assert_eq!(calibration.frames().len(), 5);
        assert_eq!(calibration.errors_x().len(), 5);
        let last = ExternalJointPosition::from_slice(&[300.0]);
        assert_eq!(calibration.external_joint_positions()[3], last);
        assert_eq!(calibration.external_joint_positions()[4], last);
    }

    #[test]
    fn test_robot_list_padded() {
        let robot_positions = orientation_poses(&SYNTHETIC_ORIENTATIONS[..3]);
        let external: Vec<ExternalJointPosition> = (0..5)
            .map(|i| ExternalJointPosition::from_slice(&[i as f64]))
            .collect();
        let calibration = RobotToolCalibration::new(&synthetic_robot(), robot_positions.clone(), external);

        assert_eq!(calibration.robot_joint_positions().len(), 5);
        assert_eq!(calibration.robot_joint_positions()[3], robot_positions[2]);
        assert_eq!(calibration.robot_joint_positions()[4], robot_positions[2]);
        assert!(calibration.is_valid());
    }

    #[test]
    fn test_empty_external_list_padded_with_unset() {
        let calibration = RobotToolCalibration::new(&irb2400(), wrist_poses(), Vec::new());
        assert_eq!(calibration.external_joint_positions().len(), 5);
        assert!(calibration.external_joint_positions().iter().all(|p| p.is_unset()));
    }

    #[test]
    fn test_identical_poses_keep_initial_guess() {
        let pose = RobotJointPosition::new([10.0, 20.0, -10.0, 30.0, 40.0, 50.0]);
        let guess = CalibrationSettings {
            initial_guess: Vector3::new(1.0, 2.0, 3.0),
            ..CalibrationSettings::default()
        };
        let mut calibration = RobotToolCalibration::new(&irb2400(), vec![pose; 5], unset())
            .with_settings(guess);

        let tcp = calibration.calculate();
        assert_eq!(tcp, Vector3::new(1.0, 2.0, 3.0));
        assert!(calibration.converged());
        assert_eq!(calibration.maximum_error(), Vector3::zeros());
    }

    #[test]
    fn test_translation_only_poses_stay_finite() {
        // Same orientation everywhere, the tool offset is not observable
        let poses = vec![
            RobotJointPosition::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            RobotJointPosition::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            RobotJointPosition::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            RobotJointPosition::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ];
        let external = vec![
            ExternalJointPosition::from_slice(&[0.0]),
            ExternalJointPosition::from_slice(&[500.0]),
            ExternalJointPosition::from_slice(&[1200.0]),
            ExternalJointPosition::from_slice(&[3000.0]),
        ];
        let robot = irb2400().with_external_axis(crate::external_axis::ExternalAxis::linear(
            "track", Vector3::x_axis(), crate::limits::Interval::new(0.0, 4000.0)));
        let guess = CalibrationSettings {
            initial_guess: Vector3::new(1.0, 2.0, 3.0),
            ..CalibrationSettings::default()
        };
        let mut calibration = RobotToolCalibration::new(&robot, poses, external).with_settings(guess);

        let tcp = calibration.calculate();
        assert!(tcp.iter().all(|v| v.is_finite()));
        assert_eq!(tcp, Vector3::new(1.0, 2.0, 3.0));
        assert!(calibration.maximum_error().iter().all(|v| v.is_finite()));

        // Poses spread 3 meters apart do not agree, so this is not a success
        assert!(!calibration.converged());
        assert_eq!(calibration.iterations_used(), 1);
    }

    #[test]
    fn test_tcp_recovered_for_any_delta() {
        for delta in [1E-1, 1E-2, 1E-3, 1E-4, 1E-5, 1E-6] {
            let settings = CalibrationSettings { delta, ..CalibrationSettings::default() };
            let mut calibration = RobotToolCalibration::new(
                &synthetic_robot(), orientation_poses(&SYNTHETIC_ORIENTATIONS), unset())
                .with_settings(settings);
            assert!(calibration.is_valid());

            let tcp = calibration.calculate();
            assert!(calibration.converged(), "delta {}: not converged", delta);
            assert!(calibration.iterations_used() > 1, "delta {}: stopped after one iteration", delta);
            assert_near(&tcp, &SYNTHETIC_TCP, 0.05);
            assert!(calibration.maximum_error().amax() < 0.01,
                    "delta {}: maximum error {}", delta, calibration.maximum_error());

            calibration.set_settings(CalibrationSettings { precision: 1E-8, ..settings });
            let tcp = calibration.calculate();
            assert_near(&tcp, &SYNTHETIC_TCP, 1E-6);
        }
    }

    #[test]
    fn test_wrist_center_with_small_delta() {
        let settings = CalibrationSettings { delta: 1E-6, precision: 1E-8, ..CalibrationSettings::default() };
        let mut calibration = RobotToolCalibration::new(&irb2400(), wrist_poses(), unset())
            .with_settings(settings);
        let tcp = calibration.calculate();
        assert!(calibration.converged());
        assert_near(&tcp, &WRIST_CENTER, 1E-4);
        assert!(calibration.maximum_error().amax() < 1E-4);
    }

    #[test]
    fn test_limit_check_names_pose() {
        let mut poses = wrist_poses();
        let calibration = RobotToolCalibration::new(&irb2400(), poses.clone(), unset());
        assert!(calibration.check_joint_positions_axis_limits().is_empty());

        // J5 beyond 120 degrees
        poses[2] = RobotJointPosition::new([10.0, 20.0, -10.0, -60.0, 125.0, -30.0]);
        let calibration = RobotToolCalibration::new(&irb2400(), poses, unset());
        let warnings = calibration.check_joint_positions_axis_limits();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Joint position #2:"), "{}", warnings[0]);
        assert!(warnings[0].contains("robot axis 5"), "{}", warnings[0]);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = RobotToolCalibration::new(&irb2400(), wrist_poses(), unset());
        let mut duplicate = original.clone();

        duplicate.robot_joint_positions_mut().push(RobotJointPosition::new([0.0; 6]));
        duplicate.external_joint_positions_mut()[0] = ExternalJointPosition::from_slice(&[1.0]);
        duplicate.re_initialize();
        duplicate.calculate();

        assert_eq!(original.robot_joint_positions().len(), 5);
        assert_eq!(original.frames().len(), 5);
        assert!(original.external_joint_positions()[0].is_unset());
        assert_eq!(original.iterations_used(), 0);
        assert_eq!(original.tcp(), Vector3::zeros());

        assert_eq!(duplicate.robot_joint_positions().len(), 6);
        assert_eq!(duplicate.external_joint_positions().len(), 6);
        assert_eq!(duplicate.frames().len(), 6);
    }

    #[test]
    fn test_re_initialize_after_mutation() {
        let mut calibration = RobotToolCalibration::new(&irb2400(), wrist_poses(), unset());
        calibration.calculate();
        let frame = calibration.frames()[0];

        calibration.robot_joint_positions_mut()[0] = RobotJointPosition::new([0.0, 0.0, 0.0, 0.0, 30.0, 0.0]);
        calibration.re_initialize();

        assert_ne!(calibration.frames()[0], frame);
        assert_eq!(calibration.iterations_used(), 0);
        assert!(!calibration.converged());
        assert_eq!(calibration.tcp(), Vector3::zeros());
    }

    #[test]
    fn test_is_valid() {
        let robot = irb2400();
        assert!(RobotToolCalibration::new(&robot, wrist_poses(), unset()).is_valid());
        assert!(!RobotToolCalibration::new(&robot, wrist_poses()[..3].to_vec(), unset()).is_valid());

        let mut not_finite = wrist_poses();
        not_finite[1] = RobotJointPosition::new([f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(!RobotToolCalibration::new(&robot, not_finite, unset()).is_valid());

        let bad_settings = CalibrationSettings { delta: 0.0, ..CalibrationSettings::default() };
        assert!(!RobotToolCalibration::new(&robot, wrist_poses(), unset())
            .with_settings(bad_settings).is_valid());

        let empty = RobotToolCalibration::new(&robot, Vec::new(), Vec::new());
        assert!(!empty.is_valid());
        assert_eq!(format!("{}", empty), "Invalid Robot Tool Calibration");
    }

    #[test]
    fn test_fewer_poses_still_run() {
        let mut calibration = RobotToolCalibration::new(
            &synthetic_robot(), orientation_poses(&SYNTHETIC_ORIENTATIONS[..2]), unset());
        assert!(!calibration.is_valid());
        let tcp = calibration.calculate();
        assert!(tcp.iter().all(|v| v.is_finite()));

        let mut nothing = RobotToolCalibration::new(&synthetic_robot(), Vec::new(), Vec::new());
        assert_eq!(nothing.calculate(), Vector3::zeros());
        assert_eq!(nothing.maximum_error(), Vector3::zeros());
        assert_eq!(nothing.mean_error(), Vector3::zeros());
    }

    #[test]
    fn test_damping_and_initial_guess() {
        let settings = CalibrationSettings {
            damping: 0.5,
            initial_guess: Vector3::new(5.0, 5.0, 5.0),
            ..CalibrationSettings::default()
        };
        let mut damped = RobotToolCalibration::new(
            &synthetic_robot(), orientation_poses(&SYNTHETIC_ORIENTATIONS), unset())
            .with_settings(settings);
        let mut full = damped.clone().with_settings(CalibrationSettings::default());

        let tcp = damped.calculate();
        full.calculate();
        assert!(damped.converged());
        assert!(damped.iterations_used() > full.iterations_used());
        assert_near(&tcp, &SYNTHETIC_TCP, 0.05);
        assert_eq!(damped.settings().damping, 0.5);
    }

    #[test]
    fn test_iteration_cap() {
        let settings = CalibrationSettings { iterations: 1, precision: 1E-12, ..CalibrationSettings::default() };
        let mut calibration = RobotToolCalibration::new(&irb2400(), wrist_poses(), unset())
            .with_settings(settings);
        calibration.calculate();
        assert_eq!(calibration.iterations_used(), 1);
        assert!(!calibration.converged());
    }

    #[test]
    fn test_calibrated_tool_and_display() {
        let mut calibration = RobotToolCalibration::new(
            &synthetic_robot(), orientation_poses(&SYNTHETIC_ORIENTATIONS), unset())
            .with_settings(precise());
        assert_eq!(format!("{}", calibration), "Robot Tool Calibration (6 poses)");

        calibration.calculate();
        assert_eq!(format!("{}", calibration),
                   "Robot Tool Calibration (6 poses): tcp [12.5, -30, 150], maximum error [0, 0, 0]");

        let tool = calibration.calibrated_tool("pointer");
        assert_eq!(tool.name, "pointer");
        assert_near(&tool.tcp(), &SYNTHETIC_TCP, 1E-6);
        assert_eq!(calibration.planes().len(), 6);
    }

    #[test]
    fn test_tool_of_robot_is_ignored() {
        let with_tool = irb2400().with_tool(crate::tool::RobotTool::from_tcp("old", Vector3::new(0.0, 0.0, 300.0)));
        let mut calibration = RobotToolCalibration::new(&with_tool, wrist_poses(), unset());
        assert!(calibration.robot().tool().is_zero_offset());
        let tcp = calibration.calculate();
        assert_near(&tcp, &WRIST_CENTER, 0.05);
    }

    #[test]
    fn test_custom_kinematics_robot() {
        // Bare robot with unbounded limits never reports limit warnings
        let robot = Robot::new("custom", synthetic_robot().kinematics().clone(), AxisLimits::unbounded());
        let calibration = RobotToolCalibration::new(
            &robot, orientation_poses(&SYNTHETIC_ORIENTATIONS), unset());
        assert!(calibration.check_joint_positions_axis_limits().is_empty());
    }
}
