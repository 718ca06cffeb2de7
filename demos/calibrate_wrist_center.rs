use rs_tcp_calibration::joint_position::{ExternalJointPosition, RobotJointPosition};
use rs_tcp_calibration::limits::AxisLimits;
use rs_tcp_calibration::parameters::opw_kinematics::Parameters;
use rs_tcp_calibration::robot::Robot;
use rs_tcp_calibration::tool_calibration::{CalibrationSettings, RobotToolCalibration};
use rs_tcp_calibration::utils::format_vector;

/// Usage example.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "rs_tcp_calibration=debug".to_owned()),
        )
        .init();

    let robot = Robot::opw("IRB2400", Parameters::irb2400_10(), AxisLimits::unbounded());

    // J1 - J3 stay, J4 - J6 rotate around the wrist center that is c4 = 85 mm behind the flange
    let poses = vec![
        RobotJointPosition::new([10.0, 20.0, -10.0, 0.0, 30.0, 0.0]),
        RobotJointPosition::new([10.0, 20.0, -10.0, 45.0, -40.0, 90.0]),
        RobotJointPosition::new([10.0, 20.0, -10.0, -60.0, 50.0, -30.0]),
        RobotJointPosition::new([10.0, 20.0, -10.0, 120.0, 25.0, 10.0]),
        RobotJointPosition::new([10.0, 20.0, -10.0, -20.0, -70.0, 170.0]),
    ];

    let mut calibration = RobotToolCalibration::new(&robot, poses, vec![ExternalJointPosition::unset()]);
    println!("{}", calibration);

    let tcp = calibration.calculate();
    println!("Default precision: tcp {} after {} iterations, maximum error {}",
             format_vector(&tcp), calibration.iterations_used(), format_vector(&calibration.maximum_error()));

    // Tighter precision only costs a few more iterations
    calibration.set_settings(CalibrationSettings { precision: 1E-8, ..CalibrationSettings::default() });
    let tcp = calibration.calculate();
    println!("Precision 1E-8: tcp {} after {} iterations, maximum error {}",
             format_vector(&tcp), calibration.iterations_used(), format_vector(&calibration.maximum_error()));
}
