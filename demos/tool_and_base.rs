use nalgebra::{Point3, Vector3};
use rs_tcp_calibration::external_axis::ExternalAxis;
use rs_tcp_calibration::joint_position::{ExternalJointPosition, RobotJointPosition};
use rs_tcp_calibration::limits::{AxisLimits, Interval};
use rs_tcp_calibration::parameters::opw_kinematics::Parameters;
use rs_tcp_calibration::plane::Plane;
use rs_tcp_calibration::robot::Robot;
use rs_tcp_calibration::tool::RobotTool;
use rs_tcp_calibration::tool_calibration::RobotToolCalibration;
use rs_tcp_calibration::utils::{dump_pose, format_vector};

fn main() {
    // Half meter high pedestal, moving along the track in x
    let pedestal = Plane::new(Point3::new(0.0, 0.0, 500.0), Vector3::x(), Vector3::y())
        .expect("world axes are not parallel");

    let robot = Robot::opw("IRB2400", Parameters::irb2400_10(), AxisLimits::from_degrees(
        [-180.0, -100.0, -60.0, -200.0, -120.0, -400.0],
        [180.0, 110.0, 65.0, 200.0, 120.0, 400.0],
    ))
        .with_base(pedestal.to_pose())
        .with_external_axis(ExternalAxis::linear("track", Vector3::x_axis(), Interval::new(0.0, 4000.0)))
        // Tool extends 250 mm in the Z direction, but nobody knows how exactly it is mounted
        .with_tool(RobotTool::from_tcp("pointer", Vector3::new(0.0, 0.0, 250.0)));

    let on_track = ExternalJointPosition::from_slice(&[1200.0]);
    let home = RobotJointPosition::new([0.0; 6]);
    println!("{} at home: {}", robot.tool(), dump_pose(&robot.forward(&home, &on_track)));

    // Poses that only rotate the wrist touch the same point with the wrist center
    let poses: Vec<RobotJointPosition> = [
        [0.0, 30.0, 0.0],
        [45.0, -40.0, 90.0],
        [-60.0, 50.0, -30.0],
        [120.0, 25.0, 10.0],
    ].iter()
        .map(|[j4, j5, j6]| RobotJointPosition::new([10.0, 20.0, -10.0, *j4, *j5, *j6]))
        .collect();

    let mut calibration = RobotToolCalibration::new(&robot, poses.clone(), vec![on_track]);
    for warning in calibration.check_joint_positions_axis_limits() {
        println!("{}", warning);
    }
    calibration.calculate();
    println!("{}", calibration);

    // With the calibrated tool, all poses bring the TCP to the same point
    let calibrated = robot.clone().with_tool(calibration.calibrated_tool("wrist_center"));
    for (i, joints) in poses.iter().enumerate() {
        let tcp = calibrated.forward(joints, &on_track).translation.vector;
        println!("Pose {} {}: tcp at {}", i, joints, format_vector(&tcp));
    }
}
