mod calibration_test;
mod calibration_test_random;
