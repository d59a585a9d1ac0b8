//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the firmware against the
//! simulated board. All tests run on the host with no real hardware.

mod main_loop_tests;
mod mock_hw;
mod service_tests;
