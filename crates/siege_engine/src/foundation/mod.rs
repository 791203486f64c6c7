//! Foundation utilities: math, timing, logging

pub mod logging;
pub mod math;
pub mod time;

pub use math::{Mat4, Transform, Vec3};
pub use time::Timer;
