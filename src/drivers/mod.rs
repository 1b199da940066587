//! Peripheral drivers, generic over `embedded-hal` 1.0 traits.
//!
//! Every driver takes its pins and delay source by value, so the same
//! code runs against real ESP32 GPIO on the device and mock pins in
//! host tests.

pub mod lcd;
pub mod matrix;
pub mod relay;
