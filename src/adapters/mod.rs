//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to              |
//! |------------|-------------|--------------------------|
//! | `delay`    | DelayPort   | FreeRTOS / thread sleep  |
//! | `log_sink` | EventSink   | Serial log output        |
//! | `nvs`      | StoragePort | NVS / in-memory store    |
//!
//! The keypad, LCD, and relay ports are implemented directly by the
//! generic drivers in [`crate::drivers`], instantiated with real ESP32
//! pins in `main`.

pub mod delay;
pub mod log_sink;
pub mod nvs;
