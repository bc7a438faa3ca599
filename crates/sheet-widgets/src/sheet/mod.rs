#![forbid(unsafe_code)]

//! Bottom sheet: controller, surface seam, notifications, and host policy.

pub mod controller;
pub mod header;
pub mod host;
pub mod notify;
pub mod surface;
