//! Command-line front end for table fusion.
//!
//! The binary works on a JSON workspace file holding the tables, views and
//! records of a host workspace. The modules here are shared by the binary and
//! its tests.

pub mod config;
pub mod logging;
pub mod progress;
pub mod resolve;
pub mod run;
pub mod text;
