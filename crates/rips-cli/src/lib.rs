//! Library surface of the RIPS validator CLI.
//!
//! Only the logging setup is exposed; everything else lives in the binary.

pub mod logging;
