#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Binary decoding of calibration blobs.
pub mod io;

/// Calibration record types and capacity constants.
pub mod params;
