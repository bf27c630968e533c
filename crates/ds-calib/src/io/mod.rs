mod parser;

pub use parser::*;

/// Error types for the calibration io module.
#[derive(Debug, thiserror::Error)]
pub enum CalibParseError {
    /// The blob was written by firmware older than the layout decoded here
    #[error("unsupported calibration version {0} (minimum supported is {MIN_SUPPORTED_VERSION})")]
    UnsupportedVersion(u32),

    /// A decoded sensor or mode count exceeds the record's fixed capacity
    #[error("{field} is {value}, record capacity is {max}")]
    CountOutOfRange {
        /// Wire name of the offending count field
        field: &'static str,
        /// The decoded count
        value: u32,
        /// Capacity of the destination array
        max: usize,
    },

    /// A decode would run past the end of the buffer
    #[error("calibration blob truncated: {needed} bytes needed at offset {offset}, buffer holds {len}")]
    TruncatedBuffer {
        /// Byte offset the decode started at
        offset: usize,
        /// Number of bytes the decode needed
        needed: usize,
        /// Total buffer length
        len: usize,
    },
}
