//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error: unknown column, sort key or filter pattern
pub const USAGE: i32 = 64;

/// Data format error: payload is not the expected JSON
pub const DATAERR: i32 = 65;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Can't create output file
pub const CANTCREAT: i32 = 73;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
