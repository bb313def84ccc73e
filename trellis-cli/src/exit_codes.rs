//! Process exit codes

/// Everything worked
pub const EXIT_SUCCESS: i32 = 0;

/// Rejected input or a save that did not land; nothing is broken
pub const EXIT_WARNING: i32 = 1;

/// The command failed
pub const EXIT_ERROR: i32 = 2;
