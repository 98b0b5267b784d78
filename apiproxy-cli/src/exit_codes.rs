/// Process exit codes.
pub const SUCCESS: i32 = 0;
/// Definitions, templates or variables were rejected.
pub const VALIDATION_FAILED: i32 = 2;
/// The request was sent but did not succeed.
pub const RUN_FAILED: i32 = 3;
/// Local failure such as an unreadable file.
pub const RUNTIME_ERROR: i32 = 4;
