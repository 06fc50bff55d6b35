//! Process exit codes.

use crate::error::CliError;

pub const SUCCESS: i32 = 0;

/// Any failure, a failed simulation trial included.
pub const ERROR: i32 = 2;

/// The run was stopped early and only partial statistics were reported.
pub const INTERRUPTED: i32 = 130;

pub fn for_error(e: &CliError) -> i32 {
    match e {
        CliError::Interrupted(_) => INTERRUPTED,
        _ => ERROR,
    }
}
