//! Exit codes for the pstat CLI.
//!
//! Scripts can branch on these without parsing output. They are stable.

use pstat_common::Error;

/// Exit codes for pstat operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every calculation succeeded
    Clean = 0,

    /// Batch finished but some requests failed
    PartialFail = 3,

    /// Settings file missing, unreadable, or invalid
    ConfigError = 10,

    /// Input rejected by a formula (domain, range, division by zero)
    InputError = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Exit code for an error that aborted the run.
    pub fn for_error(err: &Error) -> Self {
        match err {
            Error::Domain(_) | Error::Range(_) | Error::DivisionByZero(_) => ExitCode::InputError,
            Error::Config(_) => ExitCode::ConfigError,
            Error::Io(_) => ExitCode::IoError,
            Error::Json(_) => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
