//! Exit status codes for the CLI
//!
//! restcurl follows standard Unix exit code conventions:
//! - 0: Success
//! - 1: Any error (unreadable input, rejected request, bad arguments)

use std::process::{ExitCode, Termination};

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Every command was translated and printed
    Success = 0,
    /// Input could not be read, or a request was rejected by the schema
    Error = 1,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repr() {
        assert_eq!(ExitStatus::Success as u8, 0);
        assert_eq!(ExitStatus::Error as u8, 1);
    }
}
