use thiserror::Error;

use crate::sequence::Phase;

/// `ERROR_ACCESS_DENIED`
const ACCESS_DENIED: u32 = 5;

/// HRESULT facility used when a Win32 error code is wrapped (`FACILITY_WIN32`).
const FACILITY_WIN32_MASK: u32 = 0xFFFF_0000;
const FACILITY_WIN32_BITS: u32 = 0x8007_0000;

/// The numeric error code the OS reported for a failed call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{code}")]
pub struct OsError {
    code: u32,
}

// Codes are only decoded from HRESULTs on Windows.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
impl OsError {
    pub fn new(code: u32) -> Self {
        Self { code }
    }

    /// Unwraps the Win32 code from a `HRESULT_FROM_WIN32` value. Any other
    /// HRESULT is kept as its raw bits.
    pub fn from_hresult(hresult: i32) -> Self {
        let bits = hresult as u32;
        if bits & FACILITY_WIN32_MASK == FACILITY_WIN32_BITS {
            Self::new(bits & 0xFFFF)
        } else {
            Self::new(bits)
        }
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn is_access_denied(&self) -> bool {
        self.code == ACCESS_DENIED
    }
}

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Failed to initialize touch injection. Error: {0}")]
    Initialization(OsError),
    #[error("Failed to inject touch {phase}. Error: {source}")]
    Injection {
        phase: Phase,
        x: i32,
        y: i32,
        source: OsError,
    },
    #[cfg(not(target_os = "windows"))]
    #[error("Touch injection is only available on Windows; use --dry-run to log the sequence instead.")]
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win32_hresult_is_unwrapped() {
        let err = OsError::from_hresult(0x8007_0005_u32 as i32);
        assert_eq!(err.code(), 5);
        assert!(err.is_access_denied());

        let err = OsError::from_hresult(0x8007_0057_u32 as i32);
        assert_eq!(err.code(), 87);
        assert!(!err.is_access_denied());
    }

    #[test]
    fn other_hresults_keep_raw_bits() {
        let err = OsError::from_hresult(0x8000_4005_u32 as i32);
        assert_eq!(err.code(), 0x8000_4005);
        assert!(!err.is_access_denied());
    }

    #[test]
    fn os_error_displays_its_code() {
        assert_eq!(OsError::new(1450).to_string(), "1450");
    }

    #[test]
    fn messages_carry_the_code() {
        let err = SimulationError::Initialization(OsError::new(5));
        assert_eq!(
            err.to_string(),
            "Failed to initialize touch injection. Error: 5"
        );

        let err = SimulationError::Injection {
            phase: Phase::Move,
            x: 400,
            y: 350,
            source: OsError::new(87),
        };
        assert_eq!(err.to_string(), "Failed to inject touch move. Error: 87");
    }
}
