/// Error carried out of every fallible operation.
///
/// The exit code doubles as a coarse error category:
/// - `2`: invalid input or configuration
/// - `3`: not enough data for the requested fit
/// - `4`: numerical failure (solver, non-finite output)
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub const USAGE: u8 = 2;
    pub const INSUFFICIENT_DATA: u8 = 3;
    pub const NUMERIC: u8 = 4;

    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(Self::USAGE, message)
    }

    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::new(Self::INSUFFICIENT_DATA, message)
    }

    pub fn numeric(message: impl Into<String>) -> Self {
        Self::new(Self::NUMERIC, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
