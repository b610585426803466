use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - all diagrams and the summary were generated
    Success = 0,
    /// Application error (resolution failure, parse error, file I/O error, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for diagram generation.
///
/// Resolution and graph-construction failures are fatal and unwind the whole
/// run; a silently incomplete dependency graph is worse than no output.
/// Renderer failures are not represented here - they are logged at the point
/// of invocation and do not abort the run.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("The configuration is invalid: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to parse the solution: {path}\nDetails: {details}")]
    SolutionParse { path: PathBuf, details: String },

    #[error("Could not resolve the package {name} v{version}.")]
    PackageNotResolved { name: String, version: String },

    #[error("Cannot find a usable target framework for {name} v{version} from: {available}")]
    NoUsableTargetFramework {
        name: String,
        version: String,
        available: String,
    },

    #[error("The dependency project '{name}' was not found using the provided regex patterns.")]
    UnresolvedProjectReference { name: String },

    #[error("A project reference cycle was detected: {chain}")]
    ProjectReferenceCycle { chain: String },

    #[error("Failed to write to file: {path}\nDetails: {details}")]
    FileWrite { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}")]
    FileRead { path: PathBuf, details: String },
}
