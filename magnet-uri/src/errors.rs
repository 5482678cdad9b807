use thiserror::Error;

/// The result type for the magnet uri package.
pub type Result<T> = std::result::Result<T, MagnetError>;

/// Represents possible errors that can occur when handing magnet data across a dynamic boundary.
///
/// Decoding a magnet uri string never fails, malformed parameters are skipped instead.
/// These errors are only raised when the caller supplies a value of the wrong shape.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MagnetError {
    /// The given argument is not of the expected type.
    #[error("invalid argument, {0}")]
    InvalidArgument(String),
}
