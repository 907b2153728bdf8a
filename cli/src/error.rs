//! CLI-level error type and the exit-code mapping described in spec §6:
//! 0 normal, 1 malformed input or invalid argument, 2 usage error or
//! internal consistency-check failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Cipher(#[from] hohha_cipher::CipherError),
    #[error(transparent)]
    Base64(#[from] hohha_base64::Error),
    #[error(transparent)]
    Recover(#[from] hohha_recover::RecoverError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgument(_) => 1,
            CliError::Cipher(_) => 1,
            CliError::Base64(_) => 1,
            CliError::Io(_) => 1,
            CliError::Recover(hohha_recover::RecoverError::InvalidInput(_)) => 1,
            CliError::Recover(_) => 2,
        }
    }
}
