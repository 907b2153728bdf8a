//! `hohha`: single-message encrypt/decrypt, key generation, and CRC32 of
//! a message or key body. The known-plaintext recovery front end lives
//! in the separate `hohha-attack` binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod io_util;

use error::CliError;

#[derive(Parser)]
#[command(name = "hohha")]
#[command(about = "Hohha Dynamic XOR cipher command-line tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt a single message, framing it with a packet header
    Encrypt {
        /// Base64-encoded Hohha key blob
        #[arg(long)]
        key: String,
        /// Input file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decrypt a packet produced by `hohha encrypt`
    Decrypt {
        /// Base64-encoded Hohha key blob
        #[arg(long)]
        key: String,
        /// Input file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a random key blob
    Keygen {
        /// Key body length in bytes (must be a power of two)
        #[arg(short = 'l', long, default_value_t = 16)]
        length: usize,
        /// Jump count
        #[arg(short = 'j', long, default_value_t = 2)]
        jumps: u8,
    },
    /// CRC32 of a message or a key body
    Crc {
        /// Message (plain)
        #[arg(short = 'M', long)]
        message: Option<String>,
        /// Message (base64)
        #[arg(short = 'm', long)]
        message_base64: Option<String>,
        /// Hohha key blob (base64) — the CRC is taken over its key body
        #[arg(short = 'K', long)]
        key_blob: Option<String>,
        /// Key body (base64)
        #[arg(short = 'k', long)]
        key_body: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hohha: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Encrypt { key, input, output } => commands::encrypt(&key, input, output),
        Command::Decrypt { key, input, output } => commands::decrypt(&key, input, output),
        Command::Keygen { length, jumps } => commands::keygen(length, jumps),
        Command::Crc {
            message,
            message_base64,
            key_blob,
            key_body,
        } => commands::crc(message, message_base64, key_blob, key_body),
    }
}
