//! Shared stdin/stdout-or-file plumbing for the single-message commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

pub fn read_input(path: Option<&Path>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

pub fn write_output(path: Option<&Path>, data: &[u8]) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, data),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data)?;
            stdout.flush()
        }
    }
}
