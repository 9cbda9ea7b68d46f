//! Keypair files.
//!
//! A keypair file holds one line: the 64-byte keypair (seed then public
//! key) as 128 lowercase hex characters, followed by a newline.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use spring83_core::KeyMaterial;
use tracing::debug;

use crate::error::{Error, Result};

/// Read and integrity-check a keypair file.
pub fn load_keypair(path: impl AsRef<Path>) -> Result<KeyMaterial> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("reading keypair {}", path.display()), e))?;

    let key = KeyMaterial::from_hex(&text)?;
    debug!(path = %path.display(), pubkey = %key.public_key(), "loaded keypair");
    Ok(key)
}

/// `spring-83-keypair-YYYY-MM-DD-<first 6 pubkey bytes in hex>.txt`
pub fn keypair_filename(key: &KeyMaterial, date: NaiveDate) -> String {
    format!(
        "spring-83-keypair-{}-{}.txt",
        date.format("%Y-%m-%d"),
        hex::encode(&key.public_key().as_bytes()[..6])
    )
}

/// Write a new keypair file into `dir`, returning its path.
///
/// Refuses to overwrite an existing file. On Unix the file is created
/// readable by its owner only.
pub fn save_keypair(dir: impl AsRef<Path>, key: &KeyMaterial, date: NaiveDate) -> Result<PathBuf> {
    let path = dir.as_ref().join(keypair_filename(key, date));

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let context = || format!("writing keypair {}", path.display());
    let mut file = options.open(&path).map_err(|e| Error::io(context(), e))?;
    writeln!(file, "{}", key.to_hex()).map_err(|e| Error::io(context(), e))?;

    Ok(path)
}
