//! Sample directory resolution.
//!
//! Sample assets live under a single fixed directory. By default that is the
//! `samples/` directory bundled with the crate; the `NDEV_SAMPLE_DIR`
//! environment variable overrides it, which is how deployments relocate the
//! asset cache (the remote-fetch samples write downloaded files into this
//! directory).

use std::path::{Path, PathBuf};

/// Environment variable overriding the sample asset directory.
pub const SAMPLE_DIR_ENV: &str = "NDEV_SAMPLE_DIR";

/// Name of the bundled sample directory, relative to the crate root.
pub const DEFAULT_SAMPLE_DIR: &str = "samples";

/// Resolve the sample asset directory.
///
/// `NDEV_SAMPLE_DIR` wins when set; otherwise the bundled `samples/`
/// directory next to the crate manifest is used. The directory is not
/// required to exist yet — remote-fetch samples create it on first download.
pub fn samples_dir() -> PathBuf {
    match std::env::var_os(SAMPLE_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_SAMPLE_DIR),
    }
}
