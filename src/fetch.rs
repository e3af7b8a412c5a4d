//! Content-addressed retrieval of remote sample assets.
//!
//! Remote samples are pinned by URL plus content digest. [`RemoteAsset::retrieve`]
//! downloads the file into the sample directory on first use and reuses the
//! cached copy afterwards. The digest is checked on every path: a cached file
//! whose hash does not match fails hard rather than silently feeding bad data
//! to the host, and a fresh download is verified before it is moved into
//! place.
//!
//! Pins carry their algorithm ([`KnownHash`]): published deposits commonly
//! advertise md5 digests, local pins use sha256.
//!
//! One fetch, no retries, no partial reads: this mirrors how the samples are
//! consumed, a single whole-file decode immediately after retrieval.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use md5::Md5;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::SampleError;

// =============================================================================
// Known Hashes
// =============================================================================

/// Digest algorithms a sample pin may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha256,
}

impl HashAlgorithm {
    /// Algorithm name as used in `algorithm:hex` digest specs.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha256 => "sha256",
        }
    }
}

/// A pinned content digest with its algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownHash {
    /// Digest algorithm
    pub algorithm: HashAlgorithm,

    /// Expected digest, hex (compared case-insensitively)
    pub hex: String,
}

impl KnownHash {
    /// An md5 pin, as published deposits commonly advertise.
    pub fn md5(hex: impl Into<String>) -> Self {
        Self {
            algorithm: HashAlgorithm::Md5,
            hex: hex.into(),
        }
    }

    /// A sha256 pin.
    pub fn sha256(hex: impl Into<String>) -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            hex: hex.into(),
        }
    }

    /// The `algorithm:hex` spec form used in error messages.
    pub fn spec(&self) -> String {
        format!("{}:{}", self.algorithm.name(), self.hex.to_ascii_lowercase())
    }

    fn hash_bytes(&self, bytes: &[u8]) -> String {
        match self.algorithm {
            HashAlgorithm::Md5 => md5_hex(bytes),
            HashAlgorithm::Sha256 => sha256_hex(bytes),
        }
    }
}

// =============================================================================
// Remote Assets
// =============================================================================

/// A remote sample asset pinned by content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAsset {
    /// Download URL
    pub url: String,

    /// File name under the sample directory
    pub file_name: String,

    /// Expected content digest
    pub known_hash: KnownHash,
}

impl RemoteAsset {
    /// Describe a remote asset.
    pub fn new(url: impl Into<String>, file_name: impl Into<String>, known_hash: KnownHash) -> Self {
        Self {
            url: url.into(),
            file_name: file_name.into(),
            known_hash,
        }
    }

    /// Resolve the asset to a local path under `dir`, downloading on cache miss.
    ///
    /// # Errors
    ///
    /// - [`SampleError::HashMismatch`] if the cached or downloaded content
    ///   does not hash to the pinned digest. A corrupted cache file is never
    ///   repaired or replaced here; the caller decides what to do with it.
    /// - [`SampleError::Fetch`] if the download fails.
    pub fn retrieve(&self, dir: &Path) -> Result<PathBuf, SampleError> {
        let dest = dir.join(&self.file_name);

        if dest.exists() {
            debug!(path = %dest.display(), "sample asset already cached, verifying");
            verify_file(&dest, &self.known_hash)?;
            return Ok(dest);
        }

        info!(url = %self.url, path = %dest.display(), "downloading sample asset");
        let response = reqwest::blocking::get(&self.url)
            .and_then(|r| r.error_for_status())
            .map_err(|source| SampleError::Fetch {
                url: self.url.clone(),
                source,
            })?;
        let body = response.bytes().map_err(|source| SampleError::Fetch {
            url: self.url.clone(),
            source,
        })?;

        let actual = self.known_hash.hash_bytes(&body);
        if !actual.eq_ignore_ascii_case(&self.known_hash.hex) {
            return Err(SampleError::HashMismatch {
                path: dest,
                expected: self.known_hash.spec(),
                actual: format!("{}:{}", self.known_hash.algorithm.name(), actual),
            });
        }

        // Write through a temp name so a partial download never becomes the
        // cached file.
        fs::create_dir_all(dir)?;
        let partial = partial_path(&dest);
        fs::write(&partial, &body)?;
        fs::rename(&partial, &dest)?;

        debug!(path = %dest.display(), bytes = body.len(), "sample asset cached");
        Ok(dest)
    }
}

/// Temp-file name for an in-flight download.
///
/// Appends `.part` rather than replacing the extension, so assets that share
/// a stem (`a.tiff`, `a.png`) never collide on their partial names.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

// =============================================================================
// Digests
// =============================================================================

/// Lowercase hex sha256 digest of a byte slice.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Lowercase hex md5 digest of a byte slice.
pub fn md5_hex(bytes: &[u8]) -> String {
    hex::encode(Md5::digest(bytes))
}

/// Verify that the file at `path` hashes to the pinned digest.
pub fn verify_file(path: &Path, expected: &KnownHash) -> Result<(), SampleError> {
    let mut file = fs::File::open(path)?;
    let actual = match expected.algorithm {
        HashAlgorithm::Md5 => hash_reader::<Md5>(&mut file)?,
        HashAlgorithm::Sha256 => hash_reader::<Sha256>(&mut file)?,
    };

    if !actual.eq_ignore_ascii_case(&expected.hex) {
        return Err(SampleError::HashMismatch {
            path: path.to_path_buf(),
            expected: expected.spec(),
            actual: format!("{}:{}", expected.algorithm.name(), actual),
        });
    }
    Ok(())
}

fn hash_reader<D: Digest>(reader: &mut impl Read) -> std::io::Result<String> {
    let mut hasher = D::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

// =============================================================================
// Tests
// =============================================================================
