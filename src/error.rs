use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading a sample.
///
/// Sample loading is a pass-through over its collaborators: decoder, fetch,
/// and filesystem failures are surfaced to the caller unchanged in meaning.
/// There is no local recovery.
#[derive(Debug, Error)]
pub enum SampleError {
    /// I/O error while reading or writing a sample file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF decode error from the underlying decoder
    #[error("TIFF decode error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// 2-D image decode error (PNG and friends)
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// OME-XML metadata could not be parsed
    #[error("OME-XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// OME metadata is present but inconsistent with the file contents
    #[error("invalid OME metadata: {0}")]
    Ome(String),

    /// Pixel buffer could not be reshaped to the expected dimensions
    #[error("invalid array shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Remote asset download failed
    #[error("download failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Content hash of a fetched or cached file does not match the pinned value
    #[error("hash mismatch for {path}: expected {expected}, got {actual}")]
    HashMismatch {
        path: PathBuf,
        /// Pinned digest in `algorithm:hex` form
        expected: String,
        /// Observed digest in `algorithm:hex` form
        actual: String,
    },

    /// Requested channel index exceeds the channel count of the image
    #[error("missing channel {channel}: image has {available} channel(s)")]
    MissingChannel { channel: usize, available: usize },

    /// Requested plane index exceeds the plane count of the image
    #[error("missing plane {plane}: image has {available} plane(s)")]
    MissingPlane { plane: usize, available: usize },

    /// Sample data uses a pixel format this crate does not expose
    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),
}
