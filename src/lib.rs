//! # ndev-sampledata
//!
//! Sample bio-image providers for image-viewer hosts.
//!
//! Each provider is a parameterless function that resolves a bundled (or
//! remotely fetched, hash-verified) image file, decodes it, slices out the
//! channels or time series the sample is about, and returns the layers the
//! host viewer expects: raw pixel data paired with hand-authored display
//! metadata and an optional layer kind.
//!
//! The crate is deliberately thin. Decoding is delegated to the `tiff` and
//! `image` crates, remote retrieval is a single digest-verified fetch with a
//! local cache, and rendering belongs to the host. What lives here is the
//! per-sample wiring: which file, which slices, which colors.
//!
//! ## Modules
//!
//! - [`samples`] - the sample providers and their registry
//! - [`layer`] - layer tuples and the display metadata vocabulary
//! - [`bioimage`] - decoding adapter with OME-XML channel/time layout
//! - [`fetch`] - content-addressed retrieval of remote assets
//! - [`reader`] - generic path-to-layers conversion
//! - [`config`] - sample directory resolution
//!
//! ## Example
//!
//! ```rust,no_run
//! use ndev_sampledata::samples;
//!
//! let layers = samples::neocortex()?;
//! assert_eq!(layers.len(), 3);
//! for layer in &layers {
//!     println!("{}: {:?}", layer.metadata.name, layer.data.shape());
//! }
//! # Ok::<(), ndev_sampledata::SampleError>(())
//! ```

pub mod bioimage;
pub mod config;
pub mod error;
pub mod fetch;
pub mod layer;
pub mod reader;
pub mod samples;

// Re-export commonly used types
pub use bioimage::{parse_ome_xml, BioImage, DimensionOrder, OmeMetadata};
pub use error::SampleError;
pub use fetch::{md5_hex, sha256_hex, KnownHash, RemoteAsset};
pub use layer::{Blending, Colormap, Layer, LayerKind, LayerMetadata, PixelData};
pub use reader::layers_from_path;
pub use samples::{SampleProvider, SampleSpec};
