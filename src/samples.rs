//! The bundled sample providers.
//!
//! One parameterless function per named sample, each returning the fixed,
//! hand-authored layer sequence the host viewer expects. The functions are
//! thin: resolve a file under the sample directory (downloading and caching
//! remote assets on first use), decode it, slice out channels or time
//! series, and attach literal display metadata. Nothing is computed — every
//! colormap, blending mode, and contrast window below is a deliberate
//! per-sample choice.
//!
//! [`SampleProvider`] is the same surface over an explicit directory, which
//! is what tests and embedding hosts use; the free functions delegate to the
//! configured default directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::bioimage::{read_image, BioImage};
use crate::config;
use crate::error::SampleError;
use crate::fetch::{KnownHash, RemoteAsset};
use crate::layer::{Blending, Colormap, Layer, LayerKind, LayerMetadata};
use crate::reader::layers_from_path;

// =============================================================================
// Sample Files
// =============================================================================

/// Bundled logo image.
pub const NDEV_LOGO_FILE: &str = "ndev-logo.png";

/// Bundled 4-channel neuron crop, single timepoint.
pub const NEURON_4CH_FILE: &str = "neuron-4Ch-crop.tiff";

/// Bundled scratch assay, 10 timepoints, imaging + label channels.
pub const SCRATCH_ASSAY_FILE: &str = "scratch-assay-labeled-10T-2Ch.tiff";

/// Bundled 3-channel neocortex crop, single timepoint.
pub const NEOCORTEX_FILE: &str = "neocortex-3Ch-crop.tiff";

/// Bundled neuron label volume.
pub const NEURON_LABELS_FILE: &str = "neuron-4Ch_labels.tiff";

/// Bundled processed neuron label volume.
pub const NEURON_LABELS_PROCESSED_FILE: &str = "neuron-4Ch_labels_processed.tiff";

/// Remote raw neuron acquisition, fetched on first use.
pub const NEURON_RAW_FILE: &str = "neuron-4Ch_raw.tiff";

/// Download URL for [`NEURON_RAW_FILE`] (Zenodo deposit).
pub const NEURON_RAW_URL: &str = "https://zenodo.org/records/17836129/files/neuron-4Ch_raw.tiff";

/// Pinned md5 digest for [`NEURON_RAW_FILE`], as advertised by the Zenodo
/// deposit record.
pub const NEURON_RAW_MD5: &str = "5d3e42bca2085e8588b6f23cf89ba87c";

// =============================================================================
// Sample Provider
// =============================================================================

/// Sample loaders over an explicit sample directory.
///
/// The parameterless module functions are the plugin entry points; they run
/// against [`config::samples_dir`]. Construct a provider directly to load
/// the same samples from somewhere else (tests use temp directories).
#[derive(Debug, Clone)]
pub struct SampleProvider {
    dir: PathBuf,
}

impl SampleProvider {
    /// Provider over an explicit directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Provider over the configured default directory.
    pub fn from_env() -> Self {
        Self::new(config::samples_dir())
    }

    /// The resolved sample directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The project logo as a single RGB layer.
    pub fn ndev_logo(&self) -> Result<Vec<Layer>, SampleError> {
        let data = read_image(self.dir.join(NDEV_LOGO_FILE))?;
        let metadata = LayerMetadata::new("ndev logo")
            .with_blending(Blending::Translucent)
            .with_rgb();
        Ok(vec![Layer::new(data, metadata)])
    }

    /// Fixed 4-channel neuron image, one `(Y, X)` layer per stain.
    pub fn neuron_2d_4ch(&self) -> Result<Vec<Layer>, SampleError> {
        let img = BioImage::open_tiff(self.dir.join(NEURON_4CH_FILE))?;
        let scale = img.physical_pixel_sizes();

        Ok(vec![
            Layer::new(
                img.plane(0)?,
                LayerMetadata::new("NCOA4")
                    .with_blending(Blending::TranslucentNoDepth)
                    .with_colormap(Colormap::Cyan)
                    .with_scale(scale),
            ),
            Layer::new(
                img.plane(1)?,
                LayerMetadata::new("Ferritin")
                    .with_blending(Blending::Additive)
                    .with_colormap(Colormap::Yellow)
                    .with_scale(scale),
            ),
            Layer::new(
                img.plane(2)?,
                LayerMetadata::new("Phalloidin")
                    .with_blending(Blending::Additive)
                    .with_colormap(Colormap::Magenta)
                    .with_scale(scale),
            ),
            Layer::new(
                img.plane(3)?,
                LayerMetadata::new("DAPI")
                    .with_blending(Blending::Additive)
                    .with_colormap(Colormap::Red)
                    .with_scale(scale),
            ),
        ])
    }

    /// Time-lapse scratch assay: two imaging channels plus two label
    /// channels, each as a `(T, Y, X)` stack.
    pub fn scratch_assay(&self) -> Result<Vec<Layer>, SampleError> {
        let img = BioImage::open_tiff(self.dir.join(SCRATCH_ASSAY_FILE))?;
        let scale = img.physical_pixel_sizes();

        Ok(vec![
            Layer::new(
                img.timeseries(0)?,
                LayerMetadata::new("H3342")
                    .with_blending(Blending::TranslucentNoDepth)
                    .with_contrast_limits((400.0, 3500.0))
                    .with_colormap(Colormap::Cyan)
                    .with_scale(scale),
            )
            .with_kind(LayerKind::Image),
            Layer::new(
                img.timeseries(1)?,
                LayerMetadata::new("Oblique")
                    .with_blending(Blending::Additive)
                    .with_colormap(Colormap::Gray)
                    .with_scale(scale),
            )
            .with_kind(LayerKind::Image),
            Layer::new(
                img.timeseries(2)?,
                LayerMetadata::new("nuclei")
                    .with_blending(Blending::Additive)
                    .with_opacity(0.5)
                    .with_scale(scale),
            )
            .with_kind(LayerKind::Labels),
            Layer::new(
                img.timeseries(3)?,
                LayerMetadata::new("cytoplasm")
                    .with_blending(Blending::Additive)
                    .with_opacity(0.5)
                    .with_scale(scale),
            )
            .with_kind(LayerKind::Labels),
        ])
    }

    /// Fixed 3-channel neocortex image, one `(Y, X)` layer per stain.
    pub fn neocortex(&self) -> Result<Vec<Layer>, SampleError> {
        let img = BioImage::open_tiff(self.dir.join(NEOCORTEX_FILE))?;
        let scale = img.physical_pixel_sizes();

        Ok(vec![
            Layer::new(
                img.plane(0)?,
                LayerMetadata::new("CTIP2")
                    .with_blending(Blending::TranslucentNoDepth)
                    .with_colormap(Colormap::Cyan)
                    .with_scale(scale),
            ),
            Layer::new(
                img.plane(1)?,
                LayerMetadata::new("BRN2")
                    .with_blending(Blending::Additive)
                    .with_colormap(Colormap::Yellow)
                    .with_scale(scale),
            ),
            Layer::new(
                img.plane(2)?,
                LayerMetadata::new("ROR")
                    .with_blending(Blending::Additive)
                    .with_colormap(Colormap::Magenta)
                    .with_scale(scale),
            ),
        ])
    }

    /// Raw neuron acquisition, fetched from the Zenodo deposit on first use
    /// and cached under the sample directory afterwards.
    pub fn neuron_raw(&self) -> Result<Vec<Layer>, SampleError> {
        let asset = RemoteAsset::new(
            NEURON_RAW_URL,
            NEURON_RAW_FILE,
            KnownHash::md5(NEURON_RAW_MD5),
        );
        let path = asset.retrieve(&self.dir)?;
        layers_from_path(path, LayerKind::Image)
    }

    /// Neuron segmentation labels.
    pub fn neuron_labels(&self) -> Result<Vec<Layer>, SampleError> {
        layers_from_path(self.dir.join(NEURON_LABELS_FILE), LayerKind::Labels)
    }

    /// Post-processed neuron segmentation labels.
    pub fn neuron_labels_processed(&self) -> Result<Vec<Layer>, SampleError> {
        layers_from_path(
            self.dir.join(NEURON_LABELS_PROCESSED_FILE),
            LayerKind::Labels,
        )
    }
}

// =============================================================================
// Plugin Entry Points
// =============================================================================

/// The project logo as a single RGB layer.
pub fn ndev_logo() -> Result<Vec<Layer>, SampleError> {
    SampleProvider::from_env().ndev_logo()
}

/// Fixed 4-channel neuron image.
pub fn neuron_2d_4ch() -> Result<Vec<Layer>, SampleError> {
    SampleProvider::from_env().neuron_2d_4ch()
}

/// Time-lapse scratch assay with label channels.
pub fn scratch_assay() -> Result<Vec<Layer>, SampleError> {
    SampleProvider::from_env().scratch_assay()
}

/// Fixed 3-channel neocortex image.
pub fn neocortex() -> Result<Vec<Layer>, SampleError> {
    SampleProvider::from_env().neocortex()
}

/// Raw neuron acquisition (remote, hash-verified).
pub fn neuron_raw() -> Result<Vec<Layer>, SampleError> {
    SampleProvider::from_env().neuron_raw()
}

/// Neuron segmentation labels.
pub fn neuron_labels() -> Result<Vec<Layer>, SampleError> {
    SampleProvider::from_env().neuron_labels()
}

/// Post-processed neuron segmentation labels.
pub fn neuron_labels_processed() -> Result<Vec<Layer>, SampleError> {
    SampleProvider::from_env().neuron_labels_processed()
}

// =============================================================================
// Registry
// =============================================================================

/// One entry in the sample registry.
#[derive(Debug, Clone, Copy)]
pub struct SampleSpec {
    /// Stable key hosts select samples by
    pub key: &'static str,

    /// Human-readable name for menus
    pub display_name: &'static str,

    /// The loader entry point
    pub loader: fn() -> Result<Vec<Layer>, SampleError>,
}

/// Every sample this crate provides, in menu order.
pub const SAMPLES: &[SampleSpec] = &[
    SampleSpec {
        key: "ndev_logo",
        display_name: "nDev logo",
        loader: ndev_logo,
    },
    SampleSpec {
        key: "neuron_2d_4ch",
        display_name: "Neuron (2D, 4 channels)",
        loader: neuron_2d_4ch,
    },
    SampleSpec {
        key: "scratch_assay",
        display_name: "Scratch assay (labeled, 10 timepoints)",
        loader: scratch_assay,
    },
    SampleSpec {
        key: "neocortex",
        display_name: "Neocortex (3 channels)",
        loader: neocortex,
    },
    SampleSpec {
        key: "neuron_raw",
        display_name: "Neuron (raw acquisition, remote)",
        loader: neuron_raw,
    },
    SampleSpec {
        key: "neuron_labels",
        display_name: "Neuron labels",
        loader: neuron_labels,
    },
    SampleSpec {
        key: "neuron_labels_processed",
        display_name: "Neuron labels (processed)",
        loader: neuron_labels_processed,
    },
];

/// All registered samples.
pub fn all() -> &'static [SampleSpec] {
    SAMPLES
}

/// Look up a sample by key.
pub fn find(key: &str) -> Option<&'static SampleSpec> {
    let spec = SAMPLES.iter().find(|spec| spec.key == key);
    if spec.is_none() {
        debug!(key, "unknown sample key");
    }
    spec
}

// =============================================================================
// Tests
// =============================================================================
