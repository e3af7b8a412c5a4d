//! Generic path-to-layers conversion.
//!
//! [`layers_from_path`] is the catch-all reader the label samples go
//! through: open a TIFF, split it into one layer per channel, and apply a
//! uniform layer kind. Per-sample colormaps and blending are deliberately
//! not chosen here — samples that want hand-authored metadata build their
//! layers directly from [`BioImage`](crate::bioimage::BioImage).

use std::path::Path;

use tracing::debug;

use crate::bioimage::BioImage;
use crate::error::SampleError;
use crate::layer::{Layer, LayerKind, LayerMetadata};

/// Convert the TIFF at `path` into one layer per channel.
///
/// Layer names come from the OME channel names when present, otherwise from
/// the file stem (suffixed with the channel index for multi-channel files).
/// Each layer carries the file's physical pixel scale and the given `kind`.
/// Time-series channels come back as `(T, Y, X)` stacks, single-timepoint
/// channels as `(Y, X)` planes.
pub fn layers_from_path(path: impl AsRef<Path>, kind: LayerKind) -> Result<Vec<Layer>, SampleError> {
    let path = path.as_ref();
    let img = BioImage::open_tiff(path)?;
    let scale = img.physical_pixel_sizes();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sample".to_string());

    let mut layers = Vec::with_capacity(img.size_c());
    for c in 0..img.size_c() {
        let data = if img.size_t() > 1 {
            img.timeseries(c)?
        } else {
            img.plane(c)?
        };

        let name = match img.channel_name(c) {
            Some(name) => name.to_string(),
            None if img.size_c() > 1 => format!("{stem} [{c}]"),
            None => stem.clone(),
        };

        let metadata = LayerMetadata::new(name).with_scale(scale);
        layers.push(Layer::new(data, metadata).with_kind(kind));
    }

    debug!(path = %path.display(), layers = layers.len(), kind = kind.as_str(), "read layers");
    Ok(layers)
}
