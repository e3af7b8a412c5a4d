//! Layer tuples and display metadata.
//!
//! A sample is delivered to the host viewer as an ordered sequence of
//! [`Layer`] values: raw pixel data, a display metadata mapping, and an
//! optional layer kind. The metadata keys form a fixed vocabulary understood
//! by the host (name, colormap, blending, scale, opacity, contrast limits,
//! rgb flag); which keys are set varies per sample.
//!
//! Ownership of every layer moves to the caller. Nothing here is shared or
//! cached between calls, so two invocations of the same sample produce
//! structurally identical metadata over independent pixel buffers.

use ndarray::ArrayD;
use serde::Serialize;

// =============================================================================
// Vocabularies
// =============================================================================

/// Kind of layer a sample hands to the host.
///
/// The host dispatches on this string to decide which layer type to
/// construct. Absence means "let the host guess from the data".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Continuous intensity data
    Image,
    /// Integer-labeled segmentation data
    Labels,
}

impl LayerKind {
    /// Stable string form, as the host expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Image => "image",
            LayerKind::Labels => "labels",
        }
    }
}

/// Blending mode applied when the host composites the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Blending {
    Opaque,
    Translucent,
    TranslucentNoDepth,
    Additive,
    Minimum,
}

impl Blending {
    /// Stable string form, as the host expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Blending::Opaque => "opaque",
            Blending::Translucent => "translucent",
            Blending::TranslucentNoDepth => "translucent_no_depth",
            Blending::Additive => "additive",
            Blending::Minimum => "minimum",
        }
    }
}

/// Colormap assigned to a single-channel layer.
///
/// Restricted to the names the bundled samples actually use; all of them are
/// built into the host viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    Gray,
    Cyan,
    Magenta,
    Yellow,
    Red,
    Green,
    Blue,
}

impl Colormap {
    /// Stable string form, as the host expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Colormap::Gray => "gray",
            Colormap::Cyan => "cyan",
            Colormap::Magenta => "magenta",
            Colormap::Yellow => "yellow",
            Colormap::Red => "red",
            Colormap::Green => "green",
            Colormap::Blue => "blue",
        }
    }
}

// =============================================================================
// Display Metadata
// =============================================================================

/// Display metadata for one layer.
///
/// Hand-authored per sample; only `name` is always present. Scale is a
/// `(y, x)` pair of physical pixel sizes and is positive whenever set.
///
/// # Example
///
/// ```
/// use ndev_sampledata::layer::{Blending, Colormap, LayerMetadata};
///
/// let metadata = LayerMetadata::new("DAPI")
///     .with_blending(Blending::Additive)
///     .with_colormap(Colormap::Blue)
///     .with_scale((0.25, 0.25));
///
/// assert_eq!(metadata.name, "DAPI");
/// assert_eq!(metadata.scale, Some((0.25, 0.25)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerMetadata {
    /// Layer name shown in the host's layer list
    pub name: String,

    /// Colormap for single-channel display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colormap: Option<Colormap>,

    /// Compositing mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blending: Option<Blending>,

    /// Physical pixel size as a `(y, x)` pair
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<(f64, f64)>,

    /// Layer opacity in `[0, 1]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    /// Intensity window as a `(low, high)` pair
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast_limits: Option<(f64, f64)>,

    /// Whether the trailing axis is an RGB color axis
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub rgb: bool,
}

impl LayerMetadata {
    /// Create metadata with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colormap: None,
            blending: None,
            scale: None,
            opacity: None,
            contrast_limits: None,
            rgb: false,
        }
    }

    /// Set the colormap.
    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = Some(colormap);
        self
    }

    /// Set the blending mode.
    pub fn with_blending(mut self, blending: Blending) -> Self {
        self.blending = Some(blending);
        self
    }

    /// Set the physical pixel size as a `(y, x)` pair.
    pub fn with_scale(mut self, scale: (f64, f64)) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set the layer opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the contrast limits as a `(low, high)` pair.
    pub fn with_contrast_limits(mut self, limits: (f64, f64)) -> Self {
        self.contrast_limits = Some(limits);
        self
    }

    /// Mark the trailing axis as RGB.
    pub fn with_rgb(mut self) -> Self {
        self.rgb = true;
        self
    }
}

// =============================================================================
// Pixel Data
// =============================================================================

/// Owned n-dimensional pixel array.
///
/// Bio-image samples in this crate are 8-bit (RGB logo) or 16-bit
/// (microscopy) data; the variants mirror that. Shapes follow the host's
/// axis convention: `(Y, X)`, `(T, Y, X)`, or `(Y, X, 3)` for RGB.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
}

impl PixelData {
    /// Array shape.
    pub fn shape(&self) -> &[usize] {
        match self {
            PixelData::U8(a) => a.shape(),
            PixelData::U16(a) => a.shape(),
        }
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        match self {
            PixelData::U8(a) => a.ndim(),
            PixelData::U16(a) => a.ndim(),
        }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        match self {
            PixelData::U8(a) => a.len(),
            PixelData::U16(a) => a.len(),
        }
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type name (`u8` or `u16`).
    pub fn dtype(&self) -> &'static str {
        match self {
            PixelData::U8(_) => "u8",
            PixelData::U16(_) => "u16",
        }
    }
}

impl From<ArrayD<u8>> for PixelData {
    fn from(array: ArrayD<u8>) -> Self {
        PixelData::U8(array)
    }
}

impl From<ArrayD<u16>> for PixelData {
    fn from(array: ArrayD<u16>) -> Self {
        PixelData::U16(array)
    }
}

// =============================================================================
// Layer
// =============================================================================

/// One (data, metadata, kind) tuple handed to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Raw pixel data
    pub data: PixelData,

    /// Display metadata mapping
    pub metadata: LayerMetadata,

    /// Layer kind, when the sample pins one
    pub kind: Option<LayerKind>,
}

impl Layer {
    /// Create a layer with no explicit kind.
    pub fn new(data: impl Into<PixelData>, metadata: LayerMetadata) -> Self {
        Self {
            data: data.into(),
            metadata,
            kind: None,
        }
    }

    /// Pin the layer kind.
    pub fn with_kind(mut self, kind: LayerKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
