//! Decoding adapter over third-party image decoders.
//!
//! This module turns files on disk into in-memory pixel arrays. It does no
//! decoding of its own: OME-TIFF files go through the [`tiff`] decoder and
//! 2-D images (the logo PNG) through the [`image`] crate. What it adds is
//! the bio-image view of the result — channel/Z/time layout, physical pixel
//! sizes, channel names — recovered from the OME-XML block in the
//! `ImageDescription` tag.
//!
//! # Plane layout
//!
//! An OME-TIFF stores one 2-D plane per IFD. [`BioImage`] reads all planes
//! up front and resolves `(c, z, t)` coordinates to plane indices via the
//! file's [`DimensionOrder`]. Files without an OME block are treated as a
//! single-channel time stack, one timepoint per plane.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{Array2, Array3, Axis};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

use crate::error::SampleError;
use crate::layer::PixelData;

mod ome;

pub use ome::{parse_ome_xml, DimensionOrder, OmeMetadata};

// =============================================================================
// Plane Storage
// =============================================================================

/// Decoded planes, one element type for the whole file.
#[derive(Debug)]
enum Planes {
    U8(Vec<Array2<u8>>),
    U16(Vec<Array2<u16>>),
}

impl Planes {
    fn len(&self) -> usize {
        match self {
            Planes::U8(p) => p.len(),
            Planes::U16(p) => p.len(),
        }
    }
}

// =============================================================================
// BioImage
// =============================================================================

/// A decoded multi-dimensional bio-image.
///
/// Planes are held in memory; the slicing accessors hand out independent
/// copies, so a `BioImage` can be sliced repeatedly without aliasing.
#[derive(Debug)]
pub struct BioImage {
    planes: Planes,
    plane_height: usize,
    plane_width: usize,
    metadata: OmeMetadata,
}

impl BioImage {
    /// Open an OME-TIFF (or plain multi-page TIFF) from disk.
    ///
    /// Reads every IFD plane. When the first IFD carries an OME-XML
    /// `ImageDescription`, the channel/Z/time layout, physical pixel sizes,
    /// and channel names come from it; otherwise the file is exposed as one
    /// channel with one timepoint per plane. Decoder failures propagate
    /// unchanged.
    pub fn open_tiff(path: impl AsRef<Path>) -> Result<Self, SampleError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut decoder = Decoder::new(BufReader::new(file))?;

        // Non-OME descriptions (e.g. ImageJ banners) are ignored, not errors.
        let description = decoder
            .get_tag_ascii_string(Tag::ImageDescription)
            .ok()
            .filter(|text| text.contains("<OME") || text.contains("<Pixels"));

        let mut u8_planes: Vec<Array2<u8>> = Vec::new();
        let mut u16_planes: Vec<Array2<u16>> = Vec::new();
        let mut plane_width = 0usize;
        let mut plane_height = 0usize;

        loop {
            let (width, height) = decoder.dimensions()?;
            let (width, height) = (width as usize, height as usize);

            if u8_planes.is_empty() && u16_planes.is_empty() {
                plane_width = width;
                plane_height = height;
            } else if (width, height) != (plane_width, plane_height) {
                return Err(SampleError::Ome(format!(
                    "plane dimensions differ: {plane_width}x{plane_height} vs {width}x{height}"
                )));
            }

            let colortype = decoder.colortype()?;
            match decoder.read_image()? {
                DecodingResult::U8(buf) => {
                    u8_planes.push(Array2::from_shape_vec((height, width), buf)?);
                }
                DecodingResult::U16(buf) => {
                    u16_planes.push(Array2::from_shape_vec((height, width), buf)?);
                }
                _ => {
                    return Err(SampleError::UnsupportedPixelFormat(format!(
                        "{colortype:?} (only 8- and 16-bit grayscale planes are supported)"
                    )));
                }
            }

            if !decoder.more_images() {
                break;
            }
            decoder.next_image()?;
        }

        let planes = match (u8_planes.is_empty(), u16_planes.is_empty()) {
            (false, true) => Planes::U8(u8_planes),
            (true, false) => Planes::U16(u16_planes),
            (false, false) => {
                return Err(SampleError::UnsupportedPixelFormat(
                    "mixed element types across planes".into(),
                ));
            }
            (true, true) => {
                return Err(SampleError::UnsupportedPixelFormat(
                    "file contains no image planes".into(),
                ));
            }
        };

        let metadata = match description {
            Some(xml) => {
                let metadata = parse_ome_xml(&xml)?;
                if metadata.plane_count() != planes.len() {
                    return Err(SampleError::Ome(format!(
                        "OME metadata declares {} plane(s), file has {}",
                        metadata.plane_count(),
                        planes.len()
                    )));
                }
                metadata
            }
            None => OmeMetadata {
                size_c: 1,
                size_z: 1,
                size_t: planes.len(),
                dimension_order: DimensionOrder::default(),
                physical_size_x: None,
                physical_size_y: None,
                channel_names: Vec::new(),
            },
        };

        debug!(
            path = %path.display(),
            planes = planes.len(),
            size_c = metadata.size_c,
            size_z = metadata.size_z,
            size_t = metadata.size_t,
            "opened TIFF"
        );

        Ok(Self {
            planes,
            plane_height,
            plane_width,
            metadata,
        })
    }

    /// Number of channels.
    pub fn size_c(&self) -> usize {
        self.metadata.size_c
    }

    /// Number of Z slices.
    pub fn size_z(&self) -> usize {
        self.metadata.size_z
    }

    /// Number of timepoints.
    pub fn size_t(&self) -> usize {
        self.metadata.size_t
    }

    /// In-plane shape as `(height, width)`.
    pub fn plane_shape(&self) -> (usize, usize) {
        (self.plane_height, self.plane_width)
    }

    /// Physical pixel size as a `(y, x)` pair.
    ///
    /// Falls back to `1.0` along axes the file does not calibrate, so the
    /// pair is always positive.
    pub fn physical_pixel_sizes(&self) -> (f64, f64) {
        (
            self.metadata.physical_size_y.unwrap_or(1.0),
            self.metadata.physical_size_x.unwrap_or(1.0),
        )
    }

    /// Name of channel `c`, when the file declares one.
    pub fn channel_name(&self, c: usize) -> Option<&str> {
        self.metadata.channel_names.get(c)?.as_deref()
    }

    /// The raw OME metadata.
    pub fn metadata(&self) -> &OmeMetadata {
        &self.metadata
    }

    /// The `(Y, X)` plane for channel `c` at `z = 0, t = 0`.
    pub fn plane(&self, c: usize) -> Result<PixelData, SampleError> {
        let index = self.plane_index(c, 0, 0)?;
        Ok(match &self.planes {
            Planes::U8(p) => PixelData::U8(p[index].clone().into_dyn()),
            Planes::U16(p) => PixelData::U16(p[index].clone().into_dyn()),
        })
    }

    /// The `(T, Y, X)` stack for channel `c` at `z = 0`.
    pub fn timeseries(&self, c: usize) -> Result<PixelData, SampleError> {
        let mut indices = Vec::with_capacity(self.metadata.size_t);
        for t in 0..self.metadata.size_t {
            indices.push(self.plane_index(c, 0, t)?);
        }

        Ok(match &self.planes {
            Planes::U8(p) => {
                let views: Vec<_> = indices.iter().map(|&i| p[i].view()).collect();
                PixelData::U8(stack_planes(&views)?.into_dyn())
            }
            Planes::U16(p) => {
                let views: Vec<_> = indices.iter().map(|&i| p[i].view()).collect();
                PixelData::U16(stack_planes(&views)?.into_dyn())
            }
        })
    }

    fn plane_index(&self, c: usize, z: usize, t: usize) -> Result<usize, SampleError> {
        let m = &self.metadata;
        if c >= m.size_c {
            return Err(SampleError::MissingChannel {
                channel: c,
                available: m.size_c,
            });
        }

        let index = m
            .dimension_order
            .plane_index(c, z, t, m.size_c, m.size_z, m.size_t);
        if index >= self.planes.len() {
            return Err(SampleError::MissingPlane {
                plane: index,
                available: self.planes.len(),
            });
        }
        Ok(index)
    }
}

fn stack_planes<T: Clone>(
    views: &[ndarray::ArrayView2<'_, T>],
) -> Result<Array3<T>, SampleError> {
    Ok(ndarray::stack(Axis(0), views)?)
}

// =============================================================================
// 2-D Images
// =============================================================================

/// Decode a plain 2-D image (PNG and friends) into a pixel array.
///
/// Color images come back as `(Y, X, 3)` or `(Y, X, 4)` depending on
/// whether the file has an alpha channel; grayscale as `(Y, X)`.
pub fn read_image(path: impl AsRef<Path>) -> Result<PixelData, SampleError> {
    let path = path.as_ref();
    let img = image::open(path)?;
    let (width, height) = (img.width() as usize, img.height() as usize);

    let data = match img {
        image::DynamicImage::ImageLuma8(gray) => {
            PixelData::U8(Array2::from_shape_vec((height, width), gray.into_raw())?.into_dyn())
        }
        img if img.color().has_alpha() => {
            let rgba = img.to_rgba8();
            PixelData::U8(Array3::from_shape_vec((height, width, 4), rgba.into_raw())?.into_dyn())
        }
        img => {
            let rgb = img.to_rgb8();
            PixelData::U8(Array3::from_shape_vec((height, width, 3), rgb.into_raw())?.into_dyn())
        }
    };

    debug!(path = %path.display(), shape = ?data.shape(), "opened 2-D image");
    Ok(data)
}

// =============================================================================
// Tests
// =============================================================================
