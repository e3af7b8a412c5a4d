//! OME-XML metadata extraction.
//!
//! OME-TIFF files carry an OME-XML document in the `ImageDescription` tag of
//! the first IFD. Only the subset this crate needs is read: the `Pixels`
//! element (sizes, dimension order, physical pixel sizes) and the `Channel`
//! names. Everything else in the document is ignored.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::SampleError;

// =============================================================================
// Dimension Order
// =============================================================================

/// Storage order of the non-spatial dimensions.
///
/// OME-TIFF stores one 2-D plane per IFD. The `DimensionOrder` attribute
/// determines which of C, Z, and T varies fastest across successive planes;
/// the leading `XY` pair is always the in-plane axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionOrder {
    Xyczt,
    Xyctz,
    Xyzct,
    Xyztc,
    Xytcz,
    Xytzc,
}

impl DimensionOrder {
    /// Parse the OME attribute value (e.g. `"XYCZT"`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "XYCZT" => Some(DimensionOrder::Xyczt),
            "XYCTZ" => Some(DimensionOrder::Xyctz),
            "XYZCT" => Some(DimensionOrder::Xyzct),
            "XYZTC" => Some(DimensionOrder::Xyztc),
            "XYTCZ" => Some(DimensionOrder::Xytcz),
            "XYTZC" => Some(DimensionOrder::Xytzc),
            _ => None,
        }
    }

    /// The OME attribute value for this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionOrder::Xyczt => "XYCZT",
            DimensionOrder::Xyctz => "XYCTZ",
            DimensionOrder::Xyzct => "XYZCT",
            DimensionOrder::Xyztc => "XYZTC",
            DimensionOrder::Xytcz => "XYTCZ",
            DimensionOrder::Xytzc => "XYTZC",
        }
    }

    /// Linear IFD index of the plane at `(c, z, t)`.
    ///
    /// The first letter after `XY` varies fastest.
    pub fn plane_index(
        &self,
        c: usize,
        z: usize,
        t: usize,
        size_c: usize,
        size_z: usize,
        size_t: usize,
    ) -> usize {
        match self {
            DimensionOrder::Xyczt => c + size_c * (z + size_z * t),
            DimensionOrder::Xyctz => c + size_c * (t + size_t * z),
            DimensionOrder::Xyzct => z + size_z * (c + size_c * t),
            DimensionOrder::Xyztc => z + size_z * (t + size_t * c),
            DimensionOrder::Xytcz => t + size_t * (c + size_c * z),
            DimensionOrder::Xytzc => t + size_t * (z + size_z * c),
        }
    }
}

impl Default for DimensionOrder {
    fn default() -> Self {
        DimensionOrder::Xyczt
    }
}

// =============================================================================
// OME Metadata
// =============================================================================

/// The subset of OME metadata this crate consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct OmeMetadata {
    /// Number of channels
    pub size_c: usize,

    /// Number of Z slices
    pub size_z: usize,

    /// Number of timepoints
    pub size_t: usize,

    /// Plane storage order
    pub dimension_order: DimensionOrder,

    /// Physical pixel size along X, in the unit declared by the file
    pub physical_size_x: Option<f64>,

    /// Physical pixel size along Y, in the unit declared by the file
    pub physical_size_y: Option<f64>,

    /// Channel names in channel order; `None` where the file declares none
    pub channel_names: Vec<Option<String>>,
}

impl OmeMetadata {
    /// Total number of planes the metadata implies.
    pub fn plane_count(&self) -> usize {
        self.size_c * self.size_z * self.size_t
    }
}

/// Parse an OME-XML document into [`OmeMetadata`].
///
/// Fails if the document has no `Pixels` element or carries values outside
/// the OME vocabulary. Attribute values are read without entity expansion;
/// OME size and order attributes never contain entities.
pub fn parse_ome_xml(xml: &str) -> Result<OmeMetadata, SampleError> {
    let mut reader = Reader::from_str(xml);

    let mut pixels_seen = false;
    let mut size_c = 1usize;
    let mut size_z = 1usize;
    let mut size_t = 1usize;
    let mut dimension_order = DimensionOrder::default();
    let mut physical_size_x = None;
    let mut physical_size_y = None;
    let mut channel_names: Vec<Option<String>> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"Pixels" => {
                    pixels_seen = true;
                    for attr in e.attributes() {
                        let attr = attr.map_err(quick_xml::Error::from)?;
                        let value = String::from_utf8_lossy(&attr.value);
                        match attr.key.local_name().as_ref() {
                            b"SizeC" => size_c = parse_size(&value, "SizeC")?,
                            b"SizeZ" => size_z = parse_size(&value, "SizeZ")?,
                            b"SizeT" => size_t = parse_size(&value, "SizeT")?,
                            b"DimensionOrder" => {
                                dimension_order =
                                    DimensionOrder::parse(&value).ok_or_else(|| {
                                        SampleError::Ome(format!(
                                            "unknown DimensionOrder: {value}"
                                        ))
                                    })?;
                            }
                            b"PhysicalSizeX" => physical_size_x = parse_physical(&value)?,
                            b"PhysicalSizeY" => physical_size_y = parse_physical(&value)?,
                            _ => {}
                        }
                    }
                }
                b"Channel" => {
                    let mut name = None;
                    for attr in e.attributes() {
                        let attr = attr.map_err(quick_xml::Error::from)?;
                        if attr.key.local_name().as_ref() == b"Name" {
                            name = Some(String::from_utf8_lossy(&attr.value).into_owned());
                        }
                    }
                    channel_names.push(name);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !pixels_seen {
        return Err(SampleError::Ome("document has no Pixels element".into()));
    }

    Ok(OmeMetadata {
        size_c,
        size_z,
        size_t,
        dimension_order,
        physical_size_x,
        physical_size_y,
        channel_names,
    })
}

fn parse_size(value: &str, attribute: &str) -> Result<usize, SampleError> {
    let size: usize = value
        .trim()
        .parse()
        .map_err(|_| SampleError::Ome(format!("invalid {attribute}: {value}")))?;
    if size == 0 {
        return Err(SampleError::Ome(format!("{attribute} must be nonzero")));
    }
    Ok(size)
}

fn parse_physical(value: &str) -> Result<Option<f64>, SampleError> {
    let size: f64 = value
        .trim()
        .parse()
        .map_err(|_| SampleError::Ome(format!("invalid physical size: {value}")))?;
    if !size.is_finite() || size <= 0.0 {
        return Err(SampleError::Ome(format!(
            "physical size must be positive: {value}"
        )));
    }
    Ok(Some(size))
}

// =============================================================================
// Tests
// =============================================================================
