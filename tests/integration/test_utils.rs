//! Test utilities for integration tests.
//!
//! Helpers that synthesize a complete sample directory in a tempdir: OME-TIFF
//! files with the channel/time layouts the bundled samples document, plus the
//! logo PNG. The pixel content is a flat per-plane fill value, enough to
//! verify which plane ends up in which layer.

use std::fs::File;
use std::path::Path;

use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

use ndev_sampledata::samples;

/// In-plane width of every generated TIFF.
pub const FIXTURE_WIDTH: usize = 16;

/// In-plane height of every generated TIFF.
pub const FIXTURE_HEIGHT: usize = 12;

/// Physical pixel size written into every generated OME block.
pub const FIXTURE_SCALE: f64 = 0.1083;

/// Write a Gray16 OME-TIFF with `size_c * size_t` planes (XYCZT order).
///
/// Plane `i` is filled with `100 * (i + 1)`.
pub fn write_ome_tiff(path: &Path, size_c: usize, size_t: usize, channel_names: &[&str]) {
    let channels: String = channel_names
        .iter()
        .enumerate()
        .map(|(i, name)| format!(r#"<Channel ID="Channel:0:{i}" Name="{name}"/>"#))
        .collect();
    let ome = format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/2016-06">"#,
            r#"<Image ID="Image:0"><Pixels ID="Pixels:0" DimensionOrder="XYCZT" "#,
            r#"Type="uint16" SizeX="{w}" SizeY="{h}" SizeC="{c}" SizeZ="1" SizeT="{t}" "#,
            r#"PhysicalSizeX="{s}" PhysicalSizeY="{s}">{channels}</Pixels></Image></OME>"#
        ),
        w = FIXTURE_WIDTH,
        h = FIXTURE_HEIGHT,
        c = size_c,
        t = size_t,
        s = FIXTURE_SCALE,
        channels = channels,
    );

    let mut file = File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(&mut file).unwrap();
    for i in 0..(size_c * size_t) {
        let data = vec![100 * (i as u16 + 1); FIXTURE_WIDTH * FIXTURE_HEIGHT];
        if i == 0 {
            let mut image = encoder
                .new_image::<colortype::Gray16>(FIXTURE_WIDTH as u32, FIXTURE_HEIGHT as u32)
                .unwrap();
            image
                .encoder()
                .write_tag(Tag::ImageDescription, ome.as_str())
                .unwrap();
            image.write_data(&data).unwrap();
        } else {
            encoder
                .write_image::<colortype::Gray16>(
                    FIXTURE_WIDTH as u32,
                    FIXTURE_HEIGHT as u32,
                    &data,
                )
                .unwrap();
        }
    }
}

/// Populate `dir` with every local sample file the providers expect.
pub fn write_sample_dir(dir: &Path) {
    // Logo: RGBA PNG, exercising the alpha path.
    let logo = image::RgbaImage::from_fn(24, 18, |x, y| {
        image::Rgba([x as u8, y as u8, 128, 255])
    });
    logo.save(dir.join(samples::NDEV_LOGO_FILE)).unwrap();

    // 4-channel single-timepoint neuron crop.
    write_ome_tiff(
        &dir.join(samples::NEURON_4CH_FILE),
        4,
        1,
        &["NCOA4", "Ferritin", "Phalloidin", "DAPI"],
    );

    // Scratch assay: 4 channels over 10 timepoints.
    write_ome_tiff(
        &dir.join(samples::SCRATCH_ASSAY_FILE),
        4,
        10,
        &["H3342", "Oblique", "nuclei", "cytoplasm"],
    );

    // 3-channel neocortex crop.
    write_ome_tiff(
        &dir.join(samples::NEOCORTEX_FILE),
        3,
        1,
        &["CTIP2", "BRN2", "ROR"],
    );

    // Label volumes: 4 named channels each, single timepoint.
    let label_channels = ["NCOA4", "Ferritin", "Phalloidin", "DAPI"];
    write_ome_tiff(&dir.join(samples::NEURON_LABELS_FILE), 4, 1, &label_channels);
    write_ome_tiff(
        &dir.join(samples::NEURON_LABELS_PROCESSED_FILE),
        4,
        1,
        &label_channels,
    );
}
