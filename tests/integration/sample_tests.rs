//! Sample provider integration tests.
//!
//! Exercises every local sample end to end against a synthesized sample
//! directory and checks the layer contract the host viewer relies on.

use ndev_sampledata::layer::{Layer, LayerKind};
use ndev_sampledata::SampleProvider;

use super::test_utils::{write_sample_dir, FIXTURE_HEIGHT, FIXTURE_SCALE, FIXTURE_WIDTH};

fn provider() -> (tempfile::TempDir, SampleProvider) {
    let dir = tempfile::tempdir().unwrap();
    write_sample_dir(dir.path());
    let provider = SampleProvider::new(dir.path());
    (dir, provider)
}

/// The layer contract every sample has to honor.
fn assert_layer_contract(layers: &[Layer]) {
    assert!(!layers.is_empty());
    for layer in layers {
        assert!(!layer.metadata.name.is_empty());
        assert!(!layer.data.is_empty());

        if let Some((y, x)) = layer.metadata.scale {
            assert!(y > 0.0 && x > 0.0, "scale must be positive: ({y}, {x})");
        }
        if let Some(kind) = layer.kind {
            assert!(matches!(kind, LayerKind::Image | LayerKind::Labels));
        }
        if let Some(opacity) = layer.metadata.opacity {
            assert!((0.0..=1.0).contains(&opacity));
        }
    }
}

// =============================================================================
// Per-Sample Layer Sequences
// =============================================================================

#[test]
fn test_ndev_logo_is_a_single_rgb_layer() {
    let (_dir, provider) = provider();
    let layers = provider.ndev_logo().unwrap();

    assert_layer_contract(&layers);
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].metadata.name, "ndev logo");
    assert!(layers[0].metadata.rgb);
    assert_eq!(layers[0].data.shape(), &[18, 24, 4]);
    assert_eq!(layers[0].kind, None);
}

#[test]
fn test_neuron_2d_4ch_layer_sequence() {
    let (_dir, provider) = provider();
    let layers = provider.neuron_2d_4ch().unwrap();

    assert_layer_contract(&layers);
    let names: Vec<&str> = layers.iter().map(|l| l.metadata.name.as_str()).collect();
    assert_eq!(names, ["NCOA4", "Ferritin", "Phalloidin", "DAPI"]);

    for layer in &layers {
        assert_eq!(layer.data.shape(), &[FIXTURE_HEIGHT, FIXTURE_WIDTH]);
        assert_eq!(layer.metadata.scale, Some((FIXTURE_SCALE, FIXTURE_SCALE)));
    }
}

#[test]
fn test_scratch_assay_layer_sequence() {
    let (_dir, provider) = provider();
    let layers = provider.scratch_assay().unwrap();

    assert_layer_contract(&layers);
    assert_eq!(layers.len(), 4);

    let names: Vec<&str> = layers.iter().map(|l| l.metadata.name.as_str()).collect();
    assert_eq!(names, ["H3342", "Oblique", "nuclei", "cytoplasm"]);

    let kinds: Vec<Option<LayerKind>> = layers.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        [
            Some(LayerKind::Image),
            Some(LayerKind::Image),
            Some(LayerKind::Labels),
            Some(LayerKind::Labels),
        ]
    );

    // Time-series channels come back as (T, Y, X) stacks.
    for layer in &layers {
        assert_eq!(layer.data.shape(), &[10, FIXTURE_HEIGHT, FIXTURE_WIDTH]);
    }

    assert_eq!(layers[0].metadata.contrast_limits, Some((400.0, 3500.0)));
    assert_eq!(layers[2].metadata.opacity, Some(0.5));
    assert_eq!(layers[3].metadata.opacity, Some(0.5));
    assert_eq!(layers[2].metadata.colormap, None);
}

#[test]
fn test_neocortex_layer_sequence() {
    let (_dir, provider) = provider();
    let layers = provider.neocortex().unwrap();

    assert_layer_contract(&layers);
    let names: Vec<&str> = layers.iter().map(|l| l.metadata.name.as_str()).collect();
    assert_eq!(names, ["CTIP2", "BRN2", "ROR"]);
    assert!(layers.iter().all(|l| l.kind.is_none()));
}

#[test]
fn test_neuron_labels_layer_sequence() {
    let (_dir, provider) = provider();
    let layers = provider.neuron_labels().unwrap();

    assert_layer_contract(&layers);
    assert_eq!(layers.len(), 4);
    assert!(layers.iter().all(|l| l.kind == Some(LayerKind::Labels)));
    // Names come from the OME channel names via the generic reader.
    assert_eq!(layers[0].metadata.name, "NCOA4");
}

#[test]
fn test_neuron_labels_processed_layer_sequence() {
    let (_dir, provider) = provider();
    let layers = provider.neuron_labels_processed().unwrap();

    assert_layer_contract(&layers);
    assert_eq!(layers.len(), 4);
    assert!(layers.iter().all(|l| l.kind == Some(LayerKind::Labels)));
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_repeated_calls_return_identical_metadata() {
    let (_dir, provider) = provider();

    let first = provider.scratch_assay().unwrap();
    let second = provider.scratch_assay().unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.metadata, b.metadata);
        assert_eq!(a.kind, b.kind);
        // Pixel arrays are independent copies with identical content.
        assert_eq!(a.data, b.data);
    }
}

#[test]
fn test_channel_slices_differ_across_layers() {
    let (_dir, provider) = provider();
    let layers = provider.neuron_2d_4ch().unwrap();

    // Fixture planes carry distinct fill values, so no two channels may
    // alias the same plane.
    for (i, a) in layers.iter().enumerate() {
        for b in layers.iter().skip(i + 1) {
            assert_ne!(a.data, b.data);
        }
    }
}
