//! Remote-fetch integration tests.
//!
//! The remote sample is pinned by content digest. These tests never touch
//! the network: they exercise the cache-hit paths, where retrieval must
//! either hand back the verified file or fail hard on corruption.

use std::fs;

use ndev_sampledata::{md5_hex, sha256_hex, KnownHash, RemoteAsset, SampleError, SampleProvider};

use super::test_utils::write_ome_tiff;

#[test]
fn test_cached_asset_with_matching_sha256_is_returned() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("asset.tiff");
    write_ome_tiff(&path, 1, 1, &[]);

    let digest = sha256_hex(&fs::read(&path).unwrap());
    let asset = RemoteAsset::new(
        "http://invalid.invalid/asset.tiff",
        "asset.tiff",
        KnownHash::sha256(digest),
    );

    let resolved = asset.retrieve(dir.path()).unwrap();
    assert_eq!(resolved, path);
}

#[test]
fn test_cached_asset_with_matching_md5_is_returned() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("asset.tiff");
    write_ome_tiff(&path, 1, 1, &[]);

    // Deposit records advertise md5 pins; the md5 path must verify a real
    // file end to end just like sha256.
    let digest = md5_hex(&fs::read(&path).unwrap());
    let asset = RemoteAsset::new(
        "http://invalid.invalid/asset.tiff",
        "asset.tiff",
        KnownHash::md5(digest),
    );

    let resolved = asset.retrieve(dir.path()).unwrap();
    assert_eq!(resolved, path);
}

#[test]
fn test_corrupted_neuron_raw_cache_fails_instead_of_decoding() {
    let dir = tempfile::tempdir().unwrap();
    let provider = SampleProvider::new(dir.path());

    // A decodable TIFF sits in the cache under the remote sample's name,
    // but its content does not hash to the pinned digest. The provider must
    // refuse it rather than hand the host plausible-looking layers.
    write_ome_tiff(
        &dir.path().join(ndev_sampledata::samples::NEURON_RAW_FILE),
        4,
        1,
        &[],
    );

    let err = provider.neuron_raw().unwrap_err();
    match err {
        SampleError::HashMismatch { expected, actual, .. } => {
            assert_eq!(
                expected,
                format!("md5:{}", ndev_sampledata::samples::NEURON_RAW_MD5)
            );
            assert_ne!(actual, expected);
        }
        other => panic!("expected HashMismatch, got {other}"),
    }
}

#[test]
fn test_corrupted_cache_is_left_in_place_for_inspection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("asset.bin");
    fs::write(&path, b"truncated download").unwrap();

    let asset = RemoteAsset::new(
        "http://invalid.invalid/asset.bin",
        "asset.bin",
        KnownHash::sha256(sha256_hex(b"the real content")),
    );
    assert!(matches!(
        asset.retrieve(dir.path()),
        Err(SampleError::HashMismatch { .. })
    ));

    // Retrieval reports the corruption; it does not delete or replace the file.
    assert_eq!(fs::read(&path).unwrap(), b"truncated download");
}
