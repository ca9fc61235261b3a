#![cfg(feature = "npz")]

mod common;

use ndarray::array;
use ucomp_density::io::npz::read_legacy_ratio_table;

#[test]
fn double_precision_archive_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.npz");
    let ratios = array![[0.25, 0.5, 0.75], [0.125, 0.375, 0.625]];
    common::write_npz(
        &path,
        &array![1.05, 1.1],
        &array![1e7, 1e8, 1e9],
        &ratios,
    );

    let table = read_legacy_ratio_table(&path).unwrap();
    assert_eq!(table.heights(), &[1.05, 1.1]);
    assert_eq!(table.densities(), &[1e7, 1e8, 1e9]);
    assert_eq!(table.ratios(), &ratios);
    assert!(table.metadata().is_none());
}

#[test]
fn single_precision_archive_is_widened() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.npz");
    common::write_npz(
        &path,
        &array![1.05_f32, 1.1],
        &array![1e7_f32, 1e8, 1e9],
        &array![[0.25_f32, 0.5, 0.75], [0.125, 0.375, 0.625]],
    );

    let table = read_legacy_ratio_table(&path).unwrap();
    assert_eq!(table.heights(), &[f64::from(1.05_f32), f64::from(1.1_f32)]);
    assert_eq!(table.densities()[1], f64::from(1e8_f32));
    assert_eq!(table.ratios()[[1, 2]], 0.625);
}

#[test]
fn missing_array_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.npz");
    let mut npz = ndarray_npy::NpzWriter::new(std::fs::File::create(&path).unwrap());
    npz.add_array("h", &array![1.05, 1.1]).unwrap();
    npz.finish().unwrap();

    let err = read_legacy_ratio_table(&path).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn mismatched_table_shape_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.npz");
    common::write_npz(
        &path,
        &array![1.05, 1.1],
        &array![1e7, 1e8, 1e9],
        &array![[0.25, 0.5], [0.125, 0.375]],
    );
    let err = read_legacy_ratio_table(&path).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
