//! Integration tests for the downsampling report.

mod common;

use common::{banded, write_batch, write_image};
use rlekit::config::DownsampleConfig;
use rlekit::rlekit_scale::plan::ResampleFilter;
use rlekit::{downsample, table};
use tempfile::TempDir;

#[test]
fn test_default_style_batch() {
    let dir = TempDir::new().unwrap();
    write_batch(dir.path(), "pisang", "jpg", 9);

    let config = DownsampleConfig {
        inputs: DownsampleConfig::default_batch(dir.path(), "pisang", 9),
        ..DownsampleConfig::default()
    };
    let rows = downsample::run(&config).unwrap();

    assert_eq!(rows.len(), 9);
    for (i, row) in rows.iter().enumerate() {
        let side = 8 + 2 * i;
        assert_eq!(row.name, format!("pisang{i}.jpg"));
        assert_eq!(row.original_bytes, side * side * 3);
        assert_eq!(row.resized_bytes, (side / 2) * (side / 2) * 3);
        assert!((row.ratio - 0.25).abs() < 1e-12);
    }

    let text = table::render_table(&rows);
    assert!(text.contains("Original Size (KB)"));
    assert!(text.contains("pisang8.jpg"));
    assert_eq!(text.lines().count(), 9 + 4);
}

#[test]
fn test_odd_dimensions_are_floored() {
    let dir = TempDir::new().unwrap();
    let path = write_image(&dir, "odd.png", &banded(9, 7));

    let config = DownsampleConfig::new(vec![path], 0.5, ResampleFilter::Nearest, None);
    let rows = downsample::run(&config).unwrap();

    assert_eq!(rows[0].resized_bytes, 4 * 3 * 3);
}

#[test]
fn test_save_dir_receives_resized_images() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let inputs = write_batch(src.path(), "img", "png", 2);

    let config = DownsampleConfig::new(
        inputs,
        0.5,
        ResampleFilter::Nearest,
        Some(out.path().to_path_buf()),
    );
    downsample::run(&config).unwrap();

    let saved = image::open(out.path().join("img1_resized.png")).unwrap();
    assert_eq!((saved.width(), saved.height()), (5, 5));
    assert!(out.path().join("img0_resized.png").is_file());
}

#[test]
fn test_missing_save_dir_is_created() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let nested = out.path().join("a").join("b");
    let inputs = write_batch(src.path(), "img", "png", 1);

    let config = DownsampleConfig::new(inputs, 0.5, ResampleFilter::Nearest, Some(nested.clone()));
    downsample::run(&config).unwrap();

    assert!(nested.join("img0_resized.png").is_file());
}

#[test]
fn test_save_dir_over_a_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let input = write_image(&dir, "a.png", &banded(4, 4));
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let config = DownsampleConfig::new(
        vec![input],
        0.5,
        ResampleFilter::Nearest,
        Some(blocker.join("out")),
    );
    let err = downsample::run(&config).unwrap_err();
    assert_eq!(err.category(), "io");
}

#[test]
fn test_skip_failed_keeps_good_inputs() {
    let dir = TempDir::new().unwrap();
    let first = write_image(&dir, "first.png", &banded(4, 4));
    let missing = dir.path().join("missing.jpg");
    let last = write_image(&dir, "last.png", &banded(6, 6));

    let config = DownsampleConfig::new(
        vec![first, missing, last],
        0.5,
        ResampleFilter::Nearest,
        None,
    )
    .with_skip_failed(true);
    let rows = downsample::run(&config).unwrap();

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["first.png", "last.png"]);
}

#[test]
fn test_missing_input_aborts_batch() {
    let dir = TempDir::new().unwrap();
    let good = write_image(&dir, "good.png", &banded(4, 4));
    let missing = dir.path().join("missing.jpg");

    let config = DownsampleConfig::new(vec![good, missing], 0.5, ResampleFilter::Nearest, None);
    let err = downsample::run(&config).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_invalid_scale_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_image(&dir, "a.png", &banded(4, 4));

    let config = DownsampleConfig::new(vec![path], -1.0, ResampleFilter::Nearest, None);
    let err = downsample::run(&config).unwrap_err();
    assert_eq!(err.category(), "config");
}

#[test]
fn test_json_rendering() {
    let dir = TempDir::new().unwrap();
    let path = write_image(&dir, "a.png", &banded(8, 8));
    let config = DownsampleConfig::new(vec![path], 0.5, ResampleFilter::Bilinear, None);
    let rows = downsample::run(&config).unwrap();

    let json = table::render_json(&rows).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["original_bytes"], 192);
    assert_eq!(value[0]["resized_bytes"], 48);
}
