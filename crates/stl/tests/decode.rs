use std::io::Write;

use float_eq::assert_float_eq;
use printquote_stl::{
    detect_format, measure, parse_stl, read_stl_file, StlError, StlFormat, MIN_FACET_TEXT_LEN,
};
use printquote_test_data::{binary_stl, cube, cuboid, SOLID_HEADER};

#[test]
fn binary_cube() {
    let data = cube(10.0).binary();
    let totals = measure(&data).unwrap();

    assert_eq!(12, totals.triangles);
    assert_float_eq!(totals.volume, 1000.0, rmax <= 1e-6);
    assert_float_eq!(totals.surface_area, 600.0, rmax <= 1e-6);
}

#[test]
fn ascii_cube() {
    let text = cube(10.0).ascii("cube");
    let totals = measure(text.as_bytes()).unwrap();

    assert_eq!(12, totals.triangles);
    assert_float_eq!(totals.volume, 1000.0, rmax <= 1e-6);
    assert_float_eq!(totals.surface_area, 600.0, rmax <= 1e-6);
}

#[test]
fn binary_with_solid_header_is_binary() {
    let model = cuboid([0.0, 0.0, 0.0], [10.0, 20.0, 30.0]);
    let data = binary_stl(SOLID_HEADER, &model.facets);
    assert!(data.starts_with(b"solid"));

    let triangles = parse_stl(&data).unwrap();
    assert_eq!(StlFormat::Binary, triangles.format());
    assert_eq!((12, Some(12)), triangles.size_hint());

    let totals = measure(&data).unwrap();
    assert_float_eq!(totals.volume, 6000.0, rmax <= 1e-6);
}

#[test]
fn both_encodings_agree() {
    let model = cuboid([-3.0, 4.5, 100.0], [2.5, 8.0, 0.75]);
    let binary = measure(&model.binary()).unwrap();
    let ascii = measure(model.ascii("part").as_bytes()).unwrap();

    assert_eq!(binary.triangles, ascii.triangles);
    assert_float_eq!(binary.volume, ascii.volume, rmax <= 1e-9);
    assert_float_eq!(binary.surface_area, ascii.surface_area, rmax <= 1e-9);
}

#[test]
fn reversed_winding_reports_same_volume() {
    let data = cube(10.0).reversed().binary();
    let totals = measure(&data).unwrap();
    assert_float_eq!(totals.volume, 1000.0, rmax <= 1e-6);
}

#[test]
fn empty_binary_is_zero() {
    let data = binary_stl(b"", &[]);
    assert_eq!(StlFormat::Binary, detect_format(&data));

    let totals = measure(&data).unwrap();
    assert_eq!(0, totals.triangles);
    assert_eq!(0.0, totals.volume);
    assert_eq!(0.0, totals.surface_area);
}

#[test]
fn empty_text_solid_is_zero() {
    let totals = measure(b"solid empty\nendsolid empty\n").unwrap();
    assert_eq!(0, totals.triangles);
    assert_eq!(0.0, totals.volume);
}

#[test]
fn truncated_binary_is_malformed() {
    // Losing the last record breaks the size equation, so the file is read as
    // text, where no vertex directives exist.
    let mut data = cube(10.0).binary();
    data.truncate(data.len() - 50);
    assert!(data.len() >= MIN_FACET_TEXT_LEN);
    assert_eq!(StlFormat::Ascii, detect_format(&data));

    assert!(matches!(measure(&data), Err(StlError::MalformedMesh(_))));
}

#[test]
fn text_without_facets_is_malformed() {
    let text = format!("solid junk\n{}\nendsolid junk\n", "facet normal 0 0 0\n".repeat(8));
    assert!(matches!(
        measure(text.as_bytes()),
        Err(StlError::MalformedMesh(_))
    ));
}

#[test]
fn read_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&cube(20.0).binary()).unwrap();

    let data = read_stl_file(file.path()).unwrap();
    let totals = measure(&data).unwrap();
    assert_float_eq!(totals.volume, 8000.0, rmax <= 1e-6);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_stl_file(dir.path().join("missing.stl")).unwrap_err();
    assert!(matches!(err, StlError::Io(_)));
}
