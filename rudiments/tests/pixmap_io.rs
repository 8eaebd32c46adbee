use rudiments::core_modules::utils::image_helper::image_helper;
use rudiments::{ColorblindMode, Image, Matrix, Pixel, Pixmap, RudimentsError};

fn write_fixture(path: &std::path::Path) {
    // 3x2 RGBA: red, green, blue / white, black, half-transparent red
    let rgba: [u8; 24] = [
        255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, //
        255, 255, 255, 255, 0, 0, 0, 255, 255, 0, 0, 128,
    ];
    image_helper::save(path, 3, 2, &rgba).expect("write fixture");
}

#[test]
fn reading_normalizes_to_argb() {
    let dir = tempfile::tempdir().expect("Create temp dir");
    let path = dir.path().join("fixture.png");
    write_fixture(&path);

    let pixmap = Pixmap::open(&path).unwrap();
    assert_eq!((pixmap.height(), pixmap.width()), (2, 3));
    assert_eq!(pixmap.filename(), Some(path.as_path()));
    assert_eq!(pixmap.pixel(0, 0).unwrap().argb(), 0xff_ff_00_00);
    assert_eq!(pixmap.pixel(1, 2).unwrap().argb(), 0x80_ff_00_00);
    assert_eq!(pixmap.pixel(1, 2).unwrap().alpha(), 0x80);
}

#[test]
fn color_counts_sum_to_pixel_count() {
    let dir = tempfile::tempdir().expect("Create temp dir");
    let path = dir.path().join("fixture.png");
    write_fixture(&path);

    let pixmap = Pixmap::open(&path).unwrap();
    let total: usize = pixmap
        .colors()
        .iter()
        .map(|&color| pixmap.color_count(color))
        .sum();
    assert_eq!(total, pixmap.height() * pixmap.width());
    assert_eq!(pixmap.count_colors().distinct, 6);
}

#[test]
fn unfiltered_write_read_is_lossless() {
    let dir = tempfile::tempdir().expect("Create temp dir");
    let source = dir.path().join("fixture.png");
    let copy = dir.path().join("copy.png");
    write_fixture(&source);

    let original = Pixmap::open(&source).unwrap();
    original.write_png(&copy).unwrap();
    let reread = Pixmap::open(&copy).unwrap();
    assert_eq!(original.to_argb().unwrap(), reread.to_argb().unwrap());
}

#[test]
fn recolored_image_round_trips_through_png() {
    let dir = tempfile::tempdir().expect("Create temp dir");
    let source = dir.path().join("fixture.png");
    let output = dir.path().join("tritan.png");
    write_fixture(&source);

    let mut image = Image::open(&source).unwrap();
    image.recolor(ColorblindMode::from_code("t")).unwrap();
    image.write_png(&output).unwrap();

    let reread = Pixmap::open(&output).unwrap();
    assert_eq!(image.pixmap().to_argb().unwrap(), reread.to_argb().unwrap());
    // black stays black under any linear filter
    assert_eq!(reread.pixel(1, 1).unwrap().argb(), 0xff_00_00_00);
}

#[test]
fn vacant_pixel_aborts_write() {
    let dir = tempfile::tempdir().expect("Create temp dir");
    let path = dir.path().join("vacant.png");

    let mut pixmap = Pixmap::new(2, 2).unwrap();
    pixmap.set_pixel(0, 0, Pixel::new(0xff_10_20_30));
    pixmap.clear_pixel(1, 1);
    let err = pixmap.write_png(&path).unwrap_err();
    assert!(matches!(err, RudimentsError::VacantPixel { row: 1, col: 1 }));
    assert!(!path.exists());
}

#[test]
fn scaled_image_is_written_at_new_size() {
    let dir = tempfile::tempdir().expect("Create temp dir");
    let source = dir.path().join("quad.png");
    let output = dir.path().join("scaled.png");
    Pixmap::from_argb(2, 2, &[0xff_00_00_01, 0xff_00_00_02, 0xff_00_00_03, 0xff_00_00_04])
        .unwrap()
        .write_png(&source)
        .unwrap();

    let mut image = Image::open(&source).unwrap();
    image.transform(&Matrix::scaling(2.0, 2.0)).unwrap();
    image.write_png(&output).unwrap();

    let scaled = Pixmap::open(&output).unwrap();
    assert_eq!((scaled.height(), scaled.width()), (4, 4));
    for (row, col, expected) in [(0, 0, 1), (1, 1, 1), (0, 3, 2), (3, 0, 3), (3, 3, 4)] {
        assert_eq!(
            scaled.pixel(row, col).unwrap().argb(),
            0xff_00_00_00 | expected,
            "({}, {})",
            row,
            col
        );
    }
}

#[test]
fn missing_file_is_an_image_error() {
    let dir = tempfile::tempdir().expect("Create temp dir");
    assert!(Image::open(dir.path().join("absent.png")).is_err());
}
