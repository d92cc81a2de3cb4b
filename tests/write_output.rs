mod common;

use std::fs;

use barcode_sheet::{
    Code128Renderer, Error, LabelRenderer, RenderOptions, SheetConfig, SheetGenerator,
    write_label_images, write_sheet,
};

#[test]
fn write_sheet_writes_the_pdf() {
    common::init_logging();
    let dir = common::output_dir("write_sheet");
    let path = dir.join("sheet.pdf");

    write_sheet(1, 46, &path).expect("write sheet");

    let bytes = fs::read(&path).expect("read back");
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(common::pdf_page_count(&bytes), Some(2));
}

#[test]
fn write_sheet_reports_the_unwritable_path() {
    let dir = common::output_dir("write_sheet_missing");
    let path = dir.join("no-such-dir").join("sheet.pdf");

    let err = write_sheet(1, 2, &path).unwrap_err();
    match &err {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("no-such-dir"));
    assert!(!err.is_input_error());
    assert!(!path.exists());
}

#[test]
fn write_sheet_rejects_bad_range_without_creating_a_file() {
    let dir = common::output_dir("write_sheet_bad_range");
    let path = dir.join("sheet.pdf");
    let err = write_sheet(5, 1, &path).unwrap_err();
    assert!(err.is_input_error());
    assert!(!path.exists());
}

#[test]
fn label_images_are_written_per_identifier() {
    let dir = common::output_dir("label_images").join("labels");
    let generator = SheetGenerator::new(SheetConfig::default());
    let sheet = generator.build(41, 43).unwrap();

    write_label_images(&sheet.labels, &dir).expect("write labels");

    for (n, label) in (41..=43).zip(&sheet.labels) {
        let path = dir.join(format!("UEPL-SPD-{n:08}.png"));
        let decoded = image::open(&path).expect("decode label png");
        assert_eq!(decoded.width(), label.pixel_width());
        assert_eq!(decoded.height(), label.pixel_height());
    }
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 3);
}

#[test]
fn label_images_report_the_failing_path() {
    let dir = common::output_dir("label_images_blocked");
    let blocker = dir.join("labels");
    fs::write(&blocker, b"not a directory").unwrap();

    let label = Code128Renderer
        .render("UEPL-SPD-00000001", &RenderOptions::default())
        .unwrap();
    let err = write_label_images(&[label], &blocker).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.to_string().contains("labels"));
}
