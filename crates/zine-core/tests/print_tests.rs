use zine_core::catalog::find_entry;
use zine_core::geometry::TitleAnchor;
use zine_core::print::*;
use zine_core::*;

fn composed() -> PrintSheet {
    let mut session = ZineSession::new();
    for n in 1..=6u8 {
        session.set_text(n, &format!("page {}", n));
    }
    session.set_back_title("fin");
    compose_print_sheet(session.cover(), session.pages())
}

fn row(sheet: &PrintSheet, row: usize) -> Vec<(Surface, Rotation)> {
    sheet.row(row).map(|c| (c.surface, c.rotation)).collect()
}

#[test]
fn test_imposition_rows() {
    let sheet = composed();

    assert_eq!(
        row(&sheet, 0),
        vec![
            (Surface::Page(4), Rotation::Clockwise180),
            (Surface::Page(3), Rotation::Clockwise180),
            (Surface::Page(2), Rotation::Clockwise180),
            (Surface::Page(1), Rotation::Clockwise180),
        ]
    );
    assert_eq!(
        row(&sheet, 1),
        vec![
            (Surface::Page(5), Rotation::None),
            (Surface::Page(6), Rotation::None),
            (Surface::BackCover, Rotation::None),
            (Surface::FrontCover, Rotation::None),
        ]
    );
}

#[test]
fn test_cells_carry_their_page() {
    let sheet = composed();
    for n in 1..=6u8 {
        let cell = sheet.cell(Surface::Page(n)).unwrap();
        let CellContent::Page(layout) = &cell.content else {
            panic!("page {} should be a page layout", n);
        };
        assert_eq!(layout.text[0].text, format!("page {}", n));
    }

    let CellContent::Cover(back) = &sheet.cell(Surface::BackCover).unwrap().content else {
        panic!("back cover should be a cover layout");
    };
    assert_eq!(back.title, "fin");
}

#[test]
fn test_untitled_front_cover() {
    let sheet = compose_print_sheet(&CoverData::default(), &default_pages());
    let CellContent::Cover(front) = &sheet.cell(Surface::FrontCover).unwrap().content else {
        panic!("front cover should be a cover layout");
    };
    assert_eq!(front.title, "Untitled Zine");
    assert_eq!(front.title_rotation_degrees, -90.0);
}

#[test]
fn test_page_layout_regions() {
    let mut session = ZineSession::new();
    session.set_position(1, PagePosition::Center);
    session.set_secondary_text(1, "below");
    session.set_position(2, PagePosition::BottomRight);
    session.update_page(
        2,
        PagePatch {
            song_title: Some("Custom title".to_string()),
            ..Default::default()
        },
    );
    session.set_position(3, PagePosition::NoSongBox);
    session.add_decoration(Surface::Page(3), find_entry("crown").unwrap());

    let sheet = compose_print_sheet(session.cover(), session.pages());
    let layout = |n: u8| match &sheet.cell(Surface::Page(n)).unwrap().content {
        CellContent::Page(layout) => layout.clone(),
        CellContent::Cover(_) => panic!("page {} should be a page layout", n),
    };

    let center = layout(1);
    assert_eq!(center.text.len(), 2);
    assert_eq!(center.text[1].text, "below");
    assert!(center.song_box.is_some());

    let bottom = layout(2);
    let title = bottom.song_title.unwrap();
    assert_eq!(title.text, "Custom title");
    assert!(matches!(title.area.anchor, TitleAnchor::Bottom(_)));
    assert_eq!(bottom.text[0].area.font_size, 20.0);

    let bare = layout(3);
    assert!(bare.song_box.is_none());
    assert!(bare.song_title.is_none());
    assert_eq!(bare.decorations.len(), 1);
    assert_eq!(bare.decorations[0].symbol, "👑");
}

#[test]
fn test_default_marks() {
    let sheet = composed();
    let cuts = sheet.marks.iter().filter(|m| m.kind == MarkKind::Cut).count();
    let folds = sheet.marks.iter().filter(|m| m.kind == MarkKind::Fold).count();
    assert_eq!(cuts, 1);
    assert_eq!(folds, 4);
}

#[test]
fn test_custom_options() {
    let options = PrintOptions {
        paper_size: PaperSize::Letter,
        scale: 1.0,
        offset_px: (0.0, 0.0),
        marks: PrinterMarks {
            fold_lines: false,
            cut_lines: false,
        },
        ..Default::default()
    };
    let sheet = compose_print_sheet_with(&CoverData::default(), &default_pages(), &options).unwrap();

    assert!(sheet.marks.is_empty());
    assert!((sheet.paper_mm.0 - 279.4).abs() < 0.01);

    // With no scale or offset the paper rect is the layout rect in mm
    let cell = sheet.cell(Surface::Page(5)).unwrap();
    let mm_per_px = 25.4 / 96.0;
    assert!((cell.paper_mm.left - cell.bounds.left * mm_per_px).abs() < 0.01);
    assert!((cell.paper_mm.top - cell.bounds.top * mm_per_px).abs() < 0.01);
}

#[cfg(feature = "serde")]
#[test]
fn test_sheet_serializes() {
    let json = serde_json::to_value(composed()).unwrap();
    assert_eq!(json["cells"].as_array().map(Vec::len), Some(8));
    assert_eq!(json["cells"][0]["content"]["kind"], "page");
    assert_eq!(json["cells"][7]["content"]["kind"], "cover");
}
