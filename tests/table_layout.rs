//! Table engine geometry: column resolution, row heights for wrapped cells,
//! page breaks with header repetition, striping, borders, and truncation.

mod common;

use common::{assert_close, recording_backend, Call, Recorder, CHAR_W};
use flowpdf::{
    BorderStyle, Color, ColumnDef, Document, DocumentConfig, HAlign, Overflow, Table,
};

fn doc_with_recorder(config: DocumentConfig) -> (Document, Recorder) {
    let (backend, recorder) = recording_backend();
    (Document::with_backend(backend, config), recorder)
}

fn state_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef {
            header: "No".into(),
            width: 15.0,
            ..ColumnDef::default()
        },
        ColumnDef {
            header: "State".into(),
            ..ColumnDef::default()
        },
        ColumnDef {
            header: "Distance".into(),
            width: 40.0,
            align: HAlign::Right,
            ..ColumnDef::default()
        },
    ]
}

#[test]
fn auto_columns_share_the_remaining_width() {
    // 187.3 mm usable; fixed 15 + 40 leave 132.3 for the single auto column.
    let (mut doc, recorder) = doc_with_recorder(DocumentConfig {
        margin_left: 11.35,
        margin_right: 11.35,
        ..DocumentConfig::default()
    });

    doc.add(&Table {
        columns: state_columns(),
        rows: vec![vec!["1".into(), "California".into(), "1,240 mi".into()]],
        ..Table::default()
    });

    // Border style "all" outlines one rect per cell, so the rect widths are
    // the resolved column widths.
    let rects = recorder.outline_rects();
    assert_eq!(rects.len(), 3);
    assert_close(rects[0].3, 15.0);
    assert_close(rects[1].3, 132.3);
    assert_close(rects[2].3, 40.0);
    assert_close(rects.iter().map(|r| r.3).sum::<f64>(), 210.0 - 22.7);

    // Columns tile the row with no gaps.
    assert_close(rects[1].1, 11.35 + 15.0);
    assert_close(rects[2].1, 11.35 + 15.0 + 132.3);
}

#[test]
fn multi_page_table_repeats_header_and_never_splits_rows() {
    let (mut doc, recorder) = doc_with_recorder(DocumentConfig::default());

    let rows: Vec<Vec<String>> = (1..=35)
        .map(|i| vec![i.to_string(), format!("State {i}"), format!("{i}0 mi")])
        .collect();
    doc.add(&Table {
        columns: state_columns(),
        rows,
        show_header: true,
        row_striping: true,
        border_style: BorderStyle::Columns,
        min_row_height: 9.17,
        ..Table::default()
    });

    assert_eq!(recorder.pages(), 2);

    // The header row reappears at the top of the continuation page.
    for page in [1, 2] {
        let texts = recorder.cell_texts_on_page(page);
        assert!(texts.contains(&"No".to_string()), "header on page {page}");
        assert!(texts.contains(&"State".to_string()));
        assert!(texts.contains(&"Distance".to_string()));
    }

    // 35 data rows + 2 header rows, each with a full-width background fill.
    let fills = recorder.fill_rects();
    assert_eq!(fills.len(), 37);

    // No fill may cross the bottom margin: rows are never split.
    let limit = 297.0 - 15.0;
    for (_, _, y, _, h, _) in &fills {
        assert!(y + h <= limit + 1e-6, "row at y={y} h={h} crosses the margin");
    }

    // Striping runs off the absolute row index: rows 1, 3, 5... (0-based
    // even) use the even tone, including on the continuation page.
    let even = Color::new(241, 245, 249);
    let even_fills = fills.iter().filter(|f| f.5 == even).count();
    assert_eq!(even_fills, 18);

    // "columns" style draws one horizontal rule under each header render.
    let rules = recorder
        .lines()
        .into_iter()
        .filter(|(_, _, y1, _, y2)| y1 == y2)
        .count();
    assert_eq!(rules, 2);

    // And two vertical separators inside every row and header.
    let separators = recorder
        .lines()
        .into_iter()
        .filter(|(_, x1, _, x2, _)| x1 == x2)
        .count();
    assert_eq!(separators, 37 * 2);
}

#[test]
fn table_without_header_never_reprints_one() {
    let (mut doc, recorder) = doc_with_recorder(DocumentConfig::default());

    let rows: Vec<Vec<String>> = (1..=40).map(|i| vec![i.to_string()]).collect();
    doc.add(&Table {
        columns: vec![ColumnDef {
            header: "No".into(),
            ..ColumnDef::default()
        }],
        rows,
        ..Table::default()
    });

    assert_eq!(recorder.pages(), 2);
    assert!(!recorder.cell_texts().contains(&"No".to_string()));
}

#[test]
fn truncate_column_clips_with_ellipsis() {
    let (mut doc, recorder) = doc_with_recorder(DocumentConfig::default());

    doc.add(&Table {
        columns: vec![
            ColumnDef {
                header: "VIN".into(),
                width: 30.0,
                overflow: Overflow::Truncate,
                ..ColumnDef::default()
            },
            ColumnDef {
                header: "Vehicle".into(),
                ..ColumnDef::default()
            },
        ],
        rows: vec![vec!["1HGCM82633A123456".into(), "Truck 7981".into()]],
        ..Table::default()
    });

    // Content width is 30 − 2·2.8 = 24.4 mm: eleven characters plus the
    // ellipsis fit, the full 17-character VIN does not.
    let content_w = 30.0 - 2.0 * 2.8;
    let vin_cell = recorder
        .cell_texts()
        .into_iter()
        .find(|t| t.starts_with("1HGCM"))
        .expect("vin cell rendered");
    assert_eq!(vin_cell, "1HGCM82633A…");
    assert!(vin_cell.ends_with('…'));
    assert!(vin_cell.chars().count() as f64 * CHAR_W <= content_w);
}

#[test]
fn wrapped_cells_grow_the_row_and_stay_inside_the_column() {
    let (mut doc, recorder) = doc_with_recorder(DocumentConfig::default());

    doc.add(&Table {
        columns: vec![
            ColumnDef {
                header: "Note".into(),
                width: 30.0,
                ..ColumnDef::default()
            },
            ColumnDef {
                header: "Rest".into(),
                ..ColumnDef::default()
            },
        ],
        rows: vec![vec!["alpha beta gamma delta".into(), "x".into()]],
        ..Table::default()
    });

    let content_w = 30.0 - 2.0 * 2.8;
    let (_, w, lines) = recorder
        .multi_cells()
        .into_iter()
        .find(|(_, _, lines)| lines.iter().any(|l| l.starts_with("alpha")))
        .expect("wrapped cell rendered");
    assert_close(w, content_w);
    assert_eq!(lines, vec!["alpha beta".to_string(), "gamma delta".to_string()]);
    for line in &lines {
        assert!(line.chars().count() as f64 * CHAR_W <= content_w);
    }

    // Two 4.8 mm lines plus vertical padding beat the 9 mm minimum.
    let row_fill_h = recorder.fill_rects()[0].4;
    assert_close(row_fill_h, 2.0 * (9.0 - 2.0 * 2.1) + 2.0 * 2.1);
}

#[test]
fn single_line_rows_use_the_minimum_row_height() {
    let (mut doc, recorder) = doc_with_recorder(DocumentConfig::default());
    doc.add(&Table {
        columns: vec![ColumnDef::default()],
        rows: vec![vec!["short".into()]],
        ..Table::default()
    });
    assert_close(recorder.fill_rects()[0].4, 9.0);
}

#[test]
fn outer_border_outlines_rows_not_cells() {
    let (mut doc, recorder) = doc_with_recorder(DocumentConfig::default());
    doc.add(&Table {
        columns: state_columns(),
        rows: vec![
            vec!["1".into(), "California".into(), "1,240 mi".into()],
            vec!["2".into(), "Oregon".into(), "870 mi".into()],
        ],
        border_style: BorderStyle::Outer,
        ..Table::default()
    });

    let rects = recorder.outline_rects();
    assert_eq!(rects.len(), 2);
    for (_, _, _, w, _) in &rects {
        assert_close(*w, 210.0 - 22.6);
    }
}

#[test]
fn borderless_tables_only_fill() {
    let (mut doc, recorder) = doc_with_recorder(DocumentConfig::default());
    doc.add(&Table {
        columns: state_columns(),
        rows: vec![vec!["1".into(), "California".into(), "1,240 mi".into()]],
        border_style: BorderStyle::None,
        ..Table::default()
    });

    assert!(recorder.outline_rects().is_empty());
    assert!(recorder.lines().is_empty());
    assert_eq!(recorder.fill_rects().len(), 1);
}

#[test]
fn short_rows_pad_and_long_rows_ignore_extras() {
    let (mut doc, recorder) = doc_with_recorder(DocumentConfig::default());

    let truncate_cols: Vec<ColumnDef> = (0..3)
        .map(|i| ColumnDef {
            header: format!("C{i}"),
            overflow: Overflow::Truncate,
            ..ColumnDef::default()
        })
        .collect();
    doc.add(&Table {
        columns: truncate_cols,
        rows: vec![
            vec!["only".into()],
            vec![
                "a".into(),
                "b".into(),
                "c".into(),
                "extra".into(),
                "more".into(),
            ],
        ],
        ..Table::default()
    });

    let texts = recorder.cell_texts();
    assert_eq!(texts, vec!["only", "", "", "a", "b", "c"]);
}

#[test]
fn empty_column_list_renders_nothing() {
    let (mut doc, recorder) = doc_with_recorder(DocumentConfig::default());
    doc.add(&Table {
        rows: vec![vec!["orphan".into()]],
        ..Table::default()
    });

    assert!(recorder.fill_rects().is_empty());
    assert!(recorder.cell_texts().is_empty());
    assert_close(recorder.y(), 11.3);
}

#[test]
fn header_alignment_falls_back_to_column_alignment() {
    let (mut doc, recorder) = doc_with_recorder(DocumentConfig::default());
    doc.add(&Table {
        columns: vec![
            ColumnDef {
                header: "Right".into(),
                align: HAlign::Right,
                ..ColumnDef::default()
            },
            ColumnDef {
                header: "Centered".into(),
                align: HAlign::Right,
                header_align: Some(HAlign::Center),
                ..ColumnDef::default()
            },
        ],
        rows: vec![],
        show_header: true,
        ..Table::default()
    });

    let aligns: Vec<(String, HAlign)> = recorder
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Cell { text, align, .. } => Some((text, align)),
            _ => None,
        })
        .collect();
    assert_eq!(aligns[0], ("Right".to_string(), HAlign::Right));
    assert_eq!(aligns[1], ("Centered".to_string(), HAlign::Center));
}
