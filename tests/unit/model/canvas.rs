use super::*;

fn literal(c: Rgba8) -> Color {
    Color::Rgba(c)
}

#[test]
fn fresh_canvas_simplifies_to_background_leaf() {
    let canvas = Canvas::new(400, 300, Rgba8::WHITE).unwrap();
    let leaves = canvas.simplify();
    assert_eq!(leaves.len(), 1);
    assert_eq!(
        *leaves[0],
        SimpleBlock::new(Point::new(0, 0), Point::new(400, 300), literal(Rgba8::WHITE)).unwrap()
    );
    assert_eq!(canvas.ids().collect::<Vec<_>>(), vec!["0"]);
    assert_eq!(canvas.area(), 120_000);
}

#[test]
fn zero_sized_canvas_is_rejected() {
    assert!(matches!(
        Canvas::new(0, 10, Rgba8::WHITE),
        Err(VinciError::Validation(_))
    ));
}

#[test]
fn replace_keeps_position_and_remove_keeps_order() {
    let mut canvas = Canvas::new(10, 10, Rgba8::WHITE).unwrap();
    let left = SimpleBlock::new(Point::new(0, 0), Point::new(5, 10), literal(Rgba8::WHITE)).unwrap();
    let right =
        SimpleBlock::new(Point::new(5, 0), Point::new(10, 10), literal(Rgba8::WHITE)).unwrap();
    canvas.insert("a", Block::Simple(left.clone())).unwrap();
    canvas.insert("b", Block::Simple(right)).unwrap();
    canvas.remove("0");
    assert_eq!(canvas.ids().collect::<Vec<_>>(), vec!["a", "b"]);

    let mut red_left = left;
    red_left.set_color(literal(Rgba8::new(255, 0, 0, 255)));
    canvas.insert("a", Block::Simple(red_left)).unwrap();
    assert_eq!(canvas.ids().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn insert_outside_bounds_fails() {
    let mut canvas = Canvas::new(10, 10, Rgba8::WHITE).unwrap();
    let b = SimpleBlock::new(Point::new(5, 5), Point::new(11, 10), literal(Rgba8::WHITE)).unwrap();
    assert!(matches!(
        canvas.insert("x", Block::Simple(b)),
        Err(VinciError::Validation(_))
    ));
}

#[test]
fn missing_block_is_reported_by_id() {
    let canvas = Canvas::new(10, 10, Rgba8::WHITE).unwrap();
    assert!(matches!(
        canvas.block("0.1"),
        Err(VinciError::BlockNotFound(id)) if id == "0.1"
    ));
}

#[test]
fn initial_config_with_literal_and_image_presets() {
    let json = r#"
{
  "width": 2,
  "height": 2,
  "blocks": [
    { "blockId": "0", "bottomLeft": [0, 0], "topRight": [1, 2], "color": [1, 2, 3, 255] },
    { "blockId": "1", "bottomLeft": [1, 0], "topRight": [2, 2], "pngBottomLeftPoint": [1, 0] }
  ],
  "sourcePngJSON": "frames/1.json",
  "sourcePngData": [[10, 0, 0, 255], [20, 0, 0, 255], [30, 0, 0, 255], [40, 0, 0, 255]]
}
"#;
    let cfg = InitialConfig::from_json(json).unwrap();
    let canvas = Canvas::from_initial_config(&cfg).unwrap();
    assert_eq!(canvas.len(), 2);
    assert_eq!(canvas.max_numeric_id(), Some(1));
    assert_eq!(
        canvas.get("1").unwrap().leaves()[0].color(),
        Color::ImageRef {
            anchor: Point::new(1, 0)
        }
    );
    let source = canvas.source_image().unwrap();
    assert_eq!(source.pixel(1, 1), Some(Rgba8::new(40, 0, 0, 255)));
    assert_eq!(source.pixel(2, 0), None);
}

#[test]
fn initial_config_without_presets_is_a_white_canvas() {
    let cfg = InitialConfig::from_json(r#"{ "width": 8, "height": 4 }"#).unwrap();
    let canvas = Canvas::from_initial_config(&cfg).unwrap();
    assert_eq!(canvas.ids().collect::<Vec<_>>(), vec!["0"]);
    assert_eq!(
        canvas.simplify()[0].color(),
        Color::Rgba(Rgba8::WHITE)
    );
}

#[test]
fn initial_config_errors() {
    let dup = InitialConfig {
        width: 4,
        height: 4,
        blocks: vec![
            PresetBlock {
                block_id: "0".into(),
                bottom_left: Point::new(0, 0),
                top_right: Point::new(2, 4),
                color: Some(Rgba8::WHITE),
                png_bottom_left_point: None,
            },
            PresetBlock {
                block_id: "0".into(),
                bottom_left: Point::new(2, 0),
                top_right: Point::new(4, 4),
                color: Some(Rgba8::WHITE),
                png_bottom_left_point: None,
            },
        ],
        ..InitialConfig::default()
    };
    assert!(matches!(
        Canvas::from_initial_config(&dup),
        Err(VinciError::Validation(_))
    ));

    let mut no_source = dup.clone();
    no_source.blocks.truncate(1);
    no_source.blocks[0].color = None;
    no_source.blocks[0].png_bottom_left_point = Some(Point::new(0, 0));
    assert!(matches!(
        Canvas::from_initial_config(&no_source),
        Err(VinciError::Validation(_))
    ));

    let mut no_fill = no_source.clone();
    no_fill.blocks[0].png_bottom_left_point = None;
    assert!(matches!(
        Canvas::from_initial_config(&no_fill),
        Err(VinciError::Validation(_))
    ));

    assert!(matches!(
        InitialConfig::from_json("{ \"width\": 4 }"),
        Err(VinciError::Serde(_))
    ));
}

#[test]
fn source_image_must_match_canvas() {
    let mut canvas = Canvas::new(2, 2, Rgba8::WHITE).unwrap();
    let wrong = SourceImage::new(1, 2, vec![Rgba8::WHITE; 2]).unwrap();
    assert!(canvas.set_source_image(wrong).is_err());
    assert!(SourceImage::new(2, 2, vec![Rgba8::WHITE; 3]).is_err());
}
