use super::*;
use crate::foundation::core::Rgba8;
use crate::foundation::error::VinciError;

fn red() -> Color {
    Color::Rgba(Rgba8::new(255, 0, 0, 255))
}

fn leaf(x0: u32, y0: u32, x1: u32, y1: u32, color: Color) -> SimpleBlock {
    SimpleBlock::new(Point::new(x0, y0), Point::new(x1, y1), color).unwrap()
}

#[test]
fn simple_block_rejects_zero_area() {
    let err = SimpleBlock::new(Point::new(0, 0), Point::new(0, 10), red()).unwrap_err();
    assert!(matches!(err, VinciError::InvalidBlock(_)));
    let err = ComplexBlock::new(Point::new(5, 5), Point::new(4, 10), vec![]).unwrap_err();
    assert!(matches!(err, VinciError::InvalidBlock(_)));
}

#[test]
fn leaves_of_simple_is_singleton() {
    let b = Block::from(leaf(0, 0, 4, 4, red()));
    assert_eq!(b.leaves().len(), 1);
    assert_eq!(b.leaves()[0].rect(), b.rect());
    assert_eq!(b.area(), 16);
}

#[test]
fn leaves_of_complex_keep_insertion_order() {
    let a = leaf(0, 0, 2, 4, red());
    let b = leaf(2, 0, 4, 4, Color::Rgba(Rgba8::WHITE));
    let c = Block::from(
        ComplexBlock::new(Point::new(0, 0), Point::new(4, 4), vec![b.clone(), a.clone()]).unwrap(),
    );
    assert_eq!(c.leaves(), &[b, a]);
}

#[test]
fn relocated_complex_translates_children() {
    let source = Block::from(
        ComplexBlock::new(
            Point::new(10, 10),
            Point::new(20, 20),
            vec![
                leaf(10, 10, 15, 20, red()),
                leaf(
                    15,
                    10,
                    20,
                    20,
                    Color::ImageRef {
                        anchor: Point::new(15, 10),
                    },
                ),
            ],
        )
        .unwrap(),
    );
    let target = Rect::new(Point::new(0, 30), Point::new(10, 40)).unwrap();
    let moved = source.relocated(&target).unwrap();

    assert_eq!(moved.rect(), &target);
    assert_eq!(moved.leaves()[0], leaf(0, 30, 5, 40, red()));
    assert_eq!(
        moved.leaves()[1],
        leaf(
            5,
            30,
            10,
            40,
            Color::ImageRef {
                anchor: Point::new(5, 30)
            }
        )
    );
}

#[test]
fn relocated_simple_keeps_literal_color() {
    let source = Block::from(leaf(0, 0, 5, 5, red()));
    let target = Rect::new(Point::new(5, 5), Point::new(10, 10)).unwrap();
    assert_eq!(
        source.relocated(&target).unwrap(),
        Block::from(leaf(5, 5, 10, 10, red()))
    );
}
