//! Routing of child leaves when a complex block is cut.
//!
//! Every leaf is classified per axis as lying entirely below the cut, entirely at or
//! above it, or straddling it. Leaves that straddle are cut along that axis; all
//! others pass through unchanged. The routed lists tile their halves or quadrants
//! exactly when the input leaves tile the parent.

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::VinciResult;
use crate::model::block::SimpleBlock;

/// Cut direction of a line cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    /// Vertical line at some `x`.
    X,
    /// Horizontal line at some `y`.
    Y,
}

impl Axis {
    /// `(low, high)` extent of `rect` along this axis.
    pub(crate) fn span(self, rect: &Rect) -> (u32, u32) {
        match self {
            Axis::X => (rect.bottom_left().x, rect.top_right().x),
            Axis::Y => (rect.bottom_left().y, rect.top_right().y),
        }
    }

    /// `[low, high]` halves of `rect` cut at `at`.
    pub(crate) fn split(self, rect: &Rect, at: u32) -> VinciResult<[Rect; 2]> {
        let (lo, hi) = match self {
            Axis::X => rect.split_vertical(at)?,
            Axis::Y => rect.split_horizontal(at)?,
        };
        Ok([lo, hi])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Below,
    Across,
    Above,
}

fn side(lo: u32, hi: u32, at: u32) -> Side {
    if hi <= at {
        Side::Below
    } else if lo >= at {
        Side::Above
    } else {
        Side::Across
    }
}

/// Route leaves to the `[low, high]` halves of a line cut at `at`.
pub(crate) fn route_line(
    leaves: &[SimpleBlock],
    axis: Axis,
    at: u32,
) -> VinciResult<[Vec<SimpleBlock>; 2]> {
    let mut out: [Vec<SimpleBlock>; 2] = Default::default();
    for leaf in leaves {
        let (lo, hi) = axis.span(leaf.rect());
        match side(lo, hi, at) {
            Side::Below => out[0].push(leaf.clone()),
            Side::Above => out[1].push(leaf.clone()),
            Side::Across => {
                let [low, high] = axis.split(leaf.rect(), at)?;
                out[0].push(leaf.with_rect(low));
                out[1].push(leaf.with_rect(high));
            }
        }
    }
    Ok(out)
}

const BOTTOM_LEFT: usize = 0;
const BOTTOM_RIGHT: usize = 1;
const TOP_RIGHT: usize = 2;
const TOP_LEFT: usize = 3;

/// Route leaves to the quadrants around `p`, indexed bottom-left, bottom-right,
/// top-right, top-left.
pub(crate) fn route_point(leaves: &[SimpleBlock], p: Point) -> VinciResult<[Vec<SimpleBlock>; 4]> {
    let mut out: [Vec<SimpleBlock>; 4] = Default::default();
    for leaf in leaves {
        let r = leaf.rect();
        let sx = side(r.bottom_left().x, r.top_right().x, p.x);
        let sy = side(r.bottom_left().y, r.top_right().y, p.y);
        match (sx, sy) {
            (Side::Below, Side::Below) => out[BOTTOM_LEFT].push(leaf.clone()),
            (Side::Above, Side::Below) => out[BOTTOM_RIGHT].push(leaf.clone()),
            (Side::Above, Side::Above) => out[TOP_RIGHT].push(leaf.clone()),
            (Side::Below, Side::Above) => out[TOP_LEFT].push(leaf.clone()),
            (Side::Across, Side::Across) => {
                for (quadrant, rect) in out.iter_mut().zip(r.quadrants(p)?) {
                    quadrant.push(leaf.with_rect(rect));
                }
            }
            (Side::Across, Side::Below) => {
                let (left, right) = r.split_vertical(p.x)?;
                out[BOTTOM_LEFT].push(leaf.with_rect(left));
                out[BOTTOM_RIGHT].push(leaf.with_rect(right));
            }
            (Side::Across, Side::Above) => {
                let (left, right) = r.split_vertical(p.x)?;
                out[TOP_LEFT].push(leaf.with_rect(left));
                out[TOP_RIGHT].push(leaf.with_rect(right));
            }
            (Side::Below, Side::Across) => {
                let (bottom, top) = r.split_horizontal(p.y)?;
                out[BOTTOM_LEFT].push(leaf.with_rect(bottom));
                out[TOP_LEFT].push(leaf.with_rect(top));
            }
            (Side::Above, Side::Across) => {
                let (bottom, top) = r.split_horizontal(p.y)?;
                out[BOTTOM_RIGHT].push(leaf.with_rect(bottom));
                out[TOP_RIGHT].push(leaf.with_rect(top));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/interpret/split.rs"]
mod tests;
