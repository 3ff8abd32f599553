use anyhow::Context;
use rayon::prelude::*;

use crate::foundation::core::{Color, Rgba8};
use crate::foundation::error::{VinciError, VinciResult};
use crate::model::block::SimpleBlock;
use crate::model::canvas::{Canvas, SourceImage};
use crate::render::frame::Frame;

/// Threading options for [`draw_with`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderThreading {
    /// Fill rows on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Pool size; `None` lets rayon decide. Must be >= 1 when set.
    pub threads: Option<usize>,
}

/// Rasterize `canvas` on the calling thread.
pub fn draw(canvas: &Canvas) -> VinciResult<Frame> {
    draw_with(canvas, &RenderThreading::default())
}

/// Rasterize `canvas` into a top-down frame.
///
/// Leaves are painted in [`Canvas::simplify`] order, so a later leaf wins any cell it
/// shares with an earlier one. Cells no leaf covers stay transparent. Parallel rendering
/// splits the frame by rows and walks the leaves in the same order inside each row, so
/// the output does not depend on `threading`.
#[tracing::instrument(
    skip_all,
    fields(width = canvas.width(), height = canvas.height(), parallel = threading.parallel)
)]
pub fn draw_with(canvas: &Canvas, threading: &RenderThreading) -> VinciResult<Frame> {
    let spans = canvas
        .simplify()
        .into_iter()
        .map(|leaf| LeafSpan::new(canvas, leaf))
        .collect::<VinciResult<Vec<_>>>()?;
    tracing::debug!(leaves = spans.len(), "resolved leaves");

    let mut frame = Frame::filled(canvas.width(), canvas.height(), Rgba8::TRANSPARENT)?;
    let width = canvas.width() as usize;

    if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            frame
                .pixels_mut()
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(row, cells)| paint_row(&spans, row as u32, cells));
        });
    } else {
        for (row, cells) in frame.pixels_mut().chunks_mut(width).enumerate() {
            paint_row(&spans, row as u32, cells);
        }
    }
    Ok(frame)
}

fn build_thread_pool(threads: Option<usize>) -> VinciResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(VinciError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    Ok(builder.build().context("build rayon thread pool")?)
}

/// A leaf converted to top-down pixel ranges.
struct LeafSpan<'a> {
    cols: std::ops::Range<usize>,
    rows: std::ops::Range<u32>,
    fill: Fill<'a>,
}

enum Fill<'a> {
    Solid(Rgba8),
    /// Source pixels; `(x, y)` is the top-down source cell shown at the leaf's top-left.
    Image {
        source: &'a SourceImage,
        x: u32,
        y: u32,
    },
}

impl<'a> LeafSpan<'a> {
    fn new(canvas: &'a Canvas, leaf: &SimpleBlock) -> VinciResult<Self> {
        let rect = leaf.rect();
        let (bl, tr) = (rect.bottom_left(), rect.top_right());
        let height = canvas.height();
        let size = rect.size();

        let fill = match leaf.color() {
            Color::Rgba(c) => Fill::Solid(c),
            Color::ImageRef { anchor } => {
                let source = canvas.source_image().ok_or_else(|| {
                    VinciError::validation(format!(
                        "leaf {rect} references the source image but none is loaded"
                    ))
                })?;
                let fits_x = u64::from(anchor.x) + u64::from(size.x) <= u64::from(source.width());
                let fits_y = u64::from(anchor.y) + u64::from(size.y) <= u64::from(source.height());
                if !fits_x || !fits_y {
                    return Err(VinciError::validation(format!(
                        "leaf {rect} reads outside the {}x{} source image from anchor {anchor}",
                        source.width(),
                        source.height()
                    )));
                }
                Fill::Image {
                    source,
                    x: anchor.x,
                    y: source.height() - (anchor.y + size.y),
                }
            }
        };

        Ok(Self {
            cols: bl.x as usize..tr.x as usize,
            rows: height - tr.y..height - bl.y,
            fill,
        })
    }
}

fn paint_row(spans: &[LeafSpan<'_>], row: u32, cells: &mut [Rgba8]) {
    for span in spans {
        if !span.rows.contains(&row) {
            continue;
        }
        let Some(dst) = cells.get_mut(span.cols.clone()) else {
            continue;
        };
        match span.fill {
            Fill::Solid(c) => dst.fill(c),
            Fill::Image { source, x, y } => {
                let sy = y + (row - span.rows.start);
                for (dx, cell) in dst.iter_mut().enumerate() {
                    if let Some(px) = source.pixel(x + dx as u32, sy) {
                        *cell = px;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
