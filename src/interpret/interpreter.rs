use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::{VinciError, VinciResult};
use crate::interpret::cost::{CostTable, instruction_cost};
use crate::interpret::split::{self, Axis};
use crate::model::block::{Block, ComplexBlock, SimpleBlock};
use crate::model::canvas::{Canvas, InitialConfig};
use crate::program::instruction::{Instruction, InstructionKind};
use crate::program::parser::{Program, parse_program};

/// Interpreter configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterpreterOpts {
    /// Base-cost table used to price instructions.
    pub cost_table: CostTable,
}

/// Outcome of a successful run.
#[derive(Clone, Debug)]
pub struct RunResult {
    /// Canvas after the last instruction.
    pub canvas: Canvas,
    /// Sum of all instruction costs.
    pub cost: u64,
}

/// Applies instructions to a canvas it exclusively owns.
///
/// Every instruction either succeeds completely or leaves the canvas untouched: new
/// blocks are built before any id is removed or inserted.
#[derive(Debug)]
pub struct Interpreter {
    canvas: Canvas,
    opts: InterpreterOpts,
    total_cost: u64,
    merge_counter: u64,
}

impl Interpreter {
    /// Start from `canvas`. Fusion ids continue after its largest numeric id.
    pub fn new(canvas: Canvas, opts: InterpreterOpts) -> Self {
        let merge_counter = canvas.max_numeric_id().unwrap_or(0);
        Self {
            canvas,
            opts,
            total_cost: 0,
            merge_counter,
        }
    }

    /// Current canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Cost accumulated so far.
    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    /// Consume the interpreter, returning its canvas.
    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    /// Run every line of `program` in order and return the cost of this run.
    ///
    /// The first failure stops the run; its error carries the offending line.
    #[tracing::instrument(skip_all, fields(lines = program.lines.len()))]
    pub fn run(&mut self, program: &Program) -> VinciResult<u64> {
        let mut cost = 0u64;
        for pl in program.effective() {
            cost += self
                .apply(&pl.instruction)
                .map_err(|e| e.at_line(pl.line))?;
        }
        tracing::debug!(cost, blocks = self.canvas.len(), "program finished");
        Ok(cost)
    }

    /// Apply one instruction and return its cost.
    pub fn apply(&mut self, instruction: &Instruction) -> VinciResult<u64> {
        let cost = match instruction {
            Instruction::Nop | Instruction::Comment(_) => return Ok(0),
            Instruction::Color { block_id, color } => self.color(block_id, *color)?,
            Instruction::PointCut { block_id, point } => self.point_cut(block_id, *point)?,
            Instruction::VerticalCut { block_id, x } => self.line_cut(block_id, Axis::X, *x)?,
            Instruction::HorizontalCut { block_id, y } => self.line_cut(block_id, Axis::Y, *y)?,
            Instruction::Swap {
                block_id1,
                block_id2,
            } => self.swap(block_id1, block_id2)?,
            Instruction::Merge {
                block_id1,
                block_id2,
            } => self.merge(block_id1, block_id2)?,
        };
        self.total_cost += cost;
        tracing::debug!(kind = ?instruction.kind(), cost, "applied instruction");
        Ok(cost)
    }

    fn cost(&self, kind: InstructionKind, operand_area: u64) -> u64 {
        instruction_cost(
            self.opts.cost_table,
            kind,
            operand_area,
            self.canvas.area(),
        )
    }

    fn color(&mut self, id: &str, color: Rgba8) -> VinciResult<u64> {
        let block = self.canvas.block(id)?;
        let cost = self.cost(InstructionKind::Color, block.area());
        // A complex block collapses back into a single leaf.
        let recolored = Block::Simple(SimpleBlock::from_rect(*block.rect(), color.into()));
        self.canvas.insert(id, recolored)?;
        Ok(cost)
    }

    fn point_cut(&mut self, id: &str, point: Point) -> VinciResult<u64> {
        let block = self.canvas.block(id)?;
        let rect = *block.rect();
        if !point.is_strictly_inside(&rect) {
            return Err(VinciError::invalid_geometry(format!(
                "point {point} is not strictly inside block [{id}] ({rect})"
            )));
        }
        let cost = self.cost(InstructionKind::PointCut, block.area());

        let quadrants = rect.quadrants(point)?;
        let children: Vec<Block> = match block {
            Block::Simple(b) => quadrants
                .into_iter()
                .map(|q| Block::Simple(b.with_rect(q)))
                .collect(),
            Block::Complex(b) => quadrants
                .into_iter()
                .zip(split::route_point(b.children(), point)?)
                .map(|(q, leaves)| Block::Complex(ComplexBlock::from_rect(q, leaves)))
                .collect(),
        };
        self.replace_with_children(id, children)?;
        Ok(cost)
    }

    fn line_cut(&mut self, id: &str, axis: Axis, at: u32) -> VinciResult<u64> {
        let kind = match axis {
            Axis::X => InstructionKind::VerticalCut,
            Axis::Y => InstructionKind::HorizontalCut,
        };
        let block = self.canvas.block(id)?;
        let rect = *block.rect();
        let (lo, hi) = axis.span(&rect);
        if at < lo || at > hi {
            return Err(VinciError::invalid_geometry(format!(
                "line {at} is outside block [{id}] ({rect})"
            )));
        }
        let cost = self.cost(kind, block.area());

        let halves = axis.split(&rect, at)?;
        let children: Vec<Block> = match block {
            Block::Simple(b) => halves
                .into_iter()
                .map(|h| Block::Simple(b.with_rect(h)))
                .collect(),
            Block::Complex(b) => halves
                .into_iter()
                .zip(split::route_line(b.children(), axis, at)?)
                .map(|(h, leaves)| Block::Complex(ComplexBlock::from_rect(h, leaves)))
                .collect(),
        };
        self.replace_with_children(id, children)?;
        Ok(cost)
    }

    fn swap(&mut self, id1: &str, id2: &str) -> VinciResult<u64> {
        let b1 = self.canvas.block(id1)?;
        let b2 = self.canvas.block(id2)?;
        if b1.size() != b2.size() {
            return Err(VinciError::size_mismatch(format!(
                "[{id1}] is {} while [{id2}] is {}",
                b1.size(),
                b2.size()
            )));
        }
        let cost = self.cost(InstructionKind::Swap, b1.area());

        let at1 = b2.relocated(b1.rect())?;
        let at2 = b1.relocated(b2.rect())?;
        self.canvas.insert(id1, at1)?;
        self.canvas.insert(id2, at2)?;
        Ok(cost)
    }

    fn merge(&mut self, id1: &str, id2: &str) -> VinciResult<u64> {
        let b1 = self.canvas.block(id1)?;
        let b2 = self.canvas.block(id2)?;
        let (r1, r2) = (*b1.rect(), *b2.rect());
        if !stacked(&r1, &r2) && !side_by_side(&r1, &r2) {
            return Err(VinciError::not_mergeable(format!(
                "[{id1}] ({r1}) and [{id2}] ({r2}) are not adjacent and aligned"
            )));
        }
        let cost = self.cost(InstructionKind::Merge, b1.area().max(b2.area()));

        let union = Rect::new(
            Point::new(
                r1.bottom_left().x.min(r2.bottom_left().x),
                r1.bottom_left().y.min(r2.bottom_left().y),
            ),
            Point::new(
                r1.top_right().x.max(r2.top_right().x),
                r1.top_right().y.max(r2.top_right().y),
            ),
        )?;
        let mut leaves = b1.leaves().to_vec();
        leaves.extend_from_slice(b2.leaves());
        let merged = Block::Complex(ComplexBlock::from_rect(union, leaves));

        let counter = self
            .merge_counter
            .checked_add(1)
            .ok_or_else(|| VinciError::validation("merge id counter exhausted"))?;
        let new_id = counter.to_string();
        self.canvas.remove(id1);
        self.canvas.remove(id2);
        self.canvas.insert(new_id, merged)?;
        self.merge_counter = counter;
        Ok(cost)
    }

    fn replace_with_children(&mut self, id: &str, children: Vec<Block>) -> VinciResult<()> {
        self.canvas.remove(id);
        for (i, child) in children.into_iter().enumerate() {
            self.canvas.insert(format!("{id}.{i}"), child)?;
        }
        Ok(())
    }
}

/// One on top of the other with identical x-span.
fn stacked(a: &Rect, b: &Rect) -> bool {
    (a.bottom_left().y == b.top_right().y || a.top_right().y == b.bottom_left().y)
        && a.bottom_left().x == b.bottom_left().x
        && a.top_right().x == b.top_right().x
}

/// Next to each other with identical y-span.
fn side_by_side(a: &Rect, b: &Rect) -> bool {
    (a.bottom_left().x == b.top_right().x || a.top_right().x == b.bottom_left().x)
        && a.bottom_left().y == b.bottom_left().y
        && a.top_right().y == b.top_right().y
}

/// Parse `src` and run it.
///
/// The starting canvas comes from `initial` when given, otherwise from the program's
/// metadata.
#[tracing::instrument(skip(src, initial))]
pub fn run_program(
    src: &str,
    initial: Option<&InitialConfig>,
    opts: InterpreterOpts,
) -> VinciResult<RunResult> {
    let program = parse_program(src)?;
    let canvas = match initial {
        Some(cfg) => Canvas::from_initial_config(cfg)?,
        None => Canvas::new(
            program.meta.width,
            program.meta.height,
            program.meta.background,
        )?,
    };
    let mut interpreter = Interpreter::new(canvas, opts);
    let cost = interpreter.run(&program)?;
    Ok(RunResult {
        canvas: interpreter.into_canvas(),
        cost,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/interpret/interpreter.rs"]
mod tests;
