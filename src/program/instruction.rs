use std::fmt;

use crate::foundation::core::{Point, Rgba8};

/// One program line after parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Blank line.
    Nop,
    /// `# text`; kept for display only.
    Comment(String),
    /// `color[id][r,g,b,a]`
    Color {
        /// Target block.
        block_id: String,
        /// New fill.
        color: Rgba8,
    },
    /// `cut[id][x,y]`
    PointCut {
        /// Target block.
        block_id: String,
        /// Split point, strictly inside the block.
        point: Point,
    },
    /// `cut[id][x][n]`
    VerticalCut {
        /// Target block.
        block_id: String,
        /// Cut line.
        x: u32,
    },
    /// `cut[id][y][n]`
    HorizontalCut {
        /// Target block.
        block_id: String,
        /// Cut line.
        y: u32,
    },
    /// `swap[a][b]`
    Swap {
        /// First operand.
        block_id1: String,
        /// Second operand.
        block_id2: String,
    },
    /// `merge[a][b]`
    Merge {
        /// First operand.
        block_id1: String,
        /// Second operand.
        block_id2: String,
    },
}

/// Instruction discriminant, used to key cost tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionKind {
    /// Blank line.
    Nop,
    /// Comment line.
    Comment,
    /// Recolor.
    Color,
    /// Four-way cut.
    PointCut,
    /// Cut along `x`.
    VerticalCut,
    /// Cut along `y`.
    HorizontalCut,
    /// Content exchange.
    Swap,
    /// Fusion.
    Merge,
}

impl Instruction {
    /// Discriminant of this instruction.
    pub fn kind(&self) -> InstructionKind {
        match self {
            Instruction::Nop => InstructionKind::Nop,
            Instruction::Comment(_) => InstructionKind::Comment,
            Instruction::Color { .. } => InstructionKind::Color,
            Instruction::PointCut { .. } => InstructionKind::PointCut,
            Instruction::VerticalCut { .. } => InstructionKind::VerticalCut,
            Instruction::HorizontalCut { .. } => InstructionKind::HorizontalCut,
            Instruction::Swap { .. } => InstructionKind::Swap,
            Instruction::Merge { .. } => InstructionKind::Merge,
        }
    }

    /// Return `true` for lines that never touch the canvas.
    pub fn is_inert(&self) -> bool {
        matches!(self, Instruction::Nop | Instruction::Comment(_))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Nop => Ok(()),
            Instruction::Comment(text) => write!(f, "# {text}"),
            Instruction::Color { block_id, color } => write!(
                f,
                "color [{block_id}] [{}, {}, {}, {}]",
                color.r, color.g, color.b, color.a
            ),
            Instruction::PointCut { block_id, point } => {
                write!(f, "cut [{block_id}] [{}, {}]", point.x, point.y)
            }
            Instruction::VerticalCut { block_id, x } => write!(f, "cut [{block_id}] [x] [{x}]"),
            Instruction::HorizontalCut { block_id, y } => write!(f, "cut [{block_id}] [y] [{y}]"),
            Instruction::Swap {
                block_id1,
                block_id2,
            } => write!(f, "swap [{block_id1}] [{block_id2}]"),
            Instruction::Merge {
                block_id1,
                block_id2,
            } => write!(f, "merge [{block_id1}] [{block_id2}]"),
        }
    }
}
