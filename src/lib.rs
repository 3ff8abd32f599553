//! vinci interprets and judges programs written in a small canvas-editing language.
//!
//! A program edits a rectangular canvas made of named blocks. Blocks are cut into
//! pieces, recolored, swapped with equal-size blocks and merged with aligned
//! neighbours; every instruction has a cost that depends on how small its operand is
//! relative to the whole canvas.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: program text -> [`Program`] (one [`Instruction`] per line, with line numbers)
//! 2. **Interpret**: [`Program`] + starting [`Canvas`] -> final [`Canvas`] + instruction cost
//! 3. **Draw**: [`Canvas`] -> [`Frame`] (top-down RGBA8 pixels)
//! 4. **Score**: target [`Frame`] vs rendered [`Frame`] -> similarity cost
//!
//! [`judge`] runs all four steps and [`JudgeReport`] is the machine-readable verdict.
//!
//! Coordinates on the canvas are integers with `y = 0` at the bottom edge; frames are
//! stored top-down. Errors from the interpreter carry the 0-based line of the failing
//! instruction.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod interpret;
mod judge;
mod model;
mod program;
mod render;
mod score;

pub use foundation::core::{Color, Point, Rect, Rgba8};
pub use foundation::error::{VinciError, VinciResult};
pub use interpret::cost::{CostTable, LEGACY_CUTOFF_PROBLEM_ID, instruction_cost};
pub use interpret::interpreter::{Interpreter, InterpreterOpts, RunResult, run_program};
pub use judge::{JudgeOpts, JudgeOutcome, JudgeReport, judge};
pub use model::block::{Block, ComplexBlock, SimpleBlock};
pub use model::canvas::{Canvas, InitialConfig, PresetBlock, ROOT_BLOCK_ID, SourceImage};
pub use program::instruction::{Instruction, InstructionKind};
pub use program::parser::{Program, ProgramLine, ProgramMeta, parse_line, parse_program};
pub use render::frame::Frame;
pub use render::painter::{RenderThreading, draw, draw_with};
pub use score::similarity::{SIMILARITY_ALPHA, image_diff, pixel_diff};
