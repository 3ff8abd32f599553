//! End-to-end scoring: interpret a program, rasterize it and compare with a target.

use crate::foundation::error::{VinciError, VinciResult};
use crate::interpret::cost::CostTable;
use crate::interpret::interpreter::{InterpreterOpts, run_program};
use crate::model::canvas::{Canvas, InitialConfig};
use crate::render::frame::Frame;
use crate::render::painter::{RenderThreading, draw_with};
use crate::score::similarity::image_diff;

/// Options for [`judge`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JudgeOpts {
    /// Problem id; selects the cost table.
    pub problem_id: u32,
    /// Rasterizer threading.
    pub threading: RenderThreading,
}

/// Everything a successful judgement produced.
#[derive(Clone, Debug)]
pub struct JudgeOutcome {
    /// Sum of instruction costs.
    pub instruction_cost: u64,
    /// Weighted pixel distance between target and rendered frame.
    pub similarity: u64,
    /// `instruction_cost + similarity`.
    pub total: u64,
    /// Rendered frame.
    pub frame: Frame,
    /// Final canvas.
    pub canvas: Canvas,
}

/// Machine-readable verdict, as printed by the `vinci judge` command.
///
/// Serializes to `{"result":"success","cost":N}` or
/// `{"result":"error","err":"..","line":L}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum JudgeReport {
    /// The program ran and was scored.
    Success {
        /// Total cost.
        cost: u64,
    },
    /// The program failed to parse or run.
    Error {
        /// Error message.
        err: String,
        /// 0-based line of the failing instruction, when known.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
    },
}

impl JudgeReport {
    /// Verdict for a judgement result.
    pub fn from_result(res: &VinciResult<JudgeOutcome>) -> Self {
        match res {
            Ok(outcome) => Self::Success {
                cost: outcome.total,
            },
            Err(e) => Self::Error {
                err: e.to_string(),
                line: e.line(),
            },
        }
    }

    /// Compact JSON form.
    pub fn to_json(&self) -> VinciResult<String> {
        serde_json::to_string(self)
            .map_err(|e| VinciError::serde(format!("serialize judge report: {e}")))
    }
}

/// Run `source` against `target` and score it.
///
/// The starting canvas comes from `initial` when given, otherwise from the program's
/// default metadata. The target must have the canvas dimensions.
#[tracing::instrument(skip(source, initial, target), fields(problem_id = opts.problem_id))]
pub fn judge(
    source: &str,
    initial: Option<&InitialConfig>,
    target: &Frame,
    opts: &JudgeOpts,
) -> VinciResult<JudgeOutcome> {
    let run = run_program(
        source,
        initial,
        InterpreterOpts {
            cost_table: CostTable::for_problem(opts.problem_id),
        },
    )?;
    let frame = draw_with(&run.canvas, &opts.threading)?;
    let similarity = image_diff(target, &frame)?;
    tracing::debug!(instruction_cost = run.cost, similarity, "judged program");
    Ok(JudgeOutcome {
        instruction_cost: run.cost,
        similarity,
        total: run.cost + similarity,
        frame,
        canvas: run.canvas,
    })
}

#[cfg(test)]
#[path = "../tests/unit/judge.rs"]
mod tests;
