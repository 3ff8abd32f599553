use crate::program::instruction::InstructionKind;

/// Problem ids below this use [`CostTable::Legacy`].
pub const LEGACY_CUTOFF_PROBLEM_ID: u32 = 36;

/// Versioned base-cost table.
///
/// Both tables are kept verbatim so historical scores stay reproducible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTable {
    /// Original table with expensive cuts.
    #[default]
    Legacy,
    /// Revised table with cheaper cuts.
    Revised,
}

impl CostTable {
    /// Table in force for a problem id.
    pub fn for_problem(problem_id: u32) -> Self {
        if problem_id < LEGACY_CUTOFF_PROBLEM_ID {
            CostTable::Legacy
        } else {
            CostTable::Revised
        }
    }

    /// Base cost of an instruction kind.
    pub fn base_cost(self, kind: InstructionKind) -> u32 {
        use InstructionKind as K;
        match (self, kind) {
            (_, K::Nop | K::Comment) => 0,
            (_, K::Color) => 5,
            (CostTable::Legacy, K::VerticalCut | K::HorizontalCut) => 7,
            (CostTable::Legacy, K::PointCut) => 10,
            (CostTable::Revised, K::VerticalCut | K::HorizontalCut) => 2,
            (CostTable::Revised, K::PointCut) => 3,
            (_, K::Swap) => 3,
            (_, K::Merge) => 1,
        }
    }
}

/// `round(base * canvas_area / operand_area)`, rounding half away from zero.
///
/// `operand_area` is never zero for a constructed block; a zero is treated as
/// free so the function stays total.
pub fn instruction_cost(
    table: CostTable,
    kind: InstructionKind,
    operand_area: u64,
    canvas_area: u64,
) -> u64 {
    let base = table.base_cost(kind);
    if base == 0 || operand_area == 0 {
        return 0;
    }
    (f64::from(base) * (canvas_area as f64 / operand_area as f64)).round() as u64
}

#[cfg(test)]
#[path = "../../tests/unit/interpret/cost.rs"]
mod tests;
