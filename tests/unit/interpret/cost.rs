use super::*;

#[test]
fn table_selection_by_problem_id() {
    assert_eq!(CostTable::for_problem(1), CostTable::Legacy);
    assert_eq!(CostTable::for_problem(35), CostTable::Legacy);
    assert_eq!(CostTable::for_problem(36), CostTable::Revised);
    assert_eq!(CostTable::for_problem(1000), CostTable::Revised);
}

#[test]
fn tables_differ_only_on_cuts() {
    use InstructionKind as K;
    for kind in [K::Nop, K::Comment, K::Color, K::Swap, K::Merge] {
        assert_eq!(
            CostTable::Legacy.base_cost(kind),
            CostTable::Revised.base_cost(kind)
        );
    }
    assert_eq!(CostTable::Legacy.base_cost(K::VerticalCut), 7);
    assert_eq!(CostTable::Legacy.base_cost(K::HorizontalCut), 7);
    assert_eq!(CostTable::Legacy.base_cost(K::PointCut), 10);
    assert_eq!(CostTable::Revised.base_cost(K::VerticalCut), 2);
    assert_eq!(CostTable::Revised.base_cost(K::HorizontalCut), 2);
    assert_eq!(CostTable::Revised.base_cost(K::PointCut), 3);
}

#[test]
fn cost_scales_with_canvas_over_operand() {
    let canvas = 400 * 400;
    assert_eq!(
        instruction_cost(CostTable::Legacy, InstructionKind::Color, canvas, canvas),
        5
    );
    assert_eq!(
        instruction_cost(CostTable::Legacy, InstructionKind::Color, canvas / 4, canvas),
        20
    );
    // 7 * 160000 / 60000 = 18.67
    assert_eq!(
        instruction_cost(CostTable::Legacy, InstructionKind::VerticalCut, 60_000, canvas),
        19
    );
    // 1 * 4 / 8 = 0.5 rounds away from zero
    assert_eq!(
        instruction_cost(CostTable::Legacy, InstructionKind::Merge, 8, 4),
        1
    );
}

#[test]
fn inert_kinds_are_free() {
    assert_eq!(
        instruction_cost(CostTable::Revised, InstructionKind::Comment, 1, 160_000),
        0
    );
    assert_eq!(
        instruction_cost(CostTable::Revised, InstructionKind::Nop, 1, 160_000),
        0
    );
}
