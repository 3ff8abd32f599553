use super::*;

fn parse_ok(text: &str) -> Instruction {
    parse_line(0, text).unwrap()
}

fn parse_err(text: &str) -> String {
    match parse_line(5, text) {
        Err(VinciError::Parse { line, message }) => {
            assert_eq!(line, 5);
            message
        }
        other => panic!("expected parse error for {text:?}, got {other:?}"),
    }
}

#[test]
fn parses_every_instruction_form() {
    assert_eq!(
        parse_ok("color [0.1] [255, 0, 10, 255]"),
        Instruction::Color {
            block_id: "0.1".into(),
            color: Rgba8::new(255, 0, 10, 255)
        }
    );
    assert_eq!(
        parse_ok("cut[0][200,100]"),
        Instruction::PointCut {
            block_id: "0".into(),
            point: Point::new(200, 100)
        }
    );
    assert_eq!(
        parse_ok("cut [0.3.2] [X] [17]"),
        Instruction::VerticalCut {
            block_id: "0.3.2".into(),
            x: 17
        }
    );
    assert_eq!(
        parse_ok("cut [0] [y] [0]"),
        Instruction::HorizontalCut {
            block_id: "0".into(),
            y: 0
        }
    );
    assert_eq!(
        parse_ok("  swap [1] [0.2]\r"),
        Instruction::Swap {
            block_id1: "1".into(),
            block_id2: "0.2".into()
        }
    );
    assert_eq!(
        parse_ok("merge[10][11]"),
        Instruction::Merge {
            block_id1: "10".into(),
            block_id2: "11".into()
        }
    );
}

#[test]
fn blank_and_comment_lines_are_inert() {
    assert_eq!(parse_ok(""), Instruction::Nop);
    assert_eq!(parse_ok("   \t"), Instruction::Nop);
    assert_eq!(
        parse_ok("  # split the sky  "),
        Instruction::Comment("split the sky".into())
    );
    assert!(parse_ok("#").is_inert());
}

#[test]
fn rejects_malformed_lines() {
    assert!(parse_err("cut[0][200]").contains("cut[0][200]"));
    parse_err("color[0][256,0,0,0]");
    parse_err("color[0][1,2,3]");
    parse_err("cut[01][x][5]");
    parse_err("cut[0][x][007]");
    parse_err("cut[0.][x][5]");
    parse_err("cut[0][z][5]");
    parse_err("swap[0]");
    parse_err("merge[0][1]x");
    parse_err("xmerge[0][1]");
    parse_err("paint[0][1,2,3,4]");
    parse_err("cut[0][99999999999,1]");
}

#[test]
fn display_form_parses_back() {
    let program = "\
color [0] [1, 2, 3, 4]
cut [0] [5, 6]
cut [0.1] [x] [7]
cut [0.1] [y] [8]
swap [0.0] [0.1]
merge [1] [2]
# note";
    for (i, text) in program.lines().enumerate() {
        let ins = parse_line(i, text).unwrap();
        assert_eq!(ins.to_string(), text);
    }
}

#[test]
fn program_keeps_line_provenance() {
    let src = "# header\n\ncolor[0][0,0,0,255]\ncut[0][x][3]\n";
    let program = parse_program(src).unwrap();
    assert_eq!(program.meta, ProgramMeta::default());
    assert_eq!(program.lines.len(), 5);
    let effective: Vec<usize> = program.effective().map(|l| l.line).collect();
    assert_eq!(effective, vec![2, 3]);
}

#[test]
fn program_reports_first_bad_line() {
    let src = "color[0][0,0,0,255]\ncut[0][200]\ncut[0][";
    match parse_program(src) {
        Err(VinciError::Parse { line, .. }) => assert_eq!(line, 1),
        other => panic!("expected parse error, got {other:?}"),
    }
}
