use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{VinciError, VinciResult};
use crate::program::instruction::Instruction;

/// Canvas metadata a program runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProgramMeta {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Background of the initial root block.
    pub background: Rgba8,
}

impl Default for ProgramMeta {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            background: Rgba8::WHITE,
        }
    }
}

/// An instruction together with the 0-based line it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramLine {
    /// 0-based source line.
    pub line: usize,
    /// Parsed instruction.
    pub instruction: Instruction,
}

/// Parsed program: metadata plus instructions in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Canvas metadata.
    pub meta: ProgramMeta,
    /// One entry per source line, blank and comment lines included.
    pub lines: Vec<ProgramLine>,
}

impl Program {
    /// Instructions that act on the canvas.
    pub fn effective(&self) -> impl Iterator<Item = &ProgramLine> {
        self.lines.iter().filter(|l| !l.instruction.is_inert())
    }
}

/// Parse a whole program. The first malformed line aborts with [`VinciError::Parse`].
pub fn parse_program(src: &str) -> VinciResult<Program> {
    let lines = src
        .split('\n')
        .enumerate()
        .map(|(line, text)| {
            parse_line(line, text).map(|instruction| ProgramLine { line, instruction })
        })
        .collect::<VinciResult<Vec<_>>>()?;
    Ok(Program {
        meta: ProgramMeta::default(),
        lines,
    })
}

/// Parse one line. Whitespace is insignificant inside instructions.
pub fn parse_line(line: usize, text: &str) -> VinciResult<Instruction> {
    if text.trim().is_empty() {
        return Ok(Instruction::Nop);
    }
    if let Some(comment) = text.trim_start().strip_prefix('#') {
        return Ok(Instruction::Comment(comment.trim().to_owned()));
    }

    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut p = LineParser {
        src: compact.as_bytes(),
        pos: 0,
    };
    p.instruction().map_err(|detail| {
        VinciError::parse(
            line,
            format!("cannot parse the instruction [{compact}]: {detail}"),
        )
    })
}

struct LineParser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl LineParser<'_> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn expect(&mut self, want: u8) -> Result<(), String> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(format!(
                "expected '{}' at {}, found '{}'",
                want as char, self.pos, c as char
            )),
            None => Err(format!("expected '{}', found end of line", want as char)),
        }
    }

    fn expect_end(&self) -> Result<(), String> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(format!("unexpected trailing input at {}", self.pos)),
        }
    }

    fn instruction(&mut self) -> Result<Instruction, String> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let keyword = &self.src[start..self.pos];

        let ins = match keyword {
            b"color" => {
                let block_id = self.bracketed_block_id()?;
                self.expect(b'[')?;
                let r = self.byte()?;
                self.expect(b',')?;
                let g = self.byte()?;
                self.expect(b',')?;
                let b = self.byte()?;
                self.expect(b',')?;
                let a = self.byte()?;
                self.expect(b']')?;
                Instruction::Color {
                    block_id,
                    color: Rgba8::new(r, g, b, a),
                }
            }
            b"cut" => {
                let block_id = self.bracketed_block_id()?;
                self.expect(b'[')?;
                match self.peek() {
                    Some(axis @ (b'x' | b'X' | b'y' | b'Y')) => {
                        self.pos += 1;
                        self.expect(b']')?;
                        self.expect(b'[')?;
                        let n = self.number()?;
                        self.expect(b']')?;
                        if axis.eq_ignore_ascii_case(&b'x') {
                            Instruction::VerticalCut { block_id, x: n }
                        } else {
                            Instruction::HorizontalCut { block_id, y: n }
                        }
                    }
                    _ => {
                        let x = self.number()?;
                        self.expect(b',')?;
                        let y = self.number()?;
                        self.expect(b']')?;
                        Instruction::PointCut {
                            block_id,
                            point: Point::new(x, y),
                        }
                    }
                }
            }
            b"swap" => {
                let block_id1 = self.bracketed_block_id()?;
                let block_id2 = self.bracketed_block_id()?;
                Instruction::Swap {
                    block_id1,
                    block_id2,
                }
            }
            b"merge" => {
                let block_id1 = self.bracketed_block_id()?;
                let block_id2 = self.bracketed_block_id()?;
                Instruction::Merge {
                    block_id1,
                    block_id2,
                }
            }
            other => {
                return Err(format!(
                    "unknown instruction '{}'",
                    String::from_utf8_lossy(other)
                ));
            }
        };
        self.expect_end()?;
        Ok(ins)
    }

    fn bracketed_block_id(&mut self) -> Result<String, String> {
        self.expect(b'[')?;
        let start = self.pos;
        self.digits()?;
        while self.peek() == Some(b'.') {
            self.pos += 1;
            self.digits()?;
        }
        let id = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        self.expect(b']')?;
        Ok(id)
    }

    /// `0` or a non-zero digit followed by digits; returns the digit span.
    fn digits(&mut self) -> Result<&[u8], String> {
        let start = self.pos;
        match self.bump() {
            Some(b'0') => {}
            Some(b'1'..=b'9') => {
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
            Some(c) => {
                return Err(format!(
                    "expected a number at {start}, found '{}'",
                    c as char
                ));
            }
            None => return Err("expected a number, found end of line".to_owned()),
        }
        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(format!("number at {start} has a leading zero"));
        }
        Ok(&self.src[start..self.pos])
    }

    fn number(&mut self) -> Result<u32, String> {
        let start = self.pos;
        let digits = self.digits()?;
        std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| format!("number at {start} is out of range"))
    }

    fn byte(&mut self) -> Result<u8, String> {
        let start = self.pos;
        let n = self.number()?;
        u8::try_from(n).map_err(|_| format!("color channel at {start} exceeds 255"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/program/parser.rs"]
mod tests;
