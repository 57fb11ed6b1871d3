use std::io::{self, Write};

use crate::{pos, Pos};

/// a fixed size character buffer, composed by layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    lines: Vec<Vec<char>>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            lines: vec![vec![' '; width]; height],
        }
    }

    /// paints every position for which `f` yields a char, leaves the others.
    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for (y, line) in self.lines.iter_mut().enumerate() {
            for (x, slot) in line.iter_mut().enumerate() {
                if let Some(char) = f(pos!(x as i32, y as i32)) {
                    *slot = char;
                }
            }
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.lines.iter().map(|line| line.iter().collect())
    }

    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}
