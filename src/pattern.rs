//! start generations written as text, one row per line.

use tracing::warn;

use crate::{pos, Pos};

pub const LIVING_GLYPH: char = 'O';
pub const DEAD_GLYPH: char = ' ';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub width: i32,
    pub height: i32,
    pub actives: Vec<Pos>,
}

/// reads a start generation.
///
/// every `'\n'` separated line is a row, the longest one gives the width and
/// shorter rows are padded with dead cells. unknown glyphs are reported and
/// read as dead.
pub fn deserialize(str: &str) -> Pattern {
    let mut actives = vec![];
    let mut width = 0;
    let mut height = 0;

    for (y, line) in str.split('\n').enumerate() {
        let mut x = 0;
        for c in line.chars() {
            match c {
                LIVING_GLYPH => actives.push(pos!(x, y as i32)),
                DEAD_GLYPH => (),
                other => warn!("Invalid character '{other}'. Only '{DEAD_GLYPH}' and '{LIVING_GLYPH}' allowed."),
            }
            x += 1;
        }
        width = width.max(x);
        height += 1;
    }

    Pattern {
        width,
        height,
        actives,
    }
}
