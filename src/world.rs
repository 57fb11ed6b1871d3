use crate::{pos, Pos, PosSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    active: bool,
}

impl Cell {
    pub fn active() -> Self {
        Self { active: true }
    }

    pub fn inactive() -> Self {
        Self { active: false }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// a bounded cell storage, read and mutated by the engine.
///
/// positions handed to `get` and `set` are not wrapped, wrapping is the
/// engine's concern.
pub trait World: Clone + Send + 'static {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn get(&self, pos: Pos) -> Cell;
    fn set(&mut self, pos: Pos, cell: Cell);

    fn is_alive(&self, pos: Pos) -> bool {
        self.get(pos).is_active()
    }

    /// every in-range position, row by row.
    fn positions(&self) -> Box<dyn Iterator<Item = Pos> + '_> {
        let (width, height) = (self.width(), self.height());
        Box::new((0..height).flat_map(move |y| (0..width).map(move |x| pos!(x, y))))
    }

    fn actives(&self) -> Vec<Pos> {
        self.positions().filter(|&pos| self.is_alive(pos)).collect()
    }

    fn population(&self) -> usize {
        self.positions().filter(|&pos| self.is_alive(pos)).count()
    }

    /// applies one generation worth of flips, `births` and `deaths` are disjoint.
    fn apply_changes(&mut self, births: &PosSet, deaths: &PosSet) {
        for &pos in births {
            self.set(pos, Cell::active());
        }
        for &pos in deaths {
            self.set(pos, Cell::inactive());
        }
    }
}

pub use grid::Grid;
mod grid;
