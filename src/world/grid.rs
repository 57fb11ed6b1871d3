use crate::{
    error::{Result, WorldError},
    Cell, Pos, World,
};

/// dense world, one cell per position, rows indexed `[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// builds a `width` x `height` grid with exactly `actives` alive.
    ///
    /// duplicated positions collapse into a single living cell. a position
    /// outside of the grid rejects the whole construction.
    pub fn new(width: i32, height: i32, actives: impl IntoIterator<Item = Pos>) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }

        let row = vec![Cell::inactive(); width as usize];
        let mut grid = Self {
            width,
            height,
            cells: vec![row; height as usize],
        };

        for pos in actives {
            if !pos.is_within(width, height) {
                return Err(WorldError::OutOfRange { pos, width, height });
            }
            grid.set(pos, Cell::active());
        }

        Ok(grid)
    }

    fn cell(&self, pos: Pos) -> Option<&Cell> {
        let (x, y) = (usize::try_from(pos.x).ok()?, usize::try_from(pos.y).ok()?);
        self.cells.get(y)?.get(x)
    }

    fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        let (x, y) = (usize::try_from(pos.x).ok()?, usize::try_from(pos.y).ok()?);
        self.cells.get_mut(y)?.get_mut(x)
    }
}

impl World for Grid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn get(&self, pos: Pos) -> Cell {
        self.cell(pos).copied().unwrap_or_default()
    }

    fn set(&mut self, pos: Pos, cell: Cell) {
        if let Some(slot) = self.cell_mut(pos) {
            *slot = cell;
        }
    }
}
