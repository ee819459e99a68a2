use thiserror::Error;

use crate::types::CellKind;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell character '{ch}' at ({x}, {y})")]
    UnknownCell { ch: char, x: usize, y: usize },
}

/// Immutable maze layout plus the mutable consumable state of each cell.
/// Dimensions are fixed for the session; `consume` is the only mutation path.
#[derive(Clone, Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<CellKind>,
}

impl Grid {
    pub fn parse(rows: &[String]) -> Result<Self, LayoutError> {
        let Some(first) = rows.first() else {
            return Err(LayoutError::Empty);
        };
        let width = first.chars().count();
        if width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let kind = CellKind::from_char(ch).ok_or(LayoutError::UnknownCell { ch, x, y })?;
                cells.push(kind);
            }
        }

        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Out-of-bounds coordinates read as walls.
    pub fn cell(&self, x: i32, y: i32) -> CellKind {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return CellKind::Wall;
        }
        self.cells[(y * self.width + x) as usize]
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.cell(x, y) == CellKind::Wall
    }

    /// Empties a collectible cell and reports what was there. Returns `None`
    /// for anything that is not a consumable, so a cell can only ever be
    /// consumed once.
    pub fn consume(&mut self, x: i32, y: i32) -> Option<CellKind> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) as usize;
        let kind = self.cells[idx];
        if !kind.is_consumable() {
            return None;
        }
        self.cells[idx] = CellKind::Empty;
        Some(kind)
    }

    pub fn collectible_count(&self) -> i32 {
        self.cells.iter().filter(|kind| kind.is_consumable()).count() as i32
    }

    /// Layout rows in wire form, one string per row.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|kind| kind.to_char()).collect())
            .collect()
    }
}
