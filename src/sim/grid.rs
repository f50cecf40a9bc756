//! Room occupancy grid
//!
//! Cell (cx, cy) covers world space [cx, cx+1) × [cy, cy+1). Rows are indexed by y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    #[default]
    Floor,
}

/// Static wall/floor grid with explicit passage opening
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridMap {
    width: usize,
    height: usize,
    /// Row-major cells
    cells: Vec<Cell>,
    /// Cells flipped to floor by `open_passage`
    #[serde(default)]
    opened: Vec<(i32, i32)>,
}

impl GridMap {
    /// A fully enclosed room: border cells are walls, everything else floor
    pub fn enclosed(width: usize, height: usize) -> Self {
        let mut cells = vec![Cell::Floor; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    cells[y * width + x] = Cell::Wall;
                }
            }
        }
        Self {
            width,
            height,
            cells,
            opened: Vec::new(),
        }
    }

    /// Build from rows of 1 (wall) / 0 (floor). Short rows are padded with walls.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut cells = vec![Cell::Wall; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v == 0 {
                    cells[y * width + x] = Cell::Floor;
                }
            }
        }
        Self {
            width,
            height,
            cells,
            opened: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, cx: i32, cy: i32) -> Option<usize> {
        if cx < 0 || cy < 0 {
            return None;
        }
        let (x, y) = (cx as usize, cy as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Cell at integer coordinates, `None` outside the grid
    pub fn cell(&self, cx: i32, cy: i32) -> Option<Cell> {
        self.index(cx, cy).map(|i| self.cells[i])
    }

    /// Out-of-bounds counts as wall
    #[inline]
    pub fn is_wall(&self, cx: i32, cy: i32) -> bool {
        self.cell(cx, cy) != Some(Cell::Floor)
    }

    /// Wall test for the cell containing a world-space point
    #[inline]
    pub fn is_wall_at(&self, pos: Vec2) -> bool {
        self.is_wall(pos.x.floor() as i32, pos.y.floor() as i32)
    }

    /// Flip cells to floor. Out-of-bounds and already-open cells are ignored.
    pub fn open_passage(&mut self, cells: &[(i32, i32)]) {
        for &(cx, cy) in cells {
            let Some(i) = self.index(cx, cy) else {
                log::warn!("Passage cell ({}, {}) is outside the map", cx, cy);
                continue;
            };
            if self.cells[i] == Cell::Wall {
                self.cells[i] = Cell::Floor;
                self.opened.push((cx, cy));
            }
        }
    }

    /// Cells opened so far, in opening order
    pub fn opened_cells(&self) -> &[(i32, i32)] {
        &self.opened
    }

    /// All cells as (cx, cy, cell), row-major
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, &c)| {
            ((i % self.width) as i32, (i / self.width) as i32, c)
        })
    }
}

impl Default for GridMap {
    fn default() -> Self {
        Self::enclosed(crate::consts::MAP_WIDTH, crate::consts::MAP_HEIGHT)
    }
}
