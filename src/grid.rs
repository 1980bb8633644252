/// Fixed geometry of the grid: how many cells and how big each one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub width_cells: u32,
    pub height_cells: u32,
    pub cell_size: u32,
}

impl GridGeometry {
    pub const REFERENCE: GridGeometry = GridGeometry {
        width_cells: 20,
        height_cells: 20,
        cell_size: 20,
    };

    pub fn pixel_width(&self) -> u32 {
        self.width_cells * self.cell_size
    }

    pub fn pixel_height(&self) -> u32 {
        self.height_cells * self.cell_size
    }

    pub fn contains(&self, column: u32, row: u32) -> bool {
        column < self.width_cells && row < self.height_cells
    }

    pub fn cell_rect(&self, column: u32, row: u32) -> CellRect {
        CellRect {
            x: column * self.cell_size,
            y: row * self.cell_size,
            width: self.cell_size,
            height: self.cell_size,
        }
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Pixel rectangle covered by one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct GridState {
    geometry: GridGeometry,
    cells: Vec<bool>, // row-major, index = row * width + column
}

impl GridState {
    pub fn new(geometry: GridGeometry) -> Self {
        let cells = vec![false; (geometry.width_cells * geometry.height_cells) as usize];

        Self { geometry, cells }
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    fn index(&self, column: u32, row: u32) -> Option<usize> {
        if self.geometry.contains(column, row) {
            Some((row * self.geometry.width_cells + column) as usize)
        } else {
            None
        }
    }

    /// Sets the cell to `filled`. Out-of-range coordinates are ignored.
    pub fn toggle_cell(&mut self, column: u32, row: u32, filled: bool) {
        if let Some(index) = self.index(column, row) {
            self.cells[index] = filled;
        }
    }

    pub fn clear_all(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = false);
    }

    pub fn get_cell(&self, column: u32, row: u32) -> bool {
        self.index(column, row)
            .map(|index| self.cells[index])
            .unwrap_or(false)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Every in-range (column, row) pair, row-major.
    pub fn coordinates(&self) -> impl Iterator<Item = (u32, u32)> {
        let GridGeometry { width_cells, height_cells, .. } = self.geometry;
        (0..height_cells).flat_map(move |row| (0..width_cells).map(move |column| (column, row)))
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(GridGeometry::REFERENCE)
    }
}
