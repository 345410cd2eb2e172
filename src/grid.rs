use crate::types::{CellKind, ConfigError, ConsumeResult};

#[derive(Clone, Debug)]
pub struct GridMap {
    cells: Vec<Vec<CellKind>>,
    rows: i32,
    cols: i32,
    pellets_remaining: i32,
    pellet_score: i32,
    power_pellet_score: i32,
}

impl GridMap {
    pub fn from_layout(
        layout: &[String],
        pellet_score: i32,
        power_pellet_score: i32,
    ) -> Result<Self, ConfigError> {
        if layout.is_empty() || layout[0].is_empty() {
            return Err(ConfigError::EmptyLayout);
        }
        let expected = layout[0].chars().count();
        let mut cells = Vec::with_capacity(layout.len());
        let mut pellets_remaining = 0;
        for (row, line) in layout.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(ConfigError::LayoutRowWidth {
                    row,
                    expected,
                    found,
                });
            }
            let mut cell_row = Vec::with_capacity(expected);
            for (col, tile) in line.chars().enumerate() {
                let kind =
                    CellKind::parse_tile(tile).ok_or(ConfigError::UnknownTile { row, col, tile })?;
                if matches!(kind, CellKind::Pellet | CellKind::PowerPellet) {
                    pellets_remaining += 1;
                }
                cell_row.push(kind);
            }
            cells.push(cell_row);
        }

        // The border must be closed except on the corridor row, whose open
        // ends stay dead ends via the fail-closed bounds check.
        let rows = cells.len();
        let cols = expected;
        let corridor_row = rows / 2;
        for (row, cell_row) in cells.iter().enumerate() {
            for (col, kind) in cell_row.iter().enumerate() {
                let on_border = row == 0 || row == rows - 1 || col == 0 || col == cols - 1;
                if on_border && *kind != CellKind::Wall && row != corridor_row {
                    return Err(ConfigError::OpenBorder { row, col });
                }
            }
        }

        Ok(Self {
            cells,
            rows: rows as i32,
            cols: cols as i32,
            pellets_remaining,
            pellet_score,
            power_pellet_score,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn is_walkable(&self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 || row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells[row as usize][col as usize] != CellKind::Wall
    }

    /// Out-of-bounds cells read as walls, mirroring `is_walkable`.
    pub fn cell_kind(&self, row: i32, col: i32) -> CellKind {
        if row < 0 || col < 0 || row >= self.rows || col >= self.cols {
            return CellKind::Wall;
        }
        self.cells[row as usize][col as usize]
    }

    pub fn consume(&mut self, row: i32, col: i32) -> ConsumeResult {
        let kind = self.cell_kind(row, col);
        match kind {
            CellKind::Pellet => {
                self.cells[row as usize][col as usize] = CellKind::Empty;
                self.pellets_remaining -= 1;
                ConsumeResult {
                    kind,
                    score_delta: self.pellet_score,
                    triggers_power: false,
                }
            }
            CellKind::PowerPellet => {
                self.cells[row as usize][col as usize] = CellKind::Empty;
                self.pellets_remaining -= 1;
                ConsumeResult {
                    kind,
                    score_delta: self.power_pellet_score,
                    triggers_power: true,
                }
            }
            _ => ConsumeResult {
                kind,
                score_delta: 0,
                triggers_power: false,
            },
        }
    }

    pub fn pellets_remaining(&self) -> i32 {
        self.pellets_remaining
    }

    pub fn pellet_tiles(&self) -> Vec<(i32, i32)> {
        let mut tiles = Vec::new();
        for (row, cell_row) in self.cells.iter().enumerate() {
            for (col, kind) in cell_row.iter().enumerate() {
                if matches!(kind, CellKind::Pellet | CellKind::PowerPellet) {
                    tiles.push((row as i32, col as i32));
                }
            }
        }
        tiles
    }

    pub fn render_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell_row| cell_row.iter().map(|kind| kind.as_tile()).collect())
            .collect()
    }
}
