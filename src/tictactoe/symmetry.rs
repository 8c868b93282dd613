//! D4 symmetry group operations on the 3x3 board

use serde::{Deserialize, Serialize};

use super::board::Cell;

/// D4 symmetry transformation (dihedral group of the square).
///
/// The mirror (column `c` becomes `2 - c`) is applied first, then the
/// clockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Clockwise quarter turns (0-3)
    pub quarter_turns: u8,
    /// Whether to mirror across the vertical axis before rotating
    pub mirror: bool,
}

impl D4Transform {
    /// Pure clockwise rotation by `quarter_turns` * 90 degrees
    pub const fn rotation(quarter_turns: u8) -> Self {
        D4Transform {
            quarter_turns: quarter_turns % 4,
            mirror: false,
        }
    }

    /// Mirror followed by `quarter_turns` clockwise rotations
    pub const fn mirrored(quarter_turns: u8) -> Self {
        D4Transform {
            quarter_turns: quarter_turns % 4,
            mirror: true,
        }
    }

    /// Get all 8 D4 transforms
    pub fn all() -> Vec<D4Transform> {
        (0..4)
            .flat_map(|n| [Self::rotation(n), Self::mirrored(n)])
            .collect()
    }

    /// Apply transform to a position (0-8)
    pub fn transform_position(&self, pos: usize) -> usize {
        let (mut row, mut col) = (pos / 3, pos % 3);

        if self.mirror {
            col = 2 - col;
        }

        for _ in 0..self.quarter_turns {
            let new_row = col;
            let new_col = 2 - row;
            row = new_row;
            col = new_col;
        }

        row * 3 + col
    }

    /// Apply transform to an array of cells
    pub fn apply_to_cells(&self, cells: &[Cell; 9]) -> [Cell; 9] {
        let mut transformed = [Cell::Empty; 9];
        for (idx, &cell) in cells.iter().enumerate() {
            transformed[self.transform_position(idx)] = cell;
        }
        transformed
    }
}
