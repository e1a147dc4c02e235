use std::fs;
use std::path::Path;

use thiserror::Error;

/// Timed modifier granted by a collectible cell
///
/// `None` is a plain dot: it counts toward clearing the maze but grants no
/// modifier when eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    SpeedBoost,
    Invulnerability,
}

/// A single occupied cell of the maze
///
/// Unoccupied cells are represented as `None` in the grid, so `Cell` only
/// covers the two kinds the simulation cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Collectible(Effect),
}

/// Errors produced while loading a maze description
///
/// Any of these is fatal at startup; the simulation never starts on a bad map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("map row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Fixed-size grid of maze cells
///
/// The grid never grows after parsing. Spatial queries outside the grid
/// resolve to safe defaults rather than errors; the movement code leans on
/// that when clamping entities at the edges.
#[derive(Debug)]
pub struct TileMap {
    cells: Vec<Vec<Option<Cell>>>,
    size: usize,
}

impl TileMap {
    /// Reads and parses a maze description from disk.
    pub fn load(path: impl AsRef<Path>, size: usize) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, size)
    }

    /// Parses a rectangular character grid into a `size` x `size` map.
    ///
    /// `#` is a wall, `.` a plain dot, `^` a speed boost, `&` an
    /// invulnerability pickup; every other character leaves the cell empty.
    /// All rows must share one width. Rows and columns beyond `size` are
    /// dropped without growing the grid.
    pub fn parse(text: &str, size: usize) -> Result<Self, MapError> {
        let mut cells = vec![vec![None; size]; size];
        let mut expected_width = None;

        for (y, line) in text.lines().enumerate() {
            let width = line.chars().count();
            let expected = *expected_width.get_or_insert(width);
            if width != expected {
                return Err(MapError::RaggedRow {
                    row: y,
                    found: width,
                    expected,
                });
            }
            if y >= size {
                continue;
            }
            for (x, c) in line.chars().enumerate() {
                if x >= size {
                    break;
                }
                cells[y][x] = match c {
                    '#' => Some(Cell::Wall),
                    '.' => Some(Cell::Collectible(Effect::None)),
                    '^' => Some(Cell::Collectible(Effect::SpeedBoost)),
                    '&' => Some(Cell::Collectible(Effect::Invulnerability)),
                    _ => None,
                };
            }
        }

        Ok(TileMap { cells, size })
    }

    /// Cells per side of the square grid.
    pub fn size(&self) -> usize {
        self.size
    }

    fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.size as i32 || y >= self.size as i32 {
            return None;
        }
        self.cells[y as usize][x as usize]
    }

    /// Returns true iff the cell at the grid coordinate is a wall.
    ///
    /// Out-of-bounds coordinates are not walls.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        matches!(self.cell(x, y), Some(Cell::Wall))
    }

    /// Returns the effect of a collectible cell, or `None` for walls, empty
    /// cells, and out-of-bounds coordinates.
    pub fn collectible_at(&self, x: i32, y: i32) -> Option<Effect> {
        match self.cell(x, y) {
            Some(Cell::Collectible(effect)) => Some(effect),
            _ => None,
        }
    }

    /// Clears the cell at the grid coordinate.
    ///
    /// No-op when the cell is already empty or out of bounds. A removed
    /// collectible never respawns for the rest of the session.
    pub fn remove(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.size as i32 || y >= self.size as i32 {
            return;
        }
        self.cells[y as usize][x as usize] = None;
    }

    /// Count of collectible cells still on the map.
    pub fn remaining_collectibles(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, Some(Cell::Collectible(_))))
            .count()
    }

    /// Occupied cells in row-major order, for the renderer.
    pub fn cells_for_render(&self) -> impl Iterator<Item = ((i32, i32), Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.map(|c| ((x as i32, y as i32), c)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_map() -> TileMap {
        TileMap::parse("#.^\n&# \n...", 3).unwrap()
    }

    #[test]
    fn test_parse_character_mapping() {
        let map = small_map();
        assert!(map.is_wall(0, 0));
        assert_eq!(map.collectible_at(1, 0), Some(Effect::None));
        assert_eq!(map.collectible_at(2, 0), Some(Effect::SpeedBoost));
        assert_eq!(map.collectible_at(0, 1), Some(Effect::Invulnerability));
        assert!(map.is_wall(1, 1));
        // Space parses to an empty cell
        assert!(!map.is_wall(2, 1));
        assert_eq!(map.collectible_at(2, 1), None);
    }

    #[test]
    fn test_out_of_bounds_queries_are_safe_defaults() {
        let map = small_map();
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (100, 100), (-5, -5)] {
            assert!(!map.is_wall(x, y), "({x}, {y}) must not be a wall");
            assert_eq!(map.collectible_at(x, y), None);
        }
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = TileMap::parse("###\n##\n###", 3).unwrap_err();
        match err {
            MapError::RaggedRow {
                row,
                found,
                expected,
            } => {
                assert_eq!(row, 1);
                assert_eq!(found, 2);
                assert_eq!(expected, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_oversized_source_is_truncated_silently() {
        // 4x4 source onto a 2x2 grid: the extra rows and columns vanish
        let map = TileMap::parse("##..\n....\n####\n####", 2).unwrap();
        assert_eq!(map.size(), 2);
        assert!(map.is_wall(0, 0));
        assert!(map.is_wall(1, 0));
        assert_eq!(map.collectible_at(0, 1), Some(Effect::None));
        assert!(!map.is_wall(2, 2));
        assert!(!map.is_wall(3, 3));
    }

    #[test]
    fn test_remove_is_idempotent_and_permanent() {
        let mut map = small_map();
        assert_eq!(map.collectible_at(1, 0), Some(Effect::None));
        map.remove(1, 0);
        assert_eq!(map.collectible_at(1, 0), None);
        // Removing again, or removing an empty/out-of-bounds cell, is a no-op
        map.remove(1, 0);
        map.remove(2, 1);
        map.remove(-1, 7);
        assert_eq!(map.collectible_at(1, 0), None);
    }

    #[test]
    fn test_remaining_collectibles_tracks_removal() {
        let mut map = small_map();
        // ".", "^", "&" and three "." on the last row
        assert_eq!(map.remaining_collectibles(), 6);
        map.remove(1, 0);
        map.remove(0, 2);
        assert_eq!(map.remaining_collectibles(), 4);
    }

    #[test]
    fn test_cells_for_render_row_major_and_occupied_only() {
        let map = TileMap::parse("#.\n &", 2).unwrap();
        let cells: Vec<_> = map.cells_for_render().collect();
        assert_eq!(
            cells,
            vec![
                ((0, 0), Cell::Wall),
                ((1, 0), Cell::Collectible(Effect::None)),
                ((1, 1), Cell::Collectible(Effect::Invulnerability)),
            ]
        );
    }
}
