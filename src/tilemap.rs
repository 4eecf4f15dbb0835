//! Static wall/floor grid the arena is built on.
use std::fs;
use std::path::Path;

use crate::config::TILE_SIZE;

/// The arena shipped with the game.
pub const DEFAULT_MAP: [&str; 8] = [
    "WW      WW",
    "W        W",
    "          ",
    "          ",
    "          ",
    "          ",
    "W        W",
    "WW      WW",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
}

impl Tile {
    fn from_char(c: char) -> Self {
        if c == 'W' { Tile::Wall } else { Tile::Floor }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("map row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
}

/// Rectangular grid of tiles, immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl Default for TileMap {
    fn default() -> Self {
        Self::parse(DEFAULT_MAP).expect("built-in map is rectangular")
    }
}

impl TileMap {
    /// Builds a map from row strings; `'W'` is a wall, anything else floor.
    pub fn parse<I, S>(rows: I) -> Result<Self, MapError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tiles = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (row, line) in rows.into_iter().enumerate() {
            let cells: Vec<Tile> = line.as_ref().chars().map(Tile::from_char).collect();
            let expected = *width.get_or_insert(cells.len());
            if cells.len() != expected {
                return Err(MapError::Ragged {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
            tiles.extend(cells);
            height += 1;
        }

        match width {
            Some(width) if width > 0 => Ok(Self {
                tiles,
                width,
                height,
            }),
            _ => Err(MapError::Empty),
        }
    }

    /// Loads a map file with one row per line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        Self::parse(text.lines())
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * TILE_SIZE
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<Tile> {
        if col < self.width && row < self.height {
            Some(self.tiles[row * self.width + col])
        } else {
            None
        }
    }

    /// Whether the world point lies in a wall. Everything outside the grid is wall.
    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        let col = (x / TILE_SIZE).floor();
        let row = (y / TILE_SIZE).floor();
        if col < 0.0 || row < 0.0 {
            return true;
        }
        self.cell(col as usize, row as usize)
            .is_none_or(|tile| tile == Tile::Wall)
    }
}
