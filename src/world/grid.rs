//! Static tile grid the caster walks through.
//!
//! * One cell ≙ `tile_size × tile_size` world units.
//! * Cell value `0` is open floor, anything else is a wall.
//! * Immutable after load; every index outside the grid reads as a wall.
//!
//! The loader insists on a solid border ring so the DDA walk can never leave
//! the map through an open edge.

use glam::{IVec2, Vec2};
use thiserror::Error;

/// Raw cell value as stored in the grid.
pub type Cell = u8;

pub const OPEN: Cell = 0;
pub const WALL: Cell = 1;

/// Things that can go wrong while building a [`GridMap`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MapError {
    /// Zero width or height.
    #[error("map has no cells")]
    Empty,

    /// `cells.len()` disagrees with `width * height`.
    #[error("map claims {width}x{height} but holds {found} cells")]
    SizeMismatch {
        width: usize,
        height: usize,
        found: usize,
    },

    /// A row of a row-major map is shorter/longer than the first one.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Character in an ASCII map that is neither wall nor floor.
    #[error("unknown tile `{tile}` at line {line}, column {col}")]
    BadTile { tile: char, line: usize, col: usize },

    /// Tile size must be a finite, positive number of world units.
    #[error("tile size must be finite and > 0")]
    BadTileSize,

    /// The outer ring has an open cell; rays would walk off the map.
    #[error("border cell ({x}, {y}) is open; the map must be enclosed by walls")]
    OpenBorder { x: usize, y: usize },
}

/// Runtime snapshot of one grid map (immutable after load).
#[derive(Clone, Debug)]
pub struct GridMap {
    width: usize,
    height: usize,
    tile_size: f32,
    cells: Vec<Cell>, // row-major, y * width + x
}

impl GridMap {
    /*──────────────────────── constructors ────────────────────────*/

    /// Build a map from a row-major cell vector.
    ///
    /// Fails unless the dimensions match, `tile_size` is usable and every
    /// border cell is a wall.
    pub fn new(
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        tile_size: f32,
    ) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        if cells.len() != width * height {
            return Err(MapError::SizeMismatch {
                width,
                height,
                found: cells.len(),
            });
        }
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(MapError::BadTileSize);
        }

        let map = Self {
            width,
            height,
            tile_size,
            cells,
        };
        map.check_border()?;
        Ok(map)
    }

    /// Build from nested rows, e.g. a compiled-in `[[u8; W]; H]` table.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R], tile_size: f32) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(width * height);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }
        Self::new(width, height, cells, tile_size)
    }

    /// Parse the ASCII form: one row per line, `#`/`1` = wall,
    /// `.`/`0`/space = open.  Blank lines are skipped.
    pub fn parse(text: &str, tile_size: f32) -> Result<Self, MapError> {
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .chars()
                .enumerate()
                .map(|(col, ch)| match ch {
                    '#' | '1' => Ok(WALL),
                    '.' | '0' | ' ' => Ok(OPEN),
                    _ => Err(MapError::BadTile {
                        tile: ch,
                        line: line_no + 1,
                        col: col + 1,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows, tile_size)
    }

    fn check_border(&self) -> Result<(), MapError> {
        let (w, h) = (self.width, self.height);
        let ring = (0..w)
            .flat_map(|x| [(x, 0), (x, h - 1)])
            .chain((0..h).flat_map(|y| [(0, y), (w - 1, y)]));
        for (x, y) in ring {
            if self.cells[y * w + x] == OPEN {
                return Err(MapError::OpenBorder { x, y });
            }
        }
        Ok(())
    }

    /*──────────────────────── queries ─────────────────────────────*/

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// World units per cell edge.
    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Size of the whole map in world units.
    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.tile_size
    }

    /// Cell value, or `None` outside the grid.
    #[inline]
    pub fn cell(&self, cx: i32, cy: i32) -> Option<Cell> {
        if cx < 0 || cy < 0 || cx as usize >= self.width || cy as usize >= self.height {
            return None;
        }
        Some(self.cells[cy as usize * self.width + cx as usize])
    }

    /// Integer-index wall test.  Out of bounds counts as wall.
    #[inline]
    pub fn cell_is_wall(&self, cx: i32, cy: i32) -> bool {
        self.cell(cx, cy).is_none_or(|c| c != OPEN)
    }

    /// Cell containing world point `p` (floor division by the tile size).
    #[inline]
    pub fn world_to_cell(&self, p: Vec2) -> IVec2 {
        (p / self.tile_size).floor().as_ivec2()
    }

    /// `true` if world point `(x, y)` lies in a wall or off the map.
    #[inline]
    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        let c = self.world_to_cell(Vec2::new(x, y));
        self.cell_is_wall(c.x, c.y)
    }

    /// Every cell as `(cx, cy, value)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (i % self.width, i / self.width, c))
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
#####
#...#
#.#.#
#...#
#####
";

    fn room() -> GridMap {
        GridMap::parse(ROOM, 64.0).unwrap()
    }

    #[test]
    fn open_interior_points_are_not_walls() {
        let map = room();
        for (cx, cy, v) in map.cells() {
            if v != OPEN {
                continue;
            }
            // centre and a point just inside each corner of the cell
            let base = Vec2::new(cx as f32, cy as f32) * 64.0;
            for off in [
                Vec2::splat(32.0),
                Vec2::splat(0.5),
                Vec2::new(63.5, 0.5),
                Vec2::new(0.5, 63.5),
                Vec2::splat(63.5),
            ] {
                let p = base + off;
                assert!(!map.is_wall(p.x, p.y), "({}, {}) should be open", p.x, p.y);
            }
        }
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let map = room();
        assert!(map.is_wall(-0.01, 100.0));
        assert!(map.is_wall(100.0, -0.01));
        assert!(map.is_wall(5.0 * 64.0, 100.0));
        assert!(map.is_wall(100.0, 5.0 * 64.0));
        assert!(map.is_wall(1.0e9, 1.0e9));
        assert!(map.cell_is_wall(-1, 2));
        assert!(map.cell_is_wall(2, 5));
        assert_eq!(map.cell(7, 7), None);
    }

    #[test]
    fn interior_pillar_is_wall() {
        let map = room();
        assert!(map.is_wall(2.5 * 64.0, 2.5 * 64.0));
        assert!(map.cell_is_wall(2, 2));
        assert_eq!(map.world_to_cell(Vec2::new(130.0, 191.9)), IVec2::new(2, 2));
    }

    #[test]
    fn open_border_rejected() {
        let err = GridMap::parse("###\n#..\n###\n", 1.0).unwrap_err();
        assert_eq!(err, MapError::OpenBorder { x: 2, y: 1 });

        let err = GridMap::parse("#.#\n#.#\n###\n", 1.0).unwrap_err();
        assert_eq!(err, MapError::OpenBorder { x: 1, y: 0 });
    }

    #[test]
    fn malformed_maps_rejected() {
        assert_eq!(GridMap::parse("", 1.0).unwrap_err(), MapError::Empty);
        assert_eq!(
            GridMap::parse("###\n##\n###\n", 1.0).unwrap_err(),
            MapError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            GridMap::parse("###\n#x#\n###\n", 1.0).unwrap_err(),
            MapError::BadTile {
                tile: 'x',
                line: 2,
                col: 2
            }
        );
        assert_eq!(
            GridMap::new(2, 2, vec![1; 3], 1.0).unwrap_err(),
            MapError::SizeMismatch {
                width: 2,
                height: 2,
                found: 3
            }
        );
        assert_eq!(
            GridMap::new(1, 1, vec![1], 0.0).unwrap_err(),
            MapError::BadTileSize
        );
    }

    #[test]
    fn from_rows_matches_parse() {
        let rows = [[1u8, 1, 1], [1, 0, 1], [1, 1, 1]];
        let a = GridMap::from_rows(&rows, 8.0).unwrap();
        let b = GridMap::parse("###\n#.#\n###", 8.0).unwrap();
        assert_eq!(a.cells().collect::<Vec<_>>(), b.cells().collect::<Vec<_>>());
        assert_eq!(a.world_size(), Vec2::new(24.0, 24.0));
    }
}
