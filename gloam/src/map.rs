//! The dungeon map: authored tile data plus the grid/world mapping.
//!
//! Maps are parsed from ASCII art. Legend: `#` wall, `.` floor, `@` player
//! start, `>` exit ladder, `|`/`-` closed door (vertical/horizontal leaf),
//! `o` glow-worm perch. Every non-wall rune is floor terrain; doors and
//! perches are recorded as placements on top of it.

use std::fmt;

use crawl_core::{Facing, Grid, Point};
use glam::Vec3;

use crate::door::DoorOrientation;
use crate::terrain::{FLOOR, WALL, passable};

/// Side length of one grid cell in world units.
pub const CELL_SIZE: f32 = 2.0;

/// The built-in dungeon layout.
const DUNGEON: &str = include_str!("../data/dungeon.txt");

/// A door placement read from the map.
#[derive(Copy, Clone, Debug)]
pub struct DoorSpec {
    pub pos: Point,
    pub orientation: DoorOrientation,
}

/// Static walkability oracle over the tile grid, plus the authored
/// placements (start, ladder, doors, critter perches).
#[derive(Clone, Debug)]
pub struct DungeonMap {
    terrain: Grid,
    start: Point,
    start_facing: Facing,
    ladder: Point,
    doors: Vec<DoorSpec>,
    perches: Vec<Point>,
}

impl DungeonMap {
    /// Parse a map from its ASCII form.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let s = s.trim_matches('\n');
        let lines: Vec<&str> = s.lines().collect();
        let height = lines.len() as i32;
        let width = lines.first().map_or(0, |l| l.chars().count()) as i32;
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut terrain = Grid::new(width, height);
        let mut start = None;
        let mut ladder = None;
        let mut doors = Vec::new();
        let mut perches = Vec::new();

        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() as i32 != width {
                return Err(MapError::InconsistentWidth { line: y });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let cell = match ch {
                    '#' => WALL,
                    '.' => FLOOR,
                    '@' => {
                        if start.replace(pos).is_some() {
                            return Err(MapError::DuplicateStart);
                        }
                        FLOOR
                    }
                    '>' => {
                        if ladder.replace(pos).is_some() {
                            return Err(MapError::DuplicateLadder);
                        }
                        FLOOR
                    }
                    '|' => {
                        doors.push(DoorSpec {
                            pos,
                            orientation: DoorOrientation::Vertical,
                        });
                        FLOOR
                    }
                    '-' => {
                        doors.push(DoorSpec {
                            pos,
                            orientation: DoorOrientation::Horizontal,
                        });
                        FLOOR
                    }
                    'o' => {
                        perches.push(pos);
                        FLOOR
                    }
                    _ => return Err(MapError::UnknownRune { ch, pos }),
                };
                terrain.set(pos, cell);
            }
        }

        let start = start.ok_or(MapError::MissingStart)?;
        let ladder = ladder.ok_or(MapError::MissingLadder)?;

        // Face the player toward an adjacent open cell so the first thing
        // on screen is not a wall.
        let start_facing = Facing::ALL
            .into_iter()
            .find(|f| {
                let n = start + f.delta();
                terrain.at(n).is_some_and(passable)
            })
            .unwrap_or(Facing::South);

        Ok(Self {
            terrain,
            start,
            start_facing,
            ladder,
            doors,
            perches,
        })
    }

    /// The built-in dungeon.
    pub fn builtin() -> Self {
        Self::parse(DUNGEON).expect("built-in map is valid")
    }

    /// Whether a cell can be stepped onto: inside the map and not a wall.
    /// Out-of-bounds queries are simply unwalkable, never an error.
    pub fn is_walkable(&self, p: Point) -> bool {
        self.terrain.at(p).is_some_and(passable)
    }

    /// Whether a cell lies inside the map bounds.
    pub fn in_bounds(&self, p: Point) -> bool {
        self.terrain.contains(p)
    }

    pub fn width(&self) -> i32 {
        self.terrain.width()
    }

    pub fn height(&self) -> i32 {
        self.terrain.height()
    }

    /// The tile grid.
    pub fn terrain(&self) -> &Grid {
        &self.terrain
    }

    /// The player's starting cell.
    pub fn start(&self) -> Point {
        self.start
    }

    /// The player's starting facing.
    pub fn start_facing(&self) -> Facing {
        self.start_facing
    }

    /// The exit ladder cell. Entering it wins the game.
    pub fn ladder(&self) -> Point {
        self.ladder
    }

    /// Door placements.
    pub fn doors(&self) -> &[DoorSpec] {
        &self.doors
    }

    /// Glow-worm perches.
    pub fn perches(&self) -> &[Point] {
        &self.perches
    }
}

// ---------------------------------------------------------------------------
// Grid/world mapping
// ---------------------------------------------------------------------------

/// World-space position of a cell's center, on the floor plane.
pub fn grid_to_world(p: Point) -> Vec3 {
    Vec3::new(
        (p.x as f32 + 0.5) * CELL_SIZE,
        0.0,
        (p.y as f32 + 0.5) * CELL_SIZE,
    )
}

/// Grid cell containing a world-space position.
pub fn world_to_grid(v: Vec3) -> Point {
    Point::new(
        (v.x / CELL_SIZE).floor() as i32,
        (v.z / CELL_SIZE).floor() as i32,
    )
}

// ---------------------------------------------------------------------------
// MapError
// ---------------------------------------------------------------------------

/// Errors raised while parsing a map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapError {
    Empty,
    InconsistentWidth { line: usize },
    UnknownRune { ch: char, pos: Point },
    MissingStart,
    DuplicateStart,
    MissingLadder,
    DuplicateLadder,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Empty => write!(f, "map is empty"),
            MapError::InconsistentWidth { line } => {
                write!(f, "line {line} has a different width than the first line")
            }
            MapError::UnknownRune { ch, pos } => {
                write!(f, "unknown map rune {ch:?} at {pos}")
            }
            MapError::MissingStart => write!(f, "map has no player start (@)"),
            MapError::DuplicateStart => write!(f, "map has more than one player start (@)"),
            MapError::MissingLadder => write!(f, "map has no exit ladder (>)"),
            MapError::DuplicateLadder => write!(f, "map has more than one exit ladder (>)"),
        }
    }
}

impl std::error::Error for MapError {}
