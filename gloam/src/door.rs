//! Doors: binary open/closed obstacles overlaid on floor cells.
//!
//! A door cell is always floor in the terrain grid; whether it can be
//! entered is decided here. Doors are toggled only by explicit player
//! interaction with the single cell the player faces.

use crawl_core::Point;

use crate::map::DoorSpec;

/// Which way the door leaf is oriented, for the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DoorOrientation {
    /// Passage runs east-west; the leaf spans the cell north-south.
    Vertical,
    /// Passage runs north-south; the leaf spans the cell east-west.
    Horizontal,
}

/// A single door.
#[derive(Clone, Debug)]
pub struct Door {
    pub pos: Point,
    pub orientation: DoorOrientation,
    pub open: bool,
}

/// All doors of the current dungeon, keyed by grid cell.
#[derive(Clone, Debug, Default)]
pub struct DoorSet {
    doors: Vec<Door>,
}

impl DoorSet {
    /// Build the door set from map placements. Doors start closed.
    pub fn from_specs(specs: &[DoorSpec]) -> Self {
        Self {
            doors: specs
                .iter()
                .map(|s| Door {
                    pos: s.pos,
                    orientation: s.orientation,
                    open: false,
                })
                .collect(),
        }
    }

    /// The door at a cell, if any.
    pub fn door_at(&self, p: Point) -> Option<&Door> {
        self.doors.iter().find(|d| d.pos == p)
    }

    /// Whether a closed door blocks the cell.
    pub fn is_blocking(&self, p: Point) -> bool {
        self.door_at(p).is_some_and(|d| !d.open)
    }

    /// Flip the door at a cell. Returns the new open state, or `None`
    /// if there is no door there.
    pub fn toggle(&mut self, p: Point) -> Option<bool> {
        let door = self.doors.iter_mut().find(|d| d.pos == p)?;
        door.open = !door.open;
        Some(door.open)
    }

    /// Iterate all doors.
    pub fn iter(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with_door(p: Point) -> DoorSet {
        DoorSet::from_specs(&[DoorSpec {
            pos: p,
            orientation: DoorOrientation::Vertical,
        }])
    }

    #[test]
    fn closed_door_blocks() {
        let p = Point::new(3, 4);
        let doors = set_with_door(p);
        assert!(doors.is_blocking(p));
        assert!(!doors.is_blocking(Point::new(0, 0)));
    }

    #[test]
    fn toggle_opens_and_closes() {
        let p = Point::new(3, 4);
        let mut doors = set_with_door(p);
        assert_eq!(doors.toggle(p), Some(true));
        assert!(!doors.is_blocking(p));
        assert_eq!(doors.toggle(p), Some(false));
        assert!(doors.is_blocking(p));
    }

    #[test]
    fn toggle_without_door_is_noop() {
        let mut doors = set_with_door(Point::new(3, 4));
        assert_eq!(doors.toggle(Point::new(1, 1)), None);
    }
}
