//! Cardinal facings and discrete 90-degree turns.
//!
//! A [`Facing`] is the single orientation datum of a grid-locked actor: it
//! determines the cell stepped into, the cell attacked, and the yaw angle
//! the renderer interpolates toward. North/South move along the grid's Y
//! axis (decrement/increment), East/West along X (increment/decrement).

use std::f32::consts::FRAC_PI_2;
use std::fmt;

use crate::geom::Point;

/// One of the four cardinal directions, encoded 0..=3 clockwise from North.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

/// A discrete 90-degree turn direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnDir {
    Left,
    Right,
}

impl Facing {
    /// All four facings in encoding order.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// The integer encoding (0..=3, clockwise from North).
    #[inline]
    pub const fn index(self) -> i32 {
        match self {
            Facing::North => 0,
            Facing::East => 1,
            Facing::South => 2,
            Facing::West => 3,
        }
    }

    /// Facing from an integer encoding, wrapping modulo 4.
    #[inline]
    pub const fn from_index(i: i32) -> Self {
        match i.rem_euclid(4) {
            0 => Facing::North,
            1 => Facing::East,
            2 => Facing::South,
            _ => Facing::West,
        }
    }

    /// The grid-cell delta of one step in this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Facing::North => Point::new(0, -1),
            Facing::East => Point::new(1, 0),
            Facing::South => Point::new(0, 1),
            Facing::West => Point::new(-1, 0),
        }
    }

    /// The facing 180 degrees away.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The facing after a single 90-degree turn.
    #[inline]
    pub const fn turned(self, dir: TurnDir) -> Self {
        match dir {
            TurnDir::Left => Self::from_index(self.index() - 1),
            TurnDir::Right => Self::from_index(self.index() + 1),
        }
    }

    /// The facing along the X axis toward a signed offset.
    /// Returns `None` for a zero offset.
    #[inline]
    pub const fn along_x(dx: i32) -> Option<Self> {
        match dx {
            0 => None,
            d if d > 0 => Some(Facing::East),
            _ => Some(Facing::West),
        }
    }

    /// The facing along the Y axis toward a signed offset.
    /// Returns `None` for a zero offset.
    #[inline]
    pub const fn along_y(dy: i32) -> Option<Self> {
        match dy {
            0 => None,
            d if d > 0 => Some(Facing::South),
            _ => Some(Facing::North),
        }
    }

    /// Yaw angle in radians for the renderer.
    ///
    /// North is 0 (looking down world −Z); positive yaw turns clockwise, so
    /// East is π/2, South π, West 3π/2. Interpolation between yaws must go
    /// through [`wrap_angle`](crate::ease::wrap_angle) to take the shortest
    /// arc.
    #[inline]
    pub fn yaw(self) -> f32 {
        self.index() as f32 * FRAC_PI_2
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Facing::North => "north",
            Facing::East => "east",
            Facing::South => "south",
            Facing::West => "west",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_right_turns_are_identity() {
        for f in Facing::ALL {
            let mut g = f;
            for _ in 0..4 {
                g = g.turned(TurnDir::Right);
            }
            assert_eq!(g, f);
        }
    }

    #[test]
    fn four_left_turns_are_identity() {
        for f in Facing::ALL {
            let mut g = f;
            for _ in 0..4 {
                g = g.turned(TurnDir::Left);
            }
            assert_eq!(g, f);
        }
    }

    #[test]
    fn left_then_right_cancels() {
        for f in Facing::ALL {
            assert_eq!(f.turned(TurnDir::Left).turned(TurnDir::Right), f);
        }
    }

    #[test]
    fn opposite_is_involutive() {
        for f in Facing::ALL {
            assert_eq!(f.opposite().opposite(), f);
            assert_eq!(f.delta() + f.opposite().delta(), Point::ZERO);
        }
    }

    #[test]
    fn axis_helpers() {
        assert_eq!(Facing::along_x(3), Some(Facing::East));
        assert_eq!(Facing::along_x(-1), Some(Facing::West));
        assert_eq!(Facing::along_x(0), None);
        assert_eq!(Facing::along_y(2), Some(Facing::South));
        assert_eq!(Facing::along_y(-5), Some(Facing::North));
        assert_eq!(Facing::along_y(0), None);
    }

    #[test]
    fn index_roundtrip_wraps() {
        assert_eq!(Facing::from_index(-1), Facing::West);
        assert_eq!(Facing::from_index(4), Facing::North);
        for f in Facing::ALL {
            assert_eq!(Facing::from_index(f.index()), f);
        }
    }
}
