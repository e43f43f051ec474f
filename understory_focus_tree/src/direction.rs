// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation directions, axes, and direction sets used for locks.

/// Direction of a directional focus move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward smaller `y`.
    Up,
    /// Toward larger `y`.
    Down,
    /// Toward smaller `x`.
    Left,
    /// Toward larger `x`.
    Right,
}

impl Direction {
    /// All four directions, in declaration order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The axis along which this direction travels.
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// The direction pointing the other way along the same axis.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether travel increases the coordinate along [`Direction::axis`].
    pub const fn is_increasing(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }
}

/// One of the two axes of the shared coordinate space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The `x` axis.
    Horizontal,
    /// The `y` axis.
    Vertical,
}

impl Axis {
    /// The other axis.
    pub const fn orthogonal(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

bitflags::bitflags! {
    /// A set of directions, used to express per-node locks.
    ///
    /// A node whose lock contains a direction forbids directional moves in
    /// that direction while the focused leaf is inside its subtree.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DirectionSet: u8 {
        /// [`Direction::Up`].
        const UP    = 0b0001;
        /// [`Direction::Down`].
        const DOWN  = 0b0010;
        /// [`Direction::Left`].
        const LEFT  = 0b0100;
        /// [`Direction::Right`].
        const RIGHT = 0b1000;
        /// Both horizontal directions.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Both vertical directions.
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
        /// Every direction: a focus trap.
        const ALL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl Default for DirectionSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl DirectionSet {
    /// Returns true if `direction` is in the set.
    pub const fn has(self, direction: Direction) -> bool {
        self.contains(Self::of(direction))
    }

    /// The single-direction set for `direction`.
    pub const fn of(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::UP,
            Direction::Down => Self::DOWN,
            Direction::Left => Self::LEFT,
            Direction::Right => Self::RIGHT,
        }
    }
}

impl From<Direction> for DirectionSet {
    fn from(direction: Direction) -> Self {
        Self::of(direction)
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, direction| set | Self::of(direction))
    }
}

impl<const N: usize> From<[Direction; N]> for DirectionSet {
    fn from(directions: [Direction; N]) -> Self {
        directions.into_iter().collect()
    }
}
