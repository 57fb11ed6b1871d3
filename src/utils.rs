use std::{
    collections::HashSet,
    fmt,
    ops::{Add, Sub},
};

use metrohash::MetroBuildHasher;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        Pos { x: $x, y: $y }
    };
}

/// set of positions, compared by coordinates.
pub type PosSet = HashSet<Pos, MetroBuildHasher>;

impl Pos {
    /// folds the position back onto a `width` x `height` torus.
    pub fn wrap(self, width: i32, height: i32) -> Self {
        pos!(wrap(self.x, width), wrap(self.y, height))
    }

    pub fn is_within(self, width: i32, height: i32) -> bool {
        (0..width).contains(&self.x) && (0..height).contains(&self.y)
    }
}

pub fn wrap(n: i32, len: i32) -> i32 {
    n.rem_euclid(len)
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        pos!(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[test]
fn test_wrap() {
    assert_eq!(wrap(-1, 10), 9);
    assert_eq!(wrap(0, 10), 0);
    assert_eq!(wrap(10, 10), 0);
    assert_eq!(wrap(11, 10), 1);
    assert_eq!(wrap(-1, 1), 0);
    assert_eq!(wrap(1, 1), 0);
}

#[test]
fn test_pos_wrap_corners() {
    assert_eq!(pos!(-1, -1).wrap(4, 3), pos!(3, 2));
    assert_eq!(pos!(4, 3).wrap(4, 3), pos!(0, 0));
    assert_eq!(pos!(2, 1).wrap(4, 3), pos!(2, 1));
}

#[test]
fn test_pos_is_within() {
    assert!(pos!(0, 0).is_within(1, 1));
    assert!(!pos!(1, 0).is_within(1, 1));
    assert!(!pos!(-1, 0).is_within(5, 5));
    assert!(pos!(4, 4).is_within(5, 5));
}
