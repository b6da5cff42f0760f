use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix3, Vector3};

use crate::error::FlightAssistError;

// ---------------------------------------------------------------------------
// Block orientation conventions
// ---------------------------------------------------------------------------
//
// An orientation matrix holds a block's basis as columns expressed in the
// parent frame: column 0 = right, column 1 = up, column 2 = backward.
// Forward, left and down are the negated columns. A parent-frame vector is
// brought into the block frame with `m.transpose() * v`.

pub fn right(m: &Matrix3<f64>) -> Vector3<f64> {
    m.column(0).into_owned()
}

pub fn up(m: &Matrix3<f64>) -> Vector3<f64> {
    m.column(1).into_owned()
}

pub fn backward(m: &Matrix3<f64>) -> Vector3<f64> {
    m.column(2).into_owned()
}

pub fn left(m: &Matrix3<f64>) -> Vector3<f64> {
    -right(m)
}

pub fn down(m: &Matrix3<f64>) -> Vector3<f64> {
    -up(m)
}

pub fn forward(m: &Matrix3<f64>) -> Vector3<f64> {
    -backward(m)
}

/// Express a parent-frame vector in the frame described by `m`.
pub fn to_local(m: &Matrix3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    m.transpose() * v
}

/// One of the six block-relative base directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The unit vector this direction names within orientation `m`.
    pub fn of(self, m: &Matrix3<f64>) -> Vector3<f64> {
        match self {
            Direction::Forward => forward(m),
            Direction::Backward => backward(m),
            Direction::Left => left(m),
            Direction::Right => right(m),
            Direction::Up => up(m),
            Direction::Down => down(m),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl FromStr for Direction {
    type Err = FlightAssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Direction::ALL
            .into_iter()
            .find(|d| d.keyword() == lower)
            .ok_or(FlightAssistError::UnknownDirection(lower))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Gyroscope rotation axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    Pitch,
    Yaw,
    Roll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_basis() {
        let m = Matrix3::identity();
        assert_eq!(Direction::Right.of(&m), Vector3::x());
        assert_eq!(Direction::Up.of(&m), Vector3::y());
        assert_eq!(Direction::Backward.of(&m), Vector3::z());
        assert_eq!(Direction::Forward.of(&m), -Vector3::z());
        assert_eq!(Direction::Down.of(&m), -Vector3::y());
        assert_eq!(Direction::Left.of(&m), -Vector3::x());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Backward".parse::<Direction>().unwrap(), Direction::Backward);
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        for d in Direction::ALL {
            assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
        }
    }

    #[test]
    fn unknown_direction_is_an_error() {
        match "sideways".parse::<Direction>() {
            Err(FlightAssistError::UnknownDirection(s)) => assert_eq!(s, "sideways"),
            other => panic!("expected unknown direction, got {:?}", other),
        }
    }

    #[test]
    fn to_local_inverts_rotation() {
        // block rotated 90 deg about parent Y: its right points along parent -Z
        let m = Matrix3::from_columns(&[-Vector3::z(), Vector3::y(), Vector3::x()]);
        let local = to_local(&m, &-Vector3::z());
        assert!((local - Vector3::x()).norm() < 1e-12);
    }
}
