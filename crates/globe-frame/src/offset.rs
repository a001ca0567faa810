use std::fmt;

use crate::FrameError;

/// Which horizontal copy of the projected world an operation applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Offset {
    Left,
    #[default]
    Center,
    Right,
}

impl Offset {
    /// Fixed evaluation order for terrain generation and every render pass.
    pub const ORDER: [Offset; 3] = [Offset::Center, Offset::Right, Offset::Left];

    pub const fn as_i32(self) -> i32 {
        match self {
            Offset::Left => -1,
            Offset::Center => 0,
            Offset::Right => 1,
        }
    }

    /// Dense index in `0..3`, left to right.
    pub const fn index(self) -> usize {
        (self.as_i32() + 1) as usize
    }
}

impl TryFrom<i32> for Offset {
    type Error = FrameError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Offset::Left),
            0 => Ok(Offset::Center),
            1 => Ok(Offset::Right),
            other => Err(FrameError::InvalidOffset(other)),
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_center_right_left() {
        let values: Vec<i32> = Offset::ORDER.iter().map(|o| o.as_i32()).collect();
        assert_eq!(values, vec![0, 1, -1]);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(Offset::try_from(-1).unwrap(), Offset::Left);
        assert_eq!(Offset::try_from(1).unwrap(), Offset::Right);
        assert!(matches!(Offset::try_from(2), Err(FrameError::InvalidOffset(2))));
    }

    #[test]
    fn test_index_is_dense() {
        let mut seen = [false; 3];
        for o in Offset::ORDER {
            seen[o.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(Offset::Left.index(), 0);
    }

    #[test]
    fn test_display_signed() {
        assert_eq!(Offset::Left.to_string(), "-1");
        assert_eq!(Offset::Center.to_string(), "+0");
        assert_eq!(Offset::Right.to_string(), "+1");
    }
}
