/// the five legal unit moves. cardinals offset one cell on the torus;
/// Still stays put, which is where mining happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Still,
}

impl Direction {
    pub const fn all() -> &'static [Self] {
        &[Self::Still, Self::North, Self::South, Self::East, Self::West]
    }
    pub const fn cardinals() -> &'static [Self] {
        &[Self::North, Self::South, Self::East, Self::West]
    }
    pub const fn invert(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Still => Self::Still,
        }
    }
    pub const fn offset(&self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::Still => (0, 0),
        }
    }
}

/// wire characters of the engine protocol
impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::North => write!(f, "N"),
            Self::South => write!(f, "S"),
            Self::East => write!(f, "E"),
            Self::West => write!(f, "W"),
            Self::Still => write!(f, "O"),
        }
    }
}

impl crate::Arbitrary for Direction {
    fn random() -> Self {
        use rand::Rng;
        match rand::rng().random_range(0..5) {
            0 => Self::North,
            1 => Self::South,
            2 => Self::East,
            3 => Self::West,
            _ => Self::Still,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inversion_is_involutive() {
        for direction in Direction::all() {
            assert!(direction.invert().invert() == *direction);
        }
    }

    #[test]
    fn inverted_offsets_cancel() {
        for direction in Direction::all() {
            let (dx, dy) = direction.offset();
            let (ix, iy) = direction.invert().offset();
            assert!(dx + ix == 0);
            assert!(dy + iy == 0);
        }
    }

    #[test]
    fn still_is_not_a_cardinal() {
        assert!(Direction::cardinals().len() == 4);
        assert!(!Direction::cardinals().contains(&Direction::Still));
        assert!(Direction::all().len() == 5);
    }
}
