use std::fmt;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Neutral,
    Up,
}

impl Direction {
    /// Direction of travel from one floor to another. Equal floors count as down.
    pub fn between(from: u8, to: u8) -> Self {
        if from < to { Direction::Up } else { Direction::Down }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Neutral => Direction::Neutral,
        }
    }

    /// True when `target` lies strictly beyond `floor` when travelling in this direction.
    pub fn is_ahead(self, floor: u8, target: u8) -> bool {
        match self {
            Direction::Up => target > floor,
            Direction::Down => target < floor,
            Direction::Neutral => false,
        }
    }

    pub fn as_string(self) -> String {
        match self {
            Direction::Down => String::from("down"),
            Direction::Up => String::from("up"),
            Direction::Neutral => String::from("neutral"),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn between_prefers_down_for_equal_floors() {
        assert_eq!(Direction::between(2, 7), Direction::Up);
        assert_eq!(Direction::between(7, 2), Direction::Down);
        assert_eq!(Direction::between(4, 4), Direction::Down);
    }

    #[test]
    fn ahead_depends_on_direction() {
        assert!(Direction::Up.is_ahead(3, 4));
        assert!(!Direction::Up.is_ahead(3, 3));
        assert!(Direction::Down.is_ahead(3, 0));
        assert!(!Direction::Neutral.is_ahead(3, 9));
        assert_eq!(Direction::Up.opposite(), Direction::Down);
    }
}
