use itertools::Itertools;

/// Keys typed by the left hand. Matching is case-sensitive, so lowercase
/// letters always classify as `Right`.
pub const LEFT_HAND_KEYS: &str = "QWERTASDFGZXCVB";

/// Hand region a character is typed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Direction {
    #[strum(serialize = "L")]
    Left,
    #[strum(serialize = "R")]
    Right,
    #[strum(serialize = "S")]
    Space,
}

impl Direction {
    pub fn classify(c: char) -> Self {
        if c == ' ' {
            Direction::Space
        } else if LEFT_HAND_KEYS.contains(c) {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

/// Direction transition between two consecutive characters, e.g. `LR`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum BigramClass {
    #[strum(serialize = "LL")]
    LeftLeft,
    #[strum(serialize = "LR")]
    LeftRight,
    #[strum(serialize = "LS")]
    LeftSpace,
    #[strum(serialize = "RL")]
    RightLeft,
    #[strum(serialize = "RR")]
    RightRight,
    #[strum(serialize = "RS")]
    RightSpace,
    #[strum(serialize = "SL")]
    SpaceLeft,
    #[strum(serialize = "SR")]
    SpaceRight,
    #[strum(serialize = "SS")]
    SpaceSpace,
}

impl BigramClass {
    pub const ALL: [BigramClass; 9] = [
        BigramClass::LeftLeft,
        BigramClass::LeftRight,
        BigramClass::LeftSpace,
        BigramClass::RightLeft,
        BigramClass::RightRight,
        BigramClass::RightSpace,
        BigramClass::SpaceLeft,
        BigramClass::SpaceRight,
        BigramClass::SpaceSpace,
    ];

    pub fn from_pair(first: Direction, second: Direction) -> Self {
        use Direction::*;
        match (first, second) {
            (Left, Left) => BigramClass::LeftLeft,
            (Left, Right) => BigramClass::LeftRight,
            (Left, Space) => BigramClass::LeftSpace,
            (Right, Left) => BigramClass::RightLeft,
            (Right, Right) => BigramClass::RightRight,
            (Right, Space) => BigramClass::RightSpace,
            (Space, Left) => BigramClass::SpaceLeft,
            (Space, Right) => BigramClass::SpaceRight,
            (Space, Space) => BigramClass::SpaceSpace,
        }
    }

    pub fn from_chars(first: char, second: char) -> Self {
        Self::from_pair(Direction::classify(first), Direction::classify(second))
    }
}

/// Classes of every adjacent character pair, `len - 1` entries for `len` chars
pub fn bigram_classes(chars: &[char]) -> Vec<BigramClass> {
    chars
        .iter()
        .tuple_windows()
        .map(|(&a, &b)| BigramClass::from_chars(a, b))
        .collect()
}
