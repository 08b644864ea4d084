#![forbid(unsafe_code)]

//! Resting positions and sets of them.
//!
//! A panel rests in one of three discrete [`Position`]s, ranked by openness:
//! `Full` is the topmost, most open position and `Tip` the most closed. A
//! deployment supports a subset of them, modelled as a [`PositionSet`].

use std::fmt;

use bitflags::bitflags;

/// A resting position of the panel.
///
/// Ordered by openness rank: `Full < Half < Tip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Position {
    /// Fully open.
    Full,
    /// Partially open.
    Half,
    /// Only a sliver visible.
    Tip,
}

impl Position {
    /// All positions, most open first.
    pub const ALL: [Position; 3] = [Position::Full, Position::Half, Position::Tip];

    /// Name used in logs and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Half => "half",
            Self::Tip => "tip",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// A set of supported positions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PositionSet: u8 {
        const FULL = 1 << 0;
        const HALF = 1 << 1;
        const TIP = 1 << 2;
    }
}

impl PositionSet {
    /// The singleton set containing `position`.
    #[inline]
    #[must_use]
    pub const fn of(position: Position) -> Self {
        match position {
            Position::Full => Self::FULL,
            Position::Half => Self::HALF,
            Position::Tip => Self::TIP,
        }
    }

    /// Whether `position` is a member.
    #[inline]
    #[must_use]
    pub const fn has(self, position: Position) -> bool {
        self.contains(Self::of(position))
    }

    /// Number of members.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Members, most open first.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        Position::ALL.into_iter().filter(move |p| self.has(*p))
    }

    /// The most open member.
    #[must_use]
    pub fn most_open(self) -> Option<Position> {
        self.positions().next()
    }

    /// The most closed member.
    #[must_use]
    pub fn most_closed(self) -> Option<Position> {
        self.positions().last()
    }
}

impl From<Position> for PositionSet {
    fn from(position: Position) -> Self {
        Self::of(position)
    }
}

impl FromIterator<Position> for PositionSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, p| set | Self::of(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_openness() {
        assert!(Position::Full < Position::Half);
        assert!(Position::Half < Position::Tip);
        assert_eq!(Position::ALL.iter().max(), Some(&Position::Tip));
    }

    #[test]
    fn set_iterates_most_open_first() {
        let set: PositionSet = [Position::Tip, Position::Full].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.positions().collect::<Vec<_>>(), vec![Position::Full, Position::Tip]);
        assert_eq!(set.most_open(), Some(Position::Full));
        assert_eq!(set.most_closed(), Some(Position::Tip));
        assert!(!set.has(Position::Half));
    }

    #[test]
    fn empty_set_has_no_extremes() {
        let set = PositionSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.most_open(), None);
        assert_eq!(set.most_closed(), None);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Position::Half.to_string(), "half");
    }
}
