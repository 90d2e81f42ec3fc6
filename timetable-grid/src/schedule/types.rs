use std::fmt;
use serde::{Serialize, Deserialize};

/// One (day, period) cell of the weekly grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotCoordinate {
    pub day: u8,
    pub period: u8,
}

impl SlotCoordinate {
    pub const fn new(day: u8, period: u8) -> Self {
        Self { day, period }
    }
}

impl fmt::Display for SlotCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.day, self.period)
    }
}

/// The (course, teacher, class) triple occupying a slot.
/// Ids are references into the catalogs and are not resolved here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub course_id: String,
    pub teacher_id: String,
    pub class_id: String,
}

impl Assignment {
    pub fn new(
        course_id: impl Into<String>,
        teacher_id: impl Into<String>,
        class_id: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            teacher_id: teacher_id.into(),
            class_id: class_id.into(),
        }
    }
}

/// Valid range for slot coordinates: `day < days`, `period < periods`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub days: u8,
    pub periods: u8,
}

impl GridDimensions {
    pub const fn new(days: u8, periods: u8) -> Self {
        Self { days, periods }
    }

    pub fn contains(&self, coord: SlotCoordinate) -> bool {
        coord.day < self.days && coord.period < self.periods
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self::new(5, 8)
    }
}

/// What a move-or-swap did to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotChange {
    /// Both slots were occupied and exchanged content
    Swapped { first: SlotCoordinate, second: SlotCoordinate },
    /// One assignment was relocated; `from` is now unassigned
    Moved { from: SlotCoordinate, to: SlotCoordinate },
    /// Neither slot was occupied, or both coordinates were the same
    Unchanged,
}

/// One occupied slot, as handed out by snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub day: u8,
    pub period: u8,
    #[serde(flatten)]
    pub assignment: Assignment,
}

impl SlotEntry {
    pub fn coordinate(&self) -> SlotCoordinate {
        SlotCoordinate::new(self.day, self.period)
    }
}
