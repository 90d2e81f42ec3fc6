use std::collections::HashMap;
use tracing::debug;

use crate::error::GridError;
use super::types::{Assignment, GridDimensions, SlotChange, SlotCoordinate, SlotEntry};

/// Sole owner of the timetable grid: slot -> assignment.
/// Unassigned slots are simply absent from the map.
#[derive(Debug, Clone, Default)]
pub struct GridStore {
    dimensions: GridDimensions,
    slots: HashMap<SlotCoordinate, Assignment>,
}

impl GridStore {
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            slots: HashMap::new(),
        }
    }

    /// Builds a store pre-seeded from an external source. Later entries for
    /// the same coordinate overwrite earlier ones.
    pub fn with_entries<I>(dimensions: GridDimensions, entries: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (SlotCoordinate, Assignment)>,
    {
        let mut store = Self::new(dimensions);
        for (coord, assignment) in entries {
            store.set(coord, assignment)?;
        }
        Ok(store)
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    fn out_of_range(&self, day: i64, period: i64) -> GridError {
        GridError::OutOfRange {
            day,
            period,
            days: self.dimensions.days,
            periods: self.dimensions.periods,
        }
    }

    /// Rejects coordinates outside the configured day/period domain
    pub fn check(&self, coord: SlotCoordinate) -> Result<(), GridError> {
        if self.dimensions.contains(coord) {
            Ok(())
        } else {
            Err(self.out_of_range(coord.day.into(), coord.period.into()))
        }
    }

    /// Validates raw integers (e.g. from a request) into a coordinate of this grid
    pub fn coordinate(&self, day: i64, period: i64) -> Result<SlotCoordinate, GridError> {
        let (Ok(d), Ok(p)) = (u8::try_from(day), u8::try_from(period)) else {
            return Err(self.out_of_range(day, period));
        };
        let coord = SlotCoordinate::new(d, p);
        self.check(coord)?;
        Ok(coord)
    }

    pub fn get(&self, coord: SlotCoordinate) -> Result<Option<&Assignment>, GridError> {
        self.check(coord)?;
        Ok(self.slots.get(&coord))
    }

    /// Inserts or overwrites; returns the previous assignment if there was one
    pub fn set(&mut self, coord: SlotCoordinate, assignment: Assignment) -> Result<Option<Assignment>, GridError> {
        self.check(coord)?;
        debug!(%coord, course = %assignment.course_id, "slot assigned");
        Ok(self.slots.insert(coord, assignment))
    }

    /// Clears the slot; absent entries are not an error
    pub fn remove(&mut self, coord: SlotCoordinate) -> Result<Option<Assignment>, GridError> {
        self.check(coord)?;
        let removed = self.slots.remove(&coord);
        if removed.is_some() {
            debug!(%coord, "slot cleared");
        }
        Ok(removed)
    }

    /// Exchanges or relocates the contents of two slots, decided by occupancy:
    /// both occupied swap, one occupied moves into the other, neither is a no-op.
    /// Both coordinates are validated before anything is touched.
    pub fn move_or_swap(&mut self, a: SlotCoordinate, b: SlotCoordinate) -> Result<SlotChange, GridError> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Ok(SlotChange::Unchanged);
        }

        let change = match (self.slots.remove(&a), self.slots.remove(&b)) {
            (Some(first), Some(second)) => {
                self.slots.insert(a, second);
                self.slots.insert(b, first);
                SlotChange::Swapped { first: a, second: b }
            }
            (Some(first), None) => {
                self.slots.insert(b, first);
                SlotChange::Moved { from: a, to: b }
            }
            (None, Some(second)) => {
                self.slots.insert(a, second);
                SlotChange::Moved { from: b, to: a }
            }
            (None, None) => SlotChange::Unchanged,
        };
        debug!(?change, "move_or_swap applied");
        Ok(change)
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupied slots in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (SlotCoordinate, &Assignment)> {
        self.slots.iter().map(|(coord, assignment)| (*coord, assignment))
    }

    /// Occupied slots ordered by (day, period)
    pub fn snapshot(&self) -> Vec<SlotEntry> {
        let mut entries: Vec<SlotEntry> = self
            .slots
            .iter()
            .map(|(coord, assignment)| SlotEntry {
                day: coord.day,
                period: coord.period,
                assignment: assignment.clone(),
            })
            .collect();
        entries.sort_by_key(|e| (e.day, e.period));
        entries
    }

    /// Snapshot restricted to one class; `None` means every class
    pub fn snapshot_for_class(&self, class_id: Option<&str>) -> Vec<SlotEntry> {
        let mut entries = self.snapshot();
        if let Some(class_id) = class_id {
            entries.retain(|e| e.assignment.class_id == class_id);
        }
        entries
    }
}
