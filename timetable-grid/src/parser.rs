use csv::{Reader, ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::error::SeedError;
use crate::schedule::{Assignment, GridDimensions, GridStore, SlotCoordinate};

/// One row of a seed file: `day,period,course_id,teacher_id,class_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRow {
    pub day: u8,
    pub period: u8,
    pub course_id: String,
    pub teacher_id: String,
    pub class_id: String,
}

impl SeedRow {
    fn into_parts(self) -> (SlotCoordinate, Assignment) {
        (
            SlotCoordinate::new(self.day, self.period),
            Assignment::new(self.course_id, self.teacher_id, self.class_id),
        )
    }
}

/// Loads an initial grid from a CSV file
pub fn load_seed<P: AsRef<Path>>(csv_path: P, dimensions: GridDimensions) -> Result<GridStore, SeedError> {
    let reader = ReaderBuilder::new().trim(Trim::All).from_path(csv_path)?;
    seed_from_reader(reader, dimensions)
}

/// Same as `load_seed` for any byte source
pub fn load_seed_from<R: Read>(input: R, dimensions: GridDimensions) -> Result<GridStore, SeedError> {
    let reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    seed_from_reader(reader, dimensions)
}

fn seed_from_reader<R: Read>(mut reader: Reader<R>, dimensions: GridDimensions) -> Result<GridStore, SeedError> {
    let mut store = GridStore::new(dimensions);

    for (i, result) in reader.deserialize::<SeedRow>().enumerate() {
        // Header is line 1
        let row = i + 2;
        let (coord, assignment) = result?.into_parts();
        let previous = store
            .set(coord, assignment)
            .map_err(|source| SeedError::OutOfRange { row, source })?;
        if previous.is_some() {
            return Err(SeedError::Duplicate { row, coord });
        }
    }

    Ok(store)
}

/// The demo week: class 1, first two periods of every day
pub fn default_seed(dimensions: GridDimensions) -> GridStore {
    let rows = [
        (0, 0, "1"), (0, 1, "2"),
        (1, 0, "3"), (1, 1, "4"),
        (2, 0, "5"), (2, 1, "1"),
        (3, 0, "2"), (3, 1, "3"),
        (4, 0, "4"), (4, 1, "5"),
    ];

    let mut store = GridStore::new(dimensions);
    for (day, period, id) in rows {
        let coord = SlotCoordinate::new(day, period);
        // Smaller configured weeks simply drop what doesn't fit
        if let Err(e) = store.set(coord, Assignment::new(id, id, "1")) {
            debug!(%coord, error = %e, "default seed slot skipped");
        }
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_rows_with_whitespace() {
        let csv = "day, period, course_id, teacher_id, class_id\n0, 0, C1, T1, K1\n2,3,C2,T2,K1\n";
        let store = load_seed_from(csv.as_bytes(), GridDimensions::default()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get(SlotCoordinate::new(2, 3)).unwrap(),
            Some(&Assignment::new("C2", "T2", "K1"))
        );
    }

    #[test]
    fn rejects_row_outside_grid() {
        let csv = "day,period,course_id,teacher_id,class_id\n0,0,C1,T1,K1\n5,0,C2,T2,K1\n";
        let err = load_seed_from(csv.as_bytes(), GridDimensions::default()).unwrap_err();
        assert!(matches!(err, SeedError::OutOfRange { row: 3, .. }));
    }

    #[test]
    fn rejects_duplicate_coordinate() {
        let csv = "day,period,course_id,teacher_id,class_id\n1,1,C1,T1,K1\n0,4,C3,T3,K1\n1,1,C2,T2,K1\n";
        let err = load_seed_from(csv.as_bytes(), GridDimensions::default()).unwrap_err();
        assert!(matches!(err, SeedError::Duplicate { row: 4, coord } if coord == SlotCoordinate::new(1, 1)));
    }

    #[test]
    fn rejects_malformed_number() {
        let csv = "day,period,course_id,teacher_id,class_id\nmon,0,C1,T1,K1\n";
        assert!(matches!(
            load_seed_from(csv.as_bytes(), GridDimensions::default()),
            Err(SeedError::Csv(_))
        ));
    }

    #[test]
    fn default_seed_fills_first_two_periods() {
        let store = default_seed(GridDimensions::default());
        assert_eq!(store.len(), 10);
        assert!(store.snapshot().iter().all(|e| e.period < 2 && e.assignment.class_id == "1"));

        let small = default_seed(GridDimensions::new(2, 1));
        assert_eq!(small.len(), 2);
    }
}
