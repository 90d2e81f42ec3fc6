use std::collections::BTreeMap;

use crate::config::TimetableConfig;
use super::grid_store::GridStore;
use super::types::SlotCoordinate;

/// Human label for a slot, e.g. "周一 第一节 (08:00-08:45)".
/// Falls back to raw indices for coordinates the config doesn't know.
pub fn slot_label(config: &TimetableConfig, coord: SlotCoordinate) -> String {
    let day = config
        .day_label(coord.day)
        .map(str::to_string)
        .unwrap_or_else(|| format!("day {}", coord.day));
    match config.period(coord.period) {
        Some(period) => format!("{} {} ({})", day, period.name, period.time_range()),
        None => format!("{} period {}", day, coord.period),
    }
}

/// Number of occupied slots per day index, including empty days
pub fn occupancy_by_day(store: &GridStore) -> BTreeMap<u8, usize> {
    let mut counts: BTreeMap<u8, usize> = (0..store.dimensions().days).map(|d| (d, 0)).collect();
    for (coord, _) in store.iter() {
        *counts.entry(coord.day).or_insert(0) += 1;
    }
    counts
}

/// Parses "day,period" or "day:period" as typed on the command line
pub fn parse_coordinate(raw: &str) -> Option<SlotCoordinate> {
    let (day, period) = raw.trim().split_once([',', ':'])?;
    Some(SlotCoordinate::new(day.trim().parse().ok()?, period.trim().parse().ok()?))
}
