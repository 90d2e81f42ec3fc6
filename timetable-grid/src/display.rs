use std::fmt::Write;

use crate::catalog::Catalog;
use crate::config::TimetableConfig;
use crate::schedule::{
    occupancy_by_day, slot_label, GridStore, Notification, RejectReason, SlotCoordinate, SwapState,
};

const EMPTY_CELL: &str = "-";

/// "语文/张老师" for an occupied slot, "-" otherwise
pub fn format_cell(store: &GridStore, catalog: &Catalog, coord: SlotCoordinate, class_filter: Option<&str>) -> String {
    match store.get(coord) {
        Ok(Some(a)) if class_filter.map_or(true, |class| a.class_id == class) => {
            let teacher = catalog.teacher_name(&a.teacher_id);
            if teacher.is_empty() {
                catalog.course_name(&a.course_id).to_string()
            } else {
                format!("{}/{}", catalog.course_name(&a.course_id), teacher)
            }
        }
        _ => EMPTY_CELL.to_string(),
    }
}

/// Renders the weekly grid: one row per period, one column per day
pub fn render_grid(
    config: &TimetableConfig,
    store: &GridStore,
    catalog: &Catalog,
    class_filter: Option<&str>,
) -> String {
    let dims = store.dimensions();
    let mut out = String::new();

    let _ = write!(out, "{:<20}", "");
    for day in 0..dims.days {
        let _ = write!(out, " | {:<14}", config.day_label(day).unwrap_or("?"));
    }
    out.push('\n');

    for period in 0..dims.periods {
        let head = config
            .period(period)
            .map(|p| format!("{} {}", p.name, p.time_range()))
            .unwrap_or_else(|| format!("period {}", period));
        let _ = write!(out, "{:<20}", head);
        for day in 0..dims.days {
            let cell = format_cell(store, catalog, SlotCoordinate::new(day, period), class_filter);
            let _ = write!(out, " | {:<14}", cell);
        }
        out.push('\n');
    }

    out
}

/// Both sides of a pending swap, as shown in the confirmation dialog
pub fn render_swap_preview(
    config: &TimetableConfig,
    store: &GridStore,
    catalog: &Catalog,
    state: SwapState,
) -> Option<String> {
    let SwapState::PendingConfirmation { first, second } = state else {
        return None;
    };
    let side = |coord: SlotCoordinate| {
        let course = match store.get(coord) {
            Ok(Some(a)) => catalog.course_name(&a.course_id).to_string(),
            _ => crate::catalog::UNASSIGNED_COURSE.to_string(),
        };
        format!("{}: {}", slot_label(config, coord), course)
    };
    Some(format!("{}\n  <->\n{}", side(first), side(second)))
}

/// User-facing text for a notification
pub fn describe_notification(config: &TimetableConfig, notification: &Notification) -> String {
    match notification {
        Notification::SelectionStarted { slot } => {
            format!("已选择 {}，请选择要交换的课程", slot_label(config, *slot))
        }
        Notification::SelectionCancelled => "已取消交换".to_string(),
        Notification::SwapSucceeded { .. } => "课程交换成功".to_string(),
        Notification::Rejected(RejectReason::OutOfRange { day, period }) => {
            format!("时间段 ({}, {}) 不在课表范围内", day, period)
        }
        Notification::Rejected(RejectReason::AwaitingConfirmation) => "请先确认或取消当前交换".to_string(),
        Notification::Rejected(RejectReason::InvalidTransition { action, state }) => {
            format!("操作 {} 在状态 {} 下无效", action, state)
        }
    }
}

/// Prints the grid followed by per-day occupancy
pub fn print_grid(config: &TimetableConfig, store: &GridStore, catalog: &Catalog, class_filter: Option<&str>) {
    println!("{}", render_grid(config, store, catalog, class_filter));
    println!("Occupied slots: {}", store.len());
    for (day, count) in occupancy_by_day(store) {
        println!("  {}: {}", config.day_label(day).unwrap_or("?"), count);
    }
}
