use serde::Serialize;
use tracing::{info, warn};

use crate::error::GridError;
use super::grid_store::GridStore;
use super::types::{SlotChange, SlotCoordinate};

/// Where the two-click swap gesture currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum SwapState {
    #[default]
    Idle,
    FirstSelected { first: SlotCoordinate },
    PendingConfirmation { first: SlotCoordinate, second: SlotCoordinate },
}

impl SwapState {
    pub fn tag(&self) -> &'static str {
        match self {
            SwapState::Idle => "idle",
            SwapState::FirstSelected { .. } => "first_selected",
            SwapState::PendingConfirmation { .. } => "pending_confirmation",
        }
    }

    /// Slots chosen so far, in selection order
    pub fn selected(&self) -> Vec<SlotCoordinate> {
        match *self {
            SwapState::Idle => Vec::new(),
            SwapState::FirstSelected { first } => vec![first],
            SwapState::PendingConfirmation { first, second } => vec![first, second],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    OutOfRange { day: i64, period: i64 },
    /// A second selection arrived while a swap is waiting for confirmation
    AwaitingConfirmation,
    /// `confirm`/`cancel` with nothing to act on
    InvalidTransition { action: &'static str, state: &'static str },
}

/// Outcome messages for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    SelectionStarted { slot: SlotCoordinate },
    SelectionCancelled,
    SwapSucceeded { first: SlotCoordinate, second: SlotCoordinate, change: SlotChange },
    Rejected(RejectReason),
}

pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Turns two consecutive slot selections plus an explicit confirmation into a
/// single `move_or_swap`. The grid is only touched by `confirm`.
#[derive(Debug, Clone, Default)]
pub struct SwapCoordinator {
    state: SwapState,
}

impl SwapCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SwapState {
        self.state
    }

    /// Returns `Ok(true)` when the selection moved the gesture forward and
    /// `Ok(false)` when it was ignored because a swap awaits confirmation.
    pub fn select_slot(
        &mut self,
        store: &GridStore,
        coord: SlotCoordinate,
        sink: &mut impl NotificationSink,
    ) -> Result<bool, GridError> {
        self.select_position(store, coord.day.into(), coord.period.into(), sink)
    }

    /// Same as `select_slot` for raw request values, which may not fit a coordinate at all
    pub fn select_position(
        &mut self,
        store: &GridStore,
        day: i64,
        period: i64,
        sink: &mut impl NotificationSink,
    ) -> Result<bool, GridError> {
        let coord = match store.coordinate(day, period) {
            Ok(coord) => coord,
            Err(e) => {
                warn!(day, period, state = self.state.tag(), "selection outside the grid rejected");
                sink.notify(Notification::Rejected(RejectReason::OutOfRange { day, period }));
                return Err(e);
            }
        };

        match self.state {
            SwapState::Idle => {
                self.state = SwapState::FirstSelected { first: coord };
                info!(%coord, "swap selection started");
                sink.notify(Notification::SelectionStarted { slot: coord });
            }
            SwapState::FirstSelected { first } if first == coord => {
                self.state = SwapState::Idle;
                info!(%coord, "swap selection toggled off");
                sink.notify(Notification::SelectionCancelled);
            }
            SwapState::FirstSelected { first } => {
                self.state = SwapState::PendingConfirmation { first, second: coord };
                info!(%first, second = %coord, "swap awaiting confirmation");
            }
            SwapState::PendingConfirmation { .. } => {
                warn!(%coord, "selection ignored while awaiting confirmation");
                sink.notify(Notification::Rejected(RejectReason::AwaitingConfirmation));
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Commits a pending swap; a no-op in any other state
    pub fn confirm(
        &mut self,
        store: &mut GridStore,
        sink: &mut impl NotificationSink,
    ) -> Option<SlotChange> {
        let SwapState::PendingConfirmation { first, second } = self.state else {
            self.reject_transition("confirm", sink);
            return None;
        };

        // Both coordinates passed the range check on selection, so this only
        // fails if the store was swapped for a smaller one in between.
        match store.move_or_swap(first, second) {
            Ok(change) => {
                self.state = SwapState::Idle;
                info!(%first, %second, ?change, "swap confirmed");
                sink.notify(Notification::SwapSucceeded { first, second, change });
                Some(change)
            }
            Err(GridError::OutOfRange { day, period, .. }) => {
                self.state = SwapState::Idle;
                warn!(%first, %second, "pending swap no longer fits the grid");
                sink.notify(Notification::Rejected(RejectReason::OutOfRange { day, period }));
                None
            }
        }
    }

    /// Drops any selection without touching the grid
    pub fn cancel(&mut self, sink: &mut impl NotificationSink) -> bool {
        if self.state == SwapState::Idle {
            self.reject_transition("cancel", sink);
            return false;
        }
        info!(state = self.state.tag(), "swap cancelled");
        self.state = SwapState::Idle;
        sink.notify(Notification::SelectionCancelled);
        true
    }

    fn reject_transition(&self, action: &'static str, sink: &mut impl NotificationSink) {
        warn!(action, state = self.state.tag(), "ignored swap action");
        sink.notify(Notification::Rejected(RejectReason::InvalidTransition {
            action,
            state: self.state.tag(),
        }));
    }
}
