//! Booking status transitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::BookingError;

/// Reason recorded when an admin cancels without supplying one.
pub const DEFAULT_CANCELLATION_REASON: &str = "Cancelled by admin";

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Created, awaiting admin confirmation.
    Pending,
    /// Confirmed by an admin.
    Confirmed,
    /// The pooja has been performed. Terminal.
    Completed,
    /// Cancelled by an admin. Terminal.
    Cancelled,
}

impl BookingStatus {
    /// Returns true for COMPLETED and CANCELLED.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Admin actions on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminAction {
    /// PENDING -> CONFIRMED.
    Confirm,
    /// CONFIRMED -> COMPLETED.
    Complete,
    /// PENDING or CONFIRMED -> CANCELLED.
    Cancel,
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirm => write!(f, "confirm"),
            Self::Complete => write!(f, "complete"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

impl FromStr for AdminAction {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirm" => Ok(Self::Confirm),
            "complete" => Ok(Self::Complete),
            "cancel" => Ok(Self::Cancel),
            other => Err(BookingError::InvalidAction(other.to_string())),
        }
    }
}

/// Applies an admin action to a booking status.
///
/// Transitions are guarded: `confirm` only from PENDING, `complete`
/// only from CONFIRMED, `cancel` from either non-terminal state. A
/// repeated action is rejected like any other invalid transition, so
/// callers never re-stamp timestamps.
///
/// # Errors
///
/// Returns `BookingError::InvalidTransition` when the action is not
/// allowed from the current status.
pub fn apply_action(
    current: BookingStatus,
    action: AdminAction,
) -> Result<BookingStatus, BookingError> {
    let next = match (current, action) {
        (BookingStatus::Pending, AdminAction::Confirm) => BookingStatus::Confirmed,
        (BookingStatus::Confirmed, AdminAction::Complete) => BookingStatus::Completed,
        (BookingStatus::Pending | BookingStatus::Confirmed, AdminAction::Cancel) => {
            BookingStatus::Cancelled
        }
        (status, action) => return Err(BookingError::InvalidTransition { action, status }),
    };

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_from_pending() {
        assert_eq!(
            apply_action(BookingStatus::Pending, AdminAction::Confirm),
            Ok(BookingStatus::Confirmed)
        );
    }

    #[test]
    fn test_complete_from_confirmed() {
        assert_eq!(
            apply_action(BookingStatus::Confirmed, AdminAction::Complete),
            Ok(BookingStatus::Completed)
        );
    }

    #[test]
    fn test_cancel_from_non_terminal() {
        assert_eq!(
            apply_action(BookingStatus::Pending, AdminAction::Cancel),
            Ok(BookingStatus::Cancelled)
        );
        assert_eq!(
            apply_action(BookingStatus::Confirmed, AdminAction::Cancel),
            Ok(BookingStatus::Cancelled)
        );
    }

    #[test]
    fn test_repeated_confirm_rejected() {
        assert_eq!(
            apply_action(BookingStatus::Confirmed, AdminAction::Confirm),
            Err(BookingError::InvalidTransition {
                action: AdminAction::Confirm,
                status: BookingStatus::Confirmed,
            })
        );
    }

    #[test]
    fn test_complete_from_pending_rejected() {
        assert!(apply_action(BookingStatus::Pending, AdminAction::Complete).is_err());
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for status in [BookingStatus::Completed, BookingStatus::Cancelled] {
            for action in [AdminAction::Confirm, AdminAction::Complete, AdminAction::Cancel] {
                assert!(apply_action(status, action).is_err());
            }
        }
    }

    #[test]
    fn test_unknown_action_string() {
        assert_eq!(
            "delete".parse::<AdminAction>(),
            Err(BookingError::InvalidAction("delete".to_string()))
        );
        assert!("CONFIRM".parse::<AdminAction>().is_err());
    }

    #[test]
    fn test_action_strings_roundtrip() {
        for action in [AdminAction::Confirm, AdminAction::Complete, AdminAction::Cancel] {
            assert_eq!(action.to_string().parse::<AdminAction>(), Ok(action));
        }
    }
}

#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    fn status_strategy() -> impl Strategy<Value = BookingStatus> {
        prop_oneof![
            Just(BookingStatus::Pending),
            Just(BookingStatus::Confirmed),
            Just(BookingStatus::Completed),
            Just(BookingStatus::Cancelled),
        ]
    }

    fn action_strategy() -> impl Strategy<Value = AdminAction> {
        prop_oneof![
            Just(AdminAction::Confirm),
            Just(AdminAction::Complete),
            Just(AdminAction::Cancel),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Terminal states never transition.
        #[test]
        fn prop_terminal_states_are_final(
            status in status_strategy(),
            action in action_strategy(),
        ) {
            if status.is_terminal() {
                prop_assert!(apply_action(status, action).is_err());
            }
        }

        /// A successful transition never returns the same status, so a
        /// repeat of the same action always fails afterwards.
        #[test]
        fn prop_transitions_are_not_reapplicable(
            status in status_strategy(),
            action in action_strategy(),
        ) {
            if let Ok(next) = apply_action(status, action) {
                prop_assert_ne!(next, status);
                prop_assert!(apply_action(next, action).is_err());
            }
        }
    }
}
