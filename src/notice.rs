// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::FailureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message meant for the person at the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// How a manager action ended. Failures have already been turned into a
/// [`Notice`] by the time the caller sees this.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A newer fetch was started; this result was dropped.
    Stale,
    /// Nothing to do, or the user declined.
    Cancelled,
    Failed(FailureKind),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
