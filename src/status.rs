use std::collections::HashMap;
use std::fmt;

use crate::error::Error;

/// Up/down classification of a target at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Up,
    Down,
}

impl Status {
    pub fn is_up(self) -> bool {
        self == Status::Up
    }

    /// Wording used in alerts about a transition into this status.
    pub fn alert_label(self) -> &'static str {
        match self {
            Status::Up => "BACK UP",
            Status::Down => "DOWN",
        }
    }
}

impl From<bool> for Status {
    fn from(up: bool) -> Self {
        if up { Status::Up } else { Status::Down }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Up => f.write_str("UP"),
            Status::Down => f.write_str("DOWN"),
        }
    }
}

/// Result of comparing a fresh probe against the stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub changed: bool,
    pub previous: Status,
}

/// Last known status of every configured target.
///
/// The key set is fixed at construction: every target starts out `Down` and
/// entries are never added or removed afterwards.
#[derive(Debug, Clone)]
pub struct StatusRegistry {
    statuses: HashMap<String, Status>,
}

impl StatusRegistry {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let statuses = targets
            .into_iter()
            .map(|target| (target.into(), Status::Down))
            .collect();
        Self { statuses }
    }

    pub fn get(&self, target: &str) -> Option<Status> {
        self.statuses.get(target).copied()
    }

    /// Compares `current` against the stored status without committing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTarget`] if `target` was never registered.
    pub fn check_transition(&self, target: &str, current: Status) -> Result<Transition, Error> {
        let previous = self
            .get(target)
            .ok_or_else(|| Error::UnknownTarget(target.to_string()))?;

        Ok(Transition {
            changed: current != previous,
            previous,
        })
    }

    /// Records `status` as the last known status of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTarget`] if `target` was never registered.
    pub fn commit(&mut self, target: &str, status: Status) -> Result<(), Error> {
        let slot = self
            .statuses
            .get_mut(target)
            .ok_or_else(|| Error::UnknownTarget(target.to_string()))?;
        *slot = status;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
