//! Server-owned replicated values and the authority capability.
//!
//! Only a holder of [`Authority`] can write a [`Replicated`] value. Observers
//! hold [`Mirror`]s, which can only be fed changes produced by the server.

use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Capability to mutate authoritative state. Only obtainable by the server role.
#[derive(Debug)]
pub struct Authority {
    _private: (),
}

impl Authority {
    /// Claim authority for a process role. Observers get `None`.
    pub fn claim(role: Role) -> Option<Self> {
        match role {
            Role::Server => Some(Self { _private: () }),
            Role::Observer => {
                tracing::warn!("observer attempted to claim simulation authority");
                None
            }
        }
    }
}

/// A value change produced by the authoritative side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change<T> {
    pub previous: T,
    pub current: T,
}

/// Authoritative value with change tracking.
#[derive(Debug, Clone)]
pub struct Replicated<T> {
    value: T,
    pending: Option<Change<T>>,
}

impl<T: Copy + PartialEq> Replicated<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            pending: None,
        }
    }

    pub fn get(&self) -> T {
        self.value
    }

    /// Write a new value. Returns the change, or `None` when the value is unchanged.
    ///
    /// Consecutive changes within one tick coalesce: observers see the first
    /// previous value and the last current value.
    pub fn set(&mut self, _authority: &Authority, value: T) -> Option<Change<T>> {
        if self.value == value {
            return None;
        }
        let change = Change {
            previous: self.value,
            current: value,
        };
        self.value = value;
        self.pending = Some(match self.pending.take() {
            Some(earlier) => Change {
                previous: earlier.previous,
                current: value,
            },
            None => change,
        });
        Some(change)
    }

    /// Drain the change accumulated since the last call, for broadcasting.
    pub fn take_change(&mut self) -> Option<Change<T>> {
        self.pending.take()
    }
}

/// Read-only observer copy of a replicated value.
#[derive(Debug, Clone)]
pub struct Mirror<T> {
    value: T,
}

impl<T: Copy> Mirror<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> T {
        self.value
    }

    /// Apply a change received from the server.
    pub fn apply(&mut self, change: Change<T>) {
        self.value = change.current;
    }
}
