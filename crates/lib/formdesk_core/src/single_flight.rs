//! Single-flight guard for step saves.
//!
//! At most one save per step slot is in transit. A slot is a form plus
//! either an existing step's identity or "new". A second save for a busy
//! slot is refused instead of queued; the slot frees itself when the guard
//! returned by [`SingleFlight::try_acquire`] is dropped.

use std::fmt;

use dashmap::DashSet;

use crate::error::FormError;
use crate::models::Step;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepSlot {
    New,
    Existing(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub form_id: String,
    pub step: StepSlot,
}

impl SlotKey {
    pub fn for_step(form_id: &str, step: &Step) -> Self {
        let step = match step.identity() {
            Some(id) => StepSlot::Existing(id.to_string()),
            None => StepSlot::New,
        };
        Self {
            form_id: form_id.to_string(),
            step,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.step {
            StepSlot::New => write!(f, "new step of form {}", self.form_id),
            StepSlot::Existing(id) => write!(f, "step {id} of form {}", self.form_id),
        }
    }
}

/// Set of slots with a save in transit. Share one instance (behind an
/// `Arc`) between every editor that can save steps.
#[derive(Debug, Default)]
pub struct SingleFlight {
    in_flight: DashSet<SlotKey>,
}

/// Holds a slot until dropped.
#[derive(Debug)]
pub struct FlightGuard<'a> {
    owner: &'a SingleFlight,
    key: SlotKey,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`, or fail with [`FormError::SaveInFlight`] if it is taken.
    pub fn try_acquire(&self, key: SlotKey) -> Result<FlightGuard<'_>, FormError> {
        if !self.in_flight.insert(key.clone()) {
            log::debug!("refusing re-entrant save for {key}");
            return Err(FormError::SaveInFlight(key.to_string()));
        }
        Ok(FlightGuard { owner: self, key })
    }

    pub fn is_in_flight(&self, key: &SlotKey) -> bool {
        self.in_flight.contains(key)
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.in_flight.remove(&self.key);
    }
}
