//! Measurement lifecycle state
//!
//! A measurement is created degenerate, becomes active while its handles are
//! dragged and is fresh once a render pass has refreshed its statistics.
//! There is no terminal state; removal belongs to the measurement store.

use crate::domain::measurement::Measurement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementState {
    /// Just created, both corners at the pointer, never measured
    Created,
    /// Geometry changed since the last statistics computation
    Active,
    /// Cached statistics match the current geometry
    StatsFresh,
}

impl MeasurementState {
    /// Derives the state from a measurement's flags
    pub fn of(measurement: &Measurement) -> Self {
        if !measurement.is_invalidated() {
            return MeasurementState::StatsFresh;
        }

        let degenerate = measurement
            .handles()
            .corners()
            .is_some_and(|(start, end)| start == end);
        if degenerate && measurement.cached_stats().is_none() {
            MeasurementState::Created
        } else {
            MeasurementState::Active
        }
    }

    /// True if statistics must be recomputed before they are shown
    pub fn needs_refresh(self) -> bool {
        self != MeasurementState::StatsFresh
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// A handle or the text box was dragged
    HandleMoved,
    /// Statistics were recomputed during rendering
    StatsRefreshed,
}

/// State machine for measurement transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes an event and returns the new state
    pub fn process_event(_current: MeasurementState, event: StateEvent) -> MeasurementState {
        match event {
            StateEvent::HandleMoved => MeasurementState::Active,
            StateEvent::StatsRefreshed => MeasurementState::StatsFresh,
        }
    }
}
