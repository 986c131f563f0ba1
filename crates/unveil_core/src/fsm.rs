//! Reveal state machine
//!
//! Flat statechart for the lifecycle of an observed element:
//!
//! ```text
//! Hidden --Show--> Entering --Settled--> Visible
//!                     ^  |                  |
//!                Show |  | Hide        Hide |        (repeatable only)
//!                     |  v                  v
//! Hidden <--Settled-- Exiting <-------------+
//! ```
//!
//! When the machine is built with `once`, the `Hide` edges are never
//! registered, which makes `Visible` terminal.

use rustc_hash::FxHashMap;

/// Lifecycle state of a reveal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealState {
    #[default]
    Hidden,
    Entering,
    Visible,
    Exiting,
}

impl RevealState {
    /// Whether an interpolation is in flight
    pub fn is_animating(&self) -> bool {
        matches!(self, RevealState::Entering | RevealState::Exiting)
    }

    /// Whether the element is heading toward (or resting at) its `to` state
    pub fn is_shown(&self) -> bool {
        matches!(self, RevealState::Entering | RevealState::Visible)
    }
}

/// Inputs driving the reveal state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealEvent {
    /// The observer reported the region in view
    Show,
    /// The observer reported the region out of view
    Hide,
    /// Every interpolation of the element has settled
    Settled,
}

/// A reveal state machine instance
#[derive(Clone, Debug)]
pub struct RevealMachine {
    current_state: RevealState,
    once: bool,
    transitions: FxHashMap<(RevealState, RevealEvent), RevealState>,
    /// History of state transitions (for debugging)
    history: Vec<(RevealState, RevealEvent, RevealState)>,
}

impl RevealMachine {
    /// Create a machine starting in `Hidden`
    pub fn new(once: bool) -> Self {
        use RevealEvent::*;
        use RevealState::*;

        let mut transitions = FxHashMap::default();
        transitions.insert((Hidden, Show), Entering);
        transitions.insert((Entering, Settled), Visible);

        if !once {
            transitions.insert((Visible, Hide), Exiting);
            transitions.insert((Entering, Hide), Exiting);
            transitions.insert((Exiting, Show), Entering);
            transitions.insert((Exiting, Settled), Hidden);
        }

        Self {
            current_state: Hidden,
            once,
            transitions,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> RevealState {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: RevealState) -> bool {
        self.current_state == state
    }

    pub fn is_once(&self) -> bool {
        self.once
    }

    /// `Visible` in a `once` machine accepts no further events
    pub fn is_terminal(&self) -> bool {
        self.once && self.current_state == RevealState::Visible
    }

    /// Get transition history
    pub fn history(&self) -> &[(RevealState, RevealEvent, RevealState)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: RevealEvent) -> bool {
        self.transitions.contains_key(&(self.current_state, event))
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: RevealEvent) -> Option<RevealState> {
        let current = self.current_state;
        let to_state = *self.transitions.get(&(current, event))?;

        self.current_state = to_state;
        self.history.push((current, event, to_state));
        tracing::debug!(from = ?current, ?event, to = ?to_state, "reveal transition");

        Some(to_state)
    }
}
