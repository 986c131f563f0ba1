//! Integration tests for visibility observation + reveal state machine
//!
//! These tests verify that:
//! - Viewport geometry produces the expected visibility changes
//! - Visibility changes drive the reveal machine through its lifecycle
//! - `once` observers and machines agree on the terminal state

use unveil_core::{
    intersection_ratio, ObserveOptions, Rect, RevealEvent, RevealMachine, RevealState, RootMargin,
    VisibilityChange, VisibilityObserver,
};

fn drive(observer: &mut VisibilityObserver, machine: &mut RevealMachine, ratio: f32) {
    match observer.observe(ratio) {
        Some(VisibilityChange::Entered) => {
            machine.send(RevealEvent::Show);
        }
        Some(VisibilityChange::Exited) => {
            machine.send(RevealEvent::Hide);
        }
        None => {}
    }
}

#[test]
fn test_once_lifecycle() {
    let mut observer = VisibilityObserver::new(ObserveOptions::default()).unwrap();
    let mut machine = RevealMachine::new(true);

    drive(&mut observer, &mut machine, 0.5);
    assert_eq!(machine.current_state(), RevealState::Entering);

    machine.send(RevealEvent::Settled);
    assert!(machine.is_terminal());

    for ratio in [0.0, 1.0, 0.0] {
        drive(&mut observer, &mut machine, ratio);
    }
    assert_eq!(machine.current_state(), RevealState::Visible);
    assert!(observer.is_visible());
    assert_eq!(machine.history().len(), 2);
}

#[test]
fn test_repeatable_lifecycle() {
    let options = ObserveOptions::new(0.25).once(false);
    let mut observer = VisibilityObserver::new(options).unwrap();
    let mut machine = RevealMachine::new(false);

    drive(&mut observer, &mut machine, 0.3);
    machine.send(RevealEvent::Settled);
    drive(&mut observer, &mut machine, 0.1);
    assert_eq!(machine.current_state(), RevealState::Exiting);

    // scrolled back before the exit finished
    drive(&mut observer, &mut machine, 0.9);
    assert_eq!(machine.current_state(), RevealState::Entering);

    machine.send(RevealEvent::Settled);
    drive(&mut observer, &mut machine, 0.0);
    machine.send(RevealEvent::Settled);
    assert_eq!(machine.current_state(), RevealState::Hidden);
}

#[test]
fn test_root_margin_triggers_early() {
    let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
    let below_fold = Rect::new(0.0, 850.0, 1000.0, 100.0);

    assert_eq!(intersection_ratio(&below_fold, &viewport, &RootMargin::ZERO), 0.0);

    let margin = RootMargin::parse("0px 0px 100px 0px").unwrap();
    let ratio = intersection_ratio(&below_fold, &viewport, &margin);
    assert!((ratio - 0.5).abs() < 1e-6);

    let mut observer =
        VisibilityObserver::new(ObserveOptions::new(0.5).root_margin(margin)).unwrap();
    assert_eq!(
        observer.observe_rect(&below_fold, &viewport),
        Some(VisibilityChange::Entered)
    );
}

#[test]
fn test_shrinking_margin_delays_trigger() {
    let viewport = Rect::new(0.0, 0.0, 1000.0, 1000.0);
    let margin = RootMargin::parse("-10%").unwrap();

    // inside the viewport, but within the shrunk band at the bottom
    let region = Rect::new(100.0, 920.0, 100.0, 60.0);
    assert_eq!(intersection_ratio(&region, &viewport, &margin), 0.0);
    assert_eq!(intersection_ratio(&region, &viewport, &RootMargin::ZERO), 1.0);
}
