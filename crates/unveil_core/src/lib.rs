//! Unveil Core
//!
//! Foundational primitives for scroll-triggered reveals:
//!
//! - **Viewport geometry**: intersection ratios with CSS-like root margins
//! - **Visibility observation**: threshold crossing with a "trigger once" policy
//! - **Reveal state machine**: `Hidden -> Entering -> Visible -> Exiting`
//! - **Errors**: configuration-time validation
//!
//! # Example
//!
//! ```rust
//! use unveil_core::{ObserveOptions, RevealEvent, RevealMachine, VisibilityObserver};
//!
//! let mut observer = VisibilityObserver::new(ObserveOptions::new(0.25)).unwrap();
//! let mut machine = RevealMachine::new(observer.options().once);
//!
//! if let Some(change) = observer.observe(0.6) {
//!     let event = if change.is_visible() { RevealEvent::Show } else { RevealEvent::Hide };
//!     machine.send(event);
//! }
//! assert!(machine.current_state().is_shown());
//! ```

pub mod error;
pub mod fsm;
pub mod observer;
pub mod viewport;

pub use error::{Result, UnveilError};
pub use fsm::{RevealEvent, RevealMachine, RevealState};
pub use observer::{ObserveOptions, VisibilityChange, VisibilityObserver};
pub use viewport::{intersection_ratio, MarginLength, Rect, RootMargin};
