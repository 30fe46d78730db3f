//! # Shared Bus - Change Signals for Independent UI Fragments
//!
//! Fragments that never call each other coordinate through two shared
//! primitives: the tracked settings store and the signals defined here.
//!
//! ## Signal Flow
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Resize hook  │                    │  Fragment B  │
//! │              │     emit()         │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │SignalChannel │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe() / listen()
//! ```
//!
//! ## Delivery Rules
//!
//! - **No replay:** a subscriber only sees emissions made after it subscribed.
//! - **Ordered:** emissions reach every current subscriber in emission order,
//!   including emissions made by an observer from inside its callback.
//! - **Isolated:** a panicking observer never blocks delivery to the others.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod delivery;
pub mod events;
pub mod observers;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use delivery::{DeliveryGate, GateGuard};
pub use events::Signal;
pub use observers::{DeliveryReport, ObserverSet, SubscriptionHandle};
pub use publisher::{SignalChannel, SignalPublisher};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum signals buffered per async listener before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(DEFAULT_CHANNEL_CAPACITY, 64);
    }
}
