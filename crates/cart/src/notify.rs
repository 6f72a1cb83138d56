//! User-facing notices.
//!
//! Cart operations never surface failures to their caller as errors; every
//! failure is reported as exactly one fire-and-forget notice through the
//! [`Notifier`] side channel. What a notice looks like to the user (toast,
//! terminal line, log entry) is the host application's business.

use std::sync::{Mutex, PoisonError};

/// The user-visible outcomes a cart operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Requested quantity exceeds reported availability.
    OutOfStock,
    /// The product is not in the cart (remove path only).
    ItemNotFound,
    /// Adding a product failed for any other reason.
    AddFailed,
    /// Removing a product failed for any other reason.
    RemoveFailed,
    /// Changing a quantity failed for any other reason.
    UpdateFailed,
}

impl Notice {
    /// Human-readable message for this notice.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OutOfStock => "Requested quantity is out of stock",
            Self::ItemNotFound => "Product is not in the cart",
            Self::AddFailed => "Failed to add product to cart",
            Self::RemoveFailed => "Failed to remove product from cart",
            Self::UpdateFailed => "Failed to update product quantity",
        }
    }
}

/// Side channel for user-facing notices.
pub trait Notifier: Send + Sync {
    /// Deliver a notice to the user. Fire-and-forget: implementations must
    /// not fail and must not block on user interaction.
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Notifier that reports notices through `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(notice = ?notice, "{}", notice.message());
    }
}

/// Notifier that records every notice in memory.
///
/// Used by tests to assert exactly which notices an operation produced.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Create an empty recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices delivered so far, in order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::OutOfStock);
        notifier.notify(Notice::AddFailed);

        assert_eq!(
            notifier.notices(),
            vec![Notice::OutOfStock, Notice::AddFailed]
        );
    }

    #[test]
    fn test_notice_messages_are_distinct() {
        let all = [
            Notice::OutOfStock,
            Notice::ItemNotFound,
            Notice::AddFailed,
            Notice::RemoveFailed,
            Notice::UpdateFailed,
        ];

        for (i, a) in all.iter().enumerate() {
            for b in all.iter().skip(i + 1) {
                assert_ne!(a.message(), b.message());
            }
        }
    }
}
