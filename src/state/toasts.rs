//! Transient notifications shown above the status bar

use std::time::{Duration, Instant};

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    shown_at: Instant,
}

/// Sink for user-facing notifications
#[cfg_attr(test, mockall::automock)]
pub trait Notify {
    fn notify(&mut self, kind: ToastKind, title: &str, message: &str);
}

/// Toast holder. Only one toast is visible at a time and a newer one
/// replaces whatever is showing.
#[derive(Debug, Default)]
pub struct Toasts {
    current: Option<Toast>,
}

impl Toasts {
    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Drop the toast once it has outlived its TTL
    pub fn expire(&mut self, now: Instant) {
        if let Some(toast) = &self.current {
            if now.duration_since(toast.shown_at) >= TOAST_TTL {
                self.current = None;
            }
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

impl Notify for Toasts {
    fn notify(&mut self, kind: ToastKind, title: &str, message: &str) {
        self.current = Some(Toast {
            kind,
            title: title.to_string(),
            message: message.to_string(),
            shown_at: Instant::now(),
        });
    }
}
