//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the copy shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Copy shortcut display for status bar hints
#[cfg(target_os = "macos")]
pub const COPY_HINT: &str = "Cmd+Y:copy";

#[cfg(not(target_os = "macos"))]
pub const COPY_HINT: &str = "^Y:copy";

/// Submit shortcut display for status bar hints
/// Ctrl+S works on all platforms
pub const SUBMIT_HINT: &str = "^S:optimize";
