//! Application state and core logic

use crate::config::TuiConfig;
use crate::flows::{
    AlternativeFuels, Clinkerization, CrossProcess, Emissions, Energy, Forecasting, Maintenance,
    MixDesign, Quality, RawMaterials, Safety, SupplyChain,
};
use crate::genai::{GeminiClient, SharedTextModel};
use crate::optimizer::{Console, OptimizerPanel};
use crate::platform::COPY_MODIFIER;
use crate::state::{AppState, Notify, ToastKind, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Static description of the configured backend, shown in the service panel
pub struct ServiceStatus {
    pub model: String,
    pub api_url: String,
    pub api_key_configured: bool,
    pub request_timeout: Duration,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// One optimizer panel per console
    consoles: Vec<Box<dyn Console>>,
    /// Shared generative-language backend
    model: SharedTextModel,
    /// Backend details for the service panel
    service: ServiceStatus,
}

impl App {
    /// Create a new App instance against the configured Gemini backend
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let timeout = config.request_timeout();
        let client = GeminiClient::new(
            config.api_url(),
            config.model_name(),
            config.api_key(),
            timeout,
        )?;
        let service = ServiceStatus {
            model: client.model().to_string(),
            api_url: client.base_url().to_string(),
            api_key_configured: client.has_api_key(),
            request_timeout: timeout,
        };
        Ok(Self::with_model(Arc::new(client), service))
    }

    /// Create an App over an arbitrary text model backend
    pub fn with_model(model: SharedTextModel, service: ServiceStatus) -> Self {
        let consoles: Vec<Box<dyn Console>> = vec![
            Box::new(OptimizerPanel::new(Clinkerization)),
            Box::new(OptimizerPanel::new(RawMaterials)),
            Box::new(OptimizerPanel::new(MixDesign)),
            Box::new(OptimizerPanel::new(AlternativeFuels)),
            Box::new(OptimizerPanel::new(Emissions)),
            Box::new(OptimizerPanel::new(Energy)),
            Box::new(OptimizerPanel::new(Quality)),
            Box::new(OptimizerPanel::new(Maintenance)),
            Box::new(OptimizerPanel::new(Safety)),
            Box::new(OptimizerPanel::new(SupplyChain)),
            Box::new(OptimizerPanel::new(Forecasting)),
            Box::new(OptimizerPanel::new(CrossProcess)),
        ];
        let mut state = AppState::default();
        if !service.api_key_configured {
            state.toasts.notify(
                ToastKind::Info,
                "API key missing",
                "Set GEMINI_API_KEY to enable optimizations",
            );
        }
        Self {
            state,
            consoles,
            model,
            service,
        }
    }

    pub fn consoles(&self) -> &[Box<dyn Console>] {
        &self.consoles
    }

    pub fn service(&self) -> &ServiceStatus {
        &self.service
    }

    /// Console currently on screen, if the service panel is not showing
    pub fn active_console(&self) -> Option<&dyn Console> {
        self.state
            .selected_console()
            .and_then(|index| self.consoles.get(index))
            .map(|console| console.as_ref())
    }

    /// A request is in flight on any console
    pub fn any_busy(&self) -> bool {
        self.consoles.iter().any(|console| console.is_busy())
    }

    /// Apply settlements that arrived since the last tick and expire toasts.
    ///
    /// Every console is polled, not just the visible one, so a result keeps
    /// landing on a console the user has switched away from.
    pub fn tick(&mut self) {
        for console in &mut self.consoles {
            console.poll(&mut self.state.toasts);
        }
        self.state.toasts.expire(Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Esc dismisses a showing toast before anything else sees the key
        if key.code == KeyCode::Esc && self.state.toasts.current().is_some() {
            self.state.toasts.dismiss();
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => {
                    self.state.next_console(self.consoles.len());
                    return;
                }
                KeyCode::Char('p') => {
                    self.state.prev_console(self.consoles.len());
                    return;
                }
                KeyCode::Char('g') => {
                    self.state.toggle_service();
                    return;
                }
                _ => {}
            }
        }

        if key.modifiers.contains(COPY_MODIFIER) && key.code == KeyCode::Char('y') {
            self.copy_result();
            return;
        }

        match self.state.current_view {
            View::Console(index) => self.handle_console_key(index, key),
            View::Service => self.handle_service_key(key),
        }
    }

    fn handle_console_key(&mut self, index: usize, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('s') {
                self.submit(index);
            }
            return;
        }

        match key.code {
            KeyCode::PageDown => {
                self.state.scroll_down_page();
                return;
            }
            KeyCode::PageUp => {
                self.state.scroll_up_page();
                return;
            }
            _ => {}
        }

        let Some(console) = self.consoles.get_mut(index) else {
            return;
        };
        let form = console.form_mut();

        match key.code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Backspace => {
                if let Some(field) = form.active_field_mut() {
                    field.pop_char();
                }
            }
            KeyCode::Enter => {
                if form.is_active_multiline() {
                    if let Some(field) = form.active_field_mut() {
                        field.push_newline();
                    }
                } else {
                    self.submit(index);
                }
            }
            KeyCode::Right => {
                if let Some(field) = form.active_field_mut() {
                    field.cycle_next();
                }
            }
            KeyCode::Left => {
                if let Some(field) = form.active_field_mut() {
                    field.cycle_prev();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = form.active_field_mut() {
                    // Space advances a select, anywhere else it is just typed
                    if c == ' ' && field.is_select() {
                        field.cycle_next();
                    } else {
                        field.push_char(c);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_service_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.state.toggle_service();
        }
    }

    /// Validate and dispatch the console's flow
    fn submit(&mut self, index: usize) {
        let model = Arc::clone(&self.model);
        if let Some(console) = self.consoles.get_mut(index) {
            console.submit(&model);
            self.state.reset_scroll();
        }
    }

    /// Copy the visible result to the system clipboard
    fn copy_result(&mut self) {
        let Some(text) = self.active_console().and_then(|c| c.result_text()) else {
            return;
        };
        match copy_to_clipboard(&text) {
            Ok(()) => self.state.toasts.notify(
                ToastKind::Success,
                "Copied",
                "Results copied to clipboard",
            ),
            Err(err) => {
                tracing::warn!(%err, "clipboard copy failed");
                self.state
                    .toasts
                    .notify(ToastKind::Error, "Error", "Could not access the clipboard");
            }
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
