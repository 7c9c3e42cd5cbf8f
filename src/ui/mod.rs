//! UI module for rendering the TUI

mod console;
mod field_renderer;
mod layout;
mod service_panel;
mod toast;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (header_area, content_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Console(_) => console::draw(frame, content_area, app),
        View::Service => service_panel::draw(frame, content_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Toast floats over everything else
    toast::draw(frame, app);
}
