//! Tab bar UI rendering
//!
//! One selectable label per library view.

use eframe::egui;
use crate::app::view_state::Tab;

/// Renders the tab strip; returns the newly clicked tab, if any.
pub fn render_tab_bar(ui: &mut egui::Ui, active: Tab) -> Option<Tab> {
    let mut selected = None;

    ui.horizontal(|ui| {
        for tab in Tab::ALL {
            if ui.selectable_label(tab == active, tab.title()).clicked() && tab != active {
                selected = Some(tab);
            }
        }
    });

    selected
}
