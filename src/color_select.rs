use crate::page::Page;

pub(crate) const PLACEHOLDER: &str = "Select Colors";
pub(crate) const LIMIT_ERROR: &str = "You can select up to 4 colors only.";
pub(crate) const MIN_ERROR: &str = "Please select at least one color.";

/// Multi-select color dropdown capped at `max` selections.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorSelect {
    pub(crate) max: usize,
}

impl ColorSelect {
    pub(crate) fn new(max: usize) -> Self {
        Self { max }
    }

    pub(crate) fn toggle_panel(&self, page: &mut Page) {
        self.set_panel_open(page, !page.panel_open);
    }

    pub(crate) fn set_panel_open(&self, page: &mut Page, open: bool) {
        page.panel_open = open;
        page.panel_expanded_attr = if open { "true" } else { "false" }.to_string();
    }

    /// Change handler for one checkbox: a selection that breaches the
    /// cap is reverted on the triggering box and the limit error shown;
    /// otherwise the error clears and the summary label refreshes.
    pub(crate) fn on_change(&self, page: &mut Page, index: usize) {
        if page.selected_colors().len() > self.max {
            page.colors[index].checked = false;
            page.color_error = LIMIT_ERROR.to_string();
            return;
        }
        page.color_error.clear();
        self.refresh_summary(page);
    }

    pub(crate) fn refresh_summary(&self, page: &mut Page) {
        let selected = page.selected_colors();
        page.color_summary = if selected.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            selected.join(", ")
        };
    }

    pub(crate) fn reset(&self, page: &mut Page) {
        for option in &mut page.colors {
            option.checked = false;
        }
        page.color_error.clear();
        page.color_summary = PLACEHOLDER.to_string();
        self.set_panel_open(page, false);
    }
}
