use super::page::{Page, TABLE_BODY_ID};
use crate::models::SlotView;
use tracing::warn;

pub const COLUMN_COUNT: usize = 7;
pub const EMPTY_TEXT: &str = "No slots to display.";

/// Replaces the table body with rows for `slots`. A page without a table
/// body only gets a warning.
pub fn render_slots(page: &mut Page, slots: &[SlotView]) {
    let Some(body) = page.table_body.as_mut() else {
        warn!("element #{TABLE_BODY_ID} not found, skipping render");
        return;
    };
    body.inner_html = render_rows(slots);
}

pub fn render_rows(slots: &[SlotView]) -> String {
    if slots.is_empty() {
        return format!(
            "<tr><td colspan=\"{COLUMN_COUNT}\" class=\"text-center text-muted py-4\">{EMPTY_TEXT}</td></tr>"
        );
    }

    slots.iter().map(render_row).collect()
}

fn render_row(slot: &SlotView) -> String {
    let source = slot.source.as_deref().unwrap_or_default();
    format!(
        "<tr><td>{}</td><td>{}</td><td>{} min</td><td>{}</td><td>{}</td><td>{}</td>\
         <td><span class=\"badge bg-light text-muted border\">{}</span></td></tr>",
        escape_html(&slot.date),
        escape_html(&slot.time_range),
        slot.duration_minutes,
        escape_html(&slot.club),
        escape_html(&slot.court),
        status_badge(slot),
        escape_html(source),
    )
}

fn status_badge(slot: &SlotView) -> &'static str {
    if slot.is_free() {
        "<span class=\"badge bg-success\">Free</span>"
    } else {
        "<span class=\"badge bg-secondary\">Occupied</span>"
    }
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
