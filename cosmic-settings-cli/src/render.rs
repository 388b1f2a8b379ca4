//! Plain-text rendering of panels, rows and action outcomes

use std::fmt::Write as _;

use cosmic_settings_core::i18n::keys;
use cosmic_settings_core::types::{
    ActionOutcome, FieldSpec, HostSignal, NoticeLevel, PanelDescriptor, Row, RowPage,
};
use cosmic_settings_core::{Localizer, SectionRegistry};
use serde_json::Value;

/// Width at which `truncate` columns are shortened.
const TRUNCATE_WIDTH: usize = 48;

/// Hidden fields stay hidden, except the identifier: a terminal has no row to click, so the
/// user needs the id to address `show`, `edit` and `remove`.
fn visible(field: &FieldSpec) -> bool {
    !field.hidden || field.identifier
}

fn cell(row: &Row, field: &FieldSpec) -> String {
    let text = match row.get(field.key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    if field.truncate && text.chars().count() > TRUNCATE_WIDTH {
        let mut short: String = text.chars().take(TRUNCATE_WIDTH - 1).collect();
        short.push('…');
        short
    } else {
        text
    }
}

pub fn sections(registry: &SectionRegistry, l10n: &dyn Localizer) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", l10n.text(registry.title()), registry.id());
    let _ = writeln!(out, "{}:", l10n.text(registry.selector_label()));
    for panel in registry.panels() {
        let descriptor = panel.descriptor();
        let mut actions: Vec<&str> = Vec::new();
        if descriptor.has_detail() {
            actions.push("show");
        }
        actions.extend(descriptor.actions.iter().map(|a| a.name.as_str()));
        let _ = write!(out, "  {:<24} {}", descriptor.id, l10n.text(descriptor.label));
        if !actions.is_empty() {
            let _ = write!(out, "  [{}]", actions.join(", "));
        }
        out.push('\n');
    }
    out
}

/// One list page as an aligned table.
pub fn table(
    descriptor: &PanelDescriptor,
    page: &RowPage,
    number: u32,
    l10n: &dyn Localizer,
) -> String {
    if page.items.is_empty() {
        return format!("{}\n", l10n.text(keys::LABEL_NO_ITEMS));
    }

    let fields: Vec<&FieldSpec> = descriptor.list_fields.iter().filter(|f| visible(f)).collect();
    let header: Vec<String> = fields.iter().map(|f| l10n.text(f.label).into_owned()).collect();
    let body: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|row| fields.iter().map(|f| cell(row, f)).collect())
        .collect();

    let widths: Vec<usize> = (0..fields.len())
        .map(|i| {
            body.iter()
                .map(|cells| cells[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    write_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(&mut out, &rule, &widths);
    for cells in &body {
        write_line(&mut out, cells, &widths);
    }

    let _ = write!(out, "{} {number}", l10n.text(keys::LABEL_PAGE));
    if let Some(count) = page.count {
        let _ = write!(out, " ({count})");
    }
    out.push('\n');
    out
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

/// One row as `label: value` lines.
pub fn detail(fields: &[FieldSpec], row: &Row, l10n: &dyn Localizer) -> String {
    let labels: Vec<String> = fields
        .iter()
        .filter(|f| visible(f))
        .map(|f| l10n.text(f.label).into_owned())
        .collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (field, label) in fields.iter().filter(|f| visible(f)).zip(&labels) {
        let _ = writeln!(out, "{label:<width$}  {}", cell(row, field));
    }
    out
}

/// Result of an action: the row, then notices, then what the host should refresh.
pub fn outcome(
    descriptor: &PanelDescriptor,
    outcome: &ActionOutcome,
    l10n: &dyn Localizer,
) -> String {
    if outcome.cancelled {
        return format!("{}\n", l10n.text(keys::LABEL_ACTION_CANCELLED));
    }

    let mut out = String::new();
    if let Some(row) = &outcome.row {
        let fields = if descriptor.has_detail() {
            &descriptor.detail_fields
        } else {
            &descriptor.list_fields
        };
        out.push_str(&detail(fields, row, l10n));
    }
    for notice in &outcome.notices {
        let prefix = match notice.level {
            NoticeLevel::Info => "note",
        };
        let _ = writeln!(out, "{prefix}: {}", l10n.text(notice.message));
    }
    for signal in &outcome.signals {
        match signal {
            // A one-shot command has nothing cached to refresh.
            HostSignal::RefreshPanel(resource) => {
                tracing::debug!("Refresh requested for {}", resource.panel_id());
            }
            HostSignal::FullRefresh => {
                let _ = writeln!(out, "{}", l10n.text(keys::MESSAGE_REFRESH_ALL));
            }
        }
    }
    out
}
