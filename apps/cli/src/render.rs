//! Plain-text rendering of the workflow view.

use std::fmt::Write as _;

use client_core::{ViewState, WorkflowPhase};

pub fn render_dropdown(view: &ViewState) -> String {
    let mut out = String::new();
    for option in &view.options {
        let marker = if option.selected { '*' } else { ' ' };
        if option.value.is_empty() {
            let _ = writeln!(out, "{marker} {}", option.label);
        } else {
            let _ = writeln!(out, "{marker} [{}] {}", option.value, option.label);
        }
    }
    out
}

pub fn render_buttons(view: &ViewState) -> String {
    format!(
        "[Get List: {}] [Clear: {}]{}\n",
        enabled_label(view.get_list_enabled),
        enabled_label(view.clear_enabled),
        if view.loading { " loading..." } else { "" }
    )
}

/// Empty when there is nothing to show.
pub fn render_table(view: &ViewState) -> String {
    let Some(rows) = &view.table else {
        return String::new();
    };

    let headers = ["Name", "Currencies", "Description"];
    let mut widths = headers.map(str::len);
    for row in rows {
        widths[0] = widths[0].max(row.name.chars().count());
        widths[1] = widths[1].max(row.currencies.chars().count());
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<w0$}  {:<w1$}  {}",
        headers[0],
        headers[1],
        headers[2],
        w0 = widths[0],
        w1 = widths[1]
    );
    let _ = writeln!(
        out,
        "{}  {}  {}",
        "-".repeat(widths[0]),
        "-".repeat(widths[1]),
        "-".repeat(headers[2].len())
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<w0$}  {:<w1$}  {}",
            row.name,
            row.currencies,
            row.description,
            w0 = widths[0],
            w1 = widths[1]
        );
    }
    out
}

pub fn render_screen(view: &ViewState, phase: WorkflowPhase) -> String {
    let mut out = format!("-- {phase:?} --\n");
    out.push_str(&render_dropdown(view));
    out.push_str(&render_buttons(view));
    out.push_str(&render_table(view));
    out
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::PaymentMethodStore;
    use shared::domain::{PaymentMethodEntry, ResidenceItem};

    fn loaded_store() -> PaymentMethodStore {
        let mut store = PaymentMethodStore::new();
        store.update_country_list(vec![ResidenceItem::new("Zimbabwe", "zw", "263")]);
        store.update_selected_country(ResidenceItem::new("Zimbabwe", "zw", "263"));
        store
    }

    #[test]
    fn dropdown_marks_selected_option() {
        let view = ViewState::derive(&loaded_store());
        assert_eq!(
            render_dropdown(&view),
            "  Please select a country\n* [zw] Zimbabwe - zw\n"
        );
    }

    #[test]
    fn buttons_reflect_enablement() {
        let view = ViewState::derive(&PaymentMethodStore::new());
        assert_eq!(render_buttons(&view), "[Get List: off] [Clear: off]\n");
    }

    #[test]
    fn table_is_hidden_without_methods() {
        let view = ViewState::derive(&loaded_store());
        assert_eq!(render_table(&view), "");
    }

    #[test]
    fn table_aligns_columns() {
        let mut store = loaded_store();
        store.update_payment_methods(vec![
            PaymentMethodEntry {
                display_name: "Skrill".into(),
                supported_currencies: vec!["USD".into()],
                description: "e-wallet".into(),
            },
            PaymentMethodEntry {
                display_name: "Bank Wire".into(),
                supported_currencies: vec!["USD".into(), "EUR".into()],
                description: "transfer".into(),
            },
        ]);
        let table = render_table(&ViewState::derive(&store));
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "Name       Currencies  Description");
        assert_eq!(lines[2], "Skrill     USD         e-wallet");
        assert_eq!(lines[3], "Bank Wire  USD, EUR    transfer");
    }
}
