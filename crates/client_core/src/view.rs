//! Derived view model. Recomputed from the store on every render; holds no
//! state of its own.

use shared::domain::{PaymentMethodEntry, PLACEHOLDER_LABEL};

use crate::store::PaymentMethodStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethodRow {
    pub name: String,
    pub currencies: String,
    pub description: String,
}

impl From<&PaymentMethodEntry> for PaymentMethodRow {
    fn from(entry: &PaymentMethodEntry) -> Self {
        Self {
            name: entry.display_name.clone(),
            currencies: entry.currencies_label(),
            description: entry.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Placeholder first, then one entry per country in delivery order.
    pub options: Vec<DropdownOption>,
    pub get_list_enabled: bool,
    pub clear_enabled: bool,
    pub loading: bool,
    /// `None` while there are no payment methods to show.
    pub table: Option<Vec<PaymentMethodRow>>,
}

impl ViewState {
    pub fn derive(store: &PaymentMethodStore) -> Self {
        let selected_value = store.selected_country().value.as_str();

        let mut options = Vec::with_capacity(store.country_list().len() + 1);
        options.push(DropdownOption {
            value: String::new(),
            label: PLACEHOLDER_LABEL.to_string(),
            selected: false,
        });
        options.extend(store.country_list().iter().map(|item| DropdownOption {
            value: item.value.clone(),
            label: item.option_label(),
            selected: false,
        }));
        // Exactly one option is marked, the first whose value matches.
        if let Some(option) = options.iter_mut().find(|o| o.value == selected_value) {
            option.selected = true;
        }

        let has_selection = !store.selected_country().is_placeholder();
        let methods = store.payment_methods();

        Self {
            options,
            get_list_enabled: has_selection,
            clear_enabled: has_selection || !methods.is_empty(),
            loading: store.loading(),
            table: (!methods.is_empty())
                .then(|| methods.iter().map(PaymentMethodRow::from).collect()),
        }
    }

    pub fn selected_option(&self) -> Option<&DropdownOption> {
        self.options.iter().find(|option| option.selected)
    }

    pub fn table_visible(&self) -> bool {
        self.table.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::ResidenceItem;

    fn store_with_list() -> PaymentMethodStore {
        let mut store = PaymentMethodStore::new();
        store.update_country_list(vec![
            ResidenceItem::new("Indonesia", "id", "62"),
            ResidenceItem::new("Zimbabwe", "zw", "263"),
        ]);
        store
    }

    #[test]
    fn initial_view_has_only_placeholder_selected() {
        let view = ViewState::derive(&PaymentMethodStore::new());
        assert_eq!(view.options.len(), 1);
        assert_eq!(view.options[0].label, PLACEHOLDER_LABEL);
        assert!(view.options[0].selected);
        assert!(!view.get_list_enabled);
        assert!(!view.clear_enabled);
        assert!(!view.table_visible());
    }

    #[test]
    fn options_follow_list_order_with_labels() {
        let view = ViewState::derive(&store_with_list());
        let labels: Vec<_> = view.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![PLACEHOLDER_LABEL, "Indonesia - id", "Zimbabwe - zw"]
        );
    }

    #[test]
    fn selection_marks_matching_option_and_enables_buttons() {
        let mut store = store_with_list();
        store.update_selected_country(ResidenceItem::new("Zimbabwe", "zw", "263"));
        let view = ViewState::derive(&store);
        assert_eq!(view.selected_option().map(|o| o.value.as_str()), Some("zw"));
        assert!(!view.options[0].selected);
        assert!(view.get_list_enabled);
        assert!(view.clear_enabled);
    }

    #[test]
    fn clear_stays_enabled_while_methods_are_shown() {
        let mut store = store_with_list();
        store.update_payment_methods(vec![PaymentMethodEntry {
            display_name: "Skrill".into(),
            supported_currencies: vec!["USD".into(), "EUR".into()],
            description: "e-wallet".into(),
        }]);
        let view = ViewState::derive(&store);
        assert!(!view.get_list_enabled);
        assert!(view.clear_enabled);
        assert_eq!(
            view.table,
            Some(vec![PaymentMethodRow {
                name: "Skrill".into(),
                currencies: "USD, EUR".into(),
                description: "e-wallet".into(),
            }])
        );
    }
}
