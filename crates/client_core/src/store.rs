//! Session state backing the residence / payment-method workflow.

use shared::domain::{PaymentMethodEntry, ResidenceItem};

/// Canonical UI-relevant state for one active session. Pure data; every
/// method is synchronous and only touches these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentMethodStore {
    loading: bool,
    country_list: Vec<ResidenceItem>,
    selected_country: ResidenceItem,
    payment_methods: Vec<PaymentMethodEntry>,
}

impl PaymentMethodStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn country_list(&self) -> &[ResidenceItem] {
        &self.country_list
    }

    pub fn selected_country(&self) -> &ResidenceItem {
        &self.selected_country
    }

    pub fn payment_methods(&self) -> &[PaymentMethodEntry] {
        &self.payment_methods
    }

    /// Replaces the list wholesale; the current selection is left alone.
    pub fn update_country_list(&mut self, items: Vec<ResidenceItem>) {
        self.country_list = items;
    }

    /// No membership check against the country list; callers pass a real option.
    pub fn update_selected_country(&mut self, item: ResidenceItem) {
        self.selected_country = item;
    }

    pub fn reset_selected_country(&mut self) {
        self.selected_country = ResidenceItem::placeholder();
    }

    pub fn update_payment_methods(&mut self, items: Vec<PaymentMethodEntry>) {
        self.payment_methods = items;
    }

    pub fn reset_payment_methods(&mut self) {
        self.payment_methods.clear();
    }

    pub fn toggle_loading(&mut self) {
        self.loading = !self.loading;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
