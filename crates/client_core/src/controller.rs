//! Workflow controller: turns user actions and inbound socket messages into
//! store mutations and outbound requests.

use shared::{
    error::ApiException,
    protocol::{ClientRequest, ServerEvent},
};
use tracing::{debug, info, warn};

use crate::{error::TransportError, store::PaymentMethodStore, view::ViewState};

/// Fire-and-forget outbound channel owned by the surrounding application.
pub trait RequestSink {
    fn send(&self, request: &ClientRequest) -> Result<(), TransportError>;
}

impl<T: RequestSink + ?Sized> RequestSink for &T {
    fn send(&self, request: &ClientRequest) -> Result<(), TransportError> {
        (**self).send(request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Init,
    ListLoaded,
    CountrySelected,
    MethodsRequested,
    MethodsLoaded,
}

pub struct WorkflowController<S: RequestSink> {
    sink: S,
    store: PaymentMethodStore,
    mounted: bool,
    list_received: bool,
}

impl<S: RequestSink> WorkflowController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            store: PaymentMethodStore::new(),
            mounted: false,
            list_received: false,
        }
    }

    pub fn store(&self) -> &PaymentMethodStore {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn view(&self) -> ViewState {
        ViewState::derive(&self.store)
    }

    pub fn phase(&self) -> WorkflowPhase {
        if !self.list_received {
            WorkflowPhase::Init
        } else if self.store.loading() {
            WorkflowPhase::MethodsRequested
        } else if !self.store.payment_methods().is_empty() {
            WorkflowPhase::MethodsLoaded
        } else if !self.store.selected_country().is_placeholder() {
            WorkflowPhase::CountrySelected
        } else {
            WorkflowPhase::ListLoaded
        }
    }

    /// Requests the residence list. Only the first call sends anything.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.dispatch(&ClientRequest::ResidenceList);
    }

    pub fn unmount(&mut self) {
        self.store.clear();
        self.mounted = false;
        self.list_received = false;
    }

    /// Applies a dropdown change by option value. The empty value is the
    /// placeholder; codes missing from the current list are ignored.
    pub fn select_country(&mut self, value: &str) -> bool {
        if value.is_empty() {
            self.store.reset_selected_country();
            return true;
        }

        let Some(item) = self
            .store
            .country_list()
            .iter()
            .find(|item| item.value == value)
            .cloned()
        else {
            debug!(residence = value, "ignoring selection of unknown country");
            return false;
        };

        debug!(residence = value, "country selected");
        self.store.update_selected_country(item);
        true
    }

    /// Get-List click. Returns whether a payment-methods request went out.
    pub fn get_list(&mut self) -> bool {
        if self.store.selected_country().is_placeholder() {
            return false;
        }
        if self.store.loading() {
            debug!("payment methods request already outstanding");
            return false;
        }

        let request = ClientRequest::payment_methods(self.store.selected_country().value.clone());
        self.store.toggle_loading();
        if !self.dispatch(&request) {
            // Nothing will ever answer a request that never left.
            self.store.toggle_loading();
            return false;
        }
        true
    }

    /// Clear click. Drops the selection and any results.
    pub fn clear(&mut self) -> bool {
        if self.store.selected_country().is_placeholder()
            && self.store.payment_methods().is_empty()
        {
            return false;
        }
        self.store.reset_selected_country();
        self.store.reset_payment_methods();
        if self.store.loading() {
            self.store.toggle_loading();
        }
        true
    }

    /// Routes one inbound message by shape. Synchronous; only touches the store.
    pub fn handle_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::ResidenceList(items) => {
                info!(count = items.len(), "residence list received");
                self.store.update_country_list(items);
                self.list_received = true;
            }
            ServerEvent::PaymentMethods(items) => {
                if !self.store.loading() {
                    // Late answers (e.g. after Clear) still land in the store.
                    debug!("payment methods received with no outstanding request");
                }
                info!(count = items.len(), "payment methods received");
                self.store.update_payment_methods(items);
                if self.store.loading() {
                    self.store.toggle_loading();
                }
            }
            ServerEvent::Error(err) => {
                // A failed payment-methods request is answered; nothing else will arrive.
                let ends_request = self.store.loading() && err.answers("payment_methods");
                let msg_type = err.msg_type.clone().unwrap_or_default();
                warn!(
                    msg_type = msg_type.as_str(),
                    error = %ApiException::from(err),
                    "remote service reported an error"
                );
                if ends_request {
                    self.store.toggle_loading();
                }
            }
            ServerEvent::Unrecognized => {
                debug!("ignoring unrecognized inbound message");
            }
        }
    }

    fn dispatch(&self, request: &ClientRequest) -> bool {
        match self.sink.send(request) {
            Ok(()) => {
                debug!(kind = request.kind(), "request sent");
                true
            }
            Err(err) => {
                warn!(kind = request.kind(), error = %err, "failed to send request");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
