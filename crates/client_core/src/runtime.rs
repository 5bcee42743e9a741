//! Single-task event loop feeding socket messages and user actions into the
//! controller, re-rendering after each one.

use shared::protocol::ServerEvent;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    controller::{RequestSink, WorkflowController, WorkflowPhase},
    view::ViewState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Dropdown change, by option value. The empty value is the placeholder.
    SelectCountry(String),
    GetList,
    Clear,
    /// Re-render the current view without touching the store.
    Show,
}

pub fn apply_action<S: RequestSink>(controller: &mut WorkflowController<S>, action: UserAction) {
    let applied = match &action {
        UserAction::SelectCountry(value) => controller.select_country(value),
        UserAction::GetList => controller.get_list(),
        UserAction::Clear => controller.clear(),
        UserAction::Show => true,
    };
    debug!(?action, applied, "user action");
}

/// Mounts the controller and runs until either channel closes. The last
/// rendered view is returned and the controller is unmounted. When a message
/// and an action are both ready, the message is applied first.
pub async fn run_workflow<S, F>(
    mut controller: WorkflowController<S>,
    mut inbound: mpsc::UnboundedReceiver<ServerEvent>,
    mut actions: mpsc::UnboundedReceiver<UserAction>,
    mut render: F,
) -> ViewState
where
    S: RequestSink,
    F: FnMut(&ViewState, WorkflowPhase),
{
    controller.mount();
    let mut view = controller.view();
    render(&view, controller.phase());

    loop {
        tokio::select! {
            biased;
            event = inbound.recv() => match event {
                Some(event) => controller.handle_event(event),
                None => {
                    info!("inbound message channel closed");
                    break;
                }
            },
            action = actions.recv() => match action {
                Some(action) => apply_action(&mut controller, action),
                None => {
                    debug!("user action channel closed");
                    break;
                }
            },
        }
        view = controller.view();
        render(&view, controller.phase());
    }

    controller.unmount();
    view
}
