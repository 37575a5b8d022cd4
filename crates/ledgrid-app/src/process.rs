//! Message processing
//!
//! Runs TEA message processing and dispatches the resulting actions to the
//! device gateway.

use std::sync::Arc;

use ledgrid_device::DeviceGateway;
use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function.
///
/// Follow-up messages are processed in the same call, so one input can
/// fan out into several actions before the next frame is drawn.
pub fn process_message<G>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    gateway: &Arc<G>,
) where
    G: DeviceGateway + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), Arc::clone(gateway));
        }

        msg = result.message;
    }
}
