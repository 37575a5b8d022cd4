//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use ledgrid_device::DeviceGateway;
use tokio::sync::mpsc;

use crate::message::Message;
use crate::UpdateAction;

pub(crate) mod device;
pub mod polling;

pub use polling::spawn_status_polling;

/// Execute an action by spawning a background task.
///
/// Every task reports back with exactly one result message on `msg_tx`.
pub fn handle_action<G>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, gateway: Arc<G>)
where
    G: DeviceGateway + Send + Sync + 'static,
{
    match action {
        UpdateAction::WritePixel { coord, color } => {
            device::spawn_pixel_write(gateway, coord, color, msg_tx);
        }

        UpdateAction::FetchStatus => {
            device::spawn_status_fetch(gateway, msg_tx);
        }

        UpdateAction::SetMode(mode) => {
            device::spawn_mode_change(gateway, mode, msg_tx);
        }
    }
}
