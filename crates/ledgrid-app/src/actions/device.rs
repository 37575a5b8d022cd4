//! Device request tasks
//!
//! Each spawn function issues one gateway call and sends the outcome back as
//! a result message. A closed channel means the engine is gone, so the result
//! is dropped.

use std::sync::Arc;

use ledgrid_core::prelude::*;
use ledgrid_core::{Color, Coordinate};
use ledgrid_device::{DeviceGateway, DeviceMode};
use tokio::sync::mpsc;

use crate::message::Message;

pub(super) fn spawn_pixel_write<G>(
    gateway: Arc<G>,
    coord: Coordinate,
    color: Color,
    msg_tx: mpsc::Sender<Message>,
) where
    G: DeviceGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        trace!("set_pixel {} {}", coord, color);
        let result = gateway.set_pixel(coord, color).await;
        if msg_tx
            .send(Message::PixelWriteFinished {
                coord,
                color,
                result,
            })
            .await
            .is_err()
        {
            debug!("Engine gone, dropping write result for {}", coord);
        }
    });
}

pub(super) fn spawn_status_fetch<G>(gateway: Arc<G>, msg_tx: mpsc::Sender<Message>)
where
    G: DeviceGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = gateway.fetch_status().await;
        if msg_tx.send(Message::PollFinished { result }).await.is_err() {
            debug!("Engine gone, dropping poll result");
        }
    });
}

pub(super) fn spawn_mode_change<G>(gateway: Arc<G>, mode: DeviceMode, msg_tx: mpsc::Sender<Message>)
where
    G: DeviceGateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("Requesting device mode {}", mode);
        let result = gateway.set_mode(mode).await;
        if msg_tx
            .send(Message::ModeFinished { mode, result })
            .await
            .is_err()
        {
            debug!("Engine gone, dropping {} mode result", mode);
        }
    });
}
