//! Main TUI runner - entry points and event loop

use ledgrid_app::config::Settings;
use ledgrid_app::Engine;
use ledgrid_core::prelude::*;
use ledgrid_device::{DeviceGateway, HttpGateway};
use ratatui::layout::Rect;

use super::{event, layout, render, terminal};

/// Run the TUI against the device named in `settings`
pub async fn run(settings: Settings) -> Result<()> {
    let gateway = HttpGateway::new(
        &settings.device.base_url,
        settings.device.request_timeout(),
        settings.device.grid_size,
    )?;
    run_with_gateway(settings, gateway).await
}

/// Run the TUI with any gateway implementation
pub async fn run_with_gateway<G>(settings: Settings, gateway: G) -> Result<()>
where
    G: DeviceGateway + Send + Sync + 'static,
{
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut engine = Engine::new(settings, gateway);
    info!(
        "Controlling {}x{} grid at {}",
        engine.state.grid_size(),
        engine.state.grid_size(),
        engine.settings.device.base_url
    );

    let mut term = ratatui::init();
    if let Err(e) = terminal::enable_mouse() {
        warn!("{}", e);
    }

    engine.start_polling();

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown().await;

    terminal::disable_mouse();
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop<G>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<G>) -> Result<()>
where
    G: DeviceGateway + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Process results from device tasks, poll ticks and signals
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        let size = terminal.size()?;
        let grid_size = engine.state.grid_size();
        let areas = layout::create(Rect::new(0, 0, size.width, size.height), grid_size);

        // Handle terminal events
        if let Some(message) = event::poll(&areas, grid_size)? {
            engine.process_message(message);
        }
    }

    Ok(())
}
