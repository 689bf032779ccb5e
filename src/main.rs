use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

use parlor::app::{config, r#loop::run_loop, state::AppState};
use parlor::domain::link::ServerLink;
use parlor::infrastructure::{NullLink, TcpLink};
use parlor::logging;

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();

    if let Err(err) = logging::init() {
        eprintln!("logging disabled: {err:#}");
    }

    // Connect BEFORE terminal setup so a refused connection prints a plain
    // error instead of leaving the terminal in raw mode.
    let config = config::load();
    let (net_tx, net_rx) = mpsc::channel(100);
    let link: Arc<dyn ServerLink> = if config.server.host.is_empty() {
        tracing::info!("no server configured, starting offline");
        Arc::new(NullLink)
    } else {
        Arc::new(TcpLink::connect(&config.server.host, config.server.port, net_tx).await?)
    };
    let app_state = AppState::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, link, net_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}
