use crate::app::{
    action::Action,
    command::{handle_command, Command},
    input::map_event_to_action,
    reducer,
    state::AppState,
    ui,
};
use crate::domain::link::ServerLink;

use anyhow::Result;
use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    link: Arc<dyn ServerLink>,
    net_rx: mpsc::Receiver<Action>,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, link, net_rx, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    link: Arc<dyn ServerLink>,
    mut net_rx: mpsc::Receiver<Action>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    // Authorization opens every session; the server answers with the first
    // menu push.
    handle_command(
        Command::SendAuthorize {
            username: app_state.config.server.username.clone(),
            password: app_state.config.server.password.clone(),
        },
        link.clone(),
        action_tx.clone(),
    );

    loop {
        // --- 1. Speech pump ---
        for committed in app_state.announcer.take_ready() {
            app_state.apply_committed(committed);
        }
        if !app_state.pending_cues.is_empty() {
            if app_state.config.interface.bell {
                ring_bell();
            }
            app_state.pending_cues.clear();
        }

        // --- 2. Render ---
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        // --- 3. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            Some(res) = event_rx.recv() => {
                let event = match res {
                    Ok(e) => e,
                    Err(e) => return Err(e.into()),
                };
                let action = map_event_to_action(event.clone(), &app_state, terminal.size()?);
                if let Event::Mouse(mouse) = event {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        app_state.last_click_time = Some(Instant::now());
                        app_state.last_click_pos = Some((mouse.column, mouse.row));
                    }
                }
                action
            },

            // Inbound server traffic
            Some(a) = net_rx.recv() => Some(a),

            // Async results
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 4. Update (Reducer) ---
        if let Some(action) = action {
            if let Action::Quit = action {
                break;
            }

            let command = reducer::update(&mut app_state, action);

            if app_state.should_quit {
                break;
            }

            if let Some(cmd) = command {
                handle_command(cmd, link.clone(), action_tx.clone());
            }
        }
    }

    Ok(())
}

// One BEL per frame no matter how many cues landed in it.
fn ring_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
