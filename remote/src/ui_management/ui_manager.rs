use std::io::{self, Stdout};

use anyhow::Context;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::{
    broadcast,
    mpsc::{self, UnboundedReceiver},
};
use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::{
    state_store::{action::Action, State},
    ui_management::components::{Component, ComponentRender},
    Interrupted,
};

use super::pages::ControlPage;

pub struct UiManager {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl UiManager {
    pub fn new() -> (Self, UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        (Self { action_tx }, action_rx)
    }

    /// Runs the control page on the real terminal until an interrupt arrives
    /// or the terminal input closes.
    pub async fn main_loop(
        self,
        state_rx: UnboundedReceiver<State>,
        interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        let mut session = TerminalSession::enter()?;

        let result = self
            .drive(session.terminal_mut(), EventStream::new(), state_rx, interrupt_rx)
            .await;

        session.leave()?;

        result
    }

    async fn drive<B, E>(
        &self,
        terminal: &mut Terminal<B>,
        mut terminal_events: E,
        mut state_rx: UnboundedReceiver<State>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted>
    where
        B: Backend,
        E: Stream<Item = io::Result<Event>> + Unpin,
    {
        let state = state_rx
            .recv()
            .await
            .context("state store stopped before publishing the initial state")?;
        let mut control_page = ControlPage::new(&state, self.action_tx.clone());
        info!(page = control_page.name(), room = %state.room_name, "ui ready");

        loop {
            terminal
                .draw(|frame| control_page.render(frame, ()))
                .context("could not render to the terminal")?;

            // redraws happen only after something changed
            tokio::select! {
                biased;

                // Apply state updates before reading keys, so keys act on the latest controls
                Some(state) = state_rx.recv() => {
                    control_page = control_page.move_with_state(&state);
                },
                maybe_event = terminal_events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => control_page.handle_key_event(key),
                    Some(Ok(Event::Resize(width, height))) => {
                        info!(width, height, "terminal resized");
                    },
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => warn!(error = %err, "could not read terminal event"),
                    // input is gone, ask the state store to stop as well
                    None => {
                        let _ = self.action_tx.send(Action::Exit);

                        return Ok(Interrupted::UserInt);
                    },
                },
                Ok(interrupted) = interrupt_rx.recv() => return Ok(interrupted),
            }
        }
    }
}

/// Raw mode on the alternate screen, undone by [TerminalSession::leave]
/// or, when the UI bails out early, on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl TerminalSession {
    fn enter() -> anyhow::Result<Self> {
        let mut stdout = io::stdout();

        enable_raw_mode().context("could not enable raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("could not enter the alternate screen")?;

        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
            active: true,
        })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    fn leave(mut self) -> anyhow::Result<()> {
        self.active = false;

        restore(&mut self.terminal)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            if let Err(err) = restore(&mut self.terminal) {
                warn!(error = %format!("{:#}", err), "could not restore the terminal");
            }
        }
    }
}

fn restore(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(terminal.show_cursor()?)
}
