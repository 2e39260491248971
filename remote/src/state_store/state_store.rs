use tokio::{
    sync::{
        broadcast,
        mpsc::{self, UnboundedReceiver, UnboundedSender},
    },
    task::JoinSet,
};
use tracing::{error, info};

use crate::{
    client::{Completion, RoomControlClient},
    Interrupted, Terminator,
};

use super::{action::Action, State};

pub struct StateStore {
    state_tx: UnboundedSender<State>,
    client: RoomControlClient,
    room_name: String,
}

impl StateStore {
    pub fn new(client: RoomControlClient, room_name: String) -> (Self, UnboundedReceiver<State>) {
        let (state_tx, state_rx) = mpsc::unbounded_channel::<State>();

        (
            StateStore {
                state_tx,
                client,
                room_name,
            },
            state_rx,
        )
    }
}

impl StateStore {
    pub async fn main_loop(
        mut self,
        mut terminator: Terminator,
        mut action_rx: UnboundedReceiver<Action>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        let mut state = State::new(self.room_name.clone());
        // remote calls in flight, dropping the set aborts them
        let mut pending_calls: JoinSet<Completion> = JoinSet::new();

        // the initial state once
        self.state_tx.send(state.clone())?;

        let result = loop {
            tokio::select! {
                // Handle the actions coming from the UI
                // and start the remote calls without waiting for them
                Some(action) = action_rx.recv() => match action {
                    Action::ToggleCamera => {
                        if let Some(call) = self.client.begin_toggle_camera(&mut state.device) {
                            pending_calls.spawn(call);
                        }
                    },
                    Action::AcceptMeeting => {
                        if let Some(call) = self.client.begin_accept_meeting(&state.device) {
                            pending_calls.spawn(call);
                        }
                    },
                    Action::Exit => {
                        let _ = terminator.terminate(Interrupted::UserInt);

                        break Interrupted::UserInt;
                    },
                },
                // Apply finished calls one at a time, in the order they finish
                Some(joined) = pending_calls.join_next(), if !pending_calls.is_empty() => match joined {
                    Ok(completion) => {
                        let reconciled = self.client.reconcile(&mut state.device, completion);
                        info!(?reconciled, "remote call finished");
                    },
                    Err(err) => error!(error = %err, "remote call task did not finish"),
                },
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break interrupted;
                },
                // the UI is gone and nothing can stop the loop anymore
                else => break Interrupted::UserInt,
            }

            self.state_tx.send(state.clone())?;
        };

        if !pending_calls.is_empty() {
            info!(in_flight = pending_calls.len(), "abandoning remote calls still in flight");
        }

        Ok(result)
    }
}
