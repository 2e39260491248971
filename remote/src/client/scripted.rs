use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use room_api::{
    request::ToggleCameraRequest,
    response::{RemoteResponse, SuccessSignal, ACCEPTED_STATUS},
    transport::client::RoomControlTransport,
};
use serde_json::{json, Value};

/// Canned answer of the [ScriptedTransport]
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Status(u16, Value),
    Network(&'static str),
}

impl Scripted {
    fn into_response(self, signal: SuccessSignal) -> RemoteResponse {
        match self {
            Scripted::Status(status, payload) => RemoteResponse::classify(status, payload, signal),
            Scripted::Network(cause) => RemoteResponse::NetworkFailure(anyhow::anyhow!(cause)),
        }
    }
}

/// In-memory backend which replays queued answers and records every call.
/// Once a queue runs dry the call succeeds.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    toggle_answers: Mutex<VecDeque<Scripted>>,
    accept_answers: Mutex<VecDeque<Scripted>>,
    toggle_requests: Mutex<Vec<ToggleCameraRequest>>,
    accept_calls: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_toggle(&self, answer: Scripted) {
        self.toggle_answers.lock().unwrap().push_back(answer);
    }

    pub(crate) fn push_accept(&self, answer: Scripted) {
        self.accept_answers.lock().unwrap().push_back(answer);
    }

    pub(crate) fn toggle_requests(&self) -> Vec<ToggleCameraRequest> {
        self.toggle_requests.lock().unwrap().clone()
    }

    pub(crate) fn accept_calls(&self) -> usize {
        self.accept_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoomControlTransport for ScriptedTransport {
    async fn toggle_camera(&self, request: &ToggleCameraRequest) -> RemoteResponse {
        self.toggle_requests.lock().unwrap().push(*request);

        let answer = self
            .toggle_answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Scripted::Status(200, json!({"status": "ok"})));

        answer.into_response(SuccessSignal::AnySuccess)
    }

    async fn accept_meeting(&self) -> RemoteResponse {
        self.accept_calls.fetch_add(1, Ordering::SeqCst);

        let answer = self
            .accept_answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Scripted::Status(ACCEPTED_STATUS, json!({"message": "Zoom Room joined the meeting"}))
            });

        answer.into_response(SuccessSignal::Exactly(ACCEPTED_STATUS))
    }
}
