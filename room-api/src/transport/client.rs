use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header, Client, Response};

use crate::{
    request::ToggleCameraRequest,
    response::{decode_payload, RemoteResponse, SuccessSignal, ACCEPTED_STATUS},
};

use super::endpoint::{ACCEPT_MEETING_PATH, TOGGLE_CAMERA_PATH};

/// [RoomControlTransport] performs the calls of the room-control backend.
///
/// Calls never return an error, every outcome including a network failure
/// is folded into a [RemoteResponse] for the caller to match on.
#[async_trait]
pub trait RoomControlTransport: Send + Sync {
    /// Asks the backend to put the camera into the requested state.
    /// Any 2xx status is a success.
    async fn toggle_camera(&self, request: &ToggleCameraRequest) -> RemoteResponse;

    /// Asks the backend to accept the pending meeting.
    /// Only [ACCEPTED_STATUS] is a success.
    async fn accept_meeting(&self) -> RemoteResponse;
}

/// [HttpTransport] talks to the room-control backend with [reqwest]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// # Arguments
    ///
    /// - `base_url` - Origin of the backend, the endpoint paths are appended to it
    /// - `timeout` - Upper bound for a whole call, connecting included
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("could not build the http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn read_response(response: Response, signal: SuccessSignal) -> RemoteResponse {
    let status = response.status().as_u16();

    match response.text().await {
        Ok(body) => RemoteResponse::classify(status, decode_payload(&body), signal),
        Err(err) => RemoteResponse::NetworkFailure(
            anyhow::Error::new(err).context("could not read the response body"),
        ),
    }
}

async fn finish_call(
    result: reqwest::Result<Response>,
    signal: SuccessSignal,
    call: &'static str,
) -> RemoteResponse {
    match result {
        Ok(response) => read_response(response, signal).await,
        Err(err) => {
            RemoteResponse::NetworkFailure(anyhow::Error::new(err).context(format!("{call} failed")))
        }
    }
}

#[async_trait]
impl RoomControlTransport for HttpTransport {
    async fn toggle_camera(&self, request: &ToggleCameraRequest) -> RemoteResponse {
        let url = self.url(TOGGLE_CAMERA_PATH);
        tracing::debug!(%url, camera_state = request.camera_state, "sending toggle camera request");

        let result = self.client.post(&url).json(request).send().await;

        finish_call(result, SuccessSignal::AnySuccess, "toggle camera request").await
    }

    async fn accept_meeting(&self) -> RemoteResponse {
        let url = self.url(ACCEPT_MEETING_PATH);
        tracing::debug!(%url, "sending accept meeting request");

        let result = self
            .client
            .get(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await;

        finish_call(
            result,
            SuccessSignal::Exactly(ACCEPTED_STATUS),
            "accept meeting request",
        )
        .await
    }
}
