use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
    time::Duration,
};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use room_api::{
    request::ToggleCameraRequest,
    response::RemoteResponse,
    transport::{
        client::{HttpTransport, RoomControlTransport},
        endpoint::{ACCEPT_MEETING_PATH, TOGGLE_CAMERA_PATH},
    },
};
use serde_json::{json, Value};
use tokio::sync::Mutex;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Fake room-control backend answering with fixed statuses and recording toggle bodies
#[derive(Clone)]
struct FakeBackend {
    toggle_status: StatusCode,
    accept_status: StatusCode,
    toggle_bodies: Arc<Mutex<Vec<Value>>>,
}

impl FakeBackend {
    fn new(toggle_status: StatusCode, accept_status: StatusCode) -> Self {
        Self {
            toggle_status,
            accept_status,
            toggle_bodies: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn toggle_camera(
    State(backend): State<FakeBackend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.toggle_bodies.lock().await.push(body);

    (backend.toggle_status, Json(json!({"status": "ok"})))
}

async fn accept_meeting(State(backend): State<FakeBackend>) -> (StatusCode, Json<Value>) {
    (
        backend.accept_status,
        Json(json!({"message": "Zoom Room joined the meeting"})),
    )
}

// serve the fake backend on an ephemeral port and return the base url of it
async fn spawn_backend(backend: FakeBackend) -> String {
    let app = Router::new()
        .route(TOGGLE_CAMERA_PATH, post(toggle_camera))
        .route(ACCEPT_MEETING_PATH, get(accept_meeting))
        .with_state(backend);

    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);

    format!("http://{}", addr)
}

#[tokio::test]
async fn toggle_camera_posts_desired_state() {
    let backend = FakeBackend::new(StatusCode::OK, StatusCode::ACCEPTED);
    let base_url = spawn_backend(backend.clone()).await;
    let transport = HttpTransport::new(&base_url, TIMEOUT).expect("transport should build");

    let response = transport
        .toggle_camera(&ToggleCameraRequest::new(true))
        .await;

    match response {
        RemoteResponse::Ok(payload) => assert_eq!(payload, json!({"status": "ok"})),
        other => panic!("expected a successful response, got {:?}", other),
    }
    assert_eq!(
        *backend.toggle_bodies.lock().await,
        vec![json!({"cameraState": true})]
    );
}

#[tokio::test]
async fn toggle_camera_with_server_error_is_unexpected() {
    let backend = FakeBackend::new(StatusCode::INTERNAL_SERVER_ERROR, StatusCode::ACCEPTED);
    let base_url = spawn_backend(backend).await;
    let transport = HttpTransport::new(&base_url, TIMEOUT).expect("transport should build");

    let response = transport
        .toggle_camera(&ToggleCameraRequest::new(false))
        .await;

    assert!(matches!(
        response,
        RemoteResponse::Unexpected { status: 500, .. }
    ));
}

#[tokio::test]
async fn accept_meeting_succeeds_only_with_accepted_status() {
    let accepted_url = spawn_backend(FakeBackend::new(StatusCode::OK, StatusCode::ACCEPTED)).await;
    let plain_ok_url = spawn_backend(FakeBackend::new(StatusCode::OK, StatusCode::OK)).await;

    let accepted = HttpTransport::new(&accepted_url, TIMEOUT)
        .expect("transport should build")
        .accept_meeting()
        .await;
    let plain_ok = HttpTransport::new(&plain_ok_url, TIMEOUT)
        .expect("transport should build")
        .accept_meeting()
        .await;

    assert!(matches!(accepted, RemoteResponse::Ok(_)));
    match plain_ok {
        RemoteResponse::Unexpected { status, payload } => {
            assert_eq!(status, 200);
            assert_eq!(payload, json!({"message": "Zoom Room joined the meeting"}));
        }
        other => panic!("expected an unexpected response, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    // grab a free port and release it so nothing is listening there
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("could not bind to a port");
        listener.local_addr().expect("listener should have an address")
    };
    let transport =
        HttpTransport::new(&format!("http://{}/", addr), TIMEOUT).expect("transport should build");

    assert_eq!(transport.base_url(), format!("http://{}", addr));
    assert!(matches!(
        transport.accept_meeting().await,
        RemoteResponse::NetworkFailure(_)
    ));
    assert!(matches!(
        transport.toggle_camera(&ToggleCameraRequest::new(true)).await,
        RemoteResponse::NetworkFailure(_)
    ));
}
