use super::*;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::DateTime;
use serde_json::json;
use shared::domain::{MatchPreference, ProductArea, Role, TalkDuration};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone)]
struct ServerState {
    tx: Arc<Mutex<Option<oneshot::Sender<Value>>>>,
    status: StatusCode,
    reply: &'static str,
}

async fn handle_add_participant(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, &'static str) {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(body);
    }
    (state.status, state.reply)
}

async fn handle_remove_participant() -> &'static str {
    "Received remove request.\n"
}

async fn spawn_matching_server(
    status: StatusCode,
    reply: &'static str,
) -> Result<(String, oneshot::Receiver<Value>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        tx: Arc::new(Mutex::new(Some(tx))),
        status,
        reply,
    };
    let app = Router::new()
        .route("/api/v1/add-participant", post(handle_add_participant))
        .route("/api/v1/remove-participant", post(handle_remove_participant))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), rx))
}

fn intern_in_core() -> FormDetails {
    FormDetails {
        time_available_until: DateTime::from_timestamp_millis(1_000 + 15 * 60_000 + 1)
            .expect("timestamp"),
        duration: TalkDuration::Fifteen,
        role: Some(Role::Intern),
        product_area: Some(ProductArea::Core),
        match_preference: MatchPreference::Similar,
        save_preference: false,
    }
}

#[tokio::test]
async fn add_participant_posts_form_details_body() {
    let (server_url, body_rx) = spawn_matching_server(StatusCode::OK, "{\"queued\":true}")
        .await
        .expect("spawn server");
    let client = MatchmakingClient::new(&server_url).expect("client");

    let outcome = client
        .add_participant(&intern_in_core())
        .await
        .expect("submit");
    let body = body_rx.await.expect("captured body");

    assert_eq!(
        body,
        json!({
            "formDetails": {
                "timeAvailableUntil": 1_000 + 15 * 60_000 + 1,
                "duration": 15,
                "role": "Intern",
                "productArea": "Core",
                "matchPreference": "similar",
                "savePreference": false,
            }
        })
    );
    assert_eq!(outcome, SubmitOutcome::Confirmed(json!({"queued": true})));
}

#[tokio::test]
async fn null_body_is_not_a_confirmation() {
    let (server_url, _body_rx) = spawn_matching_server(StatusCode::OK, "null")
        .await
        .expect("spawn server");
    let client = MatchmakingClient::new(&server_url).expect("client");

    let outcome = client
        .add_participant(&intern_in_core())
        .await
        .expect("submit");
    assert_eq!(outcome, SubmitOutcome::Unconfirmed);
}

#[tokio::test]
async fn empty_body_still_confirms_submission() {
    let (server_url, _body_rx) = spawn_matching_server(StatusCode::OK, "")
        .await
        .expect("spawn server");
    let client = MatchmakingClient::new(&server_url).expect("client");

    let outcome = client
        .add_participant(&intern_in_core())
        .await
        .expect("submit");
    assert!(outcome.is_confirmed());
    assert_eq!(outcome, SubmitOutcome::Confirmed(json!("")));
}

#[tokio::test]
async fn server_error_is_reported_with_status_and_body() {
    let (server_url, _body_rx) =
        spawn_matching_server(StatusCode::INTERNAL_SERVER_ERROR, "Invalid input(s).")
            .await
            .expect("spawn server");
    let client = MatchmakingClient::new(&server_url).expect("client");

    let err = client
        .add_participant(&intern_in_core())
        .await
        .expect_err("server error");
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "Invalid input(s).");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = MatchmakingClient::new(&format!("http://{addr}")).expect("client");
    let err = client
        .add_participant(&intern_in_core())
        .await
        .expect_err("connection refused");
    assert!(matches!(err, ClientError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn remove_participant_returns_acknowledgement_text() {
    let (server_url, _body_rx) = spawn_matching_server(StatusCode::OK, "")
        .await
        .expect("spawn server");
    let client = MatchmakingClient::new(&server_url).expect("client");

    let ack = client.remove_participant().await.expect("leave queue");
    assert_eq!(ack, "Received remove request.");
}

#[test]
fn endpoint_keeps_base_path() {
    let client = MatchmakingClient::new("https://adlib.example.com/app").expect("client");
    assert_eq!(
        client.endpoint(ADD_PARTICIPANT_PATH).expect("url").as_str(),
        "https://adlib.example.com/app/api/v1/add-participant"
    );

    let client = MatchmakingClient::new("http://127.0.0.1:8080/").expect("client");
    assert_eq!(
        client.endpoint(REMOVE_PARTICIPANT_PATH).expect("url").as_str(),
        "http://127.0.0.1:8080/api/v1/remove-participant"
    );
}

#[test]
fn rejects_unparseable_server_url() {
    let err = MatchmakingClient::new("not a url").err().expect("invalid url");
    assert!(matches!(err, ClientError::InvalidServerUrl { .. }));
}

#[test]
fn outcome_is_unconfirmed_only_for_a_null_body() {
    assert_eq!(
        SubmitOutcome::from_body(""),
        SubmitOutcome::Confirmed(json!(""))
    );
    assert_eq!(SubmitOutcome::from_body(" null\n"), SubmitOutcome::Unconfirmed);
    assert_eq!(
        SubmitOutcome::from_body("{}"),
        SubmitOutcome::Confirmed(json!({}))
    );
    assert_eq!(
        SubmitOutcome::from_body("ok"),
        SubmitOutcome::Confirmed(json!("ok"))
    );
}
