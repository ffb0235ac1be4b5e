// Purpose: WebSocket endpoint carrying timer sync frames to clients.
// Responsibilities: register the socket under the caller's user group,
// forward hub messages, and honor explicit join/leave frames.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use uuid::Uuid;

use crate::shell::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectParams {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", tag = "action")]
enum GroupFrame {
    Join { group: Uuid },
    Leave { group: Uuid },
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ConnectParams>,
    upgrade: WebSocketUpgrade,
) -> Response {
    upgrade.on_upgrade(move |socket| serve(state, params.user_id, socket))
}

async fn serve(state: AppState, user_id: Uuid, mut socket: WebSocket) {
    let (tx, mut rx) = crate::shared::infrastructure::realtime::hub::SyncHub::subscribe();
    state.hub.join(user_id, &tx).await;
    tracing::debug!(%user_id, "timer sync socket connected");

    loop {
        tokio::select! {
            outbound = rx.recv() => {
                let Some(message) = outbound else { break };
                if socket.send(Message::Text(message.into())).await.is_err() {
                    break;
                }
            }
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<GroupFrame>(&text) {
                            Ok(GroupFrame::Join { group }) => state.hub.join(group, &tx).await,
                            Ok(GroupFrame::Leave { group }) => state.hub.leave(group, &tx).await,
                            Err(error) => {
                                tracing::debug!(%user_id, %error, "ignoring unknown frame");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.hub.leave(user_id, &tx).await;
    tracing::debug!(%user_id, "timer sync socket disconnected");
}
