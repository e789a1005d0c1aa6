// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::time::Instant;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use board::budget::{BudgetSummary, summarize};
use board::confirm::{ConfirmationId, Decision, PromptInfo};
use board::{
    BoardError, BoardItem, BoardView, DragOutcome, DragResult, FilterState, Notice, Notifier,
    StatusChange,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::notifications::Stamped;
use crate::state::{AppState, BoardState};

/// Handler returning the current view of a board.
pub async fn get_board<I: BoardItem>(State(state): State<BoardState<I>>) -> Json<BoardView<I>> {
    Json(state.board.view())
}

/// Handler replacing the filters of a board.
pub async fn set_filters<I: BoardItem>(
    State(state): State<BoardState<I>>,
    Json(filters): Json<FilterState<I::Selectors>>, // Extracting the request body as JSON
) -> Json<BoardView<I>> {
    debug!("Setting {} filters: {:?}", state.board.config().kind(), filters);
    state.board.set_filters(filters);
    Json(state.board.view())
}

/// Handler re-fetching a board from the backend.
pub async fn refresh_board<I: BoardItem>(
    State(state): State<BoardState<I>>,
) -> Result<Json<BoardView<I>>, AppError> {
    let count = state.board.refresh().await?;
    info!("Refreshed {} with {} items.", state.board.config().kind(), count);
    Ok(Json(state.board.view()))
}

/// Body returned after a drop.
#[derive(Serialize, Debug)]
pub struct MoveResponse<I: BoardItem> {
    #[serde(flatten)]
    pub outcome: DragOutcome<I>,
    pub view: BoardView<I>,
}

/// Handler for a released card.
pub async fn move_item<I: BoardItem>(
    State(state): State<BoardState<I>>,
    Json(drag): Json<DragResult>,
) -> Result<Json<MoveResponse<I>>, AppError> {
    debug!(
        "Received drop of {} from {} to {:?}",
        drag.item_id,
        drag.source.column_id,
        drag.destination.as_ref().map(|d| d.column_id.as_str())
    );

    let outcome = state.board.handle_drop(&drag).await?;

    Ok(Json(MoveResponse {
        outcome,
        view: state.board.view(),
    }))
}

/// Handler asking for confirmation before deleting an item.
///
/// Answers right away with the open prompt; the deletion itself only runs
/// once the prompt is confirmed.
pub async fn request_delete<I: BoardItem>(
    State(state): State<BoardState<I>>,
    Path(item_id): Path<String>, // Extract item ID from the URL path
) -> Result<(StatusCode, Json<PromptInfo>), AppError> {
    if state.board.store().get(&item_id).is_none() {
        return Err(AppError::new(
            StatusCode::NOT_FOUND,
            &format!("Item with ID {} not found for deletion.", item_id),
        ));
    }

    let pending = state.confirmations.request(
        format!("Delete {} item {}?", state.board.config().kind(), item_id),
        state.confirm_countdown,
    );
    let prompt = PromptInfo {
        id: pending.id(),
        prompt: pending.prompt().to_string(),
        remaining_secs: state.confirm_countdown.as_secs(),
    };

    let board = state.board.clone();
    let notices = state.notices.clone();
    tokio::spawn(async move {
        match pending.decision().await {
            Decision::Confirmed => {
                if let Err(e) = board.delete_item(&item_id).await {
                    error!("Deletion of {} failed: {}", item_id, e);
                }
            }
            decision => {
                info!("Deletion of {} not confirmed: {:?}", item_id, decision);
                notices.notify(Notice::info("Deletion cancelled"));
            }
        }
    });

    Ok((StatusCode::ACCEPTED, Json(prompt)))
}

/// Handler listing the open confirmation prompts.
pub async fn list_confirmations(State(state): State<AppState>) -> Json<Vec<PromptInfo>> {
    Json(state.confirmations.pending(Instant::now()))
}

#[derive(Deserialize, Debug)]
pub struct ConfirmationReply {
    pub confirm: bool,
}

#[derive(Serialize, Debug)]
pub struct ConfirmationResult {
    pub id: ConfirmationId,
    pub decision: Decision,
}

/// Handler answering a confirmation prompt.
pub async fn resolve_confirmation(
    State(state): State<AppState>,
    Path(id): Path<ConfirmationId>,
    Json(reply): Json<ConfirmationReply>,
) -> Result<Json<ConfirmationResult>, AppError> {
    let decision = state.confirmations.resolve(id, reply.confirm)?;
    Ok(Json(ConfirmationResult { id, decision }))
}

/// Handler listing the recent notices, oldest first.
pub async fn list_notifications(State(state): State<AppState>) -> Json<Vec<Stamped<Notice>>> {
    Json(state.notices.recent())
}

#[derive(Deserialize, Debug, Default)]
pub struct ChangesQuery {
    /// Last change id the client has seen.
    #[serde(default)]
    pub since: u64,
}

/// Handler listing the status changes newer than `since`, oldest first.
pub async fn list_changes(
    State(state): State<AppState>,
    Query(query): Query<ChangesQuery>,
) -> Json<Vec<Stamped<StatusChange>>> {
    Json(state.changes.since(query.since))
}

/// Handler summarizing the budget of an event.
pub async fn event_budget(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<BudgetSummary>, AppError> {
    let event = state.events.store().get(&event_id).ok_or_else(|| {
        AppError::new(
            StatusCode::NOT_FOUND,
            &format!("Event with ID {} not found.", event_id),
        )
    })?;

    let expenses = state
        .expenses
        .expenses_for_event(&event_id)
        .await
        .map_err(BoardError::Remote)?;

    Ok(Json(summarize(&event, &expenses)))
}

// --- Custom Error Handling ---

/// Our custom error type for the application.
#[derive(Debug)]
pub struct AppError {
    code: StatusCode,
    message: String,
}

impl AppError {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }
}

impl From<BoardError> for AppError {
    fn from(err: BoardError) -> Self {
        let code = match &err {
            BoardError::UnknownColumn(_) => StatusCode::BAD_REQUEST,
            BoardError::ItemNotFound { .. }
            | BoardError::UnknownItem(_)
            | BoardError::UnknownConfirmation(_) => StatusCode::NOT_FOUND,
            BoardError::Remote(_) => StatusCode::BAD_GATEWAY,
            BoardError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            code,
            message: err.to_string(),
        }
    }
}

/// Allows converting an `anyhow::Error` into our `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Log the internal error for debugging.
        tracing::error!("Internal server error: {:?}", err);
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal error occurred.".to_string(),
        }
    }
}

/// Allows Axum to convert our `AppError` into an HTTP `Response`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(
            "Responding with error: status_code={}, message={}",
            self.code.as_u16(),
            self.message
        );
        (
            self.code,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}
