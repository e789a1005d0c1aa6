// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::handlers;
use crate::state::{AppState, BoardState};
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use board::BoardItem;
use tower_http::trace::TraceLayer;

/// Creates and configures the application router.
pub fn create_router(state: AppState) -> Router {
    let tasks = state.board_state(state.tasks.clone());
    let events = state.board_state(state.events.clone());

    Router::new()
        .merge(board_routes("/api/boards/tasks", tasks))
        .merge(board_routes("/api/boards/events", events))
        // Associates the `GET /api/confirmations` route with the `list_confirmations` handler
        .route("/api/confirmations", get(handlers::list_confirmations))
        // Associates the `POST /api/confirmations/{id}` route with the `resolve_confirmation` handler
        .route(
            "/api/confirmations/{id}",
            post(handlers::resolve_confirmation),
        )
        .route("/api/notifications", get(handlers::list_notifications))
        .route("/api/changes", get(handlers::list_changes))
        .route("/api/events/{id}/budget", get(handlers::event_budget))
        // Adds the shared state to the application
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// The routes every board kind exposes under `prefix`.
fn board_routes<I: BoardItem>(prefix: &str, state: BoardState<I>) -> Router<AppState> {
    Router::new()
        .route(prefix, get(handlers::get_board::<I>))
        .route(&format!("{}/filters", prefix), put(handlers::set_filters::<I>))
        .route(&format!("{}/refresh", prefix), post(handlers::refresh_board::<I>))
        .route(&format!("{}/moves", prefix), post(handlers::move_item::<I>))
        .route(
            &format!("{}/items/{{id}}", prefix),
            delete(handlers::request_delete::<I>),
        )
        .with_state(state)
}
