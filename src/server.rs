//! HTTP surface over the [`Dispatcher`].
//!
//! Each route maps one dispatch operation. The response status comes from
//! the outcome and the body is its plain-text message.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;

use crate::client::Message;
use crate::dispatch::{DispatchOutcome, Dispatcher};

#[derive(Debug, Deserialize)]
pub struct TextQuery {
    pub text: Option<String>,
}

impl IntoResponse for DispatchOutcome {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status().code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, self.into_body()).into_response()
    }
}

pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/prompt/text", post(text_prompt))
        .route("/api/prompt/image", post(image_prompt))
        .route("/api/prompt/messages", post(messages_prompt))
        .with_state(dispatcher)
}

async fn text_prompt(
    State(dispatcher): State<Dispatcher>,
    Query(query): Query<TextQuery>,
) -> DispatchOutcome {
    dispatcher.handle_text_prompt(query.text.as_deref()).await
}

async fn image_prompt(State(dispatcher): State<Dispatcher>) -> DispatchOutcome {
    dispatcher.handle_image_prompt().await
}

/// A body that is not a JSON message list is a bad request like any other.
async fn messages_prompt(
    State(dispatcher): State<Dispatcher>,
    body: Result<Json<Option<Vec<Message>>>, JsonRejection>,
) -> DispatchOutcome {
    match body {
        Ok(Json(messages)) => dispatcher.handle_conversation_prompt(messages.as_deref()).await,
        Err(rejection) => {
            tracing::warn!(reason = %rejection.body_text(), "unreadable messages body");
            DispatchOutcome::rejected(rejection.body_text())
        }
    }
}
