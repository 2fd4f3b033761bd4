use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    content::{self, fallback::fallback_theme},
    error::ApiError,
    game::{Round, SelectionOutcome, WordFinder},
    models::Position,
    AppState,
};

/// Client view of a round
#[derive(Debug, Serialize, Deserialize)]
pub struct RoundView {
    pub round_id: Uuid,
    pub topic: String,
    pub grid: Vec<Vec<char>>,
    pub words: Vec<String>,
    pub found: Vec<String>,
    pub complete: bool,
}

impl From<&Round> for RoundView {
    fn from(round: &Round) -> Self {
        Self {
            round_id: round.id,
            topic: round.topic.clone(),
            grid: round.grid().rows().to_vec(),
            words: round.words().to_vec(),
            found: round.found().to_vec(),
            complete: round.is_complete(),
        }
    }
}

/// A selection is either the two ends of a sweep or the full list of cells
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SelectionRequest {
    Line { start: Position, end: Position },
    Cells { positions: Vec<Position> },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    pub found: Vec<String>,
    pub complete: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HintResponse {
    pub word: Option<String>,
    pub start: Option<Position>,
}

/// Fetch a theme, build a grid from it and register a new round
pub async fn start_round(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RoundView>) {
    let size = state.generator.size();
    let mut theme = content::fetch_or_fallback(state.content.as_ref())
        .await
        .normalized(size);

    if theme.words.is_empty() {
        tracing::warn!(
            "Theme {:?} has no usable words for a {}x{} grid. Using fallback words.",
            theme.topic,
            size,
            size
        );
        theme = fallback_theme().normalized(size);
    }

    let grid = state.generator.generate(&theme.words);
    tracing::debug!("Generated grid for {}:\n{}", theme.topic, grid);

    let round = Round::new(theme.topic, grid);
    tracing::info!(
        "Started round {} ({}) with {}/{} words placed",
        round.id,
        round.topic,
        round.words().len(),
        theme.words.len()
    );

    let view = RoundView::from(&round);
    state.rounds.insert(round.id, round);

    (StatusCode::CREATED, Json(view))
}

pub async fn get_round(
    State(state): State<Arc<AppState>>,
    Path(round_id): Path<Uuid>,
) -> Result<Json<RoundView>, ApiError> {
    let round = state
        .rounds
        .get(&round_id)
        .ok_or(ApiError::RoundNotFound(round_id))?;

    Ok(Json(RoundView::from(round.value())))
}

pub async fn get_hint(
    State(state): State<Arc<AppState>>,
    Path(round_id): Path<Uuid>,
) -> Result<Json<HintResponse>, ApiError> {
    let round = state
        .rounds
        .get(&round_id)
        .ok_or(ApiError::RoundNotFound(round_id))?;

    let hint = round.hint();
    Ok(Json(HintResponse {
        word: hint.map(|(word, _)| word.to_string()),
        start: hint.map(|(_, start)| start),
    }))
}

pub async fn submit_selection(
    State(state): State<Arc<AppState>>,
    Path(round_id): Path<Uuid>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let mut round = state
        .rounds
        .get_mut(&round_id)
        .ok_or(ApiError::RoundNotFound(round_id))?;

    let positions = match request {
        SelectionRequest::Line { start, end } => {
            WordFinder::line(start, end, round.grid().size()).unwrap_or_default()
        }
        SelectionRequest::Cells { positions } => positions,
    };

    let outcome = round.submit(&positions);
    if matches!(outcome, SelectionOutcome::Found(_)) && round.is_complete() {
        tracing::info!("Round {} complete", round_id);
    }

    let (outcome, word) = match outcome {
        SelectionOutcome::Found(word) => ("found", Some(word)),
        SelectionOutcome::AlreadyFound(word) => ("already_found", Some(word)),
        SelectionOutcome::NotAWord => ("not_a_word", None),
        SelectionOutcome::InvalidSelection => ("invalid_selection", None),
    };

    Ok(Json(SelectionResponse {
        outcome: outcome.to_string(),
        word,
        found: round.found().to_vec(),
        complete: round.is_complete(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config, content::FallbackProvider, models::WordGrid, routes::create_routes,
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
        Router,
    };
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let config = Config::from_lookup(|_| None).unwrap();
        Arc::new(AppState::new(config, Arc::new(FallbackProvider)).unwrap())
    }

    fn app(state: &Arc<AppState>) -> Router {
        create_routes().with_state(state.clone())
    }

    async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn seeded_round(state: &Arc<AppState>) -> Uuid {
        let grid = WordGrid::from_rows(&["CATX", "OXOY", "LZXG", "AQRW"], &["CAT", "COLA"])
            .unwrap();
        let round = Round::new("Snacks", grid);
        let id = round.id;
        state.rounds.insert(id, round);
        id
    }

    #[tokio::test]
    async fn test_start_round_uses_fallback_words() {
        let state = test_state();
        let response = app(&state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/rounds")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let view: RoundView = read_json(response).await;

        assert_eq!(view.topic, "Fast Food");
        assert_eq!(view.grid.len(), 10);
        assert!(view.grid.iter().flatten().all(|c| c.is_ascii_uppercase()));
        assert!(!view.words.is_empty());
        assert!(view.found.is_empty());
        assert!(state.rounds.contains_key(&view.round_id));
    }

    #[tokio::test]
    async fn test_get_round() {
        let state = test_state();
        let id = seeded_round(&state);

        let response = app(&state)
            .oneshot(
                Request::builder()
                    .uri(format!("/api/rounds/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let view: RoundView = read_json(response).await;
        assert_eq!(view.words, vec!["CAT", "COLA"]);
        assert!(!view.complete);
    }

    #[tokio::test]
    async fn test_unknown_round_is_not_found() {
        let state = test_state();
        let response = app(&state)
            .oneshot(
                Request::builder()
                    .uri(format!("/api/rounds/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_submit_line_and_cells() {
        let state = test_state();
        let id = seeded_round(&state);
        let uri = format!("/api/rounds/{}/selection", id);

        let response = app(&state)
            .oneshot(post_json(
                &uri,
                serde_json::json!({ "start": { "row": 0, "col": 2 }, "end": { "row": 0, "col": 0 } }),
            ))
            .await
            .unwrap();
        let result: SelectionResponse = read_json(response).await;
        assert_eq!(result.outcome, "found");
        assert_eq!(result.word.as_deref(), Some("CAT"));
        assert!(!result.complete);

        let positions: Vec<Position> = (0..4).map(|row| Position::new(row, 0)).collect();
        let response = app(&state)
            .oneshot(post_json(&uri, serde_json::json!({ "positions": positions })))
            .await
            .unwrap();
        let result: SelectionResponse = read_json(response).await;
        assert_eq!(result.outcome, "found");
        assert_eq!(result.found, vec!["CAT", "COLA"]);
        assert!(result.complete);
    }

    #[tokio::test]
    async fn test_hint() {
        let state = test_state();
        let id = seeded_round(&state);

        let response = app(&state)
            .oneshot(
                Request::builder()
                    .uri(format!("/api/rounds/{}/hint", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let hint: HintResponse = read_json(response).await;
        assert_eq!(hint.word.as_deref(), Some("CAT"));
        assert_eq!(hint.start, Some(Position::new(0, 0)));
    }

    #[tokio::test]
    async fn test_submit_line_outside_grid_is_invalid() {
        let state = test_state();
        let id = seeded_round(&state);
        let uri = format!("/api/rounds/{}/selection", id);

        let far_end = serde_json::json!({
            "start": { "row": 0, "col": 0 },
            "end": { "row": 0, "col": 1u64 << 40 }
        });
        let overflowing = serde_json::json!({
            "start": { "row": usize::MAX, "col": 0 },
            "end": { "row": isize::MAX as usize, "col": 0 }
        });

        for body in [far_end, overflowing] {
            let response = app(&state).oneshot(post_json(&uri, body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let result: SelectionResponse = read_json(response).await;
            assert_eq!(result.outcome, "invalid_selection");
            assert!(result.found.is_empty());
        }
    }

    #[tokio::test]
    async fn test_submit_bent_line_is_invalid() {
        let state = test_state();
        let id = seeded_round(&state);

        let response = app(&state)
            .oneshot(post_json(
                &format!("/api/rounds/{}/selection", id),
                serde_json::json!({ "start": { "row": 0, "col": 0 }, "end": { "row": 1, "col": 3 } }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let result: SelectionResponse = read_json(response).await;
        assert_eq!(result.outcome, "invalid_selection");
        assert!(result.word.is_none());
    }
}
