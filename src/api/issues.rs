//! Issue route handlers for `/api/issues/:project`.
//!
//! Every outcome, success or logical failure, is answered with HTTP 200;
//! clients distinguish them by payload shape.

use crate::api::AppState;
use crate::api::extract::{RequestFields, query_filter};
use crate::error::TrackerError;
use crate::model::Issue;
use crate::storage::Acknowledgement;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.payload())).into_response()
    }
}

pub(crate) async fn list_issues(
    State(state): State<AppState>,
    Path(project): Path<String>,
    uri: Uri,
) -> Json<Vec<Issue>> {
    let filter = query_filter(&uri);
    Json(state.store.list(&project, &filter).await)
}

pub(crate) async fn create_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    RequestFields(body): RequestFields,
) -> Result<Json<Issue>, TrackerError> {
    state.store.create(&project, &body).await.map(Json)
}

pub(crate) async fn update_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    RequestFields(body): RequestFields,
) -> Result<Json<Acknowledgement>, TrackerError> {
    state.store.update(&project, &body).await.map(Json)
}

pub(crate) async fn delete_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    RequestFields(body): RequestFields,
) -> Result<Json<Acknowledgement>, TrackerError> {
    state.store.delete(&project, &body).await.map(Json)
}
