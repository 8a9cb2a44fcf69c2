use crate::modules::models::response::{ErrorResponse, ReportResponse, YearsResponse};
use axum::{
    async_trait,
    extract::{Extension, FromRequestParts, Path, Query},
    http::StatusCode,
    Json,
};
use cf_wrapped_libs::{
    available_years, rating, summarize_years, AggregationSettings, LoaderError, UserDataLoader,
    YearStats, YearWindow,
};
use http::request::Parts;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize};
use std::sync::Arc;
use tokio::time::Instant;
use validator::Validate;

pub static HANDLE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap());

pub struct AppState {
    pub loader: UserDataLoader,
    pub settings: AggregationSettings,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl ToString) -> ErrorReply {
    (status, Json(ErrorResponse::new(message)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct HandlePath {
    #[validate(length(min = 3, max = 24), regex = "HANDLE_PATTERN")]
    pub handle: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct HandleYearPath {
    #[validate(length(min = 3, max = 24), regex = "HANDLE_PATTERN")]
    pub handle: String,
    #[validate(range(min = 1970, max = 9999))]
    pub year: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub refresh: bool,
}

/// Path parameters that passed validation.
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ErrorReply;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::error!("Parsing error: {}", rejection);
                error(
                    StatusCode::BAD_REQUEST,
                    format!("invalid path parameter: [{}]", rejection),
                )
            })?;

        value.validate().map_err(|rejection| {
            tracing::error!("Validation error: {}", rejection);
            error(
                StatusCode::BAD_REQUEST,
                format!("Validation error: [{}]", rejection).replace('\n', ", "),
            )
        })?;

        Ok(ValidatedPath(value))
    }
}

fn not_found(e: LoaderError) -> ErrorReply {
    error(StatusCode::NOT_FOUND, e)
}

pub async fn user_years(
    ValidatedPath(path): ValidatedPath<HandlePath>,
    Query(query): Query<RefreshQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<YearsResponse>, ErrorReply> {
    let start_process = Instant::now();

    let data = state
        .loader
        .load(&path.handle, query.refresh)
        .await
        .map_err(not_found)?;

    let zone = &state.settings.zone;
    let years = available_years(
        &data.submissions,
        &data.rating_history,
        data.user_info.registration_time_seconds,
        zone,
        zone.current_year(),
    );
    let summaries = summarize_years(&years, &data.submissions, &data.rating_history, zone);

    tracing::info!(
        target: "querylog",
        "elapsed_time={} handle={} years={}",
        start_process.elapsed().as_millis(), path.handle, summaries.len()
    );

    Ok(Json(YearsResponse::new(data.user_info, summaries)))
}

pub async fn user_year_report(
    ValidatedPath(path): ValidatedPath<HandleYearPath>,
    Query(query): Query<RefreshQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<ReportResponse>, ErrorReply> {
    let start_process = Instant::now();

    let data = state
        .loader
        .load(&path.handle, query.refresh)
        .await
        .map_err(not_found)?;

    let settings = &state.settings;
    let stats = YearStats::compute(
        path.year,
        &data.submissions,
        &data.rating_history,
        settings,
    );

    let window = YearWindow::new(path.year, &settings.zone);
    let history = rating::chronological(&data.rating_history);
    let rating_history = rating::in_window(&history, &window)
        .into_iter()
        .cloned()
        .collect();

    tracing::info!(
        target: "querylog",
        "elapsed_time={} handle={} year={} solved={}",
        start_process.elapsed().as_millis(), path.handle, path.year, stats.unique_problems_solved
    );

    Ok(Json(ReportResponse::new(data.user_info, stats, rating_history)))
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
