use std::sync::Arc;

use axum::{
    Extension, Form, Json,
    extract::State,
    http::{
        StatusCode,
        header::{CACHE_CONTROL, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    color::{ColorDetails, describe, generate_blue_shade},
    database::Average,
    error::AppError,
    session::{UserId, session_cookie},
    state::AppState,
    utils::{BaseColorForm, VoteForm, get_base_color_from_form, get_vote_from_form},
};

#[derive(Serialize)]
pub struct Shade {
    pub shade: String,
    pub details: ColorDetails,
}

#[derive(Serialize)]
pub struct AverageSummary {
    pub hex: String,
    pub count: u64,
    #[serde(flatten)]
    pub details: ColorDetails,
}

impl From<Average> for AverageSummary {
    fn from(average: Average) -> Self {
        let hex = average.color.to_hex();

        Self {
            details: describe(&hex),
            hex,
            count: average.count,
        }
    }
}

#[derive(Serialize)]
pub struct Stats {
    pub user_average: Option<AverageSummary>,
    pub global_average: Option<AverageSummary>,
}

impl Stats {
    fn new(user_average: Option<Average>, global_average: Option<Average>) -> Self {
        Self {
            user_average: user_average.map(AverageSummary::from),
            global_average: global_average.map(AverageSummary::from),
        }
    }
}

pub async fn next_shade_handler(
    State(state): State<Arc<AppState>>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> Result<Json<Shade>, AppError> {
    let shade = generate_blue_shade();
    state.store.record_shown(&user_id, shade).await?;

    let hex = shade.to_hex();

    Ok(Json(Shade {
        details: describe(&hex),
        shade: hex,
    }))
}

pub async fn vote_handler(
    State(state): State<Arc<AppState>>,
    Extension(UserId(user_id)): Extension<UserId>,
    Form(form): Form<VoteForm>,
) -> Result<Json<Stats>, AppError> {
    let vote = get_vote_from_form(&form).inspect_err(|e| warn!("Rejected vote: {e}"))?;

    let user_average = match vote {
        Some((color, is_anika_blue)) => {
            let recorded = state
                .store
                .record_vote(&user_id, color, is_anika_blue)
                .await?;

            info!(
                "Vote {}: {user_id} says {color} is anika blue: {is_anika_blue}",
                recorded.id
            );
            recorded.user_average
        }
        None => state.store.user_average(&user_id).await?,
    };

    let global_average = state.store.global_average().await?;

    Ok(Json(Stats::new(user_average, global_average)))
}

pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> Result<Json<Stats>, AppError> {
    let user_average = state.store.user_average(&user_id).await?;
    let global_average = state.store.global_average().await?;

    Ok(Json(Stats::new(user_average, global_average)))
}

pub async fn save_base_color_handler(
    State(state): State<Arc<AppState>>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> Result<impl IntoResponse, AppError> {
    let average = state
        .store
        .save_base_color(&user_id)
        .await?
        .ok_or(AppError::NoAverage)?;

    info!("Saved base color {} for {user_id}", average.color);

    Ok(Json(json!({
        "success": true,
        "base_color": average.color.to_hex(),
    })))
}

/// Switches the session to whichever user saved the submitted base color.
pub async fn load_base_color_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<BaseColorForm>,
) -> Result<Response, AppError> {
    let base_color =
        get_base_color_from_form(&form).inspect_err(|e| warn!("Rejected base color: {e}"))?;

    let user_id = state
        .store
        .find_user_by_base_color(&base_color)
        .await?
        .ok_or(AppError::UnknownBaseColor)?;

    info!("Restored session {user_id} from base color {base_color}");

    let body = Json(json!({
        "success": true,
        "message": "Session restored successfully",
    }));

    Ok(match session_cookie(&user_id) {
        Some(cookie) => ([(SET_COOKIE, cookie)], body).into_response(),
        None => body.into_response(),
    })
}

pub async fn livereload_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let Some(live_reload) = &state.live_reload else {
        return Ok((StatusCode::NOT_FOUND, Json(json!({ "enabled": false }))).into_response());
    };

    let version = live_reload.token().await?;

    Ok((
        [(CACHE_CONTROL, "no-store, no-cache, must-revalidate, max-age=0")],
        Json(json!({
            "enabled": true,
            "version": version,
            "interval": live_reload.interval().as_secs_f64(),
        })),
    )
        .into_response())
}
