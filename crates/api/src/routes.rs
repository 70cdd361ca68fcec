use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json,
    Router,
};
use core_sim::{Snapshot, Statistics, TradeRecord};
use runtime::RunStatus;
use serde::{Deserialize, Serialize};
use strategy::{Preset, ProfileError, ProfileUpdate, StrategyProfile, PRESETS};

use crate::{
    error::{ensure_finite, ApiError},
    state::AppState,
    ws,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/profile", get(get_profile).put(put_profile))
        .route("/profile/presets/:name", post(apply_preset))
        .route("/presets", get(list_presets))
        .route("/risk", get(get_risk).put(put_risk))
        .route("/interval", get(get_interval).put(put_interval))
        .route("/run", get(run_status))
        .route("/run/start", post(start_run))
        .route("/run/stop", post(stop_run))
        .route("/step", post(step_once))
        .route("/reset", post(reset))
        .route("/snapshot", get(snapshot))
        .route("/statistics", get(statistics))
        .route("/ws/events", get(ws::events_socket))
        .with_state(state)
}

#[derive(Debug, Serialize, Deserialize)]
struct RiskBody {
    risk_fraction: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct IntervalBody {
    interval_ms: u64,
}

async fn get_profile(State(state): State<AppState>) -> Json<StrategyProfile> {
    Json(state.sim().profile())
}

async fn put_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<StrategyProfile>, ApiError> {
    ensure_finite_update(&update)?;

    Ok(Json(state.sim().update_profile(update)))
}

fn ensure_finite_update(update: &ProfileUpdate) -> Result<(), ProfileError> {
    let fields = [
        ("win_pct", update.win_pct),
        ("reward_multiple", update.reward_multiple),
        ("loss_multiple", update.loss_multiple),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            ensure_finite(field, value)?;
        }
    }
    Ok(())
}

async fn apply_preset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StrategyProfile>, ApiError> {
    Ok(Json(state.sim().apply_preset(&name)?))
}

async fn list_presets() -> Json<&'static [Preset]> {
    Json(PRESETS.as_slice())
}

async fn get_risk(State(state): State<AppState>) -> Json<RiskBody> {
    Json(RiskBody {
        risk_fraction: state.sim().risk_fraction(),
    })
}

async fn put_risk(
    State(state): State<AppState>,
    Json(body): Json<RiskBody>,
) -> Result<Json<RiskBody>, ApiError> {
    let risk_fraction = ensure_finite("risk_fraction", body.risk_fraction)?;
    state.sim().set_risk_fraction(risk_fraction);

    Ok(Json(RiskBody { risk_fraction }))
}

async fn get_interval(State(state): State<AppState>) -> Json<IntervalBody> {
    Json(IntervalBody {
        interval_ms: state.sim().interval_ms(),
    })
}

async fn put_interval(
    State(state): State<AppState>,
    Json(body): Json<IntervalBody>,
) -> Json<IntervalBody> {
    state.sim().set_interval_ms(body.interval_ms);

    Json(IntervalBody {
        interval_ms: state.sim().interval_ms(),
    })
}

async fn run_status(State(state): State<AppState>) -> Json<RunStatus> {
    Json(state.sim().run_status())
}

async fn start_run(State(state): State<AppState>) -> Result<Json<RunStatus>, ApiError> {
    state.sim().start()?;
    Ok(Json(state.sim().run_status()))
}

async fn stop_run(State(state): State<AppState>) -> Json<RunStatus> {
    state.sim().stop();
    Json(state.sim().run_status())
}

async fn step_once(State(state): State<AppState>) -> Json<TradeRecord> {
    Json(state.sim().step_once())
}

async fn reset(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.sim().reset())
}

async fn snapshot(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.sim().snapshot())
}

async fn statistics(State(state): State<AppState>) -> Json<Statistics> {
    Json(state.sim().statistics())
}

#[cfg(test)]
mod tests {
    use strategy::{ProfileError, ProfileUpdate};

    use super::ensure_finite_update;

    #[test]
    fn non_finite_update_field_is_named_in_the_error() {
        let update = ProfileUpdate {
            win_pct: Some(50.0),
            loss_multiple: Some(f64::INFINITY),
            ..ProfileUpdate::default()
        };

        assert_eq!(
            ensure_finite_update(&update),
            Err(ProfileError::InvalidParameter {
                field: "loss_multiple",
            })
        );
        assert_eq!(ensure_finite_update(&ProfileUpdate::default()), Ok(()));
    }
}
