// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::extract::State;
use axum::Json;
use formflow_api::TotalUsersFallback;
use serde_json::Value;
use tracing::{info, warn};

/// Proxies the upstream user total. Once every attempt has failed the
/// client still gets a 200 with the zero fallback.
pub(crate) async fn total_users_handler(State(state): State<AppState>) -> Json<Value> {
    let Some(url) = state.api.external_totalusers_url.clone() else {
        warn!("external totalusers url not configured");
        return fallback();
    };
    let upstream = state.upstream.clone();
    let fetched = state
        .api
        .external_retry
        .run(|_| {
            let upstream = upstream.clone();
            let url = url.clone();
            async move { upstream.get_json(&url).await }
        })
        .await;
    match fetched {
        Ok(body) => {
            info!("external totalusers fetched");
            Json(body)
        }
        Err(err) => {
            warn!(error = %err, "external totalusers unavailable after retries");
            fallback()
        }
    }
}

fn fallback() -> Json<Value> {
    Json(serde_json::to_value(TotalUsersFallback::unavailable()).unwrap_or(Value::Null))
}
