//! Analytics query handler

use std::collections::BTreeMap;

use application::EndpointAnalytics;
use axum::{
    Json,
    extract::{Query, State},
};
use domain::TenantId;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the analytics endpoint
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// Tenant to report on
    pub tenant: String,
}

/// Analytics response for one tenant
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub tenant: TenantId,
    pub endpoints: BTreeMap<String, EndpointAnalytics>,
}

/// Per-tenant endpoint analytics (`GET /admin/analytics?tenant=`)
pub async fn tenant_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let tenant =
        TenantId::parse(&query.tenant).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let endpoints = state.analytics.tenant_summary(&tenant).await?;

    Ok(Json(AnalyticsResponse { tenant, endpoints }))
}
