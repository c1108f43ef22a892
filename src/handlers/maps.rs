use std::collections::HashMap;

use axum::{extract::rejection::JsonRejection, Json};
use serde::Deserialize;

use crate::error::AppResult;
use crate::utils::geo::GeoPoint;
use crate::utils::map::MapConfig;

#[derive(Debug, Deserialize)]
pub struct MapElementsRequest {
    pub elements: Vec<HashMap<String, String>>,
}

/// Map configs for each element whose data attributes carry a usable position.
/// Elements without one are skipped, not rejected.
pub async fn from_data_attributes(
    payload: Result<Json<MapElementsRequest>, JsonRejection>,
) -> AppResult<Json<Vec<MapConfig>>> {
    let Json(req) = payload?;
    let total = req.elements.len();

    let configs: Vec<MapConfig> = req
        .elements
        .iter()
        .enumerate()
        .filter_map(|(index, attrs)| MapConfig::from_data_attributes(index, attrs))
        .collect();

    if configs.len() < total {
        tracing::debug!(
            skipped = total - configs.len(),
            total,
            "Skipped map elements without a valid position"
        );
    }

    Ok(Json(configs))
}

#[derive(Debug, Deserialize)]
pub struct CurrentLocationRequest {
    pub element_id: Option<String>,
    pub position: GeoPoint,
}

pub async fn current_location(
    payload: Result<Json<CurrentLocationRequest>, JsonRejection>,
) -> AppResult<Json<MapConfig>> {
    let Json(req) = payload?;
    let element_id = req.element_id.unwrap_or_else(|| "map".to_string());

    Ok(Json(MapConfig::current_location(element_id, req.position)))
}
