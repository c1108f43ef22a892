use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::utils::geo::{compute_distance, is_within_radius, GeoPoint, LatLngBounds};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DistanceQuery {
    pub lat1: f64,
    pub lng1: f64,
    pub lat2: f64,
    pub lng2: f64,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub distance_km: f64,
}

/// Straight-line distance between two points
pub async fn distance(
    query: Result<Query<DistanceQuery>, QueryRejection>,
) -> AppResult<Json<DistanceResponse>> {
    let Query(q) = query?;
    let distance_km = compute_distance(q.lat1, q.lng1, q.lat2, q.lng2)?;
    // Already validated by compute_distance
    let from = GeoPoint::new(q.lat1, q.lng1)?;
    let to = GeoPoint::new(q.lat2, q.lng2)?;

    tracing::debug!(?from, ?to, distance_km, "Computed distance");

    Ok(Json(DistanceResponse {
        from,
        to,
        distance_km,
    }))
}

#[derive(Debug, Deserialize)]
pub struct WithinRadiusRequest {
    pub point: GeoPoint,
    pub center: GeoPoint,
    pub radius_km: f64,
}

#[derive(Debug, Serialize)]
pub struct WithinRadiusResponse {
    pub distance_km: f64,
    pub within_radius: bool,
}

/// Check whether a point (e.g. a pickup) lies within a radius of a center
pub async fn within_radius(
    State(state): State<AppState>,
    payload: Result<Json<WithinRadiusRequest>, JsonRejection>,
) -> AppResult<Json<WithinRadiusResponse>> {
    let Json(req) = payload?;

    let max = state.config.max_radius_km;
    if !req.radius_km.is_finite() || req.radius_km < 0.0 || req.radius_km > max {
        return Err(AppError::BadRequest(format!(
            "radius_km must be between 0 and {} km",
            max
        )));
    }

    Ok(Json(WithinRadiusResponse {
        distance_km: req.point.distance_to(&req.center),
        within_radius: is_within_radius(&req.point, &req.center, req.radius_km),
    }))
}

#[derive(Debug, Deserialize)]
pub struct BoundsRequest {
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Serialize)]
pub struct BoundsResponse {
    #[serde(flatten)]
    pub bounds: LatLngBounds,
    pub center: GeoPoint,
}

/// Smallest lat/lng box over a set of points, for fitting a map view to a route
pub async fn bounds(
    payload: Result<Json<BoundsRequest>, JsonRejection>,
) -> AppResult<Json<BoundsResponse>> {
    let Json(req) = payload?;

    let bounds = LatLngBounds::from_points(req.points)
        .ok_or_else(|| AppError::BadRequest("At least one point is required".to_string()))?;

    Ok(Json(BoundsResponse {
        center: bounds.center(),
        bounds,
    }))
}
