use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use hueprobe::{ColorEntry, ColorError, ColorMatch, Rgb};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{sample::DecodedImage, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_colors))
        .route("/nearest", get(nearest_color))
        .route("/pick", post(pick_color))
}

/// A reference color as shown to clients
#[derive(Debug, Clone, Serialize)]
pub struct NamedColor {
    pub name: String,
    #[serde(flatten)]
    pub swatch: Swatch,
}

impl From<&ColorEntry> for NamedColor {
    fn from(entry: &ColorEntry) -> Self {
        Self {
            name: entry.name.clone(),
            swatch: entry.rgb.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NearestColor {
    #[serde(flatten)]
    pub color: NamedColor,
    pub distance: u16,
}

impl From<ColorMatch<'_>> for NearestColor {
    fn from(m: ColorMatch<'_>) -> Self {
        Self {
            color: m.entry.into(),
            distance: m.distance,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Swatch {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub hex: String,
}

impl From<Rgb> for Swatch {
    fn from(rgb: Rgb) -> Self {
        Self {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            hex: rgb.hex(),
        }
    }
}

/// Result of picking a pixel from an uploaded image
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub id: Uuid,
    pub position: Position,
    pub pixel: Swatch,
    pub color: NearestColor,
    pub detected_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RgbQuery {
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Debug, Deserialize)]
pub struct PickQuery {
    /// Column, clamped to the image width. Defaults to the center.
    x: Option<u32>,
    /// Row, clamped to the image height. Defaults to the center.
    y: Option<u32>,
}

fn color_error(err: ColorError) -> (StatusCode, String) {
    let status = match err {
        // a configuration defect, not a client error
        ColorError::EmptyTable => StatusCode::SERVICE_UNAVAILABLE,
        ColorError::DataUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

/// GET /api/colors - List the reference table in table order
async fn list_colors(State(state): State<Arc<AppState>>) -> Json<Vec<NamedColor>> {
    Json(state.table.iter().map(NamedColor::from).collect())
}

/// GET /api/colors/nearest?r=&g=&b= - Name the closest reference color
async fn nearest_color(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RgbQuery>,
) -> Result<Json<NearestColor>, (StatusCode, String)> {
    let rgb = Rgb::new(query.r, query.g, query.b);
    let nearest = state.table.nearest(rgb).map_err(color_error)?;

    tracing::debug!("{} -> {} (distance {})", rgb, nearest.name(), nearest.distance);

    Ok(Json(nearest.into()))
}

/// POST /api/colors/pick?x=&y= - Name the color of one pixel of a PNG or JPEG body
async fn pick_color(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PickQuery>,
    body: Bytes,
) -> Result<Json<Detection>, (StatusCode, String)> {
    let image = DecodedImage::decode(&body)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let (x, y) = image.clamp(query.x, query.y);
    let pixel = image.pixel(x, y);
    let nearest = state.table.nearest(pixel).map_err(color_error)?;

    let detection = Detection {
        id: Uuid::new_v4(),
        position: Position { x, y },
        pixel: pixel.into(),
        color: nearest.into(),
        detected_at: Utc::now(),
    };

    tracing::debug!(
        "Picked ({}, {}) of {}x{} image: {} -> {}",
        x,
        y,
        image.width(),
        image.height(),
        pixel,
        detection.color.color.name
    );

    state.detections.record(detection.clone()).await;

    // Broadcast to UI clients
    let _ = state.ui_broadcast.send(
        serde_json::json!({
            "type": "color_detected",
            "detection": detection
        })
        .to_string(),
    );

    Ok(Json(detection))
}
