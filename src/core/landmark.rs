//! Skelett-Daten aus dem Pose-Export.

use serde::{Deserialize, Serialize};

/// Einzelner Landmark, x/y normalisiert auf [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence: Option<f64>,
}

impl Landmark {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            z: None,
            visibility: None,
            presence: None,
        }
    }
}

/// Eine erkannte Person in einem Frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    #[serde(default)]
    pub person_id: u32,
    pub landmarks: Vec<Landmark>,
}

/// Alle in einem Frame erkannten Posen (kann leer sein).
pub type LandmarkSet = Vec<Pose>;
