use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::Coordinates;

/// One proposed route returned by a search, not yet committed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItineraryCandidate {
    pub duration: f64,
    pub distance: f64,
    #[serde(default)]
    pub toll_free: bool,
    #[serde(default)]
    pub route_points: Vec<Coordinates>,
    // opaque turn-by-turn data, forwarded verbatim on load
    #[serde(default)]
    pub steps: Value,
}

/// The single route the user has committed to. Its id is the durable
/// handle used for sharing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfirmedItinerary {
    pub id: String,
    pub duration: f64,
    pub distance: f64,
    #[serde(default)]
    pub route_points: Vec<Coordinates>,
}

const SAMPLE_INTERVAL: usize = 10;

/// Down-samples a polyline for transmission, keeping every 10th point.
/// Applied only on the load call; the backend reconstructs full geometry.
pub fn sample_route_points(points: &[Coordinates]) -> Vec<Coordinates> {
    points.iter().step_by(SAMPLE_INTERVAL).copied().collect()
}
