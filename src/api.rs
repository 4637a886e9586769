use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::entities::{
    ConfirmedItinerary, CongestionPeriod, Coordinates, Incident, IncidentAction, IncidentsPerDay,
    ItineraryCandidate,
};
use crate::error::Error;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchParams {
    pub start_location: String,
    pub end_location: String,
    pub user_id: Option<String>,
    #[serde(rename = "avoidTolls")]
    pub avoid_tolls: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectedItinerary {
    pub duration: f64,
    pub distance: f64,
    pub toll_free: bool,
    pub steps: Value,
    pub route_points: Vec<Coordinates>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoadParams {
    pub user_id: Option<String>,
    pub start_location: String,
    pub end_location: String,
    pub selected_itinerary: SelectedItinerary,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub role: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterParams {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[async_trait]
pub trait ItineraryAPI {
    async fn search_itineraries(
        &self,
        params: SearchParams,
    ) -> Result<Vec<ItineraryCandidate>, Error>;

    async fn load_itinerary(&self, params: LoadParams) -> Result<ConfirmedItinerary, Error>;
}

#[async_trait]
pub trait ShareAPI {
    async fn fetch_qr_code(&self, itinerary_id: &str) -> Result<Vec<u8>, Error>;
}

#[async_trait]
pub trait AuthAPI {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, Error>;

    async fn login_with_google(&self, id_token: &str) -> Result<AuthSession, Error>;

    async fn register(&self, params: RegisterParams) -> Result<(), Error>;
}

#[async_trait]
pub trait IncidentAPI {
    async fn pending_incidents(&self) -> Result<Vec<Incident>, Error>;

    async fn active_incidents(&self) -> Result<Vec<Incident>, Error>;

    async fn resolved_incidents(&self) -> Result<Vec<Incident>, Error>;

    async fn update_incident_status(&self, id: &str, action: IncidentAction) -> Result<(), Error>;
}

#[async_trait]
pub trait StatisticsAPI {
    async fn incidents_per_day(&self) -> Result<Vec<IncidentsPerDay>, Error>;

    async fn congestion_periods(
        &self,
        center: Coordinates,
        radius: u32,
    ) -> Result<Vec<CongestionPeriod>, Error>;
}

pub trait API: ItineraryAPI + ShareAPI + AuthAPI + IncidentAPI + StatisticsAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
