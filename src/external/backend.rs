use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{
    AuthAPI, AuthSession, IncidentAPI, ItineraryAPI, LoadParams, RegisterParams, SearchParams,
    ShareAPI, StatisticsAPI, API,
};
use crate::auth::SessionContext;
use crate::entities::{
    ConfirmedItinerary, CongestionPeriod, Coordinates, Incident, IncidentAction, IncidentsPerDay,
    ItineraryCandidate,
};
use crate::error::{backend_error, generation_failed_error, not_found_error, Error};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// REST client for the SupMap backend. Attaches the bearer credential from
/// the session context to every authenticated request.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    auth: Arc<SessionContext>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    itineraries: Option<Vec<ItineraryCandidate>>,
}

#[derive(Deserialize)]
struct LoadResponse {
    itinerary: Option<ConfirmedItinerary>,
}

#[derive(Deserialize)]
struct IncidentsResponse {
    #[serde(default)]
    incidents: Vec<Incident>,
}

impl HttpBackend {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        auth: Arc<SessionContext>,
    ) -> Result<Self, Error> {
        // bounded timeout: a hung connection must resolve into an error
        // instead of leaving the session in a loading state forever
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    pub fn from_env(auth: Arc<SessionContext>) -> Result<Self, Error> {
        let base_url = env::var("SUPMAP_API_BASE")?;
        let timeout = env::var("SUPMAP_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(base_url, Duration::from_secs(timeout), auth)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth.credentials() {
            Some(credentials) => request.bearer_auth(credentials.token),
            None => request,
        }
    }

    async fn reject(res: reqwest::Response) -> Error {
        let message = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| "unknown backend error".into());

        backend_error(message)
    }

    async fn incidents(&self, path: &str) -> Result<Vec<Incident>, Error> {
        let res = self.authorized(self.client.get(self.url(path))).send().await?;

        if !res.status().is_success() {
            return Err(Self::reject(res).await);
        }

        let body: IncidentsResponse = res
            .json()
            .await
            .map_err(|_| backend_error("malformed incidents response"))?;

        Ok(body.incidents)
    }
}

#[async_trait]
impl ItineraryAPI for HttpBackend {
    #[tracing::instrument(skip(self))]
    async fn search_itineraries(
        &self,
        params: SearchParams,
    ) -> Result<Vec<ItineraryCandidate>, Error> {
        let res = self
            .authorized(self.client.post(self.url("/itineraries/search")))
            .json(&params)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::reject(res).await);
        }

        let body: SearchResponse = res
            .json()
            .await
            .map_err(|_| backend_error("malformed search response"))?;

        // a missing array means the backend had nothing to propose
        Ok(body.itineraries.unwrap_or_default())
    }

    #[tracing::instrument(skip(self, params))]
    async fn load_itinerary(&self, params: LoadParams) -> Result<ConfirmedItinerary, Error> {
        let res = self
            .authorized(self.client.post(self.url("/itineraries/load")))
            .json(&params)
            .send()
            .await?;

        if !res.status().is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(backend_error(message));
        }

        let body: LoadResponse = res
            .json()
            .await
            .map_err(|_| backend_error("malformed load response"))?;

        body.itinerary
            .ok_or_else(|| backend_error("load response held no itinerary"))
    }
}

#[async_trait]
impl ShareAPI for HttpBackend {
    #[tracing::instrument(skip(self))]
    async fn fetch_qr_code(&self, itinerary_id: &str) -> Result<Vec<u8>, Error> {
        let check = self
            .authorized(
                self.client
                    .get(self.url(&format!("/itineraries/{}", itinerary_id))),
            )
            .send()
            .await?;

        if !check.status().is_success() {
            return Err(not_found_error("itinerary not found"));
        }

        let res = self
            .authorized(
                self.client
                    .get(self.url(&format!("/qrcode/{}", itinerary_id))),
            )
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(generation_failed_error());
        }

        Ok(res.bytes().await?.to_vec())
    }
}

#[async_trait]
impl AuthAPI for HttpBackend {
    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, Error> {
        let res = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::reject(res).await);
        }

        res.json()
            .await
            .map_err(|_| backend_error("malformed login response"))
    }

    #[tracing::instrument(skip(self, id_token))]
    async fn login_with_google(&self, id_token: &str) -> Result<AuthSession, Error> {
        let res = self
            .client
            .post(self.url("/oauth/google/token"))
            .json(&json!({ "idToken": id_token }))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::reject(res).await);
        }

        res.json()
            .await
            .map_err(|_| backend_error("malformed login response"))
    }

    #[tracing::instrument(skip(self, params))]
    async fn register(&self, params: RegisterParams) -> Result<(), Error> {
        let res = self
            .client
            .post(self.url("/users"))
            .json(&params)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::reject(res).await);
        }

        Ok(())
    }
}

#[async_trait]
impl IncidentAPI for HttpBackend {
    #[tracing::instrument(skip(self))]
    async fn pending_incidents(&self) -> Result<Vec<Incident>, Error> {
        self.incidents("/incidents/pending").await
    }

    #[tracing::instrument(skip(self))]
    async fn active_incidents(&self) -> Result<Vec<Incident>, Error> {
        self.incidents("/incidents/active").await
    }

    #[tracing::instrument(skip(self))]
    async fn resolved_incidents(&self) -> Result<Vec<Incident>, Error> {
        self.incidents("/incidents/resolved").await
    }

    #[tracing::instrument(skip(self))]
    async fn update_incident_status(&self, id: &str, action: IncidentAction) -> Result<(), Error> {
        let res = self
            .authorized(
                self.client
                    .put(self.url(&format!("/incidents/{}/{}", id, action.as_str()))),
            )
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::reject(res).await);
        }

        Ok(())
    }
}

#[async_trait]
impl StatisticsAPI for HttpBackend {
    #[tracing::instrument(skip(self))]
    async fn incidents_per_day(&self) -> Result<Vec<IncidentsPerDay>, Error> {
        let res = self
            .client
            .get(self.url("/statistics/incidents-per-day"))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::reject(res).await);
        }

        res.json()
            .await
            .map_err(|_| backend_error("malformed statistics response"))
    }

    #[tracing::instrument(skip(self))]
    async fn congestion_periods(
        &self,
        center: Coordinates,
        radius: u32,
    ) -> Result<Vec<CongestionPeriod>, Error> {
        let res = self
            .client
            .post(self.url("/statistics/congestion-periods"))
            .json(&json!({
                "lat": center.latitude,
                "lng": center.longitude,
                "radius": radius,
            }))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::reject(res).await);
        }

        res.json()
            .await
            .map_err(|_| backend_error("malformed statistics response"))
    }
}

impl API for HttpBackend {}
