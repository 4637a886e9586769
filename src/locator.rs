use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::entities::{Coordinates, LocationInput};
use crate::error::{unavailable_error, Error};
use crate::external::Geocoder;

/// Sentinel shown in the start field once a device fix is recorded; the
/// typed address underneath is kept.
pub const CURRENT_POSITION_LABEL: &str = "My current location";

/// Platform geolocation capability. Hosts without one simply pass `None`
/// to the locator.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, Error>;
}

pub struct Locator {
    geocoder: Geocoder,
    position_source: Option<Arc<dyn PositionSource>>,
    current: Mutex<Option<Coordinates>>,
}

impl Locator {
    pub fn new(geocoder: Geocoder, position_source: Option<Arc<dyn PositionSource>>) -> Self {
        Self {
            geocoder,
            position_source,
            current: Mutex::new(None),
        }
    }

    pub async fn geocode(&self, place: &str) -> Result<Coordinates, Error> {
        self.geocoder.geocode(place).await
    }

    /// Requests a device fix and records it. The recorded fix then takes
    /// precedence over any typed start address.
    #[tracing::instrument(skip(self))]
    pub async fn locate_device(&self) -> Result<Coordinates, Error> {
        let source = match &self.position_source {
            Some(source) => source,
            None => return Err(unavailable_error("geolocation is not supported here")),
        };

        let position = source.current_position().await?;

        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = Some(position);

        Ok(position)
    }

    pub fn current_position(&self) -> Option<Coordinates> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn resolve_start(&self, typed: &str) -> LocationInput {
        match self.current_position() {
            Some(position) => LocationInput::Position(position),
            None => LocationInput::Address(typed.into()),
        }
    }

    pub fn start_label(&self, typed: &str) -> String {
        match self.current_position() {
            Some(_) => CURRENT_POSITION_LABEL.into(),
            None => typed.into(),
        }
    }
}
