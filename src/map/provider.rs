use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::entities::Coordinates;
use crate::error::{provider_load_error, Error};
use crate::map::MapSurface;

#[derive(Clone, Copy, Debug)]
pub struct SdkCapabilities {
    pub maps: bool,
    pub visualization: bool,
}

/// Handle to a loaded mapping SDK.
pub trait MapSdk: Send + Sync + std::fmt::Debug {
    fn capabilities(&self) -> SdkCapabilities;

    fn create_surface(
        &self,
        center: Coordinates,
        zoom: u32,
    ) -> Result<Arc<dyn MapSurface>, Error>;
}

/// Performs the actual SDK bootstrap (script injection, native init, ...).
#[async_trait]
pub trait SdkLoader: Send + Sync {
    async fn load(&self, api_key: &str) -> Result<Arc<dyn MapSdk>, Error>;
}

/// Loads the mapping SDK at most once. Concurrent callers before completion
/// share the same in-flight load; later callers get the cached handle. A
/// failed load is propagated and not retried here.
pub struct MapProvider {
    loader: Arc<dyn SdkLoader>,
    sdk: OnceCell<Arc<dyn MapSdk>>,
}

impl MapProvider {
    pub fn new(loader: Arc<dyn SdkLoader>) -> Self {
        Self {
            loader,
            sdk: OnceCell::new(),
        }
    }

    #[tracing::instrument(skip(self, api_key))]
    pub async fn ensure_loaded(&self, api_key: &str) -> Result<Arc<dyn MapSdk>, Error> {
        let sdk = self
            .sdk
            .get_or_try_init(|| async {
                let sdk = self.loader.load(api_key).await?;

                let capabilities = sdk.capabilities();
                if !capabilities.maps || !capabilities.visualization {
                    return Err(provider_load_error(
                        "loaded sdk does not expose map capabilities",
                    ));
                }

                Ok(sdk)
            })
            .await?;

        Ok(sdk.clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.sdk.initialized()
    }
}
