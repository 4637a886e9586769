use std::sync::{Arc, Mutex};

use crate::api::ShareAPI;
use crate::error::{validation_error, Error};

/// A generated share image for a confirmed itinerary. Dropping the last
/// handle releases the bytes.
#[derive(Debug)]
pub struct ShareArtifact {
    itinerary_id: String,
    bytes: Vec<u8>,
}

impl ShareArtifact {
    pub fn itinerary_id(&self) -> &str {
        &self.itinerary_id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub struct ShareExporter {
    api: Arc<dyn ShareAPI + Send + Sync>,
    current: Mutex<Option<Arc<ShareArtifact>>>,
}

impl ShareExporter {
    pub fn new(api: Arc<dyn ShareAPI + Send + Sync>) -> Self {
        Self {
            api,
            current: Mutex::new(None),
        }
    }

    /// Fetches the share code for a confirmed itinerary. `None` means no
    /// itinerary has been confirmed yet.
    #[tracing::instrument(skip(self))]
    pub async fn request_share_artifact(
        &self,
        itinerary_id: Option<&str>,
    ) -> Result<Arc<ShareArtifact>, Error> {
        let itinerary_id = itinerary_id
            .ok_or_else(|| validation_error("no confirmed itinerary to share"))?;

        let bytes = self.api.fetch_qr_code(itinerary_id).await?;

        let artifact = Arc::new(ShareArtifact {
            itinerary_id: itinerary_id.into(),
            bytes,
        });

        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = Some(artifact.clone());

        Ok(artifact)
    }

    pub fn current(&self) -> Option<Arc<ShareArtifact>> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Releases the held artifact when the share view is dismissed.
    pub fn dismiss(&self) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::not_found_error;
    use async_trait::async_trait;

    struct FakeShareAPI {
        known_id: &'static str,
    }

    #[async_trait]
    impl ShareAPI for FakeShareAPI {
        async fn fetch_qr_code(&self, itinerary_id: &str) -> Result<Vec<u8>, Error> {
            if itinerary_id != self.known_id {
                return Err(not_found_error("itinerary not found"));
            }

            Ok(vec![0x89, 0x50, 0x4e, 0x47])
        }
    }

    fn exporter() -> ShareExporter {
        ShareExporter::new(Arc::new(FakeShareAPI { known_id: "it-42" }))
    }

    #[tokio::test]
    async fn missing_id_is_rejected_without_a_call() {
        let err = exporter().request_share_artifact(None).await.unwrap_err();
        assert_eq!(err.code, validation_error("").code);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let err = exporter()
            .request_share_artifact(Some("it-0"))
            .await
            .unwrap_err();
        assert_eq!(err, not_found_error("itinerary not found"));
    }

    #[tokio::test]
    async fn artifact_is_held_until_dismissed() {
        let exporter = exporter();

        let artifact = exporter
            .request_share_artifact(Some("it-42"))
            .await
            .unwrap();

        assert_eq!(artifact.itinerary_id(), "it-42");
        assert!(!artifact.bytes().is_empty());
        assert!(exporter.current().is_some());

        exporter.dismiss();
        assert!(exporter.current().is_none());
    }
}
