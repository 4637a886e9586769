use std::env;
use std::sync::Arc;

use supmap::api::ShareAPI;
use supmap::auth::{MemoryStore, SessionContext};
use supmap::entities::LocationInput;
use supmap::external::HttpBackend;
use supmap::session::{ItinerarySearchSession, LoadOutcome, SearchOutcome, SearchRequest};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let start = args.next().expect("usage: supmap <start> <end>");
    let end = args.next().expect("usage: supmap <start> <end>");

    let auth = Arc::new(SessionContext::new(Arc::new(MemoryStore::new())));
    let backend = Arc::new(HttpBackend::from_env(auth.clone()).unwrap());

    let email = env::var("SUPMAP_EMAIL").unwrap();
    let password = env::var("SUPMAP_PASSWORD").unwrap();
    auth.login(backend.as_ref(), &email, &password).await.unwrap();

    let session = ItinerarySearchSession::new(backend.clone(), auth);

    let outcome = session
        .search(SearchRequest {
            start: LocationInput::Address(start),
            end,
            avoid_tolls: false,
        })
        .await
        .unwrap();

    match outcome {
        SearchOutcome::Candidates(count) => tracing::info!("{} itineraries proposed", count),
        SearchOutcome::NoItineraries => {
            tracing::info!("no itinerary found");
            return;
        }
        SearchOutcome::Superseded => return,
    }

    match session.select(0).await.unwrap() {
        LoadOutcome::Confirmed(itinerary) => {
            tracing::info!(
                "confirmed itinerary {}: {:.0} min, {:.2} km",
                itinerary.id,
                itinerary.duration / 60.0,
                itinerary.distance / 1000.0
            );

            let qr = backend.fetch_qr_code(&itinerary.id).await.unwrap();
            std::fs::write("qrcode.png", qr).unwrap();
            tracing::info!("share code written to qrcode.png");
        }
        LoadOutcome::Superseded => {}
    }
}
