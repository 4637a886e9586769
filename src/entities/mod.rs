mod incident;
mod itinerary;
mod location;

pub use incident::{CongestionPeriod, Incident, IncidentAction, IncidentsPerDay};
pub use itinerary::{sample_route_points, ConfirmedItinerary, ItineraryCandidate};
pub use location::{Coordinates, LocationInput};
