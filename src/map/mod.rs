mod provider;
mod renderer;
mod surface;

pub use provider::{MapProvider, MapSdk, SdkCapabilities, SdkLoader};
pub use renderer::{RouteRenderer, RouteSummary};
pub use surface::{MapSurface, MarkerKind, ShapeId};

use crate::entities::Coordinates;

pub const DEFAULT_CENTER: Coordinates = Coordinates {
    latitude: 48.8566,
    longitude: 2.3522,
};
pub const DEFAULT_ZOOM: u32 = 14;
pub const ROUTE_ZOOM: u32 = 16;
