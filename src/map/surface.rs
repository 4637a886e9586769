use uuid::Uuid;

use crate::entities::Coordinates;

pub type ShapeId = Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
}

/// The one map-widget instance. Implementations wrap the real SDK surface;
/// tests use a recording fake.
pub trait MapSurface: Send + Sync {
    fn add_polyline(&self, path: &[Coordinates]) -> ShapeId;

    fn add_marker(&self, position: Coordinates, kind: MarkerKind) -> ShapeId;

    fn remove_shape(&self, id: ShapeId);

    fn set_center(&self, center: Coordinates);

    fn set_zoom(&self, level: u32);
}
