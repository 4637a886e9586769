use std::sync::{Arc, Mutex};

use crate::entities::Coordinates;
use crate::error::{empty_route_error, Error};
use crate::map::{MapSurface, MarkerKind, ShapeId, ROUTE_ZOOM};

struct Drawing {
    polyline: ShapeId,
    start_marker: Option<ShapeId>,
    end_marker: ShapeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteSummary {
    pub duration: f64,
    pub distance: f64,
}

/// Sole owner of the map's route drawing: at most one polyline and one
/// start/end marker pair at any time.
pub struct RouteRenderer {
    surface: Arc<dyn MapSurface>,
    drawing: Mutex<Option<Drawing>>,
}

impl RouteRenderer {
    pub fn new(surface: Arc<dyn MapSurface>) -> Self {
        Self {
            surface,
            drawing: Mutex::new(None),
        }
    }

    /// Draws a confirmed route, replacing any previous drawing. The start
    /// marker is suppressed when the route starts exactly at the recorded
    /// device position.
    #[tracing::instrument(skip(self, route_points))]
    pub fn draw(
        &self,
        route_points: &[Coordinates],
        duration: f64,
        distance: f64,
        current_position: Option<Coordinates>,
    ) -> Result<RouteSummary, Error> {
        if route_points.is_empty() {
            return Err(empty_route_error());
        }

        let mut drawing = self.drawing.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(previous) = drawing.take() {
            self.surface.remove_shape(previous.polyline);
            if let Some(marker) = previous.start_marker {
                self.surface.remove_shape(marker);
            }
            self.surface.remove_shape(previous.end_marker);
        }

        let polyline = self.surface.add_polyline(route_points);

        let first = route_points[0];
        let last = route_points[route_points.len() - 1];

        self.surface.set_center(first);
        self.surface.set_zoom(ROUTE_ZOOM);

        let start_marker = if current_position == Some(first) {
            None
        } else {
            Some(self.surface.add_marker(first, MarkerKind::Start))
        };
        let end_marker = self.surface.add_marker(last, MarkerKind::End);

        *drawing = Some(Drawing {
            polyline,
            start_marker,
            end_marker,
        });

        Ok(RouteSummary { duration, distance })
    }

    pub fn has_drawing(&self) -> bool {
        self.drawing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn clear(&self) {
        let mut drawing = self.drawing.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(previous) = drawing.take() {
            self.surface.remove_shape(previous.polyline);
            if let Some(marker) = previous.start_marker {
                self.surface.remove_shape(marker);
            }
            self.surface.remove_shape(previous.end_marker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use uuid::Uuid;

    #[derive(Default)]
    struct FakeSurface {
        shapes: Mutex<HashMap<ShapeId, &'static str>>,
        markers: Mutex<HashMap<ShapeId, (Coordinates, MarkerKind)>>,
        center: Mutex<Option<Coordinates>>,
        zoom: Mutex<Option<u32>>,
    }

    impl FakeSurface {
        fn polyline_count(&self) -> usize {
            self.shapes
                .lock()
                .unwrap()
                .values()
                .filter(|kind| **kind == "polyline")
                .count()
        }

        fn markers_of(&self, kind: MarkerKind) -> usize {
            self.markers
                .lock()
                .unwrap()
                .values()
                .filter(|(_, k)| *k == kind)
                .count()
        }
    }

    impl MapSurface for FakeSurface {
        fn add_polyline(&self, _path: &[Coordinates]) -> ShapeId {
            let id = Uuid::new_v4();
            self.shapes.lock().unwrap().insert(id, "polyline");
            id
        }

        fn add_marker(&self, position: Coordinates, kind: MarkerKind) -> ShapeId {
            let id = Uuid::new_v4();
            self.shapes.lock().unwrap().insert(id, "marker");
            self.markers.lock().unwrap().insert(id, (position, kind));
            id
        }

        fn remove_shape(&self, id: ShapeId) {
            self.shapes.lock().unwrap().remove(&id);
            self.markers.lock().unwrap().remove(&id);
        }

        fn set_center(&self, center: Coordinates) {
            *self.center.lock().unwrap() = Some(center);
        }

        fn set_zoom(&self, level: u32) {
            *self.zoom.lock().unwrap() = Some(level);
        }
    }

    fn route(n: usize) -> Vec<Coordinates> {
        (0..n).map(|i| Coordinates::new(i as f64, 1.0)).collect()
    }

    #[test]
    fn empty_route_draws_nothing() {
        let surface = Arc::new(FakeSurface::default());
        let renderer = RouteRenderer::new(surface.clone());

        let err = renderer.draw(&[], 0.0, 0.0, None).unwrap_err();

        assert_eq!(err, empty_route_error());
        assert!(!renderer.has_drawing());
        assert_eq!(surface.polyline_count(), 0);
    }

    #[test]
    fn drawing_twice_leaves_one_polyline_and_marker_pair() {
        let surface = Arc::new(FakeSurface::default());
        let renderer = RouteRenderer::new(surface.clone());

        renderer.draw(&route(5), 600.0, 2000.0, None).unwrap();
        renderer.draw(&route(5), 600.0, 2000.0, None).unwrap();

        assert_eq!(surface.polyline_count(), 1);
        assert_eq!(surface.markers_of(MarkerKind::Start), 1);
        assert_eq!(surface.markers_of(MarkerKind::End), 1);
    }

    #[test]
    fn centers_and_zooms_on_route_start() {
        let surface = Arc::new(FakeSurface::default());
        let renderer = RouteRenderer::new(surface.clone());

        let summary = renderer.draw(&route(5), 1200.0, 8000.0, None).unwrap();

        assert_eq!(
            summary,
            RouteSummary {
                duration: 1200.0,
                distance: 8000.0
            }
        );
        assert_eq!(*surface.center.lock().unwrap(), Some(route(5)[0]));
        assert_eq!(*surface.zoom.lock().unwrap(), Some(ROUTE_ZOOM));
    }

    #[test]
    fn start_marker_suppressed_at_device_position() {
        let surface = Arc::new(FakeSurface::default());
        let renderer = RouteRenderer::new(surface.clone());
        let points = route(5);

        renderer
            .draw(&points, 600.0, 2000.0, Some(points[0]))
            .unwrap();

        assert_eq!(surface.markers_of(MarkerKind::Start), 0);
        assert_eq!(surface.markers_of(MarkerKind::End), 1);
    }

    #[test]
    fn start_marker_present_when_position_differs() {
        let surface = Arc::new(FakeSurface::default());
        let renderer = RouteRenderer::new(surface.clone());

        renderer
            .draw(&route(5), 600.0, 2000.0, Some(Coordinates::new(9.0, 9.0)))
            .unwrap();

        assert_eq!(surface.markers_of(MarkerKind::Start), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let surface = Arc::new(FakeSurface::default());
        let renderer = RouteRenderer::new(surface.clone());

        renderer.draw(&route(5), 600.0, 2000.0, None).unwrap();
        renderer.clear();

        assert!(!renderer.has_drawing());
        assert!(surface.shapes.lock().unwrap().is_empty());
    }
}
