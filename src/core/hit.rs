//! Exakte Treffer-Prüfung von Geometrien in projizierten Pixel-Koordinaten.

use glam::DVec2;

use super::feature::{Geometry, Position};
use super::viewport::project;

/// Abstand eines Punkts zu einem Liniensegment.
fn distance_to_segment(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return point.distance(a);
    }

    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Kleinster Abstand eines Punkts zu einer Polylinie.
fn distance_to_polyline(point: DVec2, line: &[DVec2]) -> f64 {
    match line {
        [] => f64::INFINITY,
        [single] => point.distance(*single),
        _ => line
            .windows(2)
            .map(|pair| distance_to_segment(point, pair[0], pair[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Prüft ob ein Punkt innerhalb eines Rings liegt (Ray-Casting).
///
/// Der Ring darf offen oder geschlossen sein.
fn point_in_ring(point: DVec2, ring: &[DVec2]) -> bool {
    let Some(&last) = ring.last() else {
        return false;
    };
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut previous = last;
    for &current in ring {
        if (current.y > point.y) != (previous.y > point.y) {
            let crossing_x = (previous.x - current.x) * (point.y - current.y)
                / (previous.y - current.y)
                + current.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        previous = current;
    }

    inside
}

fn to_pixels(positions: &[Position], zoom: f64) -> Vec<DVec2> {
    positions.iter().map(|p| project(p.0, zoom)).collect()
}

/// Erster Ring ist die Außenkante, weitere Ringe sind Löcher.
fn polygon_hit(click: DVec2, rings: &[Vec<Position>], zoom: f64, tolerance_px: f64) -> bool {
    let rings: Vec<Vec<DVec2>> = rings.iter().map(|ring| to_pixels(ring, zoom)).collect();
    let Some((outer, holes)) = rings.split_first() else {
        return false;
    };

    if rings
        .iter()
        .any(|ring| distance_to_polyline(click, ring) <= tolerance_px)
    {
        return true;
    }
    point_in_ring(click, outer) && !holes.iter().any(|hole| point_in_ring(click, hole))
}

impl Geometry {
    /// Prüft, ob ein Klick die Geometrie trifft.
    ///
    /// `click_px` ist bei `zoom` projiziert. Linien und Punkte gelten bis
    /// `tolerance_px` als getroffen, Flächen innen oder bis `tolerance_px`
    /// an ihrem Rand.
    pub fn hit_test(&self, click_px: DVec2, zoom: f64, tolerance_px: f64) -> bool {
        match self {
            Geometry::Point { coordinates } => {
                project(coordinates.0, zoom).distance(click_px) <= tolerance_px
            }
            Geometry::MultiPoint { coordinates } => coordinates
                .iter()
                .any(|p| project(p.0, zoom).distance(click_px) <= tolerance_px),
            Geometry::LineString { coordinates } => {
                distance_to_polyline(click_px, &to_pixels(coordinates, zoom)) <= tolerance_px
            }
            Geometry::MultiLineString { coordinates } => coordinates.iter().any(|line| {
                distance_to_polyline(click_px, &to_pixels(line, zoom)) <= tolerance_px
            }),
            Geometry::Polygon { coordinates } => {
                polygon_hit(click_px, coordinates, zoom, tolerance_px)
            }
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .any(|polygon| polygon_hit(click_px, polygon, zoom, tolerance_px)),
            Geometry::GeometryCollection { geometries } => geometries
                .iter()
                .any(|geometry| geometry.hit_test(click_px, zoom, tolerance_px)),
        }
    }
}
