//! Geographische Bounding Box (Lon/Lat).

use glam::DVec2;

use super::ViewerError;

/// Achsenparalleles Rechteck in Grad. `x` = Longitude, `y` = Latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Südwest-Ecke
    pub min: DVec2,
    /// Nordost-Ecke
    pub max: DVec2,
}

impl GeoBounds {
    /// Degenerierte Box um einen einzelnen Punkt.
    pub fn from_point(point: DVec2) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Kleinste Box über alle Punkte.
    ///
    /// Liefert `NoGeometry`, wenn der Iterator leer ist.
    pub fn covering(points: impl IntoIterator<Item = DVec2>) -> Result<Self, ViewerError> {
        let mut points = points.into_iter();
        let first = points.next().ok_or(ViewerError::NoGeometry)?;
        let mut bounds = Self::from_point(first);
        for point in points {
            bounds.extend(point);
        }
        Ok(bounds)
    }

    /// Vereinigt mehrere Boxen, `NoGeometry` wenn keine vorhanden ist.
    pub fn union_all(boxes: impl IntoIterator<Item = GeoBounds>) -> Result<Self, ViewerError> {
        let mut boxes = boxes.into_iter();
        let mut result = boxes.next().ok_or(ViewerError::NoGeometry)?;
        for other in boxes {
            result = result.union(&other);
        }
        Ok(result)
    }

    /// Erweitert die Box um einen Punkt.
    pub fn extend(&mut self, point: DVec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Vereinigung zweier Boxen.
    pub fn union(&self, other: &GeoBounds) -> GeoBounds {
        GeoBounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Mittelpunkt in Grad.
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Ausdehnung in Grad (Breite, Höhe).
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Prüft, ob ein Punkt innerhalb (inkl. Rand) liegt.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Prüft, ob `other` vollständig enthalten ist.
    pub fn contains_bounds(&self, other: &GeoBounds) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covering_spans_all_points() {
        let bounds = GeoBounds::covering([
            DVec2::new(-80.0, 40.0),
            DVec2::new(-79.5, 40.2),
            DVec2::new(-80.2, 39.9),
        ])
        .expect("Bounds erwartet");

        assert_eq!(bounds.min, DVec2::new(-80.2, 39.9));
        assert_eq!(bounds.max, DVec2::new(-79.5, 40.2));
        assert!(bounds.contains(DVec2::new(-80.0, 40.0)));
    }

    #[test]
    fn covering_empty_input_is_no_geometry() {
        let result = GeoBounds::covering(std::iter::empty());

        assert_eq!(result, Err(ViewerError::NoGeometry));
    }

    #[test]
    fn union_all_merges_boxes() {
        let a = GeoBounds::from_point(DVec2::new(0.0, 0.0));
        let b = GeoBounds::from_point(DVec2::new(2.0, -1.0));

        let merged = GeoBounds::union_all([a, b]).expect("Bounds erwartet");

        assert_eq!(merged.center(), DVec2::new(1.0, -0.5));
        assert!(merged.contains_bounds(&a));
        assert!(merged.contains_bounds(&b));
    }
}
