//! Spatial-Index (KD-Tree) über projizierte Marker-Positionen.

use std::collections::HashMap;

use glam::DVec2;
use kiddo::{KdTree, SquaredEuclidean};

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// Index des gefundenen Eintrags (Reihenfolge beim Aufbau)
    pub item: usize,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

/// Read-only Spatial-Index über Punkten in Pixel-Koordinaten.
///
/// Identische Positionen teilen sich einen Baum-Eintrag (Slot), der KD-Tree
/// verträgt keine beliebig vielen Duplikate.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    slots: Vec<Vec<usize>>,
    len: usize,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Baut einen Index, Eintrag `i` entspricht `points[i]`.
    pub fn from_points(points: &[DVec2]) -> Self {
        let mut slot_of: HashMap<[u64; 2], usize> = HashMap::new();
        let mut entries: Vec<[f64; 2]> = Vec::new();
        let mut slots: Vec<Vec<usize>> = Vec::new();

        for (item, point) in points.iter().enumerate() {
            let key = [point.x.to_bits(), point.y.to_bits()];
            let slot = *slot_of.entry(key).or_insert_with(|| {
                entries.push([point.x, point.y]);
                slots.push(Vec::new());
                slots.len() - 1
            });
            slots[slot].push(item);
        }

        let tree: KdTree<f64, 2> = (&entries).into();

        Self {
            tree,
            slots,
            len: points.len(),
        }
    }

    /// Gibt die Anzahl indexierter Punkte zurück.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Gibt `true` zurück, wenn keine Punkte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Findet den nächsten Punkt zur Query-Position.
    pub fn nearest(&self, query: DVec2) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self.tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        let item = *self.slots.get(result.item as usize)?.first()?;

        Some(SpatialMatch {
            item,
            distance: result.distance.sqrt(),
        })
    }

    /// Findet alle Punkte, die echt näher als `radius` an der Query liegen.
    ///
    /// Sortiert nach Distanz, bei Gleichstand nach Index.
    pub fn within_radius(&self, query: DVec2, radius: f64) -> Vec<SpatialMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&[query.x, query.y], radius * radius)
            .into_iter()
            .filter_map(|entry| {
                let distance = entry.distance.sqrt();
                let items = self.slots.get(entry.item as usize)?;
                (distance < radius).then(|| {
                    items
                        .iter()
                        .map(move |&item| SpatialMatch { item, distance })
                })
            })
            .flatten()
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.item.cmp(&b.item)));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(4.0, 3.0),
        ]
    }

    #[test]
    fn nearest_returns_expected_item() {
        let index = SpatialIndex::from_points(&sample_points());
        let nearest = index
            .nearest(DVec2::new(3.9, 2.9))
            .expect("Treffer erwartet");

        assert_eq!(nearest.item, 2);
        assert!(nearest.distance < 0.2);
    }

    #[test]
    fn radius_query_returns_sorted_matches() {
        let index = SpatialIndex::from_points(&sample_points());
        let matches = index.within_radius(DVec2::new(0.0, 0.0), 6.0);

        let items: Vec<usize> = matches.into_iter().map(|m| m.item).collect();
        assert_eq!(items, vec![0, 2]);
    }

    #[test]
    fn radius_is_exclusive() {
        let index = SpatialIndex::from_points(&sample_points());
        let matches = index.within_radius(DVec2::new(0.0, 0.0), 5.0);

        let items: Vec<usize> = matches.into_iter().map(|m| m.item).collect();
        assert_eq!(items, vec![0]);
    }

    #[test]
    fn duplicate_positions_share_a_slot() {
        let points = vec![DVec2::new(1.0, 1.0); 100];
        let index = SpatialIndex::from_points(&points);

        assert_eq!(index.len(), 100);
        assert_eq!(index.within_radius(DVec2::new(1.0, 1.0), 0.5).len(), 100);
        assert_eq!(index.nearest(DVec2::ZERO).map(|m| m.item), Some(0));
    }

    #[test]
    fn empty_index_has_no_entries() {
        let index = SpatialIndex::empty();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.nearest(DVec2::new(0.0, 0.0)).is_none());
    }
}
