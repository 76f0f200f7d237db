//! Proximity-Clustering der Punkt-Marker pro Zoom-Stufe.
//!
//! Greedy über die Eingabereihenfolge: der erste noch freie Punkt sammelt
//! alle freien Nachbarn im Pixel-Radius ein. Dadurch ist das Ergebnis für
//! dieselbe Collection und denselben Zoom immer gleich.

use glam::DVec2;

use crate::core::viewport::project;
use crate::core::{GeoBounds, SpatialIndex};

/// Standard-Cluster-Radius in Pixeln.
pub const CLUSTER_RADIUS_PX: f64 = 80.0;

/// Zusammengefasste Punkt-Marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Mittelwert der Mitglieder (Lon/Lat)
    pub center: DVec2,
    /// Indizes der Mitglieder in der Eingabe, aufsteigend
    pub members: Vec<usize>,
    /// Bounds aller Mitglieder
    pub bounds: GeoBounds,
}

impl Cluster {
    /// Anzahl der enthaltenen Marker (Label des Cluster-Icons).
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Gibt `true` zurück, wenn der Cluster nur einen Marker enthält.
    pub fn is_single(&self) -> bool {
        self.members.len() == 1
    }

    fn single(index: usize, position: DVec2) -> Self {
        Self {
            center: position,
            members: vec![index],
            bounds: GeoBounds::from_point(position),
        }
    }
}

/// Fasst Positionen zusammen, deren Pixel-Abstand bei `zoom` unter `radius_px` liegt.
pub fn cluster_positions(positions: &[DVec2], zoom: f64, radius_px: f64) -> Vec<Cluster> {
    let projected: Vec<DVec2> = positions.iter().map(|p| project(*p, zoom)).collect();
    let index = SpatialIndex::from_points(&projected);
    let mut assigned = vec![false; positions.len()];
    let mut clusters = Vec::new();

    for seed in 0..positions.len() {
        if assigned[seed] {
            continue;
        }

        let mut members: Vec<usize> = index
            .within_radius(projected[seed], radius_px)
            .into_iter()
            .map(|m| m.item)
            .filter(|&item| !assigned[item])
            .collect();
        if !members.contains(&seed) {
            members.push(seed);
        }
        members.sort_unstable();

        let mut cluster = Cluster::single(members[0], positions[members[0]]);
        let mut sum = DVec2::ZERO;
        for &member in &members {
            assigned[member] = true;
            sum += positions[member];
            cluster.bounds.extend(positions[member]);
        }
        cluster.center = sum / members.len() as f64;
        cluster.members = members;
        clusters.push(cluster);
    }

    clusters
}

/// Jede Position als eigener Cluster (Clustering deaktiviert).
pub fn unclustered(positions: &[DVec2]) -> Vec<Cluster> {
    positions
        .iter()
        .enumerate()
        .map(|(index, position)| Cluster::single(index, *position))
        .collect()
}
