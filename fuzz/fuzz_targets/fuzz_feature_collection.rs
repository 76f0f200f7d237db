#![no_main]

use std::sync::Arc;

use geoapi_viewer::core::FeatureCollection;
use geoapi_viewer::layers::{ClusterOptions, LayerAssembler};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(collection) = FeatureCollection::from_json_slice(data) else {
        return;
    };
    let count = collection.len();

    let layers = LayerAssembler::default().assemble(Arc::new(collection));
    assert!(layers.rendered_count() + layers.skipped.len() == count);

    let options = ClusterOptions::default();
    for zoom in [0.0, 10.0, options.max_zoom] {
        let clusters = layers.cluster_layer.clusters_at(zoom, &options);
        let members: usize = clusters.iter().map(|c| c.count()).sum();
        assert_eq!(members, layers.cluster_layer.len());
    }
});
