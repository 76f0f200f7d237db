mod common;

use geoapi_viewer::app::LoadOutcome;
use geoapi_viewer::core::GeometryKind;
use geoapi_viewer::layers::{ItemRef, LayerKind, MarkerDescriptor};
use geoapi_viewer::session::{SessionStatus, JWT_HEADER};
use geoapi_viewer::{AppCommand, AppController, AppIntent, AppState, MapViewport, Route};
use geoapi_viewer::ViewerServices;

use common::{backend, MockTransport};

const FEATURES_42: &str = "/api/projects/42/features/";

fn controller(transport: &MockTransport) -> AppController<MockTransport> {
    AppController::new(ViewerServices::new(transport.clone()))
}

fn navigate(path: &str) -> AppIntent {
    AppIntent::NavigateRequested { path: path.into() }
}

#[tokio::test]
async fn test_project_42_layers_viewport_and_detail() {
    let transport = backend();
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/projects/42"))
        .await
        .expect("Navigation sollte ohne Fehler durchlaufen");

    let layers = state.view.layers.as_ref().expect("Layer erwartet");

    let points: Vec<usize> = layers.cluster_layer.items.iter().map(|i| i.feature_index).collect();
    assert_eq!(points, vec![0, 1]);
    assert!(matches!(
        layers.cluster_layer.items[0].marker,
        MarkerDescriptor::Circle { .. }
    ));
    assert_eq!(
        layers.cluster_layer.items[1].marker,
        MarkerDescriptor::Image {
            path: "x.jpg".into()
        }
    );

    assert_eq!(layers.shape_layer.len(), 1);
    assert_eq!(layers.shape_layer.items[0].feature_index, 2);
    assert_eq!(layers.shape_layer.items[0].kind, GeometryKind::Polygon);

    let bounds = layers.bounds.expect("Bounds erwartet");
    for item in &layers.cluster_layer.items {
        assert!(bounds.contains(item.position));
    }
    assert!(bounds.contains_bounds(&layers.shape_layer.items[0].bounds));
    assert!(bounds.contains(state.view.viewport.center));
    assert_ne!(state.view.viewport, MapViewport::default());

    controller
        .handle_intent(
            &mut state,
            AppIntent::MarkerClicked {
                item: ItemRef {
                    layer: LayerKind::Cluster,
                    index: 1,
                },
            },
        )
        .await
        .expect("Klick sollte ohne Fehler durchlaufen");

    let detail = state.ui.detail.as_ref().expect("Detail-Dialog erwartet");
    assert_eq!(detail.feature_index, 1);
    assert_eq!(detail.feature_id, Some(2));
    assert_eq!(detail.gallery.len(), 1);
    assert_eq!(detail.gallery[0].image_url, "x.jpg.jpeg");
    assert_eq!(detail.gallery[0].thumbnail_url, "x.jpg.thumb.jpeg");

    let payload = state
        .view
        .layers
        .as_ref()
        .and_then(|l| l.collection.get(detail.feature_index))
        .expect("Feature erwartet");
    assert_eq!(payload.id, Some(2));
}

#[tokio::test]
async fn test_feature_request_carries_token_and_auth_runs_once() {
    let transport = backend();
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/projects/42"))
        .await
        .expect("Navigation erwartet");
    controller
        .handle_intent(&mut state, AppIntent::ReloadRequested)
        .await
        .expect("Reload erwartet");

    let feature_requests = transport.requests_to(FEATURES_42);
    assert_eq!(feature_requests.len(), 2);
    for request in &feature_requests {
        assert_eq!(request.header(JWT_HEADER), Some("token-123"));
    }

    let auth_requests = transport.requests_to("/api/auth/");
    assert_eq!(auth_requests.len(), 1);
    assert_eq!(auth_requests[0].header(JWT_HEADER), None);
}

#[tokio::test]
async fn test_auth_without_jwt_denies_entry_and_skips_fetch() {
    let transport = MockTransport::new();
    transport
        .respond("/api/auth/", 200, "{}")
        .respond(FEATURES_42, 200, common::PROJECT_42_FEATURES);
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/projects/42"))
        .await
        .expect("Verweigerte Navigation ist kein Fehler");

    assert_eq!(state.route, Some(Route::NotFound));
    assert!(state.view.layers.is_none());
    assert!(state.ui.error_message.is_some());
    assert!(transport.requests_to(FEATURES_42).is_empty());
    assert_eq!(transport.requests_to("/api/auth/").len(), 1);
    assert_eq!(
        controller.services().session.status(),
        SessionStatus::Unauthenticated
    );
}

#[tokio::test]
async fn test_fetch_failure_leaves_empty_usable_view() {
    let transport = MockTransport::new();
    transport
        .respond("/api/auth/", 200, common::AUTH_OK)
        .respond(FEATURES_42, 500, "internal error");
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/projects/42?style=satellite"))
        .await
        .expect("Fehlgeschlagener Abruf ist kein Controller-Fehler");

    assert_eq!(state.current_project_id(), Some(42));
    assert!(state.view.layers.is_none());
    assert!(!state.view.loading);
    assert_eq!(state.view.viewport, MapViewport::default());
    assert!(state
        .ui
        .error_message
        .as_deref()
        .is_some_and(|m| m.contains("500")));

    // Ansicht bleibt bedienbar
    controller
        .handle_intent(&mut state, AppIntent::ZoomChanged { zoom: 4.0 })
        .await
        .expect("Zoom erwartet");
    assert_eq!(state.view.viewport.zoom, 4.0);
}

#[tokio::test]
async fn test_transport_failure_is_reported() {
    let transport = MockTransport::new();
    transport
        .respond("/api/auth/", 200, common::AUTH_OK)
        .fail(FEATURES_42);
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/projects/42"))
        .await
        .expect("Navigation erwartet");

    assert!(state
        .ui
        .error_message
        .as_deref()
        .is_some_and(|m| m.contains("connection refused")));
}

#[tokio::test]
async fn test_result_after_navigating_away_is_discarded() {
    let transport = backend();
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/projects/42"))
        .await
        .expect("Navigation erwartet");

    let ticket = controller.begin_feature_load(&mut state, 42);
    let result = controller.fetch_features(&ticket).await;

    controller
        .handle_intent(&mut state, navigate("/projects/7"))
        .await
        .expect("Navigation erwartet");

    let outcome = controller.complete_feature_load(&mut state, ticket, result);

    assert_eq!(outcome, LoadOutcome::Discarded);
    assert_eq!(state.current_project_id(), Some(7));
    assert!(state.view.layers.is_none());
}

#[tokio::test]
async fn test_navigation_while_fetch_is_pending_discards_result() {
    let transport = backend();
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/projects/42"))
        .await
        .expect("Navigation erwartet");
    let ticket = controller.begin_feature_load(&mut state, 42);

    let (result, navigation) = tokio::join!(
        controller.fetch_features(&ticket),
        controller.handle_intent(&mut state, navigate("/projects/7"))
    );
    navigation.expect("Navigation während des Abrufs erwartet");

    assert!(result.is_ok());
    assert_eq!(state.current_project_id(), Some(7));

    let outcome = controller.complete_feature_load(&mut state, ticket, result);

    assert_eq!(outcome, LoadOutcome::Discarded);
    assert!(state.view.layers.is_none());
}

#[tokio::test]
async fn test_unknown_path_redirects_to_not_found_without_auth() {
    let transport = backend();
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/somewhere/else"))
        .await
        .expect("Navigation erwartet");

    assert_eq!(state.route, Some(Route::NotFound));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_root_path_shows_project_list() {
    let transport = backend();
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/"))
        .await
        .expect("Navigation erwartet");

    assert_eq!(state.route, Some(Route::ProjectList));
    let projects = state.projects.as_ref().expect("Projektliste erwartet");
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].name, "Coastal Survey");
    assert_eq!(projects[1].description, None);
    assert_eq!(
        transport.requests_to("/api/projects/")[0].header(JWT_HEADER),
        Some("token-123")
    );
}

#[tokio::test]
async fn test_cluster_click_zooms_in_and_single_click_opens_detail() {
    let transport = backend();
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/projects/42"))
        .await
        .expect("Navigation erwartet");

    controller
        .handle_intent(&mut state, AppIntent::ZoomChanged { zoom: 5.0 })
        .await
        .expect("Zoom erwartet");
    controller
        .handle_intent(
            &mut state,
            AppIntent::MapClicked {
                position: glam::DVec2::new(-79.995, 40.005),
            },
        )
        .await
        .expect("Klick erwartet");

    assert!(state.view.viewport.zoom > 5.0);
    assert!(state.ui.detail.is_none());

    controller
        .handle_intent(&mut state, AppIntent::ZoomChanged { zoom: 18.0 })
        .await
        .expect("Zoom erwartet");
    controller
        .handle_intent(
            &mut state,
            AppIntent::MapClicked {
                position: glam::DVec2::new(-79.99, 40.01),
            },
        )
        .await
        .expect("Klick erwartet");

    let detail = state.ui.detail.as_ref().expect("Detail-Dialog erwartet");
    assert_eq!(detail.feature_index, 1);

    controller
        .handle_intent(&mut state, AppIntent::DetailClosed)
        .await
        .expect("Schließen erwartet");
    assert!(state.ui.detail.is_none());
}

#[tokio::test]
async fn test_commands_are_logged_in_order() {
    let transport = backend();
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/projects/42"))
        .await
        .expect("Navigation erwartet");

    let entries = state.command_log.entries();
    assert_eq!(entries.len(), 2);
    assert!(matches!(entries[0], AppCommand::Navigate { .. }));
    assert_eq!(entries[1], AppCommand::LoadFeatures { project_id: 42 });
}

#[tokio::test]
async fn test_open_detail_for_unknown_feature_fails() {
    let transport = backend();
    let controller = controller(&transport);
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, navigate("/projects/42"))
        .await
        .expect("Navigation erwartet");

    let result = controller
        .handle_command(&mut state, AppCommand::OpenDetail { feature_index: 99 })
        .await;

    assert!(result.is_err());
    assert!(state.ui.detail.is_none());
}
