//! The map screen: board state, the Leaflet view, and the pin list.
//!
//! The board is hydrated from the document store once on mount and every
//! mutation is mirrored back; fatal mirror failures roll the optimistic
//! local change back, transport failures keep it and log.

use dioxus::prelude::*;

use api::MarkerInfo;
use store::{MapConfig, MarkerBoard, MarkerId, Position, WriteOutcome};
use ui::{outcome_of, use_auth, ImageUpload, LogoutButton, MapView, Navbar, PinList};

use crate::Route;

#[component]
pub fn MapScreen() -> Element {
    let config = MapConfig::default();
    let mut board = use_signal(MarkerBoard::new);
    let mut center = use_signal(|| config.center);
    let auth = use_auth();

    // Hydrate from the document store on mount. On failure the board stays
    // empty rather than stale.
    let _loader = use_resource(move || async move {
        match api::list_markers().await {
            Ok(records) => {
                let points = records.into_iter().map(MarkerInfo::into_point).collect();
                board.write().hydrate(points);
            }
            Err(err) => tracing::error!("failed to load markers: {err}"),
        }
    });

    // Ask the browser where we are; keep the fallback center on any failure.
    use_effect(move || {
        let timeout_ms = config.geolocation_timeout_secs * 1000;
        spawn(async move {
            let js = format!(
                r#"(function() {{
                    if (!navigator.geolocation) {{ dioxus.send(null); return; }}
                    navigator.geolocation.getCurrentPosition(
                        function(pos) {{ dioxus.send([pos.coords.latitude, pos.coords.longitude]); }},
                        function() {{ dioxus.send(null); }},
                        {{ timeout: {timeout_ms} }}
                    );
                }})();"#,
            );
            let mut eval = document::eval(&js);
            match eval.recv::<Option<(f64, f64)>>().await {
                Ok(Some((lat, lng))) => center.set(Position::new(lat, lng)),
                Ok(None) => tracing::debug!("geolocation unavailable, keeping fallback center"),
                Err(err) => tracing::debug!("geolocation bridge closed: {err}"),
            }
        });
    });

    let on_map_click = move |position: Position| {
        let session = auth().session;
        if !session.is_authenticated() {
            let _ = document::eval("alert('Sign in to drop a pin.');");
            return;
        }

        let created = match board.write().create(&session, position) {
            Ok(marker) => marker,
            Err(err) => {
                tracing::warn!("create rejected: {err}");
                return;
            }
        };

        spawn(async move {
            let result = api::create_marker(MarkerInfo::from_point(&created)).await;
            match outcome_of(&result) {
                WriteOutcome::Success => {}
                WriteOutcome::RetryableFailure(reason) => {
                    tracing::warn!("create not yet durable: {reason}");
                }
                WriteOutcome::FatalFailure(reason) => {
                    tracing::error!("create rejected by the store, rolling back: {reason}");
                    board.write().discard(&created.id);
                }
            }
        });
    };

    let on_edit_description = move |(id, text): (MarkerId, String)| {
        let updated = match board.write().update_description(&id, &text) {
            Ok(updated) => updated,
            Err(err) => {
                tracing::warn!("description update rejected: {err}");
                return;
            }
        };

        spawn(async move {
            let result = api::update_marker(MarkerInfo::from_point(&updated.marker)).await;
            match outcome_of(&result) {
                WriteOutcome::Success => {}
                WriteOutcome::RetryableFailure(reason) => {
                    tracing::warn!("description not yet durable: {reason}");
                }
                WriteOutcome::FatalFailure(reason) => {
                    tracing::error!("description rejected by the store, rolling back: {reason}");
                    board.write().restore(updated.previous);
                }
            }
        });
    };

    // Images go remote-first: the URL only exists once the object store has
    // the bytes, so there is nothing optimistic to roll back.
    let on_attach_image = move |upload: ImageUpload| {
        let id = upload.id.clone();
        spawn(async move {
            let result = api::attach_marker_image(
                upload.id.to_string(),
                upload.filename,
                upload.content_type,
                upload.bytes,
            )
            .await;

            match result {
                Ok(info) => {
                    if let Some(url) = info.image_url {
                        if let Err(err) = board.write().attach_image(&id, url) {
                            tracing::warn!("uploaded image for a vanished marker: {err}");
                        }
                    }
                }
                Err(err) => tracing::error!("image upload failed: {err}"),
            }
        });
    };

    let on_delete = move |id: MarkerId| {
        let removed = match board.write().remove(&id) {
            Ok(removed) => removed,
            Err(err) => {
                tracing::warn!("delete rejected: {err}");
                return;
            }
        };

        spawn(async move {
            let result = api::delete_marker(removed.marker.id.to_string()).await;
            match outcome_of(&result) {
                WriteOutcome::Success => {}
                WriteOutcome::RetryableFailure(reason) => {
                    tracing::warn!("delete not yet durable: {reason}");
                }
                WriteOutcome::FatalFailure(reason) => {
                    tracing::error!("delete rejected by the store, restoring: {reason}");
                    board.write().restore_removed(removed);
                }
            }
        });
    };

    rsx! {
        Navbar {
            Link { class: "navbar-link", to: Route::MapScreen {}, "Home" }
            if auth().session.is_authenticated() {
                LogoutButton { class: "navbar-button" }
            } else {
                Link { class: "navbar-button", to: Route::Login {}, "Login" }
            }
        }

        main {
            class: "map-layout",

            MapView {
                markers: board().markers().to_vec(),
                center: center(),
                zoom: config.zoom,
                on_map_click: on_map_click,
            }

            PinList {
                markers: board().markers().to_vec(),
                authenticated: auth().session.is_authenticated(),
                on_edit_description: on_edit_description,
                on_attach_image: on_attach_image,
                on_delete: on_delete,
            }
        }
    }
}
