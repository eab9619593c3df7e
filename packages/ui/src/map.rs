//! Leaflet map wrapper.
//!
//! The widget is driven through the `document::eval` bridge: Leaflet and its
//! marker-cluster plugin are loaded once from a CDN, the map instance is
//! parked on its container element, and events flow back to Rust over
//! `dioxus.send`. Pin rendering is a full clear-and-redraw of the cluster
//! group whenever the collection changes; at tens of pins there is nothing
//! to gain from incremental updates.

use dioxus::prelude::*;
use store::{PointOfInterest, Position};

/// Leaflet CDN URLs
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Leaflet.markercluster CDN URLs
const CLUSTER_CSS: &str =
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css";
const CLUSTER_DEFAULT_CSS: &str =
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css";
const CLUSTER_JS: &str =
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js";

/// Simple counter for unique container IDs
static MAP_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

/// Escape a string so it's safe to embed inside a JS string literal (double-quoted).
fn js_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[component]
pub fn MapView(
    markers: ReadOnlySignal<Vec<PointOfInterest>>,
    center: ReadOnlySignal<Position>,
    zoom: f64,
    on_map_click: EventHandler<Position>,
) -> Element {
    let map_id = use_signal(|| {
        let n = MAP_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        format!("pinmap-canvas-{n}")
    });

    // Leaflet + cluster plugin loaded
    let mut ready = use_signal(|| false);
    // Map instance created on the container
    let mut initialized = use_signal(|| false);

    // ── Load Leaflet + markercluster CSS + JS once ──
    use_effect(move || {
        let js = format!(
            r#"(function() {{
                function addCss(id, href) {{
                    if (document.getElementById(id)) return;
                    var link = document.createElement('link');
                    link.id = id;
                    link.rel = 'stylesheet';
                    link.href = href;
                    document.head.appendChild(link);
                }}
                addCss('leaflet-css', '{LEAFLET_CSS}');
                addCss('leaflet-cluster-css', '{CLUSTER_CSS}');
                addCss('leaflet-cluster-default-css', '{CLUSTER_DEFAULT_CSS}');

                function loadCluster() {{
                    if (window.L && window.L.markerClusterGroup) {{ dioxus.send(true); return; }}
                    var plugin = document.getElementById('leaflet-cluster-js');
                    if (!plugin) {{
                        plugin = document.createElement('script');
                        plugin.id = 'leaflet-cluster-js';
                        plugin.src = '{CLUSTER_JS}';
                        document.head.appendChild(plugin);
                    }}
                    plugin.addEventListener('load', function() {{ dioxus.send(true); }});
                    plugin.addEventListener('error', function() {{ dioxus.send(false); }});
                }}

                if (window.L) {{ loadCluster(); return; }}
                var script = document.getElementById('leaflet-js');
                if (!script) {{
                    script = document.createElement('script');
                    script.id = 'leaflet-js';
                    script.src = '{LEAFLET_JS}';
                    document.head.appendChild(script);
                }}
                script.addEventListener('load', loadCluster);
                script.addEventListener('error', function() {{ dioxus.send(false); }});
            }})();"#,
        );
        spawn(async move {
            let mut eval = document::eval(&js);
            match eval.recv::<bool>().await {
                Ok(true) => ready.set(true),
                Ok(false) => tracing::error!("failed to load the map widget"),
                Err(_) => {}
            }
        });
    });

    // ── Create the map once the widget is loaded ──
    use_effect(move || {
        if !ready() || initialized() {
            return;
        }

        let eid = map_id.peek().clone();
        let start = *center.peek();

        let js = format!(
            r#"(function() {{
                var container = document.getElementById({eid_js});
                if (!container || container._map) return;

                var map = L.map(container).setView([{lat}, {lng}], {zoom});
                L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
                    maxZoom: 19,
                    attribution: '&copy; OpenStreetMap contributors'
                }}).addTo(map);

                var cluster = L.markerClusterGroup();
                map.addLayer(cluster);

                map.on('click', function(ev) {{
                    if (container._onMapClick) container._onMapClick(ev.latlng.lat, ev.latlng.lng);
                }});
                map.on('moveend', function() {{
                    var c = map.getCenter();
                    if (container._onCameraChange) container._onCameraChange(c.lat, c.lng, map.getZoom());
                }});

                container._map = map;
                container._cluster = cluster;
            }})();"#,
            eid_js = js_string_escape(&eid),
            lat = start.lat,
            lng = start.lng,
            zoom = zoom,
        );
        document::eval(&js);
        initialized.set(true);

        // Click bridge: widget clicks become create calls upstream
        let eid2 = eid.clone();
        spawn(async move {
            let bridge_js = format!(
                r#"(function() {{
                    var container = document.getElementById({eid_js});
                    if (!container) return;
                    container._onMapClick = function(lat, lng) {{
                        dioxus.send([lat, lng]);
                    }};
                }})();"#,
                eid_js = js_string_escape(&eid2),
            );
            let mut eval = document::eval(&bridge_js);
            loop {
                match eval.recv::<(f64, f64)>().await {
                    Ok((lat, lng)) => on_map_click.call(Position::new(lat, lng)),
                    Err(_) => break,
                }
            }
        });

        // Camera bridge: logged, not acted on
        let eid3 = eid.clone();
        spawn(async move {
            let bridge_js = format!(
                r#"(function() {{
                    var container = document.getElementById({eid_js});
                    if (!container) return;
                    container._onCameraChange = function(lat, lng, zoom) {{
                        dioxus.send([lat, lng, zoom]);
                    }};
                }})();"#,
                eid_js = js_string_escape(&eid3),
            );
            let mut eval = document::eval(&bridge_js);
            loop {
                match eval.recv::<(f64, f64, f64)>().await {
                    Ok((lat, lng, z)) => {
                        tracing::debug!("camera changed: center=({lat}, {lng}) zoom={z}");
                    }
                    Err(_) => break,
                }
            }
        });
    });

    // ── Redraw pins whenever the collection changes ──
    use_effect(move || {
        let pins = markers();
        if !initialized() {
            return;
        }

        let pins_json = match serde_json::to_string(&pins) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!("failed to serialize pins: {err}");
                return;
            }
        };

        let eid = map_id.peek().clone();
        let js = format!(
            r#"(function() {{
                var container = document.getElementById({eid_js});
                if (!container || !container._cluster) return;
                var pins = {pins_json};
                container._cluster.clearLayers();
                pins.forEach(function(pin) {{
                    var marker = L.marker([pin.position.lat, pin.position.lng]);
                    var popup = document.createElement('div');
                    var text = document.createElement('p');
                    text.textContent = pin.description || 'No description yet';
                    popup.appendChild(text);
                    if (pin.image_url) {{
                        var img = document.createElement('img');
                        img.src = pin.image_url;
                        img.alt = '';
                        img.style.maxWidth = '160px';
                        popup.appendChild(img);
                    }}
                    marker.bindPopup(popup);
                    container._cluster.addLayer(marker);
                }});
            }})();"#,
            eid_js = js_string_escape(&eid),
        );
        document::eval(&js);
    });

    // ── Recenter when the caller moves the camera (e.g. geolocation) ──
    use_effect(move || {
        let target = center();
        if !initialized() {
            return;
        }

        let eid = map_id.peek().clone();
        let js = format!(
            r#"(function() {{
                var container = document.getElementById({eid_js});
                if (!container || !container._map) return;
                container._map.setView([{lat}, {lng}], container._map.getZoom());
            }})();"#,
            eid_js = js_string_escape(&eid),
            lat = target.lat,
            lng = target.lng,
        );
        document::eval(&js);
    });

    rsx! {
        div {
            id: "{map_id}",
            class: "map-canvas",
        }
    }
}
