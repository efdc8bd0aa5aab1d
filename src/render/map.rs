use serde_json::json;

use crate::data::records::PromiseRecord;
use crate::render::escape_html;

/// Continental-US center used when there is nothing to plot.
pub const FALLBACK_CENTER: (f64, f64) = (39.8283, -98.5795);
const FALLBACK_ZOOM: u8 = 4;
const RESULT_ZOOM: u8 = 6;

const MAP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map('map').setView(__CENTER__, __ZOOM__);
L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
    attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);
var markers = __MARKERS__;
markers.forEach(function (m) {
    L.marker([m.lat, m.lon])
        .addTo(map)
        .bindPopup(m.popup)
        .bindTooltip(m.tooltip);
});
</script>
</body>
</html>
"#;

/// Render the subset as a self-contained Leaflet document, suitable for an
/// iframe srcdoc. Centered on the mean coordinate; records without
/// coordinates are skipped; an empty subset gets the default map.
pub fn render_map(records: &[PromiseRecord]) -> String {
    let plotted: Vec<(&PromiseRecord, (f64, f64))> = records
        .iter()
        .filter_map(|r| r.coordinates().map(|c| (r, c)))
        .collect();

    let (center, zoom) = if plotted.is_empty() {
        (FALLBACK_CENTER, FALLBACK_ZOOM)
    } else {
        let n = plotted.len() as f64;
        let lat = plotted.iter().map(|(_, (lat, _))| lat).sum::<f64>() / n;
        let lon = plotted.iter().map(|(_, (_, lon))| lon).sum::<f64>() / n;
        ((lat, lon), RESULT_ZOOM)
    };

    let markers: Vec<serde_json::Value> = plotted
        .iter()
        .map(|(record, (lat, lon))| {
            json!({
                "lat": lat,
                "lon": lon,
                "tooltip": escape_html(&record.city),
                "popup": format!(
                    "<b>{}</b><br>{}",
                    escape_html(&record.city),
                    escape_html(&record.promise_description)
                ),
            })
        })
        .collect();

    MAP_TEMPLATE
        .replace("__CENTER__", &format!("[{}, {}]", center.0, center.1))
        .replace("__ZOOM__", &zoom.to_string())
        .replace(
            "__MARKERS__",
            &serde_json::to_string(&markers).unwrap_or_else(|_| "[]".to_string()),
        )
}
