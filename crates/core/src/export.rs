use std::fmt::Write as _;

use crate::error::Result;
use crate::pipeline::Treemap;

const LEGEND_GAP: f64 = 20.0;
const LEGEND_WIDTH: f64 = 220.0;
const SWATCH: f64 = 20.0;
const LEGEND_ROW: f64 = 25.0;

/// One row per tile. Any write failure, including the final flush, comes back
/// as [`crate::Error::Csv`].
pub fn to_csv(map: &Treemap, mut w: impl std::io::Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(&mut w);
    writer.write_record([
        "name", "category", "value", "depth", "x0", "y0", "x1", "y1", "color",
    ])?;
    for leaf in &map.leaves {
        writer.write_record([
            leaf.name().to_string(),
            leaf.category().to_string(),
            leaf.value().to_string(),
            leaf.depth.to_string(),
            leaf.rect.x0.to_string(),
            leaf.rect.y0.to_string(),
            leaf.rect.x1.to_string(),
            leaf.rect.y1.to_string(),
            map.color_of(leaf).to_hex(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn to_json(map: &Treemap) -> serde_json::Value {
    serde_json::json!({
        "width": map.width,
        "height": map.height,
        "total": map.total,
        "leaves": map.leaves.iter().map(|leaf| serde_json::json!({
            "name": leaf.name(),
            "category": leaf.category(),
            "value": leaf.value(),
            "depth": leaf.depth,
            "x0": leaf.rect.x0,
            "y0": leaf.rect.y0,
            "x1": leaf.rect.x1,
            "y1": leaf.rect.y1,
            "color": map.color_of(leaf).to_hex(),
        })).collect::<Vec<_>>(),
        "legend": map.legend_entries().map(|(category, color)| serde_json::json!({
            "category": category,
            "color": color.to_hex(),
        })).collect::<Vec<_>>(),
    })
}

/// Standalone SVG: one group per tile, legend to the right of the canvas.
pub fn to_svg(map: &Treemap) -> String {
    let legend_height = map.legend.len() as f64 * LEGEND_ROW;
    let total_width = map.width + LEGEND_GAP + LEGEND_WIDTH;
    let total_height = map.height.max(legend_height);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{total_width}" height="{total_height}" viewBox="0 0 {total_width} {total_height}">"#
    );
    let _ = writeln!(
        svg,
        r#"<g id="treemap" font-family="sans-serif" font-size="10">"#
    );
    for leaf in &map.leaves {
        let r = leaf.rect;
        let _ = writeln!(svg, r#"<g transform="translate({},{})">"#, r.x0, r.y0);
        let _ = writeln!(
            svg,
            r#"<rect class="tile" width="{}" height="{}" fill="{}" data-name="{}" data-category="{}" data-value="{}"/>"#,
            r.width(),
            r.height(),
            map.color_of(leaf),
            escape_xml(leaf.name()),
            escape_xml(leaf.category()),
            leaf.value(),
        );
        let _ = writeln!(
            svg,
            r#"<text class="tile-text" x="5" y="15" fill="white">{}</text>"#,
            escape_xml(leaf.name())
        );
        svg.push_str("</g>\n");
    }
    svg.push_str("</g>\n");

    let _ = writeln!(
        svg,
        r#"<g id="legend" transform="translate({},0)" font-family="sans-serif" font-size="12">"#,
        map.width + LEGEND_GAP
    );
    for (i, (category, color)) in map.legend_entries().enumerate() {
        let y = i as f64 * LEGEND_ROW;
        let _ = writeln!(
            svg,
            r#"<rect class="legend-item" x="0" y="{y}" width="{SWATCH}" height="{SWATCH}" fill="{color}"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}">{}</text>"#,
            SWATCH + 5.0,
            y + 15.0,
            escape_xml(category)
        );
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
