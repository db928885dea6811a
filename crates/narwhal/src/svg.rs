//! Debug preview of a layout as a standalone SVG document.

use crate::model::LayoutResult;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Written as the root `id`; omitted when `None`.
    pub card_id: Option<String>,
    pub include_reserved: bool,
    pub include_labels: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            card_id: None,
            include_reserved: true,
            include_labels: true,
        }
    }
}

pub fn render_svg(result: &LayoutResult, options: &SvgOptions) -> String {
    let w = result.container.width.max(1.0);
    let h = result.container.height.max(1.0);

    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
    if let Some(id) = &options.card_id {
        let _ = write!(&mut out, r#" id="{}""#, escape_xml(id));
    }
    let _ = writeln!(
        &mut out,
        r#" viewBox="0 0 {} {}" width="{}" height="{}">"#,
        fmt(w),
        fmt(h),
        fmt(w),
        fmt(h)
    );
    out.push_str(
        r#"<style>
.card { fill: #f9fafb; stroke: #4b5563; stroke-width: 1; }
.reserved { fill: none; stroke: #ef4444; stroke-width: 1; stroke-dasharray: 4 3; }
.bubble { fill: #dbeafe; stroke: #2563eb; stroke-width: 1; }
.bubble-label { fill: #1f2937; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 10px; text-anchor: middle; dominant-baseline: middle; }
</style>
"#,
    );

    let _ = writeln!(
        &mut out,
        r#"<rect class="card" x="0" y="0" width="{}" height="{}" />"#,
        fmt(w),
        fmt(h)
    );

    if options.include_reserved {
        let r = &result.reserved;
        let _ = writeln!(
            &mut out,
            r#"<rect class="reserved" x="{}" y="{}" width="{}" height="{}" />"#,
            fmt(r.x),
            fmt(r.y),
            fmt(r.width),
            fmt(r.height)
        );
    }

    out.push_str(r#"<g class="bubbles">"#);
    for b in &result.placed {
        let _ = write!(
            &mut out,
            r#"<circle class="bubble" data-id="{}" cx="{}" cy="{}" r="{}" />"#,
            escape_xml(&b.image_id),
            fmt(b.center.x),
            fmt(b.center.y),
            fmt(b.radius())
        );
        if options.include_labels {
            let _ = write!(
                &mut out,
                r#"<text class="bubble-label" x="{}" y="{}">{}</text>"#,
                fmt(b.center.x),
                fmt(b.center.y),
                escape_xml(&b.image_id)
            );
        }
    }
    out.push_str("</g>\n");

    out.push_str("</svg>\n");
    out
}

fn fmt(v: f64) -> String {
    // Three fractional digits, no `-0`, no float noise.
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 1000.0).round() / 1000.0;
    let s = rounded.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
