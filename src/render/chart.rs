use super::{Frame, escape_xml, placeholder};
use crate::config::{ChartConfig, Config};
use crate::model::{ChartAttrs, ChartDatum, ChartType};

pub(super) fn render(svg: &mut String, attrs: &ChartAttrs, frame: Frame, config: &Config) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    if attrs.chart_data.is_empty() || attrs.chart_data.iter().all(|d| d.value <= 0.0) {
        placeholder(svg, frame, &config.theme, &config.chart.no_data_message);
        return;
    }

    let mut top = 0.0;
    if !attrs.chart_title.is_empty() {
        let title_size = attrs.font_size + 2.0;
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{title_size}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            frame.width / 2.0,
            title_size,
            config.theme.font_family,
            attrs.color,
            escape_xml(&attrs.chart_title)
        ));
        top = title_size + 6.0;
    }

    let body = Frame {
        id: frame.id,
        width: frame.width,
        height: (frame.height - top).max(0.0),
    };
    svg.push_str(&format!("<g transform=\"translate(0 {top:.2})\">"));
    match attrs.chart_type {
        ChartType::Bar => render_bars(svg, attrs, body, config),
        ChartType::Pie => render_pie(svg, attrs, body, config),
    }
    svg.push_str("</g>");
}

fn render_bars(svg: &mut String, attrs: &ChartAttrs, frame: Frame, config: &Config) {
    let chart = &config.chart;
    let label_band = attrs.font_size + 4.0;
    let plot_h = (frame.height - label_band).max(0.0);
    let max = attrs
        .chart_data
        .iter()
        .map(|d| d.value)
        .fold(0.0_f32, f32::max);
    if max <= 0.0 || plot_h <= 0.0 {
        return;
    }

    let slot = frame.width / attrs.chart_data.len() as f32;
    let bar_w = slot * (1.0 - chart.bar_gap_fraction);

    for (i, datum) in attrs.chart_data.iter().enumerate() {
        let x = i as f32 * slot + (slot - bar_w) / 2.0;
        // Zero and tiny values still get a visible sliver.
        let h = (datum.value.max(0.0) / max * plot_h).max(chart.min_bar_fraction * plot_h);
        svg.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{:.2}\" width=\"{bar_w:.2}\" height=\"{h:.2}\" rx=\"2\" fill=\"{}\"/>",
            plot_h - h,
            datum.color
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            x + bar_w / 2.0,
            plot_h + attrs.font_size,
            config.theme.font_family,
            attrs.font_size,
            attrs.color,
            escape_xml(&datum.label)
        ));
    }
}

fn render_pie(svg: &mut String, attrs: &ChartAttrs, frame: Frame, config: &Config) {
    let chart = &config.chart;
    let side = frame.height.min(frame.width * 0.6);
    if side <= 0.0 {
        return;
    }
    let scale = side / chart.pie_viewbox;

    svg.push_str(&format!("<g transform=\"scale({scale:.4})\">"));
    let angles = pie_angles(&attrs.chart_data);
    let (cx, cy) = chart.pie_center;
    let r = chart.pie_radius;
    for (datum, (start, end)) in attrs.chart_data.iter().zip(&angles) {
        let sweep = end - start;
        if sweep <= 0.0 {
            continue;
        }
        if sweep >= 359.999 {
            svg.push_str(&format!(
                "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"{}\"/>",
                datum.color
            ));
            continue;
        }
        let (x0, y0) = polar(cx, cy, r, *start);
        let (x1, y1) = polar(cx, cy, r, *end);
        let large = if sweep > 180.0 { 1 } else { 0 };
        svg.push_str(&format!(
            "<path d=\"M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large} 1 {x1:.2} {y1:.2} Z\" fill=\"{}\"/>",
            datum.color
        ));
    }
    svg.push_str("</g>");

    write_legend(svg, attrs, frame, side, chart, config);
}

fn write_legend(
    svg: &mut String,
    attrs: &ChartAttrs,
    frame: Frame,
    pie_side: f32,
    chart: &ChartConfig,
    config: &Config,
) {
    let x = pie_side + 8.0;
    if x >= frame.width {
        return;
    }
    let dot = chart.legend_dot_size;
    let row_h = dot.max(attrs.font_size) + chart.legend_spacing;
    let total = attrs.chart_data.len() as f32 * row_h;
    let mut y = (frame.height - total).max(0.0) / 2.0;

    for datum in &attrs.chart_data {
        svg.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{dot:.2}\" height=\"{dot:.2}\" rx=\"2\" fill=\"{}\"/>",
            datum.color
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            x + dot + 4.0,
            y + dot / 2.0,
            config.theme.font_family,
            attrs.font_size,
            attrs.color,
            escape_xml(&datum.label)
        ));
        y += row_h;
    }
}

/// Start/end angle in degrees for each datum, measured clockwise from 12
/// o'clock. Non-positive values get an empty sweep but keep their slot so
/// callers can zip against the data.
pub fn pie_angles(data: &[ChartDatum]) -> Vec<(f32, f32)> {
    let sum: f32 = data.iter().map(|d| d.value.max(0.0)).sum();
    if sum <= 0.0 {
        return data.iter().map(|_| (0.0, 0.0)).collect();
    }
    let mut angle = 0.0_f32;
    data.iter()
        .map(|d| {
            let sweep = d.value.max(0.0) / sum * 360.0;
            let start = angle;
            angle += sweep;
            (start, angle)
        })
        .collect()
}

fn polar(cx: f32, cy: f32, r: f32, degrees: f32) -> (f32, f32) {
    let rad = degrees.to_radians();
    (cx + r * rad.sin(), cy - r * rad.cos())
}
