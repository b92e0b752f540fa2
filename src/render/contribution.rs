use super::Frame;
use crate::model::ContributionGraphAttrs;
use crate::stats::{CONTRIBUTION_DAYS, CONTRIBUTION_WEEKS};
use crate::theme::Theme;

const CELL_GAP: f32 = 2.0;

pub(super) fn render(svg: &mut String, attrs: &ContributionGraphAttrs, frame: Frame, theme: &Theme) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }

    let weeks = CONTRIBUTION_WEEKS as f32;
    let days = CONTRIBUTION_DAYS as f32;
    let cell = ((frame.width - (weeks - 1.0) * CELL_GAP) / weeks)
        .min((frame.height - (days - 1.0) * CELL_GAP) / days);
    if cell <= 0.0 {
        return;
    }
    let grid_w = weeks * cell + (weeks - 1.0) * CELL_GAP;
    let grid_h = days * cell + (days - 1.0) * CELL_GAP;
    let ox = (frame.width - grid_w) / 2.0;
    let oy = (frame.height - grid_h) / 2.0;
    let rx = (cell * 0.2).min(2.0);

    for (week, column) in attrs.contribution_data.iter().take(CONTRIBUTION_WEEKS).enumerate() {
        let x = ox + week as f32 * (cell + CELL_GAP);
        for (day, level) in column.iter().take(CONTRIBUTION_DAYS).enumerate() {
            let y = oy + day as f32 * (cell + CELL_GAP);
            let color = attrs
                .contribution_colors
                .get(*level as usize)
                .or_else(|| attrs.contribution_colors.first())
                .map_or(theme.contribution_fallback.as_str(), String::as_str);
            svg.push_str(&format!(
                "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{cell:.2}\" height=\"{cell:.2}\" rx=\"{rx:.2}\" fill=\"{color}\"/>"
            ));
        }
    }
}
