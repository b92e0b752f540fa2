use serde::{Deserialize, Serialize};

use crate::model::{
    BadgeAttrs, CardElement, CardSettings, ChartAttrs, ContributionGraphAttrs, ElementKind,
    IconAttrs, ImageAttrs, LanguageBarAttrs, ProgressBarAttrs, QrCodeAttrs, ShapeAttrs,
    SocialBadgeAttrs, StatsCardAttrs, TableAttrs, TextAttrs, TrophyAttrs,
};

pub const TABLE_CELL_PLACEHOLDER: &str = "Cell";

/// The ordered element collection plus card settings and selection.
/// Insertion order is z-order: later elements paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub settings: CardSettings,
    pub elements: Vec<CardElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<u64>,
    #[serde(skip)]
    next_id: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub rotation: Option<f32>,
}

impl Scene {
    pub fn new(settings: CardSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Rebuilds the id counter after deserialization so fresh ids never
    /// collide with persisted ones.
    pub(crate) fn reseed_ids(&mut self) {
        self.next_id = self.elements.iter().map(|el| el.id).max().unwrap_or(0) + 1;
    }

    fn place(&mut self, x: f32, y: f32, width: f32, height: f32, kind: ElementKind) -> u64 {
        self.next_id = self.next_id.max(1);
        let id = self.next_id;
        self.next_id += 1;
        self.elements.push(CardElement {
            id,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            kind,
        });
        self.selected = Some(id);
        id
    }

    pub fn add_text(&mut self) -> u64 {
        self.place(20.0, 20.0, 200.0, 40.0, ElementKind::Text(TextAttrs::default()))
    }

    pub fn add_image(&mut self) -> u64 {
        self.place(50.0, 50.0, 150.0, 150.0, ElementKind::Image(ImageAttrs::default()))
    }

    pub fn add_shape(&mut self) -> u64 {
        self.place(100.0, 100.0, 100.0, 100.0, ElementKind::Shape(ShapeAttrs::default()))
    }

    pub fn add_trophy(&mut self) -> u64 {
        self.place(150.0, 150.0, 80.0, 100.0, ElementKind::Trophy(TrophyAttrs::default()))
    }

    pub fn add_badge(&mut self) -> u64 {
        self.place(200.0, 50.0, 120.0, 40.0, ElementKind::Badge(BadgeAttrs::default()))
    }

    pub fn add_table(&mut self) -> u64 {
        self.place(50.0, 200.0, 400.0, 200.0, ElementKind::Table(TableAttrs::default()))
    }

    pub fn add_stats_card(&mut self) -> u64 {
        self.place(
            50.0,
            50.0,
            180.0,
            120.0,
            ElementKind::StatsCard(StatsCardAttrs::default()),
        )
    }

    pub fn add_progress_bar(&mut self) -> u64 {
        self.place(
            50.0,
            100.0,
            300.0,
            40.0,
            ElementKind::ProgressBar(ProgressBarAttrs::default()),
        )
    }

    pub fn add_language_bar(&mut self) -> u64 {
        self.place(
            50.0,
            150.0,
            400.0,
            80.0,
            ElementKind::LanguageBar(LanguageBarAttrs::default()),
        )
    }

    pub fn add_contribution_graph(&mut self) -> u64 {
        self.place(
            50.0,
            200.0,
            600.0,
            120.0,
            ElementKind::ContributionGraph(ContributionGraphAttrs::default()),
        )
    }

    pub fn add_icon(&mut self) -> u64 {
        self.place(100.0, 100.0, 60.0, 60.0, ElementKind::Icon(IconAttrs::default()))
    }

    pub fn add_qr_code(&mut self) -> u64 {
        self.place(100.0, 100.0, 120.0, 120.0, ElementKind::QrCode(QrCodeAttrs::default()))
    }

    pub fn add_chart(&mut self) -> u64 {
        self.place(50.0, 100.0, 300.0, 220.0, ElementKind::Chart(ChartAttrs::default()))
    }

    pub fn add_social_badge(&mut self) -> u64 {
        self.place(
            200.0,
            100.0,
            160.0,
            40.0,
            ElementKind::SocialBadge(SocialBadgeAttrs::default()),
        )
    }

    pub fn element(&self, id: u64) -> Option<&CardElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn element_mut(&mut self, id: u64) -> Option<&mut CardElement> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    pub fn selected_element(&self) -> Option<&CardElement> {
        self.selected.and_then(|id| self.element(id))
    }

    pub fn select(&mut self, id: Option<u64>) {
        self.selected = match id {
            Some(id) if self.element(id).is_some() => Some(id),
            _ => None,
        };
    }

    pub fn patch(&mut self, id: u64, patch: GeometryPatch) -> bool {
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        if let Some(x) = patch.x {
            el.x = x;
        }
        if let Some(y) = patch.y {
            el.y = y;
        }
        if let Some(width) = patch.width {
            el.width = width;
        }
        if let Some(height) = patch.height {
            el.height = height;
        }
        if let Some(rotation) = patch.rotation {
            el.rotation = rotation;
        }
        true
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.elements.len();
        self.elements.retain(|el| el.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.elements.len() != before
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => self.delete(id),
            None => false,
        }
    }

    pub fn duplicate_selected(&mut self) -> Option<u64> {
        let source = self.selected_element()?.clone();
        self.next_id = self.next_id.max(1);
        let id = self.next_id;
        self.next_id += 1;
        self.elements.push(CardElement {
            id,
            x: source.x + 20.0,
            y: source.y + 20.0,
            ..source
        });
        self.selected = Some(id);
        Some(id)
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected = None;
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Write path for progress values: the stored value is clamped to
    /// [0, 100] so renderers and persisted state never disagree.
    pub fn set_progress_value(&mut self, id: u64, value: f32) -> bool {
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        let ElementKind::ProgressBar(attrs) = &mut el.kind else {
            return false;
        };
        attrs.progress_value = value.clamp(0.0, 100.0);
        true
    }

    fn table_mut(&mut self, id: u64) -> Option<&mut TableAttrs> {
        match &mut self.element_mut(id)?.kind {
            ElementKind::Table(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn table_add_row(&mut self, id: u64) -> bool {
        let Some(table) = self.table_mut(id) else {
            return false;
        };
        let columns = table.columns;
        table
            .table_data
            .push(vec![TABLE_CELL_PLACEHOLDER.to_string(); columns]);
        table.rows = table.table_data.len();
        true
    }

    pub fn table_remove_row(&mut self, id: u64) -> bool {
        let Some(table) = self.table_mut(id) else {
            return false;
        };
        if table.table_data.len() <= 1 {
            return false;
        }
        table.table_data.pop();
        table.rows = table.table_data.len();
        true
    }

    pub fn table_add_column(&mut self, id: u64) -> bool {
        let Some(table) = self.table_mut(id) else {
            return false;
        };
        for row in &mut table.table_data {
            row.push(TABLE_CELL_PLACEHOLDER.to_string());
        }
        table.columns += 1;
        true
    }

    pub fn table_remove_column(&mut self, id: u64) -> bool {
        let Some(table) = self.table_mut(id) else {
            return false;
        };
        if table.columns <= 1 {
            return false;
        }
        for row in &mut table.table_data {
            row.pop();
        }
        table.columns -= 1;
        true
    }

    pub fn table_set_cell(&mut self, id: u64, row: usize, column: usize, value: &str) -> bool {
        let Some(table) = self.table_mut(id) else {
            return false;
        };
        match table.table_data.get_mut(row).and_then(|r| r.get_mut(column)) {
            Some(cell) => {
                *cell = value.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_shape(scene: &Scene, id: u64) -> (usize, usize, Vec<usize>) {
        let ElementKind::Table(attrs) = &scene.element(id).unwrap().kind else {
            panic!("expected table");
        };
        (
            attrs.rows,
            attrs.columns,
            attrs.table_data.iter().map(|r| r.len()).collect(),
        )
    }

    #[test]
    fn add_assigns_unique_increasing_ids() {
        let mut scene = Scene::default();
        let a = scene.add_text();
        let b = scene.add_shape();
        let c = scene.add_chart();
        assert!(a < b && b < c);
        assert_eq!(scene.elements.len(), 3);
        assert_eq!(scene.selected, Some(c));
    }

    #[test]
    fn patch_merges_geometry_by_id() {
        let mut scene = Scene::default();
        let id = scene.add_shape();
        assert!(scene.patch(
            id,
            GeometryPatch {
                x: Some(5.0),
                rotation: Some(45.0),
                ..Default::default()
            }
        ));
        let el = scene.element(id).unwrap();
        assert_eq!(el.x, 5.0);
        assert_eq!(el.y, 100.0);
        assert_eq!(el.rotation, 45.0);
        assert!(!scene.patch(9999, GeometryPatch::default()));
    }

    #[test]
    fn deleting_selected_element_clears_selection() {
        let mut scene = Scene::default();
        let id = scene.add_text();
        assert_eq!(scene.selected, Some(id));
        assert!(scene.delete_selected());
        assert_eq!(scene.selected, None);
        assert!(scene.is_empty());
    }

    #[test]
    fn duplicate_offsets_copy_and_selects_it() {
        let mut scene = Scene::default();
        let id = scene.add_badge();
        let copy = scene.duplicate_selected().unwrap();
        assert_ne!(id, copy);
        let original = scene.element(id).unwrap();
        let duplicate = scene.element(copy).unwrap();
        assert_eq!(duplicate.x, original.x + 20.0);
        assert_eq!(duplicate.y, original.y + 20.0);
        assert_eq!(duplicate.kind, original.kind);
        assert_eq!(scene.selected, Some(copy));
    }

    #[test]
    fn select_rejects_unknown_ids() {
        let mut scene = Scene::default();
        let id = scene.add_icon();
        scene.select(Some(9999));
        assert_eq!(scene.selected, None);
        scene.select(Some(id));
        assert_eq!(scene.selected, Some(id));
        scene.select(None);
        assert_eq!(scene.selected, None);
    }

    #[test]
    fn table_edits_preserve_rectangularity() {
        let mut scene = Scene::default();
        let id = scene.add_table();

        assert!(scene.table_add_row(id));
        assert!(scene.table_add_column(id));
        let (rows, columns, widths) = table_shape(&scene, id);
        assert_eq!(rows, 4);
        assert_eq!(columns, 4);
        assert!(widths.iter().all(|w| *w == columns));

        assert!(scene.table_remove_column(id));
        assert!(scene.table_remove_row(id));
        let (rows, columns, widths) = table_shape(&scene, id);
        assert_eq!(rows, 3);
        assert_eq!(columns, 3);
        assert!(widths.iter().all(|w| *w == columns));
    }

    #[test]
    fn table_header_row_and_last_column_survive() {
        let mut scene = Scene::default();
        let id = scene.add_table();
        for _ in 0..5 {
            scene.table_remove_row(id);
        }
        let (rows, _, _) = table_shape(&scene, id);
        assert_eq!(rows, 1);

        for _ in 0..5 {
            scene.table_remove_column(id);
        }
        let (_, columns, widths) = table_shape(&scene, id);
        assert_eq!(columns, 1);
        assert!(widths.iter().all(|w| *w == 1));
    }

    #[test]
    fn progress_value_clamped_at_write_time() {
        let mut scene = Scene::default();
        let id = scene.add_progress_bar();
        assert!(scene.set_progress_value(id, 150.0));
        let ElementKind::ProgressBar(attrs) = &scene.element(id).unwrap().kind else {
            panic!("expected progress bar");
        };
        assert_eq!(attrs.progress_value, 100.0);

        scene.set_progress_value(id, -5.0);
        let ElementKind::ProgressBar(attrs) = &scene.element(id).unwrap().kind else {
            panic!("expected progress bar");
        };
        assert_eq!(attrs.progress_value, 0.0);
    }
}
