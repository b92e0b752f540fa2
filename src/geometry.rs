use serde::{Deserialize, Serialize};

use crate::model::{CardElement, CardSettings};

pub const MIN_ELEMENT_SIZE: f32 = 10.0;

/// The card's content box: the area inside the padding where elements
/// live. Element geometry is absolute pixels in this space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBox {
    pub width: f32,
    pub height: f32,
}

impl ContentBox {
    pub fn of(settings: &CardSettings) -> Self {
        Self {
            width: (settings.width - settings.padding * 2.0).max(0.0),
            height: (settings.height - settings.padding * 2.0).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizeHandle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    fn moves_left_edge(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    fn moves_right_edge(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    fn moves_top_edge(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    fn moves_bottom_edge(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }
}

pub fn drag(el: &mut CardElement, dx: f32, dy: f32, content: ContentBox) {
    el.x += dx;
    el.y += dy;
    clamp_into(el, content);
}

/// Resize moves the grabbed edge(s) by the pointer delta. Top/left
/// handles also shift x/y so the opposite edge stays fixed. Result is
/// floored at MIN_ELEMENT_SIZE and clamped to the content box.
pub fn resize(el: &mut CardElement, handle: ResizeHandle, dx: f32, dy: f32, content: ContentBox) {
    let right = el.x + el.width;
    let bottom = el.y + el.height;

    if handle.moves_left_edge() {
        el.x = (el.x + dx).min(right - MIN_ELEMENT_SIZE);
        el.width = right - el.x;
    } else if handle.moves_right_edge() {
        el.width = (el.width + dx).max(MIN_ELEMENT_SIZE);
    }

    if handle.moves_top_edge() {
        el.y = (el.y + dy).min(bottom - MIN_ELEMENT_SIZE);
        el.height = bottom - el.y;
    } else if handle.moves_bottom_edge() {
        el.height = (el.height + dy).max(MIN_ELEMENT_SIZE);
    }

    clamp_into(el, content);
}

pub fn rotate(el: &mut CardElement, degrees: f32) {
    el.rotation = degrees;
}

fn clamp_into(el: &mut CardElement, content: ContentBox) {
    el.width = el.width.min(content.width).max(0.0);
    el.height = el.height.min(content.height).max(0.0);
    el.x = el.x.clamp(0.0, (content.width - el.width).max(0.0));
    el.y = el.y.clamp(0.0, (content.height - el.height).max(0.0));
}
