use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in integer screen pixels.
///
/// Used for window bounds and monitor work areas alike. Width and height
/// are never negative, including when read from host JSON. Edge and
/// center math saturates at the `i32` limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RectFields")]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Deserialize)]
struct RectFields {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
}

impl From<RectFields> for Rect {
    fn from(f: RectFields) -> Self {
        Rect::new(f.left, f.top, f.width, f.height)
    }
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Center point, rounded toward negative infinity.
    pub fn center(&self) -> (i32, i32) {
        (
            self.left.saturating_add(self.width / 2),
            self.top.saturating_add(self.height / 2),
        )
    }

    /// Half-open containment: the left/top edges are inside, the
    /// right/bottom edges are not.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Grow width and height up to the given floors. Never shrinks.
    pub fn with_min_size(self, min_width: i32, min_height: i32) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
            ..self
        }
    }
}

/// The usable area of one physical display, as enumerated by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub work_area: Rect,
    #[serde(default)]
    pub is_primary: bool,
}

impl MonitorInfo {
    pub fn new(id: impl Into<String>, work_area: Rect) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            work_area,
            is_primary: false,
        }
    }
}

/// Window bounds as reported by the host. Any field may be missing
/// (minimized windows, windows on a detached display).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowBounds {
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl WindowBounds {
    /// Resolve each missing field on its own: position defaults to the
    /// origin, size to the given fallback.
    pub fn resolve(&self, fallback_width: i32, fallback_height: i32) -> Rect {
        Rect::new(
            self.left.unwrap_or(0),
            self.top.unwrap_or(0),
            self.width.unwrap_or(fallback_width),
            self.height.unwrap_or(fallback_height),
        )
    }
}

impl From<Rect> for WindowBounds {
    fn from(r: Rect) -> Self {
        Self {
            left: Some(r.left),
            top: Some(r.top),
            width: Some(r.width),
            height: Some(r.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_negative_size() {
        let r = Rect::new(10, 10, -5, -1);
        assert_eq!(r.width, 0);
        assert_eq!(r.height, 0);
        assert_eq!(r.left, 10);
    }

    #[test]
    fn center_of_window() {
        let r = Rect::new(2400, 300, 800, 600);
        assert_eq!(r.center(), (2800, 600));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0, 0, 1920, 1080);
        assert!(r.contains_point(0, 0));
        assert!(r.contains_point(1919, 1079));
        assert!(!r.contains_point(1920, 500));
        assert!(!r.contains_point(500, 1080));
        assert!(!r.contains_point(-1, 0));
    }

    #[test]
    fn contains_with_negative_origin() {
        let r = Rect::new(-1920, 0, 1920, 1080);
        assert!(r.contains_point(-1920, 0));
        assert!(r.contains_point(-1, 100));
        assert!(!r.contains_point(0, 100));
    }

    #[test]
    fn edges_saturate_near_i32_max() {
        let r = Rect::new(i32::MAX - 100, i32::MAX - 10, 800, 600);
        assert_eq!(r.right(), i32::MAX);
        assert_eq!(r.bottom(), i32::MAX);
        assert_eq!(r.center(), (i32::MAX, i32::MAX));
        assert!(r.contains_point(i32::MAX - 50, i32::MAX - 5));
        assert!(!r.contains_point(i32::MAX, i32::MAX - 5));
    }

    #[test]
    fn deserialize_clamps_negative_size() {
        let r: Rect =
            serde_json::from_str(r#"{"left":5,"top":6,"width":-1920,"height":-1}"#).unwrap();
        assert_eq!(r, Rect::new(5, 6, 0, 0));
        assert_eq!(r.width, 0);

        let m: MonitorInfo = serde_json::from_str(
            r#"{"workArea":{"left":0,"top":0,"width":-10,"height":1080}}"#,
        )
        .unwrap();
        assert_eq!(m.work_area.width, 0);
    }

    #[test]
    fn min_size_only_grows() {
        let small = Rect::new(5, 6, 200, 150).with_min_size(400, 300);
        assert_eq!(small, Rect::new(5, 6, 400, 300));

        let big = Rect::new(0, 0, 1920, 1080).with_min_size(400, 300);
        assert_eq!(big, Rect::new(0, 0, 1920, 1080));
    }

    #[test]
    fn bounds_resolve_per_field() {
        let bounds = WindowBounds {
            left: Some(100),
            top: None,
            width: None,
            height: Some(500),
        };
        assert_eq!(bounds.resolve(800, 600), Rect::new(100, 0, 800, 500));
        assert_eq!(
            WindowBounds::default().resolve(800, 600),
            Rect::new(0, 0, 800, 600)
        );
    }

    #[test]
    fn monitor_deserializes_from_host_json() {
        let json = r#"{"id":"disp-1","workArea":{"left":1920,"top":0,"width":1920,"height":1040}}"#;
        let m: MonitorInfo = serde_json::from_str(json).unwrap();
        assert_eq!(m.work_area, Rect::new(1920, 0, 1920, 1040));
        assert!(!m.is_primary);
        assert!(m.name.is_empty());
    }
}
