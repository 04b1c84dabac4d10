//! Maps normalized chakra anchors onto a measured on-screen figure.
//!
//! [`compute_layout`] is the pure core: container and figure rectangles in,
//! percentages and a hotspot scale out. [`LayoutEngine`] is the thin
//! reactive shim a host drives from its resize and image-load observers.

use serde::{Deserialize, Serialize};

use crate::anchors::{chakra_positions, spine_range};
use crate::chakra::ChakraId;
use crate::constants::{
    FALLBACK_SPINE_RATIO, MIN_SPINE_HEIGHT, REFERENCE_SPINE_HEIGHT, SCALE_MAX, SCALE_MIN,
    SPINE_WIDTH_MAX, SPINE_WIDTH_MIN, SPINE_WIDTH_RATIO,
};
use crate::diagnostics::Diagnostics;

/// A measured element box in page pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Undecoded images report zero size.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Vertical band, relative to the container, that anchors are spread over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpineRect {
    pub top: f64,
    pub height: f64,
}

/// Guide line placement. Pixel values except `left_percent`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SpineStyle {
    pub top: f64,
    pub left_percent: f64,
    pub height: f64,
    pub width: f64,
    pub transform: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChakraPosition {
    pub id: ChakraId,
    pub x_percent: f64,
    pub y_percent: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LayoutGeometry {
    pub container_width: f64,
    pub container_height: f64,
    /// Figure offset from the container top, when measured.
    pub image_top: Option<f64>,
    pub image_height: Option<f64>,
    pub spine: SpineRect,
    pub scale: f64,
    pub positions: Vec<ChakraPosition>,
    pub spine_style: SpineStyle,
}

impl LayoutGeometry {
    /// Zeroed geometry for "not measured yet".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        !self.positions.is_empty()
    }
}

/// Spine band for a container. A usable figure measurement is clamped to
/// `[200, container_height]` tall and kept inside the container; without
/// one, a centred band of 70% of the container is used.
pub fn spine_rect(container_height: f64, figure: Option<(f64, f64)>) -> SpineRect {
    let container_height = container_height.max(0.0);
    match figure {
        Some((top, height)) if height.is_finite() && height > 0.0 && top.is_finite() => {
            let height = height.max(MIN_SPINE_HEIGHT).min(container_height);
            let top = top.max(0.0).min(container_height - height);
            SpineRect { top, height }
        }
        _ => {
            let height = (container_height * FALLBACK_SPINE_RATIO)
                .max(MIN_SPINE_HEIGHT)
                .min(container_height);
            SpineRect {
                top: (container_height - height) / 2.0,
                height,
            }
        }
    }
}

/// Hotspot scale relative to the designed 560px spine, bounded to [0.85, 1.25].
pub fn layout_scale(spine_height: f64) -> f64 {
    (spine_height / REFERENCE_SPINE_HEIGHT).clamp(SCALE_MIN, SCALE_MAX)
}

pub fn spine_width(container_width: f64) -> f64 {
    (container_width * SPINE_WIDTH_RATIO).clamp(SPINE_WIDTH_MIN, SPINE_WIDTH_MAX)
}

/// Pure layout. A missing or zero-height container yields empty geometry.
pub fn compute_layout(container: Option<Rect>, figure: Option<Rect>) -> LayoutGeometry {
    let Some(container) = container.filter(|c| c.height.is_finite() && c.height > 0.0) else {
        return LayoutGeometry::empty();
    };
    let container_width = if container.width.is_finite() {
        container.width.max(0.0)
    } else {
        0.0
    };
    let container_height = container.height;

    let figure = figure.filter(Rect::is_usable);
    let image_top = figure.map(|f| f.top - container.top);
    let image_height = figure.map(|f| f.height);

    let spine = spine_rect(container_height, image_top.zip(image_height));
    let scale = layout_scale(spine.height);

    let positions = chakra_positions()
        .into_iter()
        .map(|anchor| {
            let y_px = spine.top + anchor.y * spine.height;
            ChakraPosition {
                id: anchor.id,
                x_percent: anchor.x * 100.0,
                y_percent: y_px / container_height * 100.0,
            }
        })
        .collect();

    let range = spine_range();
    let spine_style = SpineStyle {
        top: spine.top + range.top * spine.height,
        left_percent: 50.0,
        height: (range.bottom - range.top) * spine.height,
        width: spine_width(container_width),
        transform: "translateX(-50%)",
    };

    LayoutGeometry {
        container_width,
        container_height,
        image_top,
        image_height,
        spine,
        scale,
        positions,
        spine_style,
    }
}

/// What caused a refresh. Informational only; every refresh is a full
/// recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutTrigger {
    Mount,
    ContainerResize,
    FigureResize,
    ImageLoad,
    SheetResize,
}

/// Host-side measurements. `None` means the element is not mounted.
pub trait FigureHost {
    fn container(&self) -> Option<Rect>;

    /// Wrapper around the figure image; preferred when present.
    fn figure_wrapper(&self) -> Option<Rect> {
        None
    }

    fn figure_image(&self) -> Option<Rect>;
}

pub struct LayoutEngine {
    geometry: LayoutGeometry,
    last_inputs: Option<(Option<Rect>, Option<Rect>)>,
    connected: bool,
    recomputes: u64,
    diagnostics: Option<Box<dyn Diagnostics>>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            geometry: LayoutGeometry::empty(),
            last_inputs: None,
            connected: true,
            recomputes: 0,
            diagnostics: None,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Box<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Re-measure and recompute. Identical measurements reuse the previous
    /// geometry. Ignored once disconnected.
    pub fn refresh(&mut self, host: &impl FigureHost, trigger: LayoutTrigger) -> &LayoutGeometry {
        if !self.connected {
            return &self.geometry;
        }
        let container = host.container();
        let figure = host.figure_wrapper().or_else(|| host.figure_image());
        let inputs = (container, figure);
        if self.last_inputs != Some(inputs) {
            self.geometry = compute_layout(container, figure);
            self.last_inputs = Some(inputs);
            self.recomputes += 1;
        }
        if let Some(diag) = self.diagnostics.as_mut() {
            diag.on_layout(trigger, &self.geometry);
        }
        &self.geometry
    }

    pub fn geometry(&self) -> &LayoutGeometry {
        &self.geometry
    }

    /// Number of full recomputations performed.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Stop reacting to measurements; the last geometry stays readable.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(width: f64, height: f64) -> Rect {
        Rect::new(0.0, 0.0, width, height)
    }

    #[test]
    fn test_measured_figure() {
        let geo = compute_layout(
            Some(container(400.0, 1000.0)),
            Some(Rect::new(50.0, 100.0, 300.0, 500.0)),
        );
        assert_eq!(geo.spine, SpineRect { top: 100.0, height: 500.0 });
        let heart = geo.positions.iter().find(|p| p.id == ChakraId::Heart).unwrap();
        assert!((heart.y_percent - 35.0).abs() < 1e-9);
        assert_eq!(heart.x_percent, 50.0);
        assert!((geo.scale - 500.0 / 560.0).abs() < 1e-12);
    }

    #[test]
    fn test_fallback_centred() {
        let spine = spine_rect(1000.0, None);
        assert_eq!(spine.height, 700.0);
        assert!((spine.top - 150.0).abs() < 1e-9);

        let small = spine_rect(250.0, None);
        assert_eq!(small.height, 200.0);
        assert_eq!(small.top, 25.0);

        let tiny = spine_rect(150.0, None);
        assert_eq!(tiny.height, 150.0);
        assert_eq!(tiny.top, 0.0);
    }

    #[test]
    fn test_figure_clamped_into_container() {
        let short = spine_rect(1000.0, Some((50.0, 120.0)));
        assert_eq!(short.height, 200.0);
        assert_eq!(short.top, 50.0);

        let tall = spine_rect(600.0, Some((-40.0, 900.0)));
        assert_eq!(tall, SpineRect { top: 0.0, height: 600.0 });

        let low = spine_rect(800.0, Some((700.0, 300.0)));
        assert_eq!(low, SpineRect { top: 500.0, height: 300.0 });
    }

    #[test]
    fn test_zero_size_image_falls_back() {
        let geo = compute_layout(
            Some(container(400.0, 1000.0)),
            Some(Rect::new(0.0, 100.0, 0.0, 0.0)),
        );
        assert_eq!(geo.image_height, None);
        assert_eq!(geo.spine.height, 700.0);
    }

    #[test]
    fn test_image_top_relative_to_container() {
        let geo = compute_layout(
            Some(Rect::new(0.0, 300.0, 400.0, 1000.0)),
            Some(Rect::new(0.0, 400.0, 300.0, 500.0)),
        );
        assert_eq!(geo.image_top, Some(100.0));
        assert_eq!(geo.spine.top, 100.0);
    }

    #[test]
    fn test_scale_bounds() {
        assert_eq!(layout_scale(100.0), 0.85);
        assert_eq!(layout_scale(560.0), 1.0);
        assert_eq!(layout_scale(2000.0), 1.25);
    }

    #[test]
    fn test_spine_width_bounds() {
        assert_eq!(spine_width(100.0), 2.0);
        assert!((spine_width(1000.0) - 6.0).abs() < 1e-9);
        assert_eq!(spine_width(5000.0), 8.0);
    }

    #[test]
    fn test_spine_style_spans_crown_to_root() {
        let geo = compute_layout(
            Some(container(400.0, 1000.0)),
            Some(Rect::new(0.0, 100.0, 300.0, 500.0)),
        );
        let range = spine_range();
        assert!((geo.spine_style.top - (100.0 + range.top * 500.0)).abs() < 1e-9);
        assert!((geo.spine_style.height - (range.bottom - range.top) * 500.0).abs() < 1e-9);
        assert_eq!(geo.spine_style.left_percent, 50.0);
        assert_eq!(geo.spine_style.transform, "translateX(-50%)");
    }

    #[test]
    fn test_missing_container_is_empty() {
        let geo = compute_layout(None, Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(!geo.is_ready());
        assert_eq!(geo.scale, 0.0);
        assert!(!compute_layout(Some(container(400.0, 0.0)), None).is_ready());
    }

    struct FakeHost {
        container: Option<Rect>,
        wrapper: Option<Rect>,
        image: Option<Rect>,
    }

    impl FigureHost for FakeHost {
        fn container(&self) -> Option<Rect> {
            self.container
        }

        fn figure_wrapper(&self) -> Option<Rect> {
            self.wrapper
        }

        fn figure_image(&self) -> Option<Rect> {
            self.image
        }
    }

    #[test]
    fn test_engine_prefers_wrapper_and_memoizes() {
        let mut host = FakeHost {
            container: Some(container(400.0, 1000.0)),
            wrapper: Some(Rect::new(0.0, 100.0, 300.0, 500.0)),
            image: Some(Rect::new(0.0, 120.0, 280.0, 460.0)),
        };
        let mut engine = LayoutEngine::new();
        assert_eq!(engine.refresh(&host, LayoutTrigger::Mount).spine.height, 500.0);
        engine.refresh(&host, LayoutTrigger::SheetResize);
        assert_eq!(engine.recomputes(), 1);

        host.wrapper = None;
        assert_eq!(engine.refresh(&host, LayoutTrigger::FigureResize).spine.height, 460.0);
        assert_eq!(engine.recomputes(), 2);
    }

    #[test]
    fn test_engine_fallback_then_refine() {
        let mut host = FakeHost {
            container: Some(container(400.0, 1000.0)),
            wrapper: None,
            image: Some(Rect::new(0.0, 0.0, 0.0, 0.0)),
        };
        let mut engine = LayoutEngine::new();
        assert_eq!(engine.refresh(&host, LayoutTrigger::Mount).spine.height, 700.0);
        host.image = Some(Rect::new(0.0, 100.0, 300.0, 500.0));
        assert_eq!(engine.refresh(&host, LayoutTrigger::ImageLoad).spine.height, 500.0);
    }

    #[test]
    fn test_disconnect_ignores_refresh() {
        let mut host = FakeHost {
            container: None,
            wrapper: None,
            image: None,
        };
        let mut engine = LayoutEngine::new();
        assert!(!engine.refresh(&host, LayoutTrigger::Mount).is_ready());
        engine.disconnect();
        host.container = Some(container(400.0, 1000.0));
        assert!(!engine.refresh(&host, LayoutTrigger::ContainerResize).is_ready());
        assert!(!engine.is_connected());
    }
}
