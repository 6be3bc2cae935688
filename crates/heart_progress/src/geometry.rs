//! Layout of the heart progress bar.
//!
//! Everything here is plain arithmetic on `f32` points relative to the widget
//! origin, so the same [`HeartFrame`] can be painted into a GPUI window or
//! inspected in tests.

use gpui::{Point, Size, point, size};

use crate::metrics::HeartMetrics;

/// The default upper bound of the value, in beats per minute.
pub const DEFAULT_MAX_VALUE: f32 = 300.;

/// Value and layout state of a heart progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    value: u32,
    max_value: f32,
    width: f32,
    height: f32,
    min_x: f32,
    max_x: f32,
    clamp_notch: bool,
    metrics: HeartMetrics,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressState {
    pub fn new() -> Self {
        Self {
            value: 0,
            max_value: DEFAULT_MAX_VALUE,
            width: 0.,
            height: 0.,
            min_x: 0.,
            max_x: 0.,
            clamp_notch: false,
            metrics: HeartMetrics::default(),
        }
    }

    /// Set the value that maps to the right end of the bar.
    ///
    /// A max value that is not a positive number falls back to
    /// [`DEFAULT_MAX_VALUE`].
    pub fn with_max_value(mut self, max_value: f32) -> Self {
        if max_value.is_finite() && max_value > 0. {
            self.max_value = max_value;
        } else {
            tracing::warn!(
                "ignored heart progress max value {}, using {}",
                max_value,
                DEFAULT_MAX_VALUE
            );
            self.max_value = DEFAULT_MAX_VALUE;
        }
        self
    }

    pub fn with_metrics(mut self, metrics: HeartMetrics) -> Self {
        self.metrics = metrics;
        self.reset_range();
        self
    }

    /// Clamp the notch to the right end of the movable range as well.
    ///
    /// Default is false, values above the max value move the notch past the
    /// right end cap.
    pub fn with_clamp_notch(mut self, clamp_notch: bool) -> Self {
        self.clamp_notch = clamp_notch;
        self
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub fn metrics(&self) -> &HeartMetrics {
        &self.metrics
    }

    pub fn size(&self) -> Size<f32> {
        size(self.width, self.height)
    }

    /// The horizontal range the notch is meant to move in.
    pub fn movable_range(&self) -> (f32, f32) {
        (self.min_x, self.max_x)
    }

    /// Set the current value, negative values are floored to 0.
    pub fn set_value(&mut self, value: i32) {
        self.value = value.max(0) as u32;
    }

    /// Resolve the size for the available space.
    ///
    /// The width is taken as is, the height is capped by `max_height`.
    pub fn measure(&mut self, available_width: f32, available_height: f32) -> Size<f32> {
        self.width = available_width.max(0.);
        self.height = available_height.min(self.metrics.max_height).max(0.);
        self.reset_range();
        self.size()
    }

    /// Apply a new allocated size, returns true if the resolved size changed.
    pub fn on_resize(&mut self, new_width: f32, new_height: f32) -> bool {
        let old_size = self.size();
        self.measure(new_width, new_height) != old_size
    }

    fn reset_range(&mut self) {
        self.min_x = self.metrics.horizontal_padding;
        self.max_x = self.width - self.metrics.horizontal_padding;
    }

    /// X position of the notch at the top center of the heart.
    pub fn notch_x(&self) -> f32 {
        let percent = self.value as f32 / self.max_value;
        let x = (percent * (self.width - self.metrics.horizontal_padding)).max(self.min_x);
        if self.clamp_notch {
            x.min(self.max_x.max(self.min_x))
        } else {
            x
        }
    }

    pub fn notch_y(&self) -> f32 {
        self.height * self.metrics.notch_offset
    }

    pub fn notch(&self) -> Point<f32> {
        point(self.notch_x(), self.notch_y())
    }

    /// Lay out everything that is painted for the current state.
    pub fn frame(&self) -> HeartFrame {
        let m = &self.metrics;
        let radius = m.point_radius();
        let bottom = self.height - radius;
        let notch = self.notch();

        let caps = [
            EndCap {
                center: point(radius, bottom),
                radius,
            },
            EndCap {
                center: point(self.width - radius, bottom),
                radius,
            },
        ];

        let lines = [
            Segment {
                from: point(radius, bottom),
                to: point(notch.x - m.bottom_gap, bottom),
                width: m.line_width,
            },
            Segment {
                from: point(notch.x + m.bottom_gap, bottom),
                to: point(self.width - radius, bottom),
                width: m.line_width,
            },
        ];

        let lobes = [
            self.lobe(notch, LobeSide::Left),
            self.lobe(notch, LobeSide::Right),
        ];

        HeartFrame {
            caps,
            lines,
            lobes,
            label: Label::layout(self.value, notch.x, self.height, m),
        }
    }

    fn lobe(&self, notch: Point<f32>, side: LobeSide) -> Lobe {
        let m = &self.metrics;
        let sign = side.sign();
        let outer_x = notch.x + sign * m.horizontal_padding;
        let bottom = point(notch.x + sign * m.bottom_gap, self.height - m.point_radius());

        Lobe {
            side,
            start: notch,
            curves: [
                CubicTo {
                    control_a: point(notch.x, 0.),
                    control_b: point(outer_x, 0.),
                    to: point(outer_x, notch.y),
                },
                CubicTo {
                    control_a: point(outer_x, self.height / 2.),
                    control_b: bottom,
                    to: bottom,
                },
            ],
            width: m.line_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobeSide {
    Left,
    Right,
}

impl LobeSide {
    fn sign(self) -> f32 {
        match self {
            LobeSide::Left => -1.,
            LobeSide::Right => 1.,
        }
    }
}

/// A filled circle closing one end of the bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndCap {
    pub center: Point<f32>,
    pub radius: f32,
}

/// A straight stroked line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point<f32>,
    pub to: Point<f32>,
    pub width: f32,
}

/// One cubic Bézier segment, continuing from the previous point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicTo {
    pub control_a: Point<f32>,
    pub control_b: Point<f32>,
    pub to: Point<f32>,
}

/// One half of the heart outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lobe {
    pub side: LobeSide,
    pub start: Point<f32>,
    pub curves: [CubicTo; 2],
    pub width: f32,
}

/// The value label drawn over the heart.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Horizontal center of the text.
    pub center_x: f32,
    pub baseline: f32,
    pub font_size: f32,
}

impl Label {
    fn layout(value: u32, center_x: f32, height: f32, metrics: &HeartMetrics) -> Self {
        let text = value.to_string();
        let digits = text.len().max(2);
        let font_size = metrics.label_width() / digits as f32;
        let half = height / 2.;
        // Three digit values use a smaller font, so they sit a little higher.
        let baseline = if digits > 2 {
            half + half * 0.1
        } else {
            half + half * 0.25
        };

        Self {
            text,
            center_x,
            baseline,
            font_size,
        }
    }
}

/// Something a [`HeartFrame`] can be painted on.
pub trait Surface {
    fn fill_circle(&mut self, cap: &EndCap);
    fn stroke_line(&mut self, line: &Segment);
    fn stroke_lobe(&mut self, lobe: &Lobe);
    fn draw_label(&mut self, label: &Label);
}

/// Everything painted for one state of the progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartFrame {
    pub caps: [EndCap; 2],
    pub lines: [Segment; 2],
    pub lobes: [Lobe; 2],
    pub label: Label,
}

impl HeartFrame {
    /// Paint end caps, lines, the heart outline and the label, in that order.
    pub fn paint(&self, surface: &mut impl Surface) {
        for cap in &self.caps {
            surface.fill_circle(cap);
        }
        for line in &self.lines {
            surface.stroke_line(line);
        }
        for lobe in &self.lobes {
            surface.stroke_lobe(lobe);
        }
        surface.draw_label(&self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state_300() -> ProgressState {
        let mut state = ProgressState::new();
        state.measure(300., 60.);
        state
    }

    #[test]
    fn test_measure() {
        let mut state = ProgressState::new();
        assert_eq!(state.measure(400., 200.), size(400., 60.));
        assert_eq!(state.movable_range(), (30., 370.));

        assert_eq!(state.measure(400., 40.), size(400., 40.));
        assert_eq!(state.measure(-10., -10.), size(0., 0.));
    }

    #[test]
    fn test_on_resize() {
        let mut state = ProgressState::new();
        assert!(state.on_resize(300., 100.));
        assert_eq!(state.size(), size(300., 60.));
        // Height above the ceiling resolves to the same size.
        assert!(!state.on_resize(300., 80.));
        assert!(state.on_resize(320., 80.));
        assert_eq!(state.movable_range(), (30., 290.));
    }

    #[test]
    fn test_set_value() {
        let mut state = state_300();
        state.set_value(72);
        assert_eq!(state.value(), 72);
        state.set_value(-5);
        assert_eq!(state.value(), 0);
        state.set_value(i32::MAX);
        assert_eq!(state.value(), i32::MAX as u32);
    }

    #[test]
    fn test_notch_position() {
        let mut state = state_300();

        state.set_value(0);
        assert_eq!(state.notch_x(), 30.);

        state.set_value(150);
        assert_eq!(state.notch_x(), 135.);

        state.set_value(-5);
        assert_eq!(state.value(), 0);
        assert_eq!(state.notch_x(), 30.);

        state.set_value(1000);
        assert!(state.notch_x() > 270.);
        assert_eq!(state.notch_y(), 15.);
    }

    #[test]
    fn test_clamp_notch() {
        let mut state = ProgressState::new().with_clamp_notch(true);
        state.measure(300., 60.);
        state.set_value(1000);
        assert_eq!(state.notch_x(), 270.);
        state.set_value(0);
        assert_eq!(state.notch_x(), 30.);
    }

    #[test]
    fn test_invalid_max_value() {
        for max_value in [0., -1., f32::NAN, f32::INFINITY] {
            let mut state = ProgressState::new().with_max_value(max_value);
            state.measure(300., 60.);
            state.set_value(150);
            assert_eq!(state.max_value(), DEFAULT_MAX_VALUE);
            assert!(state.notch_x().is_finite());
            assert_eq!(state.notch_x(), 135.);
        }

        let state = ProgressState::new().with_max_value(200.);
        assert_eq!(state.max_value(), 200.);
    }

    #[test]
    fn test_frame() {
        let mut state = state_300();
        state.set_value(150);
        let frame = state.frame();

        assert_eq!(frame.caps[0].center, point(8.5, 51.5));
        assert_eq!(frame.caps[1].center, point(291.5, 51.5));
        assert_eq!(frame.caps[0].radius, 8.5);

        assert_eq!(frame.lines[0].from, point(8.5, 51.5));
        assert_eq!(frame.lines[0].to, point(129., 51.5));
        assert_eq!(frame.lines[1].from, point(141., 51.5));
        assert_eq!(frame.lines[1].to, point(291.5, 51.5));
        assert_eq!(frame.lines[0].width, 5.);

        let left = &frame.lobes[0];
        assert_eq!(left.side, LobeSide::Left);
        assert_eq!(left.start, point(135., 15.));
        assert_eq!(left.curves[0].control_a, point(135., 0.));
        assert_eq!(left.curves[0].control_b, point(105., 0.));
        assert_eq!(left.curves[0].to, point(105., 15.));
        assert_eq!(left.curves[1].control_a, point(105., 30.));
        assert_eq!(left.curves[1].to, point(129., 51.5));

        let right = &frame.lobes[1];
        assert_eq!(right.side, LobeSide::Right);
        assert_eq!(right.curves[0].to, point(165., 15.));
        assert_eq!(right.curves[1].to, point(141., 51.5));
    }

    #[test]
    fn test_label_layout() {
        let mut state = state_300();

        state.set_value(7);
        let label = state.frame().label;
        assert_eq!(label.text, "7");
        assert_eq!(label.font_size, 25.);
        assert_eq!(label.baseline, 37.5);
        assert_eq!(label.center_x, 30.);

        state.set_value(72);
        let label = state.frame().label;
        assert_eq!(label.font_size, 25.);
        assert_eq!(label.baseline, 37.5);

        state.set_value(150);
        let label = state.frame().label;
        assert_eq!(label.text, "150");
        assert!((label.font_size - 50. / 3.).abs() < f32::EPSILON);
        assert_eq!(label.baseline, 33.);
        assert_eq!(label.center_x, 135.);
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<&'static str>,
    }

    impl Surface for RecordingSurface {
        fn fill_circle(&mut self, _: &EndCap) {
            self.ops.push("circle");
        }

        fn stroke_line(&mut self, _: &Segment) {
            self.ops.push("line");
        }

        fn stroke_lobe(&mut self, _: &Lobe) {
            self.ops.push("lobe");
        }

        fn draw_label(&mut self, _: &Label) {
            self.ops.push("label");
        }
    }

    #[test]
    fn test_paint_order() {
        let mut state = state_300();
        state.set_value(90);

        let mut surface = RecordingSurface::default();
        state.frame().paint(&mut surface);
        assert_eq!(
            surface.ops,
            ["circle", "circle", "line", "line", "lobe", "lobe", "label"]
        );

        // Same state, same frame.
        assert_eq!(state.frame(), state.frame());
    }

    proptest! {
        #[test]
        fn prop_negative_values_floor_to_zero(value in i32::MIN..0) {
            let mut state = state_300();
            state.set_value(value);
            prop_assert_eq!(state.value(), 0);
        }

        #[test]
        fn prop_non_negative_values_are_kept(value in 0..=i32::MAX) {
            let mut state = state_300();
            state.set_value(value);
            prop_assert_eq!(state.value(), value as u32);
        }

        #[test]
        fn prop_notch_is_monotonic(a in 0..100_000i32, b in 0..100_000i32, width in 0f32..2000.) {
            let mut state = ProgressState::new();
            state.measure(width, 60.);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            state.set_value(lo);
            let x_lo = state.notch_x();
            state.set_value(hi);
            prop_assert!(state.notch_x() >= x_lo);
        }

        #[test]
        fn prop_notch_respects_padding(value in any::<i32>(), width in 0f32..2000.) {
            let mut state = ProgressState::new();
            state.measure(width, 60.);
            state.set_value(value);
            prop_assert!(state.notch_x() >= 30.);
        }

        #[test]
        fn prop_height_is_capped(width in 0f32..5000., height in 0f32..5000.) {
            let mut state = ProgressState::new();
            let size = state.measure(width, height);
            prop_assert!(size.height <= 60.);
            prop_assert_eq!(size.width, width);
        }
    }
}
