use gpui::{
    App, Bounds, Context, Corners, Hsla, IntoElement, ParentElement, PathBuilder, Pixels, Point,
    Render, Size, Styled, Window, canvas, div, fill, point, px, size,
};
use gpui_component::ActiveTheme;

use crate::{
    config::HeartProgressConfig,
    geometry::{EndCap, HeartFrame, Label, Lobe, ProgressState, Segment, Surface},
    metrics::HeartMetrics,
};

/// A progress bar with a heart riding on it, showing a heart rate.
///
/// The heart moves from left to right as the value grows towards the max
/// value, the value itself is drawn inside the heart.
pub struct HeartProgress {
    state: ProgressState,
    color: Option<Hsla>,
    text_color: Option<Hsla>,
    painted_frame: Option<HeartFrame>,
}

impl Default for HeartProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl HeartProgress {
    pub fn new() -> Self {
        Self {
            state: ProgressState::new(),
            color: None,
            text_color: None,
            painted_frame: None,
        }
    }

    pub fn from_config(config: &HeartProgressConfig) -> Self {
        Self {
            state: ProgressState::new()
                .with_max_value(config.max_value)
                .with_metrics(config.metrics)
                .with_clamp_notch(config.clamp_notch),
            ..Self::new()
        }
    }

    /// Set the color of the heart and the bar, default is the theme red.
    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the color of the value label, default is white.
    pub fn text_color(mut self, color: impl Into<Hsla>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn max_value(mut self, max_value: f32) -> Self {
        self.state = self.state.with_max_value(max_value);
        self
    }

    pub fn metrics(mut self, metrics: HeartMetrics) -> Self {
        self.state = self.state.with_metrics(metrics);
        self
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// The frame laid out for the last paint, if the view has been painted.
    pub fn painted_frame(&self) -> Option<&HeartFrame> {
        self.painted_frame.as_ref()
    }

    pub fn value(&self) -> u32 {
        self.state.value()
    }

    /// Set the heart rate, negative values are shown as 0.
    ///
    /// Always schedules a redraw, even if the value is unchanged.
    pub fn set_value(&mut self, value: i32, cx: &mut Context<Self>) {
        self.state.set_value(value);
        cx.notify();
    }

    /// Resolve the size of the bar for the available space.
    pub fn measure(&mut self, available: Size<Pixels>) -> Size<Pixels> {
        let resolved = self
            .state
            .measure(available.width.into(), available.height.into());
        size(px(resolved.width), px(resolved.height))
    }

    /// Apply the laid out size and return the frame to paint for it.
    ///
    /// Runs during prepaint, where notifying is ignored, so a size change
    /// asks the window for another frame instead.
    fn prepaint_frame(&mut self, new_size: Size<Pixels>, window: &Window) -> HeartFrame {
        let (width, height): (f32, f32) = (new_size.width.into(), new_size.height.into());
        if self.state.on_resize(width, height) {
            tracing::trace!("heart progress resized to {}x{}", width, height);
            window.request_animation_frame();
        }

        let frame = self.state.frame();
        self.painted_frame = Some(frame.clone());
        frame
    }
}

impl Render for HeartProgress {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let color = self.color.unwrap_or_else(|| cx.theme().red);
        let text_color = self.text_color.unwrap_or(gpui::white());
        let max_height = self.state.metrics().max_height;
        let view = cx.entity().downgrade();

        div().relative().w_full().h(px(max_height)).child(
            canvas(
                move |bounds: Bounds<Pixels>, window: &mut Window, cx: &mut App| {
                    view.update(cx, |this, _| this.prepaint_frame(bounds.size, window))
                        .ok()
                        .map(|frame| (bounds, frame))
                },
                move |_, prepaint, window: &mut Window, cx: &mut App| {
                    let Some((bounds, frame)) = prepaint else {
                        return;
                    };

                    frame.paint(&mut WindowSurface {
                        window,
                        cx,
                        origin: bounds.origin,
                        color,
                        text_color,
                    });
                },
            )
            .absolute()
            .size_full(),
        )
    }
}

/// Paints a frame into a window, relative to `origin`.
struct WindowSurface<'a> {
    window: &'a mut Window,
    cx: &'a mut App,
    origin: Point<Pixels>,
    color: Hsla,
    text_color: Hsla,
}

impl WindowSurface<'_> {
    fn point(&self, p: Point<f32>) -> Point<Pixels> {
        point(self.origin.x + px(p.x), self.origin.y + px(p.y))
    }
}

impl Surface for WindowSurface<'_> {
    fn fill_circle(&mut self, cap: &EndCap) {
        let top_left = self.point(point(cap.center.x - cap.radius, cap.center.y - cap.radius));
        let diameter = px(cap.radius * 2.);
        let bounds = Bounds::new(top_left, size(diameter, diameter));
        self.window
            .paint_quad(fill(bounds, self.color).corner_radii(Corners::all(px(cap.radius))));
    }

    fn stroke_line(&mut self, line: &Segment) {
        let mut builder = PathBuilder::stroke(px(line.width));
        builder.move_to(self.point(line.from));
        builder.line_to(self.point(line.to));
        match builder.build() {
            Ok(path) => self.window.paint_path(path, self.color),
            Err(err) => tracing::warn!("failed to build heart progress line: {:?}", err),
        }
    }

    fn stroke_lobe(&mut self, lobe: &Lobe) {
        let mut builder = PathBuilder::stroke(px(lobe.width));
        builder.move_to(self.point(lobe.start));
        for curve in &lobe.curves {
            builder.cubic_bezier_to(
                self.point(curve.to),
                self.point(curve.control_a),
                self.point(curve.control_b),
            );
        }
        match builder.build() {
            Ok(path) => self.window.paint_path(path, self.color),
            Err(err) => tracing::warn!("failed to build heart outline: {:?}", err),
        }
    }

    fn draw_label(&mut self, label: &Label) {
        if label.font_size <= 0. {
            return;
        }

        let mut run = self.window.text_style().to_run(label.text.len());
        run.color = self.text_color;
        let line = self.window.text_system().shape_line(
            label.text.clone().into(),
            px(label.font_size),
            &[run],
            None,
        );

        // With a line height of ascent + descent the baseline sits at ascent.
        let line_height = line.ascent + line.descent;
        let origin = point(
            self.origin.x + px(label.center_x) - line.width / 2.,
            self.origin.y + px(label.baseline) - line.ascent,
        );
        if let Err(err) = line.paint(origin, line_height, self.window, self.cx) {
            tracing::warn!("failed to paint heart progress label: {:?}", err);
        }
    }
}
