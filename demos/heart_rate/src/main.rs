use anyhow::Context as _;
use gpui::{
    AppContext as _, Application, Context, Entity, IntoElement, ParentElement, Render, Styled,
    Window, WindowBounds, WindowOptions, div, px, size,
};
use gpui_component::{ActiveTheme, Root, TitleBar, v_flex};
use heart_progress::{HeartProgress, HeartProgressConfig, HeartRateDriver, RandomHeartRate};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Shows a heart progress bar fed with random heart rates.
///
/// The updates stop when the screen is closed, as the driver is dropped with it.
struct HeartRateScreen {
    progress: Entity<HeartProgress>,
    driver: HeartRateDriver,
}

impl HeartRateScreen {
    fn new(config: &HeartProgressConfig, _: &mut Window, cx: &mut Context<Self>) -> Self {
        let progress = cx.new(|_| HeartProgress::from_config(config));

        let mut driver = HeartRateDriver::new(config.driver.interval());
        driver.start(
            progress.downgrade(),
            RandomHeartRate::from_config(&config.driver),
            cx,
        );

        // Re-render the bpm text along with the bar.
        cx.observe(&progress, |_, _, cx| cx.notify()).detach();

        Self { progress, driver }
    }
}

impl Render for HeartRateScreen {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let value = self.progress.read(cx).value();

        v_flex()
            .size_full()
            .bg(cx.theme().background)
            .child(TitleBar::new().child("Heart Rate"))
            .child(
                v_flex()
                    .p_4()
                    .gap_4()
                    .flex_1()
                    .w_full()
                    .child(
                        div()
                            .text_sm()
                            .text_color(cx.theme().foreground)
                            .child(format!("Current: {} bpm", value)),
                    )
                    .child(self.progress.clone())
                    .child(
                        div()
                            .text_xs()
                            .text_color(cx.theme().muted_foreground)
                            .child(format!(
                                "Update Interval: {} ms",
                                self.driver.interval().as_millis()
                            )),
                    ),
            )
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("heart_progress=debug".parse()?),
        )
        .init();

    // Parse `cargo run -- <config.json>`
    let config = match std::env::args().nth(1) {
        Some(path) => HeartProgressConfig::load(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => HeartProgressConfig::default(),
    };
    tracing::info!(
        "heart rate demo: max value {}, values {}..={} every {} ms",
        config.max_value,
        config.driver.min,
        config.driver.max,
        config.driver.interval_ms
    );

    let app = Application::new();

    app.run(move |cx| {
        // This must be called before using any GPUI Component features.
        gpui_component::init(cx);

        let window_options = WindowOptions {
            titlebar: Some(TitleBar::title_bar_options()),
            window_bounds: Some(WindowBounds::centered(size(px(480.), px(160.)), cx)),
            ..Default::default()
        };

        cx.spawn(async move |cx| {
            cx.open_window(window_options, |window, cx| {
                window.set_window_title("Heart Rate");

                let view = cx.new(|cx| HeartRateScreen::new(&config, window, cx));
                cx.new(|cx| Root::new(view, window, cx))
            })?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
