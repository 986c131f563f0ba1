//! Headless walkthrough: scroll a page of components past a viewport and
//! print what a renderer would draw.
//!
//! Run with `RUST_LOG=unveil_animation=debug,unveil_core=trace` to see state
//! transitions.

use tracing_subscriber::EnvFilter;
use unveil_animation::{AnimationScheduler, Preset, Rect, Result, UnveilConfig};

const FRAME: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = UnveilConfig::from_toml_str(
        r#"
        [fade_in]
        direction = "up"
        distance = 40.0

        [count_up]
        to = 1000.0
        suffix = "+"

        [particles]
        count = 5
        "#,
    )?;

    let mut scheduler = AnimationScheduler::new();
    let heading = scheduler.add_reveal(Preset::blur_text("Scroll to reveal", &config.blur_text)?);
    let card = scheduler.add_reveal(Preset::fade_in(&config.fade_in)?);
    let counter = scheduler.add_counter(Preset::count_up(&config.count_up)?);
    let particles = scheduler.add_ambient(Preset::floating_particles(&config.particles)?);

    let viewport = Rect::new(0.0, 0.0, 1280.0, 720.0);
    // page positions of each region, scrolled upward 8px per frame
    let layout = [(heading, 200.0), (card, 900.0)];
    let counter_top = 1400.0;

    for frame in 0..300 {
        let scroll = frame as f32 * 8.0;

        for (id, top) in layout {
            let region = Rect::new(240.0, top - scroll, 800.0, 160.0);
            if let Some(reveal) = scheduler.get_reveal_mut(id) {
                reveal.observe_rect(&region, &viewport);
            }
        }
        if let Some(count_up) = scheduler.get_counter_mut(counter) {
            count_up.observe_rect(&Rect::new(240.0, counter_top - scroll, 200.0, 80.0), &viewport);
        }

        scheduler.tick(FRAME);

        if frame % 30 == 0 {
            let card_frame = scheduler.get_reveal(card).and_then(|r| r.frame(0));
            let words: Vec<String> = scheduler
                .get_reveal(heading)
                .map(|r| {
                    r.frames()
                        .map(|f| {
                            let filter = f.filter_css().unwrap_or_default();
                            format!("{:.2} {filter}", f.resolved_opacity())
                        })
                        .collect()
                })
                .unwrap_or_default();

            println!(
                "t={:>5.2}s heading={:?} card_opacity={:.2} counter={}",
                frame as f32 * FRAME,
                words,
                card_frame.map(|f| f.resolved_opacity()).unwrap_or(0.0),
                scheduler.counter_display(counter).unwrap_or_default(),
            );
        }
    }

    if let Some(ambient) = scheduler.get_ambient(particles) {
        for (i, props) in ambient.frames().iter().enumerate() {
            println!("particle {i}: y={:?} opacity={:?}", props.y, props.opacity);
        }
    }

    scheduler.remove_ambient(particles);
    Ok(())
}
