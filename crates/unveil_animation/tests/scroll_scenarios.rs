//! Integration tests for visibility + state machine + animation
//!
//! These tests drive whole components the way a page would: a viewport
//! supplies intersection ratios (or rectangles) and a frame loop ticks the
//! scheduler.

use unveil_animation::{
    generate_particles, interpolate, schedule, AnimationScheduler, CountUpConfig, Easing,
    FadeInConfig, ParticleConfig, Preset, Rect, RevealState, Spring, SpringConfig,
    StaggeredGridConfig, UnveilConfig,
};

const FRAME: f32 = 1.0 / 60.0;

/// Once-only reveals pin visibility after the first trigger
#[test]
fn test_once_pins_visibility() {
    let mut reveal = Preset::fade_in(&FadeInConfig::default()).unwrap();

    reveal.set_intersection(0.5);
    assert!(reveal.is_visible());

    for ratio in [0.0, 0.05, 0.0, 1.0, 0.0] {
        assert_eq!(reveal.set_intersection(ratio), None);
        assert!(reveal.is_visible());
    }
}

/// Repeatable reveals toggle both ways
#[test]
fn test_repeatable_reveal_toggles() {
    let config = FadeInConfig {
        once: false,
        ..Default::default()
    };
    let mut reveal = Preset::fade_in(&config).unwrap();

    assert_eq!(reveal.set_intersection(1.0), Some(RevealState::Entering));
    assert_eq!(reveal.set_intersection(0.0), Some(RevealState::Exiting));
    assert_eq!(reveal.set_intersection(1.0), Some(RevealState::Entering));

    for _ in 0..60 {
        reveal.tick(FRAME);
    }
    assert_eq!(reveal.state(), RevealState::Visible);
    assert!(!reveal.is_finished());
}

/// Rectangles scrolled through a viewport drive the reveal
#[test]
fn test_scrolling_rectangles() {
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
    let mut reveal = Preset::fade_in(&FadeInConfig::default()).unwrap();

    // 200px tall card starting below the fold, scrolled up 20px per frame
    let mut top = 700.0;
    let mut entered_at = None;
    while top > 0.0 {
        let card = Rect::new(100.0, top, 400.0, 200.0);
        if reveal.observe_rect(&card, &viewport).is_some() && entered_at.is_none() {
            entered_at = Some(top);
        }
        reveal.tick(FRAME);
        top -= 20.0;
    }

    // threshold 0.1 of 200px is first met once 20px are inside the viewport
    assert_eq!(entered_at, Some(580.0));

    for _ in 0..60 {
        reveal.tick(FRAME);
    }
    assert_eq!(reveal.state(), RevealState::Visible);
}

#[test]
fn test_stagger_schedule() {
    let delays = schedule(5, 0.1, 0.1);
    for (got, want) in delays.iter().zip([0.1, 0.2, 0.3, 0.4, 0.5]) {
        assert!((got - want).abs() < 1e-6);
    }

    let delays = schedule(12, 0.07, 0.2);
    for (i, d) in delays.iter().enumerate() {
        assert_eq!(*d, 0.2 + i as f32 * 0.07);
    }
    assert!(delays.windows(2).all(|w| w[0] <= w[1]));
}

/// Grid children never start before their predecessors
#[test]
fn test_grid_children_start_in_order() {
    let mut grid = Preset::staggered_grid(6, &StaggeredGridConfig::default()).unwrap();
    grid.set_intersection(1.0);

    for _ in 0..40 {
        grid.tick(FRAME);
        let waiting: Vec<bool> = grid.children().iter().map(|c| c.is_waiting()).collect();
        // once a child is waiting, every later child is waiting too
        if let Some(first) = waiting.iter().position(|w| *w) {
            assert!(waiting[first..].iter().all(|w| *w));
        }
    }
}

#[test]
fn test_critical_spring_never_crosses_target() {
    for (from, to) in [(0.0, 1000.0), (1000.0, 0.0), (-3.0, 3.0), (50.0, 49.0)] {
        let config = SpringConfig::from_duration(2.0, 0.0).unwrap();
        let mut spring = Spring::new(config, from);
        spring.set_target(to);

        for _ in 0..600 {
            spring.step(FRAME);
            if to > from {
                assert!(spring.value() <= to);
            } else {
                assert!(spring.value() >= to);
            }
        }
        assert_eq!(spring.value(), to);
    }
}

#[test]
fn test_interpolate_endpoints() {
    for easing in [Easing::Linear, Easing::EaseInOut, Easing::EASE] {
        assert_eq!(interpolate(-5.0, 12.0, 0.6, 0.0, easing), -5.0);
        assert_eq!(interpolate(-5.0, 12.0, 0.6, 0.6, easing), 12.0);
    }
}

/// 0 to 1000 over 2 s with no decimals
#[test]
fn test_count_up_scenario() {
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.add_counter(Preset::count_up(&CountUpConfig::new(1000.0)).unwrap());

    assert_eq!(scheduler.counter_display(id).as_deref(), Some("0"));
    assert!(scheduler.set_counter_intersection(id, 0.5));

    let mut prev = 0.0;
    for _ in 0..120 {
        scheduler.tick(FRAME);
        let value = scheduler.get_counter(id).map(|c| c.value()).unwrap_or_default();
        assert!(value >= prev, "{value} < {prev}");
        prev = value;
    }
    assert_eq!(scheduler.counter_display(id).as_deref(), Some("1000"));
}

#[test]
fn test_ambient_particle_scenario() {
    let particles = generate_particles(&ParticleConfig {
        count: 30,
        speed: 20.0,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(particles.len(), 30);
    for p in &particles {
        assert!((20.0..=30.0).contains(&p.period));
        assert!((0.0..=100.0).contains(&p.x));
        assert!((0.0..=100.0).contains(&p.y));

        // periodic once past the phase delay
        let t = p.phase + 0.3;
        let a = p.sample(t).opacity.unwrap();
        let b = p.sample(t + p.period * 3.0).opacity.unwrap();
        assert!((a - b).abs() < 1e-3);
    }
}

/// Redirecting mid-flight keeps the value and carries the velocity
#[test]
fn test_retarget_mid_flight() {
    let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
    spring.set_target(100.0);
    for _ in 0..10 {
        spring.step(FRAME);
    }

    let (value, velocity) = (spring.value(), spring.velocity());
    assert!(velocity > 0.0);

    spring.set_target(0.0);
    assert_eq!(spring.value(), value);
    assert_eq!(spring.velocity(), velocity);

    // momentum keeps it moving up briefly before turning around
    spring.step(0.001);
    assert!(spring.value() > value);
}

/// Removed instances ignore late ticks
#[test]
fn test_teardown_mid_animation() {
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.add_reveal(Preset::fade_in(&FadeInConfig::default()).unwrap());
    scheduler.set_reveal_intersection(id, 1.0);
    scheduler.tick(FRAME);

    let reveal = scheduler.remove_reveal(id).unwrap();
    assert_eq!(reveal.state(), RevealState::Entering);

    scheduler.tick(FRAME);
    assert!(!scheduler.tick_reveal(id, FRAME));
    assert!(!scheduler.has_active_animations());
}

#[test]
fn test_page_config_builds_components() {
    let config = UnveilConfig::from_toml_str(
        r#"
        [staggered_grid]
        stagger_delay = 0.05

        [particles]
        count = 8
        speed = 10.0
        "#,
    )
    .unwrap();

    let grid = Preset::staggered_grid(3, &config.staggered_grid).unwrap();
    assert!((grid.children()[2].delay() - 0.2).abs() < 1e-6);

    let particles = Preset::floating_particles(&config.particles).unwrap();
    assert_eq!(particles.len(), 8);
}
