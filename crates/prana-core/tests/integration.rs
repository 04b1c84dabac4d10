//! Integration tests across module boundaries:
//! configuration -> cycle -> engine readout, and anchors -> layout.

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use proptest::prelude::*;

use prana_core::{
    BreathConfig, BreathCycle, BreathEngine, BreathUpdate, ChakraId, Direction, EngineStatus,
    ExperienceLevel, FrameQueue, LevelConfig, LevelUi, ManualClock, PhaseDurations, PhaseName,
    Rect, build_cycle, chakra_positions, compute_layout, spine_rect,
};

const CONFIG_JSON: &str = r#"{
    "chakras": {
        "heart": {
            "beginner": {
                "breath_ratio": "4:2:6:2",
                "cycle_length_seconds": 14,
                "phases": { "inhale": 4, "hold_top": 2, "exhale": 6, "hold_bottom": 2 },
                "presets": [{ "minutes": 3, "cycles": 12 }],
                "ui": {
                    "directions": { "inhale": "ltr", "exhale": "rtl" },
                    "count_cues": { "inhale": 4, "hold_top": 2, "exhale": 6, "hold_bottom": 2 }
                }
            }
        },
        "thirdEye": {
            "advanced": {
                "cycle_length_seconds": 20,
                "phases": { "inhale": 5, "hold_top": 5, "exhale": 5, "hold_bottom": 5 }
            }
        }
    }
}"#;

fn level(inhale: f64, hold_top: f64, exhale: f64, hold_bottom: f64) -> LevelConfig {
    let phases = PhaseDurations {
        inhale,
        hold_top,
        exhale,
        hold_bottom,
    };
    LevelConfig {
        breath_ratio: String::new(),
        cycle_length_seconds: phases.total().clamp(6.0, 30.0),
        phases,
        presets: Vec::new(),
        ui: LevelUi::default(),
    }
}

type Recorded = Rc<RefCell<Vec<BreathUpdate>>>;

fn engine_for(
    cycle: BreathCycle,
    total: f64,
    clock: &ManualClock,
) -> (BreathEngine<ManualClock, FrameQueue>, Recorded) {
    let updates: Recorded = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&updates);
    let engine = BreathEngine::new(cycle, total, clock.clone(), FrameQueue::new())
        .on_update(move |u| sink.borrow_mut().push(*u));
    (engine, updates)
}

fn frame(engine: &mut BreathEngine<ManualClock, FrameQueue>) {
    if engine.scheduler_mut().take_due().is_some() {
        engine.on_frame();
    }
}

/// Config document through to a live readout.
#[test]
fn config_to_readout() {
    let config = BreathConfig::from_json_str(CONFIG_JSON).unwrap();
    assert_eq!(config.len(), 2);
    let heart = config.lookup("heart", "beginner").unwrap();
    assert_eq!(heart.recommended_cycles(3), Some(12));
    assert_eq!(heart.ui.count_cues.get(PhaseName::Exhale), 6);

    let cycle = build_cycle(heart, false);
    assert_eq!(cycle.length(), 10.0);

    let clock = ManualClock::new(0.0);
    let (mut engine, updates) = engine_for(cycle, 60.0, &clock);
    engine.start().unwrap();
    clock.set(12.0);
    frame(&mut engine);

    let update = *updates.borrow().last().unwrap();
    assert_eq!(update.phase, PhaseName::Inhale);
    assert_relative_eq!(update.progress, 0.5);
    assert_eq!(update.direction, Direction::Ltr);
    assert_relative_eq!(update.total_remaining, 48.0);
}

#[test]
fn alias_keys_resolve() {
    let config = BreathConfig::from_json_str(CONFIG_JSON).unwrap();
    let third_eye = config
        .get(ChakraId::ThirdEye, ExperienceLevel::Advanced)
        .unwrap();
    let cycle = build_cycle(third_eye, true);
    assert_eq!(cycle.length(), 20.0);
    assert_eq!(cycle.locate(7.5).phase.name, PhaseName::HoldTop);
}

/// A one-second session: a single terminal update, one completion, no more frames.
#[test]
fn one_second_session_completes_once() {
    let clock = ManualClock::new(5.0);
    let completions = Rc::new(RefCell::new(0u32));
    let done = Rc::clone(&completions);
    let (engine, updates) = engine_for(build_cycle(&level(4.0, 2.0, 6.0, 2.0), true), 1.0, &clock);
    let mut engine = engine.on_complete(move || *done.borrow_mut() += 1);

    engine.start().unwrap();
    clock.advance(1.25);
    frame(&mut engine);
    for _ in 0..10 {
        clock.advance(0.5);
        frame(&mut engine);
    }

    assert_eq!(updates.borrow().len(), 1);
    assert_eq!(updates.borrow()[0].total_remaining, 0.0);
    assert_eq!(*completions.borrow(), 1);
    assert_eq!(engine.status(), EngineStatus::Completed);
    assert_eq!(engine.scheduler().requested(), 1);
}

#[test]
fn layout_scenario() {
    let geo = compute_layout(
        Some(Rect::new(0.0, 0.0, 390.0, 1000.0)),
        Some(Rect::new(45.0, 100.0, 300.0, 500.0)),
    );
    assert_eq!(geo.spine.top, 100.0);
    assert_eq!(geo.spine.height, 500.0);
    let heart = geo
        .positions
        .iter()
        .find(|p| p.id == ChakraId::Heart)
        .unwrap();
    assert_relative_eq!(heart.y_percent, 35.0);

    let ys: Vec<f64> = geo.positions.iter().map(|p| p.y_percent).collect();
    assert!(ys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn anchor_invariants() {
    let anchors = chakra_positions();
    assert!(anchors.iter().all(|a| a.x == 0.5));
    assert!(anchors.windows(2).all(|w| w[0].y < w[1].y));
}

proptest! {
    #[test]
    fn no_holds_cycle_is_inhale_plus_exhale(
        inhale in 0.0f64..15.0,
        hold_top in 0.0f64..10.0,
        exhale in 0.0f64..15.0,
        hold_bottom in 0.0f64..10.0,
    ) {
        let cycle = build_cycle(&level(inhale, hold_top, exhale, hold_bottom), false);
        prop_assert_eq!(cycle.phase(PhaseName::HoldTop).duration, 0.0);
        prop_assert_eq!(cycle.phase(PhaseName::HoldBottom).duration, 0.0);
        prop_assert!((cycle.length() - (inhale + exhale).max(1.0)).abs() < 1e-9);
    }

    #[test]
    fn holds_cycle_is_full_sum(
        inhale in 1.0f64..15.0,
        hold_top in 0.0f64..10.0,
        exhale in 1.0f64..15.0,
        hold_bottom in 0.0f64..10.0,
    ) {
        let cycle = build_cycle(&level(inhale, hold_top, exhale, hold_bottom), true);
        prop_assert!((cycle.length() - (inhale + hold_top + exhale + hold_bottom)).abs() < 1e-9);
    }

    #[test]
    fn progress_monotonic_within_phase(
        start in 0.0f64..20.0,
        steps in prop::collection::vec(0.0f64..0.05, 1..40),
    ) {
        let cycle = build_cycle(&level(4.0, 2.0, 6.0, 2.0), true);
        let len = cycle.length();
        let mut t = start;
        let mut prev = cycle.locate(t);
        for dt in steps {
            let prev_t = t;
            t += dt;
            let next = cycle.locate(t);
            prop_assert!((0.0..=1.0).contains(&next.progress));
            let same_cycle = (t / len).floor() == (prev_t / len).floor();
            if same_cycle && next.index == prev.index {
                prop_assert!(next.progress >= prev.progress);
            }
            prev = next;
        }
    }

    #[test]
    fn pause_time_is_excluded(
        before in 0.1f64..30.0,
        paused in 0.0f64..120.0,
        after in 0.0f64..30.0,
    ) {
        let cycle = build_cycle(&level(4.0, 2.0, 6.0, 2.0), true);

        let paused_clock = ManualClock::new(0.0);
        let (mut with_pause, paused_updates) = engine_for(cycle, 600.0, &paused_clock);
        with_pause.start().unwrap();
        paused_clock.advance(before);
        with_pause.pause();
        paused_clock.advance(paused);
        frame(&mut with_pause);
        with_pause.resume();
        paused_clock.advance(after);
        frame(&mut with_pause);

        let plain_clock = ManualClock::new(0.0);
        let (mut plain, plain_updates) = engine_for(cycle, 600.0, &plain_clock);
        plain.start().unwrap();
        plain_clock.advance(before + after);
        frame(&mut plain);

        let a = *paused_updates.borrow().last().unwrap();
        let b = *plain_updates.borrow().last().unwrap();
        prop_assert_eq!(a.phase, b.phase);
        prop_assert!((a.progress - b.progress).abs() < 1e-9);
        prop_assert!((a.total_elapsed - b.total_elapsed).abs() < 1e-9);
    }

    #[test]
    fn completion_fires_once(total in 0.5f64..20.0, extra_frames in 1usize..30) {
        let clock = ManualClock::new(0.0);
        let count = Rc::new(RefCell::new(0u32));
        let c = Rc::clone(&count);
        let (engine, _) = engine_for(build_cycle(&level(4.0, 0.0, 6.0, 0.0), true), total, &clock);
        let mut engine = engine.on_complete(move || *c.borrow_mut() += 1);
        engine.start().unwrap();
        clock.advance(total);
        for _ in 0..extra_frames {
            frame(&mut engine);
            engine.on_frame();
            clock.advance(1.0);
        }
        prop_assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn fallback_spine_is_centred(height in 1.0f64..3000.0) {
        let spine = spine_rect(height, None);
        let expected = (height * 0.70).max(200.0).min(height);
        prop_assert!((spine.height - expected).abs() < 1e-9);
        prop_assert!((spine.top - (height - spine.height) / 2.0).abs() < 1e-9);
    }
}
