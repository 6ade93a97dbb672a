// Scenario tests for the gallery state machine, driven by a manual clock.

use std::time::Duration;

use glam::Vec2;
use wheel_core::constants::{MAX_VELOCITY, MAX_VELOCITY_CHANGE, MOUSE_WHEEL_SNAP_DELAY_MS};
use wheel_core::{
    AnimationMode, Effect, Gallery, ItemId, ManualClock, Project, TimerKind, WheelConfig,
};

const FRAME: Duration = Duration::from_millis(16);

fn projects() -> Vec<Project> {
    (0..8)
        .map(|i| {
            Project::new(
                format!("/images/project-{i}.jpg"),
                format!("/projects/{i}"),
                format!("Project {i}"),
            )
        })
        .collect()
}

fn make_gallery() -> (Gallery, ManualClock) {
    let clock = ManualClock::new(0.0);
    let gallery = Gallery::new(
        WheelConfig::default(),
        &projects(),
        Box::new(clock.clone()),
    )
    .expect("default layout is valid");
    (gallery, clock)
}

fn frame(gallery: &mut Gallery, clock: &ManualClock) {
    clock.advance(16.0);
    gallery.tick(FRAME);
}

/// Put the pointer over the centre of `id`.
fn hover_item(gallery: &mut Gallery, id: ItemId) {
    let world = gallery.wheel().world_position(id).unwrap();
    let ndc = gallery.camera().project_to_ndc(world).unwrap();
    gallery.on_pointer_move(Vec2::new(400.0, 300.0), ndc);
}

#[test]
fn mount_announces_aligned_title() {
    let (mut gallery, _clock) = make_gallery();
    let effects = gallery.drain_effects();
    assert_eq!(effects, vec![Effect::SetTitle("Project 4".into())]);
    assert_eq!(gallery.aligned_item(), Some(ItemId(4)));
    assert!(matches!(gallery.mode(), AnimationMode::Idle));
}

#[test]
fn mouse_notch_adds_bounded_velocity_and_schedules_snap() {
    let (mut gallery, clock) = make_gallery();
    clock.set(1000.0);
    gallery.on_wheel(-120.0);

    let v = gallery.state().target_velocity;
    assert!(v > 0.0);
    assert!(v <= MAX_VELOCITY_CHANGE);
    assert!(matches!(gallery.mode(), AnimationMode::Spinning));
    assert_eq!(
        gallery.state().timers.deadline(TimerKind::Snap),
        Some(1000.0 + MOUSE_WHEEL_SNAP_DELAY_MS)
    );
}

#[test]
fn wheel_events_debounce_the_snap_timer() {
    let (mut gallery, clock) = make_gallery();
    gallery.on_wheel(-120.0);
    clock.advance(300.0);
    gallery.on_wheel(-120.0);
    assert_eq!(gallery.state().timers.pending_count(), 1);
    assert_eq!(
        gallery.state().timers.deadline(TimerKind::Snap),
        Some(300.0 + MOUSE_WHEEL_SNAP_DELAY_MS)
    );
}

#[test]
fn velocities_stay_within_cap_for_any_scroll_sequence() {
    let (mut gallery, clock) = make_gallery();
    let deltas = [-120.0, -120.0, -3.0, -480.0, 900.0, -1.0, 12.0, -2000.0, 40.0];
    for round in 0..40 {
        for (i, d) in deltas.iter().enumerate() {
            if (round + i) % 3 != 0 {
                gallery.on_wheel(*d);
            }
        }
        frame(&mut gallery, &clock);
        let s = gallery.state();
        assert!(s.current_velocity.abs() <= MAX_VELOCITY + 1e-6);
        assert!(s.target_velocity.abs() <= MAX_VELOCITY + 1e-6);
    }
}

#[test]
fn spin_decays_to_idle_and_snap_aligns_an_item() {
    let (mut gallery, clock) = make_gallery();
    gallery.on_wheel(-120.0);
    gallery.on_wheel(-120.0);
    for _ in 0..300 {
        frame(&mut gallery, &clock);
    }
    assert!(matches!(gallery.mode(), AnimationMode::Idle));
    assert_eq!(gallery.state().current_velocity, 0.0);
    let (_, angle) = gallery.calculate_snap_angle().unwrap();
    assert!(angle.abs() < 1e-3, "residual snap angle {angle}");
}

#[test]
fn aligned_wheel_needs_no_snap() {
    let (mut gallery, clock) = make_gallery();
    let (id, angle) = gallery.calculate_snap_angle().unwrap();
    assert_eq!(id, ItemId(4));
    assert!(angle.abs() < 0.01);

    gallery.snap();
    assert!(matches!(gallery.mode(), AnimationMode::Idle));
    frame(&mut gallery, &clock);
    assert_eq!(gallery.wheel().rotation(), 0.0);
}

#[test]
fn snap_uses_the_shorter_arc_and_settles_exactly() {
    let (mut gallery, clock) = make_gallery();
    // A drag of 32px rotates by about 0.05 rad counter-clockwise.
    gallery.on_pointer_down(Vec2::new(100.0, 100.0));
    gallery.on_pointer_move(Vec2::new(132.0, 100.0), Vec2::ZERO);
    clock.advance(500.0);
    gallery.on_pointer_up();

    match gallery.mode() {
        AnimationMode::Snapping(s) => assert!(s.target < 0.0 && s.target > -0.1),
        other => panic!("expected snapping, got {other:?}"),
    }
    for _ in 0..400 {
        frame(&mut gallery, &clock);
        if matches!(gallery.mode(), AnimationMode::Idle) {
            break;
        }
    }
    assert!(matches!(gallery.mode(), AnimationMode::Idle));
    assert!(gallery.wheel().rotation().abs() < 1e-4);
}

#[test]
fn drag_release_with_speed_keeps_momentum() {
    let (mut gallery, clock) = make_gallery();
    gallery.on_pointer_down(Vec2::new(100.0, 100.0));
    clock.advance(16.0);
    gallery.on_pointer_move(Vec2::new(140.0, 100.0), Vec2::ZERO);
    clock.advance(16.0);
    gallery.on_pointer_move(Vec2::new(180.0, 100.0), Vec2::ZERO);
    gallery.on_pointer_up();

    let expected = 40.0 / 4000.0 * std::f32::consts::TAU;
    assert!((gallery.wheel().rotation() - 2.0 * expected).abs() < 1e-5);
    assert!((gallery.state().target_velocity - expected).abs() < 1e-5);
    assert!(matches!(gallery.mode(), AnimationMode::Spinning));
    assert!(gallery.state().timers.is_pending(TimerKind::Snap));

    // The click that trails a drag must not select anything.
    gallery.on_click();
    assert!(!gallery.state().is_converging());
}

#[test]
fn arrow_step_moves_exactly_one_slot() {
    let (mut gallery, clock) = make_gallery();
    gallery.drain_effects();
    gallery.on_key_down(wheel_core::Key::ArrowLeft);
    assert!(matches!(gallery.mode(), AnimationMode::StepRotating(_)));

    let mut saw_snap = false;
    for _ in 0..1000 {
        frame(&mut gallery, &clock);
        saw_snap |= matches!(gallery.mode(), AnimationMode::Snapping(_));
        if matches!(gallery.mode(), AnimationMode::Idle) {
            break;
        }
    }
    assert!(saw_snap, "step should chain into a corrective snap");
    let interval = gallery.config().slot_interval();
    assert!((gallery.wheel().rotation() - interval).abs() < 1e-3);
    assert_eq!(gallery.aligned_item(), Some(ItemId(3)));
    assert!(gallery
        .drain_effects()
        .contains(&Effect::SetTitle("Project 3".into())));
}

#[test]
fn held_up_arrow_spins_until_release_then_snaps() {
    let (mut gallery, clock) = make_gallery();
    gallery.on_key_down(wheel_core::Key::ArrowUp);
    for _ in 0..30 {
        frame(&mut gallery, &clock);
        assert!(gallery.state().target_velocity <= MAX_VELOCITY);
    }
    assert!(gallery.wheel().rotation() > 0.0);
    assert!(!gallery.state().timers.is_pending(TimerKind::Snap));

    gallery.on_key_up(wheel_core::Key::ArrowUp);
    assert!(gallery.state().timers.is_pending(TimerKind::Snap));
    for _ in 0..400 {
        frame(&mut gallery, &clock);
    }
    let (_, angle) = gallery.calculate_snap_angle().unwrap();
    assert!(angle.abs() < 1e-3);
}

#[test]
fn clicking_hovered_item_converges_on_its_pair() {
    let (mut gallery, _clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    gallery.on_click();

    let converge = gallery.state().converge().expect("converging");
    assert_eq!(converge.clicked, ItemId(4));
    assert_eq!(converge.pair, ItemId(8));

    let wheel = gallery.wheel();
    let targets: Vec<ItemId> = (0..wheel.len())
        .map(ItemId)
        .filter(|id| wheel.transient(*id).unwrap().is_target)
        .collect();
    assert_eq!(targets, vec![ItemId(4), ItemId(8)]);
    let moving = (0..wheel.len())
        .filter(|i| wheel.transient(ItemId(*i)).unwrap().trajectory.is_some())
        .count();
    assert_eq!(moving, 14);
    assert!(gallery.state().timers.is_pending(TimerKind::Navigate));
}

#[test]
fn converge_navigates_once_after_duration() {
    let (mut gallery, clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    gallery.on_click();
    gallery.drain_effects();

    for _ in 0..200 {
        frame(&mut gallery, &clock);
    }
    let effects = gallery.drain_effects();
    let navigations: Vec<&Effect> = effects
        .iter()
        .filter(|e| matches!(e, Effect::Navigate(_)))
        .collect();
    assert_eq!(navigations, vec![&Effect::Navigate("/projects/4".into())]);
    assert!(effects.contains(&Effect::Dispose));
    assert!(gallery.is_disposed());

    gallery.on_click();
    frame(&mut gallery, &clock);
    assert!(gallery.drain_effects().is_empty());
}

#[test]
fn converge_moves_items_and_holds_before_navigation() {
    let (mut gallery, clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    gallery.on_click();
    let target_pos = gallery.wheel().item(ItemId(4)).unwrap().transform.position;
    let neighbour_start = gallery.wheel().item(ItemId(3)).unwrap().transform.position;

    // 50 ticks of 0.02 reach full progress well before the 1200ms timer.
    for _ in 0..55 {
        frame(&mut gallery, &clock);
    }
    assert!(!gallery.is_disposed());
    let c = gallery.state().converge().unwrap();
    assert_eq!(c.progress, 1.0);

    let wheel = gallery.wheel();
    assert_eq!(wheel.item(ItemId(4)).unwrap().transform.position, target_pos);
    let neighbour = wheel.item(ItemId(3)).unwrap().transform.position;
    assert!(neighbour.truncate().distance(target_pos.truncate()) < 1e-2);
    assert!(neighbour.z < target_pos.z, "moving items stack behind the target");
    assert_ne!(neighbour, neighbour_start);
}

#[test]
fn second_click_confirms_navigation_immediately() {
    let (mut gallery, clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    gallery.on_click();
    frame(&mut gallery, &clock);
    gallery.on_click();

    assert_eq!(gallery.navigated_to(), Some("/projects/4"));
    assert_eq!(gallery.state().timers.pending_count(), 0);
    clock.advance(5000.0);
    gallery.poll_timers();
    let navigations = gallery
        .drain_effects()
        .into_iter()
        .filter(|e| matches!(e, Effect::Navigate(_)))
        .count();
    assert_eq!(navigations, 1);
}

#[test]
fn at_most_one_navigation_timer_is_pending() {
    let (mut gallery, _clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    gallery.on_click();
    assert!(!gallery.begin_converge(ItemId(2)));
    gallery.on_key_down(wheel_core::Key::Enter);
    assert!(gallery.is_disposed());
    assert!(!gallery.state().timers.is_pending(TimerKind::Navigate));

    let (mut gallery, clock) = make_gallery();
    for _ in 0..3 {
        hover_item(&mut gallery, ItemId(4));
        gallery.on_click();
        assert_eq!(gallery.state().timers.pending_count(), 1);
        gallery.cancel_converge();
        assert_eq!(gallery.state().timers.pending_count(), 0);
        frame(&mut gallery, &clock);
    }
}

#[test]
fn scroll_during_converge_cancels_and_restores() {
    let (mut gallery, clock) = make_gallery();
    let originals: Vec<_> = (0..16)
        .map(|i| gallery.wheel().stable(ItemId(i)).unwrap().original_position)
        .collect();
    hover_item(&mut gallery, ItemId(4));
    gallery.on_click();
    for _ in 0..20 {
        frame(&mut gallery, &clock);
    }
    gallery.on_wheel(-120.0);

    assert!(!gallery.state().is_converging());
    assert!(!gallery.state().timers.is_pending(TimerKind::Navigate));
    for (i, original) in originals.iter().enumerate() {
        let item = gallery.wheel().item(ItemId(i)).unwrap();
        assert!(item.transform.position.distance(*original) < 1e-4);
        assert_eq!(item.transform.scale, 1.0);
        assert!(gallery.wheel().transient(ItemId(i)).unwrap().trajectory.is_none());
    }
    clock.advance(5000.0);
    gallery.poll_timers();
    assert!(gallery.navigated_to().is_none());
}

#[test]
fn cancelling_twice_is_a_no_op() {
    let (mut gallery, _clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    gallery.on_click();
    assert!(gallery.cancel_converge());
    let after_first: Vec<_> = gallery.wheel().items().iter().map(|i| i.transform).collect();
    assert!(!gallery.cancel_converge());
    let after_second: Vec<_> = gallery.wheel().items().iter().map(|i| i.transform).collect();
    assert_eq!(after_first, after_second);
}

#[test]
fn context_loss_cancels_converge_and_freezes_ticks() {
    let (mut gallery, clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    gallery.on_click();
    for _ in 0..10 {
        frame(&mut gallery, &clock);
    }
    gallery.on_context_lost();
    assert!(matches!(gallery.mode(), AnimationMode::ContextLost));
    assert!(!gallery.state().timers.is_pending(TimerKind::Navigate));
    let neighbour = gallery.wheel().item(ItemId(3)).unwrap().transform.position;
    assert_eq!(
        neighbour,
        gallery.wheel().stable(ItemId(3)).unwrap().original_position
    );

    gallery.on_wheel(-120.0);
    let rotation = gallery.wheel().rotation();
    for _ in 0..20 {
        frame(&mut gallery, &clock);
    }
    assert_eq!(gallery.wheel().rotation(), rotation);
    assert!(matches!(gallery.mode(), AnimationMode::ContextLost));

    gallery.on_context_restored();
    assert!(matches!(gallery.mode(), AnimationMode::Idle));
    for _ in 0..20 {
        frame(&mut gallery, &clock);
    }
    let (_, angle) = gallery.calculate_snap_angle().unwrap();
    assert!(angle.abs() < 0.01);
}

#[test]
fn hover_is_throttled_and_suppressed_while_spinning_fast() {
    let (mut gallery, clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    clock.advance(10.0);
    gallery.tick(Duration::from_millis(10));
    assert_eq!(gallery.hovered(), None);
    for _ in 0..3 {
        clock.advance(10.0);
        gallery.tick(Duration::from_millis(10));
    }
    assert_eq!(gallery.hovered(), Some(ItemId(4)));
    assert!(gallery.drain_effects().contains(&Effect::SetCursor(
        wheel_core::Cursor::Pointer
    )));

    for _ in 0..30 {
        for _ in 0..5 {
            gallery.on_wheel(-120.0);
        }
        frame(&mut gallery, &clock);
    }
    assert!(gallery.state().current_velocity.abs() > gallery.config().hover_speed_cutoff);
    assert_eq!(gallery.hovered(), None);
}

#[test]
fn hovered_item_scales_up_and_lights_rim() {
    let (mut gallery, clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    for _ in 0..30 {
        frame(&mut gallery, &clock);
    }
    let wheel = gallery.wheel();
    let hovered = wheel.item(ItemId(4)).unwrap();
    assert!(hovered.transform.scale > 1.02);
    assert!(hovered.mouse_influence > 0.95);
    let other = wheel.item(ItemId(5)).unwrap();
    assert!((other.transform.scale - 1.0).abs() < 1e-4);
    assert!(other.mouse_influence < 1e-3);
}

#[test]
fn hidden_page_disposes_after_delay_unless_shown_again() {
    let (mut gallery, clock) = make_gallery();
    gallery.on_visibility_change(true);
    clock.advance(10_000.0);
    gallery.on_visibility_change(false);
    clock.advance(60_000.0);
    gallery.poll_timers();
    assert!(!gallery.is_disposed());

    gallery.on_visibility_change(true);
    clock.advance(gallery.config().hidden_dispose_delay_ms + 1.0);
    gallery.poll_timers();
    assert!(gallery.is_disposed());
    assert_eq!(gallery.state().timers.pending_count(), 0);
}

#[test]
fn dispose_happens_once() {
    let (mut gallery, _clock) = make_gallery();
    gallery.drain_effects();
    gallery.on_wheel(-120.0);
    assert!(gallery.dispose());
    assert!(!gallery.dispose());
    gallery.on_page_hide();
    let disposals = gallery
        .drain_effects()
        .into_iter()
        .filter(|e| *e == Effect::Dispose)
        .count();
    assert_eq!(disposals, 1);
    assert_eq!(gallery.state().timers.pending_count(), 0);
}

#[test]
fn touch_move_without_start_is_ignored() {
    let (mut gallery, _clock) = make_gallery();
    gallery.on_touch_move(Vec2::new(10.0, 10.0));
    assert_eq!(gallery.state().target_velocity, 0.0);

    gallery.on_touch_start(Vec2::new(10.0, 10.0));
    gallery.on_touch_move(Vec2::new(60.0, 20.0));
    assert!(gallery.state().target_velocity > 0.0);
    assert!(gallery.state().timers.is_pending(TimerKind::Snap));
}

#[test]
fn enter_without_hover_converges_on_aligned_item() {
    let (mut gallery, _clock) = make_gallery();
    gallery.on_key_down(wheel_core::Key::Enter);
    let c = gallery.state().converge().unwrap();
    assert_eq!(c.clicked, ItemId(4));
    gallery.on_key_down(wheel_core::Key::Escape);
    assert!(!gallery.state().is_converging());
}

/// Start a converge while the wheel sits about 0.05 rad off alignment.
fn converge_off_alignment(gallery: &mut Gallery) {
    gallery.on_pointer_down(Vec2::new(100.0, 100.0));
    gallery.on_pointer_move(Vec2::new(132.0, 100.0), Vec2::ZERO);
    assert!(gallery.wheel().rotation() > 0.04);
    assert!(gallery.begin_converge(ItemId(4)));
}

fn settle(gallery: &mut Gallery, clock: &ManualClock) {
    for _ in 0..600 {
        frame(gallery, clock);
        if matches!(gallery.mode(), AnimationMode::Idle) {
            break;
        }
    }
}

#[test]
fn escape_during_converge_snaps_back_into_alignment() {
    let (mut gallery, clock) = make_gallery();
    converge_off_alignment(&mut gallery);
    for _ in 0..10 {
        frame(&mut gallery, &clock);
    }

    gallery.on_key_down(wheel_core::Key::Escape);
    assert!(!gallery.state().is_converging());
    assert!(matches!(gallery.mode(), AnimationMode::Snapping(_)));

    settle(&mut gallery, &clock);
    assert!(matches!(gallery.mode(), AnimationMode::Idle));
    assert!(gallery.wheel().rotation().abs() < 1e-4);
    assert_eq!(gallery.aligned_item(), Some(ItemId(4)));
}

#[test]
fn hide_and_show_during_converge_snaps_back_into_alignment() {
    let (mut gallery, clock) = make_gallery();
    converge_off_alignment(&mut gallery);
    frame(&mut gallery, &clock);

    gallery.on_visibility_change(true);
    assert!(!gallery.state().is_converging());
    assert!(!gallery.state().timers.is_pending(TimerKind::Navigate));
    gallery.on_visibility_change(false);
    assert!(!gallery.state().timers.is_pending(TimerKind::HiddenDispose));

    settle(&mut gallery, &clock);
    assert!(matches!(gallery.mode(), AnimationMode::Idle));
    assert!(gallery.wheel().rotation().abs() < 1e-4);
}

#[test]
fn touch_swipe_during_converge_cancels_and_spins() {
    let (mut gallery, clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    gallery.on_click();
    for _ in 0..10 {
        frame(&mut gallery, &clock);
    }

    // A touch that has not moved yet leaves the converge running.
    gallery.on_touch_start(Vec2::new(200.0, 200.0));
    assert!(gallery.state().is_converging());

    gallery.on_touch_move(Vec2::new(200.0, 260.0));
    assert!(!gallery.state().is_converging());
    assert!(!gallery.state().timers.is_pending(TimerKind::Navigate));
    assert!(gallery.state().timers.is_pending(TimerKind::Snap));
    assert!(matches!(gallery.mode(), AnimationMode::Spinning));
    assert!(gallery.state().target_velocity > 0.0);
    for i in 0..16 {
        assert!(gallery.wheel().transient(ItemId(i)).unwrap().trajectory.is_none());
    }
}

#[test]
fn step_arrow_during_converge_cancels_and_steps() {
    let (mut gallery, clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    gallery.on_click();
    frame(&mut gallery, &clock);

    gallery.on_key_down(wheel_core::Key::ArrowRight);
    assert!(!gallery.state().is_converging());
    assert!(!gallery.state().timers.is_pending(TimerKind::Navigate));
    match gallery.mode() {
        AnimationMode::StepRotating(s) => assert!(s.target < 0.0),
        other => panic!("expected step rotation, got {other:?}"),
    }
}

#[test]
fn spin_arrow_during_converge_cancels_and_spins() {
    let (mut gallery, clock) = make_gallery();
    hover_item(&mut gallery, ItemId(4));
    gallery.on_click();
    frame(&mut gallery, &clock);

    gallery.on_key_down(wheel_core::Key::ArrowUp);
    assert!(!gallery.state().is_converging());
    assert!(!gallery.state().timers.is_pending(TimerKind::Navigate));
    for _ in 0..5 {
        frame(&mut gallery, &clock);
    }
    assert!(matches!(gallery.mode(), AnimationMode::Spinning));
    assert!(gallery.wheel().rotation() > 0.0);
}

#[test]
fn converging_on_a_bottom_item_pairs_with_the_top_wheel() {
    let (mut gallery, clock) = make_gallery();
    hover_item(&mut gallery, ItemId(8));
    gallery.on_click();

    let converge = gallery.state().converge().expect("converging");
    assert_eq!(converge.clicked, ItemId(8));
    assert_eq!(converge.pair, ItemId(4));

    let wheel = gallery.wheel();
    let clicked_pos = wheel.item(ItemId(8)).unwrap().transform.position;
    let pair_pos = wheel.item(ItemId(4)).unwrap().transform.position;
    let bottom = wheel.transient(ItemId(12)).unwrap().trajectory.unwrap();
    assert!((bottom.target_angle - wheel_core::wheel::polar_angle(clicked_pos)).abs() < 1e-5);
    let top = wheel.transient(ItemId(0)).unwrap().trajectory.unwrap();
    assert!((top.target_angle - wheel_core::wheel::polar_angle(pair_pos)).abs() < 1e-5);

    for _ in 0..55 {
        frame(&mut gallery, &clock);
    }
    let wheel = gallery.wheel();
    for i in 9..16 {
        let p = wheel.item(ItemId(i)).unwrap().transform.position;
        assert!(p.truncate().distance(clicked_pos.truncate()) < 1e-2);
    }
    for i in (0..8).filter(|i| *i != 4) {
        let p = wheel.item(ItemId(i)).unwrap().transform.position;
        assert!(p.truncate().distance(pair_pos.truncate()) < 1e-2);
    }
}

#[test]
fn slow_drag_release_snaps_without_waiting() {
    let (mut gallery, clock) = make_gallery();
    gallery.on_pointer_down(Vec2::new(100.0, 100.0));
    // Half-pixel moves stay under the momentum threshold.
    for i in 1..=20 {
        clock.advance(16.0);
        gallery.on_pointer_move(Vec2::new(100.0 + 0.5 * i as f32, 100.0), Vec2::ZERO);
    }
    assert!(gallery.wheel().rotation() > gallery.config().snap_min_angle);
    gallery.on_pointer_up();

    assert!(!gallery.state().timers.is_pending(TimerKind::Snap));
    assert_eq!(gallery.state().target_velocity, 0.0);
    assert!(matches!(gallery.mode(), AnimationMode::Snapping(_)));
}
