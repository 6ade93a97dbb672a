// Timers, listener bookkeeping and resource disposal.

use anyhow::anyhow;
use wheel_core::lifecycle::{run_isolated, Lifecycle};
use wheel_core::resources::load_item_assets;
use wheel_core::{
    EventKind, ListenerRegistry, ListenerTarget, Project, ResourceKind, ResourceTracker,
    TimerKind, Timers, WheelConfig, WheelError, WheelPair,
};

#[test]
fn scheduling_replaces_the_pending_timer() {
    let mut timers = Timers::new();
    timers.schedule(TimerKind::Snap, 0.0, 500.0);
    timers.schedule(TimerKind::Snap, 100.0, 150.0);
    assert_eq!(timers.pending_count(), 1);
    assert_eq!(timers.deadline(TimerKind::Snap), Some(250.0));

    assert!(timers.take_due(249.0).is_empty());
    let due = timers.take_due(250.0);
    assert_eq!(due.as_slice(), &[TimerKind::Snap]);
    assert!(!timers.is_pending(TimerKind::Snap));
    assert!(timers.take_due(1000.0).is_empty());
}

#[test]
fn due_timers_fire_in_deadline_order() {
    let mut timers = Timers::new();
    timers.schedule(TimerKind::HiddenDispose, 0.0, 300.0);
    timers.schedule(TimerKind::Navigate, 0.0, 100.0);
    timers.schedule(TimerKind::Snap, 0.0, 200.0);
    let due = timers.take_due(1000.0);
    assert_eq!(
        due.as_slice(),
        &[TimerKind::Navigate, TimerKind::Snap, TimerKind::HiddenDispose]
    );
}

#[test]
fn cancel_reports_whether_anything_was_pending() {
    let mut timers = Timers::new();
    assert!(!timers.cancel(TimerKind::Navigate));
    timers.schedule(TimerKind::Navigate, 0.0, 1200.0);
    assert!(timers.cancel(TimerKind::Navigate));
    timers.schedule(TimerKind::Snap, 0.0, 1.0);
    timers.schedule(TimerKind::Navigate, 0.0, 1.0);
    timers.cancel_all();
    assert_eq!(timers.pending_count(), 0);
}

#[test]
fn registry_drains_every_listener_once() {
    let mut registry: ListenerRegistry<u32> = ListenerRegistry::new();
    registry.register(ListenerTarget::Canvas, EventKind::Wheel, 1);
    registry.register(ListenerTarget::Window, EventKind::KeyDown, 2);
    registry.register(ListenerTarget::Document, EventKind::VisibilityChange, 3);
    assert_eq!(registry.len(), 3);
    assert!(registry.contains(ListenerTarget::Window, EventKind::KeyDown));
    assert!(!registry.contains(ListenerTarget::Canvas, EventKind::KeyDown));

    let drained: Vec<u32> = registry.drain().into_iter().map(|r| r.handler).collect();
    assert_eq!(drained, vec![1, 2, 3]);
    assert!(registry.is_empty());
    assert!(registry.drain().is_empty());
}

#[test]
fn event_names_match_the_dom() {
    assert_eq!(EventKind::Wheel.as_str(), "wheel");
    assert_eq!(EventKind::VisibilityChange.as_str(), "visibilitychange");
    assert_eq!(EventKind::ContextLost.as_str(), "webglcontextlost");
    assert_eq!(EventKind::PageShow.as_str(), "pageshow");
    assert_eq!(EventKind::PageHide.as_str(), "pagehide");
}

#[test]
fn isolated_listener_failure_does_not_propagate() {
    let mut ran_second = false;
    let first = run_isolated(EventKind::Click, || Err(anyhow!("boom")));
    let second = run_isolated(EventKind::KeyDown, || {
        ran_second = true;
        Ok(())
    });
    assert!(!first);
    assert!(second);
    assert!(ran_second);
}

#[test]
fn lifecycle_navigates_and_disposes_once() {
    let mut lifecycle = Lifecycle::default();
    assert!(lifecycle.mark_navigated("/a"));
    assert!(!lifecycle.mark_navigated("/b"));
    assert_eq!(lifecycle.navigated_to(), Some("/a"));
    assert!(lifecycle.mark_disposed());
    assert!(!lifecycle.mark_disposed());

    let mut disposed_first = Lifecycle::default();
    disposed_first.mark_disposed();
    assert!(!disposed_first.mark_navigated("/a"));
}

#[test]
fn resources_are_released_exactly_once() {
    let mut tracker = ResourceTracker::new();
    let quad = tracker.track(ResourceKind::Geometry, "quad");
    let tex = tracker.track(ResourceKind::Texture, "photo-0");
    let mat = tracker.track(ResourceKind::Material, "item-0");
    assert_eq!(tracker.live_count(), 3);

    assert_eq!(tracker.release(tex), Ok(ResourceKind::Texture));
    assert_eq!(tracker.release(tex), Err(WheelError::AlreadyDisposed(tex)));

    let released = tracker.dispose_all();
    assert_eq!(
        released,
        vec![(quad, ResourceKind::Geometry), (mat, ResourceKind::Material)]
    );
    assert!(tracker.is_disposed());
    assert!(!tracker.is_live(quad));
    assert!(tracker.dispose_all().is_empty());
}

#[test]
fn failed_asset_loads_are_skipped() {
    let projects: Vec<Project> = (0..8)
        .map(|i| Project::new(format!("/img/{i}.jpg"), format!("/p/{i}"), format!("P{i}")))
        .collect();
    let wheel = WheelPair::build(&WheelConfig::default(), &projects).unwrap();
    let loaded = load_item_assets(wheel.items(), |item| {
        if item.slot == 3 {
            Err(WheelError::AssetLoad {
                path: item.project.image.clone(),
                reason: "404".into(),
            })
        } else {
            Ok(item.id.0)
        }
    });
    assert_eq!(loaded.len(), 16);
    assert_eq!(loaded.iter().filter(|a| a.is_none()).count(), 2);
    assert_eq!(loaded[0], Some(0));
    assert_eq!(loaded[3], None);
    assert_eq!(loaded[11], None);
}
