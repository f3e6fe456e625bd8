// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `ZoomTransformEngine` against a headless page.
//!
//! These exercise the scale/translation model end to end: focal-point
//! preservation, clamping at the limits, overflow past the scroll range, and
//! reset.

use kurbo::{Point, Size, Vec2};
use proptest::prelude::*;
use understory_zoom::{
    Axis, Fidelity, HeadlessPage, InteractionState, ScaleChange, ScrollAdapter,
    TransformFunction, ZoomConfig, ZoomState, ZoomTransformEngine,
};

fn engine() -> ZoomTransformEngine {
    ZoomTransformEngine::new(&ZoomConfig::default())
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn scale_about_focal_point_with_scroll_room() {
    let mut page = HeadlessPage::with_max_offset(1000, 1000);
    let mut e = engine();

    e.apply_scale(&mut page, 2.0, Point::new(50.0, 50.0), 0).unwrap();

    assert_eq!(e.scale(), 2.0);
    assert_eq!(e.translation(), Vec2::new(-50.0, -50.0));
    assert_eq!(e.overflow_translation(), Vec2::ZERO);
    assert_eq!(page.offset(Axis::X), 50);
    assert_eq!(page.offset(Axis::Y), 50);
}

#[test]
fn scale_without_scroll_range_overflows() {
    let mut page = HeadlessPage::with_max_offset(0, 0);
    let mut e = engine();

    e.apply_scale(&mut page, 2.0, Point::new(50.0, 50.0), 0).unwrap();

    assert_eq!(e.scale(), 2.0);
    assert_eq!(e.translation(), Vec2::ZERO);
    assert_eq!(e.overflow_translation(), Vec2::new(50.0, 50.0));
}

#[test]
fn inverse_scale_about_same_focal_point_round_trips() {
    let mut page = HeadlessPage::with_max_offset(1000, 1000);
    let mut e = engine();
    let focal = Point::new(100.0, 100.0);

    e.apply_scale(&mut page, 2.0, focal, 0).unwrap();
    assert_eq!(e.translation(), Vec2::new(-100.0, -100.0));
    e.apply_scale(&mut page, 0.5, focal, 10).unwrap();

    assert_close(e.scale(), 1.0);
    assert_close(e.translation().x, 0.0);
    assert_close(e.translation().y, 0.0);
}

#[test]
fn no_op_at_limit_leaves_state_bit_identical() {
    let mut page = HeadlessPage::with_max_offset(300, 300);
    let mut e = engine();
    e.apply_scale(&mut page, 10.0, Point::new(33.3, 71.7), 0).unwrap();
    assert_eq!(e.scale(), 10.0);

    let before = e.state();
    let renders = page.render_count();
    let change = e.apply_scale(&mut page, 1.5, Point::new(5.0, 5.0), 10).unwrap();

    assert_eq!(change, ScaleChange::Unchanged);
    let after = e.state();
    assert_eq!(after.translation().x.to_bits(), before.translation().x.to_bits());
    assert_eq!(after.translation().y.to_bits(), before.translation().y.to_bits());
    assert_eq!(
        after.overflow_translation().x.to_bits(),
        before.overflow_translation().x.to_bits()
    );
    assert_eq!(
        after.overflow_translation().y.to_bits(),
        before.overflow_translation().y.to_bits()
    );
    assert_eq!(page.render_count(), renders);
}

#[test]
fn zooming_out_at_minimum_is_a_no_op() {
    let mut page = HeadlessPage::with_max_offset(300, 300);
    let mut e = engine();

    let change = e.apply_scale(&mut page, 0.5, Point::new(5.0, 5.0), 0);
    assert_eq!(change, Ok(ScaleChange::Unchanged));
    assert_eq!(page.render_count(), 0);
    assert_eq!(e.state(), ZoomState::IDENTITY);
}

#[test]
fn fractional_translation_survives_self_caused_scroll_events() {
    let mut page = HeadlessPage::with_max_offset(1000, 1000);
    let mut e = engine();

    e.apply_scale(&mut page, 1.1, Point::new(45.0, 45.0), 0).unwrap();
    let t = e.translation();
    assert_close(t.x, -4.5);
    assert_eq!(page.offset(Axis::X), 4);

    assert!(page.take_scroll_notification());
    e.on_external_scroll_change(&page);
    assert_eq!(e.translation(), t);
}

#[test]
fn user_scroll_is_adopted() {
    let mut page = HeadlessPage::with_max_offset(1000, 1000);
    let mut e = engine();
    e.apply_scale(&mut page, 2.0, Point::new(50.0, 50.0), 0).unwrap();

    page.scroll_to(Axis::Y, 420);
    e.on_external_scroll_change(&page);
    assert_eq!(e.translation(), Vec2::new(-50.0, -420.0));

    // The next gesture builds on the adopted translation.
    e.apply_scale(&mut page, 1.5, Point::ZERO, 10).unwrap();
    assert_close(e.translation().y, -630.0);
}

#[test]
fn low_fidelity_while_gesturing_then_settles() {
    let mut page = HeadlessPage::with_max_offset(1000, 1000);
    let mut e = engine();

    e.apply_scale(&mut page, 1.2, Point::ZERO, 0).unwrap();
    e.apply_scale(&mut page, 1.2, Point::ZERO, 20).unwrap();
    let last = page.last_render().copied().unwrap();
    assert_eq!(last.fidelity, Fidelity::Low);
    assert!(matches!(last.transform, TransformFunction::Perspective { .. }));

    assert!(!e.poll(&mut page, 59).settled);
    let fired = e.poll(&mut page, 60);
    assert!(fired.settled);
    assert!(!fired.interaction_restored);
    let last = page.last_render().copied().unwrap();
    assert_eq!(last.fidelity, Fidelity::High);
    assert_close(last.transform.effective_scale(), 1.44);

    let fired = e.poll(&mut page, 420);
    assert!(fired.interaction_restored);
    assert_eq!(page.interaction(), InteractionState::Enabled);
}

#[test]
fn high_fidelity_configuration_never_schedules_settle() {
    let mut config = ZoomConfig::default();
    config.render.gesture_fidelity = Fidelity::High;
    let mut page = HeadlessPage::with_max_offset(1000, 1000);
    let mut e = ZoomTransformEngine::new(&config);

    e.apply_scale(&mut page, 2.0, Point::ZERO, 0).unwrap();
    assert_eq!(e.renderer().settle_deadline(), None);
    assert_eq!(
        page.last_render().map(|r| r.transform),
        Some(TransformFunction::Scale(2.0))
    );
}

#[test]
fn reset_restores_identity_and_relative_scroll() {
    let mut page = HeadlessPage::with_content(Size::new(400.0, 300.0), Size::new(400.0, 1300.0));
    let mut e = engine();
    assert_eq!(page.max_offset(Axis::Y), 1000);

    e.apply_scale(&mut page, 2.0, Point::new(200.0, 150.0), 0).unwrap();
    // Content is now 800x2600 inside a 400x300 view.
    assert_eq!(page.max_offset(Axis::X), 400);
    assert_eq!(page.max_offset(Axis::Y), 2300);
    assert_eq!(page.offset(Axis::X), 200);
    assert_eq!(page.offset(Axis::Y), 150);
    page.take_scroll_notification();

    e.reset(&mut page, 100);

    assert_eq!(e.scale(), 1.0);
    assert_eq!(e.overflow_translation(), Vec2::ZERO);
    // X: 200 / 400 * 0 (no range left); Y: 150 / 2300 * 1000 = 65.2.
    assert_eq!(page.offset(Axis::X), 0);
    assert_eq!(page.offset(Axis::Y), 65);
    assert_eq!(e.translation(), Vec2::new(0.0, -65.0));

    let last = page.last_render().copied().unwrap();
    assert_eq!(last.fidelity, Fidelity::High);
    assert_eq!(last.transform, TransformFunction::Scale(1.0));
    assert_eq!(page.interaction(), InteractionState::Enabled);
    assert_eq!(e.next_deadline(), None);
}

#[test]
fn reset_skips_axes_without_scroll_range() {
    // X never gains a range (content is narrower than the view even at 2x);
    // Y does.
    let mut page = HeadlessPage::with_content(Size::new(400.0, 300.0), Size::new(100.0, 300.0));
    let mut e = engine();

    e.apply_scale(&mut page, 2.0, Point::new(50.0, 150.0), 0).unwrap();
    assert_eq!(page.max_offset(Axis::X), 0);
    assert_eq!(page.max_offset(Axis::Y), 300);
    assert_eq!(page.offset(Axis::Y), 150);
    assert_eq!(e.overflow_translation(), Vec2::new(50.0, 0.0));
    page.take_scroll_notification();

    e.reset(&mut page, 100);

    assert_eq!(page.offset(Axis::X), 0);
    // Y: 150 / 300 * 0.
    assert_eq!(page.offset(Axis::Y), 0);
    assert_eq!(e.state(), ZoomState::IDENTITY);
}

#[test]
fn reset_twice_matches_reset_once() {
    let mut page = HeadlessPage::with_content(Size::new(400.0, 300.0), Size::new(1200.0, 900.0));
    let mut e = engine();
    e.apply_scale(&mut page, 3.0, Point::new(123.0, 77.0), 0).unwrap();

    e.reset(&mut page, 10);
    let once = (e.state(), page.offset(Axis::X), page.offset(Axis::Y));
    e.reset(&mut page, 20);
    let twice = (e.state(), page.offset(Axis::X), page.offset(Axis::Y));

    assert_eq!(once, twice);
}

#[test]
fn reset_cancels_pending_timers() {
    let mut page = HeadlessPage::with_max_offset(1000, 1000);
    let mut e = engine();
    e.apply_scale(&mut page, 2.0, Point::ZERO, 0).unwrap();
    assert!(e.next_deadline().is_some());

    e.reset(&mut page, 5);
    let renders = page.render_count();
    let fired = e.poll(&mut page, 10_000);
    assert!(!fired.settled);
    assert!(!fired.interaction_restored);
    assert_eq!(page.render_count(), renders);
}

#[test]
fn independent_engines_do_not_share_state() {
    let mut a_page = HeadlessPage::with_max_offset(1000, 1000);
    let mut b_page = HeadlessPage::with_max_offset(1000, 1000);
    let mut a = engine();
    let b = engine();

    a.apply_scale(&mut a_page, 4.0, Point::new(10.0, 10.0), 0).unwrap();
    assert_eq!(a.scale(), 4.0);
    assert_eq!(b.scale(), 1.0);
    assert_eq!(b_page.offset(Axis::X), 0);
    assert!(!b_page.take_scroll_notification());
}

proptest! {
    #[test]
    fn scale_stays_within_limits(
        steps in prop::collection::vec(
            (0.05_f64..20.0, 0.0_f64..800.0, 0.0_f64..600.0),
            1..40,
        ),
    ) {
        let mut page = HeadlessPage::with_content(Size::new(800.0, 600.0), Size::new(800.0, 2400.0));
        let mut e = engine();
        for (i, (factor, x, y)) in steps.into_iter().enumerate() {
            e.apply_scale(&mut page, factor, Point::new(x, y), i as u64).unwrap();
            let (min, max) = e.scale_limits();
            prop_assert!(e.scale() >= min && e.scale() <= max);
            let t = e.translation();
            let o = e.overflow_translation();
            prop_assert!(t.x <= 0.0 && t.y <= 0.0);
            prop_assert!(o.x >= 0.0 && o.y >= 0.0);
        }
    }

    #[test]
    fn overflow_reconstructs_translation_past_the_range(
        factor in 1.01_f64..10.0,
        focal_x in 0.0_f64..2000.0,
        max_x in 0_i64..500,
    ) {
        let mut page = HeadlessPage::with_max_offset(max_x, 0);
        let mut e = engine();
        e.apply_scale(&mut page, factor, Point::new(focal_x, 0.0), 0).unwrap();

        let effective = e.scale();
        let desired = -focal_x * effective + focal_x;
        let t = e.translation().x;
        let o = e.overflow_translation().x;
        if desired < -(max_x as f64) {
            prop_assert!((t - o - desired).abs() < 1e-9);
            prop_assert_eq!(t, -(max_x as f64));
        } else {
            prop_assert_eq!(o, 0.0);
            prop_assert!((t - desired.min(0.0)).abs() < 1e-9);
        }
    }
}
