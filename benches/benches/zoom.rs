// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_gesture::{ClassifierConfig, GestureClassifier, HostCaps, Modifiers, WheelInput};
use understory_zoom::{HeadlessPage, ZoomConfig, ZoomController, ZoomTransformEngine};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX)
    }
}

fn page() -> HeadlessPage {
    HeadlessPage::with_content(Size::new(1280.0, 800.0), Size::new(1280.0, 20_000.0))
}

/// A pinch burst: small factors alternating in and out about wandering
/// focal points, as a trackpad produces.
fn burst(len: usize, seed: u64) -> Vec<(f64, Point)> {
    let mut rng = Lcg::new(seed);
    (0..len)
        .map(|_| {
            let factor = 0.9 + 0.2 * rng.next_unit();
            let focal = Point::new(1280.0 * rng.next_unit(), 800.0 * rng.next_unit());
            (factor, focal)
        })
        .collect()
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_zoom");
    group.sample_size(50);

    for &len in &[16_usize, 256, 4_096] {
        let steps = burst(len, 0x200D_0000_0000_0001);

        group.bench_function(format!("apply_scale_burst(n={len})"), |b| {
            b.iter_batched(
                || (page(), ZoomTransformEngine::new(&ZoomConfig::default())),
                |(mut page, mut engine)| {
                    for (i, &(factor, focal)) in steps.iter().enumerate() {
                        let _ = engine.apply_scale(&mut page, factor, focal, i as u64);
                        if page.take_scroll_notification() {
                            engine.on_external_scroll_change(&page);
                        }
                    }
                    black_box(engine.state());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("burst_then_reset(n={len})"), |b| {
            b.iter_batched(
                || {
                    let mut page = page();
                    let mut engine = ZoomTransformEngine::new(&ZoomConfig::default());
                    for (i, &(factor, focal)) in steps.iter().enumerate() {
                        let _ = engine.apply_scale(&mut page, factor, focal, i as u64);
                    }
                    (page, engine)
                },
                |(mut page, mut engine)| {
                    engine.reset(&mut page, len as u64);
                    black_box(engine.state());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_gesture");

    let mut rng = Lcg::new(0x200D_0000_0000_0002);
    let events: Vec<WheelInput> = (0..1_024)
        .map(|i| WheelInput {
            delta_y: 40.0 * rng.next_unit() - 20.0,
            position: Point::new(1280.0 * rng.next_unit(), 800.0 * rng.next_unit()),
            modifiers: if i % 3 == 0 {
                Modifiers::SHIFT
            } else {
                Modifiers::CTRL
            },
        })
        .collect();

    group.bench_function("classify_wheel(n=1024)", |b| {
        let mut classifier =
            GestureClassifier::new(ClassifierConfig::default(), HostCaps::default());
        b.iter(|| {
            let mut consumed = 0_u32;
            for event in &events {
                if classifier.on_wheel(black_box(event), 1.5).is_consumed() {
                    consumed += 1;
                }
            }
            black_box(consumed);
        });
    });

    group.bench_function("controller_wheel_and_tick(n=1024)", |b| {
        b.iter_batched(
            || {
                (
                    page(),
                    ZoomController::new(&ZoomConfig::default(), HostCaps::default()),
                )
            },
            |(mut page, mut zoom)| {
                for (i, event) in events.iter().enumerate() {
                    let now = 8 * i as u64;
                    zoom.on_wheel(&mut page, event, now);
                    if page.take_scroll_notification() {
                        zoom.on_scroll(&page);
                    }
                    zoom.tick(&mut page, now);
                }
                black_box(zoom.engine().state());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_engine, bench_classify);
criterion_main!(benches);
