use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use webglu_math::{Quaternion, Vector3};
use webglu_transform::MatrixStack;
use webglu_transform::animation::{Keyframe, KeyframeAnimation, KeyframeAnimationConfig};

fn create_test_animation(keyframe_count: usize) -> KeyframeAnimation {
    let keyframes = (0..keyframe_count).map(|i| {
        let f = i as f32;
        Keyframe::new(
            Vector3::new(f, f * 0.5, 0.0),
            Quaternion::from_axis_angle_degrees(Vector3::Y, f * 30.0),
            Vector3::ONE,
            i as f64 * 100.0,
        )
    });

    KeyframeAnimation::with_keyframes(keyframes, KeyframeAnimationConfig::default())
        .unwrap_or_default()
}

fn bench_keyframe_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyframe_tick");

    for count in [2, 16, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut animation = create_test_animation(count);
            b.iter(|| animation.tick(black_box(16.0)))
        });
    }

    group.finish();
}

fn bench_draw_pass(c: &mut Criterion) {
    let mut animation = create_test_animation(16);
    let mut stack = MatrixStack::new();

    c.bench_function("draw_pass", |b| {
        b.iter(|| {
            let _ = animation.tick(black_box(16.0));
            let _ = stack.push();
            stack.apply_pose(animation.pose());
            let uniform = stack.get_for_uniform();
            let _ = stack.pop();
            uniform
        })
    });
}

criterion_group!(benches, bench_keyframe_tick, bench_draw_pass);
criterion_main!(benches);
