//! Simulated render loop driving a keyframe animation
//!
//! Run with `RUST_LOG=debug` to see keyframe and projection setup, or
//! `RUST_LOG=trace` for per-tick interpolation detail.

use webglu_math::Vector3;
use webglu_transform::animation::{Keyframe, KeyframeAnimation, KeyframeAnimationConfig};
use webglu_transform::{Camera, ObjectState, TransformError, TransformStacks};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> Result<(), TransformError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut animation = KeyframeAnimation::with_keyframes(
        [
            Keyframe::from_euler_degrees(Vector3::ZERO, Vector3::ZERO, Vector3::ONE, 0.0),
            Keyframe::from_euler_degrees(
                Vector3::new(0.0, 2.0, 0.0),
                Vector3::new(180.0, 0.0, 0.0),
                Vector3::splat(1.5),
                750.0,
            ),
            Keyframe::from_euler_degrees(
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(359.0, 0.0, 0.0),
                Vector3::ONE,
                1500.0,
            ),
        ],
        KeyframeAnimationConfig::default(),
    )?;

    let mut cube = ObjectState::default();
    cube.set_position(Vector3::new(0.0, 0.0, -5.0));

    let camera = Camera {
        aspect_ratio: 16.0 / 9.0,
        ..Camera::new(Vector3::new(0.0, 3.0, 8.0), Vector3::ZERO)
    };
    let mut stacks = TransformStacks::new();

    for frame in 0..120 {
        if let Err(e) = animation.tick(FRAME_MS) {
            log::warn!("Frame {frame}: animation disabled: {e}");
            animation.pause();
        }

        stacks.setup_matrices(&camera)?;
        stacks.begin_frame();

        stacks.modelview.push()?;
        let pose = cube.animated(animation.pose());
        stacks.modelview.apply_pose(&pose);
        let modelview = stacks.modelview.get_for_uniform();
        let normal = stacks.normal_matrix()?;
        stacks.modelview.pop()?;

        let (modelview_delta, projection_delta) = stacks.end_frame();
        if frame % 30 == 0 {
            log::info!(
                "Frame {frame} at {:.0} ms: at ({:.2}, {:.2}, {:.2}), n0 {:.3}, delta {}/{}",
                animation.age(),
                modelview[12],
                modelview[13],
                modelview[14],
                normal[0],
                modelview_delta,
                projection_delta
            );
        }
    }

    Ok(())
}
