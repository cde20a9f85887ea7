//! Integration tests for the matrix stacks.

use proptest::prelude::*;
use webglu_math::{Matrix4, Quaternion, Vector3};
use webglu_transform::{
    Camera, MatrixStack, MatrixStackConfig, ObjectState, Pose, TransformError, TransformStacks,
};

fn vector() -> impl Strategy<Value = Vector3> {
    (-100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0)
        .prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

proptest! {
    #[test]
    fn push_translate_pop_restores(
        angle in -360.0f32..360.0,
        offset in vector(),
        v in vector(),
    ) {
        let mut stack = MatrixStack::new();
        stack.translate(offset);
        stack.rotate(angle, Vector3::Y);
        let before = *stack.current();

        stack.push().unwrap();
        stack.translate(v);
        stack.pop().unwrap();

        prop_assert_eq!(*stack.current(), before);
        prop_assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn nested_pushes_unwind_in_order(depth in 1usize..16) {
        let mut stack = MatrixStack::new();
        let mut saved = Vec::new();

        for i in 0..depth {
            saved.push(*stack.current());
            stack.push().unwrap();
            stack.translate(Vector3::new(i as f32, 0.0, 0.0));
        }

        while let Some(expected) = saved.pop() {
            prop_assert_eq!(stack.pop().unwrap(), expected);
        }
        prop_assert_eq!(*stack.current(), Matrix4::IDENTITY);
    }
}

#[test]
fn test_pop_fresh_stack_underflows() {
    let mut stack = MatrixStack::new();
    assert_eq!(stack.pop_matrix(), Err(TransformError::StackUnderflow));
    assert_eq!(*stack.current(), Matrix4::IDENTITY);
}

#[test]
fn test_draw_objects_with_shared_view() {
    let mut stacks = TransformStacks::with_config(MatrixStackConfig {
        max_depth: Some(8),
        check_balance: true,
    });
    let camera = Camera::new(Vector3::new(0.0, 2.0, 10.0), Vector3::ZERO);
    stacks.setup_matrices(&camera).unwrap();
    let view = *stacks.modelview.current();

    let mut objects = [ObjectState::default(), ObjectState::default()];
    objects[0].set_position(Vector3::new(-2.0, 0.0, 0.0));
    objects[1].set_position(Vector3::new(2.0, 0.0, 0.0));
    objects[1].set_rotation(Vector3::new(45.0, 0.0, 0.0));

    stacks.begin_frame();
    let mut uniforms = Vec::new();
    for object in &objects {
        stacks.modelview.push().unwrap();
        stacks.modelview.apply_pose(&object.pose());
        uniforms.push(stacks.modelview.get_for_uniform());
        stacks.modelview.pop().unwrap();
    }
    assert_eq!(stacks.end_frame(), (0, 0));

    assert_eq!(*stacks.modelview.current(), view);
    assert_eq!(&uniforms[0][12..15], &[-2.0, 0.0, 0.0]);
    assert_eq!(&uniforms[1][12..15], &[2.0, 0.0, 0.0]);
}

#[test]
fn test_unbalanced_frame_is_reported() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut stack = MatrixStack::with_config(MatrixStackConfig {
        max_depth: None,
        check_balance: true,
    });
    stack.begin_frame();
    stack.push().unwrap();
    stack.push().unwrap();

    assert_eq!(stack.end_frame(), 2);
    // Drawing continues normally
    stack.pop().unwrap();
    stack.pop().unwrap();
    assert!(stack.is_empty());
}

#[test]
fn test_hierarchical_transform() {
    let mut stack = MatrixStack::new();
    let parent = Pose::new(
        Vector3::new(0.0, 0.0, -10.0),
        Quaternion::from_axis_angle_degrees(Vector3::Y, 90.0),
        Vector3::ONE,
    );
    let child = Pose::new(
        Vector3::new(1.0, 0.0, 0.0),
        Quaternion::IDENTITY,
        Vector3::ONE,
    );

    stack.push().unwrap();
    stack.apply_pose(&parent);
    stack.push().unwrap();
    stack.apply_pose(&child);

    // The child's offset is rotated by the parent: +X becomes -Z
    let origin = stack.current().transform_point(Vector3::ZERO);
    assert!(origin.approx_eq(Vector3::new(0.0, 0.0, -11.0)));

    stack.pop().unwrap();
    stack.pop().unwrap();
    assert_eq!(*stack.current(), Matrix4::IDENTITY);
}
