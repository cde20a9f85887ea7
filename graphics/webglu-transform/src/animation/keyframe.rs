//! Keyframe based animation
//!
//! Position and scale are interpolated linearly; rotation uses quaternion
//! slerp. The active interval advances one keyframe at a time and wraps
//! around, so a keyframe animation loops by default.

use webglu_math::{Quaternion, Vector3, lerp_triple, slerp};

use super::procedural::{Animation, AnimationHooks, ProceduralAnimation};
use super::state::{AnimationState, PlaybackMode};
use crate::error::AnimationError;
use crate::object_state::{ObjectState, Pose};

/// A position, rotation and scale at a particular point in time
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Keyframe {
    pub position: Vector3,
    pub rotation: Quaternion,
    pub scale: Vector3,
    /// Time this keyframe occurs at, in milliseconds
    pub at_time: f64,
}

impl Keyframe {
    pub const fn new(
        position: Vector3,
        rotation: Quaternion,
        scale: Vector3,
        at_time: f64,
    ) -> Self {
        Self {
            position,
            rotation,
            scale,
            at_time,
        }
    }

    /// Keyframe whose rotation is given as Euler angles in degrees, see
    /// [`ObjectState`] for the angle convention
    pub fn from_euler_degrees(
        position: Vector3,
        rotation: Vector3,
        scale: Vector3,
        at_time: f64,
    ) -> Self {
        Self::from_state(&ObjectState::new(position, rotation, scale), at_time)
    }

    /// Keyframe at `seconds`, stored in milliseconds
    pub fn at_seconds(
        position: Vector3,
        rotation: Quaternion,
        scale: Vector3,
        seconds: f64,
    ) -> Self {
        Self::new(position, rotation, scale, seconds * 1000.0)
    }

    pub fn from_state(state: &ObjectState, at_time: f64) -> Self {
        Self::new(state.position(), state.quaternion(), state.scale(), at_time)
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation, self.scale)
    }
}

/// How a tick's `dt` is added to the age of a keyframe animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum AgeAccumulation {
    /// `age += dt * time_scale`, once per tick
    #[default]
    Scaled,
    /// `age += dt`, then `age += dt * time_scale` again in the core update.
    /// Reproduces the double accumulation of older playback code.
    Legacy,
}

/// Runtime options for a [`KeyframeAnimation`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct KeyframeAnimationConfig {
    /// Multiplier applied to `dt` before it is added to the age
    pub time_scale: f64,
    pub accumulation: AgeAccumulation,
}

impl Default for KeyframeAnimationConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            accumulation: AgeAccumulation::Scaled,
        }
    }
}

/// Keyframe sequence and active interval; the hooks of a keyframe animation
#[derive(Debug, Clone)]
pub struct KeyframeTrack {
    keyframes: Vec<Keyframe>,
    /// Frame index to interpolate from; the interval always ends at the next
    /// keyframe, wrapping to 0 after the last
    from_index: usize,
    time_scale: f64,
    accumulation: AgeAccumulation,
}

impl KeyframeTrack {
    pub fn new(config: KeyframeAnimationConfig) -> Self {
        Self {
            keyframes: Vec::new(),
            from_index: 0,
            time_scale: config.time_scale,
            accumulation: config.accumulation,
        }
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// `(from, to)` indices of the interval being interpolated
    pub fn active_indices(&self) -> (usize, usize) {
        (self.from_index, self.to_index())
    }

    /// Frame index to interpolate to
    fn to_index(&self) -> usize {
        let len = self.keyframes.len();
        if len < 2 {
            return self.from_index + 1;
        }
        (self.from_index + 1) % len
    }

    /// Append a keyframe
    ///
    /// Keyframes must be added in time order; an earlier or non-finite time is
    /// rejected.
    pub fn add_keyframe(&mut self, keyframe: Keyframe) -> Result<(), AnimationError> {
        let previous = self
            .keyframes
            .last()
            .map_or(f64::NEG_INFINITY, |last| last.at_time);
        if !keyframe.at_time.is_finite() || keyframe.at_time < previous {
            return Err(AnimationError::KeyframeOutOfOrder {
                previous,
                at_time: keyframe.at_time,
            });
        }

        self.keyframes.push(keyframe);
        log::debug!(
            "Added keyframe at {} ms ({} total)",
            keyframe.at_time,
            self.keyframes.len()
        );
        Ok(())
    }

    /// Remove the keyframe at `index` and rebuild the active interval around
    /// `age`
    pub fn remove_keyframe(&mut self, index: usize, age: f64) -> Result<Keyframe, AnimationError> {
        let len = self.keyframes.len();
        if index >= len {
            return Err(AnimationError::KeyframeIndexOutOfRange { index, len });
        }
        if len <= 2 {
            return Err(AnimationError::InvalidKeyframeSet { count: len - 1 });
        }

        let removed = self.keyframes.remove(index);
        self.locate(age);

        log::debug!(
            "Removed keyframe {} at {} ms, interval is now {} -> {}",
            index,
            removed.at_time,
            self.from_index,
            self.to_index()
        );
        Ok(removed)
    }

    /// Point the interval at the keyframe at or before `age`
    fn locate(&mut self, age: f64) {
        // Largest index whose time is <= age, or 0 when age precedes every keyframe
        let at_or_before = self.keyframes.partition_point(|k| k.at_time <= age);
        self.from_index = at_or_before.saturating_sub(1);
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.time_scale = time_scale;
    }

    pub fn accumulation(&self) -> AgeAccumulation {
        self.accumulation
    }

    pub fn set_accumulation(&mut self, accumulation: AgeAccumulation) {
        self.accumulation = accumulation;
    }

    fn rewind(&mut self) {
        self.from_index = 0;
    }

    /// Interpolation factor for the active interval at `age`
    fn interval_factor(&self, age: f64) -> Result<f32, AnimationError> {
        let to_index = self.to_index();
        let from = &self.keyframes[self.from_index];
        let to = &self.keyframes[to_index];

        let progress = age - from.at_time;
        let duration = to.at_time - from.at_time;

        if duration == 0.0 {
            return Err(AnimationError::DivisionByZero {
                from: self.from_index,
                to: to_index,
                at_time: from.at_time,
            });
        }

        // Only the loop-back interval (last -> first) runs backwards in time.
        // Hold the final pose until the next tick wraps to 0 -> 1.
        if duration < 0.0 {
            return Ok(0.0);
        }

        Ok((progress / duration) as f32)
    }
}

impl AnimationHooks for KeyframeTrack {
    fn age_step(&self, dt: f64) -> f64 {
        match self.accumulation {
            AgeAccumulation::Scaled => dt * self.time_scale,
            AgeAccumulation::Legacy => dt,
        }
    }

    fn update(&mut self, state: &mut AnimationState, dt: f64) -> Result<(), AnimationError> {
        if self.accumulation == AgeAccumulation::Legacy {
            state.age += dt * self.time_scale;
        }

        let len = self.keyframes.len();
        if len < 2 {
            return Err(AnimationError::InvalidKeyframeSet { count: len });
        }

        // Time for next frame?
        if state.age >= self.keyframes[self.to_index()].at_time {
            self.from_index = (self.from_index + 1) % len;

            // Account for slop by throwing it out
            state.age = self.keyframes[self.from_index].at_time;

            log::trace!(
                "Keyframe interval advanced to {} -> {}",
                self.from_index,
                self.to_index()
            );
        }

        let t = self.interval_factor(state.age)?;
        let from = &self.keyframes[self.from_index];
        let to = &self.keyframes[self.to_index()];

        state.pose = Pose {
            position: lerp_triple(t, from.position, to.position),
            rotation: slerp(t, &from.rotation, &to.rotation),
            scale: lerp_triple(t, from.scale, to.scale),
        };

        log::trace!("Keyframe animation at {} ms, t = {}", state.age, t);
        Ok(())
    }
}

/// A keyframe based animation
///
/// Rotation interpolation uses quaternions. Like every procedural animation it
/// starts out playing.
#[derive(Debug, Clone)]
pub struct KeyframeAnimation {
    inner: ProceduralAnimation<KeyframeTrack>,
}

impl KeyframeAnimation {
    pub fn new() -> Self {
        Self::with_config(KeyframeAnimationConfig::default())
    }

    pub fn with_config(config: KeyframeAnimationConfig) -> Self {
        Self {
            inner: ProceduralAnimation::with_hooks(KeyframeTrack::new(config)),
        }
    }

    /// Build from a complete keyframe sequence
    ///
    /// The sequence must hold at least two keyframes in time order.
    pub fn with_keyframes(
        keyframes: impl IntoIterator<Item = Keyframe>,
        config: KeyframeAnimationConfig,
    ) -> Result<Self, AnimationError> {
        let mut animation = Self::with_config(config);
        for keyframe in keyframes {
            animation.add_keyframe(keyframe)?;
        }

        let count = animation.keyframes().len();
        if count < 2 {
            return Err(AnimationError::InvalidKeyframeSet { count });
        }
        Ok(animation)
    }

    /// Append a keyframe; keyframes must be added in time order
    pub fn add_keyframe(&mut self, keyframe: Keyframe) -> Result<(), AnimationError> {
        self.inner.hooks_mut().add_keyframe(keyframe)
    }

    /// Remove the keyframe at `index`
    ///
    /// At least two keyframes must remain. The active interval is rebuilt so
    /// it brackets the current age in the shortened sequence.
    pub fn remove_keyframe(&mut self, index: usize) -> Result<Keyframe, AnimationError> {
        let (state, track) = self.inner.parts_mut();
        track.remove_keyframe(index, state.age)
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        self.inner.hooks().keyframes()
    }

    /// `(from, to)` indices of the interval being interpolated
    pub fn active_indices(&self) -> (usize, usize) {
        self.inner.hooks().active_indices()
    }

    pub fn time_scale(&self) -> f64 {
        self.inner.hooks().time_scale()
    }

    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.inner.hooks_mut().set_time_scale(time_scale);
    }

    pub fn accumulation(&self) -> AgeAccumulation {
        self.inner.hooks().accumulation()
    }

    pub fn set_accumulation(&mut self, accumulation: AgeAccumulation) {
        self.inner.hooks_mut().set_accumulation(accumulation);
    }

    /// Back to age 0 on the first interval, posed at the first keyframe
    pub fn rewind(&mut self) {
        let (state, track) = self.inner.parts_mut();
        track.rewind();
        state.reset_time();
        state.pose = track
            .keyframes()
            .first()
            .map_or(Pose::IDENTITY, Keyframe::pose);
    }

    /// Advance by `dt` milliseconds
    ///
    /// On error the pose from the previous tick is kept, so the caller can keep
    /// drawing while it disables or resets the animation.
    pub fn tick(&mut self, dt: f64) -> Result<(), AnimationError> {
        self.inner.tick(dt)
    }

    pub fn play(&mut self) {
        self.inner.play();
    }

    pub fn pause(&mut self) {
        self.inner.pause();
    }

    pub fn mode(&self) -> PlaybackMode {
        self.inner.mode()
    }

    pub fn is_playing(&self) -> bool {
        self.inner.is_playing()
    }

    pub fn age(&self) -> f64 {
        self.inner.age()
    }

    pub fn pose(&self) -> &Pose {
        self.inner.pose()
    }

    pub fn position(&self) -> Vector3 {
        self.inner.pose().position
    }

    pub fn rotation(&self) -> Quaternion {
        self.inner.pose().rotation
    }

    pub fn scale(&self) -> Vector3 {
        self.inner.pose().scale
    }
}

impl Default for KeyframeAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for KeyframeAnimation {
    fn tick(&mut self, dt: f64) -> Result<(), AnimationError> {
        Self::tick(self, dt)
    }

    fn play(&mut self) {
        Self::play(self);
    }

    fn pause(&mut self) {
        Self::pause(self);
    }

    fn is_playing(&self) -> bool {
        Self::is_playing(self)
    }

    fn age(&self) -> f64 {
        Self::age(self)
    }

    fn pose(&self) -> &Pose {
        Self::pose(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyframe_at(x: f32, at_time: f64) -> Keyframe {
        Keyframe::new(
            Vector3::new(x, 0.0, 0.0),
            Quaternion::IDENTITY,
            Vector3::ONE,
            at_time,
        )
    }

    fn two_keyframes() -> KeyframeAnimation {
        KeyframeAnimation::with_keyframes(
            [keyframe_at(0.0, 0.0), keyframe_at(10.0, 1000.0)],
            KeyframeAnimationConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_keyframe_at_seconds() {
        let k = Keyframe::at_seconds(Vector3::ZERO, Quaternion::IDENTITY, Vector3::ONE, 1.5);
        assert_eq!(k.at_time, 1500.0);
    }

    #[test]
    fn test_keyframe_from_euler() {
        let k = Keyframe::from_euler_degrees(
            Vector3::ZERO,
            Vector3::new(90.0, 0.0, 0.0),
            Vector3::ONE,
            0.0,
        );
        assert!(
            k.rotation
                .approx_eq(&Quaternion::from_axis_angle_degrees(Vector3::Y, 90.0))
        );
    }

    #[test]
    fn test_interpolates_midpoint() {
        let mut animation = two_keyframes();
        animation.tick(500.0).unwrap();
        assert!(animation.position().approx_eq(Vector3::new(5.0, 0.0, 0.0)));
        assert_eq!(animation.age(), 500.0);
    }

    #[test]
    fn test_add_out_of_order_rejected() {
        let mut animation = KeyframeAnimation::new();
        animation.add_keyframe(keyframe_at(0.0, 100.0)).unwrap();
        assert_eq!(
            animation.add_keyframe(keyframe_at(0.0, 50.0)),
            Err(AnimationError::KeyframeOutOfOrder {
                previous: 100.0,
                at_time: 50.0
            })
        );
        assert!(animation.add_keyframe(keyframe_at(0.0, f64::NAN)).is_err());
        assert_eq!(animation.keyframes().len(), 1);
    }

    #[test]
    fn test_equal_times_accepted() {
        let mut animation = KeyframeAnimation::new();
        animation.add_keyframe(keyframe_at(0.0, 100.0)).unwrap();
        animation.add_keyframe(keyframe_at(1.0, 100.0)).unwrap();
        assert_eq!(animation.keyframes().len(), 2);
    }

    #[test]
    fn test_tick_without_keyframes_fails() {
        let mut animation = KeyframeAnimation::new();
        animation.add_keyframe(keyframe_at(0.0, 0.0)).unwrap();
        assert_eq!(
            animation.tick(16.0),
            Err(AnimationError::InvalidKeyframeSet { count: 1 })
        );
        assert_eq!(*animation.pose(), Pose::IDENTITY);
    }

    #[test]
    fn test_with_keyframes_requires_two() {
        let result =
            KeyframeAnimation::with_keyframes([keyframe_at(0.0, 0.0)], Default::default());
        assert_eq!(
            result.err(),
            Some(AnimationError::InvalidKeyframeSet { count: 1 })
        );
    }

    #[test]
    fn test_zero_duration_interval() {
        let mut animation = KeyframeAnimation::with_keyframes(
            [
                keyframe_at(0.0, 0.0),
                keyframe_at(1.0, 500.0),
                keyframe_at(2.0, 500.0),
                keyframe_at(3.0, 1000.0),
            ],
            Default::default(),
        )
        .unwrap();

        animation.tick(250.0).unwrap();
        let before = *animation.pose();

        // Crossing 500 ms lands on the zero-length 1 -> 2 interval
        assert_eq!(
            animation.tick(300.0),
            Err(AnimationError::DivisionByZero {
                from: 1,
                to: 2,
                at_time: 500.0
            })
        );
        assert_eq!(*animation.pose(), before);

        // The next tick moves past it
        animation.tick(100.0).unwrap();
        assert_eq!(animation.active_indices(), (2, 3));
        assert!(animation.position().approx_eq(Vector3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_append_on_loop_back_interval() {
        let mut animation = KeyframeAnimation::with_keyframes(
            [
                keyframe_at(0.0, 0.0),
                keyframe_at(1.0, 500.0),
                keyframe_at(2.0, 1000.0),
            ],
            Default::default(),
        )
        .unwrap();
        animation.tick(600.0).unwrap();
        animation.tick(600.0).unwrap();
        assert_eq!(animation.active_indices(), (2, 0));

        // The interval now ends at the new keyframe instead of wrapping
        animation.add_keyframe(keyframe_at(3.0, 1500.0)).unwrap();
        assert_eq!(animation.active_indices(), (2, 3));

        animation.tick(100.0).unwrap();
        assert!(animation.position().approx_eq(Vector3::new(2.2, 0.0, 0.0)));

        animation.tick(400.0).unwrap();
        assert_eq!(animation.active_indices(), (3, 0));
        animation.tick(1.0).unwrap();
        assert_eq!(animation.active_indices(), (0, 1));
        animation.tick(250.0).unwrap();
        assert_eq!(animation.active_indices(), (0, 1));
        assert!(animation.position().approx_eq(Vector3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_time_scale() {
        let mut animation = two_keyframes();
        animation.set_time_scale(2.0);
        animation.tick(200.0).unwrap();
        assert_eq!(animation.age(), 400.0);
        assert!(animation.position().approx_eq(Vector3::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn test_legacy_accumulation() {
        let mut animation = two_keyframes();
        animation.set_accumulation(AgeAccumulation::Legacy);
        animation.set_time_scale(0.5);
        animation.tick(200.0).unwrap();

        // 200 from the base step plus 200 * 0.5 from the core update
        assert_eq!(animation.age(), 300.0);
        assert!(animation.position().approx_eq(Vector3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_remove_keyframe_rebuilds_interval() {
        let mut animation = KeyframeAnimation::with_keyframes(
            [
                keyframe_at(0.0, 0.0),
                keyframe_at(1.0, 1000.0),
                keyframe_at(2.0, 2000.0),
                keyframe_at(3.0, 3000.0),
            ],
            Default::default(),
        )
        .unwrap();

        animation.tick(1000.0).unwrap();
        animation.tick(500.0).unwrap();
        assert_eq!(animation.active_indices(), (1, 2));

        let removed = animation.remove_keyframe(0).unwrap();
        assert_eq!(removed.at_time, 0.0);
        // Age 1500 now sits between the keyframes at 1000 and 2000 (indices 0, 1)
        assert_eq!(animation.active_indices(), (0, 1));

        animation.tick(250.0).unwrap();
        assert!(animation.position().approx_eq(Vector3::new(1.75, 0.0, 0.0)));
    }

    #[test]
    fn test_remove_keyframe_errors() {
        let mut animation = two_keyframes();
        assert_eq!(
            animation.remove_keyframe(5),
            Err(AnimationError::KeyframeIndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(
            animation.remove_keyframe(0),
            Err(AnimationError::InvalidKeyframeSet { count: 1 })
        );
        assert_eq!(animation.keyframes().len(), 2);
    }

    #[test]
    fn test_rewind() {
        let mut animation = two_keyframes();
        animation.tick(700.0).unwrap();
        animation.rewind();
        assert_eq!(animation.age(), 0.0);
        assert_eq!(animation.active_indices(), (0, 1));
        assert_eq!(animation.position(), Vector3::ZERO);
    }
}
