//! Procedural animation: a play/pause state machine with update hooks
//!
//! A [`ProceduralAnimation`] owns the age and output pose and runs the tick
//! sequence. What actually moves is decided by its [`AnimationHooks`]:
//!
//! ```text
//! pre_update -> age += age_step(dt) -> update -> update_position
//!            -> update_rotation -> update_scale -> post_update
//! ```
//!
//! The position/rotation/scale hooks always run after the age has advanced
//! and the core update has finished.

use super::state::{AnimationState, PlaybackMode};
use crate::error::AnimationError;
use crate::object_state::Pose;

/// Override points for a procedural animation
///
/// Every hook defaults to a no-op. A failing hook aborts the rest of the tick.
#[allow(unused_variables)]
pub trait AnimationHooks {
    /// Called before the age advances
    fn pre_update(&mut self, state: &mut AnimationState, dt: f64) -> Result<(), AnimationError> {
        Ok(())
    }

    /// Milliseconds added to the age for a tick of `dt`
    fn age_step(&self, dt: f64) -> f64 {
        dt
    }

    /// Core update, run right after the age advances
    fn update(&mut self, state: &mut AnimationState, dt: f64) -> Result<(), AnimationError> {
        Ok(())
    }

    fn update_position(
        &mut self,
        state: &mut AnimationState,
        dt: f64,
    ) -> Result<(), AnimationError> {
        Ok(())
    }

    fn update_rotation(
        &mut self,
        state: &mut AnimationState,
        dt: f64,
    ) -> Result<(), AnimationError> {
        Ok(())
    }

    fn update_scale(&mut self, state: &mut AnimationState, dt: f64) -> Result<(), AnimationError> {
        Ok(())
    }

    /// Called after all other hooks
    fn post_update(&mut self, state: &mut AnimationState, dt: f64) -> Result<(), AnimationError> {
        Ok(())
    }
}

/// Hooks that leave the pose alone; the animation only ages
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl AnimationHooks for NoopHooks {}

/// Capability shared by all animations, for driving them from a render loop
pub trait Animation {
    /// Advance by `dt` milliseconds
    fn tick(&mut self, dt: f64) -> Result<(), AnimationError>;

    fn play(&mut self);

    fn pause(&mut self);

    fn is_playing(&self) -> bool;

    /// Milliseconds since the animation began
    fn age(&self) -> f64;

    /// Output transform of the last successful tick
    fn pose(&self) -> &Pose;
}

/// A procedurally generated animation. Starts playing immediately.
#[derive(Debug, Clone)]
pub struct ProceduralAnimation<H = NoopHooks> {
    state: AnimationState,
    mode: PlaybackMode,
    hooks: H,
}

impl ProceduralAnimation<NoopHooks> {
    pub fn new() -> Self {
        Self::with_hooks(NoopHooks)
    }
}

impl Default for ProceduralAnimation<NoopHooks> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: AnimationHooks> ProceduralAnimation<H> {
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            state: AnimationState::new(),
            mode: PlaybackMode::Playing,
            hooks,
        }
    }

    /// Advance the animation by `dt` milliseconds
    ///
    /// Paused animations ignore the tick.
    pub fn tick(&mut self, dt: f64) -> Result<(), AnimationError> {
        if self.mode == PlaybackMode::Paused {
            return Ok(());
        }

        let state = &mut self.state;
        let hooks = &mut self.hooks;

        hooks.pre_update(state, dt)?;

        state.age += hooks.age_step(dt);

        hooks.update(state, dt)?;

        hooks.update_position(state, dt)?;
        hooks.update_rotation(state, dt)?;
        hooks.update_scale(state, dt)?;

        hooks.post_update(state, dt)
    }

    /// Subsequent ticks advance the animation
    pub fn play(&mut self) {
        self.mode = PlaybackMode::Playing;
    }

    /// Subsequent ticks leave the animation unchanged
    pub fn pause(&mut self) {
        self.mode = PlaybackMode::Paused;
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.mode == PlaybackMode::Playing
    }

    pub fn age(&self) -> f64 {
        self.state.age
    }

    pub fn pose(&self) -> &Pose {
        &self.state.pose
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AnimationState {
        &mut self.state
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Split borrow of the state and the hooks
    pub(crate) fn parts_mut(&mut self) -> (&mut AnimationState, &mut H) {
        (&mut self.state, &mut self.hooks)
    }
}

impl<H: AnimationHooks> Animation for ProceduralAnimation<H> {
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
