//! Animation system
//!
//! Advances frame animations by elapsed time. A large `dt` may advance
//! several frames in one tick. One-shot animations stop on their last frame.

use crate::component_kinds;
use crate::ecs::components::AnimationComponent;
use crate::ecs::{ComponentKind, Entity, System, SystemError};

/// Advances [`AnimationComponent`] playback
pub struct AnimationSystem {
    required: Vec<ComponentKind>,
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationSystem {
    /// Registered name
    pub const NAME: &'static str = "animation";

    /// Create an animation system
    pub fn new() -> Self {
        Self {
            required: component_kinds![AnimationComponent],
        }
    }

    fn advance(animation: &mut AnimationComponent, delta_time: f32) {
        if !animation.playing || animation.frame_count == 0 || animation.frame_time <= 0.0 {
            return;
        }

        animation.elapsed += delta_time;
        while animation.elapsed >= animation.frame_time {
            animation.elapsed -= animation.frame_time;
            animation.frame += 1;

            if animation.frame >= animation.frame_count {
                if animation.looping {
                    animation.frame = 0;
                } else {
                    animation.frame = animation.frame_count - 1;
                    animation.elapsed = 0.0;
                    animation.playing = false;
                    break;
                }
            }
        }
    }
}

impl System for AnimationSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn required_components(&self) -> &[ComponentKind] {
        &self.required
    }

    fn update(&mut self, entities: &mut [&mut Entity], delta_time: f32) -> Result<(), SystemError> {
        for entity in entities.iter_mut() {
            if let Some(animation) = entity.get_component_mut::<AnimationComponent>() {
                Self::advance(animation, delta_time);
            }
        }
        Ok(())
    }
}
