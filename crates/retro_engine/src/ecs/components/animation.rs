//! Frame animation component
//!
//! Tracks playback position through a strip of `frame_count` frames shown
//! for `frame_time` seconds each. Which sprite a frame maps to is up to the
//! renderer.

use crate::ecs::Component;

/// Frame animation playback state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationComponent {
    /// Current frame index
    pub frame: u32,

    /// Number of frames in the strip
    pub frame_count: u32,

    /// Seconds each frame is shown
    pub frame_time: f32,

    /// Time spent on the current frame
    pub elapsed: f32,

    /// Wrap to frame 0 after the last frame
    pub looping: bool,

    /// Advance on update
    pub playing: bool,
}

impl Component for AnimationComponent {
    const NAME: &'static str = "animation";
}

impl AnimationComponent {
    /// Looping animation starting at frame 0
    pub fn new(frame_count: u32, frame_time: f32) -> Self {
        Self {
            frame: 0,
            frame_count,
            frame_time,
            elapsed: 0.0,
            looping: true,
            playing: true,
        }
    }

    /// Rewind to frame 0 and play
    pub fn restart(&mut self) {
        self.frame = 0;
        self.elapsed = 0.0;
        self.playing = true;
    }

    /// Whether a one-shot animation has reached its last frame and stopped
    pub fn is_finished(&self) -> bool {
        !self.looping && !self.playing && self.frame + 1 >= self.frame_count
    }
}

/// Animation factory
pub struct AnimationFactory;

impl AnimationFactory {
    /// Repeating animation
    pub fn looping(frame_count: u32, frame_time: f32) -> AnimationComponent {
        AnimationComponent::new(frame_count, frame_time)
    }

    /// Animation that stops on its last frame
    pub fn once(frame_count: u32, frame_time: f32) -> AnimationComponent {
        AnimationComponent {
            looping: false,
            ..AnimationComponent::new(frame_count, frame_time)
        }
    }
}
