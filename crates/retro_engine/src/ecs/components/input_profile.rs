//! Input profile component
//!
//! Describes how an entity reacts to the game pad. Polling the hardware is
//! the host's job; it publishes button state through a
//! [`PadState`](crate::ecs::systems::PadState) that the input system reads.

use crate::ecs::Component;
use bitflags::bitflags;

bitflags! {
    /// Buttons of an eight-button pad
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PadButtons: u8 {
        /// D-pad up
        const UP = 1 << 0;
        /// D-pad down
        const DOWN = 1 << 1;
        /// D-pad left
        const LEFT = 1 << 2;
        /// D-pad right
        const RIGHT = 1 << 3;
        /// Primary face button
        const A = 1 << 4;
        /// Secondary face button
        const B = 1 << 5;
        /// Select
        const SELECT = 1 << 6;
        /// Start
        const START = 1 << 7;
    }
}

/// Which axes the d-pad drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementAxes {
    /// Left/right only; vertical velocity is left to other systems
    Horizontal,
    /// Free movement in both directions (top-down maps, menus)
    Both,
}

/// Pad-driven movement settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputProfileComponent {
    /// D-pad speed in units per second
    pub move_speed: f32,

    /// Axes the d-pad controls
    pub axes: MovementAxes,

    /// Upward speed applied when `jump_button` is pressed (screen y grows downward)
    pub jump_speed: Option<f32>,

    /// Button that triggers a jump
    pub jump_button: PadButtons,

    /// Ignore the pad while unset
    pub enabled: bool,
}

impl Component for InputProfileComponent {
    const NAME: &'static str = "input_profile";
}

impl InputProfileComponent {
    /// Free two-axis movement without jumping
    pub fn new(move_speed: f32) -> Self {
        Self {
            move_speed,
            axes: MovementAxes::Both,
            jump_speed: None,
            jump_button: PadButtons::A,
            enabled: true,
        }
    }
}

/// Input profile factory
pub struct InputProfileFactory;

impl InputProfileFactory {
    /// Side-scroller controls: horizontal d-pad, jump on A
    pub fn platformer(move_speed: f32, jump_speed: f32) -> InputProfileComponent {
        InputProfileComponent {
            axes: MovementAxes::Horizontal,
            jump_speed: Some(jump_speed),
            ..InputProfileComponent::new(move_speed)
        }
    }

    /// Top-down controls for map screens
    pub fn top_down(move_speed: f32) -> InputProfileComponent {
        InputProfileComponent::new(move_speed)
    }
}
