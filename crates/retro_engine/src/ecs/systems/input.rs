//! Input system
//!
//! Turns pad state into velocity for entities with an
//! [`InputProfileComponent`]. The host polls its input device and writes the
//! held buttons into a [`PadState`]; the system reads the same handle every
//! tick. Jumps trigger on the tick the jump button goes down.

use crate::component_kinds;
use crate::ecs::components::{InputProfileComponent, MovementAxes, PadButtons, VelocityComponent};
use crate::ecs::{Component, ComponentKind, Entity, System, SystemError};
use std::cell::Cell;
use std::rc::Rc;

/// Shared handle to the buttons currently held
///
/// Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct PadState {
    held: Rc<Cell<PadButtons>>,
}

impl PadState {
    /// Nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held set
    pub fn set(&self, buttons: PadButtons) {
        self.held.set(buttons);
    }

    /// Mark buttons as held
    pub fn press(&self, buttons: PadButtons) {
        self.held.set(self.held.get() | buttons);
    }

    /// Mark buttons as released
    pub fn release(&self, buttons: PadButtons) {
        self.held.set(self.held.get() - buttons);
    }

    /// Currently held buttons
    pub fn held(&self) -> PadButtons {
        self.held.get()
    }
}

/// Applies pad input to velocity
pub struct InputSystem {
    required: Vec<ComponentKind>,
    pad: PadState,
    previous: PadButtons,
}

impl InputSystem {
    /// Registered name
    pub const NAME: &'static str = "input";

    /// Create an input system reading `pad`
    pub fn new(pad: PadState) -> Self {
        Self {
            required: component_kinds![InputProfileComponent, VelocityComponent],
            pad,
            previous: PadButtons::empty(),
        }
    }

    fn axis(held: PadButtons, negative: PadButtons, positive: PadButtons) -> f32 {
        match (held.contains(negative), held.contains(positive)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

impl System for InputSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn required_components(&self) -> &[ComponentKind] {
        &self.required
    }

    fn update(&mut self, entities: &mut [&mut Entity], _delta_time: f32) -> Result<(), SystemError> {
        let held = self.pad.held();
        let pressed = held - self.previous;
        self.previous = held;

        let horizontal = Self::axis(held, PadButtons::LEFT, PadButtons::RIGHT);
        let vertical = Self::axis(held, PadButtons::UP, PadButtons::DOWN);

        for entity in entities.iter_mut() {
            let id = entity.id();
            let profile = *entity
                .get_component::<InputProfileComponent>()
                .ok_or_else(|| SystemError::missing(Self::NAME, id, InputProfileComponent::NAME))?;
            if !profile.enabled {
                continue;
            }

            let velocity = entity
                .get_component_mut::<VelocityComponent>()
                .ok_or_else(|| SystemError::missing(Self::NAME, id, VelocityComponent::NAME))?;

            velocity.linear.x = horizontal * profile.move_speed;
            if profile.axes == MovementAxes::Both {
                velocity.linear.y = vertical * profile.move_speed;
            }
            if let Some(jump_speed) = profile.jump_speed {
                if pressed.intersects(profile.jump_button) {
                    velocity.linear.y = -jump_speed;
                }
            }
        }
        Ok(())
    }
}
