//! Health component

use crate::ecs::Component;

/// Hit points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthComponent {
    /// Remaining hit points
    pub current: u32,

    /// Hit points when fully healed
    pub max: u32,

    /// Ignore damage while set
    pub invulnerable: bool,
}

impl Component for HealthComponent {
    const NAME: &'static str = "health";
}

impl HealthComponent {
    /// Full health, vulnerable
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            invulnerable: false,
        }
    }

    /// Apply damage; returns the amount actually taken
    pub fn damage(&mut self, amount: u32) -> u32 {
        if self.invulnerable {
            return 0;
        }
        let taken = amount.min(self.current);
        self.current -= taken;
        taken
    }

    /// Restore hit points up to `max`
    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// Out of hit points
    pub fn is_dead(&self) -> bool {
        self.current == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_starts_full() {
        let health = HealthComponent::new(3);
        assert_eq!(health.current, 3);
        assert_eq!(health.max, 3);
        assert!(!health.invulnerable);
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut health = HealthComponent::new(3);

        assert_eq!(health.damage(5), 3);
        assert!(health.is_dead());

        health.heal(10);
        assert_eq!(health.current, 3);
    }

    #[test]
    fn test_invulnerable_ignores_damage() {
        let mut health = HealthComponent::new(2);
        health.invulnerable = true;

        assert_eq!(health.damage(1), 0);
        assert_eq!(health.current, 2);
    }
}
