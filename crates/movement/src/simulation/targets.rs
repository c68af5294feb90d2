use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::physics::{BodyId, DamageRouter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub health: f32,
}

impl Target {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Damageable targets keyed by the physics body that represents them.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: HashMap<BodyId, Target>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn insert(&mut self, body: BodyId, health: f32) {
        self.targets.insert(body, Target { health });
    }

    pub fn get(&self, body: BodyId) -> Option<&Target> {
        self.targets.get(&body)
    }

    pub fn alive(&self) -> usize {
        self.targets.values().filter(|t| t.is_alive()).count()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl DamageRouter for TargetRegistry {
    fn deal_damage(&mut self, target: BodyId, amount: f32) -> bool {
        let Some(entry) = self.targets.get_mut(&target) else {
            return false;
        };
        if !entry.is_alive() {
            return false;
        }

        entry.health = (entry.health - amount).max(0.0);
        if !entry.is_alive() {
            log::info!("target {:?} destroyed", target);
        }
        true
    }
}

impl DamageRouter for Rc<RefCell<TargetRegistry>> {
    fn deal_damage(&mut self, target: BodyId, amount: f32) -> bool {
        self.borrow_mut().deal_damage(target, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_reduces_health_to_zero() {
        let mut registry = TargetRegistry::new();
        registry.insert(BodyId(1), 2.0);

        assert!(registry.deal_damage(BodyId(1), 1.5));
        assert!(registry.deal_damage(BodyId(1), 1.5));
        assert_eq!(registry.get(BodyId(1)).map(|t| t.health), Some(0.0));
        assert!(!registry.deal_damage(BodyId(1), 1.0));
        assert_eq!(registry.alive(), 0);
    }

    #[test]
    fn unknown_target_is_ignored() {
        let mut registry = TargetRegistry::new();
        assert!(!registry.deal_damage(BodyId(9), 1.0));
    }

    #[test]
    fn shared_handle_routes_damage() {
        let shared = TargetRegistry::shared();
        shared.borrow_mut().insert(BodyId(3), 1.0);

        let mut router: Box<dyn DamageRouter> = Box::new(Rc::clone(&shared));
        assert!(router.deal_damage(BodyId(3), 1.0));
        assert_eq!(shared.borrow().alive(), 0);
    }
}
