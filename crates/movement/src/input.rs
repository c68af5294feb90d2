use glam::Vec2;

use crate::movement::JumpKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpEdge {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy)]
struct Subscription {
    id: BindingId,
    owner: JumpKind,
}

/// Jump-edge subscriptions plus the sampled analog axis.
///
/// An edge is routed to every live subscription; the controller hands it to
/// the engine whose slot owns that binding.
#[derive(Debug)]
pub struct InputRouter {
    subscriptions: Vec<Subscription>,
    next_id: u32,
    enabled: bool,
    move_axis: Vec2,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputRouter {
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 1,
            enabled: true,
            move_axis: Vec2::ZERO,
        }
    }

    pub fn bind(&mut self, owner: JumpKind) -> BindingId {
        let id = BindingId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscriptions.push(Subscription { id, owner });
        log::debug!("bound jump input {:?} to {}", id, owner.name());
        id
    }

    pub fn unbind(&mut self, id: BindingId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        let removed = self.subscriptions.len() != before;
        if removed {
            log::debug!("unbound jump input {:?}", id);
        }
        removed
    }

    pub fn binding_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn owners(&self) -> impl Iterator<Item = JumpKind> + '_ {
        self.subscriptions.iter().map(|s| s.owner)
    }

    /// Bindings that receive `edge` right now. Empty while disabled.
    pub fn route(&self, edge: JumpEdge) -> impl Iterator<Item = BindingId> + '_ {
        if !self.enabled {
            log::trace!("dropping {edge:?}: input disabled");
        }
        self.subscriptions
            .iter()
            .filter(|_| self.enabled)
            .map(|s| s.id)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.move_axis = Vec2::ZERO;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_move_axis(&mut self, axis: Vec2) {
        if self.enabled {
            self.move_axis = axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
        }
    }

    pub fn move_axis(&self) -> Vec2 {
        self.move_axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_and_unbind() {
        let mut router = InputRouter::new();
        let a = router.bind(JumpKind::Standard);
        let b = router.bind(JumpKind::GroundPound);

        assert_ne!(a, b);
        assert_eq!(router.route(JumpEdge::Pressed).collect::<Vec<_>>(), vec![a, b]);
        assert!(router.unbind(a));
        assert!(!router.unbind(a));
        assert_eq!(router.owners().collect::<Vec<_>>(), vec![JumpKind::GroundPound]);
    }

    #[test]
    fn disabled_router_delivers_nothing() {
        let mut router = InputRouter::new();
        let id = router.bind(JumpKind::Standard);
        router.set_move_axis(Vec2::new(0.5, 0.0));

        router.set_enabled(false);
        assert_eq!(router.route(JumpEdge::Released).count(), 0);
        assert_eq!(router.move_axis(), Vec2::ZERO);

        router.set_move_axis(Vec2::X);
        assert_eq!(router.move_axis(), Vec2::ZERO);

        router.set_enabled(true);
        assert_eq!(router.route(JumpEdge::Released).collect::<Vec<_>>(), vec![id]);
    }

    #[test]
    fn axis_is_clamped() {
        let mut router = InputRouter::new();
        router.set_move_axis(Vec2::new(3.0, -2.0));
        assert_eq!(router.move_axis(), Vec2::new(1.0, -1.0));
    }
}
