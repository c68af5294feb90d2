use crate::movement::{JumpEngine, JumpKind, MovementController};

/// Something an inventory hands to its owner's controller when stored and
/// takes back when removed.
pub trait InventoryItem {
    fn id(&self) -> &str;

    fn on_stored(&mut self, controller: &mut MovementController);

    fn on_removed(&mut self, controller: &mut MovementController);
}

/// Replaces the owner's jump engine while held.
pub struct JumpPowerUp {
    id: String,
    kind: JumpKind,
    make_engine: Box<dyn Fn() -> Box<dyn JumpEngine>>,
}

impl JumpPowerUp {
    pub fn new<E, F>(id: impl Into<String>, make_engine: F) -> Self
    where
        E: JumpEngine + 'static,
        F: Fn() -> E + 'static,
    {
        let kind = make_engine().kind();
        Self {
            id: id.into(),
            kind,
            make_engine: Box::new(move || -> Box<dyn JumpEngine> { Box::new(make_engine()) }),
        }
    }

    pub fn kind(&self) -> JumpKind {
        self.kind
    }
}

impl InventoryItem for JumpPowerUp {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_stored(&mut self, controller: &mut MovementController) {
        log::debug!("power-up {} stored", self.id);
        controller.push_jump((self.make_engine)());
    }

    fn on_removed(&mut self, controller: &mut MovementController) {
        // Another item swapped the engine since; leave it in place.
        if controller.jump_kind() != Some(self.kind) {
            return;
        }
        log::debug!("power-up {} removed", self.id);
        controller.pop_jump();
    }
}
