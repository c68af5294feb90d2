use glam::Vec2;
use rapier3d::prelude::*;

use super::{Axis, BodyId, BodyMode, CharacterPhysics, ColliderId, LayerMask};

const PLANE_HALF_DEPTH: Real = 0.5;

/// Rapier world restricted to the XY plane. Collider layers live in the low
/// bits of the collider's `user_data`.
pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    integration_parameters: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    gravity: Vector,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(60)
    }
}

impl PhysicsWorld {
    pub fn new(tick_rate: u32) -> Self {
        let dt = 1.0 / tick_rate.max(1) as Real;
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = dt;
        integration_parameters.min_ccd_dt = dt / 100.0;

        Self {
            pipeline: PhysicsPipeline::new(),
            integration_parameters,
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity: Vector::new(0.0, -9.81, 0.0),
        }
    }

    /// Steps the simulation and clears user forces so `apply_force` acts for
    /// exactly one tick.
    pub fn step(&mut self) {
        self.pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );

        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces(false);
        }
    }

    pub fn add_character(&mut self, position: Vec2, radius: Real, height: Real) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(position.x, position.y, 0.0))
            .lock_rotations()
            .enabled_translations(true, true, false)
            .ccd_enabled(true)
            .build();

        let handle = self.bodies.insert(body);

        let half_height = (height / 2.0 - radius).max(0.0);
        let collider = ColliderBuilder::capsule_y(half_height, radius)
            .mass(1.0)
            .friction(0.0)
            .user_data(LayerMask::PLAYER.bits() as u128)
            .build();

        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        handle
    }

    pub fn add_static_box(
        &mut self,
        position: Vec2,
        half_extents: Vec2,
        layers: LayerMask,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, PLANE_HALF_DEPTH)
            .translation(Vector::new(position.x, position.y, 0.0))
            .user_data(layers.bits() as u128)
            .build();
        self.colliders.insert(collider)
    }

    pub fn add_ground(&mut self, y: Real, half_width: Real) -> ColliderHandle {
        self.add_static_box(
            Vec2::new(0.0, y),
            Vec2::new(half_width, 0.1),
            LayerMask::GROUND,
        )
    }

    pub fn add_dynamic_box(
        &mut self,
        position: Vec2,
        half_extents: Vec2,
        mass: Real,
        layers: LayerMask,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(position.x, position.y, 0.0))
            .lock_rotations()
            .enabled_translations(true, true, false)
            .build();

        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, PLANE_HALF_DEPTH)
            .mass(mass)
            .friction(0.5)
            .user_data(layers.bits() as u128)
            .build();

        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        handle
    }

    pub fn set_body_position(&mut self, handle: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            let current_rot = *body.rotation();
            let new_pose = Pose::from_parts(Vector::new(position.x, position.y, 0.0), current_rot);
            body.set_position(new_pose, true);
        }
    }

    pub fn set_body_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linvel(Vector::new(velocity.x, velocity.y, 0.0), true);
        }
    }

    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.apply_impulse(Vector::new(impulse.x, impulse.y, 0.0), true);
        }
    }

    pub fn add_force(&mut self, handle: RigidBodyHandle, force: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.add_force(Vector::new(force.x, force.y, 0.0), true);
        }
    }

    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| {
            let t = b.translation();
            Vec2::new(t.x, t.y)
        })
    }

    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| {
            let v = b.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    pub fn body_mode(&self, handle: RigidBodyHandle) -> Option<BodyMode> {
        self.bodies.get(handle).map(|b| match b.body_type() {
            RigidBodyType::Fixed => BodyMode::Static,
            _ => BodyMode::Dynamic,
        })
    }

    pub fn set_body_mode(&mut self, handle: RigidBodyHandle, mode: BodyMode) {
        if let Some(body) = self.bodies.get_mut(handle) {
            let body_type = match mode {
                BodyMode::Dynamic => RigidBodyType::Dynamic,
                BodyMode::Static => RigidBodyType::Fixed,
            };
            body.set_body_type(body_type, true);
        }
    }

    /// Colliders on `mask` overlapping a circle in the plane, skipping those
    /// attached to `exclude`.
    pub fn overlap_circle(
        &self,
        center: Vec2,
        radius: Real,
        mask: LayerMask,
        exclude: Option<RigidBodyHandle>,
    ) -> Vec<(ColliderHandle, Option<RigidBodyHandle>)> {
        let filter = match exclude {
            Some(handle) => QueryFilter::default().exclude_rigid_body(handle),
            None => QueryFilter::default(),
        };
        let query = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        );

        let shape = SharedShape::ball(radius);
        let identity = Rotation::from_xyzw(0.0, 0.0, 0.0, 1.0).normalize();
        let pose = Pose::from_parts(Vector::new(center.x, center.y, 0.0), identity);

        query
            .intersect_shape(pose, shape.as_ref())
            .filter(|(_, collider)| collider_layers(collider).intersects(mask))
            .map(|(handle, collider)| (handle, collider.parent()))
            .collect()
    }
}

fn collider_layers(collider: &Collider) -> LayerMask {
    LayerMask::from_bits_truncate(collider.user_data as u32)
}

pub fn body_id(handle: RigidBodyHandle) -> BodyId {
    let (index, generation) = handle.into_raw_parts();
    BodyId(((generation as u64) << 32) | index as u64)
}

pub fn collider_id(handle: ColliderHandle) -> ColliderId {
    let (index, generation) = handle.into_raw_parts();
    ColliderId(((generation as u64) << 32) | index as u64)
}

/// One character's view of a [`PhysicsWorld`].
pub struct RapierCharacter<'w> {
    world: &'w mut PhysicsWorld,
    handle: RigidBodyHandle,
}

impl<'w> RapierCharacter<'w> {
    pub fn new(world: &'w mut PhysicsWorld, handle: RigidBodyHandle) -> Self {
        Self { world, handle }
    }
}

impl CharacterPhysics for RapierCharacter<'_> {
    fn position(&self) -> Vec2 {
        self.world.body_position(self.handle).unwrap_or(Vec2::ZERO)
    }

    fn velocity(&self) -> Vec2 {
        self.world.body_velocity(self.handle).unwrap_or(Vec2::ZERO)
    }

    fn set_position(&mut self, position: Vec2) {
        self.world.set_body_position(self.handle, position);
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.world.set_body_velocity(self.handle, velocity);
    }

    fn apply_impulse(&mut self, axis: Axis, magnitude: f32) {
        self.world.apply_impulse(self.handle, axis.unit() * magnitude);
    }

    fn apply_force(&mut self, axis: Axis, magnitude: f32) {
        self.world.add_force(self.handle, axis.unit() * magnitude);
    }

    fn body_mode(&self) -> BodyMode {
        self.world.body_mode(self.handle).unwrap_or_default()
    }

    fn set_body_mode(&mut self, mode: BodyMode) {
        self.world.set_body_mode(self.handle, mode);
    }

    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Option<ColliderId> {
        self.world
            .overlap_circle(center, radius, mask, Some(self.handle))
            .first()
            .map(|(handle, _)| collider_id(*handle))
    }

    fn overlap_circle_multi(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<BodyId> {
        self.world
            .overlap_circle(center, radius, mask, Some(self.handle))
            .into_iter()
            .filter_map(|(_, parent)| parent.map(body_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_overlap_is_layer_filtered() {
        let mut world = PhysicsWorld::new(60);
        world.add_ground(0.0, 10.0);
        world.add_static_box(Vec2::new(5.0, 0.0), Vec2::splat(0.5), LayerMask::HAZARD);
        world.step();

        let ground = world.overlap_circle(Vec2::new(0.0, 0.05), 0.15, LayerMask::GROUND, None);
        assert_eq!(ground.len(), 1);

        let none = world.overlap_circle(Vec2::new(0.0, 3.0), 0.15, LayerMask::GROUND, None);
        assert!(none.is_empty());

        // Above the ground slab, inside the hazard box.
        let masked = world.overlap_circle(Vec2::new(5.0, 0.4), 0.05, LayerMask::GROUND, None);
        assert!(masked.is_empty());

        let hazard = world.overlap_circle(Vec2::new(5.0, 0.4), 0.05, LayerMask::HAZARD, None);
        assert_eq!(hazard.len(), 1);
    }

    #[test]
    fn character_view_moves_and_freezes_body() {
        let mut world = PhysicsWorld::new(60);
        let handle = world.add_character(Vec2::new(0.0, 2.0), 0.3, 1.0);

        let mut character = RapierCharacter::new(&mut world, handle);
        character.set_position(Vec2::new(4.0, 6.0));
        character.set_velocity(Vec2::new(1.0, 0.0));
        character.set_body_mode(BodyMode::Static);

        assert_eq!(character.position(), Vec2::new(4.0, 6.0));
        assert_eq!(character.body_mode(), BodyMode::Static);

        character.set_body_mode(BodyMode::Dynamic);
        assert_eq!(character.body_mode(), BodyMode::Dynamic);
    }

    #[test]
    fn body_ids_are_stable_per_handle() {
        let mut world = PhysicsWorld::new(60);
        let a = world.add_dynamic_box(Vec2::ZERO, Vec2::splat(0.5), 1.0, LayerMask::DAMAGEABLE);
        let b = world.add_dynamic_box(Vec2::X * 3.0, Vec2::splat(0.5), 1.0, LayerMask::DAMAGEABLE);

        assert_eq!(body_id(a), body_id(a));
        assert_ne!(body_id(a), body_id(b));
    }
}
