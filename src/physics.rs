//! Rigid-sphere simulation on Rapier3D: ball colliders over a fixed ground slab.

use std::fmt;

use glam::Vec3;
use log::debug;
use rapier3d::prelude::*;

use crate::error::SceneError;
use crate::math::Geometry;
use crate::scene::{Material, Node, NodeId, SceneGraph};

pub const EARTH_GRAVITY: Vec3 = Vec3::new(0.0, -9.82, 0.0);

/// Restitution given to new spheres until changed
pub const DEFAULT_RESTITUTION: f32 = 0.7;

/// Half extents of the ground slab; its top face sits at `ground_y`
const GROUND_HALF_EXTENT: f32 = 50.0;
const GROUND_HALF_THICKNESS: f32 = 0.5;

/// Snapshot of one simulated sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Scene node mirroring this body
    pub node: NodeId,
    pub radius: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub restitution: f32,
}

#[derive(Debug, Clone, Copy)]
struct Tracked {
    node: NodeId,
    handle: RigidBodyHandle,
    radius: f32,
}

/// Manages the Rapier3D pipeline and the nodes it drives
pub struct PhysicsWorld {
    gravity: Vec3,
    ground_y: f32,
    restitution: f32,
    tracked: Vec<Tracked>,
    pipeline: PhysicsPipeline,
    integration_parameters: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3, ground_y: f32) -> Self {
        let mut colliders = ColliderSet::new();
        colliders.insert(
            ColliderBuilder::cuboid(GROUND_HALF_EXTENT, GROUND_HALF_THICKNESS, GROUND_HALF_EXTENT)
                .translation(vector![0.0, ground_y - GROUND_HALF_THICKNESS, 0.0])
                .build(),
        );

        Self {
            gravity,
            ground_y,
            restitution: DEFAULT_RESTITUTION,
            tracked: Vec::new(),
            pipeline: PhysicsPipeline::new(),
            integration_parameters: IntegrationParameters::default(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            bodies: RigidBodySet::new(),
            colliders,
            ccd_solver: CCDSolver::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Change gravity and wake sleeping bodies so they feel it
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
        for (_, body) in self.bodies.iter_mut() {
            body.wake_up(true);
        }
    }

    /// Restitution used by spheres added from now on
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Set restitution for new spheres and every existing one
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution.clamp(0.0, 1.0);
        for tracked in &self.tracked {
            let Some(body) = self.bodies.get(tracked.handle) else { continue };
            for &handle in body.colliders() {
                if let Some(collider) = self.colliders.get_mut(handle) {
                    collider.set_restitution(self.restitution);
                }
            }
        }
    }

    /// Current state of every body, in insertion order
    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.tracked.iter().filter_map(|tracked| {
            let body = self.bodies.get(tracked.handle)?;
            let restitution = body
                .colliders()
                .first()
                .and_then(|&handle| self.colliders.get(handle))
                .map_or(self.restitution, |collider| collider.restitution());
            Some(Body {
                node: tracked.node,
                radius: tracked.radius,
                position: to_vec3(body.translation()),
                velocity: to_vec3(body.linvel()),
                restitution,
            })
        })
    }

    /// Body driving `node`, if any
    pub fn body(&self, node: NodeId) -> Option<Body> {
        self.bodies().find(|body| body.node == node)
    }

    /// Track an existing node as a dynamic ball starting at `position`
    pub fn add_body(&mut self, node: NodeId, radius: f32, position: Vec3) {
        let body = RigidBodyBuilder::dynamic().translation(vector![position.x, position.y, position.z]).build();
        let handle = self.bodies.insert(body);

        // the ground keeps zero restitution, so Max lets the ball's own value win
        let collider = ColliderBuilder::ball(radius)
            .restitution(self.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .build();
        self.colliders.insert_with_parent(collider, handle, &mut self.bodies);

        self.tracked.push(Tracked { node, handle, radius });
    }

    /// Create a sphere mesh under `parent` and a body driving it
    pub fn spawn_sphere(
        &mut self,
        scene: &mut SceneGraph,
        parent: NodeId,
        position: Vec3,
        radius: f32,
        material: Material,
    ) -> Result<NodeId, SceneError> {
        let node = scene.add(
            parent,
            Node::mesh(Geometry::sphere(radius), material)
                .named("body")
                .at(position.x, position.y, position.z),
        )?;
        self.add_body(node, radius, position);
        debug!("spawned sphere body {node:?} at {position}");
        Ok(node)
    }

    /// Drop every body and return the nodes they drove
    pub fn clear(&mut self) -> Vec<NodeId> {
        let tracked = std::mem::take(&mut self.tracked);
        tracked
            .into_iter()
            .map(|tracked| {
                self.release(tracked.handle);
                tracked.node
            })
            .collect()
    }

    /// Advance the pipeline by one fixed step of `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;
        let gravity = vector![self.gravity.x, self.gravity.y, self.gravity.z];

        self.pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Copy body positions onto their nodes; bodies whose node is gone are dropped
    pub fn sync(&mut self, scene: &mut SceneGraph) {
        let mut orphans = Vec::new();
        let bodies = &self.bodies;
        self.tracked.retain(|tracked| match scene.get_mut(tracked.node) {
            Some(node) => {
                if let Some(body) = bodies.get(tracked.handle) {
                    node.transform.position = to_vec3(body.translation());
                }
                true
            }
            None => {
                orphans.push(tracked.handle);
                false
            }
        });

        for handle in orphans {
            self.release(handle);
        }
    }

    fn release(&mut self, handle: RigidBodyHandle) {
        let _ = self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(EARTH_GRAVITY, 0.0)
    }
}

impl fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("gravity", &self.gravity)
            .field("ground_y", &self.ground_y)
            .field("restitution", &self.restitution)
            .field("bodies", &self.tracked.len())
            .finish()
    }
}

fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
