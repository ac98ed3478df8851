//! Input Actions
//!
//! Platform-agnostic input actions and the [`PlayerIntent`] they fold into.
//! Human input and bot controllers both produce a `PlayerIntent`, so the
//! simulation never needs to know who is driving a player.

use glam::Vec2;

use crate::game::building::{BuildMaterial, StructureKind};
use crate::player::MovementIntent;

/// Held movement keys
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub crouch: bool,
}

impl MovementState {
    /// Strafe (x) and forward (y) axes in `[-1, 1]`.
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.forward { axis.y += 1.0; }
        if self.backward { axis.y -= 1.0; }
        if self.right { axis.x += 1.0; }
        if self.left { axis.x -= 1.0; }
        axis
    }
}

/// High-level input action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Movement key pressed/released
    Movement(MovementKey, bool),
    /// Sprint held state
    Sprint(bool),
    /// Crouch held state
    Crouch(bool),
    Jump,
    /// Trigger held state
    Fire(bool),
    Reload,
    /// Select weapon slot (0-based)
    SelectWeapon(usize),
    ToggleBuildMode,
    BuildConfirm,
    RotateBuild,
    SelectStructure(StructureKind),
    SelectMaterial(BuildMaterial),
    /// Mouse look delta in radians
    Look { yaw: f32, pitch: f32 },
}

/// Movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKey {
    Forward,
    Backward,
    Left,
    Right,
}

/// Everything one player wants to do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerIntent {
    pub movement: MovementIntent,
    /// Look delta: x = yaw, y = pitch (radians, positive pitch looks up)
    pub look_delta: Vec2,
    pub fire: bool,
    pub reload: bool,
    pub select_weapon: Option<usize>,
    pub toggle_build: bool,
    pub build_confirm: bool,
    pub rotate_build: bool,
    pub select_structure: Option<StructureKind>,
    pub select_material: Option<BuildMaterial>,
}

/// Folds a stream of [`InputAction`]s into one [`PlayerIntent`] per frame.
///
/// Held state (movement keys, sprint, crouch, trigger) persists across
/// frames; one-shot actions are cleared by [`take_intent`](Self::take_intent).
#[derive(Debug, Clone, Default)]
pub struct IntentAccumulator {
    held: MovementState,
    firing: bool,
    pending: PlayerIntent,
}

impl IntentAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::Movement(key, pressed) => match key {
                MovementKey::Forward => self.held.forward = pressed,
                MovementKey::Backward => self.held.backward = pressed,
                MovementKey::Left => self.held.left = pressed,
                MovementKey::Right => self.held.right = pressed,
            },
            InputAction::Sprint(held) => self.held.sprint = held,
            InputAction::Crouch(held) => self.held.crouch = held,
            InputAction::Jump => self.pending.movement.jump = true,
            InputAction::Fire(held) => self.firing = held,
            InputAction::Reload => self.pending.reload = true,
            InputAction::SelectWeapon(slot) => self.pending.select_weapon = Some(slot),
            InputAction::ToggleBuildMode => self.pending.toggle_build = !self.pending.toggle_build,
            InputAction::BuildConfirm => self.pending.build_confirm = true,
            InputAction::RotateBuild => self.pending.rotate_build = true,
            InputAction::SelectStructure(kind) => self.pending.select_structure = Some(kind),
            InputAction::SelectMaterial(material) => self.pending.select_material = Some(material),
            InputAction::Look { yaw, pitch } => self.pending.look_delta += Vec2::new(yaw, pitch),
        }
    }

    /// Produce this frame's intent and reset one-shot actions.
    pub fn take_intent(&mut self) -> PlayerIntent {
        let mut intent = std::mem::take(&mut self.pending);
        intent.movement.axis = self.held.axis();
        intent.movement.sprint = self.held.sprint;
        intent.movement.crouch = self.held.crouch;
        intent.fire = self.firing;
        intent
    }
}
