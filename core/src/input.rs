use serde::{Deserialize, Serialize};

use crate::types::AttackType;

/// Platform key code as reported by the input source (SDL keycode values).
pub type KeyCode = u32;

/// Key codes used by the stock bindings.
pub mod key {
    use super::KeyCode;

    pub const A: KeyCode = 'a' as KeyCode;
    pub const D: KeyCode = 'd' as KeyCode;
    pub const J: KeyCode = 'j' as KeyCode;
    pub const K: KeyCode = 'k' as KeyCode;
    pub const L: KeyCode = 'l' as KeyCode;
    pub const W: KeyCode = 'w' as KeyCode;
    pub const COMMA: KeyCode = ',' as KeyCode;
    pub const PERIOD: KeyCode = '.' as KeyCode;
    pub const SLASH: KeyCode = '/' as KeyCode;
    pub const RIGHT: KeyCode = 0x4000_004F;
    pub const LEFT: KeyCode = 0x4000_0050;
    pub const UP: KeyCode = 0x4000_0052;
}

/// Logical action bitmask constants.
pub mod action {
    pub const LEFT: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const PUNCH: u8 = 4;
    pub const KICK: u8 = 8;
    pub const JUMP: u8 = 16;
    pub const FIREBALL: u8 = 32;
}

/// Keys held down during one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySnapshot {
    pub pressed: Vec<KeyCode>,
}

impl KeySnapshot {
    pub fn from_keys(keys: &[KeyCode]) -> Self {
        KeySnapshot {
            pressed: keys.to_vec(),
        }
    }

    pub fn is_down(&self, code: KeyCode) -> bool {
        self.pressed.contains(&code)
    }
}

/// Maps each logical action to the key that triggers it. Unbound actions are
/// never triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlBinding {
    pub left: Option<KeyCode>,
    pub right: Option<KeyCode>,
    pub punch: Option<KeyCode>,
    pub kick: Option<KeyCode>,
    pub jump: Option<KeyCode>,
    pub fireball: Option<KeyCode>,
}

impl ControlBinding {
    /// A/D to walk, W to jump, J/K to punch/kick, L for the fireball.
    pub fn wasd() -> Self {
        ControlBinding {
            left: Some(key::A),
            right: Some(key::D),
            punch: Some(key::J),
            kick: Some(key::K),
            jump: Some(key::W),
            fireball: Some(key::L),
        }
    }

    /// Arrow keys to move and jump, comma/period to punch/kick, slash for the fireball.
    pub fn arrows() -> Self {
        ControlBinding {
            left: Some(key::LEFT),
            right: Some(key::RIGHT),
            punch: Some(key::COMMA),
            kick: Some(key::PERIOD),
            jump: Some(key::UP),
            fireball: Some(key::SLASH),
        }
    }

    /// Collapse a key snapshot into an action bitmask.
    pub fn resolve(&self, keys: &KeySnapshot) -> u8 {
        let bound = [
            (self.left, action::LEFT),
            (self.right, action::RIGHT),
            (self.punch, action::PUNCH),
            (self.kick, action::KICK),
            (self.jump, action::JUMP),
            (self.fireball, action::FIREBALL),
        ];
        bound
            .iter()
            .filter_map(|(code, bit)| code.filter(|c| keys.is_down(*c)).map(|_| *bit))
            .fold(0, |acc, bit| acc | bit)
    }

    pub fn has_any_binding(&self) -> bool {
        [
            self.left,
            self.right,
            self.punch,
            self.kick,
            self.jump,
            self.fireball,
        ]
        .iter()
        .any(Option::is_some)
    }
}

/// What a fighter wants to do this frame, before any legality checks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intent {
    /// Horizontal walking velocity; zero leaves residual momentum to friction.
    pub desired_vx: f64,
    /// Facing override; `None` keeps the current facing.
    pub face_left: Option<bool>,
    pub attack: Option<AttackType>,
    pub jump: bool,
    pub fire: bool,
}

/// Turn an action bitmask into an intent. Right wins over left when both are
/// held, and punch wins over kick.
pub fn intent_from_actions(actions: u8, walk_speed: f64) -> Intent {
    let mut intent = Intent::default();
    if actions & action::LEFT != 0 {
        intent.desired_vx = -walk_speed;
        intent.face_left = Some(true);
    }
    if actions & action::RIGHT != 0 {
        intent.desired_vx = walk_speed;
        intent.face_left = Some(false);
    }
    if actions & action::PUNCH != 0 {
        intent.attack = Some(AttackType::Punch);
    } else if actions & action::KICK != 0 {
        intent.attack = Some(AttackType::Kick);
    }
    intent.jump = actions & action::JUMP != 0;
    intent.fire = actions & action::FIREBALL != 0;
    intent
}
