use serde::{Deserialize, Serialize};

use crate::constants::variant_stats;
use crate::input::{ControlBinding, KeySnapshot};

// ── Primitives ──────────────────────────────────────────────

pub type FighterId = usize;

/// Axis-aligned rectangle, top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    /// Strict overlap; rectangles that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Fighter identity ────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    Punch,
    Kick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Human,
    Frog,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantStats {
    pub max_health: i32,
    pub walk_speed: f64,
    /// Upward launch speed; applied as a negative vy.
    pub jump_impulse: f64,
}

// ── Animation ───────────────────────────────────────────────

/// Animation keys in sprite-strip order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKey {
    #[default]
    Idle,
    Walk,
    Punch,
    Kick,
    Jump,
}

impl AnimationKey {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_attack(attack: AttackType) -> Self {
        match attack {
            AttackType::Punch => AnimationKey::Punch,
            AttackType::Kick => AnimationKey::Kick,
        }
    }
}

/// Frames per action in a fighter's sprite strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameCounts {
    pub idle: u32,
    pub walk: u32,
    pub punch: u32,
    pub kick: u32,
    pub jump: u32,
}

impl Default for FrameCounts {
    fn default() -> Self {
        FrameCounts {
            idle: 4,
            walk: 4,
            punch: 3,
            kick: 3,
            jump: 3,
        }
    }
}

/// Sprite-strip metadata supplied by the asset loader: square frames laid out
/// in a single row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub frame_size: u32,
    #[serde(default)]
    pub counts: FrameCounts,
}

/// Start offset and length of each animation within the strip, indexed by
/// `AnimationKey::index`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLayout {
    pub offsets: [u32; 5],
    pub counts: [u32; 5],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationCursor {
    pub key: AnimationKey,
    /// Fractional frame position within the current animation.
    pub index: f64,
}

// ── Combo ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboState {
    pub count: u32,
    pub timer: f64,
    pub last_attack: Option<AttackType>,
}

// ── Fighter ─────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub id: FighterId,
    pub is_ai: bool,
    pub variant: Variant,
    pub binding: Option<ControlBinding>,
    pub spawn_x: f64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub width: i32,
    pub height: i32,
    pub health: i32,
    pub max_health: i32,
    pub facing_left: bool,
    /// Attack in progress, `None` when not attacking.
    pub attack: Option<AttackType>,
    pub attack_timer: f64,
    pub attack_duration: f64,
    pub hit_cooldown: f64,
    pub fire_cooldown: f64,
    pub combo: ComboState,
    pub layout: FrameLayout,
    pub anim: AnimationCursor,
}

impl Fighter {
    /// Body rectangle used for collision.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width as f64, self.height as f64)
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width as f64 / 2.0
    }

    pub fn stats(&self) -> VariantStats {
        variant_stats(self.variant)
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_some()
    }

    /// Snapshot consumed by the renderer.
    pub fn view(&self) -> FighterView {
        FighterView {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            facing_left: self.facing_left,
            animation: self.anim.key,
            frame_index: self.frame_index(),
        }
    }
}

/// Everything the rendering collaborator needs to draw one fighter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterView {
    pub x: f64,
    pub y: f64,
    pub width: i32,
    pub height: i32,
    pub facing_left: bool,
    pub animation: AnimationKey,
    /// Absolute frame within the sprite strip.
    pub frame_index: u32,
}

// ── Projectile ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub owner: FighterId,
    /// Center of the projectile.
    pub x: f64,
    pub y: f64,
    /// +1 moving right, -1 moving left.
    pub direction: i8,
    pub speed: f64,
    pub damage: i32,
    pub active: bool,
}

// ── Arena / config ──────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    pub ground_y: f64,
    /// Horizontal extent of the raised platform; fighters move at full speed
    /// only while their center is on it.
    pub platform_left: f64,
    pub platform_right: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterSetup {
    pub variant: Variant,
    pub is_ai: bool,
    pub spawn_x: f64,
    #[serde(default)]
    pub binding: Option<ControlBinding>,
    pub sprite: SpriteSheet,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub arena: ArenaConfig,
    pub fighters: [FighterSetup; 2],
    pub round_duration: f64,
    pub rounds_to_win: u32,
}

// ── Match state ─────────────────────────────────────────────

/// Per-fighter counters that survive round resets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterStats {
    /// Damage dealt over the whole match.
    pub score: u32,
    pub hits: u32,
    pub rounds_won: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Fighting,
    /// Round decided; `linger` seconds remain before the next round starts.
    /// `winner` is `None` for a draw.
    RoundOver {
        winner: Option<FighterId>,
        linger: f64,
    },
    MatchOver {
        winner: Option<FighterId>,
    },
}

/// Edge-triggered notifications raised during a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    AttackStarted {
        fighter: FighterId,
        attack: AttackType,
        variant: Variant,
    },
    FireballLaunched {
        fighter: FighterId,
        projectile: u32,
    },
    Hit {
        attacker: FighterId,
        defender: FighterId,
        attack: AttackType,
        damage: i32,
        combo: u32,
    },
    ProjectileHit {
        owner: FighterId,
        defender: FighterId,
        projectile: u32,
        damage: i32,
    },
    RoundOver {
        round: u32,
        winner: Option<FighterId>,
    },
    MatchOver {
        winner: Option<FighterId>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub frame: u64,
    pub round: u32,
    /// Seconds left in the current round.
    pub round_timer: f64,
    pub fighters: [Fighter; 2],
    pub projectiles: Vec<Projectile>,
    pub next_projectile_id: u32,
    pub stats: [FighterStats; 2],
    pub phase: Phase,
    /// Events raised by the most recent frame.
    pub events: Vec<MatchEvent>,
}

impl MatchState {
    pub fn is_match_over(&self) -> bool {
        matches!(self.phase, Phase::MatchOver { .. })
    }
}

// ── Loop I/O ────────────────────────────────────────────────

/// One frame of input: the elapsed time and every key held down.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub dt: f64,
    #[serde(default)]
    pub keys: KeySnapshot,
}

/// A recorded match: the configuration plus every frame fed to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayInput {
    pub config: MatchConfig,
    pub frames: Vec<FrameInput>,
}
