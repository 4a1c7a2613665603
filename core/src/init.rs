use crate::constants::*;
use crate::error::ConfigError;
use crate::input::ControlBinding;
use crate::types::*;

/// 800x600 screen with the ground 120 units above the bottom edge and a
/// raised platform spanning most of the floor.
pub fn default_arena() -> ArenaConfig {
    ArenaConfig {
        width: ARENA_WIDTH,
        height: ARENA_HEIGHT,
        ground_y: GROUND_Y,
        platform_left: PLATFORM_LEFT,
        platform_right: PLATFORM_RIGHT,
    }
}

/// Keyboard-driven human on the left against an AI frog on the right.
pub fn default_config() -> MatchConfig {
    let sprite = SpriteSheet {
        frame_size: DEFAULT_FRAME_SIZE,
        counts: FrameCounts::default(),
    };
    MatchConfig {
        arena: default_arena(),
        fighters: [
            FighterSetup {
                variant: Variant::Human,
                is_ai: false,
                spawn_x: SPAWN_X[0],
                binding: Some(ControlBinding::wasd()),
                sprite,
            },
            FighterSetup {
                variant: Variant::Frog,
                is_ai: true,
                spawn_x: SPAWN_X[1],
                binding: None,
                sprite,
            },
        ],
        round_duration: ROUND_DURATION,
        rounds_to_win: ROUNDS_TO_WIN,
    }
}

/// Two keyboard players sharing one keyboard: WASD on the left, arrows on
/// the right.
pub fn versus_config() -> MatchConfig {
    let mut config = default_config();
    config.fighters[1] = FighterSetup {
        variant: Variant::Human,
        is_ai: false,
        binding: Some(ControlBinding::arrows()),
        ..config.fighters[1]
    };
    config
}

/// On-screen body size for a sprite sheet: the square frame, scaled.
pub fn body_size(sprite: &SpriteSheet) -> (i32, i32) {
    let side = (sprite.frame_size as f64 * SPRITE_SCALE) as i32;
    (side, side)
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        if !(arena.width > 0.0 && arena.height > 0.0) {
            return Err(ConfigError::InvalidArenaSize {
                width: arena.width,
                height: arena.height,
            });
        }
        if !(arena.ground_y > 0.0 && arena.ground_y <= arena.height) {
            return Err(ConfigError::GroundOutsideArena {
                ground_y: arena.ground_y,
                height: arena.height,
            });
        }
        if !(arena.platform_left <= arena.platform_right
            && arena.platform_left >= 0.0
            && arena.platform_right <= arena.width)
        {
            return Err(ConfigError::InvalidPlatform {
                left: arena.platform_left,
                right: arena.platform_right,
            });
        }

        for (id, setup) in self.fighters.iter().enumerate() {
            if !setup.is_ai && !setup.binding.is_some_and(|b| b.has_any_binding()) {
                return Err(ConfigError::MissingBinding { fighter: id });
            }
            if setup.sprite.frame_size == 0 {
                return Err(ConfigError::EmptySpriteFrame { fighter: id });
            }
            match setup.sprite.counts.total() {
                None => return Err(ConfigError::SpriteStripTooLong { fighter: id }),
                Some(0) => return Err(ConfigError::EmptySpriteStrip { fighter: id }),
                Some(_) => {}
            }
            let (width, height) = body_size(&setup.sprite);
            if width as f64 > arena.width || height as f64 > arena.ground_y {
                return Err(ConfigError::FighterTooLarge {
                    fighter: id,
                    width,
                    height,
                });
            }
        }

        if !(self.round_duration > 0.0) {
            return Err(ConfigError::InvalidRoundDuration(self.round_duration));
        }
        if self.rounds_to_win == 0 {
            return Err(ConfigError::NoRoundsToWin);
        }
        Ok(())
    }
}

/// Build a fighter standing on the ground at its spawn point, facing the
/// middle of the arena.
pub fn create_fighter(id: FighterId, setup: &FighterSetup, arena: &ArenaConfig) -> Fighter {
    let (width, height) = body_size(&setup.sprite);
    let stats = variant_stats(setup.variant);
    let layout = FrameLayout::from_counts(&setup.sprite.counts);
    let x = setup.spawn_x.clamp(0.0, (arena.width - width as f64).max(0.0));
    Fighter {
        id,
        is_ai: setup.is_ai,
        variant: setup.variant,
        binding: if setup.is_ai { None } else { setup.binding },
        spawn_x: setup.spawn_x,
        x,
        y: arena.ground_y - height as f64,
        vx: 0.0,
        vy: 0.0,
        width,
        height,
        health: stats.max_health,
        max_health: stats.max_health,
        facing_left: x + width as f64 / 2.0 > arena.width / 2.0,
        attack: None,
        attack_timer: 0.0,
        attack_duration: ATTACK_DURATION,
        hit_cooldown: 0.0,
        fire_cooldown: 0.0,
        combo: ComboState::default(),
        layout,
        anim: AnimationCursor::default(),
    }
}

/// Put a fighter back to its round-start state, keeping identity, controls,
/// body size and sprite layout.
pub fn reset_fighter(f: &Fighter, arena: &ArenaConfig) -> Fighter {
    let stats = variant_stats(f.variant);
    let x = f.spawn_x.clamp(0.0, (arena.width - f.width as f64).max(0.0));
    Fighter {
        x,
        y: arena.ground_y - f.height as f64,
        vx: 0.0,
        vy: 0.0,
        health: stats.max_health,
        max_health: stats.max_health,
        facing_left: x + f.width as f64 / 2.0 > arena.width / 2.0,
        attack: None,
        attack_timer: 0.0,
        hit_cooldown: 0.0,
        fire_cooldown: 0.0,
        combo: ComboState::default(),
        anim: AnimationCursor::default(),
        ..*f
    }
}

/// Create the initial match state from a validated config.
pub fn create_initial_state(config: &MatchConfig) -> Result<MatchState, ConfigError> {
    config.validate()?;
    let arena = &config.arena;
    Ok(MatchState {
        frame: 0,
        round: 1,
        round_timer: config.round_duration,
        fighters: [
            create_fighter(0, &config.fighters[0], arena),
            create_fighter(1, &config.fighters[1], arena),
        ],
        projectiles: Vec::new(),
        next_projectile_id: 0,
        stats: [FighterStats::default(); 2],
        phase: Phase::Fighting,
        events: Vec::new(),
    })
}

/// Reset both fighters for the next round. The match clock and stats carry
/// over.
pub fn start_next_round(state: &MatchState, config: &MatchConfig) -> MatchState {
    let arena = &config.arena;
    MatchState {
        round: state.round + 1,
        fighters: [
            reset_fighter(&state.fighters[0], arena),
            reset_fighter(&state.fighters[1], arena),
        ],
        projectiles: Vec::new(),
        phase: Phase::Fighting,
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_correct() {
        let config = default_config();
        let state = create_initial_state(&config).unwrap();
        assert_eq!(state.frame, 0);
        assert_eq!(state.round, 1);
        assert_eq!(state.round_timer, ROUND_DURATION);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.phase, Phase::Fighting);

        let p0 = &state.fighters[0];
        assert_eq!(p0.x, 100.0);
        assert_eq!(p0.width, 102);
        assert_eq!(p0.y + p0.height as f64, GROUND_Y);
        assert_eq!(p0.health, 100);
        assert!(!p0.facing_left);
        assert!(p0.binding.is_some());

        let p1 = &state.fighters[1];
        assert_eq!(p1.x, 600.0);
        assert_eq!(p1.variant, Variant::Frog);
        assert_eq!(p1.health, 120);
        assert!(p1.facing_left);
        assert!(p1.is_ai);
    }

    #[test]
    fn versus_binds_both_players() {
        let config = versus_config();
        let state = create_initial_state(&config).unwrap();
        let [p0, p1] = state.fighters;
        assert!(!p0.is_ai && !p1.is_ai);
        assert_eq!(p1.binding, Some(ControlBinding::arrows()));
        assert_ne!(p0.binding, p1.binding);
        assert_eq!(p1.health, 100);
    }

    #[test]
    fn human_without_binding_is_rejected() {
        let mut config = default_config();
        config.fighters[0].binding = None;
        assert_eq!(
            create_initial_state(&config).unwrap_err(),
            ConfigError::MissingBinding { fighter: 0 }
        );
    }

    #[test]
    fn invalid_arena_is_rejected() {
        let mut config = default_config();
        config.arena.width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidArenaSize { .. })
        ));

        let mut config = default_config();
        config.arena.platform_left = 700.0;
        config.arena.platform_right = 100.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPlatform { .. })
        ));

        let mut config = default_config();
        config.rounds_to_win = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoRoundsToWin));
    }

    #[test]
    fn empty_sprite_is_rejected() {
        let mut config = default_config();
        config.fighters[1].sprite.frame_size = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptySpriteFrame { fighter: 1 })
        );
    }

    #[test]
    fn overflowing_sprite_strip_is_rejected() {
        let mut config = default_config();
        config.fighters[0].sprite.counts.idle = u32::MAX;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpriteStripTooLong { fighter: 0 })
        );

        let mut config = default_config();
        config.fighters[1].sprite.counts = FrameCounts {
            idle: 0,
            walk: 0,
            punch: 0,
            kick: 0,
            jump: 0,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptySpriteStrip { fighter: 1 })
        );
    }

    #[test]
    fn reset_restores_round_start_state() {
        let config = default_config();
        let arena = config.arena;
        let fresh = create_fighter(1, &config.fighters[1], &arena);
        let mut battered = fresh;
        battered.x = 20.0;
        battered.y -= 60.0;
        battered.vx = -300.0;
        battered.vy = 120.0;
        battered.health = 3;
        battered.attack = Some(AttackType::Kick);
        battered.attack_timer = 0.1;
        battered.hit_cooldown = 0.4;
        battered.fire_cooldown = 0.5;
        battered.combo.count = 3;
        battered.combo.timer = 0.2;

        assert_eq!(reset_fighter(&battered, &arena), fresh);
    }

    #[test]
    fn next_round_keeps_stats_and_clock() {
        let config = default_config();
        let mut state = create_initial_state(&config).unwrap();
        state.stats[0].score = 40;
        state.stats[0].rounds_won = 1;
        state.fighters[1].health = 0;
        state.round_timer = 12.0;
        let next = start_next_round(&state, &config);
        assert_eq!(next.round, 2);
        assert_eq!(next.round_timer, 12.0);
        assert_eq!(next.stats, state.stats);
        assert_eq!(next.fighters[1].health, next.fighters[1].max_health);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = default_config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
