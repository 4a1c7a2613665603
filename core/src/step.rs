use tracing::{debug, info};

use crate::ai;
use crate::attack;
use crate::combat::{decay_hit_cooldown, resolve_melee_hits};
use crate::combo;
use crate::constants::*;
use crate::init::start_next_round;
use crate::input::{intent_from_actions, Intent, KeySnapshot};
use crate::physics::{apply_intent, clamp_to_arena, integrate};
use crate::projectiles;
use crate::types::*;

/// Sanitize a wall-clock frame delta: non-finite or negative becomes zero,
/// long stalls are capped at `MAX_FRAME_DT`.
pub fn normalize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Humans read their binding against the key snapshot; AI fighters decide
/// from the positions both fighters had at the start of the frame.
pub fn resolve_intents(fighters: &[Fighter; 2], keys: &KeySnapshot) -> [Intent; 2] {
    let intent_for = |i: usize| -> Intent {
        let f = &fighters[i];
        if f.is_ai {
            return ai::decide(f, &fighters[1 - i]);
        }
        match f.binding {
            Some(binding) => intent_from_actions(binding.resolve(keys), f.stats().walk_speed),
            None => Intent::default(),
        }
    };
    [intent_for(0), intent_for(1)]
}

/// Round result, if one was reached this frame. `Some(None)` is a draw.
fn round_result(fighters: &[Fighter; 2], round_timer: f64) -> Option<Option<FighterId>> {
    let [a, b] = fighters;
    match (a.health <= 0, b.health <= 0) {
        (true, true) => return Some(None),
        (true, false) => return Some(Some(b.id)),
        (false, true) => return Some(Some(a.id)),
        (false, false) => {}
    }
    if round_timer > 0.0 {
        return None;
    }
    // Time up: compare remaining health as a share of each fighter's maximum.
    let lhs = a.health as i64 * b.max_health as i64;
    let rhs = b.health as i64 * a.max_health as i64;
    Some(match lhs.cmp(&rhs) {
        std::cmp::Ordering::Greater => Some(a.id),
        std::cmp::Ordering::Less => Some(b.id),
        std::cmp::Ordering::Equal => None,
    })
}

/// A decided round ends the match when the shared clock has run out, when a
/// fighter has reached `rounds_to_win`, or when the match is a single round.
fn match_decided(stats: &[FighterStats; 2], round_timer: f64, config: &MatchConfig) -> bool {
    round_timer <= 0.0
        || config.rounds_to_win <= 1
        || stats.iter().any(|s| s.rounds_won >= config.rounds_to_win)
}

/// Core deterministic transition function.
///
/// Sub-step order:
///  0. Match over: nothing changes
///  1. Round-over linger, then reset fighters for the next round
///  2. Tick hit and fire cooldowns
///  3. Resolve intents (bindings / AI)
///  4. Apply intents: walk, facing, jump, attack start, fire
///  5. Integrate physics for both fighters
///  6. Attack timers, combo windows, animation cursors
///  7. Melee hits
///  8. Move projectiles, drop out-of-bounds, projectile hits
///  9. Re-clamp fighters to the arena
/// 10. Round clock and win check
/// 11. Advance frame
pub fn step(prev: &MatchState, frame: &FrameInput, config: &MatchConfig) -> MatchState {
    // 0. Match over
    if prev.is_match_over() {
        return MatchState {
            events: Vec::new(),
            ..prev.clone()
        };
    }

    let dt = normalize_dt(frame.dt);
    let arena = &config.arena;

    // 1. Round-over linger
    if let Phase::RoundOver { winner, linger } = prev.phase {
        let remaining = linger - dt;
        let mut s = if remaining <= 0.0 {
            let next = start_next_round(prev, config);
            debug!(round = next.round, "round start");
            next
        } else {
            MatchState {
                phase: Phase::RoundOver {
                    winner,
                    linger: remaining,
                },
                ..prev.clone()
            }
        };
        s.events.clear();
        s.frame += 1;
        return s;
    }

    let mut events = Vec::new();
    let mut stats = prev.stats;
    let mut next_projectile_id = prev.next_projectile_id;

    // 2. Tick cooldowns
    let mut fighters = prev.fighters.map(|f| Fighter {
        fire_cooldown: (f.fire_cooldown - dt).max(0.0),
        ..decay_hit_cooldown(&f, dt)
    });

    // 3. Resolve intents
    let intents = resolve_intents(&fighters, &frame.keys);

    // 4. Apply intents
    let mut new_projectiles = Vec::new();
    for i in 0..fighters.len() {
        let intent = &intents[i];
        fighters[i] = apply_intent(&fighters[i], intent, arena);

        if let Some(kind) = intent.attack {
            if let Some(mut started) = attack::try_start(&fighters[i], kind, arena) {
                started.combo = combo::register(&started.combo, kind);
                debug!(
                    fighter = i,
                    attack = ?kind,
                    combo = started.combo.count,
                    "attack started"
                );
                events.push(MatchEvent::AttackStarted {
                    fighter: i,
                    attack: kind,
                    variant: started.variant,
                });
                fighters[i] = started;
            }
        }

        if intent.fire {
            if let Some((owner, proj)) = projectiles::fire(&fighters[i], next_projectile_id) {
                debug!(fighter = i, projectile = proj.id, "fireball launched");
                events.push(MatchEvent::FireballLaunched {
                    fighter: i,
                    projectile: proj.id,
                });
                next_projectile_id += 1;
                new_projectiles.push(proj);
                fighters[i] = owner;
            }
        }
    }

    // 5. Physics: both fighters move before any collision test
    fighters = fighters.map(|f| integrate(&f, arena, dt));

    // 6. Attack timers, combos, animation
    fighters = fighters.map(|f| {
        let f = attack::tick(&f, dt);
        Fighter {
            combo: combo::decay(&f.combo, dt),
            anim: f.anim.advance(attack::animation_key(&f), &f.layout, dt),
            ..f
        }
    });

    // 7. Melee
    let melee = resolve_melee_hits(&fighters, arena);
    fighters = melee.fighters;
    for hit in &melee.hits {
        stats[hit.attacker].score += hit.damage as u32;
        stats[hit.attacker].hits += 1;
        events.push(MatchEvent::Hit {
            attacker: hit.attacker,
            defender: hit.defender,
            attack: hit.attack,
            damage: hit.damage,
            combo: hit.combo,
        });
    }

    // 8. Projectiles
    let mut live = projectiles::advance_all(&prev.projectiles, arena, dt);
    live.extend(new_projectiles);
    let proj_result = projectiles::resolve_hits(&live, &fighters, arena);
    fighters = proj_result.fighters;
    for hit in &proj_result.hits {
        stats[hit.owner].score += hit.damage as u32;
        stats[hit.owner].hits += 1;
        events.push(MatchEvent::ProjectileHit {
            owner: hit.owner,
            defender: hit.defender,
            projectile: hit.projectile,
            damage: hit.damage,
        });
    }

    // 9. Knockback never leaves the arena
    fighters = fighters.map(|f| clamp_to_arena(&f, arena));

    // 10. Round clock and win check
    let round_timer = (prev.round_timer - dt).max(0.0);
    let mut phase = Phase::Fighting;
    if let Some(winner) = round_result(&fighters, round_timer) {
        if let Some(w) = winner {
            stats[w].rounds_won += 1;
        }
        info!(
            round = prev.round,
            winner = ?winner,
            health = ?[fighters[0].health, fighters[1].health],
            "round over"
        );
        events.push(MatchEvent::RoundOver {
            round: prev.round,
            winner,
        });

        if match_decided(&stats, round_timer, config) {
            let champion = match stats[0].rounds_won.cmp(&stats[1].rounds_won) {
                std::cmp::Ordering::Greater => Some(0),
                std::cmp::Ordering::Less => Some(1),
                std::cmp::Ordering::Equal => None,
            };
            info!(winner = ?champion, score = ?[stats[0].score, stats[1].score], "match over");
            events.push(MatchEvent::MatchOver { winner: champion });
            phase = Phase::MatchOver { winner: champion };
        } else {
            phase = Phase::RoundOver {
                winner,
                linger: ROUND_OVER_LINGER,
            };
        }
    }

    // 11. Advance frame
    MatchState {
        frame: prev.frame + 1,
        round: prev.round,
        round_timer,
        fighters,
        projectiles: proj_result.remaining_projectiles,
        next_projectile_id,
        stats,
        phase,
        events,
    }
}
