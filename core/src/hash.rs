use sha2::{Digest, Sha256};

use crate::types::{FighterId, FrameInput, MatchState, Phase};

/// SHA-256 hash of the full input transcript: each frame's `dt` bits followed
/// by its length-prefixed key codes.
pub fn hash_transcript(transcript: &[FrameInput]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for frame in transcript {
        hasher.update(frame.dt.to_bits().to_le_bytes());
        hasher.update((frame.keys.pressed.len() as u32).to_le_bytes());
        for code in &frame.keys.pressed {
            hasher.update(code.to_le_bytes());
        }
    }
    hasher.finalize().into()
}

/// SHA-256 digest of the gameplay-relevant parts of a state. Two runs of the
/// same transcript produce the same digest on every frame.
pub fn state_digest(state: &MatchState) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(state.frame.to_le_bytes());
    hasher.update(state.round.to_le_bytes());
    hasher.update(state.round_timer.to_bits().to_le_bytes());
    let winner_byte = |w: Option<FighterId>| w.map_or(u8::MAX, |id| id as u8);
    hasher.update(match state.phase {
        Phase::Fighting => [0, u8::MAX],
        Phase::RoundOver { winner, .. } => [1, winner_byte(winner)],
        Phase::MatchOver { winner } => [2, winner_byte(winner)],
    });

    for f in &state.fighters {
        for v in [f.x, f.y, f.vx, f.vy, f.attack_timer, f.hit_cooldown, f.fire_cooldown] {
            hasher.update(v.to_bits().to_le_bytes());
        }
        hasher.update(f.health.to_le_bytes());
        hasher.update([f.facing_left as u8, f.attack.map_or(0, |a| a as u8 + 1)]);
        hasher.update(f.combo.count.to_le_bytes());
    }

    for p in &state.projectiles {
        hasher.update(p.id.to_le_bytes());
        hasher.update(p.x.to_bits().to_le_bytes());
        hasher.update(p.y.to_bits().to_le_bytes());
        hasher.update([p.direction as u8, p.active as u8]);
    }

    for s in &state.stats {
        hasher.update(s.score.to_le_bytes());
        hasher.update(s.hits.to_le_bytes());
        hasher.update(s.rounds_won.to_le_bytes());
    }
    hasher.finalize().into()
}
