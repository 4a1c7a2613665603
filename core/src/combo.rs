use crate::constants::*;
use crate::types::*;

/// Record an accepted attack. Same-type attacks inside the combo window
/// extend the chain; anything else starts a new one.
pub fn register(c: &ComboState, kind: AttackType) -> ComboState {
    let count = if c.timer > 0.0 && c.last_attack == Some(kind) {
        c.count + 1
    } else {
        1
    };
    ComboState {
        count,
        timer: COMBO_WINDOW,
        last_attack: Some(kind),
    }
}

/// Run the combo window down; an expired window clears the chain.
pub fn decay(c: &ComboState, dt: f64) -> ComboState {
    if c.timer <= 0.0 && c.count == 0 {
        return *c;
    }
    let timer = c.timer - dt;
    if timer <= 0.0 {
        ComboState::default()
    } else {
        ComboState { timer, ..*c }
    }
}

/// Knockback multiplier for a chain of `count` hits.
pub fn knockback_factor(count: u32) -> f64 {
    let extra = count.saturating_sub(1).min(COMBO_KNOCKBACK_MAX_STEPS);
    1.0 + COMBO_KNOCKBACK_STEP * extra as f64
}
