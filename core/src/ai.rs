use crate::constants::*;
use crate::input::Intent;
use crate::types::*;

/// Approach speed: a fixed share of the variant's own walk speed.
pub fn walk_speed(me: &Fighter) -> f64 {
    me.stats().walk_speed * AI_WALK_SPEED_FACTOR
}

/// Reactive AI: walk toward the opponent until within striking distance, then
/// stand and punch. Pure function of both fighters; keeps no memory between
/// frames.
pub fn decide(me: &Fighter, opponent: &Fighter) -> Intent {
    let speed = walk_speed(me);
    let mine = me.center_x();
    let theirs = opponent.center_x();

    if theirs < mine - AI_ENGAGE_DISTANCE {
        Intent {
            desired_vx: -speed,
            face_left: Some(true),
            ..Intent::default()
        }
    } else if theirs > mine + AI_ENGAGE_DISTANCE {
        Intent {
            desired_vx: speed,
            face_left: Some(false),
            ..Intent::default()
        }
    } else {
        Intent {
            attack: Some(AttackType::Punch),
            ..Intent::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{create_fighter, default_config};

    fn pair(ai_x: f64, opponent_x: f64) -> (Fighter, Fighter) {
        let config = default_config();
        let mut opponent = create_fighter(0, &config.fighters[0], &config.arena);
        let mut ai = create_fighter(1, &config.fighters[1], &config.arena);
        ai.x = ai_x;
        opponent.x = opponent_x;
        (ai, opponent)
    }

    #[test]
    fn approaches_from_the_right() {
        let (ai, opponent) = pair(600.0, 100.0);
        let intent = decide(&ai, &opponent);
        assert_eq!(intent.desired_vx, -walk_speed(&ai));
        assert_eq!(intent.face_left, Some(true));
        assert_eq!(intent.attack, None);
    }

    #[test]
    fn approaches_from_the_left() {
        let (ai, opponent) = pair(100.0, 600.0);
        let intent = decide(&ai, &opponent);
        assert_eq!(intent.desired_vx, walk_speed(&ai));
        assert_eq!(intent.face_left, Some(false));
    }

    #[test]
    fn attacks_when_close() {
        let (ai, opponent) = pair(300.0, 330.0);
        let intent = decide(&ai, &opponent);
        assert_eq!(intent.desired_vx, 0.0);
        assert_eq!(intent.attack, Some(AttackType::Punch));
        assert!(!intent.jump && !intent.fire);
    }

    #[test]
    fn approach_speed_follows_variant() {
        let (frog, opponent) = pair(600.0, 100.0);
        assert!((walk_speed(&frog) - 120.0).abs() < 1e-9);

        let human = Fighter {
            variant: Variant::Human,
            ..frog
        };
        assert!(walk_speed(&human) > walk_speed(&frog));
        assert_eq!(decide(&human, &opponent).desired_vx, -walk_speed(&human));
    }

    #[test]
    fn decision_is_stateless() {
        let (ai, opponent) = pair(500.0, 200.0);
        assert_eq!(decide(&ai, &opponent), decide(&ai, &opponent));
    }
}
