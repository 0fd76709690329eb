use space_invaders::compute::init_state;
use space_invaders::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq, so equality comparisons must work
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(GameStatus::GameOver, GameStatus::Victory);

    let status = GameStatus::Victory;
    assert_eq!(status.clone(), GameStatus::Victory);
}

#[test]
fn input_state_defaults_to_no_movement() {
    let input = InputState::default();
    assert!(!input.move_left);
    assert!(!input.move_right);
}

#[test]
fn world_state_clone_is_independent() {
    let original = init_state(600.0, 600.0);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 990;
    cloned.enemies[0].alive = false;
    cloned.player_bullets.push(Bullet {
        x: 5.0,
        y: 5.0,
        vy: -PLAYER_BULLET_SPEED,
    });

    assert_eq!(original.player.x, 275.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies[0].alive);
    assert!(original.player_bullets.is_empty());
}
