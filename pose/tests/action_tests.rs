mod support;

use common::{Joint, Vector3};
use pose::{AbilityStatus, Character, PoseEngine, PoseEvent, UserId};

use support::*;

const PLAYER: UserId = UserId(3);

fn transformed_cannon() -> PoseEngine {
    let mut engine = engine();
    engine.on_calibrated(PLAYER, true);
    for _ in 0..8 {
        engine.tick(&cannon_transform(PLAYER));
    }
    assert!(engine.is_registered(PLAYER, Character::Cannon));
    engine
}

fn transformed_ice() -> PoseEngine {
    let mut engine = engine();
    engine.on_calibrated(PLAYER, true);
    engine.tick(&ice_stage_1(PLAYER));
    engine.tick(&ice_stage_2(PLAYER));
    engine.tick(&ice_stage_3(PLAYER));
    engine.tick(&ice_stage_3(PLAYER));
    assert!(engine.is_registered(PLAYER, Character::Ice));
    engine
}

fn cannon_status(engine: &PoseEngine) -> Option<AbilityStatus> {
    engine
        .ability(PLAYER, Character::Cannon)
        .map(|ability| ability.status)
}

fn shots(engine: &PoseEngine, character: Character) -> usize {
    engine.projectiles(character).map_or(0, |roster| roster.len())
}

#[test]
fn cannon_fires_every_few_ticks_while_activated() {
    let mut engine = transformed_cannon();
    assert_eq!(cannon_status(&engine), Some(AbilityStatus::Deactivated));

    let events = engine.tick(&cannon_activate(PLAYER));
    assert!(events.contains(&PoseEvent::AbilityChanged {
        user: PLAYER,
        character: Character::Cannon,
        status: AbilityStatus::Activated
    }));
    assert_eq!(shots(&engine, Character::Cannon), 0);

    for _ in 0..3 {
        engine.tick(&cannon_fire(PLAYER));
    }
    assert_eq!(shots(&engine, Character::Cannon), 1);

    for _ in 0..4 {
        engine.tick(&cannon_fire(PLAYER));
    }
    assert_eq!(shots(&engine, Character::Cannon), 2);

    let shot = &engine.projectiles(Character::Cannon).unwrap().as_slice()[0];
    assert_eq!(shot.owner, PLAYER);
    assert_eq!(shot.origin, Vector3::new(-200.0, 400.0, 1400.0));
}

#[test]
fn cannon_deactivation_stops_firing() {
    let mut engine = transformed_cannon();
    engine.tick(&cannon_activate(PLAYER));
    engine.tick(&cannon_deactivate(PLAYER));
    assert_eq!(cannon_status(&engine), Some(AbilityStatus::Deactivated));

    for _ in 0..10 {
        engine.tick(&cannon_fire(PLAYER));
    }
    assert_eq!(shots(&engine, Character::Cannon), 0);
}

#[test]
fn perpendicular_off_arm_leaves_ability_unchanged() {
    let mut engine = transformed_cannon();
    let sideways = frame(
        PLAYER,
        &[
            (Joint::LeftShoulder, [-200.0, 400.0, 2000.0]),
            (Joint::LeftElbow, [-200.0, 400.0, 1700.0]),
            (Joint::LeftHand, [-200.0, 400.0, 1400.0]),
            (Joint::RightShoulder, [200.0, 400.0, 2000.0]),
            (Joint::RightElbow, [500.0, 400.0, 2000.0]),
            (Joint::RightHand, [800.0, 400.0, 2000.0]),
        ],
    );

    let events = engine.tick(&sideways);
    assert!(events.is_empty());
    assert_eq!(cannon_status(&engine), Some(AbilityStatus::Deactivated));

    engine.tick(&cannon_activate(PLAYER));
    engine.tick(&sideways);
    assert_eq!(cannon_status(&engine), Some(AbilityStatus::Activated));
}

#[test]
fn sustained_rod_pose_fires_once_per_charge() {
    let mut engine = transformed_ice();

    let events = engine.tick(&rod_raised(PLAYER));
    assert!(events.contains(&PoseEvent::ProjectilesSpawned {
        user: PLAYER,
        character: Character::Ice,
        count: 3
    }));

    for _ in 0..10 {
        engine.tick(&rod_raised(PLAYER));
    }
    assert_eq!(shots(&engine, Character::Ice), 3);

    engine.tick(&rod_lowered(PLAYER));
    engine.tick(&rod_raised(PLAYER));
    assert_eq!(shots(&engine, Character::Ice), 6);
}

#[test]
fn projectiles_travel_and_expire() {
    let mut engine = transformed_ice();
    engine.tick(&rod_raised(PLAYER));

    for _ in 0..10 {
        assert_eq!(engine.advance_projectiles(), 0);
    }
    let roster = engine.projectiles(Character::Ice).unwrap();
    for shot in roster.iter() {
        assert!((shot.displacement() - 5.0).abs() < 1e-3);
        assert!(shot.position.z < shot.origin.z);
    }

    // 0.5 per tick over a 10000 range.
    let mut dropped = 0;
    for _ in 0..25_000 {
        dropped += engine.advance_projectiles();
    }
    assert_eq!(dropped, 3);
    assert_eq!(shots(&engine, Character::Ice), 0);
}

#[test]
fn lost_player_keeps_projectiles_in_flight() {
    let mut engine = transformed_ice();
    engine.tick(&rod_raised(PLAYER));
    engine.on_user_lost(PLAYER);

    assert!(engine.players().is_empty());
    assert_eq!(shots(&engine, Character::Ice), 3);
}
