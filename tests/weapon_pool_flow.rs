mod common;

use disco_cop::common::events::CombatEvent;
use disco_cop::plugins::player::{PlayerIntent, PlayerIntents, PlayerSlot};
use disco_cop::plugins::projectiles::EntityPool;
use disco_cop::plugins::projectiles::allocator::PLAYER_SHOTS;

fn set_fire(app: &mut bevy::prelude::App, fire: bool) {
    app.world_mut().resource_mut::<PlayerIntents>().set(
        PlayerSlot(0),
        PlayerIntent {
            fire,
            ..Default::default()
        },
    );
}

#[test]
fn fired_shots_return_to_the_pool() {
    let mut app = common::app_headless();
    let mut log = common::EventLog::new(&app);
    for _ in 0..2 {
        log.update(&mut app);
    }

    set_fire(&mut app, true);
    let mut peak = 0;
    for _ in 0..40 {
        log.update(&mut app);
        peak = peak.max(app.world().resource::<EntityPool>().active_count(PLAYER_SHOTS));
    }
    assert!(peak > 0, "shots were leased");
    assert!(log.count(|e| matches!(e, CombatEvent::WeaponFired { .. })) > 0);

    // Lifetime is 3s; give every shot time to expire or hit a wall.
    set_fire(&mut app, false);
    for _ in 0..(64 * 4) {
        log.update(&mut app);
    }

    let pool = app.world().resource::<EntityPool>();
    assert_eq!(pool.active_count(PLAYER_SHOTS), 0);
    assert_eq!(pool.free_count(PLAYER_SHOTS), pool.len(PLAYER_SHOTS));
    assert_eq!(pool.len(PLAYER_SHOTS), 128, "preload covered the burst");
}
