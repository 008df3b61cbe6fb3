use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::common::element::Element;
use crate::common::events::CombatEvent;
use crate::common::layers::Layer;
use crate::common::test_utils::{queued_events, run_system_once, step_fixed};
use crate::plugins::combat::{DamageWriter, Hit, NovaQueue};
use crate::plugins::core::DifficultyMode;
use crate::plugins::enemies::{EnemyKind, TrackedPlayer};

const DT: f32 = 1.0 / 64.0;

fn body_at(x: f32, y: f32) -> Body {
    Body {
        position: Vec2::new(x, y),
        velocity: Vec2::ZERO,
        facing: 1.0,
    }
}

fn tick_toward(target: Option<Vec2>, phase: u8) -> BossTick {
    BossTick {
        dt: DT,
        sight: Sight { target },
        phase,
        walk_factor: 0.5,
        speed_scale: 1.0,
        staggered: false,
    }
}

/// Play `script` to the end at a fixed step, counting actions fired.
fn play(script: &'static PatternScript, dt: f32) -> (usize, PatternRun) {
    let mut run = PatternRun::new(script);
    let mut fired = 0;
    for _ in 0..100_000 {
        if run.advance(dt, |_| fired += 1) {
            return (fired, run);
        }
    }
    panic!("'{}' never finished", script.name);
}

// --------------------------------------------------------------------------------------
// Phases
// --------------------------------------------------------------------------------------

#[test]
fn phases_promote_once_per_threshold() {
    let mut t = PhaseTracker::default();
    assert_eq!(t.current(), 1);
    assert_eq!(t.update(1.0), None);
    assert_eq!(t.update(0.7), None);
    assert_eq!(t.update(0.66), Some(PhasePromotion { from: 1, to: 2 }));
    assert_eq!(t.update(0.5), None);
    assert_eq!(t.update(0.33), Some(PhasePromotion { from: 2, to: 3 }));
    assert_eq!(t.update(0.1), None);
    assert_eq!(t.current(), t.last_phase());
}

#[test]
fn phases_never_regress() {
    let mut t = PhaseTracker::default();
    t.update(0.4);
    assert_eq!(t.update(1.0), None, "healing does not demote");
    assert_eq!(t.current(), 2);
}

#[test]
fn one_big_hit_enters_every_skipped_phase() {
    let mut t = PhaseTracker::default();
    let p = t.update(0.05).expect("promoted");
    assert_eq!(p, PhasePromotion { from: 1, to: 3 });
    assert_eq!(p.entered().collect::<Vec<_>>(), vec![2, 3]);
}

// --------------------------------------------------------------------------------------
// Pattern tables
// --------------------------------------------------------------------------------------

#[test]
fn every_boss_gates_its_tables_by_phase() {
    for kind in BossKind::ALL {
        let p = kind.profile();

        let weights = |phase| p.table(phase).iter().map(|w| w.weight).collect::<Vec<_>>();
        assert_eq!(weights(1), vec![40.0, 60.0], "{}", p.name);

        let w2 = weights(2);
        assert_eq!(w2.len(), 3, "{}", p.name);
        assert!(w2.iter().all(|w| *w == w2[0]));

        let t3 = p.table(3);
        assert_eq!(t3.len(), 5, "{}", p.name);
        let total: f32 = t3.iter().map(|w| w.weight).sum();
        let enraged: Vec<_> = t3.iter().filter(|w| w.script.enrage).collect();
        assert_eq!(enraged.len(), 1, "{}", p.name);
        let share = enraged[0].weight / total;
        assert!((0.2..=0.25).contains(&share), "{}: enrage share {share}", p.name);

        for phase in [1, 2] {
            assert!(
                p.table(phase).iter().all(|w| !w.script.enrage),
                "{} enrages early",
                p.name
            );
        }
    }
}

#[test]
fn scripts_fit_inside_their_duration() {
    for kind in BossKind::ALL {
        for w in kind.profile().table(3) {
            let s = w.script;
            assert!(!s.steps.is_empty() && s.steps.len() <= 64, "{}", s.name);
            assert!(s.steps.iter().all(|st| st.at >= 0.0 && st.at <= s.duration), "{}", s.name);
        }
    }
}

#[test]
fn phase_one_rolls_follow_the_weights() {
    let p = BossKind::DiscoKing.profile();
    let heavy = p.table(1)[1].script;
    let mut rng = StdRng::seed_from_u64(11);

    let n = 10_000;
    let hits = (0..n)
        .filter(|_| std::ptr::eq(p.choose(1, &mut rng).expect("rolled"), heavy))
        .count();
    let share = hits as f32 / n as f32;
    assert!((0.57..0.63).contains(&share), "share {share}");
}

#[test]
fn enrage_is_never_rolled_before_phase_three() {
    let mut rng = StdRng::seed_from_u64(3);
    for kind in BossKind::ALL {
        let p = kind.profile();
        for _ in 0..500 {
            assert!(!p.choose(2, &mut rng).expect("rolled").enrage);
        }
        let enraged = (0..2_000)
            .filter(|_| p.choose(3, &mut rng).expect("rolled").enrage)
            .count();
        assert!(enraged > 300 && enraged < 500, "{}: {enraged}", p.name);
    }
}

#[test]
fn levels_cycle_through_the_lineups() {
    assert_eq!(BossKind::lineup(0), &[BossKind::DiscoKing]);
    assert_eq!(BossKind::lineup(1), &[BossKind::DiscoKing]);
    assert_eq!(BossKind::lineup(2), &[BossKind::Arnoldo]);
    assert_eq!(BossKind::lineup(4), &[BossKind::JoeyRamone, BossKind::DebbieHarry]);
    assert_eq!(
        BossKind::lineup(5),
        &[BossKind::BarryGibb, BossKind::RobinGibb, BossKind::MauriceGibb]
    );
    assert_eq!(BossKind::lineup(6), BossKind::lineup(1));
}

#[test]
fn every_boss_headlines_some_level() {
    for kind in BossKind::ALL {
        assert!(
            (1..=5).any(|level| BossKind::lineup(level).contains(&kind)),
            "{} never plays",
            kind.name()
        );
    }
}

#[test]
fn only_maurice_pops_up() {
    let pop_ups: Vec<_> = BossKind::ALL
        .into_iter()
        .filter(|k| k.profile().pop_up)
        .collect();
    assert_eq!(pop_ups, vec![BossKind::MauriceGibb]);
}

// --------------------------------------------------------------------------------------
// Pattern playback
// --------------------------------------------------------------------------------------

#[test]
fn every_step_fires_exactly_once_at_any_step_size() {
    for kind in BossKind::ALL {
        for w in kind.profile().table(3) {
            for dt in [1.0 / 240.0, 1.0 / 60.0, 0.25, 5.0] {
                let (fired, run) = play(w.script, dt);
                assert_eq!(fired, w.script.steps.len(), "{} at dt {dt}", w.script.name);
                assert_eq!(run.fired_count() as usize, fired);
            }
        }
    }
}

#[test]
fn steps_wait_for_their_timestamp() {
    let script = BossKind::DiscoKing.profile().table(1)[1].script;
    assert_eq!(script.name, "boogie_shot");
    assert_eq!(script.steps[0].at, 0.1);

    let mut run = PatternRun::new(script);
    let mut fired = 0;
    // 6/64 < 0.1 <= 7/64
    for _ in 0..7 {
        run.advance(DT, |_| fired += 1);
    }
    assert_eq!(fired, 0);
    run.advance(DT, |_| fired += 1);
    assert_eq!(fired, 1);
    run.advance(DT, |_| fired += 1);
    assert_eq!(fired, 1);
}

#[test]
fn spread_fans_around_the_aim() {
    let action = PatternAction::Spread {
        shot: Shot::plain(300.0, 10.0),
        count: 3,
        arc: 30.0,
    };
    let mut body = body_at(0.0, 0.0);
    let mut sink = ActionSink::default();
    patterns::perform(&action, &mut body, Sight::at(Vec2::new(400.0, 16.0)), 2.0, &mut sink);

    assert_eq!(sink.shots.len(), 3);
    let mid = sink.shots[1];
    assert!(mid.direction.abs_diff_eq(Vec2::X, 1e-4));
    assert!(sink.shots[0].direction.y < 0.0 && sink.shots[2].direction.y > 0.0);
    assert!(sink.shots.iter().all(|s| s.owner.is_none() && s.damage == 20.0));
}

#[test]
fn beams_ignore_the_target_and_follow_the_facing() {
    let action = PatternAction::Beam {
        shot: Shot::plain(400.0, 10.0),
        count: 4,
        from: 0.0,
        to: 270.0,
    };
    let mut body = body_at(0.0, 0.0);
    body.facing = -1.0;
    let mut sink = ActionSink::default();
    patterns::perform(&action, &mut body, Sight::at(Vec2::new(0.0, 500.0)), 1.0, &mut sink);

    assert_eq!(sink.shots.len(), 4);
    let dirs: Vec<Vec2> = sink.shots.iter().map(|s| s.direction).collect();
    assert!(dirs[0].abs_diff_eq(Vec2::NEG_X, 1e-4), "{:?}", dirs[0]);
    assert!(dirs[1].abs_diff_eq(Vec2::NEG_Y, 1e-4), "{:?}", dirs[1]);
    assert!(dirs[2].abs_diff_eq(Vec2::X, 1e-4), "{:?}", dirs[2]);
    assert!(dirs[3].abs_diff_eq(Vec2::Y, 1e-4), "{:?}", dirs[3]);
}

#[test]
fn elemental_shots_carry_a_payload() {
    let action = PatternAction::Ring {
        shot: Shot::elemental(200.0, 10.0, Element::Ice),
        count: 4,
    };
    let mut body = body_at(0.0, 0.0);
    let mut sink = ActionSink::default();
    patterns::perform(&action, &mut body, Sight::default(), 1.0, &mut sink);

    assert_eq!(sink.shots.len(), action.projectile_count());
    for s in &sink.shots {
        assert_eq!(s.element, Element::Ice);
        assert!(s.elemental.chance > 0.0 && s.elemental.duration > 0.0);
    }
}

#[test]
fn stomp_and_lunge_use_the_body() {
    let mut body = body_at(50.0, 0.0);
    let mut sink = ActionSink::default();
    let sight = Sight::at(Vec2::new(-100.0, 0.0));

    patterns::perform(&PatternAction::Lunge { speed: 400.0 }, &mut body, sight, 1.0, &mut sink);
    assert_eq!(body.velocity.x, -400.0);
    assert_eq!(body.facing, -1.0);

    patterns::perform(
        &PatternAction::Stomp {
            radius: 90.0,
            damage: 14.0,
        },
        &mut body,
        sight,
        1.5,
        &mut sink,
    );
    assert!(sink.shots.is_empty());
    assert_eq!(sink.strikes.len(), 1);
    assert_eq!(sink.strikes[0].center, Vec2::new(50.0, 0.0));
    assert_eq!(sink.strikes[0].hit.amount, 21.0);
}

// --------------------------------------------------------------------------------------
// Brain
// --------------------------------------------------------------------------------------

#[test]
fn walks_toward_the_target_between_patterns() {
    let mut brain = BossBrain::new(BossKind::DiscoKing.profile(), 1.0);
    let (mut body, mut sink, mut rng) = (body_at(0.0, 0.0), ActionSink::default(), StdRng::seed_from_u64(1));

    brain.tick(&mut body, &tick_toward(Some(Vec2::new(-300.0, 0.0)), 1), &mut rng, &mut sink);
    assert!(!brain.is_attacking());
    assert_eq!(body.velocity.x, -140.0 * 0.5);
    assert_eq!(body.facing, -1.0);
    assert!(sink.is_empty());

    let chilled = BossTick {
        speed_scale: 0.5,
        ..tick_toward(Some(Vec2::new(-300.0, 0.0)), 1)
    };
    brain.tick(&mut body, &chilled, &mut rng, &mut sink);
    assert_eq!(body.velocity.x, -140.0 * 0.25);
}

#[test]
fn knockback_is_damped_not_overwritten_by_walking() {
    let mut brain = BossBrain::new(BossKind::DiscoKing.profile(), 1.0);
    let (mut body, mut sink, mut rng) = (body_at(0.0, 0.0), ActionSink::default(), StdRng::seed_from_u64(1));
    // Pushed right while the target stands to the left.
    body.velocity.x = 200.0;
    let knocked = BossTick {
        staggered: true,
        ..tick_toward(Some(Vec2::new(-300.0, 0.0)), 1)
    };

    brain.tick(&mut body, &knocked, &mut rng, &mut sink);
    assert_eq!(body.velocity.x, 200.0 * STAGGER_DAMPING);
    assert_eq!(brain.attack_timer, brain.profile.attack_interval - DT);

    brain.tick(&mut body, &tick_toward(Some(Vec2::new(-300.0, 0.0)), 1), &mut rng, &mut sink);
    assert_eq!(body.velocity.x, -70.0);
}

#[test]
fn flying_boss_hovers_above_its_target() {
    let mut brain = BossBrain::new(BossKind::BarryGibb.profile(), 1.0);
    let (mut body, mut sink, mut rng) = (body_at(0.0, 0.0), ActionSink::default(), StdRng::seed_from_u64(1));

    brain.tick(&mut body, &tick_toward(Some(Vec2::new(100.0, 0.0)), 1), &mut rng, &mut sink);
    assert!(body.velocity.y > 0.0);
    assert_eq!(body.velocity.y, HOVER_HEIGHT * HOVER_GAIN);
}

#[test]
fn pop_up_boss_waits_still_then_appears_beside_its_target() {
    let mut brain = BossBrain::new(BossKind::MauriceGibb.profile(), 1.0);
    let (mut body, mut sink, mut rng) = (body_at(0.0, 0.0), ActionSink::default(), StdRng::seed_from_u64(2));
    body.velocity.x = 90.0;
    let target = Vec2::new(1000.0, 0.0);
    let tick = tick_toward(Some(target), 1);

    brain.tick(&mut body, &tick, &mut rng, &mut sink);
    assert!(!brain.is_exposed());
    assert_eq!(body.velocity.x, 0.0);
    assert_eq!(body.position.x, 0.0, "no walking while hidden");

    brain.attack_timer = 0.0;
    brain.tick(&mut body, &tick, &mut rng, &mut sink);
    assert!(brain.is_exposed());
    assert_eq!((body.position.x - target.x).abs(), POP_UP_DISTANCE);
    assert_eq!(body.facing, (target.x - body.position.x).signum());

    while brain.is_attacking() {
        brain.tick(&mut body, &tick, &mut rng, &mut sink);
    }
    assert!(!brain.is_exposed());
    assert!(!sink.shots.is_empty());
}

#[test]
fn expired_timer_plays_a_whole_pattern_then_rests() {
    let mut brain = BossBrain::new(BossKind::JimmyPage.profile(), 1.0);
    brain.attack_timer = 0.0;
    brain.speed_multiplier = 1.25;
    let (mut body, mut sink, mut rng) = (body_at(0.0, 0.0), ActionSink::default(), StdRng::seed_from_u64(5));
    let tick = tick_toward(Some(Vec2::new(200.0, 0.0)), 1);

    brain.tick(&mut body, &tick, &mut rng, &mut sink);
    let name = brain.current_pattern().expect("pattern started");
    assert!(name == "sweep" || name == "feedback", "{name}");

    let mut ticks = 1;
    while brain.is_attacking() {
        brain.tick(&mut body, &tick, &mut rng, &mut sink);
        ticks += 1;
        assert!(ticks < 1_000);
    }
    assert!(!sink.shots.is_empty());
    assert_eq!(brain.attack_timer, 1.5 / 1.25);
    assert!(body.velocity.x.abs() < 93.75 * 0.1, "planted while playing");
}

#[test]
fn no_pattern_is_rolled_before_the_timer_runs_out() {
    let mut brain = BossBrain::new(BossKind::DebbieHarry.profile(), 1.0);
    let (mut body, mut sink, mut rng) = (body_at(0.0, 0.0), ActionSink::default(), StdRng::seed_from_u64(5));
    let tick = tick_toward(Some(Vec2::new(200.0, 0.0)), 1);

    // 1.4s interval: 89 steps of 1/64 leave it just short.
    for _ in 0..89 {
        brain.tick(&mut body, &tick, &mut rng, &mut sink);
    }
    assert!(!brain.is_attacking());
    for _ in 0..2 {
        brain.tick(&mut body, &tick, &mut rng, &mut sink);
    }
    assert!(brain.is_attacking());
}

// --------------------------------------------------------------------------------------
// Systems
// --------------------------------------------------------------------------------------

fn boss_world(mode: DifficultyMode) -> World {
    let mut world = World::new();
    step_fixed(&mut world, DT);
    world.init_resource::<Tunables>();
    world.init_resource::<TargetSnapshot>();
    world.init_resource::<CombatEvents>();
    world.insert_resource(CombatRng::seeded(9));
    world.insert_resource(Difficulty::new(mode));
    world.init_resource::<Messages<SpawnEnemyRequest>>();
    world.init_resource::<Messages<SpawnProjectileRequest>>();
    world.init_resource::<Messages<MeleeStrike>>();
    world.init_resource::<Messages<Killed>>();
    world
}

fn spawn_direct(world: &mut World, kind: BossKind) -> Entity {
    run_system_once(world, move |mut commands: Commands, difficulty: Res<Difficulty>| {
        spawn_boss(&mut commands, kind, Vec2::ZERO, &difficulty)
    })
}

#[test]
fn boss_requests_spawn_bosses_only() {
    let mut world = boss_world(DifficultyMode::Hard);
    let zone = world.spawn_empty().id();
    world.write_message(SpawnEnemyRequest {
        what: Spawnable::Enemy(EnemyKind::Grunt),
        position: Vec2::ZERO,
        zone: None,
    });
    world.write_message(SpawnEnemyRequest {
        what: Spawnable::Boss(BossKind::JimmyPage),
        position: Vec2::new(500.0, 0.0),
        zone: Some(zone),
    });
    run_system_once(&mut world, spawn_bosses);

    let bosses: Vec<Entity> = world
        .query_filtered::<Entity, With<Boss>>()
        .iter(&world)
        .collect();
    assert_eq!(bosses.len(), 1);
    let boss = bosses[0];

    let hp = world.get::<Health>(boss).unwrap().max();
    assert_eq!(hp, 750.0 * Difficulty::new(DifficultyMode::Hard).hp_multiplier());
    assert_eq!(world.get::<LootTable>(boss), Some(&LootTable::Boss));
    assert_eq!(world.get::<ZoneMember>(boss), Some(&ZoneMember(zone)));
    assert_eq!(world.get::<PhaseTracker>(boss).unwrap().current(), 1);

    assert_eq!(
        queued_events(&world),
        vec![
            CombatEvent::EntitySpawned {
                entity: boss,
                position: Vec2::new(500.0, 0.0),
            },
            CombatEvent::BossSpawned {
                boss,
                name: "Jimmy Page",
            },
        ]
    );
}

#[test]
fn flying_bosses_ignore_gravity() {
    let mut world = boss_world(DifficultyMode::Normal);
    let barry = spawn_direct(&mut world, BossKind::BarryGibb);
    let king = spawn_direct(&mut world, BossKind::DiscoKing);
    assert_eq!(world.get::<GravityScale>(barry).map(|g| g.0), Some(0.0));
    assert!(world.get::<GravityScale>(king).is_none());
}

#[test]
fn damage_promotes_phases_with_one_event_each() {
    let mut world = boss_world(DifficultyMode::Normal);
    let boss = spawn_direct(&mut world, BossKind::DiscoKing);

    world.get_mut::<Health>(boss).unwrap().take_damage(250.0);
    run_system_once(&mut world, promote_phases);
    assert_eq!(
        queued_events(&world),
        vec![CombatEvent::BossPhaseChanged { boss, phase: 2 }]
    );
    assert_eq!(world.get::<BossBrain>(boss).unwrap().speed_multiplier, 1.2);

    run_system_once(&mut world, promote_phases);
    assert_eq!(queued_events(&world).len(), 1, "no repeat without new damage");

    world.get_mut::<Health>(boss).unwrap().take_damage(200.0);
    run_system_once(&mut world, promote_phases);
    let brain = world.get::<BossBrain>(boss).unwrap();
    assert_eq!(brain.speed_multiplier, 1.45);
    assert_eq!(world.get::<Sprite>(boss).unwrap().color, brain.profile.tint(3));
    assert_eq!(
        queued_events(&world)[1],
        CombatEvent::BossPhaseChanged { boss, phase: 3 }
    );
}

#[test]
fn a_single_huge_hit_announces_both_phases() {
    let mut world = boss_world(DifficultyMode::Normal);
    let boss = spawn_direct(&mut world, BossKind::DebbieHarry);

    world.get_mut::<Health>(boss).unwrap().take_damage(800.0);
    run_system_once(&mut world, promote_phases);
    assert_eq!(
        queued_events(&world),
        vec![
            CombatEvent::BossPhaseChanged { boss, phase: 2 },
            CombatEvent::BossPhaseChanged { boss, phase: 3 },
        ]
    );
}

#[test]
fn killing_blow_announces_defeat_once() {
    let mut world = boss_world(DifficultyMode::Normal);
    let boss = spawn_direct(&mut world, BossKind::DiscoKing);
    world.get_mut::<BossBrain>(boss).unwrap().running =
        Some(PatternRun::new(BossKind::DiscoKing.profile().table(1)[0].script));

    world.get_mut::<Health>(boss).unwrap().take_damage(10_000.0);
    world.write_message(Killed {
        entity: boss,
        position: Vec2::ZERO,
        source: None,
    });
    run_system_once(&mut world, promote_phases);
    run_system_once(&mut world, announce_defeats);

    assert_eq!(queued_events(&world), vec![CombatEvent::BossDefeated { boss }]);
    assert!(!world.get::<BossBrain>(boss).unwrap().is_attacking());
}

#[test]
fn thinking_turns_patterns_into_hostile_requests() {
    let mut world = boss_world(DifficultyMode::Normal);
    let boss = spawn_direct(&mut world, BossKind::JimmyPage);
    let player = world.spawn_empty().id();
    world.resource_mut::<TargetSnapshot>().players.push(TrackedPlayer {
        entity: player,
        position: Vec2::new(300.0, 0.0),
    });
    world.entity_mut(boss).insert(Targeting {
        target: Some(player),
        countdown: 10,
    });
    world.get_mut::<BossBrain>(boss).unwrap().attack_timer = 0.0;
    world.get_mut::<Combatant>(boss).unwrap().hit_pending = true;

    run_system_once(&mut world, think_bosses);
    assert!(world.get::<BossBrain>(boss).unwrap().is_attacking());
    assert!(!world.get::<Combatant>(boss).unwrap().hit_pending);

    for _ in 0..200 {
        run_system_once(&mut world, think_bosses);
    }
    let msgs = world.resource::<Messages<SpawnProjectileRequest>>();
    let shots: Vec<_> = msgs.get_cursor().read(msgs).copied().collect();
    assert!(!shots.is_empty());
    assert!(shots.iter().all(|s| s.owner.is_none()));
}

#[test]
fn dying_bosses_stop_thinking() {
    let mut world = boss_world(DifficultyMode::Normal);
    let boss = spawn_direct(&mut world, BossKind::DiscoKing);
    world.get_mut::<BossBrain>(boss).unwrap().attack_timer = 0.0;
    world.entity_mut(boss).insert(EnemyLifeState::Dead);

    for _ in 0..10 {
        run_system_once(&mut world, think_bosses);
    }
    assert!(!world.get::<BossBrain>(boss).unwrap().is_attacking());
    assert!(world.resource::<Messages<SpawnProjectileRequest>>().is_empty());
}

#[test]
fn pop_up_bosses_are_out_of_reach_until_they_play() {
    let mut world = boss_world(DifficultyMode::Normal);
    world.init_resource::<NovaQueue>();
    let maurice = spawn_direct(&mut world, BossKind::MauriceGibb);
    let hit = Hit::plain(40.0, Vec2::ZERO);
    let strike = move |world: &mut World| {
        run_system_once(world, move |mut damage: DamageWriter| {
            damage.apply(maurice, &hit, None)
        })
    };

    assert!(world.get::<Untargetable>(maurice).is_some());
    assert_eq!(world.get::<Visibility>(maurice), Some(&Visibility::Hidden));
    let layers = world.get::<CollisionLayers>(maurice).unwrap();
    assert!(!layers.filters.has_all(Layer::PlayerProjectile));
    assert!(strike(&mut world).is_none());

    let player = world.spawn_empty().id();
    world.resource_mut::<TargetSnapshot>().players.push(TrackedPlayer {
        entity: player,
        position: Vec2::new(600.0, 0.0),
    });
    world.entity_mut(maurice).insert(Targeting {
        target: Some(player),
        countdown: 10,
    });
    world.get_mut::<BossBrain>(maurice).unwrap().attack_timer = 0.0;
    run_system_once(&mut world, think_bosses);
    run_system_once(&mut world, expose_pop_ups);

    assert!(world.get::<BossBrain>(maurice).unwrap().is_attacking());
    assert!(world.get::<Untargetable>(maurice).is_none());
    assert_eq!(world.get::<Visibility>(maurice), Some(&Visibility::Inherited));
    let layers = world.get::<CollisionLayers>(maurice).unwrap();
    assert!(layers.filters.has_all(Layer::PlayerProjectile));
    let x = world.get::<Transform>(maurice).unwrap().translation.x;
    assert_eq!((x - 600.0).abs(), POP_UP_DISTANCE);
    assert_eq!(strike(&mut world).map(|o| o.dealt()), Some(40.0));

    world.get_mut::<BossBrain>(maurice).unwrap().running = None;
    run_system_once(&mut world, expose_pop_ups);
    assert!(world.get::<Untargetable>(maurice).is_some());
    assert_eq!(world.get::<Visibility>(maurice), Some(&Visibility::Hidden));
    assert!(strike(&mut world).is_none());
}
