//! The headliners and their set lists.

use bevy::prelude::*;
use rand::Rng;

use crate::common::element::Element;
use crate::common::weighted;

use super::patterns::{PatternAction as A, PatternScript, ScriptStep, Shot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BossKind {
    DiscoKing,
    Arnoldo,
    JimmyPage,
    JoeyRamone,
    DebbieHarry,
    BarryGibb,
    RobinGibb,
    MauriceGibb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPattern {
    pub script: &'static PatternScript,
    pub weight: f32,
}

/// Fixed stats and pattern tables of one boss.
#[derive(Debug, Clone, PartialEq)]
pub struct BossProfile {
    pub name: &'static str,
    pub max_health: f32,
    pub speed: f32,
    pub size: Vec2,
    pub flies: bool,
    /// Stays hidden and untouchable between patterns, popping up beside its
    /// target to play each one.
    pub pop_up: bool,
    /// Pause between two patterns at phase speed 1.
    pub attack_interval: f32,
    pub phase_speed: [f32; 3],
    pub phase_tint: [Color; 3],
    pub phases: [&'static [WeightedPattern]; 3],
}

impl BossProfile {
    /// Pattern table of `phase`, clamped into the known phases.
    pub fn table(&self, phase: u8) -> &'static [WeightedPattern] {
        self.phases[phase.clamp(1, 3) as usize - 1]
    }

    pub fn speed_multiplier(&self, phase: u8) -> f32 {
        self.phase_speed[phase.clamp(1, 3) as usize - 1]
    }

    pub fn tint(&self, phase: u8) -> Color {
        self.phase_tint[phase.clamp(1, 3) as usize - 1]
    }

    /// Roll the next pattern for `phase`.
    pub fn choose<R: Rng + ?Sized>(&self, phase: u8, rng: &mut R) -> Option<&'static PatternScript> {
        let table = self.table(phase);
        let weights: Vec<f32> = table.iter().map(|p| p.weight).collect();
        weighted::pick(&weights, rng).map(|i| table[i].script)
    }
}

/// Who headlines each level, cycling after the last.
const LINEUPS: [&[BossKind]; 5] = [
    &[BossKind::DiscoKing],
    &[BossKind::Arnoldo],
    &[BossKind::JimmyPage],
    &[BossKind::JoeyRamone, BossKind::DebbieHarry],
    &[BossKind::BarryGibb, BossKind::RobinGibb, BossKind::MauriceGibb],
];

impl BossKind {
    pub const ALL: [BossKind; 8] = [
        BossKind::DiscoKing,
        BossKind::Arnoldo,
        BossKind::JimmyPage,
        BossKind::JoeyRamone,
        BossKind::DebbieHarry,
        BossKind::BarryGibb,
        BossKind::RobinGibb,
        BossKind::MauriceGibb,
    ];

    /// Bosses of `level`'s final zone. Level 0 counts as level 1.
    pub fn lineup(level: u32) -> &'static [BossKind] {
        LINEUPS[(level.max(1) as usize - 1) % LINEUPS.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            BossKind::DiscoKing => "Disco King",
            BossKind::Arnoldo => "Arnoldo",
            BossKind::JimmyPage => "Jimmy Page",
            BossKind::JoeyRamone => "Joey Ramone",
            BossKind::DebbieHarry => "Debbie Harry",
            BossKind::BarryGibb => "Barry Gibb",
            BossKind::RobinGibb => "Robin Gibb",
            BossKind::MauriceGibb => "Maurice Gibb",
        }
    }

    pub fn profile(self) -> BossProfile {
        match self {
            BossKind::DiscoKing => BossProfile {
                name: self.name(),
                max_health: 600.0,
                speed: 140.0,
                size: Vec2::new(56.0, 72.0),
                flies: false,
                pop_up: false,
                attack_interval: 1.6,
                phase_speed: [1.0, 1.2, 1.45],
                phase_tint: [
                    Color::srgb(0.95, 0.8, 0.2),
                    Color::srgb(1.0, 0.55, 0.2),
                    Color::srgb(1.0, 0.25, 0.3),
                ],
                phases: [&KING_1, &KING_2, &KING_3],
            },
            BossKind::JimmyPage => BossProfile {
                name: self.name(),
                max_health: 750.0,
                speed: 150.0,
                size: Vec2::new(48.0, 76.0),
                flies: false,
                pop_up: false,
                attack_interval: 1.5,
                phase_speed: [1.0, 1.25, 1.5],
                phase_tint: [
                    Color::srgb(0.2, 0.2, 0.25),
                    Color::srgb(0.45, 0.1, 0.5),
                    Color::srgb(0.8, 0.1, 0.2),
                ],
                phases: [&PAGE_1, &PAGE_2, &PAGE_3],
            },
            BossKind::DebbieHarry => BossProfile {
                name: self.name(),
                max_health: 850.0,
                speed: 170.0,
                size: Vec2::new(44.0, 70.0),
                flies: false,
                pop_up: false,
                attack_interval: 1.4,
                phase_speed: [1.0, 1.2, 1.5],
                phase_tint: [
                    Color::srgb(0.95, 0.95, 0.6),
                    Color::srgb(0.6, 0.9, 1.0),
                    Color::srgb(1.0, 0.4, 0.8),
                ],
                phases: [&HARRY_1, &HARRY_2, &HARRY_3],
            },
            BossKind::BarryGibb => BossProfile {
                name: self.name(),
                max_health: 1000.0,
                speed: 130.0,
                size: Vec2::new(52.0, 64.0),
                flies: true,
                pop_up: false,
                attack_interval: 1.3,
                phase_speed: [1.0, 1.3, 1.6],
                phase_tint: [
                    Color::srgb(0.9, 0.9, 0.95),
                    Color::srgb(0.7, 0.8, 1.0),
                    Color::srgb(1.0, 0.85, 0.3),
                ],
                phases: [&GIBB_1, &GIBB_2, &GIBB_3],
            },
            BossKind::Arnoldo => BossProfile {
                name: self.name(),
                max_health: 700.0,
                speed: 110.0,
                size: Vec2::new(64.0, 80.0),
                flies: false,
                pop_up: false,
                attack_interval: 1.7,
                phase_speed: [1.0, 1.2, 1.4],
                phase_tint: [
                    Color::srgb(0.85, 0.6, 0.45),
                    Color::srgb(0.95, 0.45, 0.35),
                    Color::srgb(1.0, 0.2, 0.2),
                ],
                phases: [&ARNOLDO_1, &ARNOLDO_2, &ARNOLDO_3],
            },
            BossKind::JoeyRamone => BossProfile {
                name: self.name(),
                max_health: 800.0,
                speed: 175.0,
                size: Vec2::new(44.0, 76.0),
                flies: false,
                pop_up: false,
                attack_interval: 1.4,
                phase_speed: [1.0, 1.25, 1.55],
                phase_tint: [
                    Color::srgb(0.25, 0.25, 0.3),
                    Color::srgb(0.55, 0.45, 0.9),
                    Color::srgb(0.8, 0.15, 0.15),
                ],
                phases: [&RAMONE_1, &RAMONE_2, &RAMONE_3],
            },
            BossKind::RobinGibb => BossProfile {
                name: self.name(),
                max_health: 900.0,
                speed: 150.0,
                size: Vec2::new(44.0, 76.0),
                flies: false,
                pop_up: false,
                attack_interval: 1.4,
                phase_speed: [1.0, 1.2, 1.5],
                phase_tint: [
                    Color::srgb(0.95, 0.9, 0.8),
                    Color::srgb(0.95, 0.75, 0.5),
                    Color::srgb(1.0, 0.5, 0.3),
                ],
                phases: [&ROBIN_1, &ROBIN_2, &ROBIN_3],
            },
            BossKind::MauriceGibb => BossProfile {
                name: self.name(),
                max_health: 650.0,
                speed: 0.0,
                size: Vec2::new(44.0, 76.0),
                flies: false,
                pop_up: true,
                attack_interval: 2.0,
                phase_speed: [1.0, 1.25, 1.5],
                phase_tint: [
                    Color::srgb(0.3, 0.35, 0.5),
                    Color::srgb(0.4, 0.5, 0.8),
                    Color::srgb(0.9, 0.6, 0.2),
                ],
                phases: [&MAURICE_1, &MAURICE_2, &MAURICE_3],
            },
        }
    }
}

const fn at(at: f32, action: A) -> ScriptStep {
    ScriptStep { at, action }
}

const fn w(script: &'static PatternScript, weight: f32) -> WeightedPattern {
    WeightedPattern { script, weight }
}

// Disco King ------------------------------------------------------------------------

static MIRROR_BALL: PatternScript = PatternScript {
    name: "mirror_ball",
    duration: 1.2,
    enrage: false,
    steps: &[
        at(0.1, A::Ring { shot: Shot::plain(220.0, 8.0), count: 8 }),
        at(0.6, A::Ring { shot: Shot::plain(220.0, 8.0), count: 8 }),
    ],
};

static BOOGIE_SHOT: PatternScript = PatternScript {
    name: "boogie_shot",
    duration: 0.8,
    enrage: false,
    steps: &[at(0.1, A::Spread { shot: Shot::plain(300.0, 10.0), count: 3, arc: 30.0 })],
};

static FLOOR_WAVE: PatternScript = PatternScript {
    name: "floor_wave",
    duration: 1.0,
    enrage: false,
    steps: &[
        at(0.2, A::Stomp { radius: 90.0, damage: 14.0 }),
        at(0.25, A::GroundWave { shot: Shot::plain(260.0, 12.0) }),
    ],
};

static GLITTER_RAIN: PatternScript = PatternScript {
    name: "glitter_rain",
    duration: 1.5,
    enrage: false,
    steps: &[
        at(0.2, A::Rain { shot: Shot::plain(240.0, 9.0), count: 5, width: 240.0 }),
        at(0.9, A::Rain { shot: Shot::plain(240.0, 9.0), count: 5, width: 320.0 }),
    ],
};

static SATURDAY_NIGHT_FEVER: PatternScript = PatternScript {
    name: "saturday_night_fever",
    duration: 2.4,
    enrage: true,
    steps: &[
        at(0.1, A::Ring { shot: Shot::elemental(240.0, 10.0, Element::Fire), count: 12 }),
        at(0.5, A::Spread { shot: Shot::plain(320.0, 10.0), count: 5, arc: 50.0 }),
        at(1.0, A::Ring { shot: Shot::elemental(240.0, 10.0, Element::Fire), count: 12 }),
        at(1.5, A::Lunge { speed: 420.0 }),
        at(2.0, A::Stomp { radius: 110.0, damage: 18.0 }),
    ],
};

static KING_1: [WeightedPattern; 2] = [w(&MIRROR_BALL, 40.0), w(&BOOGIE_SHOT, 60.0)];
static KING_2: [WeightedPattern; 3] = [
    w(&MIRROR_BALL, 1.0),
    w(&BOOGIE_SHOT, 1.0),
    w(&FLOOR_WAVE, 1.0),
];
static KING_3: [WeightedPattern; 5] = [
    w(&MIRROR_BALL, 20.0),
    w(&BOOGIE_SHOT, 20.0),
    w(&FLOOR_WAVE, 20.0),
    w(&GLITTER_RAIN, 20.0),
    w(&SATURDAY_NIGHT_FEVER, 20.0),
];

// Jimmy Page ------------------------------------------------------------------------

static SWEEP: PatternScript = PatternScript {
    name: "sweep",
    duration: 1.0,
    enrage: false,
    steps: &[
        at(0.1, A::Aimed { shot: Shot::plain(340.0, 9.0) }),
        at(0.3, A::Aimed { shot: Shot::plain(340.0, 9.0) }),
        at(0.5, A::Aimed { shot: Shot::plain(340.0, 9.0) }),
    ],
};

static FEEDBACK: PatternScript = PatternScript {
    name: "feedback",
    duration: 1.2,
    enrage: false,
    steps: &[at(0.3, A::Ring { shot: Shot::elemental(200.0, 8.0, Element::Electric), count: 10 })],
};

static PYRO: PatternScript = PatternScript {
    name: "pyro",
    duration: 1.4,
    enrage: false,
    steps: &[
        at(0.2, A::Spread { shot: Shot::elemental(280.0, 11.0, Element::Fire), count: 3, arc: 24.0 }),
        at(0.8, A::Spread { shot: Shot::elemental(280.0, 11.0, Element::Fire), count: 3, arc: 24.0 }),
    ],
};

static CHORD: PatternScript = PatternScript {
    name: "chord",
    duration: 1.0,
    enrage: false,
    steps: &[
        at(0.15, A::GroundWave { shot: Shot::plain(300.0, 12.0) }),
        at(0.6, A::GroundWave { shot: Shot::plain(300.0, 12.0) }),
    ],
};

static SOLO: PatternScript = PatternScript {
    name: "solo",
    duration: 2.6,
    enrage: true,
    steps: &[
        at(0.1, A::Spread { shot: Shot::elemental(360.0, 10.0, Element::Electric), count: 5, arc: 60.0 }),
        at(0.6, A::Spread { shot: Shot::elemental(360.0, 10.0, Element::Electric), count: 5, arc: 60.0 }),
        at(1.1, A::Ring { shot: Shot::plain(260.0, 9.0), count: 16 }),
        at(1.6, A::Lunge { speed: 460.0 }),
        at(2.1, A::Stomp { radius: 100.0, damage: 20.0 }),
    ],
};

static PAGE_1: [WeightedPattern; 2] = [w(&SWEEP, 40.0), w(&FEEDBACK, 60.0)];
static PAGE_2: [WeightedPattern; 3] = [w(&SWEEP, 1.0), w(&FEEDBACK, 1.0), w(&PYRO, 1.0)];
static PAGE_3: [WeightedPattern; 5] = [
    w(&SWEEP, 20.0),
    w(&FEEDBACK, 20.0),
    w(&PYRO, 20.0),
    w(&CHORD, 20.0),
    w(&SOLO, 20.0),
];

// Debbie Harry ----------------------------------------------------------------------

static HEART_OF_GLASS: PatternScript = PatternScript {
    name: "heart_of_glass",
    duration: 1.2,
    enrage: false,
    steps: &[
        at(0.1, A::Ring { shot: Shot::elemental(210.0, 8.0, Element::Ice), count: 6 }),
        at(0.5, A::Ring { shot: Shot::elemental(210.0, 8.0, Element::Ice), count: 6 }),
    ],
};

static CALL_ME: PatternScript = PatternScript {
    name: "call_me",
    duration: 0.9,
    enrage: false,
    steps: &[
        at(0.1, A::Aimed { shot: Shot::plain(380.0, 11.0) }),
        at(0.4, A::Spread { shot: Shot::plain(380.0, 9.0), count: 3, arc: 20.0 }),
    ],
};

static ONE_WAY: PatternScript = PatternScript {
    name: "one_way",
    duration: 1.1,
    enrage: false,
    steps: &[
        at(0.1, A::Lunge { speed: 480.0 }),
        at(0.5, A::Stomp { radius: 80.0, damage: 16.0 }),
    ],
};

static RAPTURE: PatternScript = PatternScript {
    name: "rapture",
    duration: 1.6,
    enrage: false,
    steps: &[
        at(0.2, A::Rain { shot: Shot::elemental(260.0, 9.0, Element::Ice), count: 6, width: 300.0 }),
        at(0.8, A::Rain { shot: Shot::plain(260.0, 9.0), count: 6, width: 360.0 }),
    ],
};

static ATOMIC: PatternScript = PatternScript {
    name: "atomic",
    duration: 2.2,
    enrage: true,
    steps: &[
        at(0.1, A::Ring { shot: Shot::elemental(240.0, 12.0, Element::Explosive), count: 10 }),
        at(0.6, A::Homing { shot: Shot::plain(220.0, 10.0), count: 3, turn_rate: 2.5 }),
        at(1.2, A::Ring { shot: Shot::elemental(240.0, 12.0, Element::Explosive), count: 10 }),
        at(1.7, A::GroundWave { shot: Shot::plain(320.0, 14.0) }),
    ],
};

static HARRY_1: [WeightedPattern; 2] = [w(&HEART_OF_GLASS, 40.0), w(&CALL_ME, 60.0)];
static HARRY_2: [WeightedPattern; 3] = [
    w(&HEART_OF_GLASS, 1.0),
    w(&CALL_ME, 1.0),
    w(&ONE_WAY, 1.0),
];
static HARRY_3: [WeightedPattern; 5] = [
    w(&HEART_OF_GLASS, 20.0),
    w(&CALL_ME, 20.0),
    w(&ONE_WAY, 20.0),
    w(&RAPTURE, 20.0),
    w(&ATOMIC, 20.0),
];

// Barry Gibb ------------------------------------------------------------------------

static HEAT_SEEKER: PatternScript = PatternScript {
    name: "heat_seeker",
    duration: 1.2,
    enrage: false,
    steps: &[at(0.2, A::Homing { shot: Shot::plain(200.0, 10.0), count: 2, turn_rate: 2.0 })],
};

static MISSILE_RAIN: PatternScript = PatternScript {
    name: "missile_rain",
    duration: 1.4,
    enrage: false,
    steps: &[
        at(0.2, A::Rain { shot: Shot::elemental(280.0, 10.0, Element::Explosive), count: 4, width: 260.0 }),
        at(0.8, A::Rain { shot: Shot::elemental(280.0, 10.0, Element::Explosive), count: 4, width: 260.0 }),
    ],
};

static STROBE_BURST: PatternScript = PatternScript {
    name: "strobe_burst",
    duration: 1.0,
    enrage: false,
    steps: &[
        at(0.1, A::Spread { shot: Shot::elemental(330.0, 8.0, Element::Electric), count: 4, arc: 40.0 }),
        at(0.5, A::Spread { shot: Shot::elemental(330.0, 8.0, Element::Electric), count: 4, arc: 40.0 }),
    ],
};

static FALSETTO_RING: PatternScript = PatternScript {
    name: "falsetto_ring",
    duration: 1.3,
    enrage: false,
    steps: &[
        at(0.1, A::Ring { shot: Shot::plain(230.0, 9.0), count: 14 }),
        at(0.7, A::Ring { shot: Shot::plain(260.0, 9.0), count: 14 }),
    ],
};

static STAYIN_ALIVE: PatternScript = PatternScript {
    name: "stayin_alive",
    duration: 3.0,
    enrage: true,
    steps: &[
        at(0.1, A::Homing { shot: Shot::plain(230.0, 11.0), count: 4, turn_rate: 3.0 }),
        at(0.7, A::Rain { shot: Shot::elemental(300.0, 11.0, Element::Explosive), count: 6, width: 360.0 }),
        at(1.3, A::Ring { shot: Shot::plain(260.0, 10.0), count: 16 }),
        at(1.9, A::Homing { shot: Shot::plain(230.0, 11.0), count: 4, turn_rate: 3.0 }),
        at(2.5, A::Ring { shot: Shot::elemental(260.0, 10.0, Element::Electric), count: 16 }),
    ],
};

static GIBB_1: [WeightedPattern; 2] = [w(&HEAT_SEEKER, 40.0), w(&MISSILE_RAIN, 60.0)];
static GIBB_2: [WeightedPattern; 3] = [
    w(&HEAT_SEEKER, 1.0),
    w(&MISSILE_RAIN, 1.0),
    w(&STROBE_BURST, 1.0),
];
static GIBB_3: [WeightedPattern; 5] = [
    w(&HEAT_SEEKER, 20.0),
    w(&MISSILE_RAIN, 20.0),
    w(&STROBE_BURST, 20.0),
    w(&FALSETTO_RING, 20.0),
    w(&STAYIN_ALIVE, 20.0),
];

// Arnoldo ---------------------------------------------------------------------------

static FLEX: PatternScript = PatternScript {
    name: "flex",
    duration: 1.1,
    enrage: false,
    steps: &[
        at(0.3, A::Stomp { radius: 120.0, damage: 16.0 }),
        at(0.35, A::Ring { shot: Shot::plain(200.0, 8.0), count: 8 }),
    ],
};

static THROW: PatternScript = PatternScript {
    name: "throw",
    duration: 0.9,
    enrage: false,
    steps: &[at(0.25, A::Aimed { shot: Shot::plain(260.0, 16.0) })],
};

static BENCH_SWEEP: PatternScript = PatternScript {
    name: "sweep",
    duration: 1.0,
    enrage: false,
    steps: &[
        at(0.1, A::Lunge { speed: 380.0 }),
        at(0.45, A::Stomp { radius: 90.0, damage: 14.0 }),
    ],
};

static DUMBBELL_RAIN: PatternScript = PatternScript {
    name: "dumbbell_rain",
    duration: 1.4,
    enrage: false,
    steps: &[
        at(0.2, A::Rain { shot: Shot::plain(220.0, 12.0), count: 4, width: 280.0 }),
        at(0.8, A::Rain { shot: Shot::plain(220.0, 12.0), count: 4, width: 280.0 }),
    ],
};

static PUMP_UP: PatternScript = PatternScript {
    name: "pump_up",
    duration: 2.2,
    enrage: true,
    steps: &[
        at(0.1, A::Stomp { radius: 130.0, damage: 20.0 }),
        at(0.2, A::Ring { shot: Shot::elemental(220.0, 10.0, Element::Explosive), count: 12 }),
        at(0.7, A::Spread { shot: Shot::plain(300.0, 14.0), count: 3, arc: 30.0 }),
        at(1.2, A::Lunge { speed: 440.0 }),
        at(1.6, A::Stomp { radius: 130.0, damage: 20.0 }),
    ],
};

static ARNOLDO_1: [WeightedPattern; 2] = [w(&FLEX, 40.0), w(&THROW, 60.0)];
static ARNOLDO_2: [WeightedPattern; 3] = [w(&FLEX, 1.0), w(&THROW, 1.0), w(&BENCH_SWEEP, 1.0)];
static ARNOLDO_3: [WeightedPattern; 5] = [
    w(&FLEX, 20.0),
    w(&THROW, 20.0),
    w(&BENCH_SWEEP, 20.0),
    w(&DUMBBELL_RAIN, 20.0),
    w(&PUMP_UP, 20.0),
];

// Joey Ramone -----------------------------------------------------------------------

static MIC_SWING: PatternScript = PatternScript {
    name: "mic_swing",
    duration: 0.9,
    enrage: false,
    steps: &[
        at(0.2, A::Stomp { radius: 70.0, damage: 14.0 }),
        at(0.5, A::Stomp { radius: 70.0, damage: 14.0 }),
    ],
};

static FEEDBACK_SHRIEK: PatternScript = PatternScript {
    name: "feedback_shriek",
    duration: 1.1,
    enrage: false,
    steps: &[at(0.3, A::Ring { shot: Shot::elemental(220.0, 8.0, Element::Electric), count: 12 })],
};

static CROWD_SURF: PatternScript = PatternScript {
    name: "crowd_surf",
    duration: 1.1,
    enrage: false,
    steps: &[
        at(0.1, A::Lunge { speed: 500.0 }),
        at(0.6, A::Stomp { radius: 100.0, damage: 16.0 }),
    ],
};

static WALL_OF_SOUND: PatternScript = PatternScript {
    name: "wall_of_sound",
    duration: 1.2,
    enrage: false,
    steps: &[
        at(0.15, A::GroundWave { shot: Shot::plain(320.0, 12.0) }),
        at(0.4, A::Spread { shot: Shot::plain(340.0, 9.0), count: 5, arc: 16.0 }),
        at(0.7, A::GroundWave { shot: Shot::plain(320.0, 12.0) }),
    ],
};

static BLITZKRIEG_BOP: PatternScript = PatternScript {
    name: "blitzkrieg_bop",
    duration: 2.4,
    enrage: true,
    steps: &[
        at(0.1, A::Lunge { speed: 520.0 }),
        at(0.4, A::Stomp { radius: 80.0, damage: 14.0 }),
        at(0.7, A::Lunge { speed: 520.0 }),
        at(1.0, A::Stomp { radius: 80.0, damage: 14.0 }),
        at(1.4, A::Ring { shot: Shot::elemental(240.0, 9.0, Element::Electric), count: 16 }),
        at(1.8, A::GroundWave { shot: Shot::plain(340.0, 13.0) }),
    ],
};

static RAMONE_1: [WeightedPattern; 2] = [w(&MIC_SWING, 40.0), w(&FEEDBACK_SHRIEK, 60.0)];
static RAMONE_2: [WeightedPattern; 3] = [
    w(&MIC_SWING, 1.0),
    w(&FEEDBACK_SHRIEK, 1.0),
    w(&CROWD_SURF, 1.0),
];
static RAMONE_3: [WeightedPattern; 5] = [
    w(&MIC_SWING, 20.0),
    w(&FEEDBACK_SHRIEK, 20.0),
    w(&CROWD_SURF, 20.0),
    w(&WALL_OF_SOUND, 20.0),
    w(&BLITZKRIEG_BOP, 20.0),
];

// Robin Gibb ------------------------------------------------------------------------

static SPREAD_SHOT: PatternScript = PatternScript {
    name: "spread_shot",
    duration: 0.9,
    enrage: false,
    steps: &[at(0.3, A::Spread { shot: Shot::plain(320.0, 9.0), count: 5, arc: 48.0 })],
};

static DISCO_STOMP: PatternScript = PatternScript {
    name: "disco_stomp",
    duration: 1.1,
    enrage: false,
    steps: &[
        at(0.4, A::Stomp { radius: 110.0, damage: 16.0 }),
        at(0.45, A::GroundWave { shot: Shot::plain(280.0, 11.0) }),
    ],
};

static SPINNING_RECORDS: PatternScript = PatternScript {
    name: "spinning_records",
    duration: 0.9,
    enrage: false,
    steps: &[
        at(0.1, A::Aimed { shot: Shot::plain(360.0, 10.0) }),
        at(0.3, A::Aimed { shot: Shot::plain(360.0, 10.0) }),
        at(0.5, A::Aimed { shot: Shot::plain(360.0, 10.0) }),
    ],
};

static FALSETTO_WAVE: PatternScript = PatternScript {
    name: "falsetto_wave",
    duration: 1.2,
    enrage: false,
    steps: &[
        at(0.2, A::GroundWave { shot: Shot::plain(300.0, 10.0) }),
        at(0.6, A::Ring { shot: Shot::elemental(230.0, 8.0, Element::Ice), count: 10 }),
    ],
};

static TRAGEDY: PatternScript = PatternScript {
    name: "tragedy",
    duration: 2.5,
    enrage: true,
    steps: &[
        at(0.1, A::Spread { shot: Shot::elemental(320.0, 10.0, Element::Ice), count: 7, arc: 70.0 }),
        at(0.6, A::Stomp { radius: 120.0, damage: 18.0 }),
        at(1.1, A::Ring { shot: Shot::elemental(240.0, 9.0, Element::Ice), count: 14 }),
        at(1.6, A::Spread { shot: Shot::elemental(320.0, 10.0, Element::Ice), count: 7, arc: 70.0 }),
        at(2.0, A::GroundWave { shot: Shot::plain(320.0, 12.0) }),
    ],
};

static ROBIN_1: [WeightedPattern; 2] = [w(&SPREAD_SHOT, 40.0), w(&DISCO_STOMP, 60.0)];
static ROBIN_2: [WeightedPattern; 3] = [
    w(&SPREAD_SHOT, 1.0),
    w(&DISCO_STOMP, 1.0),
    w(&SPINNING_RECORDS, 1.0),
];
static ROBIN_3: [WeightedPattern; 5] = [
    w(&SPREAD_SHOT, 20.0),
    w(&DISCO_STOMP, 20.0),
    w(&SPINNING_RECORDS, 20.0),
    w(&FALSETTO_WAVE, 20.0),
    w(&TRAGEDY, 20.0),
];

// Maurice Gibb ----------------------------------------------------------------------

static LASER_SWEEP: PatternScript = PatternScript {
    name: "laser_sweep",
    duration: 1.1,
    enrage: false,
    steps: &[
        at(0.2, A::Beam { shot: Shot::elemental(420.0, 9.0, Element::Electric), count: 5, from: -40.0, to: 0.0 }),
        at(0.5, A::Beam { shot: Shot::elemental(420.0, 9.0, Element::Electric), count: 5, from: -20.0, to: 20.0 }),
        at(0.8, A::Beam { shot: Shot::elemental(420.0, 9.0, Element::Electric), count: 5, from: 0.0, to: 40.0 }),
    ],
};

static LASER_CROSS: PatternScript = PatternScript {
    name: "laser_cross",
    duration: 1.0,
    enrage: false,
    steps: &[
        at(0.2, A::Beam { shot: Shot::plain(400.0, 10.0), count: 4, from: 0.0, to: 270.0 }),
        at(0.6, A::Beam { shot: Shot::plain(400.0, 10.0), count: 4, from: 45.0, to: 315.0 }),
    ],
};

static LASER_SPIRAL: PatternScript = PatternScript {
    name: "laser_spiral",
    duration: 1.4,
    enrage: false,
    steps: &[
        at(0.1, A::Beam { shot: Shot::plain(360.0, 8.0), count: 3, from: 0.0, to: 240.0 }),
        at(0.3, A::Beam { shot: Shot::plain(360.0, 8.0), count: 3, from: 20.0, to: 260.0 }),
        at(0.5, A::Beam { shot: Shot::plain(360.0, 8.0), count: 3, from: 40.0, to: 280.0 }),
        at(0.7, A::Beam { shot: Shot::plain(360.0, 8.0), count: 3, from: 60.0, to: 300.0 }),
        at(0.9, A::Beam { shot: Shot::plain(360.0, 8.0), count: 3, from: 80.0, to: 320.0 }),
        at(1.1, A::Beam { shot: Shot::plain(360.0, 8.0), count: 3, from: 100.0, to: 340.0 }),
    ],
};

static LASER_FAN: PatternScript = PatternScript {
    name: "laser_fan",
    duration: 1.2,
    enrage: false,
    steps: &[
        at(0.2, A::Beam { shot: Shot::plain(380.0, 9.0), count: 9, from: -80.0, to: 80.0 }),
        at(0.7, A::Beam { shot: Shot::plain(380.0, 9.0), count: 8, from: -70.0, to: 70.0 }),
    ],
};

static JIVE_TALKIN: PatternScript = PatternScript {
    name: "jive_talkin",
    duration: 2.6,
    enrage: true,
    steps: &[
        at(0.1, A::Beam { shot: Shot::elemental(420.0, 10.0, Element::Electric), count: 4, from: 0.0, to: 270.0 }),
        at(0.4, A::Beam { shot: Shot::elemental(420.0, 10.0, Element::Electric), count: 4, from: 45.0, to: 315.0 }),
        at(0.9, A::Beam { shot: Shot::plain(360.0, 9.0), count: 6, from: 0.0, to: 300.0 }),
        at(1.3, A::Beam { shot: Shot::plain(360.0, 9.0), count: 6, from: 30.0, to: 330.0 }),
        at(1.8, A::Homing { shot: Shot::plain(220.0, 10.0), count: 3, turn_rate: 2.5 }),
        at(2.2, A::Beam { shot: Shot::plain(400.0, 9.0), count: 9, from: -80.0, to: 80.0 }),
    ],
};

static MAURICE_1: [WeightedPattern; 2] = [w(&LASER_SWEEP, 40.0), w(&LASER_CROSS, 60.0)];
static MAURICE_2: [WeightedPattern; 3] = [
    w(&LASER_SWEEP, 1.0),
    w(&LASER_CROSS, 1.0),
    w(&LASER_SPIRAL, 1.0),
];
static MAURICE_3: [WeightedPattern; 5] = [
    w(&LASER_SWEEP, 20.0),
    w(&LASER_CROSS, 20.0),
    w(&LASER_SPIRAL, 20.0),
    w(&LASER_FAN, 20.0),
    w(&JIVE_TALKIN, 20.0),
];
