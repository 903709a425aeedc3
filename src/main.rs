//! Storybrawl entry point
//!
//! Headless demo host: a stub engine, a scripted input feed, and the screen
//! dispatch loop. Real builds plug the same controllers into an actual
//! sprite/audio engine; this binary exists to watch the screen flow run.

use std::collections::HashMap;

use glam::{Vec2, Vec3};

use storybrawl::arena::ArenaScreen;
use storybrawl::book::BookScreen;
use storybrawl::engine::{
    ActorId, AnimIndex, AudioSink, CollisionSource, Hud, MusicTrack, SoundCue, Stage, TextPanel,
};
use storybrawl::settings::Settings;
use storybrawl::{FrameInput, Screen, ScreenChange, ScreenContext, Session, StoryText};

const DEMO_STORY: &str = "\
; demo script, stands in for the real STORY data
[intro]
A quiet village woke to drums beyond the hills.
Someone had to pick up the old gloves again.
title
[outro]
The third wave broke and did not come back.
The village slept soundly that night.
The gloves went back on their hook.
Your time:
end
";

/// Frames before the demo gives up
const MAX_FRAMES: u64 = 60_000;
/// Screen changes before the demo stops
const MAX_TRANSITIONS: u32 = 8;

#[derive(Default)]
struct HeadlessActor {
    anim: AnimIndex,
    anim_length: u32,
    ticks_left: u32,
}

/// Stage stub: tracks animations and advances them over time
#[derive(Default)]
struct HeadlessStage {
    next_id: u32,
    actors: HashMap<u32, HeadlessActor>,
}

impl HeadlessStage {
    /// Advance every actor's animation clock by one frame
    fn tick(&mut self) {
        for actor in self.actors.values_mut() {
            if actor.ticks_left > 0 {
                actor.ticks_left -= 1;
            }
        }
    }

    fn clear(&mut self) {
        self.actors.clear();
    }
}

impl Stage for HeadlessStage {
    fn spawn(&mut self, _pos: Vec3, anim: AnimIndex) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        self.actors.insert(
            id,
            HeadlessActor {
                anim,
                anim_length: 30,
                ticks_left: 30,
            },
        );
        ActorId(id)
    }

    fn remove(&mut self, actor: ActorId) {
        self.actors.remove(&actor.0);
    }

    fn set_animation(&mut self, actor: ActorId, anim: AnimIndex) {
        if let Some(a) = self.actors.get_mut(&actor.0) {
            a.anim = anim;
            a.anim_length = 30;
            a.ticks_left = 30;
        }
    }

    fn animation(&self, actor: ActorId) -> AnimIndex {
        self.actors.get(&actor.0).map_or(-1, |a| a.anim)
    }

    fn animation_step(&self, actor: ActorId) -> u32 {
        // Six steps spread across the animation's length
        self.actors.get(&actor.0).map_or(0, |a| {
            let played = a.anim_length - a.ticks_left;
            (played * 6 / a.anim_length).min(5)
        })
    }

    fn animation_ticks_left(&self, actor: ActorId) -> u32 {
        self.actors.get(&actor.0).map_or(0, |a| a.ticks_left)
    }

    fn pause_animation(&mut self, _actor: ActorId) {}

    fn set_position(&mut self, _actor: ActorId, _pos: Vec3) {}

    fn set_base_scale(&mut self, _actor: ActorId, _scale: f32) {}

    fn set_scale(&mut self, _actor: ActorId, _scale: Vec2) {}

    fn set_facing_right(&mut self, _actor: ActorId, _facing_right: bool) {}

    fn set_transparency(&mut self, _actor: ActorId, _alpha: f32) {}

    fn set_visible(&mut self, _actor: ActorId, _visible: bool) {}

    fn spawn_one_shot(&mut self, _pos: Vec3, _anim: AnimIndex, _scale: f32, _facing: bool) {}

    fn spawn_reward_popup(&mut self, amount: u64, _pos: Vec3, _scale: f32) {
        log::debug!("+{amount}");
    }

    fn begin_fade_out(&mut self, ticks: u32) {
        log::debug!("Fading out over {ticks} ticks");
    }
}

struct HeadlessAudio {
    settings: Settings,
}

impl AudioSink for HeadlessAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("sfx {cue:?} at {:.2}", self.settings.effective_sfx());
    }

    fn stop_all(&mut self) {}

    fn play_voice(&mut self, page: usize) {
        if self.settings.voice_enabled {
            log::debug!("voice for page {page}");
        }
    }

    fn stop_voice(&mut self) {}

    fn stream_music(&mut self, track: MusicTrack) {
        log::debug!("music {track:?} at {:.2}", self.settings.effective_music());
    }

    fn stop_music(&mut self) {}
}

#[derive(Default)]
struct HeadlessPanel {
    shown: bool,
}

impl TextPanel for HeadlessPanel {
    fn set_text(&mut self, text: &str) {
        log::info!("[page] {text}");
    }

    fn set_visible(&mut self, visible: bool) {
        self.shown = visible;
    }

    fn visible(&self) -> bool {
        self.shown
    }

    fn begin_buildup(&mut self) {}

    // The stub reveals text instantly
    fn is_built_up(&self) -> bool {
        true
    }

    fn complete_buildup(&mut self) {}
}

struct HeadlessHud;

impl Hud for HeadlessHud {
    fn show_wave_banner(&mut self, wave: u32) {
        log::info!("WAVE {}", wave + 1);
    }

    fn hide_wave_banner(&mut self) {}

    fn set_combat_ui_visible(&mut self, _visible: bool) {}

    fn set_life_ratio(&mut self, _ratio: f32) {}

    fn set_currency(&mut self, _amount: u64) {}

    fn show_victory(&mut self) {
        log::info!("VICTORY");
    }

    fn show_upgrade_menu(&mut self) {
        log::info!("Upgrade menu up");
    }

    fn show_game_over(&mut self) {
        log::info!("GAME OVER");
    }

    fn set_upgrade_costs(&mut self, strength: Option<u64>, stamina: Option<u64>) {
        log::info!("Costs: strength {strength:?}, stamina {stamina:?}");
    }

    fn set_upgrade_cursor(&mut self, _slot: usize) {}
}

/// Everything collides on a fixed beat; the sim's invincibility and
/// cooldown rules shape that into actual combat
struct PulseCollisions {
    pulse: bool,
}

impl CollisionSource for PulseCollisions {
    fn collided(&self, _actor: ActorId) -> bool {
        self.pulse
    }
}

/// Canned player: mash confirm, punch often, pace around
fn scripted_input(frame: u64) -> FrameInput {
    FrameInput {
        confirm: frame % 45 == 0,
        action: frame % 15 == 0,
        down: frame % 300 == 0,
        right_held: (frame / 120) % 2 == 0,
        left_held: (frame / 120) % 2 == 1,
        up_held: (frame / 200) % 2 == 1,
        ..Default::default()
    }
}

fn main() {
    env_logger::init();
    log::info!("Storybrawl headless demo starting");

    let settings = Settings::default();
    let story = StoryText::parse(DEMO_STORY).expect("demo story script parses");

    let mut session = Session::new();
    let mut stage = HeadlessStage::default();
    let mut audio = HeadlessAudio { settings };
    let mut panel = HeadlessPanel::default();
    let mut hud = HeadlessHud;

    let idle_collisions = PulseCollisions { pulse: false };
    let mut screen: Box<dyn Screen> = {
        let mut ctx = ScreenContext {
            input: FrameInput::default(),
            session: &mut session,
            stage: &mut stage,
            audio: &mut audio,
            text: &mut panel,
            hud: &mut hud,
            collisions: &idle_collisions,
        };
        Box::new(BookScreen::new("intro", &story, &mut ctx).expect("demo story has an intro"))
    };

    let mut transitions = 0;
    for frame in 0..MAX_FRAMES {
        stage.tick();
        let collisions = PulseCollisions {
            pulse: frame % 90 == 0,
        };
        let change = {
            let mut ctx = ScreenContext {
                input: scripted_input(frame),
                session: &mut session,
                stage: &mut stage,
                audio: &mut audio,
                text: &mut panel,
                hud: &mut hud,
                collisions: &collisions,
            };
            screen.update(&mut ctx)
        };

        if let Some(change) = change {
            log::info!("Screen change at frame {frame}: {change:?}");
            transitions += 1;
            if transitions >= MAX_TRANSITIONS {
                break;
            }

            // The host owns teardown: wipe the stage, then build the next screen
            stage.clear();
            let mut ctx = ScreenContext {
                input: FrameInput::default(),
                session: &mut session,
                stage: &mut stage,
                audio: &mut audio,
                text: &mut panel,
                hud: &mut hud,
                collisions: &collisions,
            };
            screen = match change {
                ScreenChange::Book { section } => Box::new(
                    BookScreen::new(&section, &story, &mut ctx)
                        .expect("demo story has all sections"),
                ),
                ScreenChange::Arena => Box::new(ArenaScreen::new(frame, &mut ctx)),
            };
        }
    }

    log::info!(
        "Demo finished after {} transitions: wave {}, currency {}, time {}",
        transitions,
        session.wave,
        session.currency,
        session.speedrun_string()
    );
}
