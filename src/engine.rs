//! Capability interfaces for the external engine
//!
//! The sprite/animation engine, sound playback, text-box rendering, HUD
//! widgets, and collision detection all live outside this crate. The
//! controllers drive them through these traits and never see asset files,
//! draw calls, or collision math.

use glam::{Vec2, Vec3};

/// Handle to an actor entity owned by the sprite engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(pub u32);

/// Concrete animation index in the loaded animation table
pub type AnimIndex = i32;

/// The blank animation slot (empty page faces between flips)
pub const ANIM_BLANK: AnimIndex = -1;

/// Sprite engine facade: actor lifetime, animation and draw state
pub trait Stage {
    /// Create an actor at `pos` playing `anim`, returning its handle
    fn spawn(&mut self, pos: Vec3, anim: AnimIndex) -> ActorId;
    /// Destroy an actor and release its engine-side resources
    fn remove(&mut self, actor: ActorId);

    fn set_animation(&mut self, actor: ActorId, anim: AnimIndex);
    fn animation(&self, actor: ActorId) -> AnimIndex;
    /// Current step index within the playing animation
    fn animation_step(&self, actor: ActorId) -> u32;
    /// Ticks until the playing animation finishes (0 = done or looping)
    fn animation_ticks_left(&self, actor: ActorId) -> u32;
    fn pause_animation(&mut self, actor: ActorId);

    fn set_position(&mut self, actor: ActorId, pos: Vec3);
    /// Uniform base draw scale (pseudo-3D shrink toward the horizon)
    fn set_base_scale(&mut self, actor: ActorId, scale: f32);
    /// Per-axis draw scale on top of the base (page squash during flips)
    fn set_scale(&mut self, actor: ActorId, scale: Vec2);
    fn set_facing_right(&mut self, actor: ActorId, facing_right: bool);
    fn set_transparency(&mut self, actor: ActorId, alpha: f32);
    fn set_visible(&mut self, actor: ActorId, visible: bool);

    /// Fire-and-forget effect actor (blood splatter); the engine removes it
    /// when its animation ends
    fn spawn_one_shot(&mut self, pos: Vec3, anim: AnimIndex, scale: f32, facing_right: bool);
    /// Floating number popup above a defeated enemy
    fn spawn_reward_popup(&mut self, amount: u64, pos: Vec3, scale: f32);

    /// Start the host's fade-to-black over `ticks` frames
    fn begin_fade_out(&mut self, ticks: u32);
}

/// Named sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Page turned in the book screen
    PageTurn,
    PlayerPunch,
    PlayerHit,
    PlayerDeath,
    EnemyHit,
    EnemyDeath,
    /// Wave cleared
    Victory,
    /// Out of options on the upgrade screen
    GameOverJingle,
    MenuMove,
    MenuBuy,
    MenuDenied,
}

/// Music streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Story,
    Arena,
}

/// Sound playback facade
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
    fn stop_all(&mut self);

    /// Start the voice clip for a book page (from the book's sound bank)
    fn play_voice(&mut self, page: usize);
    /// Stop and unload the current voice clip, if any
    fn stop_voice(&mut self);

    fn stream_music(&mut self, track: MusicTrack);
    fn stop_music(&mut self);
}

/// Story text box with typewriter build-up, rendered externally
pub trait TextPanel {
    fn set_text(&mut self, text: &str);
    fn set_visible(&mut self, visible: bool);
    fn visible(&self) -> bool;

    /// Restart the build-up reveal from the first character
    fn begin_buildup(&mut self);
    /// True once the full text is revealed
    fn is_built_up(&self) -> bool;
    /// Reveal the full text immediately
    fn complete_buildup(&mut self);
}

/// Arena HUD widgets (life bar, currency counter, banners, upgrade panels)
pub trait Hud {
    fn show_wave_banner(&mut self, wave: u32);
    fn hide_wave_banner(&mut self);

    fn set_combat_ui_visible(&mut self, visible: bool);
    fn set_life_ratio(&mut self, ratio: f32);
    fn set_currency(&mut self, amount: u64);

    fn show_victory(&mut self);
    fn show_upgrade_menu(&mut self);
    fn show_game_over(&mut self);
    /// Next-tier costs per track; `None` = track maxed out
    fn set_upgrade_costs(&mut self, strength: Option<u64>, stamina: Option<u64>);
    /// Highlight menu slot 0 (strength) or 1 (stamina)
    fn set_upgrade_cursor(&mut self, slot: usize);
}

/// Collision backend query, one call per actor per tick
pub trait CollisionSource {
    /// Did this actor's hurtbox get struck this frame?
    fn collided(&self, actor: ActorId) -> bool;
}

#[cfg(test)]
pub(crate) mod harness {
    //! Fake engine implementations shared by the controller tests

    use std::collections::{BTreeMap, HashSet};

    use super::*;

    #[derive(Debug, Clone)]
    pub struct FakeActor {
        pub pos: Vec3,
        pub anim: AnimIndex,
        pub step: u32,
        pub ticks_left: u32,
        pub base_scale: f32,
        pub scale: Vec2,
        pub facing_right: bool,
        pub transparency: f32,
        pub visible: bool,
        pub paused: bool,
    }

    #[derive(Default)]
    pub struct FakeStage {
        next_id: u32,
        pub actors: BTreeMap<ActorId, FakeActor>,
        pub removed: Vec<ActorId>,
        pub one_shots: Vec<AnimIndex>,
        pub popups: Vec<u64>,
        pub fades: Vec<u32>,
    }

    impl FakeStage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn actor(&self, id: ActorId) -> &FakeActor {
            &self.actors[&id]
        }

        /// Pretend the engine finished this actor's current animation
        pub fn finish_animation(&mut self, id: ActorId) {
            self.actors.get_mut(&id).unwrap().ticks_left = 0;
        }

        pub fn set_step(&mut self, id: ActorId, step: u32) {
            self.actors.get_mut(&id).unwrap().step = step;
        }
    }

    impl Stage for FakeStage {
        fn spawn(&mut self, pos: Vec3, anim: AnimIndex) -> ActorId {
            let id = ActorId(self.next_id);
            self.next_id += 1;
            self.actors.insert(
                id,
                FakeActor {
                    pos,
                    anim,
                    step: 0,
                    ticks_left: 10,
                    base_scale: 1.0,
                    scale: Vec2::ONE,
                    facing_right: true,
                    transparency: 1.0,
                    visible: true,
                    paused: false,
                },
            );
            id
        }

        fn remove(&mut self, actor: ActorId) {
            self.actors.remove(&actor);
            self.removed.push(actor);
        }

        fn set_animation(&mut self, actor: ActorId, anim: AnimIndex) {
            let a = self.actors.get_mut(&actor).unwrap();
            a.anim = anim;
            a.step = 0;
            a.ticks_left = 10;
        }

        fn animation(&self, actor: ActorId) -> AnimIndex {
            self.actors[&actor].anim
        }

        fn animation_step(&self, actor: ActorId) -> u32 {
            self.actors[&actor].step
        }

        fn animation_ticks_left(&self, actor: ActorId) -> u32 {
            self.actors[&actor].ticks_left
        }

        fn pause_animation(&mut self, actor: ActorId) {
            self.actors.get_mut(&actor).unwrap().paused = true;
        }

        fn set_position(&mut self, actor: ActorId, pos: Vec3) {
            self.actors.get_mut(&actor).unwrap().pos = pos;
        }

        fn set_base_scale(&mut self, actor: ActorId, scale: f32) {
            self.actors.get_mut(&actor).unwrap().base_scale = scale;
        }

        fn set_scale(&mut self, actor: ActorId, scale: Vec2) {
            self.actors.get_mut(&actor).unwrap().scale = scale;
        }

        fn set_facing_right(&mut self, actor: ActorId, facing_right: bool) {
            self.actors.get_mut(&actor).unwrap().facing_right = facing_right;
        }

        fn set_transparency(&mut self, actor: ActorId, alpha: f32) {
            self.actors.get_mut(&actor).unwrap().transparency = alpha;
        }

        fn set_visible(&mut self, actor: ActorId, visible: bool) {
            self.actors.get_mut(&actor).unwrap().visible = visible;
        }

        fn spawn_one_shot(&mut self, _pos: Vec3, anim: AnimIndex, _scale: f32, _facing: bool) {
            self.one_shots.push(anim);
        }

        fn spawn_reward_popup(&mut self, amount: u64, _pos: Vec3, _scale: f32) {
            self.popups.push(amount);
        }

        fn begin_fade_out(&mut self, ticks: u32) {
            self.fades.push(ticks);
        }
    }

    #[derive(Default)]
    pub struct FakeAudio {
        pub cues: Vec<SoundCue>,
        pub voices: Vec<usize>,
        pub voice_stops: u32,
        pub music: Option<MusicTrack>,
        pub music_stops: u32,
    }

    impl FakeAudio {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn count(&self, cue: SoundCue) -> usize {
            self.cues.iter().filter(|c| **c == cue).count()
        }
    }

    impl AudioSink for FakeAudio {
        fn play(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }

        fn stop_all(&mut self) {}

        fn play_voice(&mut self, page: usize) {
            self.voices.push(page);
        }

        fn stop_voice(&mut self) {
            self.voice_stops += 1;
        }

        fn stream_music(&mut self, track: MusicTrack) {
            self.music = Some(track);
        }

        fn stop_music(&mut self) {
            self.music = None;
            self.music_stops += 1;
        }
    }

    #[derive(Default)]
    pub struct FakePanel {
        pub text: String,
        pub shown: bool,
        pub built_up: bool,
        pub buildups: u32,
    }

    impl FakePanel {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl TextPanel for FakePanel {
        fn set_text(&mut self, text: &str) {
            self.text = text.to_string();
        }

        fn set_visible(&mut self, visible: bool) {
            self.shown = visible;
        }

        fn visible(&self) -> bool {
            self.shown
        }

        fn begin_buildup(&mut self) {
            self.built_up = false;
            self.buildups += 1;
        }

        fn is_built_up(&self) -> bool {
            self.built_up
        }

        fn complete_buildup(&mut self) {
            self.built_up = true;
        }
    }

    #[derive(Default)]
    pub struct FakeHud {
        pub banner: Option<u32>,
        pub combat_ui: bool,
        pub life_ratio: f32,
        pub currency: u64,
        pub victory_shown: bool,
        pub upgrade_shown: bool,
        pub game_over_shown: bool,
        pub costs: (Option<u64>, Option<u64>),
        pub cursor: usize,
    }

    impl FakeHud {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Hud for FakeHud {
        fn show_wave_banner(&mut self, wave: u32) {
            self.banner = Some(wave);
        }

        fn hide_wave_banner(&mut self) {
            self.banner = None;
        }

        fn set_combat_ui_visible(&mut self, visible: bool) {
            self.combat_ui = visible;
        }

        fn set_life_ratio(&mut self, ratio: f32) {
            self.life_ratio = ratio;
        }

        fn set_currency(&mut self, amount: u64) {
            self.currency = amount;
        }

        fn show_victory(&mut self) {
            self.victory_shown = true;
        }

        fn show_upgrade_menu(&mut self) {
            self.upgrade_shown = true;
        }

        fn show_game_over(&mut self) {
            self.game_over_shown = true;
        }

        fn set_upgrade_costs(&mut self, strength: Option<u64>, stamina: Option<u64>) {
            self.costs = (strength, stamina);
        }

        fn set_upgrade_cursor(&mut self, slot: usize) {
            self.cursor = slot;
        }
    }

    #[derive(Default)]
    pub struct ScriptedCollisions {
        pub hits: HashSet<ActorId>,
    }

    impl ScriptedCollisions {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl CollisionSource for ScriptedCollisions {
        fn collided(&self, actor: ActorId) -> bool {
            self.hits.contains(&actor)
        }
    }
}
