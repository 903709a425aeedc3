//! Arena screen
//!
//! One wave of combat. Per frame the sub-systems run in a fixed order:
//! wave banner, player, enemies, HUD, win sequence, upgrade screen. The
//! banner, the win sequence, and the upgrade screen are mutually exclusive
//! gates - while one is up, player and enemy simulation stands still.

pub mod anim;
pub mod enemy;
pub mod player;
pub mod upgrade;

use std::collections::BTreeMap;

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{ENEMIES_PER_WAVE, FINAL_WAVE, WAVE_BANNER_TICKS, WIN_WAIT_TICKS};
use crate::engine::{ActorId, MusicTrack, SoundCue, Stage};
use crate::screen::{Screen, ScreenChange, ScreenContext};
use crate::y_to_depth;

use anim::{EffectAnim, PropAnim};
use enemy::Enemy;
use player::Player;
use upgrade::UpgradeScreen;

/// Drop a splatter effect just below an actor, alternating the art
pub(crate) fn spawn_blood(
    stage: &mut dyn Stage,
    counter: &mut u32,
    pos: Vec2,
    scale: f32,
    facing_right: bool,
) {
    let anim = EffectAnim::blood_for(*counter);
    let splat = pos + Vec2::new(0.0, 10.0);
    stage.spawn_one_shot(
        splat.extend(y_to_depth(pos.y) + 0.001),
        anim.asset(),
        scale,
        facing_right,
    );
    *counter += 1;
}

#[derive(Debug, Default)]
struct WaveBanner {
    shown: bool,
    active: bool,
    ticks: u32,
}

#[derive(Debug, Default)]
struct WinSequence {
    active: bool,
    ticks: u32,
}

/// Arena screen controller
pub struct ArenaScreen {
    player: Player,
    enemies: BTreeMap<ActorId, Enemy>,
    closest: Option<ActorId>,
    enemy_attack_cooldown: u32,
    blood_counter: u32,
    banner: WaveBanner,
    win: WinSequence,
    upgrade: UpgradeScreen,
    rng: Pcg32,
}

impl ArenaScreen {
    /// Load the wave described by the session: player stats from the tiers,
    /// enemy stats from the wave tables, everything else from fixed rules
    pub fn new(seed: u64, ctx: &mut ScreenContext<'_>) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        ctx.stage
            .spawn(Vec3::new(0.0, 0.0, 1.0), PropAnim::Backdrop.asset());
        ctx.stage
            .spawn(Vec3::new(99.0, 47.0, 2.0), PropAnim::Onlooker.asset());

        let player = Player::spawn(ctx.session, ctx.stage);
        let mut enemies = BTreeMap::new();
        for _ in 0..ENEMIES_PER_WAVE {
            let enemy = Enemy::spawn(ctx.session, ctx.stage, &mut rng);
            enemies.insert(enemy.actor, enemy);
        }

        ctx.hud.set_combat_ui_visible(false);
        ctx.hud.set_life_ratio(1.0);
        ctx.hud.set_currency(ctx.session.currency);
        ctx.audio.stream_music(MusicTrack::Arena);
        log::info!(
            "Arena wave {} loaded with {} enemies",
            ctx.session.wave + 1,
            ENEMIES_PER_WAVE
        );

        Self {
            player,
            enemies,
            closest: None,
            enemy_attack_cooldown: 0,
            blood_counter: 0,
            banner: WaveBanner::default(),
            win: WinSequence::default(),
            upgrade: UpgradeScreen::new(),
            rng,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    fn update(&mut self, ctx: &mut ScreenContext<'_>) -> Option<ScreenChange> {
        // Background props are static; first real phase is the banner
        self.update_wave_banner(ctx);
        self.update_player(ctx);
        self.update_enemies(ctx);
        self.update_hud(ctx);
        if let Some(change) = self.update_winning(ctx) {
            return Some(change);
        }
        self.upgrade.update(&self.player, ctx)
    }

    /// True while a gate (banner, win, upgrade) freezes the simulation
    fn gated(&self) -> bool {
        self.upgrade.is_active() || self.banner.active || self.win.active
    }

    fn update_wave_banner(&mut self, ctx: &mut ScreenContext<'_>) {
        if !self.banner.shown {
            ctx.hud.show_wave_banner(ctx.session.wave);
            self.banner.shown = true;
            self.banner.active = true;
        }
        if !self.banner.active {
            return;
        }

        self.banner.ticks += 1;
        if self.banner.ticks > WAVE_BANNER_TICKS || ctx.input.confirm {
            ctx.hud.set_combat_ui_visible(true);
            ctx.hud.hide_wave_banner();
            self.banner.active = false;
        }
    }

    fn update_player(&mut self, ctx: &mut ScreenContext<'_>) {
        if self.gated() {
            return;
        }
        ctx.session.ticks += 1;
        self.player.update(
            &ctx.input,
            ctx.session,
            ctx.stage,
            ctx.audio,
            ctx.collisions,
            &mut self.blood_counter,
        );
    }

    fn update_enemies(&mut self, ctx: &mut ScreenContext<'_>) {
        if self.gated() {
            return;
        }

        // Removal deferred from the previous pass
        let dead: Vec<ActorId> = self
            .enemies
            .values()
            .filter(|e| e.pending_removal)
            .map(|e| e.actor)
            .collect();
        for actor in dead {
            ctx.stage.remove(actor);
            self.enemies.remove(&actor);
        }

        self.closest = self.find_closest_enemy();

        let mut hit_sound_played = false;
        if self.enemy_attack_cooldown > 0 {
            self.enemy_attack_cooldown -= 1;
        }

        let player_pos = self.player.pos;
        let player_strength = self.player.strength;
        for enemy in self.enemies.values_mut() {
            if enemy.pending_removal {
                continue;
            }
            let is_closest = self.closest == Some(enemy.actor);
            enemy.update_walking(is_closest, player_pos, ctx.stage, &mut self.rng);
            enemy.update_attacking(
                is_closest,
                player_pos,
                &mut self.enemy_attack_cooldown,
                ctx.stage,
            );
            enemy.update_return_to_idle(ctx.stage);
            enemy.update_turning(player_pos, ctx.stage);
            enemy.update_getting_hit(
                ctx.session,
                player_strength,
                ctx.stage,
                ctx.audio,
                ctx.collisions,
                &mut hit_sound_played,
                &mut self.blood_counter,
            );
            enemy.update_dying(ctx.session, ctx.stage, ctx.audio);
        }
    }

    /// Linear scan for the enemy nearest the player; `None` once the arena
    /// is empty so attack logic just skips
    fn find_closest_enemy(&self) -> Option<ActorId> {
        let player_pos = self.player.pos;
        self.enemies
            .values()
            .filter(|e| !e.pending_removal)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player_pos)
                    .total_cmp(&b.pos.distance_squared(player_pos))
            })
            .map(|e| e.actor)
    }

    fn update_hud(&mut self, ctx: &mut ScreenContext<'_>) {
        if self.upgrade.is_active() {
            return;
        }
        ctx.hud
            .set_life_ratio(self.player.life as f32 / self.player.max_life as f32);
        ctx.hud.set_currency(ctx.session.currency);
    }

    fn update_winning(&mut self, ctx: &mut ScreenContext<'_>) -> Option<ScreenChange> {
        if self.upgrade.is_active() {
            return None;
        }

        if !self.win.active && self.enemies.is_empty() {
            self.win.active = true;
            ctx.hud.show_victory();
            ctx.stage.pause_animation(self.player.actor);
            ctx.hud.set_combat_ui_visible(false);
            ctx.audio.stop_music();
            ctx.audio.play(SoundCue::Victory);
            log::info!("Wave {} cleared", ctx.session.wave + 1);
        }
        if !self.win.active {
            return None;
        }

        self.win.ticks += 1;
        if ctx.input.confirm || self.win.ticks > WIN_WAIT_TICKS {
            ctx.session.wave += 1;
            let change = if ctx.session.wave >= FINAL_WAVE {
                ScreenChange::book("outro")
            } else {
                ScreenChange::Arena
            };
            return Some(change);
        }
        None
    }
}

impl Screen for ArenaScreen {
    fn update(&mut self, ctx: &mut ScreenContext<'_>) -> Option<ScreenChange> {
        ArenaScreen::update(self, ctx)
    }
}
