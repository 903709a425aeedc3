//! Player actor
//!
//! Movement, punching, damage, and death for the player character. All
//! per-tick rules are driven by the arena controller in a fixed order.

use glam::Vec2;

use crate::consts::{INVINCIBILITY_TICKS, PLAYER_SPEED};
use crate::engine::{ActorId, AudioSink, CollisionSource, SoundCue, Stage};
use crate::input::FrameInput;
use crate::session::Session;
use crate::{clamp_to_play_area, y_to_depth, y_to_scale};

use super::anim::PlayerAnim;
use super::spawn_blood;

/// Player combat state
#[derive(Debug)]
pub struct Player {
    pub actor: ActorId,
    pub pos: Vec2,
    pub anim: PlayerAnim,
    pub life: u64,
    pub max_life: u64,
    pub strength: u64,
    pub invincibility: u32,
    pub facing_right: bool,
}

impl Player {
    /// Spawn the player with stats derived from the session's tiers
    pub fn spawn(session: &Session, stage: &mut dyn Stage) -> Self {
        let pos = Vec2::new(100.0, 100.0);
        let actor = stage.spawn(pos.extend(y_to_depth(pos.y)), PlayerAnim::Idle.asset());
        stage.set_base_scale(actor, y_to_scale(pos.y));

        let max_life = session.player_max_life();
        Self {
            actor,
            pos,
            anim: PlayerAnim::Idle,
            life: max_life,
            max_life,
            strength: session.player_strength(),
            invincibility: 0,
            facing_right: true,
        }
    }

    /// One gameplay tick, in the arena's fixed sub-order
    pub fn update(
        &mut self,
        input: &FrameInput,
        session: &Session,
        stage: &mut dyn Stage,
        audio: &mut dyn AudioSink,
        collisions: &dyn CollisionSource,
        blood_counter: &mut u32,
    ) {
        self.update_walking(input, stage);
        self.update_punching(input, stage, audio);
        self.update_return_to_idle(stage);
        self.update_getting_hit(session, stage, audio, collisions, blood_counter);
        self.update_dying(stage, audio);
    }

    fn set_anim(&mut self, anim: PlayerAnim, stage: &mut dyn Stage) {
        self.anim = anim;
        stage.set_animation(self.actor, anim.asset());
    }

    fn set_anim_if_different(&mut self, anim: PlayerAnim, stage: &mut dyn Stage) {
        if self.anim != anim {
            self.set_anim(anim, stage);
        }
    }

    fn update_walking(&mut self, input: &FrameInput, stage: &mut dyn Stage) {
        if !self.anim.can_move() {
            return;
        }

        let mut dir = Vec2::ZERO;
        if input.left_held {
            dir.x -= 1.0;
            self.facing_right = false;
            stage.set_facing_right(self.actor, false);
        }
        if input.right_held {
            dir.x += 1.0;
            self.facing_right = true;
            stage.set_facing_right(self.actor, true);
        }
        if input.up_held {
            dir.y -= 1.0;
        }
        if input.down_held {
            dir.y += 1.0;
        }

        if dir == Vec2::ZERO {
            if self.anim == PlayerAnim::Walk {
                self.set_anim(PlayerAnim::Idle, stage);
            }
            return;
        }

        self.set_anim_if_different(PlayerAnim::Walk, stage);
        self.pos = clamp_to_play_area(self.pos + dir.normalize_or_zero() * PLAYER_SPEED);
        self.apply_transform(stage);
    }

    fn apply_transform(&self, stage: &mut dyn Stage) {
        stage.set_position(self.actor, self.pos.extend(y_to_depth(self.pos.y)));
        stage.set_base_scale(self.actor, y_to_scale(self.pos.y));
    }

    fn update_punching(&mut self, input: &FrameInput, stage: &mut dyn Stage, audio: &mut dyn AudioSink) {
        if !self.anim.can_punch() {
            return;
        }
        if input.action {
            let punch = self.anim.next_punch();
            self.set_anim(punch, stage);
            audio.play(SoundCue::PlayerPunch);
        }
    }

    fn update_return_to_idle(&mut self, stage: &mut dyn Stage) {
        if self.anim.is_transient() && stage.animation_ticks_left(self.actor) == 0 {
            self.set_anim(PlayerAnim::Idle, stage);
        }
    }

    fn update_getting_hit(
        &mut self,
        session: &Session,
        stage: &mut dyn Stage,
        audio: &mut dyn AudioSink,
        collisions: &dyn CollisionSource,
        blood_counter: &mut u32,
    ) {
        if self.invincibility > 0 {
            self.invincibility -= 1;
            if self.invincibility == 0 {
                stage.set_transparency(self.actor, 1.0);
            }
            return;
        }

        if !collisions.collided(self.actor) {
            return;
        }

        let hit = self.anim.next_hit();
        self.set_anim(hit, stage);
        audio.play(SoundCue::PlayerHit);
        self.apply_damage(session.enemy_strength());

        // No splatter once the player's stamina is far ahead of the wave
        if (session.stamina_tier as i64) - (session.wave as i64) < 2 {
            spawn_blood(
                stage,
                blood_counter,
                self.pos,
                y_to_scale(self.pos.y),
                !self.facing_right,
            );
        }

        self.invincibility = INVINCIBILITY_TICKS;
        stage.set_transparency(self.actor, 0.7);
    }

    /// Reduce life, clamped to `[0, max_life]`
    pub fn apply_damage(&mut self, damage: u64) {
        self.life = self.life.saturating_sub(damage).min(self.max_life);
    }

    fn update_dying(&mut self, stage: &mut dyn Stage, audio: &mut dyn AudioSink) {
        if self.life > 0 {
            return;
        }
        if self.anim != PlayerAnim::Dying {
            audio.play(SoundCue::PlayerDeath);
            self.set_anim(PlayerAnim::Dying, stage);
        }
    }
}
