//! Enemy actors
//!
//! Enemies wander between random points; whichever one is nearest the player
//! chases and, when close enough and off cooldown, attacks. Damage and death
//! mirror the player's rules, with removal deferred by one update pass so a
//! dying enemy finishes its animation first.

use glam::Vec2;
use rand::Rng;

use crate::consts::{ATTACK_RANGE_X, ATTACK_RANGE_Y, DEATH_FINAL_STEP, ENEMY_ATTACK_COOLDOWN, ENEMY_SPEED, PLAY_AREA_BOTTOM, PLAY_AREA_TOP};
use crate::engine::{ActorId, AudioSink, CollisionSource, SoundCue, Stage};
use crate::session::Session;
use crate::{clamp_to_play_area, y_to_depth, y_to_scale};

use super::anim::EnemyAnim;
use super::spawn_blood;

/// How far to the player's side the chasing enemy aims
const CHASE_OFFSET_X: f32 = 15.0;

/// A random point enemies spawn at and wander between
pub fn random_play_area_point(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.random_range(20.0..300.0),
        rng.random_range(PLAY_AREA_TOP..PLAY_AREA_BOTTOM),
    )
}

/// One enemy's combat state
#[derive(Debug)]
pub struct Enemy {
    pub actor: ActorId,
    pub pos: Vec2,
    pub wander_target: Vec2,
    pub speed: f32,
    pub life: u64,
    pub anim: EnemyAnim,
    pub facing_right: bool,
    pub pending_removal: bool,
}

impl Enemy {
    /// Spawn one enemy at a random spot with life from the wave table
    pub fn spawn(session: &Session, stage: &mut dyn Stage, rng: &mut impl Rng) -> Self {
        let pos = random_play_area_point(rng);
        let actor = stage.spawn(pos.extend(y_to_depth(pos.y)), EnemyAnim::Idle.asset());
        stage.set_base_scale(actor, y_to_scale(pos.y));

        Self {
            actor,
            pos,
            wander_target: random_play_area_point(rng),
            speed: ENEMY_SPEED,
            life: session.enemy_life(),
            anim: EnemyAnim::Idle,
            facing_right: true,
            pending_removal: false,
        }
    }

    fn set_anim(&mut self, anim: EnemyAnim, stage: &mut dyn Stage) {
        self.anim = anim;
        stage.set_animation(self.actor, anim.asset());
    }

    fn set_anim_if_different(&mut self, anim: EnemyAnim, stage: &mut dyn Stage) {
        if self.anim != anim {
            self.set_anim(anim, stage);
        }
    }

    pub fn update_walking(
        &mut self,
        is_closest: bool,
        player_pos: Vec2,
        stage: &mut dyn Stage,
        rng: &mut impl Rng,
    ) {
        let target = if is_closest {
            // Aim for a spot beside the player, not on top of them
            let offset = if self.pos.x > player_pos.x {
                CHASE_OFFSET_X
            } else {
                -CHASE_OFFSET_X
            };
            Vec2::new(player_pos.x + offset, player_pos.y)
        } else {
            self.wander_target
        };
        self.walk_toward(target, stage, rng);
    }

    fn walk_toward(&mut self, target: Vec2, stage: &mut dyn Stage, rng: &mut impl Rng) {
        if self.anim.blocks_ai() {
            return;
        }

        let to_target = target - self.pos;
        if to_target.length() < self.speed * 2.0 {
            self.set_anim_if_different(EnemyAnim::Idle, stage);
            self.wander_target = random_play_area_point(rng);
            return;
        }

        self.set_anim_if_different(EnemyAnim::Walk, stage);
        self.pos = clamp_to_play_area(self.pos + to_target.normalize_or_zero() * self.speed);
        stage.set_position(self.actor, self.pos.extend(y_to_depth(self.pos.y)));
        stage.set_base_scale(self.actor, y_to_scale(self.pos.y));
    }

    /// Only the nearest enemy swings, and all enemies share one cooldown
    pub fn update_attacking(
        &mut self,
        is_closest: bool,
        player_pos: Vec2,
        shared_cooldown: &mut u32,
        stage: &mut dyn Stage,
    ) {
        if !is_closest || *shared_cooldown > 0 || self.anim.blocks_ai() {
            return;
        }
        let in_reach = (player_pos.x - self.pos.x).abs() < ATTACK_RANGE_X
            && (player_pos.y - self.pos.y).abs() < ATTACK_RANGE_Y;
        if in_reach {
            let attack = self.anim.next_attack();
            self.set_anim(attack, stage);
            *shared_cooldown = ENEMY_ATTACK_COOLDOWN;
        }
    }

    pub fn update_return_to_idle(&mut self, stage: &mut dyn Stage) {
        if self.anim.is_transient() && stage.animation_ticks_left(self.actor) == 0 {
            self.set_anim(EnemyAnim::Idle, stage);
        }
    }

    pub fn update_turning(&mut self, player_pos: Vec2, stage: &mut dyn Stage) {
        if !self.anim.faces_player() {
            return;
        }
        self.facing_right = self.pos.x < player_pos.x;
        stage.set_facing_right(self.actor, self.facing_right);
    }

    pub fn update_getting_hit(
        &mut self,
        session: &Session,
        player_strength: u64,
        stage: &mut dyn Stage,
        audio: &mut dyn AudioSink,
        collisions: &dyn CollisionSource,
        hit_sound_played: &mut bool,
        blood_counter: &mut u32,
    ) {
        if !collisions.collided(self.actor) {
            return;
        }

        let hit = self.anim.next_hit();
        self.set_anim(hit, stage);

        // One hit sound per frame no matter how many enemies connect
        if !*hit_sound_played {
            audio.play(SoundCue::EnemyHit);
            *hit_sound_played = true;
        }

        if session.strength_tier > session.wave as usize {
            spawn_blood(
                stage,
                blood_counter,
                self.pos,
                y_to_scale(self.pos.y),
                !self.facing_right,
            );
        }

        self.life = self.life.saturating_sub(player_strength);
    }

    pub fn update_dying(&mut self, session: &mut Session, stage: &mut dyn Stage, audio: &mut dyn AudioSink) {
        if self.life > 0 {
            return;
        }

        if self.anim != EnemyAnim::Dying {
            // First tick at zero life: pay out before the body fades
            audio.play(SoundCue::EnemyDeath);
            let reward = session.wave_reward();
            session.currency += reward;
            let scale = y_to_scale(self.pos.y);
            let popup_pos = (self.pos - Vec2::new(0.0, 30.0 * scale)).extend(30.0);
            stage.spawn_reward_popup(reward, popup_pos, scale);
            self.set_anim(EnemyAnim::Dying, stage);
            log::debug!("Enemy {:?} down, +{reward} currency", self.actor);
        }

        if stage.animation_step(self.actor) == DEATH_FINAL_STEP {
            self.pending_removal = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::engine::harness::{FakeAudio, FakeStage, ScriptedCollisions};

    use super::*;

    fn rig() -> (FakeStage, FakeAudio, ScriptedCollisions, Session, Pcg32) {
        (
            FakeStage::new(),
            FakeAudio::new(),
            ScriptedCollisions::new(),
            Session::new(),
            Pcg32::seed_from_u64(7),
        )
    }

    #[test]
    fn test_spawn_inside_play_area() {
        let (mut stage, _, _, session, mut rng) = rig();
        for _ in 0..20 {
            let enemy = Enemy::spawn(&session, &mut stage, &mut rng);
            assert_eq!(enemy.pos, clamp_to_play_area(enemy.pos));
            assert_eq!(enemy.life, session.enemy_life());
        }
    }

    #[test]
    fn test_wanderer_walks_and_rolls_new_target_on_arrival() {
        let (mut stage, _, _, session, mut rng) = rig();
        let mut enemy = Enemy::spawn(&session, &mut stage, &mut rng);
        enemy.pos = Vec2::new(100.0, 100.0);
        enemy.wander_target = Vec2::new(120.0, 100.0);

        enemy.update_walking(false, Vec2::ZERO, &mut stage, &mut rng);
        assert_eq!(enemy.anim, EnemyAnim::Walk);
        assert!(enemy.pos.x > 100.0);

        // Teleport next to the target: arrival goes idle and re-rolls
        enemy.pos = Vec2::new(119.5, 100.0);
        enemy.update_walking(false, Vec2::ZERO, &mut stage, &mut rng);
        assert_eq!(enemy.anim, EnemyAnim::Idle);
        assert_ne!(enemy.wander_target, Vec2::new(120.0, 100.0));
    }

    #[test]
    fn test_closest_enemy_chases_beside_the_player() {
        let (mut stage, _, _, session, mut rng) = rig();
        let mut enemy = Enemy::spawn(&session, &mut stage, &mut rng);
        enemy.pos = Vec2::new(200.0, 100.0);
        let player_pos = Vec2::new(100.0, 100.0);

        enemy.update_walking(true, player_pos, &mut stage, &mut rng);
        // Enemy is right of the player, so it approaches the right-side slot
        assert!(enemy.pos.x < 200.0);
        assert_eq!(enemy.pos.y, 100.0);
    }

    #[test]
    fn test_attack_requires_closest_range_and_cooldown() {
        let (mut stage, _, _, session, mut rng) = rig();
        let mut enemy = Enemy::spawn(&session, &mut stage, &mut rng);
        enemy.pos = Vec2::new(110.0, 102.0);
        let player_pos = Vec2::new(100.0, 100.0);
        let mut cooldown = 0;

        // Not the closest: no swing
        enemy.update_attacking(false, player_pos, &mut cooldown, &mut stage);
        assert_eq!(enemy.anim, EnemyAnim::Idle);

        enemy.update_attacking(true, player_pos, &mut cooldown, &mut stage);
        assert_eq!(enemy.anim, EnemyAnim::AttackA);
        assert_eq!(cooldown, ENEMY_ATTACK_COOLDOWN);

        // Cooldown holds the next swing even in range
        enemy.anim = EnemyAnim::Idle;
        enemy.update_attacking(true, player_pos, &mut cooldown, &mut stage);
        assert_eq!(enemy.anim, EnemyAnim::Idle);
    }

    #[test]
    fn test_attack_out_of_reach_does_nothing() {
        let (mut stage, _, _, session, mut rng) = rig();
        let mut enemy = Enemy::spawn(&session, &mut stage, &mut rng);
        enemy.pos = Vec2::new(150.0, 100.0);
        let mut cooldown = 0;

        enemy.update_attacking(true, Vec2::new(100.0, 100.0), &mut cooldown, &mut stage);
        assert_eq!(enemy.anim, EnemyAnim::Idle);
        assert_eq!(cooldown, 0);
    }

    #[test]
    fn test_hit_sound_plays_once_per_frame_across_enemies() {
        let (mut stage, mut audio, mut collisions, session, mut rng) = rig();
        let mut a = Enemy::spawn(&session, &mut stage, &mut rng);
        let mut b = Enemy::spawn(&session, &mut stage, &mut rng);
        collisions.hits.insert(a.actor);
        collisions.hits.insert(b.actor);

        let mut played = false;
        let mut blood = 0;
        a.update_getting_hit(&session, 10, &mut stage, &mut audio, &collisions, &mut played, &mut blood);
        b.update_getting_hit(&session, 10, &mut stage, &mut audio, &collisions, &mut played, &mut blood);

        assert_eq!(audio.count(SoundCue::EnemyHit), 1);
        assert_eq!(a.anim, EnemyAnim::HitA);
        assert_eq!(b.anim, EnemyAnim::HitA);
        assert_eq!(a.life, session.enemy_life() - 10);
    }

    #[test]
    fn test_death_pays_out_once_then_marks_removal_at_final_step() {
        let (mut stage, mut audio, _, mut session, mut rng) = rig();
        let mut enemy = Enemy::spawn(&session, &mut stage, &mut rng);
        enemy.life = 0;

        enemy.update_dying(&mut session, &mut stage, &mut audio);
        assert_eq!(enemy.anim, EnemyAnim::Dying);
        assert_eq!(session.currency, session.wave_reward());
        assert_eq!(stage.popups, [session.wave_reward()]);
        assert!(!enemy.pending_removal);

        // Second tick: no double payout
        enemy.update_dying(&mut session, &mut stage, &mut audio);
        assert_eq!(session.currency, session.wave_reward());
        assert_eq!(audio.count(SoundCue::EnemyDeath), 1);

        stage.set_step(enemy.actor, DEATH_FINAL_STEP);
        enemy.update_dying(&mut session, &mut stage, &mut audio);
        assert!(enemy.pending_removal);
    }
}
