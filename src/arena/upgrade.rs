//! Upgrade and game-over screen
//!
//! Comes up once the player's death animation finishes. With enough currency
//! for at least one next tier it is a two-option shop; otherwise it is the
//! terminal game-over screen and confirm starts the run over.

use crate::engine::SoundCue;
use crate::screen::{ScreenChange, ScreenContext};
use crate::session::Session;

use super::anim::PlayerAnim;
use super::player::Player;
use crate::consts::DEATH_FINAL_STEP;

/// The two purchasable stat tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeTrack {
    Strength,
    Stamina,
}

impl UpgradeTrack {
    pub fn other(self) -> Self {
        match self {
            Self::Strength => Self::Stamina,
            Self::Stamina => Self::Strength,
        }
    }

    /// Menu slot the HUD highlights for this track
    pub fn slot(self) -> usize {
        match self {
            Self::Strength => 0,
            Self::Stamina => 1,
        }
    }

    fn next_cost(self, session: &Session) -> Option<u64> {
        match self {
            Self::Strength => session.next_strength_cost(),
            Self::Stamina => session.next_stamina_cost(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpgradeState {
    Inactive,
    Menu { selected: UpgradeTrack },
    GameOver,
}

/// Upgrade screen sub-state machine
#[derive(Debug)]
pub struct UpgradeScreen {
    state: UpgradeState,
}

impl Default for UpgradeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl UpgradeScreen {
    pub fn new() -> Self {
        Self {
            state: UpgradeState::Inactive,
        }
    }

    /// While active, player/enemy/HUD updates stay frozen
    pub fn is_active(&self) -> bool {
        self.state != UpgradeState::Inactive
    }

    pub fn is_game_over(&self) -> bool {
        self.state == UpgradeState::GameOver
    }

    pub fn update(&mut self, player: &Player, ctx: &mut ScreenContext<'_>) -> Option<ScreenChange> {
        self.update_start(player, ctx);
        self.update_active(ctx)
    }

    fn update_start(&mut self, player: &Player, ctx: &mut ScreenContext<'_>) {
        if self.is_active() {
            return;
        }
        // Wait for the death animation to play out fully
        if player.life > 0
            || player.anim != PlayerAnim::Dying
            || ctx.stage.animation_step(player.actor) != DEATH_FINAL_STEP
        {
            return;
        }

        ctx.audio.stop_music();

        let strength_cost = ctx.session.next_strength_cost();
        let stamina_cost = ctx.session.next_stamina_cost();
        let currency = ctx.session.currency;
        let affordable = |cost: Option<u64>| cost.is_some_and(|c| c <= currency);

        if !affordable(strength_cost) && !affordable(stamina_cost) {
            ctx.hud.show_game_over();
            ctx.audio.play(SoundCue::GameOverJingle);
            self.state = UpgradeState::GameOver;
            log::info!(
                "Run over on wave {} with {currency} currency",
                ctx.session.wave + 1
            );
        } else {
            ctx.hud.show_upgrade_menu();
            ctx.hud.set_upgrade_costs(strength_cost, stamina_cost);
            ctx.hud.set_upgrade_cursor(UpgradeTrack::Strength.slot());
            self.state = UpgradeState::Menu {
                selected: UpgradeTrack::Strength,
            };
        }
    }

    fn update_active(&mut self, ctx: &mut ScreenContext<'_>) -> Option<ScreenChange> {
        match &mut self.state {
            UpgradeState::Inactive => None,
            UpgradeState::GameOver => {
                ctx.session.ticks += 1;
                if ctx.input.confirm {
                    ctx.session.reset();
                    log::info!("New game");
                    return Some(ScreenChange::book("intro"));
                }
                None
            }
            UpgradeState::Menu { selected } => {
                ctx.session.ticks += 1;

                if ctx.input.up || ctx.input.down {
                    ctx.audio.play(SoundCue::MenuMove);
                    *selected = selected.other();
                    ctx.hud.set_upgrade_cursor(selected.slot());
                }

                if ctx.input.action {
                    let track = *selected;
                    match track.next_cost(ctx.session) {
                        Some(cost) if cost <= ctx.session.currency => {
                            ctx.audio.play(SoundCue::MenuBuy);
                            ctx.session.currency -= cost;
                            match track {
                                UpgradeTrack::Strength => ctx.session.strength_tier += 1,
                                UpgradeTrack::Stamina => ctx.session.stamina_tier += 1,
                            }
                            log::info!(
                                "Bought {track:?} tier for {cost}, {} left",
                                ctx.session.currency
                            );
                            return Some(ScreenChange::Arena);
                        }
                        _ => ctx.audio.play(SoundCue::MenuDenied),
                    }
                }
                None
            }
        }
    }
}
