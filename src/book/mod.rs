//! Book screen
//!
//! Shows one story section as an open book: two page faces on fixed
//! background entities, two foreground faces that squash/stretch during
//! flips, and a text box with typewriter build-up underneath. Advancing past
//! the final page fades out and hands control back to the host.

pub mod flip;

use glam::{Vec2, Vec3};

use crate::consts::FADE_OUT_TICKS;
use crate::engine::{ActorId, AnimIndex, AudioSink, MusicTrack, SoundCue, ANIM_BLANK};
use crate::screen::{FadeTimer, Screen, ScreenChange, ScreenContext};
use crate::story::{StoryError, StoryText};

use flip::{FlipDirection, FlipEvent, PageFlip};

/// First page-face animation; faces come in left/right pairs per page
const PAGE_ANIM_BASE: AnimIndex = 1000;

/// The section whose final page loops back to the intro book
const OUTRO_SECTION: &str = "outro";
/// Outro page that gets the run timer appended
const TIMER_PAGE: usize = 3;

fn left_face_anim(page: usize) -> AnimIndex {
    PAGE_ANIM_BASE + page as AnimIndex * 2
}

fn right_face_anim(page: usize) -> AnimIndex {
    PAGE_ANIM_BASE + page as AnimIndex * 2 + 1
}

/// Asset bundle name for a story section ("intro" → "INTRO")
pub fn asset_bundle(section: &str) -> String {
    section.to_uppercase()
}

/// Book screen controller
#[derive(Debug)]
pub struct BookScreen {
    section: String,
    parts: Vec<String>,
    page: usize,
    flip: PageFlip,
    fade: Option<FadeTimer>,
    left_bg: ActorId,
    left_fg: ActorId,
    right_bg: ActorId,
    right_fg: ActorId,
}

impl BookScreen {
    /// Build the screen for one story section. Fails if the section is
    /// missing from the script - that is a broken install, not a runtime
    /// condition.
    pub fn new(
        section: &str,
        story: &StoryText,
        ctx: &mut ScreenContext<'_>,
    ) -> Result<Self, StoryError> {
        let section = section.to_lowercase();
        let parts = story.section(&section)?.to_vec();

        let left_bg = ctx.stage.spawn(Vec3::new(160.0, 0.0, 1.0), ANIM_BLANK);
        let left_fg = ctx.stage.spawn(Vec3::new(160.0, 0.0, 2.0), ANIM_BLANK);
        let right_bg = ctx.stage.spawn(Vec3::new(160.0, 0.0, 1.0), ANIM_BLANK);
        let right_fg = ctx.stage.spawn(Vec3::new(160.0, 0.0, 2.0), ANIM_BLANK);

        ctx.stage.set_animation(left_bg, left_face_anim(0));
        ctx.stage.set_animation(right_bg, right_face_anim(0));

        let mut screen = Self {
            section,
            parts,
            page: 0,
            flip: PageFlip::new(),
            fade: None,
            left_bg,
            left_fg,
            right_bg,
            right_fg,
        };

        screen.set_text_active(ctx);
        ctx.audio.stream_music(MusicTrack::Story);
        log::info!(
            "Book \"{}\" opened with {} pages",
            screen.section,
            screen.parts.len()
        );
        Ok(screen)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_final_page(&self) -> bool {
        self.page == self.parts.len() - 1
    }

    pub fn is_flipping(&self) -> bool {
        self.flip.is_flipping()
    }

    fn update(&mut self, ctx: &mut ScreenContext<'_>) -> Option<ScreenChange> {
        if let Some(fade) = &mut self.fade {
            return fade.tick();
        }

        self.handle_input(ctx);
        let event = self.flip.tick();
        self.apply_flip_event(event, ctx);
        None
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext<'_>) {
        let input = ctx.input;
        if self.flip.is_flipping() {
            if input.left || input.advances_page() {
                let event = self.flip.force_complete_stage();
                self.apply_flip_event(event, ctx);
            }
        } else if input.advances_page() {
            if ctx.text.visible() && !ctx.text.is_built_up() {
                // First press lands the whole text, the next one turns the page
                ctx.text.complete_buildup();
            } else {
                self.advance_page(ctx);
            }
        }
    }

    fn advance_page(&mut self, ctx: &mut ScreenContext<'_>) {
        if self.is_final_page() {
            ctx.audio.stop_voice();
            ctx.stage.begin_fade_out(FADE_OUT_TICKS);
            let target = if self.section == OUTRO_SECTION {
                ScreenChange::book("intro")
            } else {
                ScreenChange::Arena
            };
            log::info!("Book \"{}\" finished, leaving for {target:?}", self.section);
            self.fade = Some(FadeTimer::new(FADE_OUT_TICKS, target));
            return;
        }

        ctx.audio.stop_voice();
        ctx.audio.play(SoundCue::PageTurn);
        self.page += 1;
        log::debug!("Book \"{}\" flipping to page {}", self.section, self.page);

        // The right foreground inherits the old face and shrinks away while
        // the background already shows the new page
        let old_face = ctx.stage.animation(self.right_bg);
        ctx.stage.set_animation(self.right_fg, old_face);
        ctx.stage.set_animation(self.right_bg, right_face_anim(self.page));
        ctx.text.set_visible(false);

        self.flip.begin(FlipDirection::Right);
    }

    fn apply_flip_event(&mut self, event: FlipEvent, ctx: &mut ScreenContext<'_>) {
        match event {
            FlipEvent::Idle => {}
            FlipEvent::Outgoing(scale) => {
                ctx.stage.set_scale(self.right_fg, Vec2::new(scale, 1.0));
            }
            FlipEvent::OutgoingDone => {
                ctx.stage.set_animation(self.right_fg, ANIM_BLANK);
                ctx.stage.set_scale(self.right_fg, Vec2::ONE);
                ctx.stage.set_animation(self.left_fg, left_face_anim(self.page));
                ctx.stage.set_scale(self.left_fg, Vec2::new(0.0, 1.0));
            }
            FlipEvent::Incoming(scale) => {
                ctx.stage.set_scale(self.left_fg, Vec2::new(scale, 1.0));
            }
            FlipEvent::IncomingDone => {
                let face = ctx.stage.animation(self.left_fg);
                ctx.stage.set_animation(self.left_bg, face);
                ctx.stage.set_animation(self.left_fg, ANIM_BLANK);
                ctx.stage.set_scale(self.left_fg, Vec2::new(0.0, 1.0));
                self.set_text_active(ctx);
            }
        }
    }

    fn set_text_active(&self, ctx: &mut ScreenContext<'_>) {
        self.play_voice(ctx.audio);

        let part = &self.parts[self.page];
        if part == "end" || part == "title" {
            // Art-only pages keep the text box hidden
            return;
        }

        let mut text = part.clone();
        if self.section == OUTRO_SECTION && self.page == TIMER_PAGE {
            text.push_str(&ctx.session.speedrun_string());
        }
        ctx.text.set_text(&text);
        ctx.text.begin_buildup();
        ctx.text.set_visible(true);
    }

    fn play_voice(&self, audio: &mut dyn AudioSink) {
        // Voice clips stay disabled on the web build
        if cfg!(target_arch = "wasm32") {
            return;
        }
        audio.stop_all();
        audio.play_voice(self.page);
    }
}

impl Screen for BookScreen {
    fn update(&mut self, ctx: &mut ScreenContext<'_>) -> Option<ScreenChange> {
        BookScreen::update(self, ctx)
    }
}
