//! Scene draw pass
//!
//! Draw order: backdrop, level hints, orbs, blocks, spikes, slide blocks,
//! buggers, aim preview, hero (or its death burst), win message, transition.

use glam::Vec2;

use super::{
    AIM_ACTIVE_COLOR, AIM_INACTIVE_COLOR, AimCurve, BLOOD_COLOR, CLEAR_COLOR, HINT_COLOR,
    RenderSurface, Sprite, TextRun, TextureId, TiledQuad, WHITE,
};
use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::sim::entities::{Block, Bugger, BuggerKind, Orb, SlideBlock, Spike, SpikeKind};
use crate::sim::hero::Hero;
use crate::sim::win_message::{WIN_LINES, WinMessage};
use crate::sim::{Background, GameState, LevelTransition, Rect};
use crate::snap;

/// Hero tilt while dashing through the air (degrees)
const DASH_TILT: f32 = 15.0;
const BACKDROP_TILE_SCALE: f32 = 4.0;
const BACKDROP_ALPHA: f32 = 0.2;
const TITLE_SCALE: f32 = 3.0;

/// Draw one full frame
pub fn draw_frame(state: &GameState, surface: &mut impl RenderSurface) {
    surface.clear(CLEAR_COLOR);
    draw_background(&state.background, surface);

    if let Some(level) = &state.level {
        draw_hints(level.index, surface);

        for orb in &level.orbs {
            draw_orb(orb, surface);
        }
        for block in &level.blocks {
            draw_block(block, surface);
        }
        for spike in &level.spikes {
            draw_spike(spike, surface);
        }
        for slide in &level.slide_blocks {
            draw_slide_block(slide, surface);
        }
        for bugger in &level.buggers {
            draw_bugger(bugger, surface);
        }

        if let Some(aim) = level.controls.aim_preview(&state.tuning) {
            surface.curve(&AimCurve {
                p0: aim.p0,
                control: aim.p1,
                p2: aim.p2,
                dash_offset: aim.dash_offset,
                color: if aim.is_valid {
                    AIM_ACTIVE_COLOR
                } else {
                    AIM_INACTIVE_COLOR
                },
            });
        }

        draw_hero(&level.hero, surface);
    }

    draw_win_message(&state.win_message, surface);
    draw_transition(&state.transition, surface);
}

/// Frame counter overlay
pub fn draw_fps(fps: u32, surface: &mut impl RenderSurface) {
    surface.text(&TextRun::new(format!("fps: {fps}"), Vec2::new(10.0, 582.0)));
}

fn draw_background(background: &Background, surface: &mut impl RenderSurface) {
    let (scroll_x, rotation) = background.tile_offset();
    surface.tiled(&TiledQuad {
        texture: TextureId::Backdrop,
        rect: Rect::new(0.0, 0.0, GAME_WIDTH, GAME_HEIGHT),
        tile_offset: Vec2::new(scroll_x, 0.0),
        tile_scale: Vec2::splat(BACKDROP_TILE_SCALE),
        tile_rotation: rotation,
        tile_alpha: BACKDROP_ALPHA,
    });
}

fn hint(text: &str, x: f32, y: f32) -> TextRun {
    TextRun {
        color: HINT_COLOR,
        ..TextRun::new(text, Vec2::new(x, y))
    }
}

fn draw_hints(level: usize, surface: &mut impl RenderSurface) {
    match level {
        0 => {
            surface.text(&hint("tap to aim and jump", 240.0, 140.0));
            surface.text(&hint("collect all balls, to go to next level", 90.0, 170.0));
        }
        2 => {
            surface.sprite(
                &Sprite::new(TextureId::Title, Vec2::new(400.0, 120.0))
                    .centered()
                    .scaled(Vec2::splat(TITLE_SCALE)),
            );
            surface.text(&hint("a game by karthik vj", 220.0, 180.0));
            surface.text(&hint("labrat.mobi", 280.0, 210.0));
        }
        _ => {}
    }
}

fn draw_orb(orb: &Orb, surface: &mut impl RenderSurface) {
    if !orb.is_collected {
        surface.sprite(&Sprite::new(TextureId::Orb, orb.pos));
        return;
    }
    surface.sprite(&Sprite::new(TextureId::OrbCollected, orb.pos));
    if !orb.collect_anim_done {
        surface.sprite(
            &Sprite::new(TextureId::OrbCollected, orb.pos + Vec2::splat(8.0))
                .centered()
                .scaled(Vec2::new(orb.collect_anim, 0.5))
                .tinted(WHITE, 1.0),
        );
    }
}

fn draw_block(block: &Block, surface: &mut impl RenderSurface) {
    surface.sprite(
        &Sprite::new(TextureId::Block, block.rect.origin())
            .sized(block.rect.size())
            .with_alpha(block.alpha),
    );
}

fn draw_spike(spike: &Spike, surface: &mut impl RenderSurface) {
    let rotation = spike.tile_rotation();
    // Horizontal strips flip by mirroring the tile vertically
    let tile_scale = if spike.flipped && rotation.is_none() {
        Vec2::new(1.0, -1.0)
    } else {
        Vec2::ONE
    };
    let tile_offset = match spike.kind {
        SpikeKind::Static => Vec2::ZERO,
        SpikeKind::Escalator { tile_offset } if rotation.is_some() => Vec2::new(0.0, tile_offset),
        SpikeKind::Escalator { tile_offset } => Vec2::new(tile_offset, 0.0),
    };
    surface.tiled(&TiledQuad {
        texture: TextureId::Spike,
        rect: spike.rect,
        tile_offset,
        tile_scale,
        tile_rotation: rotation.unwrap_or(0.0),
        tile_alpha: 1.0,
    });
}

fn draw_slide_block(slide: &SlideBlock, surface: &mut impl RenderSurface) {
    surface.sprite(
        &Sprite::new(TextureId::Block, slide.pos).sized(Vec2::new(slide.width, slide.height)),
    );
    // Rail end markers
    let marker_y = slide.pos.y + (slide.height / 2.0).floor() - 8.0;
    surface.sprite(&Sprite::new(
        TextureId::OrbCollected,
        Vec2::new(slide.start_x - 16.0, marker_y),
    ));
    surface.sprite(&Sprite::new(TextureId::OrbCollected, Vec2::new(slide.end_x, marker_y)));
}

fn draw_bugger(bugger: &Bugger, surface: &mut impl RenderSurface) {
    if bugger.kind == BuggerKind::CircleSpin {
        // Fading trail from the orbit center out toward the bugger
        surface.sprite(
            &Sprite::new(TextureId::OrbCollected, bugger.center)
                .centered()
                .with_alpha(0.9),
        );
        for (radius, scale, alpha) in [(20.0, 0.8, 0.7), (35.0, 0.5, 0.5)] {
            surface.sprite(
                &Sprite::new(TextureId::OrbCollected, bugger.orbit_point(radius))
                    .centered()
                    .scaled(Vec2::splat(scale))
                    .with_alpha(alpha),
            );
        }
    }
    surface.sprite(&Sprite::new(TextureId::Bugger, bugger.pos).centered());
}

fn draw_hero(hero: &Hero, surface: &mut impl RenderSurface) {
    if !hero.is_alive() {
        for particle in hero.particles() {
            surface.sprite(
                &Sprite::new(TextureId::OrbCollected, particle.pos)
                    .scaled(Vec2::splat(particle.scale))
                    .with_alpha(0.6)
                    .tinted(BLOOD_COLOR, 0.7),
            );
        }
        return;
    }

    let mut sprite = Sprite::new(TextureId::Hero, hero.position()).centered();
    if hero.is_flipped() {
        sprite = sprite.scaled(Vec2::new(-1.0, 1.0));
    }
    if hero.is_dash_mode() && !hero.is_idle() {
        sprite = sprite.rotated(DASH_TILT);
    }
    surface.sprite(&sprite);
}

fn draw_win_message(msg: &WinMessage, surface: &mut impl RenderSurface) {
    if !msg.is_visible() {
        return;
    }
    surface.sprite(
        &Sprite::new(TextureId::Title, Vec2::new(snap(GAME_WIDTH / 2.0), 200.0))
            .centered()
            .scaled(Vec2::splat(TITLE_SCALE))
            .with_alpha(msg.alpha),
    );

    let [congrats, finished, again] = WIN_LINES;
    surface.text(&TextRun {
        scale: 2.0,
        alpha: msg.secondary_alpha,
        ..TextRun::new(congrats, Vec2::new(260.0, 300.0))
    });
    surface.text(&TextRun {
        alpha: msg.secondary_alpha,
        ..TextRun::new(finished, Vec2::new(200.0, 350.0))
    });
    surface.text(&TextRun {
        alpha: msg.secondary_alpha,
        ..hint(again, 260.0, 450.0)
    });
}

fn draw_transition(transition: &LevelTransition, surface: &mut impl RenderSurface) {
    if !transition.is_running() {
        return;
    }
    surface.sprite(
        &Sprite::new(
            TextureId::OrbCollected,
            Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0),
        )
        .centered()
        .scaled(Vec2::splat(transition.scale))
        .rotated(transition.rotation),
    );
}
