//! Built-in stand-in engine
//!
//! A single-screen platformer: a block that runs, jumps off the floor and
//! dashes once per airtime, over drifting snow. Lets the recorder and its
//! tests run without an external engine. Fully deterministic for a seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Stepper;
use crate::canvas::{Canvas, FrameBuffer, SpriteSheet};
use crate::constants::{SCREEN_H, SCREEN_SIZE, SCREEN_W};
use crate::input::Controller;
use crate::script::Button;

// =============================================================================
// TUNING
// =============================================================================

const PLAYER_SIZE: i32 = 8;
const FLOOR_Y: i32 = 112;
const SPAWN_X: f32 = 60.0;

const GRAVITY: f32 = 0.21;
const MAX_FALL: f32 = 2.0;
const MAX_RUN: f32 = 1.0;
const RUN_ACCEL: f32 = 0.6;
const JUMP_SPEED: f32 = -2.0;
const DASH_SPEED: f32 = 3.0;
const DASH_TICKS: u32 = 4;
const SHAKE_TICKS: u32 = 6;
const SNOW_FLAKES: usize = 24;

// =============================================================================
// PALETTE INDICES
// =============================================================================

const COLOR_SKY: i32 = 0;
const COLOR_GROUND: i32 = 5;
const COLOR_GROUND_EDGE: i32 = 6;
const COLOR_SNOW: i32 = 7;
const COLOR_HAIR_READY: i32 = 8;
const COLOR_HAIR_SPENT: i32 = 12;
const COLOR_BODY: i32 = 1;

const PLAYER_SPRITE: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Body {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    facing: f32,
    grounded: bool,
    dash_ready: bool,
    dash_ticks: u32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            x: SPAWN_X,
            y: (FLOOR_Y - PLAYER_SIZE) as f32,
            vx: 0.0,
            vy: 0.0,
            facing: 1.0,
            grounded: true,
            dash_ready: true,
            dash_ticks: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Flake {
    x: f32,
    y: f32,
    speed: f32,
    size: i32,
}

pub struct Sandbox {
    controller: Controller,
    sprites: Option<SpriteSheet>,
    canvas: Canvas,
    frame: Box<FrameBuffer>,
    rng: StdRng,
    body: Body,
    snow: Vec<Flake>,
    jump_was_held: bool,
    dash_was_held: bool,
    shake: u32,
    ticks: u64,
}

fn approach(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

impl Sandbox {
    pub fn new(controller: Controller) -> Self {
        let mut sandbox = Self {
            controller,
            sprites: None,
            canvas: Canvas::new(),
            frame: Box::new([0; SCREEN_SIZE]),
            rng: StdRng::seed_from_u64(0),
            body: Body::default(),
            snow: Vec::new(),
            jump_was_held: false,
            dash_was_held: false,
            shake: 0,
            ticks: 0,
        };
        sandbox.init(0);
        sandbox
    }

    /// Draw the player with sprite 1 of `sheet` instead of a plain block
    pub fn with_sprites(mut self, sheet: SpriteSheet) -> Self {
        self.sprites = Some(sheet);
        self
    }

    pub fn player_position(&self) -> (f32, f32) {
        (self.body.x, self.body.y)
    }

    pub fn is_grounded(&self) -> bool {
        self.body.grounded
    }

    pub fn can_dash(&self) -> bool {
        self.body.dash_ready
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn spawn_flake(&mut self, y: f32) -> Flake {
        Flake {
            x: self.rng.gen_range(0.0..SCREEN_W as f32),
            y,
            speed: self.rng.gen_range(0.25..1.25),
            size: self.rng.gen_range(0..2),
        }
    }

    fn update_body(&mut self) {
        let c = &self.controller;
        let input_x = axis(c.button(Button::Left), c.button(Button::Right));
        let input_y = axis(c.button(Button::Up), c.button(Button::Down));
        let jump = c.button(Button::Jump);
        let dash = c.button(Button::Dash);
        let jump_pressed = jump && !self.jump_was_held;
        let dash_pressed = dash && !self.dash_was_held;
        self.jump_was_held = jump;
        self.dash_was_held = dash;

        let body = &mut self.body;
        if input_x != 0.0 {
            body.facing = input_x;
        }

        if body.dash_ticks > 0 {
            body.dash_ticks -= 1;
        } else {
            body.vx = approach(body.vx, input_x * MAX_RUN, RUN_ACCEL);
            body.vy = (body.vy + GRAVITY).min(MAX_FALL);

            if jump_pressed && body.grounded {
                body.vy = JUMP_SPEED;
                body.grounded = false;
            }

            if dash_pressed && body.dash_ready {
                let (mut dx, dy) = (input_x, input_y);
                if dx == 0.0 && dy == 0.0 {
                    dx = body.facing;
                }
                let len = (dx * dx + dy * dy).sqrt();
                body.vx = dx / len * DASH_SPEED;
                body.vy = dy / len * DASH_SPEED;
                body.dash_ticks = DASH_TICKS;
                body.dash_ready = false;
                body.grounded = false;
                self.shake = SHAKE_TICKS;
            }
        }

        body.x = (body.x + body.vx).clamp(0.0, (SCREEN_W as i32 - PLAYER_SIZE) as f32);
        body.y += body.vy;

        let floor = (FLOOR_Y - PLAYER_SIZE) as f32;
        if body.y >= floor {
            body.y = floor;
            body.vy = 0.0;
            body.grounded = true;
            if body.dash_ticks == 0 {
                body.dash_ready = true;
            }
        } else {
            body.grounded = false;
            if body.y < 0.0 {
                body.y = 0.0;
                body.vy = 0.0;
            }
        }
    }

    fn draw_player(&mut self) {
        let x = self.body.x.round() as i32;
        let y = self.body.y.round() as i32;

        // Dust puff behind a fresh dash, shrinking with the shake
        if self.shake > 0 {
            let r = (self.shake / 2) as i32;
            self.canvas.circfill(x + PLAYER_SIZE / 2, y + PLAYER_SIZE / 2, r, COLOR_SNOW);
        }
        let hair = if self.body.dash_ready {
            COLOR_HAIR_READY
        } else {
            COLOR_HAIR_SPENT
        };

        match &self.sprites {
            Some(sheet) => {
                // Sprite hair is drawn in the ready color; remap when spent
                self.canvas.pal(COLOR_HAIR_READY, hair);
                self.canvas
                    .spr(sheet, PLAYER_SPRITE, x, y, self.body.facing < 0.0, false);
                self.canvas.pal_reset();
            }
            None => {
                self.canvas
                    .rectfill(x, y, x + PLAYER_SIZE - 1, y + PLAYER_SIZE - 1, COLOR_BODY);
                self.canvas.rectfill(x, y, x + PLAYER_SIZE - 1, y + 2, hair);
            }
        }
    }
}

impl Stepper for Sandbox {
    fn init(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.body = Body::default();
        self.jump_was_held = false;
        self.dash_was_held = false;
        self.shake = 0;
        self.ticks = 0;
        self.snow.clear();
        for _ in 0..SNOW_FLAKES {
            let y = self.rng.gen_range(0.0..SCREEN_H as f32);
            let flake = self.spawn_flake(y);
            self.snow.push(flake);
        }
        self.canvas.reset();
        self.canvas.read_into(&mut self.frame);
    }

    fn update(&mut self) {
        self.ticks += 1;
        self.update_body();
        self.shake = self.shake.saturating_sub(1);
    }

    fn draw(&mut self) {
        let (sx, sy) = if self.shake > 0 {
            (self.rng.gen_range(-2..=2), self.rng.gen_range(-2..=2))
        } else {
            (0, 0)
        };
        self.canvas.camera(sx, sy);

        let right = SCREEN_W as i32 - 1;
        let bottom = SCREEN_H as i32 - 1;
        self.canvas.rectfill(0, 0, right, bottom, COLOR_SKY);
        self.canvas.rectfill(0, FLOOR_Y, right, bottom, COLOR_GROUND);
        self.canvas.line(0, FLOOR_Y, right, FLOOR_Y, COLOR_GROUND_EDGE);

        // Snow drifts here so it keeps moving in frames that are not kept
        for i in 0..self.snow.len() {
            let mut flake = self.snow[i];
            flake.y += flake.speed;
            if flake.y >= SCREEN_H as f32 {
                flake = self.spawn_flake(flake.y - SCREEN_H as f32);
            }
            self.snow[i] = flake;
            let (fx, fy) = (flake.x as i32, flake.y as i32);
            if flake.size == 0 {
                self.canvas.pset(fx, fy, COLOR_SNOW);
            } else {
                self.canvas.rectfill(fx, fy, fx + flake.size, fy + flake.size, COLOR_SNOW);
            }
        }

        self.draw_player();
        self.canvas.read_into(&mut self.frame);
    }

    fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ButtonSet;

    fn run(sandbox: &mut Sandbox, ticks: u32) {
        for _ in 0..ticks {
            sandbox.update();
            sandbox.draw();
        }
    }

    #[test]
    fn test_idle_player_stays_on_floor() {
        let mut sandbox = Sandbox::new(Controller::new());
        let start = sandbox.player_position();
        run(&mut sandbox, 30);
        assert_eq!(sandbox.player_position(), start);
        assert!(sandbox.is_grounded());
    }

    #[test]
    fn test_holding_right_moves_right() {
        let controller = Controller::new();
        let mut sandbox = Sandbox::new(controller.clone());
        let (x0, _) = sandbox.player_position();
        controller.set_held(ButtonSet::EMPTY.with(Button::Right));
        run(&mut sandbox, 10);
        assert!(sandbox.player_position().0 > x0);
    }

    #[test]
    fn test_jump_leaves_and_returns_to_floor() {
        let controller = Controller::new();
        let mut sandbox = Sandbox::new(controller.clone());
        let (_, y0) = sandbox.player_position();

        controller.set_held(ButtonSet::EMPTY.with(Button::Jump));
        run(&mut sandbox, 5);
        assert!(sandbox.player_position().1 < y0);
        assert!(!sandbox.is_grounded());

        controller.set_held(ButtonSet::EMPTY);
        run(&mut sandbox, 60);
        assert_eq!(sandbox.player_position().1, y0);
        assert!(sandbox.is_grounded());
    }

    #[test]
    fn test_dash_spent_until_landing() {
        let controller = Controller::new();
        let mut sandbox = Sandbox::new(controller.clone());

        controller.set_held(ButtonSet::EMPTY.with(Button::Dash).with(Button::Up));
        run(&mut sandbox, 1);
        assert!(!sandbox.can_dash());

        controller.set_held(ButtonSet::EMPTY);
        run(&mut sandbox, 90);
        assert!(sandbox.is_grounded());
        assert!(sandbox.can_dash());
    }

    #[test]
    fn test_same_seed_same_frames() {
        let render = |seed: u64| {
            let controller = Controller::new();
            let mut sandbox = Sandbox::new(controller.clone());
            sandbox.init(seed);
            controller.set_held(ButtonSet::from_bits(0x30));
            run(&mut sandbox, 3);
            controller.set_held(ButtonSet::from_bits(0x02));
            run(&mut sandbox, 20);
            sandbox.frame_buffer().to_vec()
        };
        assert_eq!(render(7), render(7));
        assert_ne!(render(7), render(8));
    }

    #[test]
    fn test_init_resets_state() {
        let controller = Controller::new();
        let mut sandbox = Sandbox::new(controller.clone());
        controller.set_held(ButtonSet::EMPTY.with(Button::Left));
        run(&mut sandbox, 20);
        sandbox.init(0);
        assert_eq!(sandbox.player_position(), (SPAWN_X, (FLOOR_Y - PLAYER_SIZE) as f32));
        assert_eq!(sandbox.ticks(), 0);
    }

    #[test]
    fn test_frame_uses_palette_indices_only() {
        let mut sandbox = Sandbox::new(Controller::new());
        run(&mut sandbox, 5);
        assert!(sandbox.frame_buffer().iter().all(|&p| p < 16));
    }
}
