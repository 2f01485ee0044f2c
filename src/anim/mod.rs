use eframe::egui::{Pos2, Vec2, pos2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod balloon;
mod draw;
mod pool;
mod text_layout;

pub use balloon::Balloon;
pub use draw::draw_balloon;
use pool::NameRotationPool;

pub const VISIBLE_BALLOONS: usize = 5;

/// Largest simulated step per frame; keeps the batch from jumping after the
/// window was suspended.
pub const MAX_FRAME_STEP: f32 = 0.05;

const MIN_STRING_FRACTION: f32 = 0.3;
const MAX_STRING_FRACTION: f32 = 0.8;
const MIN_SWING_FREQUENCY: f32 = 0.07;
const MAX_SWING_FREQUENCY: f32 = 0.17;
const MIN_SWING_AMPLITUDE_DEG: f32 = 8.0;
const MAX_SWING_AMPLITUDE_DEG: f32 = 20.0;
const MIN_CHANGE_INTERVAL: f32 = 10.0;
const MAX_CHANGE_INTERVAL: f32 = 17.0;

/// Owns the balloon batch, the rotation pool and the RNG. The whole batch is
/// rebuilt on every resize; no balloon outlives one.
pub struct AnimationState {
    pool: NameRotationPool,
    balloons: Vec<Balloon>,
    viewport: Vec2,
    slots: usize,
    rng: StdRng,
}

impl AnimationState {
    pub fn new(labels: Vec<String>, slots: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            pool: NameRotationPool::new(labels),
            balloons: Vec::new(),
            viewport: Vec2::ZERO,
            slots,
            rng,
        }
    }

    /// Discards and rebuilds the whole batch: evenly spaced anchors along
    /// the bottom edge, randomized string lengths and swing parameters, a
    /// unique starting label per slot. In-flight transitions die with the
    /// old batch.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.balloons.clear();
        self.pool.clear_displayed();
        self.viewport = vec2(width, height);

        if self.pool.is_empty() || width <= 0.0 || height <= 0.0 {
            return;
        }

        let spacing = width / (self.slots as f32 + 1.0);
        for slot in 0..self.slots {
            let Some(label) = self.pool.pick_unused(&mut self.rng) else {
                break;
            };
            self.pool.claim(&label);

            let anchor = pos2(spacing * (slot as f32 + 1.0), height);
            let string_length =
                height * self.rng.gen_range(MIN_STRING_FRACTION..MAX_STRING_FRACTION);
            let swing_frequency = self
                .rng
                .gen_range(MIN_SWING_FREQUENCY..MAX_SWING_FREQUENCY);
            let swing_amplitude = self
                .rng
                .gen_range(MIN_SWING_AMPLITUDE_DEG..MAX_SWING_AMPLITUDE_DEG);
            let change_interval = self
                .rng
                .gen_range(MIN_CHANGE_INTERVAL..MAX_CHANGE_INTERVAL);

            self.balloons.push(Balloon::new(
                anchor,
                string_length,
                swing_frequency,
                swing_amplitude,
                label,
                change_interval,
                &mut self.rng,
            ));
        }
    }

    /// Advances every balloon in fixed index order. Drawing follows the same
    /// order, so stacking of overlapping balloons is deterministic.
    pub fn step(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_STEP);
        for balloon in &mut self.balloons {
            balloon.update(dt, self.viewport.x, &mut self.pool, &mut self.rng);
        }
    }

    /// Updates every balloon's hover flag; returns whether any balloon is
    /// under the pointer (cursor affordance).
    pub fn update_hover(&mut self, pointer: Option<Pos2>) -> bool {
        let mut any = false;
        for balloon in &mut self.balloons {
            any |= balloon.check_hover(pointer);
        }
        any
    }

    /// First balloon in creation order containing the point.
    pub fn click(&self, pointer: Pos2) -> Option<&Balloon> {
        self.balloons
            .iter()
            .find(|balloon| balloon.contains_point(pointer))
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }
}
