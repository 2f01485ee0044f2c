use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Pos2, pos2};
use rand::Rng;
use rand::rngs::StdRng;

use super::pool::NameRotationPool;
use super::text_layout::{self, MAX_LINE_LENGTH};

pub const BOUNDARY_MARGIN_FACTOR: f32 = 1.2;
pub const HIT_RADIUS_FACTOR: f32 = 1.1;

const FADE_RATE: f32 = 1.5;
const RADIUS_CONVERGENCE_RATE: f32 = 3.0;
const HORIZONTAL_FACTOR: f32 = 0.25;
const TILT_SCALE: f32 = 0.08;
const MIN_KNOT_SIZE: f32 = 4.0;
const KNOT_RADIUS_FACTOR: f32 = 0.06;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stable,
    FadingOut,
    FadingIn,
}

struct PendingLabel {
    label: String,
    lines: Vec<String>,
    radius: f32,
}

/// One swinging balloon. The anchor never moves; everything else is derived
/// per frame, knot first, then the body center, then the boundary clamp.
pub struct Balloon {
    anchor: Pos2,
    string_length: f32,

    swing_phase: f32,
    swing_frequency: f32,
    swing_amplitude_deg: f32,
    secondary_phase: f32,
    secondary_frequency: f32,
    secondary_amplitude_deg: f32,

    label: String,
    lines: Vec<String>,
    radius: f32,

    transition: Transition,
    next: Option<PendingLabel>,
    text_opacity: f32,

    knot: Pos2,
    knot_size: f32,
    tilt: f32,
    center: Pos2,

    change_interval: f32,
    change_timer: f32,

    hovered: bool,
}

impl Balloon {
    pub fn new(
        anchor: Pos2,
        string_length: f32,
        swing_frequency: f32,
        swing_amplitude_deg: f32,
        label: String,
        change_interval: f32,
        rng: &mut StdRng,
    ) -> Self {
        let lines = text_layout::wrap(&label, MAX_LINE_LENGTH);
        let radius = text_layout::balloon_radius(&label);
        let knot_size = (radius * KNOT_RADIUS_FACTOR).max(MIN_KNOT_SIZE);

        // Stagger initial transitions so the batch does not change in sync.
        let change_timer =
            change_interval * 0.7 + rng.gen_range(0.0..1.0) * change_interval * 0.3;

        Self {
            anchor,
            string_length,
            swing_phase: rng.gen_range(0.0..TAU),
            swing_frequency,
            swing_amplitude_deg,
            secondary_phase: rng.gen_range(0.0..TAU),
            secondary_frequency: rng.gen_range(0.05..0.15),
            secondary_amplitude_deg: rng.gen_range(2.0..6.0),
            label,
            lines,
            radius,
            transition: Transition::Stable,
            next: None,
            text_opacity: 1.0,
            knot: pos2(anchor.x, anchor.y - string_length),
            knot_size,
            tilt: 0.0,
            center: pos2(anchor.x, anchor.y - string_length - radius),
            change_interval,
            change_timer,
            hovered: false,
        }
    }

    pub fn update(
        &mut self,
        dt: f32,
        canvas_width: f32,
        pool: &mut NameRotationPool,
        rng: &mut StdRng,
    ) {
        self.swing_phase = (self.swing_phase + self.swing_frequency * dt).rem_euclid(TAU);
        self.secondary_phase =
            (self.secondary_phase + self.secondary_frequency * dt).rem_euclid(TAU);

        let swing = self.swing_phase.sin() * self.swing_amplitude_deg.to_radians();
        let wobble = self.secondary_phase.sin() * self.secondary_amplitude_deg.to_radians();
        let combined = swing + wobble;

        self.knot_size = (self.radius * KNOT_RADIUS_FACTOR).max(MIN_KNOT_SIZE);
        self.tilt = (self.swing_phase + FRAC_PI_2).sin() * TILT_SCALE;

        // Knot first; the body hangs off it along the tilt direction.
        self.knot = pos2(
            self.anchor.x + combined.sin() * self.string_length * HORIZONTAL_FACTOR,
            self.anchor.y - combined.cos() * (self.string_length - self.knot_size),
        );

        let lift = self.radius + self.knot_size * 0.5;
        let mut center = pos2(
            self.knot.x + self.tilt.sin() * lift,
            self.knot.y - self.tilt.cos() * lift,
        );

        // Sequential comparisons instead of `clamp`: a narrow canvas can put
        // the upper bound below the lower one.
        let margin = self.radius * BOUNDARY_MARGIN_FACTOR;
        let mut shift = 0.0;
        if center.x < margin {
            shift = margin - center.x;
        }
        if center.x + shift > canvas_width - margin {
            shift = (canvas_width - margin) - center.x;
        }
        center.x += shift;
        self.knot.x += shift;
        self.center = center;

        self.change_timer -= dt;
        self.step_transition(dt, pool, rng);
    }

    fn step_transition(&mut self, dt: f32, pool: &mut NameRotationPool, rng: &mut StdRng) {
        match self.transition {
            Transition::Stable => {
                if self.change_timer <= 0.0 {
                    self.transition = Transition::FadingOut;
                    self.change_timer = self.change_interval;
                }
            }
            Transition::FadingOut => {
                self.text_opacity -= FADE_RATE * dt;
                if self.text_opacity <= 0.0 {
                    self.text_opacity = 0.0;

                    // Release before claim, so the swap never holds two
                    // labels at once.
                    pool.release(&self.label);
                    match pool.pick_unused(rng) {
                        Some(next_label) => {
                            pool.claim(&next_label);
                            let lines = text_layout::wrap(&next_label, MAX_LINE_LENGTH);
                            let radius = text_layout::balloon_radius(&next_label);
                            self.next = Some(PendingLabel {
                                label: next_label,
                                lines,
                                radius,
                            });
                        }
                        None => {
                            // Empty pool: keep the current label and fade it
                            // back in.
                            pool.claim(&self.label);
                        }
                    }
                    self.transition = Transition::FadingIn;
                }
            }
            Transition::FadingIn => {
                self.text_opacity += FADE_RATE * dt;
                if let Some(next) = &self.next {
                    self.radius += (next.radius - self.radius) * RADIUS_CONVERGENCE_RATE * dt;
                }
                if self.text_opacity >= 1.0 {
                    self.text_opacity = 1.0;
                    if let Some(next) = self.next.take() {
                        self.label = next.label;
                        self.lines = next.lines;
                        self.radius = next.radius;
                    }
                    self.transition = Transition::Stable;
                }
            }
        }
    }

    pub fn contains_point(&self, point: Pos2) -> bool {
        hit_test(self.center, self.radius, point)
    }

    /// Records the hover flag for the next draw; rendering only, no physics.
    pub fn check_hover(&mut self, pointer: Option<Pos2>) -> bool {
        self.hovered = pointer.is_some_and(|point| self.contains_point(point));
        self.hovered
    }

    /// Lines shown this frame: the staged label once the fade-in starts.
    pub fn display_lines(&self) -> &[String] {
        match &self.next {
            Some(next) if self.transition == Transition::FadingIn => &next.lines,
            _ => &self.lines,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    #[cfg(test)]
    pub fn is_transitioning(&self) -> bool {
        self.transition != Transition::Stable
    }

    #[cfg(test)]
    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn text_opacity(&self) -> f32 {
        self.text_opacity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn knot(&self) -> Pos2 {
        self.knot
    }

    pub fn knot_size(&self) -> f32 {
        self.knot_size
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    #[cfg(test)]
    pub fn change_timer(&self) -> f32 {
        self.change_timer
    }

    #[cfg(test)]
    pub fn force_change_now(&mut self) {
        self.change_timer = 0.0;
    }
}

/// Forgiving click area: slightly larger than the balloon body.
pub fn hit_test(center: Pos2, radius: f32, point: Pos2) -> bool {
    center.distance(point) <= radius * HIT_RADIUS_FACTOR
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn test_pool(labels: &[&str]) -> NameRotationPool {
        NameRotationPool::new(labels.iter().map(|label| (*label).to_owned()).collect())
    }

    fn test_balloon(label: &str, rng: &mut StdRng) -> Balloon {
        Balloon::new(
            pos2(400.0, 400.0),
            200.0,
            0.12,
            14.0,
            label.to_owned(),
            12.0,
            rng,
        )
    }

    #[test]
    fn hit_test_matches_the_enlarged_radius() {
        let center = pos2(100.0, 100.0);
        // Distance ~42.4 < 55.
        assert!(hit_test(center, 50.0, pos2(130.0, 130.0)));
        assert!(!hit_test(center, 50.0, pos2(200.0, 200.0)));
        // Between the body and the enlarged hit area.
        assert!(hit_test(center, 50.0, pos2(154.0, 100.0)));
        assert!(!hit_test(center, 50.0, pos2(156.0, 100.0)));
    }

    #[test]
    fn update_keeps_the_center_inside_the_boundary() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pool = test_pool(&["Stake", "Nexo", "Corum"]);
        let label = pool.pick_unused(&mut rng).unwrap();
        pool.claim(&label);

        let canvas_width = 900.0;
        let mut balloon = Balloon::new(
            pos2(30.0, 400.0),
            260.0,
            0.15,
            20.0,
            label,
            12.0,
            &mut rng,
        );

        for step in 0..2_000 {
            let dt = (step % 6) as f32 * 0.01; // covers dt in [0, 0.05]
            balloon.update(dt, canvas_width, &mut pool, &mut rng);

            let margin = balloon.radius() * BOUNDARY_MARGIN_FACTOR;
            assert!(
                balloon.center().x >= margin - 1e-3
                    && balloon.center().x <= canvas_width - margin + 1e-3,
                "center {} escaped [{}, {}]",
                balloon.center().x,
                margin,
                canvas_width - margin,
            );
        }
    }

    #[test]
    fn body_hangs_off_the_knot_along_the_tilt() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut pool = test_pool(&["Stake", "Nexo"]);
        let mut balloon = test_balloon("Stake", &mut rng);
        pool.claim("Stake");

        balloon.update(0.016, 900.0, &mut pool, &mut rng);

        let lift = balloon.radius() + balloon.knot_size() * 0.5;
        let expected = pos2(
            balloon.knot().x + balloon.tilt().sin() * lift,
            balloon.knot().y - balloon.tilt().cos() * lift,
        );
        assert!((balloon.center().x - expected.x).abs() < 1e-3);
        assert!((balloon.center().y - expected.y).abs() < 1e-3);
    }

    #[test]
    fn fade_cycle_completes_with_a_fresh_label() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut pool = test_pool(&["Stake", "Nexo", "Corum", "Mintos"]);
        let mut balloon = test_balloon("Stake", &mut rng);
        pool.claim("Stake");

        balloon.force_change_now();

        let mut saw_fading_out = false;
        let mut saw_fading_in = false;
        let mut completed = false;
        for _ in 0..400 {
            balloon.update(0.016, 900.0, &mut pool, &mut rng);
            match balloon.transition() {
                Transition::FadingOut => saw_fading_out = true,
                Transition::FadingIn => saw_fading_in = true,
                Transition::Stable if saw_fading_in => {
                    completed = true;
                    break;
                }
                Transition::Stable => {}
            }
        }

        assert!(saw_fading_out && saw_fading_in && completed);
        assert_eq!(balloon.text_opacity(), 1.0);
        assert_ne!(balloon.label(), "Stake");
        assert!(pool.is_displayed(balloon.label()));
        assert!(!pool.is_displayed("Stake"));
        // Timer was re-armed for the next cycle on fade-out entry.
        assert!(balloon.change_timer() > 0.0);
    }

    #[test]
    fn radius_converges_to_the_staged_target_during_fade_in() {
        let mut rng = StdRng::seed_from_u64(33);
        let mut pool = test_pool(&["Ab", "A Much Longer Platform Name"]);
        let mut balloon = test_balloon("Ab", &mut rng);
        pool.claim("Ab");

        balloon.force_change_now();
        let start_radius = balloon.radius();

        for _ in 0..400 {
            balloon.update(0.016, 900.0, &mut pool, &mut rng);
            if !balloon.is_transitioning() && balloon.label() != "Ab" {
                break;
            }
        }

        assert_eq!(balloon.label(), "A Much Longer Platform Name");
        assert_eq!(
            balloon.radius(),
            text_layout::balloon_radius("A Much Longer Platform Name")
        );
        assert!(balloon.radius() > start_radius);
    }

    #[test]
    fn empty_pool_fades_the_same_label_back_in() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut pool = test_pool(&[]);
        let mut balloon = test_balloon("Stake", &mut rng);

        balloon.force_change_now();
        for _ in 0..400 {
            balloon.update(0.016, 900.0, &mut pool, &mut rng);
            if !balloon.is_transitioning() && balloon.text_opacity() == 1.0 {
                break;
            }
        }

        assert_eq!(balloon.label(), "Stake");
        assert_eq!(balloon.text_opacity(), 1.0);
    }
}
