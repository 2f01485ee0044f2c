use std::collections::VecDeque;

use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::anim::AnimationState;
use crate::cards::CardDeck;

mod cards_panel;
mod hero;
mod render_utils;

pub struct BalloonApp {
    model: HeroModel,
}

struct HeroModel {
    deck: CardDeck,
    anim: AnimationState,
    canvas_size: Vec2,
    rebuild_requested: bool,
    expanded: Vec<bool>,
    scroll_to: Option<usize>,
    highlight: Option<CardHighlight>,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

struct CardHighlight {
    card_index: usize,
    until: f64,
}

const HIGHLIGHT_SECONDS: f64 = 2.0;

impl BalloonApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        deck: CardDeck,
        balloons: usize,
        seed: Option<u64>,
    ) -> Self {
        let labels = deck.labels();
        let expanded = vec![false; deck.len()];

        Self {
            model: HeroModel {
                deck,
                anim: AnimationState::new(labels, balloons, seed),
                canvas_size: Vec2::ZERO,
                rebuild_requested: false,
                expanded,
                scroll_to: None,
                highlight: None,
                fps_current: 0.0,
                fps_samples: VecDeque::new(),
            },
        }
    }
}

impl eframe::App for BalloonApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.model.show(ctx);
    }
}

impl HeroModel {
    fn show(&mut self, ctx: &Context) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("House of Peers");
                    ui.separator();
                    ui.label(format!("platforms: {}", self.deck.len()));
                    ui.label(format!("balloons: {}", self.anim.balloons().len()));
                    if ui.button("Restart animation").clicked() {
                        self.rebuild_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::right("platform_cards")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_cards(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_hero(ui));
    }

    /// Scroll the card into view, expand it and tint it for a moment; the
    /// click-side effects the hosting page used to perform.
    fn focus_card(&mut self, card_index: usize, now: f64) {
        self.scroll_to = Some(card_index);
        if let Some(expanded) = self.expanded.get_mut(card_index) {
            *expanded = true;
        }
        self.highlight = Some(CardHighlight {
            card_index,
            until: now + HIGHLIGHT_SECONDS,
        });
    }

    fn update_fps_counter(&mut self, ctx: &Context) {
        const FPS_SAMPLE_WINDOW: usize = 180;

        let dt = ctx.input(|input| input.stable_dt);
        if dt <= f32::EPSILON {
            return;
        }

        self.fps_current = (1.0 / dt).clamp(0.0, 1000.0);
        self.fps_samples.push_back(self.fps_current);
        while self.fps_samples.len() > FPS_SAMPLE_WINDOW {
            self.fps_samples.pop_front();
        }
    }

    fn fps_display_text(&self) -> Option<String> {
        if self.fps_samples.is_empty() {
            return None;
        }

        let avg = self.fps_samples.iter().sum::<f32>() / self.fps_samples.len() as f32;
        Some(format!("FPS {:.0} | avg {:.1}", self.fps_current, avg))
    }
}
