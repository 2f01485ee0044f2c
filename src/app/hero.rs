use eframe::egui::{self, Sense, Ui};

use crate::anim::{MAX_FRAME_STEP, draw_balloon};

use super::HeroModel;
use super::render_utils::draw_background;

impl HeroModel {
    pub(super) fn draw_hero(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);

        // Any size change rebuilds the whole batch before this frame steps,
        // so a stale balloon never draws into a torn-down canvas.
        if self.rebuild_requested || rect.size() != self.canvas_size {
            self.anim.resize(rect.width(), rect.height());
            self.canvas_size = rect.size();
            self.rebuild_requested = false;
            log::debug!("canvas resized to {}x{}", rect.width(), rect.height());
        }

        let dt = ui.ctx().input(|input| input.stable_dt).min(MAX_FRAME_STEP);
        self.anim.step(dt);

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer))
            .map(|pointer| (pointer - rect.left_top()).to_pos2());

        if self.anim.update_hover(pointer) {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if response.clicked()
            && let Some(pointer) = pointer
            && let Some(balloon) = self.anim.click(pointer)
        {
            let label = balloon.label().to_owned();
            let now = ui.input(|input| input.time);
            match self.deck.resolve_label(&label) {
                Some(card) => {
                    let index = self.deck.index(card);
                    self.focus_card(index, now);
                }
                None => log::debug!("no card matches balloon label {label:?}"),
            }
        }

        for balloon in self.anim.balloons() {
            draw_balloon(&painter, rect.left_top(), balloon);
        }

        ui.ctx().request_repaint();
    }
}
