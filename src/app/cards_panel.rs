use eframe::egui::{self, Align, Color32, RichText, Ui};

use super::HeroModel;
use super::render_utils::blend_color;

const HIGHLIGHT_TINT: Color32 = Color32::from_rgb(201, 167, 75);

impl HeroModel {
    pub(super) fn draw_cards(&mut self, ui: &mut Ui) {
        ui.heading("Platforms");
        ui.add_space(4.0);
        ui.label("Click a balloon to jump to its platform.");
        ui.add_space(6.0);

        let now = ui.input(|input| input.time);
        if let Some(highlight) = &self.highlight
            && highlight.until <= now
        {
            self.highlight = None;
        }

        let scroll_to = self.scroll_to.take();

        egui::ScrollArea::vertical()
            .id_salt("platform_cards_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for index in 0..self.deck.len() {
                    let highlighted = self
                        .highlight
                        .as_ref()
                        .is_some_and(|highlight| highlight.card_index == index);
                    let expanded = self.expanded.get(index).copied().unwrap_or(false);

                    let default_fill = ui.visuals().faint_bg_color;
                    let fill = if highlighted {
                        blend_color(default_fill, HIGHLIGHT_TINT, 0.35)
                    } else {
                        default_fill
                    };

                    let mut toggle = false;
                    let frame_response = egui::Frame::group(ui.style()).fill(fill).show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            let title = self.deck.cards()[index].title.as_str();
                            ui.label(RichText::new(title).strong());
                            ui.with_layout(
                                egui::Layout::right_to_left(Align::Center),
                                |ui| {
                                    let caption = if expanded { "CLOSE" } else { "DETAILS" };
                                    toggle = ui.small_button(caption).clicked();
                                },
                            );
                        });

                        if expanded {
                            let card = &self.deck.cards()[index];
                            if card.description.is_empty() {
                                ui.label("No description available.");
                            } else {
                                ui.label(card.description.as_str());
                            }
                            if let Some(url) = &card.url {
                                ui.hyperlink(url);
                            }
                        }
                    });

                    if toggle
                        && let Some(flag) = self.expanded.get_mut(index)
                    {
                        *flag = !*flag;
                    }

                    if scroll_to == Some(index) {
                        frame_response.response.scroll_to_me(Some(Align::Center));
                    }

                    ui.add_space(4.0);
                }
            });
    }
}
