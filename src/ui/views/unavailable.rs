use egui::Context;

use crate::ChallengeApp;
use crate::ui::layout::{centered_panel, two_button_row};

pub fn ui_unavailable(app: &mut ChallengeApp, ctx: &Context) {
    centered_panel(ctx, 200.0, 480.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("😕 Today's challenge is not available");
            ui.add_space(8.0);
            if !app.message.is_empty() {
                ui.label(&app.message);
            }
            ui.add_space(16.0);

            let panel_width = ui.available_width().min(400.0);
            let (retry, back) = two_button_row(ui, panel_width, "🔄 Try again", "🔙 Back");
            if retry {
                app.retry_fetch();
            }
            if back {
                app.back_to_welcome();
            }
        });
    });
}
