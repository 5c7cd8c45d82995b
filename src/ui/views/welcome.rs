use egui::{Button, Context, RichText};

use crate::ChallengeApp;
use crate::ui::layout::centered_panel;

pub fn ui_welcome(app: &mut ChallengeApp, ctx: &Context) {
    centered_panel(ctx, 260.0, 540.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("👋 Mhoro! Shona Daily Challenge");
            ui.add_space(6.0);
            ui.label(format!("📅 {}", app.today));
            ui.add_space(18.0);

            let btn_w = (ui.available_width() * 0.9).clamp(120.0, 400.0);
            let btn_h = 40.0;

            if app.has_completed_today() {
                ui.label(
                    RichText::new("✅ You have already completed today's challenge.").strong(),
                );
                ui.add_space(10.0);
                if ui
                    .add_sized([btn_w, btn_h], Button::new("📊 View today's results"))
                    .clicked()
                {
                    app.view_results();
                }
            } else if ui
                .add_sized([btn_w, btn_h], Button::new("▶ Start today's challenge"))
                .clicked()
            {
                app.start_daily();
            }

            ui.add_space(5.0);
            if ui.add_sized([btn_w, btn_h], Button::new("❌ Quit")).clicked() {
                std::process::exit(0);
            }

            if !app.message.is_empty() {
                ui.add_space(10.0);
                ui.label(&app.message);
            }
        });
    });
}
