use egui::{Button, Context, Grid, ScrollArea};

use crate::ChallengeApp;
use crate::ui::layout::centered_panel;
use crate::view_models::format_duration;

pub fn ui_summary(app: &mut ChallengeApp, ctx: &Context) {
    // Rendered the same way whether the record was just earned or loaded
    // from a previous visit.
    let Some(stats) = app.summary_stats() else {
        app.back_to_welcome();
        return;
    };
    let rows = app.summary_rows();

    centered_panel(ctx, 560.0, 620.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("🎉 Daily challenge complete!");
            ui.add_space(8.0);
            ui.label(format!(
                "⭐ {} points  •  {}/{} correct ({}%)  •  ⏱ {}",
                stats.total_score,
                stats.correct_answers,
                stats.total_challenges,
                stats.accuracy,
                format_duration(stats.time_spent_secs),
            ));
            ui.add_space(12.0);

            ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                Grid::new("summary_grid")
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("#");
                        ui.label("Challenge");
                        ui.label("Your answer");
                        ui.label("Time");
                        ui.label("Result");
                        ui.end_row();

                        for r in &rows {
                            ui.label(r.index_1based.to_string());
                            ui.label(&r.challenge_id);
                            ui.label(r.answer_label());
                            ui.label(format_duration(r.time_spent_secs));
                            ui.label(r.status_label());
                            ui.end_row();
                        }
                    });
            });

            ui.add_space(16.0);
            if ui
                .add_sized([200.0, 36.0], Button::new("🏠 Back to start"))
                .clicked()
            {
                app.back_to_welcome();
            }
        });
    });
}
