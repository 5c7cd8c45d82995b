use egui::{Button, Context, ProgressBar, RichText};

use crate::ChallengeApp;
use crate::model::{ChallengeType, SubmittedAnswer};
use crate::ui::layout::centered_panel;

pub fn ui_challenge(app: &mut ChallengeApp, ctx: &Context) {
    // Cloned so click handlers below can borrow the app mutably.
    let Some(challenge) = app.current_challenge().cloned() else {
        app.back_to_welcome();
        return;
    };

    centered_panel(ctx, 520.0, 640.0, |ui| {
        ui.add(ProgressBar::new(app.progress_fraction()).text(app.progress_label()));
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(challenge.difficulty.label());
            ui.label(format!("⭐ {} points", challenge.points));
        });
        ui.add_space(8.0);
        ui.heading(&challenge.question);
        ui.add_space(10.0);

        let locked = app.phase().is_checked();

        match challenge.challenge_type {
            ChallengeType::MultipleChoice | ChallengeType::AudioRecognition => {
                if let Some(url) = &challenge.audio_url {
                    ui.label(format!("🔊 {url}"));
                    ui.label(RichText::new("(audio playback not supported; clip name shown)").weak());
                    ui.add_space(6.0);
                }

                let selected = match app.phase().answer() {
                    Some(SubmittedAnswer::Choice(s)) => Some(s.clone()),
                    _ => None,
                };
                let mut clicked: Option<String> = None;
                ui.add_enabled_ui(!locked, |ui| {
                    for option in challenge.options.as_deref().unwrap_or(&[]) {
                        let is_selected = selected.as_deref() == Some(option.as_str());
                        if ui.selectable_label(is_selected, option).clicked() {
                            clicked = Some(option.clone());
                        }
                        ui.add_space(4.0);
                    }
                });
                if let Some(option) = clicked {
                    app.select_choice(&option);
                }
            }
            ChallengeType::TranslationBuilder => {
                let tokens: Vec<String> = match app.phase().answer() {
                    Some(SubmittedAnswer::Tokens(t)) => t.clone(),
                    _ => Vec::new(),
                };

                ui.label(RichText::new("Your answer (tap a word to remove it):").weak());
                let mut removed: Option<usize> = None;
                ui.horizontal_wrapped(|ui| {
                    if tokens.is_empty() {
                        ui.label(RichText::new("…").weak());
                    }
                    for (i, token) in tokens.iter().enumerate() {
                        if ui.add_enabled(!locked, Button::new(token)).clicked() {
                            removed = Some(i);
                        }
                    }
                });
                if let Some(i) = removed {
                    app.remove_token(i);
                }

                ui.add_space(10.0);
                ui.label(RichText::new("Word bank:").weak());
                let mut pushed: Option<String> = None;
                ui.horizontal_wrapped(|ui| {
                    for token in challenge.word_bank.as_deref().unwrap_or(&[]) {
                        if ui.add_enabled(!locked, Button::new(token)).clicked() {
                            pushed = Some(token.clone());
                        }
                    }
                });
                if let Some(token) = pushed {
                    app.push_token(&token);
                }
            }
        }

        ui.add_space(12.0);

        // Feedback and explanation appear between check and continue.
        if locked {
            if !app.message.is_empty() {
                ui.label(RichText::new(&app.message).strong());
            }
            if let Some(explanation) = &challenge.explanation {
                ui.add_space(4.0);
                ui.label(format!("💡 {explanation}"));
            }
            ui.add_space(8.0);
        }

        let panel_width = ui.available_width().min(480.0);
        let btn_w = (panel_width - 8.0) / 2.0;
        ui.horizontal(|ui| {
            ui.add_space((ui.available_width() - panel_width).max(0.0) / 2.0);
            let can_check = app.phase().has_answer() && !locked;
            let check = ui.add_enabled(
                can_check,
                Button::new("Check").min_size([btn_w, 36.0].into()),
            );
            let cont = ui.add_enabled(
                locked,
                Button::new("Continue ▶").min_size([btn_w, 36.0].into()),
            );
            if check.clicked() {
                app.check_answer();
            }
            if cont.clicked() {
                app.continue_next();
            }
        });
    });
}
