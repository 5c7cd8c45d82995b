pub mod layout;
pub mod views;

use crate::ChallengeApp;
use crate::model::AppState;
use eframe::{App, Frame};
use egui::Context;

impl App for ChallengeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.poll_fetch();

        // Home button only once the learner has left the hero screen.
        if matches!(self.state, AppState::Challenge | AppState::Summary) {
            layout::top_panel(self, ctx);
        }
        layout::bottom_panel(ctx);

        match self.state {
            AppState::Welcome => views::welcome::ui_welcome(self, ctx),
            AppState::Loading => views::loading::ui_loading(self, ctx),
            AppState::Challenge => views::challenge::ui_challenge(self, ctx),
            AppState::Summary => views::summary::ui_summary(self, ctx),
            AppState::Unavailable => views::unavailable::ui_unavailable(self, ctx),
        }

        if self.state == AppState::Loading {
            // Keep polling while the fetch thread is still running.
            ctx.request_repaint();
        }
    }
}
