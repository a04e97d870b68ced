use std::rc::Rc;

use shared::{CelebrationController, CelebrationData, ViewState};
use yew::prelude::*;

/// Top-level view transitions
pub enum ViewAction {
    Submit(CelebrationData),
    Reset,
}

/// Reducer state wrapping the single view controller
#[derive(Debug, Default, PartialEq)]
pub struct AppState {
    controller: CelebrationController,
}

impl AppState {
    pub fn view(&self) -> &ViewState {
        self.controller.state()
    }
}

impl Reducible for AppState {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut controller = self.controller.clone();
        match action {
            ViewAction::Submit(data) => controller.submit(data.name, data.date_of_birth),
            ViewAction::Reset => controller.reset(),
        }
        Rc::new(Self { controller })
    }
}
