use std::time::Duration;

use crate::page::handle::PageHandle;

const CARD_ANIMATION_STEP: Duration = Duration::from_millis(100);

pub struct HomeController {
    page: PageHandle,
}

impl HomeController {
    pub fn new(page: PageHandle) -> Self {
        Self { page }
    }

    /// Staggers the fade-in of every `card`, in document order.
    pub fn animate_cards(&self) {
        self.page.with(|doc| {
            for (index, id) in doc.ids_by_class("card").iter().enumerate() {
                let delay = CARD_ANIMATION_STEP.as_millis() * index as u128;
                doc.set_style(id, "animation-delay", &format!("{delay}ms"));
                doc.add_class(id, "fade-in");
            }
        });
    }
}
