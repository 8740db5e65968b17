//! Client side of the slots page: collect filters, fetch `/api/slots`,
//! redraw the table body.

pub mod fetcher;
pub mod filters;
pub mod page;
pub mod render;

use fetcher::{FetchError, SlotFetcher};
use filters::{FilterSet, collect_filters};
use page::Page;
use render::render_slots;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

pub const REFRESH_LOADING_LABEL: &str = "Refreshing...";
pub const REFRESH_FAILED: &str = "Could not refresh slots. Please try again later.";
pub const APPLY_FAILED: &str = "Could not apply filters. Please try again later.";
pub const RESET_FAILED: &str = "Could not reset filters. Please try again later.";

/// Blocking user-facing notification.
pub trait Alert: Send + Sync {
    fn alert(&self, message: &str);
}

/// Reports alerts through the log, for runs without a user in front of them.
#[derive(Debug, Default)]
pub struct LogAlert;

impl Alert for LogAlert {
    fn alert(&self, message: &str) {
        warn!(target: "slot_board::alert", "{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Apply,
    Reset,
}

impl Action {
    fn failure_message(self) -> &'static str {
        match self {
            Action::Refresh => REFRESH_FAILED,
            Action::Apply => APPLY_FAILED,
            Action::Reset => RESET_FAILED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action's element was missing when the board was wired.
    Unwired,
    /// The table now shows this many slots.
    Rendered(usize),
    /// A later action was issued before this response arrived.
    Superseded,
    /// The fetch failed and the user was alerted.
    Failed,
}

/// Which actions got wired, decided once from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wiring {
    pub refresh: bool,
    pub apply: bool,
    pub reset: bool,
}

impl Wiring {
    fn from_page(page: &Page) -> Self {
        let has_form = page.filters_form.is_some();
        Self {
            refresh: page.refresh_button.is_some(),
            apply: has_form && page.apply_button.is_some(),
            reset: has_form && page.reset_button.is_some(),
        }
    }
}

pub struct SlotBoard<A: Alert = LogAlert> {
    page: Mutex<Page>,
    fetcher: SlotFetcher,
    alert: A,
    wiring: Wiring,
    latest_ticket: AtomicU64,
}

impl<A: Alert> SlotBoard<A> {
    pub fn wire(page: Page, fetcher: SlotFetcher, alert: A) -> Self {
        let wiring = Wiring::from_page(&page);
        info!(?wiring, origin = %fetcher.origin(), "slot board wired");
        Self {
            page: Mutex::new(page),
            fetcher,
            alert,
            wiring,
            latest_ticket: AtomicU64::new(0),
        }
    }

    pub fn wiring(&self) -> Wiring {
        self.wiring
    }

    pub fn alerts(&self) -> &A {
        &self.alert
    }

    pub async fn page(&self) -> MutexGuard<'_, Page> {
        self.page.lock().await
    }

    /// Refresh button: unfiltered fetch with loading feedback.
    pub async fn click_refresh(&self) -> Outcome {
        if !self.wiring.refresh {
            return Outcome::Unwired;
        }

        let original_label = {
            let mut page = self.page.lock().await;
            page.refresh_button.as_mut().map(|button| {
                button.disabled = true;
                std::mem::replace(&mut button.label, REFRESH_LOADING_LABEL.to_string())
            })
        };

        let outcome = self.load_and_render(Action::Refresh, None).await;

        let mut page = self.page.lock().await;
        if let Some(button) = page.refresh_button.as_mut() {
            button.disabled = false;
            if let Some(label) = original_label {
                button.label = label;
            }
        }
        outcome
    }

    /// Apply button: fetch with the current form filters.
    pub async fn click_apply(&self) -> Outcome {
        if !self.wiring.apply {
            return Outcome::Unwired;
        }

        let filters = {
            let mut page = self.page.lock().await;
            if let Some(button) = page.apply_button.as_mut() {
                button.disabled = true;
            }
            collect_filters(&page)
        };

        let outcome = self.load_and_render(Action::Apply, Some(&filters)).await;

        let mut page = self.page.lock().await;
        if let Some(button) = page.apply_button.as_mut() {
            button.disabled = false;
        }
        outcome
    }

    /// Reset button: restore form defaults, then unfiltered fetch.
    pub async fn click_reset(&self) -> Outcome {
        if !self.wiring.reset {
            return Outcome::Unwired;
        }

        self.page.lock().await.reset_form();
        self.load_and_render(Action::Reset, None).await
    }

    async fn load_and_render(&self, action: Action, filters: Option<&FilterSet>) -> Outcome {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        match self.fetcher.fetch(filters).await {
            Ok(slots) => {
                if self.latest_ticket.load(Ordering::SeqCst) != ticket {
                    debug!(?action, ticket, "dropping superseded slots response");
                    return Outcome::Superseded;
                }
                let mut page = self.page.lock().await;
                render_slots(&mut page, &slots);
                Outcome::Rendered(slots.len())
            }
            Err(err) => {
                self.report(action, &err);
                Outcome::Failed
            }
        }
    }

    fn report(&self, action: Action, err: &FetchError) {
        error!(?action, "slot request failed: {err}");
        self.alert.alert(action.failure_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl Alert for Silent {
        fn alert(&self, _message: &str) {}
    }

    fn fetcher() -> SlotFetcher {
        SlotFetcher::new("http://127.0.0.1:9").unwrap()
    }

    #[test]
    fn wiring_follows_present_elements() {
        let board = SlotBoard::wire(Page::standard(), fetcher(), Silent);
        assert_eq!(
            board.wiring(),
            Wiring {
                refresh: true,
                apply: true,
                reset: true
            }
        );

        let mut page = Page::standard();
        page.filters_form = None;
        let board = SlotBoard::wire(page, fetcher(), Silent);
        assert_eq!(
            board.wiring(),
            Wiring {
                refresh: true,
                apply: false,
                reset: false
            }
        );
    }

    #[tokio::test]
    async fn empty_page_wires_nothing() {
        let board = SlotBoard::wire(Page::default(), fetcher(), Silent);
        assert_eq!(board.click_refresh().await, Outcome::Unwired);
        assert_eq!(board.click_apply().await, Outcome::Unwired);
        assert_eq!(board.click_reset().await, Outcome::Unwired);
    }

    #[test]
    fn failure_messages_are_per_action() {
        assert_eq!(Action::Refresh.failure_message(), REFRESH_FAILED);
        assert_eq!(Action::Apply.failure_message(), APPLY_FAILED);
        assert_eq!(Action::Reset.failure_message(), RESET_FAILED);
    }
}
