//! Form-sync service
//!
//! Turns control interactions into fire-and-forget POST notifications and
//! writes successful replies into the response container. Page-side effects of
//! a handler happen synchronously; the request itself runs as a spawned task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::Instrument;

use crate::application::BridgeError;
use crate::domain::{
    Display, FormControl, FormPair, PageLayout, PowerState, Visibility, FORM_URLENCODED,
};
use crate::ports::outbound::{
    HttpClientPort, HttpReply, PageError, PagePort, PostRequest, TaskSpawner, TransportError,
};

/// What became of one notification.
///
/// Only `Applied` changes the page; the other outcomes are logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Applied,
    IgnoredStatus(u16),
    Failed(TransportError),
    ContainerMissing(PageError),
}

impl NotifyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Markup to place in the response container, if any.
pub fn container_markup(result: &Result<HttpReply, TransportError>) -> Option<&str> {
    match result {
        Ok(reply) if reply.is_ok() => Some(reply.body.as_str()),
        _ => None,
    }
}

#[derive(Clone)]
pub struct FormSyncBridge {
    http: Arc<dyn HttpClientPort>,
    page: Arc<dyn PagePort>,
    spawner: Arc<dyn TaskSpawner>,
    layout: Arc<PageLayout>,
    sequence: Arc<AtomicU64>,
}

impl FormSyncBridge {
    pub fn new(
        http: Arc<dyn HttpClientPort>,
        page: Arc<dyn PagePort>,
        spawner: Arc<dyn TaskSpawner>,
        layout: PageLayout,
    ) -> Self {
        Self {
            http,
            page,
            spawner,
            layout: Arc::new(layout),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Hide the submit control and, on the rich panel, the players group.
    ///
    /// Must run once after the page's elements exist.
    pub fn init_page(&self) -> Result<(), BridgeError> {
        self.page
            .set_visibility(&self.layout.submit_id, Visibility::Hidden)?;

        if let Some(players) = &self.layout.players {
            self.page.set_display(&players.label_id, Display::None)?;
            self.page.set_display(&players.select_id, Display::None)?;
        }

        tracing::debug!(submit = %self.layout.submit_id, "Page initialized");
        Ok(())
    }

    pub fn on_mode_changed(&self, control: &FormControl) -> Result<(), BridgeError> {
        self.notify_pair(control, control.value_pair())?;

        let Some(players) = &self.layout.players else {
            return Ok(());
        };

        if control.value == players.sentinel {
            self.page.set_display(&players.label_id, Display::InlineBlock)?;
            self.page
                .set_display(&players.select_id, Display::InlineBlock)?;
            self.page.set_selected_index(&players.select_id, 0)?;
        } else {
            self.page.set_display(&players.label_id, Display::None)?;
            self.page.set_display(&players.select_id, Display::None)?;
        }
        Ok(())
    }

    pub fn on_players_changed(&self, control: &FormControl) -> Result<(), BridgeError> {
        self.notify_pair(control, control.value_pair())
    }

    /// Flip the toggle, then notify with its new class.
    ///
    /// The control is already flipped when this returns, even if it has no
    /// form to notify.
    pub fn on_power_toggled(&self, control: &mut FormControl) -> Result<PowerState, BridgeError> {
        let state = control.toggle_power();
        self.notify_pair(control, control.class_pair())?;
        Ok(state)
    }

    /// Dispatch one POST without waiting for it.
    pub fn notify_server(&self, target_url: &str, content_type: &str, body: impl Into<String>) {
        let request = PostRequest::new(target_url, content_type, body);
        let request_id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(request_id, %request, "Dispatching notification");

        let bridge = self.clone();
        let span = tracing::debug_span!("notify", request_id);
        self.spawner.spawn(Box::pin(
            async move {
                bridge.send_and_apply(request).await;
            }
            .instrument(span),
        ));
    }

    /// Send one request and apply its reply to the page.
    pub async fn send_and_apply(&self, request: PostRequest) -> NotifyOutcome {
        let result = self.http.post(&request).await;

        let outcome = match container_markup(&result) {
            Some(markup) => match self.page.set_inner_html(&self.layout.response_id, markup) {
                Ok(()) => NotifyOutcome::Applied,
                Err(e) => NotifyOutcome::ContainerMissing(e),
            },
            None => match &result {
                Ok(reply) => NotifyOutcome::IgnoredStatus(reply.status),
                Err(e) => NotifyOutcome::Failed(e.clone()),
            },
        };

        match &outcome {
            NotifyOutcome::Applied => tracing::debug!("Response container updated"),
            NotifyOutcome::IgnoredStatus(status) => {
                tracing::warn!(status, "Server replied with non-OK status; reply ignored")
            }
            NotifyOutcome::Failed(e) => tracing::warn!(error = %e, "Notification failed"),
            NotifyOutcome::ContainerMissing(e) => {
                tracing::error!(error = %e, "Response container unavailable")
            }
        }
        outcome
    }

    fn notify_pair(&self, control: &FormControl, pair: FormPair) -> Result<(), BridgeError> {
        let action = control
            .form_action
            .as_deref()
            .ok_or_else(|| BridgeError::no_form(&control.name))?;
        self.notify_server(action, FORM_URLENCODED, pair.encode());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::page::MemoryPage;
    use crate::infrastructure::testing::QueuedSpawner;
    use crate::ports::outbound::MockHttpClientPort;

    const ACTION: &str = "/control";

    struct Fixture {
        bridge: FormSyncBridge,
        page: Arc<MemoryPage>,
        spawner: Arc<QueuedSpawner>,
    }

    fn fixture(layout: PageLayout, http: MockHttpClientPort) -> Fixture {
        let page = Arc::new(MemoryPage::for_layout(&layout));
        let spawner = Arc::new(QueuedSpawner::new());
        let bridge = FormSyncBridge::new(Arc::new(http), page.clone(), spawner.clone(), layout);
        Fixture {
            bridge,
            page,
            spawner,
        }
    }

    fn replying(status: u16, body: &'static str) -> MockHttpClientPort {
        let mut http = MockHttpClientPort::new();
        http.expect_post()
            .returning(move |_| Ok(HttpReply::new(status, body)));
        http
    }

    fn expecting_body(body: &'static str) -> MockHttpClientPort {
        let mut http = MockHttpClientPort::new();
        http.expect_post()
            .withf(move |req: &PostRequest| {
                req.target_url == ACTION && req.content_type == FORM_URLENCODED && req.body == body
            })
            .times(1)
            .returning(|_| Ok(HttpReply::new(200, "ok")));
        http
    }

    #[test]
    fn init_page_hides_submit_and_players_group() {
        let f = fixture(PageLayout::rich(), MockHttpClientPort::new());

        f.bridge.init_page().unwrap();

        assert_eq!(f.page.visibility("mode_submit"), Some(Visibility::Hidden));
        assert_eq!(
            f.page.display("catch_colors_players_label"),
            Some(Display::None)
        );
        assert_eq!(
            f.page.display("catch_colors_players_select"),
            Some(Display::None)
        );
        assert_eq!(f.spawner.pending(), 0);
    }

    #[test]
    fn init_page_on_basic_layout_only_touches_submit() {
        let f = fixture(PageLayout::basic(), MockHttpClientPort::new());

        f.bridge.init_page().unwrap();

        assert_eq!(f.page.visibility("mode_submit"), Some(Visibility::Hidden));
        assert!(f.page.element("catch_colors_players_label").is_none());
    }

    #[test]
    fn init_page_fails_when_submit_is_missing() {
        let layout = PageLayout::basic();
        let page = Arc::new(MemoryPage::with_elements(["server_response"]));
        let bridge = FormSyncBridge::new(
            Arc::new(MockHttpClientPort::new()),
            page,
            Arc::new(QueuedSpawner::new()),
            layout,
        );

        let err = bridge.init_page().unwrap_err();
        assert!(err.is_missing_element());
    }

    #[tokio::test]
    async fn sentinel_mode_shows_players_and_resets_selection() {
        let f = fixture(PageLayout::rich(), expecting_body("mode=catch_colors_multiplayer"));
        f.bridge.init_page().unwrap();
        f.page.select_option("catch_colors_players_select", 2).unwrap();

        let control = FormControl::new("mode", "catch_colors_multiplayer").in_form(ACTION);
        f.bridge.on_mode_changed(&control).unwrap();

        assert_eq!(
            f.page.display("catch_colors_players_label"),
            Some(Display::InlineBlock)
        );
        assert_eq!(
            f.page.display("catch_colors_players_select"),
            Some(Display::InlineBlock)
        );
        assert_eq!(f.page.selected_index("catch_colors_players_select"), Some(0));

        assert_eq!(f.spawner.pending(), 1);
        f.spawner.run_all().await;
        assert_eq!(f.page.inner_html("server_response").as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn other_mode_hides_players() {
        let f = fixture(PageLayout::rich(), expecting_body("mode=pong"));
        f.bridge
            .on_mode_changed(&FormControl::new("mode", "catch_colors_multiplayer").in_form(ACTION))
            .unwrap();
        // First dispatch is discarded; only the second request is checked.
        f.spawner.take_all();

        f.bridge
            .on_mode_changed(&FormControl::new("mode", "pong").in_form(ACTION))
            .unwrap();

        assert_eq!(
            f.page.display("catch_colors_players_label"),
            Some(Display::None)
        );
        assert_eq!(
            f.page.display("catch_colors_players_select"),
            Some(Display::None)
        );
        f.spawner.run_all().await;
    }

    #[tokio::test]
    async fn mode_change_on_basic_layout_only_notifies() {
        let f = fixture(PageLayout::basic(), expecting_body("mode=logo_bounce"));

        f.bridge
            .on_mode_changed(&FormControl::new("mode", "catch_colors_multiplayer").in_form(ACTION))
            .unwrap();
        f.spawner.take_all();
        f.bridge
            .on_mode_changed(&FormControl::new("mode", "logo_bounce").in_form(ACTION))
            .unwrap();

        f.spawner.run_all().await;
        assert_eq!(f.page.inner_html("server_response").as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn players_change_posts_pair_and_nothing_else() {
        let f = fixture(PageLayout::rich(), expecting_body("players=3"));
        f.bridge.init_page().unwrap();

        f.bridge
            .on_players_changed(&FormControl::new("players", "3").in_form(ACTION))
            .unwrap();
        f.spawner.run_all().await;

        assert_eq!(
            f.page.display("catch_colors_players_select"),
            Some(Display::None)
        );
        assert_eq!(f.page.selected_index("catch_colors_players_select"), Some(0));
    }

    #[tokio::test]
    async fn power_toggle_flips_state_before_request_runs() {
        let f = fixture(PageLayout::rich(), expecting_body("power=on"));
        let mut control = FormControl::new("power", "Off")
            .with_class("off")
            .in_form(ACTION);

        let state = f.bridge.on_power_toggled(&mut control).unwrap();

        assert_eq!(state, PowerState::On);
        assert_eq!(control.class_name, "on");
        assert_eq!(control.value, "On");
        // Request is dispatched but has not run yet.
        assert_eq!(f.spawner.pending(), 1);
        assert_eq!(f.page.inner_html("server_response").as_deref(), Some(""));

        f.spawner.run_all().await;
        assert_eq!(f.page.inner_html("server_response").as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn each_toggle_posts_exactly_once_with_new_class() {
        let mut http = MockHttpClientPort::new();
        let mut seq = mockall::Sequence::new();
        for body in ["power=off", "power=on", "power=off"] {
            http.expect_post()
                .withf(move |req: &PostRequest| req.body == body)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(HttpReply::new(200, "")));
        }
        let f = fixture(PageLayout::rich(), http);
        let mut control = FormControl::new("power", "On").with_class("on").in_form(ACTION);

        for _ in 0..3 {
            f.bridge.on_power_toggled(&mut control).unwrap();
            f.spawner.run_all().await;
        }

        assert_eq!(control.class_name, "off");
        assert_eq!(control.value, "Off");
    }

    #[tokio::test]
    async fn toggle_outside_form_still_flips_but_sends_nothing() {
        let f = fixture(PageLayout::rich(), MockHttpClientPort::new());
        let mut control = FormControl::new("power", "Off").with_class("off");

        let err = f.bridge.on_power_toggled(&mut control).unwrap_err();

        assert_eq!(err, BridgeError::no_form("power"));
        assert_eq!(control.class_name, "on");
        assert_eq!(f.spawner.pending(), 0);
    }

    #[tokio::test]
    async fn ok_reply_is_injected_verbatim() {
        let f = fixture(PageLayout::rich(), replying(200, "<b>ok</b>"));

        let outcome = f
            .bridge
            .send_and_apply(PostRequest::new(ACTION, FORM_URLENCODED, "mode=pong"))
            .await;

        assert!(outcome.is_applied());
        assert_eq!(
            f.page.inner_html("server_response").as_deref(),
            Some("<b>ok</b>")
        );
    }

    #[tokio::test]
    async fn not_found_leaves_container_unchanged() {
        let f = fixture(PageLayout::rich(), replying(404, "<h1>Not Found</h1>"));
        f.page.set_inner_html("server_response", "previous").unwrap();

        let outcome = f
            .bridge
            .send_and_apply(PostRequest::new(ACTION, FORM_URLENCODED, "mode=pong"))
            .await;

        assert_eq!(outcome, NotifyOutcome::IgnoredStatus(404));
        assert_eq!(
            f.page.inner_html("server_response").as_deref(),
            Some("previous")
        );
    }

    #[tokio::test]
    async fn network_error_leaves_container_unchanged() {
        let mut http = MockHttpClientPort::new();
        http.expect_post()
            .returning(|_| Err(TransportError::network("connection refused")));
        let f = fixture(PageLayout::rich(), http);
        f.page.set_inner_html("server_response", "previous").unwrap();

        let outcome = f
            .bridge
            .send_and_apply(PostRequest::new(ACTION, FORM_URLENCODED, "mode=pong"))
            .await;

        assert!(matches!(outcome, NotifyOutcome::Failed(TransportError::Network(_))));
        assert_eq!(
            f.page.inner_html("server_response").as_deref(),
            Some("previous")
        );
    }

    #[tokio::test]
    async fn missing_container_is_reported() {
        let layout = PageLayout::basic();
        let page = Arc::new(MemoryPage::with_elements(["mode_submit"]));
        let bridge = FormSyncBridge::new(
            Arc::new(replying(200, "ok")),
            page,
            Arc::new(QueuedSpawner::new()),
            layout,
        );

        let outcome = bridge
            .send_and_apply(PostRequest::new(ACTION, FORM_URLENCODED, "mode=pong"))
            .await;

        assert_eq!(
            outcome,
            NotifyOutcome::ContainerMissing(PageError::not_found("server_response"))
        );
    }

    #[tokio::test]
    async fn last_completed_reply_wins() {
        let mut http = MockHttpClientPort::new();
        http.expect_post()
            .times(2)
            .returning(|req| Ok(HttpReply::new(200, format!("reply to {}", req.body))));
        let f = fixture(PageLayout::rich(), http);

        f.bridge.notify_server(ACTION, FORM_URLENCODED, "mode=pong");
        f.bridge.notify_server(ACTION, FORM_URLENCODED, "mode=logo_bounce");

        // Complete the later request first.
        let mut tasks = f.spawner.take_all();
        assert_eq!(tasks.len(), 2);
        let first = tasks.remove(0);
        let second = tasks.remove(0);
        second.await;
        first.await;

        assert_eq!(
            f.page.inner_html("server_response").as_deref(),
            Some("reply to mode=pong")
        );
    }

    #[test]
    fn container_markup_only_for_status_200() {
        let ok = Ok(HttpReply::new(200, "<i>hi</i>"));
        let created = Ok(HttpReply::new(201, "<i>hi</i>"));
        let failed = Err(TransportError::Timeout);

        assert_eq!(container_markup(&ok), Some("<i>hi</i>"));
        assert_eq!(container_markup(&created), None);
        assert_eq!(container_markup(&failed), None);
    }
}
