use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::DefaultTerminal;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use tokio_util::sync::CancellationToken;

use crate::api::WikiClient;
use crate::api::types::SearchResult;
use crate::command::{self, Command};
use crate::config::AppConfig;
use crate::event::{AppEvent, Event, EventHandler, ViewKind};
use crate::language::Language;
use crate::links;
use crate::ui;

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// The image slot of a card.
pub enum ThumbnailSlot {
    /// No image: none was offered, or fetching it failed.
    Placeholder,
    Loading,
    Loaded(Box<StatefulProtocol>),
}

/// One rendered search result.
pub struct Card {
    pub id: u64,
    pub result: SearchResult,
    pub query: String,
    pub language: Language,
    pub thumbnail: ThumbnailSlot,
}

// ---------------------------------------------------------------------------
// Toast
// ---------------------------------------------------------------------------

/// A transient notification that disappears on its own.
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

// ---------------------------------------------------------------------------
// App mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Command,
    Search,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub running: bool,
    pub events: EventHandler,
    pub config: AppConfig,

    // View system
    pub view_stack: Vec<ViewKind>,
    pub mode: AppMode,

    // Input state
    pub language: Language,
    pub search_input: String,
    pub command_input: String,

    // Results, newest completion first
    pub cards: Vec<Card>,
    pub selected_index: usize,

    // Status
    pub toast: Option<Toast>,
    in_flight: usize,

    client: Arc<WikiClient>,
    picker: Picker,

    // Session: outstanding work is cancelled and late completions dropped
    // whenever the session is torn down.
    session: CancellationToken,
    epoch: u64,
    next_card_id: u64,
}

impl App {
    pub fn new(config: AppConfig, client: WikiClient, picker: Picker) -> Self {
        let events = EventHandler::new(config.tick_rate_fps);
        Self::with_events(config, client, picker, events)
    }

    pub fn with_events(
        config: AppConfig,
        client: WikiClient,
        picker: Picker,
        events: EventHandler,
    ) -> Self {
        Self {
            running: true,
            events,
            language: config.default_language,
            config,
            view_stack: vec![ViewKind::Results],
            mode: AppMode::Search,
            search_input: String::new(),
            command_input: String::new(),
            cards: Vec::new(),
            selected_index: 0,
            toast: None,
            in_flight: 0,
            client: Arc::new(client),
            picker,
            session: CancellationToken::new(),
            epoch: 0,
            next_card_id: 0,
        }
    }

    // -- Main event loop ----------------------------------------------------

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| ui::draw(frame, &mut self))?;
            let event = self.events.next().await?;
            self.handle_event(event);
        }
        self.session.cancel();
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Tick => self.tick(),
            Event::Crossterm(event) => {
                if let crossterm::event::Event::Key(key) = event
                    && key.kind == crossterm::event::KeyEventKind::Press
                {
                    self.handle_key_event(key);
                }
            }
            Event::App(app_event) => self.handle_app_event(*app_event),
        }
    }

    fn tick(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| Instant::now() >= t.expires_at)
        {
            self.toast = None;
        }
    }

    // -- View stack ---------------------------------------------------------

    pub fn current_view(&self) -> Option<&ViewKind> {
        self.view_stack.last()
    }

    pub fn push_view(&mut self, kind: ViewKind) {
        if self.current_view() != Some(&kind) {
            self.view_stack.push(kind);
        }
    }

    pub fn pop_view(&mut self) {
        if self.view_stack.len() > 1 {
            self.view_stack.pop();
        }
    }

    // -- Status -------------------------------------------------------------

    /// True while any request of the current session is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + Duration::from_millis(self.config.toast_duration_ms),
        });
    }

    // -- Key event routing --------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl-C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            self.events.send(AppEvent::Quit);
            return;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Command => self.handle_command_key(key),
            AppMode::Search => self.handle_search_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.view_stack.len() > 1 {
                    self.events.send(AppEvent::PopView);
                } else {
                    self.events.send(AppEvent::Quit);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up();
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected_index = 0;
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected_index = self.cards.len().saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('o') => {
                self.open_selected();
            }
            KeyCode::Tab | KeyCode::Char('l') => {
                self.language = self.language.next();
            }
            KeyCode::Char('/') | KeyCode::Char('i') => {
                self.mode = AppMode::Search;
            }
            KeyCode::Char(':') => {
                self.mode = AppMode::Command;
                self.command_input.clear();
            }
            KeyCode::Char('?') => {
                self.events.send(AppEvent::PushView(ViewKind::Help));
            }
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.command_input.clear();
            }
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                self.execute_command();
            }
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Char(c) => {
                self.command_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
            }
            KeyCode::Enter => {
                self.submit_search(self.search_input.clone());
                self.mode = AppMode::Normal;
            }
            KeyCode::Tab => {
                self.language = self.language.next();
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.clear();
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
            }
            _ => {}
        }
    }

    /// Queue a search with the selected language. The query is sent as typed.
    fn submit_search(&mut self, query: String) {
        self.events.send(AppEvent::Search {
            language: self.language,
            query,
        });
    }

    // -- Command execution --------------------------------------------------

    fn execute_command(&mut self) {
        let input = std::mem::take(&mut self.command_input);
        match command::parse_command(&input) {
            Some(Command::Search(query)) => {
                self.search_input = query.clone();
                self.submit_search(query);
            }
            Some(Command::Lang(language)) => {
                self.language = language;
            }
            Some(Command::Open) => {
                self.open_selected();
            }
            Some(Command::Clear) => {
                self.events.send(AppEvent::ClearResults);
            }
            Some(Command::Help) => {
                self.events.send(AppEvent::PushView(ViewKind::Help));
            }
            Some(Command::Quit) => {
                self.events.send(AppEvent::Quit);
            }
            None => {
                self.show_toast(format!("Unknown command: {input}"));
            }
        }
    }

    // -- Selection helpers --------------------------------------------------

    fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.cards.len() {
            self.selected_index += 1;
        }
    }

    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards.get(self.selected_index)
    }

    fn open_selected(&mut self) {
        let Some(card) = self.selected_card() else {
            return;
        };
        match card.result.content_url.clone() {
            Some(url) => self.events.send(AppEvent::OpenLink(url)),
            None => self.show_toast("No article link for this result"),
        }
    }

    // -- App event handling -------------------------------------------------

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            // Navigation
            AppEvent::Quit => {
                self.session.cancel();
                self.running = false;
            }
            AppEvent::PushView(kind) => {
                self.push_view(kind);
            }
            AppEvent::PopView => {
                self.pop_view();
            }

            // Requests -> dispatch to async tasks.
            ref evt @ AppEvent::Search { .. } => {
                self.in_flight += 1;
                self.dispatch_api_request(evt.clone());
            }
            ref evt @ AppEvent::FetchThumbnail { .. } => {
                self.dispatch_api_request(evt.clone());
            }
            AppEvent::OpenLink(url) => {
                if let Err(e) = links::open_in_browser(&url) {
                    self.show_toast(format!("Could not open link: {e}"));
                }
            }
            AppEvent::ClearResults => {
                self.reset_session();
            }

            // Responses
            AppEvent::SearchLoaded {
                epoch,
                language,
                query,
                result,
            } => {
                if epoch != self.epoch {
                    tracing::debug!(%query, "discarding search result from a closed session");
                    return;
                }
                self.in_flight = self.in_flight.saturating_sub(1);
                match result {
                    Ok(result) => {
                        tracing::info!(%query, title = %result.title, "search completed");
                        self.render_result(result, language, query);
                    }
                    Err(e) => {
                        tracing::warn!(%query, kind = ?e.kind(), "search failed: {e}");
                        self.show_toast(e.user_message());
                    }
                }
            }
            AppEvent::ThumbnailLoaded {
                epoch,
                card_id,
                result,
            } => {
                if epoch != self.epoch {
                    return;
                }
                let Some(card) = self.cards.iter_mut().find(|c| c.id == card_id) else {
                    return;
                };
                card.thumbnail = match result {
                    Ok(img) => {
                        tracing::debug!(card_id, width = img.width(), height = img.height(), "thumbnail ready");
                        ThumbnailSlot::Loaded(Box::new(self.picker.new_resize_protocol(img)))
                    }
                    Err(e) => {
                        tracing::warn!(card_id, query = %card.query, "thumbnail unavailable: {e}");
                        ThumbnailSlot::Placeholder
                    }
                };
            }
        }
    }

    /// Turn a result into a card at the head of the list and start fetching
    /// its thumbnail. Returns the new card's id.
    pub fn render_result(&mut self, result: SearchResult, language: Language, query: String) -> u64 {
        let id = self.next_card_id;
        self.next_card_id += 1;

        let thumbnail = match result.thumbnail_url.clone() {
            Some(url) if self.config.thumbnails => {
                self.events.send(AppEvent::FetchThumbnail { card_id: id, url });
                ThumbnailSlot::Loading
            }
            _ => ThumbnailSlot::Placeholder,
        };

        // Keep the selection on the same card when browsing further down.
        if self.selected_index > 0 {
            self.selected_index += 1;
        }

        self.cards.insert(
            0,
            Card {
                id,
                result,
                query,
                language,
                thumbnail,
            },
        );
        id
    }

    /// Cancel everything outstanding and start over with an empty list.
    fn reset_session(&mut self) {
        self.session.cancel();
        self.session = CancellationToken::new();
        self.epoch += 1;
        self.in_flight = 0;
        self.cards.clear();
        self.selected_index = 0;
    }

    // -- API dispatch -------------------------------------------------------

    fn dispatch_api_request(&self, event: AppEvent) {
        let client = Arc::clone(&self.client);
        let sender = self.events.sender();
        let token = self.session.child_token();
        let epoch = self.epoch;

        tokio::spawn(async move {
            let response = match event {
                AppEvent::Search { language, query } => {
                    tracing::info!(%query, lang = %language.code(), "search started");
                    let result = tokio::select! {
                        _ = token.cancelled() => None,
                        result = client.search(language.code(), &query) => Some(result),
                    };
                    result.map(|result| AppEvent::SearchLoaded {
                        epoch,
                        language,
                        query,
                        result: result.map_err(Arc::new),
                    })
                }
                AppEvent::FetchThumbnail { card_id, url } => {
                    let result = tokio::select! {
                        _ = token.cancelled() => None,
                        result = client.fetch_thumbnail(&url) => Some(result),
                    };
                    result.map(|result| AppEvent::ThumbnailLoaded {
                        epoch,
                        card_id,
                        result: result.map_err(Arc::new),
                    })
                }
                _ => {
                    // Not an API request event -- ignore.
                    None
                }
            };

            match response {
                Some(event) => {
                    let _ = sender.send(Event::App(Box::new(event)));
                }
                None => tracing::debug!("request cancelled"),
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::thumbnail::png_bytes;
    use crate::api::{ApiClientError, MSG_NOT_FOUND, MSG_UNAVAILABLE};

    fn test_app(base_url: &str) -> App {
        let config = AppConfig {
            api_base_url: base_url.to_string(),
            ..AppConfig::default()
        };
        let client = WikiClient::new(&config).expect("client builds");
        App::with_events(
            config,
            client,
            Picker::from_fontsize((8, 12)),
            EventHandler::headless(),
        )
    }

    fn settled(app: &App) -> bool {
        !app.is_loading()
            && !app
                .cards
                .iter()
                .any(|c| matches!(c.thumbnail, ThumbnailSlot::Loading))
    }

    /// Feed queued events back into the app until no request is outstanding.
    async fn pump(app: &mut App) {
        loop {
            let event = tokio::time::timeout(Duration::from_secs(10), app.events.next())
                .await
                .expect("event arrives in time")
                .expect("channel open");
            app.handle_event(event);
            if settled(app) {
                return;
            }
        }
    }

    fn summary_body(title: &str, thumbnail: Option<&str>) -> String {
        let mut body = serde_json::json!({
            "title": title,
            "extract": format!("{title} is a topic."),
            "content_urls": { "desktop": { "page": format!("https://en.wikipedia.org/wiki/{title}") } },
        });
        if let Some(src) = thumbnail {
            body["thumbnail"] = serde_json::json!({ "source": src });
        }
        body.to_string()
    }

    fn key(code: KeyCode) -> Event {
        Event::Crossterm(crossterm::event::Event::Key(KeyEvent::new(
            code,
            KeyModifiers::NONE,
        )))
    }

    fn loaded(app: &App, query: &str, title: &str) -> AppEvent {
        AppEvent::SearchLoaded {
            epoch: app.epoch,
            language: Language::Inggris,
            query: query.to_string(),
            result: Ok(SearchResult {
                title: title.to_string(),
                thumbnail_url: None,
                extract: String::new(),
                content_url: None,
            }),
        }
    }

    #[tokio::test]
    async fn successful_search_puts_card_at_head() {
        let mut server = mockito::Server::new_async().await;
        let thumb = format!("{}/img/rust.png", server.url());
        server
            .mock("GET", "/api/wiki/en/Rust")
            .with_status(200)
            .with_body(summary_body("Rust", Some(&thumb)))
            .create_async()
            .await;
        server
            .mock("GET", "/img/rust.png")
            .with_status(200)
            .with_body(png_bytes(8, 8))
            .create_async()
            .await;

        let mut app = test_app(&server.url());
        app.handle_app_event(AppEvent::Search {
            language: Language::Inggris,
            query: "Rust".into(),
        });
        assert!(app.is_loading());
        pump(&mut app).await;

        assert!(!app.is_loading());
        assert!(app.toast.is_none());
        assert_eq!(app.cards.len(), 1);
        let card = &app.cards[0];
        assert_eq!(card.result.title, "Rust");
        assert_eq!(card.result.extract, "Rust is a topic.");
        assert_eq!(
            card.result.content_url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Rust")
        );
        assert!(matches!(card.thumbnail, ThumbnailSlot::Loaded(_)));
    }

    #[tokio::test]
    async fn result_without_thumbnail_keeps_placeholder() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/wiki/id/Jakarta")
            .with_status(200)
            .with_body(summary_body("Jakarta", None))
            .create_async()
            .await;

        let mut app = test_app(&server.url());
        app.handle_app_event(AppEvent::Search {
            language: Language::Indonesia,
            query: "Jakarta".into(),
        });
        pump(&mut app).await;

        assert_eq!(app.cards.len(), 1);
        assert_eq!(app.cards[0].language, Language::Indonesia);
        assert!(matches!(app.cards[0].thumbnail, ThumbnailSlot::Placeholder));
    }

    #[tokio::test]
    async fn empty_title_shows_not_found_and_adds_nothing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/wiki/en/")
            .with_status(200)
            .with_body(r#"{ "title": "" }"#)
            .create_async()
            .await;

        let mut app = test_app(&server.url());
        app.handle_app_event(AppEvent::Search {
            language: Language::Inggris,
            query: String::new(),
        });
        pump(&mut app).await;

        assert!(app.cards.is_empty());
        assert_eq!(app.toast.as_ref().map(|t| t.message.as_str()), Some(MSG_NOT_FOUND));
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn transport_failure_shows_generic_message() {
        let mut app = test_app("http://127.0.0.1:1");
        app.handle_app_event(AppEvent::Search {
            language: Language::Inggris,
            query: "Rust".into(),
        });
        pump(&mut app).await;

        assert!(app.cards.is_empty());
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some(MSG_UNAVAILABLE)
        );
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn malformed_json_shows_generic_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/wiki/en/Rust")
            .with_status(200)
            .with_body("{ not json")
            .create_async()
            .await;

        let mut app = test_app(&server.url());
        app.handle_app_event(AppEvent::Search {
            language: Language::Inggris,
            query: "Rust".into(),
        });
        pump(&mut app).await;

        assert!(app.cards.is_empty());
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some(MSG_UNAVAILABLE)
        );
    }

    #[tokio::test]
    async fn cards_follow_completion_order() {
        let mut app = test_app("http://127.0.0.1:1");
        // A then B were submitted; B finishes first.
        app.in_flight = 2;
        app.handle_app_event(loaded(&app, "B", "Fast"));
        assert!(app.is_loading());
        app.handle_app_event(loaded(&app, "A", "Slow"));
        assert!(!app.is_loading());

        let titles: Vec<_> = app.cards.iter().map(|c| c.result.title.as_str()).collect();
        assert_eq!(titles, ["Slow", "Fast"]);
    }

    #[tokio::test]
    async fn overlapping_searches_land_in_completion_order() {
        use std::io::Write;

        let mut server = mockito::Server::new_async().await;
        let slow_body = summary_body("Slow", None);
        server
            .mock("GET", "/api/wiki/en/Slow")
            .with_status(200)
            .with_chunked_body(move |w| {
                std::thread::sleep(Duration::from_millis(300));
                w.write_all(slow_body.as_bytes())
            })
            .create_async()
            .await;
        server
            .mock("GET", "/api/wiki/en/Fast")
            .with_status(200)
            .with_body(summary_body("Fast", None))
            .create_async()
            .await;

        let mut app = test_app(&server.url());
        for query in ["Slow", "Fast"] {
            app.handle_app_event(AppEvent::Search {
                language: Language::Inggris,
                query: query.into(),
            });
        }
        pump(&mut app).await;

        let titles: Vec<_> = app.cards.iter().map(|c| c.result.title.as_str()).collect();
        assert_eq!(titles, ["Slow", "Fast"]);
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn failed_thumbnails_leave_their_own_card_on_placeholder() {
        let mut server = mockito::Server::new_async().await;
        let ok = format!("{}/img/ok.png", server.url());
        let gone = format!("{}/img/gone.png", server.url());
        let junk = format!("{}/img/junk.png", server.url());
        for (query, thumb) in [("Alpha", &ok), ("Beta", &gone), ("Gamma", &junk)] {
            server
                .mock("GET", format!("/api/wiki/en/{query}").as_str())
                .with_status(200)
                .with_body(summary_body(query, Some(thumb)))
                .create_async()
                .await;
        }
        server
            .mock("GET", "/img/ok.png")
            .with_status(200)
            .with_body(png_bytes(4, 2))
            .create_async()
            .await;
        server
            .mock("GET", "/img/gone.png")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/img/junk.png")
            .with_status(200)
            .with_body("GIF89a but not really")
            .create_async()
            .await;

        let mut app = test_app(&server.url());
        for query in ["Alpha", "Beta", "Gamma"] {
            app.handle_app_event(AppEvent::Search {
                language: Language::Inggris,
                query: query.into(),
            });
        }
        pump(&mut app).await;

        assert_eq!(app.cards.len(), 3);
        for card in &app.cards {
            assert_eq!(card.result.extract, format!("{} is a topic.", card.query));
            match card.query.as_str() {
                "Alpha" => assert!(matches!(card.thumbnail, ThumbnailSlot::Loaded(_))),
                _ => assert!(matches!(card.thumbnail, ThumbnailSlot::Placeholder)),
            }
        }
    }

    #[tokio::test]
    async fn results_from_a_cleared_session_are_discarded() {
        let mut app = test_app("http://127.0.0.1:1");
        app.in_flight = 1;
        let stale = loaded(&app, "Rust", "Rust");
        app.handle_app_event(AppEvent::ClearResults);
        app.handle_app_event(stale);

        assert!(app.cards.is_empty());
        assert!(!app.is_loading());

        app.render_result(
            SearchResult {
                title: "Fresh".into(),
                thumbnail_url: None,
                extract: String::new(),
                content_url: None,
            },
            Language::Inggris,
            "Fresh".into(),
        );
        let stale_thumb = AppEvent::ThumbnailLoaded {
            epoch: app.epoch - 1,
            card_id: app.cards[0].id,
            result: Err(Arc::new(ApiClientError::Deserialize("x".into()))),
        };
        app.handle_app_event(stale_thumb);
        assert!(matches!(app.cards[0].thumbnail, ThumbnailSlot::Placeholder));
    }

    #[tokio::test]
    async fn typing_and_enter_submit_with_selected_language() {
        let mut app = test_app("http://127.0.0.1:1");
        assert_eq!(app.mode, AppMode::Search);
        for c in "Bali".chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
        app.handle_event(key(KeyCode::Tab));
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);

        match app.events.next().await.unwrap() {
            Event::App(event) => match *event {
                AppEvent::Search { language, query } => {
                    assert_eq!(language, Language::Indonesia);
                    assert_eq!(query, "Bali");
                }
                other => panic!("unexpected event {other:?}"),
            },
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn new_cards_keep_the_browsed_card_selected() {
        let mut app = test_app("http://127.0.0.1:1");
        app.in_flight = 3;
        for title in ["One", "Two", "Three"] {
            app.handle_app_event(loaded(&app, title, title));
        }
        app.selected_index = 1;
        assert_eq!(app.selected_card().unwrap().result.title, "Two");

        app.in_flight = 1;
        app.handle_app_event(loaded(&app, "Four", "Four"));
        assert_eq!(app.selected_card().unwrap().result.title, "Two");
    }

    #[tokio::test]
    async fn toast_expires_on_tick() {
        let mut app = test_app("http://127.0.0.1:1");
        app.show_toast("hello");
        app.handle_event(Event::Tick);
        assert!(app.toast.is_some());

        if let Some(toast) = app.toast.as_mut() {
            toast.expires_at = Instant::now() - Duration::from_millis(1);
        }
        app.handle_event(Event::Tick);
        assert!(app.toast.is_none());
    }

    #[tokio::test]
    async fn opening_a_card_without_link_warns() {
        let mut app = test_app("http://127.0.0.1:1");
        app.in_flight = 1;
        app.handle_app_event(loaded(&app, "Rust", "Rust"));
        app.mode = AppMode::Normal;
        app.handle_event(key(KeyCode::Enter));
        assert!(app.toast.is_some());
    }

    #[tokio::test]
    async fn enter_opens_the_selected_card_link() {
        let mut app = test_app("http://127.0.0.1:1");
        app.render_result(
            SearchResult {
                title: "T".into(),
                thumbnail_url: None,
                extract: String::new(),
                content_url: Some("https://x/wiki/T".into()),
            },
            Language::Inggris,
            "T".into(),
        );
        app.mode = AppMode::Normal;
        app.handle_event(key(KeyCode::Enter));

        match app.events.next().await.unwrap() {
            Event::App(event) => match *event {
                AppEvent::OpenLink(url) => assert_eq!(url, "https://x/wiki/T"),
                other => panic!("unexpected event {other:?}"),
            },
            other => panic!("unexpected event {other:?}"),
        }
        assert!(app.toast.is_none());
    }
}
