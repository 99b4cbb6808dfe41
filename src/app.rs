use chrono::NaiveDate;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::calendar::{Activation, Calendar};
use crate::clock::Clock;
use crate::config::Config;
use crate::event::AppEvent;
use crate::gift::{GiftReply, GiftSource};
use crate::reveal::RevealPanel;
use crate::ui::layout::{CalendarLayout, Direction};
use crate::ui::theme::{Theme, ThemeVariant};

/// Transient locked-day notice, auto-expiring.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    expires_at: Instant,
}

impl Notice {
    fn new(text: String, ttl: Duration) -> Self {
        Self {
            text,
            expires_at: Instant::now() + ttl,
        }
    }

    fn expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Application state: the 25 day records, the grid cursor, the currently open
/// reveal panel (if any), and presentation state. Owns everything the UI
/// needs; no ambient globals.
pub struct App {
    config: Config,
    calendar: Calendar,
    layout: CalendarLayout,
    theme_variant: ThemeVariant,
    /// Day under the grid cursor, 1..=25
    selected_day: u8,
    /// Open reveal panel, at most one
    panel: Option<RevealPanel>,
    /// Bumped on every panel open; ties replies to their panel instance
    panel_generation: u64,
    notice: Option<Notice>,
    should_quit: bool,
    clock: Arc<dyn Clock>,
    gifts: Arc<dyn GiftSource>,
    reply_tx: mpsc::Sender<GiftReply>,
}

impl App {
    pub fn new(
        config: Config,
        clock: Arc<dyn Clock>,
        gifts: Arc<dyn GiftSource>,
        reply_tx: mpsc::Sender<GiftReply>,
    ) -> Self {
        let theme_variant =
            ThemeVariant::from_preset(&config.appearance.theme).unwrap_or(ThemeVariant::Dark);
        let calendar = Calendar::new(config.start_date);

        Self {
            config,
            calendar,
            layout: CalendarLayout::default(),
            theme_variant,
            selected_day: 1,
            panel: None,
            panel_generation: 0,
            notice: None,
            should_quit: false,
            clock,
            gifts,
            reply_tx,
        }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn layout(&self) -> &CalendarLayout {
        &self.layout
    }

    pub fn selected_day(&self) -> u8 {
        self.selected_day
    }

    pub fn panel(&self) -> Option<&RevealPanel> {
        self.panel.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme_variant.theme()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Today according to the injected clock. Read per activation and per
    /// frame, so lock rendering tracks the clock rather than a startup
    /// snapshot.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Dispatch one typed event.
    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::DayActivated(day) => self.activate(day),
            AppEvent::CloseRequested => self.close_panel(),
            AppEvent::MoveCursor(direction) => self.move_cursor(direction),
            AppEvent::ToggleTheme => self.theme_variant = self.theme_variant.toggled(),
            AppEvent::Quit => self.should_quit = true,
        }
    }

    /// Periodic housekeeping from the UI loop: expire the notice.
    pub fn tick(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::expired) {
            self.notice = None;
        }
    }

    fn move_cursor(&mut self, direction: Direction) {
        self.selected_day = self.layout.step(self.selected_day, direction);
    }

    fn activate(&mut self, day: u8) {
        let today = self.clock.today();
        match self.calendar.activate(day, today) {
            Activation::Locked { unlock_date } => {
                tracing::debug!("Day {day} is locked until {unlock_date}");
                self.notice = Some(Notice::new(
                    format!("Day {day} will unlock on {unlock_date}!"),
                    Duration::from_secs(self.config.appearance.notice_secs),
                ));
            }
            Activation::Opened => self.open_panel(day),
        }
    }

    /// Open a fresh reveal panel for `day` and spawn its single gift request.
    fn open_panel(&mut self, day: u8) {
        self.panel_generation += 1;
        let generation = self.panel_generation;
        self.panel = Some(RevealPanel::new(day, generation));

        tracing::debug!("Opened panel for day {day} (generation {generation})");

        let request = self.gifts.request(day);
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let outcome = request.await;
            // Receiver gone means the app is shutting down
            let _ = tx
                .send(GiftReply {
                    generation,
                    day,
                    outcome,
                })
                .await;
        });
    }

    fn close_panel(&mut self) {
        if let Some(panel) = self.panel.take() {
            if panel.is_loading() {
                tracing::debug!(
                    "Panel for day {} dismissed with request in flight; reply will be discarded",
                    panel.day()
                );
            }
        }
    }

    /// Route a service reply to the panel that requested it. Replies for
    /// dismissed or superseded panels are dropped.
    pub fn apply_gift(&mut self, reply: GiftReply) {
        let Some(panel) = self.panel.as_mut() else {
            tracing::debug!("Discarding reply for day {}: panel dismissed", reply.day);
            return;
        };
        if panel.generation() != reply.generation {
            tracing::debug!(
                "Discarding reply for day {}: generation {} superseded by {}",
                reply.day,
                reply.generation,
                panel.generation()
            );
            return;
        }
        panel.apply(reply.outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::gift::{GiftError, GiftFuture};
    use crate::reveal::{RevealState, NO_GIFT_FALLBACK};

    /// Canned collaborator for state-machine tests.
    enum StubGifts {
        Message(&'static str),
        Fail(&'static str),
    }

    impl GiftSource for StubGifts {
        fn request(&self, _day: u8) -> GiftFuture {
            let outcome = match self {
                StubGifts::Message(text) => Ok(text.to_string()),
                StubGifts::Fail(detail) => Err(GiftError::Service {
                    status: 429,
                    detail: detail.to_string(),
                }),
            };
            Box::pin(std::future::ready(outcome))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app_with(
        today: NaiveDate,
        gifts: StubGifts,
    ) -> (App, mpsc::Receiver<GiftReply>) {
        let (tx, rx) = mpsc::channel(8);
        let app = App::new(
            Config::default(),
            Arc::new(FixedClock(today)),
            Arc::new(gifts),
            tx,
        );
        (app, rx)
    }

    #[tokio::test]
    async fn test_locked_day_shows_notice_only() {
        let (mut app, mut rx) = app_with(date(2025, 12, 5), StubGifts::Message("gift"));

        app.handle(AppEvent::DayActivated(10));

        assert!(app.panel().is_none());
        assert!(!app.calendar().day(10).opened);
        let notice = app.notice().expect("locked day should raise a notice");
        assert!(notice.text.contains("Day 10"));
        assert!(notice.text.contains("2025-12-10"));
        // No request was spawned
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unlocked_day_opens_panel_and_reveals() {
        let (mut app, mut rx) = app_with(date(2025, 12, 5), StubGifts::Message("Code ornament"));

        app.handle(AppEvent::DayActivated(3));

        assert!(app.calendar().day(3).opened);
        let panel = app.panel().expect("panel should be open");
        assert!(panel.is_loading());

        let reply = rx.recv().await.expect("one reply");
        app.apply_gift(reply);
        assert_eq!(
            app.panel().unwrap().display_text(),
            "Day 3: Code ornament"
        );
    }

    #[tokio::test]
    async fn test_service_failure_renders_inline() {
        let (mut app, mut rx) = app_with(date(2025, 12, 5), StubGifts::Fail("quota exceeded"));

        app.handle(AppEvent::DayActivated(1));
        let reply = rx.recv().await.unwrap();
        app.apply_gift(reply);

        let text = app.panel().unwrap().display_text();
        assert!(text.contains("quota exceeded"));
        assert!(matches!(
            app.panel().unwrap().state(),
            RevealState::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_blank_gift_uses_fallback() {
        let (mut app, mut rx) = app_with(date(2025, 12, 5), StubGifts::Message("  "));

        app.handle(AppEvent::DayActivated(2));
        let reply = rx.recv().await.unwrap();
        app.apply_gift(reply);

        assert_eq!(
            app.panel().unwrap().display_text(),
            format!("Day 2: {NO_GIFT_FALLBACK}")
        );
    }

    #[tokio::test]
    async fn test_reactivation_opens_fresh_panel() {
        let (mut app, mut rx) = app_with(date(2025, 12, 5), StubGifts::Message("gift"));

        app.handle(AppEvent::DayActivated(3));
        let first_generation = app.panel().unwrap().generation();
        app.apply_gift(rx.recv().await.unwrap());
        app.handle(AppEvent::CloseRequested);
        assert!(app.panel().is_none());

        app.handle(AppEvent::DayActivated(3));
        let panel = app.panel().expect("re-activation opens a new panel");
        assert!(panel.generation() > first_generation);
        assert!(panel.is_loading());
        assert!(app.calendar().day(3).opened);
    }

    #[tokio::test]
    async fn test_reply_after_dismissal_is_discarded() {
        let (mut app, mut rx) = app_with(date(2025, 12, 5), StubGifts::Message("late gift"));

        app.handle(AppEvent::DayActivated(4));
        app.handle(AppEvent::CloseRequested);

        // The reply arrives after the panel is gone
        let reply = rx.recv().await.unwrap();
        app.apply_gift(reply);
        assert!(app.panel().is_none());
    }

    #[tokio::test]
    async fn test_stale_generation_is_discarded() {
        let (mut app, mut rx) = app_with(date(2025, 12, 5), StubGifts::Message("gift"));

        app.handle(AppEvent::DayActivated(4));
        let stale = rx.recv().await.unwrap();

        // Same day re-opened before the first reply is applied
        app.handle(AppEvent::CloseRequested);
        app.handle(AppEvent::DayActivated(4));

        app.apply_gift(stale);
        assert!(
            app.panel().unwrap().is_loading(),
            "stale reply must not fill the new panel"
        );

        let fresh = rx.recv().await.unwrap();
        app.apply_gift(fresh);
        assert_eq!(app.panel().unwrap().display_text(), "Day 4: gift");
    }

    #[tokio::test]
    async fn test_cursor_and_theme() {
        let (mut app, _rx) = app_with(date(2025, 12, 5), StubGifts::Message("gift"));

        assert_eq!(app.selected_day(), 1);
        app.handle(AppEvent::MoveCursor(Direction::Down));
        app.handle(AppEvent::MoveCursor(Direction::Right));
        assert_eq!(app.selected_day(), 7);

        app.handle(AppEvent::ToggleTheme);
        assert_eq!(app.theme_variant, ThemeVariant::Light);
        app.handle(AppEvent::Quit);
        assert!(app.should_quit());
    }
}
