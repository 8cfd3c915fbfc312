use serenity::all::UserId;
use tokio::time::Duration;

use super::action::NavAction;
use super::layout::{Entries, Mode, Pages};
use super::listener::{Input, InputListener, ListenerEvent};
use super::render::{OverlayKind, Renderer, StopReason, View};
use super::timer::RevertTimer;
use super::PaginationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Active,
    /// An overlay replaces the page; `return_to` is restored on revert.
    Overlay {
        kind: OverlayKind,
        return_to: usize,
    },
    Stopped,
}

/// Snapshot of a session handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub owner: UserId,
    pub mode: Mode,
    pub current_page: usize,
    pub page_count: usize,
    pub total_entries: usize,
    pub phase: Phase,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub per_page: usize,
    pub overlay_timeout: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            per_page: 10,
            overlay_timeout: Duration::from_secs(30),
        }
    }
}

/// What the surface currently shows, used to skip redundant renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shown {
    Nothing,
    Page(usize),
    Overlay(OverlayKind),
}

/// Drives one paginated message: keeps the current page, reacts to
/// navigation inputs and owns the overlay revert timer.
///
/// Every operation is a no-op once the session is stopped, since inputs may
/// still be in flight when the stop happens.
pub struct NavigationController<R: Renderer> {
    renderer: R,
    pages: Pages<R::Entry>,
    state: SessionState,
    shown: Shown,
    timer: RevertTimer,
    overlay_timeout: Duration,
    // attached by `run`, once inputs can be received
    pending_controls: Vec<NavAction>,
}

impl<R: Renderer> NavigationController<R> {
    /// Lay out `entries` and show the first page. A layout with a single page
    /// is displayed and stopped right away. Controls are attached by
    /// [`run`](Self::run), after the caller has subscribed its listener, so
    /// presses made while they are being added are queued instead of lost.
    pub async fn start(
        renderer: R,
        owner: UserId,
        entries: Entries<R::Entry>,
        settings: SessionSettings,
    ) -> Result<Self, PaginationError> {
        let pages = Pages::paginate(entries, settings.per_page)?;
        let state = SessionState {
            owner,
            mode: pages.mode(),
            current_page: 1,
            page_count: pages.page_count(),
            total_entries: pages.total_entries(),
            phase: Phase::Initializing,
        };

        let mut controller = Self {
            renderer,
            pages,
            state,
            shown: Shown::Nothing,
            timer: RevertTimer::default(),
            overlay_timeout: settings.overlay_timeout,
            pending_controls: Vec::new(),
        };

        controller.show(Shown::Page(1)).await?;
        controller.state.phase = Phase::Active;

        controller.pending_controls = NavAction::controls_for(controller.state.page_count);
        if controller.pending_controls.is_empty() {
            controller.stop(StopReason::SinglePage).await;
        }

        Ok(controller)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn is_stopped(&self) -> bool {
        self.state.phase == Phase::Stopped
    }

    #[cfg(test)]
    pub fn revert_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub async fn go_to(&mut self, page: usize) -> Result<(), PaginationError> {
        if self.is_stopped() {
            return Ok(());
        }
        if page == 0 || page > self.state.page_count {
            return Err(PaginationError::OutOfRange {
                requested: page,
                page_count: self.state.page_count,
            });
        }

        self.dismiss_overlay();
        self.state.current_page = page;
        self.show(Shown::Page(page)).await
    }

    pub async fn first(&mut self) -> Result<(), PaginationError> {
        self.go_to(1).await
    }

    pub async fn last(&mut self) -> Result<(), PaginationError> {
        let last = self.state.page_count;
        self.go_to(last).await
    }

    /// Moves forward one page. On the last page this does nothing.
    pub async fn next(&mut self) -> Result<(), PaginationError> {
        if self.is_stopped() {
            return Ok(());
        }

        self.dismiss_overlay();
        let page = self.state.current_page;
        if page >= self.state.page_count {
            // only draws anything if an overlay was just dismissed
            return self.show(Shown::Page(page)).await;
        }
        self.go_to(page + 1).await
    }

    /// Moves back one page. On the first page this does nothing.
    pub async fn previous(&mut self) -> Result<(), PaginationError> {
        if self.is_stopped() {
            return Ok(());
        }

        self.dismiss_overlay();
        let page = self.state.current_page;
        if page <= 1 {
            return self.show(Shown::Page(page)).await;
        }
        self.go_to(page - 1).await
    }

    /// Replace the page with an overlay and schedule the revert. Asking again
    /// while an overlay is up restarts the timer and keeps the saved page.
    pub async fn show_overlay(&mut self, kind: OverlayKind) -> Result<(), PaginationError> {
        let return_to = match self.state.phase {
            Phase::Active => self.state.current_page,
            Phase::Overlay { return_to, .. } => return_to,
            Phase::Initializing | Phase::Stopped => return Ok(()),
        };

        self.state.phase = Phase::Overlay { kind, return_to };
        self.timer.schedule(self.overlay_timeout);
        self.show(Shown::Overlay(kind)).await
    }

    /// Leave the overlay and redraw the page it replaced.
    pub async fn revert(&mut self) -> Result<(), PaginationError> {
        let Phase::Overlay { return_to, .. } = self.state.phase else {
            return Ok(());
        };

        self.timer.cancel();
        self.state.phase = Phase::Active;
        self.state.current_page = return_to;
        self.show(Shown::Page(return_to)).await
    }

    pub async fn stop(&mut self, reason: StopReason) {
        if self.is_stopped() {
            return;
        }

        self.halt();
        self.renderer.close(reason).await;
    }

    /// Apply one input. Inputs from anyone but the owner are ignored.
    pub async fn handle(&mut self, input: Input) -> Result<(), PaginationError> {
        if self.is_stopped() || input.user != self.state.owner {
            return Ok(());
        }

        match input.action {
            NavAction::First => self.first().await,
            NavAction::Previous => self.previous().await,
            NavAction::Next => self.next().await,
            NavAction::Last => self.last().await,
            NavAction::Stop => {
                self.stop(StopReason::User).await;
                Ok(())
            }
            NavAction::OverlayHelp => self.show_overlay(OverlayKind::Reactions).await,
            NavAction::OverlayBotHelp => self.show_overlay(OverlayKind::Usage).await,
        }
    }

    /// Attach the controls, then process inputs and overlay reverts one at a
    /// time until the session stops, then release the listener. Returns the
    /// final state.
    pub async fn run<L: InputListener>(
        mut self,
        mut listener: L,
    ) -> Result<SessionState, PaginationError> {
        let outcome = match self.attach_controls().await {
            Ok(()) => self.drive(&mut listener).await,
            Err(e) => Err(e),
        };
        listener.unsubscribe();
        outcome.map(|_| self.state)
    }

    async fn attach_controls(&mut self) -> Result<(), PaginationError> {
        let controls = std::mem::take(&mut self.pending_controls);
        if controls.is_empty() || self.is_stopped() {
            return Ok(());
        }

        if let Err(e) = self.renderer.attach_controls(&controls).await {
            // strip whatever part of the controls made it on
            self.stop(StopReason::Failed).await;
            return Err(e);
        }
        Ok(())
    }

    async fn drive<L: InputListener>(&mut self, listener: &mut L) -> Result<(), PaginationError> {
        while !self.is_stopped() {
            tokio::select! {
                event = listener.recv() => match event {
                    ListenerEvent::Input(input) => self.handle(input).await?,
                    ListenerEvent::TimedOut => self.stop(StopReason::TimedOut).await,
                    ListenerEvent::Closed => self.stop(StopReason::Closed).await,
                },
                _ = self.timer.expired() => self.revert().await?,
            }
        }

        Ok(())
    }

    fn dismiss_overlay(&mut self) {
        if let Phase::Overlay { return_to, .. } = self.state.phase {
            self.timer.cancel();
            self.state.phase = Phase::Active;
            self.state.current_page = return_to;
        }
    }

    fn halt(&mut self) {
        self.timer.cancel();
        self.state.phase = Phase::Stopped;
    }

    async fn show(&mut self, target: Shown) -> Result<(), PaginationError> {
        if self.shown == target {
            return Ok(());
        }

        let artifact = match target {
            Shown::Nothing => return Ok(()),
            Shown::Page(page) => {
                let view = match self.pages.view(page) {
                    Ok(view) => view,
                    Err(e) => {
                        self.halt();
                        return Err(e);
                    }
                };
                self.renderer.render(&self.state, view)
            }
            Shown::Overlay(kind) => self.renderer.render(&self.state, View::Overlay(kind)),
        };

        if let Err(e) = self.renderer.display(artifact).await {
            // the surface is gone or unusable, nothing left to drive
            self.halt();
            return Err(e);
        }

        self.shown = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use serenity::async_trait;
    use tokio::sync::mpsc;

    use super::*;
    use crate::pagination::Category;

    const OWNER: UserId = UserId::new(10);
    const STRANGER: UserId = UserId::new(20);

    #[derive(Debug, Clone, PartialEq)]
    enum Drawn {
        Page {
            page: usize,
            of: usize,
            heading: Option<String>,
            entries: Vec<u32>,
        },
        Overlay {
            kind: OverlayKind,
            return_to: usize,
        },
    }

    #[derive(Default, Clone)]
    struct Log {
        drawn: Arc<Mutex<Vec<Drawn>>>,
        controls: Arc<Mutex<Vec<NavAction>>>,
        closed: Arc<Mutex<Vec<StopReason>>>,
        // pages drawn by the time the controls went on
        attached_after: Arc<Mutex<Option<usize>>>,
        fail_display: Arc<AtomicBool>,
        fail_attach: Arc<AtomicBool>,
    }

    impl Log {
        fn drawn(&self) -> Vec<Drawn> {
            self.drawn.lock().unwrap().clone()
        }

        fn closed(&self) -> Vec<StopReason> {
            self.closed.lock().unwrap().clone()
        }
    }

    struct TestRenderer(Log);

    #[async_trait]
    impl Renderer for TestRenderer {
        type Entry = u32;
        type Artifact = Drawn;

        fn render(&self, state: &SessionState, view: View<'_, u32>) -> Drawn {
            match view {
                View::Page { heading, entries } => Drawn::Page {
                    page: state.current_page,
                    of: state.page_count,
                    heading: heading.map(|h| h.name.clone()),
                    entries: entries.to_vec(),
                },
                View::Overlay(kind) => {
                    let return_to = match state.phase {
                        Phase::Overlay { return_to, .. } => return_to,
                        _ => state.current_page,
                    };
                    Drawn::Overlay { kind, return_to }
                }
            }
        }

        async fn display(&mut self, artifact: Drawn) -> Result<(), PaginationError> {
            if self.0.fail_display.load(Ordering::SeqCst) {
                return Err(serenity::Error::Other("Unknown Message").into());
            }
            self.0.drawn.lock().unwrap().push(artifact);
            Ok(())
        }

        async fn attach_controls(&mut self, controls: &[NavAction]) -> Result<(), PaginationError> {
            if self.0.fail_attach.load(Ordering::SeqCst) {
                self.0.controls.lock().unwrap().push(controls[0]);
                return Err(serenity::Error::Other("Missing Permissions").into());
            }
            // give queued inputs a chance to arrive mid-attach
            tokio::task::yield_now().await;
            self.0.controls.lock().unwrap().extend_from_slice(controls);
            *self.0.attached_after.lock().unwrap() = Some(self.0.drawn.lock().unwrap().len());
            Ok(())
        }

        async fn close(&mut self, reason: StopReason) {
            self.0.closed.lock().unwrap().push(reason);
        }
    }

    struct ScriptedListener {
        rx: mpsc::UnboundedReceiver<ListenerEvent>,
        unsubscribed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl InputListener for ScriptedListener {
        async fn recv(&mut self) -> ListenerEvent {
            self.rx.recv().await.unwrap_or(ListenerEvent::Closed)
        }

        fn unsubscribe(&mut self) {
            self.unsubscribed.store(true, Ordering::SeqCst);
            self.rx.close();
        }
    }

    fn scripted() -> (
        mpsc::UnboundedSender<ListenerEvent>,
        ScriptedListener,
        Arc<AtomicBool>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let unsubscribed = Arc::new(AtomicBool::new(false));
        let listener = ScriptedListener {
            rx,
            unsubscribed: Arc::clone(&unsubscribed),
        };
        (tx, listener, unsubscribed)
    }

    fn press(action: NavAction) -> ListenerEvent {
        ListenerEvent::Input(Input {
            action,
            user: OWNER,
        })
    }

    fn settings(per_page: usize) -> SessionSettings {
        SessionSettings {
            per_page,
            overlay_timeout: Duration::from_secs(30),
        }
    }

    fn page(page: usize, of: usize, entries: Vec<u32>) -> Drawn {
        Drawn::Page {
            page,
            of,
            heading: None,
            entries,
        }
    }

    /// Ten entries, three per page: pages 1..=4.
    async fn flat_session(log: &Log) -> NavigationController<TestRenderer> {
        NavigationController::start(
            TestRenderer(log.clone()),
            OWNER,
            Entries::Flat((1..=10).collect()),
            settings(3),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn start_shows_the_first_page_and_leaves_controls_to_run() {
        let log = Log::default();
        let session = flat_session(&log).await;

        assert_eq!(session.state().phase, Phase::Active);
        assert_eq!(session.state().mode, Mode::Flat);
        assert_eq!(session.state().page_count, 4);
        assert_eq!(session.state().total_entries, 10);
        assert_eq!(log.drawn(), vec![page(1, 4, vec![1, 2, 3])]);
        assert!(log.controls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn presses_made_while_controls_attach_are_handled() {
        let log = Log::default();
        let session = flat_session(&log).await;
        let (tx, listener, _) = scripted();

        // the owner reacts before the controls are all on
        tx.send(press(NavAction::Next)).unwrap();
        let running = tokio::spawn(session.run(listener));
        tx.send(press(NavAction::Last)).unwrap();
        tx.send(press(NavAction::Stop)).unwrap();
        let state = running.await.unwrap().unwrap();

        assert_eq!(*log.controls.lock().unwrap(), NavAction::ALL.to_vec());
        assert_eq!(*log.attached_after.lock().unwrap(), Some(1));
        assert_eq!(state.current_page, 4);
        assert_eq!(
            log.drawn(),
            vec![
                page(1, 4, vec![1, 2, 3]),
                page(2, 4, vec![4, 5, 6]),
                page(4, 4, vec![10]),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failing_to_attach_controls_cleans_up_and_reports() {
        let log = Log::default();
        log.fail_attach.store(true, Ordering::SeqCst);
        let session = flat_session(&log).await;
        let (tx, listener, unsubscribed) = scripted();
        tx.send(press(NavAction::Next)).unwrap();

        let result = session.run(listener).await;

        assert!(matches!(result, Err(PaginationError::Display(_))));
        assert!(unsubscribed.load(Ordering::SeqCst));
        assert_eq!(log.closed(), vec![StopReason::Failed]);
        assert_eq!(log.drawn().len(), 1);
    }

    #[test]
    fn overlays_drawn_while_active_fall_back_to_the_current_page() {
        let renderer = TestRenderer(Log::default());
        let state = SessionState {
            owner: OWNER,
            mode: Mode::Flat,
            current_page: 3,
            page_count: 4,
            total_entries: 10,
            phase: Phase::Active,
        };

        assert_eq!(
            renderer.render(&state, View::Overlay(OverlayKind::Usage)),
            Drawn::Overlay {
                kind: OverlayKind::Usage,
                return_to: 3
            }
        );
    }

    #[tokio::test]
    async fn zero_page_size_fails_before_anything_is_drawn() {
        let log = Log::default();
        let result = NavigationController::start(
            TestRenderer(log.clone()),
            OWNER,
            Entries::Flat(vec![1, 2]),
            settings(0),
        )
        .await;

        assert!(matches!(result, Err(PaginationError::InvalidConfiguration(_))));
        assert!(log.drawn().is_empty());
    }

    #[tokio::test]
    async fn single_page_is_shown_without_a_session() {
        let log = Log::default();
        let session = NavigationController::start(
            TestRenderer(log.clone()),
            OWNER,
            Entries::Flat(vec![1, 2]),
            settings(5),
        )
        .await
        .unwrap();

        assert!(session.is_stopped());
        assert!(log.controls.lock().unwrap().is_empty());
        assert_eq!(log.closed(), vec![StopReason::SinglePage]);
        assert_eq!(log.drawn(), vec![page(1, 1, vec![1, 2])]);
    }

    #[tokio::test]
    async fn empty_entries_render_an_empty_first_page() {
        let log = Log::default();
        let session = NavigationController::start(
            TestRenderer(log.clone()),
            OWNER,
            Entries::Nested(Vec::new()),
            settings(9),
        )
        .await
        .unwrap();

        assert_eq!(session.state().page_count, 1);
        assert_eq!(session.state().total_entries, 0);
        assert_eq!(log.drawn(), vec![page(1, 1, Vec::new())]);
    }

    #[tokio::test]
    async fn boundary_moves_do_not_render() {
        let log = Log::default();
        let mut session = flat_session(&log).await;

        session.previous().await.unwrap();
        assert_eq!(session.state().current_page, 1);
        assert_eq!(log.drawn().len(), 1);

        session.last().await.unwrap();
        session.next().await.unwrap();
        assert_eq!(session.state().current_page, 4);
        assert_eq!(
            log.drawn(),
            vec![page(1, 4, vec![1, 2, 3]), page(4, 4, vec![10])]
        );
    }

    #[tokio::test]
    async fn repeated_go_to_renders_once() {
        let log = Log::default();
        let mut session = flat_session(&log).await;

        session.go_to(3).await.unwrap();
        session.go_to(3).await.unwrap();

        assert_eq!(session.state().current_page, 3);
        assert_eq!(
            log.drawn(),
            vec![page(1, 4, vec![1, 2, 3]), page(3, 4, vec![7, 8, 9])]
        );
    }

    #[tokio::test]
    async fn go_to_outside_the_layout_is_an_error() {
        let log = Log::default();
        let mut session = flat_session(&log).await;

        assert!(matches!(
            session.go_to(0).await,
            Err(PaginationError::OutOfRange { requested: 0, page_count: 4 })
        ));
        assert!(matches!(
            session.go_to(5).await,
            Err(PaginationError::OutOfRange { requested: 5, page_count: 4 })
        ));
        assert_eq!(session.state().current_page, 1);
        assert_eq!(session.state().phase, Phase::Active);
    }

    #[tokio::test]
    async fn revert_restores_the_page_from_before_any_overlay() {
        let log = Log::default();
        let mut session = flat_session(&log).await;
        session.go_to(2).await.unwrap();

        session.show_overlay(OverlayKind::Reactions).await.unwrap();
        session.show_overlay(OverlayKind::Usage).await.unwrap();
        session.show_overlay(OverlayKind::Reactions).await.unwrap();
        assert!(session.revert_pending());

        session.revert().await.unwrap();
        assert_eq!(session.state().current_page, 2);
        assert_eq!(session.state().phase, Phase::Active);
        assert!(!session.revert_pending());
        assert_eq!(log.drawn().last(), Some(&page(2, 4, vec![4, 5, 6])));

        // nothing to revert any more
        session.revert().await.unwrap();
        assert_eq!(log.drawn().len(), 6);
    }

    #[tokio::test]
    async fn navigating_from_an_overlay_dismisses_it() {
        let log = Log::default();
        let mut session = flat_session(&log).await;

        session.show_overlay(OverlayKind::Usage).await.unwrap();
        session.next().await.unwrap();

        assert!(!session.revert_pending());
        assert_eq!(session.state().phase, Phase::Active);
        assert_eq!(session.state().current_page, 2);

        // at the boundary the saved page still has to replace the overlay
        session.first().await.unwrap();
        session.show_overlay(OverlayKind::Usage).await.unwrap();
        session.previous().await.unwrap();
        assert_eq!(
            log.drawn(),
            vec![
                page(1, 4, vec![1, 2, 3]),
                Drawn::Overlay {
                    kind: OverlayKind::Usage,
                    return_to: 1
                },
                page(2, 4, vec![4, 5, 6]),
                page(1, 4, vec![1, 2, 3]),
                Drawn::Overlay {
                    kind: OverlayKind::Usage,
                    return_to: 1
                },
                page(1, 4, vec![1, 2, 3]),
            ]
        );
    }

    #[tokio::test]
    async fn stop_cancels_the_revert_and_is_idempotent() {
        let log = Log::default();
        let mut session = flat_session(&log).await;

        session.show_overlay(OverlayKind::Reactions).await.unwrap();
        session.stop(StopReason::User).await;
        session.stop(StopReason::User).await;

        assert!(session.is_stopped());
        assert!(!session.revert_pending());
        assert_eq!(log.closed(), vec![StopReason::User]);

        // stale inputs are ignored, not errors
        session.next().await.unwrap();
        session.go_to(99).await.unwrap();
        session.revert().await.unwrap();
        session.show_overlay(OverlayKind::Usage).await.unwrap();
        assert_eq!(log.drawn().len(), 2);
    }

    #[tokio::test]
    async fn inputs_from_other_users_are_ignored() {
        let log = Log::default();
        let mut session = flat_session(&log).await;

        session
            .handle(Input {
                action: NavAction::Last,
                user: STRANGER,
            })
            .await
            .unwrap();
        session
            .handle(Input {
                action: NavAction::Stop,
                user: STRANGER,
            })
            .await
            .unwrap();

        assert_eq!(session.state().current_page, 1);
        assert_eq!(session.state().phase, Phase::Active);
    }

    #[tokio::test]
    async fn display_failure_stops_the_session() {
        let log = Log::default();
        let mut session = flat_session(&log).await;

        log.fail_display.store(true, Ordering::SeqCst);
        assert!(matches!(
            session.next().await,
            Err(PaginationError::Display(_))
        ));
        assert!(session.is_stopped());

        log.fail_display.store(false, Ordering::SeqCst);
        session.next().await.unwrap();
        assert_eq!(log.drawn().len(), 1);
    }

    #[tokio::test]
    async fn nested_mode_pages_across_categories() {
        let log = Log::default();
        let categories = vec![
            Category {
                name: "Alpha".to_string(),
                description: None,
                entries: (1..=4).collect(),
            },
            Category {
                name: "Beta".to_string(),
                description: Some("second".to_string()),
                entries: vec![5],
            },
        ];
        let mut session = NavigationController::start(
            TestRenderer(log.clone()),
            OWNER,
            Entries::Nested(categories),
            settings(3),
        )
        .await
        .unwrap();

        assert_eq!(session.state().mode, Mode::Nested);
        assert_eq!(session.state().page_count, 3);
        assert_eq!(session.state().total_entries, 5);

        session.next().await.unwrap();
        session.next().await.unwrap();
        session.previous().await.unwrap();

        let heading = |name: &str| Some(name.to_string());
        assert_eq!(
            log.drawn(),
            vec![
                Drawn::Page {
                    page: 1,
                    of: 3,
                    heading: heading("Alpha"),
                    entries: vec![1, 2, 3]
                },
                Drawn::Page {
                    page: 2,
                    of: 3,
                    heading: heading("Alpha"),
                    entries: vec![4]
                },
                Drawn::Page {
                    page: 3,
                    of: 3,
                    heading: heading("Beta"),
                    entries: vec![5]
                },
                Drawn::Page {
                    page: 2,
                    of: 3,
                    heading: heading("Alpha"),
                    entries: vec![4]
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn second_overlay_resets_the_timer_and_only_one_revert_fires() {
        let log = Log::default();
        let session = flat_session(&log).await;
        let (tx, listener, _) = scripted();
        let running = tokio::spawn(session.run(listener));

        tx.send(press(NavAction::Next)).unwrap();
        tx.send(press(NavAction::OverlayHelp)).unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        tx.send(press(NavAction::OverlayBotHelp)).unwrap();

        // 35s after the first overlay: its deadline passed, the reset one did not
        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(
            log.drawn().last(),
            Some(&Drawn::Overlay {
                kind: OverlayKind::Usage,
                return_to: 2
            })
        );

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(log.drawn().last(), Some(&page(2, 4, vec![4, 5, 6])));

        tokio::time::sleep(Duration::from_secs(60)).await;
        tx.send(press(NavAction::Stop)).unwrap();
        let state = running.await.unwrap().unwrap();

        assert_eq!(state.phase, Phase::Stopped);
        assert_eq!(state.current_page, 2);
        assert_eq!(
            log.drawn(),
            vec![
                page(1, 4, vec![1, 2, 3]),
                page(2, 4, vec![4, 5, 6]),
                Drawn::Overlay {
                    kind: OverlayKind::Reactions,
                    return_to: 2
                },
                Drawn::Overlay {
                    kind: OverlayKind::Usage,
                    return_to: 2
                },
                page(2, 4, vec![4, 5, 6]),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stopping_during_an_overlay_means_no_revert_later() {
        let log = Log::default();
        let session = flat_session(&log).await;
        let (tx, listener, unsubscribed) = scripted();
        let running = tokio::spawn(session.run(listener));

        tx.send(press(NavAction::OverlayHelp)).unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        tx.send(press(NavAction::Stop)).unwrap();
        let state = running.await.unwrap().unwrap();

        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(state.phase, Phase::Stopped);
        assert!(unsubscribed.load(Ordering::SeqCst));
        assert_eq!(log.closed(), vec![StopReason::User]);
        assert_eq!(
            log.drawn(),
            vec![
                page(1, 4, vec![1, 2, 3]),
                Drawn::Overlay {
                    kind: OverlayKind::Reactions,
                    return_to: 1
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn idle_timeout_stops_without_touching_the_page() {
        let log = Log::default();
        let session = flat_session(&log).await;
        let (tx, listener, unsubscribed) = scripted();
        let running = tokio::spawn(session.run(listener));

        tx.send(press(NavAction::Last)).unwrap();
        tx.send(ListenerEvent::TimedOut).unwrap();
        let state = running.await.unwrap().unwrap();

        assert_eq!(state.phase, Phase::Stopped);
        assert_eq!(state.current_page, 4);
        assert!(unsubscribed.load(Ordering::SeqCst));
        assert_eq!(log.closed(), vec![StopReason::TimedOut]);
        assert_eq!(log.drawn().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stranger_inputs_are_dropped_while_running() {
        let log = Log::default();
        let session = flat_session(&log).await;
        let (tx, listener, _) = scripted();
        let running = tokio::spawn(session.run(listener));

        tx.send(ListenerEvent::Input(Input {
            action: NavAction::Next,
            user: STRANGER,
        }))
        .unwrap();
        drop(tx);
        let state = running.await.unwrap().unwrap();

        assert_eq!(state.current_page, 1);
        assert_eq!(log.closed(), vec![StopReason::Closed]);
    }
}
