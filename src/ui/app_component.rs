use crate::constants::{ERROR_FETCH_FAILED, ERROR_SESSION_EXPIRED, SUCCESS_SIGNED_OUT};
use crate::routes::Route;
use crate::ui::components::{DialogComponent, SidebarComponent, StatusBar};
use crate::ui::core::{
    actions::{Action, DialogType},
    event_handler::EventType,
    operations,
    task_manager::TaskManager,
    AppContext, Component,
};
use crate::ui::layout::LayoutManager;
use crate::ui::pages::Page;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::time::Instant;
use tokio::sync::mpsc;

pub struct AppComponent {
    // Component composition
    sidebar: SidebarComponent,
    page: Page,
    dialog: DialogComponent,
    status_bar: StatusBar,

    // Application state
    route: Route,
    ctx: AppContext,

    // Services
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,

    // Simple UI state
    should_quit: bool,
    /// Where the sidebar was last drawn, for mouse hit-testing.
    sidebar_area: Option<Rect>,
}

impl AppComponent {
    pub fn new(ctx: AppContext) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new();
        let route = Route::Dashboard;
        let mut sidebar = SidebarComponent::new();
        sidebar.footer = ctx.backend.base_url().to_string();

        Self {
            sidebar,
            page: Page::for_route(&route, &ctx),
            dialog: DialogComponent::new(ctx.logger.clone()),
            status_bar: StatusBar::new(ctx.config.ui.notification_duration()),
            route,
            ctx,
            task_manager,
            background_action_rx,
            should_quit: false,
            sidebar_area: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    /// Get the number of active background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Open the first screen; protected routes fall back to login.
    pub fn start(&mut self, route: Route) {
        log::info!("Starting at {}", route);
        self.navigate(route);
    }

    fn navigate(&mut self, requested: Route) {
        let route = requested.clone().resolve(self.ctx.is_authenticated());
        if route != requested {
            log::info!("Navigation: {} requires sign-in, showing {}", requested, route);
        }

        let aborted = self.task_manager.cancel_page_loads();
        if aborted > 0 {
            log::debug!("Navigation: aborted {} in-flight load(s)", aborted);
        }

        log::info!("Navigation: {}", route);
        self.page = Page::for_route(&route, &self.ctx);
        self.sidebar.sync_with(&route);
        self.route = route;
        self.load_current_page();
    }

    fn load_current_page(&mut self) {
        if operations::loads_data(&self.route) {
            self.task_manager.spawn_page_load(
                self.ctx.backend.clone(),
                self.route.clone(),
                self.page.claims_query(),
            );
        }
    }

    /// Reload the current route. The claims list keeps its page and criteria.
    fn refresh(&mut self) {
        if !operations::loads_data(&self.route) {
            return;
        }
        self.task_manager.cancel_page_loads();
        // The claims list already marked itself loading when it saw the refresh
        if !matches!(self.page, Page::Claims(_)) {
            self.page = Page::for_route(&self.route, &self.ctx);
        }
        log::info!("Refreshing {}", self.route);
        self.load_current_page();
    }

    fn sign_out(&mut self, notice: &str) {
        if let Err(e) = self.ctx.tokens.clear() {
            log::error!("Could not remove stored token: {e:#}");
        }
        self.status_bar.notify(notice);
        self.navigate(Route::Login);
    }

    /// Handle global keyboard shortcuts that aren't component-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => {
                log::debug!("Global key: 'q' - quitting application");
                Action::Quit
            }
            KeyCode::Char('?') => Action::ShowDialog(DialogType::Help),
            KeyCode::Char('G') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Char('g') => Action::ShowDialog(DialogType::GoTo),
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            _ => Action::None,
        }
    }

    fn route_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            log::debug!("Global key: Ctrl+C - quitting application");
            return Action::Quit;
        }

        if self.dialog.is_visible() {
            // Any answer from a dialog closes it
            let action = self.dialog.handle_key_events(key);
            return match action {
                Action::None | Action::HideDialog => {
                    if matches!(action, Action::HideDialog) {
                        self.dialog.update(Action::HideDialog);
                    }
                    Action::None
                }
                other => {
                    self.dialog.update(Action::HideDialog);
                    other
                }
            };
        }

        if self.page.captures_input() {
            return self.page.handle_key_events(key);
        }

        if self.ctx.is_authenticated() {
            let sidebar_action = self.sidebar.handle_key_events(key);
            if !matches!(sidebar_action, Action::None) {
                return sidebar_action;
            }
        }

        let page_action = self.page.handle_key_events(key);
        if !matches!(page_action, Action::None) {
            return page_action;
        }

        self.handle_global_key(key)
    }

    /// Run an action through the page, then handle what comes back.
    pub fn dispatch(&mut self, action: Action) {
        let action = self.page.update(action);
        self.handle_app_action(action);
    }

    /// Handle app-level actions that require business logic
    fn handle_app_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Navigate(route) => self.navigate(route),
            Action::Refresh => self.refresh(),
            Action::FetchClaims(query) => {
                self.task_manager.cancel_page_loads();
                log::debug!("Claims: fetching {} {:?}", query.path(), query.params());
                self.task_manager
                    .spawn_page_load(self.ctx.backend.clone(), Route::Claims, query);
            }
            Action::PageLoaded { route, data } => {
                if route == self.route {
                    self.page.on_loaded(data);
                } else {
                    log::debug!("Dropping stale data for {}", route);
                }
            }
            Action::PageLoadFailed { route, error } => {
                if route != self.route {
                    log::debug!("Dropping stale failure for {}: {}", route, error);
                } else if route == Route::Profile && error.status() == Some(401) {
                    log::warn!("Profile rejected the stored token: {}", error);
                    self.sign_out(ERROR_SESSION_EXPIRED);
                } else {
                    log::warn!("Loading {} failed: {}", route, error);
                    self.status_bar.notify_error(format!("{ERROR_FETCH_FAILED}: {error}"));
                    self.page.on_failed(&error);
                }
            }
            Action::Submit(submission) => {
                if self.task_manager.is_submitting() {
                    log::debug!("Ignoring submission while another is in flight");
                    return;
                }
                log::info!("Submitting: {}", submission.description());
                self.page.on_submit_started();
                self.task_manager
                    .spawn_submission(self.ctx.backend.clone(), self.ctx.tokens.clone(), submission);
            }
            Action::SubmitSucceeded { message, next } => {
                log::info!("{}", message);
                self.status_bar.notify(message.clone());
                match next {
                    Some(route) => self.navigate(route),
                    None => self.page.on_submit_succeeded(&message),
                }
            }
            Action::SubmitFailed { message, field_errors } => {
                self.status_bar.notify_error(message.clone());
                if self.page.has_form() {
                    self.page.on_submit_failed(&message, field_errors);
                } else {
                    // Deletes have no form to carry the message
                    self.dialog.update(Action::ShowDialog(DialogType::Error(message)));
                }
            }
            Action::Notify(message) => self.status_bar.notify(message),
            Action::Logout => {
                log::info!("Signing out");
                self.sign_out(SUCCESS_SIGNED_OUT);
            }
            action @ (Action::ShowDialog(_) | Action::HideDialog) => {
                self.dialog.update(action);
            }
            other => log::debug!("Unhandled action: {:?}", other),
        }
    }

    /// Process background actions from the task manager
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.background_action_rx.try_recv() {
            actions.push(action);
        }

        for finished in self.task_manager.cleanup_finished_tasks() {
            log::debug!("Background: finished {}", finished);
        }

        actions
    }

    /// Drain background results and expire notifications.
    pub fn on_tick(&mut self) -> bool {
        let actions = self.process_background_actions();
        let changed = !actions.is_empty();
        for action in actions {
            self.dispatch(action);
        }
        let had_notification = self.status_bar.current().is_some();
        self.status_bar.expire(Instant::now());
        changed || had_notification != self.status_bar.current().is_some()
    }

    /// Check if any background operations are running
    pub fn is_busy(&self) -> bool {
        self.task_manager.task_count() > 0
    }

    /// Process an event through the component hierarchy
    pub fn handle_event(&mut self, event_type: EventType) {
        let action = match event_type {
            EventType::Mouse(mouse) => match self.sidebar_area {
                Some(area) if !self.dialog.is_visible() => self.sidebar.handle_mouse(mouse, area),
                _ => Action::None,
            },
            EventType::Key(key) => self.route_key(key),
            EventType::Tick => {
                self.on_tick();
                Action::None
            }
            EventType::Resize(_, _) | EventType::Other => Action::None,
        };
        self.dispatch(action);
    }

    fn busy_label(&self) -> Option<&'static str> {
        if self.task_manager.is_submitting() {
            Some("⏳ Saving...")
        } else if self.task_manager.is_loading(&self.route) {
            Some("⏳ Loading...")
        } else {
            None
        }
    }

    fn shows_sidebar(&self) -> bool {
        self.ctx.is_authenticated() && !matches!(self.page, Page::Auth(_))
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.route_key(key)
    }

    fn update(&mut self, action: Action) -> Action {
        self.dispatch(action);
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let (content, status) = LayoutManager::main_layout(rect);
        let (sidebar_area, main_area) = LayoutManager::content_layout(content, self.shows_sidebar());

        if let Some(area) = sidebar_area {
            self.sidebar.render(f, area);
        }
        self.sidebar_area = sidebar_area;
        self.page.render(f, main_area);

        self.status_bar.render(f, status, self.page.hints(), self.busy_label());

        // Dialogs draw on top of everything
        if self.dialog.is_visible() {
            self.dialog.render(f, content);
        }
    }
}
