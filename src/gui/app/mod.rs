mod modals;

use std::{
    path::PathBuf,
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};

use eframe::egui;
use modals::Modals;
use rand::{
    rngs::StdRng,
    SeedableRng,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    carousel::CarouselView,
    message_overlay::{
        MessageOverlay,
        LOADING_VERBS,
    },
    quiz_panel,
    settings::SettingsData,
    theme::{
        apply_dark_mode,
        set_theme,
        Theme,
    },
    top_bar::{
        RemoteStatus,
        TopBar,
    },
};
use crate::{
    bookmarks::{
        export::{
            write_page,
            NO_SAVED_VERBS,
        },
        BookmarkStore,
        BookmarkSync,
        FirebaseStore,
        RemoteLoad,
        RemoteStore,
        SaveOutcome,
    },
    core::{
        tasks::{
            FetchResult,
            ListingPurpose,
            TaskManager,
            TaskResult,
        },
        Verb,
        VerbDrillError,
    },
    dataset::Dataset,
    persistence::save_json,
    quiz::{
        LevelFilter,
        Outcome,
        QuestionStart,
        QuizEngine,
    },
};

const SETTINGS_FILE: &str = "settings.json";
const EXPORT_FILE_NAME: &str = "my-learning-list.html";

pub struct VerbDrillApp {
    // Configuration
    settings_data: SettingsData,

    // Quiz State
    dataset: Dataset,
    dataset_warning: Option<String>,
    filter: LevelFilter,
    pool: Vec<Verb>,
    engine: QuizEngine,
    rng: StdRng,
    bookmarks: BookmarkStore,

    // UI State
    theme: Theme,
    message_overlay: MessageOverlay,
    carousel: CarouselView,
    actions: ActionQueue,
    scroll_to_top: bool,
    export_path: Option<PathBuf>,

    // Modals
    modals: Modals,

    // External Services
    remote: Option<BookmarkSync>,
    remote_status: RemoteStatus,
    task_manager: TaskManager,
}

impl VerbDrillApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings_data: SettingsData,
    ) -> Result<Self, VerbDrillError> {
        let task_manager = TaskManager::new()?;
        let settings_data = settings_data.sanitized();
        let engine = QuizEngine::new(settings_data.countdown_secs);

        let mut app = Self {
            // Configuration
            settings_data,

            // Quiz State
            dataset: Dataset::default(),
            dataset_warning: None,
            filter: LevelFilter::new(Vec::new()),
            pool: Vec::new(),
            engine,
            rng: StdRng::from_os_rng(),
            bookmarks: BookmarkStore::new(),

            // UI State
            theme: Theme::dracula(),
            message_overlay: MessageOverlay::new(),
            carousel: CarouselView::new(),
            actions: ActionQueue::new(),
            scroll_to_top: false,
            export_path: None,

            // Modals
            modals: Modals::default(),

            // External Services
            remote: None,
            remote_status: RemoteStatus::SignedOut,
            task_manager,
        };

        set_theme(&cc.egui_ctx, &app.theme);
        apply_dark_mode(&cc.egui_ctx, app.settings_data.dark_mode);
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);

        app.connect_remote();
        app.reload_dataset();

        Ok(app)
    }

    fn reload_dataset(&mut self) {
        log::info!("Loading verbs from {}", self.settings_data.dataset_url);
        self.message_overlay.set_message(LOADING_VERBS);
        self.task_manager.load_dataset(&self.settings_data.dataset_url);
    }

    /// Rebuild the remote handle from settings and pull the stored list if there is one.
    fn connect_remote(&mut self) {
        self.remote = self.settings_data.remote.credentials().map(|(url, user_id)| {
            let store: Arc<dyn RemoteStore> = Arc::new(FirebaseStore::new(
                self.task_manager.client().clone(),
                url,
                self.settings_data.remote.auth_token.clone(),
            ));
            BookmarkSync::new(store, user_id)
        });

        match &self.remote {
            Some(sync) => {
                log::info!("Syncing saved verbs at {}", sync.path());
                self.remote_status = RemoteStatus::Connected;
                self.bookmarks.begin_remote_load();
                self.task_manager.load_bookmarks(sync.clone());
            }
            None => {
                log::info!("No remote configured; saved verbs are kept for this session only");
                self.remote_status = RemoteStatus::SignedOut;
                self.bookmarks.disconnect();
            }
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            log::error!("Failed to save settings: {e}");
        }
    }

    fn apply_settings(&mut self, settings: SettingsData, ctx: &egui::Context) {
        let url_changed = settings.dataset_url != self.settings_data.dataset_url;
        let remote_changed = settings.remote != self.settings_data.remote;

        if settings.dark_mode != self.settings_data.dark_mode {
            apply_dark_mode(ctx, settings.dark_mode);
        }
        self.engine.set_countdown_secs(settings.countdown_secs);
        self.settings_data = settings;
        self.save_settings();

        if remote_changed {
            self.connect_remote();
        }
        if url_changed {
            self.reload_dataset();
        }
    }

    fn restart_quiz(&mut self) {
        self.pool = self.filter.derive_pool(&self.dataset.verbs);
        self.next_question();
    }

    fn next_question(&mut self) {
        match self.engine.next_question(&self.pool, &mut self.rng, Instant::now()) {
            QuestionStart::Started => {}
            QuestionStart::EmptyPool => log::debug!("No verbs match the selected levels"),
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::DatasetLoaded { report, .. } => {
                self.message_overlay.clear_message();
                self.dataset_warning = report.warning;
                self.filter.set_known(report.dataset.levels.clone());
                self.dataset = report.dataset;
                self.restart_quiz();
            }

            TaskResult::BookmarksLoaded { result, .. } => match result {
                Ok(stored) => {
                    let (load, push) = self.bookmarks.apply_remote(stored);
                    match load {
                        RemoteLoad::Merged { stored, added } => {
                            log::info!("Restored {stored} saved verbs, {added} added this session")
                        }
                        RemoteLoad::NothingStored => log::info!("{NO_SAVED_VERBS}"),
                    }
                    self.remote_status = RemoteStatus::Connected;
                    if let (Some(verbs), Some(sync)) = (push, &self.remote) {
                        self.task_manager.save_bookmarks(sync.clone(), verbs);
                    }
                }
                Err(e) => {
                    log::error!("Failed to load saved verbs: {e}");
                    self.bookmarks.remote_load_failed();
                    self.remote_status = RemoteStatus::Failing;
                }
            },

            TaskResult::BookmarksSaved { result, .. } => match result {
                Ok(count) => {
                    log::debug!("Synced {count} saved verbs");
                    self.remote_status = RemoteStatus::Connected;
                }
                Err(e) => {
                    log::error!("Saving bookmarks failed: {e}");
                    self.remote_status = RemoteStatus::Failing;
                }
            },

            TaskResult::ListingFetched { purpose, result, .. } => {
                self.handle_listing(purpose, result)
            }
        }
    }

    fn handle_listing(
        &mut self,
        purpose: ListingPurpose,
        result: FetchResult,
    ) {
        let verbs = match result {
            Ok(Some(verbs)) if !verbs.is_empty() => verbs,
            Ok(_) => {
                self.modals.listing.close();
                self.export_path = None;
                self.modals.notice.show_info("Saved verbs", NO_SAVED_VERBS);
                return;
            }
            Err(e) => {
                log::error!("Failed to fetch saved verbs: {e}");
                self.remote_status = RemoteStatus::Failing;
                self.modals.listing.close();
                self.export_path = None;
                self.modals.notice.show_error(
                    "Saved verbs",
                    "Could not fetch your saved verbs.",
                    Some(e),
                );
                return;
            }
        };

        match purpose {
            ListingPurpose::Show => self.modals.listing.set_verbs(verbs),
            ListingPurpose::Export => {
                let Some(path) = self.export_path.take() else {
                    return;
                };
                if let Err(e) = write_page(&path, &verbs) {
                    log::error!("Failed to write {}: {e}", path.display());
                    self.modals.notice.show_error(
                        "Export",
                        "Could not write the page.",
                        Some(e.to_string()),
                    );
                    return;
                }
                log::info!("Exported {} saved verbs to {}", verbs.len(), path.display());
                if let Err(e) = open::that(&path) {
                    log::warn!("Could not open {}: {e}", path.display());
                }
            }
        }
    }

    fn handle_action(&mut self, action: UiAction, ctx: &egui::Context) {
        match action {
            UiAction::NextQuestion => self.next_question(),
            UiAction::CheckAnswer => {
                if let Some(outcome) = self.engine.submit() {
                    log::debug!("Answer graded: {}", outcome.message());
                }
            }
            UiAction::SaveCurrentVerb => self.save_current_verb(),
            UiAction::SetCountdown(secs) => {
                self.engine.set_countdown_secs(secs);
                self.settings_data.countdown_secs = self.engine.countdown_secs();
                self.save_settings();
            }

            UiAction::SetLevel { level, selected } => {
                self.filter.set_level(&level, selected);
                self.restart_quiz();
            }
            UiAction::SetAllLevels(selected) => {
                self.filter.set_all(selected);
                self.restart_quiz();
            }

            UiAction::Practice(base) => {
                if let Some(verb) = self.bookmarks.find(&base).cloned() {
                    self.engine.start_with(verb, &mut self.rng, Instant::now());
                    self.scroll_to_top = true;
                }
            }
            UiAction::CarouselNext => self.carousel.next(ctx.input(|i| i.time)),
            UiAction::CarouselPrev => self.carousel.prev(ctx.input(|i| i.time)),
            UiAction::ShowListing => {
                if let Some(sync) = self.remote.clone() {
                    self.modals.listing.open_loading();
                    self.task_manager.fetch_listing(sync, ListingPurpose::Show);
                }
            }
            UiAction::ExportListing => self.export_listing(),

            UiAction::OpenSettings => {
                self.modals.settings.open_settings(self.settings_data.clone());
            }
        }
    }

    fn save_current_verb(&mut self) {
        let Some(verb) = self.engine.question().map(|q| q.verb.clone()) else {
            return;
        };

        let saved = self.bookmarks.save(&verb);
        match saved.outcome {
            SaveOutcome::Added => {
                log::info!("Saved '{}'", verb.base);
                if let (Some(verbs), Some(sync)) = (saved.push, &self.remote) {
                    self.task_manager.save_bookmarks(sync.clone(), verbs);
                }
            }
            SaveOutcome::AlreadySaved => log::debug!("'{}' is already saved", verb.base),
            SaveOutcome::Ignored => {}
        }
    }

    fn export_listing(&mut self) {
        let Some(sync) = self.remote.clone() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_title("Export saved verbs")
            .set_file_name(EXPORT_FILE_NAME)
            .add_filter("HTML", &["html", "htm"])
            .save_file()
        else {
            return;
        };

        self.export_path = Some(path);
        self.task_manager.fetch_listing(sync, ListingPurpose::Export);
    }

    /// The settings file tracks the theme switch in the menu bar.
    fn sync_dark_mode(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.settings_data.dark_mode {
            self.settings_data.dark_mode = dark_mode;
            self.save_settings();
        }
    }

    fn tick(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(Outcome::Expired) = self.engine.tick(now) {
            log::debug!("Question expired");
        }

        if let Some(wait) = self.engine.countdown().time_to_next_tick(now) {
            ctx.request_repaint_after(wait);
        }
        if self.task_manager.has_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut scroll = egui::ScrollArea::vertical().id_salt("main_scroll").auto_shrink(false);
            if std::mem::take(&mut self.scroll_to_top) {
                scroll = scroll.vertical_scroll_offset(0.0);
            }

            scroll.show(ui, |ui| {
                ui.heading(self.theme.heading(ui.ctx(), "Irregular verbs"));
                if let Some(warning) = &self.dataset_warning {
                    ui.colored_label(self.theme.yellow(ui.ctx()), format!("⚠ {warning}"));
                }
                ui.add_space(6.0);

                quiz_panel::level_filter_row(ui, &self.filter, &mut self.actions);
                quiz_panel::countdown_row(ui, &self.engine, &mut self.actions, &self.theme);
                ui.separator();
                quiz_panel::question_panel(ui, &mut self.engine, &self.theme, &mut self.actions);

                ui.add_space(12.0);
                ui.separator();
                ui.heading(self.theme.heading(ui.ctx(), "Saved verbs"));
                if self.bookmarks.is_empty() {
                    ui.label("Save a verb to practice it again later.");
                } else {
                    self.carousel.show(
                        ui,
                        self.bookmarks.verbs(),
                        &self.theme,
                        &mut self.actions,
                    );
                }
            });
        });
    }
}

impl eframe::App for VerbDrillApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        self.tick(ctx);
        self.sync_dark_mode(ctx);

        TopBar::show(
            ctx,
            &self.theme,
            self.remote_status,
            self.bookmarks.len(),
            &mut self.actions,
        );

        self.central_panel(ctx);
        self.message_overlay.show(ctx, &self.theme);

        if let Some(settings) = self.modals.settings.show(ctx) {
            self.apply_settings(settings, ctx);
        }
        if self.modals.listing.show(ctx, &self.theme) {
            self.actions.push(UiAction::ExportListing);
        }
        self.modals.notice.show(ctx);

        let actions: Vec<UiAction> = self.actions.drain().collect();
        for action in actions {
            self.handle_action(action, ctx);
        }
    }
}
