use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};

use crate::model::{Profile, ProfileDraft};
use crate::storage::ProfileStore;

use super::action::Action;
use super::error::AppError;
use super::screens::{
    EntryState, SavedState, draw_help, draw_profile_entry, draw_profile_list,
};
use super::widgets::status_bar::{StatusBarContext, draw_status_bar};

/// How long the event loop waits for input before checking the country
/// channel again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Callback invoked with each newly saved profile.
pub type SavedCallback = Box<dyn FnMut(&Profile)>;

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The profile entry form.
    Entry,
    /// Table of saved profiles.
    Saved,
    /// Keybinding help.
    Help,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    store: ProfileStore,
    entry: EntryState,
    saved: SavedState,
    status: StatusBarContext,
    country_rx: Option<Receiver<Vec<String>>>,
    on_saved: Option<SavedCallback>,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` starting on the entry form.
    ///
    /// Loads the persisted collection once for the status-bar count.
    pub fn new(store: ProfileStore) -> Result<Self, AppError> {
        let profile_count = store.load_profiles()?.len();
        Ok(Self {
            screen: Screen::Entry,
            store,
            entry: EntryState::new(),
            saved: SavedState::new(),
            status: StatusBarContext {
                profile_count,
                last_saved: None,
            },
            country_rx: None,
            on_saved: None,
            should_quit: false,
        })
    }

    /// Attaches the channel delivering the fetched country list.
    pub fn with_country_source(mut self, rx: Receiver<Vec<String>>) -> Self {
        self.country_rx = Some(rx);
        self
    }

    /// Registers a callback invoked with every newly saved profile.
    pub fn on_saved(mut self, callback: impl FnMut(&Profile) + 'static) -> Self {
        self.on_saved = Some(Box::new(callback));
        self
    }

    /// Main event loop: drain country channel → draw → poll input → dispatch.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            self.poll_countries();
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Renders the current screen plus the status bar.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [screen_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.screen {
            Screen::Entry => draw_profile_entry(&self.entry, frame, screen_area),
            Screen::Saved => draw_profile_list(&self.saved, frame, screen_area),
            Screen::Help => draw_help(frame, screen_area),
        }

        draw_status_bar(&self.status, frame, status_area);
    }

    /// Handles a key event: dispatches to the active screen, then applies
    /// the returned action.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = match self.screen {
            Screen::Entry => self.entry.handle_key(key),
            Screen::Saved => self.saved.handle_key(key),
            Screen::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => Action::Navigate(Screen::Entry),
                _ => Action::None,
            },
        };
        self.apply(action);
    }

    /// Applies a screen action to global state.
    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => {
                if screen == Screen::Saved {
                    self.saved.refresh(&self.store);
                }
                self.screen = screen;
            }
            Action::SaveProfile(draft) => self.save_profile(draft),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Persists a validated draft and reports the outcome.
    ///
    /// On success the callback fires with the stored record and the form
    /// resets; on failure nothing is persisted, the callback does not fire,
    /// and the store error shows inline on the form.
    fn save_profile(&mut self, draft: ProfileDraft) {
        match self.store.append_profile(draft) {
            Ok(profile) => {
                if let Some(callback) = self.on_saved.as_mut() {
                    callback(&profile);
                }
                self.status.profile_count += 1;
                self.status.last_saved = Some(profile.name.clone());
                self.entry.complete(&profile);
            }
            Err(e) => self.entry.set_error(e.to_string()),
        }
    }

    /// Drains the country channel if the fetch has completed.
    ///
    /// The channel is dropped after the first delivery; the fetch is
    /// one-shot.
    fn poll_countries(&mut self) {
        if let Some(rx) = &self.country_rx
            && let Ok(countries) = rx.try_recv()
        {
            self.entry.set_countries(countries);
            self.country_rx = None;
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns a reference to the entry screen state.
    pub fn entry(&self) -> &EntryState {
        &self.entry
    }

    /// Returns a reference to the [`ProfileStore`].
    pub fn store(&self) -> &ProfileStore {
        &self.store
    }
}
