//! Profile entry screen — the data entry form for new user profiles.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{
    PictureFile, Profile, ProfileDraft, Province, validate_email, validate_name, validate_phone,
    validate_picture,
};
use crate::reference::DEFAULT_COUNTRY;
use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::widgets::form::{Form, FormField, draw_form};

/// Field index for the name.
const NAME: usize = 0;
/// Field index for the email address.
const EMAIL: usize = 1;
/// Field index for the phone number.
const PHONE: usize = 2;
/// Field index for the date of birth.
const DOB: usize = 3;
/// Field index for the city.
const CITY: usize = 4;
/// Field index for the district.
const DISTRICT: usize = 5;
/// Field index for the profile picture path.
const PICTURE: usize = 6;

/// State for the profile entry screen.
#[derive(Debug, Clone)]
pub struct EntryState {
    form: Form,
    province: Province,
    country: String,
    countries: Vec<String>,
    success: Option<String>,
    general_error: Option<String>,
}

impl Default for EntryState {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryState {
    /// Creates a new entry form with empty fields and default selectors.
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("Name", true).with_placeholder("Enter your name"),
                FormField::new("Email", true).with_placeholder("Enter your email"),
                FormField::new("Phone", true).with_placeholder("Enter your phone number"),
                FormField::new("Date of Birth", false).with_placeholder("YYYY-MM-DD"),
                FormField::new("City", false).with_placeholder("Enter your city"),
                FormField::new("District", false).with_placeholder("Enter your district"),
                FormField::new("Profile Picture (PNG only)", true)
                    .with_placeholder("path/to/picture.png"),
            ]),
            province: Province::default(),
            country: DEFAULT_COUNTRY.to_string(),
            countries: Vec::new(),
            success: None,
            general_error: None,
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Alt+P/C cycle province/country forward; Shift+Alt cycle backward
        if key.modifiers == KeyModifiers::ALT {
            match key.code {
                KeyCode::Char('p') => {
                    self.cycle_province(true);
                    return Action::None;
                }
                KeyCode::Char('c') => {
                    self.cycle_country(true);
                    return Action::None;
                }
                _ => {}
            }
        }
        const ALT_SHIFT: KeyModifiers = KeyModifiers::ALT.union(KeyModifiers::SHIFT);
        if key.modifiers == ALT_SHIFT {
            match key.code {
                KeyCode::Char('P') => {
                    self.cycle_province(false);
                    return Action::None;
                }
                KeyCode::Char('C') => {
                    self.cycle_country(false);
                    return Action::None;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Char(ch) => {
                self.success = None;
                self.form.insert_char(ch);
                self.validate_focused();
                Action::None
            }
            KeyCode::Backspace => {
                self.success = None;
                self.form.delete_char();
                self.validate_focused();
                Action::None
            }
            KeyCode::F(1) => Action::Navigate(Screen::Help),
            KeyCode::F(2) => Action::Navigate(Screen::Saved),
            KeyCode::Esc => Action::Quit,
            KeyCode::Enter => self.submit(),
            _ => Action::None,
        }
    }

    /// Returns a reference to the form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns the selected province.
    pub fn province(&self) -> Province {
        self.province
    }

    /// Returns the selected country.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the fetched country options.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Returns the transient success message, if any.
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Returns the general error message, if any.
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Sets a general error message not tied to any specific field.
    ///
    /// Used to display storage-level errors from a failed append inline.
    pub fn set_error(&mut self, msg: String) {
        self.general_error = Some(msg);
    }

    /// Installs the fetched country list. The current selection is kept.
    pub fn set_countries(&mut self, countries: Vec<String>) {
        self.countries = countries;
    }

    /// Resets editable fields to defaults after a successful save and shows
    /// the success message. The fetched country list is kept.
    pub fn complete(&mut self, profile: &Profile) {
        self.form.reset();
        self.province = Province::default();
        self.country = DEFAULT_COUNTRY.to_string();
        self.general_error = None;
        self.success = Some(format!("Profile #{} saved successfully!", profile.id));
    }

    /// Re-runs the focused field's validator, updating its error slot.
    ///
    /// Only the four validated fields react; dob/city/district never error.
    /// An empty picture path shows no live error (missing picture is flagged
    /// at submit), matching the file picker only erroring on a bad pick.
    fn validate_focused(&mut self) {
        let focus = self.form.focus();
        let value = self.form.value(focus).to_string();
        let result = match focus {
            NAME => validate_name(&value).err(),
            EMAIL => validate_email(&value).err(),
            PHONE => validate_phone(&value).err(),
            PICTURE if !value.is_empty() => {
                validate_picture(Some(&PictureFile::from_path(value))).err()
            }
            _ => None,
        };
        match result {
            Some(e) => self.form.set_error(focus, e.to_string()),
            None => self.form.clear_error(focus),
        }
    }

    /// Validates all required fields and constructs a draft.
    ///
    /// Each of the four validators runs regardless of the others' outcome so
    /// every failing field shows its error at once.
    fn submit(&mut self) -> Action {
        self.form.clear_errors();
        self.general_error = None;
        self.success = None;

        let name = self.form.value(NAME).to_string();
        let email = self.form.value(EMAIL).to_string();
        let phone = self.form.value(PHONE).to_string();
        let dob = self.form.value(DOB).to_string();
        let city = self.form.value(CITY).to_string();
        let district = self.form.value(DISTRICT).to_string();
        let picture_path = self.form.value(PICTURE);
        let picture = (!picture_path.is_empty()).then(|| PictureFile::from_path(picture_path));

        if let Err(e) = validate_name(&name) {
            self.form.set_error(NAME, e.to_string());
        }
        if let Err(e) = validate_email(&email) {
            self.form.set_error(EMAIL, e.to_string());
        }
        if let Err(e) = validate_phone(&phone) {
            self.form.set_error(PHONE, e.to_string());
        }
        if let Err(e) = validate_picture(picture.as_ref()) {
            self.form.set_error(PICTURE, e.to_string());
        }

        if self.form.has_errors() {
            return Action::None;
        }

        let Some(picture) = picture else {
            // validate_picture already flagged a missing picture above.
            return Action::None;
        };

        match ProfileDraft::new(
            name,
            email,
            phone,
            dob,
            city,
            district,
            self.province,
            self.country.clone(),
            picture,
        ) {
            Ok(draft) => Action::SaveProfile(draft),
            Err(e) => {
                // Shouldn't happen since we validated above, but handle gracefully.
                self.form.set_error(NAME, e.to_string());
                Action::None
            }
        }
    }

    /// Cycles the province forward or backward, wrapping around.
    fn cycle_province(&mut self, forward: bool) {
        self.province = cycle(Province::all(), self.province, forward);
    }

    /// Cycles the country selection through the fetched list.
    ///
    /// With no fetched list there is nothing to cycle through; the default
    /// selection stays. A current value not in the list jumps to the first
    /// entry.
    fn cycle_country(&mut self, forward: bool) {
        if self.countries.is_empty() {
            return;
        }
        let len = self.countries.len();
        let next = match self.countries.iter().position(|c| c == &self.country) {
            Some(pos) if forward => (pos + 1) % len,
            Some(pos) => (pos + len - 1) % len,
            None => 0,
        };
        self.country = self.countries[next].clone();
    }
}

/// Cycles through a slice to find the next or previous element.
fn cycle<T: PartialEq + Copy>(items: &[T], current: T, forward: bool) -> T {
    let pos = items.iter().position(|&x| x == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % items.len()
    } else {
        (pos + items.len() - 1) % items.len()
    };
    items[next]
}

/// Renders the profile entry screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_profile_entry(state: &EntryState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" New Profile ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header_area, form_area, message_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(21),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let header = Line::from(vec![
        Span::styled(
            format!("Province: {}", state.province()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Country: {}", state.country()),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), header_area);

    draw_form(state.form(), frame, form_area);

    if let Some(msg) = state.success() {
        let success = Paragraph::new(Line::from(Span::styled(
            msg,
            Style::default().fg(Color::Green),
        )));
        frame.render_widget(success, message_area);
    } else if let Some(err) = state.general_error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, message_area);
    }

    let footer = Paragraph::new(Line::from(
        "Tab: next  Alt+p/c: province/country  Enter: save  F2: saved  F1: help  Esc: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
