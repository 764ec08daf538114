//! Application state: single owner, main thread only.
//!
//! The menu is a typed state machine. Every transition goes through an
//! `App` method so the key handler stays a thin dispatcher and tests can
//! drive the flow without a terminal. Failures never leave the loop: they
//! become a status-bar message and control returns to the main menu.

use std::mem;

use birthlab_core::data::{country_codes, Totals};
use birthlab_core::stats::{parse_alpha_or_default, Alternative};
use birthlab_core::{ObservationTable, Settings};
use tracing::{info, warn};

use crate::theme::Theme;
use crate::views::{self, CleanedView, NormalView, TestView, TOP_COUNTRIES};

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Trend,
    Countries,
    TopCountries,
    Tables,
    Hypothesis,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 6] = [
        MenuItem::Trend,
        MenuItem::Countries,
        MenuItem::TopCountries,
        MenuItem::Tables,
        MenuItem::Hypothesis,
        MenuItem::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Trend => "Check births over the years",
            MenuItem::Countries => "Compare births by country",
            MenuItem::TopCountries => "Top 10 countries",
            MenuItem::Tables => "Table options",
            MenuItem::Hypothesis => "Check a hypothesis",
            MenuItem::Exit => "Exit",
        }
    }
}

/// Entries of the table sub-menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableItem {
    CleanedLog,
    Normal,
}

impl TableItem {
    pub const ALL: [TableItem; 2] = [TableItem::CleanedLog, TableItem::Normal];

    pub fn label(self) -> &'static str {
        match self {
            TableItem::CleanedLog => "Clean and plot (log scale)",
            TableItem::Normal => "Normal plot with confidence interval",
        }
    }
}

/// What a country selection is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickPurpose {
    /// Any number of countries, shown as bars.
    Bars,
    /// Exactly two countries, compared with a t-test.
    Hypothesis,
}

/// Multi-select list over the country codes. Selection order is kept so
/// the first pick becomes group 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryPicker {
    pub purpose: PickPurpose,
    pub cursor: usize,
    pub selected: Vec<String>,
}

impl CountryPicker {
    pub fn new(purpose: PickPurpose) -> Self {
        Self {
            purpose,
            cursor: 0,
            selected: Vec::new(),
        }
    }

    pub fn toggle(&mut self, code: &str) {
        if let Some(pos) = self.selected.iter().position(|c| c == code) {
            self.selected.remove(pos);
        } else {
            self.selected.push(code.to_string());
        }
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.iter().any(|c| c == code)
    }

    pub fn prompt(&self) -> &'static str {
        match self.purpose {
            PickPurpose::Bars => "Select countries to compare (Space toggles, Enter confirms)",
            PickPurpose::Hypothesis => "Select exactly 2 countries (Space toggles, Enter confirms)",
        }
    }
}

/// The two groups of a pending comparison, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPair {
    pub group1: String,
    pub group2: String,
}

/// Current screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Menu { cursor: usize },
    Trend(Totals),
    CountryPicker(CountryPicker),
    CountryBars(Totals),
    TopCountries(Totals),
    TableMenu { cursor: usize },
    CleanedHistogram(Box<CleanedView>),
    NormalHistogram(Box<NormalView>),
    DirectionPicker { groups: GroupPair, cursor: usize },
    AlphaInput {
        groups: GroupPair,
        alternative: Alternative,
        buffer: String,
    },
    TestResult(Box<TestView>),
}

impl Screen {
    pub fn menu() -> Self {
        Screen::Menu { cursor: 0 }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Menu { .. } => "What do you want to do?",
            Screen::Trend(_) => "Total Number of Births Over Years",
            Screen::CountryPicker(_) => "Countries",
            Screen::CountryBars(_) => "Selected Countries by Total Births",
            Screen::TopCountries(_) => "Top 10 Countries by Number of Births",
            Screen::TableMenu { .. } => "Which table do you want?",
            Screen::CleanedHistogram(_) => "Histogram of Cleaned & Log-Transformed Birth Counts",
            Screen::NormalHistogram(_) => "Histogram of Birth Counts with Normal Curve",
            Screen::DirectionPicker { .. } => "Type of test",
            Screen::AlphaInput { .. } => "Significance level",
            Screen::TestResult(_) => "Hypothesis Test Result",
        }
    }

    /// Screens that only display a chart or report.
    pub fn is_view(&self) -> bool {
        matches!(
            self,
            Screen::Trend(_)
                | Screen::CountryBars(_)
                | Screen::TopCountries(_)
                | Screen::CleanedHistogram(_)
                | Screen::NormalHistogram(_)
                | Screen::TestResult(_)
        )
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

pub struct App {
    pub settings: Settings,
    pub table: ObservationTable,
    /// Sorted two-letter country codes present in the table.
    pub countries: Vec<String>,
    pub screen: Screen,
    pub status_message: Option<(String, StatusLevel)>,
    pub running: bool,
    pub theme: Theme,
}

impl App {
    pub fn new(settings: Settings, table: ObservationTable) -> Self {
        let mut app = Self {
            settings,
            table,
            countries: Vec::new(),
            screen: Screen::menu(),
            status_message: None,
            running: true,
            theme: Theme::default(),
        };
        match country_codes(&app.table, &app.settings.columns.group) {
            Ok(codes) => app.countries = codes,
            Err(e) => app.set_error(format!("Cannot list countries: {e}")),
        }
        app
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        warn!("{msg}");
        self.status_message = Some((msg, StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        warn!("{msg}");
        self.status_message = Some((msg, StatusLevel::Error));
    }

    pub fn back_to_menu(&mut self) {
        self.screen = Screen::menu();
    }

    pub fn quit(&mut self) {
        info!("exiting");
        self.running = false;
    }

    // ── Menu ─────────────────────────────────────────────────────────

    pub fn select_menu(&mut self, item: MenuItem) {
        self.status_message = None;
        match item {
            MenuItem::Trend => {
                let result = views::trend(&self.table, &self.settings);
                self.show(result.map(Screen::Trend), "births per year");
            }
            MenuItem::Countries => self.open_picker(PickPurpose::Bars),
            MenuItem::TopCountries => {
                let result = views::top_countries(&self.table, &self.settings, TOP_COUNTRIES);
                self.show(result.map(Screen::TopCountries), "top countries");
            }
            MenuItem::Tables => self.screen = Screen::TableMenu { cursor: 0 },
            MenuItem::Hypothesis => self.open_picker(PickPurpose::Hypothesis),
            MenuItem::Exit => self.quit(),
        }
    }

    pub fn select_table(&mut self, item: TableItem) {
        match item {
            TableItem::CleanedLog => {
                let result = CleanedView::build(&self.table, &self.settings);
                if let Ok(view) = &result {
                    self.set_status(format!(
                        "Mean (after cleaning and log transform): {:.4}; {} outlier(s) removed",
                        view.cleaned.mu, view.cleaned.removed
                    ));
                }
                self.show(
                    result.map(|v| Screen::CleanedHistogram(Box::new(v))),
                    "cleaned distribution",
                );
            }
            TableItem::Normal => {
                let result = NormalView::build(&self.table, &self.settings);
                if let Ok(view) = &result {
                    let ci = &view.interval;
                    self.set_status(format!(
                        "Mean {:.2}, SD {:.2}, n = {}, {:.0}% CI ({:.2}, {:.2})",
                        ci.mean,
                        ci.std_dev,
                        ci.n,
                        ci.level * 100.0,
                        ci.lower,
                        ci.upper
                    ));
                }
                self.show(
                    result.map(|v| Screen::NormalHistogram(Box::new(v))),
                    "normal distribution",
                );
            }
        }
    }

    fn open_picker(&mut self, purpose: PickPurpose) {
        if self.countries.is_empty() {
            self.set_warning("No two-letter country codes found in the data.");
            self.back_to_menu();
            return;
        }
        self.screen = Screen::CountryPicker(CountryPicker::new(purpose));
    }

    /// Switch to `screen`, or report `what` failed and return to the menu.
    fn show<E: std::fmt::Display>(&mut self, screen: Result<Screen, E>, what: &str) {
        match screen {
            Ok(screen) => self.screen = screen,
            Err(e) => {
                self.set_error(format!("Cannot show {what}: {e}"));
                self.back_to_menu();
            }
        }
    }

    // ── Country picker ───────────────────────────────────────────────

    /// Finish the country selection of the current picker.
    pub fn confirm_countries(&mut self) {
        let Screen::CountryPicker(picker) = mem::replace(&mut self.screen, Screen::menu()) else {
            return;
        };
        match picker.purpose {
            PickPurpose::Bars => {
                if picker.selected.is_empty() {
                    self.set_warning("No countries selected.");
                    return;
                }
                let result = views::selected_countries(&self.table, &self.settings, &picker.selected);
                self.show(result.map(Screen::CountryBars), "selected countries");
            }
            PickPurpose::Hypothesis => {
                if picker.selected.len() != 2 {
                    self.set_warning(format!(
                        "Please select exactly two countries ({} selected).",
                        picker.selected.len()
                    ));
                    return;
                }
                let mut selected = picker.selected.into_iter();
                let (Some(group1), Some(group2)) = (selected.next(), selected.next()) else {
                    return;
                };
                self.screen = Screen::DirectionPicker {
                    groups: GroupPair { group1, group2 },
                    cursor: 0,
                };
            }
        }
    }

    // ── Hypothesis flow ──────────────────────────────────────────────

    /// Pick the test direction from a menu label or name; unknown input
    /// falls back to two-sided with a warning.
    pub fn choose_direction(&mut self, choice: &str) {
        let Screen::DirectionPicker { groups, .. } = mem::replace(&mut self.screen, Screen::menu()) else {
            return;
        };
        let alternative = match choice.parse::<Alternative>() {
            Ok(alt) => alt,
            Err(_) => {
                self.set_warning(format!(
                    "Invalid test type: '{choice}', defaulting to 'two-sided'"
                ));
                Alternative::TwoSided
            }
        };
        self.screen = Screen::AlphaInput {
            groups,
            alternative,
            buffer: self.settings.hypothesis.alpha.to_string(),
        };
    }

    /// Run the comparison with the typed significance level.
    pub fn submit_alpha(&mut self) {
        let Screen::AlphaInput {
            groups,
            alternative,
            buffer,
        } = mem::replace(&mut self.screen, Screen::menu())
        else {
            return;
        };

        let alpha = parse_alpha_or_default(&buffer);
        if alpha.defaulted {
            self.set_warning(format!("Invalid alpha '{}'. Defaulting to {}", buffer.trim(), alpha.value));
        }

        match TestView::build(
            &self.table,
            &self.settings,
            &groups.group1,
            &groups.group2,
            alternative,
            alpha.value,
        ) {
            Ok(view) => {
                info!(
                    group1 = %groups.group1,
                    group2 = %groups.group2,
                    p = view.result.p_value,
                    significant = view.result.significant,
                    "hypothesis test finished"
                );
                self.screen = Screen::TestResult(Box::new(view));
            }
            Err(e) => self.set_error(format!("Hypothesis test failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_app as app;

    fn pick(app: &mut App, codes: &[&str]) {
        if let Screen::CountryPicker(picker) = &mut app.screen {
            for code in codes {
                picker.toggle(code);
            }
        }
    }

    #[test]
    fn country_list_is_loaded() {
        assert_eq!(app().countries, vec!["DE", "FR", "IT"]);
    }

    #[test]
    fn picker_toggle_keeps_order() {
        let mut picker = CountryPicker::new(PickPurpose::Hypothesis);
        picker.toggle("FR");
        picker.toggle("DE");
        picker.toggle("IT");
        picker.toggle("DE");
        assert_eq!(picker.selected, vec!["FR", "IT"]);
        assert!(!picker.is_selected("DE"));
    }

    #[test]
    fn hypothesis_needs_exactly_two() {
        let mut app = app();
        app.select_menu(MenuItem::Hypothesis);
        pick(&mut app, &["DE"]);
        app.confirm_countries();
        assert_eq!(app.screen, Screen::menu());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
        assert!(app.running);
    }

    #[test]
    fn no_countries_selected_is_a_warning() {
        let mut app = app();
        app.select_menu(MenuItem::Countries);
        app.confirm_countries();
        assert_eq!(app.screen, Screen::menu());
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Warning);
        assert!(msg.contains("No countries"));
    }

    #[test]
    fn full_hypothesis_flow() {
        let mut app = app();
        app.select_menu(MenuItem::Hypothesis);
        pick(&mut app, &["DE", "FR"]);
        app.confirm_countries();
        app.choose_direction("Less than (<)");
        assert!(matches!(
            &app.screen,
            Screen::AlphaInput { alternative: Alternative::Less, buffer, .. } if buffer == "0.05"
        ));
        app.submit_alpha();

        let Screen::TestResult(view) = &app.screen else {
            panic!("expected result screen, got {:?}", app.screen);
        };
        assert_eq!(view.result.group1, "DE");
        assert!(view.result.significant);
        assert!(view.lines[0].contains("Reject the null hypothesis"));
    }

    #[test]
    fn garbage_alpha_defaults_with_warning() {
        let mut app = app();
        app.screen = Screen::AlphaInput {
            groups: GroupPair {
                group1: "DE".into(),
                group2: "FR".into(),
            },
            alternative: Alternative::TwoSided,
            buffer: "abc".into(),
        };
        app.submit_alpha();
        let Screen::TestResult(view) = &app.screen else {
            panic!("expected result screen");
        };
        assert_eq!(view.result.alpha, 0.05);
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
    }

    #[test]
    fn unknown_direction_defaults_to_two_sided() {
        let mut app = app();
        app.screen = Screen::DirectionPicker {
            groups: GroupPair {
                group1: "DE".into(),
                group2: "FR".into(),
            },
            cursor: 0,
        };
        app.choose_direction("sideways");
        assert!(matches!(
            app.screen,
            Screen::AlphaInput { alternative: Alternative::TwoSided, .. }
        ));
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn unknown_direction_is_logged_once() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut app = app();
            app.screen = Screen::DirectionPicker {
                groups: GroupPair {
                    group1: "DE".into(),
                    group2: "FR".into(),
                },
                cursor: 0,
            };
            app.choose_direction("sideways");
        });

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.lines().filter(|l| l.contains("sideways")).count(), 1, "{text}");
    }

    #[test]
    fn comparator_error_returns_to_menu() {
        let mut app = app();
        app.screen = Screen::AlphaInput {
            groups: GroupPair {
                group1: "DE".into(),
                group2: "IT".into(),
            },
            alternative: Alternative::TwoSided,
            buffer: "0.05".into(),
        };
        app.submit_alpha();
        assert_eq!(app.screen, Screen::menu());
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Error);
        assert!(msg.contains("IT"));
    }

    #[test]
    fn out_of_range_alpha_is_an_error_not_a_crash() {
        let mut app = app();
        app.screen = Screen::AlphaInput {
            groups: GroupPair {
                group1: "DE".into(),
                group2: "FR".into(),
            },
            alternative: Alternative::TwoSided,
            buffer: "1.5".into(),
        };
        app.submit_alpha();
        assert_eq!(app.screen, Screen::menu());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Error))));
    }

    #[test]
    fn chart_menu_items_open_views() {
        let mut app = app();
        app.select_menu(MenuItem::Trend);
        assert!(matches!(app.screen, Screen::Trend(_)));
        app.select_menu(MenuItem::TopCountries);
        assert!(matches!(&app.screen, Screen::TopCountries(t) if t[0].0 == "FR"));
        app.select_table(TableItem::Normal);
        assert!(matches!(app.screen, Screen::NormalHistogram(_)));
        app.select_menu(MenuItem::Exit);
        assert!(!app.running);
    }

    #[test]
    fn missing_period_column_is_reported() {
        let table = ObservationTable::from_pairs("geo", "OBS_VALUE", &[("DE", Some(1.0))]);
        let mut app = App::new(Settings::default(), table);
        app.select_menu(MenuItem::Trend);
        assert_eq!(app.screen, Screen::menu());
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Error);
        assert!(msg.contains("TIME_PERIOD"));
    }
}
