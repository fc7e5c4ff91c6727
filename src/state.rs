use std::path::Path;

use startup_lens::analysis::{
    self, DEFAULT_TOP_N, InvestorMatch, InvestorProfile, MonthlyPoint, OverallMetrics, SeriesMode,
    StartupProfile,
};
use startup_lens::data::loader::load_file;
use startup_lens::data::model::FundingDataset;
use startup_lens::error::QueryError;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Sidebar menu entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Overall,
    Startup,
    Investor,
    Sector,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Overall, Page::Startup, Page::Investor, Page::Sector];

    pub fn label(self) -> &'static str {
        match self {
            Page::Overall => "Overall Analysis",
            Page::Startup => "StartUp",
            Page::Investor => "Investor",
            Page::Sector => "Sector Analysis",
        }
    }
}

/// Outputs of the overall page.
#[derive(Debug, Clone)]
pub struct OverviewView {
    pub metrics: Result<OverallMetrics, QueryError>,
    pub monthly: Vec<MonthlyPoint>,
}

/// Outputs of the startup page for one startup.
#[derive(Debug, Clone)]
pub struct StartupView {
    pub profile: Result<StartupProfile, QueryError>,
    pub investors: Vec<(String, f64)>,
}

/// Outputs of the investor page for one investor.
#[derive(Debug, Clone)]
pub struct InvestorView {
    pub name: String,
    pub profile: InvestorProfile,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Query results are cached here and recomputed once per navigation action,
/// never per frame.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<FundingDataset>,

    pub page: Page,
    pub series_mode: SeriesMode,
    pub investor_match: InvestorMatch,

    /// Picker contents, sorted.
    pub startup_names: Vec<String>,
    pub investor_names: Vec<String>,

    pub selected_startup: Option<String>,
    pub selected_investor: Option<String>,

    pub overview: Option<OverviewView>,
    pub sectors: Vec<(String, f64)>,
    pub startup_view: Option<StartupView>,
    pub investor_view: Option<InvestorView>,

    /// One colour per vertical, shared by every sector chart.
    pub sector_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load `path`, replacing the current dataset on success. On failure the
    /// previous dataset stays and the error goes to the status bar.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!("Opened {} ({} records)", path.display(), dataset.len());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset every page.
    pub fn set_dataset(&mut self, dataset: FundingDataset) {
        self.startup_names = analysis::startup_names(&dataset);
        self.investor_names = analysis::investor_names(&dataset);
        self.selected_startup = self.startup_names.first().cloned();
        self.selected_investor = self.investor_names.first().cloned();
        self.sector_colors = ColorMap::new(dataset.records().iter().map(|r| r.vertical.as_str()));
        self.startup_view = None;
        self.investor_view = None;

        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Switch page and recompute what it shows.
    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            self.page = page;
            self.refresh();
        }
    }

    pub fn set_series_mode(&mut self, mode: SeriesMode) {
        if self.series_mode != mode {
            self.series_mode = mode;
            self.refresh();
        }
    }

    /// Recompute the dataset-wide pages. Startup and investor pages wait for
    /// their "Find" buttons.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        match self.page {
            Page::Overall => {
                self.overview = Some(OverviewView {
                    metrics: analysis::overall_metrics(ds),
                    monthly: analysis::monthly_series(ds, self.series_mode),
                });
            }
            Page::Sector => self.sectors = analysis::sector_ranking(ds, DEFAULT_TOP_N),
            Page::Startup | Page::Investor => {}
        }
    }

    /// "Find StartUp Details".
    pub fn find_startup(&mut self) {
        let (Some(ds), Some(name)) = (&self.dataset, &self.selected_startup) else {
            return;
        };
        self.startup_view = Some(StartupView {
            profile: analysis::startup_profile(ds, name),
            investors: analysis::startup_investor_breakdown(ds, name),
        });
    }

    /// "Find Investor Details".
    pub fn find_investor(&mut self) {
        let (Some(ds), Some(name)) = (&self.dataset, &self.selected_investor) else {
            return;
        };
        self.investor_view = Some(InvestorView {
            name: name.clone(),
            profile: analysis::investor_profile(ds, name, self.investor_match),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use startup_lens::data::clean::clean_records;
    use startup_lens::data::model::RawRecord;

    fn row(date: &str, startup: &str, vertical: &str, investors: &str, amount: &str) -> RawRecord {
        RawRecord {
            date: Some(date.into()),
            startup: Some(startup.into()),
            vertical: Some(vertical.into()),
            subvertical: None,
            city: Some("Bengaluru".into()),
            round: None,
            amount: Some(amount.into()),
            investors: Some(investors.into()),
        }
    }

    fn loaded() -> AppState {
        let (ds, _) = clean_records(vec![
            row("2015-01-01", "Ola", "Transport", "Accel,Tiger", "100"),
            row("2015-02-01", "Ola", "Transport", "Tiger", "50"),
            row("2016-05-01", "Zomato", "Food", "Info Edge", "20"),
        ]);
        let mut state = AppState::default();
        state.set_dataset(ds);
        state
    }

    #[test]
    fn loading_fills_pickers_and_overview() {
        let state = loaded();
        assert_eq!(state.startup_names, vec!["Ola", "Zomato"]);
        assert_eq!(state.investor_names, vec!["Accel", "Info Edge", "Tiger"]);
        assert_eq!(state.selected_startup.as_deref(), Some("Ola"));
        let overview = state.overview.as_ref().unwrap();
        assert_eq!(overview.metrics.as_ref().unwrap().total, 170);
        assert_eq!(overview.monthly.len(), 3);
    }

    #[test]
    fn switching_mode_recomputes_series() {
        let mut state = loaded();
        state.set_series_mode(SeriesMode::Count);
        let values: Vec<f64> = state.overview.unwrap().monthly.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn sector_page_ranks_verticals() {
        let mut state = loaded();
        state.set_page(Page::Sector);
        assert_eq!(state.sectors[0], ("Transport".to_string(), 150.0));
    }

    #[test]
    fn find_buttons_compute_profiles() {
        let mut state = loaded();
        state.selected_investor = Some("Tiger".into());
        state.find_investor();
        let view = state.investor_view.as_ref().unwrap();
        assert_eq!(view.profile.recent.len(), 2);

        state.selected_startup = Some("Nobody".into());
        state.find_startup();
        let view = state.startup_view.as_ref().unwrap();
        assert!(matches!(view.profile, Err(QueryError::NotFound(_))));
        assert!(view.investors.is_empty());
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = loaded();
        state.load_path(Path::new("/missing/funding.csv"));
        assert!(state.dataset.is_some());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
    }
}
