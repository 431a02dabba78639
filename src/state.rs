use crate::color::CategoryColors;
use crate::data::filter::{FilterConfig, filtered_indices};
use crate::data::model::FundingDataset;
use crate::data::summary::DashboardSummary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// `dataset` is the process-wide cache of the loaded file: populated once
/// per load, reused every frame, and invalidated only by [`Self::set_dataset`]
/// (loading another file) or [`Self::clear_dataset`].
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).
    pub dataset: Option<FundingDataset>,

    /// Sidebar filter selections.
    pub filters: FilterConfig,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates over the filtered view, recomputed with the indices.
    pub summary: DashboardSummary,

    /// City → chart color, for the pie chart and its legend.
    pub city_colors: CategoryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: FilterConfig {
                industries: Default::default(),
                stages: Default::default(),
                year_range: crate::data::filter::DEFAULT_YEAR_RANGE,
            },
            visible_indices: Vec::new(),
            summary: DashboardSummary::default(),
            city_colors: CategoryColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, reset filters to all-selected, and
    /// compute the initial view.
    pub fn set_dataset(&mut self, dataset: FundingDataset) {
        self.filters = FilterConfig::all_selected(&dataset);
        self.city_colors = CategoryColors::new(&dataset.cities);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Drop the cached dataset and every derived view. The explicit cache
    /// invalidation entry point.
    pub fn clear_dataset(&mut self) {
        *self = AppState::default();
    }

    /// Recompute `visible_indices` and the summary after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
            self.summary = DashboardSummary::compute(ds, &self.visible_indices);
        } else {
            self.visible_indices.clear();
            self.summary = DashboardSummary::default();
        }
    }

    /// Back to the initial all-selected configuration with the default
    /// year window.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters = FilterConfig::all_selected(ds);
            self.refilter();
        }
    }
}
