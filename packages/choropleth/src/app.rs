//! Top-level coordinator for one choropleth view.
//!
//! [`ChoroplethApp`] owns the geometry, the disaster dataset, the options,
//! and the hover controller. Constructing it runs the county join; after
//! that the geometry is only read.

use disaster_map_dataset::DisasterDataset;
use disaster_map_geography_models::{County, CountyId, GeometryStore, normalize_county_name};

use crate::classify::{CostClass, CostScale, UNCLASSIFIED_LABEL, county_total_damage};
use crate::hover::{
    HoverContext, HoverController, HoverState, InfoField, InfoPanel, PointerEvent, StatsOptions,
    TextUpdate,
};
use crate::join::{JoinReport, join_disasters};
use crate::surface::RenderSurface;

/// Classification and panel options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoroplethOptions {
    /// Cost bucket scale.
    pub scale: CostScale,
    /// Info panel figure options.
    pub stats: StatsOptions,
}

/// Per-county figures, as used for shading.
#[derive(Debug, Clone, PartialEq)]
pub struct CountySummary {
    /// County id.
    pub id: CountyId,
    /// Trimmed county name.
    pub name: String,
    /// Number of attached disasters.
    pub disasters: usize,
    /// Total attached property damage.
    pub total_damage: f64,
    /// Cost bucket, `None` when the total is NaN.
    pub class: Option<CostClass>,
}

/// Owns all state for one choropleth view.
#[derive(Debug, Clone)]
pub struct ChoroplethApp {
    geometry: GeometryStore,
    dataset: DisasterDataset,
    options: ChoroplethOptions,
    join_report: JoinReport,
    hover: HoverController,
}

impl ChoroplethApp {
    /// Joins the dataset onto the counties and creates the view state.
    #[must_use]
    pub fn new(
        mut geometry: GeometryStore,
        dataset: DisasterDataset,
        options: ChoroplethOptions,
    ) -> Self {
        let join_report = join_disasters(&mut geometry.counties, &dataset.raw);

        Self {
            geometry,
            dataset,
            options,
            join_report,
            hover: HoverController::new(),
        }
    }

    /// The joined geometry.
    #[must_use]
    pub const fn geometry(&self) -> &GeometryStore {
        &self.geometry
    }

    /// The raw dataset and its indexes.
    #[must_use]
    pub const fn dataset(&self) -> &DisasterDataset {
        &self.dataset
    }

    /// The options this view was created with.
    #[must_use]
    pub const fn options(&self) -> &ChoroplethOptions {
        &self.options
    }

    /// Outcome of the county join.
    #[must_use]
    pub const fn join_report(&self) -> &JoinReport {
        &self.join_report
    }

    /// The current hover state.
    #[must_use]
    pub const fn hover_state(&self) -> HoverState {
        self.hover.state()
    }

    /// Finds a county by name, compared the same way the join does.
    #[must_use]
    pub fn find_county(&self, name: &str) -> Option<CountyId> {
        let wanted = normalize_county_name(name);
        self.geometry
            .counties_with_ids()
            .find(|(_, county)| county.normalized_name() == wanted)
            .map(|(id, _)| id)
    }

    /// Cost bucket of a county's total attached damage.
    #[must_use]
    pub fn county_class(&self, county: &County) -> Option<CostClass> {
        let total = county_total_damage(county, self.options.stats.invalid_damage);
        self.options.scale.classify(total)
    }

    /// The class string drawn for a county: `"county <name> <bucket>"`.
    #[must_use]
    pub fn county_class_string(&self, county: &County) -> String {
        let bucket = self
            .county_class(county)
            .map_or_else(|| UNCLASSIFIED_LABEL.to_string(), |class| class.to_string());
        format!("county {} {bucket}", county.display_name())
    }

    /// Figures for every county in file order.
    #[must_use]
    pub fn county_summaries(&self) -> Vec<CountySummary> {
        let policy = self.options.stats.invalid_damage;
        self.geometry
            .counties_with_ids()
            .map(|(id, county)| {
                let total_damage = county_total_damage(county, policy);
                CountySummary {
                    id,
                    name: county.display_name().to_string(),
                    disasters: county.disasters().len(),
                    total_damage,
                    class: self.options.scale.classify(total_damage),
                }
            })
            .collect()
    }

    /// The info panel for the current hover state.
    #[must_use]
    pub fn info_panel(&self) -> InfoPanel {
        hover_context(&self.geometry, &self.dataset, &self.options).panel(self.hover.state())
    }

    /// Draws the full view and resets the info panel to region figures.
    pub fn draw<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.draw_region(&self.geometry.region);

        for (id, county) in self.geometry.counties_with_ids() {
            surface.draw_county(id, county, &self.county_class_string(county));
        }

        surface.draw_mesh(&self.geometry.mesh);
        surface.set_text(InfoField::Years, &self.options.stats.years_label);

        let ctx = hover_context(&self.geometry, &self.dataset, &self.options);
        let updates = self.hover.reset(&ctx);
        apply(surface, &updates);

        log::info!(
            "Drew {} counties for {}",
            self.geometry.counties.len(),
            self.geometry.region.name
        );
    }

    /// Applies a pointer event from the surface and rewrites the panel.
    pub fn handle_pointer<S: RenderSurface + ?Sized>(
        &mut self,
        event: PointerEvent,
        surface: &mut S,
    ) {
        let ctx = hover_context(&self.geometry, &self.dataset, &self.options);
        let updates = self.hover.handle(event, &ctx);
        apply(surface, &updates);
    }
}

/// Panel inputs borrowed from the individual fields of the app.
fn hover_context<'a>(
    geometry: &'a GeometryStore,
    dataset: &'a DisasterDataset,
    options: &'a ChoroplethOptions,
) -> HoverContext<'a> {
    HoverContext {
        region_name: &geometry.region.name,
        counties: &geometry.counties,
        disasters: &dataset.raw,
        options: &options.stats,
    }
}

fn apply<S: RenderSurface + ?Sized>(surface: &mut S, updates: &[TextUpdate]) {
    for update in updates {
        surface.set_text(update.field, &update.text);
    }
}
