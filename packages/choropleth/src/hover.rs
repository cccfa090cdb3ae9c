//! Hover state machine for the info panel.
//!
//! There are two states. [`HoverState::Region`] shows figures for the
//! whole dataset and is the initial state; [`HoverState::County`] shows
//! figures for the disasters attached to one county. Pointer-enter moves
//! to the entered county, pointer-leave always returns to the region.
//!
//! [`transition`] is the pure state function. [`HoverController`] applies
//! it and recomputes every panel text from scratch on each event.

use disaster_map_disaster_models::{DamageSummary, Disaster, InvalidDamagePolicy};
use disaster_map_geography_models::{County, CountyId};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::format::format_number;

/// Prefix of the annualized total text.
pub const TOTAL_COST_PREFIX: &str = "Average Annual Cost of Damage: $";
/// Prefix of the per-disaster average text.
pub const AVERAGE_COST_PREFIX: &str = "Average Cost per Disaster: $";
/// Suffix appended to a county's name in the header.
pub const COUNTY_TITLE_SUFFIX: &str = " County";

/// Current focus of the info panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HoverState {
    /// No county focused: region-wide figures.
    #[default]
    Region,
    /// Figures for one county.
    County(CountyId),
}

/// A pointer event delivered by the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// The pointer entered a county's shape.
    Enter(CountyId),
    /// The pointer left a county's shape.
    Leave(CountyId),
}

/// The next hover state after `event`.
///
/// The current state does not influence the outcome: every enter focuses
/// the entered county and every leave resets to the region.
#[must_use]
pub const fn transition(_state: HoverState, event: PointerEvent) -> HoverState {
    match event {
        PointerEvent::Enter(id) => HoverState::County(id),
        PointerEvent::Leave(_) => HoverState::Region,
    }
}

/// The independently updatable text fields of the info panel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter,
)]
pub enum InfoField {
    /// Title line.
    #[strum(serialize = "header")]
    Header,
    /// Observation window label.
    #[strum(serialize = "years")]
    Years,
    /// Annualized total damage.
    #[strum(serialize = "totalCost")]
    TotalCost,
    /// Mean damage per disaster.
    #[strum(serialize = "avgCost")]
    AverageCost,
}

/// A single text rewrite for the render surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUpdate {
    /// Field to rewrite.
    pub field: InfoField,
    /// New text.
    pub text: String,
}

/// Options controlling how panel figures are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsOptions {
    /// Years covered by the dataset; the total is divided by this to get
    /// an annual figure.
    pub observation_years: f64,
    /// Text shown in the years field.
    pub years_label: String,
    /// How invalid damage amounts affect sums and means.
    pub invalid_damage: InvalidDamagePolicy,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            observation_years: 3.0,
            years_label: "2010 - 2012".to_string(),
            invalid_damage: InvalidDamagePolicy::Propagate,
        }
    }
}

/// Formatted info panel figures for one hover state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPanel {
    /// Header text.
    pub title: String,
    /// Annualized total damage, formatted.
    pub total_cost: String,
    /// Mean damage per disaster, formatted.
    pub average_cost: String,
}

impl InfoPanel {
    /// Builds the panel from a damage summary.
    #[must_use]
    pub fn from_summary(title: String, summary: DamageSummary, options: &StatsOptions) -> Self {
        Self {
            title,
            total_cost: format_number(summary.total / options.observation_years),
            average_cost: format_number(summary.mean),
        }
    }

    /// The three text rewrites that display this panel.
    #[must_use]
    pub fn text_updates(&self) -> Vec<TextUpdate> {
        vec![
            TextUpdate {
                field: InfoField::Header,
                text: self.title.clone(),
            },
            TextUpdate {
                field: InfoField::TotalCost,
                text: format!("{TOTAL_COST_PREFIX}{}", self.total_cost),
            },
            TextUpdate {
                field: InfoField::AverageCost,
                text: format!("{AVERAGE_COST_PREFIX}{}", self.average_cost),
            },
        ]
    }
}

/// Read-only data the controller computes figures from.
#[derive(Debug, Clone, Copy)]
pub struct HoverContext<'a> {
    /// Region display name.
    pub region_name: &'a str,
    /// Counties with their joined disasters.
    pub counties: &'a [County],
    /// The full raw disaster collection.
    pub disasters: &'a [Disaster],
    /// Figure options.
    pub options: &'a StatsOptions,
}

impl HoverContext<'_> {
    /// Computes the panel for `state`.
    ///
    /// A county id that does not exist falls back to the region panel.
    #[must_use]
    pub fn panel(&self, state: HoverState) -> InfoPanel {
        let policy = self.options.invalid_damage;

        if let HoverState::County(id) = state
            && let Some(county) = self.counties.get(id.0)
        {
            let title = format!("{}{COUNTY_TITLE_SUFFIX}", county.display_name());
            let summary = DamageSummary::from_disasters(county.disasters(), policy);
            return InfoPanel::from_summary(title, summary, self.options);
        }

        let summary = DamageSummary::from_disasters(self.disasters, policy);
        InfoPanel::from_summary(self.region_name.to_string(), summary, self.options)
    }
}

/// Holds the single current [`HoverState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverController {
    state: HoverState,
}

impl HoverController {
    /// Creates a controller in the region state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> HoverState {
        self.state
    }

    /// Resets to the region state and returns the texts to display.
    pub fn reset(&mut self, ctx: &HoverContext<'_>) -> Vec<TextUpdate> {
        self.state = HoverState::Region;
        ctx.panel(self.state).text_updates()
    }

    /// Applies `event` and returns the texts to display.
    ///
    /// Entering a county id unknown to `ctx` is treated as a leave.
    pub fn handle(&mut self, event: PointerEvent, ctx: &HoverContext<'_>) -> Vec<TextUpdate> {
        let mut next = transition(self.state, event);

        if let HoverState::County(id) = next
            && ctx.counties.get(id.0).is_none()
        {
            log::warn!("Pointer entered unknown county id {id}; showing region figures");
            next = HoverState::Region;
        }

        log::debug!("Hover {:?} -> {next:?} on {event:?}", self.state);
        self.state = next;

        ctx.panel(self.state).text_updates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use disaster_map_disaster_models::DamageAmount;
    use geo::MultiPolygon;
    use strum::IntoEnumIterator as _;

    fn disaster(name: &str, damage: &str) -> Disaster {
        Disaster::new(
            name,
            DamageAmount::parse(damage),
            NaiveDate::from_ymd_opt(2011, 1, 1),
        )
    }

    fn county(name: &str, disasters: Vec<Disaster>) -> County {
        let mut county = County::new(name, MultiPolygon::new(vec![]), serde_json::Map::new());
        for d in disasters {
            county.attach_disaster(d);
        }
        county
    }

    struct Fixture {
        counties: Vec<County>,
        disasters: Vec<Disaster>,
        options: StatsOptions,
    }

    impl Fixture {
        fn new() -> Self {
            let disasters = vec![
                disaster("Fulton", "300000"),
                disaster("fulton ", "150000"),
                disaster("Cobb", "90000"),
                disaster("Nowhere", "60000"),
            ];
            let counties = vec![
                county("Fulton ", disasters[..2].to_vec()),
                county("Cobb", disasters[2..3].to_vec()),
                county("Empty", vec![]),
            ];
            Self {
                counties,
                disasters,
                options: StatsOptions::default(),
            }
        }

        fn ctx(&self) -> HoverContext<'_> {
            HoverContext {
                region_name: "Georgia",
                counties: &self.counties,
                disasters: &self.disasters,
                options: &self.options,
            }
        }
    }

    fn text(updates: &[TextUpdate], field: InfoField) -> &str {
        updates
            .iter()
            .find(|u| u.field == field)
            .map(|u| u.text.as_str())
            .unwrap()
    }

    #[test]
    fn transition_ignores_current_state() {
        let a = CountyId(0);
        let b = CountyId(1);
        for state in [HoverState::Region, HoverState::County(a)] {
            assert_eq!(transition(state, PointerEvent::Enter(b)), HoverState::County(b));
            assert_eq!(transition(state, PointerEvent::Leave(b)), HoverState::Region);
        }
    }

    #[test]
    fn starts_in_region_state() {
        assert_eq!(HoverController::new().state(), HoverState::Region);
    }

    #[test]
    fn region_panel_covers_full_dataset() {
        let fixture = Fixture::new();
        let mut controller = HoverController::new();

        let updates = controller.reset(&fixture.ctx());

        // 600,000 total over 3 years; mean of 4 records.
        assert_eq!(text(&updates, InfoField::Header), "Georgia");
        assert_eq!(
            text(&updates, InfoField::TotalCost),
            "Average Annual Cost of Damage: $200,000"
        );
        assert_eq!(
            text(&updates, InfoField::AverageCost),
            "Average Cost per Disaster: $150,000"
        );
    }

    #[test]
    fn county_panel_covers_attached_disasters() {
        let fixture = Fixture::new();
        let mut controller = HoverController::new();

        let updates = controller.handle(PointerEvent::Enter(CountyId(0)), &fixture.ctx());

        assert_eq!(controller.state(), HoverState::County(CountyId(0)));
        assert_eq!(text(&updates, InfoField::Header), "Fulton County");
        assert_eq!(
            text(&updates, InfoField::TotalCost),
            "Average Annual Cost of Damage: $150,000"
        );
        assert_eq!(
            text(&updates, InfoField::AverageCost),
            "Average Cost per Disaster: $225,000"
        );
    }

    #[test]
    fn county_without_disasters_shows_zero() {
        let fixture = Fixture::new();
        let mut controller = HoverController::new();

        let updates = controller.handle(PointerEvent::Enter(CountyId(2)), &fixture.ctx());

        assert_eq!(text(&updates, InfoField::Header), "Empty County");
        assert_eq!(
            text(&updates, InfoField::TotalCost),
            "Average Annual Cost of Damage: $0"
        );
        assert_eq!(
            text(&updates, InfoField::AverageCost),
            "Average Cost per Disaster: $0"
        );
    }

    #[test]
    fn empty_dataset_shows_zero_region_figures() {
        let options = StatsOptions::default();
        let ctx = HoverContext {
            region_name: "Georgia",
            counties: &[],
            disasters: &[],
            options: &options,
        };

        let updates = HoverController::new().reset(&ctx);

        assert_eq!(text(&updates, InfoField::Header), "Georgia");
        assert_eq!(
            text(&updates, InfoField::TotalCost),
            "Average Annual Cost of Damage: $0"
        );
        assert_eq!(
            text(&updates, InfoField::AverageCost),
            "Average Cost per Disaster: $0"
        );
    }

    #[test]
    fn enter_then_leave_restores_region_texts() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let mut controller = HoverController::new();

        let before = controller.reset(&ctx);
        controller.handle(PointerEvent::Enter(CountyId(1)), &ctx);
        let after = controller.handle(PointerEvent::Leave(CountyId(1)), &ctx);

        assert_eq!(before, after);
        assert_eq!(controller.state(), HoverState::Region);
    }

    #[test]
    fn region_figures_are_idempotent() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        assert_eq!(ctx.panel(HoverState::Region), ctx.panel(HoverState::Region));
    }

    #[test]
    fn every_event_rewrites_all_three_fields() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let mut controller = HoverController::new();

        for event in [
            PointerEvent::Enter(CountyId(0)),
            PointerEvent::Enter(CountyId(1)),
            PointerEvent::Leave(CountyId(1)),
        ] {
            let fields: Vec<_> = controller
                .handle(event, &ctx)
                .into_iter()
                .map(|u| u.field)
                .collect();
            assert_eq!(
                fields,
                vec![InfoField::Header, InfoField::TotalCost, InfoField::AverageCost]
            );
        }
    }

    #[test]
    fn unknown_county_falls_back_to_region() {
        let fixture = Fixture::new();
        let mut controller = HoverController::new();

        let updates = controller.handle(PointerEvent::Enter(CountyId(99)), &fixture.ctx());

        assert_eq!(controller.state(), HoverState::Region);
        assert_eq!(text(&updates, InfoField::Header), "Georgia");
    }

    #[test]
    fn invalid_damage_propagates_as_nan() {
        let mut fixture = Fixture::new();
        fixture.disasters.push(disaster("Cobb", "n/a"));

        let panel = fixture.ctx().panel(HoverState::Region);

        assert_eq!(panel.total_cost, "NaN");
        assert_eq!(panel.average_cost, "NaN");
    }

    #[test]
    fn skip_policy_ignores_invalid_damage() {
        let mut fixture = Fixture::new();
        fixture.disasters.push(disaster("Cobb", "n/a"));
        fixture.options.invalid_damage = InvalidDamagePolicy::Skip;

        let panel = fixture.ctx().panel(HoverState::Region);

        assert_eq!(panel.total_cost, "200,000");
        assert_eq!(panel.average_cost, "150,000");
    }

    #[test]
    fn field_names_match_css_classes() {
        let names: Vec<_> = InfoField::iter().map(|f| f.to_string()).collect();
        assert_eq!(names, vec!["header", "years", "totalCost", "avgCost"]);
    }
}
