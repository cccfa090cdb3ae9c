//! Terminal hover session.
//!
//! Lets the user move the pointer between counties with a `dialoguer`
//! menu. Every selection is turned into the same leave/enter events a
//! graphical surface would report, and the rewritten info panel is
//! printed.

use std::collections::BTreeMap;

use dialoguer::Select;
use disaster_map_choropleth::hover::{HoverState, InfoField, PointerEvent};
use disaster_map_choropleth::{ChoroplethApp, RenderSurface};
use disaster_map_geography_models::{County, CountyId, Region};
use geo::MultiLineString;

/// A text-only surface. Shapes are counted, the info fields are kept and
/// printed on demand.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    counties: usize,
    texts: BTreeMap<InfoField, String>,
}

impl TerminalSurface {
    /// Prints the info panel.
    pub fn print_panel(&self) {
        println!();
        for field in [InfoField::Header, InfoField::TotalCost, InfoField::AverageCost] {
            if let Some(text) = self.texts.get(&field) {
                println!("  {text}");
            }
        }
        if let Some(years) = self.texts.get(&InfoField::Years) {
            println!("  ({years})");
        }
        println!();
    }
}

impl RenderSurface for TerminalSurface {
    fn draw_region(&mut self, region: &Region) {
        log::debug!("Drawing region {}", region.name);
    }

    fn draw_county(&mut self, _id: CountyId, _county: &County, _class: &str) {
        self.counties += 1;
    }

    fn draw_mesh(&mut self, mesh: &MultiLineString<f64>) {
        log::debug!(
            "Drawing {} boundary lines across {} counties",
            mesh.0.len(),
            self.counties
        );
    }

    fn set_text(&mut self, field: InfoField, text: &str) {
        self.texts.insert(field, text.to_string());
    }
}

/// Runs the hover menu until the user quits.
///
/// # Errors
///
/// Returns an error if reading the user's selection fails.
pub fn run(app: &mut ChoroplethApp) -> Result<(), Box<dyn std::error::Error>> {
    let mut surface = TerminalSurface::default();
    app.draw(&mut surface);
    surface.print_panel();

    let names: Vec<String> = app
        .geometry()
        .counties
        .iter()
        .map(|county| county.display_name().to_string())
        .collect();

    let leave_idx = names.len();
    let quit_idx = leave_idx + 1;

    let mut items: Vec<&str> = names.iter().map(String::as_str).collect();
    items.push("Leave county");
    items.push("Quit");

    loop {
        let selection = Select::new()
            .with_prompt("Hover over a county")
            .items(&items)
            .default(quit_idx)
            .interact()?;

        if selection == quit_idx {
            break;
        }

        let current = app.hover_state();

        if let HoverState::County(id) = current {
            if selection == id.0 {
                surface.print_panel();
                continue;
            }
            app.handle_pointer(PointerEvent::Leave(id), &mut surface);
        }

        if selection != leave_idx {
            app.handle_pointer(PointerEvent::Enter(CountyId(selection)), &mut surface);
        }

        surface.print_panel();
    }

    Ok(())
}
