//! Headless layout demo: builds the road grid, derives blocks, generates the
//! building layout, and logs a per-district summary.

use bevy::log::LogPlugin;
use bevy::prelude::*;

use mazecity::layout::CityBuildings;
use mazecity::spatial::BuildingIndex;
use mazecity::themes::ThemeId;
use mazecity::CityLayoutPlugin;

fn main() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .add_plugins(CityLayoutPlugin);

    // The generation stages hand off across frames via run conditions; a few
    // updates are enough for the pipeline to settle.
    for _ in 0..8 {
        app.update();
        if app.world().resource::<BuildingIndex>().is_built() {
            break;
        }
    }

    report(app.world().resource::<CityBuildings>());
}

fn report(city: &CityBuildings) {
    if !city.generated {
        warn!("Layout generation did not complete");
        return;
    }

    info!("City ready: {} buildings", city.buildings.len());

    for &theme in ThemeId::all() {
        let count = city.buildings.iter().filter(|b| b.theme == theme).count();
        info!("  {:?}: {} buildings", theme, count);
    }

    if let Some(tallest) = city
        .buildings
        .iter()
        .max_by(|a, b| a.height.total_cmp(&b.height))
    {
        info!(
            "Tallest: {:.1} units at ({:.1}, {:.1})",
            tallest.height, tallest.center.x, tallest.center.y
        );
    }
}
