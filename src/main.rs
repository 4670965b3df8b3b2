//! Goldrush - headless runner for the forager/archer simulation.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use goldrush::resources::{CombatStats, GoldCount};
use goldrush::settings::{SimSettings, load_settings, save_settings};

fn main() {
    let settings = load_settings();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))))
       .add_plugins(LogPlugin {
           filter: "goldrush=info".into(),
           level: bevy::log::Level::INFO,
           ..default()
       })
       .insert_resource(settings);

    // Wire up ECS systems
    goldrush::build_app(&mut app);

    app.add_systems(Startup, || {
        info!("Goldrush build {} ({})", goldrush::BUILD_COMMIT, goldrush::BUILD_TIMESTAMP);
    });
    app.add_systems(Update, exit_after_system);

    app.run();
}

/// Stop after the configured simulated time, print a summary and write the
/// settings back so missing fields show up in the file.
fn exit_after_system(
    time: Res<Time>,
    settings: Res<SimSettings>,
    gold_count: Option<Res<GoldCount>>,
    stats: Res<CombatStats>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(limit) = settings.run_seconds else { return };
    if time.elapsed_secs() < limit {
        return;
    }
    info!("Run finished after {:.1}s: delivered={} arrows={} expired={} hits={} drops={}",
        time.elapsed_secs(),
        gold_count.map(|g| g.delivered).unwrap_or(0),
        stats.arrows_fired, stats.arrows_expired, stats.hits, stats.bags_dropped);
    save_settings(&settings);
    exit.write(AppExit::Success);
}
