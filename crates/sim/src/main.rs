mod scenario;

use anyhow::Result;
use clap::Parser;
use glam::Vec2;

use scenario::{Scenario, Strategy};

#[derive(Parser)]
#[command(name = "platformer-sim")]
#[command(about = "Headless platformer movement simulation")]
struct Args {
    #[arg(short, long, default_value_t = 60)]
    tick_rate: u32,

    #[arg(short, long, default_value_t = 3.0, help = "Simulated time in seconds")]
    seconds: f32,

    #[arg(long, default_value_t = 0.15, help = "Jump button hold time in seconds")]
    hold: f32,

    #[arg(long, value_enum, default_value_t = Strategy::Default)]
    strategy: Strategy,

    #[arg(long, help = "Drop the player into a pit afterwards and respawn it")]
    respawn: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let scenario = Scenario {
        tick_rate: args.tick_rate,
        seconds: args.seconds,
        hold: args.hold,
        strategy: args.strategy,
    };
    scenario.validate()?;

    let (mut stage, targets) = scenario.build()?;
    log::info!(
        "simulating {:?} for {}s at {} Hz (hold {}s)",
        scenario.strategy,
        scenario.seconds,
        scenario.tick_rate,
        scenario.hold
    );

    let report = scenario.run(&mut stage);
    log::info!(
        "{} ticks, {} jump(s), {} landing(s), peak height {:.2}, final position {}",
        report.ticks,
        report.jumps,
        report.landings,
        report.peak_height,
        report.final_position
    );

    {
        let targets = targets.borrow();
        log::info!("targets alive: {}/{}", targets.alive(), targets.len());
    }

    if args.respawn {
        let player = stage.player;
        stage.physics.set_body_position(player, Vec2::new(0.0, -30.0));

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        runtime.block_on(stage.respawn_player());

        log::info!(
            "player respawned at {} ({})",
            stage.player_position(),
            stage.controller.lifecycle()
        );
    }

    Ok(())
}
