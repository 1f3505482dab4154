use anyhow::Context;
use clap::Parser;
use generator::profile::build_demo_track;
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::VisualizationModel;
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::input::DeliveryInput;
use workflow::report::{append_report, format_report_line};
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Ball-tracking review driver for the wicket-impact core")]
struct Args {
    /// Delivery input JSON (`kind`: pixels, samples or summary)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Load engine and frame configuration from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Override the prediction horizon (seconds)
    #[arg(long)]
    horizon: Option<f64>,
    /// Override the prediction step (seconds)
    #[arg(long)]
    step: Option<f64>,
    /// Analyse a seeded synthetic delivery when no input is given
    #[arg(long, default_value_t = false)]
    offline: bool,
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Report file each analysis is appended to
    #[arg(long, default_value = "tools/data/offline_analysis.log")]
    report: PathBuf,
    /// Keep the HTTP bridge alive for renderers and new deliveries
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value = "127.0.0.1:9000")]
    bind: SocketAddr,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow.as_ref() {
        let mut loaded = WorkflowConfig::load(path)?;
        loaded.apply_overrides(args.horizon, args.step);
        loaded
    } else {
        WorkflowConfig::from_args(args.horizon, args.step)
    };

    let runner = Arc::new(Runner::new(workflow_config)?);
    let gui_bridge = GuiBridge::new(runner.clone());

    let input = match (args.input.as_ref(), args.offline) {
        (Some(path), _) => Some(DeliveryInput::load(path)?),
        (None, true) => {
            let config = runner.config();
            let track = build_demo_track(args.seed, config.frame_width, config.frame_height)?;
            Some(DeliveryInput::Pixels(track))
        }
        (None, false) => None,
    };

    if let Some(input) = input {
        let analysis = runner.execute(&input)?;
        print!("{}", format_report_line(&analysis));
        append_report(&args.report, &analysis)?;

        gui_bridge.publish(VisualizationModel {
            status: format!("{} delivery analysed", input.kind()),
            metrics: runner.metrics(),
            analysis: Some(analysis),
        })?;
    } else if !args.serve {
        info!("nothing to do: pass --input, --offline or --serve");
    }

    if args.serve {
        let _bridge_thread = gui_bridge.serve(args.bind)?;
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
