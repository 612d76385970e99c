use lmb_engine_kinematics as lmb;
use log::{debug, error, info};

const FRAME_RATE: f64 = 60.0; // [Hz]
const NUM_FRAMES: usize = 120;
const D_ANGLE: f64 = 0.5; // [CA deg]

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let plot = args.iter().any(|a| a == "--plot");
    let file_name = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(|a| a.as_str())
        .unwrap_or("engine.json");

    if let Err(err) = run(file_name, plot) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(file_name: &str, plot: bool) -> Result<(), lmb::EngineError> {
    let json = lmb::JsonEngine::from_file(file_name)?;
    let geometry = json.geometry()?;
    info!("{}", geometry);

    let mut engine = lmb::EngineAssembly::new(geometry);
    let mut clock = lmb::FrameClock::new(json.speed, lmb::DEFAULT_MAX_STEP)?;

    // a short animation, sweeping the exploded view open and closed
    for frame in 0..NUM_FRAMES {
        let t = frame as f64 / NUM_FRAMES as f64;
        engine.set_exploded(1.0 - (2.0 * t - 1.0).abs());
        let angle = clock.advance(1.0 / FRAME_RATE);
        let state = engine.update(angle);
        if frame % 30 == 0 {
            info!("frame {}\n{}", frame, state);
        }
        debug!("{}", serde_json::to_string(state)?);
    }
    engine.set_exploded(0.0);

    let recorder = lmb::CycleRecorder::record(&engine, D_ANGLE)?;
    recorder.write_to_file("cycle.txt")?;
    info!(
        "{} samples of `{}` written to cycle.txt",
        recorder.num_samples(),
        recorder.headers().join("`, `")
    );

    if plot {
        for cyl in engine.geometry().cylinders() {
            let file = format!("{}.svg", cyl.name());
            lmb::core::plot::plot_cylinder(&recorder, cyl.name(), "svg", &file)?;
            info!("plotted {}", file);
        }
    }
    Ok(())
}
