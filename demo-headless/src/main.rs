use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weather_drift_core::{
    AlarmTimer, DrawSurface, EngineConfig, FrameDriver, Hsla, Rgb, SceneToggles, Season,
    SharedWeather, Vec2, WeatherSnapshot,
};

/// Headless run of the weather drift animation
#[derive(Parser, Debug)]
#[command(name = "drift-demo")]
#[command(about = "Weather-driven particle drift, rendered headlessly", long_about = None)]
struct Args {
    /// Temperature in °C
    #[arg(short, long, default_value_t = 18.0)]
    temperature: f32,

    /// Cloud cover in %
    #[arg(long, default_value_t = 40.0)]
    cloud: f32,

    /// Precipitation in mm/h
    #[arg(short, long, default_value_t = 0.0)]
    rain: f32,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 1.0)]
    wind_speed: f32,

    /// Wind direction in degrees (0 = +x, 90 = down the canvas)
    #[arg(long, default_value_t = 0.0)]
    wind_direction: f32,

    /// Fog density (0-1)
    #[arg(long, default_value_t = 0.1)]
    fog: f32,

    /// Report the scene as night
    #[arg(long)]
    night: bool,

    /// Read the weather snapshot from a JSON file instead of the flags above
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Read the engine configuration from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Seed for the particle layout (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Force the night palette
    #[arg(long)]
    night_override: bool,

    /// Ring the alarm starting at this frame
    #[arg(long)]
    alarm_at_frame: Option<u32>,

    /// Request the alarm tone while ringing
    #[arg(long)]
    alarm_sound: bool,

    /// Publish a rain storm snapshot at this frame
    #[arg(long)]
    storm_at_frame: Option<u32>,

    /// Calendar month (0 = January) used for the season label
    #[arg(long, default_value_t = 0)]
    month: u32,

    /// Report every N frames
    #[arg(long, default_value_t = 60)]
    report_interval: u32,
}

/// Surface that keeps summary numbers instead of pixels
#[derive(Default)]
struct SummarySurface {
    background: Rgb,
    circles: usize,
    center_sum: Vec2,
    last_stroke: Option<Hsla>,
}

impl SummarySurface {
    fn begin_frame(&mut self) {
        self.circles = 0;
        self.center_sum = Vec2::zeros();
    }

    fn mean_center(&self) -> Vec2 {
        if self.circles == 0 {
            Vec2::zeros()
        } else {
            self.center_sum / self.circles as f32
        }
    }
}

impl DrawSurface for SummarySurface {
    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, color: Rgb) {
        self.background = color;
    }

    fn stroke_circle(&mut self, center: Vec2, _radius: f32, color: Hsla) {
        self.circles += 1;
        self.center_sum += center;
        self.last_stroke = Some(color);
    }
}

fn load_config(args: &Args) -> Result<EngineConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn load_snapshot(args: &Args) -> Result<WeatherSnapshot, Box<dyn Error>> {
    match &args.snapshot {
        Some(path) => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        None => Ok(WeatherSnapshot::new(
            args.temperature,
            args.cloud,
            args.rain,
            args.wind_speed,
            args.wind_direction,
            args.fog,
            !args.night,
        )),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let weather = SharedWeather::new(load_snapshot(&args)?);

    println!("=== Weather Drift Demo ===\n");
    let initial = weather.current();
    println!(
        "Weather: T={}, cloud={}, rain={}, wind={} @ {}, fog={:.2}, {}",
        initial.temperature,
        initial.cloud_cover,
        initial.rain,
        initial.wind_speed,
        initial.wind_direction,
        initial.fog,
        if initial.is_day { "day" } else { "night" }
    );
    println!("Season: {}", Season::from_month(args.month));
    println!(
        "Canvas: {:.0}x{:.0}, {} particles, {} frames @ {:.0} fps\n",
        args.width, args.height, config.particle_count, args.frames, args.fps
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let toggles = SceneToggles {
        night_override: args.night_override,
        alarm_enabled: args.alarm_at_frame.is_some(),
        alarm_sound: args.alarm_sound,
    };
    let alarm_duration_ms = config.alarm_duration_ms;
    let mut driver = FrameDriver::new(config);
    driver.resize(args.width, args.height, &mut rng);

    let mut alarm = AlarmTimer::new();
    let mut surface = SummarySurface::default();
    let frame_ms = 1000.0 / args.fps.max(1.0);
    let report_interval = args.report_interval.max(1);

    for frame in 0..args.frames {
        let now_ms = f64::from(frame) * frame_ms;

        if args.storm_at_frame == Some(frame) {
            let calm = weather.current();
            info!("Storm front arriving at frame {}", frame);
            weather.publish(WeatherSnapshot::new(
                *calm.temperature - 6.0,
                95.0,
                6.0,
                *calm.wind_speed + 6.0,
                *calm.wind_direction + 30.0,
                calm.fog.max(0.3),
                calm.is_day,
            ));
        }
        if toggles.alarm_enabled && args.alarm_at_frame == Some(frame) {
            alarm.start(now_ms, alarm_duration_ms);
        }

        surface.begin_frame();
        let snapshot = weather.current();
        let stats = driver.tick(now_ms, &snapshot, toggles, &mut alarm, &mut surface);

        if frame % report_interval == 0 || frame + 1 == args.frames {
            let mean = surface.mean_center();
            let stroke = surface
                .last_stroke
                .map_or_else(|| "-".to_string(), Hsla::to_css);
            println!(
                "[frame {:>5}] t={:>6.2}s mode={:?} bg={} mean=({:>6.1}, {:>6.1}) \
                 stroke={} alarm={}{}",
                stats.frame,
                now_ms / 1000.0,
                stats.mode,
                stats.background.to_hex(),
                mean.x,
                mean.y,
                stroke,
                if stats.alarm_ringing { "RINGING" } else { "idle" },
                if stats.sound_requested { " (tone)" } else { "" },
            );
        }
    }

    let config = driver.config();
    println!(
        "\nSimulated {} frames: {} particles, dt capped at {:.2}s, alarm duration {:.0} ms",
        driver.frame_count(),
        config.particle_count,
        config.max_frame_dt,
        config.alarm_duration_ms
    );
    Ok(())
}
