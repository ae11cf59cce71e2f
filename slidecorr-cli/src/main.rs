use clap::Parser;
use serde::{Deserialize, Serialize};
use slidecorr::io::load_gray_image;
use slidecorr::{
    cover_exceeds, detections_from_response, iou_exceeds, suppress, Algo, CorrConfig, Correlator,
    Detection,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Slidecorr CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum OverlapKind {
    Cover,
    Iou,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct OverlapConfig {
    kind: OverlapKind,
    max: f64,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            kind: OverlapKind::Cover,
            max: 0.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    template_path: String,
    output_path: Option<String>,
    stride: usize,
    algorithm: String,
    parallel: bool,
    cosine: bool,
    min_score: f64,
    max_detections: usize,
    overlap: OverlapConfig,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = CorrConfig::default();
        Self {
            image_path: String::new(),
            template_path: String::new(),
            output_path: None,
            stride: cfg.stride,
            algorithm: cfg.algo.to_string(),
            parallel: cfg.parallel,
            cosine: true,
            min_score: 0.5,
            max_detections: 10,
            overlap: OverlapConfig::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    score: f64,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            score: value.score,
            x0: value.rect.x0,
            y0: value.rect.y0,
            x1: value.rect.x1,
            y1: value.rect.y1,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    strategy: &'static str,
    response_width: usize,
    response_height: usize,
    candidates: usize,
    detections: Vec<DetectionRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("slidecorr=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.template_path.is_empty() {
        return Err("image_path and template_path must be set in the config".into());
    }
    if config.max_detections == 0 {
        return Err("max_detections must be at least 1".into());
    }

    let algo: Algo = config.algorithm.parse()?;
    let correlator = Correlator::new().with_config(CorrConfig {
        stride: config.stride,
        algo,
        parallel: config.parallel,
    });

    let image = load_gray_image(&config.image_path)?;
    let template = load_gray_image(&config.template_path)?;
    let strategy = correlator.strategy_for(image.view(), template.view())?;

    let response = if config.cosine {
        correlator.cos_corr(&image, &template)?
    } else {
        correlator.corr(&image, &template)?
    };
    let candidates =
        detections_from_response(&response, template.size(), config.stride, config.min_score);
    let kept = match config.overlap.kind {
        OverlapKind::Cover => suppress(
            &candidates,
            config.max_detections,
            cover_exceeds(config.overlap.max),
        ),
        OverlapKind::Iou => suppress(
            &candidates,
            config.max_detections,
            iou_exceeds(config.overlap.max),
        ),
    };

    let output = Output {
        strategy: strategy.name(),
        response_width: response.width(),
        response_height: response.height(),
        candidates: candidates.len(),
        detections: kept.into_iter().map(DetectionRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
