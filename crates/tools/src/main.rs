use std::env;
use std::fs;
use std::path::PathBuf;

use foundation::math::{PixelSize, Viewport};
use foundation::{GeoPoint, LatLngBounds};
use region::RegionConfig;
use region::geometry::{ratio_exceeds_threshold, region_viewport_ratio};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "replay" => cmd_replay(args),
        "ratio" => cmd_ratio(args),
        _ => Err(usage()),
    }
}

fn cmd_replay(args: Vec<String>) -> Result<(), String> {
    // regionctl replay <script.json> [--pretty]
    let mut script_path: Option<PathBuf> = None;
    let mut pretty = false;

    for arg in &args {
        match arg.as_str() {
            "--pretty" => pretty = true,
            s if s.starts_with('-') => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
            s => {
                if script_path.is_some() {
                    return Err(format!("unexpected arg: {s}\n\n{}", usage()));
                }
                script_path = Some(PathBuf::from(s));
            }
        }
    }

    let script_path = script_path.ok_or_else(usage)?;
    let json = fs::read_to_string(&script_path).map_err(|e| format!("read {script_path:?}: {e}"))?;
    let script = tools::parse_script(&json)?;

    let config = RegionConfig::from_env().map_err(|e| e.to_string())?;
    info!(steps = script.steps.len(), path = ?script_path, "replaying script");

    let report = tools::replay(&script, config)?;
    let out = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .map_err(|e| format!("encode report: {e}"))?;
    println!("{out}");
    Ok(())
}

#[derive(Serialize)]
struct RatioReport {
    ratio: f64,
    threshold: f64,
    exceeds: bool,
}

fn cmd_ratio(args: Vec<String>) -> Result<(), String> {
    // regionctl ratio --bounds N,S,E,W [--size WxH] [--center LAT,LNG] [--zoom Z]
    let mut viewport = Viewport::default();
    let mut bounds: Option<LatLngBounds> = None;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .map(String::as_str)
            .ok_or_else(|| format!("{flag} requires a value"));
        match flag {
            "--size" => {
                let v = value?;
                let (w, h) = v
                    .split_once('x')
                    .ok_or_else(|| format!("--size expects WxH, got {v}"))?;
                viewport.resize(PixelSize::new(parse_f64(w)?, parse_f64(h)?));
            }
            "--center" => {
                let p = parse_list(value?, 2)?;
                viewport.pan_to(GeoPoint::new(p[0], p[1]));
            }
            "--zoom" => viewport.set_zoom(parse_f64(value?)?),
            "--bounds" => {
                let p = parse_list(value?, 4)?;
                bounds = Some(LatLngBounds::from_edges(p[0], p[1], p[2], p[3]));
            }
            s => return Err(format!("unknown arg: {s}\n\n{}", usage())),
        }
        i += 2;
    }

    let bounds = bounds.ok_or_else(|| "ratio requires --bounds".to_string())?;
    let config = RegionConfig::from_env().map_err(|e| e.to_string())?;
    let report = RatioReport {
        ratio: region_viewport_ratio(&bounds, &viewport),
        threshold: config.pan_map_ratio,
        exceeds: ratio_exceeds_threshold(&bounds, &viewport, config.pan_map_ratio),
    };
    let out = serde_json::to_string(&report).map_err(|e| format!("encode report: {e}"))?;
    println!("{out}");
    Ok(())
}

fn parse_f64(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid number {s:?}: {e}"))
}

fn parse_list(s: &str, expected: usize) -> Result<Vec<f64>, String> {
    let values = s.split(',').map(parse_f64).collect::<Result<Vec<_>, _>>()?;
    if values.len() != expected {
        return Err(format!("expected {expected} comma-separated values, got {s:?}"));
    }
    Ok(values)
}

fn usage() -> String {
    [
        "usage:",
        "  regionctl replay <script.json> [--pretty]",
        "  regionctl ratio --bounds N,S,E,W [--size WxH] [--center LAT,LNG] [--zoom Z]",
        "",
        "env:",
        "  REGION_PAN_MAP_RATIO  viewport share above which a region is disabled (default 0.75)",
        "  RUST_LOG              tracing filter, e.g. region=debug",
    ]
    .join("\n")
}
