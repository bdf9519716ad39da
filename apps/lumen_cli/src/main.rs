//! lumen-cli - 面板无头工具
//!
//! 不启动窗口，直接输出面板的渲染结果、刻度标签和派发的信封。

use std::sync::Arc;

use lumen_dispatch::RecordingDispatcher;
use lumen_panel::{format_time, format_time_hms, ContextPanel, LabelStyle};
use lumen_store::{LayerData, StateStore, VideoLayerState, VIDEO_LAYER};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    match run(&args) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(CliError::Usage(program)) => {
            eprintln!("Usage:");
            eprintln!("  {} format <secs>...               # compat and h:mm:ss labels", program);
            eprintln!("  {} seek <secs>                    # seek envelope JSON", program);
            eprintln!("  {} render [--hms] [<played> <duration>]  # panel view JSON", program);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<Vec<String>, CliError> {
    let program = args.first().map(String::as_str).unwrap_or("lumen-cli");
    let usage = || CliError::Usage(program.to_string());

    let command = args.get(1).ok_or_else(usage)?;
    let rest = &args[2..];

    match command.as_str() {
        "format" => {
            if rest.is_empty() {
                return Err(usage());
            }
            rest.iter()
                .map(|arg| {
                    let secs = parse_secs(arg)?;
                    Ok(format!(
                        "{}\t{}\t{}",
                        arg,
                        format_time(secs),
                        format_time_hms(secs)
                    ))
                })
                .collect()
        }
        "seek" => {
            let [value] = rest else {
                return Err(usage());
            };
            let value = parse_secs(value)?;

            let recorder = Arc::new(RecordingDispatcher::new());
            let panel = ContextPanel::new(&StateStore::new(), Arc::clone(&recorder));
            panel.on_release(value);

            recorder
                .take()
                .iter()
                .map(|envelope| envelope.to_json().map_err(CliError::from))
                .collect()
        }
        "render" => {
            let (style, rest) = match rest.split_first() {
                Some((flag, rest)) if flag == "--hms" => (LabelStyle::Hms, rest),
                _ => (LabelStyle::Compat, rest),
            };

            let store = StateStore::new();
            match rest {
                [] => {}
                [played, duration] => {
                    let state = VideoLayerState::new(parse_secs(played)?, parse_secs(duration)?);
                    store.set_layer_data(VIDEO_LAYER, LayerData::Video(state));
                }
                _ => return Err(usage()),
            }

            let panel =
                ContextPanel::new(&store, RecordingDispatcher::new()).with_label_style(style);
            Ok(vec![serde_json::to_string_pretty(&panel.view())?])
        }
        _ => Err(usage()),
    }
}

fn parse_secs(s: &str) -> Result<f64, CliError> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CliError::InvalidNumber(s.to_string()))
}
