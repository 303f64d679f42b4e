use std::path::{Path, PathBuf};
use std::process;

use brickmind_core::config::load_config_from_str;
use brickmind_core::EngineConfig;
use brickmind_sanitize::BuildSource;

mod report;

const DEFAULT_SANITIZE_LIMIT: usize = 200;

/// Reads a previously captured generator response from disk.
struct PayloadFile(PathBuf);

impl BuildSource for PayloadFile {
    fn fetch(&self, prompt: &str, limit: usize) -> Result<String, String> {
        log::info!(
            "Reading payload for '{prompt}' (limit {limit}) from {}",
            self.0.display()
        );
        std::fs::read_to_string(&self.0).map_err(|e| format!("{}: {e}", self.0.display()))
    }
}

fn usage() {
    eprintln!("Usage: brickmind <COMMAND> [OPTIONS]");
    eprintln!();
    eprintln!("  generate --prompt <text> --budget <n>      Procedurally generate a build");
    eprintln!("  sanitize --prompt <text> --payload <path>  Repair an external build payload");
    eprintln!();
    eprintln!("  --limit <n>       Max pieces taken from the payload (default: 200)");
    eprintln!("  --config <path>   Engine config RON file");
    eprintln!("  --output <path>   Save the full result as JSON");
}

fn fail(msg: &str) -> ! {
    eprintln!("ERROR: {msg}");
    process::exit(1);
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> T {
    value
        .parse()
        .unwrap_or_else(|_| fail(&format!("invalid {flag} value: {value}")))
}

fn load_config(path: Option<&Path>) -> EngineConfig {
    let Some(path) = path else {
        return EngineConfig::default();
    };
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("cannot read {}: {e}", path.display())));
    let config = load_config_from_str(&text).unwrap_or_else(|e| fail(&e.to_string()));
    log::info!("Loaded engine config from {}", path.display());
    config
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1).cloned() else {
        usage();
        process::exit(1);
    };

    let mut prompt: Option<String> = None;
    let mut budget: Option<u32> = None;
    let mut payload_path: Option<PathBuf> = None;
    let mut limit = DEFAULT_SANITIZE_LIMIT;
    let mut config_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        if matches!(flag, "--help" | "-h") {
            usage();
            process::exit(0);
        }
        let value = args
            .get(i + 1)
            .unwrap_or_else(|| fail(&format!("missing value for {flag}")));
        match flag {
            "--prompt" => prompt = Some(value.clone()),
            "--budget" => budget = Some(parse_number(flag, value)),
            "--payload" => payload_path = Some(PathBuf::from(value)),
            "--limit" => limit = parse_number(flag, value),
            "--config" => config_path = Some(PathBuf::from(value)),
            "--output" => output_path = Some(PathBuf::from(value)),
            other => fail(&format!("unknown argument: {other}")),
        }
        i += 2;
    }

    let config = load_config(config_path.as_deref());
    let prompt = prompt.unwrap_or_else(|| fail("--prompt is required"));

    match command.as_str() {
        "generate" => {
            let budget = budget.unwrap_or_else(|| fail("--budget is required"));
            let build = brickmind_gen::generate_build(&prompt, budget, &config)
                .unwrap_or_else(|e| fail(&e.to_string()));
            println!("{}", report::format_build(&build, &config.physics));
            if let Some(ref path) = output_path {
                report::save_json(path, &build)
                    .unwrap_or_else(|e| fail(&format!("failed to save {}: {e}", path.display())));
                log::info!("Saved build to {}", path.display());
            }
        }
        "sanitize" => {
            let source = PayloadFile(payload_path.unwrap_or_else(|| fail("--payload is required")));
            let build = brickmind_sanitize::sanitize_external_build(&prompt, limit, &source, &config)
                .unwrap_or_else(|e| fail(&e.to_string()));
            println!("{}", report::format_sanitized(&build, &config.physics));
            if let Some(ref path) = output_path {
                report::save_json(path, &build)
                    .unwrap_or_else(|e| fail(&format!("failed to save {}: {e}", path.display())));
                log::info!("Saved sanitized build to {}", path.display());
            }
        }
        other => {
            eprintln!("Unknown command: {other}");
            usage();
            process::exit(1);
        }
    }
}
