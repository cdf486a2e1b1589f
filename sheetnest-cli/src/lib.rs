use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use std::time::Instant;

use anyhow::{Context, Result};
use log::{error, info, warn};

use sheetnest::Nester;
use sheetnest::io::export::export_solution;
use sheetnest::io::ext_repr::NestRequest;
use sheetnest_remote::{FallbackNester, RemoteConfig, Solved, solve_local};

use crate::config::CliConfig;
use crate::io::cli::Cli;
use crate::io::output::NestOutput;
use crate::io::svg_export::result_to_svg;

pub mod config;
pub mod io;

/// Start of the process, log timestamps are relative to it
pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Solves the job in `args.input_file` and writes `sol_<stem>.json` and `sol_<stem>.svg`
/// into the solution folder. Nothing is written when nesting fails.
///
/// Returns the paths of the JSON and SVG files.
pub async fn run(args: &Cli) -> Result<(PathBuf, PathBuf)> {
    let config = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            CliConfig::default()
        }
        Some(config_file) => {
            io::read_json::<CliConfig>(config_file).context("incorrect config file format")?
        }
    };
    info!("[MAIN] Successfully parsed config: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no usable name")?
        .to_owned();

    let request: NestRequest = io::read_json(&args.input_file)?;
    info!(
        "[MAIN] {} shapes to nest on a {}x{} sheet",
        request.shapes.len(),
        request.sheet_width,
        request.sheet_height
    );

    let start = Instant::now();
    let nester = Nester::new(config.nest.clone());
    let solved = match &args.remote_url {
        Some(url) => {
            let remote_config = RemoteConfig {
                url: url.clone(),
                timeout_ms: args.remote_timeout_ms,
            };
            FallbackNester::from_config(&remote_config, nester)
                .nest(&request)
                .await
        }
        None => match nester.prepare(&request) {
            Ok(instance) => solve_local(Arc::new(nester), instance).await,
            Err(e) => Err(e),
        },
    };
    let Solved {
        result,
        source,
        instance,
    } = solved.inspect_err(|e| error!("[MAIN] nesting failed: {e}"))?;

    info!(
        "[MAIN] {:?} layout of {:.1}x{:.1} ({:.3}% dense) in {}ms",
        source,
        result.bounding_width,
        result.bounding_height,
        result.density * 100.0,
        start.elapsed().as_millis()
    );

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let svg = result_to_svg(&result, &instance, config.svg_draw_options, &input_stem);
    let output = NestOutput {
        solution: export_solution(&result, &instance),
        request,
        source,
        config,
    };

    let json_path = args.solution_folder.join(format!("sol_{input_stem}.json"));
    let svg_path = args.solution_folder.join(format!("sol_{input_stem}.svg"));
    io::write_json(&output, &json_path)?;
    io::write_svg(&svg, &svg_path)?;

    Ok((json_path, svg_path))
}
