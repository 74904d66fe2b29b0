use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use migramap::{load_all, Engine, EngineConfig, FileSource, MapSession, MemorySink};
use serde_json::json;
use tracing::info;

use crate::cli::{Cli, RenderArgs};

pub fn run(cli: &Cli, args: &RenderArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| PathBuf::from("scene.json"));

    // Assert output path is not stdout
    if output == Path::new("-") { bail!("stdout is not supported."); }
    if output.exists() && !args.force {
        bail!("Output file already exists: {} (use --force to overwrite)", output.display());
    }

    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };

    if cli.verbose > 0 {
        eprintln!(
            "[render] polygons={} statistics={} flows={} -> {}",
            args.polygons.display(),
            args.statistics.display(),
            args.flows.display(),
            output.display(),
        );
    }

    let source = FileSource {
        polygons: args.polygons.clone(),
        statistics: args.statistics.clone(),
        flows: args.flows.clone(),
    };
    let datasets = load_all(&source).context("Failed to load datasets, nothing was rendered")?;

    let engine = Engine::new(config);
    let scene = engine.build_scene(&datasets);

    let mut session = MapSession::new(MemorySink::new(), args.view.into(), engine.config().opacity);
    session.apply(&scene);

    let document = json!({
        "view": session.mode(),
        "query": session.mode().write_query(""),
        "layers": session.sink().layers(),
        "scene": scene,
    });

    let file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document).context("Failed to write scene")?;
    writer.flush()?;

    info!("[render] {} of {} routes drawn", scene.stats.resolved, scene.stats.routes);
    println!("Wrote scene -> {}", output.display());
    Ok(())
}
