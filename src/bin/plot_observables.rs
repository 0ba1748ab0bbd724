//! Draw the four observable figures from `data.txt`.
//!
//! Takes no arguments: the result file is read from the working directory
//! and the figures land next to it, overwriting earlier renders. Failures
//! propagate straight out for a nonzero exit.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use ising2d::data::loader::load_observations;
use ising2d::data::model::ObservableSeries;
use ising2d::exact::critical_temperature;
use ising2d::plot::render_scatter;

/// Result file consumed from the working directory.
const DATA_PATH: &str = "data.txt";

fn main() -> Result<()> {
    env_logger::init();

    let table = load_observations(Path::new(DATA_PATH))
        .with_context(|| format!("loading {DATA_PATH}"))?;
    println!("Number of data = {}", table.len());

    let series = ObservableSeries::from_table(&table);
    let tc = critical_temperature();

    render_scatter(
        &series.temperature,
        &series.energy,
        tc,
        "T",
        "E / N",
        Path::new("Ene_vs_T.png"),
        None,
    )
    .context("rendering Ene_vs_T.png")?;

    render_scatter(
        &series.temperature,
        &series.absolute_magnetization(),
        tc,
        "T",
        "|M| / N",
        Path::new("Mag_vs_T.png"),
        None,
    )
    .context("rendering Mag_vs_T.png")?;

    render_scatter(
        &series.temperature,
        &series.heat_capacity,
        tc,
        "T",
        "C / N",
        Path::new("Cap_vs_T.png"),
        None,
    )
    .context("rendering Cap_vs_T.png")?;

    render_scatter(
        &series.temperature,
        &series.susceptibility,
        tc,
        "T",
        "χ / N",
        Path::new("Sus_vs_T.png"),
        None,
    )
    .context("rendering Sus_vs_T.png")?;

    info!("wrote 4 figures next to {DATA_PATH}");
    Ok(())
}
