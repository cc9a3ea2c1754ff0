//! Implementation of the `forcepath forces` command.

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets, Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::adapters::storage::load_force_table;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct ForcesArgs {}

#[derive(Debug, serde::Serialize)]
pub struct ForceRow {
    pub name: String,
    pub weight: f64,
    pub norm: f64,
}

#[derive(Debug, serde::Serialize)]
pub struct ForcesOutput {
    pub dimension: usize,
    pub forces: Vec<ForceRow>,
}

impl CommandOutput for ForcesOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Force").add_attribute(Attribute::Bold),
                Cell::new("Weight").add_attribute(Attribute::Bold),
                Cell::new("Norm").add_attribute(Attribute::Bold),
            ]);

        for force in &self.forces {
            table.add_row(vec![
                Cell::new(&force.name),
                Cell::new(format!("{:.2}", force.weight)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.4}", force.norm)).set_alignment(CellAlignment::Right),
            ]);
        }

        format!(
            "{table}\n{} force(s), dimension {}",
            self.forces.len(),
            self.dimension
        )
    }
}

pub async fn execute(_args: ForcesArgs, config: &Config, json_mode: bool) -> Result<()> {
    let table = load_force_table(&config.paths.force_cache, &config.paths.force_weights)
        .context("Failed to load force table")?;

    let result = ForcesOutput {
        dimension: table.dimension(),
        forces: table
            .iter()
            .map(|force| ForceRow {
                name: force.name.clone(),
                weight: force.weight,
                norm: force.reference.norm(),
            })
            .collect(),
    };
    output(&result, json_mode);
    Ok(())
}
