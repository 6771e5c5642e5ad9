//! Command handlers.

use anyhow::Result;
use chrono::Local;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Table};
use tracing::info;

use rips_model::{FileKind, RunOptions};

use crate::cli::ValidateArgs;
use crate::pipeline::{build_catalog, run_pipeline};
use crate::types::RunResult;

/// Run the `validate` command.
pub fn run_validate(args: &ValidateArgs) -> Result<RunResult> {
    let reference_date = args
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let options = RunOptions::new(reference_date, args.mode.into());
    info!(
        input = %args.input.display(),
        mode = %options.mode,
        reference_date = %options.reference_date,
        "starting validation run"
    );

    let catalog = build_catalog(args.cie10_csv.as_ref())?;
    run_pipeline(&args.input, &args.output, &catalog, options)
}

/// Run the `kinds` command: list supported RIPS file kinds.
pub fn run_kinds() -> Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Código", "Campos", "Contenido"]);
    for kind in FileKind::all() {
        table.add_row(vec![
            Cell::new(kind.code()),
            Cell::new(kind.field_count()),
            Cell::new(kind_description(*kind)),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn kind_description(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Af => "Transacciones (factura)",
        FileKind::Us => "Usuarios",
        FileKind::Ac => "Consultas",
        FileKind::Ap => "Procedimientos",
        FileKind::At => "Otros servicios",
        FileKind::Ah => "Hospitalización",
        FileKind::Am => "Medicamentos",
        FileKind::An => "Recién nacidos",
        FileKind::Ct => "Control",
    }
}
