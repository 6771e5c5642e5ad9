//! Console summary of a validation run.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rips_model::ErrorCategory;

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    let stats = &result.report.stats;
    println!("Informe: {}", result.report_path.display());
    for path in &result.corrected_paths {
        println!("Archivo corregido: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Categoría"),
        header_cell("Errores"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for category in [
        ErrorCategory::Structural,
        ErrorCategory::FieldFormat,
        ErrorCategory::Referential,
        ErrorCategory::Integrity,
        ErrorCategory::Coherence,
        ErrorCategory::System,
    ] {
        let count = result.report.count_by_category(category);
        table.add_row(vec![
            Cell::new(category.as_str()),
            count_cell(count, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.report.errors.len()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    println!(
        "Archivos: {}  Registros: {}  Válidos: {}  Inválidos: {}",
        stats.files_processed,
        stats.records_processed,
        stats.valid_records,
        stats.invalid_records
    );
    println!(
        "CIE10 inválidos: {}  Atenciones duplicadas: {}  Correcciones: {} registradas, {} aplicadas",
        stats.cie10_invalid,
        stats.duplicate_attentions,
        result.report.corrections.len(),
        stats.corrections_applied
    );

    if !result.invalid_cie10_codes.is_empty() {
        let mut codes: Vec<(&String, &usize)> = result.invalid_cie10_codes.iter().collect();
        codes.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let listed: Vec<String> = codes
            .iter()
            .take(5)
            .map(|(code, count)| format!("{code} ({count})"))
            .collect();
        println!("Códigos CIE10 inválidos más frecuentes: {}", listed.join(", "));
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(color)
    }
}
