use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use eval_cli::pipeline::{EvaluationRun, ExtractionResult};
use eval_model::{ExperimentKind, MetricsRecord, MetricsView};
use eval_report::{round3, summarize};
use eval_standards::StandardsRegistry;

pub fn print_extraction(result: &ExtractionResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Round"),
        header_cell("Entries"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for round in &result.written {
        table.add_row(vec![
            Cell::new(round.number),
            Cell::new(round.entries),
            Cell::new(round.path.display()),
        ]);
    }
    for number in &result.skipped {
        table.add_row(vec![
            Cell::new(number),
            dim_cell("-"),
            Cell::new("no final list found").fg(Color::Yellow),
        ]);
    }
    println!("{table}");
}

pub fn print_evaluation(run: &EvaluationRun) {
    let evaluation = &run.evaluation;
    println!(
        "{} | {} | {}",
        evaluation.model,
        evaluation.dataset,
        evaluation.kind.label()
    );
    for view in MetricsView::ALL {
        println!();
        println!("{}:", view.label());
        println!("{}", metrics_table(&evaluation.records(view)));
    }
    match &run.output_dir {
        Some(dir) => println!("Reports: {} ({} files)", dir.display(), run.files.len()),
        None => println!("Dry run: no report files written"),
    }
}

fn metrics_table(records: &[MetricsRecord]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Round")];
    header.extend(MetricsRecord::COLUMNS.iter().map(|name| header_cell(name)));
    table.set_header(header);
    apply_table_style(&mut table);
    for idx in 0..=MetricsRecord::COLUMNS.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }

    for record in records {
        let mut row = vec![Cell::new(record.round)];
        row.extend(
            record
                .values()
                .iter()
                .map(|(_, value)| Cell::new(round3(*value))),
        );
        table.add_row(row);
    }
    let stats = summarize(records);
    let mut avg = vec![header_cell("AVG")];
    avg.extend(stats.iter().map(|s| optional_cell(s.mean)));
    table.add_row(avg);
    let mut spread = vec![header_cell("STD-DEV")];
    spread.extend(stats.iter().map(|s| optional_cell(s.std_dev)));
    table.add_row(spread);
    table
}

pub fn print_comparison(kind: ExperimentKind, files: &[PathBuf]) {
    println!("{} comparison:", kind.label());
    for file in files {
        println!("- {}", file.display());
    }
}

pub fn print_datasets(registry: &StandardsRegistry) {
    println!("Standards: {}", registry.root().display());
    println!("Fingerprint: {}", registry.fingerprint());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Gold classes"),
        header_cell("Silver classes"),
        header_cell("Gold associations"),
        header_cell("Silver associations"),
        header_cell("Synonym groups"),
        header_cell("Non-punish rules"),
    ]);
    apply_table_style(&mut table);
    for idx in 1..7 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for standards in registry.iter() {
        table.add_row(vec![
            Cell::new(standards.dataset.as_str()).add_attribute(Attribute::Bold),
            Cell::new(standards.classes.gold.len()),
            count_cell(standards.classes.silver.len()),
            Cell::new(standards.associations.gold.len()),
            count_cell(standards.associations.silver.len()),
            count_cell(standards.synonyms.len()),
            count_cell(standards.non_punish.len()),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(round3(value)).add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
