//! Terminal tables for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use drawaloud_core::{StageMarker, StageStatus, StrokePoint};
use drawaloud_model::{PromptCatalog, ResponseMap};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn prompts_table(catalog: &PromptCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Id"),
        header_cell("Title"),
        header_cell("Draw"),
        header_cell("SNOMED"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for (index, prompt) in catalog.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&prompt.id).add_attribute(Attribute::Bold),
            Cell::new(&prompt.title),
            if prompt.allow_draw {
                Cell::new("yes").fg(Color::Green)
            } else {
                dim_cell("no")
            },
            optional_cell(prompt.snomed_code.as_deref()),
            Cell::new(&prompt.description),
        ]);
    }
    table
}

pub fn timeline_table(stages: &[StageMarker], responses: &ResponseMap, catalog: &PromptCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Prompt"),
        header_cell("Status"),
        header_cell("Strokes"),
        header_cell("Annotation"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for stage in stages {
        let strokes = catalog
            .get(stage.index)
            .and_then(|prompt| responses.get(&prompt.id))
            .map_or(0, |record| record.strokes.len());
        table.add_row(vec![
            Cell::new(stage.index + 1),
            Cell::new(&stage.label),
            status_cell(stage.status),
            Cell::new(strokes),
            optional_cell(stage.annotation.as_deref()),
        ]);
    }
    table
}

pub fn strokes_table(points: &[StrokePoint]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Drawn at"),
        header_cell("Stage"),
        header_cell("Prompt"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for point in points {
        table.add_row(vec![
            Cell::new(point.timestamp.format("%Y-%m-%d %H:%M:%S%.3f")),
            Cell::new(point.prompt_index + 1),
            Cell::new(&point.label),
        ]);
    }
    table
}

/// Per-prompt stroke counts of a valid stored mapping, in catalog order.
/// Stored ids missing from the catalog are listed last, dimmed.
pub fn stored_responses_table(responses: &ResponseMap, catalog: &PromptCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Prompt"),
        header_cell("Strokes"),
        header_cell("Reflection"),
        header_cell("Confirmed"),
        header_cell("Date"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);

    let known = catalog
        .iter()
        .filter_map(|prompt| responses.get(&prompt.id).map(|record| (true, record)));
    let unknown = responses
        .records()
        .filter(|record| !catalog.contains(&record.prompt_id))
        .map(|record| (false, record));
    for (in_catalog, record) in known.chain(unknown) {
        let id = if in_catalog {
            Cell::new(&record.prompt_id)
        } else {
            dim_cell(format!("{} (not in catalog)", record.prompt_id))
        };
        table.add_row(vec![
            id,
            Cell::new(record.strokes.len()),
            Cell::new(if record.reflection_text.is_empty() { "-" } else { "yes" }),
            Cell::new(if record.confirmed { "yes" } else { "-" }),
            optional_cell(record.date.as_deref()),
        ]);
    }
    table
}

fn status_cell(status: StageStatus) -> Cell {
    let cell = Cell::new(status.as_str());
    match status {
        StageStatus::Past => cell.fg(Color::DarkGrey),
        StageStatus::Current => cell.fg(Color::Cyan).add_attribute(Attribute::Bold),
        StageStatus::Future => cell,
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value.filter(|value| !value.is_empty()) {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
