use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use labsift_lib::models::LabReport;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dash_if_empty(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}

pub fn print_report(report: &LabReport) {
    println!("Report: {}", report.file_name);
    if let Some(patient) = &report.patient_name {
        println!("Patient: {patient}");
    }
    if let Some(date) = report.report_date {
        println!("Date: {date}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Parameter"),
        header_cell("Value"),
        header_cell("Unit"),
        header_cell("Range"),
        header_cell("Category"),
        header_cell("Flag"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for p in &report.parameters {
        let flag = if p.is_out_of_range() {
            Cell::new("OUT").fg(Color::Red).add_attribute(Attribute::Bold)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(&p.name),
            Cell::new(p.value()),
            Cell::new(dash_if_empty(&p.unit)),
            Cell::new(dash_if_empty(p.normal_range())),
            Cell::new(p.category.as_str()),
            flag,
        ]);
    }
    println!("{table}");

    let summary = &report.summary;
    println!(
        "{} parameters, {} out of range",
        summary.total, summary.out_of_range
    );
}
