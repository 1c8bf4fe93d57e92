use anyhow::{Context, Result};
use comfy_table::Table;

use labsift_lib::config::ExtractorConfig;
use labsift_lib::models::{Category, TAXONOMY_VERSION};
use labsift_lib::pipeline::extraction::{is_out_of_range, LabExtractor};
use labsift_lib::pipeline::source::{PagedTextSource, PlainTextSource, TextSource};

use crate::cli::{CheckArgs, ExtractArgs, OutputFormatArg};
use crate::summary::{apply_table_style, print_report};

pub fn run_extract(args: &ExtractArgs) -> Result<()> {
    let config = ExtractorConfig::load_or_default(args.config.as_deref())
        .context("load extractor config")?;

    let text = match args.files.as_slice() {
        [single] => PlainTextSource::new(single)
            .read_text()
            .with_context(|| format!("read {}", single.display()))?,
        files => PagedTextSource::new(files.iter().map(PlainTextSource::new).collect())
            .read_text()
            .context("read report pages")?,
    };

    let file_name = args
        .files
        .first()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let extracted_at = chrono::Local::now().naive_local();
    let report = LabExtractor::new(config).extract_report(&text, &file_name, extracted_at);

    match args.format {
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
        OutputFormatArg::Table => print_report(&report),
    }
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let out = is_out_of_range(&args.value, &args.range);
    println!("{}", if out { "out of range" } else { "in range" });
    Ok(())
}

pub fn run_categories() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Category"]);
    apply_table_style(&mut table);
    for (index, category) in Category::ALL.iter().enumerate() {
        table.add_row(vec![(index + 1).to_string(), category.as_str().to_string()]);
    }
    println!("Taxonomy v{TAXONOMY_VERSION}");
    println!("{table}");
    Ok(())
}
