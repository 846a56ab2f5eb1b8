//! CLI tool for rowview - computes the rendered window of a table and outputs JSON
//!
//! Usage:
//!   rowview_cli --rows 100000 --scroll 2000              # Generated data, frame JSON to stdout
//!   rowview_cli data.json --filter active --sort amount:desc
//!   rowview_cli data.json --events script.json -o out.json
//!
//! Options:
//!   --rows N          Generate N user rows instead of reading a file
//!   --seed N          Seed for generated rows (default 1)
//!   --config FILE     Table configuration JSON
//!   --filter TEXT     Global filter text
//!   --column-filter FIELD=TEXT   Per-column filter (repeatable)
//!   --sort FIELD[:asc|:desc]
//!   --scroll PX       Scroll position
//!   --events FILE     JSON array of events replayed after the options above
//!   -o FILE           Write the frame to FILE instead of stdout
//!
//! Log verbosity follows `RUST_LOG` (default `info`), written to stderr.

#![allow(clippy::exit)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use rowview::{ColumnSet, Dataset, Result, SortKey, TableConfig, TableEvent, TableView};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Options {
    input: Option<String>,
    rows: Option<u32>,
    seed: u64,
    config: Option<String>,
    filter: Option<String>,
    column_filters: Vec<(String, String)>,
    sort: Option<SortKey>,
    scroll: Option<f64>,
    events: Option<String>,
    output: Option<String>,
}

fn usage() -> ! {
    eprintln!(
        "Usage: rowview_cli [<data.json> | --rows N] [--seed N] [--config FILE] \
         [--filter TEXT] [--column-filter FIELD=TEXT] [--sort FIELD[:desc]] [--scroll PX] [--events FILE] [-o output.json]"
    );
    std::process::exit(1);
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn parse_args(args: &[String]) -> Options {
    let mut opts = Options {
        seed: 1,
        ..Options::default()
    };
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || args.get(i + 1).cloned().unwrap_or_else(|| usage());
        match flag {
            "--rows" => {
                opts.rows = Some(value().parse().unwrap_or_else(|_| usage()));
                i += 2;
            }
            "--seed" => {
                opts.seed = value().parse().unwrap_or_else(|_| usage());
                i += 2;
            }
            "--config" => {
                opts.config = Some(value());
                i += 2;
            }
            "--filter" => {
                opts.filter = Some(value());
                i += 2;
            }
            "--column-filter" => {
                let pair = value();
                let (field, text) = pair.split_once('=').unwrap_or_else(|| usage());
                opts.column_filters.push((field.to_string(), text.to_string()));
                i += 2;
            }
            "--sort" => {
                opts.sort = Some(SortKey::parse(&value()).unwrap_or_else(|| usage()));
                i += 2;
            }
            "--scroll" => {
                opts.scroll = Some(value().parse().unwrap_or_else(|_| usage()));
                i += 2;
            }
            "--events" => {
                opts.events = Some(value());
                i += 2;
            }
            "-o" => {
                opts.output = Some(value());
                i += 2;
            }
            "-h" | "--help" => usage(),
            other if other.starts_with('-') => usage(),
            other => {
                opts.input = Some(other.to_string());
                i += 1;
            }
        }
    }
    if opts.input.is_none() && opts.rows.is_none() {
        usage();
    }
    opts
}

fn read(path: &str) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

fn read_or_exit(path: &str) -> String {
    read(path).unwrap_or_else(|e| fail(&format!("Error reading {}: {}", path, e)))
}

fn write_output(json: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, json)?;
            eprintln!("Written: {}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let opts = parse_args(&args);

    let config = match &opts.config {
        Some(path) => TableConfig::from_json(&read_or_exit(path))
            .unwrap_or_else(|e| fail(&format!("Error in config {}: {}", path, e))),
        None => TableConfig::default(),
    };

    let (dataset, columns) = match (&opts.input, opts.rows) {
        (Some(path), _) => {
            let dataset = Dataset::from_json(&read_or_exit(path))
                .unwrap_or_else(|e| fail(&format!("Error loading {}: {}", path, e)));
            let columns = ColumnSet::from_fields(&dataset.field_names());
            (dataset, columns)
        }
        (None, Some(count)) => (Dataset::generate(count, opts.seed), ColumnSet::user_defaults()),
        (None, None) => usage(),
    };
    info!(rows = dataset.len(), "dataset ready");

    let mut table = TableView::new(dataset, &config)
        .unwrap_or_else(|e| fail(&format!("Error: {}", e)))
        .with_columns(columns);

    if let Some(text) = &opts.filter {
        table.set_filter(text);
    }
    for (field, text) in &opts.column_filters {
        table.set_column_filter(field, text);
    }
    if let Some(sort) = opts.sort.clone() {
        table.set_sort(Some(sort));
    }
    if let Some(scroll_top) = opts.scroll {
        table.on_scroll(scroll_top);
    }
    if let Some(path) = &opts.events {
        let events = TableEvent::parse_script(&read_or_exit(path))
            .unwrap_or_else(|e| fail(&format!("Error in events {}: {}", path, e)));
        if let Err(e) = table.dispatch_all(&events) {
            fail(&format!("Error replaying events: {}", e));
        }
        info!(events = events.len(), "replayed events");
    }

    let window = table.window();
    info!(
        processed = table.processed_len(),
        start = window.start_index,
        end = window.end_index,
        selected = table.selection().count(),
        "frame computed"
    );

    let json = match serde_json::to_string_pretty(&table.frame()) {
        Ok(j) => j,
        Err(e) => fail(&format!("Error serializing JSON: {}", e)),
    };

    if let Err(e) = write_output(&json, opts.output.as_deref()) {
        fail(&format!("Error writing output: {}", e));
    }
}
