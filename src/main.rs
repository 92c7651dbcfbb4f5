//! Export-list inspector entry point: CLI wiring, reporting, optional API.

mod cli;

use std::process;

use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use dss_exports::io::export::export_summary_csv;
use dss_exports::{ExportError, ExportListProperty, ExportListReader, ExportResult};

use crate::cli::Cli;

fn print_reader(reader: &ExportListReader) {
    println!("schema: {}", reader.schema());
    for class in reader.list_element_classes() {
        let properties = reader.list_element_properties(class).unwrap_or_default();
        println!("{class}: {}", properties.join(", "));
    }
    let publications = reader.publication_list();
    if !publications.is_empty() {
        println!("\npublications:");
        for entry in publications {
            println!("  {entry}");
        }
    }
}

fn print_property(prop: &ExportListProperty, cli: &Cli) {
    println!("{} {}", prop.element_class(), prop.property_name());
    println!("  store_values_type: {}", prop.store_values_type());
    println!("  publish:           {}", prop.publish());
    println!("  sample_interval:   {}", prop.sample_interval());
    println!("  window_size:       {}", prop.window_size());
    match (prop.limits(), prop.limits_filter()) {
        (Some(limits), Some(filter)) => {
            println!(
                "  limits:            [{}, {}] {filter}",
                limits.min(),
                limits.max()
            );
        }
        _ => println!("  limits:            none"),
    }
    println!("  names:             {}", prop.name_filter());

    if let Some(ref name) = cli.name {
        println!("  store name {name:?}: {}", prop.should_store_name(name));
    }
    if let Some(value) = cli.value {
        println!("  store value {value}: {}", prop.should_store_value(value));
    }
}

fn run(cli: &Cli) -> ExportResult<ExportListReader> {
    let path = cli.export_list_path().unwrap_or_else(|e| e.exit());
    let reader = ExportListReader::new(&path)?;

    match (&cli.class, &cli.property) {
        (Some(class), Some(property)) => {
            print_property(reader.get_element_property(class, property)?, cli);
        }
        (Some(class), None) => {
            for property in reader.list_element_properties(class)? {
                println!("{property}");
            }
        }
        _ => print_reader(&reader),
    }

    if let Some(ref out) = cli.summary_out {
        export_summary_csv(&reader, out).map_err(|source| ExportError::Io {
            path: out.clone(),
            source,
        })?;
        eprintln!("Summary written to {}", out.display());
    }

    Ok(reader)
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to install logger: {e}");
    }

    #[cfg_attr(not(feature = "api"), expect(unused_variables))]
    let reader = match run(&cli) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(dss_exports::api::AppState { reader });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(dss_exports::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
