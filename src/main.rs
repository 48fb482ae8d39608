//! Command-line interface for xsd2proto

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use xsd2proto::converter::{ConversionSummary, Converter, ConverterConfig, FieldNamingStyle};
#[cfg(feature = "cli")]
use xsd2proto::proto::{render, RenderOptions};
#[cfg(feature = "cli")]
use xsd2proto::xsd::{Schema, SchemaResolver};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsd2proto")]
#[command(author, version, about = "Convert XSD files to Protocol Buffer definitions", long_about = None)]
#[command(after_help = "Examples:
  xsd2proto schema.xsd                          Convert schema.xsd to schema.proto
  xsd2proto -o output.proto schema.xsd          Convert with custom output path
  xsd2proto -p \"example.com/proto\" schema.xsd   Convert with go_package option
  xsd2proto --json schema.xsd                   Print the converted model as JSON")]
struct Cli {
    /// Path to the XSD input file
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file path (default: input file name with .proto extension)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Go package option for the generated proto file
    #[arg(short = 'p', long = "package", value_name = "GO_PACKAGE")]
    go_package: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable the auto-generation header comment
    #[arg(long)]
    no_header: bool,

    /// Field naming style: snake, camel or pascal
    #[arg(long, value_name = "STYLE", default_value_t = FieldNamingStyle::Snake)]
    field_style: FieldNamingStyle,

    /// Fail on references to types that are neither built-in nor declared
    #[arg(long)]
    strict: bool,

    /// Print the converted model as JSON instead of writing a .proto file
    #[arg(long)]
    json: bool,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let Some(input) = cli.input.clone() else {
        eprintln!("Error: Please provide exactly one XSD input file");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        std::process::exit(1);
    };

    if !input.exists() {
        eprintln!("Error: Input file '{}' does not exist", input.display());
        std::process::exit(1);
    }

    if let Err(e) = cmd_convert(&cli, &input) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if !cli.verbose && !cli.json {
        println!("Successfully converted {}", input.display());
    }
}

#[cfg(feature = "cli")]
fn cmd_convert(cli: &Cli, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if cli.verbose {
        println!("Converting {} to protobuf...", input.display());
    }

    let schema = SchemaResolver::new()
        .resolve_file(input)
        .map_err(|e| format!("failed to parse XSD file: {}", e))?;
    schema.validate()?;

    if cli.verbose {
        print_schema_summary(&schema);
    }

    let mut config = ConverterConfig::new()
        .with_field_style(cli.field_style)
        .with_strict_types(cli.strict);
    if let Some(go_package) = &cli.go_package {
        config = config.with_option("go_package", go_package.clone());
    }

    let (file, summary) = Converter::with_config(config)
        .convert_with_summary(&schema)
        .map_err(|e| format!("failed to convert schema: {}", e))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&file)?);
        return Ok(());
    }

    if cli.verbose {
        print_conversion_summary(&summary);
    }

    let mut options = RenderOptions::new().with_header(!cli.no_header);
    if let Some(name) = input.file_name() {
        options = options.with_source(name.to_string_lossy());
    }
    let content = render(&file, &options);

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| input.with_extension("proto"));
    write_output(&output_path, &content)
        .map_err(|e| format!("failed to write output file: {}", e))?;

    if cli.verbose {
        println!("Successfully generated {}", output_path.display());
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_schema_summary(schema: &Schema) {
    println!(
        "Successfully parsed XSD schema with {} elements, {} complex types, {} simple types",
        schema.elements.len(),
        schema.complex_types.len(),
        schema.simple_types.len()
    );
    if !schema.imported_schemas.is_empty() {
        println!(
            "  Loaded {} imported/included schemas (not converted)",
            schema.imported_schemas.len()
        );
    }
}

#[cfg(feature = "cli")]
fn print_conversion_summary(summary: &ConversionSummary) {
    println!(
        "Generated {} enums and {} messages",
        summary.enums, summary.messages
    );
    for wrapper in &summary.collapsed_wrappers {
        println!("  Collapsed {} into repeated fields", wrapper);
    }
    for (original, renamed) in &summary.renamed {
        println!("  Renamed {} -> {}", original, renamed);
    }
}

#[cfg(feature = "cli")]
fn write_output(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, content)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
