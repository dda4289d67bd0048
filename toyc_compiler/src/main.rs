use std::env;
use std::path::Path;
use toyc_compiler::config::{ReportKind, RuntimeConfig};
use toyc_compiler::{logging, pipeline, report};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("toyc");

    if args.len() == 2 && args[1] == "--help" {
        print_help(program);
        return Ok(());
    }

    if args.len() != 2 {
        eprintln!("Usage: {} <input.c>", program);
        eprintln!("       {} --help", program);
        std::process::exit(1);
    }

    let config = RuntimeConfig::from_env()?;

    // Initialize global logging system
    logging::init_global_logging_with_preferences(config.logging.clone())?;

    // Validate pipeline configuration
    pipeline::validate_pipeline()?;

    process_single_file(&args[1], &config)
}

fn print_help(program_name: &str) {
    println!("toyc v{}", env!("CARGO_PKG_VERSION"));
    println!("Front end for the toyc teaching language");
    println!();
    println!("USAGE:");
    println!("    {} <input.c>", program_name);
    println!();
    println!("OUTPUT:");
    println!("    <dir>/output-<name>.txt holds the requested listing, or the first");
    println!("    diagnostic found. Missing or empty input produces no output file.");
    println!();
    println!("ENVIRONMENT:");
    println!("    TOYC_REPORT_KIND                   symbols (default), tokens or cst");
    println!("    TOYC_REPORT_WRITE_CLEANED_SOURCE   also write <name>-comments_replaced_with_white_space.c");
    println!("    TOYC_LEXICAL_CONTEXTUAL_SIGNS      treat +/- after an operand as binary");
    println!("    TOYC_RUNTIME_CONFIG                path to a TOML runtime configuration");
    println!();
    println!("BUILD:");
    for line in toyc_compiler::config::build_info::source_info().lines() {
        println!("    {}", line);
    }
}

fn process_single_file(
    file_path: &str,
    config: &RuntimeConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = pipeline::process_file_with_config(file_path, config);

    if let Err(ref error) = outcome {
        if error.is_fatal() {
            eprintln!("FAILED: {}", error);
            std::process::exit(1);
        }
    }

    if let Some(text) = report_text(&outcome, config.report.report_kind) {
        report::write_report(&report::output_path_for(Path::new(file_path)), &text)?;
    }

    Ok(())
}

/// What goes into the output file, or `None` when nothing is written
fn report_text(
    outcome: &Result<pipeline::PipelineResult, pipeline::PipelineError>,
    kind: ReportKind,
) -> Option<String> {
    match outcome {
        Ok(result) => Some(result.render(kind)).filter(|text| !text.is_empty()),
        Err(error) => error.report_line(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toyc_compiler::config::LexicalPreferences;

    fn run(source: &str) -> Result<pipeline::PipelineResult, pipeline::PipelineError> {
        pipeline::process_source_with_preferences(
            source,
            LexicalPreferences {
                contextual_signs: false,
                collect_detailed_metrics: false,
            },
        )
    }

    #[test]
    fn test_report_text_for_listing() {
        let text = report_text(&run("bool ready;"), ReportKind::Symbols).unwrap();
        assert!(text.starts_with("IDENTIFIER_NAME: ready\n"));
    }

    #[test]
    fn test_report_text_for_diagnostic() {
        let text = report_text(&run("char s = \"open;"), ReportKind::Symbols).unwrap();
        assert_eq!(text, "Syntax error on line 1: unterminated string quote.\n");
    }

    #[test]
    fn test_no_report_for_empty_program() {
        assert_eq!(report_text(&run("   \n"), ReportKind::Cst), None);
    }

    #[test]
    fn test_no_report_for_empty_symbol_table() {
        assert_eq!(report_text(&run("x = 1;"), ReportKind::Symbols), None);
    }
}
