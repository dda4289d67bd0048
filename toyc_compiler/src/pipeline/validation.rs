/// Validate that every stage has its codes registered
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;
    crate::lexical::init_lexical_analysis_logging()?;

    let stage_codes = [
        crate::logging::codes::comments::STRAY_TERMINATOR,
        crate::logging::codes::comments::UNTERMINATED_BLOCK,
        crate::logging::codes::structure::EMPTY_TREE,
        crate::logging::codes::structure::NEGATIVE_ARRAY_SIZE,
        crate::logging::codes::structure::RESERVED_WORD_AS_NAME,
        crate::logging::codes::structure::TOO_MANY_NODES,
        crate::logging::codes::symbols::DUPLICATE_LOCAL,
        crate::logging::codes::symbols::DUPLICATE_GLOBAL,
        crate::logging::codes::symbols::TOO_MANY_SYMBOLS,
        crate::logging::codes::symbols::INVALID_ARRAY_SIZE,
        crate::logging::codes::system::OUTPUT_WRITE_FAILURE,
    ];
    crate::logging::codes::ensure_registered(&stage_codes)?;

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 5
    );

    Ok(())
}
