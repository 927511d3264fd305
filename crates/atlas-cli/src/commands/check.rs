//! Check command implementation

use crate::cli::CheckArgs;
use crate::output::OutputWriter;
use crate::output_types::{CheckOutput, FileCheck};
use anyhow::{bail, Result};
use atlas_core::config::LayeredConfig;
use atlas_core::details::DetailsTable;
use atlas_core::validation::FileValidator;
use atlas_core::AtlasPipeline;
use atlas_geo::{load_boundaries, BoundaryReport};
use console::style;

pub fn execute(args: CheckArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let max_size_mb = config.max_file_size_mb.value;

    let files: Vec<FileCheck> = config
        .required_files()
        .into_iter()
        .map(|file| FileCheck {
            description: file.description.to_string(),
            path: file.path.display().to_string(),
            validation: FileValidator::validate_file(&file.path, max_size_mb),
        })
        .collect();

    if !output.is_json() {
        output.section("Required files");
        for file in &files {
            if file.validation.is_valid() {
                println!("{} {}: {}", style("✓").green(), file.description, file.path);
            } else {
                println!("{} {}: {}", style("✗").red(), file.description, file.validation.errors.join("; "));
            }
            for warning in &file.validation.warnings {
                println!("  {} {}", style("⚠").yellow(), warning);
            }
        }
    }

    let failures = files.iter().filter(|f| !f.validation.is_valid()).count();
    if failures > 0 {
        if output.is_json() {
            output.result(&files)?;
        }
        bail!(atlas_core::AtlasError::FileValidation {
            reason: format!("{} of {} required files failed validation", failures, files.len()),
        });
    }

    let pipeline = AtlasPipeline::load(config)?;
    let details = DetailsTable::load_optional(config.details_path())?;

    let boundaries = if args.verbose {
        let collection = load_boundaries(config.boundaries_path())?;
        Some(BoundaryReport::build(&collection, pipeline.zones()))
    } else {
        None
    };

    let cache = if args.verbose {
        pipeline.precompute();
        pipeline.cache_stats()
    } else {
        None
    };

    let check = CheckOutput {
        files,
        departements: pipeline.zones().len(),
        rules: pipeline.rules().len(),
        configurations: pipeline.configurations().len(),
        details: details.len(),
        boundaries,
        cache,
    };

    if output.is_json() {
        output.result(check)?;
        return Ok(());
    }

    output.section("Tables");
    output.kv("Départements", check.departements);
    output.kv("Rules", check.rules);
    output.kv("Configurations", check.configurations);
    output.kv("Details rows", check.details);

    if let Some(ref report) = check.boundaries {
        output.section("Boundaries");
        output.kv("Features", report.features);
        if report.is_clean() {
            output.kv("Coverage", "every département has exactly one boundary");
        } else {
            output.kv("Without code", report.without_code);
            output.kv("Without geometry", report.without_geometry);
            output.kv("Missing boundaries", list_or_none(&report.missing_boundaries));
            output.kv("Unknown codes", list_or_none(&report.unknown_codes));
        }
    }

    if let Some(stats) = check.cache {
        output.section("Cache");
        output.kv("Precomputed", format!("{}/{}", stats.entries, stats.capacity));
    }

    println!();
    output.success("All required files are valid");
    Ok(())
}

fn list_or_none(codes: &[String]) -> String {
    if codes.is_empty() {
        "none".to_string()
    } else {
        codes.join(", ")
    }
}
