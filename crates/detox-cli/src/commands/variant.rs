use anyhow::{Context, Result};
use detox_config::Config;
use std::fs::File;
use std::io::BufReader;

use crate::cli::VariantArgs;
use crate::settings::RunSettings;

pub fn handle(args: VariantArgs, config: &Config) -> Result<()> {
    // Settings first: a bad policy must fail before the output file exists
    let settings = RunSettings::resolve(&args.policy, config).map_err(detox_core::Error::from)?;
    tracing::info!(
        strategy = %settings.strategy,
        classes = %settings.class_filter,
        match_on = %settings.match_target,
        "Resolved run settings"
    );

    let sanitizer = settings.build_sanitizer()?;

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input {}", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("Failed to create output {}", args.output.display()))?;

    let summary = sanitizer.run(BufReader::new(input), output)?;

    if args.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("✓ Wrote {}", args.output.display());
        println!("  Records: {}", summary.records);
        println!("  Sanitized: {}", summary.sanitized);
        println!("  Passed through: {}", summary.passed_through);
        println!("  Tokens replaced: {}", summary.tokens_replaced);
        println!("  Output digest: {}", summary.output_digest);
    }

    Ok(())
}
