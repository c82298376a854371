use anyhow::Result;
use detox_config::Config;

use crate::cli::PreviewArgs;
use crate::settings::RunSettings;

pub fn handle(args: PreviewArgs, config: &Config) -> Result<()> {
    let settings = RunSettings::resolve(&args.policy, config).map_err(detox_core::Error::from)?;
    let sanitizer = settings.build_sanitizer()?;

    let preview = sanitizer.preview(&args.text)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    println!("Tokens ({}):", preview.tokens.len());
    for token in &preview.tokens {
        let marker = match &token.replacement {
            Some(replacement) => format!(" -> {replacement:?}"),
            None => String::new(),
        };
        println!(
            "  {:>4}..{:<4} gap {}  {:?} {:?}{}",
            token.span.start, token.span.end, token.gap, token.token, token.source, marker
        );
    }
    println!("\nCleaned:\n{}", preview.cleaned);

    Ok(())
}
