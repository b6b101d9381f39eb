//! Tokens command - dump the token stream of one file.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;

use crate::tokens::{PhpTokenizer, TokenStream};

pub fn run(file: &Path) -> anyhow::Result<ExitCode> {
    let code = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let mut tokenizer = PhpTokenizer::new()?;
    let tokens = tokenizer.tokenize(&code, file)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_tokens(&mut out, &tokens)?;
    Ok(ExitCode::SUCCESS)
}

fn write_tokens(out: &mut impl Write, tokens: &TokenStream) -> std::io::Result<()> {
    for token in tokens.iter() {
        let bracket = tokens
            .matching_bracket(token.position)
            .map(|m| format!("-> {m}"))
            .unwrap_or_default();
        writeln!(
            out,
            "{:>6}  {:<20} {:>5}:{:<4} {:<9} {:?}",
            token.position,
            token.kind.name(),
            token.line,
            token.column,
            bracket,
            token.text.as_ref()
        )?;
    }
    Ok(())
}
