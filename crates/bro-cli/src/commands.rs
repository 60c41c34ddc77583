use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use bro_codegen::generate_lua_script;
use bro_header::load_header;

/// Read the header of `path` and render its decoder script.
pub fn generate_script(path: &Path) -> Result<String> {
    let span = info_span!("generate", path = %path.display());
    let _guard = span.enter();

    let header = load_header(path)
        .with_context(|| format!("read Bro header from {}", path.display()))?;
    info!(
        record_type = %header.record_type,
        fields = header.field_count(),
        "parsed header"
    );
    let script = generate_lua_script(&header).context("render lua script")?;
    Ok(script)
}

/// Generate the script for `path` and write it to stdout in one go.
pub fn run_generate(path: &Path) -> Result<()> {
    let script = generate_script(path)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(script.as_bytes())
        .context("write script to stdout")?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}
