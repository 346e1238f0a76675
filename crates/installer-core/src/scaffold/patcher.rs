//! In-place text substitution in generated files

use crate::error::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Replace every occurrence of `search` with `replace`
pub fn replace_in_file(search: &str, replace: &str, path: &Path) -> Result<()> {
    replace_many_in_file(&[(search, replace)], path)
}

/// Apply several literal replacements, in order
pub fn replace_many_in_file(pairs: &[(&str, &str)], path: &Path) -> Result<()> {
    let original = fs::read_to_string(path)?;
    let updated = pairs
        .iter()
        .fold(original.clone(), |text, (search, replace)| text.replace(search, replace));

    if updated != original {
        fs::write(path, updated)?;
    }
    tracing::trace!(path = %path.display(), replacements = pairs.len(), "patched file");
    Ok(())
}

/// Replace every match of `pattern` with `replacement` (`$1`-style groups allowed)
pub fn regex_replace_in_file(pattern: &str, replacement: &str, path: &Path) -> Result<()> {
    let re = Regex::new(pattern)?;
    let original = fs::read_to_string(path)?;
    let updated = re.replace_all(&original, replacement);

    if updated != original {
        fs::write(path, updated.as_ref())?;
    }
    Ok(())
}
