//! Local secrets file (`KEY=value` lines).

use std::fs;
use std::path::Path;

/// Set `vars` in env-file `content`.
///
/// Existing assignments are replaced in place; everything else, comments
/// included, is kept. New keys are appended in the given order.
pub fn upsert_env(content: &str, vars: &[(&str, &str)]) -> String {
    let mut written = vec![false; vars.len()];
    let mut lines: Vec<String> = content
        .lines()
        .map(|line| {
            let key = line.split_once('=').map(|(k, _)| k.trim());
            match vars.iter().position(|(k, _)| Some(*k) == key) {
                Some(i) => {
                    written[i] = true;
                    format!("{}={}", vars[i].0, vars[i].1)
                }
                None => line.to_string(),
            }
        })
        .collect();

    for (i, (key, value)) in vars.iter().enumerate() {
        if !written[i] {
            lines.push(format!("{key}={value}"));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Upsert `vars` into the file at `path`, creating it when missing.
pub fn write_secrets_file(path: &Path, vars: &[(&str, &str)]) -> std::io::Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };
    fs::write(path, upsert_env(&existing, vars))?;
    tracing::info!(path = %path.display(), keys = vars.len(), "Secrets file updated");
    Ok(())
}
