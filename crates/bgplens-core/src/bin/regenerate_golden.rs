use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bgplens_core::{AnalysisOptions, analyze};
use time::OffsetDateTime;

const INPUT_NAMES: [&str; 2] = ["input.json", "input.txt"];

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(input) = INPUT_NAMES
            .iter()
            .map(|name| path.join(name))
            .find(|input| input.exists())
        else {
            continue;
        };
        let output = path.join("expected_entries.json");
        regenerate_one(&input, &output)?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, output: &Path) -> Result<(), String> {
    let raw =
        fs::read(input).map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    // Goldens are stamped at the epoch so they never depend on the clock.
    let entries = analyze(&raw, &AnalysisOptions::default(), OffsetDateTime::UNIX_EPOCH)
        .map_err(|err| format!("analysis failed for {}: {}", input.display(), err))?;
    let mut json = serde_json::to_string_pretty(&entries)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
