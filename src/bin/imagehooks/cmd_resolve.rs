use anyhow::Result;
use std::path::PathBuf;

use ImageHooks::ext::extract_extension;
use ImageHooks::manifest::load_manifest;
use ImageHooks::{Direction, FormatRegistry};

pub fn exec(manifest: PathBuf, file: String, save: bool) -> Result<()> {
    let m = load_manifest(&manifest)?;
    let mut reg = FormatRegistry::new();
    m.apply(&mut reg)?;

    let dir = if save { Direction::Save } else { Direction::Load };
    let Some(ext) = extract_extension(&file) else {
        println!("{}: no extension", file);
        return Ok(());
    };

    match reg.lookup(dir, ext) {
        Some(entry) => {
            // Команда берётся из манифеста: реестр хранит только замыкание.
            let spec = m.find(dir, entry.ext());
            match spec {
                Some(s) => println!(
                    "{} -> {} .{} => {} {}",
                    file,
                    dir.as_str(),
                    entry.ext(),
                    s.program,
                    s.args.join(" ")
                ),
                None => println!("{} -> {} .{}", file, dir.as_str(), entry.ext()),
            }
        }
        None => println!("{}: no {} handler for .{}", file, dir.as_str(), ext),
    }
    Ok(())
}
