use anyhow::Result;
use std::path::PathBuf;

use ImageHooks::manifest::load_manifest;
use ImageHooks::{Direction, FormatRegistry};

pub fn exec(manifest: PathBuf, json: bool) -> Result<()> {
    let m = load_manifest(&manifest)?;
    let mut reg = FormatRegistry::new();
    let applied = m.apply(&mut reg)?;

    let load: Vec<&str> = reg.extensions(Direction::Load).collect();
    let save: Vec<&str> = reg.extensions(Direction::Save).collect();

    if json {
        let v = serde_json::json!({ "load": load, "save": save });
        println!("{}", serde_json::to_string_pretty(&v).unwrap_or_else(|_| "{}".to_string()));
        return Ok(());
    }

    println!("manifest entries: {}", applied);
    println!("load ({}): {}", load.len(), load.join(", "));
    println!("save ({}): {}", save.len(), save.join(", "));
    Ok(())
}
