use anyhow::Result;
use std::path::PathBuf;

use ImageHooks::manifest::load_manifest;
use ImageHooks::{Dispatch, ImageLib};

/// Returns whether a handler ran and reported success.
pub fn exec(manifest: PathBuf, file: String, save: bool, json: bool) -> Result<bool> {
    let m = load_manifest(&manifest)?;
    let mut lib = ImageLib::new();
    m.apply(lib.registry_mut())?;

    let outcome = if save {
        lib.dispatch_save(&file)
    } else {
        lib.dispatch_load(&file)
    };
    let ok = outcome.succeeded();

    if json {
        let v = serde_json::json!({
            "file": file,
            "direction": if save { "save" } else { "load" },
            "outcome": outcome.as_str(),
            "ok": ok,
        });
        println!("{}", v);
    } else {
        match outcome {
            Dispatch::Handled(r) => println!("{}: handled, ok={}", file, r),
            other => println!("{}: {}", file, other.as_str()),
        }
    }

    Ok(ok)
}
