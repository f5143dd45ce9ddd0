//! Handler manifest: external programs registered as format handlers.
//!
//! Формат (JSON):
//! {
//!   "load": [ {"ext":"pcx","program":"pcx2raw","args":["--quiet"]} ],
//!   "save": [ {"ext":"pcx","program":"raw2pcx"} ]
//! }
//!
//! Каждая запись превращается в command handler: программа запускается с `args`
//! и именем файла последним аргументом; успех = код выхода 0.
//! Ошибка запуска логируется и считается неуспехом.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::registry::{handler, Direction, FormatRegistry, Handler};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandlerManifest {
    #[serde(default)]
    pub load: Vec<CommandSpec>,
    #[serde(default)]
    pub save: Vec<CommandSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub ext: String,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl HandlerManifest {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("parse handler manifest")
    }

    pub fn entries(&self, dir: Direction) -> &[CommandSpec] {
        match dir {
            Direction::Load => &self.load,
            Direction::Save => &self.save,
        }
    }

    /// First spec for `ext` (case-insensitive), in file order.
    pub fn find(&self, dir: Direction, ext: &str) -> Option<&CommandSpec> {
        self.entries(dir)
            .iter()
            .find(|s| crate::ext::ext_eq(&s.ext, ext))
    }

    /// Register a command handler for every entry. Duplicate extensions keep
    /// the first entry, same as direct registration.
    pub fn apply(&self, reg: &mut FormatRegistry) -> Result<usize> {
        let mut n = 0usize;
        for dir in [Direction::Load, Direction::Save] {
            for spec in self.entries(dir) {
                reg.register(dir, &spec.ext, command_handler(spec.clone()))
                    .with_context(|| format!("register {} .{}", dir.as_str(), spec.ext))?;
                n += 1;
            }
        }
        Ok(n)
    }
}

pub fn load_manifest(path: &Path) -> Result<HandlerManifest> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    HandlerManifest::from_json(&bytes).with_context(|| format!("manifest {}", path.display()))
}

/// Handler that runs an external program on the filename.
pub fn command_handler(spec: CommandSpec) -> Handler {
    handler(move |_, filename| {
        let status = Command::new(&spec.program)
            .args(&spec.args)
            .arg(filename)
            .stdin(Stdio::null())
            .status();
        match status {
            Ok(s) if s.success() => true,
            Ok(s) => {
                warn!("{} exited with {} for {}", spec.program, s, filename);
                false
            }
            Err(e) => {
                warn!("spawn {} for {}: {}", spec.program, filename, e);
                false
            }
        }
    })
}
