#![allow(dead_code)]

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use modsync::inventory::{ArchiveEntry, ArchiveSource};
use modsync::model::{ArchiveRecord, HeuristicIdentity, ModDescriptor};
use modsync::{Result, ToolError};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const EXAMPLE_MODS_TOML: &str = r#"
modLoader="javafml" #mandatory
loaderVersion="[47,)" #mandatory
license="MIT"

# The first mod
[[mods]] #mandatory
modId="examplemod" #mandatory
version="1.0.0"
displayName="Example Mod"
description='''
Adds examples.
'''
authors="Someone"
logoFile="logo.png"

[[dependencies.examplemod]]
    modId="forge"
    mandatory=true
    versionRange="[47,)"
    ordering="NONE"
    side="BOTH"
"#;

pub fn mods_toml(mod_ids: &[&str]) -> String {
    let mut text = String::from("modLoader=\"javafml\"\nloaderVersion=\"[47,)\"\nlicense=\"MIT\"\n");
    for mod_id in mod_ids {
        text.push_str(&format!(
            "[[mods]]\nmodId=\"{mod_id}\"\nversion=\"1.0.0\"\ndisplayName=\"{mod_id}\"\ndescription=\"{mod_id} description\"\n"
        ));
    }
    text
}

/// Writes a jar containing the given entries.
pub fn write_jar(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).expect("jar created");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, contents) in entries {
        writer.start_file(*name, options).expect("entry started");
        writer
            .write_all(contents.as_bytes())
            .expect("entry written");
    }
    writer.finish().expect("jar finished");
}

pub fn descriptor(mod_id: &str) -> ModDescriptor {
    ModDescriptor {
        mod_id: mod_id.to_string(),
        version: "1.0.0".to_string(),
        display_name: mod_id.to_string(),
        description: String::new(),
        authors: None,
        logo_file: None,
    }
}

pub fn structured(file_name: &str, mod_ids: &[&str]) -> ArchiveRecord {
    ArchiveRecord::with_mods(
        file_name,
        format!("/mods/{file_name}"),
        mod_ids.iter().map(|id| descriptor(id)).collect(),
    )
}

pub fn guessed(file_name: &str, name: &str) -> ArchiveRecord {
    ArchiveRecord::with_heuristic(
        file_name,
        format!("/mods/{file_name}"),
        Some(HeuristicIdentity {
            name: name.to_string(),
            version: None,
        }),
    )
}

pub fn unidentified(file_name: &str) -> ArchiveRecord {
    ArchiveRecord::with_heuristic(file_name, format!("/mods/{file_name}"), None)
}

/// In-memory source: `None` metadata makes the fetch fail.
#[derive(Default)]
pub struct FakeSource {
    pub names: Vec<String>,
    pub metadata: HashMap<String, Option<String>>,
    pub fail_listing: bool,
}

impl FakeSource {
    pub fn with(mut self, name: &str, metadata: Option<&str>) -> Self {
        self.names.push(name.to_string());
        self.metadata
            .insert(name.to_string(), metadata.map(str::to_string));
        self
    }
}

impl ArchiveSource for FakeSource {
    fn describe(&self) -> String {
        "fake".to_string()
    }

    fn list_entries(&self) -> Result<Vec<ArchiveEntry>> {
        if self.fail_listing {
            return Err(ToolError::Fetch {
                path: "fake".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(self
            .names
            .iter()
            .map(|name| ArchiveEntry {
                file_name: name.clone(),
                path: format!("fake/{name}"),
            })
            .collect())
    }

    fn fetch_metadata(&self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        match self.metadata.get(&entry.file_name) {
            Some(Some(text)) => Ok(text.clone().into_bytes()),
            _ => Err(ToolError::Fetch {
                path: entry.path.clone(),
                reason: "unzip exited with status 11".to_string(),
            }),
        }
    }
}
