//! Remote mod directory accessed through the system `ssh` client.
//!
//! Every listing or fetch is a single blocking `ssh <host> <command>` call, so
//! the user's own ssh configuration (keys, aliases, jump hosts) applies.

use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ToolError};
use crate::inventory::{ArchiveEntry, ArchiveSource};

/// Host and directory holding the remote mods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTarget {
    pub host: String,
    pub port: Option<u16>,
    pub dir: String,
}

impl RemoteTarget {
    /// Joins a file name onto the remote directory using `/`.
    pub fn path_of(&self, file_name: &str) -> String {
        if self.dir.ends_with('/') {
            format!("{}{file_name}", self.dir)
        } else {
            format!("{}/{file_name}", self.dir)
        }
    }
}

impl std::fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{port}:{}", self.host, self.dir),
            None => write!(f, "{}:{}", self.host, self.dir),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoteSource {
    target: RemoteTarget,
    metadata_entries: Vec<String>,
}

impl RemoteSource {
    pub fn new(target: RemoteTarget, metadata_entries: Vec<String>) -> Self {
        Self {
            target,
            metadata_entries,
        }
    }

    pub fn target(&self) -> &RemoteTarget {
        &self.target
    }

    /// Builds the `ssh` invocation running `remote_command` on the host.
    pub fn ssh_command(&self, remote_command: &str) -> Command {
        let mut command = Command::new("ssh");
        if let Some(port) = self.target.port {
            command.arg("-p").arg(port.to_string());
        }
        command
            .args(["-o", "BatchMode=yes", "-o", "ConnectTimeout=10"])
            .arg(&self.target.host)
            .arg(remote_command)
            .stdin(Stdio::null());
        command
    }

    fn run(&self, remote_command: &str, label: &str) -> Result<Vec<u8>> {
        debug!(host = %self.target.host, command = remote_command, "running remote command");
        let output = self
            .ssh_command(remote_command)
            .output()
            .map_err(|error| ToolError::fetch(label, format!("failed to run ssh: {error}")))?;

        if !output.status.success() {
            return Err(ToolError::fetch(
                label,
                format!(
                    "remote command exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }
        Ok(output.stdout)
    }
}

impl ArchiveSource for RemoteSource {
    fn describe(&self) -> String {
        self.target.to_string()
    }

    fn list_entries(&self) -> Result<Vec<ArchiveEntry>> {
        let listing = self.run(
            &format!("ls -1 -- {}", shell_quote(&self.target.dir)),
            &self.describe(),
        )?;
        Ok(parse_listing(&String::from_utf8_lossy(&listing))
            .into_iter()
            .map(|file_name| ArchiveEntry {
                path: self.target.path_of(&file_name),
                file_name,
            })
            .collect())
    }

    fn fetch_metadata(&self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        let label = format!("{}:{}", self.target.host, entry.path);
        let mut last_error = None;

        for name in &self.metadata_entries {
            let command = format!("unzip -p {} {}", shell_quote(&entry.path), shell_quote(name));
            match self.run(&command, &label) {
                Ok(raw) if !raw.is_empty() => return Ok(raw),
                Ok(_) => {
                    last_error = Some(ToolError::fetch(&label, format!("entry {name} is empty")));
                }
                Err(error) => last_error = Some(error),
            }
        }

        Err(last_error
            .unwrap_or_else(|| ToolError::fetch(&label, "no metadata entries configured")))
    }
}

/// Splits `ls -1` output into entry names, dropping blank lines.
pub fn parse_listing(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Quotes `value` for a POSIX shell using single quotes.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
