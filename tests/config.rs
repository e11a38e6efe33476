use std::fs;
use std::path::PathBuf;

use modsync::ToolError;
use modsync::config::FileConfig;
use modsync::io::DEFAULT_METADATA_ENTRIES;
use modsync::io::remote::{RemoteSource, RemoteTarget, parse_listing, shell_quote};
use modsync::reconcile::DEFAULT_THRESHOLD;
use tempfile::tempdir;

fn complete() -> FileConfig {
    FileConfig {
        local_dir: Some(PathBuf::from("/home/player/mods")),
        remote_host: Some("server".to_string()),
        remote_dir: Some("/srv/minecraft/mods".to_string()),
        ..FileConfig::default()
    }
}

#[test]
fn config_file_is_loaded_from_toml() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("modsync.toml");
    fs::write(
        &path,
        "local_dir = \"/home/player/mods\"\nremote_host = \"mc@server\"\nremote_dir = \"/srv/mods\"\nssh_port = 2222\nthreshold = 0.6\n",
    )
    .expect("config written");

    let settings = FileConfig::load(&path)
        .expect("config loaded")
        .into_settings()
        .expect("settings valid");

    assert_eq!(settings.local_dir, PathBuf::from("/home/player/mods"));
    assert_eq!(settings.remote.host, "mc@server");
    assert_eq!(settings.remote.port, Some(2222));
    assert_eq!(settings.remote.dir, "/srv/mods");
    assert_eq!(settings.options.threshold, 0.6);
    assert_eq!(settings.metadata_entries, DEFAULT_METADATA_ENTRIES);
}

#[test]
fn unknown_keys_are_rejected() {
    let error = FileConfig::parse("remote = \"server\"\n").expect_err("unknown key");

    assert!(matches!(error, ToolError::ConfigParse(_)));
}

#[test]
fn command_line_values_override_the_file() {
    let overrides = FileConfig {
        remote_host: Some("other".to_string()),
        threshold: Some(0.8),
        ..FileConfig::default()
    };

    let settings = complete()
        .merge(overrides)
        .into_settings()
        .expect("settings valid");

    assert_eq!(settings.remote.host, "other");
    assert_eq!(settings.remote.dir, "/srv/minecraft/mods");
    assert_eq!(settings.options.threshold, 0.8);
}

#[test]
fn defaults_fill_missing_optional_values() {
    let settings = complete().into_settings().expect("settings valid");

    assert_eq!(settings.options.threshold, DEFAULT_THRESHOLD);
    assert_eq!(settings.remote.port, None);
}

#[test]
fn missing_remote_host_is_invalid() {
    let config = FileConfig {
        remote_host: None,
        ..complete()
    };

    let error = config.into_settings().expect_err("host required");
    assert!(matches!(error, ToolError::InvalidConfig(_)));
}

#[test]
fn out_of_range_threshold_is_invalid() {
    let config = FileConfig {
        threshold: Some(1.5),
        ..complete()
    };

    let error = config.into_settings().expect_err("threshold checked");
    assert!(matches!(error, ToolError::InvalidConfig(_)));
}

#[test]
fn empty_metadata_entry_list_is_invalid() {
    let config = FileConfig {
        metadata_entries: Some(Vec::new()),
        ..complete()
    };

    let error = config.into_settings().expect_err("entries required");
    assert!(matches!(error, ToolError::InvalidConfig(_)));
}

#[test]
fn remote_paths_and_quoting() {
    let target = RemoteTarget {
        host: "server".to_string(),
        port: Some(2222),
        dir: "/srv/mods/".to_string(),
    };

    assert_eq!(target.path_of("jei.jar"), "/srv/mods/jei.jar");
    assert_eq!(target.to_string(), "server:2222:/srv/mods/");
    assert_eq!(shell_quote("it's here.jar"), r"'it'\''s here.jar'");
    assert_eq!(
        parse_listing("a.jar\r\n\nb.jar\n"),
        ["a.jar".to_string(), "b.jar".to_string()]
    );
}

#[test]
fn ssh_command_runs_in_batch_mode() {
    let source = RemoteSource::new(
        RemoteTarget {
            host: "mc@server".to_string(),
            port: Some(2222),
            dir: "/srv/mods".to_string(),
        },
        vec!["META-INF/mods.toml".to_string()],
    );

    let command = source.ssh_command("ls -1 -- '/srv/mods'");
    let args: Vec<String> = command
        .get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    assert_eq!(command.get_program(), "ssh");
    assert_eq!(
        args,
        [
            "-p",
            "2222",
            "-o",
            "BatchMode=yes",
            "-o",
            "ConnectTimeout=10",
            "mc@server",
            "ls -1 -- '/srv/mods'",
        ]
    );
}
