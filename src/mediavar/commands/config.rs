use crate::commands::{CmdMessage, CmdResult, MediaPaths};
use crate::config::MediaConfig;
use crate::error::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
    SetDisk(String, PathBuf),
}

pub fn run(paths: &MediaPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = MediaConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = MediaConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Ok(val) => result.add_message(CmdMessage::info(val)),
                Err(e) => result.add_message(CmdMessage::error(e.to_string())),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = MediaConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
        ConfigAction::SetDisk(name, root) => {
            let mut config = MediaConfig::load(dir)?;
            config.set_disk(&name, root.clone());
            config.save(dir)?;
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "disk {} -> {}",
                name,
                root.display()
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::mover::MissingVariantPolicy;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> MediaPaths {
        MediaPaths {
            data_dir: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn set_persists() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        run(
            &paths,
            ConfigAction::Set("missing-variant-policy".into(), "fail".into()),
        )
        .unwrap();

        let shown = run(&paths, ConfigAction::ShowAll).unwrap();
        assert_eq!(
            shown.config.unwrap().missing_variant_policy,
            MissingVariantPolicy::Fail
        );

        let key = run(&paths, ConfigAction::ShowKey("missing-variant-policy".into())).unwrap();
        assert_eq!(key.messages[0].content, "fail");
    }

    #[test]
    fn bad_value_is_a_message_not_an_error() {
        let dir = TempDir::new().unwrap();
        let result = run(
            &paths(&dir),
            ConfigAction::Set("dedupe-log".into(), "perhaps".into()),
        )
        .unwrap();
        assert!(matches!(result.messages[0].level, MessageLevel::Error));
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn adds_disks() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        run(&paths, ConfigAction::SetDisk("media".into(), PathBuf::from("/srv/media"))).unwrap();
        run(&paths, ConfigAction::Set("default-disk".into(), "media".into())).unwrap();

        let config = MediaConfig::load(dir.path()).unwrap();
        assert_eq!(config.default_disk, "media");
        assert_eq!(config.disks["media"], PathBuf::from("/srv/media"));
    }
}
