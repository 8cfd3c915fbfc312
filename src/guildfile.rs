use crate::{hey, nay};
use serde::{Deserialize, Serialize};
use serenity::all::GuildId;
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const GUILD_DIR: &str = "./guilds/";

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct GuildFile {
    prefix: Option<String>,
}

/// Per-guild settings stored as `<dir>/<guild id>.json`.
pub struct GuildSettings {
    pub id: GuildId,
    pub file: GuildFile,
    dir: PathBuf,
}

impl GuildSettings {
    pub fn get(id: &GuildId) -> Self {
        Self::get_in(Path::new(GUILD_DIR), id)
    }

    pub fn get_in(dir: &Path, id: &GuildId) -> Self {
        let settings = Self {
            id: *id,
            file: GuildFile::default(),
            dir: dir.to_path_buf(),
        };

        let path = settings.path();
        if !path.exists() {
            return settings;
        }

        let Ok(data) = fs::read_to_string(&path) else {
            hey!("Failed to read guild data: {}", id);
            return settings;
        };

        match serde_json::from_str::<GuildFile>(data.as_str()) {
            Ok(file) => Self { file, ..settings },
            Err(e) => {
                nay!("Failed to deserialize guild data with ID {}: {}", id, e);
                settings
            }
        }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.id.get()))
    }

    fn reload(&mut self) {
        let dir = self.dir.clone();
        *self = Self::get_in(&dir, &self.id);
    }

    fn update(&self) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            hey!("Failed to create guild data directory: {}", e);
            return;
        }

        let Ok(mut file) = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
        else {
            hey!("Failed to get file for guild data: {}", &self.id);
            return;
        };

        let Ok(data) = serde_json::to_string(&self.file) else {
            hey!("Failed to serialize guild data: {}", &self.id);
            return;
        };

        if let Err(e) = write!(file, "{}", data) {
            hey!("Failed to write to file for guild {}: {}", &self.id, e);
        }
    }

    pub fn get_prefix(&self) -> Option<&str> {
        self.file.prefix.as_deref()
    }

    pub fn set_prefix<S: Into<String>>(&mut self, prefix: S) {
        self.reload();
        self.file.prefix = Some(prefix.into());
        self.update();
    }

    pub fn clear_prefix(&mut self) {
        self.reload();
        self.file.prefix = None;
        self.update();
    }
}
