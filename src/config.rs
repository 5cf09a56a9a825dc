use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

use crate::registry::{GuideRegistry, GuideSummary};

#[derive(Deserialize)]
pub struct Paths {
    pub posts_dir: PathBuf,
    pub guides_dir: PathBuf,
    pub guide_registry: PathBuf,
}

/// Optional overrides for the fallback values substituted into records
/// with missing front-matter keys.
#[derive(Deserialize)]
pub struct Defaults {
    pub author: Option<String>,
    pub post_category: Option<String>,
    pub guide_category: Option<String>,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    pub defaults: Option<Defaults>,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.to_str().unwrap(), e))),
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir),
        guides_dir: parse_path(cfg.paths.guides_dir),
        guide_registry: parse_path(cfg.paths.guide_registry),
    };

    Ok(cfg)
}

#[derive(Deserialize)]
struct RegistryFile {
    #[serde(default)]
    guides: Vec<GuideSummary>,
}

/// Reads the guide registry the site curates as a TOML table of
/// `[[guides]]` entries.
pub fn load_registry(registry_path: &PathBuf) -> io::Result<GuideRegistry> {
    let content = match fs::read_to_string(registry_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening guide registry {}: {}", registry_path.to_str().unwrap(), e))),
    };

    let file: RegistryFile = match toml::from_str::<RegistryFile>(content.as_str()) {
        Ok(file) => file,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing guide registry: {}", e))),
    };

    GuideRegistry::from_entries(file.guides)
}
