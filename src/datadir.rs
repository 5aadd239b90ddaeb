//! Data directory resolution
//!
//! The node keeps its databases and other persistent state under a single
//! data directory. By default that directory lives next to the process, in
//! `<cwd>/krishna`. The platform helpers below resolve the conventional
//! per-user location instead, which is selectable via [`DataDirStrategy::Home`].

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info};

use crate::error::ConfigError;

/// Subdirectory of the working directory used by [`default_data_dir`]
pub const DATA_DIR_NAME: &str = "krishna";

const HOME_ENV: &str = "HOME";
const LOCAL_APP_DATA_ENV: &str = "LOCALAPPDATA";

/// The default data directory to use for the databases and other persistence
/// requirements.
///
/// # Panics
///
/// Panics if the current working directory cannot be determined. A process
/// without a working directory cannot place its state anywhere sensible.
pub fn default_data_dir() -> PathBuf {
    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => panic!("Unable to determine current working directory: {}", e),
    };

    let data_dir = default_data_dir_in(&cwd);
    debug!("Using data directory {:?}", data_dir);
    data_dir
}

/// The data directory for a process running in `cwd`.
pub fn default_data_dir_in(cwd: &Path) -> PathBuf {
    cwd.join(DATA_DIR_NAME)
}

/// Where the data directory is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDirStrategy {
    /// `<cwd>/krishna`
    WorkingDir,

    /// Per-user location under the home directory, see [`Platform::home_data_dir`]
    Home,
}

impl Default for DataDirStrategy {
    fn default() -> Self {
        DataDirStrategy::WorkingDir
    }
}

impl DataDirStrategy {
    /// Resolve the data directory. Returns `None` when the home strategy is
    /// selected and no home directory can be found.
    pub fn resolve(&self) -> Option<PathBuf> {
        match self {
            DataDirStrategy::WorkingDir => Some(default_data_dir()),
            DataDirStrategy::Home => {
                let home = home_dir()?;
                let data_dir = Platform::current().home_data_dir(&home);
                debug!("Using home data directory {:?}", data_dir);
                Some(data_dir)
            }
        }
    }
}

impl FromStr for DataDirStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "working-dir" | "cwd" => Ok(DataDirStrategy::WorkingDir),
            "home" => Ok(DataDirStrategy::Home),
            _ => Err(ConfigError::InvalidDataDirStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for DataDirStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataDirStrategy::WorkingDir => write!(f, "working-dir"),
            DataDirStrategy::Home => write!(f, "home"),
        }
    }
}

/// Platform directory layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux and other Unix-likes, `~/.krishna`
    Posix,

    /// macOS, `~/Library/Krishna`
    MacOs,

    /// Windows, under the local application data directory
    Windows,
}

impl Platform {
    /// The layout of the platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Posix
        }
    }

    /// Per-user data directory below `home`.
    ///
    /// # Panics
    ///
    /// On Windows, panics if `LOCALAPPDATA` is undefined and no legacy
    /// roaming directory holds data.
    pub fn home_data_dir(&self, home: &Path) -> PathBuf {
        self.home_data_dir_with(home, |key| env::var(key).ok())
    }

    /// Like [`Platform::home_data_dir`], reading environment variables through `lookup`.
    pub fn home_data_dir_with<F>(&self, home: &Path, lookup: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            Platform::Posix => home.join(".krishna"),
            Platform::MacOs => home.join("Library").join("Krishna"),
            Platform::Windows => {
                // Older installs kept their data in the roaming profile.
                let legacy = home.join("AppData").join("Roaming").join("Krishna");
                if is_non_empty_dir(&legacy) {
                    info!("Using legacy data directory {:?}", legacy);
                    return legacy;
                }
                windows_app_data_with(lookup).join("Krishna")
            }
        }
    }
}

/// The current user's home directory.
///
/// `HOME` wins if set; otherwise the operating system's user database is
/// consulted. Returns `None` if neither yields a directory.
pub fn home_dir() -> Option<PathBuf> {
    home_dir_with(|key| env::var(key).ok(), dirs::home_dir)
}

/// Like [`home_dir`], with the environment and the user record lookup injected.
pub fn home_dir_with<F, G>(lookup: F, user_record: G) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
    G: FnOnce() -> Option<PathBuf>,
{
    if let Some(home) = lookup(HOME_ENV).filter(|home| !home.is_empty()) {
        return Some(PathBuf::from(home));
    }
    user_record().filter(|home| !home.as_os_str().is_empty())
}

/// The Windows local application data directory.
///
/// # Panics
///
/// Panics if `LOCALAPPDATA` is undefined. Every supported Windows release
/// defines it, and guessing a substitute would put state in the wrong place.
pub fn windows_app_data() -> PathBuf {
    windows_app_data_with(|key| env::var(key).ok())
}

/// Like [`windows_app_data`], reading environment variables through `lookup`.
pub fn windows_app_data_with<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(LOCAL_APP_DATA_ENV).filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => panic!("environment variable LocalAppData is undefined"),
    }
}

/// Whether `dir` is a directory holding at least one entry. Anything that
/// cannot be opened as a directory counts as empty.
pub fn is_non_empty_dir<P: AsRef<Path>>(dir: P) -> bool {
    match fs::read_dir(dir) {
        Ok(mut entries) => matches!(entries.next(), Some(Ok(_))),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_data_dir_follows_cwd() {
        let cwd = env::current_dir().unwrap();
        let data_dir = default_data_dir();
        assert_eq!(data_dir, cwd.join("krishna"));
        assert_eq!(data_dir.parent(), Some(cwd.as_path()));
    }

    #[test]
    fn test_default_data_dir_in() {
        let temp_dir = tempdir().unwrap();
        let data_dir = default_data_dir_in(temp_dir.path());
        assert_eq!(data_dir.parent(), Some(temp_dir.path()));
        assert_eq!(data_dir.file_name().unwrap(), DATA_DIR_NAME);
    }

    #[test]
    fn test_home_env_wins() {
        let lookup = |key: &str| (key == "HOME").then(|| "/home/alice".to_string());
        let home = home_dir_with(lookup, || Some(PathBuf::from("/home/bob")));
        assert_eq!(home, Some(PathBuf::from("/home/alice")));
    }

    #[test]
    fn test_home_falls_back_to_user_record() {
        let home = home_dir_with(no_env, || Some(PathBuf::from("/home/bob")));
        assert_eq!(home, Some(PathBuf::from("/home/bob")));

        let empty_env = |_: &str| Some(String::new());
        let home = home_dir_with(empty_env, || Some(PathBuf::from("/home/bob")));
        assert_eq!(home, Some(PathBuf::from("/home/bob")));
    }

    #[test]
    fn test_home_missing_is_none() {
        assert_eq!(home_dir_with(no_env, || None), None);
        assert_eq!(home_dir_with(no_env, || Some(PathBuf::new())), None);
    }

    #[test]
    fn test_windows_app_data() {
        let lookup = |key: &str| (key == "LOCALAPPDATA").then(|| r"C:\Users\alice\AppData\Local".to_string());
        assert_eq!(windows_app_data_with(lookup), PathBuf::from(r"C:\Users\alice\AppData\Local"));
    }

    #[test]
    #[should_panic(expected = "LocalAppData is undefined")]
    fn test_windows_app_data_unset_panics() {
        windows_app_data_with(no_env);
    }

    #[test]
    fn test_is_non_empty_dir() {
        let temp_dir = tempdir().unwrap();
        assert!(!is_non_empty_dir(temp_dir.path()));

        fs::write(temp_dir.path().join("chaindata"), b"").unwrap();
        assert!(is_non_empty_dir(temp_dir.path()));

        assert!(!is_non_empty_dir(temp_dir.path().join("missing")));
        assert!(!is_non_empty_dir(temp_dir.path().join("chaindata")));
    }

    #[test]
    fn test_platform_home_layouts() {
        let home = Path::new("/home/alice");
        assert_eq!(Platform::Posix.home_data_dir_with(home, no_env), home.join(".krishna"));
        assert_eq!(
            Platform::MacOs.home_data_dir_with(home, no_env),
            home.join("Library").join("Krishna")
        );
    }

    #[test]
    fn test_windows_layout_prefers_legacy_roaming_dir() {
        let home = tempdir().unwrap();
        let local = tempdir().unwrap();
        let local_path = local.path().to_string_lossy().into_owned();
        let lookup = move |key: &str| (key == "LOCALAPPDATA").then(|| local_path.clone());

        assert_eq!(
            Platform::Windows.home_data_dir_with(home.path(), &lookup),
            local.path().join("Krishna")
        );

        let legacy = home.path().join("AppData").join("Roaming").join("Krishna");
        fs::create_dir_all(&legacy).unwrap();
        fs::write(legacy.join("nodekey"), b"key").unwrap();
        assert_eq!(Platform::Windows.home_data_dir_with(home.path(), &lookup), legacy);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("home".parse::<DataDirStrategy>().unwrap(), DataDirStrategy::Home);
        assert_eq!("cwd".parse::<DataDirStrategy>().unwrap(), DataDirStrategy::WorkingDir);
        assert!("tmp".parse::<DataDirStrategy>().is_err());
        assert_eq!(DataDirStrategy::default().resolve(), Some(default_data_dir()));
    }
}
