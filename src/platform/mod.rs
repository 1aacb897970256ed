//! Host operating system detection.
//!
//! The launcher ships one pre-built contest executable per supported OS
//! family. [`OsFamily`] is resolved once at startup and decides which of them
//! to run.

/// Operating system family of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    Darwin,
    Windows,
    /// Any other system, carrying its name for diagnostics.
    Unsupported(String),
}

impl OsFamily {
    /// Maps a system name as reported by `uname -s` style APIs
    /// (`"Linux"`, `"Darwin"`, `"Windows"`) to a family.
    pub fn from_system_name(name: &str) -> Self {
        match name {
            "Linux" => OsFamily::Linux,
            "Darwin" => OsFamily::Darwin,
            "Windows" => OsFamily::Windows,
            other => OsFamily::Unsupported(other.to_string()),
        }
    }

    /// Detect the family of the current platform
    pub fn detect() -> Self {
        Self::from_target_os(std::env::consts::OS)
    }

    /// Maps a Rust target OS name (`std::env::consts::OS`) to a family,
    /// going through the system name that OS reports.
    pub fn from_target_os(os: &str) -> Self {
        match os {
            "linux" => Self::from_system_name("Linux"),
            "macos" => Self::from_system_name("Darwin"),
            "windows" => Self::from_system_name("Windows"),
            other => OsFamily::Unsupported(other.to_string()),
        }
    }

    /// File name of the bundled contest executable for this family.
    pub fn launcher_executable(&self) -> Option<&'static str> {
        match self {
            OsFamily::Linux => Some("linux_launcher"),
            OsFamily::Darwin => Some("mac_launcher"),
            OsFamily::Windows => Some("windows_launcher.exe"),
            OsFamily::Unsupported(_) => None,
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsFamily::Linux => write!(f, "Linux"),
            OsFamily::Darwin => write!(f, "Darwin"),
            OsFamily::Windows => write!(f, "Windows"),
            OsFamily::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_system_name_known() {
        assert_eq!(OsFamily::from_system_name("Linux"), OsFamily::Linux);
        assert_eq!(OsFamily::from_system_name("Darwin"), OsFamily::Darwin);
        assert_eq!(OsFamily::from_system_name("Windows"), OsFamily::Windows);
    }

    #[test]
    fn test_from_system_name_is_case_sensitive() {
        assert_eq!(
            OsFamily::from_system_name("linux"),
            OsFamily::Unsupported("linux".to_string())
        );
    }

    #[test]
    fn test_from_system_name_unknown() {
        for name in ["FreeBSD", "SunOS", "Java", ""] {
            let os = OsFamily::from_system_name(name);
            assert_eq!(os, OsFamily::Unsupported(name.to_string()));
            assert_eq!(os.launcher_executable(), None);
        }
    }

    #[test]
    fn test_launcher_executable_mapping() {
        assert_eq!(
            OsFamily::from_system_name("Linux").launcher_executable(),
            Some("linux_launcher")
        );
        assert_eq!(
            OsFamily::from_system_name("Darwin").launcher_executable(),
            Some("mac_launcher")
        );
        assert_eq!(
            OsFamily::from_system_name("Windows").launcher_executable(),
            Some("windows_launcher.exe")
        );
    }

    #[test]
    fn test_from_target_os() {
        assert_eq!(OsFamily::from_target_os("linux"), OsFamily::Linux);
        assert_eq!(OsFamily::from_target_os("macos"), OsFamily::Darwin);
        assert_eq!(OsFamily::from_target_os("windows"), OsFamily::Windows);
        assert_eq!(
            OsFamily::from_target_os("freebsd"),
            OsFamily::Unsupported("freebsd".to_string())
        );
    }

    #[test]
    fn test_detect_matches_target() {
        let os = OsFamily::detect();
        #[cfg(target_os = "linux")]
        assert_eq!(os, OsFamily::Linux);
        #[cfg(target_os = "macos")]
        assert_eq!(os, OsFamily::Darwin);
        #[cfg(target_os = "windows")]
        assert_eq!(os, OsFamily::Windows);
        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        assert_eq!(os.launcher_executable(), None);
    }

    #[test]
    fn test_display_round_trips_system_name() {
        for name in ["Linux", "Darwin", "Windows", "Haiku"] {
            assert_eq!(OsFamily::from_system_name(name).to_string(), name);
        }
    }
}
