//! Browser control commands
//!
//! Closed set of commands the bridge understands. Each variant knows its
//! host-protocol spelling; parsing from a string happens once at the edge,
//! so the dispatch table itself is checked for exhaustiveness.

/// A browser control command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Launch a browser instance from a stored profile
    Launch,
    /// List stored profiles
    ListProfiles,
    /// Replace the stored profile collection (host-side write)
    SetProfiles,
    /// List ids of running instances
    ListRunning,
    /// Stop a running instance (best-effort)
    DeleteInstance,
    /// Read the global key-value blob
    GetGlobalData,
    /// Write one global key
    SetGlobalData,
    /// Browser version string
    GetVersion,
    /// Proxy liveness check
    CheckProxy,
    /// Set IP-based geolocation (native backend only)
    SetGeo,
}

impl Command {
    /// All commands, in dispatch-table order
    pub const ALL: [Command; 10] = [
        Command::Launch,
        Command::ListProfiles,
        Command::SetProfiles,
        Command::ListRunning,
        Command::DeleteInstance,
        Command::GetGlobalData,
        Command::SetGlobalData,
        Command::GetVersion,
        Command::CheckProxy,
        Command::SetGeo,
    ];

    /// Parse a command name; accepts both bridge names and host spellings
    pub fn from_name(name: &str) -> Option<Command> {
        match name {
            "launch" | "launchBrowser" => Some(Command::Launch),
            "list-profiles" | "getBrowserList" => Some(Command::ListProfiles),
            "set-profiles" | "setBrowserList" => Some(Command::SetProfiles),
            "list-running" | "getRuningBrowser" => Some(Command::ListRunning),
            "delete-instance" | "deleteBrowser" => Some(Command::DeleteInstance),
            "get-global-data" | "getGlobalData" => Some(Command::GetGlobalData),
            "set-global-data" | "setGlobalData" => Some(Command::SetGlobalData),
            "get-version" | "getBrowserVersion" => Some(Command::GetVersion),
            "check-proxy" | "checkProxy" => Some(Command::CheckProxy),
            "set-geo" | "setIpGeo" => Some(Command::SetGeo),
            _ => None,
        }
    }

    /// The host protocol's spelling of this command
    ///
    /// `getRuningBrowser` is the host's own (misspelled) name; it is part of
    /// the wire protocol and must not be corrected here.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Command::Launch => "launchBrowser",
            Command::ListProfiles => "getBrowserList",
            Command::SetProfiles => "setBrowserList",
            Command::ListRunning => "getRuningBrowser",
            Command::DeleteInstance => "deleteBrowser",
            Command::GetGlobalData => "getGlobalData",
            Command::SetGlobalData => "setGlobalData",
            Command::GetVersion => "getBrowserVersion",
            Command::CheckProxy => "checkProxy",
            Command::SetGeo => "setIpGeo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_spellings_parse() {
        assert_eq!(Command::from_name("launch"), Some(Command::Launch));
        assert_eq!(Command::from_name("launchBrowser"), Some(Command::Launch));
        assert_eq!(Command::from_name("list-running"), Some(Command::ListRunning));
        assert_eq!(
            Command::from_name("getRuningBrowser"),
            Some(Command::ListRunning)
        );
        assert_eq!(Command::from_name("doTheThing"), None);
    }

    #[test]
    fn test_wire_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.wire_name()), Some(command));
        }
    }
}
