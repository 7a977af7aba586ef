//! Shared container types
//!
//! Data structures used by container runtimes. The actual execution logic
//! is in the runtime implementations.

use std::collections::HashMap;

/// Container configuration for one build invocation
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Container image to use
    pub image: String,
    /// Working directory inside the container
    pub workdir: String,
    /// Volume mounts (host:container format)
    pub volumes: Vec<String>,
    /// Environment variables
    pub env: HashMap<String, String>,
    /// Network mode
    pub network: String,
    /// `uid:gid` to run as, so bind-mounted artifacts stay user-owned
    pub user: Option<String>,
}

/// The invoking user's `uid:gid` pair for container user mapping.
///
/// Without it, artifacts written into the bind-mounted cache come back
/// root-owned on the host.
#[cfg(unix)]
pub fn current_user() -> Option<String> {
    // SAFETY: getuid/getgid cannot fail and take no arguments
    let uid = unsafe { libc::getuid() };
    let gid = unsafe { libc::getgid() };
    Some(format!("{uid}:{gid}"))
}

#[cfg(not(unix))]
pub fn current_user() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_config_holds_options() {
        let config = ContainerConfig {
            image: "fedora:41".to_string(),
            workdir: "/work/pkg".to_string(),
            volumes: vec!["/work/pkg:/work/pkg".to_string()],
            env: HashMap::new(),
            network: "host".to_string(),
            user: Some("1000:1000".to_string()),
        };

        assert_eq!(config.image, "fedora:41");
        assert_eq!(config.volumes.len(), 1);
        assert_eq!(config.user.as_deref(), Some("1000:1000"));
    }

    #[cfg(unix)]
    #[test]
    fn current_user_is_uid_gid() {
        let user = current_user().unwrap();
        let (uid, gid) = user.split_once(':').unwrap();
        assert!(uid.bytes().all(|b| b.is_ascii_digit()));
        assert!(gid.bytes().all(|b| b.is_ascii_digit()));
    }
}
