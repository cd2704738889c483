use crate::config::{AttachConfiguration, PathMapping};
use crate::resolver::is_local_host;
use log::debug;
use std::path::Path;

/// Bring `pathMappings`, legacy `localRoot`/`remoteRoot` and the workspace root
/// into a single mapping list.
///
/// Legacy roots are appended even when the list already has entries, while the
/// workspace mapping is added only to an empty list. Both sources are kept this
/// way for compatibility with existing configurations.
pub(super) fn normalize_path_mappings(
    cfg: &mut AttachConfiguration,
    workspace_root: Option<&Path>,
) {
    let legacy = cfg.legacy_mapping();
    let mappings = cfg.path_mappings.get_or_insert_with(Vec::new);

    if let Some(legacy) = legacy {
        if !mappings.contains(&legacy) {
            debug!(
                target: "attach",
                "map legacy roots {} -> {}", legacy.local_root, legacy.remote_root
            );
            mappings.push(legacy);
        }
    }

    // local and remote file systems are the same when attaching to a loopback host
    let Some(root) = workspace_root else {
        return;
    };
    let loopback = cfg.host.as_deref().is_some_and(is_local_host);
    if mappings.is_empty() && loopback {
        let root = root.to_string_lossy().into_owned();
        debug!(target: "attach", "map workspace root {root} to itself");
        mappings.push(PathMapping::new(root.clone(), root));
    }
}

#[cfg(test)]
mod test {
    use super::normalize_path_mappings;
    use crate::config::{AttachConfiguration, PathMapping};
    use std::path::Path;

    #[test]
    fn test_normalize_path_mappings() {
        struct TestCase {
            host: Option<&'static str>,
            mappings: Option<Vec<PathMapping>>,
            legacy: Option<(&'static str, &'static str)>,
            workspace_root: Option<&'static str>,
            expected: Vec<PathMapping>,
        }

        let cases = [
            TestCase {
                host: None,
                mappings: None,
                legacy: None,
                workspace_root: None,
                expected: vec![],
            },
            TestCase {
                host: Some("localhost"),
                mappings: None,
                legacy: None,
                workspace_root: Some("/ws"),
                expected: vec![PathMapping::new("/ws", "/ws")],
            },
            TestCase {
                host: Some("::1"),
                mappings: Some(vec![]),
                legacy: None,
                workspace_root: Some("/ws"),
                expected: vec![PathMapping::new("/ws", "/ws")],
            },
            TestCase {
                host: Some("LocalHost"),
                mappings: None,
                legacy: None,
                workspace_root: Some("/ws"),
                expected: vec![PathMapping::new("/ws", "/ws")],
            },
            TestCase {
                host: Some("10.0.0.1"),
                mappings: None,
                legacy: None,
                workspace_root: Some("/ws"),
                expected: vec![],
            },
            TestCase {
                host: None,
                mappings: None,
                legacy: None,
                workspace_root: Some("/ws"),
                expected: vec![],
            },
            TestCase {
                host: Some("localhost"),
                mappings: None,
                legacy: Some(("/a", "/b")),
                workspace_root: None,
                expected: vec![PathMapping::new("/a", "/b")],
            },
            TestCase {
                host: Some("localhost"),
                mappings: None,
                legacy: Some(("/a", "/b")),
                workspace_root: Some("/ws"),
                expected: vec![PathMapping::new("/a", "/b")],
            },
            TestCase {
                host: Some("127.0.0.1"),
                mappings: Some(vec![PathMapping::new("/src", "/app")]),
                legacy: Some(("/a", "/b")),
                workspace_root: Some("/ws"),
                expected: vec![PathMapping::new("/src", "/app"), PathMapping::new("/a", "/b")],
            },
            TestCase {
                host: Some("127.0.0.1"),
                mappings: Some(vec![PathMapping::new("/a", "/b")]),
                legacy: Some(("/a", "/b")),
                workspace_root: Some("/ws"),
                expected: vec![PathMapping::new("/a", "/b")],
            },
            TestCase {
                host: Some("localhost"),
                mappings: None,
                legacy: Some(("/a", "")),
                workspace_root: Some("/ws"),
                expected: vec![PathMapping::new("/ws", "/ws")],
            },
        ];

        for (i, tc) in cases.into_iter().enumerate() {
            let mut cfg = AttachConfiguration {
                host: tc.host.map(ToString::to_string),
                path_mappings: tc.mappings,
                local_root: tc.legacy.map(|(l, _)| l.to_string()),
                remote_root: tc.legacy.map(|(_, r)| r.to_string()),
                ..Default::default()
            };

            normalize_path_mappings(&mut cfg, tc.workspace_root.map(Path::new));
            assert_eq!(cfg.path_mappings, Some(tc.expected), "case {i}");
        }
    }
}
