use crate::config::PathMapping;

/// Translates source paths between the editor (local) and the debuggee (remote) views
/// of a file system.
#[derive(Debug, Default, Clone)]
pub struct SourceMap {
    /// Mapping from local (editor) path prefixes to remote ones.
    local_to_remote: Vec<(String, String)>,
    /// Reverse mapping from remote (debuggee) path prefixes to local ones.
    remote_to_local: Vec<(String, String)>,
}

impl SourceMap {
    pub fn from_path_mappings(mappings: &[PathMapping]) -> Self {
        let mut sm = SourceMap::default();
        for mapping in mappings {
            sm.local_to_remote.push((
                Self::norm_prefix(&mapping.local_root),
                mapping.remote_root.clone(),
            ));
            sm.remote_to_local.push((
                Self::norm_prefix(&mapping.remote_root),
                mapping.local_root.clone(),
            ));
        }

        // Longest prefix wins, stable sort keeps the first of equal prefixes.
        sm.local_to_remote.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        sm.remote_to_local.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        sm
    }

    pub fn map_local_to_remote(&self, local_path: &str) -> String {
        Self::apply_map(local_path, &self.local_to_remote)
    }

    pub fn map_remote_to_local(&self, remote_path: &str) -> String {
        Self::apply_map(remote_path, &self.remote_to_local)
    }

    fn apply_map(path: &str, mapping: &[(String, String)]) -> String {
        let normalized = Self::norm_path(path);
        for (from_norm, to_raw) in mapping {
            if let Some(suffix) = normalized.strip_prefix(from_norm.as_str()) {
                return Self::join_with_style(to_raw, suffix);
            }
            // path is the mapped root itself
            if normalized == from_norm.trim_end_matches('/') {
                return to_raw.clone();
            }
        }
        path.to_string()
    }

    fn join_with_style(prefix: &str, suffix_norm: &str) -> String {
        if suffix_norm.is_empty() {
            return prefix.to_string();
        }
        let mut out = prefix.to_string();
        let windows_style = out.contains('\\');

        if !out.ends_with('/') && !out.ends_with('\\') {
            out.push(if windows_style { '\\' } else { '/' });
        }

        if windows_style {
            out.push_str(&suffix_norm.replace('/', "\\"));
        } else {
            out.push_str(suffix_norm);
        }
        out
    }

    fn norm_prefix(s: &str) -> String {
        let mut out = Self::norm_path(s);
        if !out.ends_with('/') {
            out.push('/');
        }
        out
    }

    fn norm_path(s: &str) -> String {
        s.replace('\\', "/")
    }
}
