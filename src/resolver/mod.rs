//! Resolution of user attach configurations into complete ones.

mod defaults;
mod path_mapping;

use crate::config::AttachConfiguration;
use crate::platform::PlatformService;
use crate::telemetry::{NoTelemetry, TelemetrySink, ATTACH_EVENT};
use crate::workspace::{resolve_workspace_root, Workspace, WorkspaceFolder};
use crate::weak_error;
use defaults::AttachDefaults;
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

/// Return true if host (case-insensitive) is a loopback host.
pub fn is_local_host(host: &str) -> bool {
    LOOPBACK_HOSTS.iter().any(|h| h.eq_ignore_ascii_case(host))
}

/// Cancellation flag shared between a resolution caller and the resolver.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Turns user-authored attach configurations into complete ones.
pub struct AttachConfigurationResolver<W, P, T = NoTelemetry> {
    workspace: W,
    platform: P,
    telemetry: T,
}

impl<W: Workspace, P: PlatformService> AttachConfigurationResolver<W, P> {
    pub fn new(workspace: W, platform: P) -> Self {
        Self {
            workspace,
            platform,
            telemetry: NoTelemetry,
        }
    }
}

impl<W: Workspace, P: PlatformService, T: TelemetrySink> AttachConfigurationResolver<W, P, T> {
    /// Replace telemetry sink.
    pub fn with_telemetry<T2: TelemetrySink>(
        self,
        telemetry: T2,
    ) -> AttachConfigurationResolver<W, P, T2> {
        AttachConfigurationResolver {
            workspace: self.workspace,
            platform: self.platform,
            telemetry,
        }
    }

    /// Resolve attach configuration.
    ///
    /// Return [`None`] if resolution is cancelled, in this case the configuration
    /// is dropped without any changes.
    ///
    /// # Arguments
    ///
    /// * `folder`: workspace folder chosen for a debug session, if any
    /// * `configuration`: user configuration
    /// * `token`: cancellation token
    pub fn resolve_debug_configuration(
        &self,
        folder: Option<&WorkspaceFolder>,
        mut configuration: AttachConfiguration,
        token: Option<&CancellationToken>,
    ) -> Option<AttachConfiguration> {
        let cancelled = || token.is_some_and(CancellationToken::is_cancelled);
        if cancelled() {
            return None;
        }

        let workspace_root = resolve_workspace_root(&self.workspace, folder);
        if cancelled() {
            debug!(target: "attach", "resolution cancelled");
            return None;
        }

        AttachDefaults::new(
            &mut configuration,
            workspace_root.as_deref(),
            self.platform.is_windows(),
        )
        .apply();

        weak_error!(
            self.telemetry.send(ATTACH_EVENT, &configuration),
            "send telemetry:"
        );

        Some(configuration)
    }
}
