//! Fire-and-forget telemetry for resolved debug configurations.

use crate::config::{AttachConfiguration, DebugOption};
use crate::resolver::is_local_host;
use anyhow::anyhow;
use log::info;
use serde::Serialize;
use std::sync::mpsc;
use std::thread;

/// Event name sent after an attach configuration is resolved.
pub const ATTACH_EVENT: &str = "attach";

/// Receiver of telemetry events.
///
/// Implementations must not block: the resolver calls `send` synchronously and
/// ignores (logs) any error.
pub trait TelemetrySink {
    fn send(&self, event: &'static str, configuration: &AttachConfiguration) -> anyhow::Result<()>;
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for Box<T> {
    fn send(&self, event: &'static str, configuration: &AttachConfiguration) -> anyhow::Result<()> {
        (**self).send(event, configuration)
    }
}

/// Sink that drops all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTelemetry;

impl TelemetrySink for NoTelemetry {
    fn send(&self, _: &'static str, _: &AttachConfiguration) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Flags describing a debug session, sent instead of a raw configuration
/// (which may contain user paths and hosts).
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebuggerTelemetry {
    pub is_localhost: bool,
    pub django: bool,
    pub jinja: bool,
    pub pyramid: bool,
    pub sub_process: bool,
    pub redirect_output: bool,
    pub debug_std_lib: bool,
    pub stop_on_entry: bool,
    pub show_return_value: bool,
    pub is_sudo: bool,
    pub path_mappings: usize,
}

impl From<&AttachConfiguration> for DebuggerTelemetry {
    fn from(cfg: &AttachConfiguration) -> Self {
        Self {
            is_localhost: cfg.host.as_deref().is_some_and(is_local_host),
            django: cfg.has_option(DebugOption::Django),
            jinja: cfg.has_option(DebugOption::Jinja),
            pyramid: cfg.pyramid.as_ref().is_some_and(|t| t.is_truthy()),
            sub_process: cfg.has_option(DebugOption::SubProcess),
            redirect_output: cfg.has_option(DebugOption::RedirectOutput),
            debug_std_lib: cfg.has_option(DebugOption::DebugStdLib),
            stop_on_entry: cfg.has_option(DebugOption::StopOnEntry),
            show_return_value: cfg.has_option(DebugOption::ShowReturnValue),
            is_sudo: cfg.has_option(DebugOption::Sudo),
            path_mappings: cfg.mappings().len(),
        }
    }
}

/// Sink that writes event summaries into the log (`telemetry` target).
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn send(&self, event: &'static str, configuration: &AttachConfiguration) -> anyhow::Result<()> {
        let summary = serde_json::to_string(&DebuggerTelemetry::from(configuration))?;
        info!(target: "telemetry", "{event}: {summary}");
        Ok(())
    }
}

/// Event delivered to a [`ChannelTelemetry`] consumer.
#[derive(Clone, Debug)]
pub struct TelemetryEvent {
    pub name: &'static str,
    pub configuration: AttachConfiguration,
    pub properties: DebuggerTelemetry,
}

/// Sink that passes events to another thread through a channel.
pub struct ChannelTelemetry {
    sender: mpsc::Sender<TelemetryEvent>,
}

impl ChannelTelemetry {
    pub fn new(sender: mpsc::Sender<TelemetryEvent>) -> Self {
        Self { sender }
    }

    /// Start a detached thread that calls `consumer` for every event.
    /// Thread exits when the sink is dropped.
    pub fn spawn(mut consumer: impl FnMut(TelemetryEvent) + Send + 'static) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            while let Ok(event) = receiver.recv() {
                consumer(event);
            }
        });
        Self { sender }
    }
}

impl TelemetrySink for ChannelTelemetry {
    fn send(&self, event: &'static str, configuration: &AttachConfiguration) -> anyhow::Result<()> {
        let event = TelemetryEvent {
            name: event,
            configuration: configuration.clone(),
            properties: DebuggerTelemetry::from(configuration),
        };
        self.sender
            .send(event)
            .map_err(|_| anyhow!("telemetry consumer is disconnected"))
    }
}

#[cfg(test)]
mod test {
    use super::{ChannelTelemetry, DebuggerTelemetry, TelemetrySink, ATTACH_EVENT};
    use crate::config::{AttachConfiguration, DebugOption, PathMapping};
    use std::sync::mpsc;

    fn configuration() -> AttachConfiguration {
        AttachConfiguration {
            host: Some("LOCALHOST".to_string()),
            debug_options: Some(vec![DebugOption::Django, DebugOption::RedirectOutput]),
            path_mappings: Some(vec![PathMapping::new("/a", "/b")]),
            ..Default::default()
        }
    }

    #[test]
    fn test_telemetry_properties() {
        let props = DebuggerTelemetry::from(&configuration());
        assert_eq!(
            props,
            DebuggerTelemetry {
                is_localhost: true,
                django: true,
                redirect_output: true,
                path_mappings: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_channel_telemetry() {
        let (sender, receiver) = mpsc::channel();
        let sink = ChannelTelemetry::new(sender);

        sink.send(ATTACH_EVENT, &configuration()).unwrap();
        let event = receiver.recv().unwrap();
        assert_eq!(event.name, "attach");
        assert_eq!(event.configuration, configuration());
        assert!(event.properties.django);

        drop(receiver);
        assert!(sink.send(ATTACH_EVENT, &configuration()).is_err());
    }

    #[test]
    fn test_spawned_consumer() {
        let (done_tx, done_rx) = mpsc::channel();
        let sink = ChannelTelemetry::spawn(move |event| {
            done_tx.send(event.properties.path_mappings).unwrap();
        });

        sink.send(ATTACH_EVENT, &configuration()).unwrap();
        assert_eq!(done_rx.recv().unwrap(), 1);
    }
}
