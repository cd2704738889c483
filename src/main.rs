use anyhow::{anyhow, Context};
use clap::Parser;
use dbg_attach::config::{profile, AttachConfiguration};
use dbg_attach::platform::Platform;
use dbg_attach::resolver::AttachConfigurationResolver;
use dbg_attach::source_map::SourceMap;
use dbg_attach::telemetry::{LogTelemetry, NoTelemetry, TelemetrySink};
use dbg_attach::workspace::{StaticWorkspace, WorkspaceFolder};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Attach profile (.toml or .json, launch files are supported).
    /// Default: ~/.config/dbg-attach/attach.toml if exists
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Name of a configuration inside a launch file
    #[clap(short, long)]
    name: Option<String>,

    /// Workspace folder (may be used more than once)
    #[clap(short, long)]
    workspace: Vec<PathBuf>,

    /// Workspace folder chosen for the debug session
    #[clap(long)]
    folder: Option<PathBuf>,

    /// Document active in the editor, used to choose between workspace folders
    #[clap(long)]
    active_document: Option<PathBuf>,

    /// Client platform: "windows" or "unix" (default: platform of this binary)
    #[clap(long, env = "DBG_ATTACH_PLATFORM")]
    platform: Option<Platform>,

    /// Write telemetry events into the log
    #[clap(long)]
    telemetry: bool,

    /// Print the remote path for a local path instead of the configuration
    #[clap(long)]
    map: Option<String>,
}

fn load_configuration(args: &Args) -> anyhow::Result<AttachConfiguration> {
    if let Some(path) = &args.config {
        return profile::load(path, args.name.as_deref())
            .with_context(|| format!("load profile {}", path.display()));
    }

    let path = profile::default_path()?;
    if !path.exists() {
        info!(target: "profile", "no default profile, start from an empty configuration");
        return Ok(AttachConfiguration::default());
    }
    profile::load(&path, args.name.as_deref())
        .with_context(|| format!("load profile {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env().init();

    let args = Args::parse();
    let configuration = load_configuration(&args)?;

    let workspace = StaticWorkspace::new(
        args.workspace
            .iter()
            .cloned()
            .map(WorkspaceFolder::new)
            .collect(),
    )
    .with_active_document(args.active_document.clone());
    let folder = args.folder.clone().map(WorkspaceFolder::new);
    let platform = args.platform.unwrap_or_else(Platform::host);

    let telemetry: Box<dyn TelemetrySink> = if args.telemetry {
        Box::new(LogTelemetry)
    } else {
        Box::new(NoTelemetry)
    };

    let resolver = AttachConfigurationResolver::new(workspace, platform).with_telemetry(telemetry);
    let resolved = resolver
        .resolve_debug_configuration(folder.as_ref(), configuration, None)
        .ok_or_else(|| anyhow!("resolution cancelled"))?;

    match &args.map {
        Some(local) => {
            let sm = SourceMap::from_path_mappings(resolved.mappings());
            println!("{}", sm.map_local_to_remote(local));
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
    }

    Ok(())
}
