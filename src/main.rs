use anyhow::{bail, Context};
use reveda::{
    default_config_path, init_logging, EditorConfig, EditorSession, JsonDesignStore,
    ProcessRules, SceneKind, SessionContext, ViewTuple, BUILD_DATE, VERSION,
};
use std::path::PathBuf;
use tracing::{info, warn};

const USAGE: &str = "usage: reveda [--config FILE] [--process FILE] <root> <library> <cell> <view>";

struct Args {
    config: Option<PathBuf>,
    process: Option<PathBuf>,
    root: PathBuf,
    view: ViewTuple,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut config = None;
    let mut process = None;
    let mut positional = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(args.next().context(USAGE)?)),
            "--process" => process = Some(PathBuf::from(args.next().context(USAGE)?)),
            _ => positional.push(arg),
        }
    }
    let [root, library, cell, view] = <[String; 4]>::try_from(positional)
        .map_err(|_| anyhow::anyhow!(USAGE))?;
    Ok(Args {
        config,
        process,
        root: PathBuf::from(root),
        view: ViewTuple::new(library, cell, view),
    })
}

/// View names follow the library convention: `schematic`, `symbol` or
/// anything starting with `layout`.
fn scene_kind_for(view: &str) -> anyhow::Result<SceneKind> {
    match view {
        "schematic" => Ok(SceneKind::Schematic),
        "symbol" => Ok(SceneKind::Symbol),
        v if v.starts_with("layout") => Ok(SceneKind::Layout),
        other => bail!("unknown view type '{other}'"),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!(version = VERSION, built = BUILD_DATE, "starting reveda");

    let args = parse_args()?;

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = EditorConfig::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Err(e) = config.validate() {
        warn!(error = %e, "configuration is invalid, using defaults");
    }

    let mut context = SessionContext::new(config);
    if let Some(path) = &args.process {
        context = context.with_process(ProcessRules::load(path)?);
    }

    let kind = scene_kind_for(&args.view.view)?;
    let store = JsonDesignStore::new(&args.root);
    let mut session = EditorSession::new(context);
    let view = session.open_view(args.view.clone(), kind, &store);
    view.scene_mut().fit_items_in_view();
    view.sync();

    let scene = view.scene();
    let bounds = scene.items().bounding_rect();
    info!(
        view = %args.view,
        kind = %kind,
        items = scene.items().len(),
        bounds = ?bounds,
        zoom = view.viewport().zoom(),
        "design summary"
    );
    if kind == SceneKind::Schematic {
        info!(junctions = scene.junction_points().len(), "schematic nets");
    }
    let message = scene.message_text();
    if !message.is_empty() {
        info!(message = %message, "status");
    }

    session.close_view(&args.view, &store);
    Ok(())
}
