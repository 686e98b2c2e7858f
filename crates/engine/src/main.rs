use partscope_lib::explode::ExplosionLayout;
use partscope_lib::scene::SceneTree;
use partscope_lib::state::{AppSettings, DisplayState};

fn main() {
    let settings = AppSettings::load();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let Some(description) = parse_scene_arg() else {
        tracing::error!("usage: partscope --scene <path>");
        std::process::exit(1);
    };

    let tree = SceneTree::from_description(&description);
    let mut display = DisplayState::new();
    display.rebuild(&tree);

    if let Some(root) = tree.root() {
        let root_id = &tree.node(root).id;
        let mesh_leaf_count = display.descendant_mesh_ids(root_id).len();
        tracing::info!(
            "model {:?}: {} nodes, {} mesh leaves",
            root_id,
            tree.len(),
            mesh_leaf_count
        );
    }

    let layout = ExplosionLayout::build(&tree, &settings.explode);
    for target in &layout.targets {
        tracing::info!(
            "{}: direction ({:.3}, {:.3}, {:.3}), multiplier {:.3}",
            target.id,
            target.direction.x,
            target.direction.y,
            target.direction.z,
            target.multiplier
        );
    }
}

fn parse_scene_arg() -> Option<shared::SceneDescription> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--scene" && i + 1 < args.len() {
            let path = &args[i + 1];
            match std::fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<shared::SceneDescription>(&json) {
                    Ok(description) => {
                        tracing::info!("loaded scene from {path}");
                        return Some(description);
                    }
                    Err(e) => {
                        tracing::error!("failed to parse scene JSON from {path}: {e}");
                    }
                },
                Err(e) => {
                    tracing::error!("failed to read scene file {path}: {e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}
