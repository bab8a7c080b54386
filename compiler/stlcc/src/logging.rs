use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical stderr subscriber filtered by `STLC_LOG`, or
/// `RUST_LOG` when that is unset. Does nothing if neither is set.
///
/// `STLC_LOG=stlc_types=debug stlc check prog.stlc` shows every solve.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let Some(directives) = ["STLC_LOG", "RUST_LOG"]
            .iter()
            .find_map(|var| std::env::var(var).ok())
        else {
            return;
        };

        let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));
        let layer = HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_bracketed_fields(true);
        // A host may already have installed its own subscriber.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init();
    });
}
