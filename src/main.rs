use spell_ring::logging;
use spell_ring::ring_gestures::overlay::segment_geometry;
use spell_ring::ring_gestures::script::{parse_script, serialize_pattern, ScriptStep};
use spell_ring::ring_gestures::stats::library_stats;
use spell_ring::ring_gestures::{
    load_library, ActionDefinition, CastOutcome, GestureEventSink, GestureSurface, LineSink,
    NodeIndex, PatternMatcher, Point,
};
use spell_ring::settings::Settings;
use std::sync::Arc;

const SETTINGS_FILE: &str = "settings.json";

struct LogLineSink;

impl LineSink for LogLineSink {
    fn live_segment(&mut self, _start: Point, _end: Point, _thickness: f32) {}

    fn fixed_segment(&mut self, start: Point, end: Point, thickness: f32) {
        let geometry = segment_geometry(start, end, thickness);
        tracing::debug!(
            length = geometry.length,
            angle = geometry.angle_deg,
            "segment fixed"
        );
    }

    fn discard_live(&mut self) {}

    fn clear(&mut self) {
        tracing::debug!("lines cleared");
    }
}

struct LogEventSink;

impl GestureEventSink for LogEventSink {
    fn sequence_changed(&mut self, sequence: &[NodeIndex]) {
        tracing::info!(?sequence, "sequence changed");
    }

    fn preview_changed(&mut self, preview: Option<&ActionDefinition>) {
        match preview {
            Some(action) => tracing::info!(name = %action.name, cost = action.cost, "preview"),
            None => tracing::debug!("preview hidden"),
        }
    }

    fn cast_resolved(&mut self, outcome: &CastOutcome) {
        tracing::info!(?outcome, "cast resolved");
    }
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let script_path = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: spell_ring <script> [settings.json]"))?;
    let settings_path = args.next().unwrap_or_else(|| SETTINGS_FILE.to_string());

    let settings = Settings::load(&settings_path)?;
    logging::init(settings.debug_logging);

    let library = load_library(&settings.library_path)?;
    let stats = library_stats(&library, settings.node_count);
    tracing::info!(?stats, path = %settings.library_path, "pattern library loaded");
    let (mut matcher, rejected) = PatternMatcher::from_library(&library, settings.node_count);
    if !rejected.is_empty() {
        tracing::warn!(count = rejected.len(), "some patterns were not registered");
    }

    let (patterns, steps): (Vec<_>, Vec<_>) =
        parse_script(&std::fs::read_to_string(&script_path)?)?
            .into_iter()
            .partition(|step| matches!(step, ScriptStep::Pattern { .. }));
    for step in patterns {
        if let ScriptStep::Pattern { name, pattern } = step {
            let id = name.unwrap_or_else(|| serialize_pattern(None, &pattern));
            if let Err(err) = matcher.register(ActionDefinition::new(id, pattern)) {
                tracing::warn!(%err, "script pattern not registered");
            }
        }
    }

    let mut surface = GestureSurface::new_with_sinks(
        Arc::new(matcher),
        Box::new(settings.ring_layout()),
        Box::new(LogLineSink),
        Box::new(LogEventSink),
    )
    .with_line_thickness(settings.line_thickness);
    surface.activate();

    let mut allow_all = |_: &ActionDefinition| true;
    for step in steps {
        match step {
            ScriptStep::Node(event) => {
                let outcome = surface.handle(event);
                tracing::debug!(?event, ?outcome, "step");
            }
            ScriptStep::Cast => {
                surface.commit(&mut allow_all);
            }
            ScriptStep::Clear => surface.clear(),
            ScriptStep::Pattern { .. } => {}
        }
    }
    Ok(())
}
