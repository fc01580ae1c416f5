use anyhow::Context;
use mapsketch::{init_logging, Canvas, Host, Settings, ToolBox, ToolEvent, ToolKind, ToolOutcome};

/// Press, drag and release with the primary button.
fn drag(tools: &mut ToolBox, canvas: &mut Canvas, from: (f64, f64), to: (f64, f64)) -> ToolOutcome {
    tools.handle_event(&ToolEvent::pointer_down(from.0, from.1), canvas);
    tools.handle_event(&ToolEvent::pointer_move(to.0, to.1), canvas);
    tools.handle_event(&ToolEvent::pointer_up(to.0, to.1), canvas)
}

fn load_settings() -> anyhow::Result<Settings> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(Settings::default());
    };
    let json = std::fs::read_to_string(&path).with_context(|| format!("reading settings from {path}"))?;
    let settings = Settings::from_json(&json).with_context(|| format!("parsing settings from {path}"))?;
    tracing::info!(path = %path, "settings loaded");
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let settings = load_settings()?;
    let mut canvas = Canvas::new(800.0, 600.0).with_settings(settings);
    let mut tools = ToolBox::new();

    // Draw a rectangle.
    tools.activate(ToolKind::DrawRectangle, &mut canvas);
    let outcome = drag(&mut tools, &mut canvas, (10.0, 10.0), (50.0, 40.0));
    tracing::info!(?outcome, shapes = canvas.shape_count(), "rectangle drawn");

    // Pick it, then move it.
    tools.activate(ToolKind::SelectRectangle, &mut canvas);
    tools.handle_event(&ToolEvent::pointer_down(30.0, 25.0), &mut canvas);
    tools.handle_event(&ToolEvent::pointer_up(30.0, 25.0), &mut canvas);
    tracing::info!(selected = ?canvas.selected_ids(), "selection");
    let outcome = drag(&mut tools, &mut canvas, (30.0, 25.0), (40.0, 35.0));
    for id in canvas.selected_ids() {
        if let Some(shape) = canvas.shape(id) {
            tracing::info!(?outcome, %id, bounds = ?shape.bounds(), "moved");
        }
    }

    // Zoom to the left half of the surface.
    tools.activate(ToolKind::Zoom, &mut canvas);
    let outcome = drag(&mut tools, &mut canvas, (0.0, 0.0), (400.0, 600.0));
    tracing::info!(?outcome, viewport = %canvas.viewport(), "zoomed");

    for change_set in canvas.history() {
        tracing::info!(label = %change_set.label, changes = change_set.len(), "history");
    }

    while canvas.undo() {}
    tracing::info!(
        shapes = canvas.shape_count(),
        viewport = %canvas.viewport(),
        "history unwound"
    );

    Ok(())
}
