use mapsketch_designer::canvas::Canvas;
use mapsketch_designer::commands::Change;
use mapsketch_designer::events::ToolEvent;
use mapsketch_designer::host::Host;
use mapsketch_designer::model::{Point, Vector};
use mapsketch_designer::preview::PreviewKind;
use mapsketch_designer::tools::{ToolBox, ToolKind, ToolOutcome};

fn zoom_drag(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64)) -> ToolOutcome {
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::Zoom, canvas);
    tools.handle_event(&ToolEvent::pointer_down(from.0, from.1), canvas);
    tools.handle_event(&ToolEvent::pointer_move(to.0, to.1), canvas);
    if from != to {
        assert_eq!(canvas.preview().map(|p| p.kind), Some(PreviewKind::RubberBand));
    }
    tools.handle_event(&ToolEvent::pointer_up(to.0, to.1), canvas)
}

#[test]
fn test_zoom_to_left_half() {
    let mut canvas = Canvas::new(800.0, 600.0);

    assert_eq!(zoom_drag(&mut canvas, (0.0, 0.0), (400.0, 600.0)), ToolOutcome::Committed);
    assert_eq!(canvas.viewport().zoom(), 2.0);
    assert_eq!(canvas.viewport().pan(), Vector::ZERO);

    assert_eq!(canvas.history().len(), 1);
    let change_set = &canvas.history()[0];
    assert_eq!(change_set.label, "Zoom");
    assert!(matches!(
        change_set.changes.as_slice(),
        [Change::Zoom { .. }, Change::Pan { .. }]
    ));
}

#[test]
fn test_zoom_rounds_and_pans_to_rect_origin() {
    let mut canvas = Canvas::default();

    zoom_drag(&mut canvas, (100.0, 50.0), (400.0, 350.0));
    assert_eq!(canvas.viewport().zoom(), 2.67);
    assert_eq!(canvas.viewport().pan(), Vector::new(-100.0, -50.0));
    let origin = canvas.viewport().canvas_to_map(Point::ZERO);
    assert!((origin.x - 100.0).abs() < 1e-9 && (origin.y - 50.0).abs() < 1e-9);
}

#[test]
fn test_zoom_is_clamped() {
    let mut canvas = Canvas::default();
    zoom_drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));
    assert_eq!(canvas.viewport().zoom(), 4.0);

    let mut canvas = Canvas::default();
    canvas.viewport_mut().set_zoom(0.5).unwrap();
    zoom_drag(&mut canvas, (0.0, 0.0), (800.0, 600.0));
    assert_eq!(canvas.viewport().zoom(), 0.5);
}

#[test]
fn test_zoom_composes_with_current_view() {
    let mut canvas = Canvas::default();
    canvas.viewport_mut().set_zoom(2.0).unwrap();
    canvas.viewport_mut().set_pan(Vector::new(-100.0, -50.0));

    zoom_drag(&mut canvas, (0.0, 0.0), (400.0, 300.0));
    assert_eq!(canvas.viewport().zoom(), 4.0);
    assert_eq!(canvas.viewport().pan(), Vector::new(-100.0, -50.0));
}

#[test]
fn test_click_without_drag_is_discarded() {
    let mut canvas = Canvas::default();
    assert_eq!(zoom_drag(&mut canvas, (100.0, 100.0), (100.0, 100.0)), ToolOutcome::Discarded);
    assert!(canvas.history().is_empty());
    assert_eq!(canvas.viewport().zoom(), 1.0);
}

#[test]
fn test_undo_restores_view() {
    let mut canvas = Canvas::default();
    zoom_drag(&mut canvas, (100.0, 50.0), (400.0, 350.0));
    assert!(canvas.undo());
    assert_eq!(canvas.viewport().zoom(), 1.0);
    assert_eq!(canvas.viewport().pan(), Vector::ZERO);
}
