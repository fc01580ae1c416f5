use mapsketch_designer::canvas::Canvas;
use mapsketch_designer::commands::Change;
use mapsketch_designer::events::{Key, Modifiers, ToolEvent};
use mapsketch_designer::model::{Bounds, Point, Transit};
use mapsketch_designer::overlay::GridOverlay;
use mapsketch_designer::preview::PreviewKind;
use mapsketch_designer::tools::{ToolBox, ToolKind, ToolOutcome};

fn drag(tools: &mut ToolBox, canvas: &mut Canvas, from: (f64, f64), to: (f64, f64)) -> ToolOutcome {
    tools.handle_event(&ToolEvent::pointer_down(from.0, from.1), canvas);
    tools.handle_event(&ToolEvent::pointer_move(to.0, to.1), canvas);
    tools.handle_event(&ToolEvent::pointer_up(to.0, to.1), canvas)
}

fn only_shape_bounds(canvas: &Canvas) -> Bounds {
    let layer = canvas.layer().unwrap();
    assert_eq!(layer.len(), 1);
    let id = match &canvas.history().last().unwrap().changes[0] {
        Change::AddShape { group } => group.id,
        other => panic!("unexpected change {other:?}"),
    };
    canvas.shape(id).unwrap().bounds()
}

#[test]
fn test_rectangle_drag_commits_one_add_shape() {
    let mut canvas = Canvas::default();
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawRectangle, &mut canvas);

    assert_eq!(drag(&mut tools, &mut canvas, (10.0, 10.0), (50.0, 40.0)), ToolOutcome::Committed);

    assert_eq!(canvas.history().len(), 1);
    let change_set = &canvas.history()[0];
    assert_eq!(change_set.len(), 1);
    let Change::AddShape { group } = &change_set.changes[0] else {
        panic!("expected AddShape");
    };
    let path = &group.paths[0];
    assert_eq!(path.start, Point::new(10.0, 10.0));
    assert_eq!(
        path.transits.as_slice(),
        &[
            Transit::line(40.0, 0.0),
            Transit::line(0.0, 30.0),
            Transit::line(-40.0, 0.0),
            Transit::line(0.0, -30.0),
        ]
    );
    assert!(canvas.preview().is_none());
}

#[test]
fn test_small_drag_is_discarded() {
    let mut canvas = Canvas::default();
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawEllipse, &mut canvas);

    assert_eq!(drag(&mut tools, &mut canvas, (10.0, 10.0), (12.0, 40.0)), ToolOutcome::Discarded);
    assert_eq!(canvas.shape_count(), 0);
    assert!(canvas.history().is_empty());
}

#[test]
fn test_flat_drag_is_discarded() {
    let mut canvas = Canvas::default();
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawRectangle, &mut canvas);

    assert_eq!(drag(&mut tools, &mut canvas, (10.0, 10.0), (50.0, 12.0)), ToolOutcome::Discarded);
    assert_eq!(canvas.shape_count(), 0);
    assert!(canvas.history().is_empty());
    assert!(canvas.preview().is_none());
}

#[test]
fn test_drawing_uses_map_space() {
    let mut canvas = Canvas::default();
    canvas.viewport_mut().set_zoom(2.0).unwrap();
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawRectangle, &mut canvas);

    drag(&mut tools, &mut canvas, (10.0, 10.0), (50.0, 40.0));
    assert_eq!(only_shape_bounds(&canvas), Bounds::new(5.0, 5.0, 20.0, 15.0));
}

#[test]
fn test_preview_follows_drag() {
    let mut canvas = Canvas::default();
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawArc, &mut canvas);

    tools.handle_event(&ToolEvent::pointer_down(0.0, 0.0), &mut canvas);
    assert_eq!(tools.handle_event(&ToolEvent::pointer_move(30.0, 20.0), &mut canvas), ToolOutcome::Updated);
    let preview = canvas.preview().unwrap();
    assert_eq!(preview.kind, PreviewKind::Shape);
    assert!(!preview.is_empty());
}

#[test]
fn test_shift_constrains_to_square() {
    let mut canvas = Canvas::default();
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawRectangle, &mut canvas);

    tools.handle_event(&ToolEvent::pointer_down(10.0, 10.0), &mut canvas);
    let up = ToolEvent::pointer_up(50.0, 20.0).with_modifiers(Modifiers::SHIFT);
    assert_eq!(tools.handle_event(&up, &mut canvas), ToolOutcome::Committed);
    assert_eq!(only_shape_bounds(&canvas), Bounds::new(10.0, 10.0, 40.0, 40.0));
}

#[test]
fn test_snap_to_grid_and_control_inverts() {
    let mut canvas = Canvas::default().with_overlay(GridOverlay::new(10.0, 3.0));
    canvas.settings_mut().snap_enabled = true;
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawRectangle, &mut canvas);

    drag(&mut tools, &mut canvas, (12.0, 9.0), (48.0, 41.0));
    assert_eq!(only_shape_bounds(&canvas), Bounds::new(10.0, 10.0, 40.0, 30.0));

    let mut canvas = Canvas::default().with_overlay(GridOverlay::new(10.0, 3.0));
    canvas.settings_mut().snap_enabled = true;
    let down = ToolEvent::pointer_down(12.0, 9.0).with_modifiers(Modifiers::CONTROL);
    tools.handle_event(&down, &mut canvas);
    // Snap mode is fixed at pointer-down; releasing Control changes nothing.
    tools.handle_event(&ToolEvent::pointer_up(48.0, 41.0), &mut canvas);
    assert_eq!(only_shape_bounds(&canvas), Bounds::new(12.0, 9.0, 36.0, 32.0));
}

#[test]
fn test_point_tool_commits_on_release() {
    let mut canvas = Canvas::default();
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawPoint, &mut canvas);

    assert_eq!(tools.handle_event(&ToolEvent::pointer_down(100.0, 100.0), &mut canvas), ToolOutcome::Ignored);
    assert_eq!(tools.handle_event(&ToolEvent::pointer_up(100.0, 100.0), &mut canvas), ToolOutcome::Committed);
    assert_eq!(only_shape_bounds(&canvas), Bounds::new(97.5, 97.5, 5.0, 5.0));
}

#[test]
fn test_escape_cancels_drag() {
    let mut canvas = Canvas::default();
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawRectangle, &mut canvas);

    tools.handle_event(&ToolEvent::pointer_down(10.0, 10.0), &mut canvas);
    tools.handle_event(&ToolEvent::pointer_move(50.0, 40.0), &mut canvas);
    assert_eq!(tools.handle_event(&ToolEvent::key_down(Key::Escape), &mut canvas), ToolOutcome::Cancelled);
    assert!(canvas.preview().is_none());
    assert_eq!(tools.handle_event(&ToolEvent::pointer_up(50.0, 40.0), &mut canvas), ToolOutcome::Ignored);
    assert_eq!(canvas.shape_count(), 0);
}

#[test]
fn test_switching_tools_cancels_gesture() {
    let mut canvas = Canvas::default();
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawRectangle, &mut canvas);

    tools.handle_event(&ToolEvent::pointer_down(10.0, 10.0), &mut canvas);
    tools.handle_event(&ToolEvent::pointer_move(50.0, 40.0), &mut canvas);
    tools.activate(ToolKind::DrawEllipse, &mut canvas);
    assert!(canvas.preview().is_none());
    assert_eq!(tools.handle_event(&ToolEvent::pointer_up(50.0, 40.0), &mut canvas), ToolOutcome::Ignored);
    assert_eq!(canvas.shape_count(), 0);
}

#[test]
fn test_drawing_needs_template_and_layer() {
    let mut canvas = Canvas::empty(800.0, 600.0);
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawRectangle, &mut canvas);

    assert_eq!(drag(&mut tools, &mut canvas, (10.0, 10.0), (50.0, 40.0)), ToolOutcome::Ignored);
    assert!(canvas.history().is_empty());
}
