use mapsketch_designer::canvas::Canvas;
use mapsketch_designer::commands::Change;
use mapsketch_designer::events::{Key, Modifiers, ToolEvent};
use mapsketch_designer::model::{Bounds, ShapeId};
use mapsketch_designer::preview::PreviewKind;
use mapsketch_designer::tools::{ToolBox, ToolKind, ToolOutcome};

const A: ShapeId = ShapeId(1);
const B: ShapeId = ShapeId(2);

/// Canvas with rectangles A (10,10)-(50,40) and B (100,10)-(140,40), the
/// selection tool active.
fn setup() -> (Canvas, ToolBox) {
    let mut canvas = Canvas::default();
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawRectangle, &mut canvas);
    for (from, to) in [((10.0, 10.0), (50.0, 40.0)), ((100.0, 10.0), (140.0, 40.0))] {
        click_drag(&mut tools, &mut canvas, from, to);
    }
    tools.activate(ToolKind::SelectRectangle, &mut canvas);
    (canvas, tools)
}

fn click_drag(tools: &mut ToolBox, canvas: &mut Canvas, from: (f64, f64), to: (f64, f64)) -> ToolOutcome {
    tools.handle_event(&ToolEvent::pointer_down(from.0, from.1), canvas);
    tools.handle_event(&ToolEvent::pointer_move(to.0, to.1), canvas);
    tools.handle_event(&ToolEvent::pointer_up(to.0, to.1), canvas)
}

fn click(tools: &mut ToolBox, canvas: &mut Canvas, at: (f64, f64)) -> ToolOutcome {
    tools.handle_event(&ToolEvent::pointer_down(at.0, at.1), canvas);
    tools.handle_event(&ToolEvent::pointer_up(at.0, at.1), canvas)
}

fn bounds_of(canvas: &Canvas, id: ShapeId) -> Bounds {
    canvas.shape(id).unwrap().bounds()
}

fn assert_bounds(actual: Bounds, expected: Bounds) {
    let close = (actual.x - expected.x).abs() < 1e-9
        && (actual.y - expected.y).abs() < 1e-9
        && (actual.width - expected.width).abs() < 1e-9
        && (actual.height - expected.height).abs() < 1e-9;
    assert!(close, "{actual:?} != {expected:?}");
}

#[test]
fn test_short_drag_picks_by_point() {
    let (mut canvas, mut tools) = setup();
    let history = canvas.history().len();

    // Starts on empty canvas, ends 2px right of A's edge.
    assert_eq!(click_drag(&mut tools, &mut canvas, (58.0, 25.0), (52.0, 27.0)), ToolOutcome::Committed);
    assert_eq!(canvas.selected_ids(), vec![A]);
    assert_eq!(canvas.history().len(), history + 1);
    assert_eq!(canvas.history().last().unwrap().label, "Select");
}

#[test]
fn test_point_pick_uses_hit_tolerance() {
    let (mut canvas, mut tools) = setup();
    // 2px right of A's edge, within the 3px tolerance.
    click(&mut tools, &mut canvas, (52.0, 25.0));
    assert_eq!(canvas.selected_ids(), vec![A]);
    click(&mut tools, &mut canvas, (75.0, 25.0));
    assert!(canvas.selected_ids().is_empty());
}

#[test]
fn test_long_drag_picks_by_path() {
    let (mut canvas, mut tools) = setup();

    assert_eq!(click_drag(&mut tools, &mut canvas, (0.0, 0.0), (200.0, 60.0)), ToolOutcome::Committed);
    assert_eq!(canvas.selected_ids(), vec![A, B]);

    click_drag(&mut tools, &mut canvas, (60.0, 0.0), (90.0, 60.0));
    assert!(canvas.selected_ids().is_empty());
}

#[test]
fn test_unchanged_selection_commits_nothing() {
    let (mut canvas, mut tools) = setup();
    let history = canvas.history().len();
    assert_eq!(click(&mut tools, &mut canvas, (300.0, 300.0)), ToolOutcome::Discarded);
    assert_eq!(canvas.history().len(), history);
}

#[test]
fn test_modifier_keys_toggle_selection() {
    let (mut canvas, mut tools) = setup();
    click(&mut tools, &mut canvas, (30.0, 25.0));

    tools.handle_event(&ToolEvent::key_down(Key::Shift), &mut canvas);
    click(&mut tools, &mut canvas, (120.0, 25.0));
    assert_eq!(canvas.selected_ids(), vec![A, B]);
    click(&mut tools, &mut canvas, (30.0, 25.0));
    assert_eq!(canvas.selected_ids(), vec![B]);
    tools.handle_event(&ToolEvent::key_up(Key::Shift), &mut canvas);

    click(&mut tools, &mut canvas, (30.0, 25.0));
    assert_eq!(canvas.selected_ids(), vec![A]);
}

#[test]
fn test_modifiers_released_in_another_tool_do_not_stick() {
    let (mut canvas, mut tools) = setup();
    tools.handle_event(&ToolEvent::key_down(Key::Shift), &mut canvas);
    tools.activate(ToolKind::DrawRectangle, &mut canvas);
    tools.handle_event(&ToolEvent::key_up(Key::Shift), &mut canvas);
    tools.activate(ToolKind::SelectRectangle, &mut canvas);

    click(&mut tools, &mut canvas, (30.0, 25.0));
    click(&mut tools, &mut canvas, (120.0, 25.0));
    assert_eq!(canvas.selected_ids(), vec![B]);
}

#[test]
fn test_dragging_unselected_shape_picks_and_moves_it() {
    let (mut canvas, mut tools) = setup();
    let history = canvas.history().len();

    assert_eq!(click_drag(&mut tools, &mut canvas, (30.0, 25.0), (60.0, 55.0)), ToolOutcome::Committed);
    assert_eq!(canvas.history().len(), history + 1);
    let change_set = canvas.history().last().unwrap();
    assert_eq!(change_set.label, "Move");
    assert_eq!(change_set.transformed_ids(), vec![A]);
    assert!(change_set
        .changes
        .iter()
        .any(|c| matches!(c, Change::Selection { before, after } if before.is_empty() && after == &vec![A])));
    assert_eq!(canvas.selected_ids(), vec![A]);
    assert_eq!(bounds_of(&canvas, A), Bounds::new(40.0, 40.0, 40.0, 30.0));
    assert_eq!(bounds_of(&canvas, B), Bounds::new(100.0, 10.0, 40.0, 30.0));

    assert!(canvas.undo());
    assert!(canvas.selected_ids().is_empty());
    assert_eq!(bounds_of(&canvas, A), Bounds::new(10.0, 10.0, 40.0, 30.0));
}

#[test]
fn test_dragging_unselected_shape_with_modifier_extends_selection() {
    let (mut canvas, mut tools) = setup();
    click(&mut tools, &mut canvas, (30.0, 25.0));

    tools.handle_event(&ToolEvent::key_down(Key::Shift), &mut canvas);
    click_drag(&mut tools, &mut canvas, (120.0, 25.0), (130.0, 25.0));
    tools.handle_event(&ToolEvent::key_up(Key::Shift), &mut canvas);

    assert_eq!(canvas.selected_ids(), vec![A, B]);
    assert_eq!(bounds_of(&canvas, A), Bounds::new(20.0, 10.0, 40.0, 30.0));
    assert_eq!(bounds_of(&canvas, B), Bounds::new(110.0, 10.0, 40.0, 30.0));
}

#[test]
fn test_move_commits_one_change_set() {
    let (mut canvas, mut tools) = setup();
    click(&mut tools, &mut canvas, (30.0, 25.0));
    let history = canvas.history().len();

    tools.handle_event(&ToolEvent::pointer_down(30.0, 25.0), &mut canvas);
    tools.handle_event(&ToolEvent::pointer_move(35.0, 30.0), &mut canvas);
    assert_eq!(canvas.preview().map(|p| p.kind), Some(PreviewKind::Transform));
    tools.handle_event(&ToolEvent::pointer_move(40.0, 35.0), &mut canvas);
    assert_eq!(canvas.history().len(), history);
    let outcome = tools.handle_event(&ToolEvent::pointer_up(40.0, 35.0), &mut canvas);

    assert_eq!(outcome, ToolOutcome::Committed);
    assert_eq!(canvas.history().len(), history + 1);
    let change_set = canvas.history().last().unwrap();
    assert_eq!(change_set.label, "Move");
    assert_eq!(change_set.transformed_ids(), vec![A]);
    assert_eq!(bounds_of(&canvas, A), Bounds::new(20.0, 20.0, 40.0, 30.0));
    assert_eq!(bounds_of(&canvas, B), Bounds::new(100.0, 10.0, 40.0, 30.0));
    assert!(canvas.preview().is_none());
}

#[test]
fn test_shift_locks_move_to_dominant_axis() {
    let (mut canvas, mut tools) = setup();
    click(&mut tools, &mut canvas, (30.0, 25.0));

    tools.handle_event(&ToolEvent::pointer_down(30.0, 25.0), &mut canvas);
    let up = ToolEvent::pointer_up(40.0, 28.0).with_modifiers(Modifiers::SHIFT);
    tools.handle_event(&up, &mut canvas);
    assert_eq!(bounds_of(&canvas, A), Bounds::new(20.0, 10.0, 40.0, 30.0));
}

#[test]
fn test_resize_from_corner_handle() {
    let (mut canvas, mut tools) = setup();
    click(&mut tools, &mut canvas, (30.0, 25.0));

    assert_eq!(click_drag(&mut tools, &mut canvas, (50.0, 40.0), (90.0, 40.0)), ToolOutcome::Committed);
    assert_eq!(canvas.history().last().unwrap().label, "Resize");
    assert_bounds(bounds_of(&canvas, A), Bounds::new(10.0, 10.0, 80.0, 30.0));
}

#[test]
fn test_rotate_handle_turns_selection() {
    let (mut canvas, mut tools) = setup();
    click(&mut tools, &mut canvas, (30.0, 25.0));

    // Rotate handle sits 20px above the top edge midpoint.
    assert_eq!(click_drag(&mut tools, &mut canvas, (30.0, -10.0), (65.0, 25.0)), ToolOutcome::Committed);
    assert_eq!(canvas.history().last().unwrap().label, "Rotate");
    let shape = canvas.shape(A).unwrap();
    assert!((shape.rotation + 90.0).abs() < 1e-9);
    assert_bounds(shape.bounds(), Bounds::new(15.0, 5.0, 30.0, 40.0));
}

#[test]
fn test_resize_rotated_shape_keeps_opposite_edge() {
    let (mut canvas, mut tools) = setup();
    click(&mut tools, &mut canvas, (30.0, 25.0));
    click_drag(&mut tools, &mut canvas, (30.0, -10.0), (65.0, 25.0));
    assert_bounds(bounds_of(&canvas, A), Bounds::new(15.0, 5.0, 30.0, 40.0));

    // Right handle of the turned selection.
    assert_eq!(click_drag(&mut tools, &mut canvas, (45.0, 25.0), (75.0, 25.0)), ToolOutcome::Committed);
    assert_eq!(canvas.history().last().unwrap().label, "Resize");
    let shape = canvas.shape(A).unwrap();
    assert!((shape.rotation + 90.0).abs() < 1e-9);
    assert_bounds(shape.bounds(), Bounds::new(15.0, 5.0, 60.0, 40.0));
}

#[test]
fn test_escape_abandons_transform() {
    let (mut canvas, mut tools) = setup();
    click(&mut tools, &mut canvas, (30.0, 25.0));
    let history = canvas.history().len();

    tools.handle_event(&ToolEvent::pointer_down(30.0, 25.0), &mut canvas);
    tools.handle_event(&ToolEvent::pointer_move(60.0, 60.0), &mut canvas);
    assert_eq!(tools.handle_event(&ToolEvent::key_down(Key::Escape), &mut canvas), ToolOutcome::Cancelled);
    assert_eq!(tools.handle_event(&ToolEvent::pointer_up(60.0, 60.0), &mut canvas), ToolOutcome::Ignored);
    assert_eq!(bounds_of(&canvas, A), Bounds::new(10.0, 10.0, 40.0, 30.0));
    assert_eq!(canvas.history().len(), history);
}

#[test]
fn test_nudge_accelerates_and_commits_on_key_up() {
    let (mut canvas, mut tools) = setup();
    click(&mut tools, &mut canvas, (30.0, 25.0));
    let history = canvas.history().len();

    tools.handle_event(&ToolEvent::key_down(Key::ArrowRight), &mut canvas);
    tools.handle_event(&ToolEvent::key_repeat(Key::ArrowRight), &mut canvas);
    tools.handle_event(&ToolEvent::key_repeat(Key::ArrowRight), &mut canvas);
    assert_eq!(canvas.history().len(), history);
    assert_eq!(bounds_of(&canvas, A).x, 10.0);

    assert_eq!(tools.handle_event(&ToolEvent::key_up(Key::ArrowRight), &mut canvas), ToolOutcome::Committed);
    assert_eq!(canvas.history().len(), history + 1);
    let change_set = canvas.history().last().unwrap();
    assert_eq!(change_set.label, "Nudge");
    assert!(matches!(change_set.changes[0], Change::TransformShape { id: A, .. }));
    assert_eq!(bounds_of(&canvas, A), Bounds::new(31.0, 10.0, 40.0, 30.0));
}

#[test]
fn test_nudge_is_capped_by_visible_extent() {
    let (mut canvas, mut tools) = setup();
    click(&mut tools, &mut canvas, (30.0, 25.0));
    canvas.viewport_mut().set_zoom(2.0).unwrap();

    tools.handle_event(&ToolEvent::key_down(Key::ArrowDown), &mut canvas);
    for _ in 0..100 {
        tools.handle_event(&ToolEvent::key_repeat(Key::ArrowDown), &mut canvas);
    }
    tools.handle_event(&ToolEvent::key_up(Key::ArrowDown), &mut canvas);
    // min(800, 600) / 2
    assert_eq!(bounds_of(&canvas, A).y, 310.0);
}

#[test]
fn test_changing_arrow_commits_previous_nudge() {
    let (mut canvas, mut tools) = setup();
    click(&mut tools, &mut canvas, (30.0, 25.0));
    let history = canvas.history().len();

    tools.handle_event(&ToolEvent::key_down(Key::ArrowLeft), &mut canvas);
    tools.handle_event(&ToolEvent::key_down(Key::ArrowUp), &mut canvas);
    assert_eq!(canvas.history().len(), history + 1);
    tools.handle_event(&ToolEvent::key_up(Key::ArrowUp), &mut canvas);
    assert_eq!(canvas.history().len(), history + 2);
    assert_eq!(bounds_of(&canvas, A), Bounds::new(9.0, 9.0, 40.0, 30.0));
}

#[test]
fn test_nudge_without_selection_is_ignored() {
    let (mut canvas, mut tools) = setup();
    assert_eq!(tools.handle_event(&ToolEvent::key_down(Key::ArrowLeft), &mut canvas), ToolOutcome::Ignored);
    assert!(canvas.preview().is_none());
}

#[test]
fn test_transforms_undo_as_one_step() {
    let (mut canvas, mut tools) = setup();
    click_drag(&mut tools, &mut canvas, (0.0, 0.0), (200.0, 60.0));
    click_drag(&mut tools, &mut canvas, (30.0, 25.0), (40.0, 35.0));
    assert_eq!(bounds_of(&canvas, B), Bounds::new(110.0, 20.0, 40.0, 30.0));

    assert!(canvas.undo());
    assert_eq!(bounds_of(&canvas, A), Bounds::new(10.0, 10.0, 40.0, 30.0));
    assert_eq!(bounds_of(&canvas, B), Bounds::new(100.0, 10.0, 40.0, 30.0));
    assert_eq!(canvas.selected_ids(), vec![A, B]);
}
