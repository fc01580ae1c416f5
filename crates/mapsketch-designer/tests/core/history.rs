use mapsketch_designer::canvas::{Canvas, MAX_HISTORY};
use mapsketch_designer::commands::{Change, ChangeSet};
use mapsketch_designer::events::ToolEvent;
use mapsketch_designer::tools::{ToolBox, ToolKind};

fn draw_rectangles(canvas: &mut Canvas, count: usize) {
    let mut tools = ToolBox::new();
    tools.activate(ToolKind::DrawRectangle, canvas);
    for i in 0..count {
        let x = 10.0 + 60.0 * i as f64;
        tools.handle_event(&ToolEvent::pointer_down(x, 10.0), canvas);
        tools.handle_event(&ToolEvent::pointer_up(x + 40.0, 40.0), canvas);
    }
}

#[test]
fn test_undo_redo_drawing() {
    let mut canvas = Canvas::default();
    draw_rectangles(&mut canvas, 2);
    assert_eq!(canvas.shape_count(), 2);

    assert!(canvas.undo());
    assert_eq!(canvas.shape_count(), 1);
    assert!(canvas.can_redo());
    assert!(canvas.redo());
    assert_eq!(canvas.shape_count(), 2);
}

#[test]
fn test_new_commit_clears_redo() {
    let mut canvas = Canvas::default();
    draw_rectangles(&mut canvas, 2);
    canvas.undo();
    draw_rectangles(&mut canvas, 1);
    assert!(!canvas.can_redo());
    assert_eq!(canvas.history().len(), 2);
}

#[test]
fn test_history_keeps_latest_sets() {
    let mut canvas = Canvas::default();
    draw_rectangles(&mut canvas, MAX_HISTORY + 3);
    assert_eq!(canvas.history().len(), MAX_HISTORY);
    while canvas.undo() {}
    assert_eq!(canvas.shape_count(), 3);
}

#[test]
fn test_change_set_survives_json() {
    let mut canvas = Canvas::default();
    draw_rectangles(&mut canvas, 1);
    let change_set = &canvas.history()[0];

    let json = serde_json::to_string(change_set).unwrap();
    let restored: ChangeSet = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, change_set);
    assert!(matches!(restored.inverted().changes[0], Change::RemoveShape { .. }));
}
