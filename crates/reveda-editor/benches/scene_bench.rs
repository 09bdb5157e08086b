use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use reveda_editor::commands::EditCommand;
use reveda_editor::edit_mode::{ModeKind, SceneKind};
use reveda_editor::geometry::{Point, Rect};
use reveda_editor::input::PointerEvent;
use reveda_editor::model::{Item, ItemId, SceneModel, Shape};
use reveda_editor::scene::EditorScene;
use reveda_editor::serialization::{DesignData, ItemData};
use reveda_editor::session::SessionContext;
use reveda_editor::undo::UndoStack;
use std::hint::black_box;

fn grid_design(count: usize) -> DesignData {
    let items = (0..count)
        .map(|i| {
            let x = (i % 100) as f64 * 30.0;
            let y = (i / 100) as f64 * 30.0;
            let item = Item::new(ItemId(0), Shape::rect(Rect::new(0.0, 0.0, 20.0, 20.0)))
                .with_pos(Point::new(x, y));
            ItemData::from_item(&item)
        })
        .collect();
    DesignData {
        items,
        ..DesignData::default()
    }
}

fn bench_undo_stack(c: &mut Criterion) {
    c.bench_function("undo_push_undo_redo_1000", |b| {
        b.iter(|| {
            let mut model = SceneModel::new();
            let mut stack = UndoStack::with_limit(0);
            for i in 0..1000 {
                let id = model.items.allocate_id();
                let item = Item::new(id, Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0)))
                    .with_pos(Point::new(i as f64, 0.0));
                stack.push(EditCommand::add(vec![item]), &mut model);
            }
            while stack.undo(&mut model).unwrap_or(false) {}
            while stack.redo(&mut model).unwrap_or(false) {}
            black_box(model.items.len())
        })
    });
}

fn bench_rubber_band(c: &mut Criterion) {
    let mut group = c.benchmark_group("rubber_band");
    let context = SessionContext::default();

    for &count in &[1_000usize, 10_000usize] {
        let mut scene = EditorScene::new(SceneKind::Layout, &context);
        scene.load_design(grid_design(count));
        scene.set_partial_selection(true);

        group.bench_with_input(BenchmarkId::new("select", count), &count, |b, _| {
            b.iter(|| {
                scene.handle_pointer(PointerEvent::press(-5.0, -5.0));
                scene.handle_pointer(PointerEvent::moved(1500.0, 900.0));
                scene.handle_pointer(PointerEvent::release(1500.0, 900.0));
                black_box(scene.selection().len())
            })
        });
    }
    group.finish();
}

fn bench_group_move(c: &mut Criterion) {
    let context = SessionContext::default();
    let mut scene = EditorScene::new(SceneKind::Layout, &context);
    scene.load_design(grid_design(5_000));

    c.bench_function("move_5000_and_undo", |b| {
        b.iter(|| {
            scene.select_all();
            let _ = scene.set_mode(ModeKind::MoveItem);
            scene.handle_pointer(PointerEvent::press(10.0, 10.0));
            scene.handle_pointer(PointerEvent::moved(110.0, 10.0));
            scene.handle_pointer(PointerEvent::release(110.0, 10.0));
            let _ = scene.undo();
            black_box(scene.items().len())
        })
    });
}

criterion_group!(benches, bench_undo_stack, bench_rubber_band, bench_group_move);
criterion_main!(benches);
