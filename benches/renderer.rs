use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use github_card_renderer::config::Config;
use github_card_renderer::persist::{scene_from_json, scene_to_json};
use github_card_renderer::render::{RenderMode, render_scene};
use github_card_renderer::scene::Scene;
use std::hint::black_box;

fn dense_scene(elements: usize) -> Scene {
    let mut scene = Scene::default();
    for i in 0..elements {
        let id = match i % 7 {
            0 => scene.add_text(),
            1 => scene.add_shape(),
            2 => scene.add_progress_bar(),
            3 => scene.add_language_bar(),
            4 => scene.add_chart(),
            5 => scene.add_table(),
            _ => scene.add_badge(),
        };
        let dx = (i % 10) as f32 * 70.0;
        let dy = (i / 10) as f32 * 60.0;
        if let Some(el) = scene.element_mut(id) {
            el.x = dx;
            el.y = dy;
        }
    }
    scene.select(None);
    scene
}

fn full_fixture() -> Scene {
    let json = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/full-card.json"
    ));
    scene_from_json(json).expect("fixture parse failed")
}

fn bench_render(c: &mut Criterion) {
    let config = Config::default();
    let mut group = c.benchmark_group("render");

    let fixture = full_fixture();
    group.bench_function("full_card_export", |b| {
        b.iter(|| black_box(render_scene(black_box(&fixture), &config, RenderMode::Export)))
    });
    group.bench_function("full_card_editor", |b| {
        b.iter(|| black_box(render_scene(black_box(&fixture), &config, RenderMode::Editor)))
    });

    for size in [10usize, 50, 200] {
        let scene = dense_scene(size);
        group.bench_with_input(BenchmarkId::new("dense_scene", size), &scene, |b, scene| {
            b.iter(|| black_box(render_scene(black_box(scene), &config, RenderMode::Export)))
        });
    }
    group.finish();
}

fn bench_persistence(c: &mut Criterion) {
    let mut group = c.benchmark_group("persistence");
    let scene = dense_scene(100);
    let json = scene_to_json(&scene).expect("serialize failed");

    group.bench_function("serialize_100", |b| {
        b.iter(|| black_box(scene_to_json(black_box(&scene)).unwrap()))
    });
    group.bench_function("deserialize_100", |b| {
        b.iter(|| black_box(scene_from_json(black_box(&json)).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_render, bench_persistence);
criterion_main!(benches);
