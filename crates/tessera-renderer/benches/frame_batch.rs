//! Benchmarks: grid writes and per-frame batch serialization.
//!
//! Run with: cargo bench --package tessera-renderer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tessera_core::{Color, CGA};
use tessera_grid::PrintOptions;
use tessera_renderer::{AtlasDescriptor, Console};

const ATLAS: AtlasDescriptor = AtlasDescriptor {
    pixel_width: 128,
    pixel_height: 128,
    cell_pixel_width: 8,
    cell_pixel_height: 8,
};

const LOREM: &str = "the quick brown fox jumps over the lazy dog while the cat sleeps ";

/// Fill every cell with a glyph and a palette color.
fn fill(console: &mut Console) {
    let grid = console.grid_mut();
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    for y in 0..h {
        for x in 0..w {
            let color = CGA[((x + y) % 16) as usize];
            grid.set_glyph(x, y, (33 + (x + y * w) % 94) as u32);
            grid.set_foreground(x, y, color);
            grid.set_background(x, y, Color::BLACK);
        }
    }
}

// ── build_frame benchmarks ──

fn bench_build_frame(c: &mut Criterion) {
    let sizes: &[(usize, usize)] = &[(80, 25), (120, 40), (250, 100)];
    let mut group = c.benchmark_group("build_frame");

    for &(w, h) in sizes {
        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(
            BenchmarkId::new("full_grid", format!("{}x{}", w, h)),
            &(w, h),
            |b, &(w, h)| {
                let mut console = Console::new(w, h, &ATLAS).expect("create console");
                fill(&mut console);
                b.iter(|| {
                    black_box(console.build_frame().element_count());
                });
            },
        );
    }
    group.finish();
}

// ── Grid write benchmarks ──

fn bench_grid_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_writes");

    group.bench_function("clear_and_print/120x40", |b| {
        let mut console = Console::new(120, 40, &ATLAS).expect("create console");
        b.iter(|| {
            let grid = console.grid_mut();
            grid.clear();
            for y in 0..40 {
                grid.print(0, y, black_box(LOREM), Color::LIGHT_GRAY, None);
            }
        });
    });

    group.bench_function("print_wrapped/120x40", |b| {
        let mut console = Console::new(120, 40, &ATLAS).expect("create console");
        let text = LOREM.repeat(40);
        let options = PrintOptions::new(Color::WHITE, 60).background(Color::BLUE);
        b.iter(|| {
            black_box(console.grid_mut().print_wrapped(0, 0, black_box(&text), &options));
        });
    });

    group.bench_function("layered_z/120x40", |b| {
        let mut console = Console::new(120, 40, &ATLAS).expect("create console");
        b.iter(|| {
            let grid = console.grid_mut();
            grid.clear();
            grid.set_glyph_rect_z(0, 0, 120, 40, '.' as u32, 0);
            grid.set_glyph_rect_z(10, 10, 50, 10, '#' as u32, 5);
            grid.set_glyph_rect_z(5, 5, 100, 30, '~' as u32, 2);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_build_frame, bench_grid_writes);
criterion_main!(benches);
