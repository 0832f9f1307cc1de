//! Rendering benchmarks.

use criterion::{Criterion, criterion_group, criterion_main};
use reflectgo_codegen::{GoFile, TypeRenderer, format_source};
use reflectgo_schema::{ChanDir, StructField, TypeDesc};
use std::hint::black_box;

fn sample_struct() -> TypeDesc {
    TypeDesc::structure(vec![
        StructField::new("ID", TypeDesc::builtin("int64")).with_tag(r#"json:"id""#),
        StructField::new("Name", TypeDesc::builtin("string")).with_tag(r#"json:"name""#),
        StructField::new("Created", TypeDesc::named("time", "Time")),
        StructField::new(
            "Labels",
            TypeDesc::map(TypeDesc::builtin("string"), TypeDesc::builtin("string")),
        ),
        StructField::new(
            "Events",
            TypeDesc::chan(ChanDir::Recv, TypeDesc::pointer(TypeDesc::named("app", "Event"))),
        ),
        StructField::embedded(TypeDesc::named("sync", "Mutex")),
    ])
}

fn benchmark_render_struct(c: &mut Criterion) {
    let ty = sample_struct();

    c.bench_function("render_struct", |b| {
        b.iter(|| {
            let mut renderer = TypeRenderer::new("example.com/app");
            black_box(renderer.render(black_box(&ty)))
        })
    });
}

fn benchmark_format_source(c: &mut Criterion) {
    let mut renderer = TypeRenderer::new("example.com/app");
    let source = format!(
        "package app\n\nimport (\n\t\"sync\"\n\t\"time\"\n)\n\ntype Record {}\n",
        renderer.render(&sample_struct())
    );

    c.bench_function("format_source", |b| {
        b.iter(|| format_source(black_box(&source)))
    });
}

fn benchmark_render_file(c: &mut Criterion) {
    let ty = sample_struct();
    let mut file = GoFile::new("example.com/app").expect("Failed to create file");
    for i in 0..16 {
        file.define_type(format!("Record{i}"), &ty)
            .expect("Failed to define type");
    }

    c.bench_function("render_file_16_types", |b| {
        b.iter(|| black_box(&file).render_to_string())
    });
}

criterion_group!(
    benches,
    benchmark_render_struct,
    benchmark_format_source,
    benchmark_render_file,
);
criterion_main!(benches);
