//! Performance benchmarks for the Puppy compilation pipeline.
//!
//! - Scripts: the programs under `test_scripts/`
//! - Generated: many statements in one program, to see how generation scales
//! - Sessions: recompiling after an appended statement
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use puppy::{Compiler, LiveSession, TreeNotation};
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// A program of `count` statements cycling through constructions,
/// arithmetic and loops.
fn generated_program(count: usize) -> String {
    let mut source = String::from("[#Source\n");
    for i in 0..count {
        let line = i + 1;
        let statement = match i % 3 {
            0 => format!(
                "  [#VarDecl@{line}:0 left=[#Name 'b{i}'] right=[#ApplyExpr name=[#Name 'Ball'] \
                 [#Int '{i}'] [#Int '10'] [#KeywordArgument name=[#Name '色'] value=[#String 'red']]]]\n"
            ),
            1 => format!(
                "  [#VarDecl@{line}:0 left=[#Name 'n{i}'] right=[#Infix left=[#Int '{i}'] \
                 name=[#Token '*'] right=[#Int '2']]]\n"
            ),
            _ => format!(
                "  [#ForStmt@{line}:0 each=[#Name 'k'] list=[#ApplyExpr name=[#Name 'range'] [#Int '3']] \
                 body=[#Block [#ApplyExpr name=[#Name 'print'] [#Name 'k']]]]\n"
            ),
        };
        source.push_str(&statement);
    }
    source.push(']');
    source
}

fn script_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let compiler = Compiler::new(TreeNotation);

    let mut group = c.benchmark_group("compile/scripts");
    let scripts = [
        ("hello", include_str!("../test_scripts/hello.tree")),
        ("shapes", include_str!("../test_scripts/shapes.tree")),
        ("functions", include_str!("../test_scripts/functions.tree")),
        ("classes", include_str!("../test_scripts/classes.tree")),
        ("imports", include_str!("../test_scripts/imports.tree")),
    ];
    for (name, source) in scripts {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let output = compiler.compile(black_box(source));
                end_profiling_frame();
                black_box(output.code.len())
            });
        });
    }
    group.finish();
}

fn generated_benchmarks(c: &mut Criterion) {
    let compiler = Compiler::new(TreeNotation);

    let mut group = c.benchmark_group("compile/generated");
    for count in [10, 100, 1000] {
        let source = generated_program(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &source, |b, source| {
            b.iter(|| black_box(compiler.compile(black_box(source)).lines.len()));
        });
    }
    group.finish();
}

fn session_benchmarks(c: &mut Criterion) {
    let base = generated_program(100);
    let extended = format!(
        "{}  [#ApplyExpr@101:0 name=[#Name 'print'] [#String 'done']]\n]",
        base.trim_end_matches(']')
    );

    c.bench_function("session/append", |b| {
        b.iter(|| {
            let mut session = LiveSession::new(Compiler::new(TreeNotation));
            session.compile(&base);
            black_box(session.compile(black_box(&extended)).update)
        });
    });
}

criterion_group!(
    benches,
    script_benchmarks,
    generated_benchmarks,
    session_benchmarks
);
criterion_main!(benches);
