use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use loyc_core::{Node, NodeFactory};
use loyc_rules::{Pattern, RewriteRule, RuleEngine};
use std::hint::black_box;

fn var(f: &NodeFactory, name: &str) -> Node {
    f.call("'$", [f.id(name)])
}

fn rest(f: &NodeFactory, name: &str) -> Node {
    f.call("'$", [f.call("'..", [f.id(name)])])
}

/// `a0 + 0 + a1 + 0 + ...`, nested to the left
fn sum_chain(f: &NodeFactory, terms: usize) -> Node {
    (0..terms).fold(f.id("start"), |acc, i| {
        let term = f.call("'+", [f.id(&format!("a{i}")), f.int(0)]);
        f.call("'+", [acc, term])
    })
}

/// Benchmark matching a pattern with two run captures around a fixed argument
fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");
    let f = NodeFactory::synthetic();
    let pattern = Pattern::new(f.call("f", [rest(&f, "before"), f.int(1), rest(&f, "after")]))
        .expect("valid pattern");

    for &len in &[4, 16, 64] {
        let mut args: Vec<Node> = (0..len).map(|i| f.id(&format!("x{i}"))).collect();
        args.insert(len / 2, f.int(1));
        let candidate = f.call("f", args);

        group.bench_with_input(BenchmarkId::from_parameter(len), &candidate, |b, candidate| {
            b.iter(|| black_box(pattern.matches(candidate)));
        });
    }

    group.finish();
}

/// Benchmark the engine removing `+ 0` throughout a long expression
fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    let f = NodeFactory::synthetic();
    let rule = RewriteRule::new(
        "plus_zero",
        f.call("'+", [var(&f, "x"), f.int(0)]),
        var(&f, "x"),
    )
    .expect("valid rule");
    let engine = RuleEngine::default().with_rule(rule);

    for &terms in &[10, 50, 200] {
        let tree = sum_chain(&f, terms);
        group.bench_with_input(BenchmarkId::from_parameter(terms), &tree, |b, tree| {
            b.iter(|| black_box(engine.rewrite(tree)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matching, bench_engine);
criterion_main!(benches);
