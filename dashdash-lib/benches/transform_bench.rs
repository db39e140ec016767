extern crate criterion;

use criterion::{criterion_group, criterion_main, Criterion};

use dashdash_lib::dashdash_generate::dash_dash;
use dashdash_lib::parser::parse_stylesheet;
use dashdash_lib::{transform, Options};

fn build_stylesheet(rules: usize) -> String {
    let mut css = String::with_capacity(rules * 64);
    for i in 0..rules {
        match i % 4 {
            0 => css.push_str(&format!(".plain-{} {{ color: red; margin: 0; }}\n", i)),
            1 => css.push_str(&format!(".card-{} _-- {{ color: red; padding: 4px; }}\n", i)),
            2 => css.push_str(&format!(".btn-{} --accent-- {{ color: blue; }}\n", i)),
            _ => css.push_str(&format!(
                "@media (min-width: 768px) {{ .nav-{} .item _--:hover {{ color: green; }} }}\n",
                i
            )),
        }
    }
    css
}

fn bench_transform_only(c: &mut Criterion) {
    let css = build_stylesheet(10_000);
    let options = Options::default().with_alias("(min-width: 768px)", "tablet");

    c.bench_function("transform_10k_rules", |b| {
        b.iter(|| {
            let sheet = parse_stylesheet(&css).unwrap();
            transform(&sheet, &options).unwrap()
        })
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let css = build_stylesheet(10_000);
    let options = Options::default();

    c.bench_function("process_10k_rules", |b| {
        b.iter(|| dash_dash::process(&css, &options).unwrap())
    });
}

criterion_group!(benches, bench_transform_only, bench_full_pipeline);
criterion_main!(benches);
