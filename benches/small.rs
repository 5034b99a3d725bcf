use criterion::{Criterion, criterion_group, criterion_main};

pub fn criterion_benchmark(c: &mut Criterion) {
    use bibtex_lexer::{Lexer, LexerConfig, tokenize};

    let input = std::fs::read_to_string("assets/sample.bib").unwrap();

    c.bench_function("sample tokenize", |b| {
        b.iter(|| tokenize(&input, LexerConfig::default()))
    });

    c.bench_function("sample tokenize lenient", |b| {
        b.iter(|| tokenize(&input, LexerConfig::default().with_strict(false)))
    });

    c.bench_function("sample tokenize meta", |b| {
        b.iter(|| tokenize(&input, LexerConfig::default().with_meta_content(true)))
    });

    c.bench_function("sample run", |b| {
        b.iter(|| {
            let mut lexer = Lexer::default();
            lexer.set_source(&input);
            lexer.run().unwrap();
            lexer.drain()
        })
    });

    c.bench_function("sample pull", |b| {
        b.iter(|| Lexer::stream(&input, LexerConfig::default()).count())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
