use criterion::{criterion_group, criterion_main, Criterion};
use search_core::{DocumentStatus, SearchServer};

const WORDS: &[&str] = &[
    "белый", "кот", "модный", "ошейник", "пушистый", "хвост", "ухоженный", "пёс",
    "выразительные", "глаза", "большой", "скворец", "евгений", "и", "в", "на",
];

fn document_text(seed: usize) -> String {
    (0..12)
        .map(|i| WORDS[(seed * 7 + i * 13) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_server(docs: usize) -> SearchServer {
    let mut server = SearchServer::with_stop_words_text("и в на").expect("valid stop words");
    for id in 0..docs {
        server
            .add_document(id as i32, &document_text(id), DocumentStatus::Actual, &[id as i32 % 10])
            .expect("valid document");
    }
    server
}

fn bench_add_documents(c: &mut Criterion) {
    c.bench_function("add_1000_documents", |b| b.iter(|| build_server(1000)));
}

fn bench_find_top_documents(c: &mut Criterion) {
    let server = build_server(1000);
    c.bench_function("find_top_documents", |b| {
        b.iter(|| server.find_top_documents("пушистый ухоженный кот -ошейник"))
    });
}

criterion_group!(benches, bench_add_documents, bench_find_top_documents);
criterion_main!(benches);
