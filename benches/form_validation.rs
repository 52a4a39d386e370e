//! Performance benchmarks for contact form validation.
//!
//! Compares whole-form validation with the per-field blur path, and
//! measures a full submission on the virtual clock.

use criterion::{criterion_group, criterion_main, Criterion};
use olokun_site::prelude::*;
use std::hint::black_box;
use std::time::Duration;

fn valid_snapshot() -> FormSnapshot {
    FormSnapshot::from_pairs([
        ("nome", "Ana Souza"),
        ("empresa", "Maré Azul Consultoria"),
        ("email", "ana.souza@mareazul.com.br"),
        ("telefone", "(71) 99999-0000"),
        ("servico", "Licenciamento Ambiental"),
        ("mensagem", "Gostaria de um orçamento para licenciamento."),
    ])
}

fn invalid_snapshot() -> FormSnapshot {
    FormSnapshot::from_pairs([("nome", "   "), ("email", "ana@mareazul")])
}

fn bench_validate(c: &mut Criterion) {
    let messages = Messages::default();
    let valid = valid_snapshot();
    let invalid = invalid_snapshot();

    let mut group = c.benchmark_group("validate");
    group.bench_function("valid_form", |b| {
        b.iter(|| validate(black_box(&valid), black_box(&messages)))
    });
    group.bench_function("invalid_form", |b| {
        b.iter(|| validate(black_box(&invalid), black_box(&messages)))
    });
    group.bench_function("single_field_blur", |b| {
        b.iter(|| validate_single_field(black_box(FieldName::Email), black_box("ana@mareazul")))
    });
    group.finish();
}

fn bench_submission(c: &mut Criterion) {
    c.bench_function("submit_and_complete", |b| {
        b.iter(|| {
            let mut view = MockView::with_contact_form("Enviar");
            for (field, value) in valid_snapshot().iter() {
                view.type_into(field, value);
            }
            let mut event_loop =
                EventLoop::new(Page::with_seed(view, SiteSettings::default(), 1));
            event_loop.submit();
            event_loop.advance(Duration::from_millis(1500));
            black_box(event_loop.view().opened_urls.len())
        })
    });
}

criterion_group!(benches, bench_validate, bench_submission);
criterion_main!(benches);
