//! Benchmarks for the per-turn reply path in agent-sdk
//!
//! Performance-critical paths:
//! - `ResponseParser::parse`: fence stripping and line classification
//! - `ArgumentBinder::bind`: positional coercion against the catalog
//! - `ToolCatalog::from_specs`: schema normalization at discovery

#![allow(missing_docs)]

use agent_sdk::{ArgumentBinder, ParsedResponse, ResponseParser, ToolCatalog};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_parse_replies(c: &mut Criterion) {
    let mut group = c.benchmark_group("tool_parsing/parse");

    let replies = [
        ("function_call", "FUNCTION_CALL: send_email|test@example.com|Hello|Body"),
        ("final_answer", "FINAL_ANSWER: Email sent."),
        (
            "fenced",
            "```text\nFUNCTION_CALL: draw_keynote_rectangle|100|100|400|200\n```",
        ),
        ("prose", "I think the next step is to open Keynote and draw a box."),
    ];

    for (name, reply) in &replies {
        group.bench_with_input(BenchmarkId::from_parameter(*name), *reply, |b, r| {
            b.iter(|| ResponseParser::parse(black_box(r)));
        });
    }

    group.finish();
}

fn bench_parse_long_body(c: &mut Criterion) {
    let mut group = c.benchmark_group("tool_parsing/long_body");

    for size in [100usize, 1000, 10000] {
        let reply = format!(
            "FUNCTION_CALL: send_email|a@b.com|Report|{}",
            "lorem ipsum ".repeat(size / 12)
        );
        group.throughput(Throughput::Bytes(reply.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{size}_bytes")),
            &reply,
            |b, r| b.iter(|| ResponseParser::parse(black_box(r))),
        );
    }

    group.finish();
}

fn bench_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("tool_parsing/bind");

    let mut specs = mailer_agent::tool_specs();
    specs.extend(presenter_agent::tool_specs());
    let catalog = ToolCatalog::from_specs(specs);

    let calls = [
        ("strings", "FUNCTION_CALL: send_email|test@example.com|Hello|This is a test."),
        ("integers", "FUNCTION_CALL: add_text_in_keynote|Title|120|170|360|50"),
        ("type_error", "FUNCTION_CALL: draw_keynote_rectangle|100|100|wide|200"),
        ("unknown_tool", "FUNCTION_CALL: delete_everything|now"),
    ];

    for (name, reply) in &calls {
        let ParsedResponse::FunctionCall(call) = ResponseParser::parse(reply) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(*name), &call, |b, call| {
            b.iter(|| ArgumentBinder::bind(black_box(call), black_box(&catalog)));
        });
    }

    group.finish();
}

fn bench_catalog_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tool_parsing/catalog");

    let mut specs = mailer_agent::tool_specs();
    specs.extend(presenter_agent::tool_specs());

    group.bench_function("from_specs", |b| {
        b.iter(|| ToolCatalog::from_specs(black_box(specs.clone())));
    });

    let catalog = ToolCatalog::from_specs(specs);
    group.bench_function("render", |b| b.iter(|| black_box(&catalog).render()));

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_replies,
    bench_parse_long_body,
    bench_bind,
    bench_catalog_build
);
criterion_main!(benches);
