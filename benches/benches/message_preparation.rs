//! Benchmarks for prompt preparation
//!
//! Performance-critical paths:
//! - `PromptBuilder::system_prompt`: persona, catalog and rules
//! - History rendering as it grows turn by turn
//! - Provider request mapping and serialization

#![allow(missing_docs)]

use agent_sdk::{AgentTurn, ArgumentBinder, FunctionCall, PromptBuilder, ToolCatalog};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use toolloop_kernel::inference::{ChatRequest, gemini, openai};

fn turns(count: u32, catalog: &ToolCatalog) -> Vec<AgentTurn> {
    let call = FunctionCall {
        name: "send_email".to_string(),
        arguments: vec![
            "test@example.com".to_string(),
            "Hello".to_string(),
            "This is a test.".to_string(),
        ],
    };
    let (_, arguments) = ArgumentBinder::bind(&call, catalog).unwrap_or_else(|e| panic!("{e}"));
    (1..=count)
        .map(|i| {
            AgentTurn::tool_call(
                i,
                "FUNCTION_CALL: send_email|test@example.com|Hello|This is a test.",
                "send_email",
                arguments.clone(),
                "Email sent successfully. Message ID: 18c2f".repeat(4),
            )
        })
        .collect()
}

fn bench_system_prompt(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_preparation/system_prompt");

    let mail = (mailer_agent::profile(), ToolCatalog::from_specs(mailer_agent::tool_specs()));
    let slides = (
        presenter_agent::profile(),
        ToolCatalog::from_specs(presenter_agent::tool_specs()),
    );

    for (name, (profile, catalog)) in [("mailer", &mail), ("presenter", &slides)] {
        group.bench_function(name, |b| {
            b.iter(|| PromptBuilder::system_prompt(black_box(profile), black_box(catalog)));
        });
    }

    group.finish();
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_preparation/history");

    let catalog = ToolCatalog::from_specs(mailer_agent::tool_specs());
    for count in [1u32, 5, 20] {
        let turns = turns(count, &catalog);
        for (label, limit) in [("verbatim", None), ("capped", Some(40))] {
            group.bench_with_input(
                BenchmarkId::new(label, count),
                &turns,
                |b, turns| {
                    b.iter(|| {
                        let lines: Vec<String> = turns
                            .iter()
                            .map(|t| t.history_line(black_box(limit)))
                            .collect();
                        PromptBuilder::history_section(&lines)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_provider_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_preparation/provider");

    let catalog = ToolCatalog::from_specs(mailer_agent::tool_specs());
    let system = PromptBuilder::system_prompt(&mailer_agent::profile(), &catalog);
    let lines: Vec<String> = turns(5, &catalog)
        .iter()
        .map(|t| t.history_line(None))
        .collect();
    let parts = vec![
        system,
        PromptBuilder::user_query("Send a test email"),
        PromptBuilder::history_section(&lines),
    ];
    let request = ChatRequest::from_parts("gemini-1.5-flash", &parts);

    group.bench_function("gemini", |b| {
        b.iter(|| serde_json::to_vec(&gemini::create_request(black_box(&request))));
    });
    group.bench_function("openai", |b| {
        b.iter(|| serde_json::to_vec(&openai::create_request(black_box(&request))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_system_prompt,
    bench_history,
    bench_provider_mapping
);
criterion_main!(benches);
