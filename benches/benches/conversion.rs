use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use postman_graphql::{build_schema, convert_schema, convert_sdl, ConvertOptions};
use postman_raml::{convert_document, RamlDocument};
use std::fmt::Write;
use std::hint::black_box;

/// Schema with `count` entity types, each reachable from a query, a mutation
/// with an input object, and a subscription.
fn generate_schema(count: usize) -> String {
    let mut sdl = String::from("scalar DateTime\n\nenum Status {\n  ACTIVE\n  ARCHIVED\n}\n\n");
    let mut query = String::from("type Query {\n");
    let mut mutation = String::from("type Mutation {\n");
    let mut subscription = String::from("type Subscription {\n");

    for i in 0..count {
        let _ = write!(
            sdl,
            "\"\"\"Entity {i}\"\"\"\ntype Entity{i} {{\n  id: ID!\n  name: String\n  status: Status\n  \
             createdAt: DateTime\n  parent: Entity{parent}\n  tags: [String!]!\n}}\n\n\
             input Entity{i}Input {{\n  name: String!\n  status: Status\n  nested: Entity{parent}Input\n}}\n\n",
            parent = i.saturating_sub(1),
        );
        let _ = writeln!(query, "  entity{i}(id: ID!): Entity{i}");
        let _ = writeln!(query, "  entities{i}(first: Int, after: String): [Entity{i}!]!");
        let _ = writeln!(mutation, "  createEntity{i}(input: Entity{i}Input!): Entity{i}");
        let _ = writeln!(subscription, "  entity{i}Changed(id: ID!): Entity{i}");
    }

    for root in [query, mutation, subscription] {
        sdl.push_str(&root);
        sdl.push_str("}\n\n");
    }
    sdl
}

/// RAML document with `count` top-level resources, each with a nested item
/// resource, typed bodies and responses.
fn generate_raml(count: usize) -> String {
    let mut raml = String::from(
        "#%RAML 1.0\ntitle: Bench API\nversion: v1\nbaseUri: https://bench.example.com/{version}\n\
         types:\n  Address:\n    properties:\n      street: string\n      zip: integer\n",
    );
    for i in 0..count {
        let _ = write!(
            raml,
            "  Record{i}:\n    properties:\n      id: integer\n      name: string\n      \
             tags: string[]\n      address: Address\n",
        );
    }
    for i in 0..count {
        let _ = write!(
            raml,
            "/records{i}:\n  get:\n    queryParameters:\n      page:\n        type: integer\n        \
             required: false\n    responses:\n      200:\n        body:\n          application/json:\n            \
             type: Record{i}[]\n  post:\n    headers:\n      X-Request-Id:\n        description: Trace id\n    \
             body:\n      application/json:\n        type: Record{i}\n    responses:\n      201:\n        \
             description: Created\n  /{{recordId}}:\n    put:\n      body:\n        application/json:\n          \
             type: Record{i}\n    delete:\n",
        );
    }
    raml
}

fn bench_graphql(c: &mut Criterion) {
    let mut group = c.benchmark_group("graphql");
    let options = ConvertOptions::default();

    for count in [10, 100] {
        let sdl = generate_schema(count);

        group.bench_with_input(BenchmarkId::new("build_schema", count), &sdl, |b, sdl| {
            b.iter(|| black_box(build_schema(sdl)));
        });

        group.bench_with_input(BenchmarkId::new("convert_sdl", count), &sdl, |b, sdl| {
            b.iter(|| black_box(convert_sdl(sdl, &options)));
        });

        if let Ok(build) = build_schema(&sdl) {
            group.bench_function(BenchmarkId::new("convert_schema", count), |b| {
                b.iter(|| black_box(convert_schema(&build.schema, &options)));
            });
        }
    }
    group.finish();
}

fn bench_raml(c: &mut Criterion) {
    let mut group = c.benchmark_group("raml");
    let options = postman_raml::ConvertOptions::default();

    for count in [10, 100] {
        let source = generate_raml(count);

        group.bench_with_input(BenchmarkId::new("parse", count), &source, |b, source| {
            b.iter(|| black_box(RamlDocument::parse(source)));
        });

        group.bench_with_input(BenchmarkId::new("convert", count), &source, |b, source| {
            b.iter_batched(
                || RamlDocument::parse(source),
                |document| black_box(document.and_then(|doc| convert_document(&doc, &options))),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_graphql, bench_raml);
criterion_main!(benches);
