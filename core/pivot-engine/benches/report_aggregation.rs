//! FILENAME: core/pivot-engine/benches/report_aggregation.rs
//! Benchmarks for filtering and aggregating a view-sized table.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::{Record, Table};
use pivot_engine::{aggregate, filter, FilterCriteria, ReportDefinition};

fn build_table(rows: usize) -> Table {
    let statuses = ["Aberto", "Faturado", "Cancelado", "Em produção"];
    let owners = ["Ana", "Bruno", "Carla"];
    (0..rows)
        .map(|i| Record {
            cliente: Some(format!("Cliente {}", i % 300)),
            tipo_orcamento: Some(format!("Tipo {}", i % 7)),
            responsavel_comercial: Some(owners[i % owners.len()].to_string()),
            situacao: Some(statuses[i % statuses.len()].to_string()),
            valor_bruto: Some((i % 1000) as f64 * 1.5),
            valor_liquido: Some((i % 1000) as f64),
            data_oficial_faturamento: NaiveDate::from_ymd_opt(2024 + (i % 3) as i32, 1 + (i % 12) as u32, 15)
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            ..Default::default()
        })
        .collect()
}

fn bench_reports(c: &mut Criterion) {
    let table = build_table(50_000);
    let criteria = FilterCriteria::new().with_client("cliente 1").with_owners(["Ana", "Carla"]);

    c.bench_function("filter_50k", |b| b.iter(|| filter(black_box(&table), black_box(&criteria))));

    let reports = [
        ReportDefinition::by_budget_type(),
        ReportDefinition::by_status(),
        ReportDefinition::by_client(),
        ReportDefinition::by_month(),
    ];
    c.bench_function("four_reports_50k", |b| {
        b.iter(|| {
            for report in &reports {
                black_box(aggregate(black_box(&table), report));
            }
        })
    });
}

criterion_group!(benches, bench_reports);
criterion_main!(benches);
