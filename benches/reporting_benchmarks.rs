//! Performance benchmarks for the employee directory.
//!
//! Covers reporting structure computation over wide and deep hierarchies,
//! both directly against the store and through the HTTP router, plus the
//! compensation replace path.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use employee_directory::api::{AppState, create_router};
use employee_directory::config::{CompensationPolicy, ConfigLoader};
use employee_directory::models::{CompensationRequest, Employee};
use employee_directory::services::{CompensationManager, ReportingStructureCalculator};
use employee_directory::store::{Database, EmployeeStore};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const ROOT: &str = "emp_0";

fn employee(index: usize, direct_reports: Vec<String>) -> Employee {
    Employee {
        id: format!("emp_{}", index),
        first_name: format!("First{}", index),
        last_name: format!("Last{}", index),
        department: "Engineering".to_string(),
        position: "Developer".to_string(),
        direct_reports,
    }
}

/// Builds a complete tree where every manager has `fan_out` reports.
fn create_wide_hierarchy(size: usize, fan_out: usize) -> Database {
    let db = Database::new();
    let employees = db.employees();
    for index in 0..size {
        let reports = (1..=fan_out)
            .map(|k| index * fan_out + k)
            .filter(|&child| child < size)
            .map(|child| format!("emp_{}", child))
            .collect();
        employees.add(employee(index, reports)).unwrap();
    }
    employees.save().unwrap();
    db
}

/// Builds a single reporting chain `depth` employees long.
fn create_deep_hierarchy(depth: usize) -> Database {
    let db = Database::new();
    let employees = db.employees();
    for index in 0..depth {
        let reports = if index + 1 < depth {
            vec![format!("emp_{}", index + 1)]
        } else {
            vec![]
        };
        employees.add(employee(index, reports)).unwrap();
    }
    employees.save().unwrap();
    db
}

/// Benchmark: reporting structure over complete trees of increasing size.
fn bench_wide_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_hierarchy");

    for size in [10, 100, 1_000, 10_000].iter() {
        let db = create_wide_hierarchy(*size, 8);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("employees", size), size, |b, _| {
            b.iter(|| {
                let calculator = ReportingStructureCalculator::new(db.employees());
                black_box(calculator.compute(ROOT).unwrap())
            })
        });
    }

    group.finish();
}

/// Benchmark: reporting structure over a long chain.
fn bench_deep_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_hierarchy");
    // Reduce sample size for the deepest chains to keep benchmark time reasonable
    group.sample_size(20);

    for depth in [100, 1_000, 10_000].iter() {
        let db = create_deep_hierarchy(*depth);

        group.throughput(Throughput::Elements(*depth as u64));
        group.bench_with_input(BenchmarkId::new("depth", depth), depth, |b, _| {
            b.iter(|| {
                let calculator = ReportingStructureCalculator::new(db.employees());
                black_box(calculator.compute(ROOT).unwrap())
            })
        });
    }

    group.finish();
}

/// Benchmark: reporting structure through the HTTP router on seeded data.
fn bench_reporting_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config").expect("Failed to load config");
    let db = config.build_database();
    config.seed(&db).expect("Failed to seed database");
    let router = create_router(AppState::new(db, config.compensation_policy()));

    c.bench_function("reporting_structure_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri("/api/employee/16a596ae-edd3-4847-99fe-c4518e82c86f/reportingStructure")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: replacing an existing compensation record.
fn bench_compensation_replace(c: &mut Criterion) {
    let db = create_wide_hierarchy(1, 0);
    let policy = CompensationPolicy::default();
    let mut salary = 50_000i64;

    c.bench_function("compensation_replace", |b| {
        b.iter(|| {
            salary += 1;
            let manager = CompensationManager::new(db.employees(), db.compensation())
                .with_strict_effective_date(policy.strict_effective_date);
            black_box(
                manager
                    .create(CompensationRequest {
                        employee_id: ROOT.to_string(),
                        salary: Decimal::new(salary, 0),
                        effective_date: "2024-01-15".to_string(),
                    })
                    .unwrap(),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_wide_hierarchy,
    bench_deep_hierarchy,
    bench_reporting_endpoint,
    bench_compensation_replace,
);
criterion_main!(benches);
