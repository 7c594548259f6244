use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use repoaudit::rules::{default_rules, run_rules, RuleContext};
use std::fs;
use tempfile::TempDir;

// Helper function to create a test repository for rule benchmarking
fn create_test_repo(scenario: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    match scenario {
        "minimal" => {
            fs::write(root.join(".gitignore"), ".env\n").unwrap();
            fs::write(root.join("LICENSE"), "MIT License").unwrap();
            fs::write(
                root.join("Makefile"),
                "run:\n\ttrue\ntest:\n\ttrue\nlint:\n\ttrue\nplan:\n\ttrue\napply:\n\ttrue\n",
            )
            .unwrap();
            fs::write(
                root.join("coverage.xml"),
                r#"<coverage line-rate="0.95"/>"#,
            )
            .unwrap();
        }
        "typical" => {
            fs::create_dir_all(root.join("src")).unwrap();
            fs::create_dir_all(root.join("tests")).unwrap();

            fs::write(root.join(".gitignore"), "*.pyc\n").unwrap();
            fs::write(root.join("config.json"), "{}").unwrap();
            fs::write(root.join("Makefile"), "run:\n\ttrue\n").unwrap();
            for i in 0..50 {
                fs::write(
                    root.join(format!("src/module_{i}.py")),
                    "def handler(event):\n    return event\n".repeat(20),
                )
                .unwrap();
            }
            fs::write(root.join("src/settings.py"), "SECRET_KEY=abc123\n").unwrap();
            fs::write(root.join("tests/fixtures.py"), "TOKEN=test\n").unwrap();
        }
        _ => unreachable!(),
    }

    temp_dir
}

fn bench_full_rule_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("rules");

    for scenario in ["minimal", "typical"] {
        let repo = create_test_repo(scenario);
        let ctx = RuleContext::new(repo.path());

        group.bench_with_input(
            BenchmarkId::new("run_rules", scenario),
            &ctx,
            |b, ctx| {
                b.iter(|| {
                    let findings = run_rules(black_box(ctx), &default_rules());
                    black_box(findings)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_full_rule_set);
criterion_main!(benches);
