//! # Header Validation Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Single timestamp rule | < 1µs |
//! | Full detached rule set | < 5µs |
//! | Attached rule set with 11-ancestor median | < 50µs |
//!
//! Headers carry random proposers so hashing is not served from a warm
//! pattern.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use qc_18_header_validation::ports::FixedTimeSource;
use qc_18_header_validation::{
    AncestryRule, BlockHeader, ExtraDataMaxLengthRule, GasLimitBoundsRule, GasUsageRule,
    HeaderValidator, InMemoryChain, MedianTimePastRule, MemorySink, ParentKnownRule, RuleSet,
    TimestampSpacingRule, ValidationConfig,
};

fn random_genesis() -> BlockHeader {
    let mut proposer = [0u8; 32];
    rand::thread_rng().fill(&mut proposer);
    BlockHeader {
        version: 1,
        number: 0,
        parent_hash: [0u8; 32],
        timestamp: 1_700_000_000,
        proposer,
        gas_limit: 30_000_000,
        gas_used: 0,
        extra_data: vec![],
    }
}

fn detached_rules() -> RuleSet {
    let config = Arc::new(ValidationConfig::production());
    RuleSet::builder()
        .detached(AncestryRule)
        .detached(TimestampSpacingRule::new(1, config).expect("valid minimum"))
        .detached(GasUsageRule)
        .detached(GasLimitBoundsRule::new(5_000, 60_000_000, 1024).expect("valid bounds"))
        .detached(ExtraDataMaxLengthRule::default())
        .build()
        .expect("non-empty rule set")
}

fn bench_timestamp_rule(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-timestamp-spacing");
    group.measurement_time(Duration::from_secs(5));

    let validator = HeaderValidator::new(Arc::new(MemorySink::new()));
    let rules = RuleSet::builder()
        .detached(
            TimestampSpacingRule::new(1, Arc::new(ValidationConfig::production()))
                .expect("valid minimum"),
        )
        .build()
        .expect("non-empty rule set");
    let parent = random_genesis();
    let header = parent.child(12);

    group.bench_function("pass", |b| {
        b.iter(|| validator.validate(black_box(&rules), black_box(&header), Some(&parent), None))
    });
    group.finish();
}

fn bench_detached_rule_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-detached-rule-set");
    group.measurement_time(Duration::from_secs(5));

    let validator = HeaderValidator::new(Arc::new(MemorySink::new()));
    let rules = detached_rules();

    for batch in [1usize, 100, 1_000] {
        let mut headers = Vec::with_capacity(batch);
        let mut tip = random_genesis();
        for _ in 0..batch {
            let next = tip.child(12);
            headers.push((tip.clone(), next.clone()));
            tip = next;
        }

        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::new("chain", batch), &headers, |b, headers| {
            b.iter(|| {
                for (parent, header) in headers {
                    black_box(validator.validate(&rules, header, Some(parent), None).ok());
                }
            })
        });
    }
    group.finish();
}

fn bench_attached_rule_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-attached-rule-set");
    group.measurement_time(Duration::from_secs(5));

    let genesis = random_genesis();
    let chain = InMemoryChain::with_time_source(
        genesis.clone(),
        Arc::new(FixedTimeSource(genesis.timestamp + 1_000_000)),
    );
    let mut tip = genesis;
    for _ in 0..64 {
        let next = tip.child(12);
        chain.insert(next.clone());
        tip = next;
    }

    let validator = HeaderValidator::new(Arc::new(MemorySink::new()));
    let rules = RuleSet::builder()
        .detached(AncestryRule)
        .attached(ParentKnownRule)
        .attached(MedianTimePastRule::new(11).expect("non-zero window"))
        .build()
        .expect("non-empty rule set");
    let header = tip.child(12);

    group.bench_function("median_11", |b| {
        b.iter(|| validator.validate(&rules, black_box(&header), Some(&tip), Some(&chain)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_timestamp_rule,
    bench_detached_rule_set,
    bench_attached_rule_set
);
criterion_main!(benches);
