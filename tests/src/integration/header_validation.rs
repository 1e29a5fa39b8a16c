//! # Header Validation Integration Tests
//!
//! Drives qc-18-header-validation end to end: schedule loaded from JSON,
//! service resolving rule sets per height, pipeline reporting through
//! diagnostics sinks.
//!
//! ## Flows Tested:
//!
//! 1. **Timestamp spacing scenarios**: the five reference cases for the
//!    spacing rule alone and inside a pipeline
//! 2. **Chain import**: a chain built header by header under a two-milestone
//!    schedule with attached rules
//! 3. **Concurrent validation**: one service shared by many tasks

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use qc_18_header_validation::{
        BlockHeader, ChannelSink, DetachedRule, DiagnosticKind, DiagnosticLevel, EngineFault,
        HeaderValidationApi, HeaderValidationService, HeaderValidator, HeaderViolation,
        InMemoryChain, MemorySink, Rule, RuleOutcome, RuleSchedule, RuleSet, ScheduleConfig,
        TimestampSpacingRule, ValidationConfig,
    };
    use qc_18_header_validation::ports::FixedTimeSource;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn genesis() -> BlockHeader {
        BlockHeader {
            version: 1,
            number: 0,
            parent_hash: [0u8; 32],
            timestamp: 1000,
            proposer: [0x11; 32],
            gas_limit: 30_000_000,
            gas_used: 0,
            extra_data: vec![],
        }
    }

    fn header_at(number: u64, timestamp: u64) -> BlockHeader {
        BlockHeader {
            number,
            timestamp,
            parent_hash: [number as u8; 32],
            ..genesis()
        }
    }

    fn spacing_rule(minimum: i64, config: ValidationConfig) -> TimestampSpacingRule {
        TimestampSpacingRule::new(minimum, Arc::new(config)).expect("valid minimum")
    }

    const SCHEDULE_JSON: &str = r#"{
        "milestones": [
            {
                "name": "genesis",
                "activation_height": 0,
                "rules": [
                    { "rule": "ancestry" },
                    { "rule": "timestamp_spacing", "minimum_seconds_since_parent": 1 },
                    { "rule": "gas_usage" },
                    { "rule": "extra_data_max_length", "max_len": 32 }
                ]
            },
            {
                "name": "attached",
                "activation_height": 4,
                "rules": [
                    { "rule": "ancestry" },
                    { "rule": "parent_known" },
                    { "rule": "timestamp_spacing", "minimum_seconds_since_parent": 5 },
                    { "rule": "median_time_past", "window": 3 },
                    { "rule": "future_timestamp", "max_drift_secs": 15 },
                    { "rule": "gas_usage" },
                    { "rule": "gas_limit_bounds", "minimum": 5000, "maximum": 60000000, "bound_divisor": 1024 }
                ]
            }
        ]
    }"#;

    fn schedule(config: ValidationConfig) -> Arc<RuleSchedule> {
        let parsed = ScheduleConfig::from_json(SCHEDULE_JSON).expect("schedule parses");
        Arc::new(RuleSchedule::from_config(&parsed, Arc::new(config)).expect("schedule builds"))
    }

    // =============================================================================
    // TIMESTAMP SPACING SCENARIOS
    // =============================================================================

    #[test]
    fn scenario_one_second_later_passes() {
        let rule = spacing_rule(1, ValidationConfig::production());
        let outcome = rule
            .evaluate(&header_at(2, 1001), &header_at(1, 1000))
            .unwrap();
        assert_eq!(outcome, RuleOutcome::Pass);
    }

    #[test]
    fn scenario_same_second_fails_with_zero_delta() {
        let rule = spacing_rule(1, ValidationConfig::production());
        let outcome = rule
            .evaluate(&header_at(2, 1000), &header_at(1, 1000))
            .unwrap();
        let RuleOutcome::Fail(violation) = outcome else {
            panic!("expected rejection");
        };
        assert!(matches!(
            violation,
            HeaderViolation::TimestampTooClose {
                delta: 0,
                minimum_seconds_since_parent: 1,
                ..
            }
        ));
        let reason = violation.to_string();
        assert!(reason.contains("only 0 seconds"), "{reason}");
        assert!(reason.contains("Minimum 1 seconds"), "{reason}");
    }

    #[test]
    fn scenario_earlier_than_parent_fails_with_negative_delta() {
        let rule = spacing_rule(1, ValidationConfig::production());
        let outcome = rule
            .evaluate(&header_at(2, 999), &header_at(1, 1000))
            .unwrap();
        assert!(matches!(
            outcome,
            RuleOutcome::Fail(HeaderViolation::TimestampTooClose { delta: -1, .. })
        ));
    }

    #[test]
    fn scenario_override_passes_with_single_warning() {
        let sink = Arc::new(MemorySink::new());
        let validator = HeaderValidator::new(sink.clone());
        let rules = RuleSet::builder()
            .detached(spacing_rule(1, ValidationConfig::with_dev_override()))
            .build()
            .unwrap();

        let verdict = validator
            .validate(&rules, &header_at(2, 999), Some(&header_at(1, 1000)), None)
            .unwrap();

        assert!(verdict.passed);
        assert_eq!(sink.event_count(), 1);
        assert_eq!(sink.count_at(DiagnosticLevel::Warn), 1);
    }

    #[test]
    fn scenario_pipeline_with_five_second_minimum_passes() {
        let validator = HeaderValidator::new(Arc::new(MemorySink::new()));
        let rules = RuleSet::builder()
            .detached(spacing_rule(5, ValidationConfig::production()))
            .build()
            .unwrap();

        let verdict = validator
            .validate(&rules, &header_at(2, 106), Some(&header_at(1, 100)), None)
            .unwrap();
        assert!(verdict.passed);
        assert!(verdict.failure.is_none());
    }

    // =============================================================================
    // CHAIN IMPORT UNDER A SCHEDULE
    // =============================================================================

    #[test]
    fn test_chain_import_across_milestones() {
        let sink = Arc::new(MemorySink::new());
        let service =
            HeaderValidationService::new(schedule(ValidationConfig::production()), sink.clone());
        let genesis = genesis();
        let chain =
            InMemoryChain::with_time_source(genesis.clone(), Arc::new(FixedTimeSource(10_000)));

        assert!(service.validate_header(&genesis, None, None).unwrap().passed);

        let mut tip = genesis;
        for _ in 1..=6 {
            let next = tip.child(6);
            let verdict = service
                .validate_header(&next, Some(&tip), Some(&chain))
                .unwrap();
            assert!(verdict.passed, "height {}: {:?}", next.number, verdict.reason());
            chain.insert(next.clone());
            tip = next;
        }
        assert_eq!(sink.event_count(), 0);

        // a 2 second gap was fine before height 4 but not after
        let rushed = tip.child(2);
        let verdict = service
            .validate_header(&rushed, Some(&tip), Some(&chain))
            .unwrap();
        assert_eq!(verdict.failure.as_ref().unwrap().rule, "timestamp_spacing");
        assert_eq!(verdict.failure.as_ref().unwrap().index, 2);

        // too far ahead of the context clock
        let future = BlockHeader {
            timestamp: 10_016,
            ..tip.child(0)
        };
        let verdict = service
            .validate_header(&future, Some(&tip), Some(&chain))
            .unwrap();
        assert_eq!(verdict.failure.unwrap().rule, "future_timestamp");

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| event.level == DiagnosticLevel::Info));
    }

    #[test]
    fn test_unknown_parent_rejected_once_attached() {
        let service = HeaderValidationService::new(
            schedule(ValidationConfig::production()),
            Arc::new(MemorySink::new()),
        );
        let genesis = genesis();
        let chain = InMemoryChain::with_time_source(genesis.clone(), Arc::new(FixedTimeSource(0)));

        // a valid-looking parent the chain has never seen
        let mut parent = genesis;
        for _ in 0..4 {
            parent = parent.child(10);
        }
        let header = parent.child(10);

        let verdict = service
            .validate_header(&header, Some(&parent), Some(&chain))
            .unwrap();
        assert!(matches!(
            verdict.violation(),
            Some(HeaderViolation::UnknownParent { .. })
        ));
    }

    #[test]
    fn test_override_reaches_rules_built_from_schedule() {
        let sink = Arc::new(MemorySink::new());
        let service = HeaderValidationService::new(
            schedule(ValidationConfig::with_dev_override()),
            sink.clone(),
        );
        let genesis = genesis();
        let same_second = genesis.child(0);

        let verdict = service
            .validate_header(&same_second, Some(&genesis), None)
            .unwrap();
        assert!(verdict.passed);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].kind, DiagnosticKind::Bypassed(_)));
    }

    #[test]
    fn test_fault_is_not_a_verdict() {
        let service = HeaderValidationService::new(
            schedule(ValidationConfig::production()),
            Arc::new(MemorySink::new()),
        );
        let orphan = header_at(9, 2000);
        assert_eq!(
            service.validate_header(&orphan, None, None),
            Err(EngineFault::MissingParent { number: 9 })
        );
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_validation_shares_service() {
        let (sink, mut receiver) = ChannelSink::new(256);
        let service = Arc::new(HeaderValidationService::new(
            schedule(ValidationConfig::production()),
            Arc::new(sink),
        ));
        let genesis = genesis();

        let mut handles = Vec::new();
        for spacing in 0..32u64 {
            let service = service.clone();
            let genesis = genesis.clone();
            handles.push(tokio::spawn(async move {
                let child = genesis.child(spacing);
                let verdict = service
                    .validate_header(&child, Some(&genesis), None)
                    .unwrap();
                (spacing, verdict.passed)
            }));
        }

        for handle in handles {
            let (spacing, passed) = handle.await.unwrap();
            assert_eq!(passed, spacing >= 1);
        }

        drop(service);
        let event = receiver.recv().await.expect("one rejection recorded");
        assert_eq!(event.block_number, 1);
        assert!(receiver.recv().await.is_none());
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    /// Rule failing for headers whose number is divisible by `modulus`
    struct DivisibleNumberRule {
        modulus: u64,
    }

    impl DetachedRule for DivisibleNumberRule {
        fn name(&self) -> &'static str {
            "divisible_number"
        }

        fn evaluate(
            &self,
            header: &BlockHeader,
            _parent: &BlockHeader,
        ) -> Result<RuleOutcome, EngineFault> {
            if header.number % self.modulus == 0 {
                Ok(RuleOutcome::Fail(HeaderViolation::InvalidNumber {
                    expected: header.number + 1,
                    actual: header.number,
                }))
            } else {
                Ok(RuleOutcome::Pass)
            }
        }
    }

    proptest! {
        #[test]
        fn prop_verdict_is_conjunction_regardless_of_order(
            number in 1u64..10_000,
            moduli in proptest::collection::vec(2u64..20, 1..6),
        ) {
            let validator = HeaderValidator::new(Arc::new(MemorySink::new()));
            let forward: Vec<Rule> = moduli
                .iter()
                .map(|&modulus| Rule::detached(DivisibleNumberRule { modulus }))
                .collect();
            let mut backward = forward.clone();
            backward.reverse();

            let header = header_at(number, 0);
            let parent = header_at(number - 1, 0);
            let forward = validator
                .validate(&RuleSet::new(forward).unwrap(), &header, Some(&parent), None)
                .unwrap();
            let backward = validator
                .validate(&RuleSet::new(backward).unwrap(), &header, Some(&parent), None)
                .unwrap();

            let expected = moduli.iter().all(|modulus| number % modulus != 0);
            prop_assert_eq!(forward.passed, expected);
            prop_assert_eq!(backward.passed, expected);
        }

        #[test]
        fn prop_pipeline_matches_spacing_rule(
            minimum in 0i64..1_000,
            parent_ts in 0u64..100_000,
            header_ts in 0u64..100_000,
        ) {
            let validator = HeaderValidator::new(Arc::new(MemorySink::new()));
            let rules = RuleSet::builder()
                .detached(spacing_rule(minimum, ValidationConfig::production()))
                .build()
                .unwrap();
            let verdict = validator
                .validate(&rules, &header_at(2, header_ts), Some(&header_at(1, parent_ts)), None)
                .unwrap();
            let delta = i128::from(header_ts) - i128::from(parent_ts);
            prop_assert_eq!(verdict.passed, delta >= i128::from(minimum));
        }
    }
}
