//! Integration tests for PQCBench
//!
//! These tests drive the engine end to end through mock primitives with
//! call counters and failure injection, plus a short run against PQClean.

use pqcbench::{
    Algorithm, AlgorithmDescriptor, AlgorithmKind, BenchError, ExecutionConfig, Executor,
    KemLengths, KemScheme, OpResult, Operation, OperationError, Provider, ProviderRegistry,
    SignatureLengths, SignatureScheme, architecture, benchmark, benchmark_operation,
    default_registry, generate_csv_report, generate_json_report, remove_outliers, validate,
};
use pqcbench_cli::{build_plan, count_failures};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct Calls {
    keygen: Cell<usize>,
    encaps: Cell<usize>,
    decaps: Cell<usize>,
}

fn bump(counter: &Cell<usize>) -> usize {
    let n = counter.get();
    counter.set(n + 1);
    n
}

/// KEM that fails on chosen call indices
#[derive(Default)]
struct MockKem {
    calls: Rc<Calls>,
    keygen_fails: bool,
    decaps_fail_on_call: Option<usize>,
}

impl KemScheme for MockKem {
    fn keygen(&self, pk: &mut [u8], sk: &mut [u8]) -> OpResult {
        bump(&self.calls.keygen);
        if self.keygen_fails {
            return Err(OperationError::Status(-3));
        }
        pk.fill(0xAA);
        sk.fill(0x55);
        Ok(())
    }

    fn encaps(&self, ct: &mut [u8], ss: &mut [u8], pk: &[u8]) -> OpResult {
        bump(&self.calls.encaps);
        ct.copy_from_slice(&pk[..ct.len()]);
        ss.fill(7);
        Ok(())
    }

    fn decaps(&self, ss: &mut [u8], _ct: &[u8], _sk: &[u8]) -> OpResult {
        let call = bump(&self.calls.decaps);
        if self.decaps_fail_on_call == Some(call) {
            return Err(OperationError::Status(-1));
        }
        ss.fill(7);
        Ok(())
    }
}

const MOCK_KEM_LENGTHS: KemLengths = KemLengths {
    public_key: 800,
    secret_key: 1632,
    ciphertext: 768,
    shared_secret: 32,
};

fn mock_kem(scheme: MockKem) -> Algorithm {
    Algorithm::kem("mock-kem", "512", MOCK_KEM_LENGTHS, scheme)
}

fn config(iterations: usize, warmup: usize) -> ExecutionConfig {
    ExecutionConfig {
        iterations,
        warmup_iterations: warmup,
        ..Default::default()
    }
}

/// Signature scheme whose signatures are shorter than the declared maximum
struct MockSignature;

const MOCK_SIG_LEN: usize = 64;

impl SignatureScheme for MockSignature {
    fn keygen(&self, pk: &mut [u8], sk: &mut [u8]) -> OpResult {
        pk.fill(1);
        sk.fill(2);
        Ok(())
    }

    fn sign(&self, sig: &mut [u8], msg: &[u8], _sk: &[u8]) -> Result<usize, OperationError> {
        sig[..MOCK_SIG_LEN].fill(msg.len() as u8);
        Ok(MOCK_SIG_LEN)
    }

    fn verify(&self, msg: &[u8], sig: &[u8], _pk: &[u8]) -> OpResult {
        if sig.len() == MOCK_SIG_LEN && sig.iter().all(|&b| b == msg.len() as u8) {
            Ok(())
        } else {
            Err(OperationError::VerificationFailed)
        }
    }
}

fn mock_signature() -> Algorithm {
    Algorithm::signature(
        "mock-sig",
        "2",
        SignatureLengths {
            public_key: 1312,
            secret_key: 2560,
            signature: 2420,
        },
        MockSignature,
    )
}

#[test]
fn test_kem_benchmark_produces_three_operations() {
    let alg = mock_kem(MockKem::default());
    let set = benchmark(&alg, &config(100, 10)).unwrap();

    assert_eq!(set.algorithm, "mock-kem");
    assert_eq!(set.architecture, architecture());
    assert_eq!(set.len(), 3);

    let ops: Vec<Operation> = set.results.iter().map(|r| r.operation).collect();
    assert_eq!(ops, vec![Operation::Keygen, Operation::Encaps, Operation::Decaps]);

    for result in &set.results {
        assert_eq!(result.num_samples(), 100);
        assert_eq!(result.statistics.sample_count, 100);
        assert_eq!(result.outliers_removed, 0);
        let s = &result.statistics;
        assert!(s.min <= s.median && s.median <= s.max);
        assert!(s.p95 <= s.p99 && s.p99 <= s.max);
        assert!(s.std_dev >= 0.0);
    }
}

#[test]
fn test_setup_runs_once_before_warmup() {
    let calls = Rc::new(Calls::default());
    let alg = mock_kem(MockKem {
        calls: Rc::clone(&calls),
        ..Default::default()
    });
    benchmark(&alg, &config(100, 10)).unwrap();

    // keygen: 110 measured-phase calls, plus one setup call each for encaps and decaps
    assert_eq!(calls.keygen.get(), 112);
    // encaps: 110 calls, plus one setup call for decaps
    assert_eq!(calls.encaps.get(), 111);
    assert_eq!(calls.decaps.get(), 110);
}

#[test]
fn test_timed_failure_discards_the_whole_algorithm() {
    // Call 15 is timed iteration 5 after 10 warmup calls
    let alg = mock_kem(MockKem {
        decaps_fail_on_call: Some(15),
        ..Default::default()
    });
    let err = benchmark(&alg, &config(100, 10)).unwrap_err();

    match err {
        BenchError::OperationFailed {
            algorithm,
            operation,
            iteration,
            source,
        } => {
            assert_eq!(algorithm, "mock-kem");
            assert_eq!(operation, Operation::Decaps);
            assert_eq!(iteration, 5);
            assert!(matches!(source, OperationError::Status(-1)));
        }
        other => panic!("expected OperationFailed, got {other:?}"),
    }
}

#[test]
fn test_warmup_failure_is_ignored() {
    let alg = mock_kem(MockKem {
        decaps_fail_on_call: Some(3),
        ..Default::default()
    });
    let result = benchmark_operation(&alg, "decaps", &config(20, 10)).unwrap();
    assert_eq!(result.num_samples(), 20);
}

#[test]
fn test_prerequisite_failure_reports_setup_step() {
    let alg = mock_kem(MockKem {
        keygen_fails: true,
        ..Default::default()
    });
    let err = benchmark_operation(&alg, "encaps", &config(10, 0)).unwrap_err();

    assert!(matches!(
        err,
        BenchError::SetupFailed {
            operation: Operation::Encaps,
            step: Operation::Keygen,
            ..
        }
    ));
    assert!(err.to_string().contains("setup step keygen failed"));
}

#[test]
fn test_operation_not_applicable_to_kind() {
    let alg = mock_kem(MockKem::default());
    let err = benchmark_operation(&alg, "sign", &config(10, 0)).unwrap_err();
    assert!(matches!(
        err,
        BenchError::NotSupported {
            operation: Operation::Sign,
            ..
        }
    ));

    let err = benchmark_operation(&alg, "frobnicate", &config(10, 0)).unwrap_err();
    assert!(matches!(err, BenchError::InvalidParam(_)));
}

#[test]
fn test_invalid_config_touches_no_primitive() {
    let calls = Rc::new(Calls::default());
    let alg = mock_kem(MockKem {
        calls: Rc::clone(&calls),
        ..Default::default()
    });

    let err = benchmark(&alg, &config(0, 10)).unwrap_err();
    assert!(matches!(err, BenchError::InvalidParam(_)));
    assert_eq!(calls.keygen.get(), 0);
}

#[test]
fn test_invalid_algorithm_touches_no_primitive() {
    let calls = Rc::new(Calls::default());
    let zero_ct = Algorithm::kem(
        "zero-ct",
        "0",
        KemLengths {
            ciphertext: 0,
            ..MOCK_KEM_LENGTHS
        },
        MockKem {
            calls: Rc::clone(&calls),
            ..Default::default()
        },
    );

    let err = benchmark(&zero_ct, &config(10, 2)).unwrap_err();
    assert!(matches!(err, BenchError::InvalidParam(ref m) if m == "ciphertext length must be non-zero"));
    let err = benchmark_operation(&zero_ct, "keygen", &config(10, 2)).unwrap_err();
    assert!(matches!(err, BenchError::InvalidParam(_)));

    let unnamed = Algorithm::kem(
        "",
        "512",
        MOCK_KEM_LENGTHS,
        MockKem {
            calls: Rc::clone(&calls),
            ..Default::default()
        },
    );
    let err = benchmark(&unnamed, &config(10, 2)).unwrap_err();
    assert!(matches!(err, BenchError::NullInput("algorithm name")));

    assert_eq!(calls.keygen.get(), 0);
    assert_eq!(calls.encaps.get(), 0);
    assert_eq!(calls.decaps.get(), 0);
}

#[test]
fn test_signature_benchmark_uses_actual_signature_length() {
    let alg = mock_signature();
    let set = benchmark(&alg, &config(50, 5)).unwrap();

    let ops: Vec<Operation> = set.results.iter().map(|r| r.operation).collect();
    assert_eq!(ops, vec![Operation::Keygen, Operation::Sign, Operation::Verify]);
    assert!(set.results.iter().all(|r| r.num_samples() == 50));
}

#[test]
fn test_descriptor_validation() {
    // A KEM descriptor that also carries a signing entry point is rejected
    let mixed = AlgorithmDescriptor {
        name: "mixed".to_string(),
        variant: "1".to_string(),
        kind: Some(AlgorithmKind::Kem),
        public_key_len: 32,
        secret_key_len: 32,
        ciphertext_len: 32,
        shared_secret_len: 32,
        keygen: Some(Box::new(|_, _| Ok(()))),
        encaps: Some(Box::new(|_, _, _| Ok(()))),
        decaps: Some(Box::new(|_, _, _| Ok(()))),
        sign: Some(Box::new(|_, _, _| Ok(0))),
        ..Default::default()
    };
    assert!(matches!(validate(&mixed), Err(BenchError::InvalidParam(_))));
    assert!(Algorithm::try_from(mixed).is_err());

    let kem = AlgorithmDescriptor {
        name: "descriptor-kem".to_string(),
        variant: "1".to_string(),
        kind: Some(AlgorithmKind::Kem),
        public_key_len: 32,
        secret_key_len: 32,
        ciphertext_len: 32,
        shared_secret_len: 16,
        keygen: Some(Box::new(|pk, sk| {
            pk.fill(1);
            sk.fill(1);
            Ok(())
        })),
        encaps: Some(Box::new(|_, ss, _| {
            ss.fill(9);
            Ok(())
        })),
        decaps: Some(Box::new(|ss, _, _| {
            ss.fill(9);
            Ok(())
        })),
        ..Default::default()
    };
    validate(&kem).unwrap();
    let alg = Algorithm::try_from(kem).unwrap();
    assert_eq!(alg.kind(), AlgorithmKind::Kem);
    assert_eq!(benchmark(&alg, &config(10, 1)).unwrap().len(), 3);
}

#[test]
fn test_outlier_removal_scenario() {
    let mut samples = vec![1000u64; 95];
    samples.extend([50_000, 60_000, 70_000, 80_000, 90_000]);

    let analysis = remove_outliers(&samples, 1.5);
    assert_eq!(analysis.retained_count(), 95);
    assert_eq!(analysis.high_outlier_count, 5);
    assert_eq!(analysis.low_outlier_count, 0);
    assert!(analysis.retained.iter().all(|&s| s == 1000));

    // Applied through the engine, kept plus dropped always equals the iteration count
    let alg = mock_kem(MockKem::default());
    let cfg = ExecutionConfig {
        remove_outliers: true,
        ..config(200, 10)
    };
    let set = benchmark(&alg, &cfg).unwrap();
    for result in &set.results {
        assert_eq!(result.num_samples() + result.outliers_removed, 200);
        assert_eq!(result.statistics.sample_count, result.num_samples());
    }
}

struct MockProvider;

impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn version(&self) -> &str {
        "1.0"
    }

    fn list_algorithms(&self) -> Vec<String> {
        vec!["mock-kem".to_string(), "broken-kem".to_string(), "mock-sig".to_string()]
    }

    fn create(&self, name: &str) -> Result<Algorithm, BenchError> {
        match name {
            "mock-kem" => Ok(mock_kem(MockKem::default())),
            "broken-kem" => Ok(Algorithm::kem(
                "broken-kem",
                "0",
                MOCK_KEM_LENGTHS,
                MockKem {
                    decaps_fail_on_call: Some(0),
                    ..Default::default()
                },
            )),
            "mock-sig" => Ok(mock_signature()),
            other => Err(BenchError::AlgorithmNotFound(other.to_string())),
        }
    }
}

#[test]
fn test_one_failure_does_not_stop_the_run() {
    let mut registry = ProviderRegistry::new();
    assert!(registry.register(Box::new(MockProvider)).unwrap());
    let provider = registry.find("mock").unwrap();

    let plan = build_plan(provider, None, None);
    assert_eq!(plan.algorithms.len(), 3);

    let runs = Executor::new(config(20, 0)).execute(provider, &plan);
    assert_eq!(runs.len(), 3);
    assert_eq!(count_failures(&runs), 1);

    let broken = runs.iter().find(|r| r.algorithm == "broken-kem").unwrap();
    assert!(matches!(
        broken.outcome,
        Err(BenchError::OperationFailed {
            operation: Operation::Decaps,
            iteration: 0,
            ..
        })
    ));
}

#[test]
fn test_pqclean_mlkem_end_to_end() {
    let registry = default_registry().unwrap();
    assert_eq!(registry.names(), vec!["pqclean"]);

    let mlkem = registry.create(Some("pqclean"), "mlkem512").unwrap();
    let sizes = mlkem.sizes();
    assert_eq!(sizes.public_key, 800);
    assert_eq!(sizes.secret_key, 1632);
    assert_eq!(sizes.ciphertext, 768);
    assert_eq!(sizes.shared_secret, 32);

    let set = benchmark(&mlkem, &config(5, 1)).unwrap();
    assert_eq!(set.len(), 3);

    let json = generate_json_report(&set).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["algorithm"], "mlkem512");
    assert_eq!(value["results"][2]["operation"], "decaps");
    assert_eq!(value["results"][2]["num_samples"], 5);

    let csv = generate_csv_report(&set);
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_pqclean_mldsa_end_to_end() {
    let registry = default_registry().unwrap();
    let mldsa = registry.create(None, "mldsa44").unwrap();
    assert_eq!(mldsa.kind(), AlgorithmKind::Signature);

    let set = benchmark(&mldsa, &config(3, 0)).unwrap();
    assert!(set.get(Operation::Verify).is_some());
}
