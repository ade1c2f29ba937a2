use crate::*;

// ========== Config defaults ==========

#[test]
fn test_compressor_defaults() {
    let c = CompressorConfig::default();
    assert!((c.target_ratio - 0.5).abs() < 1e-12);
    assert_eq!(c.min_input_bytes, 1024);
    assert_eq!(c.min_input_tokens, 100);
}

#[test]
fn test_filter_defaults() {
    let c = StatisticalFilterConfig::default();
    assert!((c.compression_ratio - 0.5).abs() < 1e-12);
    assert!(c.domain_terms.is_empty());
    assert!(c.enable_protection_masks);
    assert!(c.weights.stopword < 0.0);
}

#[test]
fn test_builders() {
    let c = StatisticalFilterConfig::default()
        .with_ratio(0.3)
        .with_domain_terms(["TensorFlow", "CUDA"])
        .with_protection_masks(false);
    assert!((c.compression_ratio - 0.3).abs() < 1e-12);
    assert!(c.domain_terms.contains("CUDA"));
    assert!(!c.enable_protection_masks);

    let c = CompressorConfig::default().with_min_input_bytes(10).with_min_input_tokens(2);
    assert_eq!(c.min_input_bytes, 10);
    assert_eq!(c.min_input_tokens, 2);
}

// ========== Validation ==========

#[test]
fn test_validate_ratio_bounds() {
    assert!(CompressorConfig::default().with_target_ratio(1.0).validate().is_ok());
    assert!(CompressorConfig::default().with_target_ratio(0.01).validate().is_ok());
    for bad in [0.0, -0.5, 1.5, f64::NAN] {
        let err = CompressorConfig::default().with_target_ratio(bad).validate().unwrap_err();
        assert!(matches!(err, CompressionError::InvalidConfig(_)));
    }
}

#[test]
fn test_validate_blank_domain_term() {
    let c = StatisticalFilterConfig::default().with_domain_terms(["ok", "  "]);
    assert!(matches!(c.validate(), Err(CompressionError::InvalidConfig(_))));
}

// ========== Serde ==========

#[test]
fn test_partial_config_deserializes_with_defaults() {
    let c: StatisticalFilterConfig =
        serde_json::from_str(r#"{"domain_terms":["Synap"],"weights":{"digits":2.0}}"#).unwrap();
    assert!((c.compression_ratio - 0.5).abs() < 1e-12);
    assert!(c.domain_terms.contains("Synap"));
    assert!((c.weights.digits - 2.0).abs() < 1e-12);
    assert!((c.weights.length - 1.0).abs() < 1e-12);
}

// ========== Errors ==========

#[test]
fn test_error_messages() {
    let e = CompressionError::too_few_bytes(600, 1024);
    assert_eq!(e.to_string(), "Input too short (600 bytes), minimum is 1024");
    let e = CompressionError::too_few_tokens(6, 100);
    assert!(e.to_string().contains("tokens"));
    let e = CompressionError::NegativeGain { ratio: 1.0 };
    assert!(e.to_string().contains("1.00"));
}
