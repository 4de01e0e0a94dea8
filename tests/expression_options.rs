use verbal_expressions::{
    ExpressionError, ExpressionOptions, ExpressionOptionsError, Modifier, Modifiers,
    VerbalExpression,
};

#[test]
fn options_when_defaults_then_global_multiline_and_auto_close() {
    let options = ExpressionOptions::default();
    assert_eq!(options.modifiers, Modifiers::GLOBAL | Modifiers::MULTILINE);
    assert!(options.close_open_captures);
    assert!(options.validate().is_ok());
}

#[test]
fn options_when_all_fields_customized_then_values_are_assigned() {
    let options = ExpressionOptions::builder()
        .modifiers(Modifiers::empty())
        .modifier(Modifier::IgnoreCase, true)
        .close_open_captures(false)
        .size_limit(1 << 16)
        .dfa_size_limit(1 << 12)
        .nest_limit(32)
        .build()
        .expect("options should build");

    assert_eq!(options.modifiers, Modifiers::IGNORE_CASE);
    assert!(!options.close_open_captures);
    assert_eq!(options.size_limit, 1 << 16);
    assert_eq!(options.dfa_size_limit, 1 << 12);
    assert_eq!(options.nest_limit, 32);
}

#[test]
fn options_when_limits_zero_then_build_fails() {
    assert_eq!(
        ExpressionOptions::builder().size_limit(0).build(),
        Err(ExpressionOptionsError::SizeLimitInvalid)
    );
    assert_eq!(
        ExpressionOptions::builder().dfa_size_limit(0).build(),
        Err(ExpressionOptionsError::DfaSizeLimitInvalid)
    );
    assert_eq!(
        ExpressionOptions::builder().nest_limit(0).build(),
        Err(ExpressionOptionsError::NestLimitInvalid)
    );
}

#[test]
fn try_with_options_when_invalid_then_errors() {
    let options = ExpressionOptions {
        nest_limit: 0,
        ..Default::default()
    };
    match VerbalExpression::try_with_options(options).expect_err("nest_limit 0 is invalid") {
        ExpressionError::Options(ExpressionOptionsError::NestLimitInvalid) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn with_options_when_modifiers_given_then_expression_starts_with_them() {
    let options = ExpressionOptions::builder()
        .modifiers(Modifiers::IGNORE_CASE)
        .build()
        .expect("options should build");
    let expr = VerbalExpression::with_options(options).then("abc");
    assert_eq!(expr.to_string(), "/abc/i");
    assert!(expr.is_match("ABC").unwrap());
    assert_eq!(expr.matches("abc ABC").unwrap().len(), 1);
}

#[test]
fn nest_limit_when_exceeded_then_compile_fails() {
    let options = ExpressionOptions::builder()
        .nest_limit(2)
        .build()
        .expect("options should build");
    let expr = VerbalExpression::with_options(options)
        .begin_capture()
        .begin_capture()
        .begin_capture()
        .then("a")
        .end_capture()
        .end_capture()
        .end_capture();
    assert!(matches!(
        expr.compile(),
        Err(ExpressionError::Compile { .. })
    ));
}

#[test]
fn options_when_serialized_then_round_trips() {
    let options = ExpressionOptions::builder()
        .modifier(Modifier::Sticky, true)
        .close_open_captures(false)
        .build()
        .expect("options should build");

    let json = serde_json::to_string(&options).expect("options should serialize");
    let restored: ExpressionOptions =
        serde_json::from_str(&json).expect("options should deserialize");
    assert_eq!(restored, options);
}

#[test]
fn options_when_fields_missing_then_defaults_fill_in() {
    let restored: ExpressionOptions =
        serde_json::from_str(r#"{"close_open_captures": false}"#).expect("partial options");
    assert!(!restored.close_open_captures);
    assert_eq!(restored.modifiers, Modifiers::default());
    assert_eq!(restored.nest_limit, ExpressionOptions::default().nest_limit);
}
