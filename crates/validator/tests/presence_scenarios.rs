//! REQUIRED against each field kind, built through the object validator path.

use fieldrules::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashMap;

struct Child {
    cp: Option<String>,
}

struct Parent {
    cp: Option<Box<Child>>,
    cm: Option<HashMap<String, String>>,
    cv: Child,
    s: String,
}

subject! { Child { "CP" => cp: reference } }

subject! {
    Parent {
        "CP" => cp: reference(Child),
        "CM" => cm: collection,
        "CV" => cv: embedded(Child),
        "S" => s: scalar,
    }
}

fn empty_parent() -> Parent {
    Parent {
        cp: None,
        cm: None,
        cv: Child { cp: None },
        s: String::new(),
    }
}

fn builder() -> ObjectValidatorBuilder {
    ObjectValidatorBuilder::with_default_error_code("DEF")
}

fn codes(validator: &FieldValidator, parent: &Parent) -> Vec<String> {
    let known = KnownSetFields::new();
    validator
        .validate(&ValidationContext::new(parent, &known))
        .unwrap()
        .into_error_codes()
}

#[test]
fn unset_reference_is_missing() {
    let validator = builder()
        .build("CP", &["REQUIRED:MISSING"], FieldKind::OptionalReference)
        .unwrap();
    assert_eq!(codes(&validator, &empty_parent()), ["MISSING"]);
}

#[test]
fn assigned_reference_passes() {
    let validator = builder()
        .build("CP", &["REQUIRED:MISSING"], FieldKind::OptionalReference)
        .unwrap();
    let mut parent = empty_parent();
    parent.cp = Some(Box::new(Child { cp: None }));
    assert!(codes(&validator, &parent).is_empty());
}

#[test]
fn default_code_is_used_when_rule_omits_one() {
    let validator = builder()
        .build("CP", &["REQ"], FieldKind::OptionalReference)
        .unwrap();
    assert_eq!(codes(&validator, &empty_parent()), ["DEF"]);
}

#[rstest]
#[case(None, vec!["MISSING"])]
#[case(Some(HashMap::new()), vec![])]
#[case(Some(HashMap::from([("k".to_string(), "v".to_string())])), vec![])]
fn collection_presence(
    #[case] cm: Option<HashMap<String, String>>,
    #[case] expected: Vec<&str>,
) {
    let validator = builder()
        .build_for::<Parent, _>("CM", &["REQ:MISSING"])
        .unwrap();
    let mut parent = empty_parent();
    parent.cm = cm;
    assert_eq!(codes(&validator, &parent), expected);
}

#[test]
fn embedded_value_is_never_missing() {
    let validator = builder()
        .build_for::<Parent, _>("CV", &["REQ:MISSING"])
        .unwrap();
    assert!(codes(&validator, &empty_parent()).is_empty());
}

#[test]
fn required_on_scalar_fails_to_build() {
    let explicit = builder().build("S", &["REQUIRED:MISSING"], FieldKind::Scalar);
    assert!(matches!(
        explicit,
        Err(BuildError::UnsupportedFieldType {
            operator: Operator::Required,
            ..
        })
    ));

    let resolved = builder().build_for::<Parent, _>("S", &["REQUIRED:MISSING"]);
    assert!(resolved.is_err());
}

#[test]
fn nested_path_validates_from_the_root_subject() {
    let validator = builder()
        .build_for::<Parent, _>("CV.CP", &["REQ:NO_CHILD_CP"])
        .unwrap();
    let known = KnownSetFields::new();
    let result = validator
        .validate(&ValidationContext::new(&empty_parent(), &known))
        .unwrap();
    assert_eq!(result.error_codes(), ["NO_CHILD_CP"]);
    assert!(result.is_unset());
}

#[test]
fn nested_path_through_a_reference() {
    let validator = builder()
        .build_for::<Parent, _>("CP.CP", &["REQ:NO_CHILD_CP"])
        .unwrap();

    let mut parent = empty_parent();
    parent.cp = Some(Box::new(Child { cp: None }));
    assert_eq!(codes(&validator, &parent), ["NO_CHILD_CP"]);

    parent.cp = Some(Box::new(Child {
        cp: Some("set".into()),
    }));
    assert!(codes(&validator, &parent).is_empty());
}

#[test]
fn unset_reference_on_the_path_leaves_nothing_to_validate() {
    let validator = builder()
        .build_for::<Parent, _>("CP.CP", &["REQ:NO_CHILD_CP"])
        .unwrap();
    let known = KnownSetFields::new();
    let result = validator
        .validate(&ValidationContext::new(&empty_parent(), &known))
        .unwrap();
    assert!(result.is_empty());
    assert!(!result.is_unset());
}

#[test]
fn validator_for_wrong_kind_reports_invalid_subject() {
    let validator = builder()
        .build("CM", &["REQ:MISSING"], FieldKind::OptionalReference)
        .unwrap();
    let parent = empty_parent();
    let known = KnownSetFields::new();
    let err = validator
        .validate(&ValidationContext::new(&parent, &known))
        .unwrap_err();
    assert!(matches!(err, InvalidSubjectError::KindMismatch { .. }));
}
