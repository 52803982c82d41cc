//! Building field validators from rule specifications.

use crate::config::{BuilderConfig, FieldRules};
use crate::foundation::{BuildError, BuildResult, FieldKind, FieldShape, Shape, Subject};
use crate::object::FieldValidator;
use crate::object::validator::RouteStep;
use crate::rules::RuleParser;
use indexmap::IndexMap;

/// Compiles rule specifications into [`FieldValidator`]s.
///
/// The builder resolves each field's representation once, so the validators
/// it returns never inspect types at validation time.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldrules::prelude::*;
///
/// let builder = ObjectValidatorBuilder::with_default_error_code("DEF");
/// let cp = builder.build("CP", &["REQ:MISSING"], FieldKind::OptionalReference)?;
/// let s = builder.build("S", &["REQ:MISSING"], FieldKind::Scalar);
/// assert!(s.is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectValidatorBuilder {
    parser: RuleParser,
}

impl ObjectValidatorBuilder {
    /// Creates a builder from configuration.
    ///
    /// Without a `default_error_code`, every `REQUIRED` and
    /// `MUTUALLY_EXCLUSIVE` rule must name its own code.
    #[must_use]
    pub fn new(config: BuilderConfig) -> Self {
        let parser = match config.default_error_code {
            Some(code) => RuleParser::with_default_error_code(code),
            None => RuleParser::new(),
        };
        Self { parser }
    }

    /// Builder that fills in `code` for rules that omit one.
    #[must_use]
    pub fn with_default_error_code(code: impl Into<String>) -> Self {
        Self {
            parser: RuleParser::with_default_error_code(code),
        }
    }

    /// The parser used for every field.
    #[must_use]
    pub fn parser(&self) -> &RuleParser {
        &self.parser
    }

    /// Builds a validator for `field` stored with the given `kind`.
    ///
    /// # Errors
    ///
    /// [`BuildError::MalformedRule`] for any unparseable specification and
    /// [`BuildError::UnsupportedFieldType`] when a rule needs presence
    /// semantics that `kind` lacks.
    pub fn build<S: AsRef<str>>(
        &self,
        field: &str,
        specs: &[S],
        kind: FieldKind,
    ) -> BuildResult<FieldValidator> {
        self.compile(field, field, specs, kind)
            .inspect(log_built)
            .inspect_err(log_rejected)
    }

    /// Builds a validator for a field of `T`, taking its kind from
    /// [`Subject::shape`].
    ///
    /// `path` may be dotted (`"Address.City"`). The returned validator is
    /// still run against a `T`: it follows the path down to the field, and
    /// reports nothing when a reference along the way is unset.
    ///
    /// # Errors
    ///
    /// Everything [`build`](Self::build) reports, plus
    /// [`BuildError::UnknownField`] and [`BuildError::NotComposite`] when
    /// `path` does not resolve.
    pub fn build_for<T: Subject, S: AsRef<str>>(
        &self,
        path: &str,
        specs: &[S],
    ) -> BuildResult<FieldValidator> {
        resolve_path(T::shape(), path)
            .and_then(|(name, field, route)| {
                self.compile(name, path, specs, field.kind)
                    .map(|validator| validator.with_route(route))
            })
            .inspect(log_built)
            .inspect_err(log_rejected)
    }

    /// Builds validators for every entry against `T`, nesting dotted paths
    /// under their parent field.
    ///
    /// Fields keep the order in which their path first appears. Repeated
    /// entries for one path append their rules.
    ///
    /// # Errors
    ///
    /// The first [`BuildError`] encountered; nothing is returned on failure.
    pub fn build_all<T: Subject>(&self, entries: &[FieldRules]) -> BuildResult<Vec<FieldValidator>> {
        let mut root = PathNode::default();
        for entry in entries {
            root.insert(entry.field(), entry.specs());
        }
        self.build_fields(&T::shape(), None, &root.children)
            .inspect_err(log_rejected)
    }

    fn build_fields(
        &self,
        shape: &Shape,
        prefix: Option<&str>,
        nodes: &IndexMap<String, PathNode>,
    ) -> BuildResult<Vec<FieldValidator>> {
        nodes
            .iter()
            .map(|(name, node)| {
                let path = match prefix {
                    Some(prefix) => format!("{prefix}.{name}"),
                    None => name.clone(),
                };
                let field = resolve(shape, name, &path)?;
                let mut validator = self.compile(name, &path, &node.specs, field.kind)?;

                if !node.children.is_empty() {
                    let nested = nested_shape(field, &path)?;
                    let children = self.build_fields(&nested, Some(&path), &node.children)?;
                    validator = validator.with_nested(nested.type_name(), children);
                }

                log_built(&validator);
                Ok(validator)
            })
            .collect()
    }

    fn compile<S: AsRef<str>>(
        &self,
        name: &str,
        path: &str,
        specs: &[S],
        kind: FieldKind,
    ) -> BuildResult<FieldValidator> {
        let rules = self.parser.parse(path, specs)?;
        FieldValidator::new(name, path, kind, rules)
    }
}

/// Dotted paths grouped by segment, in first-appearance order.
#[derive(Debug, Default)]
struct PathNode {
    specs: Vec<String>,
    children: IndexMap<String, PathNode>,
}

impl PathNode {
    fn insert(&mut self, path: &str, specs: &[String]) {
        let node = path.split('.').fold(self, |node, segment| {
            node.children.entry(segment.trim().to_owned()).or_default()
        });
        node.specs.extend_from_slice(specs);
    }
}

fn resolve(shape: &Shape, name: &str, path: &str) -> BuildResult<FieldShape> {
    shape
        .field(name)
        .copied()
        .ok_or_else(|| BuildError::UnknownField {
            field: path.to_owned(),
            subject: shape.type_name(),
        })
}

/// Walks a dotted path down to its last segment, recording each composite
/// field crossed on the way.
fn resolve_path(mut shape: Shape, path: &str) -> BuildResult<(&str, FieldShape, Vec<RouteStep>)> {
    let (parent, name) = path
        .rsplit_once('.')
        .map_or((None, path), |(parent, name)| (Some(parent), name));

    let mut route = Vec::new();
    if let Some(parent) = parent {
        let mut end = 0;
        for segment in parent.split('.') {
            end += segment.len();
            let walked = &path[..end];
            let field = resolve(&shape, segment, walked)?;
            shape = nested_shape(field, walked)?;
            route.push(RouteStep {
                name: segment.to_owned(),
                kind: field.kind,
                type_name: shape.type_name(),
            });
            end += 1;
        }
    }
    Ok((name, resolve(&shape, name, path)?, route))
}

fn nested_shape(field: FieldShape, path: &str) -> BuildResult<Shape> {
    match field.nested {
        Some(shape) if field.kind.can_nest() => Ok(shape()),
        _ => Err(BuildError::NotComposite {
            field: path.to_owned(),
            kind: field.kind,
        }),
    }
}

fn log_built(validator: &FieldValidator) {
    tracing::debug!(
        field = %validator.path(),
        kind = %validator.kind(),
        rules = validator.rules().len(),
        nested = validator.nested_fields().len(),
        "built field validator"
    );
}

fn log_rejected(error: &BuildError) {
    tracing::warn!(field = %error.field(), %error, "rejected rule declaration");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::FieldValue;
    use crate::rules::{Operator, Rule};
    use pretty_assertions::assert_eq;

    struct Leaf;

    impl Subject for Leaf {
        fn shape() -> Shape {
            Shape::of::<Self>()
                .with_field("Name", FieldShape::new(FieldKind::Scalar))
                .with_field("Tags", FieldShape::new(FieldKind::AssociativeCollection))
        }

        fn field(&self, _name: &str) -> Option<FieldValue<'_>> {
            None
        }
    }

    struct Root;

    impl Subject for Root {
        fn shape() -> Shape {
            Shape::of::<Self>()
                .with_field(
                    "Leaf",
                    FieldShape::nested(FieldKind::OptionalReference, Leaf::shape),
                )
                .with_field("Count", FieldShape::new(FieldKind::Scalar))
        }

        fn field(&self, _name: &str) -> Option<FieldValue<'_>> {
            None
        }
    }

    #[test]
    fn builds_with_explicit_kind() {
        let builder = ObjectValidatorBuilder::with_default_error_code("DEF");
        let validator = builder
            .build("CP", &["REQ", "MEX:a"], FieldKind::OptionalReference)
            .unwrap();
        assert_eq!(validator.path(), "CP");
        assert_eq!(
            validator.rules(),
            [
                Rule::Required { code: "DEF".into() },
                Rule::MutuallyExclusive {
                    companions: vec!["a".into()],
                    code: "DEF".into(),
                },
            ]
        );
    }

    #[test]
    fn default_config_requires_codes() {
        let builder = ObjectValidatorBuilder::new(BuilderConfig::default());
        let err = builder
            .build("CP", &["REQ"], FieldKind::OptionalReference)
            .unwrap_err();
        assert!(matches!(err, BuildError::MalformedRule { .. }));
    }

    #[test]
    fn rejects_required_on_scalar() {
        let builder = ObjectValidatorBuilder::default();
        let err = builder
            .build("S", &["REQ:MISSING"], FieldKind::Scalar)
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::UnsupportedFieldType {
                field: "S".into(),
                kind: FieldKind::Scalar,
                operator: Operator::Required,
            }
        );
    }

    #[test]
    fn build_for_resolves_dotted_paths() {
        let builder = ObjectValidatorBuilder::default();
        let validator = builder
            .build_for::<Root, _>("Leaf.Tags", &["REQ:NO_TAGS"])
            .unwrap();
        assert_eq!(validator.name(), "Tags");
        assert_eq!(validator.path(), "Leaf.Tags");
        assert_eq!(validator.kind(), FieldKind::AssociativeCollection);
    }

    #[test]
    fn build_for_reports_unknown_and_non_composite() {
        let builder = ObjectValidatorBuilder::default();
        assert!(matches!(
            builder.build_for::<Root, &str>("Nope", &[]),
            Err(BuildError::UnknownField { field, .. }) if field == "Nope"
        ));
        assert!(matches!(
            builder.build_for::<Root, &str>("Leaf.Nope", &[]),
            Err(BuildError::UnknownField { field, .. }) if field == "Leaf.Nope"
        ));
        assert_eq!(
            builder.build_for::<Root, &str>("Count.Inner", &[]).unwrap_err(),
            BuildError::NotComposite {
                field: "Count".into(),
                kind: FieldKind::Scalar,
            }
        );
    }

    #[test]
    fn build_all_nests_and_merges() {
        let builder = ObjectValidatorBuilder::default();
        let entries = [
            FieldRules::new("Leaf.Tags", ["REQ:NO_TAGS"]),
            FieldRules::new("Count", ["MEX:other:X"]),
            FieldRules::new("Leaf", ["REQ:NO_LEAF"]),
            FieldRules::new("Leaf.Tags", ["STOPALL"]),
        ];
        let fields = builder.build_all::<Root>(&entries).unwrap();

        let paths: Vec<_> = fields.iter().map(FieldValidator::path).collect();
        assert_eq!(paths, ["Leaf", "Count"]);
        assert_eq!(fields[0].rules().len(), 1);

        let tags = &fields[0].nested_fields()[0];
        assert_eq!(tags.path(), "Leaf.Tags");
        assert_eq!(tags.rules().len(), 2);
        assert!(tags.stops_all());
    }

    #[test]
    fn build_all_is_all_or_nothing() {
        let builder = ObjectValidatorBuilder::default();
        let entries = [
            FieldRules::new("Leaf", ["REQ:NO_LEAF"]),
            FieldRules::new("Leaf.Name", ["REQ:NO_NAME"]),
        ];
        let err = builder.build_all::<Root>(&entries).unwrap_err();
        assert_eq!(err.field(), "Leaf.Name");
    }
}
