//! Resolution pipeline.
//!
//! [`Resolver::resolve`] runs every stage for one resource and collects all
//! errors before deciding the outcome. Any error diagnostic fails the whole
//! resource; no partial field set is returned.

use crate::attribute::apply_attribute_unpacking;
use crate::classify::{
    assign_singleton, classify, classify_required, flag_conflicts, heuristic_slot, NamePattern, SingletonCandidate,
};
use crate::compare::attach_compare_policy;
use crate::field::ResolvedField;
use crate::late_init::attach_late_init_policy;
use crate::lineage::{resolve_lineage, FieldOccurrence, Lineage};
use crate::present::{attach_present_policy, ColumnPlan};
use crate::reconcile::{is_ambiguous, reconcile_type, ReconciledType, TypeSource};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shapeline_config::{FieldConfig, GeneratorConfig, ResourceConfig};
use shapeline_core::{Attribute, Diagnostic, DiagnosticKind, Diagnostics, ResolveError, Severity, Slot};
use shapeline_shape::ShapeGraph;

/// Resolved field set of one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Resource name
    pub resource: String,
    /// Fields in declaration order
    pub fields: IndexMap<String, ResolvedField>,
    /// Informational and warning diagnostics
    pub diagnostics: Diagnostics,
    /// Listing columns
    pub columns: ColumnPlan,
}

impl Resolution {
    /// Look up a field
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.get(name)
    }

    /// Fields in the Spec slot
    pub fn spec_fields(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.values().filter(|f| f.slot() == Slot::Spec)
    }

    /// Fields in the Status slot
    pub fn status_fields(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.values().filter(|f| f.slot() == Slot::Status)
    }

    /// Primary key field
    #[must_use]
    pub fn primary_key(&self) -> Option<&ResolvedField> {
        self.fields.values().find(|f| f.is_primary_key.get())
    }

    /// ARN field
    #[must_use]
    pub fn arn(&self) -> Option<&ResolvedField> {
        self.fields.values().find(|f| f.is_arn.get())
    }
}

/// Resolution of a resource failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("resource {resource} failed to resolve with {} error(s)", .diagnostics.errors().count())]
pub struct ResolveFailure {
    /// Resource name
    pub resource: String,
    /// Every diagnostic, errors included, in emission order
    pub diagnostics: Diagnostics,
}

impl ResolveFailure {
    /// Error diagnostics only
    pub fn errors(&self) -> impl Iterator<Item = &ResolveError> {
        self.diagnostics.errors()
    }
}

/// Drives resolution against one shape graph
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'g> {
    graph: &'g ShapeGraph,
}

impl<'g> Resolver<'g> {
    /// Create a resolver over `graph`
    #[must_use]
    pub const fn new(graph: &'g ShapeGraph) -> Self {
        Self { graph }
    }

    /// Resolve every resource: graph resources first, then resources that
    /// only appear in the configuration
    #[must_use]
    pub fn resolve_all(&self, config: &GeneratorConfig) -> IndexMap<String, Result<Resolution, ResolveFailure>> {
        let mut names: Vec<String> = self.graph.resources().into_iter().map(str::to_string).collect();
        for name in config.resources.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }

        names
            .into_iter()
            .map(|name| {
                let resource = config.resource_or_default(&name);
                let result = self.resolve(&name, &resource);
                (name, result)
            })
            .collect()
    }

    /// Resolve one resource.
    ///
    /// # Errors
    ///
    /// Returns every error diagnostic found if any stage fails.
    pub fn resolve(&self, resource: &str, config: &ResourceConfig) -> Result<Resolution, ResolveFailure> {
        let _span = tracing::info_span!("resolve", resource).entered();

        let mut diagnostics = Diagnostics::new();
        let mut lineage = resolve_lineage(self.graph, self.graph.resource_operations(resource));
        self.decompose(&mut lineage, config, &mut diagnostics);

        let mut fields: IndexMap<String, ResolvedField> = IndexMap::new();
        for name in field_order(&lineage, config) {
            if let Some(field) = self.resolve_field(&name, &lineage, config, &mut diagnostics) {
                fields.insert(name, field);
            }
        }

        assign_singletons(resource, config, &mut fields, &mut diagnostics);
        check_owner_account_id(&fields, &mut diagnostics);

        for d in &diagnostics {
            match d.severity() {
                Severity::Info => tracing::debug!(field = %d.field, "{d}"),
                Severity::Warning => tracing::warn!(field = %d.field, "{d}"),
                Severity::Error => tracing::debug!(field = %d.field, "{d}"),
            }
        }

        if diagnostics.has_errors() {
            tracing::warn!(errors = diagnostics.errors().count(), "resolution failed");
            return Err(ResolveFailure {
                resource: resource.to_string(),
                diagnostics,
            });
        }

        let columns = ColumnPlan::build(fields.values(), &config.print);
        tracing::info!(fields = fields.len(), columns = columns.columns.len(), "resolved");
        Ok(Resolution {
            resource: resource.to_string(),
            fields,
            diagnostics,
            columns,
        })
    }

    /// Flatten ambiguous structure fields that redirects reach into
    fn decompose(&self, lineage: &mut Lineage, config: &ResourceConfig, diagnostics: &mut Diagnostics) {
        let roots: Vec<&str> = config
            .redirect_roots()
            .filter(|(field, root)| field != root)
            .map(|(_, root)| root)
            .collect();

        for root in roots {
            if !lineage.contains(root)
                || config.directive(root).is_some()
                || config.is_ignored(root)
                || !is_ambiguous(self.graph, lineage.occurrences(root))
            {
                continue;
            }
            if let Some(members) = lineage.decompose(self.graph, root) {
                tracing::debug!(field = root, members = members.len(), "decomposed");
                diagnostics.push(Diagnostic {
                    field: root.to_string(),
                    kind: DiagnosticKind::Decomposed { members },
                });
            }
        }
    }

    fn resolve_field(
        &self,
        name: &str,
        lineage: &Lineage,
        config: &ResourceConfig,
        diagnostics: &mut Diagnostics,
    ) -> Option<ResolvedField> {
        let directive = config.directive(name);
        let ignored = config.is_ignored(name);
        let occurrences = lineage.occurrences(name);

        let slot = classify(occurrences, directive, ignored);
        let without_lineage = ignored && occurrences.is_empty() && directive.is_none_or(|d| d.from.is_none());
        let reconciled = if without_lineage {
            None
        } else {
            match reconcile_type(self.graph, name, occurrences, directive) {
                Ok(r) => Some(r),
                Err(ResolveError::TypeAmbiguity { .. }) if slot.get() == Slot::Ignored => {
                    occurrences.first().map(|o| ReconciledType {
                        ty: o.ty.clone(),
                        source: TypeSource::Lineage,
                    })
                }
                Err(e) => {
                    diagnostics.push_error(e);
                    None
                }
            }
        };

        for e in flag_conflicts(name, slot.get(), directive) {
            diagnostics.push_error(e);
        }
        let compare = attach_compare_policy(name, slot.get(), directive).map_err(|e| diagnostics.push_error(e));
        let present = attach_present_policy(name, slot.get(), directive).map_err(|e| diagnostics.push_error(e));
        let late_init = attach_late_init_policy(name, slot.get(), directive).map_err(|e| diagnostics.push_error(e));

        if without_lineage {
            tracing::debug!(field = name, "ignored field has no lineage");
            return None;
        }
        let ReconciledType { ty, source } = reconciled?;
        let mut field = ResolvedField::new(name, slot, ty, source);
        field.is_required = classify_required(occurrences, directive);
        apply_attribute_unpacking(&mut field, directive.is_some_and(|d| d.is_attribute));
        if let Some(d) = directive {
            field.is_secret = d.is_secret;
            field.is_immutable = d.is_immutable;
            field.is_owner_account_id = d.is_owner_account_id;
        }
        field.compare = compare.ok()?;
        field.present = present.ok()?;
        field.late_init = late_init.ok()?;

        record_overrides(&field, occurrences, directive, diagnostics);
        Some(field)
    }
}

/// Lineage order, then override-only fields in configuration order
fn field_order(lineage: &Lineage, config: &ResourceConfig) -> Vec<String> {
    let mut order: Vec<String> = lineage.names().map(str::to_string).collect();
    for name in config.fields.keys() {
        if !lineage.contains(name) {
            order.push(name.clone());
        }
    }
    order
}

/// Informational diagnostics for overrides that changed a heuristic
fn record_overrides(
    field: &ResolvedField,
    occurrences: &[FieldOccurrence],
    directive: Option<&FieldConfig>,
    diagnostics: &mut Diagnostics,
) {
    let heuristic = heuristic_slot(occurrences);
    if field.slot.is_explicit() && field.slot() != heuristic {
        diagnostics.push(Diagnostic::overridden(&field.name, Attribute::Slot, heuristic, field.slot()));
    }

    if field.is_required.is_explicit() {
        let inferred = classify_required(occurrences, None).get();
        if inferred != field.is_required.get() {
            diagnostics.push(Diagnostic::overridden(
                &field.name,
                Attribute::Required,
                inferred,
                field.is_required.get(),
            ));
        }
    }

    if let Some(from) = directive.and_then(|d| d.from.as_ref()) {
        let shadowed = occurrences
            .iter()
            .filter(|o| o.operation != from.operation || o.member_path != from.path)
            .count();
        if shadowed > 0 {
            diagnostics.push(Diagnostic {
                field: field.name.clone(),
                kind: DiagnosticKind::RedirectShadowsLineage { occurrences: shadowed },
            });
        }
    }
}

fn assign_singletons(
    resource: &str,
    config: &ResourceConfig,
    fields: &mut IndexMap<String, ResolvedField>,
    diagnostics: &mut Diagnostics,
) {
    for pattern in [NamePattern::PrimaryKey, NamePattern::Arn] {
        let candidates: Vec<SingletonCandidate<'_>> = fields
            .values()
            .map(|f| {
                let eligible = f.slot() != Slot::Ignored;
                SingletonCandidate {
                    field: &f.name,
                    explicit: config
                        .directive(&f.name)
                        .and_then(|d| match pattern {
                            NamePattern::PrimaryKey => d.is_primary_key,
                            NamePattern::Arn => d.is_arn,
                        })
                        .filter(|_| eligible),
                    eligible,
                }
            })
            .collect();
        let outcome = assign_singleton(resource, pattern, &candidates);

        for (name, decision) in outcome.flags {
            if let Some(field) = fields.get_mut(&name) {
                match pattern {
                    NamePattern::PrimaryKey => field.is_primary_key = decision,
                    NamePattern::Arn => field.is_arn = decision,
                }
            }
        }
        diagnostics.extend(outcome.diagnostics);
        for e in outcome.errors {
            diagnostics.push_error(e);
        }
    }
}

fn check_owner_account_id(fields: &IndexMap<String, ResolvedField>, diagnostics: &mut Diagnostics) {
    let mut holders = fields.values().filter(|f| f.is_owner_account_id);
    let Some(first) = holders.next() else {
        return;
    };
    for other in holders {
        diagnostics.push_error(ResolveError::conflict(
            &other.name,
            format!("is_owner_account_id is also explicitly set on {}", first.name),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::ColumnSource;
    use crate::testing::{foo_graph, graph_from};
    use proptest::prelude::*;
    use shapeline_config::{CompareFieldConfig, PrintFieldConfig, PrintOrderBy};
    use shapeline_shape::{GraphBuilder, Member, Operation, Role, ScalarKind, Shape, TypeDescriptor};

    fn foo_config() -> ResourceConfig {
        ResourceConfig::new().with_field(
            "CodeLocation",
            FieldConfig::new()
                .with_from("GetFoo", "Code.Location")
                .with_read_only(true),
        )
    }

    fn failure_errors(failure: &ResolveFailure) -> Vec<ResolveError> {
        failure.errors().cloned().collect()
    }

    #[test]
    fn test_end_to_end_redirected_member() {
        let graph = foo_graph();
        let resolution = Resolver::new(&graph).resolve("Foo", &foo_config()).unwrap();

        let names: Vec<_> = resolution.fields.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["Name", "CodeImageUri", "CodeS3Bucket", "CodeLocation", "CreatedAt"]
        );
        assert!(resolution.field("Code").is_none());

        let name = resolution.field("Name").unwrap();
        assert_eq!(name.slot(), Slot::Spec);
        assert!(name.ty.is_string());
        assert!(name.is_required.get());

        let image = resolution.field("CodeImageUri").unwrap();
        assert_eq!(image.slot(), Slot::Spec);
        assert_eq!(image.source, TypeSource::Lineage);

        let location = resolution.field("CodeLocation").unwrap();
        assert_eq!(location.slot(), Slot::Status);
        assert!(location.slot.is_explicit());
        assert!(location.ty.is_string());
        assert_eq!(
            location.source,
            TypeSource::Redirect {
                operation: "GetFoo".to_string(),
                path: "Code.Location".to_string(),
                role: Role::Output,
            }
        );

        assert_eq!(
            resolution.field("CreatedAt").unwrap().ty,
            TypeDescriptor::Scalar(ScalarKind::Timestamp)
        );
        assert!(!resolution.diagnostics.has_errors());
        assert!(resolution
            .diagnostics
            .iter()
            .any(|d| d.field == "Code" && matches!(d.kind, DiagnosticKind::Decomposed { .. })));
    }

    #[test]
    fn test_ambiguity_without_redirect() {
        let graph = foo_graph();
        let failure = Resolver::new(&graph).resolve("Foo", &ResourceConfig::new()).unwrap_err();
        assert_eq!(failure.resource, "Foo");
        assert_eq!(
            failure_errors(&failure),
            vec![ResolveError::TypeAmbiguity {
                field: "Code".to_string(),
                types: vec!["CreateCode".to_string(), "CodeLocation".to_string()],
            }]
        );
    }

    #[test]
    fn test_direct_redirect_takes_redirected_type() {
        let graph = foo_graph();
        let config = ResourceConfig::new().with_field("Code", FieldConfig::new().with_from("CreateFoo", "Code"));
        let resolution = Resolver::new(&graph).resolve("Foo", &config).unwrap();
        let code = resolution.field("Code").unwrap();
        assert_eq!(code.ty, TypeDescriptor::Structure(graph.shape_id("CreateCode").unwrap()));
        assert_eq!(code.slot(), Slot::Status);
        assert!(resolution.diagnostics.iter().any(|d| d.field == "Code"
            && d.kind == DiagnosticKind::RedirectShadowsLineage { occurrences: 1 }));
    }

    #[test]
    fn test_two_operation_slots() {
        let graph = graph_from(
            r"
shapes:
  CreateBarInput:
    members:
      - { name: Description, type: string }
      - { name: Tags, type: { map: string } }
  DescribeBarOutput:
    members:
      - { name: Status, type: string }
      - { name: Tags, type: { map: string } }
operations:
  - { id: CreateBar, resource: Bar, input: CreateBarInput }
  - { id: DescribeBar, resource: Bar, output: DescribeBarOutput }
",
        );
        let resolution = Resolver::new(&graph).resolve("Bar", &ResourceConfig::new()).unwrap();
        assert_eq!(resolution.field("Description").unwrap().slot(), Slot::Spec);
        assert_eq!(resolution.field("Status").unwrap().slot(), Slot::Status);
        assert_eq!(resolution.field("Tags").unwrap().slot(), Slot::Spec);
        assert_eq!(resolution.spec_fields().count(), 2);
        assert_eq!(resolution.status_fields().count(), 1);
        assert!(resolution.primary_key().is_none());
    }

    #[test]
    fn test_attribute_forces_string() {
        let graph = foo_graph();
        let config = foo_config().with_field("CreatedAt", FieldConfig::new().with_attribute());
        let resolution = Resolver::new(&graph).resolve("Foo", &config).unwrap();
        let created = resolution.field("CreatedAt").unwrap();
        assert!(created.ty.is_string());
        assert!(created.is_attribute_unpacked);
        assert_eq!(created.slot(), Slot::Status);
    }

    #[test]
    fn test_primary_key_first_match() {
        let graph = graph_from(
            r"
shapes:
  CreateFooInput:
    members:
      - { name: Name, type: string }
      - { name: FooName, type: string }
      - { name: FooArn, type: string }
operations:
  - { id: CreateFoo, resource: Foo, input: CreateFooInput }
",
        );
        let resolver = Resolver::new(&graph);

        let resolution = resolver.resolve("Foo", &ResourceConfig::new()).unwrap();
        assert_eq!(resolution.primary_key().map(|f| f.name.as_str()), Some("Name"));
        assert_eq!(resolution.arn().map(|f| f.name.as_str()), Some("FooArn"));
        assert!(resolution
            .diagnostics
            .iter()
            .any(|d| d.field == "FooName" && d.severity() == Severity::Warning));

        let config = ResourceConfig::new().with_field("FooName", FieldConfig::new().with_primary_key(true));
        let resolution = resolver.resolve("Foo", &config).unwrap();
        assert_eq!(resolution.primary_key().map(|f| f.name.as_str()), Some("FooName"));
        assert!(resolution.field("FooName").unwrap().is_primary_key.is_explicit());
    }

    #[test]
    fn test_two_explicit_primary_keys_fail() {
        let graph = foo_graph();
        let config = foo_config()
            .with_field("Name", FieldConfig::new().with_primary_key(true))
            .with_field("CreatedAt", FieldConfig::new().with_primary_key(true));
        let failure = Resolver::new(&graph).resolve("Foo", &config).unwrap_err();
        let errors = failure_errors(&failure);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ResolveError::ConflictingOverride { ref field, .. } if field == "CreatedAt"));
    }

    #[test]
    fn test_compare_ignored_with_print_conflicts() {
        let graph = foo_graph();
        let config = foo_config().with_field(
            "Name",
            FieldConfig::new()
                .with_compare(CompareFieldConfig {
                    is_ignored: true,
                    nil_equals_zero_value: false,
                })
                .with_print(PrintFieldConfig::default()),
        );
        let failure = Resolver::new(&graph).resolve("Foo", &config).unwrap_err();
        assert!(matches!(
            failure_errors(&failure).as_slice(),
            [ResolveError::ConflictingOverride { field, .. }] if field == "Name"
        ));
    }

    #[test]
    fn test_ignored_field_with_policy_conflicts() {
        let graph = foo_graph();
        let config = foo_config().with_ignored("CreatedAt").with_field(
            "CreatedAt",
            FieldConfig::new().with_compare(CompareFieldConfig::default()),
        );
        let failure = Resolver::new(&graph).resolve("Foo", &config).unwrap_err();
        assert_eq!(failure_errors(&failure).len(), 1);

        let config = foo_config().with_ignored("CreatedAt").with_ignored("Ghost");
        let resolution = Resolver::new(&graph).resolve("Foo", &config).unwrap();
        assert_eq!(resolution.field("CreatedAt").unwrap().slot(), Slot::Ignored);
        assert!(resolution.field("Ghost").is_none());
    }

    #[test]
    fn test_ignored_field_without_lineage_still_checked() {
        let graph = foo_graph();
        let config = ResourceConfig::new().with_ignored("Ghost").with_field(
            "Ghost",
            FieldConfig::new()
                .with_compare(CompareFieldConfig {
                    is_ignored: true,
                    nil_equals_zero_value: false,
                })
                .with_late_initialize(60, 5),
        );
        let failure = Resolver::new(&graph).resolve("Foo", &config).unwrap_err();
        let errors = failure_errors(&failure);
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ResolveError::ConflictingOverride { ref field, .. } if field == "Ghost"));
        assert!(matches!(errors[1], ResolveError::InvalidBackoffBounds { ref field, .. } if field == "Ghost"));

        let config = ResourceConfig::new()
            .with_ignored("Ghost")
            .with_field("Ghost", FieldConfig::new().with_read_only(true));
        let resolution = Resolver::new(&graph).resolve("Foo", &config).unwrap();
        assert!(resolution.field("Ghost").is_none());
    }

    #[test]
    fn test_list_and_delete_inputs_are_not_spec() {
        let graph = graph_from(
            r"
shapes:
  CreateBarInput:
    members:
      - { name: Description, type: string }
  ListBarsInput:
    members:
      - { name: MaxResults, type: integer }
  DeleteBarInput:
    members:
      - { name: Force, type: boolean }
  GetBarOutput:
    members:
      - { name: Description, type: string }
      - { name: State, type: string }
operations:
  - { id: CreateBar, resource: Bar, input: CreateBarInput }
  - { id: ListBars, resource: Bar, input: ListBarsInput }
  - { id: DeleteBar, resource: Bar, input: DeleteBarInput }
  - { id: GetBar, resource: Bar, output: GetBarOutput }
",
        );
        let resolution = Resolver::new(&graph).resolve("Bar", &ResourceConfig::new()).unwrap();
        assert_eq!(resolution.field("Description").unwrap().slot(), Slot::Spec);
        assert_eq!(resolution.field("State").unwrap().slot(), Slot::Status);
        assert_eq!(resolution.field("MaxResults").unwrap().slot(), Slot::Ignored);
        assert_eq!(resolution.field("Force").unwrap().slot(), Slot::Ignored);
        assert!(!resolution.field("Force").unwrap().slot.is_explicit());
    }

    #[test]
    fn test_ignored_field_cannot_hold_singleton() {
        let graph = foo_graph();
        let config = foo_config()
            .with_ignored("CreatedAt")
            .with_field("CreatedAt", FieldConfig::new().with_primary_key(true));
        let failure = Resolver::new(&graph).resolve("Foo", &config).unwrap_err();
        assert_eq!(
            failure_errors(&failure),
            vec![ResolveError::conflict("CreatedAt", "ignored field is the primary key")]
        );
    }

    #[test]
    fn test_ignored_ambiguous_field_resolves() {
        let graph = foo_graph();
        let config = ResourceConfig::new().with_ignored("Code");
        let resolution = Resolver::new(&graph).resolve("Foo", &config).unwrap();
        let code = resolution.field("Code").unwrap();
        assert_eq!(code.slot(), Slot::Ignored);
        assert_eq!(code.ty, TypeDescriptor::Structure(graph.shape_id("CreateCode").unwrap()));
    }

    #[test]
    fn test_backoff_bounds_rejected() {
        let graph = foo_graph();
        let config = foo_config().with_field("Name", FieldConfig::new().with_late_initialize(60, 5));
        let failure = Resolver::new(&graph).resolve("Foo", &config).unwrap_err();
        assert_eq!(
            failure_errors(&failure),
            vec![ResolveError::InvalidBackoffBounds {
                field: "Name".to_string(),
                min_seconds: 60,
                max_seconds: 5,
            }]
        );
    }

    #[test]
    fn test_errors_are_all_collected() {
        let graph = foo_graph();
        let config = foo_config()
            .with_field("Ghost", FieldConfig::new())
            .with_field("CreatedAt", FieldConfig::new().with_secret())
            .with_field("Broken", FieldConfig::new().with_from("GetFoo", "Nope"));
        let failure = Resolver::new(&graph).resolve("Foo", &config).unwrap_err();
        let fields: Vec<_> = failure.errors().map(ResolveError::field).collect();
        assert_eq!(fields, vec!["CreatedAt", "Ghost", "Broken"]);
    }

    #[test]
    fn test_owner_account_id_singleton() {
        let graph = foo_graph();
        let config = foo_config()
            .with_field("Name", FieldConfig::new().with_owner_account_id())
            .with_field("CodeS3Bucket", FieldConfig::new().with_owner_account_id());
        let failure = Resolver::new(&graph).resolve("Foo", &config).unwrap_err();
        assert_eq!(failure_errors(&failure)[0].field(), "CodeS3Bucket");
    }

    #[test]
    fn test_override_diagnostics() {
        let graph = foo_graph();
        let config = foo_config().with_field("Name", FieldConfig::new().with_read_only(true).with_required(false));
        let resolution = Resolver::new(&graph).resolve("Foo", &config).unwrap();
        let attributes: Vec<_> = resolution
            .diagnostics
            .iter()
            .filter(|d| d.field == "Name")
            .filter_map(|d| match &d.kind {
                DiagnosticKind::HeuristicOverridden { attribute, .. } => Some(*attribute),
                _ => None,
            })
            .collect();
        assert_eq!(attributes, vec![Attribute::Slot, Attribute::Required]);
    }

    #[test]
    fn test_column_plan() {
        let graph = foo_graph();
        let config = foo_config()
            .with_order_by(PrintOrderBy::Index)
            .with_field(
                "CreatedAt",
                FieldConfig::new().with_print(PrintFieldConfig {
                    name: Some("CREATED".to_string()),
                    priority: 1,
                    index: 2,
                }),
            )
            .with_field(
                "CodeImageUri",
                FieldConfig::new().with_print(PrintFieldConfig {
                    name: Some("IMAGE".to_string()),
                    priority: 0,
                    index: 1,
                }),
            );
        let resolution = Resolver::new(&graph).resolve("Foo", &config).unwrap();
        assert_eq!(resolution.columns.headers(), vec!["NAME", "IMAGE", "CREATED", "AGE"]);
        assert_eq!(
            resolution.columns.columns[2].source,
            ColumnSource::Field {
                field: "CreatedAt".to_string(),
                slot: Slot::Status,
            }
        );
    }

    #[test]
    fn test_resolve_all() {
        let graph = foo_graph();
        let config = GeneratorConfig::new()
            .with_resource("Foo", foo_config())
            .with_resource("Orphan", ResourceConfig::new());
        let results = Resolver::new(&graph).resolve_all(&config);
        let names: Vec<_> = results.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Foo", "Orphan"]);
        assert!(results["Foo"].is_ok());
        assert!(results["Orphan"].as_ref().unwrap().fields.is_empty());
    }

    fn scalar(kind: u8) -> TypeDescriptor {
        match kind % 3 {
            0 => TypeDescriptor::string(),
            1 => TypeDescriptor::Scalar(ScalarKind::Integer),
            _ => TypeDescriptor::Scalar(ScalarKind::Boolean),
        }
    }

    fn synthetic_graph(input: &[(u8, u8)], output: &[(u8, u8)]) -> ShapeGraph {
        let shape = |name: &str, members: &[(u8, u8)]| {
            let mut seen = Vec::new();
            let mut shape = Shape::new(name);
            for (field, kind) in members {
                if !seen.contains(field) {
                    seen.push(*field);
                    shape = shape.with_member(Member::new(format!("Field{field}"), scalar(*kind)));
                }
            }
            shape
        };

        let mut builder = GraphBuilder::new();
        let input_id = builder.add_shape(shape("CreateInput", input)).unwrap();
        let output_id = builder.add_shape(shape("DescribeOutput", output)).unwrap();
        builder
            .add_operation(Operation::new("Create").with_resource("Res").with_input(input_id))
            .unwrap();
        builder
            .add_operation(Operation::new("Describe").with_resource("Res").with_output(output_id))
            .unwrap();
        builder.build().unwrap()
    }

    proptest! {
        #[test]
        fn prop_resolution_is_deterministic(
            input in proptest::collection::vec((0u8..8, 0u8..3), 0..8),
            output in proptest::collection::vec((0u8..8, 0u8..3), 0..8),
        ) {
            let graph = synthetic_graph(&input, &output);
            let resolver = Resolver::new(&graph);
            let config = ResourceConfig::new();

            let first = resolver.resolve("Res", &config);
            let second = resolver.resolve("Res", &config);
            prop_assert_eq!(&first, &second);

            let first_json = serde_json::to_string(&first.as_ref().ok()).unwrap();
            let second_json = serde_json::to_string(&second.as_ref().ok()).unwrap();
            prop_assert_eq!(first_json, second_json);
        }

        #[test]
        fn prop_each_name_resolves_once(
            input in proptest::collection::vec((0u8..8, 0u8..3), 0..8),
            output in proptest::collection::vec((0u8..8, 0u8..3), 0..8),
        ) {
            let graph = synthetic_graph(&input, &output);
            let lineage = resolve_lineage(&graph, graph.resource_operations("Res"));
            match Resolver::new(&graph).resolve("Res", &ResourceConfig::new()) {
                Ok(resolution) => {
                    prop_assert_eq!(resolution.fields.len(), lineage.len());
                    for name in lineage.names() {
                        let field = resolution.field(name);
                        prop_assert!(field.is_some());
                        let expected = heuristic_slot(lineage.occurrences(name));
                        prop_assert_eq!(field.map(ResolvedField::slot), Some(expected));
                    }
                }
                Err(failure) => {
                    for error in failure.errors() {
                        let is_ambiguity = matches!(error, ResolveError::TypeAmbiguity { .. });
                        prop_assert!(is_ambiguity);
                    }
                }
            }
        }
    }
}
