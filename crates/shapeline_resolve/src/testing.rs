//! Shared fixtures for unit tests.

use shapeline_shape::{GraphDocument, ShapeGraph};

/// Lambda-style resource whose `Code` member differs between create and get
pub(crate) const FOO: &str = r#"
shapes:
  CreateFooInput:
    members:
      - { name: Name, type: string, required: true }
      - { name: Code, type: { structure: CreateCode } }
  CreateCode:
    members:
      - { name: ImageUri, type: string }
      - { name: S3Bucket, type: string }
  CreateFooOutput:
    members: []
  GetFooOutput:
    members:
      - { name: Name, type: string }
      - { name: Code, type: { structure: CodeLocation } }
      - { name: CreatedAt, type: timestamp }
  CodeLocation:
    members:
      - { name: ImageUri, type: string }
      - { name: Location, type: string }
operations:
  - { id: CreateFoo, resource: Foo, input: CreateFooInput, output: CreateFooOutput }
  - { id: GetFoo, resource: Foo, output: GetFooOutput }
"#;

pub(crate) fn foo_graph() -> ShapeGraph {
    graph_from(FOO)
}

pub(crate) fn graph_from(yaml: &str) -> ShapeGraph {
    GraphDocument::from_yaml_str(yaml).unwrap().into_graph().unwrap()
}
