//! Shapes and their members.

use crate::types::TypeDescriptor;
use serde::{Deserialize, Serialize};

/// A named, typed member of a shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member name
    pub name: String,
    /// Member type
    pub ty: TypeDescriptor,
    /// Whether the service requires the member
    pub required: bool,
}

impl Member {
    /// Create an optional member
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
        }
    }

    /// Mark the member as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A named record of ordered members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Shape name
    pub name: String,
    /// Members in declaration order
    pub members: Vec<Member>,
}

impl Shape {
    /// Create an empty shape
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Append a member
    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Look up a member by exact name
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Whether the shape has no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
