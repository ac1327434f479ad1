//! Intermediate Representation (IR)
//!
//! Language-agnostic representation of FHIR types extracted from StructureDefinitions.
//! This IR serves as the bridge between FHIR definitions and language-specific code.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Registry of all types extracted from a set of StructureDefinitions
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    /// All types indexed by their canonical URL or name
    types: HashMap<String, TypeDefinition>,
    /// Mapping from type name to canonical identifier
    name_index: HashMap<String, String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type to the registry
    pub fn add_type(&mut self, id: String, type_def: TypeDefinition) {
        self.name_index.insert(type_def.name.clone(), id.clone());
        self.types.insert(id, type_def);
    }

    /// Get a type by its canonical identifier
    pub fn get_type(&self, id: &str) -> Option<&TypeDefinition> {
        self.types.get(id)
    }

    /// Get a type by its name
    pub fn get_type_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.name_index.get(name).and_then(|id| self.types.get(id))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all types
    pub fn types(&self) -> impl Iterator<Item = (&String, &TypeDefinition)> {
        self.types.iter()
    }

    /// Concrete resource types, sorted by name
    pub fn resource_types(&self) -> Vec<&TypeDefinition> {
        self.sorted(|t| t.kind == TypeKind::Resource && !t.is_abstract)
    }

    /// Concrete complex datatypes, sorted by name
    pub fn complex_types(&self) -> Vec<&TypeDefinition> {
        self.sorted(|t| t.kind == TypeKind::ComplexType && !t.is_abstract)
    }

    /// Primitive types, sorted by name
    pub fn primitive_types(&self) -> Vec<&TypeDefinition> {
        self.sorted(|t| t.kind == TypeKind::PrimitiveType)
    }

    fn sorted(&self, filter: impl Fn(&TypeDefinition) -> bool) -> Vec<&TypeDefinition> {
        let mut types: Vec<_> = self.types.values().filter(|t| filter(t)).collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        types
    }

    /// Get dependencies for a given type (other registered types it uses)
    pub fn get_dependencies(&self, type_def: &TypeDefinition) -> Vec<String> {
        let mut deps = Vec::new();

        let properties = type_def
            .properties
            .iter()
            .chain(type_def.backbone_elements.iter().flat_map(|b| b.properties.iter()));

        for property in properties {
            for prop_type in &property.types {
                let type_name = &prop_type.code;

                if !is_primitive_type(type_name)
                    && type_name != "Resource"
                    && type_name != "Element"
                    && type_name != "BackboneElement"
                    && self.get_type_by_name(type_name).is_some()
                    && !deps.contains(type_name)
                {
                    deps.push(type_name.clone());
                }
            }
        }

        deps
    }
}

/// Check if a type is a FHIR primitive
pub fn is_primitive_type(type_name: &str) -> bool {
    matches!(
        type_name,
        "boolean"
            | "integer"
            | "unsignedInt"
            | "positiveInt"
            | "integer64"
            | "decimal"
            | "string"
            | "code"
            | "id"
            | "markdown"
            | "uri"
            | "url"
            | "canonical"
            | "oid"
            | "uuid"
            | "date"
            | "dateTime"
            | "instant"
            | "time"
            | "base64Binary"
            | "xhtml"
    )
}

/// A single type definition extracted from a StructureDefinition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// The type name (e.g., "AuditEvent", "Period", "string")
    pub name: String,
    /// Canonical URL if available
    pub url: Option<String>,
    /// Human-readable description
    pub description: Option<String>,
    /// Kind of type (resource, complex-type, primitive)
    pub kind: TypeKind,
    /// Base type this extends (if any)
    pub base_type: Option<String>,
    /// Properties/elements of this type, in declaration order
    pub properties: Vec<Property>,
    /// Whether this is an abstract type
    pub is_abstract: bool,
    /// Backbone elements defined within this type, nested ones included, in document order
    pub backbone_elements: Vec<BackboneElement>,
    /// Invariants declared on the type itself and on its own elements
    pub constraints: Vec<Constraint>,
}

impl TypeDefinition {
    pub fn backbone(&self, path: &str) -> Option<&BackboneElement> {
        self.backbone_elements.iter().find(|b| b.path == path)
    }
}

/// Kind of FHIR type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    /// FHIR Resource (e.g., AuditEvent, TestPlan)
    Resource,
    /// Complex datatype (e.g., Coding, Period)
    ComplexType,
    /// Primitive type (e.g., string, integer, boolean)
    PrimitiveType,
    /// Backbone element (nested complex element within a resource)
    BackboneElement,
}

/// A property/field within a type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// Element name without the `[x]` suffix (e.g., "occurred", "basedOn")
    pub name: String,
    /// Path in the FHIR element tree (e.g., "AuditEvent.occurred[x]")
    pub path: String,
    /// Human-readable description
    pub description: Option<String>,
    /// The type(s) this property can have
    pub types: Vec<PropertyType>,
    /// Cardinality
    pub cardinality: Cardinality,
    /// Whether this property is required
    pub is_required: bool,
    /// Whether this property is a modifier element
    pub is_modifier: bool,
    /// Whether this property is part of the summary view
    pub is_summary: bool,
    /// Whether the element name ends in `[x]`
    pub is_choice: bool,
    /// Terminology binding, if any
    pub binding: Option<Binding>,
    /// Path of the backbone element this property holds, for inline
    /// backbones and `contentReference`s
    pub backbone_path: Option<String>,
}

impl Property {
    /// Allowed target resource types of a `Reference` (or `CodeableReference`) property.
    ///
    /// Empty when the property has no reference type or allows any resource.
    pub fn reference_targets(&self) -> Vec<String> {
        let mut targets = Vec::new();
        for prop_type in &self.types {
            if prop_type.code != "Reference" && prop_type.code != "CodeableReference" {
                continue;
            }
            for target in prop_type.target_types() {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        if targets.iter().any(|t| t == "Resource") {
            Vec::new()
        } else {
            targets
        }
    }

    /// Type codes in declaration order
    pub fn type_codes(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.code.as_str()).collect()
    }
}

/// Type reference for a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyType {
    /// Type code (e.g., "string", "CodeableConcept", "Reference")
    pub code: String,
    /// Target profile URL (for References or profiled types)
    pub profile: Option<String>,
    /// Target profile URLs (for Reference properties)
    pub target_profiles: Vec<String>,
}

impl PropertyType {
    /// Resource type names of the target profiles
    pub fn target_types(&self) -> Vec<String> {
        self.target_profiles
            .iter()
            .map(|p| type_name_from_url(p).to_string())
            .collect()
    }
}

/// Extract the type name from a canonical URL
/// E.g., "http://hl7.org/fhir/StructureDefinition/Patient" -> "Patient"
pub fn type_name_from_url(url: &str) -> &str {
    let url = url.split('|').next().unwrap_or(url);
    url.rsplit('/').next().unwrap_or(url)
}

/// Cardinality of a property (min..max)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cardinality {
    /// Minimum occurrences
    pub min: u32,
    /// Maximum occurrences (None means unbounded/*)
    pub max: Option<u32>,
}

impl Cardinality {
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Check if this property is a list/array
    pub fn is_array(&self) -> bool {
        self.max.map(|m| m > 1).unwrap_or(true)
    }

    /// Check if this property is optional
    pub fn is_optional(&self) -> bool {
        self.min == 0
    }

    /// Check if this property is required
    pub fn is_required(&self) -> bool {
        self.min > 0
    }
}

/// Binding strength of a coded element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingStrength {
    Required,
    Extensible,
    Preferred,
    Example,
}

impl BindingStrength {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "required" => Some(BindingStrength::Required),
            "extensible" => Some(BindingStrength::Extensible),
            "preferred" => Some(BindingStrength::Preferred),
            "example" => Some(BindingStrength::Example),
            _ => None,
        }
    }

    /// Variant name in the runtime metadata
    pub fn variant(&self) -> &'static str {
        match self {
            BindingStrength::Required => "Required",
            BindingStrength::Extensible => "Extensible",
            BindingStrength::Preferred => "Preferred",
            BindingStrength::Example => "Example",
        }
    }
}

/// Terminology binding of an element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binding {
    /// Value of the `elementdefinition-bindingName` extension
    pub name: Option<String>,
    pub strength: BindingStrength,
    pub value_set: Option<String>,
}

/// An invariant declared in an ElementDefinition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraint {
    pub key: String,
    /// `true` for `error` severity, `false` for `warning`
    pub is_error: bool,
    pub human: String,
    pub expression: Option<String>,
    /// Path relative to the owning type, `(base)` for the type itself
    pub location: String,
}

/// A backbone element (inline complex type) within a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackboneElement {
    /// Struct name: the path segments concatenated (e.g., "AuditEventEntityDetail")
    pub name: String,
    /// Element path (e.g., "AuditEvent.entity.detail")
    pub path: String,
    /// Type name exposed at runtime (e.g., "AuditEvent.Entity.Detail")
    pub type_name: String,
    /// Description
    pub description: Option<String>,
    /// Properties of this backbone element
    pub properties: Vec<Property>,
    pub constraints: Vec<Constraint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_property(targets: &[&str]) -> Property {
        Property {
            name: "who".to_string(),
            path: "AuditEvent.agent.who".to_string(),
            description: None,
            types: vec![PropertyType {
                code: "Reference".to_string(),
                profile: None,
                target_profiles: targets
                    .iter()
                    .map(|t| format!("http://hl7.org/fhir/StructureDefinition/{t}"))
                    .collect(),
            }],
            cardinality: Cardinality::new(1, Some(1)),
            is_required: true,
            is_modifier: false,
            is_summary: true,
            is_choice: false,
            binding: None,
            backbone_path: None,
        }
    }

    #[test]
    fn test_reference_targets() {
        let property = reference_property(&["Practitioner", "Device"]);
        assert_eq!(property.reference_targets(), vec!["Practitioner", "Device"]);

        // Any-resource references carry no target restriction
        let property = reference_property(&["Resource"]);
        assert!(property.reference_targets().is_empty());
    }

    #[test]
    fn test_type_name_from_url() {
        assert_eq!(
            type_name_from_url("http://hl7.org/fhir/StructureDefinition/Patient"),
            "Patient"
        );
        assert_eq!(
            type_name_from_url("http://hl7.org/fhir/StructureDefinition/Group|5.0.0"),
            "Group"
        );
        assert_eq!(type_name_from_url("Patient"), "Patient");
    }

    #[test]
    fn test_cardinality() {
        assert!(Cardinality::new(1, None).is_array());
        assert!(Cardinality::new(1, None).is_required());
        assert!(!Cardinality::new(0, Some(1)).is_array());
        assert!(Cardinality::new(0, Some(1)).is_optional());
    }
}
