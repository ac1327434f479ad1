//! Parser for FHIR StructureDefinitions
//!
//! Extracts type information from FHIR StructureDefinitions and builds
//! an intermediate representation (IR) suitable for code generation.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use heck::ToUpperCamelCase;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ir::{
    type_name_from_url, BackboneElement, Binding, BindingStrength, Cardinality, Constraint,
    Property, PropertyType, TypeDefinition, TypeKind, TypeRegistry,
};

const BINDING_NAME_EXTENSION: &str =
    "http://hl7.org/fhir/StructureDefinition/elementdefinition-bindingName";

/// Types whose elements every resource or element inherits; the runtime
/// models them in shared base records
const INHERITED_ROOTS: &[&str] = &["Resource", "DomainResource", "Element", "BackboneElement"];

/// Inherited element names, used when an element carries no `base`
const INHERITED_ELEMENTS: &[&str] = &[
    "id",
    "meta",
    "implicitRules",
    "language",
    "text",
    "contained",
    "extension",
    "modifierExtension",
];

/// Parse StructureDefinitions (or Bundles of them) into a registry.
///
/// Profiles and logical models are skipped, as are definitions that fail to
/// parse; both are logged.
pub fn parse_definitions<'a>(definitions: impl IntoIterator<Item = &'a Value>) -> TypeRegistry {
    let mut registry = TypeRegistry::new();

    for resource in definitions {
        match resource.get("resourceType").and_then(|v| v.as_str()) {
            Some("Bundle") => {
                let entries = resource
                    .get("entry")
                    .and_then(|v| v.as_array())
                    .map(|entries| entries.iter().filter_map(|e| e.get("resource")));
                if let Some(entries) = entries {
                    for entry in entries {
                        add_definition(&mut registry, entry);
                    }
                }
            }
            Some("StructureDefinition") => add_definition(&mut registry, resource),
            other => debug!(resource_type = ?other, "Skipping non-StructureDefinition resource"),
        }
    }

    registry
}

fn add_definition(registry: &mut TypeRegistry, sd: &Value) {
    if sd.get("resourceType").and_then(|v| v.as_str()) != Some("StructureDefinition") {
        return;
    }
    let name = sd.get("name").and_then(|v| v.as_str()).unwrap_or("<unnamed>");

    if sd.get("derivation").and_then(|v| v.as_str()) == Some("constraint") {
        debug!(name, "Skipping profile");
        return;
    }
    if sd.get("kind").and_then(|v| v.as_str()) == Some("logical") {
        debug!(name, "Skipping logical model");
        return;
    }

    match parse_structure_definition(sd) {
        Ok(type_def) => {
            let id = type_def
                .url
                .clone()
                .unwrap_or_else(|| type_def.name.clone());
            registry.add_type(id, type_def);
        }
        Err(e) => warn!(name, error = %e, "Skipping StructureDefinition"),
    }
}

/// Parse every `*.json` file in a directory, in file name order
pub fn parse_dir(dir: &Path) -> anyhow::Result<TypeRegistry> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in &paths {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let document: Value =
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        documents.push(document);
    }
    debug!(files = documents.len(), dir = %dir.display(), "Loaded definition files");

    Ok(parse_definitions(&documents))
}

/// Parse a single StructureDefinition into a TypeDefinition
pub fn parse_structure_definition(sd: &Value) -> Result<TypeDefinition> {
    let name = sd
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or(Error::MissingField("name"))?
        .to_string();

    let url = sd.get("url").and_then(|v| v.as_str()).map(String::from);

    let description = sd
        .get("description")
        .and_then(|v| v.as_str())
        .map(String::from);

    let kind = match sd.get("kind").and_then(|v| v.as_str()) {
        Some("resource") => TypeKind::Resource,
        Some("complex-type") => TypeKind::ComplexType,
        Some("primitive-type") => TypeKind::PrimitiveType,
        Some(other) => return Err(Error::unsupported(&name, format!("kind '{other}'"))),
        None => return Err(Error::MissingField("kind")),
    };

    let is_abstract = sd
        .get("abstract")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let base_type = sd
        .get("baseDefinition")
        .and_then(|v| v.as_str())
        .map(|url| type_name_from_url(url).to_string());

    // Element paths start with the defined type, not the definition name
    let root = sd
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or(&name)
        .to_string();

    let elements = sd
        .get("snapshot")
        .or_else(|| sd.get("differential"))
        .and_then(|v| v.get("element"))
        .and_then(|v| v.as_array())
        .ok_or_else(|| Error::invalid(&name, "no snapshot or differential elements"))?;

    let (properties, backbone_elements, constraints) = {
        let mut parsed = ParsedElements::new(&root, url.as_deref());
        if kind != TypeKind::PrimitiveType {
            parsed.parse(elements)?;
        }
        (parsed.properties, parsed.backbones, parsed.constraints)
    };

    Ok(TypeDefinition {
        name,
        url,
        description,
        kind,
        base_type,
        properties,
        is_abstract,
        backbone_elements,
        constraints,
    })
}

/// Accumulates the properties of a type and its backbones while walking the
/// flat element list
struct ParsedElements<'a> {
    root: &'a str,
    url: Option<&'a str>,
    properties: Vec<Property>,
    backbones: Vec<BackboneElement>,
    backbone_index: HashMap<String, usize>,
    constraints: Vec<Constraint>,
}

impl<'a> ParsedElements<'a> {
    fn new(root: &'a str, url: Option<&'a str>) -> Self {
        Self {
            root,
            url,
            properties: Vec::new(),
            backbones: Vec::new(),
            backbone_index: HashMap::new(),
            constraints: Vec::new(),
        }
    }

    fn parse(&mut self, elements: &[Value]) -> Result<()> {
        for element in elements {
            let path = element
                .get("path")
                .and_then(|v| v.as_str())
                .ok_or(Error::MissingField("path"))?;

            if path == self.root {
                let constraints = self.parse_constraints(element, "(base)");
                self.constraints.extend(constraints);
                continue;
            }

            let inside = path
                .strip_prefix(self.root)
                .is_some_and(|rest| rest.starts_with('.'));
            let parent = match path.rsplit_once('.') {
                Some((parent, _)) if inside => parent,
                _ => {
                    return Err(Error::invalid(
                        self.root,
                        format!("element '{path}' outside the type"),
                    ))
                }
            };
            if is_inherited(element, path) {
                continue;
            }

            let mut property = parse_element(element)?;
            let relative = &path[self.root.len() + 1..];

            if is_backbone_root(element) {
                let backbone = BackboneElement {
                    name: backbone_struct_name(path),
                    path: path.to_string(),
                    type_name: backbone_type_name(path),
                    description: property.description.clone(),
                    properties: Vec::new(),
                    constraints: self.parse_constraints(element, "(base)"),
                };
                property.backbone_path = Some(path.to_string());
                self.backbone_index
                    .insert(path.to_string(), self.backbones.len());
                self.backbones.push(backbone);
            } else {
                let constraints = self.parse_constraints(element, relative);
                self.constraints.extend(constraints);
            }

            if parent == self.root {
                self.properties.push(property);
            } else {
                let index = *self.backbone_index.get(parent).ok_or_else(|| {
                    Error::invalid(self.root, format!("element '{path}' has no parent backbone"))
                })?;
                self.backbones[index].properties.push(property);
            }
        }

        // contentReferences may point forward, so they are checked last
        let all = self
            .properties
            .iter()
            .chain(self.backbones.iter().flat_map(|b| b.properties.iter()));
        for property in all {
            if let Some(target) = &property.backbone_path {
                if !self.backbone_index.contains_key(target) {
                    return Err(Error::invalid(
                        self.root,
                        format!("'{}' references unknown element '{target}'", property.path),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Constraints declared by this definition, skipping ones inherited from
    /// base types
    fn parse_constraints(&self, element: &Value, location: &str) -> Vec<Constraint> {
        let Some(constraints) = element.get("constraint").and_then(|v| v.as_array()) else {
            return Vec::new();
        };

        constraints
            .iter()
            .filter(|c| {
                match (c.get("source").and_then(|v| v.as_str()), self.url) {
                    (Some(source), Some(url)) => source == url,
                    _ => true,
                }
            })
            .filter_map(|c| {
                let key = c.get("key").and_then(|v| v.as_str())?;
                if key.starts_with("ele-") || key.starts_with("dom-") {
                    return None;
                }
                Some(Constraint {
                    key: key.to_string(),
                    is_error: c.get("severity").and_then(|v| v.as_str()) != Some("warning"),
                    human: c
                        .get("human")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    expression: c
                        .get("expression")
                        .and_then(|v| v.as_str())
                        .map(String::from),
                    location: location.to_string(),
                })
            })
            .collect()
    }
}

fn is_inherited(element: &Value, path: &str) -> bool {
    let base_path = element
        .get("base")
        .and_then(|b| b.get("path"))
        .and_then(|v| v.as_str());
    match base_path {
        Some(base) => base
            .split('.')
            .next()
            .is_some_and(|root| INHERITED_ROOTS.contains(&root)),
        None => path
            .rsplit('.')
            .next()
            .is_some_and(|name| INHERITED_ELEMENTS.contains(&name)),
    }
}

/// An element that declares an inline type
fn is_backbone_root(element: &Value) -> bool {
    if element.get("contentReference").is_some() {
        return false;
    }
    let codes: Vec<&str> = element
        .get("type")
        .and_then(|v| v.as_array())
        .map(|types| {
            types
                .iter()
                .filter_map(|t| t.get("code").and_then(|v| v.as_str()))
                .collect()
        })
        .unwrap_or_default();
    matches!(codes.as_slice(), ["BackboneElement"] | ["Element"])
}

/// "AuditEvent.entity.detail" -> "AuditEventEntityDetail"
fn backbone_struct_name(path: &str) -> String {
    path.split('.').map(|s| s.to_upper_camel_case()).collect()
}

/// "AuditEvent.entity.detail" -> "AuditEvent.Entity.Detail"
fn backbone_type_name(path: &str) -> String {
    path.split('.')
        .map(|s| s.to_upper_camel_case())
        .collect::<Vec<_>>()
        .join(".")
}

/// Parse a single element into a Property
fn parse_element(element: &Value) -> Result<Property> {
    let path = element
        .get("path")
        .and_then(|v| v.as_str())
        .ok_or(Error::MissingField("path"))?;

    // Extract property name from path (e.g., "AuditEvent.occurred[x]" -> "occurred")
    let last = path.rsplit('.').next().unwrap_or(path);
    let is_choice = last.ends_with("[x]");
    let name = last.trim_end_matches("[x]").to_string();

    let description = element
        .get("short")
        .and_then(|v| v.as_str())
        .or_else(|| element.get("definition").and_then(|v| v.as_str()))
        .map(String::from);

    // Parse cardinality
    let min = element.get("min").and_then(|v| v.as_u64()).unwrap_or(0) as u32;

    let max_str = element.get("max").and_then(|v| v.as_str());
    let max = match max_str {
        Some("*") => None,
        Some(n) => Some(n.parse().map_err(|_| Error::invalid(path, format!("bad max '{n}'")))?),
        None => Some(1),
    };

    let cardinality = Cardinality::new(min, max);
    let is_required = cardinality.is_required();

    let types = match element.get("type").and_then(|v| v.as_array()) {
        Some(type_array) => type_array
            .iter()
            .map(parse_element_type)
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let backbone_path = element
        .get("contentReference")
        .and_then(|v| v.as_str())
        .and_then(|r| r.split_once('#'))
        .map(|(_, target)| target.to_string());

    if types.is_empty() && backbone_path.is_none() {
        return Err(Error::invalid(path, "element has no type"));
    }

    let is_modifier = element
        .get("isModifier")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let is_summary = element
        .get("isSummary")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    Ok(Property {
        name,
        path: path.to_string(),
        description,
        types,
        cardinality,
        is_required,
        is_modifier,
        is_summary,
        is_choice,
        binding: element.get("binding").and_then(parse_binding),
        backbone_path,
    })
}

fn parse_binding(binding: &Value) -> Option<Binding> {
    let strength = binding
        .get("strength")
        .and_then(|v| v.as_str())
        .and_then(BindingStrength::parse)?;

    let name = binding
        .get("extension")
        .and_then(|v| v.as_array())
        .and_then(|extensions| {
            extensions.iter().find(|e| {
                e.get("url").and_then(|v| v.as_str()) == Some(BINDING_NAME_EXTENSION)
            })
        })
        .and_then(|e| e.get("valueString"))
        .and_then(|v| v.as_str())
        .map(String::from);

    Some(Binding {
        name,
        strength,
        value_set: binding
            .get("valueSet")
            .and_then(|v| v.as_str())
            .map(String::from),
    })
}

/// Parse a type specification from an element
fn parse_element_type(type_spec: &Value) -> Result<PropertyType> {
    let code = type_spec
        .get("code")
        .and_then(|v| v.as_str())
        .ok_or(Error::MissingField("type.code"))?;

    // Primitive element types are declared via an extension on a
    // "http://hl7.org/fhirpath/System.String" code
    let code = if code.starts_with("http://hl7.org/fhirpath/") {
        type_spec
            .get("extension")
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
            .and_then(|e| e.get("valueUrl"))
            .and_then(|v| v.as_str())
            .unwrap_or(code)
    } else {
        code
    };

    let profile = type_spec
        .get("profile")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|v| v.as_str())
        .map(String::from);

    let target_profiles = type_spec
        .get("targetProfile")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    Ok(PropertyType {
        code: code.to_string(),
        profile,
        target_profiles,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn audit_event_definition() -> Value {
        json!({
            "resourceType": "StructureDefinition",
            "url": "http://hl7.org/fhir/StructureDefinition/AuditEvent",
            "name": "AuditEvent",
            "kind": "resource",
            "abstract": false,
            "type": "AuditEvent",
            "baseDefinition": "http://hl7.org/fhir/StructureDefinition/DomainResource",
            "derivation": "specialization",
            "snapshot": {"element": [
                {"path": "AuditEvent", "min": 0, "max": "*",
                 "constraint": [
                    {"key": "dom-2", "severity": "error", "human": "no nested contained",
                     "source": "http://hl7.org/fhir/StructureDefinition/DomainResource"},
                    {"key": "aev-1", "severity": "warning", "human": "outcome present",
                     "expression": "outcome.exists()"}
                 ]},
                {"path": "AuditEvent.id", "min": 0, "max": "1",
                 "base": {"path": "Resource.id"}, "type": [{"code": "id"}]},
                {"path": "AuditEvent.code", "short": "Specific type of event", "min": 1, "max": "1",
                 "isSummary": true, "type": [{"code": "CodeableConcept"}],
                 "binding": {"strength": "example",
                    "valueSet": "http://hl7.org/fhir/ValueSet/audit-event-sub-type",
                    "extension": [{"url": BINDING_NAME_EXTENSION, "valueString": "AuditEventSubType"}]}},
                {"path": "AuditEvent.occurred[x]", "min": 0, "max": "1",
                 "type": [{"code": "Period"}, {"code": "dateTime"}]},
                {"path": "AuditEvent.recorded", "min": 1, "max": "1", "type": [{"code": "instant"}]},
                {"path": "AuditEvent.agent", "short": "Actor involved in the event", "min": 1, "max": "*",
                 "type": [{"code": "BackboneElement"}]},
                {"path": "AuditEvent.agent.extension", "min": 0, "max": "*",
                 "base": {"path": "Element.extension"}, "type": [{"code": "Extension"}]},
                {"path": "AuditEvent.agent.who", "min": 1, "max": "1",
                 "type": [{"code": "Reference", "targetProfile": [
                    "http://hl7.org/fhir/StructureDefinition/Practitioner",
                    "http://hl7.org/fhir/StructureDefinition/Device"]}]},
                {"path": "AuditEvent.agent.policy", "min": 0, "max": "*", "type": [{"code": "uri"}]},
                {"path": "AuditEvent.entity", "min": 0, "max": "*", "type": [{"code": "BackboneElement"}]},
                {"path": "AuditEvent.entity.what", "min": 0, "max": "1",
                 "type": [{"code": "Reference", "targetProfile": [
                    "http://hl7.org/fhir/StructureDefinition/Resource"]}]},
                {"path": "AuditEvent.entity.detail", "min": 0, "max": "*",
                 "type": [{"code": "BackboneElement"}],
                 "constraint": [{"key": "aev-2", "severity": "error", "human": "detail has a type"}]},
                {"path": "AuditEvent.entity.detail.type", "min": 1, "max": "1",
                 "type": [{"code": "CodeableConcept"}]},
                {"path": "AuditEvent.entity.detail.value[x]", "min": 1, "max": "1",
                 "type": [{"code": "string"}, {"code": "boolean"}]},
                {"path": "AuditEvent.entity.agent", "min": 0, "max": "*",
                 "contentReference": "#AuditEvent.agent"}
            ]}
        })
    }

    #[test]
    fn test_parse_resource() {
        let type_def = parse_structure_definition(&audit_event_definition()).unwrap();
        assert_eq!(type_def.kind, TypeKind::Resource);
        assert_eq!(type_def.base_type.as_deref(), Some("DomainResource"));

        // Inherited id is dropped
        let names: Vec<_> = type_def.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["code", "occurred", "recorded", "agent", "entity"]);

        let occurred = &type_def.properties[1];
        assert!(occurred.is_choice);
        assert_eq!(occurred.type_codes(), vec!["Period", "dateTime"]);

        let binding = type_def.properties[0].binding.as_ref().unwrap();
        assert_eq!(binding.name.as_deref(), Some("AuditEventSubType"));
        assert_eq!(binding.strength, BindingStrength::Example);
        assert!(type_def.properties[0].is_summary);
    }

    #[test]
    fn test_nested_backbones() {
        let type_def = parse_structure_definition(&audit_event_definition()).unwrap();
        let paths: Vec<_> = type_def
            .backbone_elements
            .iter()
            .map(|b| (b.name.as_str(), b.type_name.as_str()))
            .collect();
        assert_eq!(
            paths,
            vec![
                ("AuditEventAgent", "AuditEvent.Agent"),
                ("AuditEventEntity", "AuditEvent.Entity"),
                ("AuditEventEntityDetail", "AuditEvent.Entity.Detail"),
            ]
        );

        let agent = type_def.backbone("AuditEvent.agent").unwrap();
        let names: Vec<_> = agent.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["who", "policy"]);
        assert_eq!(agent.properties[0].reference_targets(), vec!["Practitioner", "Device"]);

        let entity = type_def.backbone("AuditEvent.entity").unwrap();
        assert_eq!(
            entity.properties[2].backbone_path.as_deref(),
            Some("AuditEvent.agent")
        );
        assert!(entity.properties[0].reference_targets().is_empty());
    }

    #[test]
    fn test_constraints() {
        let type_def = parse_structure_definition(&audit_event_definition()).unwrap();
        assert_eq!(type_def.constraints.len(), 1);
        assert_eq!(type_def.constraints[0].key, "aev-1");
        assert!(!type_def.constraints[0].is_error);
        assert_eq!(type_def.constraints[0].location, "(base)");

        let detail = type_def.backbone("AuditEvent.entity.detail").unwrap();
        assert_eq!(detail.constraints[0].key, "aev-2");
        assert!(detail.constraints[0].is_error);
    }

    #[test]
    fn test_unknown_content_reference() {
        let mut sd = audit_event_definition();
        let elements = sd["snapshot"]["element"].as_array_mut().unwrap();
        elements.push(json!({"path": "AuditEvent.entity.nested", "min": 0, "max": "*",
            "contentReference": "#AuditEvent.missing"}));
        let err = parse_structure_definition(&sd).unwrap_err();
        assert!(matches!(err, Error::InvalidStructureDefinition { .. }));
    }

    #[test]
    fn test_parse_definitions_skips_profiles_and_unwraps_bundles() {
        let profile = json!({
            "resourceType": "StructureDefinition",
            "name": "VitalSigns",
            "kind": "resource",
            "derivation": "constraint",
            "type": "Observation",
            "snapshot": {"element": [{"path": "Observation"}]}
        });
        let bundle = json!({
            "resourceType": "Bundle",
            "entry": [{"resource": audit_event_definition()}, {"resource": profile}]
        });
        let broken = json!({"resourceType": "StructureDefinition", "name": "Broken"});

        let registry = parse_definitions([&bundle, &broken]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get_type_by_name("AuditEvent").is_some());
        assert!(registry
            .get_type("http://hl7.org/fhir/StructureDefinition/AuditEvent")
            .is_some());
    }

    #[test]
    fn test_parse_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("AuditEvent.json"),
            audit_event_definition().to_string(),
        )
        .unwrap();
        fs::write(dir.path().join("README.md"), "not a definition").unwrap();

        let registry = parse_dir(dir.path()).unwrap();
        assert_eq!(registry.resource_types().len(), 1);
    }

    #[test]
    fn test_backbone_names() {
        assert_eq!(
            backbone_struct_name("EvidenceVariable.characteristic.definitionByTypeAndValue"),
            "EvidenceVariableCharacteristicDefinitionByTypeAndValue"
        );
        assert_eq!(
            backbone_type_name("TestPlan.testCase.testRun.script"),
            "TestPlan.TestCase.TestRun.Script"
        );
    }
}
