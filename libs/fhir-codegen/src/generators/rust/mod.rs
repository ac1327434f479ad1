//! Rust code generator for FHIR types
//!
//! Emits modules in the shape of the `ferrum-r5` runtime: immutable records
//! with builders, build-time validation, visitor traversal and `TypeInfo`
//! metadata. The modules use the runtime's crate-private macros, so they are
//! meant to be placed inside that crate (`module_prefix` defaults to `crate`).

mod imports;
mod metadata;
mod records;
mod types;

use crate::error::{Error, Result as ParseResult};
use crate::generators::{Generator, GeneratorConfig};
use crate::ir::{TypeDefinition, TypeKind, TypeRegistry};
use anyhow::Result;
use heck::ToSnakeCase;
use imports::Imports;
use records::{Record, RecordKind};
use std::collections::HashMap;
use tracing::{debug, warn};

pub use types::{map_primitive, sanitize_field_name};

/// Output of the Rust generator
#[derive(Debug)]
pub struct RustOutput {
    /// Generated modules indexed by file name
    pub modules: HashMap<String, String>,
    /// Types that could not be generated, with the reason
    pub skipped: Vec<(String, String)>,
}

/// Rust code generator
pub struct RustGenerator {
    config: GeneratorConfig,
}

impl RustGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn new_default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Generator for RustGenerator {
    type Output = RustOutput;

    fn generate(&self, registry: &TypeRegistry) -> Result<Self::Output> {
        let mut modules = HashMap::new();
        let mut skipped = Vec::new();
        let mut generated: Vec<(String, Vec<(String, String)>)> = Vec::new();

        // Primitives are hand-written runtime types; one module per complex
        // type and per concrete resource
        let types = registry
            .complex_types()
            .into_iter()
            .chain(registry.resource_types());

        for type_def in types {
            match self.generate_type_module(type_def, registry) {
                Ok((code, statics)) => {
                    let module = type_def.name.to_snake_case();
                    debug!(name = %type_def.name, module = %module, "Generated module");
                    modules.insert(format!("{module}.rs"), code);
                    generated.push((module, statics));
                }
                Err(e) => {
                    warn!(name = %type_def.name, error = %e, "Skipping type");
                    skipped.push((type_def.name.clone(), e.to_string()));
                }
            }
        }

        generated.sort_by(|a, b| a.0.cmp(&b.0));
        modules.insert("mod.rs".to_string(), self.generate_mod_rs(&generated));

        Ok(RustOutput { modules, skipped })
    }
}

impl RustGenerator {
    /// Generate the module of one type with its backbones.
    ///
    /// Returns the code and the (type name, static) pairs it declares.
    fn generate_type_module(
        &self,
        type_def: &TypeDefinition,
        registry: &TypeRegistry,
    ) -> ParseResult<(String, Vec<(String, String)>)> {
        let records = build_records(type_def, registry)?;
        let mut imports = Imports::default();

        let mut constants = String::new();
        for record in &records {
            constants.push_str(&records::generate_constants(record, &mut imports));
        }

        let mut bodies = Vec::new();
        for record in &records {
            bodies.push(records::generate_record(record, &self.config, &mut imports));
        }

        let mut statics = Vec::new();
        for record in &records {
            statics.push(metadata::generate_type_info(record, &self.config, &mut imports));
        }

        let mut code = String::new();

        // Header comment
        code.push_str(&format!("//! {}\n", type_def.name));
        if self.config.generate_docs {
            if let Some(url) = &type_def.url {
                code.push_str(&format!("//!\n//! Generated from {}\n", url));
            }
        }
        code.push('\n');

        code.push_str(&imports.render(self.config.module_prefix()));
        if !constants.is_empty() {
            code.push('\n');
            code.push_str(&constants);
        }
        for body in bodies {
            code.push('\n');
            code.push_str(&body);
            code.push('\n');
        }
        for info in statics {
            code.push('\n');
            code.push_str(&info);
        }

        let names = records
            .iter()
            .map(|r| (r.type_name.to_string(), r.info_static()))
            .collect();
        Ok((code, names))
    }

    fn generate_mod_rs(&self, generated: &[(String, Vec<(String, String)>)]) -> String {
        let mut code = String::new();

        code.push_str("//! Generated FHIR data models\n\n");
        code.push_str(&format!(
            "use {}::model_support::TypeInfo;\n\n",
            self.config.module_prefix()
        ));

        for (module, _) in generated {
            code.push_str(&format!("pub mod {};\n", module));
        }

        code.push('\n');
        for (module, _) in generated {
            code.push_str(&format!("pub use {}::*;\n", module));
        }

        code.push_str("\n/// Metadata of a generated type by FHIR name\n");
        code.push_str("pub fn type_info(name: &str) -> Option<&'static TypeInfo> {\n");
        code.push_str("    let info: &'static TypeInfo = match name {\n");
        for (module, statics) in generated {
            for (type_name, info) in statics {
                code.push_str(&format!("        {type_name:?} => &{module}::{info},\n"));
            }
        }
        code.push_str("        _ => return None,\n    };\n    Some(info)\n}\n");

        code
    }
}

/// The records of a type: the type itself followed by its backbones
fn build_records<'a>(
    type_def: &'a TypeDefinition,
    registry: &TypeRegistry,
) -> ParseResult<Vec<Record<'a>>> {
    let base_type = type_def.base_type.as_deref().unwrap_or_default();
    let (kind, base) = match (type_def.kind, base_type) {
        (TypeKind::Resource, "DomainResource") => (RecordKind::Resource, "DomainResource"),
        (TypeKind::ComplexType, "Element" | "DataType") => (RecordKind::Datatype, "Element"),
        (TypeKind::ComplexType, "BackboneElement" | "BackboneType") => {
            (RecordKind::Backbone, "BackboneElement")
        }
        _ => {
            return Err(Error::unsupported(
                &type_def.name,
                format!("{:?} derived from '{base_type}'", type_def.kind),
            ))
        }
    };

    let mut records = vec![Record {
        kind,
        meta_kind: type_def.kind,
        struct_name: &type_def.name,
        type_name: &type_def.name,
        base: Some(base),
        url: type_def.url.as_deref(),
        description: type_def.description.as_deref(),
        fields: types::resolve_fields(&type_def.name, &type_def.properties, type_def, registry)?,
        constraints: &type_def.constraints,
    }];

    for backbone in &type_def.backbone_elements {
        records.push(Record {
            kind: RecordKind::Backbone,
            meta_kind: TypeKind::BackboneElement,
            struct_name: &backbone.name,
            type_name: &backbone.type_name,
            base: Some("BackboneElement"),
            url: None,
            description: backbone.description.as_deref(),
            fields: types::resolve_fields(&backbone.name, &backbone.properties, type_def, registry)?,
            constraints: &backbone.constraints,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::audit_event_definition;
    use crate::parser::{parse_definitions, parse_structure_definition};
    use serde_json::json;

    fn audit_event_module(config: GeneratorConfig) -> String {
        let definition = audit_event_definition();
        let registry = parse_definitions([&definition]);
        let output = RustGenerator::new(config).generate(&registry).unwrap();
        assert!(output.skipped.is_empty(), "{:?}", output.skipped);
        output.modules["audit_event.rs"].clone()
    }

    #[test]
    fn test_module_layout() {
        let definition = audit_event_definition();
        let registry = parse_definitions([&definition]);
        let output = RustGenerator::new_default().generate(&registry).unwrap();

        let mut names: Vec<_> = output.modules.keys().cloned().collect();
        names.sort();
        assert_eq!(names, vec!["audit_event.rs", "mod.rs"]);

        let mod_rs = &output.modules["mod.rs"];
        assert!(mod_rs.contains("pub mod audit_event;"));
        assert!(mod_rs.contains("pub use audit_event::*;"));
        assert!(mod_rs.contains(r#""AuditEvent.Entity.Detail" => &audit_event::AUDIT_EVENT_ENTITY_DETAIL_INFO,"#));
    }

    #[test]
    fn test_records_and_builders() {
        let code = audit_event_module(GeneratorConfig::default());

        assert!(code.contains("pub struct AuditEvent {\n    base: DomainResourceBase,"));
        assert!(code.contains("    code: CodeableConcept,\n"));
        assert!(code.contains("    occurred: Option<AuditEventOccurred>,\n"));
        assert!(code.contains("    agent: Vec<AuditEventAgent>,\n"));
        assert!(code.contains("    hash: HashCache,\n"));
        assert!(code.contains("domain_resource!(AuditEvent, AuditEventBuilder);"));
        assert!(code.contains("backbone_element!(AuditEventEntityDetail, AuditEventEntityDetailBuilder);"));

        // Required fields are unwrapped at build time
        assert!(code.contains(
            "recorded: validation::require_non_null(self.recorded.clone(), \"recorded\")?,"
        ));
        assert!(code.contains("validation::require_choice_element(\n"));

        // Append and replace setters for lists
        assert!(code.contains("pub fn agent(mut self, agent: AuditEventAgent) -> Self {"));
        assert!(code.contains(
            "pub fn set_agent(mut self, agent: impl IntoIterator<Item = AuditEventAgent>) -> Self {"
        ));
        assert!(code.contains("pub fn code(mut self, code: impl Into<CodeableConcept>) -> Self {"));
        assert!(code.contains("/// `Period` or `DateTime`"));
    }

    #[test]
    fn test_choice_enums_and_validation() {
        let code = audit_event_module(GeneratorConfig::default());

        assert!(code.contains(
            "choice_enum! {\n    /// AuditEvent.occurred[x]\n    pub enum AuditEventOccurred {\n        Period(Period),\n        DateTime(DateTime),\n    }\n}"
        ));
        assert!(code.contains("const AUDIT_EVENT_OCCURRED_TYPES: &[&str] = &[\"Period\", \"dateTime\"];"));
        assert!(code.contains(
            "const AUDIT_EVENT_AGENT_WHO_TARGETS: &[&str] = &[\"Practitioner\", \"Device\"];"
        ));
        assert!(code.contains(
            "validation::choice_element(self.occurred.as_ref(), \"occurred\", AUDIT_EVENT_OCCURRED_TYPES)?;"
        ));
        assert!(code.contains("validation::check_non_empty_list(&self.agent, \"agent\")?;"));
        assert!(code.contains(
            "validation::check_reference_type(Some(&self.who), \"who\", AUDIT_EVENT_AGENT_WHO_TARGETS)?;"
        ));
        // Any-resource references are not checked
        assert!(!code.contains("\"what\", AUDIT_EVENT"));
        assert!(code.contains("        validation::require_value_or_children(self)\n"));
    }

    #[test]
    fn test_visitor_follows_declaration_order() {
        let code = audit_event_module(GeneratorConfig::default());
        let code_at = code.find("self.code.accept(\"code\", None, v);").unwrap();
        let occurred_at = code
            .find("visitor::accept(v, \"occurred\", self.occurred.as_ref());")
            .unwrap();
        let agent_at = code
            .find("visitor::accept_list(v, \"agent\", &self.agent);")
            .unwrap();
        assert!(code_at < occurred_at && occurred_at < agent_at);

        // The content reference reuses the agent record
        assert!(code.contains("    agent: Vec<AuditEventAgent>,\n    hash: HashCache,\n}"));
        assert!(code.contains("fn type_name(&self) -> &'static str {\n        \"AuditEvent.Entity.Detail\"\n    }"));
    }

    #[test]
    fn test_metadata() {
        let code = audit_event_module(GeneratorConfig::default());
        assert!(code.contains("pub static AUDIT_EVENT_INFO: TypeInfo = TypeInfo {"));
        assert!(code.contains("    base: Some(\"DomainResource\"),\n"));
        assert!(code.contains(
            "        FieldInfo::new(\"code\", &[\"CodeableConcept\"])\n            .required()\n            .summary()\n            .binding(\"AuditEventSubType\", BindingStrength::Example, \"http://hl7.org/fhir/ValueSet/audit-event-sub-type\"),"
        ));
        assert!(code.contains("FieldInfo::new(\"agent\", &[\"AuditEvent.Agent\"])"));
        assert!(code.contains("FieldInfo::new(\"occurred\", AUDIT_EVENT_OCCURRED_TYPES),"));
        assert!(code.contains("            id: \"aev-1\",\n            level: ConstraintLevel::Warning,"));

        let bare = audit_event_module(GeneratorConfig {
            generate_metadata: false,
            ..GeneratorConfig::default()
        });
        assert!(bare.contains("    fields: &[],\n    constraints: &[],\n"));
        assert!(!bare.contains("FieldInfo"));
    }

    #[test]
    fn test_imports() {
        let code = audit_event_module(GeneratorConfig {
            module_prefix: Some("ferrum_r5".to_string()),
            ..GeneratorConfig::default()
        });
        assert!(code.starts_with("//! AuditEvent\n"));
        assert!(code.contains("use std::any::Any;\n\nuse ferrum_r5::builder::finish;\n"));
        assert!(code.contains("use ferrum_r5::resource::{domain_resource, DomainResourceBase};"));
        assert!(code.contains(
            "use ferrum_r5::types::{BackboneBase, Boolean, CodeableConcept, DateTime, FhirString, Instant, Period, Reference, Uri};"
        ));
        assert!(code.contains("use ferrum_r5::visitor::{self, Visitable, Visitor};"));
    }

    #[test]
    fn test_datatype_module() {
        let period = json!({
            "resourceType": "StructureDefinition",
            "url": "http://hl7.org/fhir/StructureDefinition/Period",
            "name": "Period",
            "kind": "complex-type",
            "type": "Period",
            "baseDefinition": "http://hl7.org/fhir/StructureDefinition/DataType",
            "snapshot": {"element": [
                {"path": "Period"},
                {"path": "Period.start", "min": 0, "max": "1", "isSummary": true,
                 "type": [{"code": "dateTime"}]},
                {"path": "Period.end", "min": 0, "max": "1", "type": [{"code": "dateTime"}]}
            ]}
        });
        let registry = parse_definitions([&period]);
        let output = RustGenerator::new_default().generate(&registry).unwrap();
        let code = &output.modules["period.rs"];

        assert!(code.contains("complex_element!(Period);"));
        assert!(code.contains("impl ElementBuilder for PeriodBuilder {"));
        assert!(!code.contains("HashCache"));
        assert!(code.contains(
            "        self.base.has_children()\n            || self.start.is_some()\n            || self.end.is_some()\n"
        ));
        assert!(code.contains("kind: TypeKind::ComplexType,"));
        assert!(code.contains("base: Some(\"Element\"),"));
    }

    /// The runtime's `Money` module is this generator's output, kept compiled
    /// inside ferrum-r5
    #[test]
    fn test_money_module_matches_runtime() {
        let money = json!({
            "resourceType": "StructureDefinition",
            "url": "http://hl7.org/fhir/StructureDefinition/Money",
            "name": "Money",
            "kind": "complex-type",
            "abstract": false,
            "type": "Money",
            "description": "An amount of economic utility in some recognized currency.",
            "baseDefinition": "http://hl7.org/fhir/StructureDefinition/DataType",
            "derivation": "specialization",
            "snapshot": {"element": [
                {"path": "Money", "min": 0, "max": "*"},
                {"path": "Money.id", "min": 0, "max": "1",
                 "base": {"path": "Element.id", "min": 0, "max": "1"},
                 "type": [{"code": "http://hl7.org/fhirpath/System.String"}]},
                {"path": "Money.extension", "min": 0, "max": "*",
                 "base": {"path": "Element.extension", "min": 0, "max": "*"},
                 "type": [{"code": "Extension"}]},
                {"path": "Money.value", "short": "Numerical value (with implicit precision)",
                 "min": 0, "max": "1", "isSummary": true,
                 "base": {"path": "Money.value", "min": 0, "max": "1"},
                 "type": [{"code": "decimal"}]},
                {"path": "Money.currency", "short": "ISO 4217 Currency Code",
                 "min": 0, "max": "1", "isSummary": true,
                 "base": {"path": "Money.currency", "min": 0, "max": "1"},
                 "type": [{"code": "code"}],
                 "binding": {
                    "extension": [{
                        "url": "http://hl7.org/fhir/StructureDefinition/elementdefinition-bindingName",
                        "valueString": "CurrencyCode"
                    }],
                    "strength": "required",
                    "valueSet": "http://hl7.org/fhir/ValueSet/currencies|5.0.0"
                 }}
            ]}
        });
        let registry = parse_definitions([&money]);
        let output = RustGenerator::new_default().generate(&registry).unwrap();

        assert_eq!(
            output.modules["money.rs"],
            include_str!("../../../../fhir-r5/src/types/money.rs")
        );
    }

    #[test]
    fn test_unsupported_types_are_skipped() {
        let mut definition = audit_event_definition();
        definition["snapshot"]["element"]
            .as_array_mut()
            .unwrap()
            .push(json!({"path": "AuditEvent.timing", "min": 0, "max": "1",
                "type": [{"code": "Timing"}]}));
        let bundle = json!({
            "resourceType": "StructureDefinition",
            "name": "Bundle",
            "kind": "resource",
            "type": "Bundle",
            "baseDefinition": "http://hl7.org/fhir/StructureDefinition/Resource",
            "snapshot": {"element": [{"path": "Bundle"}]}
        });
        assert!(parse_structure_definition(&bundle).is_ok());

        let registry = parse_definitions([&definition, &bundle]);
        let output = RustGenerator::new_default().generate(&registry).unwrap();
        let mut skipped: Vec<_> = output.skipped.iter().map(|(n, _)| n.as_str()).collect();
        skipped.sort();
        assert_eq!(skipped, vec!["AuditEvent", "Bundle"]);
        assert_eq!(output.modules.len(), 1);
    }
}
