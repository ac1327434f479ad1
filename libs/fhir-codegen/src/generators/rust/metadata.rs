//! `TypeInfo` statics describing generated records

use super::imports::Imports;
use super::records::Record;
use super::types::{binding_name, Field};
use crate::generators::GeneratorConfig;
use crate::ir::{Constraint, TypeKind};

pub fn generate_type_info(record: &Record, config: &GeneratorConfig, imports: &mut Imports) -> String {
    imports.add("model_support", "TypeInfo");
    imports.add("model_support", "TypeKind");

    let mut code = String::new();
    code.push_str(&format!(
        "pub static {}: TypeInfo = TypeInfo {{\n",
        record.info_static()
    ));
    code.push_str(&format!("    name: {:?},\n", record.type_name));
    code.push_str(&format!(
        "    kind: TypeKind::{},\n",
        kind_variant(record.meta_kind)
    ));
    code.push_str(&format!("    base: {},\n", optional_literal(record.base)));
    code.push_str(&format!("    url: {},\n", optional_literal(record.url)));

    let fields: &[Field] = if config.generate_metadata {
        &record.fields[..]
    } else {
        &[]
    };
    if fields.is_empty() {
        code.push_str("    fields: &[],\n");
    } else {
        imports.add("model_support", "FieldInfo");
        code.push_str("    fields: &[\n");
        for field in fields {
            code.push_str(&field_info(field, imports));
        }
        code.push_str("    ],\n");
    }

    let constraints: &[Constraint] = if config.generate_metadata {
        record.constraints
    } else {
        &[]
    };
    if constraints.is_empty() {
        code.push_str("    constraints: &[],\n");
    } else {
        imports.add("model_support", "ConstraintInfo");
        imports.add("model_support", "ConstraintLevel");
        code.push_str("    constraints: &[\n");
        for constraint in constraints {
            let level = if constraint.is_error { "Rule" } else { "Warning" };
            code.push_str("        ConstraintInfo {\n");
            code.push_str(&format!("            id: {:?},\n", constraint.key));
            code.push_str(&format!("            level: ConstraintLevel::{level},\n"));
            code.push_str(&format!("            location: {:?},\n", constraint.location));
            code.push_str(&format!("            description: {:?},\n", constraint.human));
            code.push_str(&format!(
                "            expression: {:?},\n",
                constraint.expression.as_deref().unwrap_or_default()
            ));
            code.push_str("        },\n");
        }
        code.push_str("    ],\n");
    }

    code.push_str("};\n");
    code
}

fn field_info(field: &Field, imports: &mut Imports) -> String {
    let types = match &field.choice {
        Some(choice) => choice.types_const.clone(),
        None => format!("&{:?}", field.meta_types),
    };

    let mut calls = Vec::new();
    if field.is_required() {
        calls.push(".required()".to_string());
    }
    if field.is_list() {
        calls.push(".list()".to_string());
    }
    if field.property.is_summary {
        calls.push(".summary()".to_string());
    }
    if field.property.is_modifier {
        calls.push(".modifier()".to_string());
    }
    if let Some(targets) = &field.targets_const {
        calls.push(format!(".targets({targets})"));
    }
    if let Some(binding) = &field.property.binding {
        if let Some(value_set) = &binding.value_set {
            imports.add("model_support", "BindingStrength");
            calls.push(format!(
                ".binding({:?}, BindingStrength::{}, {:?})",
                binding_name(binding, field.property),
                binding.strength.variant(),
                value_set
            ));
        }
    }

    let mut code = format!("        FieldInfo::new({:?}, {types})", field.wire());
    for call in calls {
        code.push_str("\n            ");
        code.push_str(&call);
    }
    code.push_str(",\n");
    code
}

fn kind_variant(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Resource => "Resource",
        TypeKind::ComplexType => "ComplexType",
        TypeKind::PrimitiveType => "PrimitiveType",
        TypeKind::BackboneElement => "BackboneElement",
    }
}

fn optional_literal(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("Some({value:?})"),
        None => "None".to_string(),
    }
}
