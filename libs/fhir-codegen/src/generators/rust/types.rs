//! Mapping of FHIR types and elements to Rust types and identifiers

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

use crate::error::{Error, Result};
use crate::ir::{BackboneElement, Binding, Property, TypeDefinition, TypeRegistry};

/// Complex datatypes implemented by the runtime crate
const RUNTIME_COMPLEX_TYPES: &[&str] = &[
    "Annotation",
    "Attachment",
    "CodeableConcept",
    "CodeableReference",
    "Coding",
    "ContactDetail",
    "ContactPoint",
    "Expression",
    "Extension",
    "Identifier",
    "Meta",
    "Money",
    "Narrative",
    "Period",
    "Quantity",
    "Range",
    "Ratio",
    "Reference",
    "RelatedArtifact",
    "UsageContext",
];

/// Runtime types whose builders accept `impl Into<_>`
const INTO_TYPES: &[&str] = &[
    "FhirString",
    "Markdown",
    "Boolean",
    "Integer",
    "Integer64",
    "Decimal",
    "Instant",
    "Time",
    "Base64Binary",
    "CodeableConcept",
];

/// Map a FHIR primitive type code to its runtime type
pub fn map_primitive(code: &str) -> Option<&'static str> {
    let rust = match code {
        "string" => "FhirString",
        "boolean" => "Boolean",
        "integer" => "Integer",
        "integer64" => "Integer64",
        "positiveInt" => "PositiveInt",
        "unsignedInt" => "UnsignedInt",
        "decimal" => "Decimal",
        "uri" | "oid" | "uuid" => "Uri",
        "url" => "Url",
        "canonical" => "Canonical",
        "code" => "Code",
        "id" => "Id",
        "markdown" => "Markdown",
        "dateTime" => "DateTime",
        "date" => "Date",
        "instant" => "Instant",
        "time" => "Time",
        "base64Binary" => "Base64Binary",
        "xhtml" => "Xhtml",
        _ => return None,
    };
    Some(rust)
}

/// Where a field's Rust type is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOrigin {
    /// `{prefix}::types`
    Datatype,
    /// `{prefix}::resource::AnyResource`
    AnyResource,
    /// Declared in the module being generated
    Local,
}

/// A Rust type a field or choice variant refers to
#[derive(Debug, Clone)]
pub struct RustType {
    pub name: String,
    pub origin: TypeOrigin,
}

/// Map a FHIR type code to its runtime type
pub fn map_fhir_type_to_rust(code: &str, path: &str, registry: &TypeRegistry) -> Result<RustType> {
    if let Some(primitive) = map_primitive(code) {
        return Ok(RustType {
            name: primitive.to_string(),
            origin: TypeOrigin::Datatype,
        });
    }
    if code == "Resource" {
        return Ok(RustType {
            name: "AnyResource".to_string(),
            origin: TypeOrigin::AnyResource,
        });
    }
    if RUNTIME_COMPLEX_TYPES.contains(&code) || registry.get_type_by_name(code).is_some() {
        return Ok(RustType {
            name: code.to_string(),
            origin: TypeOrigin::Datatype,
        });
    }
    Err(Error::unsupported(
        path,
        format!("type '{code}' has no Rust mapping"),
    ))
}

/// A choice element resolved to its enum
#[derive(Debug, Clone)]
pub struct Choice {
    pub enum_name: String,
    /// (variant, type) pairs in declaration order
    pub variants: Vec<(String, RustType)>,
    pub types_const: String,
}

/// A property resolved for code generation
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub property: &'a Property,
    /// Field, accessor and setter identifier (`based_on`, `r#type`)
    pub ident: String,
    /// Replacing list setter (`set_based_on`, `set_type`)
    pub list_setter: String,
    /// Element type, without `Vec`/`Option`
    pub ty: RustType,
    pub choice: Option<Choice>,
    /// Type names exposed in metadata
    pub meta_types: Vec<String>,
    /// Constant holding the allowed reference targets
    pub targets_const: Option<String>,
    pub targets: Vec<String>,
}

impl Field<'_> {
    /// The name used on the wire and in visitor callbacks
    pub fn wire(&self) -> &str {
        &self.property.name
    }

    pub fn is_list(&self) -> bool {
        self.property.cardinality.is_array()
    }

    pub fn is_required(&self) -> bool {
        self.property.is_required
    }

    /// Required single-valued fields are stored unwrapped
    pub fn is_unwrapped(&self) -> bool {
        self.is_required() && !self.is_list()
    }

    /// Whether the setter takes `impl Into<_>`
    pub fn takes_into(&self) -> bool {
        self.choice.is_some() || INTO_TYPES.contains(&self.ty.name.as_str())
    }

    /// Type of the record field
    pub fn record_type(&self) -> String {
        if self.is_list() {
            format!("Vec<{}>", self.ty.name)
        } else if self.is_required() {
            self.ty.name.clone()
        } else {
            format!("Option<{}>", self.ty.name)
        }
    }

    /// Type of the builder field
    pub fn builder_type(&self) -> String {
        if self.is_list() {
            format!("Vec<{}>", self.ty.name)
        } else {
            format!("Option<{}>", self.ty.name)
        }
    }

    /// Whether the field holds a plain `Reference` with restricted targets
    pub fn checks_reference(&self) -> bool {
        self.targets_const.is_some() && self.property.type_codes() == ["Reference"]
    }
}

/// Fields of a type or backbone, resolved against the registry
pub fn resolve_fields<'a>(
    owner: &str,
    properties: &'a [Property],
    type_def: &TypeDefinition,
    registry: &TypeRegistry,
) -> Result<Vec<Field<'a>>> {
    properties
        .iter()
        .map(|property| resolve_field(owner, property, type_def, registry))
        .collect()
}

fn resolve_field<'a>(
    owner: &str,
    property: &'a Property,
    type_def: &TypeDefinition,
    registry: &TypeRegistry,
) -> Result<Field<'a>> {
    let snake = property.name.to_snake_case();
    let ident = sanitize_field_name(&property.name);
    let const_prefix = format!("{}_{}", owner.to_shouty_snake_case(), snake.to_shouty_snake_case());

    let (ty, choice, meta_types) = if let Some(path) = &property.backbone_path {
        let backbone: &BackboneElement = type_def.backbone(path).ok_or_else(|| {
            Error::invalid(&property.path, format!("unknown backbone '{path}'"))
        })?;
        let ty = RustType {
            name: backbone.name.clone(),
            origin: TypeOrigin::Local,
        };
        (ty, None, vec![backbone.type_name.clone()])
    } else if property.is_choice {
        let enum_name = format!("{owner}{}", property.name.to_upper_camel_case());
        let variants = property
            .types
            .iter()
            .map(|t| {
                Ok((
                    t.code.to_upper_camel_case(),
                    map_fhir_type_to_rust(&t.code, &property.path, registry)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        let ty = RustType {
            name: enum_name.clone(),
            origin: TypeOrigin::Local,
        };
        let choice = Choice {
            enum_name,
            variants,
            types_const: format!("{const_prefix}_TYPES"),
        };
        let codes = property.types.iter().map(|t| t.code.clone()).collect();
        (ty, Some(choice), codes)
    } else {
        let code = match property.types.as_slice() {
            [single] => &single.code,
            _ => {
                return Err(Error::unsupported(
                    &property.path,
                    "several types on a non-choice element",
                ))
            }
        };
        let ty = map_fhir_type_to_rust(code, &property.path, registry)?;
        (ty, None, vec![code.clone()])
    };

    let targets = property.reference_targets();
    let targets_const = (!targets.is_empty()).then(|| format!("{const_prefix}_TARGETS"));

    Ok(Field {
        property,
        list_setter: format!("set_{}", snake),
        ident,
        ty,
        choice,
        meta_types,
        targets_const,
        targets,
    })
}

/// Binding name, falling back to the element name
pub fn binding_name(binding: &Binding, property: &Property) -> String {
    binding
        .name
        .clone()
        .unwrap_or_else(|| property.name.to_upper_camel_case())
}

/// Collapse a definition text onto one doc comment line
pub fn doc_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitize a field name to be a valid Rust identifier
pub fn sanitize_field_name(name: &str) -> String {
    let snake = name.to_snake_case();

    if is_rust_keyword(&snake) {
        format!("r#{}", snake)
    } else {
        snake
    }
}

/// Check if a string is a Rust keyword
fn is_rust_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "break"
            | "const"
            | "continue"
            | "crate"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "async"
            | "await"
            | "dyn"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
    )
}
