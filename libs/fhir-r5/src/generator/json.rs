//! FHIR JSON generation
//!
//! Follows the JSON mapping rules of the FHIR specification:
//! - Resources start with `resourceType`.
//! - Choice elements carry the type suffix (`occurredDateTime`).
//! - A primitive's value sits under the element name; its `id` and
//!   `extension` sit in an object under `_name`.
//! - Repeating primitives produce parallel `name` / `_name` arrays padded
//!   with `null` so positions line up.
//! - Absent elements and empty lists are omitted.

use serde_json::{Map, Value};
use tracing::trace;

use super::GeneratorConfig;
use crate::error::Result;
use crate::model_support::{choice_element_name, TypeInfo};
use crate::visitor::{PrimitiveValue, Visitable, Visitor};

/// Writes model trees as FHIR JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonGenerator {
    config: GeneratorConfig,
}

impl JsonGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the JSON value of `node`.
    ///
    /// A primitive root produces its bare value, or its `_` metadata object
    /// when it only carries extensions. Every other node produces an object.
    pub fn generate<T: Visitable + ?Sized>(&self, node: &T) -> Result<Value> {
        let mut writer = JsonWriter::default();
        node.accept(node.type_name(), None, &mut writer);
        trace!(type_name = node.type_name(), "generated JSON");
        Ok(writer.result.unwrap_or(Value::Null))
    }

    /// Generate `node` as a JSON string, indented when configured.
    pub fn generate_string<T: Visitable + ?Sized>(&self, node: &T) -> Result<String> {
        let value = self.generate(node)?;
        let text = if self.config.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }
}

/// Object under construction for one node
#[derive(Debug)]
struct Frame {
    info: &'static TypeInfo,
    object: Map<String, Value>,
    /// Raw value of a primitive node
    value: Option<Value>,
    /// Entries of the list currently being visited on this node
    list: Option<ListBuffer>,
}

#[derive(Debug, Default)]
struct ListBuffer {
    name: String,
    values: Vec<Value>,
    metadata: Vec<Value>,
}

impl Frame {
    fn new(node: &dyn Visitable) -> Self {
        let info = node.type_info();
        let mut object = Map::new();
        if info.is_resource() {
            object.insert(
                "resourceType".to_string(),
                Value::String(node.type_name().to_string()),
            );
        }
        Self {
            info,
            object,
            value: None,
            list: None,
        }
    }

    /// Wire name of a child element of this node.
    fn element_name(&self, name: &str, child: &dyn Visitable) -> String {
        match self.info.field(name) {
            Some(field) if field.is_choice() => choice_element_name(name, child.type_name()),
            _ => name.to_string(),
        }
    }

    /// Split into the element value and its `_name` metadata.
    fn finish(self) -> (Option<Value>, Option<Value>) {
        if self.info.is_primitive() {
            let metadata = (!self.object.is_empty()).then(|| Value::Object(self.object));
            (self.value, metadata)
        } else {
            (Some(Value::Object(self.object)), None)
        }
    }
}

#[derive(Debug, Default)]
struct JsonWriter {
    stack: Vec<Frame>,
    /// Wire names of the open frames, parallel to `stack`
    names: Vec<String>,
    result: Option<Value>,
}

impl JsonWriter {
    fn attach(
        &mut self,
        name: String,
        index: Option<usize>,
        value: Option<Value>,
        metadata: Option<Value>,
    ) {
        let Some(parent) = self.stack.last_mut() else {
            self.result = value.or(metadata);
            return;
        };
        match (index, parent.list.as_mut()) {
            (Some(_), Some(list)) => {
                if list.name.is_empty() {
                    list.name = name;
                }
                list.values.push(value.unwrap_or(Value::Null));
                list.metadata.push(metadata.unwrap_or(Value::Null));
            }
            _ => {
                if let Some(metadata) = metadata {
                    parent.object.insert(format!("_{name}"), metadata);
                }
                if let Some(value) = value {
                    parent.object.insert(name, value);
                }
            }
        }
    }
}

impl Visitor for JsonWriter {
    fn visit_start(&mut self, name: &str, _index: Option<usize>, node: &dyn Visitable) {
        let wire_name = match self.stack.last() {
            Some(parent) => parent.element_name(name, node),
            None => name.to_string(),
        };
        self.names.push(wire_name);
        self.stack.push(Frame::new(node));
    }

    fn visit_end(&mut self, _name: &str, index: Option<usize>, _node: &dyn Visitable) {
        let (Some(frame), Some(name)) = (self.stack.pop(), self.names.pop()) else {
            return;
        };
        let (value, metadata) = frame.finish();
        self.attach(name, index, value, metadata);
    }

    fn visit_list_start(&mut self, _name: &str, len: usize) {
        if let Some(frame) = self.stack.last_mut() {
            frame.list = Some(ListBuffer {
                name: String::new(),
                values: Vec::with_capacity(len),
                metadata: Vec::with_capacity(len),
            });
        }
    }

    fn visit_list_end(&mut self, name: &str, _len: usize) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        let Some(list) = frame.list.take() else {
            return;
        };
        let wire_name = if list.name.is_empty() {
            name.to_string()
        } else {
            list.name
        };
        if list.metadata.iter().any(|m| !m.is_null()) {
            frame
                .object
                .insert(format!("_{wire_name}"), Value::Array(list.metadata));
        }
        if list.values.iter().any(|v| !v.is_null()) {
            frame.object.insert(wire_name, Value::Array(list.values));
        }
    }

    fn visit_value(&mut self, name: &str, value: PrimitiveValue<'_>) {
        let Some(frame) = self.stack.last_mut() else {
            self.result = Some(value.to_json());
            return;
        };
        if frame.info.is_primitive() && name == "value" {
            frame.value = Some(value.to_json());
        } else {
            frame.object.insert(name.to_string(), value.to_json());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ElementBuilder;
    use crate::types::{DateTime, Extension, FhirString, Period};
    use serde_json::json;

    #[test]
    fn test_primitive_metadata_goes_under_underscore() {
        let start = DateTime::builder()
            .value("2024-01-01")
            .id("s1")
            .build()
            .unwrap();
        let period = Period::builder().start(start).build().unwrap();
        let value = JsonGenerator::default().generate(&period).unwrap();
        assert_eq!(value, json!({"start": "2024-01-01", "_start": {"id": "s1"}}));
    }

    #[test]
    fn test_extension_only_primitive() {
        let text = FhirString::builder()
            .extension(
                Extension::builder()
                    .url("http://example.org/absent")
                    .value(FhirString::from("masked"))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let value = JsonGenerator::default().generate(&text).unwrap();
        assert_eq!(
            value,
            json!({"extension": [{"url": "http://example.org/absent", "valueString": "masked"}]})
        );
    }

    #[test]
    fn test_pretty_string() {
        let period = Period::builder()
            .start(DateTime::new("2024").unwrap())
            .build()
            .unwrap();
        let compact = JsonGenerator::default().generate_string(&period).unwrap();
        assert_eq!(compact, r#"{"start":"2024"}"#);
        let pretty = JsonGenerator::new(GeneratorConfig::pretty())
            .generate_string(&period)
            .unwrap();
        assert!(pretty.contains('\n'));
    }
}
