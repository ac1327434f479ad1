//! Visitor traversal
//!
//! Every element and resource implements [`Visitable::accept`]. A call runs
//! `pre_visit` → `visit_start` → `visit` → children in schema order →
//! `visit_end` → `post_visit`. Returning `false` from `pre_visit` skips the node
//! entirely; returning `false` from `visit` skips its children but still
//! delivers `visit_end`/`post_visit`.
//!
//! Lists are bracketed by `visit_list_start`/`visit_list_end` and each entry is
//! visited with its position. Empty lists and absent fields produce no
//! callbacks. Raw values (the `value` of a primitive, `Element.id`,
//! `Extension.url`, `Resource.id`) arrive through [`Visitor::visit_value`].

use std::any::Any;
use std::fmt::Debug;

use base64::Engine;
use chrono::{DateTime, FixedOffset, NaiveTime, SecondsFormat};
use rust_decimal::Decimal;
use serde_json::{Number, Value};

use crate::model_support::{TypeInfo, TypeKind};

/// A node that can be traversed by a [`Visitor`].
pub trait Visitable: Debug + Send + Sync + 'static {
    /// FHIR type name (`"Period"`, `"dateTime"`, `"AuditEvent.Agent"`)
    fn type_name(&self) -> &'static str;

    fn type_info(&self) -> &'static TypeInfo;

    /// Whether any child field is populated.
    fn has_children(&self) -> bool;

    /// Dispatch this node and its children to `visitor`.
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor);

    fn as_any(&self) -> &dyn Any;
}

impl dyn Visitable {
    pub fn downcast_ref<T: Visitable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Visitable>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn kind(&self) -> TypeKind {
        self.type_info().kind
    }

    /// Walk this node as a root, named by its type.
    pub fn walk(&self, visitor: &mut dyn Visitor) {
        self.accept(self.type_name(), None, visitor);
    }
}

/// Receives traversal callbacks. All methods default to "continue, do nothing".
#[allow(unused_variables)]
pub trait Visitor {
    fn pre_visit(&mut self, node: &dyn Visitable) -> bool {
        true
    }

    fn visit_start(&mut self, name: &str, index: Option<usize>, node: &dyn Visitable) {}

    /// Return `false` to skip the children of `node`.
    fn visit(&mut self, name: &str, index: Option<usize>, node: &dyn Visitable) -> bool {
        true
    }

    fn visit_end(&mut self, name: &str, index: Option<usize>, node: &dyn Visitable) {}

    fn post_visit(&mut self, node: &dyn Visitable) {}

    fn visit_list_start(&mut self, name: &str, len: usize) {}

    fn visit_list_end(&mut self, name: &str, len: usize) {}

    fn visit_value(&mut self, name: &str, value: PrimitiveValue<'_>) {}
}

/// Borrowed raw value of a primitive element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue<'a> {
    Boolean(bool),
    Integer(i32),
    Integer64(i64),
    Decimal(&'a Decimal),
    String(&'a str),
    Bytes(&'a [u8]),
    Instant(&'a DateTime<FixedOffset>),
    Time(&'a NaiveTime),
}

impl PrimitiveValue<'_> {
    /// FHIR JSON representation of the value.
    pub fn to_json(&self) -> Value {
        match self {
            PrimitiveValue::Boolean(b) => Value::Bool(*b),
            PrimitiveValue::Integer(i) => Value::from(*i),
            // integer64 is carried as a JSON string
            PrimitiveValue::Integer64(i) => Value::String(i.to_string()),
            PrimitiveValue::Decimal(d) => decimal_to_json(d),
            PrimitiveValue::String(s) => Value::String((*s).to_string()),
            PrimitiveValue::Bytes(b) => {
                Value::String(base64::engine::general_purpose::STANDARD.encode(b))
            }
            PrimitiveValue::Instant(dt) => {
                Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            PrimitiveValue::Time(t) => Value::String(t.format("%H:%M:%S%.f").to_string()),
        }
    }
}

fn decimal_to_json(d: &Decimal) -> Value {
    // Written from the decimal text so scale and digits survive
    let text = d.to_string();
    match serde_json::from_str::<Number>(&text) {
        Ok(number) => Value::Number(number),
        Err(_) => Value::String(text),
    }
}

/// Run the node protocol around `children`.
pub fn visit_node(
    visitor: &mut dyn Visitor,
    name: &str,
    index: Option<usize>,
    node: &dyn Visitable,
    children: impl FnOnce(&mut dyn Visitor),
) {
    if visitor.pre_visit(node) {
        visitor.visit_start(name, index, node);
        if visitor.visit(name, index, node) {
            children(visitor);
        }
        visitor.visit_end(name, index, node);
        visitor.post_visit(node);
    }
}

/// Visit a raw value if present.
pub fn accept_value(visitor: &mut dyn Visitor, name: &str, value: Option<PrimitiveValue<'_>>) {
    if let Some(value) = value {
        visitor.visit_value(name, value);
    }
}

/// Visit a single optional child.
pub fn accept<T: Visitable + ?Sized>(visitor: &mut dyn Visitor, name: &str, child: Option<&T>) {
    if let Some(child) = child {
        child.accept(name, None, visitor);
    }
}

/// Visit the entries of a list, each with its position.
pub fn accept_list<T: Visitable>(visitor: &mut dyn Visitor, name: &str, list: &[T]) {
    if list.is_empty() {
        return;
    }
    visitor.visit_list_start(name, list.len());
    for (i, item) in list.iter().enumerate() {
        item.accept(name, Some(i), visitor);
    }
    visitor.visit_list_end(name, list.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_primitive_value_json() {
        assert_eq!(PrimitiveValue::Boolean(true).to_json(), json!(true));
        assert_eq!(PrimitiveValue::Integer(-3).to_json(), json!(-3));
        assert_eq!(PrimitiveValue::Integer64(1 << 40).to_json(), json!("1099511627776"));
        assert_eq!(PrimitiveValue::String("abc").to_json(), json!("abc"));
        assert_eq!(PrimitiveValue::Bytes(b"hello").to_json(), json!("aGVsbG8="));
    }

    #[test]
    fn test_decimal_json() {
        let whole = Decimal::new(42, 0);
        assert_eq!(PrimitiveValue::Decimal(&whole).to_json(), json!(42));
        let frac = Decimal::new(125, 2);
        assert_eq!(PrimitiveValue::Decimal(&frac).to_json(), json!(1.25));
        let padded = Decimal::new(150, 2);
        assert_eq!(PrimitiveValue::Decimal(&padded).to_json().to_string(), "1.50");
    }

    #[test]
    fn test_instant_and_time_json() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let instant = utc.with_ymd_and_hms(2023, 5, 1, 10, 30, 0).unwrap();
        assert_eq!(
            PrimitiveValue::Instant(&instant).to_json(),
            json!("2023-05-01T10:30:00Z")
        );

        let cet = FixedOffset::east_opt(3600).unwrap();
        let instant = cet.with_ymd_and_hms(2023, 5, 1, 10, 30, 0).unwrap();
        assert_eq!(
            PrimitiveValue::Instant(&instant).to_json(),
            json!("2023-05-01T10:30:00+01:00")
        );

        let time = NaiveTime::from_hms_opt(8, 15, 0).unwrap();
        assert_eq!(PrimitiveValue::Time(&time).to_json(), json!("08:15:00"));
    }
}
