use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{
    BindingStrength, ConstraintInfo, ConstraintLevel, FieldInfo, TypeInfo, TypeKind,
};
use crate::types::element::complex_element;
use crate::types::{
    Base64Binary, Code, DateTime, Decimal, ElementBase, FhirString, Integer64, PositiveInt, Url,
};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

/// Content in a format defined elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attachment {
    base: ElementBase,
    content_type: Option<Code>,
    language: Option<Code>,
    data: Option<Base64Binary>,
    url: Option<Url>,
    size: Option<Integer64>,
    hash: Option<Base64Binary>,
    title: Option<FhirString>,
    creation: Option<DateTime>,
    height: Option<PositiveInt>,
    width: Option<PositiveInt>,
    frames: Option<PositiveInt>,
    duration: Option<Decimal>,
    pages: Option<PositiveInt>,
}

impl Attachment {
    pub fn builder() -> AttachmentBuilder {
        AttachmentBuilder::default()
    }

    pub fn to_builder(&self) -> AttachmentBuilder {
        AttachmentBuilder {
            base: self.base.clone(),
            content_type: self.content_type.clone(),
            language: self.language.clone(),
            data: self.data.clone(),
            url: self.url.clone(),
            size: self.size.clone(),
            hash: self.hash.clone(),
            title: self.title.clone(),
            creation: self.creation.clone(),
            height: self.height.clone(),
            width: self.width.clone(),
            frames: self.frames.clone(),
            duration: self.duration.clone(),
            pages: self.pages.clone(),
            skip_validation: false,
        }
    }

    /// Mime type of the content, with charset etc.
    pub fn content_type(&self) -> Option<&Code> {
        self.content_type.as_ref()
    }

    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub fn data(&self) -> Option<&Base64Binary> {
        self.data.as_ref()
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Number of bytes of content (if url provided)
    pub fn size(&self) -> Option<&Integer64> {
        self.size.as_ref()
    }

    /// Hash of the data (sha-1, base64ed)
    pub fn hash(&self) -> Option<&Base64Binary> {
        self.hash.as_ref()
    }

    pub fn title(&self) -> Option<&FhirString> {
        self.title.as_ref()
    }

    pub fn creation(&self) -> Option<&DateTime> {
        self.creation.as_ref()
    }

    pub fn height(&self) -> Option<&PositiveInt> {
        self.height.as_ref()
    }

    pub fn width(&self) -> Option<&PositiveInt> {
        self.width.as_ref()
    }

    pub fn frames(&self) -> Option<&PositiveInt> {
        self.frames.as_ref()
    }

    pub fn duration(&self) -> Option<&Decimal> {
        self.duration.as_ref()
    }

    pub fn pages(&self) -> Option<&PositiveInt> {
        self.pages.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(Attachment);

impl Visitable for Attachment {
    fn type_name(&self) -> &'static str {
        "Attachment"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TYPE_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.content_type.is_some()
            || self.language.is_some()
            || self.data.is_some()
            || self.url.is_some()
            || self.size.is_some()
            || self.hash.is_some()
            || self.title.is_some()
            || self.creation.is_some()
            || self.height.is_some()
            || self.width.is_some()
            || self.frames.is_some()
            || self.duration.is_some()
            || self.pages.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "contentType", self.content_type.as_ref());
            visitor::accept(v, "language", self.language.as_ref());
            visitor::accept(v, "data", self.data.as_ref());
            visitor::accept(v, "url", self.url.as_ref());
            visitor::accept(v, "size", self.size.as_ref());
            visitor::accept(v, "hash", self.hash.as_ref());
            visitor::accept(v, "title", self.title.as_ref());
            visitor::accept(v, "creation", self.creation.as_ref());
            visitor::accept(v, "height", self.height.as_ref());
            visitor::accept(v, "width", self.width.as_ref());
            visitor::accept(v, "frames", self.frames.as_ref());
            visitor::accept(v, "duration", self.duration.as_ref());
            visitor::accept(v, "pages", self.pages.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttachmentBuilder {
    base: ElementBase,
    content_type: Option<Code>,
    language: Option<Code>,
    data: Option<Base64Binary>,
    url: Option<Url>,
    size: Option<Integer64>,
    hash: Option<Base64Binary>,
    title: Option<FhirString>,
    creation: Option<DateTime>,
    height: Option<PositiveInt>,
    width: Option<PositiveInt>,
    frames: Option<PositiveInt>,
    duration: Option<Decimal>,
    pages: Option<PositiveInt>,
    skip_validation: bool,
}

impl ElementBuilder for AttachmentBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl AttachmentBuilder {
    pub fn content_type(mut self, content_type: Code) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn language(mut self, language: Code) -> Self {
        self.language = Some(language);
        self
    }

    pub fn data(mut self, data: impl Into<Base64Binary>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    pub fn size(mut self, size: impl Into<Integer64>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn hash(mut self, hash: impl Into<Base64Binary>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn title(mut self, title: impl Into<FhirString>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn creation(mut self, creation: DateTime) -> Self {
        self.creation = Some(creation);
        self
    }

    pub fn height(mut self, height: PositiveInt) -> Self {
        self.height = Some(height);
        self
    }

    pub fn width(mut self, width: PositiveInt) -> Self {
        self.width = Some(width);
        self
    }

    pub fn frames(mut self, frames: PositiveInt) -> Self {
        self.frames = Some(frames);
        self
    }

    pub fn duration(mut self, duration: impl Into<Decimal>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn pages(mut self, pages: PositiveInt) -> Self {
        self.pages = Some(pages);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Attachment> {
        let validate = !self.skip_validation;
        finish("Attachment", validate, || {
            let attachment = Attachment {
                base: self.base.clone(),
                content_type: self.content_type.clone(),
                language: self.language.clone(),
                data: self.data.clone(),
                url: self.url.clone(),
                size: self.size.clone(),
                hash: self.hash.clone(),
                title: self.title.clone(),
                creation: self.creation.clone(),
                height: self.height.clone(),
                width: self.width.clone(),
                frames: self.frames.clone(),
                duration: self.duration.clone(),
                pages: self.pages.clone(),
            };
            if validate {
                attachment.validate()?;
            }
            Ok(attachment)
        })
    }
}

pub static TYPE_INFO: TypeInfo = TypeInfo {
    name: "Attachment",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Attachment"),
    fields: &[
        FieldInfo::new("contentType", &["code"]).summary().binding(
            "MimeType",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/mimetypes|5.0.0",
        ),
        FieldInfo::new("language", &["code"]).summary().binding(
            "Language",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/all-languages|5.0.0",
        ),
        FieldInfo::new("data", &["base64Binary"]),
        FieldInfo::new("url", &["url"]).summary(),
        FieldInfo::new("size", &["integer64"]).summary(),
        FieldInfo::new("hash", &["base64Binary"]).summary(),
        FieldInfo::new("title", &["string"]).summary(),
        FieldInfo::new("creation", &["dateTime"]).summary(),
        FieldInfo::new("height", &["positiveInt"]),
        FieldInfo::new("width", &["positiveInt"]),
        FieldInfo::new("frames", &["positiveInt"]),
        FieldInfo::new("duration", &["decimal"]),
        FieldInfo::new("pages", &["positiveInt"]),
    ],
    constraints: &[ConstraintInfo {
        id: "att-1",
        level: ConstraintLevel::Rule,
        location: "(base)",
        description: "If the Attachment has data, it SHALL have a contentType",
        expression: "data.empty() or contentType.exists()",
    }],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_with_inline_data() {
        let attachment = Attachment::builder()
            .content_type(Code::new("text/plain").unwrap())
            .data(b"hello".to_vec())
            .size(5_i64)
            .title("greeting")
            .build()
            .unwrap();
        assert_eq!(attachment.data().unwrap().value().unwrap(), b"hello");
        assert_eq!(attachment.size().unwrap().value(), Some(&5));
        assert_eq!(attachment, attachment.to_builder().build().unwrap());
    }
}
