//! Builder support
//!
//! Records are only produced by `build()` on their builder. Setters for the
//! inherited base fields live in the traits below and are shared by every
//! builder of the matching kind; import them through [`crate::prelude`].
//!
//! Scalar setters replace the current value. List setters come in pairs: the
//! singular name appends one entry, the `set_` name replaces the whole list.
//! `build()` borrows the builder, so a failed build can be fixed and retried.

use tracing::debug;

use crate::error::Result;
use crate::resource::{AnyResource, DomainResourceBase, ResourceBase};
use crate::types::{BackboneBase, Code, ElementBase, Extension, Meta, Narrative, Uri};

/// Setters for `Element.id` and `Element.extension`
pub trait ElementBuilder: Sized {
    #[doc(hidden)]
    fn element_base(&mut self) -> &mut ElementBase;

    fn id(mut self, id: impl Into<String>) -> Self {
        self.element_base().id = Some(id.into());
        self
    }

    fn extension(mut self, extension: Extension) -> Self {
        self.element_base().extension.push(extension);
        self
    }

    fn set_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.element_base().extension = extension.into_iter().collect();
        self
    }
}

/// Setters for `BackboneElement.modifierExtension`
pub trait BackboneElementBuilder: ElementBuilder {
    #[doc(hidden)]
    fn backbone_base(&mut self) -> &mut BackboneBase;

    fn modifier_extension(mut self, extension: Extension) -> Self {
        self.backbone_base().modifier_extension.push(extension);
        self
    }

    fn set_modifier_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.backbone_base().modifier_extension = extension.into_iter().collect();
        self
    }
}

/// Setters for the `Resource` fields
pub trait ResourceBuilder: Sized {
    #[doc(hidden)]
    fn resource_base(&mut self) -> &mut ResourceBase;

    /// Logical id; checked against the `id` lexical rule at build time.
    fn id(mut self, id: impl Into<String>) -> Self {
        self.resource_base().id = Some(id.into());
        self
    }

    fn meta(mut self, meta: Meta) -> Self {
        self.resource_base().meta = Some(meta);
        self
    }

    fn implicit_rules(mut self, implicit_rules: Uri) -> Self {
        self.resource_base().implicit_rules = Some(implicit_rules);
        self
    }

    fn language(mut self, language: Code) -> Self {
        self.resource_base().language = Some(language);
        self
    }
}

/// Setters for the `DomainResource` fields
pub trait DomainResourceBuilder: ResourceBuilder {
    #[doc(hidden)]
    fn domain_base(&mut self) -> &mut DomainResourceBase;

    fn text(mut self, text: Narrative) -> Self {
        self.domain_base().text = Some(text);
        self
    }

    fn contained(mut self, resource: impl Into<AnyResource>) -> Self {
        self.domain_base().contained.push(resource.into());
        self
    }

    fn set_contained(mut self, resources: impl IntoIterator<Item = AnyResource>) -> Self {
        self.domain_base().contained = resources.into_iter().collect();
        self
    }

    fn extension(mut self, extension: Extension) -> Self {
        self.domain_base().extension.push(extension);
        self
    }

    fn set_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_base().extension = extension.into_iter().collect();
        self
    }

    fn modifier_extension(mut self, extension: Extension) -> Self {
        self.domain_base().modifier_extension.push(extension);
        self
    }

    fn set_modifier_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_base().modifier_extension = extension.into_iter().collect();
        self
    }
}

/// Run a record constructor and log the outcome.
pub(crate) fn finish<T>(
    type_name: &str,
    validate: bool,
    construct: impl FnOnce() -> Result<T>,
) -> Result<T> {
    if !validate {
        debug!(type_name, "building without validation");
    }
    let result = construct();
    if let Err(e) = &result {
        debug!(type_name, error = %e, "build failed");
    }
    result
}
