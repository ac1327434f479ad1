//! Choice elements (`value[x]`)
//!
//! A choice field is an enum with one variant per allowed type. The enum
//! delegates traversal to the populated variant, so visitors see the concrete
//! element under the un-suffixed field name.

use crate::types::{Element, Reference};
use crate::visitor::Visitable;

/// Common behaviour of choice enums.
pub trait Choice: Visitable {
    /// The populated variant as an element.
    fn as_element(&self) -> &dyn Element;

    /// The populated variant if it is a `Reference`.
    fn as_reference(&self) -> Option<&Reference> {
        self.as_any().downcast_ref::<Reference>()
    }
}

/// Declares a choice enum with `Choice`, `Visitable` and one `From` per variant.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident($ty:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant($ty)),+
        }

        impl $crate::types::Choice for $name {
            fn as_element(&self) -> &dyn $crate::types::Element {
                match self {
                    $($name::$variant(value) => value),+
                }
            }
        }

        impl $crate::visitor::Visitable for $name {
            fn type_name(&self) -> &'static str {
                $crate::types::Choice::as_element(self).type_name()
            }

            fn type_info(&self) -> &'static $crate::model_support::TypeInfo {
                $crate::types::Choice::as_element(self).type_info()
            }

            fn has_children(&self) -> bool {
                $crate::types::Choice::as_element(self).has_children()
            }

            fn accept(
                &self,
                name: &str,
                index: Option<usize>,
                visitor: &mut dyn $crate::visitor::Visitor,
            ) {
                $crate::types::Choice::as_element(self).accept(name, index, visitor)
            }

            fn as_any(&self) -> &dyn std::any::Any {
                $crate::types::Choice::as_element(self).as_any()
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    $name::$variant(value)
                }
            }
        )+
    };
}

pub(crate) use choice_enum;
