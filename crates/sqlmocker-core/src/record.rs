//! Statically declared record types
//!
//! A record type describes its fields once, in declaration order, through
//! [`Record::descriptor`]. The [`record!`](crate::record!) macro writes the
//! struct and that table together so they cannot drift apart.
//!
//! ```
//! use sqlmocker_core::{record, Record, NamingConvention};
//!
//! record! {
//!     #[derive(Debug, Clone)]
//!     pub struct Movie {
//!         pub ID: i64 [skip],
//!         pub Title: String,
//!         pub Rating: f64 [create = "score"],
//!     }
//! }
//!
//! let columns = Movie::descriptor().column_names(NamingConvention::Snake);
//! assert_eq!(columns, vec!["id", "title", "score"]);
//! ```

use crate::schema::TypeDescriptor;
use crate::value::{SemanticType, Value};
use chrono::{DateTime, FixedOffset, Utc};

/// A record type with a static field table
pub trait Record {
    /// Ordered field descriptors; deterministic and free of side effects
    fn descriptor() -> TypeDescriptor;

    /// Field values in descriptor order, `None` for absent fields
    fn values(&self) -> Vec<Option<Value>>;
}

/// Rust types that can back a record field
pub trait FieldType {
    fn semantic_type() -> SemanticType;

    /// `None` is the absent sentinel
    fn to_value(&self) -> Option<Value>;
}

impl FieldType for i64 {
    fn semantic_type() -> SemanticType {
        SemanticType::Integer
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Integer(*self))
    }
}

impl FieldType for i32 {
    fn semantic_type() -> SemanticType {
        SemanticType::Integer
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Integer((*self).into()))
    }
}

impl FieldType for String {
    fn semantic_type() -> SemanticType {
        SemanticType::Text
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Text(self.clone()))
    }
}

impl FieldType for f64 {
    fn semantic_type() -> SemanticType {
        SemanticType::Decimal
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Decimal(*self))
    }
}

impl FieldType for f32 {
    fn semantic_type() -> SemanticType {
        SemanticType::Decimal
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Decimal((*self).into()))
    }
}

impl FieldType for DateTime<Utc> {
    fn semantic_type() -> SemanticType {
        SemanticType::Timestamp
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::timestamp(*self))
    }
}

impl FieldType for DateTime<FixedOffset> {
    fn semantic_type() -> SemanticType {
        SemanticType::Timestamp
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Timestamp(*self))
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn semantic_type() -> SemanticType {
        T::semantic_type()
    }

    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(FieldType::to_value)
    }
}

/// Declare a struct together with its [`Record`] implementation
///
/// Each field may carry options in brackets after its type:
/// `[skip]` leaves it out of inserts, `[create = "COL"]` overrides the
/// column name. Both can be combined: `[skip, create = "COL"]`.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $fvis:vis $field:ident : $ty:ty $([ $($opt:tt)* ])? ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[allow(non_snake_case)]
        $vis struct $name {
            $( $fvis $field: $ty, )*
        }

        impl $crate::record::Record for $name {
            fn descriptor() -> $crate::schema::TypeDescriptor {
                $crate::schema::TypeDescriptor::from_fields(vec![
                    $(
                        $crate::__field_options!(
                            $crate::schema::FieldDescriptor::new(
                                stringify!($field),
                                <$ty as $crate::record::FieldType>::semantic_type(),
                            );
                            $($($opt)*)?
                        )
                    ),*
                ])
            }

            fn values(&self) -> Vec<Option<$crate::value::Value>> {
                vec![ $( $crate::record::FieldType::to_value(&self.$field) ),* ]
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_options {
    ($fd:expr;) => {
        $fd
    };
    ($fd:expr; skip $(, $($rest:tt)*)?) => {
        $crate::__field_options!($fd.skip_on_insert(); $($($rest)*)?)
    };
    ($fd:expr; create = $column:literal $(, $($rest:tt)*)?) => {
        $crate::__field_options!($fd.with_column($column); $($($rest)*)?)
    };
}
