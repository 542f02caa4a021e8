//! Macro for declaring port error enums.
//!
//! Every variant carries named fields, which may carry their own doc
//! comments. For each variant the macro emits a
//! snake_case constructor whose parameters accept `impl Into<FieldType>`, so
//! adapters can pass `&str` where the variant stores a `String`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident {
                    $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),+ $(,)?
                } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $( $(#[$field_meta])* $field: $ty ),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum ProbePortError {
            Unreachable {
                /// Address that refused the connection.
                message: String,
            } => "unreachable: {message}",
            SlowQuery { millis: u64 } => "query took {millis} ms",
            BadGeometry { message: String, srid: i32 } => "bad geometry in SRID {srid}: {message}",
        }
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = ProbePortError::unreachable("db:5432");
        assert_eq!(err.to_string(), "unreachable: db:5432");
    }

    #[rstest]
    fn multi_word_variants_become_snake_case() {
        let err = ProbePortError::slow_query(1500_u64);
        assert_eq!(err, ProbePortError::SlowQuery { millis: 1500 });
    }

    #[rstest]
    fn mixed_fields_are_converted_in_order() {
        let err = ProbePortError::bad_geometry("ring not closed", 4326);
        assert_eq!(
            err.to_string(),
            "bad geometry in SRID 4326: ring not closed"
        );
    }
}
