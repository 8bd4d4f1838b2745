//! Macro for declaring port error enums with `impl Into` constructors.
//!
//! Every variant carries named fields. Each variant gets a snake_case
//! constructor whose parameters accept anything convertible into the field
//! type, so adapters can write `UserPersistenceError::query("boom")`.

macro_rules! define_port_error {
    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*)) => {
        ::paste::paste! {
            #[doc = concat!("Build a [`Self::", stringify!($variant), "`] error.")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant () () $($field : $ty,)*);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LookupError {
            Missing { key: String } => "missing key {key}",
            Slow { elapsed_ms: u64 } => "lookup took {elapsed_ms}ms",
            Rejected { key: String, attempts: u8 } => "rejected {key} after {attempts} attempts",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(LookupError::missing("id").to_string(), "missing key id");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        assert_eq!(
            LookupError::slow(1_500_u64),
            LookupError::Slow { elapsed_ms: 1_500 }
        );
    }

    #[test]
    fn mixed_fields_format_in_order() {
        let err = LookupError::rejected("id", 3_u8);
        assert_eq!(err.to_string(), "rejected id after 3 attempts");
    }
}
