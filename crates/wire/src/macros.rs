//! Declarative helpers for JSON-mapped types

/// Set of values carried on the wire as strings
///
/// `enum Name { .. }` is closed: unlisted strings fail to decode.
/// `enum Name(Fallback) { .. }` is open: unlisted strings decode into
/// `Fallback(String)` and encode back unchanged.
///
/// Generates the enum plus `ALL`, `as_str`, `FromStr`, `Display`, serde
/// impls and the `ToJson`/`FromJson` pair.
#[macro_export]
macro_rules! string_enum {
    (@common $name:ident) => {
        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl $crate::ToJson for $name {
            fn to_json(&self) -> $crate::serde_json::Value {
                $crate::serde_json::Value::String(self.as_str().to_string())
            }
        }

        impl $crate::FromJson for $name {
            fn from_json(value: &$crate::serde_json::Value) -> $crate::Result<Self> {
                match value.as_str() {
                    Some(text) => text.parse(),
                    None => Err($crate::type_mismatch(stringify!($name), value)),
                }
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($other:ident) {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Any value not listed above, kept verbatim
            $other(String),
        }

        impl $name {
            /// Every listed value
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::$other(text) => text,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::$other(_))
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                match text {
                    $($wire => $name::$variant,)+
                    other => $name::$other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(text: String) -> Self {
                match $name::from(text.as_str()) {
                    $name::$other(_) => $name::$other(text),
                    known => known,
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> $crate::Result<Self> {
                Ok($name::from(s))
            }
        }

        impl<'de> $crate::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::serde::Deserializer<'de>,
            {
                <String as $crate::serde::Deserialize>::deserialize(deserializer).map($name::from)
            }
        }

        $crate::string_enum!(@common $name);
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> $crate::Result<Self> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::Error::decode(
                        concat!("FromJson<", stringify!($name), ">"),
                        stringify!($name),
                        format!("unknown value {:?}", other),
                        $crate::snippet_str(other),
                    )),
                }
            }
        }

        impl<'de> $crate::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::serde::Deserializer<'de>,
            {
                let text = <String as $crate::serde::Deserialize>::deserialize(deserializer)?;
                match text.as_str() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(<D::Error as $crate::serde::de::Error>::unknown_variant(
                        other,
                        &[$($wire),+],
                    )),
                }
            }
        }

        $crate::string_enum!(@common $name);
    };
}

/// `ToJson`/`FromJson` for a record that already derives serde
///
/// The record must serialize to JSON unconditionally (string map keys, no
/// failing `Serialize` impls).
#[macro_export]
macro_rules! json_via_serde {
    ($ty:ty) => {
        impl $crate::ToJson for $ty {
            fn to_json(&self) -> $crate::serde_json::Value {
                match $crate::serde_json::to_value(self) {
                    Ok(value) => value,
                    Err(e) => {
                        debug_assert!(false, "{} must serialize to JSON: {}", stringify!($ty), e);
                        $crate::serde_json::Value::Null
                    }
                }
            }
        }

        impl $crate::FromJson for $ty {
            fn from_json(value: &$crate::serde_json::Value) -> $crate::Result<Self> {
                <$ty as $crate::serde::Deserialize>::deserialize(value).map_err(|e| {
                    $crate::Error::decode(
                        concat!("FromJson<", stringify!($ty), ">"),
                        stringify!($ty),
                        e.to_string(),
                        $crate::snippet(value),
                    )
                })
            }
        }
    };
}
