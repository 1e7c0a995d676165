//! Macros for declaring state sets.

/// Declare a state enumeration and implement [`State`](crate::core::State)
/// for it.
///
/// Variants are listed in declaration order; the first one is the state a
/// machine activates into unless the builder names another. The generated
/// enum also implements `Display` with the variant name.
///
/// # Example
///
/// ```
/// use tickstate::core::State;
/// use tickstate::state_enum;
///
/// state_enum! {
///     pub enum BoarState {
///         Idle,
///         Run,
///         Walk,
///     }
/// }
///
/// assert_eq!(BoarState::first(), Some(BoarState::Idle));
/// assert_eq!(BoarState::Walk.to_string(), "Walk");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $crate::core::State for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
