/// Macros for newtypes wrapping an unsigned integer.
pub(super) mod u64_backed {
    /// Generates const `new` and `get` methods and `PartialEq` against the
    /// wrapped primitive.
    macro_rules! new_get {
        ($target:ty) => {
            crate::macros::u64_backed::new_get!($target, u64);
        };
        ($target:ty, $inner:ty) => {
            impl $target {
                pub const fn new(val: $inner) -> Self {
                    Self(val)
                }

                pub const fn get(&self) -> $inner {
                    self.0
                }
            }

            impl PartialEq<$inner> for $target {
                fn eq(&self, other: &$inner) -> bool {
                    self.0 == *other
                }
            }

            impl From<$inner> for $target {
                fn from(value: $inner) -> Self {
                    Self(value)
                }
            }
        };
    }

    pub(crate) use new_get;
}

pub(super) mod fmt {
    /// Adds a thin Display implementation which uses the inner type's Display.
    macro_rules! thin_display {
        ($target:ty) => {
            impl std::fmt::Display for $target {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    std::fmt::Display::fmt(&self.0, f)
                }
            }
        };
    }

    /// Adds a thin Debug implementation, printing `X(inner)` using the inner
    /// value's Display.
    macro_rules! thin_debug {
        ($target:ty) => {
            impl std::fmt::Debug for $target {
                fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(fmt, "{}({})", stringify!($target), self.0)
                }
            }
        };
    }

    pub(crate) use {thin_debug, thin_display};
}
