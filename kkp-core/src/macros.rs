/// Generates by-reference and by-value accessors for the newtype variants of a provider
/// or operating system enum.
macro_rules! variant_accessors {
    ($name:ident { $($variant:ident($inner:ty) => $by_ref:ident, $into:ident;)+ }) => {
        impl $name {
            $(
                #[doc = concat!("Returns the `", stringify!($variant), "` settings if this is that variant.")]
                pub fn $by_ref(&self) -> Option<&$inner> {
                    match self {
                        Self::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                #[doc = concat!("Consumes `self`, returning the `", stringify!($variant), "` settings if this is that variant.")]
                pub fn $into(self) -> Option<$inner> {
                    match self {
                        Self::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            )+
        }
    };
}
