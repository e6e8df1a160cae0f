/// Generate `EditingSurface` methods that hand the call to `self.base`
/// unchanged and return its result.
macro_rules! forward_to_base {
    ($(fn $name:ident(&mut self $(, $arg:ident: $ty:ty)*) -> $ret:ty;)*) => {
        $(
            fn $name(&mut self $(, $arg: $ty)*) -> $ret {
                tracing::trace!(op = stringify!($name), "forward");
                self.base.$name($($arg),*)
            }
        )*
    };
}
