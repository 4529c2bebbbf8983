//! Default value functions for serde deserialization.
//!
//! These functions forward to constants defined in `routerrules_core::defaults`.

use routerrules_core::defaults;

/// Generate default value functions that forward to routerrules_core::defaults constants.
macro_rules! default_fns {
    ($($fn_name:ident => $const_name:ident : $ty:ty),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> $ty {
                defaults::$const_name
            }
        )*
    };
}

/// Generate default value functions that return String from &str constants.
macro_rules! default_string_fns {
    ($($fn_name:ident => $const_name:ident),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> String {
                defaults::$const_name.to_string()
            }
        )*
    };
}

default_fns! {
    default_backend_timeout_secs => DEFAULT_BACKEND_TIMEOUT_SECS: u64,
}

default_string_fns! {
    default_backend_kind  => DEFAULT_BACKEND_KIND,
    default_backend_codec => DEFAULT_BACKEND_CODEC,
    default_ip_version    => DEFAULT_IP_VERSION,
}
