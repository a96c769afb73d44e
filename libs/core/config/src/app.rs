//! Static application metadata, surfaced by the `/health` endpoint.

/// Name and version of the running binary, taken from the crate that
/// expands [`app_info!`].
#[derive(Clone, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Build an [`AppInfo`] from the calling crate's Cargo metadata.
///
/// Must be a macro: `env!("CARGO_PKG_NAME")` has to expand in the app
/// crate, not in this library.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn app_info_reports_this_crate() {
        let info = crate::app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
