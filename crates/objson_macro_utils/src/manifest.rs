use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for another crate as seen from the
/// caller's Cargo.toml.
///
/// This helper is intended for proc-macro code
/// generation where the emitted path must be valid from the invoking crate.
///
/// # Example
///
/// ```rust
/// # use objson_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("objson_reflect"));
/// ```
///
/// The caller should store the result and call this once per proc-macro invocation.
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies` (possibly renamed through
///    `package = "..."`), return `::local_name`.
/// 2. If the requested crate name begins with `objson_`, and the target crate
///    depends on the facade crate `objson`, return `::objson::short_name`
///    (e.g. `objson_reflect` -> `::objson::reflect`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// ## Note
/// When a crate needs to reference itself, library code should use
/// `crate::...`, while doctests and other external code typically use the
/// absolute path `::crate_name`.
///
/// Adding `extern crate self as objson_reflect;` in the crate root resolves the conflict.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "objson";
const CRATE_PREFIX: &str = "objson_";

impl Manifest {
    // Try get `Cargo.toml` path.
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    // Try get `Cargo.toml` modified time.
    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    // Attempt to parse the provided path as a syntax tree node.
    #[inline]
    fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
        syn::parse_str(path).unwrap()
    }

    // The package a dependency entry points at, honoring `package = "..."` renames.
    fn package_name<'a>(key: &'a str, item: &'a Item) -> &'a str {
        item.get("package")
            .and_then(Item::as_str)
            .unwrap_or(key)
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        let mut facade: Option<&str> = None;

        for (key, item) in deps.iter() {
            let package = Self::package_name(key, item);
            if package == name {
                return Some(Self::parse_str(&format!("::{}", key.replace('-', "_"))));
            }
            if package == FACADE_NAME {
                facade = Some(key);
            }
        }

        let module = name.strip_prefix(CRATE_PREFIX)?;
        let facade = facade?;
        let mut path = Self::parse_str::<syn::Path>(&format!("::{}", facade.replace('-', "_")));
        path.segments.push(Self::parse_str(module));
        Some(path)
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the top-level documentation for the resolution
    /// order and examples.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(val) = Self::find_in_deps(deps, name)
            {
                return val;
            }
        }

        Self::parse_str(&format!("::{name}"))
    }

    /// Obtain the [Manifest] of the caller's Cargo.toml.
    ///
    /// This function reads and caches the caller's `Cargo.toml`, keyed by path and
    /// invalidated when the file's modified time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use toml_edit::Document;

    use super::Manifest;

    fn resolve(toml: &str, name: &str) -> String {
        let manifest = Manifest {
            manifest: Document::parse(Box::<str>::from(toml)).unwrap(),
            modified_time: std::time::SystemTime::UNIX_EPOCH,
        };
        let path = manifest.get_crate_path(name);
        let segments = path
            .segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("::");
        format!("::{segments}")
    }

    #[test]
    fn direct_dependency() {
        let toml = "[dependencies]\nobjson_reflect = \"0.0.1\"\n";
        assert_eq!(resolve(toml, "objson_reflect"), "::objson_reflect");
    }

    #[test]
    fn facade_dependency() {
        let toml = "[dependencies]\nobjson = \"0.0.1\"\n";
        assert_eq!(resolve(toml, "objson_reflect"), "::objson::reflect");
    }

    #[test]
    fn renamed_dependency() {
        let toml = "[dependencies]\nser = { package = \"objson\", version = \"0.0.1\" }\n";
        assert_eq!(resolve(toml, "objson_reflect"), "::ser::reflect");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let toml = "[dev-dependencies]\nobjson_reflect = \"0.0.1\"\n";
        assert_eq!(resolve(toml, "objson_reflect"), "::objson_reflect");

        let toml = "[package]\nname = \"consumer\"\n";
        assert_eq!(resolve(toml, "objson_reflect"), "::objson_reflect");
    }
}
