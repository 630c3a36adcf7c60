//! Declarations to location resolver: load, merge, translate, index.

use std::path::Path;
use std::sync::Arc;

use quire_config::{Config, ExternalLinkConfig, SourceSetConfig};
use quire_location::{
    ExternalDocumentationLink, ExternalLocations, LocationConfig, LocationResolver, PackageList,
};
use quire_merge::{Includes, apply_includes, merge_variants};
use quire_model::{Declaration, SourceSet, SourceSetOrder};
use quire_pages::translate;

use crate::error::CliError;

/// Source set order declared in the configuration.
pub(crate) fn source_set_order(config: &Config) -> SourceSetOrder {
    config
        .source_sets_resolved
        .iter()
        .map(|s| SourceSet::new(&s.name))
        .collect()
}

/// Run the whole pipeline for `config`.
pub(crate) fn build_resolver(config: &Config) -> Result<LocationResolver, CliError> {
    let order = source_set_order(config);

    let mut trees = Vec::new();
    for source_set in &config.source_sets_resolved {
        trees.extend(load_source_set(source_set)?);
    }

    let merged = merge_variants(trees, &order)?;
    let graph = translate(&merged, &order)?;
    tracing::info!(
        modules = merged.len(),
        pages = graph.len(),
        "Page graph ready"
    );

    let mut external = ExternalLocations::new();
    for link in &config.external_links_resolved {
        external.push(load_external_link(link)?);
    }

    let location_config =
        LocationConfig::new(external).with_extension(config.output.extension.as_str());
    Ok(LocationResolver::new(Arc::new(graph), location_config)?)
}

/// Load the module trees of one source set and apply its include files.
fn load_source_set(config: &SourceSetConfig) -> Result<Vec<Declaration>, CliError> {
    let source_set = SourceSet::new(&config.name);
    let mut modules = read_declarations(&config.declarations)?;
    let includes = Includes::load(&config.includes);

    for module in &mut modules {
        module.assign_source_set(&source_set);
        apply_includes(module, &source_set, &includes);
    }

    tracing::info!(
        source_set = %source_set,
        modules = modules.len(),
        path = %config.declarations.display(),
        "Loaded declarations"
    );
    Ok(modules)
}

fn read_declarations(path: &Path) -> Result<Vec<Declaration>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Declarations {
        path: path.to_path_buf(),
        source,
    })
}

fn load_external_link(link: &ExternalLinkConfig) -> Result<ExternalDocumentationLink, CliError> {
    let content = std::fs::read_to_string(&link.package_list).map_err(|source| CliError::Read {
        path: link.package_list.clone(),
        source,
    })?;
    let list = PackageList::parse(&content);
    tracing::info!(
        url = %link.url,
        packages = list.packages().len(),
        "Loaded package list"
    );
    Ok(ExternalDocumentationLink::from_package_list(&link.url, &list))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;

    use pretty_assertions::assert_eq;
    use quire_config::CliSettings;
    use quire_model::Dri;

    use super::*;

    const JVM: &str = r#"[
  {
    "dri": { "extra": "module:core" },
    "name": "core",
    "kind": "module",
    "children": [
      {
        "dri": { "package": "a.b" },
        "name": "a.b",
        "kind": "package",
        "children": [
          {
            "dri": { "package": "a.b", "class_names": "Foo" },
            "name": "Foo",
            "kind": "classlike",
            "children": [
              {
                "dri": { "package": "a.b", "class_names": "Foo", "callable": "jvmOnly()" },
                "name": "jvmOnly",
                "kind": "function"
              }
            ]
          }
        ]
      }
    ]
  }
]"#;

    const JS: &str = r#"[
  {
    "dri": { "extra": "module:core" },
    "name": "core",
    "kind": "module",
    "children": [
      {
        "dri": { "package": "a.b" },
        "name": "a.b",
        "kind": "package",
        "children": [
          {
            "dri": { "package": "a.b", "class_names": "Foo" },
            "name": "Foo",
            "kind": "classlike"
          }
        ]
      }
    ]
  }
]"#;

    fn write_project(dir: &Path) -> std::path::PathBuf {
        fs::write(dir.join("jvm.json"), JVM).unwrap();
        fs::write(dir.join("js.json"), JS).unwrap();
        fs::write(
            dir.join("Module.md"),
            "# Module core\n\nCore runtime.\n\n# Package a.b\n\nThe a.b package.\n",
        )
        .unwrap();
        fs::write(
            dir.join("package-list"),
            "$quire.format:html-v1\n$quire.linkExtension:html\nmodule:stdlib\nkotlin\n",
        )
        .unwrap();
        let config = dir.join("quire.toml");
        fs::write(
            &config,
            r#"
module_name = "core"

[[source_sets]]
name = "jvm"
declarations = "jvm.json"
includes = ["Module.md"]

[[source_sets]]
name = "js"
declarations = "js.json"

[[external_links]]
url = "https://kotlinlang.org/api/"
package_list = "package-list"
"#,
        )
        .unwrap();
        config
    }

    fn load(dir: &Path) -> Config {
        let path = write_project(dir);
        Config::load(Some(&path), Some(&CliSettings::default())).unwrap()
    }

    #[test]
    fn test_build_resolver_merges_source_sets() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path());

        let resolver = build_resolver(&config).unwrap();

        let graph = resolver.graph();
        assert_eq!(graph.len(), 3);
        let root = graph.page(graph.root()).unwrap();
        assert_eq!(root.name, "core");
        assert_eq!(
            root.source_sets,
            BTreeSet::from([SourceSet::new("jvm"), SourceSet::new("js")])
        );
    }

    #[test]
    fn test_build_resolver_resolves_internal_and_external() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path());
        let both = BTreeSet::from([SourceSet::new("jvm"), SourceSet::new("js")]);

        let resolver = build_resolver(&config).unwrap();

        assert_eq!(
            resolver.resolve_dri(&Dri::for_classlike("a.b", "Foo"), &both, None),
            Some("a.b/-foo.html".to_owned())
        );
        assert_eq!(
            resolver.resolve_dri(&Dri::for_classlike("kotlin", "String"), &both, None),
            Some("https://kotlinlang.org/api/kotlin/-string/index.html".to_owned())
        );
    }

    #[test]
    fn test_member_present_in_one_source_set_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path());
        let member = Dri::for_classlike("a.b", "Foo").with_callable("jvmOnly()");

        let resolver = build_resolver(&config).unwrap();

        assert_eq!(
            resolver.resolve_dri(&member, &BTreeSet::from([SourceSet::new("jvm")]), None),
            Some("a.b/-foo.html#a.b/Foo/jvmOnly()/".to_owned())
        );
        assert_eq!(
            resolver.resolve_dri(&member, &BTreeSet::from([SourceSet::new("js")]), None),
            None
        );
    }

    #[test]
    fn test_missing_declarations_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path());
        fs::remove_file(dir.path().join("js.json")).unwrap();

        let result = build_resolver(&config);

        assert!(matches!(result, Err(CliError::Read { .. })));
    }

    #[test]
    fn test_missing_include_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path());
        fs::remove_file(dir.path().join("Module.md")).unwrap();

        assert!(build_resolver(&config).is_ok());
    }

    #[test]
    fn test_source_set_order_follows_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path());

        let order = source_set_order(&config);

        assert_eq!(order.rank(&SourceSet::new("jvm")), Some(0));
        assert_eq!(order.rank(&SourceSet::new("js")), Some(1));
    }
}
