//! Helpers for assembling the `JAVA_OPTS` value handed to a JBoss launch script.

use std::fmt;

pub const MODULE_SYSTEM_PACKAGES_PROPERTY: &str = "jboss.modules.system.pkgs";

/// Packages the byteman agent and the test framework need to see from every module.
pub const BUILTIN_MODULE_SYSTEM_PACKAGES: [&str; 2] =
    ["org.jboss.byteman", "jp.co.ntt.oss.jboss.byteman.framework"];

/// A Java option string built by appending fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaOptions(String);

impl JavaOptions {
    pub fn new(initial: impl Into<String>) -> Self {
        Self(initial.into())
    }

    /// Appends `fragment` after `separator`. Empty fragments are skipped so no
    /// dangling separator is left behind.
    pub fn append_with(&mut self, separator: &str, fragment: &str) -> &mut Self {
        if !fragment.is_empty() {
            self.0.push_str(separator);
            self.0.push_str(fragment);
        }
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for JavaOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered package list for `-Djboss.modules.system.pkgs`, builtins first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSystemPackages {
    added: Vec<String>,
}

impl ModuleSystemPackages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, package: impl Into<String>) {
        self.added.push(package.into());
    }

    /// Packages added on top of the builtins, in insertion order.
    pub fn added(&self) -> &[String] {
        &self.added
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        BUILTIN_MODULE_SYSTEM_PACKAGES
            .iter()
            .copied()
            .chain(self.added.iter().map(String::as_str))
    }

    pub fn to_system_property(&self) -> String {
        let packages: Vec<&str> = self.iter().collect();
        format!("-D{}={}", MODULE_SYSTEM_PACKAGES_PROPERTY, packages.join(","))
    }
}

impl<S: Into<String>> Extend<S> for ModuleSystemPackages {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.added.extend(iter.into_iter().map(Into::into));
    }
}
