//! `import` and `from ... import`.

use puppy_core::{DiagnosticKind, Type};
use puppy_parser::{Label, ParseTree};

use crate::{Generator, builtins};

impl Generator<'_> {
    /// Known package named by an import, reporting unknown ones.
    fn package_name(&mut self, t: &ParseTree) -> Option<&'static str> {
        let name = t.token(Label::Name)?;
        let package = builtins::PACKAGES.iter().copied().find(|p| *p == name);
        if package.is_none() {
            self.ctx.diagnostics.error(
                t,
                DiagnosticKind::UnknownPackage {
                    name: name.to_string(),
                },
            );
        }
        package
    }

    /// `import pkg [as alias]`: members are reached as `alias.member`.
    pub(crate) fn compile_import(&mut self, t: &ParseTree) -> Type {
        if let Some(package) = self.package_name(t) {
            let alias = t.token(Label::Alias).unwrap_or(package);
            self.env.import_module(alias, package);
            tracing::debug!(package, alias, "package imported");
        }
        Type::Void
    }

    /// `from pkg import a, b` binds the listed members; no list or `*`
    /// binds all of them.
    pub(crate) fn compile_from(&mut self, t: &ParseTree) -> Type {
        let Some(package) = self.package_name(t) else {
            return Type::Void;
        };
        let members = builtins::package(package).unwrap_or_default();
        let names: Vec<&ParseTree> = t.args().collect();
        if names.is_empty() || names.iter().any(|n| n.text() == "*") {
            for (name, symbol) in members {
                self.env.set(name, symbol);
            }
            return Type::Void;
        }
        for name in names {
            match members.iter().find(|(m, _)| *m == name.text()) {
                Some((member, symbol)) => self.env.set(*member, symbol.clone()),
                None => self.ctx.diagnostics.error(
                    name,
                    DiagnosticKind::UndefinedName {
                        name: format!("{package}.{}", name.text()),
                    },
                ),
            }
        }
        Type::Void
    }
}
