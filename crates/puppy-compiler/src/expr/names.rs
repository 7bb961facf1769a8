//! Identifier resolution.

use puppy_core::{DiagnosticKind, Type};
use puppy_parser::ParseTree;

use crate::{Generator, Symbol, builtins};

impl Generator<'_> {
    pub(crate) fn compile_name(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let name = t.text();
        let symbol = match self.env.get(name) {
            Some(symbol) => Some(symbol.clone()),
            None => self.infer_package(t, name),
        };
        match symbol {
            Some(symbol) => {
                out.push_str(&symbol.code);
                symbol.ty
            }
            None => {
                self.ctx.diagnostics.error(
                    t,
                    DiagnosticKind::UndefinedName {
                        name: name.to_string(),
                    },
                );
                self.placeholder(out)
            }
        }
    }

    /// Import the package defining `name`, if there is one.
    pub(crate) fn infer_package(&mut self, at: &ParseTree, name: &str) -> Option<Symbol> {
        let package = builtins::package_of(name)?;
        for (member, symbol) in builtins::package(package)? {
            self.env.set(member, symbol);
        }
        self.env.import_module(package, package);
        tracing::debug!(name, package, "package inferred");
        self.ctx.diagnostics.info(
            at,
            DiagnosticKind::InferredPackage {
                name: name.trim_start_matches('.').to_string(),
                package: package.to_string(),
            },
        );
        self.env.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{expr, generate};
    use puppy_core::{DiagnosticKind, Severity};

    #[test]
    fn prelude_names() {
        let (code, ty) = expr("[#Name 'len']");
        assert_eq!(code, "lib.len");
        assert!(ty.as_func().is_some());
    }

    #[test]
    fn undefined_name_is_a_placeholder() {
        let (code, ctx) = generate("[#Source [#Name 'nothing']]");
        assert_eq!(code, "\tundefined;\n");
        assert!(matches!(
            ctx.diagnostics.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::UndefinedName { name }) if name == "nothing"
        ));
    }

    #[test]
    fn package_members_are_inferred() {
        let (code, ctx) = generate(
            "[#Source [#VarDecl left=[#Name 'x'] right=[#Name 'pi']] \
             [#VarDecl left=[#Name 'y'] right=[#Name 'pi']]]",
        );
        assert_eq!(code, "\tvars['x'] = Math.PI;\n\tvars['y'] = Math.PI;\n");
        assert_eq!(ctx.diagnostics.count(Severity::Info), 1);
    }
}
