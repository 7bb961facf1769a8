//! Unification of Puppy types.
//!
//! [`TypeTable`] is a union-find over [`TyVar`] ids. Each equivalence class
//! has a root; the root may carry a bound type. Binding any member binds the
//! whole class, so every member reports the same type afterwards.

use std::fmt;

use crate::{Alpha, FuncSig, TyVar, Type};

/// What a check site asks of a value's type.
#[derive(Debug, Clone, Copy)]
pub enum Request<'a> {
    /// Anything goes.
    Any,
    /// `|`-separated prefixes matched against the rendered given type,
    /// e.g. `"number|str"`.
    Prefixes(&'a str),
    /// A concrete (possibly variable-bearing) type.
    Type(&'a Type),
}

impl fmt::Display for Request<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Any => f.write_str("any"),
            Request::Prefixes(p) => f.write_str(p),
            Request::Type(t) => write!(f, "{t}"),
        }
    }
}

/// Union-find table of type variables for one compilation.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    parent: Vec<u32>,
    bound: Vec<Option<Type>>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new unbound variable.
    pub fn fresh_var(&mut self) -> TyVar {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        self.bound.push(None);
        TyVar(id)
    }

    pub fn fresh(&mut self) -> Type {
        Type::Var(self.fresh_var())
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of `v`'s class.
    pub fn find(&self, v: TyVar) -> TyVar {
        let mut cur = v.0;
        while let Some(&p) = self.parent.get(cur as usize) {
            if p == cur {
                break;
            }
            cur = p;
        }
        TyVar(cur)
    }

    /// Type bound to `v`'s class, if any.
    pub fn probe(&self, v: TyVar) -> Option<&Type> {
        let root = self.find(v);
        self.bound.get(root.index()).and_then(Option::as_ref)
    }

    /// Resolve only the outermost variable chain.
    pub fn shallow(&self, t: &Type) -> Type {
        match t {
            Type::Var(v) => match self.probe(*v) {
                Some(b) => self.shallow(b),
                None => Type::Var(self.find(*v)),
            },
            other => other.clone(),
        }
    }

    /// Fully resolve a type, replacing every bound variable.
    pub fn resolve(&self, t: &Type) -> Type {
        match t {
            Type::Var(v) => match self.probe(*v) {
                Some(b) => self.resolve(b),
                None => Type::Var(self.find(*v)),
            },
            Type::List(elem) => Type::list(self.resolve(elem)),
            Type::Optional(inner) => Type::optional(self.resolve(inner)),
            Type::Union(members) => Type::Union(members.iter().map(|m| self.resolve(m)).collect()),
            Type::Func(sig) => Type::func(FuncSig {
                ret: self.resolve(&sig.ret),
                params: sig.params.iter().map(|p| self.resolve(p)).collect(),
                options: sig.options.clone(),
            }),
            other => other.clone(),
        }
    }

    /// Resolved rendering of a type.
    pub fn render(&self, t: &Type) -> String {
        self.resolve(t).to_string()
    }

    /// Whether `t` resolves to an unbound variable.
    pub fn is_unbound(&self, t: &Type) -> bool {
        matches!(self.shallow(t), Type::Var(_))
    }

    /// Whether the resolved type still mentions an unbound variable.
    pub fn is_untyped(&self, t: &Type) -> bool {
        fn walk(t: &Type) -> bool {
            match t {
                Type::Var(_) => true,
                Type::List(e) | Type::Optional(e) => walk(e),
                Type::Union(ms) => ms.iter().any(walk),
                Type::Func(sig) => walk(&sig.ret) || sig.params.iter().any(walk),
                _ => false,
            }
        }
        walk(&self.resolve(t))
    }

    /// Bind `v`'s class to `t`. Fails when `t` mentions the class itself.
    pub fn bind(&mut self, v: TyVar, t: &Type) -> bool {
        let root = self.find(v);
        let resolved = self.resolve(t);
        if let Type::Var(other) = resolved {
            self.union(root, other);
            return true;
        }
        if mentions(&resolved, root) {
            return false;
        }
        self.bound[root.index()] = Some(resolved);
        true
    }

    /// Merge two classes. The merged class keeps whichever binding exists.
    pub fn union(&mut self, a: TyVar, b: TyVar) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let keep = self.bound[ra.index()].take();
        self.parent[ra.index()] = rb.0;
        if self.bound[rb.index()].is_none() {
            self.bound[rb.index()] = keep;
        }
    }

    /// Check a request against a given type, binding variables on the way.
    pub fn match_type(&mut self, request: Request<'_>, given: &Type) -> bool {
        match request {
            Request::Any => true,
            Request::Prefixes(prefixes) => {
                if self.is_unbound(given) {
                    return true;
                }
                let rendered = self.render(given);
                prefixes.split('|').any(|p| rendered.starts_with(p))
            }
            Request::Type(t) => self.accept(t, given),
        }
    }

    /// Type-versus-type matching.
    pub fn accept(&mut self, request: &Type, given: &Type) -> bool {
        let req = self.shallow(request.strip_optional());
        let given = self.shallow(given.strip_optional());
        match (&req, &given) {
            (Type::Var(a), Type::Var(b)) => {
                self.union(*a, *b);
                true
            }
            (Type::Var(a), g) => self.bind(*a, g),
            (r, Type::Var(b)) => self.bind(*b, r),
            (Type::Any, g) => !g.is_void(),
            (Type::Union(members), g) => members.iter().any(|m| self.accept(m, g)),
            (Type::List(a), Type::List(b)) => self.accept(a, b),
            (Type::Func(f), Type::Func(g)) => {
                f.params.len() == g.params.len()
                    && self.accept(&f.ret, &g.ret)
                    && f
                        .params
                        .iter()
                        .zip(g.params.iter())
                        .all(|(p, q)| self.accept(p, q))
            }
            (r, g) => self.resolve(r) == self.resolve(g),
        }
    }

    /// Instantiate a library signature: the generic slots become two fresh
    /// variables for this call site.
    pub fn unique(&mut self, sig: &FuncSig) -> FuncSig {
        if !sig.has_alpha() {
            return sig.clone();
        }
        let a = self.fresh();
        let b = self.fresh();
        FuncSig {
            ret: substitute(&sig.ret, &a, &b),
            params: sig.params.iter().map(|p| substitute(p, &a, &b)).collect(),
            options: sig.options.clone(),
        }
    }

    /// Element type of an iterable.
    pub fn type_of_seq(&mut self, t: &Type) -> Type {
        match self.shallow(t) {
            Type::List(elem) => *elem,
            Type::String => Type::String,
            _ => self.fresh(),
        }
    }
}

fn mentions(t: &Type, v: TyVar) -> bool {
    match t {
        Type::Var(x) => *x == v,
        Type::List(e) | Type::Optional(e) => mentions(e, v),
        Type::Union(ms) => ms.iter().any(|m| mentions(m, v)),
        Type::Func(sig) => mentions(&sig.ret, v) || sig.params.iter().any(|p| mentions(p, v)),
        _ => false,
    }
}

fn substitute(t: &Type, a: &Type, b: &Type) -> Type {
    match t {
        Type::Alpha(Alpha::A) => a.clone(),
        Type::Alpha(Alpha::B) => b.clone(),
        Type::List(e) => Type::list(substitute(e, a, b)),
        Type::Optional(e) => Type::optional(substitute(e, a, b)),
        Type::Union(ms) => Type::Union(ms.iter().map(|m| substitute(m, a, b)).collect()),
        Type::Func(sig) => Type::func(FuncSig {
            ret: substitute(&sig.ret, a, b),
            params: sig.params.iter().map(|p| substitute(p, a, b)).collect(),
            options: sig.options.clone(),
        }),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concrete() -> Vec<Type> {
        vec![
            Type::Bool,
            Type::Number,
            Type::String,
            Type::Object,
            Type::Vec,
            Type::Any,
            Type::list(Type::Number),
            Type::list(Type::list(Type::String)),
            Type::func(FuncSig::new(Type::Void, vec![Type::Number])),
        ]
    }

    #[test]
    fn matching_is_reflexive() {
        let mut table = TypeTable::new();
        for t in concrete() {
            assert!(table.match_type(Request::Type(&t), &t), "{t}");
        }
    }

    #[test]
    fn prefixes_match_rendering() {
        let mut table = TypeTable::new();
        assert!(table.match_type(Request::Prefixes("number|str"), &Type::String));
        assert!(table.match_type(Request::Prefixes("number|str"), &Type::Number));
        assert!(!table.match_type(Request::Prefixes("number|str"), &Type::Bool));
        assert!(table.match_type(Request::Prefixes("number|list|str"), &Type::list(Type::Bool)));
    }

    #[test]
    fn prefixes_accept_unbound_without_binding() {
        let mut table = TypeTable::new();
        let v = table.fresh();
        assert!(table.match_type(Request::Prefixes("number"), &v));
        assert!(table.is_unbound(&v));
    }

    #[test]
    fn binding_reaches_whole_class() {
        let mut table = TypeTable::new();
        let a = table.fresh();
        let b = table.fresh();
        let c = table.fresh();
        assert!(table.accept(&a, &b));
        assert!(table.accept(&c, &b));
        assert!(table.accept(&Type::Number, &c));
        for v in [&a, &b, &c] {
            assert_eq!(table.resolve(v), Type::Number);
        }
        assert!(!table.accept(&Type::String, &a));
    }

    #[test]
    fn any_rejects_void() {
        let mut table = TypeTable::new();
        assert!(table.accept(&Type::Any, &Type::Number));
        assert!(!table.accept(&Type::Any, &Type::Void));
    }

    #[test]
    fn optional_request_is_stripped() {
        let mut table = TypeTable::new();
        assert!(table.accept(&Type::optional(Type::Number), &Type::Number));
    }

    #[test]
    fn union_accepts_any_member() {
        let mut table = TypeTable::new();
        let req = Type::union(vec![Type::Number, Type::String]);
        assert!(table.accept(&req, &Type::String));
        assert!(!table.accept(&req, &Type::Bool));
    }

    #[test]
    fn lists_recurse_into_elements() {
        let mut table = TypeTable::new();
        let elem = table.fresh();
        assert!(table.accept(&Type::list(elem.clone()), &Type::list(Type::Object)));
        assert_eq!(table.resolve(&elem), Type::Object);
        assert!(!table.accept(&Type::list(Type::Number), &Type::list(Type::String)));
    }

    #[test]
    fn functions_match_pairwise() {
        let mut table = TypeTable::new();
        let r = table.fresh();
        let f = Type::func(FuncSig::new(r.clone(), vec![Type::Number]));
        let g = Type::func(FuncSig::new(Type::Bool, vec![Type::Number]));
        assert!(table.accept(&f, &g));
        assert_eq!(table.resolve(&r), Type::Bool);

        let h = Type::func(FuncSig::new(Type::Bool, vec![]));
        assert!(!table.accept(&g, &h));
    }

    #[test]
    fn occurs_check_refuses_cycles() {
        let mut table = TypeTable::new();
        let v = table.fresh();
        assert!(!table.accept(&v, &Type::list(v.clone())));
    }

    #[test]
    fn unique_gives_fresh_slots_per_call() {
        let mut table = TypeTable::new();
        let sig = FuncSig::new(
            Type::Void,
            vec![Type::list(Type::Alpha(Alpha::A)), Type::Alpha(Alpha::A)],
        );
        let first = table.unique(&sig);
        assert!(table.accept(&first.params[0], &Type::list(Type::Number)));
        assert_eq!(table.resolve(&first.params[1]), Type::Number);

        let second = table.unique(&sig);
        assert!(table.is_unbound(&second.params[1]));
        assert!(table.accept(&second.params[1], &Type::String));
    }

    #[test]
    fn element_of_sequences() {
        let mut table = TypeTable::new();
        assert_eq!(table.type_of_seq(&Type::list(Type::Number)), Type::Number);
        assert_eq!(table.type_of_seq(&Type::String), Type::String);
        let fresh = table.type_of_seq(&Type::Number);
        assert!(table.is_unbound(&fresh));
    }

    #[test]
    fn render_shows_bound_types() {
        let mut table = TypeTable::new();
        let v = table.fresh();
        let list = Type::list(v.clone());
        assert!(table.is_untyped(&list));
        assert!(table.accept(&v, &Type::String));
        assert_eq!(table.render(&list), "list[string]");
        assert!(!table.is_untyped(&list));
    }
}
