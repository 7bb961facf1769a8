//! Type values for the Puppy type checker.
//!
//! A [`Type`] is either atomic (`void`, `bool`, `number`, `string`, `object`,
//! `vec`, `any`), a parametric `list[T]`, a union, an optional marker `T?`,
//! a unification variable, one of the reserved generic slots used by library
//! signatures, or a function signature.
//!
//! Variables are small integer ids resolved through a
//! [`TypeTable`](crate::TypeTable); this module only describes the shapes.

use std::fmt::{self, Display, Formatter};

use crate::Literal;

/// A unification variable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TyVar(pub u32);

impl TyVar {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reserved generic slots in library signatures.
///
/// Each call site renames them to fresh variables before checking
/// arguments (see [`TypeTable::unique`](crate::TypeTable::unique)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alpha {
    A,
    B,
}

/// A Puppy type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Bool,
    Number,
    String,
    Object,
    Vec,
    Any,
    List(Box<Type>),
    Union(Vec<Type>),
    Optional(Box<Type>),
    Var(TyVar),
    Alpha(Alpha),
    Func(Box<FuncSig>),
}

impl Type {
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    pub fn optional(inner: Type) -> Self {
        Type::Optional(Box::new(inner))
    }

    /// Build a union; a single member collapses to itself.
    pub fn union(mut members: Vec<Type>) -> Self {
        if members.len() == 1 {
            members.remove(0)
        } else {
            Type::Union(members)
        }
    }

    pub fn func(sig: FuncSig) -> Self {
        Type::Func(Box::new(sig))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Type::Optional(_))
    }

    /// Drop a trailing optional marker.
    pub fn strip_optional(&self) -> &Type {
        match self {
            Type::Optional(inner) => inner,
            other => other,
        }
    }

    pub fn as_func(&self) -> Option<&FuncSig> {
        match self {
            Type::Func(sig) => Some(sig),
            _ => None,
        }
    }

    /// Whether the type mentions a reserved generic slot.
    pub fn has_alpha(&self) -> bool {
        match self {
            Type::Alpha(_) => true,
            Type::List(elem) | Type::Optional(elem) => elem.has_alpha(),
            Type::Union(members) => members.iter().any(Type::has_alpha),
            Type::Func(sig) => sig.has_alpha(),
            _ => false,
        }
    }

    /// Look up an atomic type by its annotation name.
    ///
    /// `list` is not atomic and returns `None`; callers give it a fresh
    /// element variable.
    pub fn from_name(name: &str) -> Option<Type> {
        Some(match name {
            "bool" => Type::Bool,
            "int" | "float" | "number" => Type::Number,
            "str" | "string" => Type::String,
            "object" => Type::Object,
            "vec" => Type::Vec,
            "any" => Type::Any,
            "void" => Type::Void,
            _ => return None,
        })
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Bool => f.write_str("bool"),
            Type::Number => f.write_str("number"),
            Type::String => f.write_str("string"),
            Type::Object => f.write_str("object"),
            Type::Vec => f.write_str("vec"),
            Type::Any => f.write_str("any"),
            Type::List(elem) => write!(f, "list[{elem}]"),
            Type::Union(members) => {
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{m}")?;
                }
                Ok(())
            }
            Type::Optional(inner) => write!(f, "{inner}?"),
            Type::Var(v) => write!(f, "_{}", v.0),
            Type::Alpha(Alpha::A) => f.write_str("$a"),
            Type::Alpha(Alpha::B) => f.write_str("$b"),
            Type::Func(sig) => write!(f, "{sig}"),
        }
    }
}

/// A call signature: return type, parameter types, optional keyword schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FuncSig {
    pub ret: Type,
    pub params: Vec<Type>,
    pub options: Option<OptionSchema>,
}

impl FuncSig {
    pub fn new(ret: Type, params: Vec<Type>) -> Self {
        Self {
            ret,
            params,
            options: None,
        }
    }

    /// Attach a keyword schema; the signature then accepts keyword arguments
    /// after its positional parameters.
    pub fn with_options(mut self, options: OptionSchema) -> Self {
        self.options = Some(options);
        self
    }

    /// Signature of a shape constructor: `(number, number, {..}) -> object`.
    pub fn shape(options: OptionSchema) -> Self {
        FuncSig::new(Type::Object, vec![Type::Number, Type::Number]).with_options(options)
    }

    /// Number of parameters that must be supplied positionally.
    pub fn required_params(&self) -> usize {
        self.params
            .iter()
            .rposition(|p| !p.is_optional())
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    pub fn has_alpha(&self) -> bool {
        self.ret.has_alpha() || self.params.iter().any(Type::has_alpha)
    }
}

impl Display for FuncSig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{p}")?;
        }
        if self.options.is_some() {
            if !self.params.is_empty() {
                f.write_str(",")?;
            }
            f.write_str("..")?;
        }
        write!(f, ")->{}", self.ret)
    }
}

/// Keyword tail of a call signature: canonical key to default value.
///
/// Keys keep their declaration order so emitted defaults are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OptionSchema {
    entries: Vec<(String, Option<Literal>)>,
}

impl OptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key with its default value.
    pub fn with(mut self, key: impl Into<String>, default: Option<Literal>) -> Self {
        self.insert(key.into(), default);
        self
    }

    pub fn insert(&mut self, key: String, default: Option<Literal>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = default,
            None => self.entries.push((key, default)),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&Option<Literal>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Literal>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderings() {
        assert_eq!(Type::list(Type::Number).to_string(), "list[number]");
        assert_eq!(
            Type::union(vec![Type::String, Type::Number]).to_string(),
            "string|number"
        );
        assert_eq!(Type::optional(Type::Number).to_string(), "number?");
        assert_eq!(Type::Var(TyVar(3)).to_string(), "_3");
    }

    #[test]
    fn func_rendering() {
        let sig = FuncSig::new(Type::Void, vec![Type::Object, Type::Number]);
        assert_eq!(Type::func(sig).to_string(), "(object,number)->void");
        let shape = FuncSig::shape(OptionSchema::new());
        assert_eq!(shape.to_string(), "(number,number,..)->object");
    }

    #[test]
    fn union_of_one_collapses() {
        assert_eq!(Type::union(vec![Type::Bool]), Type::Bool);
    }

    #[test]
    fn required_params_ignores_trailing_optionals() {
        let sig = FuncSig::new(
            Type::list(Type::Number),
            vec![
                Type::Number,
                Type::optional(Type::Number),
                Type::optional(Type::Number),
            ],
        );
        assert_eq!(sig.required_params(), 1);
    }

    #[test]
    fn alpha_detection() {
        let sig = FuncSig::new(Type::Void, vec![Type::list(Type::Alpha(Alpha::A))]);
        assert!(sig.has_alpha());
        assert!(!Type::list(Type::Number).has_alpha());
    }

    #[test]
    fn option_schema_keeps_order_and_overwrites() {
        let schema = OptionSchema::new()
            .with("restitution", Some(Literal::number(1.0)))
            .with("isStatic", Some(Literal::Bool(true)))
            .with("restitution", None);
        let keys: Vec<_> = schema.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["restitution", "isStatic"]);
        assert_eq!(schema.get("restitution"), Some(&None));
        assert!(schema.contains("isStatic"));
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn annotation_names() {
        assert_eq!(Type::from_name("int"), Some(Type::Number));
        assert_eq!(Type::from_name("str"), Some(Type::String));
        assert_eq!(Type::from_name("list"), None);
    }
}
