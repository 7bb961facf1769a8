//! Prelude and package catalogue.
//!
//! The prelude is bound before any user code. Packages (`math`, `random`,
//! `matterjs`) are bound by `import`/`from ... import`, or automatically the
//! first time one of their names is used.

use puppy_core::{Alpha, FuncSig, Literal, OptionSchema, Type};

use crate::{Effect, Symbol};

/// Names of the importable packages.
pub const PACKAGES: &[&str] = &["math", "random", "matterjs"];

fn func(ret: Type, params: Vec<Type>) -> Type {
    Type::func(FuncSig::new(ret, params))
}

fn shape(code: &str, options: OptionSchema) -> Symbol {
    Symbol::value(code, Type::func(FuncSig::shape(options))).with_effect(Effect::Construct)
}

fn a() -> Type {
    Type::Alpha(Alpha::A)
}

/// Symbols available in every program.
pub fn prelude() -> Vec<(&'static str, Symbol)> {
    let num = Type::Number;
    let opt_num = Type::optional(Type::Number);
    let convertible = Type::union(vec![Type::Bool, Type::String, Type::Number]);
    vec![
        (
            "print",
            Symbol::value(
                "puppy.print",
                Type::func(
                    FuncSig::new(Type::Void, vec![Type::Any]).with_options(OptionSchema::new()),
                ),
            )
            .with_effect(Effect::Observable),
        ),
        (
            "len",
            Symbol::value(
                "lib.len",
                func(num.clone(), vec![Type::union(vec![Type::String, Type::list(a())])]),
            ),
        ),
        (
            "range",
            Symbol::value(
                "puppy.range",
                func(
                    Type::list(Type::Number),
                    vec![num.clone(), opt_num.clone(), opt_num],
                ),
            ),
        ),
        (
            ".append",
            Symbol::value("lib.append", func(Type::Void, vec![Type::list(a()), a()])),
        ),
        ("int", Symbol::value("lib.int", func(num.clone(), vec![convertible.clone()]))),
        ("float", Symbol::value("lib.float", func(num, vec![convertible]))),
        ("str", Symbol::value("lib.str", func(Type::String, vec![Type::Any]))),
        (
            "World",
            Symbol::value("puppy.World", Type::func(FuncSig::shape(OptionSchema::new())))
                .with_effect(Effect::World),
        ),
        ("Circle", shape("puppy.Circle", OptionSchema::new())),
        ("Rectangle", shape("puppy.Rectangle", OptionSchema::new())),
        ("Polygon", shape("puppy.Polygon", OptionSchema::new())),
        ("Label", shape("puppy.Label", OptionSchema::new())),
        (
            "Ball",
            shape(
                "puppy.Circle",
                OptionSchema::new().with("restitution", Some(Literal::number(1.0))),
            ),
        ),
        (
            "Block",
            shape(
                "puppy.Rectangle",
                OptionSchema::new().with("isStatic", Some(Literal::Bool(true))),
            ),
        ),
    ]
}

/// Symbols of a package, or `None` for an unknown package.
pub fn package(name: &str) -> Option<Vec<(&'static str, Symbol)>> {
    match name {
        "math" => Some(math()),
        "random" => Some(vec![(
            "random",
            Symbol::value("Math.random", func(Type::Number, vec![])),
        )]),
        "matterjs" => Some(matterjs()),
        _ => None,
    }
}

/// The package defining `name`, if any.
pub fn package_of(name: &str) -> Option<&'static str> {
    PACKAGES.iter().copied().find(|pkg| {
        package(pkg)
            .map(|symbols| symbols.iter().any(|(n, _)| *n == name))
            .unwrap_or(false)
    })
}

/// A single member of a package.
pub fn member(package_name: &str, name: &str) -> Option<Symbol> {
    package(package_name)?
        .into_iter()
        .find(|(n, _)| *n == name)
        .map(|(_, s)| s)
}

fn math() -> Vec<(&'static str, Symbol)> {
    let unary = || func(Type::Number, vec![Type::Number]);
    let binary = || func(Type::Number, vec![Type::Number, Type::Number]);
    vec![
        ("pi", Symbol::value("Math.PI", Type::Number)),
        ("sin", Symbol::value("Math.sin", unary())),
        ("cos", Symbol::value("Math.cos", unary())),
        ("tan", Symbol::value("Math.tan", unary())),
        ("sqrt", Symbol::value("Math.sqrt", unary())),
        ("log", Symbol::value("Math.log", unary())),
        ("log10", Symbol::value("Math.log10", unary())),
        ("pow", Symbol::value("Math.pow", binary())),
        ("hypot", Symbol::value("Math.hypot", binary())),
        ("gcd", Symbol::value("puppy.gcd", binary())),
    ]
}

fn matterjs() -> Vec<(&'static str, Symbol)> {
    let obj = Type::Object;
    let num = Type::Number;
    let opt = Type::optional(Type::Number);
    let method = |code: &str, params: Vec<Type>| Symbol::value(code, func(Type::Void, params));
    vec![
        (".setPosition", method("lib.setPosition", vec![obj.clone(), num.clone(), num.clone()])),
        (
            ".applyForce",
            method(
                "lib.applyForce",
                vec![obj.clone(), num.clone(), num.clone(), num.clone(), num.clone()],
            ),
        ),
        (".rotate", method("lib.rotate", vec![obj.clone(), num.clone(), opt.clone(), opt.clone()])),
        (
            ".scale",
            method("lib.scale", vec![obj.clone(), num.clone(), num.clone(), opt.clone(), opt]),
        ),
        (".setAngle", method("lib.setAngle", vec![obj.clone(), num.clone()])),
        (".setAngularVelocity", method("lib.setAngularVelocity", vec![obj.clone(), num.clone()])),
        (".setDensity", method("lib.setDensity", vec![obj.clone(), num.clone()])),
        (".setMass", method("lib.setMass", vec![obj.clone(), num.clone()])),
        (".setStatic", method("lib.setStatic", vec![obj.clone(), Type::Bool])),
        (".setVelocity", method("lib.setVelocity", vec![obj, num])),
    ]
}
