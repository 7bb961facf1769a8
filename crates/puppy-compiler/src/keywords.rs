//! Keyword dictionary.
//!
//! Maps every accepted keyword spelling, including localized aliases, to its
//! canonical property name, and canonical names to their value types.

use puppy_core::{FuncSig, Type};

/// Canonical name for a keyword spelling.
pub fn canonical(name: &str) -> Option<&'static str> {
    Some(match name {
        "width" | "幅" | "横幅" | "縦" => "width",
        "height" | "高さ" | "横" => "height",
        "x" => "x",
        "y" => "y",
        "position" | "位置" => "position",
        "name" | "名前" => "name",
        "image" | "画像" => "image",
        "strokeStyle" | "線の色" => "strokeStyle",
        "lineWidth" | "線の太さ" => "lineWidth",
        "fillStyle" | "色" | "塗り" => "fillStyle",
        "restitution" | "反発係数" | "跳ね返り係数" | "はねかえり係数" => "restitution",
        "angle" | "傾き" | "角度" => "angle",
        "mass" | "質量" => "mass",
        "density" | "密度" => "density",
        "area" | "体積" | "容積" => "area",
        "friction" | "摩擦係数" => "friction",
        "frictionStatic" | "静止摩擦係数" => "frictionStatic",
        "airFriction" | "空気摩擦係数" => "airFriction",
        "torque" | "回転力" | "トルク" => "torque",
        "stiffness" | "剛性" | "ばね定数" => "stiffness",
        "isSensor" | "センサー" => "isSensor",
        "isStatic" | "静止" | "固定" => "isStatic",
        "damping" | "減衰" => "damping",
        "font" | "フォント" => "font",
        "fontStyle" => "fontStyle",
        "fontColor" | "文字色" => "fontColor",
        "textAlign" => "textAlign",
        "value" | "値" => "value",
        "message" | "メッセージ" => "message",
        "clicked" | "クリック" => "clicked",
        "in" => "in",
        "out" => "out",
        "over" => "over",
        "shape" | "形" => "shape",
        _ => return None,
    })
}

fn color() -> Type {
    Type::union(vec![Type::String, Type::Number])
}

fn handler(params: usize) -> Type {
    Type::func(FuncSig::new(Type::Void, vec![Type::Object; params]))
}

/// Value type of a canonical property.
pub fn key_type(key: &str) -> Option<Type> {
    Some(match key {
        "width" | "height" | "x" | "y" | "lineWidth" | "mass" | "density" | "area" | "value" => {
            Type::Number
        }
        "restitution" | "angle" | "friction" | "frictionStatic" | "airFriction" | "torque"
        | "stiffness" | "damping" => Type::Number,
        "image" | "font" | "fontStyle" | "textAlign" | "message" | "name" | "shape" => Type::String,
        "strokeStyle" | "fillStyle" | "fontColor" => color(),
        "position" => Type::Vec,
        "isSensor" | "isStatic" => Type::Bool,
        "in" | "out" | "over" => handler(2),
        "clicked" => handler(1),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_canonical_names() {
        assert_eq!(canonical("色"), Some("fillStyle"));
        assert_eq!(canonical("反発係数"), Some("restitution"));
        assert_eq!(canonical("fillStyle"), Some("fillStyle"));
        assert_eq!(canonical("colour"), None);
    }

    #[test]
    fn vertical_and_horizontal_aliases() {
        assert_eq!(canonical("縦"), Some("width"));
        assert_eq!(canonical("横"), Some("height"));
        assert_eq!(canonical("横幅"), Some("width"));
    }

    #[test]
    fn every_canonical_name_is_its_own_alias() {
        for name in ["width", "fillStyle", "isStatic", "clicked", "position"] {
            assert_eq!(canonical(name), Some(name));
        }
    }

    #[test]
    fn key_types() {
        assert_eq!(key_type("width"), Some(Type::Number));
        assert_eq!(key_type("isStatic"), Some(Type::Bool));
        assert_eq!(key_type("fillStyle").map(|t| t.to_string()), Some("string|number".into()));
        assert_eq!(key_type("clicked").map(|t| t.to_string()), Some("(object)->void".into()));
        assert_eq!(key_type("unknown"), None);
    }
}
